//! The expected-goals seam (§3a): this crate computes and exposes every
//! field a shot-quality model would need (`event_distance`, `event_angle`,
//! `shot_type`, zone, strength, danger) but fits no model itself. Callers
//! bring their own `XgModel` and read `FenwickFeatures` off the events this
//! crate already produces.

use crate::model::enums::{ShotType, Zone};

/// The subset of a fenwick event (shot or missed shot) a shot-quality model
/// conditions on, lifted straight from the corresponding `Event` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FenwickFeatures {
    pub event_distance: f64,
    pub event_angle: f64,
    pub shot_type: Option<ShotType>,
    pub zone: Option<Zone>,
    pub strength_state: Option<String>,
    pub is_home: bool,
    pub score_diff: Option<i32>,
    pub danger: bool,
    pub high_danger: bool,
}

/// A pluggable shot-quality model. No implementation ships with this crate;
/// a caller scores events by implementing this trait against their own model.
pub trait XgModel {
    fn score(&self, features: &FenwickFeatures) -> f64;
}
