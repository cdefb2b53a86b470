//! Player name normalization (§4.1): strip accents, uppercase, collapse
//! whitespace, fold a handful of nickname/diminutive spellings, and derive
//! the dotted `eh_id` text identifier used everywhere downstream.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::model::enums::{Position, Session};

/// First-name folding applied before splitting into `eh_id` parts (§4.1).
static FIRST_NAME_OVERRIDES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ALEXANDRE", "ALEX"),
        ("ALEXANDER", "ALEX"),
        ("CHRISTOPHER", "CHRIS"),
    ])
});

/// Full-name override table (§4.1): canonical spelling corrections keyed by
/// the normalized-but-unoverridden name, applied before the `eh_id` split.
/// Empty in the base crate; games needing a correction add an entry here,
/// the same way the fix registry's per-game maps are populated.
static NAME_OVERRIDES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(HashMap::new);

/// Context needed to resolve `eh_id` collisions (§4.1): a handful of real
/// players share a folded name and are disambiguated by position or season.
pub struct NormalizeContext {
    pub position: Option<Position>,
    pub season_start_year: Option<u16>,
}

impl NormalizeContext {
    pub fn new() -> Self {
        Self { position: None, season_start_year: None }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_season_start_year(mut self, season_start_year: u16) -> Self {
        self.season_start_year = Some(season_start_year);
        self
    }
}

impl Default for NormalizeContext {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip accents, uppercase, collapse internal whitespace (§4.1 step 1-3).
pub fn canonicalize(raw: &str) -> String {
    let deaccented = deunicode::deunicode(raw);
    collapse_whitespace(deaccented.trim()).to_uppercase()
}

fn split_first_rest(name: &str) -> (String, String) {
    match name.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.to_string()),
        None => (name.to_string(), String::new()),
    }
}

/// Collision disambiguation, keyed by the undisambiguated `eh_id` (§4.1).
fn disambiguate(eh_id: &str, ctx: &NormalizeContext) -> Option<String> {
    match eh_id {
        "SEBASTIAN.AHO" if ctx.position == Some(Position::Defense) => {
            Some(format!("{eh_id}2"))
        }
        "ERIK.GUSTAFSSON" if ctx.season_start_year.unwrap_or(0) >= 2015 => {
            Some(format!("{eh_id}2"))
        }
        _ => None,
    }
}

/// Full C1 normalization: `(player_name, eh_id)` for a raw name string.
pub fn normalize(raw: &str, ctx: &NormalizeContext) -> (String, String) {
    let canonical = canonicalize(raw);
    let canonical = NAME_OVERRIDES.get(canonical.as_str()).map(|s| s.to_string()).unwrap_or(canonical);

    let (first, rest) = split_first_rest(&canonical);
    let first = FIRST_NAME_OVERRIDES.get(first.as_str()).copied().unwrap_or(&first).to_string();

    let player_name = if rest.is_empty() {
        first.clone()
    } else {
        format!("{first} {rest}")
    };

    let eh_id_base = if rest.is_empty() {
        first.clone()
    } else {
        format!("{first}.{rest}")
    };
    let eh_id = disambiguate(&eh_id_base, ctx).unwrap_or(eh_id_base);

    (player_name, eh_id)
}

/// Convenience wrapper matching the `session ∈ {PR, R, P}` season-year
/// collision rule expressed directly in terms of `Session`/start year.
pub fn normalize_with_session(
    raw: &str,
    position: Option<Position>,
    season_start_year: Option<u16>,
    _session: Option<Session>,
) -> (String, String) {
    let mut ctx = NormalizeContext::new();
    if let Some(p) = position {
        ctx = ctx.with_position(p);
    }
    if let Some(y) = season_start_year {
        ctx = ctx.with_season_start_year(y);
    }
    normalize(raw, &ctx)
}
