/// Normalized enums shared across the domain model (positions, zones, event
/// tags, shot types, sessions).
pub mod enums;
/// The Game entity.
pub mod game;
/// The Player/RosterEntry entity.
pub mod roster;
/// The Shift entity.
pub mod shift;
/// The Change entity, built by C7 from consecutive shift boundaries.
pub mod change;
/// The canonical Event entity, the output of C3/C4/C8/C9.
pub mod event;

pub use change::{Change, ChangePlayer};
pub use enums::{EventTag, PlayerStatus, Position, Session, ShotType, TeamVenue, Zone};
pub use event::{
    Event, EventPlayer, Indicators, OnIceSet, OnIceSkater, PenaltyDetail, PlayerRole,
    PlayerRoleTagged, PlayerSentinel, ShotDetail,
};
pub use game::Game;
pub use roster::{Roster, RosterEntry, TeamJersey};
pub use shift::Shift;
