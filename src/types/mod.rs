/// Common types shared across the API (teams, localized strings).
pub mod common;
/// Game state enum shared by schedule and standings responses.
pub mod game_state;
/// Schedule fetching types (thin JSON -> record mapping, §3a).
pub mod schedule;
/// Standings fetching types (thin JSON -> record mapping, §3a).
pub mod standings;

pub use common::*;
pub use game_state::*;
pub use schedule::*;
pub use standings::*;
