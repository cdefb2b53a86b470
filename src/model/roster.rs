use std::collections::HashMap;

use crate::ids::GameId;
use crate::model::enums::{PlayerStatus, Position, TeamVenue};

/// `(team, jersey)` key used throughout C3-C7 to resolve a player reference
/// against the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamJersey {
    pub team: String,
    pub jersey: i32,
}

impl TeamJersey {
    pub fn new(team: impl Into<String>, jersey: i32) -> Self {
        Self { team: team.into(), jersey }
    }
}

/// The **Player (RosterEntry)** entity (§3), keyed by `(game_id, team, jersey)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub game_id: GameId,
    pub team: String,
    pub jersey: i32,
    pub player_name: String,
    pub eh_id: String,
    pub api_id: Option<i64>,
    pub position: Position,
    pub team_venue: TeamVenue,
    pub starter: bool,
    pub status: PlayerStatus,
}

/// All roster entries for one game, indexed for the lookups C3-C7 need:
/// by `(team, jersey)` (HTML path) and by `api_id` (JSON path).
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn by_team_jersey(&self, team: &str, jersey: i32) -> Option<&RosterEntry> {
        self.entries
            .iter()
            .find(|e| e.team == team && e.jersey == jersey)
    }

    /// Active-then-scratched lookup, per §4.5/§7 (a scratch reference is
    /// legal for post-game corrections, an unresolved reference is not).
    pub fn resolve_team_jersey(&self, team: &str, jersey: i32) -> Option<&RosterEntry> {
        self.entries
            .iter()
            .find(|e| e.team == team && e.jersey == jersey && e.status == PlayerStatus::Active)
            .or_else(|| self.by_team_jersey(team, jersey))
    }

    pub fn by_api_id(&self, api_id: i64) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.api_id == Some(api_id))
    }

    pub fn index_by_api_id(&self) -> HashMap<i64, &RosterEntry> {
        self.entries
            .iter()
            .filter_map(|e| e.api_id.map(|id| (id, e)))
            .collect()
    }

    pub fn active(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter().filter(|e| e.status == PlayerStatus::Active)
    }

    pub fn starters(&self, team: &str) -> impl Iterator<Item = &RosterEntry> + '_ {
        let team = team.to_string();
        self.entries
            .iter()
            .filter(move |e| e.team == team && e.starter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(team: &str, jersey: i32, status: PlayerStatus) -> RosterEntry {
        RosterEntry {
            game_id: GameId::new(2013020971),
            team: team.into(),
            jersey,
            player_name: "NATHAN HORTON".into(),
            eh_id: "NATHAN.HORTON".into(),
            api_id: Some(8470596),
            position: Position::Right,
            team_venue: TeamVenue::Home,
            starter: true,
            status,
        }
    }

    #[test]
    fn resolves_active_before_scratch() {
        let roster = Roster {
            entries: vec![entry("CBJ", 16, PlayerStatus::Active)],
        };
        let found = roster.resolve_team_jersey("CBJ", 16).unwrap();
        assert_eq!(found.eh_id, "NATHAN.HORTON");
        assert_eq!(found.api_id, Some(8470596));
    }

    #[test]
    fn falls_back_to_scratch_reference() {
        let roster = Roster {
            entries: vec![entry("CBJ", 16, PlayerStatus::Scratch)],
        };
        assert!(roster.resolve_team_jersey("CBJ", 16).is_some());
    }

    #[test]
    fn unresolved_jersey_returns_none() {
        let roster = Roster { entries: vec![entry("CBJ", 16, PlayerStatus::Active)] };
        assert!(roster.resolve_team_jersey("CBJ", 99).is_none());
    }
}
