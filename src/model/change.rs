use crate::ids::GameId;
use crate::model::enums::{Position, Zone};

/// A single player referenced by a CHANGE event (§3): enough identity to
/// join back to the roster without re-deriving it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePlayer {
    pub jersey: i32,
    pub name: String,
    pub eh_id: String,
    pub api_id: Option<i64>,
    pub position: Position,
}

/// The **Change** entity (§3): players on/off at a `(period, team, second)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub game_id: GameId,
    pub team: String,
    pub is_away: bool,
    pub period: i32,
    pub period_seconds: i64,
    pub game_seconds: i64,
    pub forwards_on: Vec<ChangePlayer>,
    pub defense_on: Vec<ChangePlayer>,
    pub goalies_on: Vec<ChangePlayer>,
    pub forwards_off: Vec<ChangePlayer>,
    pub defense_off: Vec<ChangePlayer>,
    pub goalies_off: Vec<ChangePlayer>,
    pub zone_start: Option<Zone>,
}

impl Change {
    pub fn change_on_count(&self) -> usize {
        self.forwards_on.len() + self.defense_on.len() + self.goalies_on.len()
    }

    pub fn change_off_count(&self) -> usize {
        self.forwards_off.len() + self.defense_off.len() + self.goalies_off.len()
    }

    pub fn event_type(&self) -> &'static str {
        if self.is_away {
            "AWAY CHANGE"
        } else {
            "HOME CHANGE"
        }
    }

    /// Human-readable summary: a one-line, comma-joined description, the
    /// same style used elsewhere for list-style records.
    pub fn description(&self) -> String {
        let on: Vec<&str> = self
            .forwards_on
            .iter()
            .chain(&self.defense_on)
            .chain(&self.goalies_on)
            .map(|p| p.name.as_str())
            .collect();
        let off: Vec<&str> = self
            .forwards_off
            .iter()
            .chain(&self.defense_off)
            .chain(&self.goalies_off)
            .map(|p| p.name.as_str())
            .collect();
        format!("{} ON, {} OFF", on.join(", "), off.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(jersey: i32, name: &str, position: Position) -> ChangePlayer {
        ChangePlayer {
            jersey,
            name: name.into(),
            eh_id: name.replace(' ', "."),
            api_id: None,
            position,
        }
    }

    #[test]
    fn counts_split_on_and_off() {
        let change = Change {
            game_id: GameId::new(2020020860),
            team: "DAL".into(),
            is_away: false,
            period: 4,
            period_seconds: 0,
            game_seconds: 3600,
            forwards_on: vec![player(9, "FORWARD ONE", Position::Center)],
            defense_on: vec![],
            goalies_on: vec![player(29, "GOALIE ONE", Position::Goalie)],
            forwards_off: vec![],
            defense_off: vec![],
            goalies_off: vec![],
            zone_start: None,
        };
        assert_eq!(change.change_on_count(), 2);
        assert_eq!(change.change_off_count(), 0);
        assert_eq!(change.event_type(), "HOME CHANGE");
    }
}
