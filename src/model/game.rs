use chrono::NaiveDate;

use crate::date::Season;
use crate::ids::GameId;
use crate::model::enums::Session;
use crate::types::game_state::GameState;

/// The **Game** entity (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub game_id: GameId,
    pub season: Season,
    pub session: Session,
    pub game_date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub start_time_et: String,
    pub game_state: GameState,
}

impl Game {
    /// Period length in seconds for regulation and overtime, varying by
    /// session (§3 Shift invariants): regulation and playoff OT are both
    /// 1200s; regular-season OT is 300s.
    pub fn period_length_seconds(&self, period: i32) -> i64 {
        if period <= 3 {
            1200
        } else {
            match self.session {
                Session::Regular => 300,
                Session::Playoffs => 1200,
                Session::Preseason => 300,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(session: Session) -> Game {
        Game {
            game_id: GameId::new(2019020684),
            season: Season::new(2019),
            session,
            game_date: NaiveDate::from_ymd_opt(2019, 12, 12).unwrap(),
            home_team: "NSH".into(),
            away_team: "WPG".into(),
            venue: "Bridgestone Arena".into(),
            start_time_et: "19:00".into(),
            game_state: GameState::Final,
        }
    }

    #[test]
    fn regular_season_overtime_is_five_minutes() {
        assert_eq!(sample(Session::Regular).period_length_seconds(4), 300);
    }

    #[test]
    fn playoff_overtime_is_full_period() {
        assert_eq!(sample(Session::Playoffs).period_length_seconds(4), 1200);
    }

    #[test]
    fn regulation_periods_are_twenty_minutes() {
        let game = sample(Session::Regular);
        assert_eq!(game.period_length_seconds(1), 1200);
        assert_eq!(game.period_length_seconds(3), 1200);
    }
}
