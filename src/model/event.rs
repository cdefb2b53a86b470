use crate::ids::GameId;
use crate::model::enums::{EventTag, Position, ShotType, Zone};

/// Player role tags used in `player_1..3` slots (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    GoalScorer,
    PrimaryAssist,
    SecondaryAssist,
    Shooter,
    Blocker,
    Hitter,
    Hittee,
    CommittedBy,
    DrawnBy,
    ServedBy,
    Winner,
    Loser,
    Giver,
    Taker,
}

impl PlayerRole {
    pub const fn code(&self) -> &'static str {
        match self {
            PlayerRole::GoalScorer => "GOAL SCORER",
            PlayerRole::PrimaryAssist => "PRIMARY ASSIST",
            PlayerRole::SecondaryAssist => "SECONDARY ASSIST",
            PlayerRole::Shooter => "SHOOTER",
            PlayerRole::Blocker => "BLOCKER",
            PlayerRole::Hitter => "HITTER",
            PlayerRole::Hittee => "HITTEE",
            PlayerRole::CommittedBy => "COMMITTED BY",
            PlayerRole::DrawnBy => "DRAWN BY",
            PlayerRole::ServedBy => "SERVED BY",
            PlayerRole::Winner => "WINNER",
            PlayerRole::Loser => "LOSER",
            PlayerRole::Giver => "GIVER",
            PlayerRole::Taker => "TAKER",
        }
    }
}

/// Sentinel player identities used when no real player fills a role (§4.3,
/// §4.9): a drawn blocked shot with no blocker, or a bench/team-issued
/// penalty. Kept as an enum rather than magic strings so C8/C9 can match on
/// them instead of comparing to `"BENCH"`/`"REFEREE"` literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSentinel {
    Bench,
    Referee,
}

impl PlayerSentinel {
    pub const fn code(&self) -> &'static str {
        match self {
            PlayerSentinel::Bench => "BENCH",
            PlayerSentinel::Referee => "REFEREE",
        }
    }
}

/// One filled player slot: either a resolved roster player or a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPlayer {
    Resolved {
        name: String,
        eh_id: String,
        api_id: Option<i64>,
        position: Option<Position>,
        role: PlayerRoleTagged,
    },
    Sentinel {
        sentinel: PlayerSentinel,
        role: PlayerRoleTagged,
    },
}

/// `PlayerRole` paired at construction time so callers never get a player
/// slot without also knowing why it's filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerRoleTagged(pub PlayerRole);

impl EventPlayer {
    pub fn role(&self) -> PlayerRole {
        match self {
            EventPlayer::Resolved { role, .. } => role.0,
            EventPlayer::Sentinel { role, .. } => role.0,
        }
    }

    pub fn eh_id(&self) -> &str {
        match self {
            EventPlayer::Resolved { eh_id, .. } => eh_id.as_str(),
            EventPlayer::Sentinel { sentinel, .. } => sentinel.code(),
        }
    }
}

/// Shot-specific subrecord (§3, §9 design note).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShotDetail {
    pub shot_type: Option<ShotType>,
    pub pbp_distance: Option<f64>,
    pub event_distance: Option<f64>,
    pub event_angle: Option<f64>,
    pub danger: bool,
    pub high_danger: bool,
}

/// Penalty-specific subrecord (§3, §9 design note).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PenaltyDetail {
    pub penalty: Option<String>,
    pub penalty_length: Option<u8>,
    pub reason: Option<String>,
}

/// Six on-ice arrays per team (§3), filled in at C9.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnIceSkater {
    pub name: String,
    pub eh_id: String,
    pub api_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnIceSet {
    pub forwards: Vec<OnIceSkater>,
    pub defense: Vec<OnIceSkater>,
    pub goalies: Vec<OnIceSkater>,
}

impl OnIceSet {
    pub fn skater_count(&self) -> usize {
        self.forwards.len() + self.defense.len()
    }
}

/// The per-event dummy indicators emitted by C9 step 8.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Indicators {
    pub shot: bool,
    pub fenwick: bool,
    pub corsi: bool,
    pub block: bool,
    pub miss: bool,
    pub goal: bool,
    pub hit: bool,
    pub give: bool,
    pub take: bool,
    pub fac: bool,
    pub penl: bool,
    pub change: bool,
    pub stop: bool,
    pub chl: bool,
    pub ozf: bool,
    pub nzf: bool,
    pub dzf: bool,
    pub ozc: bool,
    pub nzc: bool,
    pub dzc: bool,
    pub otf: bool,
    pub pen0: bool,
    pub pen2: bool,
    pub pen4: bool,
    pub pen5: bool,
    pub pen10: bool,
}

/// The canonical **Event** record (§3): union of the API and HTML sources,
/// constructed by C3/C4, patched by C2, merged by C8, and completed by C9.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub game_id: GameId,
    pub event_idx: i64,
    pub event_idx_api: Option<i64>,
    pub event: EventTag,
    pub version: i32,

    pub event_team: Option<String>,
    pub opp_team: Option<String>,
    pub period: i32,
    pub period_seconds: i64,
    pub game_seconds: i64,

    pub coords_x: Option<f64>,
    pub coords_y: Option<f64>,
    pub zone: Option<Zone>,

    pub player_1: Option<EventPlayer>,
    pub player_2: Option<EventPlayer>,
    pub player_3: Option<EventPlayer>,
    pub opp_goalie: Option<EventPlayer>,

    pub shot: Option<ShotDetail>,
    pub penalty: Option<PenaltyDetail>,

    pub event_team_on_ice: OnIceSet,
    pub opp_team_on_ice: OnIceSet,

    pub strength_state: Option<String>,
    pub score_state: Option<String>,
    pub score_diff: Option<i32>,
    pub home_score: i32,
    pub away_score: i32,

    pub event_length: i64,

    pub indicators: Indicators,
}

impl Event {
    /// `(game_id, period, period_seconds, event, player_1_id, version)` (§3).
    pub fn identity(&self) -> (GameId, i32, i64, EventTag, String, i32) {
        (
            self.game_id,
            self.period,
            self.period_seconds,
            self.event,
            self.player_1.as_ref().map(|p| p.eh_id().to_string()).unwrap_or_default(),
            self.version,
        )
    }

    pub fn sort_key(&self) -> (i32, i64, i32, i32) {
        (self.period, self.period_seconds, self.event.sort_value(), self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_event() -> Event {
        Event {
            game_id: GameId::new(2019020684),
            event_idx: 331,
            event_idx_api: None,
            event: EventTag::Goal,
            version: 1,
            event_team: Some("NSH".into()),
            opp_team: Some("WPG".into()),
            period: 3,
            period_seconds: 1125,
            game_seconds: 3525,
            coords_x: Some(-96.0),
            coords_y: Some(11.0),
            zone: Some(Zone::Offensive),
            player_1: Some(EventPlayer::Resolved {
                name: "PEKKA RINNE".into(),
                eh_id: "PEKKA.RINNE".into(),
                api_id: Some(8471234),
                position: Some(Position::Goalie),
                role: PlayerRoleTagged(PlayerRole::GoalScorer),
            }),
            player_2: None,
            player_3: None,
            opp_goalie: None,
            shot: None,
            penalty: None,
            event_team_on_ice: OnIceSet::default(),
            opp_team_on_ice: OnIceSet::default(),
            strength_state: Some("5vE".into()),
            score_state: None,
            score_diff: None,
            home_score: 0,
            away_score: 0,
            event_length: 0,
            indicators: Indicators::default(),
        }
    }

    #[test]
    fn identity_uses_player_1_eh_id() {
        let (_, period, seconds, tag, eh_id, version) = base_event().identity();
        assert_eq!(period, 3);
        assert_eq!(seconds, 1125);
        assert_eq!(tag, EventTag::Goal);
        assert_eq!(eh_id, "PEKKA.RINNE");
        assert_eq!(version, 1);
    }

    #[test]
    fn sort_key_orders_goal_before_stop() {
        let goal = base_event();
        let mut stop = base_event();
        stop.event = EventTag::Stop;
        assert!(goal.sort_key() < stop.sort_key());
    }

    #[test]
    fn sentinel_player_uses_code_as_eh_id() {
        let sentinel = EventPlayer::Sentinel {
            sentinel: PlayerSentinel::Bench,
            role: PlayerRoleTagged(PlayerRole::CommittedBy),
        };
        assert_eq!(sentinel.eh_id(), "BENCH");
    }
}
