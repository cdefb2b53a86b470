//! HTML event parser (C4, §4.4): regex extraction over PL report rows.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fixes::{self, HtmlEventRow};
use crate::ids::GameId;
use crate::model::enums::{EventTag, Position, Session, Zone};
use crate::model::event::{Event, EventPlayer, Indicators, OnIceSet, PlayerRole, PlayerRoleTagged, PlayerSentinel, PenaltyDetail, ShotDetail};
use crate::model::roster::Roster;

use super::{game_seconds, parse_clock};

/// Canonicalize the handful of team abbreviations the HTML reports spell
/// differently from the API feed (§4.4).
pub fn canonicalize_team(raw: &str) -> String {
    match raw {
        "L.A" | "L.A." => "LAK".to_string(),
        "N.J" | "N.J." => "NJD".to_string(),
        "S.J" | "S.J." => "SJS".to_string(),
        "T.B" | "T.B." => "TBL".to_string(),
        other => other.to_string(),
    }
}

fn zone_from_word(word: &str) -> Option<Zone> {
    match word {
        "OFF" => Some(Zone::Offensive),
        "DEF" => Some(Zone::Defensive),
        "NEU" => Some(Zone::Neutral),
        _ => None,
    }
}

static FACEOFF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<t1>[A-Z.]{2,3}) WON (?:.*? )?(?P<zone>OFF|DEF|NEU)\. ZONE\s*-\s*(?P<t1b>[A-Z.]{2,3}) #(?P<j1>\d+)\s+[A-Z'\-. ]+?\s+VS\s+(?P<t2>[A-Z.]{2,3}) #(?P<j2>\d+)").unwrap()
});

static HIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<t1>[A-Z.]{2,3}) #(?P<j1>\d+) HIT (?P<t2>[A-Z.]{2,3}) #(?P<j2>\d+) [A-Z'\-. ]+?,\s*(?P<zone>OFF|DEF|NEU)\. ZONE").unwrap()
});

static GIVE_TAKE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<team>[A-Z.]{2,3}) #(?P<jersey>\d+)").unwrap()
});

static SHOT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<team>[A-Z.]{2,3}) #(?P<jersey>\d+) [A-Z'\-. ]+?,\s*(?P<shot_type>[A-Z\- ]+?),\s*(?P<zone>OFF|DEF|NEU)\. ZONE,\s*(?P<dist>\d+)\s*FT\.").unwrap()
});

static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<t1>[A-Z.]{2,3}) #(?P<j1>\d*) BLOCKED BY (?P<t2>[A-Z.]{2,3}) #(?P<j2>\d+) [A-Z'\-. ]+?,\s*(?P<shot_type>[A-Z\- ]+?),\s*(?P<zone>OFF|DEF|NEU)\. ZONE").unwrap()
});

static PENL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<team>[A-Z.]{2,3})\s+(?:BENCH|#(?P<jersey>\d+))[^(]*\((?P<len>\d+)\s*MIN\)").unwrap()
});

static SERVED_BY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"SERVED BY:\s*#?(?P<jersey>\d+)").unwrap());
static DRAWN_BY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"DRAWN BY:\s*(?P<team>[A-Z.]{2,3})\s*#(?P<jersey>\d+)").unwrap()
});

/// Substring cascade for canonical penalty labels (§4.4, §9: order is
/// load-bearing — the first matching substring wins).
const PENALTY_CASCADE: &[(&str, &str)] = &[
    ("HOOKING ON BREAKAWAY", "HOOKING"),
    ("TRIPPING ON BREAKAWAY", "TRIPPING"),
    ("HOOKING", "HOOKING"),
    ("TRIPPING", "TRIPPING"),
    ("SLASHING", "SLASHING"),
    ("HIGH-STICKING", "HIGH-STICKING"),
    ("HIGH STICKING", "HIGH-STICKING"),
    ("ROUGHING", "ROUGHING"),
    ("INTERFERENCE", "INTERFERENCE"),
    ("HOLDING", "HOLDING"),
    ("CROSS CHECKING", "CROSS-CHECKING"),
];

fn canonical_penalty(text: &str) -> Option<String> {
    for (needle, label) in PENALTY_CASCADE {
        if text.contains(needle) {
            return Some((*label).to_string());
        }
    }
    None
}

fn resolve_jersey(roster: &Roster, team: &str, jersey: Option<i32>, role: PlayerRole) -> Option<EventPlayer> {
    let jersey = jersey?;
    let entry = roster.resolve_team_jersey(team, jersey)?;
    Some(EventPlayer::Resolved {
        name: entry.player_name.clone(),
        eh_id: entry.eh_id.clone(),
        api_id: entry.api_id,
        position: Some(entry.position),
        role: PlayerRoleTagged(role),
    })
}

fn parse_jersey_opt(s: &str) -> Option<i32> {
    if s.is_empty() {
        None
    } else {
        s.parse().ok()
    }
}

/// Parse one HTML play-by-play row into a canonical event. Returns `None`
/// for non-team informational tags this crate maps without team context
/// (STOP/PSTR/PEND/.../CHL without team) — those are still emitted, just
/// without player resolution.
pub fn parse_html_event_row(
    game_id: GameId,
    session: Session,
    event_idx: i64,
    event_tag: EventTag,
    mut row: HtmlEventRow,
    description: &str,
    roster: &Roster,
) -> Event {
    fixes::apply_html_events_fix(game_id, event_idx, &mut row);
    let description = if row.description != description { row.description.clone() } else { description.to_string() };

    let period = row.period;
    let period_seconds = parse_clock(&row.time).unwrap_or(0);
    let is_shootout = session == Session::Regular && period == 5;
    let seconds = game_seconds(period, period_seconds, is_shootout);

    let mut event_team = None;
    let mut opp_team = None;
    let mut player_1 = None;
    let mut player_2 = None;
    let mut shot = None;
    let mut penalty = None;
    let mut zone = None;

    match event_tag {
        EventTag::Fac => {
            if let Some(caps) = FACEOFF_RE.captures(&description) {
                let t1 = canonicalize_team(&caps["t1"]);
                let t2 = canonicalize_team(&caps["t2"]);
                zone = zone_from_word(&caps["zone"]);
                player_1 = resolve_jersey(roster, &t1, caps["j1"].parse().ok(), PlayerRole::Winner);
                player_2 = resolve_jersey(roster, &t2, caps["j2"].parse().ok(), PlayerRole::Loser);
                opp_team = Some(t2.clone());
                event_team = Some(t1);
            }
        }
        EventTag::Hit => {
            if let Some(caps) = HIT_RE.captures(&description) {
                let t1 = canonicalize_team(&caps["t1"]);
                let t2 = canonicalize_team(&caps["t2"]);
                zone = zone_from_word(&caps["zone"]);
                player_1 = resolve_jersey(roster, &t1, caps["j1"].parse().ok(), PlayerRole::Hitter);
                player_2 = resolve_jersey(roster, &t2, caps["j2"].parse().ok(), PlayerRole::Hittee);
                opp_team = Some(t2.clone());
                event_team = Some(t1);
            }
        }
        EventTag::Give => {
            if let Some(caps) = GIVE_TAKE_RE.captures(&description) {
                let t1 = canonicalize_team(&caps["team"]);
                player_1 = resolve_jersey(roster, &t1, caps["jersey"].parse().ok(), PlayerRole::Giver);
                event_team = Some(t1);
            }
        }
        EventTag::Take => {
            if let Some(caps) = GIVE_TAKE_RE.captures(&description) {
                let t1 = canonicalize_team(&caps["team"]);
                player_1 = resolve_jersey(roster, &t1, caps["jersey"].parse().ok(), PlayerRole::Taker);
                event_team = Some(t1);
            }
        }
        EventTag::Shot | EventTag::Miss | EventTag::Goal => {
            if let Some(caps) = SHOT_RE.captures(&description) {
                let t1 = canonicalize_team(&caps["team"]);
                zone = zone_from_word(&caps["zone"]);
                let distance: f64 = caps["dist"].parse().unwrap_or(0.0);
                player_1 = resolve_jersey(roster, &t1, caps["jersey"].parse().ok(), PlayerRole::Shooter);
                shot = Some(ShotDetail {
                    shot_type: caps["shot_type"].trim().parse().ok(),
                    pbp_distance: Some(distance),
                    ..Default::default()
                });
                event_team = Some(t1);
            }
        }
        EventTag::Block => {
            if let Some(caps) = BLOCK_RE.captures(&description) {
                let t1 = canonicalize_team(&caps["t1"]);
                let t2 = canonicalize_team(&caps["t2"]);
                zone = zone_from_word(&caps["zone"]);
                let shooter_jersey = parse_jersey_opt(&caps["j1"]);
                player_1 = resolve_jersey(roster, &t2, caps["j2"].parse().ok(), PlayerRole::Blocker)
                    .or(Some(EventPlayer::Sentinel { sentinel: PlayerSentinel::Referee, role: PlayerRoleTagged(PlayerRole::Blocker) }));
                player_2 = resolve_jersey(roster, &t1, shooter_jersey, PlayerRole::Shooter);
                shot = Some(ShotDetail { shot_type: caps["shot_type"].trim().parse().ok(), ..Default::default() });
                // event_team is the blocking team, per §4.4 "flip FAC/BLOCK player order".
                event_team = Some(t2.clone());
                opp_team = Some(t1);
            }
        }
        EventTag::Penl => {
            if let Some(caps) = PENL_RE.captures(&description) {
                let t1 = canonicalize_team(&caps["team"]);
                let jersey = caps.name("jersey").and_then(|m| m.as_str().parse().ok());
                let length: u8 = caps["len"].parse().unwrap_or(0);
                player_1 = match jersey {
                    Some(j) => resolve_jersey(roster, &t1, Some(j), PlayerRole::CommittedBy),
                    None => Some(EventPlayer::Sentinel { sentinel: PlayerSentinel::Bench, role: PlayerRoleTagged(PlayerRole::CommittedBy) }),
                };
                if let Some(served) = SERVED_BY_RE.captures(&description) {
                    player_2 = resolve_jersey(roster, &t1, served["jersey"].parse().ok(), PlayerRole::ServedBy);
                }
                if let Some(drawn) = DRAWN_BY_RE.captures(&description) {
                    let drawn_team = canonicalize_team(&drawn["team"]);
                    let drawn_player = resolve_jersey(roster, &drawn_team, drawn["jersey"].parse().ok(), PlayerRole::DrawnBy);
                    if player_2.is_none() {
                        player_2 = drawn_player;
                    }
                }
                penalty = Some(PenaltyDetail {
                    penalty: canonical_penalty(&description),
                    penalty_length: Some(length),
                    reason: None,
                });
                event_team = Some(t1);
            }
        }
        _ => {}
    }

    Event {
        game_id,
        event_idx,
        event_idx_api: None,
        event: event_tag,
        version: 1,
        event_team,
        opp_team,
        period,
        period_seconds,
        game_seconds: seconds,
        coords_x: None,
        coords_y: None,
        zone,
        player_1,
        player_2,
        player_3: None,
        opp_goalie: None,
        shot,
        penalty,
        event_team_on_ice: OnIceSet::default(),
        opp_team_on_ice: OnIceSet::default(),
        strength_state: None,
        score_state: None,
        score_diff: None,
        home_score: 0,
        away_score: 0,
        event_length: 0,
        indicators: Indicators::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::enums::TeamVenue;
    use crate::model::roster::RosterEntry;

    fn roster_with(team: &str, jersey: i32, name: &str, eh_id: &str, position: Position) -> Roster {
        Roster {
            entries: vec![RosterEntry {
                game_id: GameId::new(1),
                team: team.into(),
                jersey,
                player_name: name.into(),
                eh_id: eh_id.into(),
                api_id: Some(1),
                position,
                team_venue: TeamVenue::Home,
                starter: true,
                status: crate::model::enums::PlayerStatus::Active,
            }],
        }
    }

    #[test]
    fn canonicalizes_la_kings_abbreviation() {
        assert_eq!(canonicalize_team("L.A"), "LAK");
    }

    #[test]
    fn parses_hit_row_with_zone() {
        let roster = roster_with("NYR", 22, "ARTEMI PANARIN", "ARTEMI.PANARIN", Position::Left);
        let row = HtmlEventRow { period: 3, time: "10:00".into(), description: "x".into() };
        let event = parse_html_event_row(
            GameId::new(2014020672),
            Session::Regular,
            297,
            EventTag::Hit,
            row,
            "NYR #22 HIT PIT #16 SUTTER, DEF. ZONE",
            &roster,
        );
        assert_eq!(event.event_team.as_deref(), Some("NYR"));
        assert_eq!(event.zone, Some(Zone::Defensive));
    }

    #[test]
    fn parses_shot_row_with_distance() {
        let roster = roster_with("FLA", 27, "NICK BJUGSTAD", "NICK.BJUGSTAD", Position::Center);
        let row = HtmlEventRow { period: 2, time: "5:00".into(), description: "x".into() };
        let event = parse_html_event_row(
            GameId::new(2015020193),
            Session::Regular,
            196,
            EventTag::Shot,
            row,
            "FLA #27 BJUGSTAD, WRIST, OFF. ZONE, 16 FT.",
            &roster,
        );
        assert_eq!(event.event_team.as_deref(), Some("FLA"));
        assert_eq!(event.shot.as_ref().unwrap().pbp_distance, Some(16.0));
        assert_eq!(event.zone, Some(Zone::Offensive));
    }

    #[test]
    fn parses_penalty_with_served_and_drawn_by() {
        let roster = Roster { entries: vec![] };
        let row = HtmlEventRow { period: 1, time: "2:00".into(), description: "x".into() };
        let description = "NJD BENCH PS-HOOKING ON BREAKAWAY(0 MIN) NJD SERVED BY: #2 ZIDLICKY DRAWN BY: FLA #42 HOWDEN";
        let event = parse_html_event_row(
            GameId::new(2012020660),
            Session::Regular,
            150,
            EventTag::Penl,
            row,
            description,
            &roster,
        );
        assert_eq!(event.event_team.as_deref(), Some("NJD"));
        assert_eq!(event.penalty.as_ref().unwrap().penalty_length, Some(0));
        assert_eq!(event.penalty.as_ref().unwrap().penalty.as_deref(), Some("HOOKING"));
    }

    #[test]
    fn block_row_falls_back_to_referee_sentinel_when_unresolved() {
        let roster = roster_with("BUF", 6, "COLIN WEBER", "COLIN.WEBER", Position::Defense);
        let row = HtmlEventRow { period: 3, time: "8:00".into(), description: "x".into() };
        let event = parse_html_event_row(
            GameId::new(2014020600),
            Session::Regular,
            328,
            EventTag::Block,
            row,
            "CAR # BLOCKED BY BUF #6 WEBER, WRIST, DEF. ZONE",
            &roster,
        );
        assert_eq!(event.event_team.as_deref(), Some("BUF"));
        match event.player_1 {
            Some(EventPlayer::Resolved { ref eh_id, .. }) => assert_eq!(eh_id, "COLIN.WEBER"),
            other => panic!("expected blocker to resolve, got {other:?}"),
        }
    }
}
