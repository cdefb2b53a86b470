//! API event parser (C3, §4.3).

use std::collections::HashMap;

use crate::fixes::{self, ApiEventPatch};
use crate::ids::GameId;
use crate::model::enums::{EventTag, Position, Session, TeamVenue, Zone};
use crate::model::event::{Event, EventPlayer, Indicators, OnIceSet, PlayerRole, PlayerRoleTagged, PlayerSentinel, ShotDetail};
use crate::model::roster::{Roster, RosterEntry};
use crate::names::{self, NormalizeContext};
use crate::wire::api_schema::{PlayByPlayResponse, PlayEvent, RosterSpot};

use super::{game_seconds, parse_clock};

fn map_type_desc_key(key: &str) -> Option<EventTag> {
    match key {
        "faceoff" => Some(EventTag::Fac),
        "hit" => Some(EventTag::Hit),
        "giveaway" => Some(EventTag::Give),
        "takeaway" => Some(EventTag::Take),
        "shot-on-goal" => Some(EventTag::Shot),
        "missed-shot" => Some(EventTag::Miss),
        "blocked-shot" => Some(EventTag::Block),
        "goal" => Some(EventTag::Goal),
        "penalty" => Some(EventTag::Penl),
        "delayed-penalty" => Some(EventTag::Delpen),
        "stoppage" => Some(EventTag::Stop),
        "period-start" => Some(EventTag::Pstr),
        "period-end" => Some(EventTag::Pend),
        "game-end" => Some(EventTag::Gend),
        "shootout-complete" => Some(EventTag::Soc),
        "early-intermission-start" => Some(EventTag::Eistr),
        "early-intermission-end" => Some(EventTag::Eiend),
        "national-anthem" => Some(EventTag::Anthem),
        "pregame-start" => Some(EventTag::Pgstr),
        "pregame-end" => Some(EventTag::Pgend),
        "challenge" => Some(EventTag::Chl),
        _ => None,
    }
}

/// Build the C3-side roster from `rosterSpots[]`, resolving venue by
/// matching `teamId` against the payload's home/away team ids.
pub fn build_api_roster(game_id: GameId, response: &PlayByPlayResponse) -> Roster {
    let entries = response
        .roster_spots
        .iter()
        .map(|spot| roster_entry_from_spot(game_id, response, spot))
        .collect();
    Roster { entries }
}

fn roster_entry_from_spot(game_id: GameId, response: &PlayByPlayResponse, spot: &RosterSpot) -> RosterEntry {
    let team_venue = if spot.team_id == response.home_team.id {
        TeamVenue::Home
    } else {
        TeamVenue::Away
    };
    let team = if team_venue == TeamVenue::Home {
        response.home_team.abbrev.clone()
    } else {
        response.away_team.abbrev.clone()
    };
    let raw_name = format!("{} {}", spot.first_name.default, spot.last_name.default);
    let position = spot.position_code.parse::<Position>().unwrap_or(Position::Center);
    let (player_name, eh_id) = names::normalize(&raw_name, &NormalizeContext::new().with_position(position));

    RosterEntry {
        game_id,
        team,
        jersey: spot.sweater_number,
        player_name,
        eh_id,
        api_id: Some(spot.player_id),
        position,
        team_venue,
        starter: false,
        status: crate::model::enums::PlayerStatus::Active,
    }
}

fn resolve(roster: &Roster, api_id: Option<i64>, role: PlayerRole) -> Option<EventPlayer> {
    let api_id = api_id?;
    match roster.by_api_id(api_id) {
        Some(entry) => Some(EventPlayer::Resolved {
            name: entry.player_name.clone(),
            eh_id: entry.eh_id.clone(),
            api_id: entry.api_id,
            position: Some(entry.position),
            role: PlayerRoleTagged(role),
        }),
        None => None,
    }
}

fn zone_from_code(code: &Option<String>) -> Option<Zone> {
    match code.as_deref() {
        Some("O") => Some(Zone::Offensive),
        Some("N") => Some(Zone::Neutral),
        Some("D") => Some(Zone::Defensive),
        _ => None,
    }
}

fn team_abbrev(response: &PlayByPlayResponse, team_id: Option<i64>) -> Option<String> {
    let team_id = team_id?;
    if team_id == response.home_team.id {
        Some(response.home_team.abbrev.clone())
    } else if team_id == response.away_team.id {
        Some(response.away_team.abbrev.clone())
    } else {
        None
    }
}

fn opposite_team(response: &PlayByPlayResponse, team: &Option<String>) -> Option<String> {
    let team = team.as_deref()?;
    if team == response.home_team.abbrev {
        Some(response.away_team.abbrev.clone())
    } else if team == response.away_team.abbrev {
        Some(response.home_team.abbrev.clone())
    } else {
        None
    }
}

/// Build one player slot, applying the sentinel fallbacks from §4.3: a
/// blocked shot with no blocker becomes "REFEREE"; a penalty with no
/// committed-by player becomes "BENCH".
fn resolve_with_sentinel(
    roster: &Roster,
    api_id: Option<i64>,
    role: PlayerRole,
    sentinel: PlayerSentinel,
) -> Option<EventPlayer> {
    resolve(roster, api_id, role).or(Some(EventPlayer::Sentinel { sentinel, role: PlayerRoleTagged(role) }))
}

/// Parse one event's player slots, shot detail, team fields; returns `None`
/// for event types this crate doesn't assign a normalized tag to.
fn build_event(
    game_id: GameId,
    session: Session,
    response: &PlayByPlayResponse,
    roster: &Roster,
    play: &PlayEvent,
) -> Option<Event> {
    let tag = map_type_desc_key(&play.type_desc_key)?;
    let period = play.period_descriptor.number;
    let period_seconds = parse_clock(&play.time_in_period).unwrap_or(0);
    let is_shootout = session == Session::Regular && period == 5;
    let seconds = game_seconds(period, period_seconds, is_shootout);

    let event_team = team_abbrev(response, play.details.event_owner_team_id);
    let opp_team = opposite_team(response, &event_team);

    let (player_1, player_2, player_3, shot) = match tag {
        EventTag::Fac => (
            resolve(roster, play.details.winning_player_id, PlayerRole::Winner),
            resolve(roster, play.details.losing_player_id, PlayerRole::Loser),
            None,
            None,
        ),
        EventTag::Hit => (
            resolve(roster, play.details.hitting_player_id, PlayerRole::Hitter),
            resolve(roster, play.details.hittee_player_id, PlayerRole::Hittee),
            None,
            None,
        ),
        EventTag::Give => (resolve(roster, play.details.player_id, PlayerRole::Giver), None, None, None),
        EventTag::Take => (resolve(roster, play.details.player_id, PlayerRole::Taker), None, None, None),
        EventTag::Shot | EventTag::Miss => (
            resolve(roster, play.details.shooting_player_id, PlayerRole::Shooter),
            None,
            None,
            Some(ShotDetail {
                shot_type: play.details.shot_type.as_deref().and_then(|s| s.parse().ok()),
                ..Default::default()
            }),
        ),
        EventTag::Block => (
            resolve_with_sentinel(roster, play.details.blocking_player_id, PlayerRole::Blocker, PlayerSentinel::Referee),
            resolve(roster, play.details.shooting_player_id, PlayerRole::Shooter),
            None,
            Some(ShotDetail {
                shot_type: play.details.shot_type.as_deref().and_then(|s| s.parse().ok()),
                ..Default::default()
            }),
        ),
        EventTag::Goal => (
            resolve(roster, play.details.scoring_player_id, PlayerRole::GoalScorer),
            resolve(roster, play.details.assist1_player_id, PlayerRole::PrimaryAssist),
            resolve(roster, play.details.assist2_player_id, PlayerRole::SecondaryAssist),
            Some(ShotDetail {
                shot_type: play.details.shot_type.as_deref().and_then(|s| s.parse().ok()),
                ..Default::default()
            }),
        ),
        EventTag::Penl => (
            resolve_with_sentinel(roster, play.details.committed_by_player_id, PlayerRole::CommittedBy, PlayerSentinel::Bench),
            resolve(roster, play.details.drawn_by_player_id, PlayerRole::DrawnBy),
            resolve(roster, play.details.served_by_player_id, PlayerRole::ServedBy),
            None,
        ),
        _ => (None, None, None, None),
    };

    let opp_goalie = resolve(roster, play.details.goalie_in_net_id, PlayerRole::Shooter);

    Some(Event {
        game_id,
        event_idx: play.sort_order,
        event_idx_api: Some(play.event_id),
        event: tag,
        version: 1,
        event_team,
        opp_team,
        period,
        period_seconds,
        game_seconds: seconds,
        coords_x: play.details.x_coord,
        coords_y: play.details.y_coord,
        zone: zone_from_code(&play.details.zone_code),
        player_1,
        player_2,
        player_3,
        opp_goalie,
        shot,
        penalty: None,
        event_team_on_ice: OnIceSet::default(),
        opp_team_on_ice: OnIceSet::default(),
        strength_state: None,
        score_state: None,
        score_diff: None,
        home_score: 0,
        away_score: 0,
        event_length: 0,
        indicators: Indicators::default(),
    })
}

fn apply_patch(event: &mut Event, patch: &ApiEventPatch) {
    if let Some(p1) = &patch.player_1 {
        event.player_1 = Some(override_to_player(p1, event.player_1.as_ref()));
    }
    if let Some(p2) = &patch.player_2 {
        event.player_2 = Some(override_to_player(p2, event.player_2.as_ref()));
    }
    if let Some(p3) = &patch.player_3 {
        event.player_3 = Some(override_to_player(p3, event.player_3.as_ref()));
    }
    if patch.swap_player_1_and_2 {
        std::mem::swap(&mut event.player_1, &mut event.player_2);
    }
}

fn override_to_player(over: &fixes::PlayerOverride, existing: Option<&EventPlayer>) -> EventPlayer {
    let role = existing.map(|p| p.role()).unwrap_or(PlayerRole::CommittedBy);
    if let Some(name) = &over.name {
        return EventPlayer::Resolved {
            name: name.clone(),
            eh_id: over.eh_id.clone().unwrap_or_else(|| name.clone()),
            api_id: over.api_id,
            position: None,
            role: PlayerRoleTagged(role),
        };
    }
    match existing {
        Some(EventPlayer::Resolved { name, eh_id, position, .. }) => EventPlayer::Resolved {
            name: name.clone(),
            eh_id: eh_id.clone(),
            api_id: over.api_id,
            position: *position,
            role: PlayerRoleTagged(role),
        },
        _ => EventPlayer::Sentinel { sentinel: PlayerSentinel::Bench, role: PlayerRoleTagged(role) },
    }
}

/// Assign `version = 1, 2, …` within each `(period, event, game_seconds,
/// player_1_api_id)` bucket, in encounter order (§4.3).
fn assign_versions(events: &mut [Event]) {
    let mut counters: HashMap<(i32, EventTag, i64, Option<i64>), i32> = HashMap::new();
    for event in events.iter_mut() {
        let api_id = match &event.player_1 {
            Some(EventPlayer::Resolved { api_id, .. }) => *api_id,
            _ => None,
        };
        let key = (event.period, event.event, event.game_seconds, api_id);
        let counter = counters.entry(key).or_insert(0);
        *counter += 1;
        event.version = *counter;
    }
}

/// Parse `plays[]` into canonical events, applying C2 fixes and version
/// bucketing. Dropped events (§9) are omitted from the result.
pub fn parse_api_events(
    game_id: GameId,
    session: Session,
    response: &PlayByPlayResponse,
    roster: &Roster,
) -> Vec<Event> {
    let mut events: Vec<Event> = Vec::new();
    for play in &response.plays {
        if let Some(mut event) = build_event(game_id, session, response, roster, play) {
            let mut patch = ApiEventPatch::default();
            fixes::apply_api_events_fix(game_id, event.event_idx, &mut patch);
            if patch.drop {
                continue;
            }
            apply_patch(&mut event, &patch);
            events.push(event);
        }
    }
    assign_versions(&mut events);
    events
}
