//! On-ice reconstructor (C9, §4.9): from rosters + shifts + changes +
//! scoring events, compute on-ice skaters, strength state, score state,
//! danger flags, and derived indicators for every row in the merged stream.

use std::collections::HashMap;

use crate::geometry;
use crate::model::change::Change;
use crate::model::enums::{EventTag, Position, Session, TeamVenue, Zone};
use crate::model::event::{Event, Indicators, OnIceSet, OnIceSkater};
use crate::model::roster::{Roster, TeamJersey};

/// Period boundaries, in game-seconds, at which a CHANGE is considered
/// "on the whistle" rather than "on the fly" (§4.9 step 7).
const PERIOD_BOUNDARIES: &[i64] = &[0, 1200, 2400, 3600, 3900];

/// One row of the fully reconstructed play-by-play: either a completed
/// canonical event, or a CHANGE with its derived `zone_start`.
#[derive(Debug, Clone)]
pub enum PbpRow {
    Event(Event),
    Change(Change),
}

impl PbpRow {
    pub fn period(&self) -> i32 {
        match self {
            PbpRow::Event(e) => e.period,
            PbpRow::Change(c) => c.period,
        }
    }

    pub fn period_seconds(&self) -> i64 {
        match self {
            PbpRow::Event(e) => e.period_seconds,
            PbpRow::Change(c) => c.period_seconds,
        }
    }

    pub fn game_seconds(&self) -> i64 {
        match self {
            PbpRow::Event(e) => e.game_seconds,
            PbpRow::Change(c) => c.game_seconds,
        }
    }

    fn sort_value(&self) -> i32 {
        match self {
            PbpRow::Event(e) => e.event.sort_value(),
            PbpRow::Change(_) => EventTag::Change.sort_value(),
        }
    }

    fn event_idx(&self) -> i64 {
        match self {
            PbpRow::Event(e) => e.event_idx,
            PbpRow::Change(_) => i64::MAX,
        }
    }
}

/// Per-player on-ice counters, incremented by CHANGE on and decremented by
/// CHANGE off; a player is on-ice iff its counter is positive (§4.9).
#[derive(Debug, Default)]
struct OnIceCounters {
    counts: HashMap<TeamJersey, i32>,
}

impl OnIceCounters {
    fn apply_change(&mut self, change: &Change) {
        for player in change.forwards_on.iter().chain(&change.defense_on).chain(&change.goalies_on) {
            *self.counts.entry(TeamJersey::new(&change.team, player.jersey)).or_insert(0) += 1;
        }
        for player in change.forwards_off.iter().chain(&change.defense_off).chain(&change.goalies_off) {
            *self.counts.entry(TeamJersey::new(&change.team, player.jersey)).or_insert(0) -= 1;
        }
    }

    fn on_ice_for_team<'a>(&self, roster: &'a Roster, team: &str) -> OnIceSet {
        let mut set = OnIceSet::default();
        for entry in roster.entries.iter().filter(|e| e.team == team) {
            let on_ice = self
                .counts
                .get(&TeamJersey::new(team, entry.jersey))
                .copied()
                .unwrap_or(0)
                > 0;
            if !on_ice {
                continue;
            }
            let skater = OnIceSkater { name: entry.player_name.clone(), eh_id: entry.eh_id.clone(), api_id: entry.api_id };
            match entry.position {
                Position::Defense => set.defense.push(skater),
                Position::Goalie => set.goalies.push(skater),
                _ => set.forwards.push(skater),
            }
        }
        set
    }
}

fn strength_code(on_ice: &OnIceSet) -> String {
    if on_ice.goalies.is_empty() {
        if on_ice.skater_count() > 5 {
            "ILLEGAL".to_string()
        } else {
            "E".to_string()
        }
    } else {
        on_ice.skater_count().to_string()
    }
}

/// Compute `"NvM"` strength state for the event team vs. opponent (§4.9 step 3).
fn strength_state(event_on_ice: &OnIceSet, opp_on_ice: &OnIceSet) -> String {
    let own = strength_code(event_on_ice);
    let opp = strength_code(opp_on_ice);
    if own == "ILLEGAL" || opp == "ILLEGAL" {
        return "ILLEGAL".to_string();
    }
    format!("{own}v{opp}")
}

fn is_period_boundary(period_seconds: i64) -> bool {
    PERIOD_BOUNDARIES.contains(&period_seconds)
}

fn event_distance_and_angle(x: f64, y: f64) -> (f64, f64) {
    let distance = ((89.0 - x).powi(2) + y.powi(2)).sqrt();
    let depth = (89.0 - x.abs()).abs();
    let mut angle = if depth > 0.0 { (y.abs() / depth).atan().to_degrees() } else { 90.0 };
    if y < 0.0 {
        angle = -angle;
    }
    (distance, angle)
}

/// Sort the merged event/change stream by `(period, period_seconds,
/// sort_value, version)`, falling back to `event_idx` in a regular-season
/// shootout period (§4.8).
pub fn sort_timeline(rows: &mut [PbpRow], session: Session) {
    rows.sort_by_key(|row| {
        let shootout = session == Session::Regular && row.period() == 5;
        if shootout {
            (row.period(), row.event_idx(), 0, 0)
        } else {
            let version = match row {
                PbpRow::Event(e) => e.version,
                PbpRow::Change(c) => i32::from(c.is_away),
            };
            (row.period(), row.period_seconds(), row.sort_value(), version)
        }
    });
}

/// Run the full C9 pass over an already-sorted timeline, in place:
/// scoring, on-ice snapshots, strength/score state, coordinate fix, danger
/// classification, zone_start for changes, indicators, and `event_length`.
pub fn reconstruct(rows: &mut [PbpRow], roster: &Roster, session: Session) {
    let mut counters = OnIceCounters::default();
    let mut home_score = 0i32;
    let mut away_score = 0i32;
    let home_team = roster
        .entries
        .iter()
        .find(|e| e.team_venue == TeamVenue::Home)
        .map(|e| e.team.clone());

    // Find the FAC at each (period, game_seconds) to support CHANGE zone_start.
    let fac_lookup: HashMap<(i32, i64), (Zone, String)> = rows
        .iter()
        .filter_map(|row| match row {
            PbpRow::Event(e) if e.event == EventTag::Fac => {
                let zone = e.zone?;
                let team = e.event_team.clone()?;
                Some(((e.period, e.game_seconds), (zone, team)))
            }
            _ => None,
        })
        .collect();

    let is_shootout_period = |period: i32| session == Session::Regular && period == 5;
    let decisive_shootout_goal = if session == Session::Regular { shootout_decisive_event(rows) } else { None };

    for row in rows.iter_mut() {
        match row {
            PbpRow::Change(change) => {
                counters.apply_change(change);
                if let Some((zone, fac_team)) = fac_lookup.get(&(change.period, change.game_seconds)) {
                    if !is_period_boundary(change.period_seconds) {
                        let zone = if &change.team != fac_team { zone.flipped() } else { *zone };
                        change.zone_start = Some(zone);
                    }
                }
            }
            PbpRow::Event(event) => {
                if event.event == EventTag::Goal {
                    let counts = if is_shootout_period(event.period) {
                        decisive_shootout_goal.as_ref().map(|(idx, _)| *idx == event.event_idx).unwrap_or(false)
                    } else {
                        true
                    };
                    if counts {
                        match &event.event_team {
                            Some(team) if Some(team.clone()) == home_team => home_score += 1,
                            Some(_) => away_score += 1,
                            None => {}
                        }
                    }
                }
                event.home_score = home_score;
                event.away_score = away_score;
                event.score_diff = Some(home_score - away_score);

                let event_team = event.event_team.clone();
                let opp_team = event.opp_team.clone();

                if let Some(team) = &event_team {
                    let on_ice = counters.on_ice_for_team(roster, team);
                    let is_home = Some(team.clone()) == home_team;
                    if is_shootout_period(event.period) {
                        event.strength_state = Some("1v0".to_string());
                    } else {
                        let opp = opp_team.as_ref().map(|t| counters.on_ice_for_team(roster, t)).unwrap_or_default();
                        event.strength_state = Some(strength_state(&on_ice, &opp));
                        event.event_team_on_ice = on_ice;
                        event.opp_team_on_ice = opp;
                    }
                    event.score_state = Some(if is_home {
                        format!("{home_score}v{away_score}")
                    } else {
                        format!("{away_score}v{home_score}")
                    });
                }

                if event.event.is_fenwick() {
                    if let (Some(x), Some(y)) = (event.coords_x, event.coords_y) {
                        let excluded = event
                            .shot
                            .as_ref()
                            .and_then(|s| s.shot_type)
                            .map(|t| t.excluded_from_distance_fix())
                            .unwrap_or(false);
                        let should_mirror = !excluded
                            && event.shot.as_ref().and_then(|s| s.pbp_distance).unwrap_or(0.0) > 89.0
                            && event.zone == Some(Zone::Defensive);
                        let effective_x = if should_mirror { -x } else { x };
                        let (distance, angle) = event_distance_and_angle(effective_x, y);
                        if let Some(shot) = event.shot.as_mut() {
                            shot.event_distance = Some(distance);
                            shot.event_angle = Some(angle);
                            let (danger, high_danger) = if event.zone == Some(Zone::Offensive) {
                                geometry::classify_danger(x, y)
                            } else {
                                (false, false)
                            };
                            shot.danger = danger;
                            shot.high_danger = high_danger;
                        }
                    }
                }

                set_indicators(event);
            }
        }
    }

    // event_length = seconds to next row, 0 for the last (§4.9 step 9).
    let seconds: Vec<i64> = rows.iter().map(|r| r.game_seconds()).collect();
    for i in 0..rows.len() {
        let length = if i + 1 < rows.len() { seconds[i + 1] - seconds[i] } else { 0 };
        if let PbpRow::Event(event) = &mut rows[i] {
            event.event_length = length;
        }
    }
}

/// Find the decisive shootout attempt in a regular-season P5 (§4.9 step 1):
/// the last GOAL/SHOT/MISS attempt, counted only if it's a goal and the
/// shooting team already leads the shootout goal tally with it. Full
/// alternating-round shootout bookkeeping is not reproduced; this mirrors
/// how the final shootout goal alone shows up in the box score.
fn shootout_decisive_event(rows: &[PbpRow]) -> Option<(i64, String)> {
    let mut attempts: Vec<&Event> = rows
        .iter()
        .filter_map(|row| match row {
            PbpRow::Event(e) if e.period == 5 && matches!(e.event, EventTag::Goal | EventTag::Shot | EventTag::Miss) => Some(e),
            _ => None,
        })
        .collect();
    attempts.sort_by_key(|e| e.event_idx);

    let mut goals: HashMap<String, i32> = HashMap::new();
    let mut last: Option<(i64, String, bool)> = None;
    for attempt in &attempts {
        let team = attempt.event_team.clone().unwrap_or_default();
        if attempt.event == EventTag::Goal {
            *goals.entry(team.clone()).or_insert(0) += 1;
        }
        last = Some((attempt.event_idx, team, attempt.event == EventTag::Goal));
    }

    let (idx, team, is_goal) = last?;
    if !is_goal {
        return None;
    }
    let own = *goals.get(&team).unwrap_or(&0);
    let opp: i32 = goals.iter().filter(|(t, _)| **t != team).map(|(_, v)| *v).sum();
    if own > opp {
        Some((idx, team))
    } else {
        None
    }
}

/// Set the dummy per-event indicators (§4.9 step 8).
fn set_indicators(event: &mut Event) {
    let tag = event.event;
    event.indicators = Indicators {
        shot: tag == EventTag::Shot,
        fenwick: tag.is_fenwick(),
        corsi: tag.is_corsi(),
        block: tag == EventTag::Block,
        miss: tag == EventTag::Miss,
        goal: tag == EventTag::Goal,
        hit: tag == EventTag::Hit,
        give: tag == EventTag::Give,
        take: tag == EventTag::Take,
        fac: tag == EventTag::Fac,
        penl: tag == EventTag::Penl,
        change: false,
        stop: tag == EventTag::Stop,
        chl: tag == EventTag::Chl,
        ozf: tag == EventTag::Fac && event.zone == Some(Zone::Offensive),
        nzf: tag == EventTag::Fac && event.zone == Some(Zone::Neutral),
        dzf: tag == EventTag::Fac && event.zone == Some(Zone::Defensive),
        ozc: false,
        nzc: false,
        dzc: false,
        otf: false,
        pen0: tag == EventTag::Penl && event.penalty.as_ref().and_then(|p| p.penalty_length) == Some(0),
        pen2: tag == EventTag::Penl && event.penalty.as_ref().and_then(|p| p.penalty_length) == Some(2),
        pen4: tag == EventTag::Penl && event.penalty.as_ref().and_then(|p| p.penalty_length) == Some(4),
        pen5: tag == EventTag::Penl && event.penalty.as_ref().and_then(|p| p.penalty_length) == Some(5),
        pen10: tag == EventTag::Penl && event.penalty.as_ref().and_then(|p| p.penalty_length) == Some(10),
    };
}
