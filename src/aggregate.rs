//! Aggregator (C10, §4.10): five views over a game's reconstructed PBP —
//! individual, on-ice, combined stats, lines, and team totals — with per-60
//! rates, share percentages, and score/venue-adjusted `_adj` variants. Pure
//! over its input, so the per-player fan out runs on `rayon`. Grouping
//! dimensions (level, strength state, score, teammates, opposition) are
//! selected via `GroupBy` and composed into the key each row is bucketed on.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::ids::GameId;
use crate::model::enums::{EventTag, TeamVenue, Zone};
use crate::model::event::{Event, OnIceSet};
use crate::onice::PbpRow;

/// The aggregation granularity (§4.10 `level`). `Period` and `Game` further
/// split rows by the event's own `period`/`game_id`; `Session` and `Season`
/// aggregate over whatever scope of rows the caller passes in, since a
/// `PbpRow` carries no session/season tag of its own — the caller is
/// expected to have already concatenated the rows for the desired scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    Period,
    #[default]
    Game,
    Session,
    Season,
}

/// Which grouping dimensions (§4.10) compose the aggregation key, beyond the
/// always-present `(eh_id, team)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupBy {
    pub level: Level,
    pub strength_state: bool,
    pub score: bool,
    pub teammates: bool,
    pub opposition: bool,
}

/// The composed grouping key a row is bucketed under (§4.10). Empty/`None`
/// fields mean that dimension wasn't selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
struct GroupKey {
    eh_id: String,
    team: String,
    game_id: Option<GameId>,
    period: Option<i32>,
    strength_state: Option<String>,
    score_state: Option<String>,
    teammates: Vec<String>,
    opposition: Vec<String>,
}

/// A forward-trio/defense-pair's own identity plus the same level/strength/
/// score split `GroupKey` offers; teammates/opposition don't apply since the
/// line's membership already fixes who's being aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
struct LineKey {
    team: String,
    eh_ids: Vec<String>,
    game_id: Option<GameId>,
    period: Option<i32>,
    strength_state: Option<String>,
    score_state: Option<String>,
}

/// Individual counting stats (§4.10 `ind`), one row per selected group key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndRow {
    pub eh_id: String,
    pub team: String,
    pub period: Option<i32>,
    pub strength_state: Option<String>,
    pub score_state: Option<String>,
    pub teammates: Vec<String>,
    pub opposition: Vec<String>,
    pub toi: f64,
    pub g: i32,
    pub g_adj: f64,
    pub a1: i32,
    pub a2: i32,
    pub isf: i32,
    pub isf_adj: f64,
    pub iff: i32,
    pub iff_adj: f64,
    pub icf: i32,
    pub icf_adj: f64,
    pub imsf: i32,
    pub ibs: i32,
    pub ihf: i32,
    pub iht: i32,
    pub ifow_oz: i32,
    pub ifow_nz: i32,
    pub ifow_dz: i32,
    pub ifol_oz: i32,
    pub ifol_nz: i32,
    pub ifol_dz: i32,
    pub ipent2: i32,
    pub ipent4: i32,
    pub ipent5: i32,
    pub ipent10: i32,
    pub ipend2: i32,
    pub ipend4: i32,
    pub ipend5: i32,
    pub ipend10: i32,
}

/// On-ice counting stats (§4.10 `oi`), one row per selected group key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OiRow {
    pub eh_id: String,
    pub team: String,
    pub period: Option<i32>,
    pub strength_state: Option<String>,
    pub score_state: Option<String>,
    pub teammates: Vec<String>,
    pub opposition: Vec<String>,
    pub toi: f64,
    pub gf: i32,
    pub gf_adj: f64,
    pub ga: i32,
    pub ga_adj: f64,
    pub xgf: f64,
    pub xga: f64,
    pub sf: i32,
    pub sf_adj: f64,
    pub sa: i32,
    pub sa_adj: f64,
    pub ff: i32,
    pub ff_adj: f64,
    pub fa: i32,
    pub fa_adj: f64,
    pub cf: i32,
    pub cf_adj: f64,
    pub ca: i32,
    pub ca_adj: f64,
    pub bsf: i32,
    pub bsa: i32,
    pub msf: i32,
    pub msa: i32,
    pub hf: i32,
    pub ht: i32,
    pub fow: i32,
    pub fol: i32,
    pub ozf: i32,
    pub nzf: i32,
    pub dzf: i32,
    pub ozs: i32,
    pub nzs: i32,
    pub dzs: i32,
    pub otf: i32,
}

impl OiRow {
    fn p60(&self, count: i32) -> f64 {
        if self.toi <= 0.0 {
            0.0
        } else {
            60.0 * count as f64 / self.toi
        }
    }
}

/// `ind ⋈ oi` with `_p60` and `_percent` fields (§4.10 `stats`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRow {
    pub eh_id: String,
    pub team: String,
    pub toi: f64,
    pub ind: IndRow,
    pub oi: OiRow,
    pub g_p60: f64,
    pub a1_p60: f64,
    pub isf_p60: f64,
    pub gf_p60: f64,
    pub sf_p60: f64,
    pub cf_percent: f64,
    pub ff_percent: f64,
    pub gf_percent: f64,
    pub xgf_percent: f64,
}

/// A forward-trio or defense-pair row (§4.10 `lines`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineRow {
    pub eh_ids: Vec<String>,
    pub team: String,
    pub oi: OiRow,
}

/// As `oi` without a player key (§4.10 `team_stats`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStatsRow {
    pub team: String,
    pub oi: OiRow,
}

/// All five views for one game (or whatever scope of rows was aggregated).
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    pub ind: Vec<IndRow>,
    pub oi: Vec<OiRow>,
    pub stats: Vec<StatsRow>,
    pub lines: Vec<LineRow>,
    pub team_stats: Vec<TeamStatsRow>,
}

fn events(rows: &[PbpRow]) -> impl Iterator<Item = &Event> {
    rows.iter().filter_map(|row| match row {
        PbpRow::Event(e) => Some(e),
        PbpRow::Change(_) => None,
    })
}

fn penalty_bucket(length: Option<u8>) -> Option<&'static str> {
    match length {
        Some(2) => Some("2"),
        Some(4) => Some("4"),
        Some(5) => Some("5"),
        Some(10) => Some("10"),
        _ => None,
    }
}

fn same_side_ids(on_ice: &OnIceSet, excluding: &str) -> Vec<String> {
    let mut ids: Vec<String> = on_ice
        .forwards
        .iter()
        .chain(&on_ice.defense)
        .chain(&on_ice.goalies)
        .map(|s| s.eh_id.clone())
        .filter(|id| id != excluding)
        .collect();
    ids.sort();
    ids
}

fn all_ids(on_ice: &OnIceSet) -> Vec<String> {
    let mut ids: Vec<String> =
        on_ice.forwards.iter().chain(&on_ice.defense).chain(&on_ice.goalies).map(|s| s.eh_id.clone()).collect();
    ids.sort();
    ids
}

/// Compose the group key a given event contributes to for `(eh_id, team)`.
fn group_key_for_event(event: &Event, team: &str, eh_id: &str, group_by: &GroupBy) -> GroupKey {
    let mut key = GroupKey { eh_id: eh_id.to_string(), team: team.to_string(), ..Default::default() };
    apply_level(&mut key.game_id, &mut key.period, event, group_by);
    if group_by.strength_state {
        key.strength_state = event.strength_state.clone();
    }
    if group_by.score {
        key.score_state = event.score_state.clone();
    }

    let is_team_side = event.event_team.as_deref() == Some(team);
    let own_set = if is_team_side { &event.event_team_on_ice } else { &event.opp_team_on_ice };
    let other_set = if is_team_side { &event.opp_team_on_ice } else { &event.event_team_on_ice };
    if group_by.teammates {
        key.teammates = same_side_ids(own_set, eh_id);
    }
    if group_by.opposition {
        key.opposition = all_ids(other_set);
    }
    key
}

fn team_group_key_for_event(event: &Event, team: &str, group_by: &GroupBy) -> GroupKey {
    let mut key = GroupKey { team: team.to_string(), ..Default::default() };
    apply_level(&mut key.game_id, &mut key.period, event, group_by);
    if group_by.strength_state {
        key.strength_state = event.strength_state.clone();
    }
    if group_by.score {
        key.score_state = event.score_state.clone();
    }
    key
}

fn apply_level(game_id: &mut Option<GameId>, period: &mut Option<i32>, event: &Event, group_by: &GroupBy) {
    match group_by.level {
        Level::Period => {
            *game_id = Some(event.game_id);
            *period = Some(event.period);
        }
        Level::Game => *game_id = Some(event.game_id),
        Level::Session | Level::Season => {}
    }
}

fn new_ind_row(key: &GroupKey) -> IndRow {
    IndRow {
        eh_id: key.eh_id.clone(),
        team: key.team.clone(),
        period: key.period,
        strength_state: key.strength_state.clone(),
        score_state: key.score_state.clone(),
        teammates: key.teammates.clone(),
        opposition: key.opposition.clone(),
        ..Default::default()
    }
}

fn new_oi_row(key: &GroupKey) -> OiRow {
    OiRow {
        eh_id: key.eh_id.clone(),
        team: key.team.clone(),
        period: key.period,
        strength_state: key.strength_state.clone(),
        score_state: key.score_state.clone(),
        teammates: key.teammates.clone(),
        opposition: key.opposition.clone(),
        ..Default::default()
    }
}

fn new_team_oi_row(key: &GroupKey) -> OiRow {
    OiRow {
        team: key.team.clone(),
        period: key.period,
        strength_state: key.strength_state.clone(),
        score_state: key.score_state.clone(),
        ..Default::default()
    }
}

/// Whether `event`'s own team (`event.event_team`) is the home side, by
/// checking which side `score_state`'s `"NvM"` ordering was stamped from
/// (§4.9 step 7). A 0-0 tie resolves to home; venue doesn't matter while
/// scores are level.
fn is_event_team_home(event: &Event) -> bool {
    match &event.score_state {
        Some(s) => *s == format!("{}v{}", event.home_score, event.away_score),
        None => true,
    }
}

/// `team`'s venue and score differential (positive = leading), derived
/// without needing the roster: `event.score_diff` is always `home - away`,
/// so it's negated when `team` is the away side.
fn venue_and_score_diff(event: &Event, team: &str) -> (TeamVenue, i32) {
    let event_team_is_home = is_event_team_home(event);
    let team_is_home =
        if event.event_team.as_deref() == Some(team) { event_team_is_home } else { !event_team_is_home };
    let diff = event.score_diff.unwrap_or(0);
    let score_diff = if team_is_home { diff } else { -diff };
    let venue = if team_is_home { TeamVenue::Home } else { TeamVenue::Away };
    (venue, score_diff)
}

/// Score- and venue-adjustment multiplier (§4.10), approximating the
/// well-documented tendency for teams to generate relatively fewer shot
/// attempts while leading and more while trailing, a little more so at
/// home. `score_diff` is clamped to [-3, 3] since the effect flattens out
/// beyond a three-goal game.
fn venue_score_adjustment(venue: TeamVenue, score_diff: i32) -> f64 {
    const HOME: [f64; 7] = [1.170, 1.135, 1.084, 1.000, 0.936, 0.898, 0.872];
    const AWAY: [f64; 7] = [0.872, 0.898, 0.936, 1.000, 1.084, 1.135, 1.170];
    let idx = (score_diff.clamp(-3, 3) + 3) as usize;
    match venue {
        TeamVenue::Home => HOME[idx],
        TeamVenue::Away => AWAY[idx],
    }
}

/// Credit one on-ice event onto `row`, for the full shot/hit/faceoff
/// vocabulary shared by `oi`, `team_stats`, and `lines` (§4.10).
fn credit_oi(row: &mut OiRow, tag: EventTag, is_for: bool, adj: f64, zone: Option<Zone>) {
    match (tag, is_for) {
        (EventTag::Goal, true) => {
            row.gf += 1;
            row.gf_adj += adj;
        }
        (EventTag::Goal, false) => {
            row.ga += 1;
            row.ga_adj += adj;
        }
        (EventTag::Shot, true) => {
            row.sf += 1;
            row.sf_adj += adj;
            row.ff += 1;
            row.ff_adj += adj;
            row.cf += 1;
            row.cf_adj += adj;
        }
        (EventTag::Shot, false) => {
            row.sa += 1;
            row.sa_adj += adj;
            row.fa += 1;
            row.fa_adj += adj;
            row.ca += 1;
            row.ca_adj += adj;
        }
        (EventTag::Miss, true) => {
            row.msf += 1;
            row.ff += 1;
            row.ff_adj += adj;
            row.cf += 1;
            row.cf_adj += adj;
        }
        (EventTag::Miss, false) => {
            row.msa += 1;
            row.fa += 1;
            row.fa_adj += adj;
            row.ca += 1;
            row.ca_adj += adj;
        }
        (EventTag::Block, true) => {
            row.bsa += 1;
            row.ca += 1;
            row.ca_adj += adj;
        }
        (EventTag::Block, false) => {
            row.bsf += 1;
            row.cf += 1;
            row.cf_adj += adj;
        }
        (EventTag::Hit, true) => row.hf += 1,
        (EventTag::Hit, false) => row.ht += 1,
        (EventTag::Fac, true) => {
            row.fow += 1;
            match zone {
                Some(Zone::Offensive) => row.ozf += 1,
                Some(Zone::Neutral) => row.nzf += 1,
                Some(Zone::Defensive) => row.dzf += 1,
                None => {}
            }
        }
        (EventTag::Fac, false) => row.fol += 1,
        _ => {}
    }
}

/// Individual stats (§4.10 `ind`): credited to whichever player fills the
/// role-bearing slot, regardless of who else is on-ice.
fn build_ind_rows(eh_id: &str, team: &str, rows: &[PbpRow], group_by: &GroupBy) -> HashMap<GroupKey, IndRow> {
    let mut out: HashMap<GroupKey, IndRow> = HashMap::new();

    for event in events(rows) {
        let is_event_team = event.event_team.as_deref() == Some(team);
        let players = [&event.player_1, &event.player_2, &event.player_3];
        for maybe_player in players {
            let Some(player) = maybe_player else { continue };
            if player.eh_id() != eh_id {
                continue;
            }
            let key = group_key_for_event(event, team, eh_id, group_by);
            let row = out.entry(key.clone()).or_insert_with(|| new_ind_row(&key));
            let (venue, score_diff) = venue_and_score_diff(event, team);
            let adj = venue_score_adjustment(venue, score_diff);

            use crate::model::event::PlayerRole::*;
            match player.role() {
                GoalScorer => {
                    row.g += 1;
                    row.g_adj += adj;
                }
                PrimaryAssist => row.a1 += 1,
                SecondaryAssist => row.a2 += 1,
                Shooter => {
                    row.icf += 1;
                    row.icf_adj += adj;
                    match event.event {
                        EventTag::Shot => {
                            row.isf += 1;
                            row.isf_adj += adj;
                            row.iff += 1;
                            row.iff_adj += adj;
                        }
                        EventTag::Miss => {
                            row.iff += 1;
                            row.iff_adj += adj;
                        }
                        // a blocked shot's icf is already counted above; imsf belongs to the blocker, not the shooter
                        _ => {}
                    }
                }
                Blocker => row.ibs += 1,
                Hitter => row.ihf += 1,
                Hittee => row.iht += 1,
                Winner if is_event_team => match event.zone {
                    Some(Zone::Offensive) => row.ifow_oz += 1,
                    Some(Zone::Neutral) => row.ifow_nz += 1,
                    Some(Zone::Defensive) => row.ifow_dz += 1,
                    None => {}
                },
                Loser if is_event_team => match event.zone {
                    Some(Zone::Offensive) => row.ifol_oz += 1,
                    Some(Zone::Neutral) => row.ifol_nz += 1,
                    Some(Zone::Defensive) => row.ifol_dz += 1,
                    None => {}
                },
                CommittedBy => {
                    if let Some(bucket) = event.penalty.as_ref().and_then(|p| penalty_bucket(p.penalty_length)) {
                        match bucket {
                            "2" => row.ipent2 += 1,
                            "4" => row.ipent4 += 1,
                            "5" => row.ipent5 += 1,
                            "10" => row.ipent10 += 1,
                            _ => {}
                        }
                    }
                }
                DrawnBy => {
                    if let Some(bucket) = event.penalty.as_ref().and_then(|p| penalty_bucket(p.penalty_length)) {
                        match bucket {
                            "2" => row.ipend2 += 1,
                            "4" => row.ipend4 += 1,
                            "5" => row.ipend5 += 1,
                            "10" => row.ipend10 += 1,
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
    }

    out
}

/// Whether `eh_id` is listed on `team`'s side of `event`'s on-ice sets.
fn on_ice_side(event: &Event, team: &str, eh_id: &str) -> Option<bool> {
    let is_event_team_side = event.event_team.as_deref() == Some(team);
    let own_set = if is_event_team_side { &event.event_team_on_ice } else { &event.opp_team_on_ice };
    let other_set = if is_event_team_side { &event.opp_team_on_ice } else { &event.event_team_on_ice };
    let in_own = own_set.forwards.iter().chain(&own_set.defense).chain(&own_set.goalies).any(|s| s.eh_id == eh_id);
    if in_own {
        return Some(true);
    }
    let in_other =
        other_set.forwards.iter().chain(&other_set.defense).chain(&other_set.goalies).any(|s| s.eh_id == eh_id);
    if in_other {
        return Some(false);
    }
    None
}

/// On-ice stats (§4.10 `oi`): credited whenever `eh_id` is listed in either
/// on-ice set for the event's team, `for` if on the event team's side.
/// `toi` accumulates in minutes, per `event_length` (seconds) / 60.
fn build_oi_rows(eh_id: &str, team: &str, rows: &[PbpRow], group_by: &GroupBy) -> HashMap<GroupKey, OiRow> {
    let mut out: HashMap<GroupKey, OiRow> = HashMap::new();

    for event in events(rows) {
        let Some(is_for) = on_ice_side(event, team, eh_id) else { continue };
        let key = group_key_for_event(event, team, eh_id, group_by);
        let row = out.entry(key.clone()).or_insert_with(|| new_oi_row(&key));
        row.toi += event.event_length as f64 / 60.0;
        let (venue, score_diff) = venue_and_score_diff(event, team);
        let adj = venue_score_adjustment(venue, score_diff);
        credit_oi(row, event.event, is_for, adj, event.zone);
    }

    for row_item in rows {
        if let PbpRow::Change(change) = row_item {
            if change.team != team {
                continue;
            }
            let on_this_change = change
                .forwards_on
                .iter()
                .chain(&change.defense_on)
                .chain(&change.goalies_on)
                .any(|p| p.eh_id == eh_id);
            if !on_this_change {
                continue;
            }
            let mut key = GroupKey { eh_id: eh_id.to_string(), team: team.to_string(), ..Default::default() };
            match group_by.level {
                Level::Period => {
                    key.game_id = Some(change.game_id);
                    key.period = Some(change.period);
                }
                Level::Game => key.game_id = Some(change.game_id),
                Level::Session | Level::Season => {}
            }
            // CHANGE records carry no strength/score state, so zone-start
            // counts always land on the strength/score-agnostic bucket for
            // this (eh_id, team, level) even when those dimensions are on.
            let row = out.entry(key.clone()).or_insert_with(|| new_oi_row(&key));
            match change.zone_start {
                Some(Zone::Offensive) => row.ozs += 1,
                Some(Zone::Neutral) => row.nzs += 1,
                Some(Zone::Defensive) => row.dzs += 1,
                None => row.otf += 1,
            }
        }
    }

    out
}

fn build_stats_row(ind: IndRow, oi: OiRow) -> StatsRow {
    let cf_percent = if oi.cf + oi.ca == 0 { 0.0 } else { oi.cf as f64 / (oi.cf + oi.ca) as f64 };
    let ff_percent = if oi.ff + oi.fa == 0 { 0.0 } else { oi.ff as f64 / (oi.ff + oi.fa) as f64 };
    let gf_percent = if oi.gf + oi.ga == 0 { 0.0 } else { oi.gf as f64 / (oi.gf + oi.ga) as f64 };
    let xgf_percent = if oi.xgf + oi.xga == 0.0 { 0.0 } else { oi.xgf / (oi.xgf + oi.xga) };

    StatsRow {
        eh_id: ind.eh_id.clone(),
        team: ind.team.clone(),
        toi: oi.toi,
        g_p60: oi.p60(ind.g),
        a1_p60: oi.p60(ind.a1),
        isf_p60: oi.p60(ind.isf),
        gf_p60: oi.p60(oi.gf),
        sf_p60: oi.p60(oi.sf),
        cf_percent,
        ff_percent,
        gf_percent,
        xgf_percent,
        ind,
        oi,
    }
}

fn distinct_players(rows: &[PbpRow]) -> Vec<(String, String)> {
    let mut players: HashSet<(String, String)> = HashSet::new();
    for row in rows {
        match row {
            PbpRow::Event(event) => {
                for on_ice in [&event.event_team_on_ice, &event.opp_team_on_ice] {
                    for skater in on_ice.forwards.iter().chain(&on_ice.defense).chain(&on_ice.goalies) {
                        if let Some(team) = team_for_skater(event, skater.eh_id.as_str()) {
                            players.insert((skater.eh_id.clone(), team));
                        }
                    }
                }
            }
            PbpRow::Change(change) => {
                for player in change.forwards_on.iter().chain(&change.defense_on).chain(&change.goalies_on) {
                    players.insert((player.eh_id.clone(), change.team.clone()));
                }
            }
        }
    }
    players.into_iter().collect()
}

/// Build the individual and on-ice rows for every player referenced on-ice
/// or in a role slot across the input, grouped by `(eh_id, team)` plus
/// whatever dimensions `GroupBy::default()` selects (none — whole-input,
/// unsplit, game-level), then join into `stats` (§4.10).
pub fn aggregate_game(rows: &[PbpRow]) -> AggregateResult {
    aggregate_with(rows, &GroupBy::default())
}

/// As `aggregate_game`, but with the grouping dimensions in `group_by`
/// (§4.10) composed into each row's key.
pub fn aggregate_with(rows: &[PbpRow], group_by: &GroupBy) -> AggregateResult {
    let players = distinct_players(rows);

    let ind_maps: Vec<HashMap<GroupKey, IndRow>> =
        players.par_iter().map(|(eh_id, team)| build_ind_rows(eh_id, team, rows, group_by)).collect();
    let oi_maps: Vec<HashMap<GroupKey, OiRow>> =
        players.par_iter().map(|(eh_id, team)| build_oi_rows(eh_id, team, rows, group_by)).collect();

    let mut ind_by_key: HashMap<GroupKey, IndRow> = HashMap::new();
    for map in ind_maps {
        ind_by_key.extend(map);
    }
    let mut oi_by_key: HashMap<GroupKey, OiRow> = HashMap::new();
    for map in oi_maps {
        oi_by_key.extend(map);
    }

    let mut keys: HashSet<GroupKey> = ind_by_key.keys().cloned().collect();
    keys.extend(oi_by_key.keys().cloned());

    let mut ind = Vec::with_capacity(keys.len());
    let mut oi = Vec::with_capacity(keys.len());
    let mut stats = Vec::with_capacity(keys.len());
    for key in keys {
        let ind_row = ind_by_key.get(&key).cloned().unwrap_or_else(|| new_ind_row(&key));
        let oi_row = oi_by_key.get(&key).cloned().unwrap_or_else(|| new_oi_row(&key));
        stats.push(build_stats_row(ind_row.clone(), oi_row.clone()));
        ind.push(ind_row);
        oi.push(oi_row);
    }

    let team_stats = build_team_stats(rows, group_by);
    let lines = build_lines(rows, group_by);

    AggregateResult { ind, oi, stats, lines, team_stats }
}

fn team_for_skater(event: &Event, eh_id: &str) -> Option<String> {
    if event.event_team_on_ice.forwards.iter().chain(&event.event_team_on_ice.defense).chain(&event.event_team_on_ice.goalies).any(|s| s.eh_id == eh_id) {
        return event.event_team.clone();
    }
    if event.opp_team_on_ice.forwards.iter().chain(&event.opp_team_on_ice.defense).chain(&event.opp_team_on_ice.goalies).any(|s| s.eh_id == eh_id) {
        return event.opp_team.clone();
    }
    None
}

/// Team totals (§4.10 `team_stats`): `oi` counts without a player key.
fn build_team_stats(rows: &[PbpRow], group_by: &GroupBy) -> Vec<TeamStatsRow> {
    let mut by_key: HashMap<GroupKey, OiRow> = HashMap::new();

    for event in events(rows) {
        for (team, is_for) in [(event.event_team.as_deref(), true), (event.opp_team.as_deref(), false)] {
            let Some(team) = team else { continue };
            let key = team_group_key_for_event(event, team, group_by);
            let row = by_key.entry(key.clone()).or_insert_with(|| new_team_oi_row(&key));
            row.toi += event.event_length as f64 / 60.0;
            let (venue, score_diff) = venue_and_score_diff(event, team);
            let adj = venue_score_adjustment(venue, score_diff);
            credit_oi(row, event.event, is_for, adj, event.zone);
        }
    }

    by_key.into_iter().map(|(key, oi)| TeamStatsRow { team: key.team, oi }).collect()
}

/// Forward-trio / defense-pair rows (§4.10 `lines`): grouped by the sorted
/// set of on-ice eh_ids at each position, when exactly a full trio or pair
/// is on-ice together, further split by whatever `group_by` selects.
fn build_lines(rows: &[PbpRow], group_by: &GroupBy) -> Vec<LineRow> {
    let mut by_key: HashMap<LineKey, OiRow> = HashMap::new();

    for row in rows {
        let PbpRow::Event(event) = row else { continue };
        for (team, on_ice, is_for) in
            [(event.event_team.clone(), &event.event_team_on_ice, true), (event.opp_team.clone(), &event.opp_team_on_ice, false)]
        {
            let Some(team) = team else { continue };
            if on_ice.forwards.len() == 3 {
                let ids: Vec<String> = on_ice.forwards.iter().map(|s| s.eh_id.clone()).collect();
                accumulate_line(&mut by_key, &team, &ids, event, is_for, group_by);
            }
            if on_ice.defense.len() == 2 {
                let ids: Vec<String> = on_ice.defense.iter().map(|s| s.eh_id.clone()).collect();
                accumulate_line(&mut by_key, &team, &ids, event, is_for, group_by);
            }
        }
    }

    by_key.into_iter().map(|(key, oi)| LineRow { eh_ids: key.eh_ids, team: key.team, oi }).collect()
}

fn accumulate_line(
    by_key: &mut HashMap<LineKey, OiRow>,
    team: &str,
    eh_ids: &[String],
    event: &Event,
    is_for: bool,
    group_by: &GroupBy,
) {
    let mut key_ids = eh_ids.to_vec();
    key_ids.sort();
    let mut key = LineKey { team: team.to_string(), eh_ids: key_ids, ..Default::default() };
    match group_by.level {
        Level::Period => {
            key.game_id = Some(event.game_id);
            key.period = Some(event.period);
        }
        Level::Game => key.game_id = Some(event.game_id),
        Level::Session | Level::Season => {}
    }
    if group_by.strength_state {
        key.strength_state = event.strength_state.clone();
    }
    if group_by.score {
        key.score_state = event.score_state.clone();
    }

    let entry = by_key.entry(key).or_insert_with(|| OiRow { team: team.to_string(), ..Default::default() });
    entry.toi += event.event_length as f64 / 60.0;
    let (venue, score_diff) = venue_and_score_diff(event, team);
    let adj = venue_score_adjustment(venue, score_diff);
    credit_oi(entry, event.event, is_for, adj, event.zone);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::enums::Position;
    use crate::model::event::{EventPlayer, Indicators, OnIceSkater, PlayerRole, PlayerRoleTagged, ShotDetail};

    fn skater(eh_id: &str) -> OnIceSkater {
        OnIceSkater { name: eh_id.to_string(), eh_id: eh_id.to_string(), api_id: None }
    }

    fn goal_event(scorer: &str) -> Event {
        let mut event_on_ice = OnIceSet::default();
        event_on_ice.forwards.push(skater(scorer));
        Event {
            game_id: GameId::new(1),
            event_idx: 1,
            event_idx_api: None,
            event: EventTag::Goal,
            version: 1,
            event_team: Some("NSH".into()),
            opp_team: Some("WPG".into()),
            period: 1,
            period_seconds: 0,
            game_seconds: 0,
            coords_x: None,
            coords_y: None,
            zone: None,
            player_1: Some(EventPlayer::Resolved {
                name: scorer.to_string(),
                eh_id: scorer.to_string(),
                api_id: None,
                position: Some(Position::Center),
                role: PlayerRoleTagged(PlayerRole::GoalScorer),
            }),
            player_2: None,
            player_3: None,
            opp_goalie: None,
            shot: Some(ShotDetail::default()),
            penalty: None,
            event_team_on_ice: event_on_ice,
            opp_team_on_ice: OnIceSet::default(),
            strength_state: Some("5v5".into()),
            score_state: None,
            score_diff: Some(1),
            home_score: 1,
            away_score: 0,
            event_length: 30,
            indicators: Indicators::default(),
        }
    }

    #[test]
    fn ind_row_credits_goal_scorer() {
        let rows = vec![PbpRow::Event(goal_event("A.SKATER"))];
        let map = build_ind_rows("A.SKATER", "NSH", &rows, &GroupBy::default());
        assert_eq!(map.len(), 1);
        let ind = map.values().next().unwrap();
        assert_eq!(ind.g, 1);
    }

    #[test]
    fn oi_row_credits_on_ice_goal_for_and_against() {
        let rows = vec![PbpRow::Event(goal_event("A.SKATER"))];
        let map = build_oi_rows("A.SKATER", "NSH", &rows, &GroupBy::default());
        assert_eq!(map.len(), 1);
        let oi_for = map.values().next().unwrap();
        assert_eq!(oi_for.gf, 1);
        assert_eq!(oi_for.toi, 0.5);
    }

    #[test]
    fn aggregate_game_produces_matching_ind_and_oi_rows() {
        let rows = vec![PbpRow::Event(goal_event("A.SKATER"))];
        let result = aggregate_game(&rows);
        assert_eq!(result.ind.len(), 1);
        assert_eq!(result.oi.len(), 1);
        assert_eq!(result.stats.len(), 1);
        assert_eq!(result.stats[0].ind.g, 1);
        assert_eq!(result.stats[0].oi.gf, 1);
    }

    #[test]
    fn team_stats_sum_matches_goal_events() {
        let rows = vec![PbpRow::Event(goal_event("A.SKATER"))];
        let team_stats = build_team_stats(&rows, &GroupBy::default());
        let nsh = team_stats.iter().find(|t| t.team == "NSH").unwrap();
        assert_eq!(nsh.oi.gf, 1);
    }

    #[test]
    fn period_level_grouping_splits_rows_by_period() {
        let mut first = goal_event("A.SKATER");
        first.period = 1;
        let mut second = goal_event("A.SKATER");
        second.period = 2;
        let rows = vec![PbpRow::Event(first), PbpRow::Event(second)];

        let group_by = GroupBy { level: Level::Period, ..Default::default() };
        let result = aggregate_with(&rows, &group_by);

        assert_eq!(result.ind.len(), 2);
        assert!(result.ind.iter().all(|row| row.g == 1));
        let periods: HashSet<Option<i32>> = result.ind.iter().map(|row| row.period).collect();
        assert_eq!(periods, HashSet::from([Some(1), Some(2)]));
    }

    #[test]
    fn game_level_default_matches_whole_input() {
        let mut first = goal_event("A.SKATER");
        first.period = 1;
        let mut second = goal_event("A.SKATER");
        second.period = 2;
        let rows = vec![PbpRow::Event(first), PbpRow::Event(second)];

        let result = aggregate_game(&rows);

        assert_eq!(result.ind.len(), 1);
        assert_eq!(result.ind[0].g, 2);
    }

    #[test]
    fn venue_score_adjustment_is_above_one_when_trailing() {
        assert!(venue_score_adjustment(TeamVenue::Home, -2) > 1.0);
        assert!(venue_score_adjustment(TeamVenue::Home, 2) < 1.0);
        assert_eq!(venue_score_adjustment(TeamVenue::Home, 0), venue_score_adjustment(TeamVenue::Away, 0));
    }

    #[test]
    fn oi_adj_fields_scale_down_for_a_leading_home_team() {
        let rows = vec![PbpRow::Event(goal_event("A.SKATER"))];
        let map = build_oi_rows("A.SKATER", "NSH", &rows, &GroupBy::default());
        let oi_for = map.values().next().unwrap();
        // NSH is the (implicit) home side leading 1-0, so its gf_adj gets a
        // sub-1 multiplier relative to the raw gf count.
        assert!(oi_for.gf_adj > 0.0);
        assert!(oi_for.gf_adj < oi_for.gf as f64);
    }
}
