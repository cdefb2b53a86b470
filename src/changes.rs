//! Change builder (C7, §4.7): derive CHANGE events from shift boundaries.

use std::collections::BTreeMap;

use crate::ids::GameId;
use crate::model::change::{Change, ChangePlayer};
use crate::model::enums::Position;
use crate::model::roster::Roster;
use crate::model::shift::Shift;

use crate::parse::game_seconds;

fn to_change_player(roster: &Roster, team: &str, jersey: i32) -> Option<ChangePlayer> {
    let entry = roster.resolve_team_jersey(team, jersey)?;
    Some(ChangePlayer {
        jersey,
        name: entry.player_name.clone(),
        eh_id: entry.eh_id.clone(),
        api_id: entry.api_id,
        position: entry.position,
    })
}

fn split_by_position(roster: &Roster, team: &str, jerseys: &[i32]) -> (Vec<ChangePlayer>, Vec<ChangePlayer>, Vec<ChangePlayer>) {
    let mut forwards = Vec::new();
    let mut defense = Vec::new();
    let mut goalies = Vec::new();
    let mut sorted = jerseys.to_vec();
    sorted.sort_unstable();
    for jersey in sorted {
        if let Some(player) = to_change_player(roster, team, jersey) {
            match player.position {
                Position::Defense => defense.push(player),
                Position::Goalie => goalies.push(player),
                _ => forwards.push(player),
            }
        }
    }
    (forwards, defense, goalies)
}

/// Build CHANGE events for one `(game_id, team)` from its shifts, for the
/// regular-season-P5 `game_seconds` override.
pub fn build_changes(
    game_id: GameId,
    team: &str,
    is_away: bool,
    is_regular_season_shootout_period: impl Fn(i32) -> bool,
    roster: &Roster,
    shifts: &[Shift],
) -> Vec<Change> {
    let mut by_period: BTreeMap<i32, (BTreeMap<i64, Vec<i32>>, BTreeMap<i64, Vec<i32>>)> = BTreeMap::new();

    for shift in shifts.iter().filter(|s| s.team_jersey.team == team) {
        let entry = by_period.entry(shift.period).or_default();
        entry.0.entry(shift.start_time_seconds).or_default().push(shift.team_jersey.jersey);
        entry.1.entry(shift.end_time_seconds).or_default().push(shift.team_jersey.jersey);
    }

    let mut changes = Vec::new();
    for (period, (starts, ends)) in by_period {
        let mut ticks: Vec<i64> = starts.keys().chain(ends.keys()).copied().collect();
        ticks.sort_unstable();
        ticks.dedup();

        for tick in ticks {
            let on_jerseys = starts.get(&tick).cloned().unwrap_or_default();
            let off_jerseys = ends.get(&tick).cloned().unwrap_or_default();
            if on_jerseys.is_empty() && off_jerseys.is_empty() {
                continue;
            }

            let (forwards_on, defense_on, goalies_on) = split_by_position(roster, team, &on_jerseys);
            let (forwards_off, defense_off, goalies_off) = split_by_position(roster, team, &off_jerseys);

            let period_seconds = tick;
            let game_seconds_value = game_seconds(period, period_seconds, is_regular_season_shootout_period(period));

            changes.push(Change {
                game_id,
                team: team.to_string(),
                is_away,
                period,
                period_seconds,
                game_seconds: game_seconds_value,
                forwards_on,
                defense_on,
                goalies_on,
                forwards_off,
                defense_off,
                goalies_off,
                zone_start: None,
            });
        }
    }

    changes
}

/// Sort changes by `(period, period_seconds, is_away)` so home precedes
/// away within a tick (§4.7).
pub fn sort_changes(changes: &mut [Change]) {
    changes.sort_by_key(|c| (c.period, c.period_seconds, c.is_away));
}
