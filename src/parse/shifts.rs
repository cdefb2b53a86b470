//! Shift parser (C6, §4.6): per-player shifts from HTML shift reports, with
//! the three repair rules applied in order, plus synthesized goalie shifts.

use crate::ids::GameId;
use crate::model::enums::{Position, Session, TeamVenue};
use crate::model::roster::{Roster, TeamJersey};
use crate::model::shift::Shift;

use super::parse_clock;

/// One raw `mm:ss / mm:ss` shift row, before repair.
#[derive(Debug, Clone)]
pub struct RawShiftRow {
    pub jersey: i32,
    pub shift_count: i32,
    pub period: i32,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
}

fn period_length_seconds(session: Session, period: i32) -> i64 {
    if period <= 3 {
        1200
    } else {
        match session {
            Session::Regular => 300,
            Session::Playoffs => 1200,
            Session::Preseason => 300,
        }
    }
}

/// Apply the three repairs from §4.6, in order, and return `(start, end)`
/// in seconds.
fn repair(row: &RawShiftRow, session: Session) -> (i64, i64) {
    let max_seconds = period_length_seconds(session, row.period);
    let start = parse_clock(&row.start_time).unwrap_or(0);

    // Rule 1: empty end time -> start + duration.
    let mut end = if row.end_time.trim().is_empty() {
        let duration = parse_clock(&row.duration).unwrap_or(0);
        start + duration
    } else {
        parse_clock(&row.end_time).unwrap_or(max_seconds)
    };

    // Rule 2: start > end -> clamp end to period length.
    if start > end {
        end = max_seconds;
    }

    // Rule 3: shift_end == "0:00 / 0:00" -> same clamp (start also reads 0).
    if row.start_time.trim() == "0:00" && row.end_time.trim() == "0:00" {
        end = max_seconds;
    }

    (start, end)
}

/// Parse one team's raw shift rows into `Shift` records, applying the §4.6
/// repairs. Goalie synthesis (one shift per period, spanning the full
/// period, from the starter) happens in [`synthesize_missing_goalie_shifts`]
/// once both teams' rosters are known.
pub fn parse_team_shifts(
    game_id: GameId,
    team: &str,
    team_venue: TeamVenue,
    session: Session,
    roster: &Roster,
    rows: &[RawShiftRow],
) -> Vec<Shift> {
    rows.iter()
        .map(|row| {
            let (start, end) = repair(row, session);
            let goalie = roster
                .by_team_jersey(team, row.jersey)
                .map(|e| e.position == Position::Goalie)
                .unwrap_or(false);
            Shift {
                game_id,
                team_jersey: TeamJersey::new(team, row.jersey),
                period: row.period,
                shift_count: row.shift_count,
                start_time_seconds: start,
                end_time_seconds: end,
                goalie,
                team_venue,
            }
        })
        .collect()
}

/// For each `(team, period)` with no goalie shift, synthesize one for the
/// period's starting goalie spanning `[0, period_max_seconds]` (§3, §4.6).
pub fn synthesize_missing_goalie_shifts(
    game_id: GameId,
    team: &str,
    team_venue: TeamVenue,
    session: Session,
    roster: &Roster,
    periods: &[i32],
    existing: &mut Vec<Shift>,
) {
    let starter_goalie = roster
        .entries
        .iter()
        .find(|e| e.team == team && e.position == Position::Goalie && e.starter);
    let Some(goalie) = starter_goalie else { return };

    for &period in periods {
        let has_goalie_shift = existing
            .iter()
            .any(|s| s.team_jersey.team == team && s.period == period && s.goalie);
        if has_goalie_shift {
            continue;
        }
        let max_seconds = period_length_seconds(session, period);
        existing.push(Shift {
            game_id,
            team_jersey: TeamJersey::new(team, goalie.jersey),
            period,
            shift_count: 0,
            start_time_seconds: 0,
            end_time_seconds: max_seconds,
            goalie: true,
            team_venue,
        });
    }
}
