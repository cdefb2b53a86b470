//! HTML roster parser (C5, §4.5): active/scratch tables per team.

use crate::fixes::{self, HtmlRosterRow};
use crate::ids::GameId;
use crate::model::enums::{PlayerStatus, Position, TeamVenue};
use crate::model::roster::RosterEntry;
use crate::names::{self, NormalizeContext};

/// One row as scraped from the roster table, before C1 normalization.
#[derive(Debug, Clone)]
pub struct RawRosterRow {
    pub jersey: i32,
    pub position: Option<String>,
    pub raw_name: String,
    pub bold: bool,
}

/// Parse one team's active table plus its optional scratch table into
/// `RosterEntry` records, applying C1 normalization and the C2 roster fixes.
pub fn parse_team_roster(
    game_id: GameId,
    team: &str,
    team_venue: TeamVenue,
    season_start_year: u16,
    active_rows: &[RawRosterRow],
    scratch_rows: &[RawRosterRow],
) -> Vec<RosterEntry> {
    let mut entries = Vec::with_capacity(active_rows.len() + scratch_rows.len());
    for row in active_rows {
        entries.push(build_entry(game_id, team, team_venue, season_start_year, row, PlayerStatus::Active));
    }
    for row in scratch_rows {
        entries.push(build_entry(game_id, team, team_venue, season_start_year, row, PlayerStatus::Scratch));
    }
    entries
}

fn build_entry(
    game_id: GameId,
    team: &str,
    team_venue: TeamVenue,
    season_start_year: u16,
    row: &RawRosterRow,
    status: PlayerStatus,
) -> RosterEntry {
    let position = row
        .position
        .as_deref()
        .and_then(|p| p.parse::<Position>().ok())
        .unwrap_or(Position::Center);

    let ctx = NormalizeContext::new().with_position(position).with_season_start_year(season_start_year);
    let (player_name, eh_id) = names::normalize(&row.raw_name, &ctx);

    let mut fix_row = HtmlRosterRow { player_name: player_name.clone(), status: status.code().to_string() };
    fixes::apply_html_rosters_fix(game_id, &mut fix_row);
    let status = fix_row.status.parse::<PlayerStatus>().unwrap_or(status);

    RosterEntry {
        game_id,
        team: team.to_string(),
        jersey: row.jersey,
        player_name,
        eh_id,
        api_id: None,
        position,
        team_venue,
        starter: row.bold && status == PlayerStatus::Active,
        status,
    }
}
