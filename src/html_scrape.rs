//! HTML table extraction: turns the raw report pages fetched by
//! `crate::client::Client::html_report` into the row types `crate::parse`
//! consumes. Table layout (column counts, the `bborder`/`teamHeading`
//! classes) is grounded in the NHL report markup; the row *semantics*
//! (regex extraction, fixes, zone derivation) live in `crate::parse`.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::fixes::HtmlEventRow;
use crate::parse::html_rosters::RawRosterRow;
use crate::parse::shifts::RawShiftRow;

static EVENT_CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"td[class*="bborder"]"#).unwrap());
static ROSTER_TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"table[align="center"][border="0"][cellpadding="0"][cellspacing="0"][width="100%"]"#).unwrap());
static BOLD_CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td.bold").unwrap());
static TEAM_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td.teamHeading").unwrap());
static SHIFT_PLAYER_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td.playerHeading, td.bborder.lborder").unwrap());

fn cell_text(element: scraper::ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

/// One raw event row as laid out on the report page: eight cells per event
/// (`event_idx, period, strength, time, event, description, away_skaters,
/// home_skaters`), grounded in the original scraper's `reshape(length, 8)`.
#[derive(Debug, Clone)]
pub struct ScrapedEventRow {
    pub event_idx: i64,
    pub period: i32,
    pub event_class: String,
    pub time: String,
    pub description: String,
}

/// Extract the play-by-play HTML report's event rows, in document order.
pub fn extract_event_rows(html: &str) -> Vec<ScrapedEventRow> {
    let document = Html::parse_document(html);
    let cells: Vec<String> = document.select(&EVENT_CELL_SELECTOR).map(cell_text).collect();

    let mut rows = Vec::new();
    for chunk in cells.chunks_exact(8) {
        let event_idx = chunk[0].parse().unwrap_or(0);
        let period = chunk[1].parse().unwrap_or(0);
        let time = chunk[3].split('/').next().unwrap_or("").trim().to_string();
        rows.push(ScrapedEventRow {
            event_idx,
            period,
            event_class: chunk[4].trim().to_string(),
            time,
            description: chunk[5].trim().to_string(),
        });
    }
    rows
}

pub fn event_row_as_html_row(row: &ScrapedEventRow) -> HtmlEventRow {
    HtmlEventRow { period: row.period, time: row.time.clone(), description: row.description.clone() }
}

/// Two team rosters (active + scratches) as laid out on the roster report.
#[derive(Debug, Clone, Default)]
pub struct RosterReportRows {
    pub away_team: String,
    pub home_team: String,
    pub away_active: Vec<RawRosterRow>,
    pub away_scratch: Vec<RawRosterRow>,
    pub home_active: Vec<RawRosterRow>,
    pub home_scratch: Vec<RawRosterRow>,
}

static ROSTER_ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s+([A-Z]{1,2})\s+(.+)$").unwrap());

fn parse_roster_rows(text_rows: &[String], bold: &[bool]) -> Vec<RawRosterRow> {
    text_rows
        .iter()
        .zip(bold.iter())
        .filter_map(|(text, &is_bold)| {
            let captures = ROSTER_ROW_RE.captures(text.trim())?;
            Some(RawRosterRow {
                jersey: captures[1].parse().ok()?,
                position: Some(captures[2].to_string()),
                raw_name: captures[3].trim().to_string(),
                bold: is_bold,
            })
        })
        .collect()
}

/// Extract away/home team names and active/scratch roster rows from a
/// roster report page (§4.5), using the table's fixed attribute set to find
/// the four roster tables (away active, home active, away scratch, home
/// scratch) and `td.bold` to mark starters.
pub fn extract_roster_rows(html: &str) -> RosterReportRows {
    let document = Html::parse_document(html);

    let team_names: Vec<String> = document.select(&TEAM_HEADING_SELECTOR).map(|el| cell_text(el).to_uppercase()).collect();
    let away_team = team_names.first().cloned().unwrap_or_default();
    let home_team = team_names.get(1).cloned().unwrap_or_default();

    let bold_jerseys: std::collections::HashSet<String> =
        document.select(&BOLD_CELL_SELECTOR).map(cell_text).collect();

    let tables: Vec<_> = document.select(&ROSTER_TABLE_SELECTOR).collect();
    let mut table_rows: Vec<Vec<String>> = Vec::new();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    for table in &tables {
        for row in table.select(&row_selector) {
            let joined = row.select(&cell_selector).map(cell_text).collect::<Vec<_>>().join(" ");
            if joined.trim().is_empty() {
                continue;
            }
            table_rows.push(vec![joined]);
        }
    }

    let flat: Vec<String> = table_rows.into_iter().flatten().collect();
    let bold_flags: Vec<bool> = flat.iter().map(|row| bold_jerseys.iter().any(|j| row.starts_with(j.as_str()))).collect();

    let quarter = flat.len() / 4;
    let away_active = parse_roster_rows(&flat[..quarter.min(flat.len())], &bold_flags);
    let home_active =
        parse_roster_rows(&flat.get(quarter..quarter * 2).unwrap_or(&[]), &bold_flags.get(quarter..quarter * 2).unwrap_or(&[]));
    let away_scratch = parse_roster_rows(
        flat.get(quarter * 2..quarter * 3).unwrap_or(&[]),
        bold_flags.get(quarter * 2..quarter * 3).unwrap_or(&[]),
    );
    let home_scratch =
        parse_roster_rows(flat.get(quarter * 3..).unwrap_or(&[]), bold_flags.get(quarter * 3..).unwrap_or(&[]));

    RosterReportRows { away_team, home_team, away_active, away_scratch, home_active, home_scratch }
}

static SHIFT_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s+([A-Z'\-]+),\s*(.+)$").unwrap());

/// Extract one team's shift rows (§4.6), grouping the alternating
/// name-header / shift-data cells the report lays out per player.
pub fn extract_shift_rows(html: &str) -> Vec<RawShiftRow> {
    let document = Html::parse_document(html);
    let cells: Vec<String> = document.select(&SHIFT_PLAYER_SELECTOR).map(cell_text).collect();

    let mut rows = Vec::new();
    let mut current_jersey = 0i32;
    let mut buffer: Vec<String> = Vec::new();

    for cell in cells {
        if let Some(captures) = SHIFT_NAME_RE.captures(&cell) {
            flush_shift_buffer(current_jersey, &buffer, &mut rows);
            current_jersey = captures[1].parse().unwrap_or(0);
            buffer.clear();
        } else if !cell.trim().is_empty() {
            buffer.push(cell);
        }
    }
    flush_shift_buffer(current_jersey, &buffer, &mut rows);

    rows
}

fn flush_shift_buffer(jersey: i32, buffer: &[String], rows: &mut Vec<RawShiftRow>) {
    for chunk in buffer.chunks_exact(5) {
        rows.push(RawShiftRow {
            jersey,
            shift_count: chunk[0].parse().unwrap_or(0),
            period: chunk[1].parse().unwrap_or(0),
            start_time: chunk[2].split('/').next().unwrap_or("").trim().to_string(),
            end_time: chunk[3].split('/').next().unwrap_or("").trim().to_string(),
            duration: chunk[4].trim().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_event_rows_groups_cells_in_eights() {
        let html = r#"
            <html><body><table>
            <tr>
                <td class="bborder">1</td><td class="bborder">1</td><td class="bborder">EV</td>
                <td class="bborder">0:00/20:00</td><td class="bborder">PSTR</td>
                <td class="bborder">Period Start</td><td class="bborder"></td><td class="bborder"></td>
            </tr>
            </table></body></html>
        "#;
        let rows = extract_event_rows(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event_idx, 1);
        assert_eq!(rows[0].period, 1);
        assert_eq!(rows[0].event_class, "PSTR");
        assert_eq!(rows[0].time, "0:00");
    }

    #[test]
    fn roster_row_regex_splits_jersey_position_name() {
        let captures = ROSTER_ROW_RE.captures("16 R NATHAN HORTON").unwrap();
        assert_eq!(&captures[1], "16");
        assert_eq!(&captures[2], "R");
        assert_eq!(&captures[3], "NATHAN HORTON");
    }

    #[test]
    fn shift_name_regex_splits_jersey_and_name() {
        let captures = SHIFT_NAME_RE.captures("29 RINNE, PEKKA").unwrap();
        assert_eq!(&captures[1], "29");
        assert_eq!(&captures[3], "PEKKA");
    }
}
