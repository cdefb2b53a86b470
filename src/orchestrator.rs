//! Scraper orchestrator (C11, §5): bounded per-game concurrency over a
//! `tokio::sync::Semaphore`, per-game artifact caches, and cancellation via
//! `JoinHandle::abort`. Everything downstream of a fetch is pure and lives
//! in `crate::parse`/`crate::changes`/`crate::reconcile`/`crate::onice`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;

use crate::aggregate::{self, AggregateResult};
use crate::changes;
use crate::client::{Client, HtmlReportKind};
use crate::config::PipelineConfig;
use crate::date::Season;
use crate::error::{OrchestratorReport, PbpError};
use crate::html_scrape;
use crate::ids::GameId;
use crate::model::change::Change;
use crate::model::enums::{EventTag, Session, TeamVenue};
use crate::model::event::Event;
use crate::model::roster::{Roster, RosterEntry};
use crate::model::shift::Shift;
use crate::onice::{self, PbpRow};
use crate::parse::{api_events, html_events, html_rosters, shifts as shift_parse};
use crate::reconcile;
use crate::wire::api_schema::PlayByPlayResponse;

type GameCache<T> = Arc<Mutex<HashMap<GameId, T>>>;

fn empty_cache<T>() -> GameCache<T> {
    Arc::new(Mutex::new(HashMap::new()))
}

/// Thin wrapper over the per-game caches named in §5, with the same
/// accessor names the newer upstream `Scraper` exposes (§9a).
#[derive(Clone)]
pub struct Scraper {
    client: Arc<Client>,
    config: PipelineConfig,
    semaphore: Arc<Semaphore>,
    play_by_play: GameCache<PlayByPlayResponse>,
    api_rosters: GameCache<Roster>,
    html_rosters: GameCache<Roster>,
    rosters: GameCache<Roster>,
    api_events: GameCache<Vec<Event>>,
    html_events: GameCache<Vec<Event>>,
    shifts: GameCache<Vec<Shift>>,
    changes: GameCache<Vec<Change>>,
    pbp: GameCache<Vec<PbpRow>>,
    aggregates: GameCache<AggregateResult>,
    handles: Arc<Mutex<HashMap<GameId, JoinHandle<Result<(), PbpError>>>>>,
}

impl Scraper {
    pub fn new(config: PipelineConfig) -> anyhow::Result<Self> {
        let client = Client::with_config(config.clone())?;
        let permits = config.max_concurrent_games;
        Ok(Self {
            client: Arc::new(client),
            config,
            semaphore: Arc::new(Semaphore::new(permits)),
            play_by_play: empty_cache(),
            api_rosters: empty_cache(),
            html_rosters: empty_cache(),
            rosters: empty_cache(),
            api_events: empty_cache(),
            html_events: empty_cache(),
            shifts: empty_cache(),
            changes: empty_cache(),
            pbp: empty_cache(),
            aggregates: empty_cache(),
            handles: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Scrape every game in `game_ids`, bounded by `max_concurrent_games`
    /// concurrently in-flight. A per-game failure is recorded in the report
    /// and does not affect the others (§7).
    pub async fn scrape_games(&self, game_ids: Vec<GameId>) -> OrchestratorReport {
        let mut report = OrchestratorReport::default();
        let mut game_order = Vec::with_capacity(game_ids.len());

        for game_id in game_ids {
            let scraper = self.clone();
            let semaphore = self.semaphore.clone();
            let handle: JoinHandle<Result<(), PbpError>> = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                scraper.scrape_one(game_id).await
            });
            self.handles.lock().await.insert(game_id, handle);
            game_order.push(game_id);
        }

        for game_id in game_order {
            let handle = self.handles.lock().await.remove(&game_id);
            let Some(handle) = handle else { continue };
            match handle.await {
                Ok(Ok(())) => report.record_success(game_id),
                Ok(Err(err)) => report.record_failure(game_id, err),
                Err(join_err) if join_err.is_cancelled() => report.record_failure(
                    game_id,
                    PbpError::Parse { game_id, stage: "orchestrator", message: "cancelled".to_string() },
                ),
                Err(join_err) => report.record_failure(
                    game_id,
                    PbpError::Parse { game_id, stage: "orchestrator", message: join_err.to_string() },
                ),
            }
        }

        report
    }

    /// Abort a game's in-flight scrape, discarding its intermediate state
    /// (§5). Completed games are unaffected.
    pub async fn cancel(&self, game_id: GameId) {
        if let Some(handle) = self.handles.lock().await.remove(&game_id) {
            handle.abort();
        }
    }

    async fn scrape_one(&self, game_id: GameId) -> Result<(), PbpError> {
        let response = self.client.play_by_play(game_id).await.map_err(|source| PbpError::Transport {
            game_id,
            stage: "play_by_play",
            source,
        })?;

        let session = Session::from_game_type(response.game_type as i32).ok_or_else(|| PbpError::Parse {
            game_id,
            stage: "play_by_play",
            message: format!("unknown game_type {}", response.game_type),
        })?;

        let api_roster = api_events::build_api_roster(game_id, &response);
        let api_event_list = api_events::parse_api_events(game_id, session, &response, &api_roster);

        let season = Season::from_str(&response.season.to_string()).ok_or_else(|| PbpError::Parse {
            game_id,
            stage: "play_by_play",
            message: format!("unparsable season {}", response.season),
        })?;
        let season_str = season.to_api_string();

        let roster_html = self.fetch_html(game_id, &season_str, HtmlReportKind::Rosters, "html_rosters").await?;
        let events_html = self.fetch_html(game_id, &season_str, HtmlReportKind::Events, "html_events").await?;
        let home_shifts_html = self.fetch_html(game_id, &season_str, HtmlReportKind::HomeShifts, "shifts").await?;
        let away_shifts_html = self.fetch_html(game_id, &season_str, HtmlReportKind::AwayShifts, "shifts").await?;

        let away_abbrev = response.away_team.abbrev.clone();
        let home_abbrev = response.home_team.abbrev.clone();

        let report_rows = html_scrape::extract_roster_rows(&roster_html);
        let mut html_roster_entries = Vec::new();
        html_roster_entries.extend(html_rosters::parse_team_roster(
            game_id,
            &away_abbrev,
            TeamVenue::Away,
            season.start_year,
            &report_rows.away_active,
            &report_rows.away_scratch,
        ));
        html_roster_entries.extend(html_rosters::parse_team_roster(
            game_id,
            &home_abbrev,
            TeamVenue::Home,
            season.start_year,
            &report_rows.home_active,
            &report_rows.home_scratch,
        ));
        let html_roster = Roster { entries: html_roster_entries };

        let roster = merge_rosters(&api_roster, &html_roster);

        let mut all_shifts = shift_parse::parse_team_shifts(
            game_id,
            &home_abbrev,
            TeamVenue::Home,
            session,
            &roster,
            &html_scrape::extract_shift_rows(&home_shifts_html),
        );
        all_shifts.extend(shift_parse::parse_team_shifts(
            game_id,
            &away_abbrev,
            TeamVenue::Away,
            session,
            &roster,
            &html_scrape::extract_shift_rows(&away_shifts_html),
        ));

        let periods: Vec<i32> = {
            let mut set: Vec<i32> = all_shifts.iter().map(|s| s.period).collect();
            set.sort_unstable();
            set.dedup();
            set
        };
        shift_parse::synthesize_missing_goalie_shifts(game_id, &home_abbrev, TeamVenue::Home, session, &roster, &periods, &mut all_shifts);
        shift_parse::synthesize_missing_goalie_shifts(game_id, &away_abbrev, TeamVenue::Away, session, &roster, &periods, &mut all_shifts);

        let mut all_changes = changes::build_changes(
            game_id,
            &home_abbrev,
            false,
            move |period: i32| session == Session::Regular && period == 5,
            &roster,
            &all_shifts,
        );
        all_changes.extend(changes::build_changes(
            game_id,
            &away_abbrev,
            true,
            move |period: i32| session == Session::Regular && period == 5,
            &roster,
            &all_shifts,
        ));
        changes::sort_changes(&mut all_changes);

        let html_event_rows = html_scrape::extract_event_rows(&events_html);
        let mut html_event_list = Vec::with_capacity(html_event_rows.len());
        for scraped in &html_event_rows {
            let Ok(tag) = scraped.event_class.parse::<EventTag>() else { continue };
            let html_row = html_scrape::event_row_as_html_row(scraped);
            let description = html_row.description.clone();
            html_event_list.push(html_events::parse_html_event_row(
                game_id,
                session,
                scraped.event_idx,
                tag,
                html_row,
                &description,
                &roster,
            ));
        }

        self.html_events.lock().await.insert(game_id, html_event_list.clone());
        let reconciled = reconcile::reconcile(html_event_list, api_event_list.clone());

        let mut pbp_rows: Vec<PbpRow> =
            reconciled.into_iter().map(PbpRow::Event).chain(all_changes.clone().into_iter().map(PbpRow::Change)).collect();
        onice::sort_timeline(&mut pbp_rows, session);
        onice::reconstruct(&mut pbp_rows, &roster, session);

        let aggregates = aggregate::aggregate_game(&pbp_rows);

        self.play_by_play.lock().await.insert(game_id, response);
        self.api_rosters.lock().await.insert(game_id, api_roster);
        self.html_rosters.lock().await.insert(game_id, html_roster);
        self.rosters.lock().await.insert(game_id, roster);
        self.api_events.lock().await.insert(game_id, api_event_list);
        self.shifts.lock().await.insert(game_id, all_shifts);
        self.changes.lock().await.insert(game_id, all_changes);
        self.pbp.lock().await.insert(game_id, pbp_rows);
        self.aggregates.lock().await.insert(game_id, aggregates);

        Ok(())
    }

    async fn fetch_html(&self, game_id: GameId, season: &str, kind: HtmlReportKind, stage: &'static str) -> Result<String, PbpError> {
        self.client
            .html_report(season, game_id, kind)
            .await
            .map_err(|source| PbpError::Transport { game_id, stage, source })
    }

    pub async fn play_by_play(&self, game_id: GameId) -> Option<PlayByPlayResponse> {
        self.play_by_play.lock().await.get(&game_id).cloned()
    }

    pub async fn api_rosters(&self, game_id: GameId) -> Option<Roster> {
        self.api_rosters.lock().await.get(&game_id).cloned()
    }

    pub async fn html_rosters(&self, game_id: GameId) -> Option<Roster> {
        self.html_rosters.lock().await.get(&game_id).cloned()
    }

    pub async fn rosters(&self, game_id: GameId) -> Option<Roster> {
        self.rosters.lock().await.get(&game_id).cloned()
    }

    pub async fn api_events(&self, game_id: GameId) -> Option<Vec<Event>> {
        self.api_events.lock().await.get(&game_id).cloned()
    }

    pub async fn html_events(&self, game_id: GameId) -> Option<Vec<Event>> {
        self.html_events.lock().await.get(&game_id).cloned()
    }

    pub async fn shifts(&self, game_id: GameId) -> Option<Vec<Shift>> {
        self.shifts.lock().await.get(&game_id).cloned()
    }

    pub async fn changes(&self, game_id: GameId) -> Option<Vec<Change>> {
        self.changes.lock().await.get(&game_id).cloned()
    }

    pub async fn pbp(&self, game_id: GameId) -> Option<Vec<PbpRow>> {
        self.pbp.lock().await.get(&game_id).cloned()
    }

    pub async fn ind_stats(&self, game_id: GameId) -> Option<Vec<aggregate::IndRow>> {
        self.aggregates.lock().await.get(&game_id).map(|a| a.ind.clone())
    }

    pub async fn oi_stats(&self, game_id: GameId) -> Option<Vec<aggregate::OiRow>> {
        self.aggregates.lock().await.get(&game_id).map(|a| a.oi.clone())
    }

    pub async fn stats(&self, game_id: GameId) -> Option<Vec<aggregate::StatsRow>> {
        self.aggregates.lock().await.get(&game_id).map(|a| a.stats.clone())
    }

    pub async fn lines(&self, game_id: GameId) -> Option<Vec<aggregate::LineRow>> {
        self.aggregates.lock().await.get(&game_id).map(|a| a.lines.clone())
    }

    pub async fn team_stats(&self, game_id: GameId) -> Option<Vec<aggregate::TeamStatsRow>> {
        self.aggregates.lock().await.get(&game_id).map(|a| a.team_stats.clone())
    }

    /// Re-aggregate a cached game under custom grouping dimensions (§4.10),
    /// e.g. per-period or strength-split views the default whole-game cache
    /// in [`Self::stats`] doesn't carry.
    pub async fn aggregate_with(&self, game_id: GameId, group_by: &aggregate::GroupBy) -> Option<AggregateResult> {
        let rows = self.pbp.lock().await.get(&game_id).cloned()?;
        Some(aggregate::aggregate_with(&rows, group_by))
    }
}

/// Merge C3 (api, has `api_id`) with C5 (html, has `status`/`starter`): html
/// is authoritative for roster membership, api fills `api_id` by eh_id match.
fn merge_rosters(api: &Roster, html: &Roster) -> Roster {
    let entries = html
        .entries
        .iter()
        .cloned()
        .map(|mut entry| {
            if let Some(api_entry) = api.entries.iter().find(|a| a.team == entry.team && a.eh_id == entry.eh_id) {
                entry.api_id = api_entry.api_id;
            }
            entry
        })
        .collect::<Vec<RosterEntry>>();
    Roster { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::enums::{PlayerStatus, Position};

    fn entry(game_id: GameId, team: &str, eh_id: &str, api_id: Option<i64>) -> RosterEntry {
        RosterEntry {
            game_id,
            team: team.into(),
            jersey: 9,
            player_name: eh_id.replace('.', " "),
            eh_id: eh_id.into(),
            api_id,
            position: Position::Center,
            team_venue: TeamVenue::Home,
            starter: true,
            status: PlayerStatus::Active,
        }
    }

    #[test]
    fn merge_rosters_fills_api_id_from_eh_id_match() {
        let game_id = GameId::new(2013020971);
        let api = Roster { entries: vec![entry(game_id, "CBJ", "NATHAN.HORTON", Some(8470596))] };
        let html = Roster { entries: vec![entry(game_id, "CBJ", "NATHAN.HORTON", None)] };
        let merged = merge_rosters(&api, &html);
        assert_eq!(merged.entries[0].api_id, Some(8470596));
    }

    #[test]
    fn merge_rosters_keeps_html_entry_with_no_api_match() {
        let game_id = GameId::new(2013020971);
        let api = Roster { entries: vec![] };
        let html = Roster { entries: vec![entry(game_id, "CBJ", "SOME.SCRATCH", None)] };
        let merged = merge_rosters(&api, &html);
        assert_eq!(merged.entries.len(), 1);
        assert_eq!(merged.entries[0].api_id, None);
    }
}
