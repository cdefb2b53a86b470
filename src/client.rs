use anyhow::Result;

use crate::config::PipelineConfig;
use crate::date::GameDate;
use crate::http_client::{HttpClient, NhlEndpoint};
use crate::ids::GameId;
use crate::types::{Standing, StandingsResponse, WeeklyScheduleResponse};
use crate::wire::api_schema::PlayByPlayResponse;

/// HTML report kind, used to build the four report URLs in §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlReportKind {
    Rosters,
    Events,
    HomeShifts,
    AwayShifts,
}

impl HtmlReportKind {
    fn prefix(&self) -> &'static str {
        match self {
            HtmlReportKind::Rosters => "RO",
            HtmlReportKind::Events => "PL",
            HtmlReportKind::HomeShifts => "TH",
            HtmlReportKind::AwayShifts => "TV",
        }
    }
}

/// The thin external-collaborator surface of the crate (§3a): HTTP transport
/// only, no reconciliation. Everything downstream of a fetch lives in
/// `crate::parse` and is plain, pure Rust operating on these typed payloads.
pub struct Client {
    http: HttpClient,
}

impl Client {
    pub fn new() -> Result<Self> {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn with_debug() -> Result<Self> {
        let mut config = PipelineConfig::default();
        config.debug = true;
        Self::with_config(config)
    }

    /// `GET gamecenter/{game_id}/play-by-play`, the JSON source for C3.
    pub async fn play_by_play(&self, game_id: GameId) -> Result<PlayByPlayResponse> {
        self.http
            .get_json(
                NhlEndpoint::ApiWeb,
                &format!("gamecenter/{}/play-by-play", game_id),
                None,
            )
            .await
    }

    /// `GET gamecenter/{game_id}/landing`, supplementary JSON metadata.
    pub async fn landing(&self, game_id: GameId) -> Result<serde_json::Value> {
        self.http
            .get_json(
                NhlEndpoint::ApiWeb,
                &format!("gamecenter/{}/landing", game_id),
                None,
            )
            .await
    }

    /// `GET .../htmlreports/{season}/{prefix}{html_id}.HTM`, the four HTML
    /// sources for C4/C5/C6, decoded ISO-8859-1.
    pub async fn html_report(
        &self,
        season: &str,
        game_id: GameId,
        kind: HtmlReportKind,
    ) -> Result<String> {
        let resource = format!("{}/{}{}.HTM", season, kind.prefix(), game_id.html_id());
        self.http.get_latin1_text(NhlEndpoint::HtmlReports, &resource).await
    }

    /// `GET club-schedule-season/{team}/{season}` (§3a/§9a).
    pub async fn club_schedule_season(
        &self,
        team: &str,
        season: &str,
    ) -> Result<WeeklyScheduleResponse> {
        self.http
            .get_json(
                NhlEndpoint::ApiWeb,
                &format!("club-schedule-season/{}/{}", team, season),
                None,
            )
            .await
    }

    /// `GET standings/{date|now}` (§3a/§9a).
    pub async fn standings(&self, date: Option<&GameDate>) -> Result<Vec<Standing>> {
        let date = date.cloned().unwrap_or_default();
        let response: StandingsResponse = self
            .http
            .get_json(
                NhlEndpoint::ApiWeb,
                &format!("standings/{}", date.to_api_string()),
                None,
            )
            .await?;
        Ok(response.standings)
    }
}
