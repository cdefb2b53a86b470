//! Reconciled NHL play-by-play: two independently scraped views of a game
//! (the `api-web` JSON feed and the public HTML reports) merged into one
//! canonical event stream, with on-ice context and per-player aggregates.
//!
//! [`orchestrator::Scraper`] is the entry point: it drives the external
//! fetches (`client`) and the pure reconciliation pipeline (`parse` through
//! `aggregate`) per game, bounded by [`config::PipelineConfig`].

mod aggregate;
mod changes;
mod client;
mod config;
mod date;
mod error;
mod fixes;
mod geometry;
mod html_scrape;
mod http_client;
mod ids;
mod model;
mod names;
mod onice;
mod orchestrator;
mod parse;
mod reconcile;
mod types;
mod wire;
mod xg;

// External collaborators (§3a).
pub use client::{Client, HtmlReportKind};
pub use config::{PipelineConfig, RETRY_STATUS_FORCELIST};
pub use date::{GameDate, Season};
pub use ids::GameId;

// Errors.
pub use error::{OrchestratorReport, PbpError};

// Orchestrator (C11).
pub use orchestrator::Scraper;

// Canonical domain model, shared across every stage.
pub use model::{
    Change, ChangePlayer, Event, EventPlayer, EventTag, Game, Indicators, OnIceSet, OnIceSkater,
    PenaltyDetail, PlayerRole, PlayerRoleTagged, PlayerSentinel, PlayerStatus, Position, Roster,
    RosterEntry, Session, Shift, ShotDetail, ShotType, TeamJersey, TeamVenue, Zone,
};

// Pipeline stages, exposed for callers who want to run a stage in isolation
// (tests, partial re-scrapes) instead of going through the orchestrator.
pub use aggregate::{
    aggregate_game, aggregate_with, AggregateResult, GroupBy, IndRow, Level, LineRow, OiRow, StatsRow, TeamStatsRow,
};
pub use changes::{build_changes, sort_changes};
pub use onice::{reconstruct, sort_timeline, PbpRow};
pub use reconcile::reconcile;
pub use xg::{FenwickFeatures, XgModel};

// Schedule/standings fetch types (§3a/§9a), independent of the PBP pipeline.
pub use types::{
    DailySchedule, DailyScores, GameDay, GameScore, ScheduleGame, ScheduleTeam,
    TeamScheduleResponse, WeeklyScheduleResponse,
};
pub use types::{GameState, ParseGameStateError};
pub use types::{SeasonInfo, SeasonsResponse, Standing, StandingsResponse};
