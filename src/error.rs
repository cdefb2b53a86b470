use thiserror::Error;

use crate::ids::GameId;

/// The single error type surfaced by the pipeline's in-scope stages.
///
/// Transport and JSON-shape failures are distinct from the domain-level
/// failures a reconciliation stage can raise; both flow through here so the
/// orchestrator (C11) has one type to catch.
#[derive(Error, Debug)]
pub enum PbpError {
    #[error("game {game_id}: transport failure during {stage}: {source}")]
    Transport {
        game_id: GameId,
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("game {game_id}: parse failure during {stage}: {message}")]
    Parse {
        game_id: GameId,
        stage: &'static str,
        message: String,
    },

    #[error("game {game_id} event {event_idx}: player {team}{jersey} not found in active or scratch roster")]
    UnresolvedPlayer {
        game_id: GameId,
        event_idx: i64,
        team: String,
        jersey: i32,
    },

    #[error("aggregator rejected row: {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of running the orchestrator (C11) across a batch of games: which
/// games produced a complete PBP and which failed, and why.
#[derive(Debug, Default)]
pub struct OrchestratorReport {
    pub succeeded: Vec<GameId>,
    pub failed: Vec<(GameId, PbpError)>,
}

impl OrchestratorReport {
    pub fn record_success(&mut self, game_id: GameId) {
        self.succeeded.push(game_id);
    }

    pub fn record_failure(&mut self, game_id: GameId, err: PbpError) {
        self.failed.push((game_id, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_tracks_both_outcomes() {
        let mut report = OrchestratorReport::default();
        report.record_success(GameId::new(2019020684));
        report.record_failure(
            GameId::new(2021020224),
            PbpError::Parse {
                game_id: GameId::new(2021020224),
                stage: "html_events",
                message: "missing table".into(),
            },
        );
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.failed.len(), 1);
    }
}
