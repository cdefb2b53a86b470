use std::time::Duration;

/// Ambient configuration for the pipeline: HTTP timeouts/retries for the
/// external collaborators (§3a) and the orchestrator's worker-pool size.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub debug: bool,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff_base: Duration,
    pub max_concurrent_games: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debug: false,
            connect_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(10),
            max_retries: 7,
            retry_backoff_base: Duration::from_secs(2),
            max_concurrent_games: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

/// HTTP status codes that the client retries instead of failing immediately.
/// 54/60 are connection-reset/timeout codes surfaced by some reverse proxies
/// in front of nhl.com; the rest are standard transient statuses.
pub const RETRY_STATUS_FORCELIST: &[u16] = &[
    54, 60, 401, 403, 404, 408, 429, 500, 502, 503, 504,
];
