use std::time::Duration;

use crate::error::FetchError;
use crate::leaderboard::LeaderboardEntry;
use crate::war::PlayerWarResult;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const HEALTH_PATH: &str = "/health";
pub const RESULTS_PATH: &str = "/results";
pub const CURRENT_WAR_PATH: &str = "/fetch-currentwar";
pub const LEADERBOARD_PATH: &str = "/leaderboard";
pub const CLAN_TAG_PARAM: &str = "clanTag";

/// Typed client for the war-results backend.
///
/// Implementations classify failures into [`crate::GatewayError`] and decode
/// bodies with [`crate::decode_results`] / [`crate::decode_leaderboard`]. They
/// never retry.
#[allow(async_fn_in_trait)]
pub trait WarResultsGateway {
    async fn health(&self) -> Result<(), FetchError>;

    /// All recorded results, in server order.
    async fn fetch_all_results(&self) -> Result<Vec<PlayerWarResult>, FetchError>;

    /// Makes the backend pull the live war for `clan_tag` (no `#`) and returns the new rows.
    async fn fetch_current_war(&self, clan_tag: &str) -> Result<Vec<PlayerWarResult>, FetchError>;

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, FetchError>;
}

/// Joins `base` and an API path without doubling the slash.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
