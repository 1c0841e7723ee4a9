use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use clash_tracker_shared::gateway::{
    CLAN_TAG_PARAM, CURRENT_WAR_PATH, HEALTH_PATH, LEADERBOARD_PATH, RESULTS_PATH,
};
use clash_tracker_shared::{
    DEFAULT_REQUEST_TIMEOUT, FetchError, GatewayError, LeaderboardEntry,
    PlayerWarResult, WarResultsGateway, decode_leaderboard, decode_results, endpoint,
};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;

/// Same-origin API prefix used unless `CLASH_API_BASE_URL` is set at build time.
pub const SAME_ORIGIN_API_BASE: &str = "/api";

/// Browser [`WarResultsGateway`] over `fetch`, aborted after a fixed deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpGateway {
    base_url: &'static str,
    timeout: Duration,
}

impl HttpGateway {
    /// Base URL is baked in at build time from `CLASH_API_BASE_URL`.
    pub fn from_build_env() -> Self {
        Self {
            base_url: option_env!("CLASH_API_BASE_URL").unwrap_or(SAME_ORIGIN_API_BASE),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    async fn get(self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, GatewayError> {
        let url = endpoint(self.base_url, path);
        let controller = web_sys::AbortController::new()
            .map_err(|e| GatewayError::NetworkUnreachable(format!("{e:?}")))?;

        let timed_out = Rc::new(Cell::new(false));
        // Dropping the handle cancels the deadline once the body is in.
        let _deadline = {
            let controller = controller.clone();
            let timed_out = Rc::clone(&timed_out);
            Timeout::new(timeout_millis(self.timeout), move || {
                timed_out.set(true);
                controller.abort();
            })
        };
        let classify = |e: gloo_net::Error| {
            if timed_out.get() {
                GatewayError::Timeout
            } else {
                GatewayError::NetworkUnreachable(e.to_string())
            }
        };

        let response = Request::get(&url)
            .query(query.iter().copied())
            .abort_signal(Some(&controller.signal()))
            .send()
            .await
            .map_err(&classify)
            .inspect_err(|e| warn(&format!("GET {url} failed: {e}")))?;

        if !response.ok() {
            let status = response.status();
            warn(&format!("GET {url} returned HTTP {status}"));
            return Err(GatewayError::ServerError(status));
        }
        response.binary().await.map_err(&classify)
    }
}

/// Saturating conversion for `gloo_timers` delays.
pub(crate) fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

impl WarResultsGateway for HttpGateway {
    async fn health(&self) -> Result<(), FetchError> {
        self.get(HEALTH_PATH, &[]).await?;
        Ok(())
    }

    async fn fetch_all_results(&self) -> Result<Vec<PlayerWarResult>, FetchError> {
        let body = self.get(RESULTS_PATH, &[]).await?;
        Ok(decode_results(&body)?)
    }

    async fn fetch_current_war(&self, clan_tag: &str) -> Result<Vec<PlayerWarResult>, FetchError> {
        let body = self
            .get(CURRENT_WAR_PATH, &[(CLAN_TAG_PARAM, clan_tag)])
            .await?;
        Ok(decode_results(&body)?)
    }

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, FetchError> {
        let body = self.get(LEADERBOARD_PATH, &[]).await?;
        let entries = decode_leaderboard(&body)?;
        Ok(entries)
    }
}
