use clash_tracker_shared::gateway::{
    CLAN_TAG_PARAM, CURRENT_WAR_PATH, HEALTH_PATH, LEADERBOARD_PATH, RESULTS_PATH,
};
use clash_tracker_shared::{
    FetchError, GatewayError, LeaderboardEntry, PlayerWarResult, WarResultsGateway,
    decode_leaderboard, decode_results, endpoint,
};
use tracing::{debug, warn};

use crate::config::Config;

/// [`WarResultsGateway`] over a timeout-configured `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("clash-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, GatewayError> {
        let url = endpoint(&self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| classify(&e))
            .inspect_err(|e| warn!(%url, error = %e, "request failed"))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "backend returned an error status");
            return Err(GatewayError::ServerError(status.as_u16()));
        }
        let body = response.bytes().await.map_err(|e| classify(&e))?;
        Ok(body.to_vec())
    }
}

fn classify(error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if let Some(status) = error.status() {
        GatewayError::ServerError(status.as_u16())
    } else {
        GatewayError::NetworkUnreachable(error.to_string())
    }
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
        Ok(decode_leaderboard(&body)?)
    }
}
