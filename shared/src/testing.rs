use std::cell::RefCell;

use crate::error::FetchError;
use crate::gateway::WarResultsGateway;
use crate::leaderboard::LeaderboardEntry;
use crate::war::PlayerWarResult;

/// Scripted gateway that records every call it receives.
#[derive(Default)]
pub(crate) struct FakeGateway {
    pub results: Option<Result<Vec<PlayerWarResult>, FetchError>>,
    pub current_war: Option<Result<Vec<PlayerWarResult>, FetchError>>,
    pub leaderboard: Option<Result<Vec<LeaderboardEntry>, FetchError>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeGateway {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl WarResultsGateway for FakeGateway {
    async fn health(&self) -> Result<(), FetchError> {
        self.record("health".to_string());
        Ok(())
    }

    async fn fetch_all_results(&self) -> Result<Vec<PlayerWarResult>, FetchError> {
        self.record("results".to_string());
        self.results.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_current_war(&self, clan_tag: &str) -> Result<Vec<PlayerWarResult>, FetchError> {
        self.record(format!("current-war:{clan_tag}"));
        self.current_war.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, FetchError> {
        self.record("leaderboard".to_string());
        self.leaderboard.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub(crate) fn war_row(player: &str, stars: u32) -> PlayerWarResult {
    PlayerWarResult {
        id: None,
        clan_name: "Night Owls".to_string(),
        player_name: player.to_string(),
        war_id: "war-20250105".to_string(),
        stars,
        created_at: None,
    }
}

pub(crate) fn board_entry(player: &str, total_stars: u64) -> LeaderboardEntry {
    LeaderboardEntry {
        clan_name: Some("Night Owls".to_string()),
        player_name: player.to_string(),
        total_stars,
    }
}
