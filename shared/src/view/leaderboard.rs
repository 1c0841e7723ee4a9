use tracing::warn;

use super::LOAD_LEADERBOARD_FAILED_MESSAGE;
use crate::async_state::{AsyncState, RequestSlot, Ticket};
use crate::error::FetchError;
use crate::gateway::WarResultsGateway;
use crate::leaderboard::{LeaderboardEntry, RankedLeaderboard, first_ordering_violation, rank};

#[derive(Debug, Default)]
pub struct LeaderboardMachine {
    board: RequestSlot<RankedLeaderboard>,
}

impl LeaderboardMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &AsyncState<RankedLeaderboard> {
        self.board.state()
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.board.begin()
    }

    /// Ranks the aggregate in received order; an unsorted aggregate is logged, not re-sorted.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<LeaderboardEntry>, FetchError>,
    ) -> bool {
        if !self.board.is_current(ticket) {
            return false;
        }
        let outcome = match outcome {
            Ok(entries) => {
                if let Some(index) = first_ordering_violation(&entries) {
                    warn!(
                        index,
                        player = %entries[index].player_name,
                        "leaderboard aggregate is not sorted by total stars"
                    );
                }
                Ok(rank(entries))
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch leaderboard");
                Err(LOAD_LEADERBOARD_FAILED_MESSAGE.to_string())
            }
        };
        self.board.settle(ticket, outcome)
    }

    pub async fn load<G: WarResultsGateway>(&mut self, gateway: &G) -> bool {
        let ticket = self.begin_load();
        let outcome = gateway.fetch_leaderboard().await;
        self.finish_load(ticket, outcome)
    }

    pub fn dismiss(&mut self) {
        self.board.dismiss();
    }
}
