use std::time::Duration;

use tracing::{info, warn};

use super::{
    LOAD_RESULTS_FAILED_MESSAGE, NO_CLAN_MESSAGE, NO_WAR_DATA_MESSAGE, WAR_FETCH_FAILED_MESSAGE,
    war_fetched_notice,
};
use crate::async_state::{AsyncState, Notice, NoticeBoard, RequestSlot, Ticket};
use crate::clan::{ClanIdentity, ClanStore};
use crate::error::FetchError;
use crate::gateway::WarResultsGateway;
use crate::summary::WarSummary;
use crate::war::PlayerWarResult;

/// Lifetime of the "war data fetched" notice.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarFetchProbe {
    pub ticket: Ticket,
    /// Stored identifier with its `#` stripped.
    pub clan_tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarFetchNext {
    /// New rows were recorded: reload all results, then clear `notice_id` after [`NOTICE_TTL`].
    ReloadResults { notice_id: u64 },
    Done,
}

/// All-results table plus the independent "Fetch War Data" action.
#[derive(Debug, Default)]
pub struct DashboardMachine {
    results: RequestSlot<Vec<PlayerWarResult>>,
    war_fetch: RequestSlot<usize>,
    notices: NoticeBoard,
}

impl DashboardMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &AsyncState<Vec<PlayerWarResult>> {
        self.results.state()
    }

    /// Number of rows recorded by the last successful war fetch.
    pub fn war_fetch(&self) -> &AsyncState<usize> {
        self.war_fetch.state()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn summary(&self) -> Option<WarSummary> {
        self.results
            .state()
            .success()
            .map(|results| WarSummary::from_results(results))
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.results.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<PlayerWarResult>, FetchError>,
    ) -> bool {
        if !self.results.is_current(ticket) {
            return false;
        }
        let outcome = outcome.map_err(|e| {
            warn!(error = %e, "failed to fetch war results");
            LOAD_RESULTS_FAILED_MESSAGE.to_string()
        });
        self.results.settle(ticket, outcome)
    }

    /// Fails immediately, without a gateway call, when no clan is configured.
    pub fn begin_war_fetch<S: ClanStore>(
        &mut self,
        identity: &ClanIdentity<S>,
    ) -> Option<WarFetchProbe> {
        let Some(clan) = identity.get() else {
            self.war_fetch.fail_now(NO_CLAN_MESSAGE);
            return None;
        };
        Some(WarFetchProbe {
            ticket: self.war_fetch.begin(),
            clan_tag: clan.tag().to_string(),
        })
    }

    pub fn finish_war_fetch(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<PlayerWarResult>, FetchError>,
    ) -> WarFetchNext {
        if !self.war_fetch.is_current(ticket) {
            return WarFetchNext::Done;
        }
        match outcome {
            Ok(rows) if rows.is_empty() => {
                self.war_fetch
                    .settle(ticket, Err(NO_WAR_DATA_MESSAGE.to_string()));
                WarFetchNext::Done
            }
            Ok(rows) => {
                let count = rows.len();
                info!(count, "current war recorded");
                self.war_fetch.settle(ticket, Ok(count));
                let notice_id = self.notices.post(war_fetched_notice(count));
                WarFetchNext::ReloadResults { notice_id }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch current war");
                self.war_fetch
                    .settle(ticket, Err(WAR_FETCH_FAILED_MESSAGE.to_string()));
                WarFetchNext::Done
            }
        }
    }

    pub fn clear_notice(&mut self, notice_id: u64) -> bool {
        self.notices.clear(notice_id)
    }

    pub async fn load<G: WarResultsGateway>(&mut self, gateway: &G) -> bool {
        let ticket = self.begin_load();
        let outcome = gateway.fetch_all_results().await;
        self.finish_load(ticket, outcome)
    }

    /// Pulls the live war and, when it recorded rows, reloads all results.
    pub async fn fetch_war_data<G, S>(&mut self, gateway: &G, identity: &ClanIdentity<S>) -> WarFetchNext
    where
        G: WarResultsGateway,
        S: ClanStore,
    {
        let Some(probe) = self.begin_war_fetch(identity) else {
            return WarFetchNext::Done;
        };
        let outcome = gateway.fetch_current_war(&probe.clan_tag).await;
        let next = self.finish_war_fetch(probe.ticket, outcome);
        if matches!(next, WarFetchNext::ReloadResults { .. }) {
            self.load(gateway).await;
        }
        next
    }

    pub fn dismiss(&mut self) {
        self.results.dismiss();
        self.war_fetch.dismiss();
    }
}
