use std::time::Duration;

use tracing::{info, warn};

use super::{EMPTY_CLAN_INPUT_MESSAGE, INVALID_CLAN_MESSAGE, SAVE_CLAN_FAILED_MESSAGE};
use crate::async_state::{AsyncState, RequestSlot, Ticket};
use crate::clan::{ClanIdentifier, ClanIdentity, ClanStore};
use crate::error::FetchError;
use crate::gateway::WarResultsGateway;
use crate::route::{Route, resolve_route};
use crate::war::PlayerWarResult;

/// How long the validated state is shown before routing is re-evaluated.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// A validation probe in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupProbe {
    pub ticket: Ticket,
    pub candidate: ClanIdentifier,
}

/// `Success` is the transient "validated" state; the candidate is persisted by then.
#[derive(Debug, Default)]
pub struct SetupMachine {
    slot: RequestSlot<ClanIdentifier>,
}

impl SetupMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AsyncState<ClanIdentifier> {
        self.slot.state()
    }

    pub fn validated(&self) -> Option<&ClanIdentifier> {
        self.slot.state().success()
    }

    /// Blank input fails locally and never reaches the network.
    pub fn begin_submit(&mut self, raw: &str) -> Option<SetupProbe> {
        match ClanIdentifier::parse(raw) {
            Ok(candidate) => Some(SetupProbe {
                ticket: self.slot.begin(),
                candidate,
            }),
            Err(_) => {
                self.slot.fail_now(EMPTY_CLAN_INPUT_MESSAGE);
                None
            }
        }
    }

    /// Persists the candidate only when the probe succeeded and is still current.
    pub fn finish_submit<S: ClanStore>(
        &mut self,
        probe: SetupProbe,
        outcome: Result<Vec<PlayerWarResult>, FetchError>,
        identity: &ClanIdentity<S>,
    ) -> bool {
        if !self.slot.is_current(probe.ticket) {
            return false;
        }

        let settled = match outcome {
            Ok(rows) => match identity.set(probe.candidate.as_str()) {
                Ok(id) => {
                    info!(clan_tag = %id, rows = rows.len(), "clan id validated");
                    Ok(id)
                }
                Err(e) => {
                    warn!(error = %e, "failed to persist clan id");
                    Err(SAVE_CLAN_FAILED_MESSAGE.to_string())
                }
            },
            Err(e) => {
                warn!(clan_tag = %probe.candidate, error = %e, "clan validation probe failed");
                Err(INVALID_CLAN_MESSAGE.to_string())
            }
        };
        self.slot.settle(probe.ticket, settled)
    }

    /// Runs the whole submit round trip. Returns whether the clan was validated.
    pub async fn submit<G, S>(&mut self, gateway: &G, identity: &ClanIdentity<S>, raw: &str) -> bool
    where
        G: WarResultsGateway,
        S: ClanStore,
    {
        let Some(probe) = self.begin_submit(raw) else {
            return false;
        };
        let outcome = gateway.fetch_current_war(probe.candidate.tag()).await;
        self.finish_submit(probe, outcome, identity);
        self.validated().is_some()
    }

    /// Where to go once the redirect delay has passed, re-running startup routing
    /// against whatever is persisted now. `None` until the clan is validated.
    pub fn redirect_route<S: ClanStore>(&self, identity: &ClanIdentity<S>) -> Option<Route> {
        self.validated()?;
        Some(resolve_route(Route::Dashboard, identity))
    }

    pub fn dismiss(&mut self) {
        self.slot.dismiss();
    }
}
