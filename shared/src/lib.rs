pub mod async_state;
pub mod clan;
pub mod error;
pub mod gateway;
pub mod leaderboard;
pub mod route;
pub mod summary;
pub mod view;
pub mod war;

#[cfg(test)]
mod testing;

pub use async_state::{AsyncState, Notice, NoticeBoard, RequestSlot, Ticket};
pub use clan::{CLAN_ID_KEY, ClanIdentifier, ClanIdentity, ClanStore, MemoryClanStore};
pub use error::{ClanIdError, FetchError, GatewayError, RecordError, StoreError};
pub use gateway::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT, WarResultsGateway, endpoint};
pub use leaderboard::{
    LeaderboardEntry, LeaderboardSummary, RankMarker, RankedEntry, RankedLeaderboard,
    decode_leaderboard, first_ordering_violation, progress_ratio, rank,
};
pub use route::{Route, resolve_route};
pub use summary::WarSummary;
pub use war::{NO_WAR_MARKER, PlayerWarResult, RawPlayerWarResult, decode_results, normalize};
