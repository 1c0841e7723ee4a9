//! Setup, Dashboard and Leaderboard state machines.
//!
//! Each machine exposes a synchronous `begin_*` / `finish_*` pair so a UI can
//! hold it in reactive state across an `await`, plus an `async` convenience
//! method that runs the whole round trip for callers that own it outright.

mod dashboard;
mod leaderboard;
mod setup;

pub use dashboard::{DashboardMachine, NOTICE_TTL, WarFetchNext, WarFetchProbe};
pub use leaderboard::LeaderboardMachine;
pub use setup::{REDIRECT_DELAY, SetupMachine, SetupProbe};

pub const EMPTY_CLAN_INPUT_MESSAGE: &str = "Please enter a clan ID";
pub const INVALID_CLAN_MESSAGE: &str = "Invalid clan ID. Please check the clan tag and try again.";
pub const SAVE_CLAN_FAILED_MESSAGE: &str = "Could not save the clan ID. Please try again.";
pub const SETUP_SUCCESS_MESSAGE: &str = "Clan ID validated successfully! Redirecting...";
pub const LOAD_RESULTS_FAILED_MESSAGE: &str =
    "Failed to fetch war results. Make sure the backend is running.";
pub const NO_CLAN_MESSAGE: &str = "No clan ID found. Please set up your clan first.";
pub const NO_WAR_DATA_MESSAGE: &str = "No war data found. The clan might not be in war currently.";
pub const WAR_FETCH_FAILED_MESSAGE: &str = "Failed to fetch war data. Please try again later.";
pub const LOAD_LEADERBOARD_FAILED_MESSAGE: &str =
    "Failed to fetch leaderboard. Make sure the backend is running.";

pub fn war_fetched_notice(count: usize) -> String {
    let noun = if count == 1 { "player" } else { "players" };
    format!("Fetched war data for {count} {noun}!")
}
