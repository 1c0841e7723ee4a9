use clap::Subcommand;
use clash_tracker_shared::view::{
    DashboardMachine, LeaderboardMachine, NO_CLAN_MESSAGE, SETUP_SUCCESS_MESSAGE, SetupMachine,
    WarFetchNext,
};
use clash_tracker_shared::{AsyncState, ClanIdentity, ClanStore, Route, WarResultsGateway, resolve_route};
use tracing::info;

use crate::render;

pub const NOT_CONFIGURED_MESSAGE: &str = "No clan configured. Run `clash-tracker setup <TAG>` first.";
pub const FORGOTTEN_MESSAGE: &str = "Clan ID cleared.";

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Validate a clan tag against the backend and remember it
    Setup {
        /// Clan tag, with or without the leading `#`
        tag: String,
    },
    /// Show every recorded war result
    Dashboard,
    /// Pull the configured clan's current war into the backend, then show the dashboard
    FetchWar,
    /// Show the all-time star leaderboard
    Leaderboard,
    /// Check that the backend is reachable
    Health,
    /// Show the configured clan and where the app would start
    Status,
    /// Forget the configured clan
    Forget,
}

/// Runs one command. `Ok` is printed to stdout, `Err` to stderr with a failing exit code.
pub async fn run<G, S>(command: Command, gateway: &G, identity: &ClanIdentity<S>) -> Result<String, String>
where
    G: WarResultsGateway,
    S: ClanStore,
{
    match command {
        Command::Setup { tag } => setup(gateway, identity, &tag).await,
        Command::Dashboard => {
            require_route(Route::Dashboard, identity)?;
            dashboard(gateway).await
        }
        Command::FetchWar => {
            require_route(Route::Dashboard, identity)?;
            fetch_war(gateway, identity).await
        }
        Command::Leaderboard => {
            require_route(Route::Leaderboard, identity)?;
            leaderboard(gateway).await
        }
        Command::Health => gateway
            .health()
            .await
            .map(|()| "Backend is reachable.".to_string())
            .map_err(|e| format!("Backend health check failed: {e}")),
        Command::Status => Ok(status(identity)),
        Command::Forget => identity
            .clear()
            .map(|()| FORGOTTEN_MESSAGE.to_string())
            .map_err(|e| format!("Could not clear the clan ID: {e}")),
    }
}

fn require_route<S: ClanStore>(requested: Route, identity: &ClanIdentity<S>) -> Result<(), String> {
    match resolve_route(requested, identity) {
        Route::Setup => Err(NOT_CONFIGURED_MESSAGE.to_string()),
        _ => Ok(()),
    }
}

fn settled<T>(state: &AsyncState<T>) -> Result<&T, String> {
    match state {
        AsyncState::Success(value) => Ok(value),
        AsyncState::Failure(message) => Err(message.clone()),
        AsyncState::Idle | AsyncState::Loading => Err("Request did not complete.".to_string()),
    }
}

async fn setup<G, S>(gateway: &G, identity: &ClanIdentity<S>, tag: &str) -> Result<String, String>
where
    G: WarResultsGateway,
    S: ClanStore,
{
    let mut machine = SetupMachine::new();
    machine.submit(gateway, identity, tag).await;
    let clan = settled(machine.state())?;
    info!(clan_tag = %clan, "clan configured");
    Ok(format!("{SETUP_SUCCESS_MESSAGE}\nClan: {clan}"))
}

async fn dashboard<G: WarResultsGateway>(gateway: &G) -> Result<String, String> {
    let mut machine = DashboardMachine::new();
    machine.load(gateway).await;
    settled(machine.results()).map(|results| render::dashboard(results))
}

async fn fetch_war<G, S>(gateway: &G, identity: &ClanIdentity<S>) -> Result<String, String>
where
    G: WarResultsGateway,
    S: ClanStore,
{
    let mut machine = DashboardMachine::new();
    let next = machine.fetch_war_data(gateway, identity).await;
    settled(machine.war_fetch())?;

    let notice = machine
        .notice()
        .map(|notice| notice.message.clone())
        .unwrap_or_default();
    if let WarFetchNext::ReloadResults { notice_id } = next {
        // The terminal shows the notice once, so it is cleared straight away.
        machine.clear_notice(notice_id);
    }
    // The war is stored by now, so a failed reload must not hide the notice.
    settled(machine.results())
        .map(|results| format!("{notice}\n\n{}", render::dashboard(results)))
        .map_err(|e| format!("{notice}\n{e}"))
}

async fn leaderboard<G: WarResultsGateway>(gateway: &G) -> Result<String, String> {
    let mut machine = LeaderboardMachine::new();
    machine.load(gateway).await;
    settled(machine.board()).map(render::leaderboard)
}

fn status<S: ClanStore>(identity: &ClanIdentity<S>) -> String {
    let start = resolve_route(Route::Dashboard, identity);
    match identity.get() {
        Some(clan) => format!("Clan: {clan}\nStart page: {} ({})", start.title(), start.path()),
        None => format!("{NO_CLAN_MESSAGE}\nStart page: {} ({})", start.title(), start.path()),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use clash_tracker_shared::view::{
        INVALID_CLAN_MESSAGE, LOAD_LEADERBOARD_FAILED_MESSAGE, LOAD_RESULTS_FAILED_MESSAGE,
        NO_WAR_DATA_MESSAGE, SETUP_SUCCESS_MESSAGE,
    };
    use clash_tracker_shared::{ClanIdentity, MemoryClanStore};
    use serde_json::json;

    use super::{Command, FORGOTTEN_MESSAGE, NOT_CONFIGURED_MESSAGE, run};
    use crate::gateway::HttpGateway;
    use crate::gateway::tests::{current_war_echo, spawn_test_server, test_config, war_json};

    fn backend() -> Router {
        Router::new()
            .route("/api/health", get(|| async { "OK" }))
            .route("/api/fetch-currentwar", get(current_war_echo))
            .route(
                "/api/results",
                get(|| async { Json(json!([war_json("Alice", 6), war_json("Bob", 2)])) }),
            )
            .route(
                "/api/leaderboard",
                get(|| async {
                    Json(json!([
                        {"playerName": "Alice", "totalStars": 12},
                        {"playerName": "Bob", "totalStars": 3}
                    ]))
                }),
            )
    }

    fn failing_backend() -> Router {
        Router::new()
            .route(
                "/api/fetch-currentwar",
                get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
            )
            .route(
                "/api/results",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "db down") }),
            )
            .route(
                "/api/leaderboard",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
            )
    }

    #[tokio::test]
    async fn setup_persists_normalized_clan() {
        let (addr, server) = spawn_test_server(backend()).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::new());

        let output = run(Command::Setup { tag: "##2gc8p2l88".to_string() }, &gateway, &identity)
            .await
            .expect("validated");
        assert!(output.starts_with(SETUP_SUCCESS_MESSAGE));
        assert!(output.ends_with("Clan: #2gc8p2l88"));
        assert_eq!(identity.store().raw().as_deref(), Some("#2gc8p2l88"));

        server.abort();
    }

    #[tokio::test]
    async fn setup_rejected_by_backend_persists_nothing() {
        let (addr, server) = spawn_test_server(failing_backend()).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::new());

        let err = run(Command::Setup { tag: "BAD".to_string() }, &gateway, &identity)
            .await
            .expect_err("rejected");
        assert_eq!(err, INVALID_CLAN_MESSAGE);
        assert!(!identity.is_configured());

        server.abort();
    }

    #[tokio::test]
    async fn views_require_a_configured_clan() {
        let (addr, server) = spawn_test_server(backend()).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::new());

        for command in [Command::Dashboard, Command::FetchWar, Command::Leaderboard] {
            let err = run(command, &gateway, &identity).await.expect_err("not configured");
            assert_eq!(err, NOT_CONFIGURED_MESSAGE);
        }

        server.abort();
    }

    #[tokio::test]
    async fn dashboard_renders_results() {
        let (addr, server) = spawn_test_server(backend()).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::with_value("#ABC"));

        let output = run(Command::Dashboard, &gateway, &identity).await.expect("dashboard");
        assert!(output.starts_with("Results: 2  Wars: 1  Stars: 8  Avg: 4.0"));
        assert!(output.contains("Alice"));
        assert!(output.contains("Jan 5, 2025, 03:04 PM"));

        server.abort();
    }

    #[tokio::test]
    async fn fetch_war_reports_count_then_reloads_dashboard() {
        let (addr, server) = spawn_test_server(backend()).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::with_value("#2gc8p2l88"));

        let output = run(Command::FetchWar, &gateway, &identity).await.expect("fetched");
        assert!(output.starts_with("Fetched war data for 1 player!"));
        assert!(output.contains("Results: 2"));

        server.abort();
    }

    #[tokio::test]
    async fn fetch_war_keeps_notice_when_reload_fails() {
        let app = Router::new()
            .route("/api/fetch-currentwar", get(current_war_echo))
            .route(
                "/api/results",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "db down") }),
            );
        let (addr, server) = spawn_test_server(app).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::with_value("#ABC"));

        let err = run(Command::FetchWar, &gateway, &identity).await.expect_err("reload failed");
        assert_eq!(
            err,
            format!("Fetched war data for 1 player!\n{LOAD_RESULTS_FAILED_MESSAGE}")
        );

        server.abort();
    }

    #[tokio::test]
    async fn fetch_war_without_war_reports_no_data() {
        let app = Router::new().route("/api/fetch-currentwar", get(|| async { Json(json!([])) }));
        let (addr, server) = spawn_test_server(app).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::with_value("#ABC"));

        let err = run(Command::FetchWar, &gateway, &identity).await.expect_err("no war");
        assert_eq!(err, NO_WAR_DATA_MESSAGE);

        server.abort();
    }

    #[tokio::test]
    async fn backend_failures_surface_fixed_messages() {
        let (addr, server) = spawn_test_server(failing_backend()).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::with_value("#ABC"));

        assert_eq!(
            run(Command::Dashboard, &gateway, &identity).await,
            Err(LOAD_RESULTS_FAILED_MESSAGE.to_string())
        );
        assert_eq!(
            run(Command::Leaderboard, &gateway, &identity).await,
            Err(LOAD_LEADERBOARD_FAILED_MESSAGE.to_string())
        );
        assert!(run(Command::Health, &gateway, &identity).await.is_err());

        server.abort();
    }

    #[tokio::test]
    async fn leaderboard_renders_ranked_entries() {
        let (addr, server) = spawn_test_server(backend()).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::with_value("#ABC"));

        let output = run(Command::Leaderboard, &gateway, &identity).await.expect("board");
        assert!(output.starts_with("Players: 2  Total Stars: 15  Top Score: 12"));
        assert!(output.contains('\u{1F947}'));

        server.abort();
    }

    #[tokio::test]
    async fn status_and_forget_track_configuration() {
        let (addr, server) = spawn_test_server(backend()).await;
        let gateway = HttpGateway::new(&test_config(addr)).expect("client");
        let identity = ClanIdentity::new(MemoryClanStore::with_value("#ABC"));

        let status = run(Command::Status, &gateway, &identity).await.expect("status");
        assert_eq!(status, "Clan: #ABC\nStart page: Dashboard (/)");

        assert_eq!(
            run(Command::Forget, &gateway, &identity).await,
            Ok(FORGOTTEN_MESSAGE.to_string())
        );
        let status = run(Command::Status, &gateway, &identity).await.expect("status");
        assert!(status.ends_with("Start page: Change Clan (/setup)"));

        assert_eq!(
            run(Command::Health, &gateway, &identity).await,
            Ok("Backend is reachable.".to_string())
        );

        server.abort();
    }
}
