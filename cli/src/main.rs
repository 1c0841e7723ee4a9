mod commands;
mod config;
mod gateway;
mod render;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clash_tracker_shared::ClanIdentity;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::Config;
use crate::gateway::HttpGateway;
use crate::store::FileClanStore;

/// Clan war results and star leaderboard, from the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend API base URL (overrides CLASH_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// File holding the configured clan (overrides CLASH_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();
    let config = Config::from_env().with_overrides(args.base_url, args.store);

    let gateway = match HttpGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(base_url = gateway.base_url(), store = %config.store_path.display(), "starting");
    let identity = ClanIdentity::new(FileClanStore::new(config.store_path.clone()));

    match commands::run(args.command, &gateway, &identity).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;
    use crate::commands::Command;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "clash-tracker",
            "setup",
            "#2GC8P2L88",
            "--base-url",
            "http://example/api",
        ])
        .expect("valid args");
        assert_eq!(
            args.command,
            Command::Setup {
                tag: "#2GC8P2L88".to_string()
            }
        );
        assert_eq!(args.base_url.as_deref(), Some("http://example/api"));
    }

    #[test]
    fn kebab_case_subcommands() {
        let args = Args::try_parse_from(["clash-tracker", "--store", "c.json", "fetch-war"])
            .expect("valid args");
        assert_eq!(args.command, Command::FetchWar);
        assert_eq!(args.store.as_deref(), Some(std::path::Path::new("c.json")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["clash-tracker"]).is_err());
    }
}
