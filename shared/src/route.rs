use crate::clan::{ClanIdentity, ClanStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Setup,
    Dashboard,
    Leaderboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Setup => "/setup",
            Route::Dashboard => "/",
            Route::Leaderboard => "/leaderboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Dashboard),
            "/setup" => Some(Route::Setup),
            "/leaderboard" => Some(Route::Leaderboard),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Setup => "Change Clan",
            Route::Dashboard => "Dashboard",
            Route::Leaderboard => "Leaderboard",
        }
    }
}

/// Startup routing: without a persisted clan every route lands on setup.
pub fn resolve_route<S: ClanStore>(requested: Route, identity: &ClanIdentity<S>) -> Route {
    if identity.is_configured() {
        requested
    } else {
        Route::Setup
    }
}
