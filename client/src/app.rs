use clash_tracker_shared::{ClanIdentity, Route, WarResultsGateway, resolve_route};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dashboard::DashboardView;
use crate::gateway::HttpGateway;
use crate::leaderboard::LeaderboardView;
use crate::nav::NavBar;
use crate::setup::SetupView;
use crate::storage::LocalClanStore;

pub(crate) type Identity = ClanIdentity<LocalClanStore>;

#[derive(Clone, Copy)]
pub(crate) struct CurrentRoute(pub RwSignal<Route>);

/// `None` until the startup health probe settles.
#[derive(Clone, Copy)]
pub(crate) struct BackendReachable(pub RwSignal<Option<bool>>);

fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

/// Unknown paths fall back to the dashboard.
fn requested_route() -> Route {
    current_path()
        .and_then(|path| Route::from_path(&path))
        .unwrap_or(Route::Dashboard)
}

fn sync_address_bar(route: Route, push: bool) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if current_path().as_deref() == Some(route.path()) {
        return;
    }
    let Ok(history) = window.history() else {
        return;
    };
    let result = if push {
        history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.path()))
    } else {
        history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.path()))
    };
    if let Err(e) = result {
        web_sys::console::warn_1(&format!("failed to update address bar: {e:?}").into());
    }
}

/// In-app navigation. Every hop goes back through [`resolve_route`].
pub(crate) fn navigate(route: RwSignal<Route>, identity: &Identity, requested: Route) {
    let target = resolve_route(requested, identity);
    sync_address_bar(target, true);
    route.set(target);
}

#[component]
pub fn App() -> impl IntoView {
    let identity = ClanIdentity::new(LocalClanStore);
    let gateway = HttpGateway::from_build_env();

    let start = resolve_route(requested_route(), &identity);
    sync_address_bar(start, false);
    let route = RwSignal::new(start);

    provide_context(identity);
    provide_context(gateway);
    provide_context(CurrentRoute(route));

    let reachable = RwSignal::new(None);
    provide_context(BackendReachable(reachable));
    spawn_local(async move {
        let ok = match gateway.health().await {
            Ok(()) => true,
            Err(e) => {
                web_sys::console::warn_1(&format!("backend health check failed: {e}").into());
                false
            }
        };
        reachable.try_set(Some(ok));
    });

    let _popstate = window_event_listener(leptos::ev::popstate, move |_| {
        let target = resolve_route(requested_route(), &identity);
        sync_address_bar(target, false);
        route.set(target);
    });

    Effect::new(move || {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&format!("{} | Clash Tracker", route.get().title()));
        }
    });

    view! {
        <div style="min-height: 100vh; background: #0f172a; color: #e2e8f0; font-family: 'Inter', system-ui, sans-serif;">
            <NavBar />
            <main style="max-width: 1100px; margin: 0 auto; padding: 24px 16px;">
                {move || match route.get() {
                    Route::Setup => view! { <SetupView /> }.into_any(),
                    Route::Dashboard => view! { <DashboardView /> }.into_any(),
                    Route::Leaderboard => view! { <LeaderboardView /> }.into_any(),
                }}
            </main>
        </div>
    }
}

/// Inline error banner shared by the three views.
#[component]
pub(crate) fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|message| {
            view! {
                <div
                    role="alert"
                    style="margin: 12px 0; padding: 10px 14px; border-radius: 8px; background: rgba(239,68,68,0.12); border: 1px solid rgba(239,68,68,0.4); color: #fca5a5;"
                >
                    {message}
                </div>
            }
        })
    }
}

#[component]
pub(crate) fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div style="flex: 1; min-width: 160px; padding: 16px; border-radius: 10px; background: #1e293b; border: 1px solid #334155;">
            <div style="font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em; color: #94a3b8;">{label}</div>
            <div style="margin-top: 6px; font-size: 1.6rem; font-weight: 700;">{move || value.get()}</div>
        </div>
    }
}
