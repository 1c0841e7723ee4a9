use clash_tracker_shared::Route;
use leptos::prelude::*;

use crate::app::{BackendReachable, CurrentRoute, Identity, navigate};

const NAV_ROUTES: [Route; 3] = [Route::Dashboard, Route::Leaderboard, Route::Setup];

#[component]
pub fn NavBar() -> impl IntoView {
    let CurrentRoute(route) = expect_context();
    let identity: Identity = expect_context();
    let BackendReachable(reachable) = expect_context();

    // Re-read on every route change; setup may have just written it.
    let clan_label = move || {
        route.track();
        identity
            .get()
            .map(|clan| clan.to_string())
            .unwrap_or_else(|| "No clan".to_string())
    };

    view! {
        <nav style="display: flex; align-items: center; gap: 8px; padding: 12px 24px; background: #111827; border-bottom: 1px solid #1f2937;">
            <span style="font-weight: 800; letter-spacing: 0.04em; margin-right: 16px;">"⚔ Clash Tracker"</span>
            {NAV_ROUTES
                .into_iter()
                .map(|target| {
                    view! {
                        <a
                            href=target.path()
                            style:padding="6px 12px"
                            style:border-radius="6px"
                            style:text-decoration="none"
                            style:color=move || if route.get() == target { "#f8fafc" } else { "#94a3b8" }
                            style:background=move || if route.get() == target { "#1f2937" } else { "transparent" }
                            on:click=move |ev| {
                                ev.prevent_default();
                                navigate(route, &identity, target);
                            }
                        >
                            {target.title()}
                        </a>
                    }
                })
                .collect_view()}
            <div style="margin-left: auto; display: flex; align-items: center; gap: 12px;">
                {move || (reachable.get() == Some(false)).then(|| view! {
                    <span
                        title="The health check failed; data views will show errors until the backend is running."
                        style="padding: 2px 10px; border-radius: 999px; background: rgba(239,68,68,0.15); color: #fca5a5; font-size: 0.8rem;"
                    >
                        "Backend unreachable"
                    </span>
                })}
                <span style="font-family: 'JetBrains Mono', monospace; font-size: 0.85rem; color: #64748b;">
                    {clan_label}
                </span>
            </div>
        </nav>
    }
}
