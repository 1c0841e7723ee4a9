use clash_tracker_shared::summary::{
    avatar_initial, format_recorded_at, is_excellent, war_id_preview,
};
use clash_tracker_shared::view::{DashboardMachine, NOTICE_TTL, WarFetchNext};
use clash_tracker_shared::{AsyncState, PlayerWarResult, WarResultsGateway};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::{ErrorBanner, Identity, StatCard};
use crate::gateway::{HttpGateway, timeout_millis};

#[component]
pub fn DashboardView() -> impl IntoView {
    let identity: Identity = expect_context();
    let gateway: HttpGateway = expect_context();
    let machine = RwSignal::new(DashboardMachine::new());

    on_cleanup(move || {
        machine.try_update(DashboardMachine::dismiss);
    });

    let load = move || {
        let Some(ticket) = machine.try_update(DashboardMachine::begin_load) else {
            return;
        };
        spawn_local(async move {
            let outcome = gateway.fetch_all_results().await;
            machine.try_update(|m| m.finish_load(ticket, outcome));
        });
    };
    load();

    let fetch_war = move |_: leptos::ev::MouseEvent| {
        let Some(probe) = machine.try_update(|m| m.begin_war_fetch(&identity)).flatten() else {
            return;
        };
        spawn_local(async move {
            let outcome = gateway.fetch_current_war(&probe.clan_tag).await;
            let next = machine.try_update(|m| m.finish_war_fetch(probe.ticket, outcome));
            if let Some(WarFetchNext::ReloadResults { notice_id }) = next {
                Timeout::new(timeout_millis(NOTICE_TTL), move || {
                    machine.try_update(|m| m.clear_notice(notice_id));
                })
                .forget();
                load();
            }
        });
    };

    let war_fetching = move || machine.with(|m| m.war_fetch().is_loading());
    let war_error = Signal::derive(move || {
        machine.with(|m| m.war_fetch().failure().map(str::to_string))
    });
    let notice = move || machine.with(|m| m.notice().map(|n| n.message.clone()));
    let summary = Memo::new(move |_| machine.with(|m| m.summary()).unwrap_or_default());

    view! {
        <section>
            <header style="display: flex; align-items: center; gap: 12px; flex-wrap: wrap; margin-bottom: 16px;">
                <h1 style="margin: 0; font-size: 1.6rem; flex: 1;">"War Analytics"</h1>
                <button
                    style="padding: 8px 14px; border-radius: 8px; border: 1px solid #475569; background: transparent; color: #e2e8f0; cursor: pointer;"
                    prop:disabled=move || machine.with(|m| m.results().is_loading())
                    on:click=move |_| load()
                >
                    "Refresh"
                </button>
                <button
                    style="padding: 8px 14px; border-radius: 8px; border: none; background: #3b82f6; color: white; font-weight: 600; cursor: pointer;"
                    prop:disabled=war_fetching
                    on:click=fetch_war
                >
                    {move || if war_fetching() { "Fetching..." } else { "Fetch War Data" }}
                </button>
            </header>
            {move || notice().map(|message| view! {
                <div
                    role="status"
                    style="margin: 12px 0; padding: 10px 14px; border-radius: 8px; background: rgba(34,197,94,0.12); border: 1px solid rgba(34,197,94,0.4); color: #86efac;"
                >
                    {message}
                </div>
            })}
            <ErrorBanner message=war_error />
            <div style="display: flex; gap: 12px; flex-wrap: wrap; margin: 16px 0;">
                <StatCard label="Total Results" value=Signal::derive(move || summary.get().total_results.to_string()) />
                <StatCard label="Unique Wars" value=Signal::derive(move || summary.get().unique_wars.to_string()) />
                <StatCard label="Total Stars" value=Signal::derive(move || summary.get().total_stars.to_string()) />
                <StatCard label="Avg Stars" value=Signal::derive(move || format!("{:.1}", summary.get().average_stars)) />
            </div>
            {move || machine.with(|m| match m.results() {
                AsyncState::Idle | AsyncState::Loading => view! {
                    <p style="color: #94a3b8;">"Loading war results..."</p>
                }
                .into_any(),
                AsyncState::Failure(message) => {
                    let message = Some(message.clone());
                    view! { <ErrorBanner message=Signal::derive(move || message.clone()) /> }.into_any()
                }
                AsyncState::Success(results) if results.is_empty() => view! {
                    <div style="padding: 48px; text-align: center; color: #94a3b8;">
                        <div style="font-size: 1.2rem; color: #e2e8f0;">"No War Data Found"</div>
                        <div>"Fetch some war data to see results here"</div>
                    </div>
                }
                .into_any(),
                AsyncState::Success(results) => results_table(results.clone()).into_any(),
            })}
        </section>
    }
}

fn results_table(results: Vec<PlayerWarResult>) -> impl IntoView {
    view! {
        <table style="width: 100%; border-collapse: collapse; background: #1e293b; border-radius: 10px; overflow: hidden;">
            <thead>
                <tr style="text-align: left; color: #94a3b8; font-size: 0.75rem; text-transform: uppercase;">
                    <th style="padding: 10px 14px;">"Player"</th>
                    <th style="padding: 10px 14px;">"Clan"</th>
                    <th style="padding: 10px 14px;">"War"</th>
                    <th style="padding: 10px 14px;">"Stars"</th>
                    <th style="padding: 10px 14px;">"Recorded"</th>
                </tr>
            </thead>
            <tbody>
                {results.into_iter().map(result_row).collect_view()}
            </tbody>
        </table>
    }
}

fn result_row(result: PlayerWarResult) -> impl IntoView {
    let excellent = is_excellent(result.stars);
    view! {
        <tr style="border-top: 1px solid #334155;">
            <td style="padding: 10px 14px; display: flex; align-items: center; gap: 10px;">
                <span style="display: inline-flex; width: 32px; height: 32px; border-radius: 50%; align-items: center; justify-content: center; background: #334155; font-weight: 700;">
                    {avatar_initial(&result.player_name)}
                </span>
                {result.player_name.clone()}
            </td>
            <td style="padding: 10px 14px; color: #cbd5e1;">{result.clan_name.clone()}</td>
            <td style="padding: 10px 14px; font-family: 'JetBrains Mono', monospace; color: #94a3b8;" title=result.war_id.clone()>
                {war_id_preview(&result.war_id)}
            </td>
            <td style="padding: 10px 14px;">
                {format!("{} ★", result.stars)}
                {excellent.then(|| view! {
                    <span style="margin-left: 8px; padding: 1px 8px; border-radius: 999px; background: rgba(251,191,36,0.15); color: #fbbf24; font-size: 0.75rem;">
                        "Excellent"
                    </span>
                })}
            </td>
            <td style="padding: 10px 14px; color: #94a3b8;">{format_recorded_at(result.created_at)}</td>
        </tr>
    }
}
