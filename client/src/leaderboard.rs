use clash_tracker_shared::view::LeaderboardMachine;
use clash_tracker_shared::{AsyncState, RankMarker, RankedEntry, RankedLeaderboard, WarResultsGateway};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::{ErrorBanner, StatCard};
use crate::gateway::HttpGateway;

pub(crate) fn marker_color(marker: RankMarker) -> &'static str {
    match marker {
        RankMarker::Gold => "#fbbf24",
        RankMarker::Silver => "#9ca3af",
        RankMarker::Bronze => "#f97316",
        RankMarker::Numeric(_) => "#3b82f6",
    }
}

pub(crate) fn progress_width(progress: f64) -> String {
    format!("{:.1}%", progress.clamp(0.0, 1.0) * 100.0)
}

#[component]
pub fn LeaderboardView() -> impl IntoView {
    let gateway: HttpGateway = expect_context();
    let machine = RwSignal::new(LeaderboardMachine::new());

    on_cleanup(move || {
        machine.try_update(LeaderboardMachine::dismiss);
    });

    let load = move || {
        let Some(ticket) = machine.try_update(LeaderboardMachine::begin_load) else {
            return;
        };
        spawn_local(async move {
            let outcome = gateway.fetch_leaderboard().await;
            machine.try_update(|m| m.finish_load(ticket, outcome));
        });
    };
    load();

    let summary = Memo::new(move |_| {
        machine.with(|m| m.board().success().map(|board| board.summary).unwrap_or_default())
    });

    view! {
        <section>
            <header style="display: flex; align-items: center; gap: 12px; margin-bottom: 16px;">
                <h1 style="margin: 0; font-size: 1.6rem; flex: 1;">"Leaderboard"</h1>
                <button
                    style="padding: 8px 14px; border-radius: 8px; border: 1px solid #475569; background: transparent; color: #e2e8f0; cursor: pointer;"
                    prop:disabled=move || machine.with(|m| m.board().is_loading())
                    on:click=move |_| load()
                >
                    "Refresh"
                </button>
            </header>
            <div style="display: flex; gap: 12px; flex-wrap: wrap; margin: 16px 0;">
                <StatCard label="Players" value=Signal::derive(move || summary.get().player_count.to_string()) />
                <StatCard label="Total Stars" value=Signal::derive(move || summary.get().total_stars.to_string()) />
                <StatCard label="Top Score" value=Signal::derive(move || summary.get().top_score.to_string()) />
            </div>
            {move || machine.with(|m| match m.board() {
                AsyncState::Idle | AsyncState::Loading => view! {
                    <p style="color: #94a3b8;">"Loading leaderboard..."</p>
                }
                .into_any(),
                AsyncState::Failure(message) => {
                    let message = Some(message.clone());
                    view! { <ErrorBanner message=Signal::derive(move || message.clone()) /> }.into_any()
                }
                AsyncState::Success(board) if board.is_empty() => view! {
                    <div style="padding: 48px; text-align: center; color: #94a3b8;">
                        <div style="font-size: 1.2rem; color: #e2e8f0;">"No Leaderboard Data"</div>
                        <div>"Fetch some war data to see the leaderboard"</div>
                    </div>
                }
                .into_any(),
                AsyncState::Success(board) => board_list(board.clone()).into_any(),
            })}
        </section>
    }
}

fn board_list(board: RankedLeaderboard) -> impl IntoView {
    view! {
        <ol style="list-style: none; margin: 0; padding: 0; display: flex; flex-direction: column; gap: 8px;">
            {board.entries.into_iter().map(board_row).collect_view()}
        </ol>
    }
}

fn board_row(entry: RankedEntry) -> impl IntoView {
    let color = marker_color(entry.marker);
    let marker_size = if entry.marker.is_podium() { "1.5rem" } else { "1rem" };
    view! {
        <li style="display: flex; align-items: center; gap: 14px; padding: 12px 16px; border-radius: 10px; background: #1e293b; border: 1px solid #334155;">
            <span
                style="width: 40px; text-align: center; font-weight: 700;"
                style:font-size=marker_size
                style:color=color
            >
                {entry.marker.to_string()}
            </span>
            <div style="flex: 1; min-width: 0;">
                <div style="display: flex; justify-content: space-between; gap: 8px;">
                    <span style="font-weight: 600;">
                        {entry.player_name}
                        {entry.clan_name.map(|clan| view! {
                            <span style="margin-left: 8px; color: #64748b; font-weight: 400;">{clan}</span>
                        })}
                    </span>
                    <span style="font-family: 'JetBrains Mono', monospace;">{format!("{} ★", entry.total_stars)}</span>
                </div>
                <div style="margin-top: 8px; height: 6px; border-radius: 3px; background: #334155; overflow: hidden;">
                    <div
                        style="height: 100%; border-radius: 3px;"
                        style:width=progress_width(entry.progress)
                        style:background=color
                    />
                </div>
            </div>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use clash_tracker_shared::RankMarker;

    use super::{marker_color, progress_width};

    #[test]
    fn podium_markers_have_distinct_colors() {
        let colors = [
            marker_color(RankMarker::Gold),
            marker_color(RankMarker::Silver),
            marker_color(RankMarker::Bronze),
            marker_color(RankMarker::Numeric(4)),
        ];
        assert_eq!(colors, ["#fbbf24", "#9ca3af", "#f97316", "#3b82f6"]);
        assert_eq!(marker_color(RankMarker::Numeric(40)), "#3b82f6");
    }

    #[test]
    fn progress_width_is_a_clamped_percentage() {
        assert_eq!(progress_width(1.0), "100.0%");
        assert_eq!(progress_width(0.5), "50.0%");
        assert_eq!(progress_width(0.0), "0.0%");
        assert_eq!(progress_width(2.0), "100.0%");
    }
}
