use clash_tracker_shared::view::{REDIRECT_DELAY, SETUP_SUCCESS_MESSAGE, SetupMachine};
use clash_tracker_shared::{Route, WarResultsGateway};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::{CurrentRoute, ErrorBanner, Identity, navigate};
use crate::gateway::{HttpGateway, timeout_millis};

#[component]
pub fn SetupView() -> impl IntoView {
    let identity: Identity = expect_context();
    let gateway: HttpGateway = expect_context();
    let CurrentRoute(route) = expect_context();

    let machine = RwSignal::new(SetupMachine::new());
    let input = RwSignal::new(String::new());
    let current_clan = RwSignal::new(identity.get().map(|clan| clan.to_string()));

    on_cleanup(move || {
        machine.try_update(SetupMachine::dismiss);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let raw = input.get_untracked();
        let Some(probe) = machine.try_update(|m| m.begin_submit(&raw)).flatten() else {
            return;
        };
        spawn_local(async move {
            let outcome = gateway.fetch_current_war(probe.candidate.tag()).await;
            let validated = machine
                .try_update(|m| m.finish_submit(probe, outcome, &identity))
                .unwrap_or(false)
                && machine
                    .try_with_untracked(|m| m.validated().is_some())
                    .unwrap_or(false);
            if !validated {
                return;
            }
            web_sys::console::info_1(&"clan id validated".into());
            Timeout::new(timeout_millis(REDIRECT_DELAY), move || {
                // A disposed machine means the view was left; no redirect then.
                let target = machine
                    .try_with_untracked(|m| m.redirect_route(&identity))
                    .flatten();
                if let Some(target) = target {
                    navigate(route, &identity, target);
                }
            })
            .forget();
        });
    };

    let on_forget = move |_: leptos::ev::MouseEvent| match identity.clear() {
        Ok(()) => {
            current_clan.set(None);
            navigate(route, &identity, Route::Setup);
        }
        Err(e) => web_sys::console::warn_1(&format!("failed to clear clan id: {e}").into()),
    };

    let loading = move || machine.with(|m| m.state().is_loading());
    let error = Signal::derive(move || machine.with(|m| m.state().failure().map(str::to_string)));
    let validated = move || machine.with(|m| m.validated().is_some());

    view! {
        <section style="max-width: 480px; margin: 48px auto; padding: 28px; border-radius: 12px; background: #1e293b; border: 1px solid #334155;">
            <h1 style="margin: 0 0 6px; font-size: 1.5rem;">"Set Up Your Clan"</h1>
            <p style="margin: 0 0 20px; color: #94a3b8;">
                "Enter your clan tag to start tracking war performance."
            </p>
            {move || current_clan.get().map(|clan| view! {
                <p style="margin: 0 0 16px; color: #cbd5e1;">
                    "Current clan: "
                    <code>{clan}</code>
                    <button
                        type="button"
                        style="margin-left: 12px; padding: 2px 10px; border-radius: 6px; border: 1px solid #475569; background: transparent; color: #94a3b8; cursor: pointer;"
                        on:click=on_forget
                    >
                        "Forget"
                    </button>
                </p>
            })}
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="#2GC8P2L88"
                    style="width: 100%; box-sizing: border-box; padding: 10px 12px; border-radius: 8px; border: 1px solid #475569; background: #0f172a; color: #f8fafc; font-family: 'JetBrains Mono', monospace;"
                    prop:value=move || input.get()
                    prop:disabled=loading
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <ErrorBanner message=error />
                {move || validated().then(|| view! {
                    <div
                        role="status"
                        style="margin: 12px 0; padding: 10px 14px; border-radius: 8px; background: rgba(34,197,94,0.12); border: 1px solid rgba(34,197,94,0.4); color: #86efac;"
                    >
                        {SETUP_SUCCESS_MESSAGE}
                    </div>
                })}
                <button
                    type="submit"
                    style="margin-top: 12px; width: 100%; padding: 10px; border: none; border-radius: 8px; background: #3b82f6; color: white; font-weight: 600; cursor: pointer;"
                    prop:disabled=move || loading() || validated()
                >
                    {move || if loading() { "Validating..." } else { "Save Clan" }}
                </button>
            </form>
        </section>
    }
}
