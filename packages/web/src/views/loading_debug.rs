//! Playground for the global busy overlay.

use std::time::Duration;

use dioxus::prelude::*;
use dioxus::core::Task;
use store::{timer, BusyDescriptor};
use ui::{use_app_state, use_busy};

const DURATIONS_MS: [u64; 4] = [1000, 2000, 3000, 5000];
const DELAY: Duration = Duration::from_millis(500);
const AUTO_TEST_GAP_MS: u64 = 1000;

#[component]
pub fn LoadingDebug() -> Element {
    let busy = use_app_state().busy().clone();
    let busy_state = use_busy();
    let mut duration_ms = use_signal(|| 2000u64);
    let mut auto_test = use_signal(|| Option::<Task>::None);

    let show_for = {
        let busy = busy.clone();
        move |_| {
            let ms = duration_ms();
            busy.show_for(
                Duration::from_millis(ms),
                BusyDescriptor::message(format!("Showing for {ms} ms...")),
            );
        }
    };

    let with_loading = {
        let busy = busy.clone();
        move |_| {
            let busy = busy.clone();
            let ms = duration_ms();
            spawn(async move {
                busy.with_loading(
                    BusyDescriptor::message("Running a simulated request..."),
                    timer::sleep(Duration::from_millis(ms)),
                )
                .await;
            });
        }
    };

    let delayed = {
        let busy = busy.clone();
        move |_| {
            let ms = duration_ms();
            busy.show_with_delay(
                DELAY,
                BusyDescriptor::message("Delayed overlay")
                    .with_class("loading-overlay-subtle")
                    .with_auto_hide(Duration::from_millis(ms)),
            );
        }
    };

    let hide = {
        let busy = busy.clone();
        move |_| busy.hide()
    };

    let toggle_auto = move |_| {
        if let Some(task) = auto_test.write().take() {
            task.cancel();
            return;
        }
        let busy = busy.clone();
        let task = spawn(async move {
            loop {
                let ms = duration_ms();
                busy.show_for(
                    Duration::from_millis(ms),
                    BusyDescriptor::message("Auto test"),
                );
                timer::sleep(Duration::from_millis(ms + AUTO_TEST_GAP_MS)).await;
            }
        });
        auto_test.set(Some(task));
    };

    let running = auto_test.read().is_some();
    let auto_class = if running { "button button-danger" } else { "button" };
    let state = busy_state();
    let status = if state.active {
        format!("active: {}", state.message)
    } else {
        "idle".to_string()
    };

    rsx! {
        section {
            class: "content loading-debug",
            h1 { "Loading debug" }

            label {
                class: "form-field",
                span { class: "form-label", "Duration" }
                select {
                    value: "{duration_ms}",
                    onchange: move |evt: FormEvent| {
                        if let Ok(ms) = evt.value().parse() {
                            duration_ms.set(ms);
                        }
                    },
                    for ms in DURATIONS_MS {
                        option { key: "{ms}", value: "{ms}", "{ms} ms" }
                    }
                }
            }

            div {
                class: "button-row",
                button { class: "button", onclick: show_for, "Show for duration" }
                button { class: "button", onclick: with_loading, "Wrap an async task" }
                button { class: "button", onclick: delayed, "Show after 500 ms" }
                button { class: "button", onclick: hide, "Hide" }
                button {
                    class: auto_class,
                    onclick: toggle_auto,
                    if running { "Stop auto test" } else { "Start auto test" }
                }
            }

            p { class: "muted", "Overlay: {status}" }
        }
    }
}
