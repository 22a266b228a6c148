//! Log Panel Component
//!
//! Read-back of the recent log lines for pages that ask for it.

use console_logger::LogBuffer;
use leptos::prelude::*;

#[component]
pub fn LogPanel(logs: LogBuffer) -> impl IntoView {
    let snapshot = RwSignal::new(logs.dump());
    let count = RwSignal::new(logs.len());

    let on_refresh = move |_: web_sys::MouseEvent| {
        snapshot.set(logs.dump());
        count.set(logs.len());
    };

    view! {
        <section class="log-panel">
            <button class="log-refresh" on:click=on_refresh>"Refresh log"</button>
            <span class="log-count">{move || format!("{} lines", count.get())}</span>
            <pre class="log-lines">{move || snapshot.get()}</pre>
        </section>
    }
}
