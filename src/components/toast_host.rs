//! Toast Host Component
//!
//! Stack of transient notices, newest at the bottom.

use leptos::prelude::*;

use crate::context::Toasts;

#[component]
pub fn ToastHost(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toast-host" role="status" aria-live="polite">
            <For
                each=move || toasts.visible()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class()>
                            <span class="toast-message">{toast.message}</span>
                            <button class="toast-close" on:click=move |_| toasts.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
