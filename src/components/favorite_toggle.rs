//! Favorite Toggle Component
//!
//! Checkbox that flips the favorite flag for the seiyuu on this page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{AppContext, Toasts};
use crate::dom;
use crate::favorite::{resolve_seiyuu_id, CheckboxAction};
use crate::models::SeiyuuId;
use crate::sequence::{RequestSequencer, Settled};

const DEFAULT_LABEL: &str = "Favorite";

/// Favorite checkbox
///
/// The box changes as soon as it is clicked. If the latest request fails,
/// it flips back and an error toast is shown. Responses to older clicks
/// are only logged.
///
/// # Arguments
/// * `initial` - Whether the seiyuu is a favorite when the page loads
/// * `seiyuu_id` - Id to send; when `None` it is read from the page URL on each change
/// * `label` - Caption next to the box
#[component]
pub fn FavoriteToggle(
    ctx: AppContext,
    initial: bool,
    seiyuu_id: Option<SeiyuuId>,
    label: Option<String>,
) -> impl IntoView {
    let (checked, set_checked) = signal(initial);
    let sequencer = RequestSequencer::new();

    let on_change = move |ev: web_sys::Event| {
        let now_checked = event_target_checked(&ev);
        set_checked.set(now_checked);

        let id = match resolve_seiyuu_id(seiyuu_id.as_ref(), dom::current_href().as_deref()) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(target: "favorite", %err, "no seiyuu id, not sending");
                apply(CheckboxAction::unresolved(), set_checked, now_checked, ctx.toasts);
                return;
            }
        };

        let ticket = sequencer.issue();
        let api = ctx.api.clone();
        let sequencer = sequencer.clone();
        let toasts = ctx.toasts;
        spawn_local(async move {
            let outcome = sequencer.settle(ticket, api.toggle_favorite(&id)).await;
            match &outcome {
                Settled::Current(Ok(())) => {
                    tracing::info!(target: "favorite", seiyuu_id = %id, favorite = now_checked, "favorite saved");
                }
                Settled::Current(Err(err)) => {
                    tracing::warn!(target: "favorite", seiyuu_id = %id, %err, "favorite toggle failed");
                }
                Settled::Superseded(result) => {
                    tracing::debug!(target: "favorite", seiyuu_id = %id, ok = result.is_ok(), "older toggle settled");
                }
            }
            apply(CheckboxAction::settled(&outcome), set_checked, now_checked, toasts);
        });
    };

    view! {
        <label class="favorite-toggle">
            <input
                type="checkbox"
                id=dom::FAVORITE_CHECKBOX_ID
                prop:checked=move || checked.get()
                on:change=on_change
            />
            <span class="favorite-label">{label.unwrap_or_else(|| DEFAULT_LABEL.to_string())}</span>
        </label>
    }
}

fn apply(action: CheckboxAction, set_checked: WriteSignal<bool>, now_checked: bool, toasts: Toasts) {
    if let CheckboxAction::Revert(message) = action {
        set_checked.set(!now_checked);
        toasts.error(message);
    }
}
