//! Rank Editor Component
//!
//! Edit/save button over the user's favorite list. Editing turns on
//! drag reordering; saving turns it off and posts the order shown on
//! screen.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::context::AppContext;
use crate::dom;
use crate::models::{RankedSeiyuu, SeiyuuId};
use crate::ranking::{mapping_for_save, render_button, save_notice, ButtonLabels, ModeEffect, RankMode};
use crate::sequence::{RequestSequencer, Settled};

#[component]
pub fn RankEditor(
    ctx: AppContext,
    items: Vec<RankedSeiyuu>,
    #[prop(optional)] labels: ButtonLabels,
) -> impl IntoView {
    let (entries, set_entries) = signal(items);
    let (mode, set_mode) = signal(RankMode::default());
    let holder = NodeRef::<leptos::html::Div>::new();
    let sequencer = RequestSequencer::new();

    let sortable = create_sortable_signals::<SeiyuuId>();
    bind_global_mouseup(sortable, move |dragged, target| {
        set_entries.update(|list| {
            if reorder(list, &dragged, &target, |entry| &entry.id) {
                tracing::debug!(target: "sortable", %dragged, anchor = %target.anchor(), "moved");
            }
        });
    });

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let transition = mode.get_untracked().click();
        set_mode.set(transition.next);
        match transition.effect {
            ModeEffect::StartSorting => {
                tracing::debug!(target: "rank", "sorting enabled");
                sortable.enable();
            }
            ModeEffect::SaveRanking => {
                sortable.disable();
                save_ranking(&ctx, &sequencer, holder);
            }
        }
    };

    let id_labels = labels.clone();

    view! {
        <div class="rank-editor">
            <button
                id=move || render_button(mode.get(), &id_labels).id
                class="rank-toggle"
                on:click=on_click
            >
                {move || render_button(mode.get(), &labels).label.to_string()}
            </button>

            <div
                id=dom::HOLDER_ID
                class=move || if mode.get().is_editing() { "seiyuu-holder sorting" } else { "seiyuu-holder" }
                node_ref=holder
            >
                <For
                    each=move || entries.get()
                    key=|entry| entry.id.clone()
                    children=move |entry| {
                        let id = entry.id.clone();
                        let on_mousedown = make_on_mousedown(sortable, id.clone());
                        let on_mousemove = make_on_item_mousemove(sortable, id.clone());
                        let on_mouseleave = make_on_mouseleave(sortable);

                        let item_class = move || {
                            let mut c = String::from(dom::ITEM_CLASS);
                            if sortable.is_dragging(&id) { c.push_str(" dragging"); }
                            if sortable.is_drop_target(&DropTarget::Before(id.clone())) { c.push_str(" drop-before"); }
                            if sortable.is_drop_target(&DropTarget::After(id.clone())) { c.push_str(" drop-after"); }
                            c
                        };

                        view! {
                            <div
                                class=item_class
                                data-id=entry.id.to_string()
                                inner_html=entry.content_html
                                on:mousedown=on_mousedown
                                on:mousemove=on_mousemove
                                on:mouseleave=on_mouseleave
                            />
                        }
                    }
                />
            </div>
        </div>
    }
}

/// Read the on-screen order and post it
fn save_ranking(ctx: &AppContext, sequencer: &RequestSequencer, holder: NodeRef<leptos::html::Div>) {
    let Some(container) = holder.get_untracked() else {
        tracing::warn!(target: "rank", "list container is not mounted");
        return;
    };
    let mapping = match mapping_for_save(dom::ordered_ids(&container)) {
        Ok(mapping) => mapping,
        Err((err, notice)) => {
            tracing::warn!(target: "rank", %err, "not saving ranking");
            ctx.toasts.push(notice.kind, notice.message);
            return;
        }
    };

    let ticket = sequencer.issue();
    let api = ctx.api.clone();
    let sequencer = sequencer.clone();
    let toasts = ctx.toasts;
    spawn_local(async move {
        let outcome = sequencer.settle(ticket, api.set_rank(&mapping)).await;
        match &outcome {
            Settled::Current(Ok(())) => {
                tracing::info!(target: "rank", count = mapping.len(), "ranking saved");
            }
            Settled::Current(Err(err)) => {
                tracing::warn!(target: "rank", %err, "saving ranking failed");
            }
            Settled::Superseded(result) => {
                tracing::debug!(target: "rank", ok = result.is_ok(), "older save settled");
            }
        }
        if let Some(notice) = save_notice(&outcome) {
            toasts.push(notice.kind, notice.message);
        }
    });
}
