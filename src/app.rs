//! Page Boot
//!
//! Finds the mount points the server templates left in the page and
//! mounts a widget into each one that is present.

use console_logger::LogBuffer;
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::commands::ApiClient;
use crate::components::{FavoriteToggle, LogPanel, RankEditor, ToastHost};
use crate::config::AppConfig;
use crate::context::{AppContext, Toasts};
use crate::dom;
use crate::models::SeiyuuId;
use crate::ranking::ButtonLabels;

const TOAST_ROOT_ID: &str = "toast-root";

/// Mount every widget the page asks for; returns how many were mounted
pub fn mount_page(doc: &Document, config: &AppConfig, logs: LogBuffer) -> usize {
    let toasts = Toasts::new();
    let ctx = AppContext::new(ApiClient::new(config.api.clone()), toasts, logs);

    let mut mounted = 0;
    if mount_toasts(doc, toasts) {
        mounted += 1;
    }
    if let Some(root) = mount_point(doc, dom::FAVORITE_MOUNT_ID) {
        mount_favorite(root, ctx.clone());
        mounted += 1;
    }
    if let Some(root) = mount_point(doc, dom::RANKING_MOUNT_ID) {
        if mount_ranking(root, ctx.clone()) {
            mounted += 1;
        }
    }
    if let Some(root) = mount_point(doc, dom::LOG_MOUNT_ID) {
        let logs = ctx.logs.clone();
        root.set_inner_html("");
        mount_to(root, move || view! { <LogPanel logs=logs /> }).forget();
        mounted += 1;
    }

    tracing::info!(target: "boot", mounted, origin = config.api.origin(), "page mounted");
    mounted
}

fn mount_point(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn mount_toasts(doc: &Document, toasts: Toasts) -> bool {
    let Some(body) = doc.body() else {
        tracing::warn!(target: "boot", "page has no <body>, toasts disabled");
        return false;
    };
    let Some(root) = doc
        .create_element("div")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return false;
    };
    root.set_id(TOAST_ROOT_ID);
    if body.append_child(&root).is_err() {
        return false;
    }
    mount_to(root, move || view! { <ToastHost toasts=toasts /> }).forget();
    true
}

fn mount_favorite(root: HtmlElement, ctx: AppContext) {
    let initial = root.get_attribute("data-favorite").as_deref() == Some("true");
    let seiyuu_id = dom::attr(&root, "data-seiyuu-id").and_then(|raw| match SeiyuuId::parse(&raw) {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::warn!(target: "boot", %err, "ignoring data-seiyuu-id, falling back to the page URL");
            None
        }
    });
    let label = dom::attr(&root, "data-label");
    tracing::debug!(target: "boot", initial, ?seiyuu_id, "mounting favorite toggle");

    root.set_inner_html("");
    mount_to(root, move || {
        view! {
            <FavoriteToggle
                ctx=ctx
                initial=initial
                seiyuu_id=seiyuu_id
                label=label
            />
        }
    })
    .forget();
}

fn mount_ranking(root: HtmlElement, ctx: AppContext) -> bool {
    let items = match dom::scrape_items(&root) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(target: "boot", %err, "leaving server-rendered ranking in place");
            return false;
        }
    };
    let labels = ButtonLabels::with_overrides(
        dom::attr(&root, "data-edit-label"),
        dom::attr(&root, "data-save-label"),
    );
    tracing::debug!(target: "boot", count = items.len(), "mounting rank editor");

    root.set_inner_html("");
    mount_to(root, move || view! { <RankEditor ctx=ctx items=items labels=labels /> }).forget();
    true
}
