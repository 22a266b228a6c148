//! DOM Helpers
//!
//! Element ids, classes and attributes shared with the server templates.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::error::IdError;
use crate::models::{check_unique, RankedSeiyuu, SeiyuuId};

pub const FAVORITE_MOUNT_ID: &str = "favorite-root";
pub const RANKING_MOUNT_ID: &str = "ranking-root";
pub const LOG_MOUNT_ID: &str = "log-root";
pub const HOLDER_ID: &str = "seiyuuHolder";
pub const FAVORITE_CHECKBOX_ID: &str = "favorite";
pub const ITEM_CLASS: &str = "seiyuu";
pub const ID_ATTR: &str = "data-id";

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn current_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

/// Attribute value, `None` when absent or blank
pub fn attr(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.trim().is_empty())
}

/// Descendants of `container` matching `selector`, in document order
pub fn query_all(container: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = container.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn item_id(el: &Element) -> Result<SeiyuuId, IdError> {
    match el.get_attribute(ID_ATTR) {
        Some(raw) => SeiyuuId::parse(&raw),
        None => Err(IdError::Missing(format!("{} attribute", ID_ATTR))),
    }
}

/// Ids of the list items as currently laid out
pub fn ordered_ids(container: &Element) -> Result<Vec<SeiyuuId>, IdError> {
    query_all(container, &format!(".{}", ITEM_CLASS))
        .iter()
        .map(item_id)
        .collect()
}

/// Read the server-rendered list so the editor can take it over.
/// Every id must be present, well-formed and unique.
pub fn scrape_items(container: &Element) -> Result<Vec<RankedSeiyuu>, IdError> {
    let items = query_all(container, &format!(".{}", ITEM_CLASS))
        .iter()
        .map(|el| {
            Ok(RankedSeiyuu {
                id: item_id(el)?,
                content_html: el.inner_html(),
            })
        })
        .collect::<Result<Vec<_>, IdError>>()?;
    check_unique(items.iter().map(|item| &item.id))?;
    Ok(items)
}
