//! Leptos DragDrop Utilities
//!
//! Mouse-driven reordering for a flat, keyed Leptos list.
//! Uses movement threshold to distinguish click from drag, and can be
//! switched on and off at runtime (a "sortable" that can be destroyed
//! and re-created without rebuilding the list).

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Where the dragged entry should land, relative to another entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget<K> {
    Before(K),
    After(K),
}

impl<K> DropTarget<K> {
    pub fn anchor(&self) -> &K {
        match self {
            DropTarget::Before(k) | DropTarget::After(k) => k,
        }
    }
}

/// Sortable state signals
pub struct SortableSignals<K: Send + Sync + 'static> {
    pub enabled_read: ReadSignal<bool>,
    pub enabled_write: WriteSignal<bool>,
    pub dragging_read: ReadSignal<Option<K>>,
    pub dragging_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<K>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<K>>>,
    /// Pressed entry (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<K>>,
    pub pending_write: WriteSignal<Option<K>>,
    /// Press position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

impl<K: Send + Sync + 'static> Clone for SortableSignals<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static> Copy for SortableSignals<K> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_sortable_signals<K>() -> SortableSignals<K>
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    let (enabled_read, enabled_write) = signal(false);
    let (dragging_read, dragging_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<K>>);
    let (pending_read, pending_write) = signal(None::<K>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    SortableSignals {
        enabled_read,
        enabled_write,
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

impl<K> SortableSignals<K>
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start accepting drags
    pub fn enable(&self) {
        self.enabled_write.set(true);
    }

    /// Stop accepting drags and drop anything in flight
    pub fn disable(&self) {
        self.enabled_write.set(false);
        end_drag(self);
    }

    pub fn is_dragging(&self, key: &K) -> bool {
        self.dragging_read.with(|d| d.as_ref() == Some(key))
    }

    pub fn is_drop_target(&self, target: &DropTarget<K>) -> bool {
        self.drop_target_read.with(|t| t.as_ref() == Some(target))
    }
}

/// End drag operation
pub fn end_drag<K>(sortable: &SortableSignals<K>)
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    sortable.dragging_write.set(None);
    sortable.drop_target_write.set(None);
    sortable.pending_write.set(None);
}

/// Pick the drop side from the pointer position over an entry
pub fn target_for_pointer<K>(key: K, top: f64, height: f64, pointer_y: f64) -> DropTarget<K> {
    if pointer_y < top + height / 2.0 {
        DropTarget::Before(key)
    } else {
        DropTarget::After(key)
    }
}

/// Move `dragged` next to the target's anchor.
/// Returns true when the order actually changed.
pub fn reorder<T, K, F>(items: &mut Vec<T>, dragged: &K, target: &DropTarget<K>, key: F) -> bool
where
    K: PartialEq,
    F: Fn(&T) -> &K,
{
    let anchor = target.anchor();
    if anchor == dragged {
        return false;
    }
    let Some(from) = items.iter().position(|t| key(t) == dragged) else {
        return false;
    };
    let entry = items.remove(from);
    let Some(anchor_idx) = items.iter().position(|t| key(t) == anchor) else {
        items.insert(from, entry);
        return false;
    };
    let to = match target {
        DropTarget::Before(_) => anchor_idx,
        DropTarget::After(_) => anchor_idx + 1,
    };
    items.insert(to, entry);
    to != from
}

/// Create mousedown handler for sortable entries
/// Records pending drag with start position
pub fn make_on_mousedown<K>(sortable: SortableSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || !sortable.enabled_read.get_untracked() {
            return;
        }
        // Ignore presses on controls inside the entry
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        ev.prevent_default();
        sortable.pending_write.set(Some(key.clone()));
        sortable.start_x_write.set(ev.client_x());
        sortable.start_y_write.set(ev.client_y());
    }
}

/// Create mousemove handler for entries (updates the drop side)
pub fn make_on_item_mousemove<K>(sortable: SortableSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        let Some(dragging) = sortable.dragging_read.get_untracked() else {
            return;
        };
        if dragging == key {
            sortable.drop_target_write.set(None);
            return;
        }
        let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        let rect = el.get_bounding_client_rect();
        let target = target_for_pointer(key.clone(), rect.top(), rect.height(), f64::from(ev.client_y()));
        if !sortable.is_drop_target(&target) {
            sortable.drop_target_write.set(Some(target));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K>(sortable: SortableSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if sortable.dragging_read.get_untracked().is_some() {
            sortable.drop_target_write.set(None);
        }
    }
}

/// Bind document mousemove handler - starts drag if moved enough
pub fn bind_global_mousemove<K>(sortable: SortableSignals<K>)
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = sortable.pending_read.get_untracked();
        if pending.is_none() || sortable.dragging_read.get_untracked().is_some() {
            return;
        }
        let dx = (ev.client_x() - sortable.start_x_read.get_untracked()).abs();
        let dy = (ev.client_y() - sortable.start_y_read.get_untracked()).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            sortable.dragging_write.set(pending);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind document mouseup handler for drop detection
pub fn bind_global_mouseup<K, F>(sortable: SortableSignals<K>, on_drop: F)
where
    K: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(K, DropTarget<K>) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = sortable.dragging_read.get_untracked();
        let target = sortable.drop_target_read.get_untracked();
        end_drag(&sortable);

        if !sortable.enabled_read.get_untracked() {
            return;
        }
        if let (Some(dragged), Some(target)) = (dragging, target) {
            on_drop(dragged, target);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(sortable);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[u32]) -> Vec<u32> {
        items.to_vec()
    }

    #[test]
    fn test_reorder_after_later_item() {
        let mut items = ids(&[1, 2, 3, 4]);
        assert!(reorder(&mut items, &1, &DropTarget::After(3), |i| i));
        assert_eq!(items, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_reorder_before_first_item() {
        let mut items = ids(&[1, 2, 3, 4]);
        assert!(reorder(&mut items, &4, &DropTarget::Before(1), |i| i));
        assert_eq!(items, vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_reorder_to_same_slot_is_noop() {
        let mut items = ids(&[1, 2, 3]);
        // 2 is already directly before 3 and directly after 1
        assert!(!reorder(&mut items, &2, &DropTarget::Before(3), |i| i));
        assert!(!reorder(&mut items, &2, &DropTarget::After(1), |i| i));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_onto_self_is_noop() {
        let mut items = ids(&[1, 2, 3]);
        assert!(!reorder(&mut items, &2, &DropTarget::After(2), |i| i));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_unknown_keys_leave_list_alone() {
        let mut items = ids(&[1, 2, 3]);
        assert!(!reorder(&mut items, &9, &DropTarget::Before(1), |i| i));
        assert!(!reorder(&mut items, &1, &DropTarget::Before(9), |i| i));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_by_struct_key() {
        #[derive(Debug, PartialEq)]
        struct Row { id: String }
        let mut rows: Vec<Row> = ["a", "b", "c"].iter().map(|s| Row { id: s.to_string() }).collect();
        assert!(reorder(&mut rows, &"c".to_string(), &DropTarget::Before("a".to_string()), |r| &r.id));
        let order: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_target_for_pointer_uses_midpoint() {
        assert_eq!(target_for_pointer(7, 100.0, 40.0, 110.0), DropTarget::Before(7));
        assert_eq!(target_for_pointer(7, 100.0, 40.0, 120.0), DropTarget::After(7));
        assert_eq!(target_for_pointer(7, 100.0, 40.0, 139.0), DropTarget::After(7));
    }
}
