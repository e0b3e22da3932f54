//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for flat, index-addressed lists.
//! Uses a movement threshold to distinguish click from drag.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop on an item (take its position)
    Item(usize),
    /// Drop into the gap before `slot`; `slot == len` is the end of the list
    Slot(usize),
}

/// Destination index for a remove-then-insert move of `from` onto `target`.
///
/// `None` when the drop leaves the list unchanged.
pub fn destination(from: usize, target: DropTarget) -> Option<usize> {
    let to = match target {
        DropTarget::Item(index) => index,
        DropTarget::Slot(slot) if slot > from => slot - 1,
        DropTarget::Slot(slot) => slot,
    };
    (to != from).then_some(to)
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<usize>>,
    pub dragging_write: WriteSignal<Option<usize>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending index (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<usize>>,
    pub pending_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<usize>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_read,
        start_write,
    }
}

impl DndSignals {
    pub fn is_dragging(&self, index: usize) -> bool {
        self.dragging_read.get() == Some(index)
    }

    pub fn is_target(&self, target: DropTarget) -> bool {
        self.dragging_read.get().is_some() && self.drop_target_read.get() == Some(target)
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.try_set(None);
    dnd.drop_target_write.try_set(None);
    dnd.pending_write.try_set(None);
    dnd.drag_just_ended_write.try_set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = Closure::<dyn FnMut()>::new(move || {
            clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            100,
        );
        cb.forget();
    }
}

fn is_form_control(target: &web_sys::EventTarget) -> bool {
    target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
}

/// Create mousedown handler for a draggable row
/// Records pending drag with start position
pub fn make_on_mousedown(
    dnd: DndSignals,
    index: usize,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Editing a field inside the row must not start a drag
        if let Some(target) = ev.target() {
            if is_form_control(&target) {
                return;
            }
        }
        dnd.pending_write.set(Some(index));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Document mousemove: starts the drag once moved past the threshold
fn bind_global_mousemove(binding: u64, dnd: DndSignals) {
    let on_mousemove =
        Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            // Signals are gone once the owning view is disposed
            let Some(pending) = dnd.pending_read.try_get_untracked() else {
                return;
            };
            if pending.is_none() || dnd.dragging_read.try_get_untracked().flatten().is_some() {
                return;
            }
            let (start_x, start_y) = dnd.start_read.get_untracked();
            let dx = (ev.client_x() - start_x).abs();
            let dy = (ev.client_y() - start_y).abs();
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                dnd.dragging_write.set(pending);
            }
        });
    listen(binding, "mousemove", on_mousemove);
}

/// Create mouseenter handler for rows
pub fn make_on_item_mouseenter(
    dnd: DndSignals,
    index: usize,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_read.get_untracked() {
            if dragging != index {
                dnd.drop_target_write.set(Some(DropTarget::Item(index)));
            }
        }
    }
}

/// Create mouseenter handler for the gap before `slot`
pub fn make_on_slot_mouseenter(
    dnd: DndSignals,
    slot: usize,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Slot(slot)));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop` receives the dragged index and the destination index, already
/// resolved through [`destination`]. The document listeners live as long as
/// the calling view and are removed when it is disposed.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(usize, usize) + 'static,
{
    let binding = NEXT_BINDING.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });

    let on_mouseup =
        Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
            let Some(dragging) = dnd.dragging_read.try_get_untracked() else {
                return;
            };
            let drop_target = dnd.drop_target_read.get_untracked();
            end_drag(&dnd);

            if let (Some(from), Some(target)) = (dragging, drop_target) {
                if let Some(to) = destination(from, target) {
                    on_drop(from, to);
                }
            }
        });
    listen(binding, "mouseup", on_mouseup);
    bind_global_mousemove(binding, dnd);

    on_cleanup(move || unbind(binding));
}

// ========================
// Document listeners
// ========================

type MouseListener = Closure<dyn FnMut(web_sys::MouseEvent)>;

/// Listeners grouped by the binding that added them
struct ListenerRegistry<L> {
    bindings: HashMap<u64, Vec<(&'static str, L)>>,
}

impl<L> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<L> ListenerRegistry<L> {
    fn insert(&mut self, binding: u64, event: &'static str, listener: L) {
        self.bindings.entry(binding).or_default().push((event, listener));
    }

    fn take(&mut self, binding: u64) -> Vec<(&'static str, L)> {
        self.bindings.remove(&binding).unwrap_or_default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }
}

thread_local! {
    static LISTENERS: RefCell<ListenerRegistry<MouseListener>> = RefCell::new(ListenerRegistry::default());
    static NEXT_BINDING: Cell<u64> = const { Cell::new(0) };
}

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|win| win.document())
}

fn listen(binding: u64, event: &'static str, listener: MouseListener) {
    if let Some(doc) = document() {
        let _ = doc.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
    }
    LISTENERS.with(|registry| registry.borrow_mut().insert(binding, event, listener));
}

fn unbind(binding: u64) {
    let removed = LISTENERS.with(|registry| registry.borrow_mut().take(binding));
    if let Some(doc) = document() {
        for (event, listener) in &removed {
            let _ =
                doc.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_releases_only_the_disposed_binding() {
        let mut registry = ListenerRegistry::<u32>::default();
        registry.insert(0, "mouseup", 1);
        registry.insert(0, "mousemove", 2);
        registry.insert(1, "mouseup", 3);
        registry.insert(1, "mousemove", 4);
        assert_eq!(registry.len(), 4);

        let released = registry.take(0);
        assert_eq!(released, vec![("mouseup", 1), ("mousemove", 2)]);
        assert_eq!(registry.len(), 2);

        // a second dispose of the same view is a no-op
        assert!(registry.take(0).is_empty());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_drop_on_item_takes_its_index() {
        assert_eq!(destination(0, DropTarget::Item(2)), Some(2));
        assert_eq!(destination(3, DropTarget::Item(1)), Some(1));
        assert_eq!(destination(1, DropTarget::Item(1)), None);
    }

    #[test]
    fn test_slot_after_source_shifts_left() {
        // [A,B,C,D]: drag A into the gap before D -> [B,C,A,D]
        assert_eq!(destination(0, DropTarget::Slot(3)), Some(2));
        // end of list
        assert_eq!(destination(0, DropTarget::Slot(4)), Some(3));
    }

    #[test]
    fn test_slot_before_source_is_direct() {
        assert_eq!(destination(3, DropTarget::Slot(0)), Some(0));
    }

    #[test]
    fn test_adjacent_slots_are_no_ops() {
        assert_eq!(destination(2, DropTarget::Slot(2)), None);
        assert_eq!(destination(2, DropTarget::Slot(3)), None);
    }
}
