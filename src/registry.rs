//! Process-wide bookkeeping of draggables, resizables and drop containers.
//!
//! The registry owns the single set of document-level listeners. They are
//! bound when the first gesture arms and unbound when the last one ends, so
//! n draggables never cost n listeners. Raw events are re-broadcast on the
//! `pointer_move`, `pointer_up` and `scroll` channels.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::error::{DragDropError, DragDropResult};
use crate::events::EventStream;
use crate::host::ListenerHost;
use crate::types::{
    DragId, DropListId, GestureId, ListenerKind, NodeId, PointerEvent, PointerKind, ResizeId,
    ScrollEvent,
};

#[derive(Debug, Default)]
pub struct PointerRegistry {
    drags: IndexSet<DragId>,
    resizes: IndexSet<ResizeId>,
    drop_containers: IndexMap<DropListId, NodeId>,
    /// Gestures between pointer-down and pointer-up, with the device that
    /// armed them.
    active: IndexMap<GestureId, PointerKind>,
    /// Document listeners bound for the active gestures.
    bound: Vec<ListenerKind>,
    touch_move_bound: bool,
    pub pointer_move: EventStream<PointerEvent>,
    pub pointer_up: EventStream<PointerEvent>,
    pub scroll: EventStream<ScrollEvent>,
}

impl PointerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    pub fn register_drag(&mut self, host: &(impl ListenerHost + ?Sized), id: DragId) {
        self.drags.insert(id);
        self.bind_touch_move(host);
    }

    pub fn register_resizable(&mut self, host: &(impl ListenerHost + ?Sized), id: ResizeId) {
        self.resizes.insert(id);
        self.bind_touch_move(host);
    }

    /// Register a drop container. A container id, or a container element,
    /// may only be registered once.
    pub fn register_drop_container(&mut self, id: DropListId, element: NodeId) -> DragDropResult<()> {
        if self.drop_containers.contains_key(&id) {
            return Err(DragDropError::DuplicateRegistration(id));
        }
        if let Some((existing, _)) = self.drop_containers.iter().find(|(_, e)| **e == element) {
            return Err(DragDropError::DuplicateRegistration(*existing));
        }
        self.drop_containers.insert(id, element);
        Ok(())
    }

    pub fn remove_drag(&mut self, host: &(impl ListenerHost + ?Sized), id: DragId) {
        self.drags.shift_remove(&id);
        self.stop_gesture(host, GestureId::Drag(id));
    }

    pub fn remove_resizable(&mut self, host: &(impl ListenerHost + ?Sized), id: ResizeId) {
        self.resizes.shift_remove(&id);
        self.stop_gesture(host, GestureId::Resize(id));
    }

    pub fn remove_drop_container(&mut self, id: DropListId) {
        self.drop_containers.shift_remove(&id);
    }

    pub fn drag_count(&self) -> usize {
        self.drags.len()
    }

    pub fn resizable_count(&self) -> usize {
        self.resizes.len()
    }

    pub fn drop_containers(&self) -> impl Iterator<Item = DropListId> + '_ {
        self.drop_containers.keys().copied()
    }

    /// The permanent touch-move listener is bound once, by the first
    /// registered instance, and only removed by [`PointerRegistry::dispose`].
    fn bind_touch_move(&mut self, host: &(impl ListenerHost + ?Sized)) {
        if !self.touch_move_bound {
            host.bind_listener(ListenerKind::TouchMove);
            self.touch_move_bound = true;
        }
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    /// Mark a gesture as active. Returns `false` if it already was.
    pub fn start_gesture(
        &mut self,
        host: &(impl ListenerHost + ?Sized),
        gesture: GestureId,
        kind: PointerKind,
    ) -> bool {
        if self.active.contains_key(&gesture) {
            return false;
        }
        self.active.insert(gesture, kind);

        if self.active.len() == 1 {
            // Touch moves arrive through the permanent touch-move listener.
            if kind == PointerKind::Mouse {
                self.bind(host, ListenerKind::PointerMove(kind));
            }
            self.bind(host, ListenerKind::PointerUp(kind));
            self.bind(host, ListenerKind::Scroll);
            self.bind(host, ListenerKind::SelectStart);
            debug!(?gesture, ?kind, "document listeners bound");
        }
        true
    }

    /// Mark a gesture as finished. Unbinds the document listeners when it
    /// was the last one.
    pub fn stop_gesture(&mut self, host: &(impl ListenerHost + ?Sized), gesture: GestureId) {
        if self.active.shift_remove(&gesture).is_none() {
            return;
        }
        if self.active.is_empty() {
            for kind in self.bound.drain(..) {
                host.unbind_listener(kind);
            }
            debug!(?gesture, "document listeners unbound");
        }
    }

    fn bind(&mut self, host: &(impl ListenerHost + ?Sized), kind: ListenerKind) {
        host.bind_listener(kind);
        self.bound.push(kind);
    }

    pub fn is_active(&self, gesture: GestureId) -> bool {
        self.active.contains_key(&gesture)
    }

    /// Whether a drag controller is between pointer-down and pointer-up.
    pub fn is_dragging(&self, id: DragId) -> bool {
        self.is_active(GestureId::Drag(id))
    }

    pub fn has_active_gesture(&self) -> bool {
        !self.active.is_empty()
    }

    /// Snapshot of the active gestures, safe to iterate while instances are
    /// disposed or gestures end.
    pub fn active_gestures(&self) -> Vec<GestureId> {
        self.active.keys().copied().collect()
    }

    pub fn bound_listeners(&self) -> &[ListenerKind] {
        &self.bound
    }

    pub fn is_touch_move_bound(&self) -> bool {
        self.touch_move_bound
    }

    /// Whether `selectstart` should be prevented.
    pub fn should_prevent_select_start(&self) -> bool {
        trace!(active = self.active.len(), "selectstart");
        self.has_active_gesture()
    }

    /// Unbind everything and close the broadcast channels.
    pub fn dispose(&mut self, host: &(impl ListenerHost + ?Sized)) {
        self.active.clear();
        for kind in self.bound.drain(..) {
            host.unbind_listener(kind);
        }
        if self.touch_move_bound {
            host.unbind_listener(ListenerKind::TouchMove);
            self.touch_move_bound = false;
        }
        self.drags.clear();
        self.resizes.clear();
        self.drop_containers.clear();
        self.pointer_move.complete();
        self.pointer_up.complete();
        self.scroll.complete();
    }
}
