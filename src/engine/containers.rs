//! Container-to-container effects.
//!
//! A [`crate::drop_list::DropListRef`] only changes its own state. Whenever a
//! container starts, receives an item, or resets, its connected siblings are
//! told from here.

use indexmap::IndexSet;
use tracing::trace;

use super::DragDrop;
use crate::drop_list::SortContext;
use crate::events::DragDropEvent;
use crate::types::{DragId, DropListId};

impl DragDrop {
    /// Connected containers of `id`: explicit connections plus group members,
    /// without `id` itself and without disposed containers.
    pub(crate) fn effective_siblings(&self, id: DropListId) -> Vec<DropListId> {
        let Some(list) = self.drops.get(id) else {
            return Vec::new();
        };
        let mut siblings: IndexSet<DropListId> = list.connected_to.iter().copied().collect();
        if let Some(members) = list.group.and_then(|g| self.groups.get(g)) {
            siblings.extend(members.iter().copied());
        }
        siblings.shift_remove(&id);
        siblings.retain(|s| self.drops.contains_key(*s));
        siblings.into_iter().collect()
    }

    fn resolve_siblings(&mut self, id: DropListId) {
        let siblings = self.effective_siblings(id);
        if let Some(list) = self.drops.get_mut(id) {
            list.siblings = siblings;
        }
    }

    /// A drag started inside `id`.
    pub(crate) fn start_container(&mut self, id: DropListId) {
        if !self.drops.contains_key(id) {
            return;
        }
        self.resolve_siblings(id);
        let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
        self.drops[id].start_dragging(&ctx);
        self.notify_receiving_siblings(id);
    }

    /// `item` moved into `id` from another container.
    pub(crate) fn enter_container(&mut self, id: DropListId, item: DragId, x: f64, y: f64, index: Option<usize>) {
        if !self.drops.contains_key(id) {
            return;
        }
        self.resolve_siblings(id);
        let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
        self.drops[id].enter(&ctx, item, x, y, index);
        self.notify_receiving_siblings(id);
    }

    /// `item` left `id`. Returns `false` if it was never inside.
    pub(crate) fn exit_container(&mut self, id: DropListId, item: DragId) -> bool {
        let Some(list) = self.drops.get_mut(id) else {
            return false;
        };
        let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
        let exited = list.exit(&ctx, item);
        if exited {
            self.release_siblings(id);
        }
        exited
    }

    pub(crate) fn drop_into_container(&mut self, id: DropListId, event: &DragDropEvent) {
        let Some(list) = self.drops.get_mut(id) else {
            return;
        };
        let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
        list.drop(&ctx, event);
        self.release_siblings(id);
    }

    /// Reset `id` without an exit or drop, e.g. when its dragged item is
    /// disposed.
    pub(crate) fn reset_container(&mut self, id: DropListId) {
        let Some(list) = self.drops.get_mut(id) else {
            return;
        };
        if !list.is_dragging() {
            return;
        }
        let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
        list.reset(&ctx);
        self.release_siblings(id);
    }

    /// Tell every sibling of `id` that it may receive the items being
    /// dragged inside `id`.
    pub(crate) fn notify_receiving_siblings(&mut self, id: DropListId) {
        let Some(list) = self.drops.get(id) else {
            return;
        };
        let dragged: Vec<DragId> = list
            .active_items()
            .iter()
            .copied()
            .filter(|item| self.drags.get(*item).is_some_and(|d| d.is_dragging()))
            .collect();
        let siblings = list.siblings.clone();

        for sibling in siblings {
            if let Some(receiver) = self.drops.get_mut(sibling) {
                receiver.start_receiving(&*self.host, id, &dragged);
            }
        }
    }

    pub(crate) fn release_siblings(&mut self, id: DropListId) {
        let Some(list) = self.drops.get(id) else {
            return;
        };
        let siblings = list.siblings.clone();
        trace!(container = ?id, siblings = siblings.len(), "releasing siblings");
        for sibling in siblings {
            if let Some(receiver) = self.drops.get_mut(sibling) {
                receiver.stop_receiving(id);
            }
        }
    }

    /// First sibling of `initial` that can take `item` at the given point.
    pub(crate) fn sibling_from_position(&self, initial: DropListId, item: DragId, x: f64, y: f64) -> Option<DropListId> {
        let list = self.drops.get(initial)?;
        list.siblings.iter().copied().find(|sibling| {
            self.drops
                .get(*sibling)
                .is_some_and(|s| s.can_receive(&*self.host, item, x, y))
        })
    }
}
