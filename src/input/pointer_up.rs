//! Pointer-up handling - finalize drops, free drags and resizes.

use tracing::debug;

use crate::engine::DragDrop;
use crate::events::{DragDropEvent, DragEndEvent, DragReleaseEvent, ResizeEndEvent, ResizeReleaseEvent};
use crate::geometry::Point;
use crate::profile_scope;
use crate::resize::compute_resized_rect;
use crate::types::{DragId, DropListId, GestureId, PointerEvent, ResizeId};

impl DragDrop {
    /// Document-level pointer up. Ends every gesture in flight.
    pub fn dispatch_pointer_up(&mut self, event: &PointerEvent) {
        profile_scope!("dispatch_pointer_up");

        self.registry.pointer_up.emit(event);
        for gesture in self.registry.active_gestures() {
            match gesture {
                GestureId::Drag(id) => self.end_drag_sequence(id, event),
                GestureId::Resize(id) => self.end_resize_sequence(id, event),
            }
        }
    }

    fn end_drag_sequence(&mut self, id: DragId, event: &PointerEvent) {
        if !self.registry.is_dragging(id) {
            return;
        }
        let started = self.drags.get(id).is_some_and(|d| d.gesture.has_started());
        if !started {
            self.cancel_pending_gesture(GestureId::Drag(id));
            return;
        }
        self.registry.stop_gesture(&*self.host, GestureId::Drag(id));

        let drag = &mut self.drags[id];
        drag.events.released.emit(&DragReleaseEvent { source: id });

        let pointer = event.position;
        let distance = drag
            .gesture
            .tracker()
            .map(|t| t.distance(pointer))
            .unwrap_or_default();

        match drag.drop_container {
            Some(container) => self.finish_contained_drag(id, container, pointer, distance),
            None => {
                drag.passive_transform = drag.active_transform;
                drag.gesture.reset();
                drag.events.ended.emit(&DragEndEvent {
                    source: id,
                    distance,
                    drop_point: pointer,
                });
                debug!(drag = ?id, x = drag.passive_transform.x, y = drag.passive_transform.y, "free drag ended");
            }
        }

        let drag = &mut self.drags[id];
        drag.initial_rect = None;
        drag.boundary_rect = None;
        drag.preview_rect = None;
        drag.parent_positions.clear();

        if !self.registry.has_active_gesture() {
            self.viewport_scroller.stop_scrolling();
        }
    }

    /// Put the root back where the placeholder is and report the drop.
    fn finish_contained_drag(&mut self, id: DragId, container: DropListId, pointer: Point, distance: Point) {
        if let Some(list) = self.drops.get_mut(container) {
            list.stop_scrolling();
        }

        let host = self.host.clone();
        let drag = &mut self.drags[id];
        host.set_visible(drag.root, true);
        if let Some(placeholder) = drag.placeholder.take() {
            host.insert_before(drag.root, placeholder);
            host.remove_node(placeholder);
        }
        if let Some(preview) = drag.preview.take() {
            host.remove_node(preview);
        }

        let (current_index, is_pointer_over_container) = self
            .drops
            .get(container)
            .map(|c| (c.get_item_index(id).unwrap_or_default(), c.is_over_container(pointer.x, pointer.y)))
            .unwrap_or_default();
        let previous_container = drag.initial_container.unwrap_or(container);
        let dropped = DragDropEvent {
            item: id,
            current_index,
            previous_index: drag.initial_index,
            container,
            previous_container,
            is_pointer_over_container,
            distance,
            drop_point: pointer,
        };

        drag.gesture.reset();
        drag.events.ended.emit(&DragEndEvent {
            source: id,
            distance,
            drop_point: pointer,
        });
        drag.events.dropped.emit(&dropped);
        debug!(
            drag = ?id,
            ?container,
            ?previous_container,
            current_index,
            previous_index = dropped.previous_index,
            "drag dropped"
        );

        self.drop_into_container(container, &dropped);
        self.drags[id].drop_container = Some(previous_container);
    }

    fn end_resize_sequence(&mut self, id: ResizeId, event: &PointerEvent) {
        if !self.registry.is_active(GestureId::Resize(id)) {
            return;
        }
        let started = self.resizes.get(id).is_some_and(|r| r.gesture.has_started());
        if !started {
            self.cancel_pending_gesture(GestureId::Resize(id));
            return;
        }
        self.registry.stop_gesture(&*self.host, GestureId::Resize(id));

        let resizable = &mut self.resizes[id];
        let Some(session) = resizable.session.take() else {
            resizable.gesture.reset();
            return;
        };
        let distance = resizable
            .gesture
            .tracker()
            .map(|t| t.distance(event.position))
            .unwrap_or_default();
        let rect = compute_resized_rect(
            &session.start_rect,
            session.handle,
            distance,
            &resizable.limits,
            session.boundary_rect.as_ref(),
        );
        resizable.gesture.reset();

        resizable.events.released.emit(&ResizeReleaseEvent {
            source: id,
            handle: session.handle,
            rect,
        });

        if let Some(preview) = session.preview {
            self.host.remove_node(preview);
        }
        let moved = rect.origin().delta_from(session.start_rect.origin());
        resizable.offset = Point::new(resizable.offset.x + moved.x, resizable.offset.y + moved.y);
        self.host.set_size(resizable.root, rect.size());
        self.host.set_transform(
            resizable.root,
            (resizable.offset != Point::ZERO).then_some(resizable.offset),
        );

        debug!(resizable = ?id, width = rect.width, height = rect.height, "resize committed");
        resizable.events.ended.emit(&ResizeEndEvent {
            source: id,
            handle: session.handle,
            rect,
            distance,
        });
    }
}
