//! Pointer-move handling - drag start, drag movement, container transfer and
//! resizing.
//!
//! ## Performance Notes
//!
//! Pointer moves arrive 60+ times per second while a gesture is active. Key
//! points:
//! - Early exit while still inside the dead-zone
//! - Cached rects are adjusted analytically, never re-measured per move
//! - Sorting only runs when the pointer is inside the container's proximity band
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use std::time::Instant;

use tracing::{debug, trace};

use crate::drop_list::SortContext;
use crate::engine::DragDrop;
use crate::events::{DragEnterEvent, DragExitEvent, DragMoveEvent, DragStartEvent, ResizeEvent, ResizeStartEvent};
use crate::geometry::Point;
use crate::input::coords::{constrain_pointer_position, Constraints};
use crate::input::tracker::ThresholdCheck;
use crate::profile_scope;
use crate::resize::compute_resized_rect;
use crate::types::{DragId, GestureId, PointerEvent, ResizeId};

impl DragDrop {
    /// Document-level pointer move.
    pub fn dispatch_pointer_move(&mut self, event: &PointerEvent) {
        profile_scope!("dispatch_pointer_move");
        let started = Instant::now();

        self.registry.pointer_move.emit(event);
        for gesture in self.registry.active_gestures() {
            match gesture {
                GestureId::Drag(id) => self.drag_pointer_move(id, event),
                GestureId::Resize(id) => self.resize_pointer_move(id, event),
            }
        }

        self.perf
            .record_operation("pointer_move", started.elapsed().as_secs_f64() * 1000.0);
    }

    /// Drop an armed gesture that never started, without any notification.
    pub(super) fn cancel_pending_gesture(&mut self, gesture: GestureId) {
        self.registry.stop_gesture(&*self.host, gesture);
        match gesture {
            GestureId::Drag(id) => {
                if let Some(drag) = self.drags.get_mut(id) {
                    drag.gesture.reset();
                    drag.initial_rect = None;
                    drag.boundary_rect = None;
                }
            }
            GestureId::Resize(id) => {
                if let Some(resizable) = self.resizes.get_mut(id) {
                    resizable.gesture.reset();
                    resizable.session = None;
                }
            }
        }
        trace!(?gesture, "pending gesture cancelled");
    }

    fn drag_pointer_move(&mut self, id: DragId, event: &PointerEvent) {
        let Some(drag) = self.drags.get(id) else {
            return;
        };
        let Some(tracker) = drag.gesture.tracker().copied() else {
            return;
        };

        if !drag.gesture.has_started() {
            match tracker.check_threshold(event.position, event.timestamp_ms, self.config.drag_start_threshold) {
                ThresholdCheck::Pending => {}
                ThresholdCheck::TooEarly => self.cancel_pending_gesture(GestureId::Drag(id)),
                ThresholdCheck::Passed => {
                    // A container that is busy with another item cannot
                    // start a second drag yet.
                    let busy = drag
                        .drop_container
                        .and_then(|c| self.drops.get(c))
                        .is_some_and(|c| c.is_dragging() || c.is_receiving());
                    if !busy {
                        self.start_drag_sequence(id);
                    }
                }
            }
            return;
        }

        let container = drag.drop_container;
        let lock_axis = drag
            .lock_axis
            .or_else(|| container.and_then(|c| self.drops.get(c)).and_then(|c| c.lock_axis()));
        let preview_size = drag
            .preview_rect
            .or(drag.initial_rect)
            .map(|r| r.size())
            .unwrap_or_default();
        let constrained = constrain_pointer_position(
            event.position,
            &Constraints {
                constrain: drag.constrain_position.as_deref(),
                lock_axis,
                pickup_position: tracker.pickup_position,
                pickup_in_element: drag.pickup_in_element,
                boundary: drag.boundary_rect,
                preview_size,
            },
        );

        let drag = &mut self.drags[id];
        let Some(tracker) = drag.gesture.tracker_mut() else {
            return;
        };
        tracker.last_position = event.position;
        let delta = tracker.update_direction_delta(constrained, self.config.pointer_direction_change_threshold);
        let distance = tracker.distance(constrained);
        let pickup_position = tracker.pickup_position;

        if container.is_some() {
            self.update_active_drop_container(id, constrained, event.position);
            let drag = &self.drags[id];
            if let Some(preview) = drag.preview {
                self.host
                    .set_transform(preview, Some(constrained.delta_from(drag.pickup_in_element)));
            }
        } else {
            let drag = &mut self.drags[id];
            drag.active_transform = Point::new(
                constrained.x - pickup_position.x + drag.passive_transform.x,
                constrained.y - pickup_position.y + drag.passive_transform.y,
            );
            self.host.set_transform(drag.root, Some(drag.active_transform));

            if self.config.auto_scroll_free_drag {
                self.viewport_scroller
                    .start_scrolling_if_necessary(event.position.x, event.position.y, &[]);
            }
        }

        self.drags[id].events.moved.emit(&DragMoveEvent {
            source: id,
            pointer_position: constrained,
            distance,
            delta,
        });
    }

    /// The pointer passed the dead-zone: insert the placeholder, detach the
    /// preview and tell the container.
    fn start_drag_sequence(&mut self, id: DragId) {
        profile_scope!("start_drag_sequence");
        let host = self.host.clone();

        let drag = &mut self.drags[id];
        drag.events.before_started.emit(&());
        drag.gesture.start();
        let root = drag.root;
        let container = drag.drop_container;

        match container {
            Some(container) => {
                let root_rect = drag.initial_rect.unwrap_or_else(|| host.client_rect(root));

                let placeholder = host.create_placeholder(root, drag.placeholder_template);
                host.insert_before(placeholder, root);

                let preview = host.create_preview(root, drag.preview_template.and_then(|p| p.template));
                host.set_transform(preview, Some(root_rect.origin()));
                host.set_visible(root, false);

                drag.placeholder = Some(placeholder);
                drag.preview = Some(preview);
                drag.preview_rect = Some(host.client_rect(preview));
                drag.events.started.emit(&DragStartEvent { source: id });

                self.start_container(container);

                let initial_index = self
                    .drops
                    .get(container)
                    .and_then(|c| c.get_item_index(id))
                    .unwrap_or_default();
                let drag = &mut self.drags[id];
                drag.initial_container = Some(container);
                drag.initial_index = initial_index;

                let list_element = self.drops.get(container).map(|c| c.element());
                let mut elements: Vec<_> = list_element.into_iter().collect();
                if let Some(element) = list_element {
                    elements.extend(host.scrollable_parents(element));
                }
                drag.parent_positions.cache(&*host, &elements);
                debug!(drag = ?id, ?container, initial_index, "drag started");
            }
            None => {
                drag.events.started.emit(&DragStartEvent { source: id });
                drag.initial_container = None;
                drag.initial_index = 0;
                drag.parent_positions.cache(&*host, &[]);
                debug!(drag = ?id, "free drag started");
            }
        }
    }

    /// Move the item into whichever connected container it is over, then
    /// auto-scroll and sort inside the current one.
    fn update_active_drop_container(&mut self, id: DragId, constrained: Point, raw: Point) {
        let drag = &self.drags[id];
        let (Some(initial), Some(current)) = (drag.initial_container, drag.drop_container) else {
            return;
        };
        let initial_index = drag.initial_index;
        let Point { x, y } = constrained;

        let mut target = self.sibling_from_position(initial, id, x, y);
        // Coming back to a container that is only connected one way.
        if target.is_none()
            && current != initial
            && self.drops.get(initial).is_some_and(|c| c.is_over_container(x, y))
        {
            target = Some(initial);
        }

        if let Some(target) = target.filter(|t| *t != current) {
            self.drags[id].events.exited.emit(&DragExitEvent {
                item: id,
                container: current,
            });
            self.exit_container(current, id);

            self.drags[id].drop_container = Some(target);
            let index = (target == initial && self.drops[target].is_sorting_disabled()).then_some(initial_index);
            self.enter_container(target, id, x, y, index);

            let current_index = self.drops[target].get_item_index(id).unwrap_or_default();
            debug!(drag = ?id, from = ?current, to = ?target, current_index, "drag transferred");
            self.drags[id].events.entered.emit(&DragEnterEvent {
                item: id,
                container: target,
                current_index,
            });
        }

        let drag = &self.drags[id];
        let Some(current) = drag.drop_container else {
            return;
        };
        let delta = drag
            .gesture
            .tracker()
            .map(|t| t.direction_delta)
            .unwrap_or_default();
        let Some(list) = self.drops.get_mut(current) else {
            return;
        };
        list.start_scrolling_if_necessary(raw.x, raw.y);

        let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
        list.sort_item(&ctx, id, x, y, delta, self.config.drop_proximity_threshold);
    }

    fn resize_pointer_move(&mut self, id: ResizeId, event: &PointerEvent) {
        let Some(resizable) = self.resizes.get(id) else {
            return;
        };
        let Some(tracker) = resizable.gesture.tracker().copied() else {
            return;
        };

        if !resizable.gesture.has_started() {
            match tracker.check_threshold(event.position, event.timestamp_ms, self.config.drag_start_threshold) {
                ThresholdCheck::Pending => {}
                ThresholdCheck::TooEarly => self.cancel_pending_gesture(GestureId::Resize(id)),
                ThresholdCheck::Passed => self.start_resize_sequence(id),
            }
            return;
        }

        let resizable = &mut self.resizes[id];
        let Some(session) = resizable.session.as_mut() else {
            return;
        };
        let rect = compute_resized_rect(
            &session.start_rect,
            session.handle,
            tracker.distance(event.position),
            &resizable.limits,
            session.boundary_rect.as_ref(),
        );
        session.current = rect;

        match session.preview {
            Some(preview) => {
                self.host.set_size(preview, rect.size());
                self.host.set_transform(preview, Some(rect.origin()));
            }
            None => {
                let moved = rect.origin().delta_from(session.start_rect.origin());
                let offset = Point::new(resizable.offset.x + moved.x, resizable.offset.y + moved.y);
                self.host.set_size(resizable.root, rect.size());
                self.host
                    .set_transform(resizable.root, (offset != Point::ZERO).then_some(offset));
            }
        }

        if let Some(tracker) = resizable.gesture.tracker_mut() {
            tracker.last_position = event.position;
        }
        trace!(resizable = ?id, width = rect.width, height = rect.height, "resized");
        resizable.events.resized.emit(&ResizeEvent {
            source: id,
            handle: session.handle,
            rect,
        });
    }

    fn start_resize_sequence(&mut self, id: ResizeId) {
        let resizable = &mut self.resizes[id];
        resizable.events.before_started.emit(&());
        resizable.gesture.start();

        let Some(session) = resizable.session.as_mut() else {
            return;
        };
        if resizable.use_preview {
            let preview = self.host.create_preview(resizable.root, resizable.preview_template);
            self.host.set_size(preview, session.start_rect.size());
            self.host.set_transform(preview, Some(session.start_rect.origin()));
            session.preview = Some(preview);
        }

        debug!(resizable = ?id, handle = ?session.handle, "resize started");
        resizable.events.started.emit(&ResizeStartEvent {
            source: id,
            handle: session.handle,
            rect: session.start_rect,
        });
    }
}
