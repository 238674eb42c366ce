//! Scroll, select-start, touch-move and animation-frame callbacks.

use tracing::trace;

use crate::drop_list::SortContext;
use crate::engine::DragDrop;
use crate::geometry::Point;
use crate::profile_scope;
use crate::types::{DragId, DropListId, GestureId, PointerEvent, ScrollEvent, ScrollTarget};

impl DragDrop {
    /// Document or element scroll while gestures are active.
    ///
    /// Cached rects are shifted by the scroll difference instead of being
    /// measured again. Containers whose items moved re-sort from the last
    /// pointer position.
    pub fn dispatch_scroll(&mut self, event: &ScrollEvent) {
        profile_scope!("dispatch_scroll");

        self.registry.scroll.emit(event);

        for gesture in self.registry.active_gestures() {
            if let GestureId::Drag(id) = gesture {
                self.scroll_drag(id, event.target);
            }
        }

        let scrolled: Vec<DropListId> = self
            .drops
            .iter_mut()
            .filter_map(|(id, list)| list.handle_scroll(&*self.host, event.target).then_some(id))
            .collect();
        for container in scrolled {
            self.resort_after_scroll(container);
        }
    }

    fn scroll_drag(&mut self, id: DragId, target: ScrollTarget) {
        let Some(drag) = self.drags.get_mut(id) else {
            return;
        };
        if !drag.is_dragging() {
            return;
        }
        let Some(diff) = drag.parent_positions.handle_scroll(&*self.host, target) else {
            return;
        };

        if let (Some(rect), Some(boundary)) = (drag.boundary_rect.as_mut(), drag.boundary) {
            let moves_boundary = match target {
                ScrollTarget::Document => true,
                ScrollTarget::Node(node) => node != boundary && self.host.contains(node, boundary),
            };
            if moves_boundary {
                rect.adjust(diff.top, diff.left);
            }
        }
        if let Some(tracker) = drag.gesture.tracker_mut() {
            tracker.shift(diff.top, diff.left);
        }
        if drag.drop_container.is_none() {
            drag.active_transform.x -= diff.left;
            drag.active_transform.y -= diff.top;
            self.host.set_transform(drag.root, Some(drag.active_transform));
        }
        trace!(drag = ?id, top = diff.top, left = diff.left, "drag adjusted for scroll");
    }

    fn resort_after_scroll(&mut self, container: DropListId) {
        let dragged: Vec<(DragId, Point)> = self
            .drags
            .iter()
            .filter(|(_, drag)| drag.is_dragging() && drag.drop_container == Some(container))
            .filter_map(|(id, drag)| Some((id, drag.gesture.tracker()?.last_position)))
            .collect();

        for (id, position) in dragged {
            let delta = self.drags[id]
                .gesture
                .tracker()
                .map(|t| t.direction_delta)
                .unwrap_or_default();
            let Some(list) = self.drops.get_mut(container) else {
                return;
            };
            let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
            list.sort_item(&ctx, id, position.x, position.y, delta, self.config.drop_proximity_threshold);
        }
    }

    /// Whether the host should prevent `selectstart`.
    pub fn dispatch_select_start(&self) -> bool {
        self.registry.should_prevent_select_start()
    }

    /// Permanent touch-move listener. Routes the move to active gestures and
    /// returns whether the host should prevent the default action, which is
    /// only the case once a gesture has actually started.
    pub fn dispatch_touch_move(&mut self, event: &PointerEvent) -> bool {
        if !self.registry.has_active_gesture() {
            return false;
        }
        self.dispatch_pointer_move(event);

        self.registry.active_gestures().into_iter().any(|gesture| match gesture {
            GestureId::Drag(id) => self.drags.get(id).is_some_and(|d| d.is_dragging()),
            GestureId::Resize(id) => self.resizes.get(id).is_some_and(|r| r.is_resizing()),
        })
    }

    /// Run one animation frame: every live auto-scroll task steps once.
    pub fn on_animation_frame(&mut self) -> usize {
        self.perf.begin_frame();
        let ran = self.frames.run_frame();
        if let Some(elapsed) = self.perf.end_frame() {
            self.perf.record_operation("animation_frame", elapsed);
        }
        ran
    }
}
