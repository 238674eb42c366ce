//! Pointer-down handling - arming drag and resize gestures.
//!
//! Nothing visible happens on pointer-down. The gesture is armed, the
//! document listeners are bound, and geometry needed later (the root rect,
//! the boundary rect, where inside the element the pointer grabbed it) is
//! measured once here.

use tracing::debug;

use crate::engine::DragDrop;
use crate::error::{DragDropError, DragDropResult};
use crate::geometry::Point;
use crate::input::coords::pointer_in_element;
use crate::input::tracker::PointerTracker;
use crate::profile_scope;
use crate::resize::ResizeSession;
use crate::types::{DragId, GestureId, PointerEvent, ResizeId};

impl DragDrop {
    /// Pointer went down on (or inside) a drag item's element.
    ///
    /// Returns whether a gesture was armed; the adapter should then suppress
    /// the host's native drag behavior.
    pub fn pointer_down_on_drag(&mut self, id: DragId, event: &PointerEvent) -> DragDropResult<bool> {
        profile_scope!("pointer_down_on_drag");

        let drag = self.drags.get(id).ok_or(DragDropError::UnknownDrag(id))?;
        let container_disabled = drag
            .drop_container
            .and_then(|c| self.drops.get(c))
            .is_some_and(|c| c.is_disabled());
        if drag.disabled || container_disabled || event.is_auxiliary_button() {
            return Ok(false);
        }

        let host = self.host.clone();
        if drag.target_handle(event.target, |a, n| host.contains(a, n)).is_none() {
            return Ok(false);
        }
        if self.registry.is_dragging(id) {
            return Ok(false);
        }

        let root_rect = host.client_rect(drag.root);
        let boundary_rect = drag.boundary.map(|b| host.client_rect(b));
        let pickup_in_element = match drag.preview_template {
            Some(preview) if preview.template.is_some() && !preview.match_size => Point::ZERO,
            _ => pointer_in_element(event.position, &root_rect),
        };
        let tracker = PointerTracker::new(event, drag.start_delay.for_kind(event.kind));

        let drag = &mut self.drags[id];
        drag.initial_rect = Some(root_rect);
        drag.boundary_rect = boundary_rect;
        drag.preview_rect = None;
        drag.pickup_in_element = pickup_in_element;
        drag.gesture.arm(tracker);

        self.registry.start_gesture(&*host, GestureId::Drag(id), event.kind);
        debug!(drag = ?id, kind = ?event.kind, x = event.position.x, y = event.position.y, "drag armed");
        Ok(true)
    }

    /// Pointer went down on a resizable. Only a pointer-down on one of its
    /// handles arms a gesture.
    pub fn pointer_down_on_resize(&mut self, id: ResizeId, event: &PointerEvent) -> DragDropResult<bool> {
        profile_scope!("pointer_down_on_resize");

        let resizable = self.resizes.get(id).ok_or(DragDropError::UnknownResizable(id))?;
        if resizable.disabled || event.is_auxiliary_button() {
            return Ok(false);
        }

        let host = self.host.clone();
        let Some(handle) = resizable.target_handle(event.target, |a, n| host.contains(a, n)) else {
            return Ok(false);
        };
        if self.registry.is_active(GestureId::Resize(id)) {
            return Ok(false);
        }

        let start_rect = host.client_rect(resizable.root);
        let boundary_rect = match resizable.boundary {
            Some(boundary) => {
                let rect = host.client_rect(boundary);
                if !rect.contains_rect(&start_rect) {
                    return Err(DragDropError::BoundaryDoesNotContain {
                        boundary,
                        element: resizable.root,
                    });
                }
                Some(rect)
            }
            None => None,
        };
        let tracker = PointerTracker::new(event, self.config.drag_start_delay.for_kind(event.kind));

        let resizable = &mut self.resizes[id];
        resizable.session = Some(ResizeSession {
            handle,
            start_rect,
            boundary_rect,
            preview: None,
            current: start_rect,
        });
        resizable.gesture.arm(tracker);

        self.registry.start_gesture(&*host, GestureId::Resize(id), event.kind);
        debug!(resizable = ?id, ?handle, "resize armed");
        Ok(true)
    }
}
