//! Engine lifecycle - creation, configuration and disposal of controllers
//! and containers.

use std::rc::Rc;

use indexmap::IndexSet;
use slotmap::SlotMap;
use tracing::{debug, warn};

use super::DragDrop;
use crate::config::DragDropConfig;
use crate::drag::DragRef;
use crate::drop_list::{AutoScroller, ContainerKind, DropListRef, SortContext};
use crate::error::{DragDropError, DragDropResult};
use crate::frame::FrameScheduler;
use crate::geometry::Point;
use crate::host::Host;
use crate::input::coords::contain_inside_boundary;
use crate::perf::PerfMonitor;
use crate::registry::PointerRegistry;
use crate::resize::{ResizeLimits, ResizeRef};
use crate::types::{
    Direction, DragId, DropListId, GestureId, GridFlow, GroupId, NodeId, NodeKind, Orientation,
    ResizeId, ResolvedNode,
};

impl DragDrop {
    pub fn new(host: Rc<dyn Host>, config: DragDropConfig) -> DragDropResult<Self> {
        config.validate()?;
        Ok(Self::build(host, config))
    }

    fn build(host: Rc<dyn Host>, config: DragDropConfig) -> Self {
        let frames = Rc::new(FrameScheduler::new());
        let viewport_scroller = AutoScroller::new(
            host.clone(),
            frames.clone(),
            config.auto_scroll_step,
            config.scroll_proximity_threshold,
            config.drop_proximity_threshold,
        );

        debug!(?config, "drag/drop context created");
        Self {
            host,
            config,
            registry: PointerRegistry::new(),
            drags: SlotMap::with_key(),
            drops: SlotMap::with_key(),
            resizes: SlotMap::with_key(),
            groups: SlotMap::with_key(),
            frames,
            viewport_scroller,
            perf: PerfMonitor::new(),
        }
    }

    /// Context with the built-in defaults, which always validate.
    pub fn with_defaults(host: Rc<dyn Host>) -> Self {
        Self::build(host, DragDropConfig::default())
    }

    /// Resolve `selector` against `element`. No match keeps `element`.
    fn resolve_root(&self, element: NodeId, selector: Option<&str>) -> DragDropResult<NodeId> {
        let Some(selector) = selector else {
            return Ok(element);
        };
        match self.host.closest(element, selector) {
            None => Ok(element),
            Some(ResolvedNode { node, kind: NodeKind::Element }) => Ok(node),
            Some(ResolvedNode { kind, .. }) => Err(DragDropError::InvalidRootElement { node: element, kind }),
        }
    }

    // ========================================================================
    // Drag controllers
    // ========================================================================

    pub fn create_drag(&mut self, element: NodeId) -> DragId {
        let delay = self.config.drag_start_delay;
        let id = self.drags.insert_with_key(|id| DragRef::new(id, element, delay));
        self.registry.register_drag(&*self.host, id);
        debug!(drag = ?id, ?element, "drag item created");
        id
    }

    /// Move the root of a drag item to the closest ancestor matching
    /// `selector`, or back to the element itself with `None`.
    pub fn set_root_selector(&mut self, id: DragId, selector: Option<&str>) -> DragDropResult<()> {
        let drag = self.drags.get(id).ok_or(DragDropError::UnknownDrag(id))?;
        let root = self.resolve_root(drag.element, selector)?;
        self.drags[id].root = root;
        Ok(())
    }

    /// Nodes allowed to start a drag. Handles outside the root are ignored.
    pub fn set_drag_handles(
        &mut self,
        id: DragId,
        handles: impl IntoIterator<Item = NodeId>,
    ) -> DragDropResult<()> {
        let drag = self.drags.get(id).ok_or(DragDropError::UnknownDrag(id))?;
        let root = drag.root;
        let handles: IndexSet<NodeId> = handles
            .into_iter()
            .filter(|handle| {
                let inside = *handle == root || self.host.contains(root, *handle);
                if !inside {
                    warn!(drag = ?id, ?handle, "drag handle is outside the root element, ignoring");
                }
                inside
            })
            .collect();
        self.drags[id].set_handles(handles);
        Ok(())
    }

    /// Offset a free-dragged item from its layout position.
    pub fn set_free_drag_position(&mut self, id: DragId, position: Point) -> DragDropResult<()> {
        let drag = self.drags.get_mut(id).ok_or(DragDropError::UnknownDrag(id))?;
        drag.active_transform = Point::ZERO;
        drag.passive_transform = position;
        if drag.drop_container.is_none() {
            self.host.set_transform(drag.root, Some(position));
        }
        Ok(())
    }

    /// Clear every transform a free drag left on the item.
    pub fn reset_drag(&mut self, id: DragId) -> DragDropResult<()> {
        let drag = self.drags.get_mut(id).ok_or(DragDropError::UnknownDrag(id))?;
        self.host.set_transform(drag.root, None);
        drag.active_transform = Point::ZERO;
        drag.passive_transform = Point::ZERO;
        Ok(())
    }

    /// Undo everything a gesture in flight put into the tree.
    fn abort_drag_artifacts(&mut self, id: DragId) {
        let Some(drag) = self.drags.get_mut(id) else {
            return;
        };
        let started = drag.gesture.has_started();
        if let Some(preview) = drag.preview.take() {
            self.host.remove_node(preview);
        }
        if let Some(placeholder) = drag.placeholder.take() {
            self.host.remove_node(placeholder);
        }
        if started {
            if drag.drop_container.is_some() {
                self.host.set_visible(drag.root, true);
                self.host.set_transform(drag.root, None);
            } else {
                let passive = drag.passive_transform;
                drag.active_transform = passive;
                self.host
                    .set_transform(drag.root, (passive != Point::ZERO).then_some(passive));
            }
        }
        drag.gesture.reset();
        drag.parent_positions.clear();
        drag.initial_rect = None;
        drag.boundary_rect = None;
        drag.preview_rect = None;
        let container = drag.drop_container;

        self.registry.stop_gesture(&*self.host, GestureId::Drag(id));
        if started {
            if let Some(container) = container {
                if let Some(list) = self.drops.get_mut(container) {
                    list.stop_scrolling();
                }
                self.reset_container(container);
            }
            if self.registry.active_gestures().is_empty() {
                self.viewport_scroller.stop_scrolling();
            }
        }
    }

    pub fn dispose_drag(&mut self, id: DragId) -> DragDropResult<()> {
        if !self.drags.contains_key(id) {
            return Err(DragDropError::UnknownDrag(id));
        }
        self.abort_drag_artifacts(id);

        // Removing the item from its declared lists may reset a container
        // that was only dragging this item.
        let containers: Vec<DropListId> = self
            .drops
            .iter()
            .filter(|(_, list)| list.items.contains(&id))
            .map(|(container, _)| container)
            .collect();
        for container in containers {
            let items: Vec<DragId> = self.drops[container]
                .items
                .iter()
                .copied()
                .filter(|item| *item != id)
                .collect();
            let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
            if self.drops[container].set_items(&ctx, items) {
                self.release_siblings(container);
            }
        }

        self.registry.remove_drag(&*self.host, id);
        if let Some(drag) = self.drags.remove(id) {
            drag.events.complete_all();
        }
        debug!(drag = ?id, "drag item disposed");
        Ok(())
    }

    // ========================================================================
    // Drop containers
    // ========================================================================

    fn insert_drop_list(&mut self, element: NodeId, kind: ContainerKind) -> DragDropResult<DropListId> {
        let scroller = AutoScroller::new(
            self.host.clone(),
            self.frames.clone(),
            self.config.auto_scroll_step,
            self.config.scroll_proximity_threshold,
            self.config.drop_proximity_threshold,
        );
        let id = self
            .drops
            .insert_with_key(|id| DropListRef::new(id, element, kind, scroller));

        if let Err(err) = self.registry.register_drop_container(id, element) {
            self.drops.remove(id);
            return Err(err);
        }
        self.drops[id].direction = self.host.direction();
        debug!(container = ?id, ?element, ?kind, "drop container created");
        Ok(id)
    }

    pub fn create_drop_list(&mut self, element: NodeId, orientation: Orientation) -> DragDropResult<DropListId> {
        self.insert_drop_list(element, ContainerKind::List(orientation))
    }

    pub fn create_grid_drop_list(&mut self, element: NodeId, flow: GridFlow) -> DragDropResult<DropListId> {
        self.insert_drop_list(element, ContainerKind::Grid(flow))
    }

    /// Declare the members of a container in content order. Each member now
    /// belongs to the container.
    pub fn set_items(&mut self, id: DropListId, items: Vec<DragId>) -> DragDropResult<()> {
        if !self.drops.contains_key(id) {
            return Err(DragDropError::UnknownDropList(id));
        }
        if let Some(unknown) = items.iter().find(|item| !self.drags.contains_key(**item)) {
            return Err(DragDropError::UnknownDrag(*unknown));
        }

        for (item, drag) in self.drags.iter_mut() {
            if drag.is_dragging() {
                continue;
            }
            if items.contains(&item) {
                drag.drop_container = Some(id);
            } else if drag.drop_container == Some(id) {
                drag.drop_container = None;
            }
        }

        let ctx = SortContext::new(&*self.host, &self.drags, &self.registry);
        if self.drops[id].set_items(&ctx, items) {
            self.release_siblings(id);
        }
        Ok(())
    }

    /// Containers that items of `id` may be moved into. Self-references are
    /// dropped.
    pub fn connect_to(
        &mut self,
        id: DropListId,
        targets: impl IntoIterator<Item = DropListId>,
    ) -> DragDropResult<()> {
        let targets: IndexSet<DropListId> = targets.into_iter().filter(|t| *t != id).collect();
        if let Some(unknown) = targets.iter().find(|t| !self.drops.contains_key(**t)) {
            return Err(DragDropError::UnknownDropList(*unknown));
        }
        let list = self.drops.get_mut(id).ok_or(DragDropError::UnknownDropList(id))?;
        list.connected_to = targets;
        Ok(())
    }

    pub fn create_group(&mut self) -> GroupId {
        self.groups.insert(IndexSet::new())
    }

    /// Connect `id` with every other member of `group`. A container belongs
    /// to at most one group.
    pub fn add_to_group(&mut self, group: GroupId, id: DropListId) -> DragDropResult<()> {
        if !self.groups.contains_key(group) {
            return Err(DragDropError::Config(format!("unknown group {group:?}")));
        }
        let list = self.drops.get_mut(id).ok_or(DragDropError::UnknownDropList(id))?;
        let previous = list.group.replace(group);
        if let Some(previous) = previous.and_then(|p| self.groups.get_mut(p)) {
            previous.shift_remove(&id);
        }
        self.groups[group].insert(id);
        Ok(())
    }

    pub fn remove_from_group(&mut self, id: DropListId) -> DragDropResult<()> {
        let list = self.drops.get_mut(id).ok_or(DragDropError::UnknownDropList(id))?;
        if let Some(members) = list.group.take().and_then(|g| self.groups.get_mut(g)) {
            members.shift_remove(&id);
        }
        Ok(())
    }

    pub fn dispose_drop_list(&mut self, id: DropListId) -> DragDropResult<()> {
        if !self.drops.contains_key(id) {
            return Err(DragDropError::UnknownDropList(id));
        }

        // Gestures in flight inside the container cannot finish.
        let stranded: Vec<DragId> = self
            .drags
            .iter()
            .filter(|(_, drag)| drag.drop_container == Some(id) && !drag.gesture.is_idle())
            .map(|(item, _)| item)
            .collect();
        for item in stranded {
            self.abort_drag_artifacts(item);
        }
        self.reset_container(id);

        for (_, drag) in self.drags.iter_mut() {
            if drag.drop_container == Some(id) {
                drag.drop_container = None;
            }
            if drag.initial_container == Some(id) {
                drag.initial_container = None;
            }
        }
        for (_, other) in self.drops.iter_mut() {
            other.connected_to.shift_remove(&id);
            other.siblings.retain(|s| *s != id);
            other.stop_receiving(id);
        }
        let _ = self.remove_from_group(id);

        self.registry.remove_drop_container(id);
        if let Some(mut list) = self.drops.remove(id) {
            list.dispose();
        }
        debug!(container = ?id, "drop container disposed");
        Ok(())
    }

    // ========================================================================
    // Resizables
    // ========================================================================

    /// Make `element` (or the closest ancestor matching `root_selector`)
    /// resizable.
    pub fn create_resizable(&mut self, element: NodeId, root_selector: Option<&str>) -> DragDropResult<ResizeId> {
        let root = self.resolve_root(element, root_selector)?;
        let limits = ResizeLimits::new(self.config.min_resize_size);
        let id = self
            .resizes
            .insert_with_key(|id| ResizeRef::new(id, element, root, limits));
        self.registry.register_resizable(&*self.host, id);
        debug!(resizable = ?id, ?root, "resizable created");
        Ok(id)
    }

    pub fn dispose_resizable(&mut self, id: ResizeId) -> DragDropResult<()> {
        let resizable = self.resizes.remove(id).ok_or(DragDropError::UnknownResizable(id))?;
        if let Some(session) = resizable.session {
            match session.preview {
                Some(preview) => self.host.remove_node(preview),
                None if resizable.gesture.has_started() => {
                    self.host.set_size(resizable.root, session.start_rect.size());
                    self.host.set_transform(
                        resizable.root,
                        (resizable.offset != Point::ZERO).then_some(resizable.offset),
                    );
                }
                None => {}
            }
        }
        self.registry.remove_resizable(&*self.host, id);
        resizable.events.complete_all();
        debug!(resizable = ?id, "resizable disposed");
        Ok(())
    }

    // ========================================================================
    // Host notifications
    // ========================================================================

    /// The viewport changed size: pull idle free-dragged items with a
    /// boundary back inside it.
    pub fn handle_viewport_resize(&mut self) {
        let candidates: Vec<(DragId, NodeId, NodeId, Point)> = self
            .drags
            .iter()
            .filter(|(_, drag)| !drag.is_dragging() && drag.passive_transform != Point::ZERO)
            .filter_map(|(id, drag)| Some((id, drag.root, drag.boundary?, drag.passive_transform)))
            .collect();

        for (id, root, boundary, passive) in candidates {
            let element = self.host.client_rect(root);
            let boundary = self.host.client_rect(boundary);
            if let Some(contained) = contain_inside_boundary(passive, &element, &boundary) {
                debug!(drag = ?id, x = contained.x, y = contained.y, "contained inside boundary");
                let _ = self.set_free_drag_position(id, contained);
            }
        }
    }

    /// The host's layout direction changed.
    pub fn handle_direction_change(&mut self, direction: Direction) {
        for (_, list) in self.drops.iter_mut() {
            list.direction = direction;
        }
    }

    /// Tear everything down: every gesture, controller and container, every
    /// listener and every notification stream.
    pub fn dispose(&mut self) {
        let drags: Vec<DragId> = self.drags.keys().collect();
        for id in drags {
            let _ = self.dispose_drag(id);
        }
        let resizes: Vec<ResizeId> = self.resizes.keys().collect();
        for id in resizes {
            let _ = self.dispose_resizable(id);
        }
        let drops: Vec<DropListId> = self.drops.keys().collect();
        for id in drops {
            let _ = self.dispose_drop_list(id);
        }
        self.groups.clear();
        self.viewport_scroller.stop_scrolling();
        self.frames.clear();
        self.registry.dispose(&*self.host);
        self.perf.log_summary();
        debug!("drag/drop context disposed");
    }
}
