//! Drag controller state.
//!
//! A [`DragRef`] describes one draggable item: which node moves, which
//! nodes may start a drag, how movement is constrained, and the state of the
//! gesture in flight. The gesture itself is driven by [`crate::DragDrop`]
//! (see `input/`), which can reach the item's container and the registry.

use std::rc::Rc;

use indexmap::IndexSet;

use crate::config::DragStartDelay;
use crate::events::DragEvents;
use crate::geometry::{Point, Rect};
use crate::input::GestureState;
use crate::scroll_tracker::ParentPositionTracker;
use crate::types::{Axis, DragId, DropListId, NodeId, TemplateRef};

/// Maps the raw pointer position to the position the drag should use.
pub type ConstrainPosition = Rc<dyn Fn(Point) -> Point>;

/// A custom preview that follows the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewTemplate {
    pub template: Option<TemplateRef>,
    /// Size the preview like the dragged element and keep the pickup offset.
    /// Otherwise the preview is anchored at its top-left corner.
    pub match_size: bool,
}

pub struct DragRef {
    pub(crate) id: DragId,
    pub(crate) element: NodeId,
    /// Element that moves; `element` unless a root selector resolved an
    /// ancestor.
    pub(crate) root: NodeId,
    pub(crate) handles: IndexSet<NodeId>,
    pub(crate) disabled_handles: IndexSet<NodeId>,
    pub(crate) preview_template: Option<PreviewTemplate>,
    pub(crate) placeholder_template: Option<TemplateRef>,
    pub(crate) lock_axis: Option<Axis>,
    pub(crate) boundary: Option<NodeId>,
    pub(crate) disabled: bool,
    pub(crate) start_delay: DragStartDelay,
    pub(crate) constrain_position: Option<ConstrainPosition>,

    /// Container the item currently belongs to; `None` for free dragging.
    pub(crate) drop_container: Option<DropListId>,
    pub(crate) initial_container: Option<DropListId>,
    pub(crate) initial_index: usize,

    pub(crate) gesture: GestureState,
    pub(crate) pickup_in_element: Point,
    pub(crate) initial_rect: Option<Rect>,
    pub(crate) boundary_rect: Option<Rect>,
    pub(crate) preview_rect: Option<Rect>,
    pub(crate) placeholder: Option<NodeId>,
    pub(crate) preview: Option<NodeId>,
    pub(crate) parent_positions: ParentPositionTracker,

    /// Transform applied during the current free drag.
    pub(crate) active_transform: Point,
    /// Transform left over from previous free drags.
    pub(crate) passive_transform: Point,

    pub events: DragEvents,
}

impl std::fmt::Debug for DragRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragRef")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("root", &self.root)
            .field("drop_container", &self.drop_container)
            .field("gesture", &self.gesture)
            .field("active_transform", &self.active_transform)
            .field("passive_transform", &self.passive_transform)
            .finish_non_exhaustive()
    }
}

impl DragRef {
    pub(crate) fn new(id: DragId, element: NodeId, start_delay: DragStartDelay) -> Self {
        Self {
            id,
            element,
            root: element,
            handles: IndexSet::new(),
            disabled_handles: IndexSet::new(),
            preview_template: None,
            placeholder_template: None,
            lock_axis: None,
            boundary: None,
            disabled: false,
            start_delay,
            constrain_position: None,
            drop_container: None,
            initial_container: None,
            initial_index: 0,
            gesture: GestureState::Idle,
            pickup_in_element: Point::ZERO,
            initial_rect: None,
            boundary_rect: None,
            preview_rect: None,
            placeholder: None,
            preview: None,
            parent_positions: ParentPositionTracker::new(),
            active_transform: Point::ZERO,
            passive_transform: Point::ZERO,
            events: DragEvents::default(),
        }
    }

    pub fn id(&self) -> DragId {
        self.id
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    /// The node that actually moves.
    pub fn root_element(&self) -> NodeId {
        self.root
    }

    pub fn drop_container(&self) -> Option<DropListId> {
        self.drop_container
    }

    pub fn placeholder_element(&self) -> Option<NodeId> {
        self.placeholder
    }

    pub fn preview_element(&self) -> Option<NodeId> {
        self.preview
    }

    /// Whether a gesture has passed its start threshold.
    pub fn is_dragging(&self) -> bool {
        self.gesture.has_started()
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    /// Nodes that may start a drag. Empty means the whole root.
    pub(crate) fn set_handles(&mut self, handles: IndexSet<NodeId>) {
        self.handles = handles;
        self.disabled_handles.retain(|h| self.handles.contains(h));
    }

    pub fn handles(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.handles.iter().copied()
    }

    pub fn disable_handle(&mut self, handle: NodeId) -> &mut Self {
        if self.handles.contains(&handle) {
            self.disabled_handles.insert(handle);
        }
        self
    }

    pub fn enable_handle(&mut self, handle: NodeId) -> &mut Self {
        self.disabled_handles.shift_remove(&handle);
        self
    }

    pub fn with_lock_axis(&mut self, axis: Option<Axis>) -> &mut Self {
        self.lock_axis = axis;
        self
    }

    /// Keep the dragged preview inside `boundary`.
    pub fn with_boundary(&mut self, boundary: Option<NodeId>) -> &mut Self {
        self.boundary = boundary;
        self
    }

    pub fn with_disabled(&mut self, disabled: bool) -> &mut Self {
        self.disabled = disabled;
        self
    }

    pub fn with_start_delay(&mut self, delay: DragStartDelay) -> &mut Self {
        self.start_delay = delay;
        self
    }

    pub fn with_constrain_position(
        &mut self,
        constrain: impl Fn(Point) -> Point + 'static,
    ) -> &mut Self {
        self.constrain_position = Some(Rc::new(constrain));
        self
    }

    pub fn without_constrain_position(&mut self) -> &mut Self {
        self.constrain_position = None;
        self
    }

    pub fn with_preview_template(&mut self, preview: Option<PreviewTemplate>) -> &mut Self {
        self.preview_template = preview;
        self
    }

    pub fn with_placeholder_template(&mut self, template: Option<TemplateRef>) -> &mut Self {
        self.placeholder_template = template;
        self
    }

    // ------------------------------------------------------------------
    // Free-drag position
    // ------------------------------------------------------------------

    /// Current free-drag offset of the root from its layout position.
    pub fn free_drag_position(&self) -> Point {
        if self.is_dragging() {
            self.active_transform
        } else {
            self.passive_transform
        }
    }

    /// Which handle (or the root) a pointer-down on `target` grabbed.
    ///
    /// `contains(ancestor, node)` is the host's containment test.
    pub(crate) fn target_handle(
        &self,
        target: Option<NodeId>,
        contains: impl Fn(NodeId, NodeId) -> bool,
    ) -> Option<NodeId> {
        if self.handles.is_empty() {
            return Some(self.root);
        }
        let target = target?;
        let handle = self
            .handles
            .iter()
            .copied()
            .find(|handle| *handle == target || contains(*handle, target))?;
        (!self.disabled_handles.contains(&handle)).then_some(handle)
    }
}
