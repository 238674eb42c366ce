//! Resize controller.
//!
//! Resizing reuses the drag machinery (pointer-down arming, dead-zone,
//! registry listeners) but interprets pointer travel as a change of the
//! element's edges through one of eight discrete handles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::events::ResizeEvents;
use crate::geometry::{Point, Rect, Size};
use crate::input::GestureState;
use crate::types::{NodeId, ResizeId, TemplateRef};

/// Edge or corner a resize is driven from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Top,
        ResizeHandle::Right,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    pub fn is_corner(self) -> bool {
        (self.moves_left() || self.moves_right()) && (self.moves_top() || self.moves_bottom())
    }
}

/// Size limits of a resizable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeLimits {
    pub min: Size,
    pub max: Option<Size>,
    /// Keep width / height at the value it had when the gesture started.
    pub preserve_aspect_ratio: bool,
}

impl ResizeLimits {
    pub fn new(min_size: f64) -> Self {
        Self {
            min: Size::new(min_size, min_size),
            max: None,
            preserve_aspect_ratio: false,
        }
    }

    fn clamp_width(&self, width: f64) -> f64 {
        let width = width.max(self.min.width);
        match self.max {
            Some(max) => width.min(max.width.max(self.min.width)),
            None => width,
        }
    }

    fn clamp_height(&self, height: f64) -> f64 {
        let height = height.max(self.min.height);
        match self.max {
            Some(max) => height.min(max.height.max(self.min.height)),
            None => height,
        }
    }
}

/// Compute the rect produced by dragging `handle` by `distance`.
///
/// Steps: move the handle's edges, apply the size limits, restore the aspect
/// ratio if requested, then shrink the moving edges back inside `boundary`.
/// Edges the handle does not move stay anchored.
pub fn compute_resized_rect(
    start: &Rect,
    handle: ResizeHandle,
    distance: Point,
    limits: &ResizeLimits,
    boundary: Option<&Rect>,
) -> Rect {
    let mut width = start.width;
    let mut height = start.height;

    if handle.moves_left() {
        width -= distance.x;
    } else if handle.moves_right() {
        width += distance.x;
    }
    if handle.moves_top() {
        height -= distance.y;
    } else if handle.moves_bottom() {
        height += distance.y;
    }

    width = limits.clamp_width(width);
    height = limits.clamp_height(height);

    let ratio = (start.height > 0.0).then(|| start.width / start.height);
    if let (true, Some(ratio)) = (limits.preserve_aspect_ratio, ratio) {
        (width, height) = apply_aspect_ratio(handle, start, width, height, ratio, limits);
    }

    let mut rect = anchor(start, handle, width, height);

    if let Some(boundary) = boundary {
        let mut clipped = false;
        if handle.moves_left() && rect.left < boundary.left {
            rect.width -= boundary.left - rect.left;
            rect.left = boundary.left;
            clipped = true;
        }
        if (handle.moves_right() || !handle.moves_left()) && rect.right() > boundary.right() {
            rect.width -= rect.right() - boundary.right();
            clipped = true;
        }
        if handle.moves_top() && rect.top < boundary.top {
            rect.height -= boundary.top - rect.top;
            rect.top = boundary.top;
            clipped = true;
        }
        if (handle.moves_bottom() || !handle.moves_top()) && rect.bottom() > boundary.bottom() {
            rect.height -= rect.bottom() - boundary.bottom();
            clipped = true;
        }
        if clipped {
            if let (true, Some(ratio)) = (limits.preserve_aspect_ratio, ratio) {
                // Shrink whichever side is now too long for the ratio.
                if rect.width / rect.height > ratio {
                    rect.width = rect.height * ratio;
                } else {
                    rect.height = rect.width / ratio;
                }
                rect = anchor_to(&rect, start, handle);
            }
        }
    }

    rect
}

fn apply_aspect_ratio(
    handle: ResizeHandle,
    start: &Rect,
    width: f64,
    height: f64,
    ratio: f64,
    limits: &ResizeLimits,
) -> (f64, f64) {
    let horizontal = handle.moves_left() || handle.moves_right();
    let vertical = handle.moves_top() || handle.moves_bottom();

    let width_driven = if horizontal && vertical {
        let dw = (width - start.width).abs() / start.width.max(f64::EPSILON);
        let dh = (height - start.height).abs() / start.height.max(f64::EPSILON);
        dw >= dh
    } else {
        horizontal
    };

    if width_driven {
        let height = limits.clamp_height(width / ratio);
        (height * ratio, height)
    } else {
        let width = limits.clamp_width(height * ratio);
        (width, width / ratio)
    }
}

/// Place a `width` x `height` rect so the edges `handle` does not move stay
/// where they were in `start`.
fn anchor(start: &Rect, handle: ResizeHandle, width: f64, height: f64) -> Rect {
    let left = if handle.moves_left() {
        start.right() - width
    } else {
        start.left
    };
    let top = if handle.moves_top() {
        start.bottom() - height
    } else {
        start.top
    };
    Rect::new(left, top, width, height)
}

fn anchor_to(rect: &Rect, start: &Rect, handle: ResizeHandle) -> Rect {
    anchor(start, handle, rect.width, rect.height)
}

pub struct ResizeRef {
    pub(crate) id: ResizeId,
    pub(crate) element: NodeId,
    pub(crate) root: NodeId,
    pub(crate) handles: IndexMap<ResizeHandle, NodeId>,
    pub(crate) limits: ResizeLimits,
    pub(crate) boundary: Option<NodeId>,
    pub(crate) use_preview: bool,
    pub(crate) preview_template: Option<TemplateRef>,
    pub(crate) disabled: bool,
    /// Translation committed by earlier resizes from the top or left.
    pub(crate) offset: Point,
    pub(crate) gesture: GestureState,
    pub(crate) session: Option<ResizeSession>,
    pub events: ResizeEvents,
}

/// State of one resize gesture, from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResizeSession {
    pub handle: ResizeHandle,
    pub start_rect: Rect,
    pub boundary_rect: Option<Rect>,
    pub preview: Option<NodeId>,
    pub current: Rect,
}

impl std::fmt::Debug for ResizeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeRef")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("handles", &self.handles)
            .field("limits", &self.limits)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

impl ResizeRef {
    pub(crate) fn new(id: ResizeId, element: NodeId, root: NodeId, limits: ResizeLimits) -> Self {
        Self {
            id,
            element,
            root,
            handles: IndexMap::new(),
            limits,
            boundary: None,
            use_preview: false,
            preview_template: None,
            disabled: false,
            offset: Point::ZERO,
            gesture: GestureState::Idle,
            session: None,
            events: ResizeEvents::default(),
        }
    }

    pub fn id(&self) -> ResizeId {
        self.id
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn root_element(&self) -> NodeId {
        self.root
    }

    pub fn is_resizing(&self) -> bool {
        self.gesture.has_started()
    }

    pub fn handle_node(&self, handle: ResizeHandle) -> Option<NodeId> {
        self.handles.get(&handle).copied()
    }

    /// Rect the current gesture would commit.
    pub fn current_rect(&self) -> Option<Rect> {
        self.session.map(|s| s.current)
    }

    /// Translation the root carries from resizes that moved its origin.
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn limits(&self) -> &ResizeLimits {
        &self.limits
    }

    pub fn with_handle(&mut self, handle: ResizeHandle, node: NodeId) -> &mut Self {
        self.handles.insert(handle, node);
        self
    }

    pub fn without_handle(&mut self, handle: ResizeHandle) -> &mut Self {
        self.handles.shift_remove(&handle);
        self
    }

    pub fn with_min_size(&mut self, min: Size) -> &mut Self {
        self.limits.min = min;
        self
    }

    pub fn with_max_size(&mut self, max: Option<Size>) -> &mut Self {
        self.limits.max = max;
        self
    }

    pub fn with_preserve_aspect_ratio(&mut self, preserve: bool) -> &mut Self {
        self.limits.preserve_aspect_ratio = preserve;
        self
    }

    /// The element must stay inside `boundary`.
    pub fn with_boundary(&mut self, boundary: Option<NodeId>) -> &mut Self {
        self.boundary = boundary;
        self
    }

    /// Resize a preview and commit to the element only on release.
    pub fn with_preview(&mut self, use_preview: bool, template: Option<TemplateRef>) -> &mut Self {
        self.use_preview = use_preview;
        self.preview_template = template;
        self
    }

    pub fn with_disabled(&mut self, disabled: bool) -> &mut Self {
        self.disabled = disabled;
        self
    }

    /// Handle whose node is, or contains, the pointer-down target.
    pub(crate) fn target_handle(
        &self,
        target: Option<NodeId>,
        contains: impl Fn(NodeId, NodeId) -> bool,
    ) -> Option<ResizeHandle> {
        let target = target?;
        self.handles
            .iter()
            .find(|(_, node)| **node == target || contains(**node, target))
            .map(|(handle, _)| *handle)
    }
}
