//! Core types for the drag/drop engine.
//!
//! Identifiers for engine-owned objects, host node handles, layout enums and
//! the raw pointer events the host adapter forwards.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

// ============================================================================
// Engine Identifiers
// ============================================================================

new_key_type! {
    /// Handle of a drag controller owned by [`crate::DragDrop`].
    pub struct DragId;

    /// Handle of a drop container owned by [`crate::DragDrop`].
    pub struct DropListId;

    /// Handle of a resize controller owned by [`crate::DragDrop`].
    pub struct ResizeId;

    /// Handle of a group of connected drop containers.
    pub struct GroupId;
}

/// A controller that can own a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureId {
    Drag(DragId),
    Resize(ResizeId),
}

// ============================================================================
// Host Handles
// ============================================================================

/// Opaque handle of a node in the host's element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Opaque handle of a preview/placeholder template known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateRef(pub u64);

/// What kind of node a selector lookup resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Document,
}

/// Result of resolving a root selector against the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedNode {
    pub node: NodeId,
    pub kind: NodeKind,
}

/// Something that can be scrolled: the document/viewport or a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollTarget {
    Document,
    Node(NodeId),
}

// ============================================================================
// Layout
// ============================================================================

/// Axis an item can be locked to while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Axis along which a list container lays out its items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Bidirectional text direction of the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Visual ordering of grid cells when caching positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridFlow {
    /// Cells fill rows: ordered by top, then left.
    #[default]
    Row,
    /// Cells fill columns: ordered by left, then top.
    Column,
}

// ============================================================================
// Pointer Input
// ============================================================================

/// Input device behind a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// A raw pointer event forwarded by the host adapter.
///
/// `position` is in viewport (client) coordinates and `timestamp_ms` is the
/// host's monotonic event time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Mouse button index; `0` is the primary button. Ignored for touch.
    pub button: u8,
    pub position: Point,
    pub target: Option<NodeId>,
    pub timestamp_ms: f64,
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self {
            kind: PointerKind::Mouse,
            button: 0,
            position: Point::new(x, y),
            target: None,
            timestamp_ms,
        }
    }

    pub fn touch(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self {
            kind: PointerKind::Touch,
            ..Self::mouse(x, y, timestamp_ms)
        }
    }

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_button(mut self, button: u8) -> Self {
        self.button = button;
        self
    }

    /// Whether this is a non-primary mouse button.
    pub fn is_auxiliary_button(&self) -> bool {
        self.kind == PointerKind::Mouse && self.button != 0
    }
}

/// Direction the pointer last moved in on each axis: `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerDelta {
    pub x: i8,
    pub y: i8,
}

impl PointerDelta {
    pub const NONE: PointerDelta = PointerDelta { x: 0, y: 0 };

    /// Delta component along a list orientation.
    pub fn along(&self, orientation: Orientation) -> i8 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}

/// A document scroll notification forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    pub target: ScrollTarget,
}

/// Document-level listeners the registry asks the host to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove(PointerKind),
    PointerUp(PointerKind),
    Scroll,
    SelectStart,
    /// Bound once, permanently, for platforms that only honor
    /// `preventDefault` on statically registered touch listeners.
    TouchMove,
}
