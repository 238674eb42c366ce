//! Collaborator interfaces the engine consumes from the host adapter.
//!
//! The engine never touches a real element tree. A framework adapter (DOM,
//! retained-mode GUI, terminal UI) implements these traits and forwards raw
//! pointer input into [`crate::DragDrop`].
//!
//! All methods take `&self`: hosts are shared element trees and use interior
//! mutability the same way a DOM handle does.

use crate::geometry::{Point, Rect, ScrollMetrics, Size};
use crate::types::{Direction, ListenerKind, NodeId, ResolvedNode, ScrollTarget, TemplateRef};

/// Measurement and mutation of host nodes.
pub trait ElementTree {
    /// Current bounding rectangle of `node` in viewport coordinates,
    /// including any transform the engine applied.
    fn client_rect(&self, node: NodeId) -> Rect;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Nearest ancestor of `node` (inclusive) matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Option<ResolvedNode>;

    /// Scrollable ancestors of `node`, nearest first.
    fn scrollable_parents(&self, _node: NodeId) -> Vec<NodeId> {
        Vec::new()
    }

    /// Apply (or clear with `None`) a translation on `node`.
    fn set_transform(&self, node: NodeId, translate: Option<Point>);

    /// Set explicit dimensions on `node`.
    fn set_size(&self, node: NodeId, size: Size);

    fn set_visible(&self, node: NodeId, visible: bool);

    /// Create a placeholder that stands in for `source` inside its container.
    fn create_placeholder(&self, source: NodeId, template: Option<TemplateRef>) -> NodeId;

    /// Create a floating preview that follows the pointer. The preview must
    /// not take part in hit testing.
    fn create_preview(&self, source: NodeId, template: Option<TemplateRef>) -> NodeId;

    fn insert_before(&self, node: NodeId, reference: NodeId);

    fn append_child(&self, parent: NodeId, node: NodeId);

    fn remove_node(&self, node: NodeId);

    fn scroll_metrics(&self, target: ScrollTarget) -> ScrollMetrics;

    fn scroll_by(&self, target: ScrollTarget, dx: f64, dy: f64);
}

/// The visible viewport.
pub trait ViewportRuler {
    fn viewport_size(&self) -> Size;

    fn viewport_scroll_position(&self) -> Point;
}

/// Layout direction of the host.
pub trait Directionality {
    fn direction(&self) -> Direction;
}

/// Document-level hit testing.
pub trait HitTester {
    /// Topmost node under a viewport coordinate, if any.
    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId>;
}

/// Binding of document-level listeners.
pub trait ListenerHost {
    fn bind_listener(&self, kind: ListenerKind);

    fn unbind_listener(&self, kind: ListenerKind);
}

/// Everything the engine needs from its host.
pub trait Host: ElementTree + ViewportRuler + Directionality + HitTester + ListenerHost {}

impl<T> Host for T where T: ElementTree + ViewportRuler + Directionality + HitTester + ListenerHost {}
