//! Scroll positions of the document and of scrollable ancestors, captured
//! when a gesture starts.
//!
//! On every scroll event the difference to the cached position is computed
//! and cached rectangles inside the scrolled node are shifted by it, so
//! nothing has to be re-measured mid-gesture.

use indexmap::IndexMap;

use crate::geometry::{Point, Rect};
use crate::host::Host;
use crate::types::{NodeId, ScrollTarget};

#[derive(Debug, Clone, Copy, PartialEq)]
struct CachedScroll {
    scroll_position: Point,
    /// Client rect of the node. `None` for the document.
    client_rect: Option<Rect>,
}

/// Scroll difference reported by [`ParentPositionTracker::handle_scroll`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollDifference {
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Default)]
pub struct ParentPositionTracker {
    positions: IndexMap<ScrollTarget, CachedScroll>,
}

impl ParentPositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the document scroll position plus the scroll position and
    /// client rect of each element.
    pub fn cache(&mut self, host: &dyn Host, elements: &[NodeId]) {
        self.clear();
        self.positions.insert(
            ScrollTarget::Document,
            CachedScroll {
                scroll_position: host.viewport_scroll_position(),
                client_rect: None,
            },
        );
        for &element in elements {
            self.positions.insert(
                ScrollTarget::Node(element),
                CachedScroll {
                    scroll_position: host.scroll_metrics(ScrollTarget::Node(element)).position(),
                    client_rect: Some(host.client_rect(element)),
                },
            );
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Cached client rect of a tracked element.
    pub fn client_rect(&self, element: NodeId) -> Option<Rect> {
        self.positions
            .get(&ScrollTarget::Node(element))
            .and_then(|p| p.client_rect)
    }

    /// Tracked elements with their cached client rects, in caching order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.positions.iter().filter_map(|(target, cached)| match (target, cached.client_rect) {
            (ScrollTarget::Node(node), Some(rect)) => Some((*node, rect)),
            _ => None,
        })
    }

    /// Account for a scroll of `target`. Returns `None` when the target is
    /// not tracked.
    pub fn handle_scroll(&mut self, host: &dyn Host, target: ScrollTarget) -> Option<ScrollDifference> {
        let cached = self.positions.get(&target)?.scroll_position;
        let current = match target {
            ScrollTarget::Document => host.viewport_scroll_position(),
            ScrollTarget::Node(_) => host.scroll_metrics(target).position(),
        };

        let top = cached.y - current.y;
        let left = cached.x - current.x;

        for (tracked, position) in self.positions.iter_mut() {
            let ScrollTarget::Node(node) = *tracked else {
                continue;
            };
            let Some(rect) = position.client_rect.as_mut() else {
                continue;
            };
            let inside = match target {
                ScrollTarget::Document => true,
                ScrollTarget::Node(scrolled) => scrolled != node && host.contains(scrolled, node),
            };
            if inside {
                rect.adjust(top, left);
            }
        }

        if let Some(position) = self.positions.get_mut(&target) {
            position.scroll_position = current;
        }
        Some(ScrollDifference { top, left })
    }
}
