//! Bounding-rectangle math shared by drag controllers, drop containers and the
//! auto-scroller.
//!
//! Rectangles are expressed in viewport (client) coordinates. Cached copies are
//! adjusted in place after reorders and scrolls instead of being re-measured.

use serde::{Deserialize, Serialize};

/// A 2-D point in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn delta_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// A mutable client rectangle.
///
/// `right` and `bottom` are derived from `left`/`top` plus the size, so
/// translating a rect can never leave it internally inconsistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Rect covering the viewport, anchored at the origin.
    pub fn from_viewport(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Inclusive containment test used for drop-target resolution.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        y >= self.top && y <= self.bottom() && x >= self.left && x <= self.right()
    }

    /// Whether `other` lies entirely within this rect.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shift the rect by a scroll or reorder difference.
    #[inline]
    pub fn adjust(&mut self, top: f64, left: f64) {
        self.top += top;
        self.left += left;
    }

    /// Whether the pointer is inside the rect grown by `threshold` (a fraction
    /// of the rect's own width/height) on every side. The comparison is strict.
    pub fn is_pointer_near(&self, threshold: f64, x: f64, y: f64) -> bool {
        let x_threshold = self.width * threshold;
        let y_threshold = self.height * threshold;

        y > self.top - y_threshold
            && y < self.bottom() + y_threshold
            && x > self.left - x_threshold
            && x < self.right() + x_threshold
    }
}

/// Vertical auto-scroll direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalScroll {
    #[default]
    None,
    Up,
    Down,
}

/// Horizontal auto-scroll direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalScroll {
    #[default]
    None,
    Left,
    Right,
}

/// Classify the pointer against the top/bottom proximity bands of `rect`.
///
/// A band spans `height * threshold` on both sides of an edge; anything
/// strictly between the two inner band edges is `None`.
pub fn vertical_scroll_direction(rect: &Rect, threshold: f64, y: f64) -> VerticalScroll {
    let y_threshold = rect.height * threshold;

    if y >= rect.top - y_threshold && y <= rect.top + y_threshold {
        VerticalScroll::Up
    } else if y >= rect.bottom() - y_threshold && y <= rect.bottom() + y_threshold {
        VerticalScroll::Down
    } else {
        VerticalScroll::None
    }
}

/// Classify the pointer against the left/right proximity bands of `rect`.
pub fn horizontal_scroll_direction(rect: &Rect, threshold: f64, x: f64) -> HorizontalScroll {
    let x_threshold = rect.width * threshold;

    if x >= rect.left - x_threshold && x <= rect.left + x_threshold {
        HorizontalScroll::Left
    } else if x >= rect.right() - x_threshold && x <= rect.right() + x_threshold {
        HorizontalScroll::Right
    } else {
        HorizontalScroll::None
    }
}

/// Scroll extents of a scrollable node (or the document).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.scroll_left, self.scroll_top)
    }
}

/// Directions a scrollable element can actually move in, given where the
/// pointer sits relative to its edges. Edges that are already fully scrolled
/// resolve to `None`.
pub fn element_scroll_directions(
    metrics: &ScrollMetrics,
    rect: &Rect,
    threshold: f64,
    x: f64,
    y: f64,
) -> (VerticalScroll, HorizontalScroll) {
    let mut vertical = VerticalScroll::None;
    let mut horizontal = HorizontalScroll::None;

    match vertical_scroll_direction(rect, threshold, y) {
        VerticalScroll::Up if metrics.scroll_top > 0.0 => vertical = VerticalScroll::Up,
        VerticalScroll::Down
            if metrics.scroll_height - metrics.scroll_top > metrics.client_height =>
        {
            vertical = VerticalScroll::Down
        }
        _ => {}
    }

    match horizontal_scroll_direction(rect, threshold, x) {
        HorizontalScroll::Left if metrics.scroll_left > 0.0 => {
            horizontal = HorizontalScroll::Left
        }
        HorizontalScroll::Right
            if metrics.scroll_width - metrics.scroll_left > metrics.client_width =>
        {
            horizontal = HorizontalScroll::Right
        }
        _ => {}
    }

    (vertical, horizontal)
}

/// Clamp that tolerates `min > max` by preferring `min` (boundaries smaller
/// than the item being dragged).
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
