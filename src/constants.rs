//! Engine-wide constants.
//!
//! Centralizes thresholds and step sizes so the defaults in
//! [`crate::DragDropConfig`] are self-documenting.

// ============================================================================
// Gesture Thresholds
// ============================================================================

/// Manhattan distance in pixels the pointer must travel before a pointer-down
/// becomes a drag (clicks stay clicks).
pub const DRAG_START_THRESHOLD: f64 = 5.0;

/// Pixels the pointer must travel along an axis before the reported movement
/// direction on that axis flips.
pub const POINTER_DIRECTION_CHANGE_THRESHOLD: f64 = 5.0;

/// Default delay before a mouse drag may start, in milliseconds.
pub const DRAG_START_DELAY_MOUSE_MS: f64 = 0.0;

/// Default delay before a touch drag may start, in milliseconds.
pub const DRAG_START_DELAY_TOUCH_MS: f64 = 0.0;

// ============================================================================
// Proximity Bands
// ============================================================================

/// Fraction of a container's size by which its rect is grown when deciding
/// whether the pointer is close enough to sort.
pub const DROP_PROXIMITY_THRESHOLD: f64 = 0.05;

/// Fraction of a viewport/container size that forms the auto-scroll band on
/// each edge.
pub const SCROLL_PROXIMITY_THRESHOLD: f64 = 0.05;

// ============================================================================
// Auto-Scroll
// ============================================================================

/// Pixels scrolled per axis on every animation frame.
pub const AUTO_SCROLL_STEP: f64 = 2.0;

// ============================================================================
// Resizing
// ============================================================================

/// Minimum width/height a resizable can be shrunk to.
pub const MIN_RESIZE_SIZE: f64 = 20.0;

/// Target frame time for 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;
