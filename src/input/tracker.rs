//! Per-gesture pointer bookkeeping: pickup position, dead-zone and start
//! delay, and the coarse direction the pointer is heading in.

use crate::geometry::Point;
use crate::types::{PointerDelta, PointerEvent, PointerKind};

/// Outcome of testing a move against the start dead-zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdCheck {
    /// Still inside the dead-zone.
    Pending,
    /// Past the dead-zone and the start delay has elapsed.
    Passed,
    /// Past the dead-zone before the delay elapsed; the sequence is aborted.
    TooEarly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    pub kind: PointerKind,
    /// Pointer position at pointer-down, shifted by scrolling since.
    pub pickup_position: Point,
    pub pointer_down_at: f64,
    pub start_delay_ms: f64,
    /// Last raw (unconstrained) pointer position.
    pub last_position: Point,
    pub direction_delta: PointerDelta,
    /// Position at which `direction_delta` last changed, per axis.
    direction_anchor: Point,
}

impl PointerTracker {
    pub fn new(event: &PointerEvent, start_delay_ms: f64) -> Self {
        Self {
            kind: event.kind,
            pickup_position: event.position,
            pointer_down_at: event.timestamp_ms,
            start_delay_ms,
            last_position: event.position,
            direction_delta: PointerDelta::NONE,
            direction_anchor: event.position,
        }
    }

    /// Manhattan distance from the pickup position against `threshold`.
    pub fn check_threshold(&self, position: Point, timestamp_ms: f64, threshold: f64) -> ThresholdCheck {
        let distance_x = (position.x - self.pickup_position.x).abs();
        let distance_y = (position.y - self.pickup_position.y).abs();

        if distance_x + distance_y < threshold {
            return ThresholdCheck::Pending;
        }
        if timestamp_ms >= self.pointer_down_at + self.start_delay_ms {
            ThresholdCheck::Passed
        } else {
            ThresholdCheck::TooEarly
        }
    }

    /// Update the coarse direction. An axis only flips after the pointer
    /// travelled more than `threshold` pixels since its last change.
    pub fn update_direction_delta(&mut self, position: Point, threshold: f64) -> PointerDelta {
        let anchor = &mut self.direction_anchor;
        let delta = &mut self.direction_delta;

        if (position.x - anchor.x).abs() > threshold {
            delta.x = if position.x > anchor.x { 1 } else { -1 };
            anchor.x = position.x;
        }
        if (position.y - anchor.y).abs() > threshold {
            delta.y = if position.y > anchor.y { 1 } else { -1 };
            anchor.y = position.y;
        }
        *delta
    }

    /// Distance of `position` from the pickup position.
    pub fn distance(&self, position: Point) -> Point {
        position.delta_from(self.pickup_position)
    }

    /// Shift the pickup position by a scroll difference.
    pub fn shift(&mut self, top: f64, left: f64) {
        self.pickup_position.x += left;
        self.pickup_position.y += top;
    }
}
