//! Pointer coordinate math for drag gestures.
//!
//! Centralizes the constrain/axis-lock/boundary pipeline so free drags and
//! contained drags use the same formulas.

use crate::geometry::{clamp, Point, Rect, Size};
use crate::types::Axis;

/// Everything that can restrict where the pointer is considered to be.
pub struct Constraints<'a> {
    /// User hook applied first.
    pub constrain: Option<&'a dyn Fn(Point) -> Point>,
    /// Item lock, falling back to the container lock.
    pub lock_axis: Option<Axis>,
    pub pickup_position: Point,
    pub pickup_in_element: Point,
    pub boundary: Option<Rect>,
    /// Size of whatever follows the pointer (preview or root).
    pub preview_size: Size,
}

/// Apply the constrain hook, then the axis lock, then the boundary clamp.
///
/// The boundary clamp keeps the whole preview inside the boundary, given
/// where inside the element it was picked up.
pub fn constrain_pointer_position(point: Point, constraints: &Constraints<'_>) -> Point {
    let Point { mut x, mut y } = match constraints.constrain {
        Some(constrain) => constrain(point),
        None => point,
    };

    match constraints.lock_axis {
        Some(Axis::X) => y = constraints.pickup_position.y,
        Some(Axis::Y) => x = constraints.pickup_position.x,
        None => {}
    }

    if let Some(boundary) = constraints.boundary {
        let pickup = constraints.pickup_in_element;
        let Size { width, height } = constraints.preview_size;

        let min_y = boundary.top + pickup.y;
        let max_y = boundary.bottom() - (height - pickup.y);
        let min_x = boundary.left + pickup.x;
        let max_x = boundary.right() - (width - pickup.x);

        x = clamp(x, min_x, max_x);
        y = clamp(y, min_y, max_y);
    }

    Point::new(x, y)
}

/// Where inside `element_rect` the pointer grabbed it.
#[inline]
pub fn pointer_in_element(pointer: Point, element_rect: &Rect) -> Point {
    pointer.delta_from(element_rect.origin())
}

/// Passive transform that pulls a free-dragged element back inside its
/// boundary after the viewport resized. Returns `None` if nothing changes.
///
/// An element larger than its boundary on an axis is reset to 0 on that axis.
pub fn contain_inside_boundary(passive: Point, element: &Rect, boundary: &Rect) -> Option<Point> {
    if (boundary.width == 0.0 && boundary.height == 0.0)
        || (element.width == 0.0 && element.height == 0.0)
    {
        return None;
    }

    let left_overflow = boundary.left - element.left;
    let right_overflow = element.right() - boundary.right();
    let top_overflow = boundary.top - element.top;
    let bottom_overflow = element.bottom() - boundary.bottom();

    let Point { mut x, mut y } = passive;

    if boundary.width > element.width {
        if left_overflow > 0.0 {
            x += left_overflow;
        }
        if right_overflow > 0.0 {
            x -= right_overflow;
        }
    } else {
        x = 0.0;
    }

    if boundary.height > element.height {
        if top_overflow > 0.0 {
            y += top_overflow;
        }
        if bottom_overflow > 0.0 {
            y -= bottom_overflow;
        }
    } else {
        y = 0.0;
    }

    let contained = Point::new(x, y);
    (contained != passive).then_some(contained)
}
