//! Property tests for the resize and pointer-constraint math.

use proptest::prelude::*;

use dragkit::geometry::{Point, Rect, Size};
use dragkit::input::coords::{constrain_pointer_position, Constraints};
use dragkit::resize::{compute_resized_rect, ResizeHandle, ResizeLimits};

const EPS: f64 = 1e-6;

fn handle_strategy() -> impl Strategy<Value = ResizeHandle> {
    (0..ResizeHandle::ALL.len()).prop_map(|i| ResizeHandle::ALL[i])
}

fn inside(outer: &Rect, inner: &Rect) -> bool {
    inner.left >= outer.left - EPS
        && inner.top >= outer.top - EPS
        && inner.right() <= outer.right() + EPS
        && inner.bottom() <= outer.bottom() + EPS
}

proptest! {
    #[test]
    fn resized_rect_respects_size_limits(
        left in 0.0f64..500.0,
        top in 0.0f64..500.0,
        width in 20.0f64..300.0,
        height in 20.0f64..300.0,
        dx in -400.0f64..400.0,
        dy in -400.0f64..400.0,
        handle in handle_strategy(),
    ) {
        let start = Rect::new(left, top, width, height);
        let limits = ResizeLimits {
            min: Size::new(20.0, 20.0),
            max: Some(Size::new(350.0, 350.0)),
            preserve_aspect_ratio: false,
        };
        let rect = compute_resized_rect(&start, handle, Point::new(dx, dy), &limits, None);

        prop_assert!(rect.width >= 20.0 - EPS && rect.width <= 350.0 + EPS);
        prop_assert!(rect.height >= 20.0 - EPS && rect.height <= 350.0 + EPS);
    }

    #[test]
    fn resized_rect_keeps_opposite_edges_anchored(
        width in 20.0f64..300.0,
        height in 20.0f64..300.0,
        dx in -400.0f64..400.0,
        dy in -400.0f64..400.0,
        handle in handle_strategy(),
    ) {
        let start = Rect::new(200.0, 200.0, width, height);
        let rect = compute_resized_rect(&start, handle, Point::new(dx, dy), &ResizeLimits::new(20.0), None);

        if handle.moves_left() {
            prop_assert!((rect.right() - start.right()).abs() < EPS);
        } else {
            prop_assert_eq!(rect.left, start.left);
        }
        if handle.moves_top() {
            prop_assert!((rect.bottom() - start.bottom()).abs() < EPS);
        } else {
            prop_assert_eq!(rect.top, start.top);
        }
    }

    #[test]
    fn resized_rect_stays_inside_boundary(
        left in 100.0f64..400.0,
        top in 100.0f64..400.0,
        width in 20.0f64..300.0,
        height in 20.0f64..300.0,
        dx in -800.0f64..800.0,
        dy in -800.0f64..800.0,
        handle in handle_strategy(),
    ) {
        let boundary = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let start = Rect::new(left, top, width, height);
        let rect = compute_resized_rect(
            &start,
            handle,
            Point::new(dx, dy),
            &ResizeLimits::new(20.0),
            Some(&boundary),
        );

        prop_assert!(inside(&boundary, &rect), "{rect:?} escaped {boundary:?}");
    }

    #[test]
    fn constrained_preview_stays_inside_boundary(
        x in -500.0f64..1500.0,
        y in -500.0f64..1500.0,
        pickup_x in 0.0f64..100.0,
        pickup_y in 0.0f64..40.0,
    ) {
        let boundary = Rect::new(100.0, 100.0, 600.0, 400.0);
        let size = Size::new(100.0, 40.0);
        let pickup_in_element = Point::new(pickup_x, pickup_y);
        let constraints = Constraints {
            constrain: None,
            lock_axis: None,
            pickup_position: Point::new(300.0, 300.0),
            pickup_in_element,
            boundary: Some(boundary),
            preview_size: size,
        };

        let point = constrain_pointer_position(Point::new(x, y), &constraints);
        let preview = Rect::from_origin_size(point.delta_from(pickup_in_element), size);
        prop_assert!(inside(&boundary, &preview), "{preview:?} escaped {boundary:?}");
    }
}
