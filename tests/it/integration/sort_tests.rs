//! Sorting inside a single list or grid container.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use dragkit::events::DragDropEvent;
use dragkit::geometry::{Point, Rect, Size};
use dragkit::types::{Direction, DragId, GridFlow, Orientation};
use dragkit::DragDrop;

use crate::helpers::{
    add_grid, add_list, move_to, new_engine, release, start_drag, watch_drag, watch_list, EventLog,
    FakeDom, Layout, TestList,
};

fn vertical_three() -> (Rc<FakeDom>, DragDrop, TestList) {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 100.0, 150.0),
        Orientation::Vertical,
        Size::new(100.0, 50.0),
        3,
    );
    (dom, dd, list)
}

fn capture_drop(dd: &DragDrop, id: DragId) -> Rc<RefCell<Option<DragDropEvent>>> {
    let dropped = Rc::new(RefCell::new(None));
    let sink = dropped.clone();
    dd.drag(id)
        .unwrap()
        .events
        .dropped
        .subscribe(move |event| *sink.borrow_mut() = Some(*event));
    dropped
}

fn visual_order(dd: &DragDrop, list: &TestList) -> Vec<DragId> {
    dd.drop_list(list.id)
        .unwrap()
        .item_positions()
        .iter()
        .map(|p| p.item)
        .collect()
}

#[test]
fn test_sorting_down_one_slot() {
    let (dom, mut dd, list) = vertical_three();
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);
    let log = EventLog::new();
    watch_drag(&log, &dd, a);
    watch_list(&log, &dd, list.id, "list");
    let dropped = capture_drop(&dd, a);

    start_drag(&mut dd, a, list.nodes[0], 250.0, 225.0);
    let placeholder = dd.drag(a).unwrap().placeholder_element().unwrap();
    let preview = dd.drag(a).unwrap().preview_element().unwrap();
    assert!(!dom.is_visible(list.nodes[0]));
    assert_eq!(dom.rect(placeholder), Rect::new(200.0, 200.0, 100.0, 50.0));
    assert_eq!(dom.rect(preview), Rect::new(200.0, 200.0, 100.0, 50.0));

    move_to(&mut dd, 250.0, 280.0);

    assert_eq!(dom.transform(list.nodes[1]), Some(Point::new(0.0, -50.0)));
    assert_eq!(dom.transform(placeholder), Some(Point::new(0.0, 50.0)));
    assert_eq!(dom.transform(list.nodes[2]), None);
    assert_eq!(visual_order(&dd, &list), vec![b, a, c]);
    // The preview keeps the pickup offset under the pointer.
    assert_eq!(dom.rect(preview), Rect::new(200.0, 255.0, 100.0, 50.0));

    release(&mut dd, 250.0, 280.0);

    insta::assert_debug_snapshot!(log.entries(), @r#"
    [
        "drag.before_started",
        "drag.started",
        "list.before_started",
        "list.sorted 0->1",
        "drag.moved",
        "drag.released",
        "drag.ended",
        "drag.dropped 0->1",
        "list.dropped 0->1",
    ]
    "#);

    let event = dropped.borrow().unwrap();
    assert_eq!(event.container, list.id);
    assert_eq!(event.previous_container, list.id);
    assert!(event.is_pointer_over_container);
    assert_eq!(event.distance, Point::new(0.0, 55.0));
    assert_eq!(event.drop_point, Point::new(250.0, 280.0));

    // The tree is back to its declared state; reordering the data is up to
    // the consumer.
    assert_eq!(dom.children(list.element), list.nodes);
    assert!(dom.is_visible(list.nodes[0]));
    assert!(!dom.exists(placeholder));
    assert!(!dom.exists(preview));
    for node in &list.nodes {
        assert_eq!(dom.transform(*node), None);
    }
    assert!(!dd.drop_list(list.id).unwrap().is_dragging());
    assert!(!dd.has_active_gesture());
}

#[test]
fn test_sorting_back_to_the_original_slot_clears_offsets() {
    let (dom, mut dd, list) = vertical_three();
    let a = list.items[0];
    let log = EventLog::new();
    watch_list(&log, &dd, list.id, "list");
    let original: Vec<Rect> = list.nodes.iter().map(|n| dom.rect(*n)).collect();

    start_drag(&mut dd, a, list.nodes[0], 250.0, 225.0);
    move_to(&mut dd, 250.0, 280.0);
    move_to(&mut dd, 250.0, 210.0);

    assert_eq!(visual_order(&dd, &list), list.items);
    let positions = dd.drop_list(list.id).unwrap().item_positions().to_vec();
    for (position, rect) in positions.iter().zip(&original) {
        assert_eq!(position.offset, Point::ZERO);
        assert_eq!(position.rect, *rect);
    }
    assert_eq!(
        log.entries(),
        vec!["list.before_started", "list.sorted 0->1", "list.sorted 1->0"]
    );
}

#[test]
fn test_sort_predicate_rejects_an_index() {
    let (dom, mut dd, list) = vertical_three();
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);
    dd.drop_list_mut(list.id)
        .unwrap()
        .with_sort_predicate(|index, _, _| index != 1);
    let log = EventLog::new();
    watch_list(&log, &dd, list.id, "list");

    start_drag(&mut dd, a, list.nodes[0], 250.0, 225.0);
    move_to(&mut dd, 250.0, 280.0);
    assert_eq!(visual_order(&dd, &list), vec![a, b, c]);
    assert_eq!(dom.transform(list.nodes[1]), None);

    move_to(&mut dd, 250.0, 330.0);
    assert_eq!(visual_order(&dd, &list), vec![b, c, a]);
    assert_eq!(dom.transform(list.nodes[1]), Some(Point::new(0.0, -50.0)));
    assert_eq!(dom.transform(list.nodes[2]), Some(Point::new(0.0, -50.0)));
    assert_eq!(log.entries(), vec!["list.before_started", "list.sorted 0->2"]);
}

#[test]
fn test_sorting_disabled_keeps_the_index() {
    let (_dom, mut dd, list) = vertical_three();
    let a = list.items[0];
    dd.drop_list_mut(list.id).unwrap().with_sorting_disabled(true);
    let dropped = capture_drop(&dd, a);

    start_drag(&mut dd, a, list.nodes[0], 250.0, 225.0);
    move_to(&mut dd, 250.0, 330.0);
    release(&mut dd, 250.0, 330.0);

    let event = dropped.borrow().unwrap();
    assert_eq!((event.previous_index, event.current_index), (0, 0));
}

#[test]
fn test_pointer_outside_the_proximity_band_does_not_sort() {
    let (_dom, mut dd, list) = vertical_three();
    let log = EventLog::new();
    watch_list(&log, &dd, list.id, "list");

    start_drag(&mut dd, list.items[0], list.nodes[0], 250.0, 225.0);
    // Level with the second item, but far to the right of the list.
    move_to(&mut dd, 600.0, 280.0);

    assert_eq!(log.entries(), vec!["list.before_started"]);
}

#[test]
fn test_horizontal_list_sorts_along_x() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 300.0, 50.0),
        Orientation::Horizontal,
        Size::new(100.0, 50.0),
        3,
    );
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);

    start_drag(&mut dd, a, list.nodes[0], 250.0, 220.0);
    move_to(&mut dd, 450.0, 227.0);

    let placeholder = dd.drag(a).unwrap().placeholder_element().unwrap();
    assert_eq!(visual_order(&dd, &list), vec![b, c, a]);
    assert_eq!(dom.transform(list.nodes[1]), Some(Point::new(-100.0, 0.0)));
    assert_eq!(dom.transform(list.nodes[2]), Some(Point::new(-100.0, 0.0)));
    assert_eq!(dom.transform(placeholder), Some(Point::new(200.0, 0.0)));
}

#[test]
fn test_rtl_horizontal_indices_count_from_the_right() {
    let (dom, mut dd) = new_engine();
    dom.set_direction(Direction::Rtl);
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 300.0, 50.0),
        Orientation::Horizontal,
        Size::new(100.0, 50.0),
        3,
    );
    let a = list.items[0];
    let dropped = capture_drop(&dd, a);

    start_drag(&mut dd, a, list.nodes[0], 250.0, 220.0);
    move_to(&mut dd, 450.0, 227.0);
    release(&mut dd, 450.0, 227.0);

    let event = dropped.borrow().unwrap();
    assert_eq!((event.previous_index, event.current_index), (2, 0));
}

#[test]
fn test_grid_sorts_by_cell() {
    let (dom, mut dd) = new_engine();
    let cell = Size::new(100.0, 100.0);
    let grid = add_grid(&dom, &mut dd, Rect::new(200.0, 200.0, 300.0, 200.0), GridFlow::Row, 3, cell, 4);
    let (a, b, c, d) = (grid.items[0], grid.items[1], grid.items[2], grid.items[3]);
    let log = EventLog::new();
    watch_list(&log, &dd, grid.id, "grid");
    let dropped = capture_drop(&dd, a);

    start_drag(&mut dd, a, grid.nodes[0], 250.0, 250.0);
    let placeholder = dd.drag(a).unwrap().placeholder_element().unwrap();

    move_to(&mut dd, 450.0, 250.0);
    assert_eq!(visual_order(&dd, &grid), vec![b, c, a, d]);
    assert_eq!(dom.transform(grid.nodes[1]), Some(Point::new(-100.0, 0.0)));
    assert_eq!(dom.transform(grid.nodes[2]), Some(Point::new(-100.0, 0.0)));
    assert_eq!(dom.transform(placeholder), Some(Point::new(200.0, 0.0)));

    move_to(&mut dd, 250.0, 350.0);
    assert_eq!(visual_order(&dd, &grid), vec![b, c, d, a]);
    assert_eq!(dom.transform(grid.nodes[3]), Some(Point::new(200.0, -100.0)));
    assert_eq!(dom.transform(placeholder), Some(Point::new(0.0, 100.0)));

    release(&mut dd, 250.0, 350.0);
    assert_eq!(
        log.entries(),
        vec!["grid.before_started", "grid.sorted 0->2", "grid.sorted 2->3", "grid.dropped 0->3"]
    );
    assert_eq!(dropped.borrow().unwrap().current_index, 3);
    for node in &grid.nodes {
        assert_eq!(dom.transform(*node), None);
    }
}

#[test]
fn test_resting_on_a_taller_sibling_does_not_swap_back() {
    let (dom, mut dd) = new_engine();
    let element = dom.container(Rect::new(200.0, 200.0, 100.0, 150.0), Layout::Vertical);
    let list = dd.create_drop_list(element, Orientation::Vertical).unwrap();
    let short = dom.child(element, Size::new(100.0, 50.0));
    let tall = dom.child(element, Size::new(100.0, 100.0));
    let (a, b) = (dd.create_drag(short), dd.create_drag(tall));
    dd.set_items(list, vec![a, b]).unwrap();
    let order = |dd: &DragDrop| -> Vec<DragId> {
        dd.drop_list(list).unwrap().item_positions().iter().map(|p| p.item).collect()
    };

    start_drag(&mut dd, a, short, 250.0, 225.0);
    move_to(&mut dd, 250.0, 260.0);
    assert_eq!(order(&dd), vec![b, a]);

    // The tall sibling now spans 200..300 and still sits under the pointer.
    move_to(&mut dd, 250.0, 270.0);
    assert_eq!(order(&dd), vec![b, a]);

    // Reversing direction over it swaps back.
    move_to(&mut dd, 250.0, 255.0);
    assert_eq!(order(&dd), vec![a, b]);
    release(&mut dd, 250.0, 255.0);
}

#[test]
fn test_column_grid_orders_cells_down_each_column() {
    let (dom, mut dd) = new_engine();
    let cell = Size::new(100.0, 100.0);
    let grid = add_grid(&dom, &mut dd, Rect::new(200.0, 200.0, 200.0, 200.0), GridFlow::Column, 2, cell, 4);
    // Laid out row by row as a b / c d.
    let (a, b, c, d) = (grid.items[0], grid.items[1], grid.items[2], grid.items[3]);
    let dropped = capture_drop(&dd, a);

    start_drag(&mut dd, a, grid.nodes[0], 250.0, 250.0);
    assert_eq!(visual_order(&dd, &grid), vec![a, c, b, d]);
    assert_eq!(dd.drop_list(grid.id).unwrap().get_item_index(b), Some(2));
    let placeholder = dd.drag(a).unwrap().placeholder_element().unwrap();

    move_to(&mut dd, 350.0, 350.0);
    assert_eq!(visual_order(&dd, &grid), vec![c, b, d, a]);
    assert_eq!(dom.transform(grid.nodes[2]), Some(Point::new(0.0, -100.0)));
    assert_eq!(dom.transform(grid.nodes[1]), Some(Point::new(-100.0, 100.0)));
    assert_eq!(dom.transform(grid.nodes[3]), Some(Point::new(0.0, -100.0)));
    assert_eq!(dom.transform(placeholder), Some(Point::new(100.0, 100.0)));

    release(&mut dd, 350.0, 350.0);
    let event = dropped.borrow().unwrap();
    assert_eq!((event.previous_index, event.current_index), (0, 3));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_sorting_permutes_the_active_list(
        dragged in 0usize..5,
        moves in prop::collection::vec((150.0f64..350.0, 150.0f64..500.0), 1..20),
    ) {
        let (dom, mut dd) = new_engine();
        let list = add_list(
            &dom,
            &mut dd,
            Rect::new(200.0, 200.0, 100.0, 250.0),
            Orientation::Vertical,
            Size::new(100.0, 50.0),
            5,
        );
        let item = list.items[dragged];
        let dropped = capture_drop(&dd, item);
        start_drag(&mut dd, item, list.nodes[dragged], 250.0, 225.0 + 50.0 * dragged as f64);

        let mut expected = list.items.clone();
        expected.sort();
        let mut last = Point::ZERO;
        for (x, y) in moves {
            move_to(&mut dd, x, y);
            last = Point::new(x, y);

            let container = dd.drop_list(list.id).unwrap();
            let mut order = visual_order(&dd, &list);
            prop_assert_eq!(order.len(), 5);
            order.sort();
            prop_assert_eq!(&order, &expected);
            prop_assert!(container.get_item_index(item).is_some_and(|i| i < 5));
        }

        release(&mut dd, last.x, last.y);
        let event = dropped.borrow().unwrap();
        prop_assert!(event.current_index < 5);
        prop_assert_eq!(event.previous_index, dragged);
        prop_assert_eq!(dom.children(list.element), list.nodes.clone());
        for node in &list.nodes {
            prop_assert_eq!(dom.transform(*node), None);
        }
    }
}
