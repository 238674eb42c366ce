//! Creating, reconfiguring and disposing controllers and containers,
//! including in the middle of a gesture.

use std::cell::Cell;
use std::rc::Rc;

use dragkit::events::EventStream;
use dragkit::geometry::{Point, Rect, Size};
use dragkit::types::{Direction, Orientation};
use dragkit::DragDropError;

use crate::helpers::{add_list, move_to, new_engine, release, start_drag, Layout};

fn completion_flag<T>(stream: &EventStream<T>) -> Rc<Cell<bool>> {
    let flag = Rc::new(Cell::new(false));
    let sink = flag.clone();
    stream.on_complete(move || sink.set(true));
    flag
}

#[test]
fn test_duplicate_container_registration_is_rejected() {
    let (dom, mut dd) = new_engine();
    let element = dom.container(Rect::new(0.0, 0.0, 100.0, 100.0), Layout::Vertical);

    let first = dd.create_drop_list(element, Orientation::Vertical).unwrap();
    assert_eq!(
        dd.create_grid_drop_list(element, Default::default()),
        Err(DragDropError::DuplicateRegistration(first))
    );

    dd.dispose_drop_list(first).unwrap();
    assert!(dd.create_drop_list(element, Orientation::Vertical).is_ok());
}

#[test]
fn test_unknown_ids_are_reported() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 100.0, 100.0),
        Orientation::Vertical,
        Size::new(100.0, 50.0),
        2,
    );
    let other = dom.container(Rect::new(400.0, 200.0, 100.0, 100.0), Layout::Vertical);
    let gone = dd.create_drop_list(other, Orientation::Vertical).unwrap();
    dd.dispose_drop_list(gone).unwrap();

    assert_eq!(dd.set_items(gone, vec![]), Err(DragDropError::UnknownDropList(gone)));
    assert_eq!(dd.connect_to(list.id, [gone]), Err(DragDropError::UnknownDropList(gone)));
    assert_eq!(dd.dispose_drop_list(gone), Err(DragDropError::UnknownDropList(gone)));

    let item = list.items[0];
    dd.dispose_drag(item).unwrap();
    assert_eq!(dd.set_items(list.id, vec![item]), Err(DragDropError::UnknownDrag(item)));
    assert_eq!(dd.reset_drag(item), Err(DragDropError::UnknownDrag(item)));
    assert_eq!(dd.dispose_drag(item), Err(DragDropError::UnknownDrag(item)));
    // Disposing an item removes it from the containers it was declared in.
    assert_eq!(dd.drop_list(list.id).unwrap().items(), &[list.items[1]]);
}

#[test]
fn test_connecting_to_itself_is_ignored() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 100.0, 100.0),
        Orientation::Vertical,
        Size::new(100.0, 50.0),
        2,
    );
    dd.connect_to(list.id, [list.id]).unwrap();
    assert_eq!(dd.drop_list(list.id).unwrap().connected_to().count(), 0);
}

#[test]
fn test_dispose_drag_mid_gesture_cleans_up() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 100.0, 150.0),
        Orientation::Vertical,
        Size::new(100.0, 50.0),
        3,
    );
    let a = list.items[0];
    let ended = completion_flag(&dd.drag(a).unwrap().events.ended);

    start_drag(&mut dd, a, list.nodes[0], 250.0, 225.0);
    move_to(&mut dd, 250.0, 280.0);
    let placeholder = dd.drag(a).unwrap().placeholder_element().unwrap();
    let preview = dd.drag(a).unwrap().preview_element().unwrap();
    dom.clear_listener_log();

    dd.dispose_drag(a).unwrap();

    assert!(ended.get());
    assert!(dd.drag(a).is_none());
    assert!(!dd.has_active_gesture());
    assert!(!dom.exists(placeholder));
    assert!(!dom.exists(preview));
    assert!(dom.is_visible(list.nodes[0]));
    for node in &list.nodes {
        assert_eq!(dom.transform(*node), None);
    }
    let container = dd.drop_list(list.id).unwrap();
    assert!(!container.is_dragging());
    assert_eq!(container.items(), &list.items[1..]);
    assert_eq!(
        dom.listener_log(),
        vec!["-PointerMove(Mouse)", "-PointerUp(Mouse)", "-Scroll", "-SelectStart"]
    );

    // Nothing is left to finish.
    release(&mut dd, 250.0, 280.0);
    assert_eq!(dd.frames().pending(), 0);
}

#[test]
fn test_dispose_free_drag_mid_gesture_restores_the_transform() {
    let (dom, mut dd) = new_engine();
    let plain = dom.container(Rect::new(100.0, 100.0, 50.0, 50.0), Layout::Leaf);
    let placed = dom.container(Rect::new(300.0, 100.0, 50.0, 50.0), Layout::Leaf);
    let (a, b) = (dd.create_drag(plain), dd.create_drag(placed));
    dd.set_free_drag_position(b, Point::new(20.0, 0.0)).unwrap();

    start_drag(&mut dd, a, plain, 110.0, 110.0);
    move_to(&mut dd, 160.0, 140.0);
    assert_eq!(dom.transform(plain), Some(Point::new(50.0, 30.0)));
    dd.dispose_drag(a).unwrap();
    assert_eq!(dom.transform(plain), None);
    assert!(!dd.has_active_gesture());

    // An earlier drop position survives an aborted gesture.
    start_drag(&mut dd, b, placed, 330.0, 110.0);
    move_to(&mut dd, 380.0, 150.0);
    assert_eq!(dom.transform(placed), Some(Point::new(70.0, 40.0)));
    dd.dispose_drag(b).unwrap();
    assert_eq!(dom.transform(placed), Some(Point::new(20.0, 0.0)));
}

#[test]
fn test_set_items_mid_drag() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 100.0, 150.0),
        Orientation::Vertical,
        Size::new(100.0, 50.0),
        3,
    );
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);
    start_drag(&mut dd, a, list.nodes[0], 250.0, 225.0);
    move_to(&mut dd, 250.0, 280.0);

    // The dragged item is still declared: the gesture carries on.
    dd.set_items(list.id, vec![c, b, a]).unwrap();
    assert!(dd.drop_list(list.id).unwrap().is_dragging());
    let order: Vec<_> = dd
        .drop_list(list.id)
        .unwrap()
        .item_positions()
        .iter()
        .map(|p| p.item)
        .collect();
    assert_eq!(order, vec![b, a, c]);

    // The dragged item is gone: the container resets.
    dd.set_items(list.id, vec![b, c]).unwrap();
    let container = dd.drop_list(list.id).unwrap();
    assert!(!container.is_dragging());
    assert!(container.item_positions().is_empty());
    assert_eq!(dom.transform(list.nodes[1]), None);
    release(&mut dd, 250.0, 280.0);
    assert!(!dd.has_active_gesture());
}

#[test]
fn test_dispose_container_mid_drag_aborts_the_gesture() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 100.0, 150.0),
        Orientation::Vertical,
        Size::new(100.0, 50.0),
        3,
    );
    let a = list.items[0];
    let sorted = completion_flag(&dd.drop_list(list.id).unwrap().events.sorted);

    start_drag(&mut dd, a, list.nodes[0], 250.0, 225.0);
    let placeholder = dd.drag(a).unwrap().placeholder_element().unwrap();
    dd.dispose_drop_list(list.id).unwrap();

    assert!(sorted.get());
    assert!(dd.drop_list(list.id).is_none());
    assert!(!dd.has_active_gesture());
    assert!(!dom.exists(placeholder));
    assert!(dom.is_visible(list.nodes[0]));
    let drag = dd.drag(a).unwrap();
    assert!(!drag.is_dragging());
    assert_eq!(drag.drop_container(), None);
}

#[test]
fn test_disposing_a_receiving_sibling_keeps_the_drag_going() {
    let (dom, mut dd) = new_engine();
    let item = Size::new(100.0, 50.0);
    let x = add_list(&dom, &mut dd, Rect::new(200.0, 200.0, 100.0, 150.0), Orientation::Vertical, item, 3);
    let y = add_list(&dom, &mut dd, Rect::new(500.0, 200.0, 100.0, 150.0), Orientation::Vertical, item, 3);
    dd.connect_to(x.id, [y.id]).unwrap();
    let a = x.items[0];

    start_drag(&mut dd, a, x.nodes[0], 250.0, 225.0);
    assert!(dd.drop_list(y.id).unwrap().is_receiving());
    dd.dispose_drop_list(y.id).unwrap();

    assert!(dd.drag(a).unwrap().is_dragging());
    assert_eq!(dd.drop_list(x.id).unwrap().connected_to().count(), 0);
    move_to(&mut dd, 550.0, 320.0);
    assert_eq!(dd.drag(a).unwrap().drop_container(), Some(x.id));
    release(&mut dd, 550.0, 320.0);
}

#[test]
fn test_direction_change_mid_drag_reverses_horizontal_indices() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 300.0, 50.0),
        Orientation::Horizontal,
        Size::new(100.0, 50.0),
        3,
    );
    let a = list.items[0];
    start_drag(&mut dd, a, list.nodes[0], 250.0, 220.0);
    assert_eq!(dd.drop_list(list.id).unwrap().get_item_index(a), Some(0));

    dom.set_direction(Direction::Rtl);
    dd.handle_direction_change(Direction::Rtl);
    assert_eq!(dd.drop_list(list.id).unwrap().get_item_index(a), Some(2));
    release(&mut dd, 250.0, 227.0);
}

#[test]
fn test_dispose_tears_everything_down() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 100.0, 150.0),
        Orientation::Vertical,
        Size::new(100.0, 50.0),
        3,
    );
    let panel = dom.container(Rect::new(500.0, 500.0, 100.0, 100.0), Layout::Leaf);
    let resizable = dd.create_resizable(panel, None).unwrap();
    let group = dd.create_group();
    dd.add_to_group(group, list.id).unwrap();

    let dropped = completion_flag(&dd.drag(list.items[1]).unwrap().events.dropped);
    let entered = completion_flag(&dd.drop_list(list.id).unwrap().events.entered);
    let resized = completion_flag(&dd.resizable(resizable).unwrap().events.resized);

    start_drag(&mut dd, list.items[0], list.nodes[0], 250.0, 225.0);
    let placeholder = dd.drag(list.items[0]).unwrap().placeholder_element().unwrap();
    dom.clear_listener_log();

    dd.dispose();

    assert!(dropped.get() && entered.get() && resized.get());
    assert!(!dom.exists(placeholder));
    assert!(!dd.has_active_gesture());
    assert_eq!(dd.registry().drag_count(), 0);
    assert_eq!(dd.registry().resizable_count(), 0);
    assert_eq!(dd.registry().drop_containers().count(), 0);
    assert!(!dd.registry().is_touch_move_bound());
    assert!(dd.registry().pointer_move.is_completed());
    assert_eq!(dom.listener_log().last().map(String::as_str), Some("-TouchMove"));
    assert!(dd.drop_list(list.id).is_none());
    assert!(dd.resizable(resizable).is_none());
}
