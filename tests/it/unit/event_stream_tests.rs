//! Unit tests for notification streams.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dragkit::events::EventStream;

#[test]
fn test_every_subscriber_sees_later_events_only() {
    let stream: EventStream<u32> = EventStream::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    stream.emit(&1);
    let first = seen.clone();
    stream.subscribe(move |v| first.borrow_mut().push(("first", *v)));
    stream.emit(&2);
    let second = seen.clone();
    stream.subscribe(move |v| second.borrow_mut().push(("second", *v)));
    stream.emit(&3);

    assert_eq!(
        *seen.borrow(),
        vec![("first", 2), ("first", 3), ("second", 3)]
    );
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let stream: EventStream<()> = EventStream::new();
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    let id = stream.subscribe(move |_| counter.set(counter.get() + 1));

    stream.emit(&());
    assert!(stream.unsubscribe(id));
    assert!(!stream.unsubscribe(id));
    stream.emit(&());

    assert_eq!(count.get(), 1);
    assert!(!stream.has_observers());
}

#[test]
fn test_complete_releases_subscribers() {
    let stream: EventStream<u8> = EventStream::new();
    let completed = Rc::new(Cell::new(false));
    let flag = completed.clone();
    stream.subscribe(|_| {});
    stream.on_complete(move || flag.set(true));

    stream.complete();
    assert!(completed.get());
    assert!(stream.is_completed());
    assert_eq!(stream.observer_count(), 0);

    // Late subscribers are inert.
    let late = Rc::new(Cell::new(0));
    let late_counter = late.clone();
    stream.subscribe(move |_| late_counter.set(late_counter.get() + 1));
    stream.emit(&7);
    assert_eq!(late.get(), 0);
}

#[test]
fn test_subscriber_may_subscribe_during_emit() {
    let stream: Rc<EventStream<u8>> = Rc::new(EventStream::new());
    let nested_calls = Rc::new(Cell::new(0));

    let inner_stream = stream.clone();
    let inner_calls = nested_calls.clone();
    stream.subscribe(move |_| {
        let calls = inner_calls.clone();
        inner_stream.subscribe(move |_| calls.set(calls.get() + 1));
    });

    stream.emit(&1);
    assert_eq!(nested_calls.get(), 0);
    stream.emit(&2);
    assert_eq!(nested_calls.get(), 1);
}
