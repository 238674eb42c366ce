//! Notification points exposed to framework adapters.
//!
//! [`EventStream`] is a single-threaded, multi-subscriber broadcast channel.
//! It replays nothing: subscribers only observe events emitted after they
//! subscribed. Owners must call [`EventStream::complete`] on disposal so that
//! subscribers do not leak.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use slotmap::{new_key_type, SlotMap};

use crate::geometry::{Point, Rect};
use crate::resize::ResizeHandle;
use crate::types::{DragId, DropListId, PointerDelta, ResizeId};

new_key_type! {
    /// Identifies one subscriber of an [`EventStream`].
    pub struct SubscriptionId;
}

type Observer<T> = Rc<dyn Fn(&T)>;
type CompletionObserver = Box<dyn FnOnce()>;

/// A broadcast channel for one notification point.
pub struct EventStream<T> {
    observers: RefCell<SlotMap<SubscriptionId, Observer<T>>>,
    on_complete: RefCell<Vec<CompletionObserver>>,
    completed: Cell<bool>,
}

impl<T> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("observers", &self.observer_count())
            .field("completed", &self.completed.get())
            .finish()
    }
}

impl<T> EventStream<T> {
    pub fn new() -> Self {
        Self {
            observers: RefCell::new(SlotMap::with_key()),
            on_complete: RefCell::new(Vec::new()),
            completed: Cell::new(false),
        }
    }

    /// Register an observer for future events.
    ///
    /// Subscribing to a completed stream returns an inert subscription.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> SubscriptionId {
        if self.completed.get() {
            return SubscriptionId::default();
        }
        self.observers.borrow_mut().insert(Rc::new(observer))
    }

    /// Register a callback fired once when the stream completes.
    pub fn on_complete(&self, callback: impl FnOnce() + 'static) {
        if self.completed.get() {
            callback();
            return;
        }
        self.on_complete.borrow_mut().push(Box::new(callback));
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.borrow_mut().remove(id).is_some()
    }

    /// Deliver `event` to every current observer.
    ///
    /// The observer list is snapshotted first, so observers may subscribe or
    /// unsubscribe while being notified.
    pub fn emit(&self, event: &T) {
        if self.completed.get() {
            return;
        }
        let snapshot: Vec<Observer<T>> = self.observers.borrow().values().cloned().collect();
        for observer in snapshot {
            observer(event);
        }
    }

    /// Close the stream: drop all observers and fire completion callbacks.
    /// Idempotent.
    pub fn complete(&self) {
        if self.completed.replace(true) {
            return;
        }
        self.observers.borrow_mut().clear();
        let callbacks = std::mem::take(&mut *self.on_complete.borrow_mut());
        for callback in callbacks {
            callback();
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn has_observers(&self) -> bool {
        !self.observers.borrow().is_empty()
    }
}

// ============================================================================
// Drag Controller Payloads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragStartEvent {
    #[serde(skip)]
    pub source: DragId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragReleaseEvent {
    #[serde(skip)]
    pub source: DragId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragEndEvent {
    #[serde(skip)]
    pub source: DragId,
    /// Distance travelled from the pickup position.
    pub distance: Point,
    pub drop_point: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragEnterEvent {
    #[serde(skip)]
    pub item: DragId,
    #[serde(skip)]
    pub container: DropListId,
    pub current_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragExitEvent {
    #[serde(skip)]
    pub item: DragId,
    #[serde(skip)]
    pub container: DropListId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragDropEvent {
    #[serde(skip)]
    pub item: DragId,
    pub current_index: usize,
    pub previous_index: usize,
    #[serde(skip)]
    pub container: DropListId,
    #[serde(skip)]
    pub previous_container: DropListId,
    pub is_pointer_over_container: bool,
    pub distance: Point,
    pub drop_point: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragMoveEvent {
    #[serde(skip)]
    pub source: DragId,
    pub pointer_position: Point,
    pub distance: Point,
    pub delta: PointerDelta,
}

/// All notification points of a drag controller.
#[derive(Debug, Default)]
pub struct DragEvents {
    pub before_started: EventStream<()>,
    pub started: EventStream<DragStartEvent>,
    pub released: EventStream<DragReleaseEvent>,
    pub ended: EventStream<DragEndEvent>,
    pub entered: EventStream<DragEnterEvent>,
    pub exited: EventStream<DragExitEvent>,
    pub dropped: EventStream<DragDropEvent>,
    pub moved: EventStream<DragMoveEvent>,
}

impl DragEvents {
    pub(crate) fn complete_all(&self) {
        self.before_started.complete();
        self.started.complete();
        self.released.complete();
        self.ended.complete();
        self.entered.complete();
        self.exited.complete();
        self.dropped.complete();
        self.moved.complete();
    }
}

// ============================================================================
// Drop Container Payloads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SortEvent {
    pub previous_index: usize,
    pub current_index: usize,
    #[serde(skip)]
    pub container: DropListId,
    #[serde(skip)]
    pub item: DragId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReceivingEvent {
    #[serde(skip)]
    pub receiver: DropListId,
    #[serde(skip)]
    pub initiator: DropListId,
}

/// All notification points of a drop container.
#[derive(Debug, Default)]
pub struct DropListEvents {
    pub before_started: EventStream<()>,
    pub entered: EventStream<DragEnterEvent>,
    pub exited: EventStream<DragExitEvent>,
    pub dropped: EventStream<DragDropEvent>,
    pub sorted: EventStream<SortEvent>,
    pub receiving_started: EventStream<ReceivingEvent>,
    pub receiving_stopped: EventStream<ReceivingEvent>,
}

impl DropListEvents {
    pub(crate) fn complete_all(&self) {
        self.before_started.complete();
        self.entered.complete();
        self.exited.complete();
        self.dropped.complete();
        self.sorted.complete();
        self.receiving_started.complete();
        self.receiving_stopped.complete();
    }
}

// ============================================================================
// Resize Controller Payloads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeStartEvent {
    #[serde(skip)]
    pub source: ResizeId,
    pub handle: ResizeHandle,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeEvent {
    #[serde(skip)]
    pub source: ResizeId,
    pub handle: ResizeHandle,
    pub rect: Rect,
}

/// The pointer was released; `rect` is the size about to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeReleaseEvent {
    #[serde(skip)]
    pub source: ResizeId,
    pub handle: ResizeHandle,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeEndEvent {
    #[serde(skip)]
    pub source: ResizeId,
    pub handle: ResizeHandle,
    pub rect: Rect,
    pub distance: Point,
}

/// All notification points of a resize controller.
#[derive(Debug, Default)]
pub struct ResizeEvents {
    pub before_started: EventStream<()>,
    pub started: EventStream<ResizeStartEvent>,
    pub resized: EventStream<ResizeEvent>,
    pub released: EventStream<ResizeReleaseEvent>,
    pub ended: EventStream<ResizeEndEvent>,
}

impl ResizeEvents {
    pub(crate) fn complete_all(&self) {
        self.before_started.complete();
        self.started.complete();
        self.resized.complete();
        self.released.complete();
        self.ended.complete();
    }
}
