//! Drop containers.
//!
//! A [`DropListRef`] owns the contract every container shares (enter, exit,
//! drop, sort, receive) and delegates ordering to a [`SortStrategy`]:
//!
//! - `list` - [`ListSortStrategy`], one-dimensional
//! - `grid` - [`GridSortStrategy`], two-dimensional hit testing
//! - `auto_scroll` - [`AutoScroller`], edge-proximity scrolling
//!
//! Effects on other containers (notifying siblings that a drag started or
//! ended) are applied by [`crate::DragDrop`], which owns every container.

pub mod auto_scroll;
mod grid;
mod list;

use std::rc::Rc;

use indexmap::IndexSet;
use serde::Serialize;
use slotmap::SlotMap;
use tracing::{debug, trace};

pub use auto_scroll::{AutoScroller, ScrollState};
pub use grid::GridSortStrategy;
pub use list::ListSortStrategy;

use crate::drag::DragRef;
use crate::events::{DragDropEvent, DragEnterEvent, DragExitEvent, DropListEvents, ReceivingEvent, SortEvent};
use crate::geometry::{Point, Rect};
use crate::host::Host;
use crate::registry::PointerRegistry;
use crate::scroll_tracker::ParentPositionTracker;
use crate::types::{
    Axis, Direction, DragId, DropListId, GridFlow, GroupId, NodeId, Orientation, PointerDelta,
    ScrollTarget,
};

/// May `item` enter the container?
pub type EnterPredicate = Rc<dyn Fn(DragId, DropListId) -> bool>;

/// May `item` be sorted into visual index `index` of the container?
pub type SortPredicate = Rc<dyn Fn(usize, DragId, DropListId) -> bool>;

/// One entry of a container's cached geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CachedPosition {
    #[serde(skip)]
    pub item: DragId,
    /// Predicted client rect, adjusted in place after reorders and scrolls.
    pub rect: Rect,
    /// Translation accumulated by reorders.
    pub offset: Point,
}

/// Visual indices before and after a reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortResult {
    pub previous_index: usize,
    pub current_index: usize,
}

/// Read access to the drag items a container orders.
pub(crate) struct SortContext<'a> {
    pub host: &'a dyn Host,
    pub drags: &'a SlotMap<DragId, DragRef>,
    pub registry: &'a PointerRegistry,
}

impl<'a> SortContext<'a> {
    pub fn new(
        host: &'a dyn Host,
        drags: &'a SlotMap<DragId, DragRef>,
        registry: &'a PointerRegistry,
    ) -> Self {
        Self { host, drags, registry }
    }

    pub fn root(&self, item: DragId) -> Option<NodeId> {
        self.drags.get(item).map(|d| d.root)
    }

    pub fn placeholder(&self, item: DragId) -> Option<NodeId> {
        self.drags.get(item).and_then(|d| d.placeholder)
    }

    /// The placeholder while the item is being dragged, its root otherwise.
    pub fn visible_element(&self, item: DragId) -> Option<NodeId> {
        self.placeholder(item).or_else(|| self.root(item))
    }

    pub fn is_dragging(&self, item: DragId) -> bool {
        self.registry.is_dragging(item)
    }
}

/// How a container orders its items.
pub(crate) trait SortStrategy: std::fmt::Debug {
    fn set_orientation(&mut self, _orientation: Orientation) {}

    /// Begin a gesture over `items` and cache their positions.
    fn start(&mut self, ctx: &SortContext<'_>, items: &[DragId]);

    /// Move `item` into the active list, either at `index` or where the
    /// pointer is, and insert its placeholder accordingly.
    #[allow(clippy::too_many_arguments)]
    fn enter(
        &mut self,
        ctx: &SortContext<'_>,
        container: NodeId,
        item: DragId,
        x: f64,
        y: f64,
        index: Option<usize>,
        accept: &dyn Fn(usize, DragId) -> bool,
    );

    /// Reorder `item` towards the pointer. `None` if nothing moved.
    fn sort(
        &mut self,
        ctx: &SortContext<'_>,
        item: DragId,
        x: f64,
        y: f64,
        pointer_delta: PointerDelta,
        accept: &dyn Fn(usize, DragId) -> bool,
    ) -> Option<SortResult>;

    /// Clear transforms and drop all gesture state.
    fn reset(&mut self, ctx: &SortContext<'_>);

    fn item_index(&self, item: DragId, direction: Direction) -> Option<usize>;

    fn active_items(&self) -> &[DragId];

    fn positions(&self) -> &[CachedPosition];

    fn update_on_scroll(&mut self, top: f64, left: f64);

    fn cache_item_positions(&mut self, ctx: &SortContext<'_>);
}

/// Which sorting a container uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    List(Orientation),
    Grid(GridFlow),
}

pub struct DropListRef {
    pub(crate) id: DropListId,
    pub(crate) element: NodeId,
    pub(crate) kind: ContainerKind,
    /// Declared members in content order.
    pub(crate) items: Vec<DragId>,
    pub(crate) disabled: bool,
    pub(crate) sorting_disabled: bool,
    pub(crate) auto_scroll_disabled: bool,
    pub(crate) lock_axis: Option<Axis>,
    pub(crate) direction: Direction,
    pub(crate) enter_predicate: Option<EnterPredicate>,
    pub(crate) sort_predicate: Option<SortPredicate>,
    pub(crate) connected_to: IndexSet<DropListId>,
    pub(crate) group: Option<GroupId>,
    /// Connected containers, resolved when a gesture starts.
    pub(crate) siblings: Vec<DropListId>,
    /// Siblings whose drag this container is currently able to receive.
    pub(crate) active_siblings: IndexSet<DropListId>,
    pub(crate) is_dragging: bool,
    pub(crate) parent_positions: ParentPositionTracker,
    strategy: Box<dyn SortStrategy>,
    pub(crate) auto_scroller: AutoScroller,
    pub events: DropListEvents,
}

impl std::fmt::Debug for DropListRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropListRef")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("kind", &self.kind)
            .field("items", &self.items)
            .field("is_dragging", &self.is_dragging)
            .field("active_siblings", &self.active_siblings)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl DropListRef {
    pub(crate) fn new(id: DropListId, element: NodeId, kind: ContainerKind, auto_scroller: AutoScroller) -> Self {
        let strategy: Box<dyn SortStrategy> = match kind {
            ContainerKind::List(orientation) => Box::new(ListSortStrategy::new(orientation)),
            ContainerKind::Grid(flow) => Box::new(GridSortStrategy::new(flow)),
        };
        Self {
            id,
            element,
            kind,
            items: Vec::new(),
            disabled: false,
            sorting_disabled: false,
            auto_scroll_disabled: false,
            lock_axis: None,
            direction: Direction::Ltr,
            enter_predicate: None,
            sort_predicate: None,
            connected_to: IndexSet::new(),
            group: None,
            siblings: Vec::new(),
            active_siblings: IndexSet::new(),
            is_dragging: false,
            parent_positions: ParentPositionTracker::new(),
            strategy,
            auto_scroller,
            events: DropListEvents::default(),
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn id(&self) -> DropListId {
        self.id
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn items(&self) -> &[DragId] {
        &self.items
    }

    /// Switch a list container's axis. Grids ignore this.
    pub fn with_orientation(&mut self, orientation: Orientation) -> &mut Self {
        if let ContainerKind::List(_) = self.kind {
            self.kind = ContainerKind::List(orientation);
            self.strategy.set_orientation(orientation);
        }
        self
    }

    pub fn with_disabled(&mut self, disabled: bool) -> &mut Self {
        self.disabled = disabled;
        self
    }

    pub fn with_sorting_disabled(&mut self, disabled: bool) -> &mut Self {
        self.sorting_disabled = disabled;
        self
    }

    pub fn with_auto_scroll_disabled(&mut self, disabled: bool) -> &mut Self {
        self.auto_scroll_disabled = disabled;
        if disabled {
            self.auto_scroller.stop_scrolling();
        }
        self
    }

    pub fn with_auto_scroll_step(&mut self, step: f64) -> &mut Self {
        self.auto_scroller.step = step;
        self
    }

    /// Axis lock applied to every item dragged inside this container.
    pub fn with_lock_axis(&mut self, axis: Option<Axis>) -> &mut Self {
        self.lock_axis = axis;
        self
    }

    pub fn with_direction(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self
    }

    pub fn with_enter_predicate(
        &mut self,
        predicate: impl Fn(DragId, DropListId) -> bool + 'static,
    ) -> &mut Self {
        self.enter_predicate = Some(Rc::new(predicate));
        self
    }

    pub fn with_sort_predicate(
        &mut self,
        predicate: impl Fn(usize, DragId, DropListId) -> bool + 'static,
    ) -> &mut Self {
        self.sort_predicate = Some(Rc::new(predicate));
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_sorting_disabled(&self) -> bool {
        self.sorting_disabled
    }

    pub fn lock_axis(&self) -> Option<Axis> {
        self.lock_axis
    }

    pub fn connected_to(&self) -> impl Iterator<Item = DropListId> + '_ {
        self.connected_to.iter().copied()
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Whether a drag is in progress inside this container.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Whether a sibling's drag could be dropped here.
    pub fn is_receiving(&self) -> bool {
        !self.active_siblings.is_empty()
    }

    /// The active working list while dragging.
    pub fn active_items(&self) -> &[DragId] {
        self.strategy.active_items()
    }

    /// Cached positions in visual order while dragging.
    pub fn item_positions(&self) -> &[CachedPosition] {
        self.strategy.positions()
    }

    /// Client rect of the container, cached when it last started dragging or
    /// receiving.
    pub fn client_rect(&self) -> Option<Rect> {
        self.parent_positions.client_rect(self.element)
    }

    /// Visual index of `item` while dragging, declared index otherwise.
    pub fn get_item_index(&self, item: DragId) -> Option<usize> {
        if self.is_dragging {
            self.strategy.item_index(item, self.direction)
        } else {
            self.items.iter().position(|i| *i == item)
        }
    }

    pub fn enter_predicate_accepts(&self, item: DragId) -> bool {
        self.enter_predicate
            .as_ref()
            .is_none_or(|predicate| predicate(item, self.id))
    }

    /// The sort predicate bound to this container, detached from `self` so
    /// the strategy can be borrowed mutably while it runs.
    fn sort_acceptor(&self) -> impl Fn(usize, DragId) -> bool + 'static {
        let predicate = self.sort_predicate.clone();
        let id = self.id;
        move |index, item| predicate.as_ref().is_none_or(|p| p(index, item, id))
    }

    /// Whether the pointer lies inside the cached container rect.
    pub fn is_over_container(&self, x: f64, y: f64) -> bool {
        self.client_rect().is_some_and(|rect| rect.contains_point(x, y))
    }

    // ------------------------------------------------------------------
    // Gesture contract
    // ------------------------------------------------------------------

    fn cache_parent_positions(&mut self, host: &dyn Host) {
        let mut elements = vec![self.element];
        elements.extend(host.scrollable_parents(self.element));
        self.parent_positions.cache(host, &elements);
    }

    /// Enter the dragging state and snapshot the declared members.
    pub(crate) fn start_dragging(&mut self, ctx: &SortContext<'_>) {
        self.events.before_started.emit(&());
        self.is_dragging = true;
        self.direction = ctx.host.direction();
        self.cache_parent_positions(ctx.host);
        let items = self.items.clone();
        self.strategy.start(ctx, &items);
        debug!(container = ?self.id, items = items.len(), "container started dragging");
    }

    /// Splice `item` into the active list and emit `entered`.
    pub(crate) fn enter(&mut self, ctx: &SortContext<'_>, item: DragId, x: f64, y: f64, index: Option<usize>) {
        self.start_dragging(ctx);

        let index = match index {
            None if self.sorting_disabled => self.items.iter().position(|i| *i == item),
            other => other,
        };

        let element = self.element;
        let accept = self.sort_acceptor();
        self.strategy.enter(ctx, element, item, x, y, index, &accept);

        let current_index = self.get_item_index(item).unwrap_or_default();
        debug!(container = ?self.id, ?item, current_index, "item entered");
        self.events.entered.emit(&DragEnterEvent {
            item,
            container: self.id,
            current_index,
        });
    }

    /// Leave the container. A no-op (returns `false`) when `item` is not in
    /// the active list.
    pub(crate) fn exit(&mut self, ctx: &SortContext<'_>, item: DragId) -> bool {
        if !self.is_dragging || !self.strategy.active_items().contains(&item) {
            return false;
        }
        self.reset(ctx);
        debug!(container = ?self.id, ?item, "item exited");
        self.events.exited.emit(&DragExitEvent {
            item,
            container: self.id,
        });
        true
    }

    /// Finish the gesture in this container and emit `dropped`.
    pub(crate) fn drop(&mut self, ctx: &SortContext<'_>, event: &DragDropEvent) {
        self.reset(ctx);
        debug!(container = ?self.id, current_index = event.current_index, previous_index = event.previous_index, "item dropped");
        self.events.dropped.emit(event);
    }

    /// Leave the dragging state. Siblings are released by the caller.
    ///
    /// The cached container rect survives so the initial container can still
    /// be hit-tested when a drag comes back to it.
    pub(crate) fn reset(&mut self, ctx: &SortContext<'_>) {
        self.is_dragging = false;
        self.strategy.reset(ctx);
        self.auto_scroller.stop_scrolling();
    }

    /// Reorder `item` if the pointer is within the proximity band.
    pub(crate) fn sort_item(
        &mut self,
        ctx: &SortContext<'_>,
        item: DragId,
        x: f64,
        y: f64,
        delta: PointerDelta,
        proximity_threshold: f64,
    ) -> Option<SortResult> {
        if self.sorting_disabled {
            return None;
        }
        let rect = self.client_rect()?;
        if !rect.is_pointer_near(proximity_threshold, x, y) {
            return None;
        }

        let accept = self.sort_acceptor();
        let result = self.strategy.sort(ctx, item, x, y, delta, &accept)?;

        trace!(container = ?self.id, ?item, previous = result.previous_index, current = result.current_index, "sorted");
        self.events.sorted.emit(&SortEvent {
            previous_index: result.previous_index,
            current_index: result.current_index,
            container: self.id,
            item,
        });
        Some(result)
    }

    /// Whether `item` may be dropped here at the given point: the container
    /// must accept it, contain the point, and actually be the topmost thing
    /// under the pointer.
    pub(crate) fn can_receive(&self, host: &dyn Host, item: DragId, x: f64, y: f64) -> bool {
        if !self.is_over_container(x, y) || !self.enter_predicate_accepts(item) {
            return false;
        }
        match host.element_from_point(x, y) {
            Some(hit) => hit == self.element || host.contains(self.element, hit),
            None => false,
        }
    }

    /// A sibling started a drag. Idempotent per sibling.
    pub(crate) fn start_receiving(&mut self, host: &dyn Host, sibling: DropListId, items: &[DragId]) -> bool {
        if self.active_siblings.contains(&sibling) {
            return false;
        }
        let acceptable = items
            .iter()
            .all(|item| self.enter_predicate_accepts(*item) || self.items.contains(item));
        if !acceptable {
            return false;
        }

        self.active_siblings.insert(sibling);
        self.cache_parent_positions(host);
        trace!(container = ?self.id, ?sibling, "receiving started");
        self.events.receiving_started.emit(&ReceivingEvent {
            receiver: self.id,
            initiator: sibling,
        });
        true
    }

    pub(crate) fn stop_receiving(&mut self, sibling: DropListId) {
        if !self.active_siblings.shift_remove(&sibling) {
            return;
        }
        trace!(container = ?self.id, ?sibling, "receiving stopped");
        self.events.receiving_stopped.emit(&ReceivingEvent {
            receiver: self.id,
            initiator: sibling,
        });
    }

    /// Replace the declared members. The active list of a gesture in flight
    /// is left alone, unless none of the dragged items remain, in which case
    /// the container resets. Returns `true` if it reset.
    pub(crate) fn set_items(&mut self, ctx: &SortContext<'_>, items: Vec<DragId>) -> bool {
        self.items = items;
        if !self.is_dragging {
            return false;
        }
        let still_dragged = self
            .strategy
            .active_items()
            .iter()
            .any(|item| ctx.is_dragging(*item) && self.items.contains(item));
        if !still_dragged {
            self.reset(ctx);
            return true;
        }
        false
    }

    /// Apply a scroll while dragging (shift cached geometry) or receiving
    /// (re-measure). Returns `true` when cached item rects moved.
    pub(crate) fn handle_scroll(&mut self, host: &dyn Host, target: ScrollTarget) -> bool {
        if self.is_dragging {
            match self.parent_positions.handle_scroll(host, target) {
                Some(diff) => {
                    self.strategy.update_on_scroll(diff.top, diff.left);
                    true
                }
                None => false,
            }
        } else {
            if self.is_receiving() {
                self.cache_parent_positions(host);
            }
            false
        }
    }

    /// Auto-scroll the viewport or a scrollable ancestor near the pointer.
    pub(crate) fn start_scrolling_if_necessary(&mut self, x: f64, y: f64) {
        if self.auto_scroll_disabled {
            return;
        }
        let elements: Vec<(NodeId, Rect)> = self.parent_positions.elements().collect();
        self.auto_scroller.start_scrolling_if_necessary(x, y, &elements);
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroller.is_scrolling()
    }

    pub fn auto_scroll_state(&self) -> Option<ScrollState> {
        self.auto_scroller.current()
    }

    pub(crate) fn stop_scrolling(&mut self) {
        self.auto_scroller.stop_scrolling();
    }

    /// Close every notification point.
    pub(crate) fn dispose(&mut self) {
        self.auto_scroller.stop_scrolling();
        self.active_siblings.clear();
        self.siblings.clear();
        self.parent_positions.clear();
        self.is_dragging = false;
        self.events.complete_all();
    }
}
