//! Two-dimensional sorting: items placed in cells of a grid.
//!
//! The visual order is the order of cells (row-major or column-major). Each
//! cell keeps the origin it had when positions were cached; an item sitting
//! at visual index `i` is translated so that its origin lands on cell `i`.
//! Hit testing goes through an R-tree over the current rectangles.

use tracing::trace;

use super::{CachedPosition, SortContext, SortResult, SortStrategy};
use crate::geometry::Point;
use crate::spatial_index::SpatialIndex;
use crate::types::{Direction, DragId, GridFlow, NodeId, PointerDelta};

#[derive(Debug, Default)]
pub struct GridSortStrategy {
    pub flow: GridFlow,
    active: Vec<DragId>,
    positions: Vec<CachedPosition>,
    /// Cell origins in visual order.
    cells: Vec<Point>,
    index: SpatialIndex,
}

impl GridSortStrategy {
    pub fn new(flow: GridFlow) -> Self {
        Self {
            flow,
            ..Default::default()
        }
    }

    fn index_from_pointer(
        &self,
        item: DragId,
        x: f64,
        y: f64,
        accept: &dyn Fn(usize, DragId) -> bool,
    ) -> Option<usize> {
        let index = self
            .index
            .query_point(x, y)
            .into_iter()
            .filter(|hit| *hit != item)
            .filter_map(|hit| self.positions.iter().position(|p| p.item == hit))
            .min()?;

        accept(index, item).then_some(index)
    }

    fn should_enter_as_first_child(&self, x: f64, y: f64) -> bool {
        let Some(first) = self.positions.first() else {
            return false;
        };
        let rect = &first.rect;
        match self.flow {
            GridFlow::Row => y < rect.top || (y <= rect.bottom() && x <= rect.left),
            GridFlow::Column => x < rect.left || (x <= rect.right() && y <= rect.top),
        }
    }

    fn rebuild_index(&mut self) {
        self.index
            .rebuild(self.positions.iter().map(|p| (p.item, &p.rect)));
    }
}

impl SortStrategy for GridSortStrategy {
    fn start(&mut self, ctx: &SortContext<'_>, items: &[DragId]) {
        self.active = items.to_vec();
        self.cache_item_positions(ctx);
    }

    fn enter(
        &mut self,
        ctx: &SortContext<'_>,
        container: NodeId,
        item: DragId,
        x: f64,
        y: f64,
        index: Option<usize>,
        accept: &dyn Fn(usize, DragId) -> bool,
    ) {
        let new_index = index.or_else(|| self.index_from_pointer(item, x, y, accept));

        let mut reference = new_index
            .and_then(|i| self.positions.get(i))
            .map(|p| p.item)
            .filter(|r| *r != item);
        if reference.is_none() && new_index.is_none() && self.should_enter_as_first_child(x, y) {
            reference = self.positions.first().map(|p| p.item).filter(|r| *r != item);
        }

        self.active.retain(|a| *a != item);

        let placeholder = ctx.placeholder(item);
        match reference.filter(|r| !ctx.is_dragging(*r)) {
            Some(reference) => {
                if let (Some(placeholder), Some(root)) = (placeholder, ctx.root(reference)) {
                    ctx.host.insert_before(placeholder, root);
                }
                let at = self
                    .active
                    .iter()
                    .position(|a| *a == reference)
                    .unwrap_or(self.active.len());
                self.active.insert(at, item);
            }
            None => {
                if let Some(placeholder) = placeholder {
                    ctx.host.append_child(container, placeholder);
                }
                self.active.push(item);
            }
        }

        if let Some(placeholder) = placeholder {
            ctx.host.set_transform(placeholder, None);
        }
        self.cache_item_positions(ctx);
    }

    fn sort(
        &mut self,
        ctx: &SortContext<'_>,
        item: DragId,
        x: f64,
        y: f64,
        _pointer_delta: PointerDelta,
        accept: &dyn Fn(usize, DragId) -> bool,
    ) -> Option<SortResult> {
        let new_index = self.index_from_pointer(item, x, y, accept)?;
        let current_index = self.positions.iter().position(|p| p.item == item)?;

        let old_order: Vec<DragId> = self.positions.iter().map(|p| p.item).collect();
        let moved = self.positions.remove(current_index);
        self.positions.insert(new_index, moved);

        for (index, position) in self.positions.iter_mut().enumerate() {
            if old_order[index] == position.item {
                continue;
            }

            let cell = self.cells[index];
            let origin = position.rect.origin().delta_from(position.offset);
            let offset = cell.delta_from(origin);
            let step = offset.delta_from(position.offset);

            position.rect.adjust(step.y, step.x);
            position.offset = offset;

            let node = if position.item == item {
                ctx.placeholder(item)
            } else {
                ctx.root(position.item)
            };
            if let Some(node) = node {
                let amount = Point::new(offset.x.round(), offset.y.round());
                ctx.host.set_transform(node, (amount != Point::ZERO).then_some(amount));
            }
        }
        self.rebuild_index();

        trace!(current_index, new_index, "grid sorted");
        Some(SortResult {
            previous_index: current_index,
            current_index: new_index,
        })
    }

    fn reset(&mut self, ctx: &SortContext<'_>) {
        for item in &self.active {
            if let Some(root) = ctx.root(*item) {
                ctx.host.set_transform(root, None);
            }
        }
        self.active.clear();
        self.positions.clear();
        self.cells.clear();
        self.index.clear();
    }

    fn item_index(&self, item: DragId, _direction: Direction) -> Option<usize> {
        self.positions.iter().position(|p| p.item == item)
    }

    fn active_items(&self) -> &[DragId] {
        &self.active
    }

    fn positions(&self) -> &[CachedPosition] {
        &self.positions
    }

    fn update_on_scroll(&mut self, top: f64, left: f64) {
        for position in &mut self.positions {
            position.rect.adjust(top, left);
        }
        for cell in &mut self.cells {
            cell.x += left;
            cell.y += top;
        }
        self.rebuild_index();
    }

    fn cache_item_positions(&mut self, ctx: &SortContext<'_>) {
        self.positions = self
            .active
            .iter()
            .filter_map(|item| {
                let element = ctx.visible_element(*item)?;
                Some(CachedPosition {
                    item: *item,
                    rect: ctx.host.client_rect(element),
                    offset: Point::ZERO,
                })
            })
            .collect();

        let flow = self.flow;
        self.positions.sort_by(|a, b| {
            let (a, b) = (&a.rect, &b.rect);
            match flow {
                GridFlow::Row => a.top.total_cmp(&b.top).then(a.left.total_cmp(&b.left)),
                GridFlow::Column => a.left.total_cmp(&b.left).then(a.top.total_cmp(&b.top)),
            }
        });

        self.cells = self.positions.iter().map(|p| p.rect.origin()).collect();
        self.rebuild_index();
    }
}
