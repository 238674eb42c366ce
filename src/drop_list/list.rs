//! Single-axis sorting: items laid out along one row or column.
//!
//! Reorders are applied as translations along the axis. After each swap the
//! cached rectangles are moved by the same amount instead of being measured
//! again.

use tracing::trace;

use super::{CachedPosition, SortContext, SortResult, SortStrategy};
use crate::geometry::{Point, Rect};
use crate::types::{Direction, DragId, NodeId, Orientation, PointerDelta};

/// The last swap, used to avoid flip-flopping when the pointer rests on the
/// boundary between two items.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PreviousSwap {
    item: Option<DragId>,
    /// Direction along the axis when the swap happened.
    delta: i8,
    /// Whether the pointer was inside the swapped sibling afterwards.
    overlaps: bool,
}

/// Leading edge, trailing edge and size of `rect` along the list axis.
#[inline]
fn axis_extent(rect: &Rect, horizontal: bool) -> (f64, f64, f64) {
    if horizontal {
        (rect.left, rect.right(), rect.width)
    } else {
        (rect.top, rect.bottom(), rect.height)
    }
}

#[derive(Debug, Default)]
pub struct ListSortStrategy {
    pub orientation: Orientation,
    active: Vec<DragId>,
    positions: Vec<CachedPosition>,
    previous_swap: PreviousSwap,
}

impl ListSortStrategy {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Default::default()
        }
    }

    #[inline]
    fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    /// Index in the cached positions of the sibling under the pointer.
    fn index_from_pointer(
        &self,
        item: DragId,
        x: f64,
        y: f64,
        delta: Option<PointerDelta>,
        accept: &dyn Fn(usize, DragId) -> bool,
    ) -> Option<usize> {
        let horizontal = self.is_horizontal();

        let index = self.positions.iter().position(|position| {
            if position.item == item {
                return false;
            }

            if let Some(delta) = delta {
                let direction = delta.along(self.orientation);
                let swap = &self.previous_swap;
                if swap.item == Some(position.item) && swap.overlaps && direction == swap.delta {
                    return false;
                }
            }

            let rect = &position.rect;
            if horizontal {
                x >= rect.left.floor() && x < rect.right().floor()
            } else {
                y >= rect.top.floor() && y < rect.bottom().floor()
            }
        })?;

        accept(index, item).then_some(index)
    }

    /// Offset the dragged item moves by when it swaps into `new_position`.
    fn item_offset(&self, current: &Rect, new: &Rect, delta: i8) -> f64 {
        if self.is_horizontal() {
            let mut offset = new.left - current.left;
            if delta == -1 {
                offset += new.width - current.width;
            }
            offset
        } else {
            let mut offset = new.top - current.top;
            if delta == -1 {
                offset += new.height - current.height;
            }
            offset
        }
    }

    /// Offset every sibling between the old and new index moves by: the
    /// dragged item's size plus the gap it leaves on its trailing edge.
    fn sibling_offset(&self, current_index: usize, delta: i8) -> f64 {
        let current = &self.positions[current_index].rect;
        let immediate = if delta == -1 {
            self.positions.get(current_index + 1)
        } else {
            current_index.checked_sub(1).and_then(|i| self.positions.get(i))
        };

        let horizontal = self.is_horizontal();
        let (current_start, current_end, size) = axis_extent(current, horizontal);

        let mut offset = size * f64::from(delta);
        if let Some(sibling) = immediate {
            let (sibling_start, sibling_end, _) = axis_extent(&sibling.rect, horizontal);
            if delta == -1 {
                offset -= sibling_start - current_end;
            } else {
                offset += current_start - sibling_end;
            }
        }
        offset
    }

    /// Whether a pointer entering from outside lies before the first item.
    fn should_enter_as_first_child(&self, x: f64, y: f64) -> bool {
        let (Some(first_active), Some(first), Some(last)) =
            (self.active.first(), self.positions.first(), self.positions.last())
        else {
            return false;
        };

        let reversed = first.item != *first_active;
        if reversed {
            if self.is_horizontal() {
                x >= last.rect.right()
            } else {
                y >= last.rect.bottom()
            }
        } else if self.is_horizontal() {
            x <= first.rect.left
        } else {
            y <= first.rect.top
        }
    }
}

impl SortStrategy for ListSortStrategy {
    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

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
        let new_index = index.or_else(|| self.index_from_pointer(item, x, y, None, accept));

        let mut reference = new_index.and_then(|i| self.active.get(i).copied());
        if reference == Some(item) {
            reference = new_index.and_then(|i| self.active.get(i + 1).copied());
        }
        let before_last = new_index.is_none_or(|i| i + 1 < self.active.len());
        if reference.is_none() && before_last && self.should_enter_as_first_child(x, y) {
            reference = self.active.first().copied();
        }

        if let Some(current) = self.active.iter().position(|a| *a == item) {
            self.active.remove(current);
        }

        let placeholder = ctx.placeholder(item);
        match reference.filter(|r| *r != item && !ctx.is_dragging(*r)) {
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
        pointer_delta: PointerDelta,
        accept: &dyn Fn(usize, DragId) -> bool,
    ) -> Option<SortResult> {
        let new_index = self.index_from_pointer(item, x, y, Some(pointer_delta), accept)?;
        let current_index = self.positions.iter().position(|p| p.item == item)?;
        let horizontal = self.is_horizontal();

        let current_rect = self.positions[current_index].rect;
        let new_rect = self.positions[new_index].rect;
        let sibling_at_new_position = self.positions[new_index].item;
        let delta: i8 = if current_index > new_index { 1 } else { -1 };

        let item_offset = self.item_offset(&current_rect, &new_rect, delta);
        let sibling_offset = self.sibling_offset(current_index, delta);

        let old_order: Vec<DragId> = self.positions.iter().map(|p| p.item).collect();
        let moved = self.positions.remove(current_index);
        self.positions.insert(new_index, moved);

        for (index, position) in self.positions.iter_mut().enumerate() {
            if old_order[index] == position.item {
                continue;
            }

            let is_dragged = position.item == item;
            let offset = if is_dragged { item_offset } else { sibling_offset };
            let node = if is_dragged { ctx.placeholder(item) } else { ctx.root(position.item) };

            let amount = if horizontal {
                position.offset.x += offset;
                position.rect.adjust(0.0, offset);
                Point::new(position.offset.x.round(), 0.0)
            } else {
                position.offset.y += offset;
                position.rect.adjust(offset, 0.0);
                Point::new(0.0, position.offset.y.round())
            };
            if let Some(node) = node {
                ctx.host.set_transform(node, Some(amount));
            }
        }

        self.previous_swap = PreviousSwap {
            item: Some(sibling_at_new_position),
            delta: pointer_delta.along(self.orientation),
            overlaps: new_rect.contains_point(x, y),
        };

        trace!(current_index, new_index, item_offset, sibling_offset, "list sorted");
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
        self.previous_swap = PreviousSwap::default();
    }

    fn item_index(&self, item: DragId, direction: Direction) -> Option<usize> {
        if self.is_horizontal() && direction == Direction::Rtl {
            self.positions.iter().rev().position(|p| p.item == item)
        } else {
            self.positions.iter().position(|p| p.item == item)
        }
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
    }

    fn cache_item_positions(&mut self, ctx: &SortContext<'_>) {
        let horizontal = self.is_horizontal();
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

        self.positions.sort_by(|a, b| {
            let (a, b) = if horizontal {
                (a.rect.left, b.rect.left)
            } else {
                (a.rect.top, b.rect.top)
            };
            a.total_cmp(&b)
        });
    }
}
