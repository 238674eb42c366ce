//! R-tree index over cached grid cell rectangles.
//!
//! Grid containers hit test the pointer against every cached item rectangle
//! on each move. The index keeps that at O(log n) for large grids.

use rstar::{AABB, RTree, RTreeObject};

use crate::geometry::Rect;
use crate::types::DragId;

/// A cached item rectangle stored in the tree.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub item: DragId,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(item: DragId, rect: &Rect) -> Self {
        Self {
            item,
            min_x: rect.left,
            min_y: rect.top,
            max_x: rect.right(),
            max_y: rect.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

/// Point queries over the items of one grid container.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Items whose rectangle contains the point (edges inclusive).
    pub fn query_point(&self, x: f64, y: f64) -> Vec<DragId> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .map(|entry| entry.item)
            .collect()
    }

    /// Replace every entry, bulk loading the tree.
    pub fn rebuild<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (DragId, &'a Rect)>,
    {
        let entries: Vec<SpatialEntry> = items
            .into_iter()
            .map(|(item, rect)| SpatialEntry::new(item, rect))
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
