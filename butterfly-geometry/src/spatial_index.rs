//! Rectangle-indexed segment storage for nearest-segment queries (§4.2).

use rstar::{RTree, RTreeObject, AABB};

/// An axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// The minimal bounding rectangle of segment `a`-`b`.
    pub fn from_segment(a: butterfly_common::Coordinate, b: butterfly_common::Coordinate) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

/// Stores segments (or any payload) indexed by bounding rectangle, and
/// answers window-intersection queries. `insert` is build-time only; callers
/// must `close()` (or drop the index) once queries are done.
pub trait SpatialIndex<T> {
    fn insert(&mut self, id: usize, rect: Rect, payload: T);
    fn intersection(&self, query: Rect) -> Vec<(usize, &T)>;
    fn count(&self, query: Rect) -> usize;
    fn close(&mut self);
}

/// Naive linear-scan backend. A permitted fallback for testing, selectable
/// via `SpatialBackend::Default`.
#[derive(Debug, Default)]
pub struct LinearIndex<T> {
    entries: Vec<(usize, Rect, T)>,
}

impl<T> LinearIndex<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> SpatialIndex<T> for LinearIndex<T> {
    fn insert(&mut self, id: usize, rect: Rect, payload: T) {
        self.entries.push((id, rect, payload));
    }

    fn intersection(&self, query: Rect) -> Vec<(usize, &T)> {
        self.entries
            .iter()
            .filter(|(_, rect, _)| rect.intersects(&query))
            .map(|(id, _, payload)| (*id, payload))
            .collect()
    }

    fn count(&self, query: Rect) -> usize {
        self.entries.iter().filter(|(_, rect, _)| rect.intersects(&query)).count()
    }

    fn close(&mut self) {
        self.entries.clear();
    }
}

struct Entry<T> {
    id: usize,
    rect: Rect,
    payload: T,
}

impl<T> RTreeObject for Entry<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.rect.min_x, self.rect.min_y], [self.rect.max_x, self.rect.max_y])
    }
}

/// R-tree backed backend, selectable via `SpatialBackend::Spatial`.
pub struct RTreeIndex<T> {
    tree: RTree<Entry<T>>,
}

impl<T> RTreeIndex<T> {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }
}

impl<T> Default for RTreeIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpatialIndex<T> for RTreeIndex<T> {
    fn insert(&mut self, id: usize, rect: Rect, payload: T) {
        self.tree.insert(Entry { id, rect, payload });
    }

    fn intersection(&self, query: Rect) -> Vec<(usize, &T)> {
        let envelope = AABB::from_corners([query.min_x, query.min_y], [query.max_x, query.max_y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| (entry.id, &entry.payload))
            .collect()
    }

    fn count(&self, query: Rect) -> usize {
        self.intersection(query).len()
    }

    fn close(&mut self) {
        self.tree = RTree::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use butterfly_common::Coordinate;

    fn sample_rects() -> Vec<Rect> {
        vec![
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(5.0, 5.0, 6.0, 6.0),
            Rect::new(2.0, 2.0, 3.0, 3.0),
        ]
    }

    #[test]
    fn rect_from_segment_normalizes_min_max() {
        let a = Coordinate::new(5.0, -1.0);
        let b = Coordinate::new(-2.0, 3.0);
        let rect = Rect::from_segment(a, b);
        assert_eq!(rect, Rect::new(-2.0, -1.0, 5.0, 3.0));
    }

    #[test]
    fn linear_and_rtree_backends_agree_on_intersection() {
        let mut linear = LinearIndex::new();
        let mut tree = RTreeIndex::new();
        for (id, rect) in sample_rects().into_iter().enumerate() {
            linear.insert(id, rect, id);
            tree.insert(id, rect, id);
        }

        let query = Rect::new(0.5, 0.5, 2.5, 2.5);
        let mut linear_ids: Vec<usize> = linear.intersection(query).into_iter().map(|(id, _)| id).collect();
        let mut tree_ids: Vec<usize> = tree.intersection(query).into_iter().map(|(id, _)| id).collect();
        linear_ids.sort();
        tree_ids.sort();
        assert_eq!(linear_ids, tree_ids);
        assert_eq!(linear.count(query), tree.count(query));
    }

    #[test]
    fn close_empties_linear_index() {
        let mut linear = LinearIndex::new();
        linear.insert(0, Rect::new(0.0, 0.0, 1.0, 1.0), 0usize);
        linear.close();
        assert_eq!(linear.intersection(Rect::new(-10.0, -10.0, 10.0, 10.0)).len(), 0);
    }
}
