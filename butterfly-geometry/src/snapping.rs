//! Nearest-segment lookup for snapping a stop onto a route polyline
//! (§4.3 steps 1-3), independent of whatever graph the assignment feeds.

use butterfly_common::{Coordinate, SpatialBackend};

use crate::geometry::point_to_segment_dist;
use crate::spatial_index::{LinearIndex, RTreeIndex, Rect, SpatialIndex};

/// Builds a segment index over `segments`, keyed by segment index.
pub fn build_segment_index(
    backend: SpatialBackend,
    segments: &[(Coordinate, Coordinate)],
) -> Box<dyn SpatialIndex<usize>> {
    let mut index: Box<dyn SpatialIndex<usize>> = match backend {
        SpatialBackend::Default => Box::new(LinearIndex::new()),
        SpatialBackend::Spatial => Box::new(RTreeIndex::new()),
    };
    for (i, (a, b)) in segments.iter().enumerate() {
        index.insert(i, Rect::from_segment(*a, *b), i);
    }
    index
}

/// Finds the index of the segment nearest to `point`.
///
/// Queries the index with a box of half-width `box_size` centred on
/// `point`, then evaluates exact point-to-segment distance against every
/// candidate, breaking ties toward the smaller segment index. If the box is
/// too small to catch any segment (the stop sits further than `box_size`
/// from every candidate's bounding rectangle), falls back to scanning every
/// segment directly so a nearest segment is always found.
pub fn nearest_segment(
    index: &dyn SpatialIndex<usize>,
    segments: &[(Coordinate, Coordinate)],
    point: Coordinate,
    box_size: f64,
) -> Option<usize> {
    let query = Rect::new(
        point.x - box_size,
        point.y - box_size,
        point.x + box_size,
        point.y + box_size,
    );

    let candidates = index.intersection(query);
    let search_space: Box<dyn Iterator<Item = usize>> = if candidates.is_empty() {
        Box::new(0..segments.len())
    } else {
        Box::new(candidates.into_iter().map(|(_, &seg_idx)| seg_idx))
    };

    best_segment(segments, point, search_space)
}

fn best_segment(
    segments: &[(Coordinate, Coordinate)],
    point: Coordinate,
    candidates: impl Iterator<Item = usize>,
) -> Option<usize> {
    candidates
        .map(|seg_idx| {
            let (a, b) = segments[seg_idx];
            (point_to_segment_dist(point, a, b), seg_idx)
        })
        .min_by(|(d1, i1), (d2, i2)| d1.partial_cmp(d2).unwrap().then(i1.cmp(i2)))
        .map(|(_, idx)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs() -> Vec<(Coordinate, Coordinate)> {
        vec![
            (Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)),
            (Coordinate::new(10.0, 0.0), Coordinate::new(20.0, 0.0)),
            (Coordinate::new(20.0, 0.0), Coordinate::new(30.0, 0.0)),
        ]
    }

    #[test]
    fn finds_nearest_segment_within_box() {
        let segments = segs();
        let index = build_segment_index(SpatialBackend::Spatial, &segments);
        let nearest = nearest_segment(index.as_ref(), &segments, Coordinate::new(15.0, 1.0), 150.0);
        assert_eq!(nearest, Some(1));
    }

    #[test]
    fn default_and_spatial_backends_agree() {
        let segments = segs();
        let linear = build_segment_index(SpatialBackend::Default, &segments);
        let tree = build_segment_index(SpatialBackend::Spatial, &segments);
        for point in [
            Coordinate::new(5.0, 2.0),
            Coordinate::new(25.0, -3.0),
            Coordinate::new(10.0, 0.5),
        ] {
            assert_eq!(
                nearest_segment(linear.as_ref(), &segments, point, 150.0),
                nearest_segment(tree.as_ref(), &segments, point, 150.0),
            );
        }
    }

    #[test]
    fn falls_back_to_full_scan_when_box_misses_everything() {
        let segments = segs();
        let index = build_segment_index(SpatialBackend::Spatial, &segments);
        // A point far away with a tiny box: the window query returns nothing,
        // but a nearest segment must still be found.
        let nearest = nearest_segment(index.as_ref(), &segments, Coordinate::new(1000.0, 1000.0), 1.0);
        assert_eq!(nearest, Some(2));
    }

    #[test]
    fn ties_break_toward_smaller_segment_index() {
        // Point equidistant from the shared endpoint of two segments.
        let segments = vec![
            (Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)),
            (Coordinate::new(10.0, 0.0), Coordinate::new(20.0, 0.0)),
        ];
        let index = build_segment_index(SpatialBackend::Default, &segments);
        let nearest = nearest_segment(index.as_ref(), &segments, Coordinate::new(10.0, 5.0), 150.0);
        assert_eq!(nearest, Some(0));
    }
}
