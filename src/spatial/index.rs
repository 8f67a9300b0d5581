use crate::core::geo::Point;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A projected node position tagged with its input index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedNode {
    pub index: usize,
    pub position: Point,
}

// --- rstar integration -------------------------------------------------------------------------

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y])
    }
}

impl PointDistance for IndexedNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position.x - point[0];
        let dy = self.position.y - point[1];
        dx * dx + dy * dy
    }
}

/// Nearest-node lookup over the projected node positions
pub struct NodeIndex {
    rtree: RTree<IndexedNode>,
}

impl NodeIndex {
    /// Bulk-loads every finite position; non-finite nodes are unreachable
    pub fn new(positions: &[Point]) -> Self {
        let items: Vec<IndexedNode> = positions
            .iter()
            .enumerate()
            .filter(|(_, position)| position.is_finite())
            .map(|(index, &position)| IndexedNode { index, position })
            .collect();
        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    /// Index of the nearest node; equidistant nodes resolve to the lowest index
    pub fn nearest(&self, point: &Point) -> Option<usize> {
        let query = [point.x, point.y];
        let mut candidates = self.rtree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, best) = candidates.next()?;

        let tied = candidates
            .take_while(|(_, distance)| *distance <= best)
            .map(|(node, _)| node.index);
        Some(tied.fold(first.index, usize::min))
    }

    /// Indices of nodes within `radius` of `point`, nearest first
    pub fn within(&self, point: &Point, radius: f64) -> Vec<usize> {
        let query = [point.x, point.y];
        let mut found: Vec<(f64, usize)> = self
            .rtree
            .locate_within_distance(query, radius * radius)
            .map(|node| (node.distance_2(&query), node.index))
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        found.into_iter().map(|(_, index)| index).collect()
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }
}
