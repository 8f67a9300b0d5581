//! Voronoi tessellation of the viewport around the node positions.
//!
//! Each cell starts as the viewport rectangle and is clipped by the
//! perpendicular bisector against every other node. The node sets this map
//! deals with are small, so the quadratic build is cheaper in practice than
//! a sweep and keeps degenerate inputs easy to reason about.

use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::rendering::path::PathData;
use crate::spatial::clip::clip_half_plane;
use crate::spatial::index::NodeIndex;
use geo::{BoundingRect, Contains};
use geo_types::{Coord, LineString, Polygon};

/// Screen region closer to one node than to any other
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub index: usize,
    /// Convex, open ring; empty for a node that owns no area
    pub polygon: Vec<Point>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.polygon.len() < 3
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self.polygon.iter().map(|p| Coord::from(*p)).collect();
        Polygon::new(LineString::from(coords), Vec::new())
    }

    pub fn path(&self) -> PathData {
        PathData::polygon(&self.polygon)
    }

    /// Centre of the cell's bounding box
    pub fn centroid(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        self.to_polygon()
            .bounding_rect()
            .map(|rect| Point::from(rect.center()))
    }

    /// Strict containment; points on the cell boundary are not contained
    pub fn contains(&self, point: &Point) -> bool {
        !self.is_empty() && self.to_polygon().contains(&Coord::from(*point))
    }
}

pub struct Tessellation {
    rect: Bounds,
    cells: Vec<Cell>,
    index: NodeIndex,
}

impl Tessellation {
    /// Builds one cell per input position, in input order.
    ///
    /// Coincident positions keep the cell on the earliest one; later
    /// duplicates and non-finite positions get empty cells.
    pub fn compute(positions: &[Point], rect: Bounds) -> Self {
        let outline = rect.corners().to_vec();
        let cells = positions
            .iter()
            .enumerate()
            .map(|(i, site)| Cell {
                index: i,
                polygon: cell_polygon(i, site, positions, &outline),
            })
            .collect::<Vec<_>>();

        log::debug!(
            "tessellated {} nodes over {}x{}, {} empty cells",
            positions.len(),
            rect.width(),
            rect.height(),
            cells.iter().filter(|cell| cell.is_empty()).count()
        );

        Self {
            rect,
            cells,
            index: NodeIndex::new(positions),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn rect(&self) -> Bounds {
        self.rect
    }

    /// Node whose cell contains `point`; `None` outside the rectangle
    pub fn cell_at(&self, point: &Point) -> Option<usize> {
        if !self.rect.contains(point) {
            return None;
        }
        self.index.nearest(point)
    }

    pub fn node_index(&self) -> &NodeIndex {
        &self.index
    }
}

fn cell_polygon(i: usize, site: &Point, positions: &[Point], outline: &[Point]) -> Vec<Point> {
    if !site.is_finite() {
        return Vec::new();
    }

    let mut polygon = outline.to_vec();
    for (j, other) in positions.iter().enumerate() {
        if j == i || !other.is_finite() {
            continue;
        }
        if other == site {
            if j < i {
                return Vec::new();
            }
            continue;
        }

        // |p - site|² <= |p - other|²  ⇔  (other - site)·p <= (|other|² - |site|²) / 2
        let normal = other.subtract(site);
        let offset = (other.dot(other) - site.dot(site)) / 2.0;
        polygon = clip_half_plane(&polygon, normal, offset);
        if polygon.is_empty() {
            break;
        }
    }
    polygon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites() -> Vec<Point> {
        vec![
            Point::new(120.0, 200.0),
            Point::new(600.0, 150.0),
            Point::new(400.0, 700.0),
            Point::new(180.0, 1000.0),
            Point::new(700.0, 1100.0),
            Point::new(410.0, 420.0),
        ]
    }

    #[test]
    fn test_every_sample_lies_in_exactly_one_cell() {
        let positions = sites();
        let tessellation = Tessellation::compute(&positions, Bounds::from_size(800.0, 1200.0));

        for ix in 0..40 {
            for iy in 0..60 {
                let point = Point::new(ix as f64 * 20.0 + 7.3, iy as f64 * 20.0 + 3.1);
                let mut distances: Vec<(f64, usize)> = positions
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (p.distance_to(&point), i))
                    .collect();
                distances.sort_by(|a, b| a.0.total_cmp(&b.0));
                if distances[1].0 - distances[0].0 < 1e-6 {
                    continue;
                }

                let owners: Vec<usize> = tessellation
                    .cells()
                    .iter()
                    .filter(|cell| cell.contains(&point))
                    .map(|cell| cell.index)
                    .collect();
                assert_eq!(owners, vec![distances[0].1], "sample {:?}", point);
                assert_eq!(tessellation.cell_at(&point), Some(distances[0].1));
            }
        }
    }

    #[test]
    fn test_single_node_owns_rectangle() {
        let rect = Bounds::from_size(300.0, 200.0);
        let tessellation = Tessellation::compute(&[Point::new(10.0, 10.0)], rect);
        let cell = &tessellation.cells()[0];
        assert_eq!(cell.polygon.len(), 4);
        assert_eq!(cell.centroid(), Some(Point::new(150.0, 100.0)));
    }

    #[test]
    fn test_coincident_nodes_keep_earliest() {
        let positions = vec![
            Point::new(50.0, 50.0),
            Point::new(150.0, 50.0),
            Point::new(50.0, 50.0),
        ];
        let tessellation = Tessellation::compute(&positions, Bounds::from_size(200.0, 100.0));
        assert!(!tessellation.cells()[0].is_empty());
        assert!(tessellation.cells()[2].is_empty());
        assert_eq!(tessellation.cell_at(&Point::new(40.0, 40.0)), Some(0));
    }

    #[test]
    fn test_outside_rect_has_no_cell() {
        let tessellation =
            Tessellation::compute(&sites(), Bounds::from_size(800.0, 1200.0));
        assert_eq!(tessellation.cell_at(&Point::new(-5.0, 10.0)), None);
        assert_eq!(tessellation.cell_at(&Point::new(10.0, 1300.0)), None);
    }

    #[test]
    fn test_cell_path_is_closed() {
        let tessellation =
            Tessellation::compute(&sites(), Bounds::from_size(800.0, 1200.0));
        let svg = tessellation.cells()[2].path().to_string();
        assert!(svg.starts_with('M') && svg.ends_with('Z'));
        assert!(tessellation.cells()[2].centroid().is_some());
    }
}
