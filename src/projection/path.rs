use crate::core::bounds::Bounds;
use crate::core::geo::{GeoBounds, GeoPoint, Point};
use crate::projection::Projection;
use crate::data::regions::{GeoPolygon, Region};
use crate::rendering::path::PathData;
use crate::spatial::clip::{clip_to_rect, open_ring};
use serde::{Deserialize, Serialize};

/// How rings are restricted to the geographic bounds before projecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClipMode {
    /// Drop every point outside the bounds
    #[default]
    Filter,
    /// Truncate the ring at the bounds edges, inserting edge crossings
    Clip,
}

/// Turns geographic rings into screen-space paths
pub struct PathGenerator<'a> {
    projection: &'a Projection,
    bounds: GeoBounds,
    clip_mode: ClipMode,
    min_ring_points: usize,
}

impl<'a> PathGenerator<'a> {
    pub fn new(projection: &'a Projection, bounds: GeoBounds) -> Self {
        Self {
            projection,
            bounds,
            clip_mode: ClipMode::Filter,
            min_ring_points: 1,
        }
    }

    pub fn with_clip_mode(mut self, clip_mode: ClipMode) -> Self {
        self.clip_mode = clip_mode;
        self
    }

    /// Rings with fewer surviving points are treated as degenerate
    pub fn with_min_ring_points(mut self, min_ring_points: usize) -> Self {
        self.min_ring_points = min_ring_points.max(1);
        self
    }

    /// Restricts a ring to the bounds; `None` when too few points survive
    pub fn clip_ring(&self, ring: &[GeoPoint]) -> Option<Vec<GeoPoint>> {
        let kept: Vec<GeoPoint> = match self.clip_mode {
            ClipMode::Filter => ring
                .iter()
                .copied()
                .filter(|point| self.bounds.contains(point))
                .collect(),
            ClipMode::Clip => {
                let planar: Vec<Point> = ring.iter().map(|p| Point::new(p.lon, p.lat)).collect();
                let rect = Bounds::from_coords(
                    self.bounds.west(),
                    self.bounds.south(),
                    self.bounds.east(),
                    self.bounds.north(),
                );
                clip_to_rect(open_ring(&planar), &rect)
                    .into_iter()
                    .map(|p| GeoPoint::new(p.x, p.y))
                    .collect()
            }
        };

        if kept.len() < self.min_ring_points {
            log::debug!(
                "skipping ring: {} of {} points inside bounds",
                kept.len(),
                ring.len()
            );
            return None;
        }
        Some(kept)
    }

    /// Clipped and projected ring
    pub fn project_ring(&self, ring: &[GeoPoint]) -> Option<Vec<Point>> {
        let projected: Vec<Point> = self
            .clip_ring(ring)?
            .iter()
            .map(|point| self.projection.project(point))
            .filter(Point::is_finite)
            .collect();
        (!projected.is_empty()).then_some(projected)
    }

    /// Closed screen path for a ring, `None` for degenerate rings
    pub fn ring_path(&self, ring: &[GeoPoint]) -> Option<PathData> {
        self.project_ring(ring).map(|points| PathData::polygon(&points))
    }

    /// Every surviving ring of a polygon as one path; `None` if none survive
    pub fn polygon_path(&self, polygon: &GeoPolygon) -> Option<PathData> {
        let mut path = PathData::new();
        for ring in polygon.rings.iter().filter_map(|ring| self.ring_path(ring)) {
            path.append(&ring);
        }
        (!path.is_empty()).then_some(path)
    }

    /// Path for a whole region, skipping degenerate polygons
    pub fn region_path(&self, region: &Region) -> Option<PathData> {
        let mut path = PathData::new();
        for polygon in region.polygons.iter().filter_map(|p| self.polygon_path(p)) {
            path.append(&polygon);
        }
        if path.is_empty() {
            log::debug!("region {} has no drawable rings", region.id);
            return None;
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProjectionConfig;
    use crate::core::viewport::Viewport;

    fn generator_parts() -> (Projection, GeoBounds) {
        let config = ProjectionConfig::default();
        (
            Projection::from_config(&config, &Viewport::new(800.0, 1200.0)),
            config.bounds,
        )
    }

    fn crossing_ring() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(30.0, 60.0),
            GeoPoint::new(45.0, 60.0),
            GeoPoint::new(45.0, 65.0),
            GeoPoint::new(30.0, 65.0),
            GeoPoint::new(30.0, 60.0),
        ]
    }

    #[test]
    fn test_filter_drops_outside_points() {
        let (projection, bounds) = generator_parts();
        let generator = PathGenerator::new(&projection, bounds);
        let kept = generator.clip_ring(&crossing_ring()).unwrap();
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn test_clip_truncates_at_edge() {
        let (projection, bounds) = generator_parts();
        let generator = PathGenerator::new(&projection, bounds).with_clip_mode(ClipMode::Clip);
        let kept = generator.clip_ring(&crossing_ring()).unwrap();
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().any(|p| (p.lon - 39.0).abs() < 1e-9));
        assert!(kept.iter().all(|p| p.lon <= 39.0 + 1e-9));
    }

    #[test]
    fn test_small_rings_are_skipped() {
        let (projection, bounds) = generator_parts();
        let generator = PathGenerator::new(&projection, bounds).with_min_ring_points(50);
        assert!(generator.ring_path(&crossing_ring()).is_none());
        assert!(generator.ring_path(&[]).is_none());
    }

    #[test]
    fn test_region_path_skips_degenerate_polygons() {
        let (projection, bounds) = generator_parts();
        let generator = PathGenerator::new(&projection, bounds).with_min_ring_points(3);
        let outside = vec![GeoPoint::new(100.0, 10.0); 5];
        let region = Region::new(
            "XX",
            vec![
                GeoPolygon::new(vec![crossing_ring()]),
                GeoPolygon::new(vec![outside.clone()]),
            ],
        );
        let path = generator.region_path(&region).unwrap();
        let moves = path.to_string().matches('M').count();
        assert_eq!(moves, 1);

        let hopeless = Region::new("YY", vec![GeoPolygon::new(vec![outside])]);
        assert!(generator.region_path(&hopeless).is_none());
    }

    #[test]
    fn test_ring_path_is_closed() {
        let (projection, bounds) = generator_parts();
        let generator = PathGenerator::new(&projection, bounds);
        let path = generator.ring_path(&crossing_ring()).unwrap();
        assert!(path.to_string().starts_with('M'));
        assert!(path.to_string().ends_with('Z'));
    }
}
