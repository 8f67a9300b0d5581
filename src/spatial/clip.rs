//! Sutherland–Hodgman polygon clipping.
//!
//! Polygons are open rings: the closing edge from the last point back to the
//! first is implied. Clipping a convex polygon against a half-plane yields a
//! convex polygon, which is what the Voronoi builder relies on.

use crate::core::bounds::Bounds;
use crate::core::geo::Point;

/// Keeps the part of `polygon` where `normal · p <= offset`
pub fn clip_half_plane(polygon: &[Point], normal: Point, offset: f64) -> Vec<Point> {
    let Some(&last) = polygon.last() else {
        return Vec::new();
    };

    let side = |p: &Point| normal.dot(p) - offset;
    let mut output = Vec::with_capacity(polygon.len() + 1);
    let mut prev = last;
    let mut prev_side = side(&prev);

    for &current in polygon {
        let current_side = side(&current);
        let current_inside = current_side <= 0.0;
        let prev_inside = prev_side <= 0.0;

        if current_inside {
            if !prev_inside {
                output.push(intersect(prev, prev_side, current, current_side));
            }
            output.push(current);
        } else if prev_inside {
            output.push(intersect(prev, prev_side, current, current_side));
        }

        prev = current;
        prev_side = current_side;
    }

    output
}

/// Clips `polygon` to an axis-aligned rectangle
pub fn clip_to_rect(polygon: &[Point], rect: &Bounds) -> Vec<Point> {
    let planes = [
        (Point::new(-1.0, 0.0), -rect.min.x),
        (Point::new(1.0, 0.0), rect.max.x),
        (Point::new(0.0, -1.0), -rect.min.y),
        (Point::new(0.0, 1.0), rect.max.y),
    ];

    planes
        .iter()
        .fold(polygon.to_vec(), |ring, (normal, offset)| {
            clip_half_plane(&ring, *normal, *offset)
        })
}

/// Drops the explicit closing point GeoJSON rings carry
pub fn open_ring(points: &[Point]) -> &[Point] {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first == last => {
            &points[..points.len() - 1]
        }
        _ => points,
    }
}

/// Signed area (positive for counter-clockwise in a y-up frame)
pub fn signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

fn intersect(a: Point, a_side: f64, b: Point, b_side: f64) -> Point {
    let t = a_side / (a_side - b_side);
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}
