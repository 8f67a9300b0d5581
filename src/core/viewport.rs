use crate::animation::easing::EasingType;
use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Size of the host drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// The `(0,0)–(width,height)` rectangle
    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// A viewport with no area cannot host a layout pass
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            crate::core::constants::DESIGN_WIDTH,
            crate::core::constants::DESIGN_HEIGHT,
        )
    }
}

/// Pan/zoom transform applied to every rendered group:
/// `screen = content * k + (x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Scale factor (1.0 = no scaling)
    pub k: f64,
    /// Translation in pixels
    pub x: f64,
    pub y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self {
            k: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Transform that magnifies by `k` and puts `focus` at `screen_center`
    pub fn centered_on(focus: Point, k: f64, screen_center: Point) -> Self {
        Self::new(k, screen_center.x - focus.x * k, screen_center.y - focus.y * k)
    }

    /// Check if this is effectively an identity transform
    pub fn is_identity(&self) -> bool {
        (self.k - 1.0).abs() < 1e-3 && self.x.abs() < 0.1 && self.y.abs() < 0.1
    }

    /// Content coordinates to screen coordinates
    pub fn apply(&self, point: &Point) -> Point {
        Point::new(point.x * self.k + self.x, point.y * self.k + self.y)
    }

    /// Screen coordinates back to content coordinates
    pub fn invert(&self, point: &Point) -> Point {
        Point::new((point.x - self.x) / self.k, (point.y - self.y) / self.k)
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Translate by a content-space offset (scaled by `k`)
    pub fn translate_by(&self, dx: f64, dy: f64) -> Transform {
        Transform::new(self.k, self.x + self.k * dx, self.y + self.k * dy)
    }

    /// Translate by a screen-space offset
    pub fn pan_by(&self, delta: &Point) -> Transform {
        Transform::new(self.k, self.x + delta.x, self.y + delta.y)
    }

    /// Rescale about a fixed screen point, clamping `k` to `scale_extent`
    pub fn scale_about(&self, factor: f64, focus: &Point, scale_extent: [f64; 2]) -> Transform {
        let k = (self.k * factor).clamp(scale_extent[0], scale_extent[1]);
        let content = self.invert(focus);
        Transform::new(k, focus.x - content.x * k, focus.y - content.y * k)
    }

    /// Whether the translate is within `tolerance` of another transform's
    pub fn translate_near(&self, other: &Transform, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }

    /// Keeps the visible `extent` inside `translate_extent` (both in content
    /// coordinates at identity). When the translate extent is smaller than
    /// the visible area along an axis, the content is centred on that axis.
    pub fn constrain(&self, extent: &Bounds, translate_extent: &Bounds) -> Transform {
        let dx0 = self.invert_x(extent.min.x) - translate_extent.min.x;
        let dx1 = self.invert_x(extent.max.x) - translate_extent.max.x;
        let dy0 = self.invert_y(extent.min.y) - translate_extent.min.y;
        let dy1 = self.invert_y(extent.max.y) - translate_extent.max.y;

        self.translate_by(axis_correction(dx0, dx1), axis_correction(dy0, dy1))
    }

    /// Interpolate between two transforms with easing
    pub fn lerp_with_easing(&self, other: &Transform, t: f64, easing: EasingType) -> Transform {
        let eased_t = easing.apply(t);
        Transform {
            k: self.k + (other.k - self.k) * eased_t,
            x: self.x + (other.x - self.x) * eased_t,
            y: self.y + (other.y - self.y) * eased_t,
        }
    }
}

fn axis_correction(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        (d0 + d1) / 2.0
    } else {
        let low = d0.min(0.0);
        if low != 0.0 {
            low
        } else {
            d1.max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_invert() {
        let transform = Transform::new(4.0, -100.0, 50.0);
        let point = Point::new(30.0, 40.0);
        let screen = transform.apply(&point);
        assert_eq!(screen, Point::new(20.0, 210.0));
        assert_eq!(transform.invert(&screen), point);
    }

    #[test]
    fn test_centered_on_puts_focus_at_center() {
        let center = Point::new(400.0, 600.0);
        let transform = Transform::centered_on(Point::new(100.0, 200.0), 4.0, center);
        assert_eq!(transform.apply(&Point::new(100.0, 200.0)), center);
    }

    #[test]
    fn test_scale_about_keeps_focus_fixed() {
        let transform = Transform::identity();
        let focus = Point::new(200.0, 300.0);
        let zoomed = transform.scale_about(2.0, &focus, [1.0, 8.0]);
        assert_eq!(zoomed.k, 2.0);
        assert_eq!(zoomed.apply(&focus), focus);

        let clamped = zoomed.scale_about(100.0, &focus, [1.0, 8.0]);
        assert_eq!(clamped.k, 8.0);
    }

    #[test]
    fn test_constrain_blocks_panning_past_extent() {
        let extent = Bounds::from_size(800.0, 600.0);
        let translate_extent = Bounds::from_coords(-100.0, -100.0, 900.0, 700.0);

        // Panning 50px right is inside the margin
        let inside = Transform::new(1.0, 50.0, 0.0).constrain(&extent, &translate_extent);
        assert_eq!(inside, Transform::new(1.0, 50.0, 0.0));

        // Panning 500px right is pulled back to the margin edge
        let outside = Transform::new(1.0, 500.0, 0.0).constrain(&extent, &translate_extent);
        assert!((outside.x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_constrain_centres_small_extent() {
        let extent = Bounds::from_size(800.0, 600.0);
        let translate_extent = Bounds::from_coords(300.0, 200.0, 500.0, 400.0);
        let constrained = Transform::new(1.0, 120.0, -40.0).constrain(&extent, &translate_extent);
        assert_eq!(constrained, Transform::identity());
    }

    #[test]
    fn test_lerp_endpoints() {
        let from = Transform::identity();
        let to = Transform::new(4.0, -800.0, -1200.0);
        assert_eq!(from.lerp_with_easing(&to, 0.0, EasingType::EaseInOut), from);
        assert_eq!(from.lerp_with_easing(&to, 1.0, EasingType::EaseInOut), to);
    }
}
