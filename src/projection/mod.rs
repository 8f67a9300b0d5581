//! Geographic to screen projection.
//!
//! A [`Projection`] is a raw projection (conformal conic, or Mercator as the
//! degenerate case) preceded by a longitude rotation and followed by a
//! uniform scale and translation. [`Projection::fit_extent`] chooses that
//! scale and translation so a [`GeoBounds`] window fills a pixel rectangle.

pub mod conic;
pub mod path;

pub use conic::RawProjection;
pub use path::{ClipMode, PathGenerator};

use crate::core::bounds::Bounds;
use crate::core::config::ProjectionConfig;
use crate::core::geo::{GeoBounds, GeoPoint, Point};
use crate::core::viewport::Viewport;

/// Scale of an unfitted projection, matching common projection libraries
const DEFAULT_SCALE: f64 = 150.0;
const DEFAULT_TRANSLATE: Point = Point { x: 480.0, y: 250.0 };

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    raw: RawProjection,
    /// Longitude rotation in radians, added before projecting
    rotate: f64,
    center: GeoPoint,
    scale: f64,
    /// Screen position of raw (0, 0)
    offset: Point,
}

impl Projection {
    /// Unfitted projection that maps `center` to the default translate
    pub fn new(raw: RawProjection, center: GeoPoint, rotate_degrees: f64) -> Self {
        let mut projection = Self {
            raw,
            rotate: rotate_degrees.to_radians(),
            center,
            scale: DEFAULT_SCALE,
            offset: Point::default(),
        };
        let (cx, cy) = raw.forward(center.lon.to_radians(), center.lat.to_radians());
        projection.offset = Point::new(
            DEFAULT_TRANSLATE.x - DEFAULT_SCALE * cx,
            DEFAULT_TRANSLATE.y + DEFAULT_SCALE * cy,
        );
        projection
    }

    /// Conformal conic projection configured and fitted for a viewport
    pub fn from_config(config: &ProjectionConfig, viewport: &Viewport) -> Self {
        let raw = RawProjection::conic_conformal(config.parallels);
        let mut projection = Self::new(raw, config.center, config.rotate);
        projection.fit_extent(&config.bounds, &viewport.bounds());
        projection
    }

    /// Rescales and recentres so the projected corners of `bounds` fill
    /// `extent` with a uniform scale, centred along the slack axis.
    pub fn fit_extent(&mut self, bounds: &GeoBounds, extent: &Bounds) -> &mut Self {
        let corners: Vec<(f64, f64)> = bounds
            .fit_corners()
            .iter()
            .map(|corner| self.raw_point(corner))
            .collect();

        let mut fitted = Bounds::empty();
        for (x, y) in &corners {
            fitted.extend(&Point::new(*x, -*y));
        }

        let width = extent.width();
        let height = extent.height();
        let scale = [width / fitted.width(), height / fitted.height()]
            .into_iter()
            .filter(|s| s.is_finite() && *s > 0.0)
            .fold(f64::INFINITY, f64::min);
        let scale = if scale.is_finite() { scale } else { DEFAULT_SCALE };

        self.scale = scale;
        self.offset = Point::new(
            extent.min.x + (width - scale * (fitted.min.x + fitted.max.x)) / 2.0,
            extent.min.y + (height - scale * (fitted.min.y + fitted.max.y)) / 2.0,
        );

        log::debug!(
            "projection fitted to {}x{}: scale {:.3}, offset ({:.2}, {:.2})",
            width,
            height,
            self.scale,
            self.offset.x,
            self.offset.y
        );
        self
    }

    /// Forward map to screen coordinates
    pub fn project(&self, point: &GeoPoint) -> Point {
        let (x, y) = self.raw_point(point);
        Point::new(self.offset.x + self.scale * x, self.offset.y - self.scale * y)
    }

    /// Inverse map; `None` where the result is not finite
    pub fn invert(&self, point: &Point) -> Option<GeoPoint> {
        let x = (point.x - self.offset.x) / self.scale;
        let y = (self.offset.y - point.y) / self.scale;
        let (lambda, phi) = self.raw.inverse(x, y);
        let lon = GeoPoint::wrap_lon((lambda - self.rotate).to_degrees());
        let lat = phi.to_degrees();
        (lon.is_finite() && lat.is_finite()).then(|| GeoPoint::new(lon, lat))
    }

    /// Screen rectangle spanned by the projected corners of `bounds`
    pub fn projected_bounds(&self, bounds: &GeoBounds) -> Bounds {
        let corners = bounds.fit_corners().map(|corner| self.project(&corner));
        Bounds::from_points(corners.iter()).unwrap_or_default()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn raw(&self) -> RawProjection {
        self.raw
    }

    fn raw_point(&self, point: &GeoPoint) -> (f64, f64) {
        let lambda = wrap_radians(point.lon.to_radians() + self.rotate);
        self.raw.forward(lambda, point.lat.to_radians())
    }
}

fn wrap_radians(lambda: f64) -> f64 {
    use std::f64::consts::PI;
    if lambda > PI {
        lambda - 2.0 * PI
    } else if lambda < -PI {
        lambda + 2.0 * PI
    } else {
        lambda
    }
}
