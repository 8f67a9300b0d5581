use serde::{Deserialize, Serialize};

/// A geographical coordinate, longitude first as in GeoJSON
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a new coordinate
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lon >= -180.0 && self.lon <= 180.0
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lon(lon: f64) -> f64 {
        let wrapped = lon % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(coord: [f64; 2]) -> Self {
        Self::new(coord[0], coord[1])
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lon, point.lat]
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for geo_types::Coord<f64> {
    fn from(point: Point) -> Self {
        geo_types::Coord {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<geo_types::Coord<f64>> for Point {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Point::new(coord.x, coord.y)
    }
}

/// The geographic window the map displays.
///
/// Ranges may be given in either order (the default window lists
/// latitude north-first); accessors always return normalized values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub longitude: [f64; 2],
    pub latitude: [f64; 2],
}

impl GeoBounds {
    pub fn new(longitude: [f64; 2], latitude: [f64; 2]) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn west(&self) -> f64 {
        self.longitude[0].min(self.longitude[1])
    }

    pub fn east(&self) -> f64 {
        self.longitude[0].max(self.longitude[1])
    }

    pub fn south(&self) -> f64 {
        self.latitude[0].min(self.latitude[1])
    }

    pub fn north(&self) -> f64 {
        self.latitude[0].max(self.latitude[1])
    }

    /// Checks if the bounds contain a point (inclusive on every edge)
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lon >= self.west()
            && point.lon <= self.east()
            && point.lat >= self.south()
            && point.lat <= self.north()
    }

    /// The two corner points used to fit a projection, in declaration order
    pub fn fit_corners(&self) -> [GeoPoint; 2] {
        [
            GeoPoint::new(self.longitude[0], self.latitude[0]),
            GeoPoint::new(self.longitude[1], self.latitude[1]),
        ]
    }

    /// All four corners: north-west, north-east, south-east, south-west
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.west(), self.north()),
            GeoPoint::new(self.east(), self.north()),
            GeoPoint::new(self.east(), self.south()),
            GeoPoint::new(self.west(), self.south()),
        ]
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.west() + self.east()) / 2.0,
            (self.south() + self.north()) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_creation() {
        let coord = GeoPoint::new(18.07, 59.33);
        assert_eq!(coord.lon, 18.07);
        assert_eq!(coord.lat, 59.33);
        assert!(coord.is_valid());
        assert!(!GeoPoint::new(200.0, 0.0).is_valid());
    }

    #[test]
    fn test_wrap_lon() {
        assert_eq!(GeoPoint::wrap_lon(190.0), -170.0);
        assert_eq!(GeoPoint::wrap_lon(-190.0), 170.0);
        assert_eq!(GeoPoint::wrap_lon(45.0), 45.0);
    }

    #[test]
    fn test_bounds_normalize_reversed_ranges() {
        let bounds = GeoBounds::new([-4.5, 39.0], [72.0, 52.0]);
        assert_eq!(bounds.south(), 52.0);
        assert_eq!(bounds.north(), 72.0);
        assert!(bounds.contains(&GeoPoint::new(10.0, 60.0)));
        assert!(!bounds.contains(&GeoPoint::new(10.0, 75.0)));
        assert!(bounds.contains(&GeoPoint::new(-4.5, 52.0)));
    }

    #[test]
    fn test_point_math() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.subtract(&a).dot(&Point::new(1.0, 0.0)), 3.0);
    }
}
