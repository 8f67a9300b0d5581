//! Compile-time constants for the region map.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use std::time::Duration;

/// Baseline design width the font scale is expressed against.
pub const DESIGN_WIDTH: f64 = 800.0;

/// Baseline design height (portrait layout).
pub const DESIGN_HEIGHT: f64 = 1200.0;

/// Visible longitude window, west to east.
pub const BOUNDS_LONGITUDE: [f64; 2] = [-4.5, 39.0];

/// Visible latitude window. Listed north-first; the first pair of
/// components forms the first fit corner.
pub const BOUNDS_LATITUDE: [f64; 2] = [72.0, 52.0];

/// Projection center (lon, lat) in degrees.
pub const PROJECTION_CENTER: [f64; 2] = [10.0, 63.0];

/// Longitude rotation in degrees applied before projecting.
pub const PROJECTION_ROTATE: f64 = -10.0;

/// Standard parallels of the conformal conic, in degrees. This pair has no
/// conic solution, so the default map is drawn with the Mercator fallback.
pub const PROJECTION_PARALLELS: [f64; 2] = [80.0, 100.0];

/// Rings with fewer points than this after bounds filtering are not drawn.
pub const MIN_RING_POINTS: usize = 50;

/// Font sizing: `BASE * FONT_WIDTH_FACTOR * width / DESIGN_WIDTH`, clamped.
pub const BASE_FONT_SIZE: f64 = 18.0;
pub const FONT_WIDTH_FACTOR: f64 = 0.3;
pub const MIN_FONT_SIZE: f64 = 9.0;
pub const MAX_FONT_SIZE: f64 = 32.0;

/// Gap between a node and the near edge of its label.
pub const LABEL_BASE_OFFSET: f64 = 25.0;

/// Node marker radius; connectors start on the marker edge.
pub const NODE_RADIUS: f64 = 5.0;

/// Label rectangle corner radius.
pub const LABEL_CORNER_RADIUS: f64 = 4.0;

/// Magnification used when zooming into a cell.
pub const ZOOM_FACTOR: f64 = 4.0;

/// Allowed scale range for user gestures.
pub const SCALE_EXTENT: [f64; 2] = [1.0, 8.0];

/// Tolerance in pixels when deciding a click hit the already-centred cell.
pub const SAME_CELL_TOLERANCE: f64 = 1.0;

/// Margin around the node bounding box that panning may reach.
pub const TRANSLATE_MARGIN: f64 = 100.0;

/// Zoom in/out transition length.
pub const ZOOM_DURATION: Duration = Duration::from_millis(750);

/// Hover highlight fade length.
pub const HOVER_DURATION: Duration = Duration::from_millis(200);

/// Link prefix for nodes without an explicit link.
pub const LINK_PREFIX: &str = "/language/";
