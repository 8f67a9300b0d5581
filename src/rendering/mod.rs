pub mod path;
pub mod scene;
pub mod style;
pub mod surface;
pub mod svg;

// Re-export main types
pub use path::{PathCommand, PathData};
pub use scene::{Scene, SceneGroup, SceneItem, Shape};
pub use style::{Color, MapStyle, ShapeStyle};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
pub use svg::SvgSurface;
