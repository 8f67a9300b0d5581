//! # regionmap
//!
//! Projected region maps with pinned point-of-interest labels.
//!
//! Region outlines are drawn through a conformal conic projection fitted to
//! a geographic window. Each point of interest gets a marker, a label box in
//! one of four slots and a Voronoi cell that makes the whole screen
//! clickable; clicking a cell zooms into its node.
//!
//! ```no_run
//! use regionmap::prelude::*;
//!
//! # fn main() -> regionmap::Result<()> {
//! let nodes = Node::list_from_json(r#"[{"id":"sma","label":"Åarjel","anchor":{"lon":14.0,"lat":64.0}}]"#)?;
//! let mut session = MapBuilder::new()
//!     .with_viewport(Viewport::new(800.0, 1200.0))
//!     .with_nodes(nodes)
//!     .build()?;
//! session.pointer_click(Point::new(400.0, 600.0));
//! let svg = session.scene().to_svg()?;
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod core;
pub mod data;
pub mod input;
pub mod labels;
pub mod prelude;
pub mod projection;
pub mod rendering;
pub mod spatial;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    builder::MapBuilder,
    config::MapConfig,
    geo::{GeoBounds, GeoPoint, Point},
    host::{HostPage, NullHost, RecordingHost},
    map::{ClickTarget, MapSession},
    responder::{ViewportHandle, ViewportResponder},
    viewport::{Transform, Viewport},
};

pub use crate::data::{CorrectionTable, Node, Region, RegionStore, Slot};

pub use crate::input::{InteractionMode, PointerEvent, ZoomController, ZoomState};

pub use crate::labels::{LabelLayout, TextExtent, TextMeasure};

pub use crate::projection::{ClipMode, Projection};

pub use crate::rendering::{MapStyle, Scene, SvgSurface};

pub use crate::spatial::Tessellation;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` once; later calls are no-ops
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
