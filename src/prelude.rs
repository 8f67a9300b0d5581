//! Prelude module for common regionmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use regionmap::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    builder::MapBuilder,
    config::{LabelConfig, MapConfig, MotionProfile, ProjectionConfig, ZoomConfig},
    geo::{GeoBounds, GeoPoint, Point},
    host::{HostPage, NullHost, RecordingHost},
    map::{ClickTarget, Layout, MapSession},
    responder::{ViewportHandle, ViewportResponder},
    viewport::{Transform, Viewport},
};

pub use crate::data::{
    Correction, CorrectionTable, GeoJson, GeoPolygon, Node, Region, RegionStore, Slot,
};

pub use crate::input::{
    ClickOutcome, Cursor, EventHandled, GestureSource, InteractionMode, ModeChange, MouseButton,
    PointerEvent, ZoomState,
};

pub use crate::labels::{ApproximateTextMeasure, LabelBox, LabelLayout, TextExtent, TextMeasure};

pub use crate::animation::EasingType;

pub use crate::projection::{ClipMode, PathGenerator, Projection};

pub use crate::rendering::{
    Color, DrawSurface, MapStyle, PathData, RecordingSurface, Scene, ShapeStyle, SvgSurface,
};

pub use crate::spatial::{Cell, Tessellation};

pub use crate::{Error as MapError, Result};

pub use std::time::Duration;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
