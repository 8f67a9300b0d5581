//! Configuration for projection, label layout and interaction.
//!
//! Every field defaults to the compile-time values in
//! [`constants`](crate::core::constants); the structs exist so the pipeline
//! can be exercised with other values in tests and so a host can load a
//! tuned configuration from JSON.

use crate::animation::easing::EasingType;
use crate::core::constants::*;
use crate::core::geo::{GeoBounds, GeoPoint};
use crate::data::correction::CorrectionTable;
use crate::projection::ClipMode;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionProfile {
    /// Animated zoom and hover transitions
    #[default]
    Standard,
    /// Every transition completes on the next frame
    Reduced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub bounds: GeoBounds,
    pub center: GeoPoint,
    pub rotate: f64,
    pub parallels: [f64; 2],
    pub clip_mode: ClipMode,
    pub min_ring_points: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            bounds: GeoBounds::new(BOUNDS_LONGITUDE, BOUNDS_LATITUDE),
            center: GeoPoint::from(PROJECTION_CENTER),
            rotate: PROJECTION_ROTATE,
            parallels: PROJECTION_PARALLELS,
            clip_mode: ClipMode::Filter,
            min_ring_points: MIN_RING_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub design_width: f64,
    pub base_font_size: f64,
    pub font_width_factor: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub base_offset: f64,
    pub node_radius: f64,
    pub corner_radius: f64,
}

impl LabelConfig {
    /// Font size for a viewport width, clamped to `[min_font_size, max_font_size]`
    pub fn font_size_for_width(&self, viewport_width: f64) -> f64 {
        let scaled = self.base_font_size * self.font_width_factor * viewport_width.max(0.0)
            / self.design_width;
        scaled.clamp(self.min_font_size, self.max_font_size)
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            design_width: DESIGN_WIDTH,
            base_font_size: BASE_FONT_SIZE,
            font_width_factor: FONT_WIDTH_FACTOR,
            min_font_size: MIN_FONT_SIZE,
            max_font_size: MAX_FONT_SIZE,
            base_offset: LABEL_BASE_OFFSET,
            node_radius: NODE_RADIUS,
            corner_radius: LABEL_CORNER_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub zoom_factor: f64,
    pub scale_extent: [f64; 2],
    pub same_cell_tolerance: f64,
    pub translate_margin: f64,
    pub zoom_duration: Duration,
    pub hover_duration: Duration,
    pub easing: EasingType,
    pub motion: MotionProfile,
}

impl ZoomConfig {
    /// Duration actually used for zoom transitions under the motion profile
    pub fn effective_zoom_duration(&self) -> Duration {
        match self.motion {
            MotionProfile::Standard => self.zoom_duration,
            MotionProfile::Reduced => Duration::ZERO,
        }
    }

    pub fn effective_hover_duration(&self) -> Duration {
        match self.motion {
            MotionProfile::Standard => self.hover_duration,
            MotionProfile::Reduced => Duration::ZERO,
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_factor: ZOOM_FACTOR,
            scale_extent: SCALE_EXTENT,
            same_cell_tolerance: SAME_CELL_TOLERANCE,
            translate_margin: TRANSLATE_MARGIN,
            zoom_duration: ZOOM_DURATION,
            hover_duration: HOVER_DURATION,
            easing: EasingType::EaseInOut,
            motion: MotionProfile::Standard,
        }
    }
}

/// Complete map configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MapConfig {
    pub projection: ProjectionConfig,
    pub labels: LabelConfig,
    pub zoom: ZoomConfig,
    pub corrections: CorrectionTable,
    pub link_prefix: Option<String>,
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        let labels = &self.labels;
        if labels.min_font_size <= 0.0 || labels.min_font_size > labels.max_font_size {
            return Err(MapError::Config(format!(
                "font size range [{}, {}] is empty",
                labels.min_font_size, labels.max_font_size
            )));
        }
        if labels.design_width <= 0.0 {
            return Err(MapError::Config("design width must be positive".into()));
        }

        let zoom = &self.zoom;
        if zoom.scale_extent[0] <= 0.0 || zoom.scale_extent[0] > zoom.scale_extent[1] {
            return Err(MapError::Config(format!(
                "scale extent {:?} is invalid",
                zoom.scale_extent
            )));
        }
        if zoom.zoom_factor <= 1.0 {
            return Err(MapError::Config(
                "zoom factor must magnify (greater than 1)".into(),
            ));
        }

        let bounds = &self.projection.bounds;
        if bounds.west() == bounds.east() || bounds.south() == bounds.north() {
            return Err(MapError::Config(format!(
                "geographic bounds {:?} have no area",
                bounds
            )));
        }

        Ok(())
    }

    /// Link prefix for nodes without an explicit link
    pub fn link_prefix(&self) -> &str {
        self.link_prefix.as_deref().unwrap_or(LINK_PREFIX)
    }
}
