//! Map builder for fluent session configuration

use crate::{
    core::{
        config::MapConfig,
        host::{HostPage, NullHost},
        map::MapSession,
        viewport::Viewport,
    },
    data::{correction::RegionStore, nodes::Node, regions::Region},
    labels::measure::{ApproximateTextMeasure, TextMeasure},
    rendering::style::MapStyle,
    MapError, Result,
};

/// Builder for creating and configuring [`MapSession`] instances
pub struct MapBuilder {
    config: MapConfig,
    style: MapStyle,
    viewport: Option<Viewport>,
    regions: Vec<Region>,
    nodes: Vec<Node>,
    measure: Option<Box<dyn TextMeasure>>,
    host: Option<Box<dyn HostPage>>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self {
            config: MapConfig::default(),
            style: MapStyle::default(),
            viewport: None,
            regions: Vec::new(),
            nodes: Vec::new(),
            measure: None,
            host: None,
        }
    }

    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the host drawing area
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Add a region; a later region with the same id replaces the earlier one
    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// Parse a region from a GeoJSON document
    pub fn with_region_geojson(self, id: &str, json: &str) -> Result<Self> {
        let region = Region::from_geojson(id, json)?;
        Ok(self.with_region(region))
    }

    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Text measurement used for label boxes
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Some(Box::new(measure));
        self
    }

    /// Receiver of navigation, scroll-lock and cursor requests
    pub fn with_host(mut self, host: impl HostPage + 'static) -> Self {
        self.host = Some(Box::new(host));
        self
    }

    /// Build the session and run its first layout pass
    pub fn build(self) -> Result<MapSession> {
        let viewport = self
            .viewport
            .ok_or_else(|| MapError::Config("No viewport specified".to_string()))?;
        self.config.validate()?;

        let mut regions = RegionStore::new(self.config.corrections.clone());
        for region in self.regions {
            regions.insert(region);
        }

        let measure = self
            .measure
            .unwrap_or_else(|| Box::new(ApproximateTextMeasure::default()));
        let host = self.host.unwrap_or_else(|| Box::new(NullHost));

        log::debug!(
            "building map session: {} regions, {} nodes",
            regions.len(),
            self.nodes.len()
        );

        let mut session = MapSession::new(
            self.config,
            self.style,
            viewport,
            regions,
            self.nodes,
            measure,
            host,
        );
        session.relayout();
        Ok(session)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::GeoPoint;
    use crate::data::nodes::Slot;

    const SQUARE: &str = r#"{"type":"Polygon","coordinates":[[[10,60],[20,60],[20,65],[10,65],[10,60]]]}"#;

    #[test]
    fn test_map_builder_basic() {
        let session = MapBuilder::new()
            .with_viewport(Viewport::new(800.0, 1200.0))
            .with_nodes(vec![Node::new(
                "sma",
                "Åarjel",
                GeoPoint::new(14.0, 64.0),
                Slot::Top,
            )])
            .build()
            .unwrap();

        assert_eq!(session.layout_passes(), 1);
        assert_eq!(session.nodes().len(), 1);
        assert!(session.layout().is_some());
    }

    #[test]
    fn test_builder_applies_style() {
        let mut style = MapStyle::default();
        style.font_family = "serif".into();
        let session = MapBuilder::new()
            .with_style(style)
            .with_viewport(Viewport::new(800.0, 600.0))
            .build()
            .unwrap();
        assert_eq!(session.style().font_family, "serif");
    }

    #[test]
    fn test_builder_requires_viewport() {
        let result = MapBuilder::new().build();
        assert!(matches!(result, Err(MapError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let mut config = MapConfig::default();
        config.zoom.scale_extent = [2.0, 1.0];
        let result = MapBuilder::new()
            .with_config(config)
            .with_viewport(Viewport::new(800.0, 600.0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_parses_geojson_regions() {
        let session = MapBuilder::new()
            .with_viewport(Viewport::new(800.0, 600.0))
            .with_region_geojson("SE", SQUARE)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(session.regions().len(), 1);
        assert!(session.regions().raw("SE").is_some());
    }

    #[test]
    fn test_builder_rejects_non_polygon_geojson() {
        let point = r#"{"type":"Point","coordinates":[10,60]}"#;
        let result = MapBuilder::new().with_region_geojson("SE", point);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_viewport_defers_layout() {
        let session = MapBuilder::new()
            .with_viewport(Viewport::new(0.0, 0.0))
            .build()
            .unwrap();
        assert_eq!(session.layout_passes(), 0);
        assert!(session.layout().is_none());
    }
}
