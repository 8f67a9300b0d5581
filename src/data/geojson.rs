use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

impl GeoJsonFeature {
    /// `properties.id`, falling back to the feature id, as a string
    pub fn identifier(&self) -> Option<String> {
        self.properties
            .as_ref()
            .and_then(|props| props.get("id"))
            .or(self.id.as_ref())
            .and_then(|value| match value {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Geometry(GeoJsonGeometry),
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<GeoJsonFeature>,
}

impl GeoJson {
    /// Parses a feature, feature collection or bare geometry document
    pub fn parse(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let kind = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| MapError::InvalidGeometry("GeoJSON object has no type".into()))?
            .to_string();

        Ok(match kind.as_str() {
            "Feature" => GeoJson::Feature(serde_json::from_value(value)?),
            "FeatureCollection" => {
                let collection: FeatureCollection = serde_json::from_value(value)?;
                GeoJson::FeatureCollection {
                    features: collection.features,
                }
            }
            _ => GeoJson::Geometry(serde_json::from_value(value)?),
        })
    }

    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
            GeoJson::Geometry(_) => Vec::new(),
        }
    }

    /// Every geometry in the document, features first-to-last
    pub fn geometries(&self) -> Vec<&GeoJsonGeometry> {
        match self {
            GeoJson::Geometry(geometry) => vec![geometry],
            _ => self
                .features()
                .into_iter()
                .filter_map(|feature| feature.geometry.as_ref())
                .collect(),
        }
    }
}

/// Polygon rings of a geometry; `None` for non-areal geometry types
pub fn polygon_rings(geometry: &GeoJsonGeometry) -> Option<Vec<Vec<Vec<[f64; 2]>>>> {
    match geometry {
        GeoJsonGeometry::Polygon { coordinates } => Some(vec![coordinates.clone()]),
        GeoJsonGeometry::MultiPolygon { coordinates } => Some(coordinates.clone()),
        GeoJsonGeometry::GeometryCollection { geometries } => {
            let polygons: Vec<_> = geometries
                .iter()
                .filter_map(polygon_rings)
                .flatten()
                .collect();
            (!polygons.is_empty()).then_some(polygons)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "id": "IS" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[-20, 64], [-14, 64], [-14, 66], [-20, 64]]]]
                }
            }]
        }"#;
        let doc = GeoJson::parse(json).unwrap();
        let features = doc.features();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].identifier().as_deref(), Some("IS"));

        let polygons = polygon_rings(doc.geometries()[0]).unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0][0].len(), 4);
    }

    #[test]
    fn test_bare_geometry() {
        let json = r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}"#;
        let doc = GeoJson::parse(json).unwrap();
        assert_eq!(doc.geometries().len(), 1);
        assert!(doc.features().is_empty());
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        assert!(GeoJson::parse(r#"{"type": "Topology"}"#).is_err());
        assert!(GeoJson::parse(r#"{"features": []}"#).is_err());
    }

    #[test]
    fn test_points_have_no_rings() {
        let point = GeoJsonGeometry::Point {
            coordinates: [1.0, 2.0],
        };
        assert!(polygon_rings(&point).is_none());
    }
}
