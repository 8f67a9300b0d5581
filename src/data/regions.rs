use crate::core::geo::GeoPoint;
use crate::data::geojson::{polygon_rings, GeoJson};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Ordered, closed sequence of coordinates
pub type Ring = Vec<GeoPoint>;

/// One polygon of a region: the outer ring followed by any holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPolygon {
    pub rings: Vec<Ring>,
}

impl GeoPolygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }
}

/// A named polygon set, e.g. one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub polygons: Vec<GeoPolygon>,
}

impl Region {
    pub fn new(id: impl Into<String>, polygons: Vec<GeoPolygon>) -> Self {
        Self {
            id: id.into(),
            polygons,
        }
    }

    /// Builds a region from every areal geometry in a GeoJSON document.
    ///
    /// Non-areal geometries are ignored; a document with no polygon at all
    /// is rejected.
    pub fn from_geojson(id: impl Into<String>, json: &str) -> Result<Self> {
        let id = id.into();
        let document = GeoJson::parse(json)?;

        let mut polygons = Vec::new();
        for geometry in document.geometries() {
            match polygon_rings(geometry) {
                Some(found) => polygons.extend(found.into_iter().map(|rings| {
                    GeoPolygon::new(
                        rings
                            .into_iter()
                            .map(|ring| ring.into_iter().map(GeoPoint::from).collect())
                            .collect(),
                    )
                })),
                None => log::warn!("region {}: ignoring non-polygon geometry", id),
            }
        }

        if polygons.is_empty() {
            return Err(MapError::InvalidGeometry(format!(
                "region {} contains no polygons",
                id
            )));
        }

        Ok(Self::new(id, polygons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_geojson() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "id": "FO" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-7, 62], [-6.5, 62], [-6.5, 62.3], [-7, 62]]]
                }
            }]
        }"#;
        let region = Region::from_geojson("FO", json).unwrap();
        assert_eq!(region.id, "FO");
        assert_eq!(region.polygons.len(), 1);
        assert_eq!(region.polygons[0].rings[0].len(), 4);
        assert_eq!(region.polygons[0].rings[0][1], GeoPoint::new(-6.5, 62.0));
    }

    #[test]
    fn test_region_without_polygons_is_rejected() {
        let json = r#"{"type": "Point", "coordinates": [10, 60]}"#;
        assert!(matches!(
            Region::from_geojson("XX", json),
            Err(MapError::InvalidGeometry(_))
        ));
    }
}
