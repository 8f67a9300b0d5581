pub mod correction;
pub mod geojson;
pub mod nodes;
pub mod regions;

pub use correction::{Correction, CorrectionTable, RegionStore};
pub use geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
pub use nodes::{Node, Slot};
pub use regions::{GeoPolygon, Region, Ring};
