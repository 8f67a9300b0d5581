//! Per-region geometry correction.
//!
//! A handful of regions are rescaled about their own centroid and shifted so
//! they read well at a small map scale (Greenland shrunk and moved east, the
//! Faroe Islands enlarged). Corrections compound if applied twice, so the
//! [`RegionStore`] is the only consumer and caches each corrected region.

use crate::core::geo::GeoPoint;
use crate::data::regions::{GeoPolygon, Region, Ring};
use fxhash::FxHashMap;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Scale about the ring's coordinate mean, then translate (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub scale: f64,
    pub translate: [f64; 2],
}

impl Correction {
    pub fn new(scale: f64, translate_lon: f64, translate_lat: f64) -> Self {
        Self {
            scale,
            translate: [translate_lon, translate_lat],
        }
    }

    /// Corrected copy of a ring with the same point count and order.
    /// The centroid is the mean of every stored point, closing point included.
    pub fn apply_ring(&self, ring: &[GeoPoint]) -> Ring {
        if ring.is_empty() {
            return Vec::new();
        }

        let count = ring.len() as f64;
        let center_lon = ring.iter().map(|p| p.lon).sum::<f64>() / count;
        let center_lat = ring.iter().map(|p| p.lat).sum::<f64>() / count;

        ring.iter()
            .map(|p| {
                GeoPoint::new(
                    center_lon + (p.lon - center_lon) * self.scale + self.translate[0],
                    center_lat + (p.lat - center_lat) * self.scale + self.translate[1],
                )
            })
            .collect()
    }

    pub fn apply(&self, region: &Region) -> Region {
        Region::new(
            region.id.clone(),
            region
                .polygons
                .iter()
                .map(|polygon| {
                    GeoPolygon::new(polygon.rings.iter().map(|r| self.apply_ring(r)).collect())
                })
                .collect(),
        )
    }
}

/// Region identifier → hand-tuned correction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionTable {
    entries: FxHashMap<String, Correction>,
}

impl CorrectionTable {
    /// A table with no corrections
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    pub fn with(mut self, id: impl Into<String>, correction: Correction) -> Self {
        self.entries.insert(id.into(), correction);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Correction> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CorrectionTable {
    /// Greenland, the Faroe Islands and Iceland
    fn default() -> Self {
        Self::empty()
            .with("GL", Correction::new(0.4, 35.0, 0.0))
            .with("FO", Correction::new(4.0, 6.0, -2.0))
            .with("IS", Correction::new(0.8, 15.0, -1.4))
    }
}

struct StoredRegion {
    raw: Region,
    corrected: OnceCell<Region>,
}

/// Raw region geometry plus the once-only corrected view of it
pub struct RegionStore {
    regions: Vec<StoredRegion>,
    index: FxHashMap<String, usize>,
    table: CorrectionTable,
    corrections_applied: Cell<usize>,
}

impl RegionStore {
    pub fn new(table: CorrectionTable) -> Self {
        Self {
            regions: Vec::new(),
            index: FxHashMap::default(),
            table,
            corrections_applied: Cell::new(0),
        }
    }

    /// Adds or replaces a region; replacing discards its cached correction
    pub fn insert(&mut self, region: Region) {
        let stored = StoredRegion {
            raw: region,
            corrected: OnceCell::new(),
        };
        match self.index.get(&stored.raw.id) {
            Some(&slot) => self.regions[slot] = stored,
            None => {
                self.index.insert(stored.raw.id.clone(), self.regions.len());
                self.regions.push(stored);
            }
        }
    }

    /// Geometry ready for projection: corrected if the table names it
    pub fn geometry(&self, id: &str) -> Option<&Region> {
        let stored = &self.regions[*self.index.get(id)?];
        Some(self.resolve(stored))
    }

    /// All regions in insertion order, corrected where configured
    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter().map(move |stored| self.resolve(stored))
    }

    pub fn raw(&self, id: &str) -> Option<&Region> {
        self.index.get(id).map(|&slot| &self.regions[slot].raw)
    }

    /// Number of times a correction has actually been computed
    pub fn corrections_applied(&self) -> usize {
        self.corrections_applied.get()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    fn resolve<'s>(&'s self, stored: &'s StoredRegion) -> &'s Region {
        match self.table.get(&stored.raw.id) {
            Some(correction) => stored.corrected.get_or_init(|| {
                self.corrections_applied.set(self.corrections_applied.get() + 1);
                log::debug!(
                    "correcting region {} (scale {}, translate {:?})",
                    stored.raw.id,
                    correction.scale,
                    correction.translate
                );
                correction.apply(&stored.raw)
            }),
            None => &stored.raw,
        }
    }
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::new(CorrectionTable::default())
    }
}
