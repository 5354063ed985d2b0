//! Cartesian products handed to renderers and the compositor.

use std::collections::BTreeMap;

use projection::Projection;
use radar_common::{BoundingBox, GridSpec, ScanGeo};
use serde::{Deserialize, Serialize};

use crate::raster::Raster;

/// A single-radar plan position indicator.
///
/// All layers share one grid in the radar's azimuthal equidistant
/// projection. Only sub-selection produces a new `Ppi`; the product itself
/// is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Ppi {
    grid: GridSpec,
    layers: BTreeMap<String, Raster>,
    projection: Projection,
    bbox: BoundingBox,
    geo: ScanGeo,
}

impl Ppi {
    pub(crate) fn new(
        grid: GridSpec,
        layers: BTreeMap<String, Raster>,
        projection: Projection,
        bbox: BoundingBox,
        geo: ScanGeo,
    ) -> Self {
        Self {
            grid,
            layers,
            projection,
            bbox,
            geo,
        }
    }

    /// Grid in projected meters.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn layers(&self) -> &BTreeMap<String, Raster> {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Raster> {
        self.layers.get(name)
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.layers.keys().map(String::as_str).collect()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// WGS84 bounding box of the grid.
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Geometry of the scan this PPI was sampled from.
    pub fn geo(&self) -> &ScanGeo {
        &self.geo
    }

    pub fn is_merged(&self) -> bool {
        false
    }

    /// New PPI with only the named layers.
    ///
    /// Names without a layer are skipped, so the result may have no layers.
    pub fn select(&self, names: &[&str]) -> Ppi {
        let layers = self
            .layers
            .iter()
            .filter(|(name, _)| names.contains(&name.as_str()))
            .map(|(name, raster)| (name.clone(), raster.clone()))
            .collect();
        Ppi { layers, ..self.clone_meta() }
    }

    fn clone_meta(&self) -> Ppi {
        Ppi {
            grid: self.grid,
            layers: BTreeMap::new(),
            projection: self.projection,
            bbox: self.bbox,
            geo: self.geo,
        }
    }
}

/// A radar that contributed to a composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub lat: f64,
    pub lon: f64,
    pub elangle: f64,
}

impl Contributor {
    pub(crate) fn from_geo(geo: &ScanGeo) -> Self {
        Self {
            lat: geo.site.lat,
            lon: geo.site.lon,
            elangle: geo.elangle,
        }
    }
}

/// A multi-radar max composite on a WGS84 grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    pub(crate) contributors: Vec<Contributor>,
    pub(crate) param: String,
    pub(crate) raster: Raster,
    pub(crate) bbox: BoundingBox,
}

impl Composite {
    /// Contributing radars in input order.
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// Name of the composited parameter.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Grid in degrees (x = longitude, y = latitude).
    pub fn grid(&self) -> &GridSpec {
        self.raster.grid()
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn projection(&self) -> Projection {
        Projection::Geographic
    }

    /// Union of the input bounding boxes.
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn is_merged(&self) -> bool {
        true
    }
}

/// Any product of this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Ppi(Ppi),
    Composite(Composite),
}

impl Product {
    pub fn is_merged(&self) -> bool {
        match self {
            Product::Ppi(ppi) => ppi.is_merged(),
            Product::Composite(composite) => composite.is_merged(),
        }
    }

    pub fn bbox(&self) -> &BoundingBox {
        match self {
            Product::Ppi(ppi) => ppi.bbox(),
            Product::Composite(composite) => composite.bbox(),
        }
    }

    pub fn param_names(&self) -> Vec<&str> {
        match self {
            Product::Ppi(ppi) => ppi.param_names(),
            Product::Composite(composite) => vec![composite.param()],
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Product::Ppi(_) => "ppi",
            Product::Composite(_) => "composite",
        }
    }

    pub fn as_ppi(&self) -> Option<&Ppi> {
        match self {
            Product::Ppi(ppi) => Some(ppi),
            Product::Composite(_) => None,
        }
    }
}

impl From<Ppi> for Product {
    fn from(ppi: Ppi) -> Self {
        Product::Ppi(ppi)
    }
}

impl From<Composite> for Product {
    fn from(composite: Composite) -> Self {
        Product::Composite(composite)
    }
}
