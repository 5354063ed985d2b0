//! Multi-radar max compositing onto a shared WGS84 grid.
//!
//! Each input PPI is reprojected independently: every target cell centre
//! is transformed into the input's azimuthal equidistant plane and takes
//! the value of the input cell containing it. The per-input grids are then
//! reduced with [`CellValue::merge_max`], so the strongest value wins and a
//! cell stays `NoData` only when no input covers it.

use projection::geographic_to_projected;
use radar_common::{BoundingBox, CellValue, GridSpec, RadarError, RadarResult};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::PpiConfig;
use crate::product::{Composite, Contributor, Ppi, Product};
use crate::raster::Raster;

/// Size of the composite grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Cells along longitude
    pub nx: usize,
    /// Cells along latitude
    pub ny: usize,
}

impl CompositeOptions {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Square grid with the configured cells per axis.
    pub fn from_config(config: &PpiConfig) -> Self {
        Self::new(config.composite_dim, config.composite_dim)
    }

    fn validate(&self, config: &PpiConfig) -> RadarResult<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(RadarError::invalid_argument(format!(
                "composite grid must have at least one cell, got {} x {}",
                self.nx, self.ny
            )));
        }
        match self.nx.checked_mul(self.ny) {
            Some(n) if n <= config.max_cells => Ok(()),
            _ => Err(RadarError::invalid_argument(format!(
                "composite grid of {} x {} cells exceeds the limit of {} cells",
                self.nx, self.ny, config.max_cells
            ))),
        }
    }
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self::from_config(&PpiConfig::default())
    }
}

/// Merge the `param` layer of several PPIs into one composite.
///
/// All inputs are checked before any work is done: an empty list, a
/// composite among the inputs or a PPI without `param` fails the whole call.
pub fn composite(
    products: &[Product],
    param: &str,
    options: &CompositeOptions,
    config: &PpiConfig,
) -> RadarResult<Composite> {
    config.validate()?;
    options.validate(config)?;
    let inputs = validate_inputs(products, param)?;

    let bbox = inputs
        .iter()
        .map(|(ppi, _)| *ppi.bbox())
        .reduce(|acc, b| acc.union(&b))
        .ok_or_else(|| RadarError::invalid_argument("composite needs at least one PPI"))?;
    let grid = GridSpec::covering(&bbox, options.nx, options.ny)?;

    debug!(
        inputs = inputs.len(),
        nx = grid.nx,
        ny = grid.ny,
        min_lon = bbox.min_x,
        min_lat = bbox.min_y,
        max_lon = bbox.max_x,
        max_lat = bbox.max_y,
        "Built composite grid"
    );

    let reprojected: Vec<Vec<CellValue>> = if config.parallel {
        inputs
            .par_iter()
            .map(|(ppi, layer)| reproject(ppi, layer, &grid))
            .collect::<RadarResult<_>>()?
    } else {
        inputs
            .iter()
            .map(|(ppi, layer)| reproject(ppi, layer, &grid))
            .collect::<RadarResult<_>>()?
    };

    let mut raster = Raster::empty(grid);
    for cells in &reprojected {
        raster.merge_max_from(cells);
    }

    if raster.count_absent() == grid.len() {
        warn!(param = %param, inputs = inputs.len(), "Composite has no coverage");
    }

    let contributors = inputs
        .iter()
        .map(|(ppi, _)| Contributor::from_geo(ppi.geo()))
        .collect();

    info!(
        param = %param,
        inputs = inputs.len(),
        present = raster.count_present(),
        "Built composite"
    );

    Ok(Composite {
        contributors,
        param: param.to_string(),
        raster,
        bbox,
    })
}

/// Resolve every product to a PPI and its `param` layer.
fn validate_inputs<'a>(products: &'a [Product], param: &str) -> RadarResult<Vec<(&'a Ppi, &'a Raster)>> {
    if products.is_empty() {
        return Err(RadarError::invalid_argument("composite needs at least one PPI"));
    }

    products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let ppi = product
                .as_ppi()
                .ok_or_else(|| RadarError::type_error("ppi", product.kind_name()))?;
            let layer = ppi.layer(param).ok_or_else(|| {
                RadarError::data_absent(format!("input {} has no '{}' layer", i, param))
            })?;
            Ok((ppi, layer))
        })
        .collect()
}

/// Values of one input at the centres of the target grid.
fn reproject(ppi: &Ppi, layer: &Raster, target: &GridSpec) -> RadarResult<Vec<CellValue>> {
    let source_bbox = ppi.bbox();
    let mut out = Vec::with_capacity(target.len());
    for row in 0..target.ny {
        for col in 0..target.nx {
            let (lon, lat) = target.cell_center(col, row);
            if !covers(source_bbox, lon, lat) {
                out.push(CellValue::NoData);
                continue;
            }
            let (x, y) = geographic_to_projected(lon, lat, ppi.projection())?;
            out.push(layer.value_at(x, y).unwrap_or(CellValue::NoData));
        }
    }
    Ok(out)
}

/// Cheap rejection of target cells far outside an input.
///
/// The box is padded since a projected square bulges past the box through
/// its corners.
fn covers(bbox: &BoundingBox, lon: f64, lat: f64) -> bool {
    let pad_lon = bbox.width() * 0.25;
    let pad_lat = bbox.height() * 0.25;
    lon >= bbox.min_x - pad_lon
        && lon <= bbox.max_x + pad_lon
        && lat >= bbox.min_y - pad_lat
        && lat <= bbox.max_y + pad_lat
}
