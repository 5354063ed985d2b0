//! Nearest-bin sampling of polar data onto a radar-centred Cartesian grid.
//!
//! The sampler works in the azimuthal equidistant plane of the radar. Every
//! output cell centre is converted to a polar bin once, into a [`BinTable`],
//! and that table is then used to pick values for each parameter of the
//! source. No interpolation is done: every output cell carries exactly the
//! value of one polar bin, or `NoData` when its bin lies outside the scan.

use projection::{
    cartesian_to_polar, geographic_to_projected, polar_to_bin_index, projected_to_geographic,
    Projection,
};
use radar_common::{BoundingBox, CellValue, GridSpec, RadarError, RadarResult};
use rayon::prelude::*;
use tracing::debug;

use crate::config::PpiConfig;
use crate::raster::Raster;
use crate::source::Sampleable;

/// Parameters of one sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOptions {
    /// Output cell size in meters.
    pub cellsize: f64,
    /// Half-width of the sampled square around the radar, in meters.
    /// Ignored when `limits` is set.
    pub range_max: f64,
    /// Geographic (WGS84) extent to sample instead of the square.
    pub limits: Option<BoundingBox>,
    /// Convert ground distance to slant range using the elevation angle.
    pub project: bool,
}

impl SampleOptions {
    pub fn new(cellsize: f64, range_max: f64) -> Self {
        Self {
            cellsize,
            range_max,
            limits: None,
            project: true,
        }
    }

    /// Options using the configured default cell size and range.
    pub fn from_config(config: &PpiConfig) -> Self {
        Self::new(config.default_cellsize, config.default_range_max)
    }

    pub fn with_limits(mut self, limits: BoundingBox) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_project(mut self, project: bool) -> Self {
        self.project = project;
        self
    }

    /// Check cell size, range and limits.
    pub fn validate(&self) -> RadarResult<()> {
        if !(self.cellsize.is_finite() && self.cellsize > 0.0) {
            return Err(RadarError::invalid_argument(format!(
                "cellsize must be > 0, got {}",
                self.cellsize
            )));
        }
        match &self.limits {
            Some(limits) => limits.validate_geographic(),
            None if !(self.range_max.is_finite() && self.range_max > 0.0) => {
                Err(RadarError::invalid_argument(format!(
                    "range_max must be > 0, got {}",
                    self.range_max
                )))
            }
            None => Ok(()),
        }
    }
}

/// Output of [`sample`]: one raster per source parameter on a shared grid.
#[derive(Debug, Clone)]
pub struct Sampled {
    pub grid: GridSpec,
    pub projection: Projection,
    /// WGS84 box spanned by the outer grid corners
    pub bbox: BoundingBox,
    /// `(parameter name, raster)` in source order
    pub layers: Vec<(String, Raster)>,
}

/// Flat polar cell index for every output cell, `None` outside the scan.
///
/// Stored row-major in the output grid's order.
#[derive(Debug, Clone, PartialEq)]
pub struct BinTable {
    indices: Vec<Option<usize>>,
}

impl BinTable {
    /// Number of output cells mapped to a polar bin.
    pub fn covered_count(&self) -> usize {
        self.indices.iter().filter(|i| i.is_some()).count()
    }

    /// Pick cell values for one parameter.
    pub fn apply(&self, cells: &[CellValue], parallel: bool) -> Vec<CellValue> {
        let pick = |index: &Option<usize>| {
            index
                .and_then(|i| cells.get(i).copied())
                .unwrap_or(CellValue::NoData)
        };
        if parallel {
            self.indices.par_iter().map(pick).collect()
        } else {
            self.indices.iter().map(pick).collect()
        }
    }
}

/// Geometry the bin table is computed from.
struct Polar {
    elevation_rad: f64,
    rscale: f64,
    ascale: f64,
    nbins: usize,
    nrays: usize,
}

impl Polar {
    fn lookup(&self, x: f64, y: f64) -> RadarResult<Option<usize>> {
        let coord = cartesian_to_polar(x, y, self.elevation_rad);
        let mut bin = polar_to_bin_index(coord.range, coord.azimuth, self.rscale, self.ascale)?;
        // Azimuth is circular; rounding just below 360 can land one past the last ray
        if bin.azim_bin == self.nrays + 1 {
            bin.azim_bin = 1;
        }
        if !bin.within(self.nbins, self.nrays) {
            return Ok(None);
        }
        Ok(Some((bin.azim_bin - 1) * self.nbins + (bin.range_bin - 1)))
    }

    fn fill_row(&self, grid: &GridSpec, row: usize, out: &mut [Option<usize>]) -> RadarResult<()> {
        for (col, slot) in out.iter_mut().enumerate() {
            let (x, y) = grid.cell_center(col, row);
            *slot = self.lookup(x, y)?;
        }
        Ok(())
    }
}

/// Build the output grid for a source without sampling it.
///
/// The first cell centre sits on the lower-left corner of the extent and
/// cell counts are `ceil(extent / cellsize)`, so the grid may overshoot the
/// requested extent by up to one cell.
pub fn build_grid(projection: &Projection, options: &SampleOptions, config: &PpiConfig) -> RadarResult<GridSpec> {
    config.validate()?;
    options.validate()?;

    let extent = match &options.limits {
        Some(limits) => {
            let corners = limits
                .corners()
                .iter()
                .map(|&(lon, lat)| geographic_to_projected(lon, lat, projection))
                .collect::<RadarResult<Vec<_>>>()?;
            BoundingBox::from_points(corners)
                .ok_or_else(|| RadarError::projection("limits have no corners"))?
        }
        None => BoundingBox::new(
            -options.range_max,
            -options.range_max,
            options.range_max,
            options.range_max,
        ),
    };

    let nx = cell_count(extent.width(), options.cellsize);
    let ny = cell_count(extent.height(), options.cellsize);
    let total = nx.checked_mul(ny).filter(|&n| n <= config.max_cells);
    if total.is_none() {
        return Err(RadarError::invalid_argument(format!(
            "grid of {} x {} cells exceeds the limit of {} cells",
            nx, ny, config.max_cells
        )));
    }

    debug!(
        nx = nx,
        ny = ny,
        cellsize = options.cellsize,
        min_x = extent.min_x,
        min_y = extent.min_y,
        "Built sampling grid"
    );

    GridSpec::new(
        extent.min_x,
        extent.min_y,
        options.cellsize,
        options.cellsize,
        nx,
        ny,
    )
}

fn cell_count(extent: f64, cellsize: f64) -> usize {
    let n = (extent / cellsize).ceil();
    if n.is_finite() && n >= 1.0 {
        // saturates for absurd extents; the cell limit catches those
        n as usize
    } else {
        1
    }
}

/// Map every cell of `grid` to a polar bin of `source`.
pub fn compute_bin_table<S>(source: &S, grid: &GridSpec, project: bool, parallel: bool) -> RadarResult<BinTable>
where
    S: Sampleable + ?Sized,
{
    let geo = source.geo();
    let (nbins, nrays) = source.dims();
    let polar = Polar {
        elevation_rad: if project { geo.elangle_rad() } else { 0.0 },
        rscale: geo.rscale,
        ascale: geo.ascale,
        nbins,
        nrays,
    };

    let mut indices = vec![None; grid.len()];
    if parallel {
        indices
            .par_chunks_mut(grid.nx)
            .enumerate()
            .try_for_each(|(row, chunk)| polar.fill_row(grid, row, chunk))?;
    } else {
        for (row, chunk) in indices.chunks_mut(grid.nx).enumerate() {
            polar.fill_row(grid, row, chunk)?;
        }
    }

    Ok(BinTable { indices })
}

/// WGS84 box through the four outer corners of a projected grid.
///
/// Longitudes stay continuous around the projection centre, so a grid
/// crossing the antimeridian reaches past 180 (or below -180) instead of
/// spanning the globe.
pub fn geographic_bounds(grid: &GridSpec, projection: &Projection) -> RadarResult<BoundingBox> {
    let corners = grid
        .outer_bounds()
        .corners()
        .iter()
        .map(|&(x, y)| {
            projected_to_geographic(x, y, projection).map(|(lon, lat)| (projection.unwrap_longitude(lon), lat))
        })
        .collect::<RadarResult<Vec<_>>>()?;
    BoundingBox::from_points(corners).ok_or_else(|| RadarError::projection("grid has no corners"))
}

/// Sample every parameter of `source` onto a radar-centred Cartesian grid.
pub fn sample<S>(source: &S, options: &SampleOptions, config: &PpiConfig) -> RadarResult<Sampled>
where
    S: Sampleable + ?Sized,
{
    let projection = Projection::aeqd_for_site(&source.geo().site)?;
    let grid = build_grid(&projection, options, config)?;
    let table = compute_bin_table(source, &grid, options.project, config.parallel)?;

    debug!(
        kind = ?source.kind(),
        cells = grid.len(),
        covered = table.covered_count(),
        "Computed bin table"
    );

    let layers = source
        .params()
        .into_iter()
        .map(|param| {
            let data = table.apply(param.cells(), config.parallel);
            Raster::new(grid, data).map(|raster| (param.name().to_string(), raster))
        })
        .collect::<RadarResult<Vec<_>>>()?;

    let bbox = geographic_bounds(&grid, &projection)?;

    Ok(Sampled {
        grid,
        projection,
        bbox,
        layers,
    })
}
