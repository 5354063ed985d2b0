//! Single-layer rasters of cell values.

use radar_common::{CellValue, GridSpec, RadarError, RadarResult};
use serde::{Deserialize, Serialize};

/// One named layer on a regular grid.
///
/// Values are stored row-major with row 0 the southernmost row, matching
/// [`GridSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster {
    grid: GridSpec,
    data: Vec<CellValue>,
}

impl Raster {
    /// Create a raster, checking the data length against the grid.
    pub fn new(grid: GridSpec, data: Vec<CellValue>) -> RadarResult<Self> {
        if data.len() != grid.len() {
            return Err(RadarError::invalid_argument(format!(
                "raster has {} cells, grid {} x {} needs {}",
                data.len(),
                grid.nx,
                grid.ny,
                grid.len()
            )));
        }
        Ok(Self { grid, data })
    }

    /// Raster with every cell set to `NoData`.
    pub fn empty(grid: GridSpec) -> Self {
        Self {
            data: vec![CellValue::NoData; grid.len()],
            grid,
        }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn data(&self) -> &[CellValue] {
        &self.data
    }

    /// Get the value at a specific grid coordinate.
    pub fn get(&self, col: usize, row: usize) -> Option<CellValue> {
        if col >= self.grid.nx || row >= self.grid.ny {
            return None;
        }
        self.data.get(self.grid.flat_index(col, row)).copied()
    }

    /// Value of the cell containing `(x, y)` in the grid's coordinates.
    pub fn value_at(&self, x: f64, y: f64) -> Option<CellValue> {
        let (col, row) = self.grid.cell_at(x, y)?;
        self.get(col, row)
    }

    /// Number of cells holding a measured value.
    pub fn count_present(&self) -> usize {
        self.data.iter().filter(|c| c.is_present()).count()
    }

    /// Number of cells without any measurement.
    pub fn count_absent(&self) -> usize {
        self.data.iter().filter(|c| c.is_absent()).count()
    }

    /// Largest present value, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.data
            .iter()
            .filter_map(CellValue::value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Flatten for image pipelines: rows top-to-bottom (north first), NaN
    /// for every cell without a present value.
    pub fn to_f32_nan(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.data.len());
        for row in (0..self.grid.ny).rev() {
            let start = row * self.grid.nx;
            out.extend(
                self.data[start..start + self.grid.nx]
                    .iter()
                    .map(CellValue::to_f32_nan),
            );
        }
        out
    }

    /// Element-wise [`CellValue::merge_max`] with another raster on the same grid.
    pub(crate) fn merge_max_from(&mut self, other: &[CellValue]) {
        for (cell, incoming) in self.data.iter_mut().zip(other) {
            *cell = cell.merge_max(*incoming);
        }
    }
}
