//! Regular grid specifications.

use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};
use crate::BoundingBox;

/// Specification of a regular, square-celled grid.
///
/// Coordinates are meters for projected grids and degrees for geographic
/// grids. The offset is the centre of the first (south-west) cell; rows run
/// south to north and columns west to east, so data is stored with row 0 as
/// the southernmost row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// X of the first cell centre
    pub x_offset: f64,
    /// Y of the first cell centre
    pub y_offset: f64,
    /// Cell size in X direction
    pub dx: f64,
    /// Cell size in Y direction
    pub dy: f64,
    /// Number of columns
    pub nx: usize,
    /// Number of rows
    pub ny: usize,
}

impl GridSpec {
    /// Create a new grid specification.
    pub fn new(x_offset: f64, y_offset: f64, dx: f64, dy: f64, nx: usize, ny: usize) -> RadarResult<Self> {
        if !(dx.is_finite() && dx > 0.0 && dy.is_finite() && dy > 0.0) {
            return Err(RadarError::invalid_argument(format!(
                "cell size must be > 0, got {} x {}",
                dx, dy
            )));
        }
        if nx == 0 || ny == 0 {
            return Err(RadarError::invalid_argument(format!(
                "grid must have at least one cell, got {} x {}",
                nx, ny
            )));
        }
        Ok(Self {
            x_offset,
            y_offset,
            dx,
            dy,
            nx,
            ny,
        })
    }

    /// Grid of `nx` x `ny` cells exactly tiling a bounding box.
    pub fn covering(bbox: &BoundingBox, nx: usize, ny: usize) -> RadarResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(RadarError::invalid_argument(format!(
                "grid must have at least one cell, got {} x {}",
                nx, ny
            )));
        }
        let dx = bbox.width() / nx as f64;
        let dy = bbox.height() / ny as f64;
        Self::new(
            bbox.min_x + dx / 2.0,
            bbox.min_y + dy / 2.0,
            dx,
            dy,
            nx,
            ny,
        )
    }

    /// Centre coordinates of the cell at `(col, row)`.
    pub fn cell_center(&self, col: usize, row: usize) -> (f64, f64) {
        (
            self.x_offset + col as f64 * self.dx,
            self.y_offset + row as f64 * self.dy,
        )
    }

    /// Cell containing `(x, y)`.
    ///
    /// Cells are half-open: a point on a shared edge belongs to the cell
    /// east/north of it.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let col = ((x - self.x_offset) / self.dx + 0.5).floor();
        let row = ((y - self.y_offset) / self.dy + 0.5).floor();

        if !(col.is_finite() && row.is_finite()) || col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.nx || row >= self.ny {
            return None;
        }
        Some((col, row))
    }

    /// Extent covered by the cells, from outer edge to outer edge.
    pub fn outer_bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.x_offset - self.dx / 2.0,
            self.y_offset - self.dy / 2.0,
            self.x_offset + (self.nx as f64 - 0.5) * self.dx,
            self.y_offset + (self.ny as f64 - 0.5) * self.dy,
        )
    }

    /// Get the 1D array index for a 2D grid position.
    pub fn flat_index(&self, col: usize, row: usize) -> usize {
        row * self.nx + col
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }
}
