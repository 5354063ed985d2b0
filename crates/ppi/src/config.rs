//! Configuration for PPI sampling and compositing.

use radar_common::{RadarError, RadarResult};
use serde::{Deserialize, Serialize};

/// Defaults and limits for the sampler and compositor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpiConfig {
    /// Default output cell size in meters.
    pub default_cellsize: f64,

    /// Default half-width of the sampled square in meters.
    pub default_range_max: f64,

    /// Upper bound on cells in any output grid.
    pub max_cells: usize,

    /// Default composite cells per axis.
    pub composite_dim: usize,

    /// Spread cell computation over the rayon thread pool.
    pub parallel: bool,
}

impl Default for PpiConfig {
    fn default() -> Self {
        Self {
            default_cellsize: 500.0,
            default_range_max: 50_000.0,
            max_cells: 25_000_000,
            composite_dim: 100,
            parallel: true,
        }
    }
}

impl PpiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PPI_DEFAULT_CELLSIZE") {
            if let Ok(size) = val.parse() {
                config.default_cellsize = size;
            }
        }

        if let Ok(val) = std::env::var("PPI_DEFAULT_RANGE_MAX") {
            if let Ok(range) = val.parse() {
                config.default_range_max = range;
            }
        }

        if let Ok(val) = std::env::var("PPI_MAX_CELLS") {
            if let Ok(cells) = val.parse() {
                config.max_cells = cells;
            }
        }

        if let Ok(val) = std::env::var("PPI_COMPOSITE_DIM") {
            if let Ok(dim) = val.parse() {
                config.composite_dim = dim;
            }
        }

        if let Ok(val) = std::env::var("PPI_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    ///
    /// Checked on every sampling and compositing call.
    pub fn validate(&self) -> RadarResult<()> {
        if !(self.default_cellsize.is_finite() && self.default_cellsize > 0.0) {
            return Err(RadarError::invalid_argument("config: default_cellsize must be > 0"));
        }

        if !(self.default_range_max.is_finite() && self.default_range_max > 0.0) {
            return Err(RadarError::invalid_argument("config: default_range_max must be > 0"));
        }

        if self.max_cells == 0 {
            return Err(RadarError::invalid_argument("config: max_cells must be > 0"));
        }

        if self.composite_dim == 0 {
            return Err(RadarError::invalid_argument("config: composite_dim must be > 0"));
        }

        Ok(())
    }
}
