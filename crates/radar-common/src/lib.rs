//! Common types shared across the radar PPI workspace.

pub mod bbox;
pub mod cell;
pub mod error;
pub mod geo;
pub mod grid;

pub use bbox::BoundingBox;
pub use cell::CellValue;
pub use error::{RadarError, RadarResult};
pub use geo::{RadarSite, ScanGeo};
pub use grid::GridSpec;
