//! Coordinate reference system transformations for radar data.
//!
//! Implements the radar-centred azimuthal equidistant projection on the
//! WGS84 ellipsoid and the Cartesian <-> polar bin conversions from scratch
//! without external projection libraries.

pub mod aeqd;
pub mod definition;
pub mod polar;

pub use aeqd::{AzimuthalEquidistant, Ellipsoid};
pub use definition::{geographic_to_projected, projected_to_geographic, Projection};
pub use polar::{cartesian_to_polar, polar_to_bin_index, BinIndex, PolarCoord};
