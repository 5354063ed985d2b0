//! Conversions between a radar's Cartesian plane and its polar bins.
//!
//! The Cartesian plane is the radar-centred azimuthal equidistant plane:
//! `x` east-positive, `y` north-positive, meters. Azimuths are compass
//! bearings in degrees clockwise from true north. Bin indices are 1-based.

use radar_common::{RadarError, RadarResult};
use serde::{Deserialize, Serialize};

/// A location in radar polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarCoord {
    /// Slant range (meters)
    pub range: f64,
    /// Compass bearing in [0, 360) degrees
    pub azimuth: f64,
}

/// 1-based polar bin index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinIndex {
    pub range_bin: usize,
    pub azim_bin: usize,
}

impl BinIndex {
    /// Check the index against a `nbins` x `nrays` polar grid.
    pub fn within(&self, nbins: usize, nrays: usize) -> bool {
        (1..=nbins).contains(&self.range_bin) && (1..=nrays).contains(&self.azim_bin)
    }
}

/// Convert a Cartesian offset from the radar to polar coordinates.
///
/// The ground distance is divided by `cos(elevation_rad)` to obtain the
/// slant range along the beam. Earth curvature is not taken into account.
/// The origin itself maps to range 0, azimuth 0.
pub fn cartesian_to_polar(x: f64, y: f64, elevation_rad: f64) -> PolarCoord {
    let range = x.hypot(y) / elevation_rad.cos();
    if x == 0.0 && y == 0.0 {
        return PolarCoord {
            range,
            azimuth: 0.0,
        };
    }

    let mut azimuth = (90.0 - y.atan2(x).to_degrees()).rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if azimuth >= 360.0 {
        azimuth = 0.0;
    }
    PolarCoord { range, azimuth }
}

/// Convert polar coordinates to the 1-based bin containing them.
///
/// Values on a bin boundary belong to the next outer/later bin, i.e. the
/// bin whose lower edge they sit on.
pub fn polar_to_bin_index(
    range: f64,
    azimuth: f64,
    range_bin_size: f64,
    azim_bin_size: f64,
) -> RadarResult<BinIndex> {
    if !(range_bin_size.is_finite() && range_bin_size > 0.0) {
        return Err(RadarError::invalid_argument(format!(
            "range bin size must be > 0, got {}",
            range_bin_size
        )));
    }
    if !(azim_bin_size.is_finite() && azim_bin_size > 0.0) {
        return Err(RadarError::invalid_argument(format!(
            "azimuth bin size must be > 0, got {}",
            azim_bin_size
        )));
    }
    if !(range.is_finite() && range >= 0.0) || !(azimuth.is_finite() && azimuth >= 0.0) {
        return Err(RadarError::invalid_argument(format!(
            "polar coordinate out of domain: range={}, azimuth={}",
            range, azimuth
        )));
    }

    Ok(BinIndex {
        range_bin: (1.0 + range / range_bin_size).floor() as usize,
        azim_bin: (1.0 + azimuth / azim_bin_size).floor() as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_bearings() {
        let north = cartesian_to_polar(0.0, 1000.0, 0.0);
        assert!((north.azimuth - 0.0).abs() < 1e-9);
        assert!((north.range - 1000.0).abs() < 1e-9);

        let east = cartesian_to_polar(1000.0, 0.0, 0.0);
        assert!((east.azimuth - 90.0).abs() < 1e-9);

        let south = cartesian_to_polar(0.0, -1000.0, 0.0);
        assert!((south.azimuth - 180.0).abs() < 1e-9);

        let west = cartesian_to_polar(-1000.0, 0.0, 0.0);
        assert!((west.azimuth - 270.0).abs() < 1e-9);

        let north_west = cartesian_to_polar(-1.0, 1.0, 0.0);
        assert!((north_west.azimuth - 315.0).abs() < 1e-9);
    }

    #[test]
    fn test_origin() {
        let origin = cartesian_to_polar(0.0, 0.0, 0.5_f64.to_radians());
        assert_eq!(origin, PolarCoord { range: 0.0, azimuth: 0.0 });
    }

    #[test]
    fn test_slant_range_correction() {
        let flat = cartesian_to_polar(3000.0, 4000.0, 0.0);
        let tilted = cartesian_to_polar(3000.0, 4000.0, 60.0_f64.to_radians());
        assert!((flat.range - 5000.0).abs() < 1e-9);
        assert!((tilted.range - 10000.0).abs() < 1e-6);
        assert_eq!(flat.azimuth, tilted.azimuth);
    }

    #[test]
    fn test_bin_index() {
        let idx = polar_to_bin_index(0.0, 0.0, 250.0, 1.0).unwrap();
        assert_eq!(idx, BinIndex { range_bin: 1, azim_bin: 1 });

        let idx = polar_to_bin_index(249.9, 0.99, 250.0, 1.0).unwrap();
        assert_eq!(idx, BinIndex { range_bin: 1, azim_bin: 1 });

        // Exact boundaries open the next bin
        let idx = polar_to_bin_index(250.0, 1.0, 250.0, 1.0).unwrap();
        assert_eq!(idx, BinIndex { range_bin: 2, azim_bin: 2 });

        let idx = polar_to_bin_index(99_999.0, 359.5, 250.0, 1.0).unwrap();
        assert_eq!(idx, BinIndex { range_bin: 400, azim_bin: 360 });
    }

    #[test]
    fn test_bin_index_monotonic_in_range() {
        let rscale = 250.0;
        for step in 0..50 {
            let r = 37.5 + step as f64 * rscale;
            let a = polar_to_bin_index(r, 123.4, rscale, 1.0).unwrap();
            let b = polar_to_bin_index(r + rscale, 123.4, rscale, 1.0).unwrap();
            assert_eq!(b.range_bin, a.range_bin + 1);
            assert_eq!(b.azim_bin, a.azim_bin);
        }
    }

    #[test]
    fn test_bin_index_rejects_bad_sizes() {
        assert!(polar_to_bin_index(10.0, 10.0, 0.0, 1.0).is_err());
        assert!(polar_to_bin_index(10.0, 10.0, 250.0, -1.0).is_err());
        assert!(polar_to_bin_index(-1.0, 10.0, 250.0, 1.0).is_err());
        assert!(polar_to_bin_index(f64::NAN, 10.0, 250.0, 1.0).is_err());
    }

    #[test]
    fn test_within() {
        let idx = BinIndex { range_bin: 400, azim_bin: 360 };
        assert!(idx.within(400, 360));
        assert!(!idx.within(399, 360));
        assert!(!BinIndex { range_bin: 0, azim_bin: 1 }.within(400, 360));
    }
}
