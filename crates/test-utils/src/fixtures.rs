//! Common test fixtures for radar tests.
//!
//! This module provides pre-defined radar sites and timestamps that
//! represent realistic configurations.

use chrono::{DateTime, TimeZone, Utc};

/// Radar site fixtures.
pub mod sites {
    use radar_common::RadarSite;

    /// De Bilt, Netherlands
    pub fn de_bilt() -> RadarSite {
        RadarSite {
            lat: 52.10168,
            lon: 5.17834,
            height: 44.0,
        }
    }

    /// Den Helder, Netherlands (~100 km north-west of De Bilt)
    pub fn den_helder() -> RadarSite {
        RadarSite {
            lat: 52.95334,
            lon: 4.78997,
            height: 51.0,
        }
    }

    /// Herwijnen, Netherlands (~30 km south of De Bilt)
    pub fn herwijnen() -> RadarSite {
        RadarSite {
            lat: 51.83708,
            lon: 5.13797,
            height: 27.7,
        }
    }

    /// Site on the equator at the prime meridian
    pub fn null_island() -> RadarSite {
        RadarSite {
            lat: 0.0,
            lon: 0.0,
            height: 0.0,
        }
    }
}

/// Scan geometry presets: (rscale, nbins, nrays).
pub mod geometry {
    /// 250 m bins out to 100 km, 1 degree rays
    pub const STANDARD: (f64, usize, usize) = (250.0, 400, 360);

    /// 1 km bins out to 20 km, 90 degree rays
    pub const COARSE: (f64, usize, usize) = (1000.0, 20, 4);

    /// 500 m bins out to 50 km, 0.5 degree rays
    pub const FINE_AZIMUTH: (f64, usize, usize) = (500.0, 100, 720);
}

/// Nominal time used for test volumes.
pub fn nominal_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}
