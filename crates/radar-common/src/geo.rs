//! Geographic metadata of a radar and its scans.

use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

/// Location of a radar antenna.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarSite {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Antenna height above sea level (meters)
    pub height: f64,
}

impl RadarSite {
    /// Create a validated radar site.
    pub fn new(lat: f64, lon: f64, height: f64) -> RadarResult<Self> {
        if !(lat.is_finite() && lon.is_finite() && height.is_finite()) {
            return Err(RadarError::invalid_argument(format!(
                "radar site has non-finite coordinates: lat={}, lon={}, height={}",
                lat, lon, height
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(RadarError::invalid_argument(format!(
                "radar latitude {} outside [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(RadarError::invalid_argument(format!(
                "radar longitude {} outside [-180, 180]",
                lon
            )));
        }
        if height < 0.0 {
            return Err(RadarError::invalid_argument(format!(
                "radar height {} must be >= 0",
                height
            )));
        }
        Ok(Self { lat, lon, height })
    }
}

/// Immutable geo metadata of one elevation sweep.
///
/// Built once when a scan is assembled and shared by every parameter of
/// that scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanGeo {
    pub site: RadarSite,
    /// Elevation angle (degrees)
    pub elangle: f64,
    /// Range bin size (meters)
    pub rscale: f64,
    /// Azimuth bin size (degrees), 360 / nrays
    pub ascale: f64,
}

impl ScanGeo {
    /// Build scan geometry for a sweep with `nrays` azimuth bins.
    pub fn new(site: RadarSite, elangle: f64, rscale: f64, nrays: usize) -> RadarResult<Self> {
        if !elangle.is_finite() || !(-90.0..=90.0).contains(&elangle) {
            return Err(RadarError::invalid_argument(format!(
                "elevation angle {} outside [-90, 90]",
                elangle
            )));
        }
        if !rscale.is_finite() || rscale <= 0.0 {
            return Err(RadarError::invalid_argument(format!(
                "range bin size must be > 0, got {}",
                rscale
            )));
        }
        if nrays == 0 {
            return Err(RadarError::invalid_argument("scan must have at least one ray"));
        }
        Ok(Self {
            site,
            elangle,
            rscale,
            ascale: 360.0 / nrays as f64,
        })
    }

    /// Elevation angle in radians.
    pub fn elangle_rad(&self) -> f64 {
        self.elangle.to_radians()
    }

    /// Same sweep geometry relocated to another site.
    pub fn with_site(&self, site: RadarSite) -> Self {
        Self { site, ..*self }
    }
}
