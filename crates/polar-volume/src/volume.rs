//! Polar volumes: all sweeps of one radar at one nominal time.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use radar_common::{RadarError, RadarResult, RadarSite};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::scan::{PolarScan, ScanInput};

/// Free-form metadata groups carried along from the source file.
///
/// The contents are opaque to the resampling engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub how: BTreeMap<String, serde_json::Value>,
    pub what: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "where")]
    pub where_: BTreeMap<String, serde_json::Value>,
}

/// One radar's scan collection at one nominal time.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarVolume {
    radar: String,
    datetime: DateTime<Utc>,
    site: RadarSite,
    scans: Vec<PolarScan>,
    attributes: Attributes,
}

impl PolarVolume {
    /// Start assembling a volume.
    pub fn builder(radar: impl Into<String>, datetime: DateTime<Utc>, site: RadarSite) -> VolumeBuilder {
        VolumeBuilder::new(radar, datetime, site)
    }

    /// Radar identifier.
    pub fn radar(&self) -> &str {
        &self.radar
    }

    /// Nominal time of the volume.
    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    pub fn site(&self) -> &RadarSite {
        &self.site
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn scans(&self) -> &[PolarScan] {
        &self.scans
    }

    pub fn scan(&self, index: usize) -> Option<&PolarScan> {
        self.scans.get(index)
    }

    /// Elevation angles in scan order.
    pub fn elevations(&self) -> Vec<f64> {
        self.scans.iter().map(PolarScan::elangle).collect()
    }

    /// Scan whose elevation is closest to `elangle`.
    ///
    /// Ties resolve to the scan listed first.
    pub fn nearest_scan(&self, elangle: f64) -> Option<&PolarScan> {
        let mut best: Option<(&PolarScan, f64)> = None;
        for scan in &self.scans {
            let diff = (scan.elangle() - elangle).abs();
            match best {
                Some((_, best_diff)) if diff >= best_diff => {}
                _ => best = Some((scan, diff)),
            }
        }
        best.map(|(scan, _)| scan)
    }

    /// Union of parameter names across scans, sorted.
    pub fn param_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .scans
            .iter()
            .flat_map(|scan| scan.param_names())
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Number of scans.
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }
}

/// A sweep waiting in a [`VolumeBuilder`].
#[derive(Debug, Clone)]
enum PendingScan {
    Raw(ScanInput),
    Decoded(PolarScan),
}

/// Assembles a [`PolarVolume`] from decoded or raw sweeps.
///
/// Scans keep the order they were added in unless sorting is requested.
#[derive(Debug, Clone)]
pub struct VolumeBuilder {
    radar: String,
    datetime: DateTime<Utc>,
    site: RadarSite,
    site_override: Option<RadarSite>,
    sort_scans: bool,
    pending: Vec<PendingScan>,
    attributes: Attributes,
}

impl VolumeBuilder {
    pub fn new(radar: impl Into<String>, datetime: DateTime<Utc>, site: RadarSite) -> Self {
        Self {
            radar: radar.into(),
            datetime,
            site,
            site_override: None,
            sort_scans: false,
            pending: Vec::new(),
            attributes: Attributes::default(),
        }
    }

    /// Add a raw sweep, decoded at build time.
    pub fn scan(mut self, input: ScanInput) -> Self {
        self.pending.push(PendingScan::Raw(input));
        self
    }

    /// Add an already decoded sweep.
    pub fn decoded_scan(mut self, scan: PolarScan) -> Self {
        self.pending.push(PendingScan::Decoded(scan));
        self
    }

    /// Replace the radar location for the volume and every scan.
    pub fn override_site(mut self, site: RadarSite) -> Self {
        self.site_override = Some(site);
        self
    }

    /// Order scans by ascending elevation.
    pub fn sort_scans(mut self, sort: bool) -> Self {
        self.sort_scans = sort;
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Decode pending sweeps and validate the volume.
    pub fn build(self) -> RadarResult<PolarVolume> {
        if self.radar.is_empty() {
            return Err(RadarError::invalid_argument("radar identifier must not be empty"));
        }
        let site = self.site_override.unwrap_or(self.site);
        // Re-validate: the fields are public and may have been built by hand
        RadarSite::new(site.lat, site.lon, site.height)?;

        let mut scans = Vec::with_capacity(self.pending.len());
        for pending in self.pending {
            let scan = match pending {
                PendingScan::Raw(input) => PolarScan::from_input(site, &input)?,
                PendingScan::Decoded(scan) if self.site_override.is_some() => scan.relocated(site),
                PendingScan::Decoded(scan) if scan.geo().site != site => {
                    return Err(RadarError::invalid_argument(format!(
                        "scan at elevation {} has a site different from volume {}",
                        scan.elangle(),
                        self.radar
                    )));
                }
                PendingScan::Decoded(scan) => scan,
            };
            scans.push(scan);
        }

        if scans.is_empty() {
            warn!(radar = %self.radar, "Building polar volume without scans");
        }
        if self.sort_scans {
            scans.sort_by(|a, b| a.elangle().total_cmp(&b.elangle()));
        }

        debug!(
            radar = %self.radar,
            scans = scans.len(),
            datetime = %self.datetime,
            "Built polar volume"
        );

        Ok(PolarVolume {
            radar: self.radar,
            datetime: self.datetime,
            site,
            scans,
            attributes: self.attributes,
        })
    }
}
