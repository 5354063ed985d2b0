//! Elevation sweeps.

use std::collections::BTreeMap;
use std::sync::Arc;

use radar_common::{RadarError, RadarResult, RadarSite, ScanGeo};
use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;
use crate::param::PolarParam;

/// Raw parameter samples as handed over by a file decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamInput {
    pub name: String,
    /// `nbins * nrays` samples, range bin innermost
    pub raw: Vec<f64>,
    pub encoding: Encoding,
}

/// Raw sweep as handed over by a file decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanInput {
    /// Elevation angle (degrees)
    pub elangle: f64,
    /// Range bin size (meters)
    pub rscale: f64,
    pub nbins: usize,
    pub nrays: usize,
    pub params: Vec<ParamInput>,
}

/// One elevation sweep: a set of parameters on the same polar grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarScan {
    geo: Arc<ScanGeo>,
    nbins: usize,
    nrays: usize,
    params: BTreeMap<String, PolarParam>,
}

impl PolarScan {
    /// Assemble a scan, checking that every parameter shares its grid and
    /// geometry.
    pub fn new(geo: Arc<ScanGeo>, params: Vec<PolarParam>) -> RadarResult<Self> {
        let first = params
            .first()
            .ok_or_else(|| RadarError::invalid_argument("scan must contain at least one parameter"))?;
        let (nbins, nrays) = (first.nbins(), first.nrays());

        let mut by_name = BTreeMap::new();
        for param in params {
            if param.nbins() != nbins || param.nrays() != nrays {
                return Err(RadarError::invalid_argument(format!(
                    "parameter {} is {} x {}, scan grid is {} x {}",
                    param.name(),
                    param.nbins(),
                    param.nrays(),
                    nbins,
                    nrays
                )));
            }
            if param.geo() != geo.as_ref() {
                return Err(RadarError::invalid_argument(format!(
                    "parameter {} carries geometry different from its scan",
                    param.name()
                )));
            }
            let name = param.name().to_string();
            if by_name.insert(name.clone(), param).is_some() {
                return Err(RadarError::invalid_argument(format!(
                    "duplicate parameter {} in scan",
                    name
                )));
            }
        }

        Ok(Self {
            geo,
            nbins,
            nrays,
            params: by_name,
        })
    }

    /// Decode a raw sweep for a radar at `site`.
    pub fn from_input(site: RadarSite, input: &ScanInput) -> RadarResult<Self> {
        let geo = Arc::new(ScanGeo::new(site, input.elangle, input.rscale, input.nrays)?);
        let params = input
            .params
            .iter()
            .map(|p| {
                PolarParam::decode(
                    p.name.clone(),
                    Arc::clone(&geo),
                    input.nbins,
                    input.nrays,
                    &p.raw,
                    &p.encoding,
                )
            })
            .collect::<RadarResult<Vec<_>>>()?;
        Self::new(geo, params)
    }

    pub fn geo(&self) -> &ScanGeo {
        &self.geo
    }

    /// Elevation angle (degrees).
    pub fn elangle(&self) -> f64 {
        self.geo.elangle
    }

    /// Number of range bins.
    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// Number of azimuth bins.
    pub fn nrays(&self) -> usize {
        self.nrays
    }

    /// Outer edge of the last range bin (meters, slant range).
    pub fn max_range(&self) -> f64 {
        self.nbins as f64 * self.geo.rscale
    }

    pub fn param(&self, name: &str) -> Option<&PolarParam> {
        self.params.get(name)
    }

    /// Parameter names in sorted order.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.keys().map(String::as_str).collect()
    }

    pub fn params(&self) -> impl Iterator<Item = &PolarParam> {
        self.params.values()
    }

    /// Scan restricted to the named parameters.
    ///
    /// Names not present in this scan are skipped; the result may hold no
    /// parameters at all.
    pub fn select(&self, names: &[&str]) -> PolarScan {
        let params = self
            .params
            .iter()
            .filter(|(name, _)| names.contains(&name.as_str()))
            .map(|(name, param)| (name.clone(), param.clone()))
            .collect();
        PolarScan {
            geo: Arc::clone(&self.geo),
            nbins: self.nbins,
            nrays: self.nrays,
            params,
        }
    }

    /// Same sweep relocated to `site`; every parameter shares the new geometry.
    pub(crate) fn relocated(&self, site: RadarSite) -> PolarScan {
        let geo = Arc::new(self.geo.with_site(site));
        let params = self
            .params
            .iter()
            .map(|(name, param)| (name.clone(), param.with_geo(Arc::clone(&geo))))
            .collect();
        PolarScan {
            geo,
            nbins: self.nbins,
            nrays: self.nrays,
            params,
        }
    }
}
