//! Assembling PPIs from polar scans.

use polar_volume::{PolarScan, PolarVolume};
use radar_common::{RadarError, RadarResult};
use tracing::{info, warn};

use crate::config::PpiConfig;
use crate::product::Ppi;
use crate::sampler::{sample, SampleOptions};
use crate::source::Sampleable;

/// Build a PPI with one layer per parameter of `source`.
pub fn build_ppi<S>(source: &S, options: &SampleOptions, config: &PpiConfig) -> RadarResult<Ppi>
where
    S: Sampleable + ?Sized,
{
    let geo = *source.geo();
    let sampled = sample(source, options, config)?;

    for (name, raster) in &sampled.layers {
        if raster.count_present() == 0 {
            warn!(param = %name, elangle = geo.elangle, "PPI layer has no present values");
        }
    }

    let ppi = Ppi::new(
        sampled.grid,
        sampled.layers.into_iter().collect(),
        sampled.projection,
        sampled.bbox,
        geo,
    );

    info!(
        layers = ppi.layers().len(),
        nx = ppi.grid().nx,
        ny = ppi.grid().ny,
        elangle = geo.elangle,
        "Built PPI"
    );
    Ok(ppi)
}

/// Build a single-layer PPI for one parameter of a scan.
pub fn build_ppi_for(scan: &PolarScan, param: &str, options: &SampleOptions, config: &PpiConfig) -> RadarResult<Ppi> {
    let param = scan.param(param).ok_or_else(|| {
        RadarError::data_absent(format!(
            "parameter '{}' not in scan at {} deg (available: {})",
            param,
            scan.elangle(),
            scan.param_names().join(", ")
        ))
    })?;
    build_ppi(param, options, config)
}

/// Build a PPI from the scan of `volume` closest to `elangle`.
pub fn build_volume_ppi(
    volume: &PolarVolume,
    elangle: f64,
    options: &SampleOptions,
    config: &PpiConfig,
) -> RadarResult<Ppi> {
    let scan = volume.nearest_scan(elangle).ok_or_else(|| {
        RadarError::data_absent(format!("volume '{}' has no scans", volume.radar()))
    })?;
    build_ppi(scan, options, config)
}
