//! Generators for synthetic polar scans and volumes.
//!
//! The patterns are predictable so tests can check which polar bin ended up
//! in which output cell.

use std::sync::Arc;

use polar_volume::{PolarParam, PolarScan, PolarVolume};
use radar_common::{CellValue, RadarSite, ScanGeo};

use crate::fixtures::nominal_time;

/// Creates a single-parameter scan whose cells are computed by `f`.
///
/// `f` receives the 1-based `(range_bin, azim_bin)` of each cell.
///
/// # Panics
///
/// Panics on invalid geometry; intended for tests only.
pub fn create_scan_with<F>(
    site: RadarSite,
    elangle: f64,
    (rscale, nbins, nrays): (f64, usize, usize),
    name: &str,
    f: F,
) -> PolarScan
where
    F: Fn(usize, usize) -> CellValue,
{
    let f: &dyn Fn(usize, usize) -> CellValue = &f;
    create_multi_param_scan(site, elangle, (rscale, nbins, nrays), &[(name, f)])
}

/// Creates a scan with several parameters sharing one geometry.
pub fn create_multi_param_scan(
    site: RadarSite,
    elangle: f64,
    (rscale, nbins, nrays): (f64, usize, usize),
    params: &[(&str, &dyn Fn(usize, usize) -> CellValue)],
) -> PolarScan {
    let geo = Arc::new(ScanGeo::new(site, elangle, rscale, nrays).expect("valid scan geometry"));
    let params = params
        .iter()
        .map(|(name, f)| {
            let mut cells = Vec::with_capacity(nbins * nrays);
            for azim_bin in 1..=nrays {
                for range_bin in 1..=nbins {
                    cells.push(f(range_bin, azim_bin));
                }
            }
            PolarParam::from_cells(*name, Arc::clone(&geo), nbins, nrays, cells)
                .expect("valid parameter")
        })
        .collect();
    PolarScan::new(geo, params).expect("valid scan")
}

/// Creates a scan where every cell holds `value`.
pub fn create_uniform_scan(
    site: RadarSite,
    elangle: f64,
    geometry: (f64, usize, usize),
    name: &str,
    value: CellValue,
) -> PolarScan {
    create_scan_with(site, elangle, geometry, name, |_, _| value)
}

/// Creates a scan where each cell holds its range bin number.
///
/// Handy for checking range mapping: the sampled value tells which range
/// bin was picked.
pub fn create_ring_scan(site: RadarSite, elangle: f64, geometry: (f64, usize, usize), name: &str) -> PolarScan {
    create_scan_with(site, elangle, geometry, name, |range_bin, _| {
        CellValue::Present(range_bin as f64)
    })
}

/// Creates a scan where each cell holds its azimuth bin number.
pub fn create_azimuth_scan(site: RadarSite, elangle: f64, geometry: (f64, usize, usize), name: &str) -> PolarScan {
    create_scan_with(site, elangle, geometry, name, |_, azim_bin| {
        CellValue::Present(azim_bin as f64)
    })
}

/// Creates a reflectivity-like scan with deterministic speckle.
///
/// Roughly a quarter of the cells are echoes (0..60 dBZ), an eighth are
/// missing and the rest are below detection.
pub fn create_speckle_scan(
    site: RadarSite,
    elangle: f64,
    geometry: (f64, usize, usize),
    name: &str,
    seed: u32,
) -> PolarScan {
    create_scan_with(site, elangle, geometry, name, move |range_bin, azim_bin| {
        let hash = simple_hash(range_bin as u32, azim_bin as u32, seed);
        match hash % 8 {
            0 | 1 => CellValue::Present((hash % 6000) as f64 / 100.0),
            2 => CellValue::NoData,
            _ => CellValue::Undetect,
        }
    })
}

/// Creates a three-scan volume listed out of elevation order (1.5, 0.5, 3.0).
///
/// Every scan carries `DBZH` (range bin number) and `VRADH` (azimuth bin
/// number) on the coarse geometry.
pub fn create_test_volume(site: RadarSite) -> PolarVolume {
    let geometry = crate::fixtures::geometry::COARSE;
    let dbzh = |range_bin: usize, _: usize| CellValue::Present(range_bin as f64);
    let vradh = |_: usize, azim_bin: usize| CellValue::Present(azim_bin as f64);
    let params: [(&str, &dyn Fn(usize, usize) -> CellValue); 2] = [("DBZH", &dbzh), ("VRADH", &vradh)];

    let mut builder = PolarVolume::builder("testrad", nominal_time(), site);
    for elangle in [1.5, 0.5, 3.0] {
        let scan = create_multi_param_scan(site, elangle, geometry, &params);
        builder = builder.decoded_scan(scan);
    }
    builder.build().expect("valid test volume")
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
