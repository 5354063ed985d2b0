//! Integration tests for sampling polar scans into PPIs.

use polar_volume::PolarVolume;
use ppi::{build_ppi, build_ppi_for, build_volume_ppi, PpiConfig, SampleOptions, Sampleable, SourceKind};
use radar_common::{BoundingBox, CellValue};
use test_utils::{
    assert_present_approx, create_azimuth_scan, create_ring_scan, create_speckle_scan, create_test_volume, geometry,
    init_test_logging, nominal_time, sites,
};

fn sequential() -> PpiConfig {
    PpiConfig {
        parallel: false,
        ..Default::default()
    }
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_standard_scan_grid_and_centre_bin() {
    init_test_logging();
    let scan = create_ring_scan(sites::de_bilt(), 0.5, geometry::STANDARD, "DBZH");
    let options = SampleOptions::new(500.0, 50_000.0);
    let ppi = build_ppi(&scan, &options, &PpiConfig::default()).unwrap();

    assert_eq!((ppi.grid().nx, ppi.grid().ny), (200, 200));
    assert_eq!(ppi.grid().cell_center(100, 100), (0.0, 0.0));

    // Ring scan: value is the range bin
    let layer = ppi.layer("DBZH").unwrap();
    assert_eq!(layer.get(100, 100), Some(CellValue::Present(1.0)));

    // Azimuth scan: value is the azimuth bin
    let scan = create_azimuth_scan(sites::de_bilt(), 0.5, geometry::STANDARD, "VRADH");
    let ppi = build_ppi(&scan, &options, &PpiConfig::default()).unwrap();
    assert_eq!(ppi.layer("VRADH").unwrap().get(100, 100), Some(CellValue::Present(1.0)));
}

#[test]
fn test_compass_directions_pick_expected_rays() {
    let scan = create_azimuth_scan(sites::de_bilt(), 0.5, geometry::STANDARD, "VRADH");
    let ppi = build_ppi(&scan, &SampleOptions::new(500.0, 50_000.0), &sequential()).unwrap();
    let layer = ppi.layer("VRADH").unwrap();

    // 10 km out, 2.86 degrees clockwise past east, south and west (1 degree rays)
    assert_eq!(layer.value_at(10_000.0, -500.0), Some(CellValue::Present(93.0)));
    assert_eq!(layer.value_at(-500.0, -10_000.0), Some(CellValue::Present(183.0)));
    assert_eq!(layer.value_at(-10_000.0, 500.0), Some(CellValue::Present(273.0)));
    // Just west of north wraps to the last ray
    assert_eq!(layer.value_at(-500.0, 40_000.0), Some(CellValue::Present(360.0)));
}

#[test]
fn test_sampling_is_deterministic() {
    let scan = create_speckle_scan(sites::den_helder(), 0.5, geometry::FINE_AZIMUTH, "DBZH", 11);
    let options = SampleOptions::new(400.0, 30_000.0);

    let a = build_ppi(&scan, &options, &PpiConfig::default()).unwrap();
    let b = build_ppi(&scan, &options, &PpiConfig::default()).unwrap();
    let c = build_ppi(&scan, &options, &sequential()).unwrap();

    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_undetect_survives_sampling() {
    let scan = create_speckle_scan(sites::de_bilt(), 0.5, geometry::STANDARD, "DBZH", 3);
    let ppi = build_ppi(&scan, &SampleOptions::new(1000.0, 20_000.0), &PpiConfig::default()).unwrap();
    let data = ppi.layer("DBZH").unwrap().data();

    assert!(data.iter().any(|c| matches!(c, CellValue::Undetect)));
    assert!(data.iter().any(|c| matches!(c, CellValue::NoData)));
    assert!(data.iter().any(CellValue::is_present));
}

// ============================================================================
// Range handling
// ============================================================================

#[test]
fn test_cells_beyond_scan_are_nodata() {
    // 20 km of data, 40 km square
    let scan = create_ring_scan(sites::de_bilt(), 0.5, geometry::COARSE, "DBZH");
    let ppi = build_ppi(&scan, &SampleOptions::new(1000.0, 40_000.0), &PpiConfig::default()).unwrap();
    let layer = ppi.layer("DBZH").unwrap();

    assert_eq!(layer.get(0, 0), Some(CellValue::NoData));
    assert_eq!(layer.value_at(0.0, 30_000.0), Some(CellValue::NoData));
    assert_present_approx!(layer.value_at(0.0, 15_000.0).unwrap(), 16.0, 0.0);
    assert!(layer.count_absent() > 0);
}

#[test]
fn test_elevation_correction_only_when_projecting() {
    let scan = create_ring_scan(sites::de_bilt(), 60.0, geometry::STANDARD, "DBZH");
    let options = SampleOptions::new(300.0, 6000.0);

    let slant = build_ppi(&scan, &options, &PpiConfig::default()).unwrap();
    let ground = build_ppi(&scan, &options.clone().with_project(false), &PpiConfig::default()).unwrap();

    // 5.1 km ground distance is 10.2 km along a 60 degree beam
    assert_eq!(
        slant.layer("DBZH").unwrap().value_at(0.0, 5100.0),
        Some(CellValue::Present(41.0))
    );
    assert_eq!(
        ground.layer("DBZH").unwrap().value_at(0.0, 5100.0),
        Some(CellValue::Present(21.0))
    );
}

#[test]
fn test_geographic_limits() {
    let limits = BoundingBox::geographic(5.08, 52.0, 5.28, 52.2).unwrap();
    let scan = create_ring_scan(sites::de_bilt(), 0.5, geometry::STANDARD, "DBZH");
    let options = SampleOptions::new(500.0, 50_000.0).with_limits(limits);
    let ppi = build_ppi(&scan, &options, &PpiConfig::default()).unwrap();

    assert!((27..=29).contains(&ppi.grid().nx), "nx = {}", ppi.grid().nx);
    assert!((44..=46).contains(&ppi.grid().ny), "ny = {}", ppi.grid().ny);
    assert!(ppi.bbox().intersects(&limits));
    assert!(ppi.bbox().contains(5.18, 52.1));
}

#[test]
fn test_invalid_arguments() {
    let scan = create_ring_scan(sites::de_bilt(), 0.5, geometry::COARSE, "DBZH");
    let config = PpiConfig::default();

    let err = build_ppi(&scan, &SampleOptions::new(0.0, 10_000.0), &config).unwrap_err();
    assert_eq!(err.error_code(), "InvalidArgument");

    let limits = BoundingBox::new(5.0, 52.0, 185.0, 53.0);
    let err = build_ppi(&scan, &SampleOptions::new(500.0, 10_000.0).with_limits(limits), &config).unwrap_err();
    assert_eq!(err.error_code(), "InvalidArgument");

    let capped = PpiConfig {
        max_cells: 10_000,
        ..Default::default()
    };
    let err = build_ppi(&scan, &SampleOptions::new(500.0, 50_000.0), &capped).unwrap_err();
    assert_eq!(err.error_code(), "InvalidArgument");
}

// ============================================================================
// Sources
// ============================================================================

#[test]
fn test_sampleable_kinds() {
    let volume = create_test_volume(sites::de_bilt());
    let scan = volume.scan(0).unwrap();
    let param = scan.param("DBZH").unwrap();

    assert_eq!(scan.kind(), SourceKind::Scan);
    assert_eq!(param.kind(), SourceKind::Param);
    assert_eq!(Sampleable::dims(scan), Sampleable::dims(param));
    assert_eq!(Sampleable::params(scan).len(), 2);
    assert_eq!(Sampleable::params(param).len(), 1);
}

#[test]
fn test_scan_layers_and_selection() {
    let volume = create_test_volume(sites::de_bilt());
    let scan = volume.scan(0).unwrap();
    let options = SampleOptions::new(1000.0, 10_000.0);
    let config = PpiConfig::default();

    let ppi = build_ppi(scan, &options, &config).unwrap();
    assert_eq!(ppi.param_names(), vec!["DBZH", "VRADH"]);

    let single = build_ppi_for(scan, "VRADH", &options, &config).unwrap();
    assert_eq!(ppi.select(&["VRADH"]), single);

    let err = build_ppi_for(scan, "ZDR", &options, &config).unwrap_err();
    assert_eq!(err.error_code(), "DataAbsent");
}

#[test]
fn test_volume_ppi_uses_nearest_elevation() {
    let volume = create_test_volume(sites::de_bilt());
    let options = SampleOptions::new(1000.0, 10_000.0);

    let ppi = build_volume_ppi(&volume, 0.4, &options, &PpiConfig::default()).unwrap();
    assert_eq!(ppi.geo().elangle, 0.5);

    let ppi = build_volume_ppi(&volume, 2.9, &options, &PpiConfig::default()).unwrap();
    assert_eq!(ppi.geo().elangle, 3.0);

    let empty = PolarVolume::builder("empty", nominal_time(), sites::de_bilt())
        .build()
        .unwrap();
    let err = build_volume_ppi(&empty, 0.5, &options, &PpiConfig::default()).unwrap_err();
    assert_eq!(err.error_code(), "DataAbsent");
}

#[test]
fn test_ppi_keeps_scan_geo_and_projection() {
    let scan = create_ring_scan(sites::herwijnen(), 1.5, geometry::COARSE, "DBZH");
    let ppi = build_ppi(&scan, &SampleOptions::new(1000.0, 10_000.0), &PpiConfig::default()).unwrap();

    assert_eq!(ppi.geo(), scan.geo());
    assert!(!ppi.is_merged());
    assert_eq!(
        ppi.projection().to_string(),
        format!(
            "+proj=aeqd +lat_0={} +lon_0={} +units=m +ellps=WGS84 +no_defs",
            sites::herwijnen().lat,
            sites::herwijnen().lon
        )
    );
}
