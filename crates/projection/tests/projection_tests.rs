//! Integration tests for projection round-trips and polar geometry.

use projection::{
    cartesian_to_polar, geographic_to_projected, polar_to_bin_index, projected_to_geographic,
    Projection,
};
use radar_common::RadarSite;
use test_utils::{assert_approx_eq, assert_coords_approx_eq, sites};

// ============================================================================
// Geographic <-> projected round-trips
// ============================================================================

#[test]
fn test_roundtrip_grid_around_radar() {
    let site = sites::de_bilt();
    let proj = Projection::aeqd_for_site(&site).unwrap();

    for i in -10..=10 {
        for j in -10..=10 {
            let lon = site.lon + i as f64 * 0.35;
            let lat = site.lat + j as f64 * 0.25;

            let (x, y) = geographic_to_projected(lon, lat, &proj).unwrap();
            let (rlon, rlat) = projected_to_geographic(x, y, &proj).unwrap();

            assert_coords_approx_eq!((rlon, rlat), (lon, lat), 1e-6);
        }
    }
}

#[test]
fn test_roundtrip_near_pole_and_dateline() {
    let site = RadarSite::new(78.2, 179.5, 10.0).unwrap();
    let proj = Projection::aeqd_for_site(&site).unwrap();

    for &(lon, lat) in &[(-179.5, 78.0), (178.0, 80.0), (-170.0, 85.0)] {
        let (x, y) = geographic_to_projected(lon, lat, &proj).unwrap();
        let (rlon, rlat) = projected_to_geographic(x, y, &proj).unwrap();
        assert_coords_approx_eq!((rlon, rlat), (lon, lat), 1e-6);
    }
}

#[test]
fn test_projected_distance_preserved() {
    let site = sites::de_bilt();
    let proj = Projection::aeqd_for_site(&site).unwrap();

    // 50 km due east of the radar, then back
    let (lon, lat) = projected_to_geographic(50_000.0, 0.0, &proj).unwrap();
    let (x, y) = geographic_to_projected(lon, lat, &proj).unwrap();
    assert_approx_eq!(x, 50_000.0, 1e-6);
    assert_approx_eq!(y, 0.0, 1e-6);

    let polar = cartesian_to_polar(x, y, 0.0);
    assert_approx_eq!(polar.range, 50_000.0, 1e-6);
    assert_approx_eq!(polar.azimuth, 90.0, 1e-6);
}

#[test]
fn test_distances_match_wgs84_geodesics() {
    let site = sites::de_bilt();
    let proj = Projection::aeqd_for_site(&site).unwrap();

    // One degree east along the parallel: 68521.8 m geodesic, a sphere gives 68302 m
    let (x, y) = geographic_to_projected(site.lon + 1.0, site.lat, &proj).unwrap();
    assert_approx_eq!(x.hypot(y), 68_521.8, 0.5);

    // One degree north along the meridian: 111278.7 m, a sphere gives 111195 m
    let (x, y) = geographic_to_projected(site.lon, site.lat + 1.0, &proj).unwrap();
    assert_approx_eq!(x, 0.0, 1e-6);
    assert_approx_eq!(y, 111_278.7, 1.0);
}

#[test]
fn test_sphere_definition_uses_radius() {
    let site = sites::de_bilt();
    let wgs84 = Projection::aeqd_for_site(&site).unwrap();
    let sphere = Projection::parse(&format!(
        "+proj=aeqd +lat_0={} +lon_0={} +R=6371008.8 +units=m",
        site.lat, site.lon
    ))
    .unwrap();

    let (_, y) = geographic_to_projected(site.lon, site.lat + 1.0, &sphere).unwrap();
    assert_approx_eq!(y, 6_371_008.8 * 1.0_f64.to_radians(), 1e-6);

    let (_, y_wgs84) = geographic_to_projected(site.lon, site.lat + 1.0, &wgs84).unwrap();
    assert!(y_wgs84 - y > 50.0);
}

#[test]
fn test_unwrap_longitude_across_antimeridian() {
    let site = RadarSite::new(52.0, 179.9, 10.0).unwrap();
    let proj = Projection::aeqd_for_site(&site).unwrap();

    let (lon, _) = projected_to_geographic(30_000.0, 0.0, &proj).unwrap();
    assert!(lon < 0.0, "wrapped longitude {}", lon);
    let lon = proj.unwrap_longitude(lon);
    assert!(lon > 180.0 && lon < 180.5, "unwrapped longitude {}", lon);

    // Unwrapped longitudes project like their wrapped form
    let (x, y) = geographic_to_projected(lon, 52.0, &proj).unwrap();
    let (xw, yw) = geographic_to_projected(lon - 360.0, 52.0, &proj).unwrap();
    assert_coords_approx_eq!((x, y), (xw, yw), 1e-6);
    assert_eq!(Projection::Geographic.unwrap_longitude(200.0), 200.0);
}

// ============================================================================
// Polar bins
// ============================================================================

#[test]
fn test_bearing_to_bin() {
    // Bearing ~63.4 degrees, range ~11180 m
    let polar = cartesian_to_polar(10_000.0, 5_000.0, 0.0);
    let idx = polar_to_bin_index(polar.range, polar.azimuth, 250.0, 1.0).unwrap();

    assert_eq!(idx.azim_bin, 64);
    assert_eq!(idx.range_bin, 45);
}
