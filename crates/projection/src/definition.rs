//! Projection definitions and the geographic <-> projected transforms.
//!
//! Definitions use the proj4 `+key=value` notation, e.g.
//! `+proj=aeqd +lat_0=52.1 +lon_0=5.18 +units=m +ellps=WGS84`. The
//! azimuthal plane is ellipsoidal on WGS84 unless `+R=` asks for a sphere.

use std::fmt;
use std::str::FromStr;

use radar_common::{RadarError, RadarResult, RadarSite};

use crate::aeqd::{AzimuthalEquidistant, Ellipsoid};

/// A coordinate reference system understood by the resampling engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// WGS84 longitude/latitude in degrees.
    Geographic,
    /// Radar-centred azimuthal equidistant plane.
    AzimuthalEquidistant(AzimuthalEquidistant),
}

impl Projection {
    /// Azimuthal equidistant projection centred on a radar site, in meters.
    pub fn aeqd_for_site(site: &RadarSite) -> RadarResult<Self> {
        Ok(Projection::AzimuthalEquidistant(AzimuthalEquidistant::new(
            site.lat, site.lon,
        )?))
    }

    /// Parse a proj4-style definition string.
    pub fn parse(definition: &str) -> RadarResult<Self> {
        let mut proj = None;
        let mut lat_0 = None;
        let mut lon_0 = None;
        let mut to_meter = 1.0;
        let mut ellipsoid = Ellipsoid::WGS84;
        let mut radius = None;

        for token in definition.split_whitespace() {
            let token = token.strip_prefix('+').ok_or_else(|| {
                RadarError::projection(format!("malformed token '{}' in '{}'", token, definition))
            })?;
            let (key, value) = match token.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (token, None),
            };

            match (key, value) {
                ("proj", Some(v)) => proj = Some(v.to_lowercase()),
                ("lat_0", Some(v)) => lat_0 = Some(parse_number(key, v)?),
                ("lon_0", Some(v)) => lon_0 = Some(parse_number(key, v)?),
                ("units", Some(v)) => to_meter = unit_factor(v)?,
                ("to_meter", Some(v)) => to_meter = parse_number(key, v)?,
                ("R", Some(v)) => radius = Some(parse_number(key, v)?),
                ("ellps", Some(v)) | ("datum", Some(v)) => {
                    if !v.eq_ignore_ascii_case("WGS84") {
                        return Err(RadarError::projection(format!(
                            "unsupported {} '{}', only WGS84 is supported",
                            key, v
                        )));
                    }
                }
                ("no_defs", None) | ("type", Some(_)) => {}
                (k, _) => {
                    return Err(RadarError::projection(format!(
                        "unsupported projection parameter '{}' in '{}'",
                        k, definition
                    )))
                }
            }
        }

        match proj.as_deref() {
            Some("longlat") | Some("latlong") | Some("lonlat") | Some("latlon") => {
                Ok(Projection::Geographic)
            }
            Some("aeqd") => {
                let lat_0 = lat_0.ok_or_else(|| {
                    RadarError::projection(format!("aeqd definition lacks +lat_0: '{}'", definition))
                })?;
                let lon_0 = lon_0.ok_or_else(|| {
                    RadarError::projection(format!("aeqd definition lacks +lon_0: '{}'", definition))
                })?;
                if let Some(r) = radius {
                    ellipsoid = Ellipsoid::sphere(r)?;
                }
                Ok(Projection::AzimuthalEquidistant(
                    AzimuthalEquidistant::with_ellipsoid(lat_0, lon_0, to_meter, ellipsoid)?,
                ))
            }
            Some(other) => Err(RadarError::projection(format!(
                "unsupported projection '{}'",
                other
            ))),
            None => Err(RadarError::projection(format!(
                "definition lacks +proj: '{}'",
                definition
            ))),
        }
    }

    /// Bring a longitude from [`projected_to_geographic`] next to the
    /// projection centre, so extents straddling the antimeridian stay
    /// continuous. Geographic projections return it unchanged.
    pub fn unwrap_longitude(&self, lon: f64) -> f64 {
        match self {
            Projection::Geographic => lon,
            Projection::AzimuthalEquidistant(p) => p.unwrap_longitude(lon),
        }
    }

    /// Check if this is a geographic (lon/lat) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, Projection::Geographic)
    }
}

impl FromStr for Projection {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Projection::parse(s)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Geographic => write!(f, "+proj=longlat +datum=WGS84 +no_defs"),
            Projection::AzimuthalEquidistant(p) => {
                write!(f, "+proj=aeqd +lat_0={} +lon_0={} ", p.lat_0, p.lon_0)?;
                if p.to_meter == 1.0 {
                    write!(f, "+units=m")?;
                } else if p.to_meter == 1000.0 {
                    write!(f, "+units=km")?;
                } else {
                    write!(f, "+to_meter={}", p.to_meter)?;
                }
                if p.ellipsoid.is_sphere() {
                    write!(f, " +R={} +no_defs", p.ellipsoid.a)
                } else {
                    write!(f, " +ellps=WGS84 +no_defs")
                }
            }
        }
    }
}

/// Transform a WGS84 point into `projection`.
pub fn geographic_to_projected(lon: f64, lat: f64, projection: &Projection) -> RadarResult<(f64, f64)> {
    match projection {
        Projection::Geographic => {
            if !lon.is_finite() || !lat.is_finite() {
                return Err(RadarError::projection(format!(
                    "non-finite geographic point ({}, {})",
                    lon, lat
                )));
            }
            Ok((lon, lat))
        }
        Projection::AzimuthalEquidistant(p) => p.forward(lon, lat),
    }
}

/// Transform a point in `projection` back to WGS84 (lon, lat).
pub fn projected_to_geographic(x: f64, y: f64, projection: &Projection) -> RadarResult<(f64, f64)> {
    match projection {
        Projection::Geographic => {
            if !x.is_finite() || !y.is_finite() {
                return Err(RadarError::projection(format!(
                    "non-finite geographic point ({}, {})",
                    x, y
                )));
            }
            Ok((x, y))
        }
        Projection::AzimuthalEquidistant(p) => p.inverse(x, y),
    }
}

fn parse_number(key: &str, value: &str) -> RadarResult<f64> {
    value.parse::<f64>().map_err(|_| {
        RadarError::projection(format!("invalid number '{}' for +{}", value, key))
    })
}

fn unit_factor(unit: &str) -> RadarResult<f64> {
    match unit {
        "m" => Ok(1.0),
        "km" => Ok(1000.0),
        other => Err(RadarError::projection(format!("unsupported unit '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aeqd() {
        let proj = Projection::parse("+proj=aeqd +lat_0=52.95 +lon_0=4.79 +units=m +ellps=WGS84").unwrap();
        match proj {
            Projection::AzimuthalEquidistant(p) => {
                assert_eq!(p.lat_0, 52.95);
                assert_eq!(p.lon_0, 4.79);
                assert_eq!(p.to_meter, 1.0);
                assert_eq!(p.ellipsoid, Ellipsoid::WGS84);
            }
            _ => panic!("expected aeqd"),
        }
    }

    #[test]
    fn test_parse_geographic() {
        let proj: Projection = "+proj=longlat +datum=WGS84 +no_defs".parse().unwrap();
        assert!(proj.is_geographic());
    }

    #[test]
    fn test_display_roundtrip() {
        let proj = Projection::parse("+proj=aeqd +lat_0=52.95 +lon_0=4.79 +units=km").unwrap();
        let again = Projection::parse(&proj.to_string()).unwrap();
        assert_eq!(proj, again);

        let geo = Projection::Geographic;
        assert_eq!(Projection::parse(&geo.to_string()).unwrap(), geo);
    }

    #[test]
    fn test_parse_sphere_radius() {
        let proj = Projection::parse("+proj=aeqd +lat_0=52.95 +lon_0=4.79 +R=6371008.8 +units=m").unwrap();
        match proj {
            Projection::AzimuthalEquidistant(p) => {
                assert!(p.ellipsoid.is_sphere());
                assert_eq!(p.ellipsoid.a, 6_371_008.8);
            }
            _ => panic!("expected aeqd"),
        }
        assert_eq!(
            proj.to_string(),
            "+proj=aeqd +lat_0=52.95 +lon_0=4.79 +units=m +R=6371008.8 +no_defs"
        );
        assert_eq!(Projection::parse(&proj.to_string()).unwrap(), proj);
        assert!(Projection::parse("+proj=aeqd +lat_0=52 +lon_0=4 +R=-1").is_err());
    }

    #[test]
    fn test_malformed_definitions() {
        let bad = [
            "",
            "+proj=aeqd +lon_0=4.79",
            "+proj=aeqd +lat_0=abc +lon_0=4.79",
            "+proj=aeqd +lat_0=95 +lon_0=4.79",
            "+proj=merc +lon_0=0",
            "+proj=aeqd +lat_0=52 +lon_0=4 +units=ft",
            "+proj=aeqd +lat_0=52 +lon_0=4 +ellps=intl",
            "proj=aeqd lat_0=52 lon_0=4",
            "+proj=aeqd +lat_0=52 +lon_0=4 +k_0=1",
        ];
        for def in bad {
            let err = Projection::parse(def).unwrap_err();
            assert_eq!(err.error_code(), "ProjectionError", "definition '{}'", def);
        }
    }

    #[test]
    fn test_geographic_identity() {
        let proj = Projection::Geographic;
        assert_eq!(geographic_to_projected(5.0, 52.0, &proj).unwrap(), (5.0, 52.0));
        assert_eq!(projected_to_geographic(5.0, 52.0, &proj).unwrap(), (5.0, 52.0));
        assert!(geographic_to_projected(f64::NAN, 52.0, &proj).is_err());
    }

    #[test]
    fn test_aeqd_for_site() {
        let site = RadarSite::new(52.95, 4.79, 50.0).unwrap();
        let proj = Projection::aeqd_for_site(&site).unwrap();
        let (x, y) = geographic_to_projected(4.79, 52.95, &proj).unwrap();
        assert!(x.abs() < 1e-6 && y.abs() < 1e-6);
    }
}
