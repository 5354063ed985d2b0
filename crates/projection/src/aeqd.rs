//! Azimuthal Equidistant projection.
//!
//! Used as the working plane of a single radar: geodesic distances and
//! azimuths from the projection centre (the antenna) are preserved, so a
//! polar bin at range `r` and azimuth `a` sits at distance `r` from the
//! origin along compass bearing `a`.
//!
//! The ellipsoidal form is computed with Vincenty's inverse and direct
//! geodesic solutions. A sphere is the special case of zero flattening.
//! Projected coordinates are expressed in the projection's linear unit
//! (meters unless configured otherwise).

use std::f64::consts::PI;

use radar_common::{RadarError, RadarResult};

/// Convergence threshold for the Vincenty iterations (radians).
const TOLERANCE: f64 = 1e-12;

const MAX_ITERATIONS: usize = 200;

/// Reference ellipsoid of an azimuthal equidistant plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    /// Sphere of radius `r` meters.
    pub fn sphere(r: f64) -> RadarResult<Self> {
        if !r.is_finite() || r <= 0.0 {
            return Err(RadarError::projection(format!("invalid sphere radius {}", r)));
        }
        Ok(Self { a: r, f: 0.0 })
    }

    /// Semi-minor axis (meters).
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    pub fn is_sphere(&self) -> bool {
        self.f == 0.0
    }

    /// Reduced latitude as `(sin U, cos U)`.
    fn reduced(&self, phi: f64) -> (f64, f64) {
        let u = ((1.0 - self.f) * phi.sin()).atan2(phi.cos());
        u.sin_cos()
    }

    /// Vincenty's `A` and `B` series coefficients for `cos^2(alpha)`.
    fn series(&self, cos_sq_alpha: f64) -> (f64, f64) {
        let b = self.b();
        let u_sq = cos_sq_alpha * (self.a * self.a - b * b) / (b * b);
        let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        (big_a, big_b)
    }
}

fn delta_sigma(big_b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sm: f64) -> f64 {
    let cos_2sm_sq = cos_2sm * cos_2sm;
    big_b
        * sin_sigma
        * (cos_2sm
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sm_sq)
                    - big_b / 6.0 * cos_2sm * (-3.0 + 4.0 * sin_sigma * sin_sigma) * (-3.0 + 4.0 * cos_2sm_sq)))
}

/// Azimuthal Equidistant projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AzimuthalEquidistant {
    /// Latitude of projection centre in degrees
    pub lat_0: f64,
    /// Longitude of projection centre in degrees
    pub lon_0: f64,
    /// Meters per projected unit
    pub to_meter: f64,
    pub ellipsoid: Ellipsoid,
}

impl AzimuthalEquidistant {
    /// Create a WGS84 projection centred on `(lat_0, lon_0)` with a meter unit.
    pub fn new(lat_0: f64, lon_0: f64) -> RadarResult<Self> {
        Self::with_unit(lat_0, lon_0, 1.0)
    }

    /// Create a WGS84 projection with an explicit linear unit.
    pub fn with_unit(lat_0: f64, lon_0: f64, to_meter: f64) -> RadarResult<Self> {
        Self::with_ellipsoid(lat_0, lon_0, to_meter, Ellipsoid::WGS84)
    }

    pub fn with_ellipsoid(lat_0: f64, lon_0: f64, to_meter: f64, ellipsoid: Ellipsoid) -> RadarResult<Self> {
        if !lat_0.is_finite() || !(-90.0..=90.0).contains(&lat_0) {
            return Err(RadarError::projection(format!(
                "projection centre latitude {} outside [-90, 90]",
                lat_0
            )));
        }
        if !lon_0.is_finite() || !(-180.0..=180.0).contains(&lon_0) {
            return Err(RadarError::projection(format!(
                "projection centre longitude {} outside [-180, 180]",
                lon_0
            )));
        }
        if !to_meter.is_finite() || to_meter <= 0.0 {
            return Err(RadarError::projection(format!(
                "invalid linear unit factor {}",
                to_meter
            )));
        }
        Ok(Self {
            lat_0,
            lon_0,
            to_meter,
            ellipsoid,
        })
    }

    /// Convert geographic coordinates (degrees) to projected (x, y).
    ///
    /// `x` is east-positive and `y` north-positive. Points at or near the
    /// antipode of the centre have no defined direction and are rejected.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> RadarResult<(f64, f64)> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return Err(RadarError::projection(format!(
                "non-finite geographic point ({}, {})",
                lon_deg, lat_deg
            )));
        }

        let Ellipsoid { f, .. } = self.ellipsoid;
        let big_l = normalize_radians(lon_deg.to_radians() - self.lon_0.to_radians());
        let (sin_u1, cos_u1) = self.ellipsoid.reduced(self.lat_0.to_radians());
        let (sin_u2, cos_u2) = self.ellipsoid.reduced(lat_deg.to_radians());

        let mut lambda = big_l;
        let mut converged = false;
        let (mut sin_sigma, mut cos_sigma, mut sigma) = (0.0, 1.0, 0.0);
        let (mut cos_sq_alpha, mut cos_2sm) = (1.0, 0.0);
        let (mut sin_lambda, mut cos_lambda) = (0.0, 1.0);

        for _ in 0..MAX_ITERATIONS {
            (sin_lambda, cos_lambda) = lambda.sin_cos();
            let east = cos_u2 * sin_lambda;
            let north = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
            sin_sigma = east.hypot(north);
            if sin_sigma == 0.0 {
                // Coincident with the centre
                return Ok((0.0, 0.0));
            }
            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            cos_2sm = if cos_sq_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            } else {
                // Equatorial line
                0.0
            };
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let previous = lambda;
            lambda = big_l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma + c * sin_sigma * (cos_2sm + c * cos_sigma * (-1.0 + 2.0 * cos_2sm * cos_2sm)));

            if lambda.abs() > PI {
                break;
            }
            if (lambda - previous).abs() < TOLERANCE {
                converged = true;
                break;
            }
        }

        if !converged {
            return Err(RadarError::projection(format!(
                "point ({}, {}) is antipodal to the projection centre",
                lon_deg, lat_deg
            )));
        }

        let (big_a, big_b) = self.ellipsoid.series(cos_sq_alpha);
        let distance = self.ellipsoid.b() * big_a * (sigma - delta_sigma(big_b, sin_sigma, cos_sigma, cos_2sm));
        let azimuth = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);

        let rho = distance / self.to_meter;
        Ok((rho * azimuth.sin(), rho * azimuth.cos()))
    }

    /// Convert projected (x, y) back to geographic (lon, lat) in degrees.
    ///
    /// Longitudes are normalised to [-180, 180].
    pub fn inverse(&self, x: f64, y: f64) -> RadarResult<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(RadarError::projection(format!(
                "non-finite projected point ({}, {})",
                x, y
            )));
        }

        let distance = x.hypot(y) * self.to_meter;
        if distance == 0.0 {
            return Ok((self.lon_0, self.lat_0));
        }
        if distance > PI * self.ellipsoid.a {
            return Err(RadarError::projection(format!(
                "projected point ({}, {}) lies beyond the antipode",
                x, y
            )));
        }

        let Ellipsoid { f, .. } = self.ellipsoid;
        let (sin_alpha1, cos_alpha1) = x.atan2(y).sin_cos();
        let (sin_u1, cos_u1) = self.ellipsoid.reduced(self.lat_0.to_radians());

        let sigma1 = sin_u1.atan2(cos_u1 * cos_alpha1);
        let sin_alpha = cos_u1 * sin_alpha1;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let (big_a, big_b) = self.ellipsoid.series(cos_sq_alpha);
        let base = distance / (self.ellipsoid.b() * big_a);

        let mut sigma = base;
        for _ in 0..MAX_ITERATIONS {
            let (sin_sigma, cos_sigma) = sigma.sin_cos();
            let cos_2sm = (2.0 * sigma1 + sigma).cos();
            let previous = sigma;
            sigma = base + delta_sigma(big_b, sin_sigma, cos_sigma, cos_2sm);
            if (sigma - previous).abs() < TOLERANCE {
                break;
            }
        }
        let (sin_sigma, cos_sigma) = sigma.sin_cos();
        let cos_2sm = (2.0 * sigma1 + sigma).cos();

        let tmp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
        let phi = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
            .atan2((1.0 - f) * sin_alpha.hypot(tmp));
        let lambda = (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let big_l = lambda
            - (1.0 - c)
                * f
                * sin_alpha
                * (sigma + c * sin_sigma * (cos_2sm + c * cos_sigma * (-1.0 + 2.0 * cos_2sm * cos_2sm)));

        let lon = normalize_radians(self.lon_0.to_radians() + big_l);
        Ok((lon.to_degrees(), phi.to_degrees()))
    }

    /// Longitude shifted by whole turns to lie within 180 degrees of `lon_0`.
    pub fn unwrap_longitude(&self, lon: f64) -> f64 {
        self.lon_0 + normalize_radians((lon - self.lon_0).to_radians()).to_degrees()
    }
}

/// Wrap an angle in radians to [-PI, PI].
fn normalize_radians(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
