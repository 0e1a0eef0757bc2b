//! Plain longitude/latitude handling and unit vectors
//!
//! Angles are `f64` radians. Longitude is free-running on input and is
//! folded into `[0, 2π)`; latitude must already lie in `[-π/2, π/2]`.
//! Distances on the sphere are computed on `nalgebra` unit vectors.

use nalgebra::Vector3;

use crate::constants::{HALF_PI, TAU};
use crate::errors::{HealpixError, Result};

/// Fold a longitude into `[0, 2π)`
pub fn normalize_longitude(lon: f64) -> f64 {
    let folded = lon.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly 2π
    if folded >= TAU {
        0.0
    } else {
        folded
    }
}

/// Validate a coordinate pair and return the folded longitude
pub fn validate_lonlat(lon: f64, lat: f64) -> Result<f64> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(HealpixError::InvalidCoordinate {
            lon,
            lat,
            reason: "longitude and latitude must be finite",
        });
    }
    if !(-HALF_PI..=HALF_PI).contains(&lat) {
        return Err(HealpixError::InvalidCoordinate {
            lon,
            lat,
            reason: "latitude must lie within [-π/2, π/2]",
        });
    }
    Ok(normalize_longitude(lon))
}

/// Unit vector pointing at `(lon, lat)`
///
/// X points at `lon = 0` on the equator, Z at the north pole.
pub fn unit_vector(lon: f64, lat: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = lat.sin_cos();
    unit_vector_from_z(sin_lat, cos_lat, lon)
}

/// Unit vector from `z = sin(lat)`, `sth = cos(lat)` and longitude
///
/// Pixel geometry is naturally expressed in `z`; passing `sth` separately
/// keeps full precision close to the poles.
pub fn unit_vector_from_z(z: f64, sth: f64, lon: f64) -> Vector3<f64> {
    let (sin_lon, cos_lon) = lon.sin_cos();
    Vector3::new(sth * cos_lon, sth * sin_lon, z)
}

/// Angle in radians between two directions, in `[0, π]`
///
/// Uses `atan2(|a × b|, a · b)`, which stays accurate for both tiny and
/// nearly antipodal separations.
pub fn angular_distance(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Great-circle distance between two longitude/latitude points in radians
pub fn lonlat_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    angular_distance(&unit_vector(lon1, lat1), &unit_vector(lon2, lat2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_abs_diff_eq!(normalize_longitude(-PI / 2.0), 3.0 * PI / 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(normalize_longitude(5.0 * PI), PI, epsilon = 1e-14);
        assert_eq!(normalize_longitude(-1e-300), 0.0);
        assert!(normalize_longitude(TAU) < TAU);
    }

    #[test]
    fn test_validate_lonlat() {
        assert!(validate_lonlat(1.0, HALF_PI).is_ok());
        assert!(validate_lonlat(1.0, -HALF_PI).is_ok());
        assert!(matches!(
            validate_lonlat(0.0, 1.6),
            Err(HealpixError::InvalidCoordinate { .. })
        ));
        assert!(validate_lonlat(f64::NAN, 0.0).is_err());
        assert!(validate_lonlat(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_unit_vector() {
        let v = unit_vector(0.0, 0.0);
        assert_abs_diff_eq!(v.x, 1.0, epsilon = 1e-15);

        let north = unit_vector(1.234, HALF_PI);
        assert_abs_diff_eq!(north.z, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(north.norm(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_angular_distance() {
        // Quarter circle along the equator
        assert_abs_diff_eq!(lonlat_distance(0.0, 0.0, HALF_PI, 0.0), HALF_PI, epsilon = 1e-15);

        // Pole to pole
        assert_abs_diff_eq!(lonlat_distance(0.0, HALF_PI, 0.0, -HALF_PI), PI, epsilon = 1e-15);

        // Same point
        assert_abs_diff_eq!(lonlat_distance(2.0, 0.3, 2.0, 0.3), 0.0, epsilon = 1e-15);

        // Small separations keep their precision
        let d = lonlat_distance(0.0, 0.0, 1e-9, 0.0);
        assert_abs_diff_eq!(d, 1e-9, epsilon = 1e-20);
    }
}
