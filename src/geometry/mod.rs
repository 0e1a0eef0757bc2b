//! Geometry primitives of the pixelization
//!
//! Pure functions of the resolution parameter `nside`: how many pixels the
//! sphere is split into, how large each of them is, and how `nside` relates to
//! the hierarchy level used by the nested scheme.
//!
//! Every pixel has the same area, `4π / (12 * nside^2)` steradians. The
//! characteristic angular size returned by [`pixel_resolution`] is the side
//! of a square with that area, while [`max_pixel_radius`] bounds how far any
//! point of a pixel can be from its centre.

use std::f64::consts::PI;

use crate::constants::{FOUR_PI, MAX_LEVEL, MAX_NSIDE, N_BASE_TILES, TWO_THIRDS};
use crate::coordinates::{angular_distance, unit_vector_from_z};
use crate::errors::{HealpixError, Result};
use crate::pixel::Order;

/// Check that `nside` can be used with any ordering
///
/// Ring ordering works for every positive `nside` up to [`MAX_NSIDE`].
pub fn validate_nside(nside: u64) -> Result<()> {
    if nside == 0 {
        return Err(HealpixError::InvalidResolution {
            nside,
            reason: "nside must be positive",
        });
    }
    if nside > MAX_NSIDE {
        return Err(HealpixError::InvalidResolution {
            nside,
            reason: "nside must not exceed 2^29",
        });
    }
    Ok(())
}

/// Check that `nside` can be used with the given ordering
///
/// The nested scheme splits each base tile by repeated halving, so it only
/// exists for powers of two.
pub fn validate_nside_for(nside: u64, order: Order) -> Result<()> {
    validate_nside(nside)?;
    if order == Order::Nested && !nside.is_power_of_two() {
        return Err(HealpixError::InvalidResolution {
            nside,
            reason: "nested ordering requires nside to be a power of two",
        });
    }
    Ok(())
}

/// Number of pixels covering the sphere, `12 * nside^2`
///
/// # Examples
///
/// ```rust
/// use healpix::geometry::pixel_count;
///
/// assert_eq!(pixel_count(1).unwrap(), 12);
/// assert_eq!(pixel_count(4).unwrap(), 192);
/// assert!(pixel_count(0).is_err());
/// ```
pub fn pixel_count(nside: u64) -> Result<u64> {
    validate_nside(nside)?;
    Ok(N_BASE_TILES * nside * nside)
}

/// Solid angle of a single pixel in steradians
pub fn pixel_area(nside: u64) -> Result<f64> {
    Ok(FOUR_PI / pixel_count(nside)? as f64)
}

/// Characteristic angular size of a pixel in radians, `sqrt(pixel_area)`
pub fn pixel_resolution(nside: u64) -> Result<f64> {
    Ok(pixel_area(nside)?.sqrt())
}

/// Largest angular distance between a pixel centre and any point of that pixel
///
/// The most elongated pixels sit just poleward of the polar cap boundary,
/// so the bound is measured between a vertex on `z = 2/3` and the latitude
/// of the first ring above it.
pub fn max_pixel_radius(nside: u64) -> Result<f64> {
    validate_nside(nside)?;
    let n = nside as f64;

    let vertex_z = TWO_THIRDS;
    let vertex = unit_vector_from_z(vertex_z, (1.0 - vertex_z * vertex_z).sqrt(), PI / (4.0 * n));

    let t = (1.0 - 1.0 / n).powi(2) / 3.0;
    let centre = unit_vector_from_z(1.0 - t, (t * (2.0 - t)).sqrt(), 0.0);

    Ok(angular_distance(&vertex, &centre))
}

/// Resolution at a given hierarchy level, `nside = 2^level`
pub fn level_to_nside(level: u32) -> Result<u64> {
    if level > MAX_LEVEL {
        return Err(HealpixError::InvalidResolution {
            nside: u64::MAX,
            reason: "level must not exceed 29",
        });
    }
    Ok(1u64 << level)
}

/// Hierarchy level of a power-of-two resolution
pub fn nside_to_level(nside: u64) -> Result<u32> {
    validate_nside_for(nside, Order::Nested)?;
    Ok(nside.trailing_zeros())
}

/// Recover `nside` from the length of a full-sky map
pub fn npix_to_nside(npix: u64) -> Result<u64> {
    if npix == 0 || npix % N_BASE_TILES != 0 {
        return Err(HealpixError::InvalidPixelCount { npix });
    }
    let per_tile = npix / N_BASE_TILES;
    let nside = isqrt(per_tile);
    if nside * nside != per_tile || nside > MAX_NSIDE {
        return Err(HealpixError::InvalidPixelCount { npix });
    }
    Ok(nside)
}

/// Integer square root, exact for every `u64` this crate produces
pub(crate) fn isqrt(v: u64) -> u64 {
    let mut root = (v as f64).sqrt() as u64;
    while root * root > v {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= v {
        root += 1;
    }
    root
}
