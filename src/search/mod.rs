//! Cone (disc) search
//!
//! [`cone_search`] returns the pixels whose footprint may intersect a disc
//! of angular `radius` around a point. Candidates are enumerated ring by
//! ring: only the rings whose latitude is within reach of the disc are
//! visited, and on each of them only the longitude window that can reach
//! the disc.
//!
//! The exact mode keeps a candidate when its centre lies within
//! `radius + max_pixel_radius(nside)` of the disc centre, which no pixel
//! touching the disc can violate. The approximate mode widens the
//! enumeration by one ring and one pixel on each side and returns every
//! candidate without a distance test, so it always returns at least the
//! pixels of the exact mode.

use std::f64::consts::PI;

use log::{debug, trace};

use crate::coordinates::{unit_vector, unit_vector_from_z, validate_lonlat};
use crate::errors::{HealpixError, Result};
use crate::geometry::{max_pixel_radius, pixel_count, validate_nside_for};
use crate::pixel::ring::{ring_above, RingInfo};
use crate::pixel::{ring_index_in, Order};

/// Slack on the cosine comparison of the exact mode
const COS_TOLERANCE: f64 = 1e-12;

/// Search padding in rings and in pixels per ring
fn padding(approximate: bool) -> (i64, i64) {
    if approximate {
        (2, 2)
    } else {
        (1, 1)
    }
}

/// Pixels that may intersect the disc of `radius` around `(lon, lat)`
///
/// All angles are in radians. The result is sorted, free of duplicates and
/// expressed in `order`. With `approximate` set the distance test on each
/// candidate is skipped and the result is a superset of the exact one.
///
/// # Errors
///
/// Fails on an unusable `nside`, an invalid centre, or a `radius` that is
/// negative, above `π` or not finite.
///
/// # Examples
///
/// ```rust
/// use healpix::pixel::{lonlat_to_index, Order};
/// use healpix::search::cone_search;
///
/// let pixels = cone_search(0.0, 0.0, 0.0, 4, Order::Ring, false).unwrap();
/// let centre = lonlat_to_index(0.0, 0.0, 4, Order::Ring).unwrap();
/// assert!(pixels.contains(&centre));
/// ```
pub fn cone_search(
    lon: f64,
    lat: f64,
    radius: f64,
    nside: u64,
    order: Order,
    approximate: bool,
) -> Result<Vec<u64>> {
    validate_nside_for(nside, order)?;
    let lon = validate_lonlat(lon, lat)?;
    if !radius.is_finite() || !(0.0..=PI).contains(&radius) {
        return Err(HealpixError::InvalidRadius { radius });
    }

    let npix = pixel_count(nside)?;
    let reach = radius + max_pixel_radius(nside)?;
    if reach >= PI {
        debug!(
            "Cone of radius {} reaches the whole sphere at nside={}, returning all {} pixels",
            radius, nside, npix
        );
        return Ok((0..npix).collect());
    }

    let (ring_pad, pixel_pad) = padding(approximate);
    let last_ring = 4 * nside as i64 - 1;
    let z_max = (lat + reach).min(PI / 2.0).sin();
    let z_min = (lat - reach).max(-PI / 2.0).sin();
    let first = (ring_above(z_max, nside) + 1 - ring_pad).max(1);
    let last = (ring_above(z_min, nside) + ring_pad).min(last_ring);

    debug!(
        "Cone search at ({}, {}) radius={} nside={}: rings {}..={}",
        lon, lat, radius, nside, first, last
    );

    let centre = unit_vector(lon, lat);
    let (sin_lat, cos_lat) = lat.sin_cos();
    let cos_reach = reach.cos();

    let mut candidates = 0usize;
    let mut pixels = Vec::new();

    for ring in first..=last {
        let info = RingInfo::new(ring as u64, nside);
        let len = info.len as i64;

        let window = longitude_window(&info, lon, sin_lat, cos_lat, cos_reach, pixel_pad);
        let (k_lo, k_hi) = match window {
            Some((lo, hi)) if hi - lo + 1 < len => (lo, hi),
            _ => (0, len - 1),
        };
        trace!("Ring {}: positions {}..={} of {}", info.ring, k_lo, k_hi, len);

        for k in k_lo..=k_hi {
            candidates += 1;
            if !approximate {
                let pos = k.rem_euclid(len) as u64;
                let v = unit_vector_from_z(info.z, info.sth, info.pixel_lon(pos));
                if v.dot(&centre) < cos_reach - COS_TOLERANCE {
                    continue;
                }
            }
            pixels.push(ring_index_in(info.index(k), nside, order));
        }
    }

    pixels.sort_unstable();
    pixels.dedup();
    debug!(
        "Cone search visited {} candidates, returning {} pixels",
        candidates,
        pixels.len()
    );
    Ok(pixels)
}

/// Range of ring positions whose centres can be within reach, padded
///
/// `None` means the whole ring.
fn longitude_window(
    info: &RingInfo,
    lon: f64,
    sin_lat: f64,
    cos_lat: f64,
    cos_reach: f64,
    pad: i64,
) -> Option<(i64, i64)> {
    let denom = cos_lat * info.sth;
    if denom < 1e-12 {
        return None;
    }

    // Spherical law of cosines solved for the longitude difference
    let x = (cos_reach - sin_lat * info.z) / denom;
    if x <= -1.0 {
        return None;
    }
    let delta = if x >= 1.0 { 0.0 } else { x.acos() };

    let step = info.step();
    let shift = info.shift();
    let lo = ((lon - delta) / step - shift).ceil() as i64 - pad;
    let hi = ((lon + delta) / step - shift).floor() as i64 + pad;
    Some((lo, hi))
}
