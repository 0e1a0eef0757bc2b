//! Bilinear interpolation of per-pixel values
//!
//! A point is bracketed by the two rings of pixel centres immediately north
//! and south of it. On each ring the two centres on either side of the
//! point's longitude are blended linearly in longitude, and the two ring
//! values are then blended linearly in latitude.
//!
//! Poleward of the first (last) ring there is no second ring. The point is
//! then blended between the two bracketing centres of that ring and the
//! average of all four pixels around the pole, which it reaches exactly at
//! the pole.

use log::debug;

use crate::constants::HALF_PI;
use crate::coordinates::validate_lonlat;
use crate::errors::{HealpixError, Result};
use crate::geometry::{pixel_count, validate_nside_for};
use crate::pixel::ring::{ring_above, RingInfo};
use crate::pixel::{ring_index_in, Order};

/// The two centres on `ring` bracketing `lon`, with their weights
fn ring_pair(ring: u64, nside: u64, lon: f64) -> ([u64; 2], [f64; 2], RingInfo) {
    let info = RingInfo::new(ring, nside);
    let u = lon / info.step() - info.shift();
    let k = u.floor();
    let w = u - k;
    let k = k as i64;
    ([info.index(k), info.index(k + 1)], [1.0 - w, w], info)
}

/// Pixels and weights blended by [`interpolate_bilinear`]
///
/// Weights are non-negative and sum to one. Indices are in `order` and
/// may repeat at very low resolution.
pub fn bilinear_weights(lon: f64, lat: f64, nside: u64, order: Order) -> Result<[(u64, f64); 4]> {
    validate_nside_for(nside, order)?;
    let lon = validate_lonlat(lon, lat)?;

    let last_ring = 4 * nside;
    let above = ring_above(lat.sin(), nside) as u64;
    let below = above + 1;

    let (pix, wgt) = if above == 0 {
        // North of ring 1: the other pair sits across the pole
        let (p, w, info) = ring_pair(below, nside, lon);
        let wtheta = ((HALF_PI - lat) / (HALF_PI - info.lat())).clamp(0.0, 1.0);
        let fac = 0.25 * (1.0 - wtheta);
        debug!("Interpolating north of the first ring: lat={}, wtheta={}", lat, wtheta);

        (
            [(p[0] + 2) & 3, (p[1] + 2) & 3, p[0], p[1]],
            [fac, fac, w[0] * wtheta + fac, w[1] * wtheta + fac],
        )
    } else if below == last_ring {
        let (p, w, info) = ring_pair(above, nside, lon);
        let wtheta = ((info.lat() - lat) / (info.lat() + HALF_PI)).clamp(0.0, 1.0);
        let fac = 0.25 * wtheta;
        debug!("Interpolating south of the last ring: lat={}, wtheta={}", lat, wtheta);

        let npix = 12 * nside * nside;
        let across = |i: u64| npix - 4 + ((i - (npix - 4) + 2) & 3);
        (
            [p[0], p[1], across(p[0]), across(p[1])],
            [w[0] * (1.0 - wtheta) + fac, w[1] * (1.0 - wtheta) + fac, fac, fac],
        )
    } else {
        let (p1, w1, north) = ring_pair(above, nside, lon);
        let (p2, w2, south) = ring_pair(below, nside, lon);
        let lat1 = north.lat();
        let wtheta = ((lat1 - lat) / (lat1 - south.lat())).clamp(0.0, 1.0);

        (
            [p1[0], p1[1], p2[0], p2[1]],
            [
                w1[0] * (1.0 - wtheta),
                w1[1] * (1.0 - wtheta),
                w2[0] * wtheta,
                w2[1] * wtheta,
            ],
        )
    };

    let mut result = [(0u64, 0.0f64); 4];
    for (slot, (&p, &w)) in result.iter_mut().zip(pix.iter().zip(wgt.iter())) {
        *slot = (ring_index_in(p, nside, order), w);
    }
    Ok(result)
}

/// Estimate the map value at `(lon, lat)` from its four surrounding pixel centres
///
/// `values` holds one value per pixel, indexed in `order`.
///
/// # Examples
///
/// ```rust
/// use healpix::interpolation::interpolate_bilinear;
/// use healpix::pixel::Order;
///
/// let values = vec![2.5; 48];
/// let v = interpolate_bilinear(1.0, 0.2, &values, 2, Order::Ring).unwrap();
/// assert!((v - 2.5).abs() < 1e-12);
/// ```
pub fn interpolate_bilinear(
    lon: f64,
    lat: f64,
    values: &[f64],
    nside: u64,
    order: Order,
) -> Result<f64> {
    let npix = pixel_count(nside)?;
    if values.len() as u64 != npix {
        return Err(HealpixError::ValueLengthMismatch {
            expected: npix,
            actual: values.len(),
        });
    }

    let weights = bilinear_weights(lon, lat, nside, order)?;
    Ok(weights
        .iter()
        .map(|&(index, w)| values[index as usize] * w)
        .sum())
}
