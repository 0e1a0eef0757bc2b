//! Projection between base tiles and the sphere
//!
//! Each of the 12 base tiles carries a local frame `(x, y)` in `[0, 1]^2`:
//! `x` grows toward the tile's north-east edge, `y` toward its north-west
//! edge, so `(0, 0)` is the southern corner and `(1, 1)` the northern one.
//!
//! Inside the equatorial belt (`|z| <= 2/3`) the projection is linear in
//! longitude and in `z = sin(lat)`. Inside the polar caps the distance to
//! the pole is square-root compressed so that every pixel keeps the same
//! area while the meridians converge.

use std::f64::consts::{FRAC_2_PI, FRAC_PI_4};

use super::PixelXY;
use crate::constants::TWO_THIRDS;
use crate::coordinates::normalize_longitude;

/// Ring coordinate of each tile's centre, in units of `nside`
pub(crate) const JRLL: [i64; 12] = [2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4];
/// Longitude coordinate of each tile's centre, in units of `π/4`
pub(crate) const JPLL: [i64; 12] = [1, 3, 5, 7, 0, 2, 4, 6, 1, 3, 5, 7];

/// Longitude/latitude of the tile-frame point `(x, y)` of `face`
///
/// `x` and `y` are fractions of the tile side, so pixel `(ix, iy)` at
/// resolution `nside` covers `[ix/nside, (ix+1)/nside] x [iy/nside, (iy+1)/nside]`.
pub(crate) fn tile_to_lonlat(face: u8, x: f64, y: f64) -> (f64, f64) {
    let face = face as usize;
    let jr = JRLL[face] as f64 - x - y;

    // nr: pixels per quarter ring relative to nside, sth: cos(lat)
    let (nr, z, sth) = if jr < 1.0 {
        let tmp = jr * jr / 3.0;
        (jr, 1.0 - tmp, (tmp * (2.0 - tmp)).sqrt())
    } else if jr > 3.0 {
        let nr = 4.0 - jr;
        let tmp = nr * nr / 3.0;
        (nr, tmp - 1.0, (tmp * (2.0 - tmp)).sqrt())
    } else {
        let z = (2.0 - jr) * TWO_THIRDS;
        (1.0, z, ((1.0 - z) * (1.0 + z)).sqrt())
    };

    // t counts eighths of a turn in longitude, scaled by nr
    let t = (JPLL[face] as f64).mul_add(nr, x - y);
    let lon = if nr < 1e-15 { 0.0 } else { FRAC_PI_4 * t / nr };

    (normalize_longitude(lon), z.atan2(sth))
}

/// Pixel containing `(lon, lat)` and the point's offset inside it
///
/// `lon` must already be folded into `[0, 2π)` and `lat` validated. Points
/// on a pixel edge resolve the same way as the discrete reference
/// formulas, which is why the axes that run "backwards" are quantised as
/// `nside - 1 - floor(...)` rather than `floor(nside - ...)`.
pub(crate) fn lonlat_to_pixel(lon: f64, lat: f64, nside: u64) -> (PixelXY, f64, f64) {
    let n = nside as f64;
    let ns = nside as i64;
    let (z, sth) = lat.sin_cos();
    let za = z.abs();

    let mut tt = lon * FRAC_2_PI;
    if tt >= 4.0 {
        tt -= 4.0;
    }

    if za <= TWO_THIRDS {
        // Equatorial belt: index of the ascending and descending edge lines
        let temp1 = n * (0.5 + tt);
        let temp2 = n * 0.75 * z;
        let jp = temp1 - temp2;
        let jm = temp1 + temp2;
        // Both lie in [0, 5n) but may round onto 5n next to lon = 2π
        let edge = (5 * ns - 1) as f64;
        let jp_floor = jp.floor().clamp(0.0, edge);
        let jm_floor = jm.floor().clamp(0.0, edge);

        let ifp = jp_floor as i64 / ns;
        let ifm = jm_floor as i64 / ns;
        let face = if ifp == ifm {
            ifp | 4
        } else if ifp < ifm {
            ifp
        } else {
            ifm + 8
        };

        let ix = (jm_floor as i64).rem_euclid(ns);
        let iy = ns - 1 - (jp_floor as i64).rem_euclid(ns);
        let dx = jm - jm_floor;
        let dy = 1.0 - (jp - jp_floor);

        (PixelXY::new(face as u8, ix as u32, iy as u32), dx, dy)
    } else {
        // Polar caps
        let ntt = (tt as i64).min(3);
        let tp = tt - ntt as f64;
        let tmp = if za < 0.99 {
            n * (3.0 * (1.0 - za)).sqrt()
        } else {
            // 3(1 - |z|) = 3 cos^2(lat) / (1 + |z|), without the cancellation
            n * sth / ((1.0 + za) / 3.0).sqrt()
        };

        let jp = tp * tmp;
        let jm = (1.0 - tp) * tmp;
        let jp_floor = jp.floor().min(n - 1.0);
        let jm_floor = jm.floor().min(n - 1.0);
        let fp = (jp - jp_floor).min(1.0);
        let fm = (jm - jm_floor).min(1.0);

        if z > 0.0 {
            let ix = ns - 1 - jm_floor as i64;
            let iy = ns - 1 - jp_floor as i64;
            (PixelXY::new(ntt as u8, ix as u32, iy as u32), 1.0 - fm, 1.0 - fp)
        } else {
            (
                PixelXY::new(ntt as u8 + 8, jp_floor as u32, jm_floor as u32),
                fp,
                fm,
            )
        }
    }
}
