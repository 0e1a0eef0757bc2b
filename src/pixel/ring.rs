//! Ring ordering and iso-latitude ring geometry
//!
//! Pixel centres lie on `4 * nside - 1` rings of constant latitude, numbered
//! 1 (next to the north pole) to `4 * nside - 1` (next to the south pole).
//! Ring indices count along each ring eastward from longitude 0, ring by
//! ring from north to south.

use super::face::{JPLL, JRLL};
use super::PixelXY;
use crate::constants::{TAU, TWO_THIRDS};
use crate::geometry::isqrt;

/// Geometry of one iso-latitude ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RingInfo {
    /// Ring number, `1..=4*nside-1`
    pub ring: u64,
    /// Ring index of the first pixel on the ring
    pub first: u64,
    /// Number of pixels on the ring
    pub len: u64,
    /// `sin(lat)` of the pixel centres
    pub z: f64,
    /// `cos(lat)` of the pixel centres
    pub sth: f64,
    /// Whether the first centre sits half a step east of longitude 0
    pub shifted: bool,
}

impl RingInfo {
    pub fn new(ring: u64, nside: u64) -> Self {
        let n = nside;
        let nf = nside as f64;
        if ring < n {
            let t = (ring * ring) as f64 / (3.0 * nf * nf);
            Self {
                ring,
                first: 2 * ring * (ring - 1),
                len: 4 * ring,
                z: 1.0 - t,
                sth: (t * (2.0 - t)).sqrt(),
                shifted: true,
            }
        } else if ring <= 3 * n {
            let z = (2 * n) as f64 - ring as f64;
            let z = z * TWO_THIRDS / nf;
            Self {
                ring,
                first: 2 * n * (n - 1) + (ring - n) * 4 * n,
                len: 4 * n,
                z,
                sth: ((1.0 - z) * (1.0 + z)).sqrt(),
                shifted: (ring - n) % 2 == 0,
            }
        } else {
            let rr = 4 * n - ring;
            let t = (rr * rr) as f64 / (3.0 * nf * nf);
            Self {
                ring,
                first: 12 * n * n - 2 * rr * (rr + 1),
                len: 4 * rr,
                z: t - 1.0,
                sth: (t * (2.0 - t)).sqrt(),
                shifted: true,
            }
        }
    }

    /// Latitude of the ring in radians
    pub fn lat(&self) -> f64 {
        self.z.atan2(self.sth)
    }

    /// Longitude spacing between neighbouring centres
    pub fn step(&self) -> f64 {
        TAU / self.len as f64
    }

    /// Longitude offset of the first centre, in units of [`Self::step`]
    pub fn shift(&self) -> f64 {
        if self.shifted {
            0.5
        } else {
            0.0
        }
    }

    /// Longitude of the centre of the `k`-th pixel on the ring
    pub fn pixel_lon(&self, k: u64) -> f64 {
        (k as f64 + self.shift()) * self.step()
    }

    /// Ring index of position `k`, wrapping around the ring
    pub fn index(&self, k: i64) -> u64 {
        self.first + k.rem_euclid(self.len as i64) as u64
    }
}

/// Ring number and position along the ring of a ring index
#[cfg(test)]
pub(crate) fn locate(index: u64, nside: u64) -> (u64, u64) {
    let (iring, iphi, _, _) = ring_coordinates(index, nside);
    (iring as u64, (iphi - 1) as u64)
}

/// Ring number of the southernmost ring lying north of (or on) `z`
///
/// Returns 0 above the first ring and `4 * nside - 1` below the last one.
pub(crate) fn ring_above(z: f64, nside: u64) -> i64 {
    let n = nside as f64;
    let az = z.abs();
    if az <= TWO_THIRDS {
        return (n * (2.0 - 1.5 * z)) as i64;
    }
    let iring = (n * (3.0 * (1.0 - az)).sqrt()) as i64;
    if z > 0.0 {
        iring
    } else {
        4 * nside as i64 - iring - 1
    }
}

/// `(iring, iphi, kshift, nr)` of a ring index
///
/// `iphi` counts from 1, `kshift` is 1 on equatorial rings whose first
/// centre sits on longitude 0 and `nr` is the number of pixels per quarter
/// of the ring.
fn ring_coordinates(index: u64, nside: u64) -> (i64, i64, i64, i64) {
    let n = nside as i64;
    let pix = index as i64;
    let ncap = 2 * n * (n - 1);
    let npix = 12 * n * n;

    if pix < ncap {
        let iring = (1 + isqrt(1 + 2 * pix as u64) as i64) >> 1;
        let iphi = pix + 1 - 2 * iring * (iring - 1);
        (iring, iphi, 0, iring)
    } else if pix < npix - ncap {
        let ip = pix - ncap;
        let tmp = ip / (4 * n);
        let iring = tmp + n;
        let iphi = ip - tmp * 4 * n + 1;
        (iring, iphi, (iring + n) & 1, n)
    } else {
        let ip = npix - pix;
        let iring = (1 + isqrt(2 * ip as u64 - 1) as i64) >> 1;
        let iphi = 4 * iring + 1 - (ip - 2 * iring * (iring - 1));
        (4 * n - iring, iphi, 0, iring)
    }
}

pub(crate) fn ring_to_xyf(index: u64, nside: u64) -> PixelXY {
    let n = nside as i64;
    let (iring, iphi, kshift, nr) = ring_coordinates(index, nside);

    let face = if iring < n {
        (iphi - 1) / nr
    } else if iring > 3 * n {
        8 + (iphi - 1) / nr
    } else {
        let ire = iring - n + 1;
        let irm = 2 * n + 2 - ire;
        let ifm = (iphi - ire / 2 + n - 1) / n;
        let ifp = (iphi - irm / 2 + n - 1) / n;
        if ifp == ifm {
            ifp | 4
        } else if ifp < ifm {
            ifp
        } else {
            ifm + 8
        }
    };

    let irt = iring - JRLL[face as usize] * n + 1;
    let mut ipt = 2 * iphi - JPLL[face as usize] * nr - kshift - 1;
    if ipt >= 2 * n {
        ipt -= 8 * n;
    }

    PixelXY::new(
        face as u8,
        ((ipt - irt) >> 1) as u32,
        ((-ipt - irt) >> 1) as u32,
    )
}

pub(crate) fn xyf_to_ring(xyf: PixelXY, nside: u64) -> u64 {
    let n = nside as i64;
    let face = xyf.face as usize;
    let ix = xyf.ix as i64;
    let iy = xyf.iy as i64;
    let ncap = 2 * n * (n - 1);
    let npix = 12 * n * n;

    let jr = JRLL[face] * n - ix - iy - 1;
    let (nr, first, kshift) = if jr < n {
        (jr, 2 * jr * (jr - 1), 0)
    } else if jr > 3 * n {
        let nr = 4 * n - jr;
        (nr, npix - 2 * (nr + 1) * nr, 0)
    } else {
        (n, ncap + (jr - n) * 4 * n, (jr - n) & 1)
    };

    let mut jp = (JPLL[face] * nr + ix - iy + 1 + kshift) / 2;
    if jp > 4 * n {
        jp -= 4 * n;
    } else if jp < 1 {
        jp += 4 * n;
    }

    (first + jp - 1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ring_info_partitions_indices() {
        for nside in [1u64, 2, 3, 4, 7] {
            let mut expected_first = 0;
            for ring in 1..4 * nside {
                let info = RingInfo::new(ring, nside);
                assert_eq!(info.first, expected_first, "nside={} ring={}", nside, ring);
                expected_first += info.len;
            }
            assert_eq!(expected_first, 12 * nside * nside);
        }
    }

    #[test]
    fn test_ring_info_symmetry() {
        let nside = 5;
        for ring in 1..2 * nside {
            let north = RingInfo::new(ring, nside);
            let south = RingInfo::new(4 * nside - ring, nside);
            assert_eq!(north.len, south.len);
            assert_eq!(north.shifted, south.shifted);
            assert_abs_diff_eq!(north.z, -south.z, epsilon = 1e-15);
        }
        assert_abs_diff_eq!(RingInfo::new(2 * nside, nside).z, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_locate() {
        assert_eq!(locate(0, 2), (1, 0));
        assert_eq!(locate(3, 2), (1, 3));
        assert_eq!(locate(4, 2), (2, 0));
        assert_eq!(locate(12, 2), (3, 0));
        assert_eq!(locate(47, 2), (7, 3));
        for nside in [1u64, 3, 8] {
            for index in 0..12 * nside * nside {
                let (ring, k) = locate(index, nside);
                assert_eq!(RingInfo::new(ring, nside).index(k as i64), index);
            }
        }
    }

    #[test]
    fn test_ring_above() {
        let nside = 4;
        assert_eq!(ring_above(1.0, nside), 0);
        assert_eq!(ring_above(-1.0, nside), 15);
        for ring in 1..4 * nside {
            let z = RingInfo::new(ring, nside).z;
            // Just south of a ring, that ring is the one above
            assert_eq!(ring_above(z - 1e-9, nside), ring as i64, "ring={}", ring);
            assert_eq!(ring_above(z + 1e-9, nside), ring as i64 - 1, "ring={}", ring);
        }
    }

    #[test]
    fn test_xyf_round_trip() {
        for nside in [1u64, 2, 3, 5, 16] {
            for index in 0..12 * nside * nside {
                let xyf = ring_to_xyf(index, nside);
                assert!(xyf.face < 12);
                assert!((xyf.ix as u64) < nside && (xyf.iy as u64) < nside);
                assert_eq!(xyf_to_ring(xyf, nside), index, "nside={}", nside);
            }
        }
    }

    #[test]
    fn test_first_pixels() {
        // Northernmost ring: one pixel at the top of each north tile
        for face in 0..4u8 {
            assert_eq!(xyf_to_ring(PixelXY::new(face, 1, 1), 2), face as u64);
        }
        // Southernmost ring
        for face in 8..12u8 {
            assert_eq!(xyf_to_ring(PixelXY::new(face, 0, 0), 2), 36 + face as u64);
        }
    }
}
