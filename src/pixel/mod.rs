//! Pixel indices and their positions on the sphere
//!
//! A pixel is addressed either by its ring index or by its nested index.
//! Internally both are converted through the pixel's tile coordinates
//! ([`PixelXY`]): the base tile it belongs to and its column/row within
//! that tile. A point inside a pixel is addressed by the offsets
//! `(dx, dy)` in `[0, 1]^2` along the tile axes, with `(0.5, 0.5)` the
//! pixel centre.
//!
//! # Examples
//!
//! ```rust
//! use healpix::pixel::{index_to_lonlat, lonlat_to_index, Order};
//!
//! let (lon, lat) = index_to_lonlat(88, 4, 0.5, 0.5, Order::Ring).unwrap();
//! assert_eq!(lonlat_to_index(lon, lat, 4, Order::Ring).unwrap(), 88);
//! ```

mod face;
mod nested;
mod neighbours;
mod ordering;
pub(crate) mod ring;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinates::{normalize_longitude, validate_lonlat};
use crate::errors::{HealpixError, Result};
use crate::geometry::{pixel_count, validate_nside_for};

pub use neighbours::neighbours;
pub use ordering::{nested_to_ring, ring_to_nested};

/// Pixel numbering scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Pixels numbered ring by ring from north to south
    #[default]
    Ring,
    /// Pixels numbered hierarchically inside each base tile
    Nested,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Ring => write!(f, "ring"),
            Order::Nested => write!(f, "nested"),
        }
    }
}

impl FromStr for Order {
    type Err = HealpixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ring" => Ok(Order::Ring),
            "nested" => Ok(Order::Nested),
            _ => Err(HealpixError::InvalidOrder(s.to_string())),
        }
    }
}

/// Tile coordinates of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelXY {
    /// Base tile, `0..12`
    pub face: u8,
    /// Column along the tile's north-east axis, `0..nside`
    pub ix: u32,
    /// Row along the tile's north-west axis, `0..nside`
    pub iy: u32,
}

impl PixelXY {
    pub fn new(face: u8, ix: u32, iy: u32) -> Self {
        Self { face, ix, iy }
    }
}

/// Check that `index` names a pixel at resolution `nside`
pub fn validate_index(index: u64, nside: u64) -> Result<()> {
    let npix = pixel_count(nside)?;
    if index >= npix {
        return Err(HealpixError::InvalidIndex { index, nside, npix });
    }
    Ok(())
}

fn validate_offsets(dx: f64, dy: f64) -> Result<()> {
    let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
    if !in_unit(dx) || !in_unit(dy) {
        return Err(HealpixError::InvalidOffset { dx, dy });
    }
    Ok(())
}

/// Tile coordinates of an index that has already been validated
pub(crate) fn index_to_xyf(index: u64, nside: u64, order: Order) -> PixelXY {
    match order {
        Order::Ring => ring::ring_to_xyf(index, nside),
        Order::Nested => nested::nested_to_xyf(index, nside),
    }
}

pub(crate) fn xyf_to_index(xyf: PixelXY, nside: u64, order: Order) -> u64 {
    match order {
        Order::Ring => ring::xyf_to_ring(xyf, nside),
        Order::Nested => nested::xyf_to_nested(xyf, nside),
    }
}

/// Re-express a ring index in `order`
pub(crate) fn ring_index_in(index: u64, nside: u64, order: Order) -> u64 {
    match order {
        Order::Ring => index,
        Order::Nested => nested::xyf_to_nested(ring::ring_to_xyf(index, nside), nside),
    }
}

/// Tile coordinates of a pixel index
pub fn pixel_xy(index: u64, nside: u64, order: Order) -> Result<PixelXY> {
    validate_nside_for(nside, order)?;
    validate_index(index, nside)?;
    Ok(index_to_xyf(index, nside, order))
}

/// Index of the pixel with the given tile coordinates
pub fn pixel_index(xyf: PixelXY, nside: u64, order: Order) -> Result<u64> {
    validate_nside_for(nside, order)?;
    if xyf.face >= 12 || xyf.ix as u64 >= nside || xyf.iy as u64 >= nside {
        return Err(HealpixError::InvalidArgumentShape(format!(
            "tile coordinates {:?} do not exist at nside={}",
            xyf, nside
        )));
    }
    Ok(xyf_to_index(xyf, nside, order))
}

/// Longitude/latitude in radians of a point inside a pixel
///
/// `dx` and `dy` locate the point inside the pixel along the tile axes;
/// `(0.5, 0.5)` is the centre, `(0, 0)` the southern corner and `(1, 1)`
/// the northern corner. Longitude is returned in `[0, 2π)`.
///
/// # Errors
///
/// Fails on an unusable `nside`, an index outside `[0, 12 * nside^2)`, or
/// offsets outside `[0, 1]`.
pub fn index_to_lonlat(
    index: u64,
    nside: u64,
    dx: f64,
    dy: f64,
    order: Order,
) -> Result<(f64, f64)> {
    validate_nside_for(nside, order)?;
    validate_index(index, nside)?;
    validate_offsets(dx, dy)?;

    let xyf = index_to_xyf(index, nside, order);
    Ok(xyf_offset_to_lonlat(xyf, nside, dx, dy))
}

pub(crate) fn xyf_offset_to_lonlat(xyf: PixelXY, nside: u64, dx: f64, dy: f64) -> (f64, f64) {
    let n = nside as f64;
    let x = (xyf.ix as f64 + dx) / n;
    let y = (xyf.iy as f64 + dy) / n;
    let (lon, lat) = face::tile_to_lonlat(xyf.face, x, y);
    (normalize_longitude(lon), lat)
}

/// Centre of a pixel
pub fn pixel_center(index: u64, nside: u64, order: Order) -> Result<(f64, f64)> {
    index_to_lonlat(index, nside, 0.5, 0.5, order)
}

/// Index of the pixel containing `(lon, lat)`
///
/// Longitude may take any finite value and is folded into `[0, 2π)`.
/// Points exactly on a pixel boundary resolve to one deterministic pixel.
pub fn lonlat_to_index(lon: f64, lat: f64, nside: u64, order: Order) -> Result<u64> {
    lonlat_to_index_with_offsets(lon, lat, nside, order).map(|(index, _, _)| index)
}

/// Index of the pixel containing `(lon, lat)` and the point's offsets inside it
///
/// Feeding the result back into [`index_to_lonlat`] reproduces the input
/// point to floating-point accuracy. The returned offsets are clamped into
/// `[0, 1]` only to absorb rounding error on pixel edges; inputs are never
/// clamped.
pub fn lonlat_to_index_with_offsets(
    lon: f64,
    lat: f64,
    nside: u64,
    order: Order,
) -> Result<(u64, f64, f64)> {
    validate_nside_for(nside, order)?;
    let lon = validate_lonlat(lon, lat)?;

    let (xyf, dx, dy) = face::lonlat_to_pixel(lon, lat, nside);
    let index = xyf_to_index(xyf, nside, order);
    Ok((index, dx.clamp(0.0, 1.0), dy.clamp(0.0, 1.0)))
}

/// Points along the boundary of a pixel, counter-clockwise from the north corner
///
/// Returns `4 * step` `(lon, lat)` pairs: `step` points along each of the
/// four edges, starting at the northern corner and passing through the
/// western, southern and eastern corners in turn.
pub fn boundaries_lonlat(
    index: u64,
    step: usize,
    nside: u64,
    order: Order,
) -> Result<Vec<(f64, f64)>> {
    if step == 0 {
        return Err(HealpixError::InvalidArgumentShape(
            "boundary step must be at least 1".to_string(),
        ));
    }
    let xyf = pixel_xy(index, nside, order)?;

    let mut points = Vec::with_capacity(4 * step);
    for edge in 0..4 {
        for i in 0..step {
            let t = i as f64 / step as f64;
            let (dx, dy) = match edge {
                0 => (1.0 - t, 1.0),
                1 => (0.0, 1.0 - t),
                2 => (t, 0.0),
                _ => (1.0, t),
            };
            points.push(xyf_offset_to_lonlat(xyf, nside, dx, dy));
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::lonlat_distance;
    use crate::geometry::max_pixel_radius;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_order_parsing() {
        assert_eq!("ring".parse::<Order>().unwrap(), Order::Ring);
        assert_eq!("NESTED".parse::<Order>().unwrap(), Order::Nested);
        assert_eq!("Nested".parse::<Order>().unwrap(), Order::Nested);
        assert!(matches!(
            "galactic".parse::<Order>(),
            Err(HealpixError::InvalidOrder(_))
        ));
        assert_eq!(Order::default(), Order::Ring);
        assert_eq!(Order::Nested.to_string(), "nested");
    }

    #[test]
    fn test_reference_pixel() {
        // Origin falls in the equatorial tile 4
        assert_eq!(lonlat_to_index(0.0, 0.0, 4, Order::Ring).unwrap(), 88);
        assert_eq!(lonlat_to_index(0.0, 0.0, 4, Order::Nested).unwrap(), 70);
        assert_eq!(lonlat_to_index(0.0, 0.0, 1, Order::Ring).unwrap(), 4);
    }

    #[test]
    fn test_centres_round_trip() {
        for order in [Order::Ring, Order::Nested] {
            for nside in [1u64, 2, 4, 16] {
                for index in 0..pixel_count(nside).unwrap() {
                    let (lon, lat) = pixel_center(index, nside, order).unwrap();
                    assert!((0.0..2.0 * PI).contains(&lon));
                    assert_eq!(lonlat_to_index(lon, lat, nside, order).unwrap(), index);
                }
            }
        }
    }

    #[test]
    fn test_ring_centres_non_power_of_two() {
        let nside = 3;
        for index in 0..pixel_count(nside).unwrap() {
            let (lon, lat) = pixel_center(index, nside, Order::Ring).unwrap();
            let (ring, k) = ring::locate(index, nside);
            let info = ring::RingInfo::new(ring, nside);
            assert_abs_diff_eq!(lat, info.lat(), epsilon = 1e-13);
            assert_abs_diff_eq!(lon, info.pixel_lon(k), epsilon = 1e-13);
        }
    }

    #[test]
    fn test_offsets_round_trip() {
        let nside = 8;
        for order in [Order::Ring, Order::Nested] {
            for index in [0u64, 100, 383, 767] {
                for &(dx, dy) in &[(0.1, 0.2), (0.5, 0.9), (0.75, 0.25)] {
                    let (lon, lat) = index_to_lonlat(index, nside, dx, dy, order).unwrap();
                    let (back, bdx, bdy) =
                        lonlat_to_index_with_offsets(lon, lat, nside, order).unwrap();
                    assert_eq!(back, index);
                    assert_abs_diff_eq!(bdx, dx, epsilon = 1e-9);
                    assert_abs_diff_eq!(bdy, dy, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_longitude_is_folded() {
        let a = lonlat_to_index(-0.1, 0.3, 8, Order::Ring).unwrap();
        let b = lonlat_to_index(2.0 * PI - 0.1, 0.3, 8, Order::Ring).unwrap();
        let c = lonlat_to_index(4.0 * PI - 0.1, 0.3, 8, Order::Ring).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            index_to_lonlat(48, 2, 0.5, 0.5, Order::Ring),
            Err(HealpixError::InvalidIndex { index: 48, nside: 2, npix: 48 })
        ));
        assert!(matches!(
            index_to_lonlat(0, 2, 1.5, 0.5, Order::Ring),
            Err(HealpixError::InvalidOffset { .. })
        ));
        assert!(index_to_lonlat(0, 2, f64::NAN, 0.5, Order::Ring).is_err());
        assert!(matches!(
            index_to_lonlat(0, 3, 0.5, 0.5, Order::Nested),
            Err(HealpixError::InvalidResolution { nside: 3, .. })
        ));
        assert!(index_to_lonlat(0, 3, 0.5, 0.5, Order::Ring).is_ok());
        assert!(matches!(
            lonlat_to_index(0.0, 2.0, 4, Order::Ring),
            Err(HealpixError::InvalidCoordinate { .. })
        ));
        assert!(lonlat_to_index(f64::INFINITY, 0.0, 4, Order::Ring).is_err());
        assert!(lonlat_to_index(0.0, 0.0, 0, Order::Ring).is_err());
    }

    #[test]
    fn test_poles() {
        let npix = pixel_count(4).unwrap();
        let north = lonlat_to_index(1.0, PI / 2.0, 4, Order::Ring).unwrap();
        assert!(north < 4);
        let south = lonlat_to_index(1.0, -PI / 2.0, 4, Order::Ring).unwrap();
        assert!(south >= npix - 4);
    }

    #[test]
    fn test_corner_offsets() {
        // Northern corner of a north-cap pixel next to the pole is the pole
        let (_, lat) = index_to_lonlat(0, 4, 1.0, 1.0, Order::Ring).unwrap();
        assert_abs_diff_eq!(lat, PI / 2.0, epsilon = 1e-14);
    }

    #[test]
    fn test_pixel_xy_round_trip() {
        let xyf = pixel_xy(70, 4, Order::Nested).unwrap();
        assert_eq!(xyf, PixelXY::new(4, 2, 1));
        assert_eq!(pixel_index(xyf, 4, Order::Ring).unwrap(), 88);
        assert!(pixel_index(PixelXY::new(12, 0, 0), 4, Order::Ring).is_err());
        assert!(pixel_index(PixelXY::new(0, 4, 0), 4, Order::Ring).is_err());
    }

    #[test]
    fn test_boundaries() {
        let nside = 4;
        let index = 88;
        let (clon, clat) = pixel_center(index, nside, Order::Ring).unwrap();
        let points = boundaries_lonlat(index, 3, nside, Order::Ring).unwrap();
        assert_eq!(points.len(), 12);

        let radius = max_pixel_radius(nside).unwrap();
        for &(lon, lat) in &points {
            let d = lonlat_distance(lon, lat, clon, clat);
            assert!(d > 0.0 && d <= radius + 1e-12);
        }

        // First point is the northern corner
        let north = index_to_lonlat(index, nside, 1.0, 1.0, Order::Ring).unwrap();
        assert_abs_diff_eq!(points[0].0, north.0, epsilon = 1e-14);
        assert_abs_diff_eq!(points[0].1, north.1, epsilon = 1e-14);

        assert!(matches!(
            boundaries_lonlat(index, 0, nside, Order::Ring),
            Err(HealpixError::InvalidArgumentShape(_))
        ));
    }
}
