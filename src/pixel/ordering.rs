//! Conversion between ring and nested indices

use super::{nested, ring, validate_index};
use crate::errors::Result;
use crate::geometry::validate_nside_for;
use crate::pixel::Order;

/// Ring index of the pixel with the given nested index
///
/// # Examples
///
/// ```rust
/// use healpix::pixel::nested_to_ring;
///
/// assert_eq!(nested_to_ring(0, 2).unwrap(), 13);
/// assert_eq!(nested_to_ring(5, 1).unwrap(), 5);
/// ```
pub fn nested_to_ring(index: u64, nside: u64) -> Result<u64> {
    validate_nside_for(nside, Order::Nested)?;
    validate_index(index, nside)?;
    Ok(ring::xyf_to_ring(nested::nested_to_xyf(index, nside), nside))
}

/// Nested index of the pixel with the given ring index
pub fn ring_to_nested(index: u64, nside: u64) -> Result<u64> {
    validate_nside_for(nside, Order::Nested)?;
    validate_index(index, nside)?;
    Ok(nested::xyf_to_nested(ring::ring_to_xyf(index, nside), nside))
}
