//! HEALPix: hierarchical equal-area iso-latitude pixelization of the sphere
//!
//! The sphere is split into 12 base tiles, each subdivided into
//! `nside * nside` pixels of identical area. Pixels are addressed either in
//! ring order (iso-latitude rings from north to south) or in nested order
//! (quad-tree inside each base tile).
//!
//! All angles are `f64` radians and all pixel indices are `u64`. Every
//! operation is a pure function of its arguments.
//!
//! ```rust
//! use healpix::{cone_search, index_to_lonlat, lonlat_to_index, Order};
//!
//! let index = lonlat_to_index(0.0, 0.0, 4, Order::Ring).unwrap();
//! assert_eq!(index, 88);
//!
//! let (lon, lat) = index_to_lonlat(index, 4, 0.5, 0.5, Order::Ring).unwrap();
//! let disc = cone_search(lon, lat, 0.2, 4, Order::Ring, false).unwrap();
//! assert!(disc.contains(&index));
//! ```

pub mod batch;
pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod geometry;
pub mod interpolation;
pub mod pixel;
pub mod search;

// Re-export commonly used items
pub use errors::{HealpixError, Result};
pub use geometry::{max_pixel_radius, pixel_area, pixel_count, pixel_resolution};
pub use interpolation::{bilinear_weights, interpolate_bilinear};
pub use pixel::{
    index_to_lonlat, lonlat_to_index, lonlat_to_index_with_offsets, nested_to_ring,
    neighbours, ring_to_nested, Order, PixelXY,
};
pub use search::cone_search;
