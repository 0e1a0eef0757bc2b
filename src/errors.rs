//! Error types for the healpix crate
//!
//! Every operation validates its own inputs and reports the first violated
//! precondition through one of these variants. Nothing is retried or clamped.

use thiserror::Error;

/// Main error type for pixelization operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HealpixError {
    /// The resolution parameter cannot be used for the requested operation
    #[error("Invalid resolution nside={nside}: {reason}")]
    InvalidResolution {
        /// The rejected resolution
        nside: u64,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A map length that is not `12 * nside^2` for any valid nside
    #[error("Invalid pixel count {npix}: not of the form 12 * nside^2")]
    InvalidPixelCount {
        /// The rejected pixel count
        npix: u64,
    },

    /// Pixel index outside `[0, npix)`
    #[error("Pixel index {index} is out of range for nside={nside} (npix={npix})")]
    InvalidIndex {
        /// The rejected index
        index: u64,
        /// Resolution the index was checked against
        nside: u64,
        /// Number of pixels at that resolution
        npix: u64,
    },

    /// Longitude/latitude pair that does not name a point on the sphere
    #[error("Invalid coordinate (lon={lon}, lat={lat}): {reason}")]
    InvalidCoordinate {
        /// Longitude in radians
        lon: f64,
        /// Latitude in radians
        lat: f64,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Sub-pixel offset outside the unit square
    #[error("Sub-pixel offset ({dx}, {dy}) must lie within [0, 1]")]
    InvalidOffset {
        /// Offset along the tile x axis
        dx: f64,
        /// Offset along the tile y axis
        dy: f64,
    },

    /// Value array does not hold exactly one value per pixel
    #[error("Expected {expected} values (one per pixel), got {actual}")]
    ValueLengthMismatch {
        /// Number of pixels at the requested resolution
        expected: u64,
        /// Length of the supplied array
        actual: usize,
    },

    /// Inputs whose shapes cannot be combined by the requested operation
    #[error("Invalid argument shape: {0}")]
    InvalidArgumentShape(String),

    /// Cone search radius outside `[0, π]`
    #[error("Cone search radius {radius} must lie within [0, π]")]
    InvalidRadius {
        /// The rejected radius in radians
        radius: f64,
    },

    /// Unknown pixel ordering name
    #[error("Unknown pixel ordering '{0}' (expected 'ring' or 'nested')")]
    InvalidOrder(String),
}

/// Result type for healpix operations
pub type Result<T> = std::result::Result<T, HealpixError>;
