//! Constants module for sphere pixelization calculations

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Quarter circle
pub const HALF_PI: f64 = PI / 2.0;
/// Solid angle of the whole sphere in steradians
pub const FOUR_PI: f64 = 4.0 * PI;

// Sphere partition
/// |z| = |sin(lat)| at the boundary between the polar caps and the equatorial belt
pub const TWO_THIRDS: f64 = 2.0 / 3.0;
/// Number of base tiles
pub const N_BASE_TILES: u64 = 12;

// Resolution limits
/// Deepest supported hierarchy level
///
/// At this depth `12 * nside^2` is just below 2^62, which keeps every
/// intermediate of the ring arithmetic inside an `i64`.
pub const MAX_LEVEL: u32 = 29;
/// Largest supported `nside` (2^MAX_LEVEL)
pub const MAX_NSIDE: u64 = 1 << MAX_LEVEL;
