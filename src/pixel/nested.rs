//! Nested (hierarchical) pixel indices
//!
//! Within a base tile the nested index is the Morton code of `(ix, iy)`:
//! bits of `ix` land on the even positions and bits of `iy` on the odd
//! ones. The interleaving goes through byte-wide lookup tables.

use lazy_static::lazy_static;

use super::PixelXY;

lazy_static! {
    /// Bit `k` of the table index moved to bit `2k`
    static ref SPREAD: [u16; 256] = {
        let mut table = [0u16; 256];
        for (value, entry) in table.iter_mut().enumerate() {
            for bit in 0..8 {
                if value & (1 << bit) != 0 {
                    *entry |= 1 << (2 * bit);
                }
            }
        }
        table
    };

    /// Even bits of the table index packed into the low nibble
    static ref COMPRESS: [u8; 256] = {
        let mut table = [0u8; 256];
        for (value, entry) in table.iter_mut().enumerate() {
            for bit in 0..4 {
                if value & (1 << (2 * bit)) != 0 {
                    *entry |= 1 << bit;
                }
            }
        }
        table
    };
}

/// Interleave `v` with zeros: bit `k` moves to bit `2k`
pub(crate) fn spread_bits(v: u32) -> u64 {
    let mut out = 0u64;
    for byte in 0..4 {
        let chunk = ((v >> (8 * byte)) & 0xff) as usize;
        out |= (SPREAD[chunk] as u64) << (16 * byte);
    }
    out
}

/// Inverse of [`spread_bits`]: gather the even bits of `v`
pub(crate) fn compress_bits(v: u64) -> u32 {
    let mut out = 0u32;
    for byte in 0..8 {
        let chunk = ((v >> (8 * byte)) & 0xff) as usize;
        out |= (COMPRESS[chunk] as u32) << (4 * byte);
    }
    out
}

pub(crate) fn nested_to_xyf(index: u64, nside: u64) -> PixelXY {
    let per_tile = nside * nside;
    let face = index / per_tile;
    let within = index & (per_tile - 1);
    PixelXY::new(face as u8, compress_bits(within), compress_bits(within >> 1))
}

pub(crate) fn xyf_to_nested(xyf: PixelXY, nside: u64) -> u64 {
    let per_tile = nside * nside;
    xyf.face as u64 * per_tile + (spread_bits(xyf.ix) | (spread_bits(xyf.iy) << 1))
}
