//! Adjacent pixels, including across base-tile edges

use super::{index_to_xyf, validate_index, xyf_to_index, Order, PixelXY};
use crate::errors::Result;
use crate::geometry::validate_nside_for;

// Directions in the order SW, W, NW, N, NE, E, SE, S
const X_OFFSET: [i64; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];
const Y_OFFSET: [i64; 8] = [0, 1, 1, 1, 0, -1, -1, -1];

// Tile reached when leaving a tile through one of its edges or corners,
// indexed by `4 + 3 * (y overflow) + (x overflow)`. -1: no tile there,
// the corner is shared by three tiles only.
const FACE_ARRAY: [[i8; 12]; 9] = [
    [8, 9, 10, 11, -1, -1, -1, -1, 10, 11, 8, 9], // S
    [5, 6, 7, 4, 8, 9, 10, 11, 9, 10, 11, 8],     // SE
    [-1, -1, -1, -1, 5, 6, 7, 4, -1, -1, -1, -1], // E
    [4, 5, 6, 7, 11, 8, 9, 10, 11, 8, 9, 10],     // SW
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],       // centre
    [1, 2, 3, 0, 0, 1, 2, 3, 5, 6, 7, 4],         // NE
    [-1, -1, -1, -1, 7, 4, 5, 6, -1, -1, -1, -1], // W
    [3, 0, 1, 2, 3, 0, 1, 2, 4, 5, 6, 7],         // NW
    [2, 3, 0, 1, -1, -1, -1, -1, 0, 1, 2, 3],     // N
];

// Axis changes when entering the new tile: 1 flips x, 2 flips y,
// 4 swaps x and y
const SWAP_ARRAY: [[u8; 12]; 9] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3], // S
    [0, 0, 0, 0, 0, 0, 0, 0, 6, 6, 6, 6], // SE
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // E
    [0, 0, 0, 0, 0, 0, 0, 0, 5, 5, 5, 5], // SW
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // centre
    [5, 5, 5, 5, 0, 0, 0, 0, 0, 0, 0, 0], // NE
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // W
    [6, 6, 6, 6, 0, 0, 0, 0, 0, 0, 0, 0], // NW
    [3, 3, 3, 3, 0, 0, 0, 0, 0, 0, 0, 0], // N
];

/// Pixels sharing an edge or a corner with `index`
///
/// Returned in direction order south-west, west, north-west, north,
/// north-east, east, south-east, south. Pixels at the corners where only
/// three base tiles meet have seven neighbours; at `nside = 1` several
/// directions lead to the same tile and duplicates are dropped.
pub fn neighbours(index: u64, nside: u64, order: Order) -> Result<Vec<u64>> {
    validate_nside_for(nside, order)?;
    validate_index(index, nside)?;

    let n = nside as i64;
    let xyf = index_to_xyf(index, nside, order);
    let face = xyf.face as usize;

    let mut result = Vec::with_capacity(8);
    for dir in 0..8 {
        let mut x = xyf.ix as i64 + X_OFFSET[dir];
        let mut y = xyf.iy as i64 + Y_OFFSET[dir];

        let mut nbnum = 4;
        if x < 0 {
            x += n;
            nbnum -= 1;
        } else if x >= n {
            x -= n;
            nbnum += 1;
        }
        if y < 0 {
            y += n;
            nbnum -= 3;
        } else if y >= n {
            y -= n;
            nbnum += 3;
        }

        let target = FACE_ARRAY[nbnum][face];
        if target < 0 {
            continue;
        }

        let swap = SWAP_ARRAY[nbnum][face];
        if swap & 1 != 0 {
            x = n - 1 - x;
        }
        if swap & 2 != 0 {
            y = n - 1 - y;
        }
        if swap & 4 != 0 {
            std::mem::swap(&mut x, &mut y);
        }

        let neighbour = xyf_to_index(PixelXY::new(target as u8, x as u32, y as u32), nside, order);
        if neighbour != index && !result.contains(&neighbour) {
            result.push(neighbour);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::lonlat_distance;
    use crate::geometry::{max_pixel_radius, pixel_count};
    use crate::pixel::pixel_center;

    #[test]
    fn test_symmetry() {
        for order in [Order::Ring, Order::Nested] {
            for nside in [1u64, 2, 4, 8] {
                for index in 0..pixel_count(nside).unwrap() {
                    for nb in neighbours(index, nside, order).unwrap() {
                        let back = neighbours(nb, nside, order).unwrap();
                        assert!(
                            back.contains(&index),
                            "nside={} order={} {} -> {}",
                            nside,
                            order,
                            index,
                            nb
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_neighbour_counts() {
        for nside in [2u64, 4, 16] {
            let mut seven = 0;
            for index in 0..pixel_count(nside).unwrap() {
                let count = neighbours(index, nside, Order::Nested).unwrap().len();
                assert!(count == 7 || count == 8);
                if count == 7 {
                    seven += 1;
                }
            }
            // Three pixels at each of the 8 corners where three tiles meet
            assert_eq!(seven, 24, "nside={}", nside);
        }
    }

    #[test]
    fn test_neighbours_are_close() {
        let nside = 8;
        let limit = 4.0 * max_pixel_radius(nside).unwrap();
        for index in 0..pixel_count(nside).unwrap() {
            let (lon, lat) = pixel_center(index, nside, Order::Ring).unwrap();
            for nb in neighbours(index, nside, Order::Ring).unwrap() {
                let (nlon, nlat) = pixel_center(nb, nside, Order::Ring).unwrap();
                assert!(lonlat_distance(lon, lat, nlon, nlat) < limit);
            }
        }
    }

    #[test]
    fn test_interior_nested() {
        // Pixel 3 of tile 0 at nside 4 is (1, 1): all neighbours in tile 0
        let nbs = neighbours(3, 4, Order::Nested).unwrap();
        assert_eq!(nbs, vec![2, 8, 9, 12, 6, 4, 1, 0]);
    }
}
