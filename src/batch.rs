//! Element-wise array forms of the scalar operations
//!
//! Each function maps the matching scalar operation over `ndarray` inputs
//! of equal length and stops at the first element that fails. Elements are
//! independent of each other.

use ndarray::{Array1, ArrayView1, ArrayViewD, Zip};

use crate::errors::{HealpixError, Result};
use crate::geometry::pixel_count;
use crate::interpolation::bilinear_weights;
use crate::pixel::{
    index_to_lonlat, lonlat_to_index, lonlat_to_index_with_offsets, nested_to_ring,
    ring_to_nested, Order,
};
use crate::search::cone_search;

fn check_lengths(lengths: &[(&str, usize)]) -> Result<()> {
    let (first_name, first_len) = lengths[0];
    for &(name, len) in &lengths[1..] {
        if len != first_len {
            return Err(HealpixError::InvalidArgumentShape(format!(
                "{} has length {} but {} has length {}",
                name, len, first_name, first_len
            )));
        }
    }
    Ok(())
}

/// [`index_to_lonlat`] over arrays of indices and offsets
pub fn index_to_lonlat_array(
    indices: ArrayView1<u64>,
    dx: ArrayView1<f64>,
    dy: ArrayView1<f64>,
    nside: u64,
    order: Order,
) -> Result<(Array1<f64>, Array1<f64>)> {
    check_lengths(&[("indices", indices.len()), ("dx", dx.len()), ("dy", dy.len())])?;

    let mut lon = Array1::zeros(indices.len());
    let mut lat = Array1::zeros(indices.len());
    let mut failure = None;
    Zip::from(&mut lon)
        .and(&mut lat)
        .and(&indices)
        .and(&dx)
        .and(&dy)
        .for_each(|lon, lat, &index, &dx, &dy| {
            if failure.is_some() {
                return;
            }
            match index_to_lonlat(index, nside, dx, dy, order) {
                Ok((a, b)) => {
                    *lon = a;
                    *lat = b;
                }
                Err(e) => failure = Some(e),
            }
        });

    match failure {
        Some(e) => Err(e),
        None => Ok((lon, lat)),
    }
}

/// [`lonlat_to_index`] over arrays of coordinates
pub fn lonlat_to_index_array(
    lon: ArrayView1<f64>,
    lat: ArrayView1<f64>,
    nside: u64,
    order: Order,
) -> Result<Array1<u64>> {
    check_lengths(&[("lon", lon.len()), ("lat", lat.len())])?;
    lon.iter()
        .zip(lat.iter())
        .map(|(&lon, &lat)| lonlat_to_index(lon, lat, nside, order))
        .collect::<Result<Vec<_>>>()
        .map(Array1::from)
}

/// [`lonlat_to_index_with_offsets`] over arrays of coordinates
pub fn lonlat_to_index_with_offsets_array(
    lon: ArrayView1<f64>,
    lat: ArrayView1<f64>,
    nside: u64,
    order: Order,
) -> Result<(Array1<u64>, Array1<f64>, Array1<f64>)> {
    check_lengths(&[("lon", lon.len()), ("lat", lat.len())])?;

    let mut indices = Array1::zeros(lon.len());
    let mut dx = Array1::zeros(lon.len());
    let mut dy = Array1::zeros(lon.len());
    let mut failure = None;
    Zip::from(&mut indices)
        .and(&mut dx)
        .and(&mut dy)
        .and(&lon)
        .and(&lat)
        .for_each(|index, dx, dy, &lon, &lat| {
            if failure.is_some() {
                return;
            }
            match lonlat_to_index_with_offsets(lon, lat, nside, order) {
                Ok((i, x, y)) => {
                    *index = i;
                    *dx = x;
                    *dy = y;
                }
                Err(e) => failure = Some(e),
            }
        });

    match failure {
        Some(e) => Err(e),
        None => Ok((indices, dx, dy)),
    }
}

/// [`nested_to_ring`] over an array of indices
pub fn nested_to_ring_array(indices: ArrayView1<u64>, nside: u64) -> Result<Array1<u64>> {
    indices
        .iter()
        .map(|&index| nested_to_ring(index, nside))
        .collect::<Result<Vec<_>>>()
        .map(Array1::from)
}

/// [`ring_to_nested`] over an array of indices
pub fn ring_to_nested_array(indices: ArrayView1<u64>, nside: u64) -> Result<Array1<u64>> {
    indices
        .iter()
        .map(|&index| ring_to_nested(index, nside))
        .collect::<Result<Vec<_>>>()
        .map(Array1::from)
}

/// Bilinear interpolation of one map at many points
pub fn interpolate_bilinear_array(
    lon: ArrayView1<f64>,
    lat: ArrayView1<f64>,
    values: ArrayView1<f64>,
    nside: u64,
    order: Order,
) -> Result<Array1<f64>> {
    check_lengths(&[("lon", lon.len()), ("lat", lat.len())])?;
    let npix = pixel_count(nside)?;
    if values.len() as u64 != npix {
        return Err(HealpixError::ValueLengthMismatch {
            expected: npix,
            actual: values.len(),
        });
    }

    lon.iter()
        .zip(lat.iter())
        .map(|(&lon, &lat)| {
            let weights = bilinear_weights(lon, lat, nside, order)?;
            Ok(weights
                .iter()
                .map(|&(index, w)| values[index as usize] * w)
                .sum::<f64>())
        })
        .collect::<Result<Vec<_>>>()
        .map(Array1::from)
}

/// [`cone_search`] for array-typed callers
///
/// Every input must be 0-dimensional: the number of pixels found differs
/// from one disc to the next, so several discs cannot share one output.
pub fn cone_search_view(
    lon: ArrayViewD<f64>,
    lat: ArrayViewD<f64>,
    radius: ArrayViewD<f64>,
    nside: u64,
    order: Order,
    approximate: bool,
) -> Result<Vec<u64>> {
    let scalar = |name: &str, view: &ArrayViewD<f64>| -> Result<f64> {
        match (view.ndim(), view.iter().next()) {
            (0, Some(&v)) => Ok(v),
            _ => Err(HealpixError::InvalidArgumentShape(format!(
                "cone search needs a scalar {}, got shape {:?}",
                name,
                view.shape()
            ))),
        }
    };
    let lon = scalar("lon", &lon)?;
    let lat = scalar("lat", &lat)?;
    let radius = scalar("radius", &radius)?;
    cone_search(lon, lat, radius, nside, order, approximate)
}
