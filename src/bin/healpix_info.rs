//! HEALPix Information Tool
//!
//! Prints the geometry of a resolution and, optionally, what the library
//! computes for a pixel index, a sky position or a cone around it.
//!
//! Usage:
//!   cargo run --bin healpix_info -- --nside 64 --order nested --lon 83.6 --lat -5.4 --radius 1.5

use std::time::Instant;

use clap::{ArgAction, Parser};
use healpix::constants::{DEG2RAD, RAD2DEG};
use healpix::geometry::{level_to_nside, max_pixel_radius, pixel_area, pixel_count, pixel_resolution};
use healpix::pixel::{
    boundaries_lonlat, lonlat_to_index_with_offsets, neighbours, nested_to_ring, pixel_center,
    pixel_xy, ring_to_nested, Order,
};
use healpix::search::cone_search;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// HEALPix Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Displays HEALPix pixel geometry, index conversions and cone searches",
    long_about = None
)]
struct Args {
    /// Resolution parameter
    #[arg(short, long, default_value_t = 16)]
    nside: u64,

    /// Hierarchy level; overrides --nside with 2^level
    #[arg(short, long)]
    level: Option<u32>,

    /// Pixel ordering (ring or nested)
    #[arg(short, long, default_value_t = Order::Ring)]
    order: Order,

    /// Pixel index to describe
    #[arg(short, long)]
    index: Option<u64>,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Cone search radius in degrees (needs --lon and --lat)
    #[arg(short, long)]
    radius: Option<f64>,

    /// Skip the per-pixel distance test in the cone search
    #[arg(short, long, action = ArgAction::SetTrue)]
    approximate: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn format_lonlat(lon: f64, lat: f64) -> String {
    format!("({:.6}°, {:+.6}°)", lon * RAD2DEG, lat * RAD2DEG)
}

fn display_geometry(nside: u64) -> Result<()> {
    print_section_header("Resolution");
    let area = pixel_area(nside)?;
    println!("nside: {}", nside);
    println!("Pixels: {}", pixel_count(nside)?);
    println!(
        "Pixel area: {:.6e} sr ({:.6} deg²)",
        area,
        area * RAD2DEG * RAD2DEG
    );
    println!(
        "Resolution: {:.4} arcmin",
        pixel_resolution(nside)? * RAD2DEG * 60.0
    );
    println!(
        "Max pixel radius: {:.4} arcmin",
        max_pixel_radius(nside)? * RAD2DEG * 60.0
    );
    Ok(())
}

fn display_index(index: u64, nside: u64, order: Order) -> Result<()> {
    print_section_header(&format!("Pixel {} ({})", index, order));
    let xyf = pixel_xy(index, nside, order)?;
    println!(
        "Base tile: {}, column: {}, row: {}",
        xyf.face, xyf.ix, xyf.iy
    );

    let (lon, lat) = pixel_center(index, nside, order)?;
    println!("Centre: {}", format_lonlat(lon, lat));

    let corners = boundaries_lonlat(index, 1, nside, order)?;
    for (name, &(lon, lat)) in ["North", "West", "South", "East"].iter().zip(corners.iter()) {
        println!("{} corner: {}", name, format_lonlat(lon, lat));
    }

    if nside.is_power_of_two() {
        match order {
            Order::Ring => println!("Nested index: {}", ring_to_nested(index, nside)?),
            Order::Nested => println!("Ring index: {}", nested_to_ring(index, nside)?),
        }
    }

    let nbs = neighbours(index, nside, order)?;
    println!("Neighbours ({}): {:?}", nbs.len(), nbs);
    Ok(())
}

fn display_position(lon: f64, lat: f64, nside: u64, order: Order) -> Result<()> {
    print_section_header(&format!("Position {}", format_lonlat(lon, lat)));
    let (index, dx, dy) = lonlat_to_index_with_offsets(lon, lat, nside, order)?;
    println!("Pixel: {} ({})", index, order);
    println!("Offset in pixel: dx={:.6}, dy={:.6}", dx, dy);
    Ok(())
}

fn display_cone(
    lon: f64,
    lat: f64,
    radius: f64,
    nside: u64,
    order: Order,
    approximate: bool,
) -> Result<()> {
    let mode = if approximate { "approximate" } else { "exact" };
    print_section_header(&format!(
        "Cone search, radius {:.4}° ({})",
        radius * RAD2DEG,
        mode
    ));

    let start_time = Instant::now();
    let pixels = cone_search(lon, lat, radius, nside, order, approximate)?;
    let elapsed = start_time.elapsed();

    let area = pixels.len() as f64 * pixel_area(nside)?;
    let disc_area = 2.0 * std::f64::consts::PI * (1.0 - radius.cos());
    println!("Pixels found: {}", pixels.len());
    println!(
        "Covered area: {:.6} deg² (disc: {:.6} deg²)",
        area * RAD2DEG * RAD2DEG,
        disc_area * RAD2DEG * RAD2DEG
    );
    let shown: Vec<String> = pixels.iter().take(16).map(|p| p.to_string()).collect();
    let more = if pixels.len() > shown.len() { ", ..." } else { "" };
    println!("First pixels: [{}{}]", shown.join(", "), more);
    println!("Search time: {:.2?}", elapsed);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let nside = match args.level {
        Some(level) => level_to_nside(level)?,
        None => args.nside,
    };

    println!("HEALPix nside={} order={}", nside, args.order);
    println!("-------------------------------------------------------");
    display_geometry(nside)?;

    if let Some(index) = args.index {
        display_index(index, nside, args.order)?;
    }

    match (args.lon, args.lat) {
        (Some(lon_deg), Some(lat_deg)) => {
            let lon = lon_deg * DEG2RAD;
            let lat = lat_deg * DEG2RAD;
            display_position(lon, lat, nside, args.order)?;
            if let Some(radius_deg) = args.radius {
                display_cone(
                    lon,
                    lat,
                    radius_deg * DEG2RAD,
                    nside,
                    args.order,
                    args.approximate,
                )?;
            }
        }
        (None, None) => {
            if args.radius.is_some() {
                return Err("--radius needs --lon and --lat".into());
            }
        }
        _ => return Err("--lon and --lat must be given together".into()),
    }

    Ok(())
}
