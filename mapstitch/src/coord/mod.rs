//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator slippy-map tile coordinates, plus the normalized tile
//! range computation the downloader and assembler operate on.

mod types;

pub use types::{
    BoundingBox, CoordError, TileIndex, TileRange, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON,
    MIN_ZOOM, TILE_SIZE,
};

use std::f64::consts::PI;

/// Converts geographic coordinates to a tile index.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 19)
///
/// # Returns
///
/// A `Result` containing the tile index or an error if inputs are invalid.
#[inline]
pub fn to_tile_index(lat: f64, lon: f64, zoom: u8) -> Result<TileIndex, CoordError> {
    // Validate inputs
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    // Number of tiles per axis at this zoom level
    let n = 2.0_f64.powi(zoom as i32);
    let max_index = (1u32 << zoom) - 1;

    // Longitude maps linearly to the column axis
    let x = (((lon + 180.0) / 360.0 * n) as u32).min(max_index);

    // Latitude maps through the Web Mercator projection to the row axis.
    // The min() clamp keeps the boundary values lon=180 and lat=MIN_LAT
    // on the grid instead of one past it.
    let lat_rad = lat * PI / 180.0;
    let y = (((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as u32).min(max_index);

    Ok(TileIndex { x, y, zoom })
}

/// Converts a tile index back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(index: &TileIndex) -> (f64, f64) {
    let n = 2.0_f64.powi(index.zoom as i32);

    let lon = index.x as f64 / n * 360.0 - 180.0;

    let y = index.y as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}

/// Computes the normalized tile range covering a bounding box.
///
/// Both corners are converted independently and per-axis min/max applied,
/// so the corner order in the configuration does not matter.
pub fn range_for_bounding_box(bbox: &BoundingBox, zoom: u8) -> Result<TileRange, CoordError> {
    let a = to_tile_index(bbox.lat1, bbox.lon1, zoom)?;
    let b = to_tile_index(bbox.lat2, bbox.lon2, zoom)?;
    Ok(TileRange::from_corners(a, b))
}
