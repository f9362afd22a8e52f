//! Coordinate types shared across the pipeline.

use thiserror::Error;

/// Minimum latitude representable in Web Mercator (degrees).
pub const MIN_LAT: f64 = -85.05112878;

/// Maximum latitude representable in Web Mercator (degrees).
pub const MAX_LAT: f64 = 85.05112878;

/// Minimum longitude (degrees).
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude (degrees).
pub const MAX_LON: f64 = 180.0;

/// Minimum supported zoom level.
pub const MIN_ZOOM: u8 = 0;

/// Maximum supported zoom level.
pub const MAX_ZOOM: u8 = 19;

/// Edge length of a slippy-map tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Errors from coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude outside the Web Mercator range.
    #[error("latitude {0} outside Web Mercator range (-85.05112878 to 85.05112878)")]
    InvalidLatitude(f64),

    /// Longitude outside the valid range.
    #[error("longitude {0} outside valid range (-180 to 180)")]
    InvalidLongitude(f64),

    /// Zoom level beyond the supported maximum.
    #[error("zoom level {0} exceeds maximum of 19")]
    InvalidZoom(u8),
}

/// Integer grid coordinates identifying one slippy-map tile.
///
/// `x` counts columns west to east, `y` counts rows north to south,
/// both in `[0, 2^zoom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    /// Column (west to east).
    pub x: u32,

    /// Row (north to south).
    pub y: u32,

    /// Zoom level.
    pub zoom: u8,
}

impl TileIndex {
    /// Creates a new tile index.
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    /// Canonical on-disk file name for this tile: `{zoom}_{x}_{y}.png`.
    pub fn file_name(&self) -> String {
        format!("{}_{}_{}.png", self.zoom, self.x, self.y)
    }
}

/// An inclusive rectangular range of tile indices at one zoom level.
///
/// Construct via [`TileRange::from_corners`], which applies per-axis
/// min/max so the corner arguments may arrive in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    /// Westernmost column (inclusive).
    pub x_start: u32,

    /// Easternmost column (inclusive).
    pub x_end: u32,

    /// Northernmost row (inclusive).
    pub y_start: u32,

    /// Southernmost row (inclusive).
    pub y_end: u32,

    /// Zoom level of every tile in the range.
    pub zoom: u8,
}

impl TileRange {
    /// Builds the normalized range spanned by two corner tiles.
    ///
    /// Per-axis min/max is applied independently, so `from_corners(a, b)`
    /// and `from_corners(b, a)` yield the same range.
    ///
    /// # Panics
    ///
    /// Panics if the corners have different zoom levels.
    pub fn from_corners(a: TileIndex, b: TileIndex) -> Self {
        assert_eq!(a.zoom, b.zoom, "corner tiles must share a zoom level");
        Self {
            x_start: a.x.min(b.x),
            x_end: a.x.max(b.x),
            y_start: a.y.min(b.y),
            y_end: a.y.max(b.y),
            zoom: a.zoom,
        }
    }

    /// Number of tile columns in the range.
    pub fn width(&self) -> u32 {
        self.x_end - self.x_start + 1
    }

    /// Number of tile rows in the range.
    pub fn height(&self) -> u32 {
        self.y_end - self.y_start + 1
    }

    /// Total number of tiles in the range.
    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Always false: an inclusive range contains at least one tile.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the range in row-major order (north to south, west to east).
    pub fn iter(&self) -> impl Iterator<Item = TileIndex> + '_ {
        let zoom = self.zoom;
        let (x_start, x_end) = (self.x_start, self.x_end);
        (self.y_start..=self.y_end)
            .flat_map(move |y| (x_start..=x_end).map(move |x| TileIndex::new(x, y, zoom)))
    }

    /// Pixel offset of a tile within the mosaic canvas for this range.
    ///
    /// Returns `None` if the tile lies outside the range.
    pub fn pixel_offset(&self, index: &TileIndex) -> Option<(u32, u32)> {
        if index.zoom != self.zoom
            || !(self.x_start..=self.x_end).contains(&index.x)
            || !(self.y_start..=self.y_end).contains(&index.y)
        {
            return None;
        }
        Some((
            (index.x - self.x_start) * TILE_SIZE,
            (index.y - self.y_start) * TILE_SIZE,
        ))
    }
}

/// Two geographic corners as supplied by the job configuration.
///
/// The corners are stored as given and are not required to be ordered;
/// the accessors below normalize per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Latitude of the first corner (degrees).
    pub lat1: f64,

    /// Longitude of the first corner (degrees).
    pub lon1: f64,

    /// Latitude of the second corner (degrees).
    pub lat2: f64,

    /// Longitude of the second corner (degrees).
    pub lon2: f64,
}

impl BoundingBox {
    /// Creates a bounding box from two arbitrary corners.
    pub fn new(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Self {
        Self {
            lat1,
            lon1,
            lat2,
            lon2,
        }
    }

    /// Northern edge latitude.
    pub fn north(&self) -> f64 {
        self.lat1.max(self.lat2)
    }

    /// Southern edge latitude.
    pub fn south(&self) -> f64 {
        self.lat1.min(self.lat2)
    }

    /// Western edge longitude.
    pub fn west(&self) -> f64 {
        self.lon1.min(self.lon2)
    }

    /// Eastern edge longitude.
    pub fn east(&self) -> f64 {
        self.lon1.max(self.lon2)
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.east() - self.west()
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.north() - self.south()
    }

    /// True when the corners collapse to a line or point on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.lat_span() == 0.0 || self.lon_span() == 0.0
    }
}
