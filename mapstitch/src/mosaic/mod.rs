//! Mosaic assembly.
//!
//! Reads the persisted tile files of a range in row-major order and pastes
//! them onto one contiguous RGB canvas. Placement is computed from the tile
//! index, never from iteration order, so the result is deterministic no
//! matter which tiles arrived or in which order they were downloaded.
//!
//! Missing or unreadable tiles are gaps: the corresponding 256×256 region
//! keeps the canvas's blank (black) initial value and the run continues.

use std::path::{Path, PathBuf};

use image::{imageops, RgbImage};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::coord::{TileIndex, TileRange, TILE_SIZE};
use crate::fetch::tile_path;

/// Errors that abort mosaic assembly.
///
/// Per-tile problems never surface here; they become gaps instead.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// The output directory could not be created.
    #[error("failed to create output directory: {0}")]
    Io(#[from] std::io::Error),

    /// The finished canvas could not be encoded or written.
    #[error("failed to save mosaic: {0}")]
    Save(#[from] image::ImageError),
}

/// Outcome of an assembly pass.
#[derive(Debug)]
pub struct MosaicReport {
    /// Canvas width in pixels: `range.width() * 256`.
    pub width: u32,

    /// Canvas height in pixels: `range.height() * 256`.
    pub height: u32,

    /// Number of tiles pasted onto the canvas.
    pub pasted: usize,

    /// Tiles whose file was absent or unreadable; their regions stay blank.
    pub gaps: Vec<TileIndex>,
}

/// Stitches persisted tiles into a single raster canvas.
pub struct MosaicAssembler {
    tiles_dir: PathBuf,
}

impl MosaicAssembler {
    /// Creates an assembler reading tiles from `tiles_dir`.
    pub fn new(tiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            tiles_dir: tiles_dir.into(),
        }
    }

    /// Assembles the canvas for `range` and saves it to `output`.
    ///
    /// The canvas dimensions depend only on the range, not on how many
    /// tiles are actually present on disk.
    pub fn assemble(
        &self,
        range: &TileRange,
        output: &Path,
    ) -> Result<MosaicReport, MosaicError> {
        let width = range.width() * TILE_SIZE;
        let height = range.height() * TILE_SIZE;

        // Zero-initialized, so gap regions come out black
        let mut canvas = RgbImage::new(width, height);

        let mut pasted = 0usize;
        let mut gaps = Vec::new();

        for index in range.iter() {
            match self.load_tile(&index) {
                Some(tile) => {
                    let (px, py) = range
                        .pixel_offset(&index)
                        .expect("range iterator yields only in-range tiles");
                    imageops::replace(&mut canvas, &tile, px as i64, py as i64);
                    pasted += 1;
                }
                None => gaps.push(index),
            }
        }

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        canvas.save(output)?;

        info!(
            width,
            height,
            pasted,
            gaps = gaps.len(),
            output = %output.display(),
            "mosaic assembled"
        );

        Ok(MosaicReport {
            width,
            height,
            pasted,
            gaps,
        })
    }

    /// Loads one tile image, treating absence and decode failure as a gap.
    fn load_tile(&self, index: &TileIndex) -> Option<RgbImage> {
        let path = tile_path(&self.tiles_dir, index);
        match image::open(&path) {
            Ok(tile) => {
                debug!(zoom = index.zoom, x = index.x, y = index.y, "pasting tile");
                Some(tile.to_rgb8())
            }
            Err(e) => {
                warn!(
                    zoom = index.zoom,
                    x = index.x,
                    y = index.y,
                    error = %e,
                    "tile missing or unreadable, leaving gap"
                );
                None
            }
        }
    }
}
