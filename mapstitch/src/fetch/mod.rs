//! Bounded-concurrency tile retrieval.
//!
//! [`TileFetcher`] downloads every tile of a [`TileRange`] from a
//! [`TileProvider`] and persists the raw bytes under
//! `{tiles_dir}/{zoom}_{x}_{y}.png`. All tiles are submitted as independent
//! concurrent units of work, gated by a shared [`FetchLimiter`]; the fetch
//! phase resolves only once every unit has finished, so assembly never
//! starts while downloads are outstanding.
//!
//! Per-tile failures are not fatal. A failed tile is logged, reported in
//! the [`FetchReport`], and becomes a gap in the mosaic; there are no
//! retries within a run.

mod limiter;

pub use limiter::{FetchLimiter, FetchPermit, DEFAULT_FETCH_CONCURRENCY};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::coord::{TileIndex, TileRange};
use crate::provider::{ProviderError, TileProvider};

/// Why a single tile could not be persisted.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider could not deliver the tile.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The tile bytes could not be written to disk.
    #[error("failed to write tile file: {0}")]
    Write(#[from] std::io::Error),
}

/// Outcome of a fetch phase.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Tiles successfully downloaded and persisted.
    pub fetched: Vec<TileIndex>,

    /// Tiles that failed, with the per-tile reason. These become gaps.
    pub failed: Vec<(TileIndex, FetchError)>,
}

impl FetchReport {
    /// Total number of tiles the fetch phase attempted.
    pub fn requested(&self) -> usize {
        self.fetched.len() + self.failed.len()
    }
}

/// Downloads all tiles of a range with bounded concurrency.
pub struct TileFetcher<P: TileProvider> {
    provider: P,
    limiter: FetchLimiter,
    tiles_dir: PathBuf,
}

impl<P: TileProvider> TileFetcher<P> {
    /// Creates a fetcher persisting tiles under `tiles_dir`.
    pub fn new(provider: P, limiter: FetchLimiter, tiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            limiter,
            tiles_dir: tiles_dir.into(),
        }
    }

    /// On-disk path for a tile downloaded by this fetcher.
    pub fn tile_path(&self, index: &TileIndex) -> PathBuf {
        self.tiles_dir.join(index.file_name())
    }

    /// Fetches every tile in the range and waits for all of them.
    ///
    /// Download order is unspecified; correctness relies only on this
    /// method resolving after the last unit has finished.
    ///
    /// # Errors
    ///
    /// Only the creation of the tile directory itself is fatal here;
    /// per-tile failures are collected in the report instead.
    pub async fn fetch_range(&self, range: &TileRange) -> Result<FetchReport, std::io::Error> {
        tokio::fs::create_dir_all(&self.tiles_dir).await?;

        info!(
            provider = self.provider.name(),
            tiles = range.len(),
            concurrency = self.limiter.capacity(),
            zoom = range.zoom,
            "starting tile fetch"
        );

        let units: Vec<_> = range.iter().map(|index| self.fetch_one(index)).collect();
        let outcomes = futures::future::join_all(units).await;

        let mut report = FetchReport::default();
        for (index, result) in outcomes {
            match result {
                Ok(()) => report.fetched.push(index),
                Err(e) => report.failed.push((index, e)),
            }
        }

        info!(
            fetched = report.fetched.len(),
            failed = report.failed.len(),
            "tile fetch complete"
        );

        Ok(report)
    }

    /// Fetches and persists a single tile under the limiter.
    async fn fetch_one(&self, index: TileIndex) -> (TileIndex, Result<(), FetchError>) {
        // Held until the body has been read and the file written
        let _permit = self.limiter.acquire().await;

        let result = self.download_and_persist(index).await;
        match &result {
            Ok(()) => {
                debug!(zoom = index.zoom, x = index.x, y = index.y, "downloaded tile");
            }
            Err(e) => {
                warn!(
                    zoom = index.zoom,
                    x = index.x,
                    y = index.y,
                    error = %e,
                    "tile fetch failed, leaving gap"
                );
            }
        }

        (index, result)
    }

    async fn download_and_persist(&self, index: TileIndex) -> Result<(), FetchError> {
        let bytes = self.provider.fetch_tile(index).await?;
        tokio::fs::write(self.tile_path(&index), &bytes).await?;
        Ok(())
    }
}

/// On-disk path for a tile under an arbitrary directory.
///
/// Shared between the fetcher (writing) and the assembler (reading).
pub fn tile_path(tiles_dir: &Path, index: &TileIndex) -> PathBuf {
    tiles_dir.join(index.file_name())
}
