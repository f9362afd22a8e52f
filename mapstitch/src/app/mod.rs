//! Pipeline orchestration.
//!
//! [`run`] drives the whole pipeline for one job: parse the job record,
//! compute the normalized tile range, download the tiles concurrently,
//! wait for every download to resolve, stitch the mosaic, and write the
//! georeferenced raster.
//!
//! Only configuration, coordinate, and output-stage errors are fatal.
//! Individual tile failures are isolated: they surface as logged gaps and
//! in the [`RunSummary`], never as an error from `run`.

mod config;
mod error;

pub use config::{AppConfig, DEFAULT_USER_AGENT};
pub use error::AppError;

use std::path::PathBuf;

use tracing::info;

use crate::config::JobConfig;
use crate::coord::{self, TileRange};
use crate::fetch::{FetchLimiter, TileFetcher};
use crate::geotiff::{GeoTransform, Georeferencer};
use crate::mosaic::MosaicAssembler;
use crate::provider::{AsyncReqwestClient, OsmTileProvider};

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// The normalized tile range that was processed.
    pub range: TileRange,

    /// Tiles successfully downloaded this run.
    pub tiles_fetched: usize,

    /// Tiles absent at assembly time; their mosaic regions are blank.
    pub gaps: usize,

    /// Mosaic width in pixels.
    pub width: u32,

    /// Mosaic height in pixels.
    pub height: u32,

    /// The affine transform written to the GeoTIFF.
    pub transform: GeoTransform,

    /// Where the mosaic was written.
    pub mosaic_path: PathBuf,

    /// Where the georeferenced raster was written.
    pub geotiff_path: PathBuf,
}

/// Runs the full pipeline for the job described by `config`.
pub async fn run(config: &AppConfig) -> Result<RunSummary, AppError> {
    let job = JobConfig::from_file(&config.job_file)?;
    let range = coord::range_for_bounding_box(&job.bbox, job.zoom)?;
    info!(
        zoom = job.zoom,
        columns = range.width(),
        rows = range.height(),
        tiles = range.len(),
        "tile range computed"
    );

    let client =
        AsyncReqwestClient::new(&config.user_agent).map_err(AppError::HttpClient)?;
    let provider = OsmTileProvider::new(client);
    let limiter = FetchLimiter::new(config.fetch_concurrency);
    let fetcher = TileFetcher::new(provider, limiter, &config.tiles_dir);

    // Completion barrier: fetch_range resolves only after every tile task
    // has finished, so assembly never races a download.
    let fetch = fetcher
        .fetch_range(&range)
        .await
        .map_err(AppError::TilesDir)?;

    let mosaic_path = config.mosaic_path();
    let assembler = MosaicAssembler::new(&config.tiles_dir);
    let mosaic = assembler.assemble(&range, &mosaic_path)?;

    let geotiff_path = config.geotiff_path();
    let transform = Georeferencer::georeference(&mosaic_path, &job.bbox, &geotiff_path)?;

    let summary = RunSummary {
        range,
        tiles_fetched: fetch.fetched.len(),
        gaps: mosaic.gaps.len(),
        width: mosaic.width,
        height: mosaic.height,
        transform,
        mosaic_path,
        geotiff_path,
    };

    info!(
        tiles_fetched = summary.tiles_fetched,
        gaps = summary.gaps,
        width = summary.width,
        height = summary.height,
        "run complete"
    );

    Ok(summary)
}
