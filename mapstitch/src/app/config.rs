//! Application configuration for a mapstitch run.
//!
//! `AppConfig` gathers everything outside the job record itself: where the
//! job file lives, where tiles and outputs go, and how aggressively to
//! fetch. The job record (bounding box and zoom) is parsed separately by
//! [`crate::config::JobConfig`].

use std::path::PathBuf;

use crate::fetch::DEFAULT_FETCH_CONCURRENCY;

/// Default `User-Agent` sent to the tile service.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "mapstitch/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/mapstitch/mapstitch)"
);

/// Top-level configuration passed to [`crate::app::run`].
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Path to the single-line job record.
    pub job_file: PathBuf,

    /// Directory for downloaded tile files.
    pub tiles_dir: PathBuf,

    /// Directory for the mosaic and GeoTIFF outputs.
    pub output_dir: PathBuf,

    /// File name of the mosaic inside `output_dir`.
    pub mosaic_file: String,

    /// File name of the georeferenced raster inside `output_dir`.
    pub geotiff_file: String,

    /// Maximum number of tile fetches in flight.
    pub fetch_concurrency: usize,

    /// Client-identifying header value for the tile service.
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            job_file: PathBuf::from("config.csv"),
            tiles_dir: PathBuf::from("tiles"),
            output_dir: PathBuf::from("map"),
            mosaic_file: "mosaic.png".to_string(),
            geotiff_file: "mosaic.tif".to_string(),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the job file path.
    pub fn with_job_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.job_file = path.into();
        self
    }

    /// Set the tile storage directory.
    pub fn with_tiles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tiles_dir = dir.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the fetch concurrency bound.
    pub fn with_fetch_concurrency(mut self, concurrency: usize) -> Self {
        self.fetch_concurrency = concurrency;
        self
    }

    /// Set the `User-Agent` string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full path of the mosaic output.
    pub fn mosaic_path(&self) -> PathBuf {
        self.output_dir.join(&self.mosaic_file)
    }

    /// Full path of the georeferenced output.
    pub fn geotiff_path(&self) -> PathBuf {
        self.output_dir.join(&self.geotiff_file)
    }
}
