//! Application error types.

use std::fmt;

use crate::config::ConfigError;
use crate::coord::CoordError;
use crate::geotiff::GeoTiffError;
use crate::mosaic::MosaicError;
use crate::provider::ProviderError;

/// Fatal errors that abort a run.
///
/// Per-tile fetch failures and mosaic gaps are deliberately absent here;
/// they are reported through logs and the run summary instead.
#[derive(Debug)]
pub enum AppError {
    /// The job record could not be read or parsed.
    Config(ConfigError),

    /// The configured coordinates or zoom are invalid.
    Coord(CoordError),

    /// The HTTP client could not be constructed.
    HttpClient(ProviderError),

    /// The tile directory could not be created.
    TilesDir(std::io::Error),

    /// Mosaic assembly failed as a whole.
    Mosaic(MosaicError),

    /// Georeferencing failed.
    Georeference(GeoTiffError),

    /// Failed to create the Tokio runtime.
    RuntimeCreation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Coord(e) => write!(f, "Invalid coordinates: {}", e),
            AppError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            AppError::TilesDir(e) => write!(f, "Failed to create tile directory: {}", e),
            AppError::Mosaic(e) => write!(f, "Failed to assemble mosaic: {}", e),
            AppError::Georeference(e) => write!(f, "Failed to georeference mosaic: {}", e),
            AppError::RuntimeCreation(msg) => {
                write!(f, "Failed to create Tokio runtime: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Coord(e) => Some(e),
            AppError::HttpClient(e) => Some(e),
            AppError::TilesDir(e) => Some(e),
            AppError::Mosaic(e) => Some(e),
            AppError::Georeference(e) => Some(e),
            AppError::RuntimeCreation(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<CoordError> for AppError {
    fn from(e: CoordError) -> Self {
        AppError::Coord(e)
    }
}

impl From<MosaicError> for AppError {
    fn from(e: MosaicError) -> Self {
        AppError::Mosaic(e)
    }
}

impl From<GeoTiffError> for AppError {
    fn from(e: GeoTiffError) -> Self {
        AppError::Georeference(e)
    }
}
