//! Provider trait and error types.

use thiserror::Error;

use crate::coord::TileIndex;

/// Errors from tile providers and their HTTP clients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The service answered with a non-200 status code.
    #[error("tile service answered HTTP {0}")]
    HttpStatus(u16),

    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// The requested zoom level is outside the provider's range.
    #[error("zoom level {0} not supported by this provider")]
    UnsupportedZoom(u8),
}

/// A remote slippy-map tile service.
///
/// Implementations build the service-specific URL for a tile index and
/// return the raw image bytes. They must be shareable across concurrent
/// fetch units (`Send + Sync`).
pub trait TileProvider: Send + Sync {
    /// Downloads the raw image bytes for one tile.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the zoom level is unsupported, the
    /// service answers with a non-200 status, or the transport fails.
    fn fetch_tile(
        &self,
        index: TileIndex,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, ProviderError>> + Send;

    /// Human-readable provider name for logging.
    fn name(&self) -> &str;

    /// Lowest zoom level served by this provider.
    fn min_zoom(&self) -> u8;

    /// Highest zoom level served by this provider.
    fn max_zoom(&self) -> u8;

    /// Whether a zoom level falls inside the provider's range.
    fn supports_zoom(&self, zoom: u8) -> bool {
        (self.min_zoom()..=self.max_zoom()).contains(&zoom)
    }
}
