//! OpenStreetMap raster tile provider.
//!
//! Serves the standard OSM Carto rendering as 256×256 PNG tiles.
//!
//! # URL Pattern
//!
//! `https://tile.openstreetmap.org/{z}/{x}/{y}.png`
//!
//! - Standard XYZ tile coordinates (x=column, y=row)
//! - No authentication, but a descriptive `User-Agent` is mandatory
//! - Zoom levels 0 to 19
//!
//! # Terms of Use
//!
//! The public tile servers are run on donated resources and subject to the
//! OSMF tile usage policy: <https://operations.osmfoundation.org/policies/tiles/>

use crate::coord::TileIndex;
use crate::provider::{AsyncHttpClient, ProviderError, TileProvider};

/// Base URL for the OpenStreetMap tile servers.
const OSM_BASE_URL: &str = "https://tile.openstreetmap.org";

/// Minimum zoom level served.
const MIN_ZOOM: u8 = 0;

/// Maximum zoom level served by the standard OSM rendering.
const MAX_ZOOM: u8 = 19;

/// OpenStreetMap tile provider.
///
/// # Example
///
/// ```ignore
/// use mapstitch::provider::{AsyncReqwestClient, OsmTileProvider};
///
/// let client = AsyncReqwestClient::new("mapstitch/0.1 (contact@example.org)")?;
/// let provider = OsmTileProvider::new(client);
/// ```
pub struct OsmTileProvider<C: AsyncHttpClient> {
    http_client: C,
}

impl<C: AsyncHttpClient> OsmTileProvider<C> {
    /// Creates a new OpenStreetMap provider.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }

    /// Builds the tile URL for the given index.
    ///
    /// OSM uses the pattern: `{base}/{z}/{x}/{y}.png`
    fn build_url(&self, index: &TileIndex) -> String {
        format!("{}/{}/{}/{}.png", OSM_BASE_URL, index.zoom, index.x, index.y)
    }
}

impl<C: AsyncHttpClient> TileProvider for OsmTileProvider<C> {
    async fn fetch_tile(&self, index: TileIndex) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(index.zoom) {
            return Err(ProviderError::UnsupportedZoom(index.zoom));
        }

        let url = self.build_url(&index);
        self.http_client.get(&url).await
    }

    fn name(&self) -> &str {
        "OpenStreetMap"
    }

    fn min_zoom(&self) -> u8 {
        MIN_ZOOM
    }

    fn max_zoom(&self) -> u8 {
        MAX_ZOOM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    fn sample_png_response() -> Vec<u8> {
        // PNG signature
        vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    }

    #[test]
    fn test_provider_name() {
        let mock_client = MockAsyncHttpClient {
            response: Ok(sample_png_response()),
        };
        let provider = OsmTileProvider::new(mock_client);
        assert_eq!(provider.name(), "OpenStreetMap");
    }

    #[test]
    fn test_zoom_range() {
        let mock_client = MockAsyncHttpClient {
            response: Ok(sample_png_response()),
        };
        let provider = OsmTileProvider::new(mock_client);
        assert_eq!(provider.min_zoom(), 0);
        assert_eq!(provider.max_zoom(), 19);
        assert!(provider.supports_zoom(0));
        assert!(provider.supports_zoom(19));
        assert!(!provider.supports_zoom(20));
    }

    #[test]
    fn test_url_construction() {
        let mock_client = MockAsyncHttpClient {
            response: Ok(sample_png_response()),
        };
        let provider = OsmTileProvider::new(mock_client);

        let url = provider.build_url(&TileIndex::new(9648, 12318, 15));
        assert_eq!(url, "https://tile.openstreetmap.org/15/9648/12318.png");
    }

    #[test]
    fn test_url_construction_zoom_0() {
        let mock_client = MockAsyncHttpClient {
            response: Ok(sample_png_response()),
        };
        let provider = OsmTileProvider::new(mock_client);

        let url = provider.build_url(&TileIndex::new(0, 0, 0));
        assert_eq!(url, "https://tile.openstreetmap.org/0/0/0.png");
    }

    #[tokio::test]
    async fn test_fetch_tile_success() {
        let mock_client = MockAsyncHttpClient {
            response: Ok(sample_png_response()),
        };
        let provider = OsmTileProvider::new(mock_client);

        let result = provider.fetch_tile(TileIndex::new(100, 200, 15)).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), sample_png_response());
    }

    #[tokio::test]
    async fn test_fetch_tile_unsupported_zoom() {
        let mock_client = MockAsyncHttpClient {
            response: Ok(sample_png_response()),
        };
        let provider = OsmTileProvider::new(mock_client);

        let result = provider.fetch_tile(TileIndex::new(100, 200, 20)).await;
        assert_eq!(result, Err(ProviderError::UnsupportedZoom(20)));
    }

    #[tokio::test]
    async fn test_fetch_tile_http_failure() {
        let mock_client = MockAsyncHttpClient {
            response: Err(ProviderError::HttpStatus(404)),
        };
        let provider = OsmTileProvider::new(mock_client);

        let result = provider.fetch_tile(TileIndex::new(100, 200, 15)).await;
        assert_eq!(result, Err(ProviderError::HttpStatus(404)));
    }

    #[tokio::test]
    async fn test_fetch_tile_transport_failure() {
        let mock_client = MockAsyncHttpClient {
            response: Err(ProviderError::Transport("connection refused".to_string())),
        };
        let provider = OsmTileProvider::new(mock_client);

        let result = provider.fetch_tile(TileIndex::new(100, 200, 15)).await;
        match result {
            Err(ProviderError::Transport(msg)) => assert!(msg.contains("connection refused")),
            other => panic!("expected Transport error, got {:?}", other),
        }
    }
}
