//! Tile service provider abstraction
//!
//! This module provides the trait and implementations for downloading
//! slippy-map tiles from remote services, with the HTTP transport injected
//! for testability.

mod http;
mod osm;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use osm::OsmTileProvider;
pub use types::{ProviderError, TileProvider};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
