//! Mapstitch - slippy-map mosaics with georeferencing
//!
//! This library turns a geographic bounding box and a zoom level into a
//! single georeferenced raster: it computes the covered Web Mercator tile
//! range, downloads the tiles from a slippy-map service with bounded
//! concurrency, stitches them into one canvas, and writes the result as a
//! GeoTIFF in WGS 84 (EPSG:4326).
//!
//! The stages are exposed individually (`coord`, `fetch`, `mosaic`,
//! `geotiff`) and wired together by [`app::run`].

pub mod app;
pub mod config;
pub mod coord;
pub mod fetch;
pub mod geotiff;
pub mod mosaic;
pub mod provider;

pub use app::{run, AppConfig, AppError, RunSummary};
pub use config::JobConfig;
pub use coord::{to_tile_index, BoundingBox, TileIndex, TileRange};
pub use geotiff::GeoTransform;
