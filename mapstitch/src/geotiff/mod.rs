//! Georeferencing output.
//!
//! Takes the assembled mosaic and writes a GeoTIFF carrying the same RGB
//! pixels plus the affine transform that locates them on the globe. The
//! encoding is pure Rust via the `tiff` crate: the transform goes into the
//! `ModelPixelScale`/`ModelTiepoint` tags and the coordinate reference
//! system (WGS 84, EPSG:4326) into a GeoKey directory.
//!
//! The transform is order-independent in the configured corners: the
//! origin is always the northwest corner of the normalized bounding box,
//! with positive per-axis resolutions and the y-axis pointing down.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use thiserror::Error;
use tiff::encoder::{colortype, DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::Tag;
use tracing::info;

use crate::coord::BoundingBox;

// GeoTIFF tag IDs (not in the standard tiff crate)
const GEOTIFF_MODELPIXELSCALE: u16 = 33550;
const GEOTIFF_MODELTIEPOINT: u16 = 33922;
const GEOTIFF_GEOKEYDIRECTORY: u16 = 34735;
const GEOTIFF_GEOASCIIPARAMS: u16 = 34737;

// GeoKey IDs
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GEOG_CITATION_GEO_KEY: u16 = 2049;
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;

// GeoKey values
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;
const EPSG_WGS84: u16 = 4326;

/// Citation stored in the GeoAsciiParams tag, pipe-terminated as GeoTIFF
/// requires for ASCII values.
const WGS84_CITATION: &str = "WGS 84|";

/// Errors during georeferencing.
#[derive(Debug, Error)]
pub enum GeoTiffError {
    /// The assembled mosaic could not be opened. Fatal: without it there
    /// is nothing to georeference.
    #[error("cannot open mosaic for georeferencing: {0}")]
    MosaicOpen(image::ImageError),

    /// The output file could not be created.
    #[error("failed to create GeoTIFF file: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF encoding failed.
    #[error("TIFF encoding error: {0}")]
    Encode(#[from] tiff::TiffError),
}

/// Affine transform mapping pixel coordinates to geographic coordinates.
///
/// Follows the standard raster convention: the origin is the outer corner
/// of the top-left pixel, `res_x` steps eastward per column and `res_y`
/// steps southward per row (stored as a positive magnitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// Longitude of the raster origin (northwest corner).
    pub origin_lon: f64,

    /// Latitude of the raster origin (northwest corner).
    pub origin_lat: f64,

    /// Degrees of longitude per pixel column.
    pub res_x: f64,

    /// Degrees of latitude per pixel row (positive magnitude).
    pub res_y: f64,
}

impl GeoTransform {
    /// Derives the transform for a raster of `width`×`height` pixels
    /// covering the bounding box.
    ///
    /// The corners are normalized first, so the configured corner order
    /// does not affect the result.
    pub fn from_bounds(bbox: &BoundingBox, width: u32, height: u32) -> Self {
        Self {
            origin_lon: bbox.west(),
            origin_lat: bbox.north(),
            res_x: bbox.lon_span() / width as f64,
            res_y: bbox.lat_span() / height as f64,
        }
    }
}

/// Writes the georeferenced raster for an assembled mosaic.
pub struct Georeferencer;

impl Georeferencer {
    /// Reads the mosaic at `mosaic_path` and writes a GeoTIFF to `output`.
    ///
    /// Returns the derived transform.
    ///
    /// # Errors
    ///
    /// All errors here are fatal to the run; a mosaic that cannot be read
    /// leaves nothing meaningful to produce.
    pub fn georeference(
        mosaic_path: &Path,
        bbox: &BoundingBox,
        output: &Path,
    ) -> Result<GeoTransform, GeoTiffError> {
        let mosaic = image::open(mosaic_path)
            .map_err(GeoTiffError::MosaicOpen)?
            .to_rgb8();
        let (width, height) = mosaic.dimensions();

        let transform = GeoTransform::from_bounds(bbox, width, height);

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(output)?);

        let mut encoder = TiffEncoder::new(writer)?;
        let mut raster = encoder.new_image::<colortype::RGB8>(width, height)?;
        write_geo_tags(raster.encoder(), &transform)?;
        raster.write_data(mosaic.as_raw())?;

        info!(
            width,
            height,
            origin_lon = transform.origin_lon,
            origin_lat = transform.origin_lat,
            res_x = transform.res_x,
            res_y = transform.res_y,
            output = %output.display(),
            "georeferenced raster written"
        );

        Ok(transform)
    }
}

/// Writes the GeoTIFF georeferencing tags into the image directory.
fn write_geo_tags<W: Write + Seek, K: TiffKind>(
    dir: &mut DirectoryEncoder<W, K>,
    transform: &GeoTransform,
) -> Result<(), tiff::TiffError> {
    // ModelPixelScale: [ScaleX, ScaleY, ScaleZ]
    let pixel_scale = [transform.res_x, transform.res_y, 0.0];
    dir.write_tag(Tag::Unknown(GEOTIFF_MODELPIXELSCALE), pixel_scale.as_slice())?;

    // ModelTiepoint: [I, J, K, X, Y, Z] ties pixel (0, 0) to the origin
    let tiepoint = [
        0.0,
        0.0,
        0.0,
        transform.origin_lon,
        transform.origin_lat,
        0.0,
    ];
    dir.write_tag(Tag::Unknown(GEOTIFF_MODELTIEPOINT), tiepoint.as_slice())?;

    dir.write_tag(
        Tag::Unknown(GEOTIFF_GEOKEYDIRECTORY),
        geokey_directory().as_slice(),
    )?;
    dir.write_tag(
        Tag::Unknown(GEOTIFF_GEOASCIIPARAMS),
        WGS84_CITATION.as_bytes(),
    )?;

    Ok(())
}

/// Builds the GeoKey directory declaring a geographic WGS 84 raster.
fn geokey_directory() -> Vec<u16> {
    // [KeyDirectoryVersion, KeyRevision, MinorRevision, NumberOfKeys,
    //  KeyID, TIFFTagLocation, Count, ValueOffset, ...]
    vec![
        1,
        1,
        0,
        4,
        GT_MODEL_TYPE_GEO_KEY,
        0,
        1,
        MODEL_TYPE_GEOGRAPHIC,
        GT_RASTER_TYPE_GEO_KEY,
        0,
        1,
        RASTER_PIXEL_IS_AREA,
        GEOGRAPHIC_TYPE_GEO_KEY,
        0,
        1,
        EPSG_WGS84,
        GEOG_CITATION_GEO_KEY,
        GEOTIFF_GEOASCIIPARAMS,
        WGS84_CITATION.len() as u16,
        0,
    ]
}
