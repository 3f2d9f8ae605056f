//! Single-band raster reader for satellite deliveries.
//!
//! The processing back end delivers one GeoTIFF per date. This crate opens
//! such a file and returns its first band as a [`Raster`]: a row-major `f32`
//! grid plus a validity mask. NaN, infinities and the declared GDAL nodata
//! value are flagged invalid so they never leak into statistics.
//!
//! Callers that only need "give me a grid for this path" should depend on
//! the [`RasterSource`] trait; [`GeoTiffReader`] is the file-backed
//! implementation.

pub mod error;
pub mod geotiff;
pub mod raster;

use std::path::Path;

pub use error::{RasterError, RasterResult};
pub use geotiff::read_geotiff;
pub use raster::Raster;

/// Something that can turn a path into a decoded single-band raster.
pub trait RasterSource {
    fn read(&self, path: &Path) -> RasterResult<Raster>;
}

/// Reads GeoTIFF files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoTiffReader;

impl RasterSource for GeoTiffReader {
    fn read(&self, path: &Path) -> RasterResult<Raster> {
        read_geotiff(path)
    }
}

impl<T: RasterSource + ?Sized> RasterSource for &T {
    fn read(&self, path: &Path) -> RasterResult<Raster> {
        (**self).read(path)
    }
}
