//! GeoTIFF decoding via the `tiff` crate.
//!
//! Only the first band is kept. Multi-sample (chunky) images are
//! de-interleaved by taking every n-th sample. The GDAL_NODATA ASCII tag
//! (42113) is honoured when present.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use crate::error::{RasterError, RasterResult};
use crate::raster::Raster;

/// TIFF tag written by GDAL to declare the nodata value.
pub const GDAL_NODATA_TAG: u16 = 42113;

/// Read the first band of a GeoTIFF file.
pub fn read_geotiff(path: &Path) -> RasterResult<Raster> {
    let file = File::open(path).map_err(|source| RasterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut decoder =
        Decoder::new(BufReader::new(file)).map_err(|e| RasterError::unreadable(path, e))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| RasterError::unreadable(path, e))?;
    let (width, height) = (width as usize, height as usize);
    if width == 0 || height == 0 {
        return Err(RasterError::unreadable(path, "image has zero extent"));
    }

    let nodata = read_nodata(&mut decoder);

    let samples = decoder
        .read_image()
        .map_err(|e| RasterError::unreadable(path, e))?;
    let values = decoding_result_to_f32(samples)
        .ok_or_else(|| RasterError::unreadable(path, "unsupported sample format"))?;

    let pixel_count = width * height;
    if values.len() < pixel_count {
        return Err(RasterError::unreadable(
            path,
            format!("expected {} samples, decoded {}", pixel_count, values.len()),
        ));
    }

    let samples_per_pixel = values.len() / pixel_count;
    let band: Vec<f32> = if samples_per_pixel == 1 {
        values
    } else {
        values.into_iter().step_by(samples_per_pixel).take(pixel_count).collect()
    };

    debug!(
        path = %path.display(),
        width,
        height,
        samples_per_pixel,
        nodata = ?nodata,
        "Decoded GeoTIFF"
    );

    Raster::new(width, height, band, nodata)
        .ok_or_else(|| RasterError::unreadable(path, "band size does not match dimensions"))
}

/// Parse the GDAL_NODATA tag, if any. Unparseable values are ignored.
fn read_nodata<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    let value = decoder
        .find_tag(Tag::from_u16_exhaustive(GDAL_NODATA_TAG))
        .ok()
        .flatten()?;
    let text = value.into_string().ok()?;
    parse_nodata(&text)
}

/// Parse a GDAL nodata string ("-9999", "nan", "1e+20\0").
pub fn parse_nodata(text: &str) -> Option<f64> {
    text.trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .parse::<f64>()
        .ok()
}

fn decoding_result_to_f32(result: DecodingResult) -> Option<Vec<f32>> {
    let values = match result {
        DecodingResult::U8(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U64(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I8(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I64(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(buf) => buf,
        DecodingResult::F64(buf) => buf.into_iter().map(|v| v as f32).collect(),
        #[allow(unreachable_patterns)]
        _ => return None,
    };
    Some(values)
}
