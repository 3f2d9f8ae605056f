//! Fixture writers that mimic back-end deliveries on disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// GDAL nodata tag number.
const GDAL_NODATA_TAG: u16 = 42113;

/// Prefix used by the processing back end for downloaded results.
pub const FRAME_PREFIX: &str = "openEO";

/// File name the back end gives the raster for `date`.
pub fn frame_filename(date: &str) -> String {
    format!("{}_{}Z.tif", FRAME_PREFIX, date)
}

/// Parse a `YYYY-MM-DD` literal used in tests.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Write a single-band Float32 GeoTIFF.
///
/// When `nodata` is given, it is stored in the GDAL_NODATA tag as text.
pub fn write_geotiff(path: &Path, width: usize, height: usize, data: &[f32], nodata: Option<f64>) {
    assert_eq!(data.len(), width * height, "fixture data size mismatch");

    let file = File::create(path).expect("Failed to create fixture file");
    let mut tiff = TiffEncoder::new(BufWriter::new(file)).expect("Failed to start TIFF encoder");
    let mut image = tiff
        .new_image::<colortype::Gray32Float>(width as u32, height as u32)
        .expect("Failed to start TIFF image");

    if let Some(nodata) = nodata {
        let text = format!("{}", nodata);
        image
            .encoder()
            .write_tag(Tag::from_u16_exhaustive(GDAL_NODATA_TAG), text.as_str())
            .expect("Failed to write GDAL_NODATA tag");
    }

    image.write_data(data).expect("Failed to write TIFF data");
}

/// Write a dated frame raster into `dir` and return its path.
pub fn write_frame(dir: &Path, date: &str, width: usize, height: usize, data: &[f32]) -> PathBuf {
    let path = dir.join(frame_filename(date));
    write_geotiff(&path, width, height, data, None);
    path
}

/// Write a dated frame filled with a single value.
pub fn write_constant_frame(dir: &Path, date: &str, width: usize, height: usize, value: f32) -> PathBuf {
    write_frame(dir, date, width, height, &vec![value; width * height])
}

/// Write a file that carries a frame name but is not a TIFF.
pub fn write_corrupt_frame(dir: &Path, date: &str) -> PathBuf {
    let path = dir.join(frame_filename(date));
    std::fs::write(&path, b"this is not a tiff").expect("Failed to write corrupt fixture");
    path
}

/// Write an aggregate time-series delivery the way the back end returns it:
/// one key per timestamp, values nested per geometry and band.
pub fn write_timeseries_json(path: &Path, entries: &[(&str, Option<f64>)]) {
    let body: Vec<String> = entries
        .iter()
        .map(|(ts, value)| match value {
            Some(v) => format!("\"{}T00:00:00Z\": [[{}]]", ts, v),
            None => format!("\"{}T00:00:00Z\": [[null]]", ts),
        })
        .collect();
    std::fs::write(path, format!("{{{}}}", body.join(", "))).expect("Failed to write JSON fixture");
}
