//! Tests for reading GeoTIFF deliveries from disk.

use raster_reader::{read_geotiff, GeoTiffReader, RasterError, RasterSource};
use test_utils::{temp_test_dir, write_corrupt_frame, write_geotiff};

#[test]
fn test_read_float_geotiff() {
    let dir = temp_test_dir();
    let path = dir.path().join("grid.tif");
    let data: Vec<f32> = (0..12).map(|i| i as f32 * 0.5).collect();
    write_geotiff(&path, 4, 3, &data, None);

    let raster = read_geotiff(&path).unwrap();
    assert_eq!(raster.dimensions(), (4, 3));
    assert_eq!(raster.data(), data.as_slice());
    assert_eq!(raster.valid_count(), 12);
    assert_eq!(raster.value_range(), Some((0.0, 5.5)));
    assert_eq!(raster.get(1, 2), Some(4.5));
}

#[test]
fn test_gdal_nodata_is_masked() {
    let dir = temp_test_dir();
    let path = dir.path().join("nodata.tif");
    write_geotiff(&path, 2, 2, &[-9999.0, 3.0, 7.0, -9999.0], Some(-9999.0));

    let raster = GeoTiffReader.read(&path).unwrap();
    assert_eq!(raster.nodata(), Some(-9999.0));
    assert_eq!(raster.mask(), &[false, true, true, false]);
    assert_eq!(raster.value_range(), Some((3.0, 7.0)));
}

#[test]
fn test_nan_pixels_are_masked_without_nodata_tag() {
    let dir = temp_test_dir();
    let path = dir.path().join("nan.tif");
    write_geotiff(&path, 3, 1, &[f32::NAN, 1.0, f32::NAN], None);

    let raster = read_geotiff(&path).unwrap();
    assert_eq!(raster.nodata(), None);
    assert_eq!(raster.valid_count(), 1);
}

#[test]
fn test_corrupt_file_is_unreadable_raster() {
    let dir = temp_test_dir();
    let path = write_corrupt_frame(dir.path(), "2019-07-01");

    match read_geotiff(&path) {
        Err(RasterError::UnreadableRaster { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected UnreadableRaster, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = temp_test_dir();
    let path = dir.path().join("missing.tif");

    let err = read_geotiff(&path).unwrap_err();
    assert!(matches!(err, RasterError::Io { .. }));
    assert_eq!(err.path(), path.as_path());
}
