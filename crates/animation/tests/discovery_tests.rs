//! Tests for frame discovery, range computation and still-store discovery
//! against real files.

use animation::{compute_global_range, discover_frames, discover_stills, AnimationError, ValueRange};
use raster_reader::GeoTiffReader;
use test_utils::{
    date, list_file_names, temp_test_dir, write_constant_frame, write_corrupt_frame, write_frame,
    write_geotiff,
};

#[test]
fn test_discovery_keeps_frames_in_date_order() {
    let dir = temp_test_dir();
    write_constant_frame(dir.path(), "2019-07-03", 2, 2, 1.0);
    write_constant_frame(dir.path(), "2019-07-01", 2, 2, 1.0);
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    write_constant_frame(dir.path(), "2019-07-02", 2, 2, 1.0);

    let frames = discover_frames(dir.path()).unwrap();

    assert_eq!(
        frames.dates(),
        vec![date("2019-07-01"), date("2019-07-02"), date("2019-07-03")]
    );
}

#[test]
fn test_discovery_ignores_subdirectories() {
    let dir = temp_test_dir();
    let nested = dir.path().join("openEO_2019-07-05Z.tif");
    std::fs::create_dir(&nested).unwrap();
    write_constant_frame(dir.path(), "2019-07-01", 1, 1, 1.0);

    let frames = discover_frames(dir.path()).unwrap();
    assert_eq!(frames.len(), 1);
}

#[test]
fn test_discovery_of_empty_dir_is_empty() {
    let dir = temp_test_dir();
    let frames = discover_frames(dir.path()).unwrap();
    assert!(frames.is_empty());
}

#[test]
fn test_discovery_reports_malformed_date() {
    let dir = temp_test_dir();
    write_constant_frame(dir.path(), "2019-07-01", 1, 1, 1.0);
    std::fs::write(dir.path().join("openEO_2019-13-01Z.tif"), b"").unwrap();

    match discover_frames(dir.path()) {
        Err(AnimationError::MalformedFilename { file, .. }) => assert_eq!(file, "openEO_2019-13-01Z.tif"),
        other => panic!("expected MalformedFilename, got {:?}", other),
    }
}

#[test]
fn test_discovery_missing_dir_is_io_error() {
    let dir = temp_test_dir();
    let missing = dir.path().join("absent");
    assert!(matches!(discover_frames(&missing), Err(AnimationError::Io { .. })));
}

#[test]
fn test_global_range_over_files() {
    let dir = temp_test_dir();
    write_frame(dir.path(), "2019-07-01", 2, 1, &[1.0, 9.0]);
    write_frame(dir.path(), "2019-07-02", 2, 1, &[-3.0, 2.0]);
    write_frame(dir.path(), "2019-07-03", 2, 1, &[5.0, 12.0]);

    let frames = discover_frames(dir.path()).unwrap();
    let range = compute_global_range(&GeoTiffReader, &frames).unwrap();

    assert_eq!(range, ValueRange { min: -3.0, max: 12.0 });
}

#[test]
fn test_global_range_honours_nodata() {
    let dir = temp_test_dir();
    let path = dir.path().join("openEO_2019-07-01Z.tif");
    write_geotiff(&path, 3, 1, &[-9999.0, 0.5, 0.75], Some(-9999.0));

    let frames = discover_frames(dir.path()).unwrap();
    let range = compute_global_range(&GeoTiffReader, &frames).unwrap();

    assert_eq!(range, ValueRange { min: 0.5, max: 0.75 });
}

#[test]
fn test_global_range_all_invalid() {
    let dir = temp_test_dir();
    write_frame(dir.path(), "2019-07-01", 2, 1, &[f32::NAN, f32::NAN]);
    write_frame(dir.path(), "2019-07-02", 2, 1, &[f32::NAN, f32::INFINITY]);

    let frames = discover_frames(dir.path()).unwrap();
    let err = compute_global_range(&GeoTiffReader, &frames).unwrap_err();

    assert!(matches!(err, AnimationError::NoValidPixels { frames: 2 }));
}

#[test]
fn test_global_range_corrupt_frame_names_file() {
    let dir = temp_test_dir();
    write_constant_frame(dir.path(), "2019-07-01", 2, 2, 1.0);
    let corrupt = write_corrupt_frame(dir.path(), "2019-07-02");

    let frames = discover_frames(dir.path()).unwrap();
    match compute_global_range(&GeoTiffReader, &frames) {
        Err(AnimationError::UnreadableRaster(e)) => assert_eq!(e.path(), corrupt.as_path()),
        other => panic!("expected UnreadableRaster, got {:?}", other),
    }
}

#[test]
fn test_still_discovery_orders_by_date() {
    let dir = temp_test_dir();
    for name in ["2019-07-03.png", "2019-07-01_1.png", "2019-07-01.png", "legend.png", "2019-07-02.png"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }

    let stills = discover_stills(dir.path()).unwrap();
    let names: Vec<String> = stills
        .iter()
        .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["2019-07-01.png", "2019-07-01_1.png", "2019-07-02.png", "2019-07-03.png"]);
    assert_eq!(list_file_names(dir.path()).len(), 5);
}
