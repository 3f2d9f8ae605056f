//! Frame discovery and chronological ordering.
//!
//! The back end names each delivered raster `<prefix>_<YYYY-MM-DD>Z.<ext>`,
//! for example `openEO_2019-07-15Z.tif`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{AnimationError, AnimationResult};

static FRAME_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)_(\d{4}-\d{2}-\d{2})Z\.([A-Za-z0-9]+)$").expect("frame name pattern")
});

/// Date encoded in a frame filename.
///
/// `Ok(None)` means the name is not a frame; an error means it has the frame
/// shape but the date is not a real calendar date (e.g. `2019-07-32`).
pub fn frame_date_from_filename(name: &str) -> AnimationResult<Option<NaiveDate>> {
    let Some(caps) = FRAME_NAME.captures(name) else {
        return Ok(None);
    };
    let date = &caps[2];
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| AnimationError::MalformedFilename {
            file: name.to_string(),
            reason: format!("'{}' is not a calendar date: {}", date, e),
        })
}

/// One dated raster on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub path: PathBuf,
    pub date: NaiveDate,
}

/// Frames in non-decreasing date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    /// Order `frames` by date. Equal dates keep their input order.
    pub fn new(mut frames: Vec<Frame>) -> Self {
        frames.sort_by_key(|f| f.date);
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.frames.iter().map(|f| f.date).collect()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.frames.iter().map(|f| f.path.as_path())
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// File names directly inside `dir`, in listing order.
pub(crate) fn list_files(dir: &Path) -> AnimationResult<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| AnimationError::io(dir, std::io::Error::from(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            files.push((name.to_string(), entry.path().to_path_buf()));
        }
    }
    Ok(files)
}

/// Collect every frame in `dir` (not recursive). Other files are ignored.
pub fn discover_frames(dir: &Path) -> AnimationResult<FrameSet> {
    let mut frames = Vec::new();
    let mut skipped = 0usize;

    for (name, path) in list_files(dir)? {
        match frame_date_from_filename(&name)? {
            Some(date) => frames.push(Frame { path, date }),
            None => {
                debug!(file = %name, "Not a frame, skipping");
                skipped += 1;
            }
        }
    }

    let set = FrameSet::new(frames);
    info!(
        dir = %dir.display(),
        frames = set.len(),
        skipped = skipped,
        "Discovered frames"
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_frame_date_from_filename() {
        assert_eq!(
            frame_date_from_filename("openEO_2019-07-15Z.tif").unwrap(),
            Some(d("2019-07-15"))
        );
        assert_eq!(
            frame_date_from_filename("s5p_no2_2020-02-29Z.tiff").unwrap(),
            Some(d("2020-02-29"))
        );
    }

    #[test]
    fn test_non_frames_are_none() {
        for name in ["notes.txt", "openEO_2019-07-15.tif", "2019-07-15Z.tif", "openEO_2019-07-15Z", "openEO_19-07-15Z.tif"] {
            assert_eq!(frame_date_from_filename(name).unwrap(), None, "{}", name);
        }
    }

    #[test]
    fn test_impossible_date_is_malformed() {
        let err = frame_date_from_filename("openEO_2019-07-32Z.tif").unwrap_err();
        match err {
            AnimationError::MalformedFilename { file, .. } => assert_eq!(file, "openEO_2019-07-32Z.tif"),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(frame_date_from_filename("openEO_2019-02-29Z.tif").is_err());
    }

    #[test]
    fn test_frame_set_is_stable() {
        let frames = vec![
            Frame { path: "b".into(), date: d("2019-07-02") },
            Frame { path: "a1".into(), date: d("2019-07-01") },
            Frame { path: "a2".into(), date: d("2019-07-01") },
        ];
        let set = FrameSet::new(frames);
        let paths: Vec<_> = set.paths().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(paths, vec!["a1", "a2", "b"]);
    }
}
