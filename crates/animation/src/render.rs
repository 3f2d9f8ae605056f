//! Frame rendering: one titled still per frame on the global range.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use image::ImageFormat;
use raster_reader::RasterSource;
use renderer::{GridView, StillRenderer};
use tracing::{debug, info};

use crate::error::{AnimationError, AnimationResult};
use crate::frames::FrameSet;
use crate::range::ValueRange;

/// A rendered still on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StillImage {
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// Title drawn above an animation frame.
pub fn still_title(date: NaiveDate) -> String {
    format!("NO2 CONCENTRATION AT {}", date.format("%Y-%m-%d"))
}

/// Still location for `date`. The first frame of a date gets
/// `YYYY-MM-DD.png`; further frames with the same date get a `_<n>` suffix.
pub fn still_path(still_dir: &Path, date: NaiveDate, occurrence: usize) -> PathBuf {
    let day = date.format("%Y-%m-%d");
    match occurrence {
        0 => still_dir.join(format!("{}.png", day)),
        n => still_dir.join(format!("{}_{}.png", day, n)),
    }
}

/// Render every frame in order into `still_dir`, scaled on `range`.
///
/// Every frame must have the dimensions of the first one. Existing stills
/// at the same paths are overwritten.
pub fn render_frames<S: RasterSource>(
    source: &S,
    renderer: &StillRenderer,
    frames: &FrameSet,
    range: ValueRange,
    still_dir: &Path,
) -> AnimationResult<Vec<StillImage>> {
    std::fs::create_dir_all(still_dir).map_err(|e| AnimationError::io(still_dir, e))?;

    let mut stills = Vec::with_capacity(frames.len());
    let mut expected: Option<(usize, usize)> = None;
    let mut previous: Option<(NaiveDate, usize)> = None;

    for frame in frames {
        let date = frame.date;
        let raster = source
            .read(&frame.path)
            .map_err(|e| AnimationError::render_failure(date, e))?;

        let dims = raster.dimensions();
        match expected {
            None => expected = Some(dims),
            Some(first) if first != dims => {
                return Err(AnimationError::render_failure(
                    date,
                    format!(
                        "{} is {}x{}, expected {}x{} like the first frame",
                        frame.path.display(),
                        dims.0,
                        dims.1,
                        first.0,
                        first.1
                    ),
                ));
            }
            Some(_) => {}
        }

        let occurrence = match previous {
            Some((d, n)) if d == date => n + 1,
            _ => 0,
        };
        previous = Some((date, occurrence));

        let grid = GridView::new(raster.data(), raster.mask(), dims.0, dims.1)
            .map_err(|e| AnimationError::render_failure(date, e))?;
        let image = renderer
            .render(grid, range.min, range.max, &still_title(date))
            .map_err(|e| AnimationError::render_failure(date, e))?;

        let path = still_path(still_dir, date, occurrence);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| AnimationError::render_failure(date, format!("writing {}: {}", path.display(), e)))?;

        debug!(date = %date, path = %path.display(), "Rendered still");
        stills.push(StillImage { date, path });
    }

    info!(stills = stills.len(), dir = %still_dir.display(), "Rendered frames");
    Ok(stills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySource;
    use raster_reader::Raster;
    use renderer::RenderConfig;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_still_path_is_deterministic() {
        let dir = Path::new("/tmp/stills");
        assert_eq!(still_path(dir, d("2019-07-15"), 0), dir.join("2019-07-15.png"));
        assert_eq!(still_path(dir, d("2019-07-15"), 2), dir.join("2019-07-15_2.png"));
    }

    #[test]
    fn test_still_title() {
        assert_eq!(still_title(d("2019-07-15")), "NO2 CONCENTRATION AT 2019-07-15");
    }

    #[test]
    fn test_dimension_mismatch_names_frame_date() {
        let (mut source, frames) = MemorySource::with_frames(&[
            ("2019-07-01", vec![1.0, 2.0]),
            ("2019-07-02", vec![1.0, 2.0]),
        ]);
        source.insert(
            "mem_2019-07-02Z.tif",
            Raster::new(3, 1, vec![1.0, 2.0, 3.0], None).unwrap(),
        );
        let dir = tempfile::tempdir().unwrap();
        let renderer = StillRenderer::new(RenderConfig::default()).unwrap();

        let err = render_frames(&source, &renderer, &frames, ValueRange::new(1.0, 3.0), dir.path()).unwrap_err();
        match err {
            AnimationError::RenderFailure { date, .. } => assert_eq!(date, d("2019-07-02")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_dates_get_distinct_stills() {
        let (mut source, _) = MemorySource::with_frames(&[]);
        source.insert("a", Raster::new(1, 1, vec![1.0], None).unwrap());
        source.insert("b", Raster::new(1, 1, vec![2.0], None).unwrap());
        let frames = FrameSet::new(vec![
            crate::frames::Frame { path: "a".into(), date: d("2019-07-01") },
            crate::frames::Frame { path: "b".into(), date: d("2019-07-01") },
        ]);
        let dir = tempfile::tempdir().unwrap();
        let renderer = StillRenderer::new(RenderConfig::default()).unwrap();

        let stills = render_frames(&source, &renderer, &frames, ValueRange::new(1.0, 2.0), dir.path()).unwrap();

        assert_eq!(stills.len(), 2);
        assert_ne!(stills[0].path, stills[1].path);
        assert!(stills.iter().all(|s| s.path.exists()));
    }
}
