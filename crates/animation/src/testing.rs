//! In-memory raster source for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use raster_reader::{Raster, RasterError, RasterResult, RasterSource};

use crate::frames::{Frame, FrameSet};

/// Serves 1-row rasters from memory and counts reads.
#[derive(Default)]
pub(crate) struct MemorySource {
    rasters: HashMap<PathBuf, Raster>,
    pub reads: RefCell<usize>,
}

impl MemorySource {
    pub fn insert(&mut self, path: impl Into<PathBuf>, raster: Raster) {
        self.rasters.insert(path.into(), raster);
    }

    /// One frame per `(date, values)` entry, each a `values.len()` x 1 grid.
    pub fn with_frames(entries: &[(&str, Vec<f32>)]) -> (Self, FrameSet) {
        let mut source = Self::default();
        let mut frames = Vec::new();
        for (date, values) in entries {
            let path = PathBuf::from(format!("mem_{}Z.tif", date));
            let raster = Raster::new(values.len(), 1, values.clone(), None).expect("test raster");
            source.insert(path.clone(), raster);
            frames.push(Frame {
                path,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("test date"),
            });
        }
        (source, FrameSet::new(frames))
    }
}

impl RasterSource for MemorySource {
    fn read(&self, path: &Path) -> RasterResult<Raster> {
        *self.reads.borrow_mut() += 1;
        self.rasters.get(path).cloned().ok_or_else(|| RasterError::UnreadableRaster {
            path: path.to_path_buf(),
            reason: "not in memory source".to_string(),
        })
    }
}
