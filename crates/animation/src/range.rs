//! Global value range across a frame set.

use raster_reader::RasterSource;
use tracing::{debug, info};

use crate::error::{AnimationError, AnimationResult};
use crate::frames::FrameSet;

/// Closed interval of valid pixel values, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Smallest range covering both.
    pub fn union(self, other: ValueRange) -> ValueRange {
        ValueRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Min and max over the valid pixels of every frame.
///
/// Each raster is decoded once and dropped before the next is read.
pub fn compute_global_range<S: RasterSource>(source: &S, frames: &FrameSet) -> AnimationResult<ValueRange> {
    if frames.is_empty() {
        return Err(AnimationError::EmptyFrameSet);
    }

    let mut range: Option<ValueRange> = None;
    for frame in frames {
        let raster = source.read(&frame.path)?;
        match raster.value_range() {
            Some((lo, hi)) => {
                let frame_range = ValueRange::new(lo, hi);
                debug!(date = %frame.date, min = lo, max = hi, "Frame range");
                range = Some(range.map_or(frame_range, |r| r.union(frame_range)));
            }
            None => debug!(date = %frame.date, "Frame has no valid pixels"),
        }
    }

    let range = range.ok_or(AnimationError::NoValidPixels { frames: frames.len() })?;
    info!(frames = frames.len(), min = range.min, max = range.max, "Computed global range");
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySource;

    #[test]
    fn test_union_of_frame_ranges() {
        let (source, frames) = MemorySource::with_frames(&[
            ("2019-07-01", vec![1.0, 9.0]),
            ("2019-07-02", vec![-3.0, 2.0]),
            ("2019-07-03", vec![5.0, 12.0]),
        ]);
        let range = compute_global_range(&source, &frames).unwrap();
        assert_eq!(range, ValueRange { min: -3.0, max: 12.0 });
    }

    #[test]
    fn test_invalid_pixels_do_not_count() {
        let (source, frames) = MemorySource::with_frames(&[
            ("2019-07-01", vec![f32::NAN, 2.0]),
            ("2019-07-02", vec![f32::INFINITY, 3.0]),
            ("2019-07-03", vec![f32::NAN, f32::NEG_INFINITY]),
        ]);
        let range = compute_global_range(&source, &frames).unwrap();
        assert_eq!(range, ValueRange { min: 2.0, max: 3.0 });
    }

    #[test]
    fn test_empty_set() {
        let (source, _) = MemorySource::with_frames(&[]);
        let err = compute_global_range(&source, &FrameSet::default()).unwrap_err();
        assert!(matches!(err, AnimationError::EmptyFrameSet));
    }

    #[test]
    fn test_all_invalid() {
        let (source, frames) = MemorySource::with_frames(&[
            ("2019-07-01", vec![f32::NAN, f32::NAN]),
            ("2019-07-02", vec![f32::NAN, f32::INFINITY]),
        ]);
        let err = compute_global_range(&source, &frames).unwrap_err();
        assert!(matches!(err, AnimationError::NoValidPixels { frames: 2 }));
    }

    #[test]
    fn test_single_valid_pixel_is_degenerate_range() {
        let (source, frames) = MemorySource::with_frames(&[("2019-07-01", vec![f32::NAN, 4.0])]);
        let range = compute_global_range(&source, &frames).unwrap();
        assert_eq!(range.span(), 0.0);
    }
}
