//! End-to-end animation run.

use std::path::{Path, PathBuf};

use raster_reader::{GeoTiffReader, RasterSource};
use renderer::{RenderConfig, StillRenderer};
use tracing::info;

use crate::assemble::{assemble_animation, cleanup, discover_stills, validate_fps, AnimationSummary};
use crate::error::{AnimationError, AnimationResult};
use crate::frames::discover_frames;
use crate::map::{render_map, MapRequest, MapSummary};
use crate::range::compute_global_range;
use crate::render::render_frames;

/// Inputs of one animation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    /// Directory holding the dated rasters
    pub frame_dir: PathBuf,
    /// Where stills are written; created if missing
    pub still_dir: PathBuf,
    /// Animation path, overwritten if present
    pub output: PathBuf,
    pub fps: f64,
}

/// Discovery, range, rendering, assembly and cleanup over one raster source.
#[derive(Debug, Clone)]
pub struct AnimationPipeline<S = GeoTiffReader> {
    source: S,
    renderer: StillRenderer,
}

impl AnimationPipeline<GeoTiffReader> {
    /// Pipeline reading GeoTIFF files.
    pub fn new(config: RenderConfig) -> AnimationResult<Self> {
        Self::with_source(GeoTiffReader, config)
    }
}

impl<S: RasterSource> AnimationPipeline<S> {
    pub fn with_source(source: S, config: RenderConfig) -> AnimationResult<Self> {
        let renderer = StillRenderer::new(config).map_err(AnimationError::RenderConfig)?;
        Ok(Self { source, renderer })
    }

    pub fn renderer(&self) -> &StillRenderer {
        &self.renderer
    }

    /// Turn the rasters in `request.frame_dir` into a looping animation.
    ///
    /// Rasters and stills of the run are deleted only after the animation
    /// has been written. On any error every input stays where it was.
    pub fn run(&self, request: &AnimationRequest) -> AnimationResult<AnimationSummary> {
        let fps = validate_fps(request.fps)?;

        let frames = discover_frames(&request.frame_dir)?;
        let range = compute_global_range(&self.source, &frames)?;
        let stills = render_frames(&self.source, &self.renderer, &frames, range, &request.still_dir)?;
        let summary = assemble_animation(&stills, &request.output, fps, self.renderer.config().gif_speed)?;

        let removed = cleanup(frames.paths().chain(stills.iter().map(|s| s.path.as_path())))?;
        info!(
            frames = frames.len(),
            removed = removed,
            min = range.min,
            max = range.max,
            output = %summary.path.display(),
            "Animation run complete"
        );
        Ok(summary)
    }

    /// Animate stills already present in `still_dir`, then delete them.
    pub fn assemble_still_store(&self, still_dir: &Path, output: &Path, fps: f64) -> AnimationResult<AnimationSummary> {
        let fps = validate_fps(fps)?;
        let stills = discover_stills(still_dir)?;
        let summary = assemble_animation(&stills, output, fps, self.renderer.config().gif_speed)?;
        cleanup(stills.iter().map(|s| s.path.as_path()))?;
        Ok(summary)
    }

    /// Render one raster as a map on its own value range.
    pub fn render_map(&self, request: &MapRequest) -> AnimationResult<MapSummary> {
        render_map(&self.source, &self.renderer, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySource;

    #[test]
    fn test_invalid_fps_does_no_work() {
        let source = MemorySource::default();
        let pipeline = AnimationPipeline::with_source(&source, RenderConfig::default()).unwrap();
        let request = AnimationRequest {
            frame_dir: PathBuf::from("/nonexistent/frames"),
            still_dir: PathBuf::from("/nonexistent/stills"),
            output: PathBuf::from("/nonexistent/out.gif"),
            fps: 0.0,
        };

        let err = pipeline.run(&request).unwrap_err();

        assert!(matches!(err, AnimationError::InvalidFrameRate(_)));
        assert_eq!(*source.reads.borrow(), 0);
    }

    #[test]
    fn test_bad_render_config_rejected() {
        let config = RenderConfig {
            no_data_color: "grey".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            AnimationPipeline::new(config),
            Err(AnimationError::RenderConfig(_))
        ));
    }
}
