//! Animation assembly from stills, and cleanup of a run's files.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use image::RgbaImage;
use once_cell::sync::Lazy;
use regex::Regex;
use renderer::gif::encode_looping_gif;
use tracing::{debug, info, warn};

use crate::error::{AnimationError, AnimationResult};
use crate::frames::list_files;
use crate::render::StillImage;

static STILL_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})(?:_(\d+))?\.([A-Za-z0-9]+)$").expect("still name pattern")
});

/// Frame rate check done before any other work.
pub fn validate_fps(fps: f64) -> AnimationResult<f64> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(AnimationError::InvalidFrameRate(fps))
    }
}

/// Date and same-day sequence number of a still filename, `None` if the name
/// is not a still.
pub fn still_date_from_filename(name: &str) -> Option<(NaiveDate, usize)> {
    let caps = STILL_NAME.captures(name)?;
    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    let occurrence = match caps.get(2) {
        Some(n) => n.as_str().parse().ok()?,
        None => 0,
    };
    Some((date, occurrence))
}

/// Stills in `dir` ordered by date, then by same-day sequence number.
pub fn discover_stills(dir: &Path) -> AnimationResult<Vec<StillImage>> {
    let mut found = Vec::new();
    for (name, path) in list_files(dir)? {
        match still_date_from_filename(&name) {
            Some((date, occurrence)) => found.push((date, occurrence, path)),
            None => debug!(file = %name, "Not a still, skipping"),
        }
    }
    found.sort_by_key(|&(date, occurrence, _)| (date, occurrence));

    info!(dir = %dir.display(), stills = found.len(), "Discovered stills");
    Ok(found
        .into_iter()
        .map(|(date, _, path)| StillImage { date, path })
        .collect())
}

/// What a finished assembly produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSummary {
    pub path: PathBuf,
    pub frame_count: usize,
    pub dates: Vec<NaiveDate>,
    pub fps: f64,
}

fn load_still(still: &StillImage) -> AnimationResult<RgbaImage> {
    image::open(&still.path)
        .map(|img| img.to_rgba8())
        .map_err(|e| AnimationError::EncodingFailure(format!("cannot decode still {}: {}", still.path.display(), e)))
}

/// Encode `stills` in date order into a looping GIF at `output`.
///
/// The GIF is written next to `output` under a temporary name and renamed
/// over it, so a failure never leaves a truncated animation behind.
pub fn assemble_animation(
    stills: &[StillImage],
    output: &Path,
    fps: f64,
    gif_speed: i32,
) -> AnimationResult<AnimationSummary> {
    let fps = validate_fps(fps)?;
    if stills.is_empty() {
        return Err(AnimationError::EncodingFailure("no stills to assemble".to_string()));
    }

    let mut ordered: Vec<&StillImage> = stills.iter().collect();
    ordered.sort_by_key(|s| s.date);

    let mut images = Vec::with_capacity(ordered.len());
    for still in &ordered {
        let image = load_still(still)?;
        if let Some(first) = images.first().map(RgbaImage::dimensions) {
            if image.dimensions() != first {
                return Err(AnimationError::EncodingFailure(format!(
                    "still {} is {}x{}, expected {}x{}",
                    still.path.display(),
                    image.width(),
                    image.height(),
                    first.0,
                    first.1
                )));
            }
        }
        images.push(image);
    }

    let bytes = encode_looping_gif(images, fps, gif_speed)
        .map_err(|e| AnimationError::EncodingFailure(e.to_string()))?;
    write_replacing(output, &bytes)?;

    let summary = AnimationSummary {
        path: output.to_path_buf(),
        frame_count: ordered.len(),
        dates: ordered.iter().map(|s| s.date).collect(),
        fps,
    };
    info!(
        path = %output.display(),
        frames = summary.frame_count,
        fps = fps,
        bytes = bytes.len(),
        "Wrote animation"
    );
    Ok(summary)
}

fn write_replacing(output: &Path, bytes: &[u8]) -> AnimationResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AnimationError::io(parent, e))?;
    }

    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "animation".to_string());
    let temp = output.with_file_name(format!(".{}.partial", file_name));

    std::fs::write(&temp, bytes).map_err(|e| AnimationError::io(&temp, e))?;
    if let Err(e) = std::fs::rename(&temp, output) {
        let _ = std::fs::remove_file(&temp);
        return Err(AnimationError::io(output, e));
    }
    Ok(())
}

/// Delete the given files. Files that are already gone are skipped.
pub fn cleanup<'a>(paths: impl IntoIterator<Item = &'a Path>) -> AnimationResult<usize> {
    let mut removed = 0;
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Already removed");
            }
            Err(e) => return Err(AnimationError::io(path, e)),
        }
    }
    debug!(removed = removed, "Cleaned up run files");
    Ok(removed)
}
