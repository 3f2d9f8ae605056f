//! Looping GIF encoding.

use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Display time of one frame at `fps` frames per second.
///
/// GIF delays are stored in hundredths of a second, so the effective rate
/// is rounded by the encoder. Rates too slow for the format get the longest
/// delay a GIF can hold.
pub fn frame_delay(fps: f64) -> RenderResult<Delay> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(RenderError::InvalidScale(format!("frame rate must be positive, got {}", fps)));
    }
    let duration = Duration::try_from_secs_f64(1.0 / fps).unwrap_or(Duration::MAX);
    Ok(Delay::from_saturating_duration(duration))
}

/// Encode `frames` in order into an endlessly looping GIF.
///
/// `speed` trades palette quality for time, 1 (best) to 30 (fastest).
pub fn encode_looping_gif(frames: Vec<RgbaImage>, fps: f64, speed: i32) -> RenderResult<Vec<u8>> {
    if frames.is_empty() {
        return Err(RenderError::InvalidGrid("no frames to encode".to_string()));
    }
    let delay = frame_delay(fps)?;
    let count = frames.len();

    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut buffer, speed.clamp(1, 30));
        encoder.set_repeat(Repeat::Infinite)?;
        for image in frames {
            encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
        }
    }

    debug!(frames = count, fps = fps, bytes = buffer.len(), "Encoded GIF");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delay_rejects_non_positive() {
        assert!(frame_delay(0.0).is_err());
        assert!(frame_delay(-1.0).is_err());
        assert!(frame_delay(f64::NAN).is_err());
    }

    #[test]
    fn test_frame_delay_two_fps() {
        let (num, den) = frame_delay(2.0).unwrap().numer_denom_ms();
        assert_eq!(num as f64 / den as f64, 500.0);
    }

    #[test]
    fn test_frame_delay_saturates_for_tiny_rates() {
        let slowest = frame_delay(1e-30).unwrap().numer_denom_ms();
        assert_eq!(frame_delay(f64::MIN_POSITIVE).unwrap().numer_denom_ms(), slowest);
        let one_fps = frame_delay(1.0).unwrap().numer_denom_ms();
        assert!(slowest.0 as f64 / slowest.1 as f64 > one_fps.0 as f64 / one_fps.1 as f64);
    }

    #[test]
    fn test_encode_at_tiny_rate() {
        let frame = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let bytes = encode_looping_gif(vec![frame], 1e-30, 10).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
    }

    #[test]
    fn test_empty_frames_rejected() {
        assert!(encode_looping_gif(Vec::new(), 2.0, 10).is_err());
    }
}
