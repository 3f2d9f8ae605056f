//! Shared test utilities for the s5p-no2-dashboard workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Temporary directory helpers
//! - Synthetic grid generators
//! - GeoTIFF fixture writers for frame directories
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{write_frame, temp_test_dir};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that two RGBA pixels are within `tolerance` on every channel.
///
/// GIF quantization shifts colors slightly, so exact comparisons of decoded
/// animation frames are not meaningful.
#[macro_export]
macro_rules! assert_rgba_near {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: [u8; 4] = $left;
        let right: [u8; 4] = $right;
        for channel in 0..4 {
            let diff = (left[channel] as i32 - right[channel] as i32).abs();
            if diff > $tolerance as i32 {
                panic!(
                    "assertion failed: pixels differ on channel {}\n  left: `{:?}`,\n right: `{:?}`",
                    channel, left, right
                );
            }
        }
    }};
}
