//! Test data generators for creating synthetic NO2-like grids.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], 1000.0);
/// assert_eq!(grid[10], 1.0);
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a grid spanning exactly `[min, max]`.
///
/// The first cell holds `min`, the last cell holds `max`, the rest ramp
/// linearly in row-major order.
pub fn create_ramp_grid(width: usize, height: usize, min: f32, max: f32) -> Vec<f32> {
    let n = width * height;
    if n == 1 {
        return vec![min];
    }
    (0..n)
        .map(|i| min + (max - min) * i as f32 / (n - 1) as f32)
        .collect()
}

/// Creates a grid with tropospheric-NO2-like values (mol/m²).
///
/// Values range from ~2e-5 background to ~1.5e-4 over a "city" blob centred
/// in the grid.
pub fn create_no2_grid(width: usize, height: usize) -> Vec<f32> {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = (width.min(height) as f32 / 3.0).max(1.0);

    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - cx;
            let dy = row as f32 - cy;
            let falloff = (-(dx * dx + dy * dy) / (2.0 * radius * radius)).exp();
            data.push(2.0e-5 + 1.3e-4 * falloff);
        }
    }
    data
}

/// Replaces every `stride`-th cell with `fill` (e.g. NaN or a nodata value).
pub fn punch_holes(data: &mut [f32], stride: usize, fill: f32) {
    if stride == 0 {
        return;
    }
    for value in data.iter_mut().step_by(stride) {
        *value = fill;
    }
}
