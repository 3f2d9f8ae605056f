//! Trailing rolling statistics.

/// Trailing mean over `window` samples.
///
/// Position `i` averages samples `i + 1 - window ..= i`. It is `None` until
/// a full window is available and whenever any sample in the window is
/// missing, so a single gap blanks the next `window` outputs.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let sum = slice.iter().try_fold(0.0, |acc, v| v.map(|v| acc + v))?;
            Some(sum / window as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_of_three() {
        let values: Vec<Option<f64>> = [1.0, 2.0, 3.0, 4.0].iter().map(|&v| Some(v)).collect();
        assert_eq!(rolling_mean(&values, 3), vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_gap_blanks_covering_windows() {
        let values = vec![Some(1.0), Some(1.0), None, Some(1.0), Some(1.0), Some(1.0)];
        assert_eq!(
            rolling_mean(&values, 2),
            vec![None, Some(1.0), None, None, Some(1.0), Some(1.0)]
        );
    }

    #[test]
    fn test_window_longer_than_series() {
        assert_eq!(rolling_mean(&[Some(1.0), Some(2.0)], 31), vec![None, None]);
    }

    #[test]
    fn test_zero_window() {
        assert_eq!(rolling_mean(&[Some(1.0)], 0), vec![None]);
    }
}
