//! In-memory single-band raster with a per-pixel validity mask.

/// A decoded single-band grid.
///
/// Values are stored in row-major order (row 0 first). A pixel is valid when
/// its value is finite and differs from the declared nodata value.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<f32>,
    valid: Vec<bool>,
    nodata: Option<f64>,
}

impl Raster {
    /// Build a raster from row-major values, deriving the validity mask.
    ///
    /// Returns `None` when `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<f32>, nodata: Option<f64>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        let nodata_f32 = nodata.map(|v| v as f32);
        let valid = data
            .iter()
            .map(|&v| v.is_finite() && nodata_f32.map_or(true, |nd| v != nd))
            .collect();

        Some(Self {
            width,
            height,
            data,
            valid,
            nodata,
        })
    }

    /// Build a raster with an explicit validity mask.
    pub fn with_mask(width: usize, height: usize, data: Vec<f32>, valid: Vec<bool>) -> Option<Self> {
        if data.len() != width * height || valid.len() != data.len() {
            return None;
        }
        // Non-finite values are never valid, whatever the mask says
        let valid = data
            .iter()
            .zip(valid)
            .map(|(v, ok)| ok && v.is_finite())
            .collect();

        Some(Self {
            width,
            height,
            data,
            valid,
            nodata: None,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Declared nodata value, if the file carried one.
    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// Raw row-major values, invalid entries included.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Row-major validity mask.
    pub fn mask(&self) -> &[bool] {
        &self.valid
    }

    pub fn is_valid(&self, idx: usize) -> bool {
        self.valid.get(idx).copied().unwrap_or(false)
    }

    /// Value at (x, y), or `None` when out of bounds or invalid.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        self.valid[idx].then(|| self.data[idx])
    }

    /// Iterate over valid values only.
    pub fn valid_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data
            .iter()
            .zip(&self.valid)
            .filter_map(|(&v, &ok)| ok.then_some(v))
    }

    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&ok| ok).count()
    }

    /// Minimum and maximum over valid pixels, `None` if there are none.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.valid_values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodata_and_nan_are_invalid() {
        let raster = Raster::new(2, 2, vec![1.0, f32::NAN, -9999.0, 4.0], Some(-9999.0)).unwrap();
        assert_eq!(raster.mask(), &[true, false, false, true]);
        assert_eq!(raster.valid_count(), 2);
        assert_eq!(raster.value_range(), Some((1.0, 4.0)));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        assert!(Raster::new(3, 2, vec![0.0; 5], None).is_none());
        assert!(Raster::with_mask(2, 2, vec![0.0; 4], vec![true; 3]).is_none());
    }

    #[test]
    fn test_get_respects_mask() {
        let raster = Raster::with_mask(2, 1, vec![5.0, 6.0], vec![true, false]).unwrap();
        assert_eq!(raster.get(0, 0), Some(5.0));
        assert_eq!(raster.get(1, 0), None);
        assert_eq!(raster.get(2, 0), None);
    }

    #[test]
    fn test_all_invalid_has_no_range() {
        let raster = Raster::new(2, 1, vec![f32::NAN, f32::INFINITY], None).unwrap();
        assert_eq!(raster.value_range(), None);
    }
}
