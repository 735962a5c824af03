//! Binary Laplacian zero-crossing field.
//!
//! Pixels near a zero-crossing of the second derivative score 0 (cheap to
//! cross for the cost function); everything else scores 1. The 2-pixel
//! border, where the 13-tap stencil cannot be evaluated, is forced to 1.

use ndarray::Array2;

use super::greyscale::GreyscaleField;

/// Stencil responses above this value are treated as non-crossings.
const ZERO_CROSSING_THRESHOLD: f32 = 0.33;

/// Binary (0.0 / 1.0) zero-crossing map.
pub struct LaplaceField {
    pub values: Array2<f32>,
}

impl LaplaceField {
    /// Threshold the Laplacian stencil over the interior of the image.
    pub fn build(grey: &GreyscaleField) -> Self {
        let (h, w) = (grey.height(), grey.width());
        let mut values = Array2::<f32>::from_elem((h, w), 1.0);

        for y in 2..h.saturating_sub(2) {
            for x in 2..w.saturating_sub(2) {
                values[[y, x]] = if grey.laplace(x, y) > ZERO_CROSSING_THRESHOLD {
                    1.0
                } else {
                    0.0
                };
            }
        }

        Self { values }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[[y, x]]
    }
}
