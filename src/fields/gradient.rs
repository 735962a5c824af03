//! Gradient field: raw first differences plus an inverted magnitude map.
//!
//! The cost function wants *low* values where the image has *strong* edges,
//! so the magnitude map is normalized by the image-wide maximum and inverted:
//! 0.0 marks the strongest edge in the image, 1.0 a perfectly flat area.

use ndarray::Array2;

use super::greyscale::GreyscaleField;

/// Divisor floor for the per-pixel unit vector; keeps flat pixels from
/// producing NaN directions.
const UNIT_EPSILON: f32 = 1e-10;

/// First differences and normalized magnitude of the greyscale field.
pub struct GradientField {
    /// Horizontal first difference per pixel.
    pub gx: Array2<f32>,
    /// Vertical first difference per pixel.
    pub gy: Array2<f32>,
    /// Inverted, max-normalized magnitude in [0, 1]; 0 = strongest edge.
    pub inverted: Array2<f32>,
}

impl GradientField {
    /// Derive the gradient field from a greyscale field.
    ///
    /// The magnitude is computed for all but the last row/column, which are
    /// padded by replicating the penultimate ones, then divided by the global
    /// maximum and inverted. An image with no gradient anywhere (maximum 0)
    /// maps entirely to 1.0: no edge is cheap to cross.
    pub fn build(grey: &GreyscaleField) -> Self {
        let (h, w) = (grey.height(), grey.width());
        let mut gx = Array2::<f32>::zeros((h, w));
        let mut gy = Array2::<f32>::zeros((h, w));
        let mut mag = Array2::<f32>::zeros((h, w));
        let mut max = 0.0f32;

        for y in 0..h {
            for x in 0..w {
                gx[[y, x]] = grey.dx(x, y);
                gy[[y, x]] = grey.dy(x, y);
            }
        }
        for y in 0..h.saturating_sub(1) {
            for x in 0..w.saturating_sub(1) {
                let m = grey.grad_magnitude(x, y);
                mag[[y, x]] = m;
                max = max.max(m);
            }
        }
        // Replicate the penultimate column/row into the border.
        if w > 1 {
            for y in 0..h {
                mag[[y, w - 1]] = mag[[y, w - 2]];
            }
        }
        if h > 1 {
            for x in 0..w {
                mag[[h - 1, x]] = mag[[h - 2, x]];
            }
        }

        let inverted = if max > 0.0 {
            mag.mapv(|m| 1.0 - m / max)
        } else {
            Array2::from_elem((h, w), 1.0)
        };

        Self { gx, gy, inverted }
    }

    /// Unit gradient vector at a pixel, with an epsilon-floored divisor.
    #[inline]
    pub fn unit_vector(&self, x: usize, y: usize) -> (f32, f32) {
        let ox = self.gx[[y, x]];
        let oy = self.gy[[y, x]];
        let norm = (ox * ox + oy * oy).sqrt().max(UNIT_EPSILON);
        (ox / norm, oy / norm)
    }
}
