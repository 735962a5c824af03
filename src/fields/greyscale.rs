//! Greyscale field with discrete derivative helpers.
//!
//! The greyscale value of a pixel is the plain average of its R, G and B
//! channels scaled into [0, 1]. All other fields (gradient, Laplacian
//! zero-crossings, side samples) are derived from this one.

use ndarray::Array2;
use rayon::prelude::*;

/// Per-pixel greyscale intensity in [0, 1].
pub struct GreyscaleField {
    /// Row-major (height, width) intensity values.
    pub values: Array2<f32>,
}

impl GreyscaleField {
    /// Build the field from a flat RGBA buffer (4 bytes per pixel, row-major).
    ///
    /// # Arguments
    /// * `data` - RGBA pixel buffer of length `width * height * 4`
    /// * `width` - Image width
    /// * `height` - Image height
    pub fn from_rgba(data: &[u8], width: usize, height: usize) -> Self {
        let mut values = Array2::<f32>::zeros((height, width));
        if width == 0 || height == 0 {
            return Self { values };
        }

        let flat = values
            .as_slice_mut()
            .expect("freshly allocated Array2 is contiguous");
        flat.par_chunks_mut(width)
            .zip(data.par_chunks(width * 4))
            .for_each(|(dst_row, src_row)| {
                for (dst, px) in dst_row.iter_mut().zip(src_row.chunks_exact(4)) {
                    let sum = px[0] as f32 + px[1] as f32 + px[2] as f32;
                    *dst = sum / (3.0 * 255.0);
                }
            });

        Self { values }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[[y, x]]
    }

    /// Horizontal first difference, backward-differenced at the last column.
    #[inline]
    pub fn dx(&self, x: usize, y: usize) -> f32 {
        if self.width() < 2 {
            return 0.0;
        }
        let x = if x + 1 == self.width() { x - 1 } else { x };
        self.values[[y, x + 1]] - self.values[[y, x]]
    }

    /// Vertical first difference, backward-differenced at the last row.
    #[inline]
    pub fn dy(&self, x: usize, y: usize) -> f32 {
        if self.height() < 2 {
            return 0.0;
        }
        let y = if y + 1 == self.height() { y - 1 } else { y };
        self.values[[y + 1, x]] - self.values[[y, x]]
    }

    /// Euclidean norm of the two first differences.
    #[inline]
    pub fn grad_magnitude(&self, x: usize, y: usize) -> f32 {
        let dx = self.dx(x, y);
        let dy = self.dy(x, y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Discrete Laplacian-of-Gaussian 13-tap stencil.
    ///
    /// Valid only for interior pixels at least 2 rows/columns away from every
    /// edge; the ring weights sum to +16 against a -16 center, so a flat
    /// neighbourhood yields exactly 0.
    pub fn laplace(&self, x: usize, y: usize) -> f32 {
        let v = &self.values;
        let mut lap = -16.0 * v[[y, x]];
        lap += v[[y - 2, x]];
        lap += v[[y - 1, x - 1]] + 2.0 * v[[y - 1, x]] + v[[y - 1, x + 1]];
        lap += v[[y, x - 2]] + 2.0 * v[[y, x - 1]] + 2.0 * v[[y, x + 1]] + v[[y, x + 2]];
        lap += v[[y + 1, x - 1]] + 2.0 * v[[y + 1, x]] + v[[y + 1, x + 1]];
        lap += v[[y + 2, x]];
        lap
    }
}
