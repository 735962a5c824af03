//! Inside/outside greyscale samples taken perpendicular to the gradient.
//!
//! For each pixel the greyscale field is probed a fixed distance to either
//! side of the local edge direction. The trainer uses the two probes to learn
//! which intensities lie just inside and just outside a committed boundary.

use ndarray::Array2;

use super::gradient::GradientField;
use super::greyscale::GreyscaleField;

/// Greyscale values sampled on both sides of the local edge.
pub struct SideSamples {
    pub inside: Array2<f32>,
    pub outside: Array2<f32>,
}

impl SideSamples {
    /// Sample the greyscale field at `offset` pixels perpendicular to the
    /// gradient unit vector, rounding to the nearest pixel and clamping to
    /// the image bounds.
    pub fn build(grey: &GreyscaleField, gradient: &GradientField, offset: f32) -> Self {
        let (h, w) = (grey.height(), grey.width());
        let mut inside = Array2::<f32>::zeros((h, w));
        let mut outside = Array2::<f32>::zeros((h, w));
        if w == 0 || h == 0 {
            return Self { inside, outside };
        }

        for y in 0..h {
            for x in 0..w {
                let (ux, uy) = gradient.unit_vector(x, y);
                inside[[y, x]] = sample(grey, x as f32 + offset * uy, y as f32 - offset * ux);
                outside[[y, x]] = sample(grey, x as f32 - offset * uy, y as f32 + offset * ux);
            }
        }

        Self { inside, outside }
    }
}

/// Nearest-pixel lookup with clamping.
#[inline]
fn sample(grey: &GreyscaleField, fx: f32, fy: f32) -> f32 {
    let x = fx.round().clamp(0.0, (grey.width() - 1) as f32) as usize;
    let y = fy.round().clamp(0.0, (grey.height() - 1) as f32) as usize;
    grey.get(x, y)
}
