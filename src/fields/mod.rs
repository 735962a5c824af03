//! Image preprocessing: every field the cost function reads, built once per
//! loaded image.
//!
//! - **Greyscale**: channel average with derivative helpers
//! - **Gradient**: raw first differences + inverted normalized magnitude
//! - **Laplace**: binary zero-crossing map
//! - **Sides**: greyscale probes perpendicular to the local gradient
//!
//! Building a `FieldSet` is a pure function of the pixel buffer; nothing here
//! is mutated afterwards.

pub mod gradient;
pub mod greyscale;
pub mod laplace;
pub mod sides;

pub use gradient::GradientField;
pub use greyscale::GreyscaleField;
pub use laplace::LaplaceField;
pub use sides::SideSamples;

/// All derived fields for one loaded image.
pub struct FieldSet {
    pub greyscale: GreyscaleField,
    pub gradient: GradientField,
    pub laplace: LaplaceField,
    pub sides: SideSamples,
}

impl FieldSet {
    /// Preprocess a flat RGBA buffer into the full field set.
    ///
    /// # Arguments
    /// * `data` - RGBA pixel buffer of length `width * height * 4`
    /// * `width` - Image width
    /// * `height` - Image height
    /// * `side_offset` - Perpendicular probe distance for the side samples
    pub fn build(data: &[u8], width: usize, height: usize, side_offset: f32) -> Self {
        let greyscale = GreyscaleField::from_rgba(data, width, height);
        let gradient = GradientField::build(&greyscale);
        let laplace = LaplaceField::build(&greyscale);
        let sides = SideSamples::build(&greyscale, &gradient, side_offset);
        Self {
            greyscale,
            gradient,
            laplace,
            sides,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.greyscale.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.greyscale.height()
    }
}
