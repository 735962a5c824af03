//! Error type for the engine's configuration boundary.
//!
//! Search, cost evaluation and training never fail once an image is loaded;
//! insufficient training data is a silent no-op. Only the setup calls
//! (`set_data`, `set_point`) can reject their input.

/// Reasons why engine setup may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiveWireError {
    /// `set_data` was called before `set_dimensions`.
    DimensionsNotSet,
    /// The supplied pixel buffer does not hold `width * height * 4` bytes.
    DataLengthMismatch { expected: usize, found: usize },
    /// `set_point` was called before any image data was loaded.
    NoImageData,
    /// The requested seed lies outside the image grid.
    SeedOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl std::fmt::Display for LiveWireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveWireError::DimensionsNotSet => {
                write!(f, "image dimensions must be set before supplying data")
            }
            LiveWireError::DataLengthMismatch { expected, found } => {
                write!(
                    f,
                    "pixel buffer length mismatch (expected {expected}, found {found})"
                )
            }
            LiveWireError::NoImageData => {
                write!(f, "no image data loaded; call set_data first")
            }
            LiveWireError::SeedOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "seed ({x}, {y}) outside image bounds {width}x{height}")
            }
        }
    }
}

impl std::error::Error for LiveWireError {}
