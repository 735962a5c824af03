//! Live-wire (intelligent scissors) boundary-tracing engine.
//!
//! Given a raster RGBA image and a user-chosen seed pixel, the engine
//! computes minimum-cost paths from the seed to every pixel using an
//! adaptive edge-cost function — incrementally and interruptibly, so a
//! caller can preview the optimal path to the cursor at any time and can
//! teach the cost function from paths the user commits to.
//!
//! ## Image Format
//!
//! Input is a flat RGBA buffer (4 bytes per pixel, 0-255, row-major) plus
//! explicit width/height. The buffer is consumed once per image by the field
//! preprocessor; the engine never touches presentation concerns.
//!
//! ## Architecture
//!
//! - [`fields`] - per-image preprocessing: greyscale, gradient, Laplacian
//!   zero-crossings and side samples, built once per `set_data`
//! - [`queue`] - approximate bucket priority queue driving the search
//! - [`cost`] - static and trainable traversal cost between adjacent pixels
//! - [`engine`] - resumable Dijkstra-style expansion in bounded batches
//!
//! ## Typical session
//!
//! ```
//! use livewire::{LiveWire, Point};
//!
//! let mut engine = LiveWire::default();
//! engine.set_dimensions(8, 8);
//! engine.set_data(&vec![200u8; 8 * 8 * 4])?;
//! engine.set_point(Point::new(0, 0))?;
//!
//! // Drive the search from a timer/frame tick; each call is bounded.
//! while !engine.do_work().is_empty() {}
//!
//! // Preview the optimal path to the cursor position.
//! let path = engine.path_to(Point::new(7, 7));
//! assert_eq!(path.first(), Some(&Point::new(0, 0)));
//!
//! // Commit the path and adapt the cost function to the image.
//! engine.train(Point::new(7, 7));
//! # Ok::<(), livewire::LiveWireError>(())
//! ```

pub mod cost;
pub mod engine;
pub mod error;
pub mod fields;
pub mod options;
pub mod point;
pub mod queue;

pub use cost::{CostModel, TrainingTables};
pub use engine::{LiveWire, TracedPoint};
pub use error::LiveWireError;
pub use fields::FieldSet;
pub use options::LiveWireOptions;
pub use point::Point;
pub use queue::BucketQueue;
