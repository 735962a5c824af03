//! Engine tuning knobs.
//!
//! All fields have working defaults, so a partial JSON document (or
//! `LiveWireOptions::default()`) is enough to configure the engine.

use serde::{Deserialize, Serialize};

/// Configuration recognized by [`crate::LiveWire`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveWireOptions {
    /// Maximum number of pixels finalized per `do_work` call.
    pub batch_size: usize,
    /// Bucket queue resolution: the queue holds `2^queue_bits` cost buckets.
    pub queue_bits: u32,
    /// Maximum number of path points gathered per training call. Paths
    /// shorter than this (but with at least 8 points) still train, with the
    /// gradient table blended toward a linear ramp to avoid over-fitting.
    pub training_length: usize,
    /// Offset in pixels at which the inside/outside fields sample the
    /// greyscale, perpendicular to the local gradient.
    pub side_offset: f32,
    /// Bucket count of the trained greyscale-edge lookup table.
    pub edge_granularity: usize,
    /// Bucket count of the trained gradient lookup table.
    pub grad_granularity: usize,
    /// Bucket count of the trained inside-sample lookup table.
    pub inside_granularity: usize,
    /// Bucket count of the trained outside-sample lookup table.
    pub outside_granularity: usize,
}

impl Default for LiveWireOptions {
    fn default() -> Self {
        Self {
            batch_size: 500,
            queue_bits: 8,
            training_length: 32,
            side_offset: 2.0,
            edge_granularity: 256,
            grad_granularity: 1024,
            inside_granularity: 256,
            outside_granularity: 256,
        }
    }
}
