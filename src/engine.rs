//! Incremental single-seed shortest-path search over the pixel grid.
//!
//! `LiveWire` owns the preprocessed fields, the cost model and one search
//! state at a time. A search is started by `set_point` and advanced in
//! bounded batches by `do_work`, so a caller can drive it from a frame or
//! timer tick and query the optimal path to any visited pixel in between.
//!
//! Everything is single-threaded and cooperative: `do_work` finalizes at most
//! `batch_size` pixels per call and there is no blocking inside a call.
//! Pausing (`set_working(false)`) preserves all accumulated state; only
//! `set_point` discards it.

use log::debug;
use ndarray::Array2;

use crate::cost::CostModel;
use crate::error::LiveWireError;
use crate::fields::FieldSet;
use crate::options::LiveWireOptions;
use crate::point::Point;
use crate::queue::BucketQueue;

/// 8-neighborhood offsets, scanned in a fixed order for determinism.
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A pixel finalized by `do_work`, paired with its parent on the optimal
/// path (None for the seed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TracedPoint {
    pub point: Point,
    pub parent: Option<Point>,
}

/// Mutable search state, re-created on every new seed.
struct SearchState {
    seed: Point,
    visited: Array2<bool>,
    cost: Array2<f32>,
    parents: Array2<Option<Point>>,
    queue: BucketQueue,
}

impl SearchState {
    fn new(seed: Point, width: usize, height: usize, queue_bits: u32) -> Self {
        let mut state = Self {
            seed,
            visited: Array2::from_elem((height, width), false),
            cost: Array2::from_elem((height, width), f32::MAX),
            parents: Array2::from_elem((height, width), None),
            queue: BucketQueue::new(queue_bits),
        };
        state.cost[[seed.y, seed.x]] = 0.0;
        state.queue.push(seed, 0.0);
        state
    }
}

/// Interactive boundary-tracing engine.
pub struct LiveWire {
    options: LiveWireOptions,
    dimensions: Option<(usize, usize)>,
    fields: Option<FieldSet>,
    cost_model: CostModel,
    state: Option<SearchState>,
    working: bool,
}

impl Default for LiveWire {
    fn default() -> Self {
        Self::new(LiveWireOptions::default())
    }
}

impl LiveWire {
    pub fn new(options: LiveWireOptions) -> Self {
        let cost_model = CostModel::new(&options);
        Self {
            options,
            dimensions: None,
            fields: None,
            cost_model,
            state: None,
            working: false,
        }
    }

    /// Declare the image dimensions. Invalidates previously loaded data and
    /// any running search.
    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.dimensions = Some((width, height));
        self.fields = None;
        self.state = None;
        self.working = false;
    }

    /// Load a flat RGBA pixel buffer and preprocess it into the field set.
    ///
    /// Dimensions must have been set first and the buffer must hold exactly
    /// `width * height * 4` bytes. Replacing the image discards the running
    /// search and resets the trainer: training statistics are image-specific.
    pub fn set_data(&mut self, data: &[u8]) -> Result<(), LiveWireError> {
        let (width, height) = self.dimensions.ok_or(LiveWireError::DimensionsNotSet)?;
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(LiveWireError::DataLengthMismatch {
                expected,
                found: data.len(),
            });
        }

        self.fields = Some(FieldSet::build(
            data,
            width,
            height,
            self.options.side_offset,
        ));
        self.cost_model = CostModel::new(&self.options);
        self.state = None;
        self.working = false;
        debug!("image loaded: {width}x{height}, fields preprocessed");
        Ok(())
    }

    /// Start a new search from `seed`, discarding any previous search state,
    /// and enable processing.
    pub fn set_point(&mut self, seed: Point) -> Result<(), LiveWireError> {
        let fields = self.fields.as_ref().ok_or(LiveWireError::NoImageData)?;
        let (width, height) = (fields.width(), fields.height());
        if seed.x >= width || seed.y >= height {
            return Err(LiveWireError::SeedOutOfBounds {
                x: seed.x,
                y: seed.y,
                width,
                height,
            });
        }

        self.state = Some(SearchState::new(seed, width, height, self.options.queue_bits));
        self.working = true;
        debug!("search reset, seed at ({}, {})", seed.x, seed.y);
        Ok(())
    }

    /// Pause or resume processing. Pausing preserves all accumulated state;
    /// `do_work` is a no-op until re-enabled.
    pub fn set_working(&mut self, working: bool) {
        self.working = working;
    }

    #[inline]
    pub fn working(&self) -> bool {
        self.working
    }

    /// The seed of the current search, if one is active.
    pub fn seed(&self) -> Option<Point> {
        self.state.as_ref().map(|s| s.seed)
    }

    /// Expand the search by up to `batch_size` pixels.
    ///
    /// Pops the cheapest pending pixel, finalizes it and relaxes its
    /// 8-neighborhood; a neighbor whose cost drops is re-queued via
    /// remove-then-push. Returns the batch of newly finalized pixels with
    /// their parents so the caller can render progress incrementally.
    /// Returns an empty batch when paused, before any seed is set, or once
    /// the whole grid has been visited.
    pub fn do_work(&mut self) -> Vec<TracedPoint> {
        if !self.working {
            return Vec::new();
        }
        let fields = match self.fields.as_ref() {
            Some(fields) => fields,
            None => return Vec::new(),
        };
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return Vec::new(),
        };

        let (height, width) = state.visited.dim();
        let mut batch = Vec::new();
        while batch.len() < self.options.batch_size {
            let p = match state.queue.pop() {
                Some(p) => p,
                None => break,
            };
            state.visited[[p.y, p.x]] = true;
            batch.push(TracedPoint {
                point: p,
                parent: state.parents[[p.y, p.x]],
            });

            for (dx, dy) in NEIGHBOURS {
                let qx = p.x as i32 + dx;
                let qy = p.y as i32 + dy;
                if qx < 0 || qy < 0 || qx >= width as i32 || qy >= height as i32 {
                    continue;
                }
                let q = Point::new(qx as usize, qy as usize);
                if state.visited[[q.y, q.x]] {
                    continue;
                }

                let candidate = state.cost[[p.y, p.x]] + self.cost_model.dist(fields, p, q);
                let current = state.cost[[q.y, q.x]];
                if candidate < current {
                    if current != f32::MAX {
                        // Pending at a stale cost: pull it out before the
                        // cost matrix changes under it.
                        state.queue.remove(q, current);
                    }
                    state.cost[[q.y, q.x]] = candidate;
                    state.parents[[q.y, q.x]] = Some(p);
                    state.queue.push(q, candidate);
                }
            }
        }

        if !batch.is_empty() {
            debug!(
                "finalized {} pixels, {} pending",
                batch.len(),
                state.queue.len()
            );
        }
        batch
    }

    /// Reconstruct the optimal path from `target` back to the seed by
    /// walking parent pointers. Returned seed-first; empty if `target` has
    /// not been visited yet (or no search is active).
    pub fn path_to(&self, target: Point) -> Vec<Point> {
        let state = match self.state.as_ref() {
            Some(state) => state,
            None => return Vec::new(),
        };
        let (height, width) = state.visited.dim();
        if target.x >= width || target.y >= height || !state.visited[[target.y, target.x]] {
            return Vec::new();
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = state.parents[[current.y, current.x]] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Teach the cost function from a committed path ending at `end`.
    ///
    /// Walks parent pointers from `end` toward the seed, gathering up to
    /// `training_length` points. Does nothing unless `end` has been
    /// finalized by the search; paths shorter than 8 points are ignored by
    /// the trainer (best-effort, never destabilizes a prior trained state).
    pub fn train(&mut self, end: Point) {
        let fields = match self.fields.as_ref() {
            Some(fields) => fields,
            None => return,
        };
        let state = match self.state.as_ref() {
            Some(state) => state,
            None => return,
        };
        let (height, width) = state.visited.dim();
        if end.x >= width || end.y >= height || !state.visited[[end.y, end.x]] {
            debug!("training skipped: end point not finalized");
            return;
        }

        let mut points = Vec::with_capacity(self.options.training_length);
        let mut current = end;
        points.push(current);
        while points.len() < self.options.training_length {
            match state.parents[[current.y, current.x]] {
                Some(parent) => {
                    points.push(parent);
                    current = parent;
                }
                None => break,
            }
        }

        self.cost_model.train(&points, fields);
    }

    /// Whether the trained cost weighting is active.
    pub fn trained(&self) -> bool {
        self.cost_model.trained()
    }

    /// Whether a pixel has been finalized by the current search.
    pub fn is_visited(&self, p: Point) -> bool {
        self.state
            .as_ref()
            .map(|s| s.visited[[p.y, p.x]])
            .unwrap_or(false)
    }

    /// Final path cost of a pixel, once it has been visited.
    pub fn cost_at(&self, p: Point) -> Option<f32> {
        let state = self.state.as_ref()?;
        state.visited[[p.y, p.x]].then(|| state.cost[[p.y, p.x]])
    }

    /// Parent of a pixel on its optimal path, once it has been visited.
    pub fn parent_of(&self, p: Point) -> Option<Point> {
        let state = self.state.as_ref()?;
        if state.visited[[p.y, p.x]] {
            state.parents[[p.y, p.x]]
        } else {
            None
        }
    }

    /// Traversal cost between two 8-adjacent pixels under the current
    /// (trained or untrained) weighting. Diagnostic probe; `None` before an
    /// image is loaded.
    pub fn edge_cost(&self, p: Point, q: Point) -> Option<f32> {
        let fields = self.fields.as_ref()?;
        Some(self.cost_model.dist(fields, p, q))
    }
}
