//! Approximate min-priority queue over integer-quantized costs.
//!
//! Costs are quantized into `2^bits` FIFO buckets; `pop` scans forward from
//! the last dequeued bucket, wrapping around. As long as the costs of pending
//! items never spread over more than one full rotation (guaranteed upstream
//! by clamping edge costs to [0, 1]), the scan returns items in
//! near-non-decreasing cost order with amortized O(1) operations.
//!
//! The queue stores no costs of its own: callers pass the item's current cost
//! from the live cost matrix on every `push`/`remove`, so decreasing a cost is
//! simply `remove` (at the old cost), update, `push` (at the new one).

use std::collections::VecDeque;

use crate::point::Point;

/// Rotating bucket queue with FIFO tie-breaking.
pub struct BucketQueue {
    buckets: Vec<VecDeque<Point>>,
    mask: usize,
    cursor: usize,
    len: usize,
}

impl BucketQueue {
    /// Create a queue with `2^bits` buckets.
    pub fn new(bits: u32) -> Self {
        let count = 1usize << bits;
        Self {
            buckets: vec![VecDeque::new(); count],
            mask: count - 1,
            cursor: 0,
            len: 0,
        }
    }

    #[inline]
    fn bucket_for(&self, cost: f32) -> usize {
        // Careful rounding: a cost of exactly 1.0 wraps to bucket 0.
        (self.buckets.len() as f32 * cost).round() as usize & self.mask
    }

    /// Append `item` to the bucket matching `cost` (FIFO within the bucket).
    pub fn push(&mut self, item: Point, cost: f32) {
        let bucket = self.bucket_for(cost);
        self.buckets[bucket].push_back(item);
        self.len += 1;
    }

    /// Remove and return the item in the lowest non-empty bucket reachable by
    /// scanning forward from the last dequeued bucket. `None` when empty.
    pub fn pop(&mut self) -> Option<Point> {
        if self.len == 0 {
            return None;
        }
        while self.buckets[self.cursor].is_empty() {
            self.cursor = (self.cursor + 1) & self.mask;
        }
        self.len -= 1;
        self.buckets[self.cursor].pop_front()
    }

    /// Remove a previously pushed item, located via its current `cost`.
    ///
    /// Removing an item that is not pending is a no-op returning `false`;
    /// the bucket lists are left untouched.
    pub fn remove(&mut self, item: Point, cost: f32) -> bool {
        let bucket = self.bucket_for(cost);
        if let Some(pos) = self.buckets[bucket].iter().position(|&p| p == item) {
            self.buckets[bucket].remove(pos);
            self.len -= 1;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
}
