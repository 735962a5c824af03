//! Adaptive traversal cost between adjacent pixels.
//!
//! The static cost blends three factors, each kept in [0, 1]:
//! gradient magnitude (inverted: strong edges are cheap), Laplacian
//! zero-crossings and gradient direction. Once the model has been trained
//! from a committed path, four lookup tables reweight the blend so that
//! feature values seen on the path become cheap on subsequent searches.
//!
//! Every `dist` output lies in [0, 1]. This is a hard precondition of the
//! bucket queue's rotating scan and must be preserved by any new factor.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

use log::debug;

use crate::fields::FieldSet;
use crate::options::LiveWireOptions;
use crate::point::Point;

/// Paths with fewer points than this do not train at all.
const MIN_TRAINING_POINTS: usize = 8;

/// Scale putting the direction factor into [0, 1].
const DIRECTION_SCALE: f32 = 2.0 / (3.0 * PI);

/// Untrained blend weights.
const GRADIENT_WEIGHT: f32 = 0.43;
const LAPLACE_WEIGHT: f32 = 0.43;
const DIRECTION_WEIGHT: f32 = 0.11;

/// Trained blend weights.
const TRAINED_GRADIENT_WEIGHT: f32 = 0.3;
const TRAINED_LAPLACE_WEIGHT: f32 = 0.3;
const TRAINED_REMAINDER_WEIGHT: f32 = 0.1;

/// Learned lookup tables, one per feature.
///
/// Each table maps a quantized raw feature value in [0, 1] to a trained
/// weight in [0, 1]; low weights mark values frequently seen on committed
/// paths. Tables are rebuilt from scratch on every successful training call.
pub struct TrainingTables {
    pub edge: Vec<f32>,
    pub gradient: Vec<f32>,
    pub inside: Vec<f32>,
    pub outside: Vec<f32>,
}

impl TrainingTables {
    fn untrained(options: &LiveWireOptions) -> Self {
        Self {
            edge: vec![1.0; options.edge_granularity],
            gradient: vec![1.0; options.grad_granularity],
            inside: vec![1.0; options.inside_granularity],
            outside: vec![1.0; options.outside_granularity],
        }
    }
}

/// The cost function, static by default and adaptive once trained.
pub struct CostModel {
    tables: TrainingTables,
    trained: bool,
    training_length: usize,
}

impl CostModel {
    pub fn new(options: &LiveWireOptions) -> Self {
        Self {
            tables: TrainingTables::untrained(options),
            trained: false,
            training_length: options.training_length,
        }
    }

    /// Whether the trained weighting is active.
    #[inline]
    pub fn trained(&self) -> bool {
        self.trained
    }

    pub fn tables(&self) -> &TrainingTables {
        &self.tables
    }

    /// Traversal cost from `p` to an 8-adjacent `q`, in [0, 1].
    ///
    /// The gradient factor is scaled by √½ for *axis-aligned* steps: diagonal
    /// steps are already geometrically longer and get no extra penalty.
    pub fn dist(&self, fields: &FieldSet, p: Point, q: Point) -> f32 {
        let mut grad = fields.gradient.inverted[[q.y, q.x]];
        if !p.is_diagonal_to(&q) {
            grad *= FRAC_1_SQRT_2;
        }
        let lap = fields.laplace.get(q.x, q.y);
        let dir = direction(fields, p, q);

        if self.trained {
            let grad_t = lookup(&self.tables.gradient, grad);
            let edge_t = lookup(&self.tables.edge, fields.greyscale.get(p.x, p.y));
            let inside_t = lookup(&self.tables.inside, fields.sides.inside[[p.y, p.x]]);
            let outside_t = lookup(&self.tables.outside, fields.sides.outside[[p.y, p.x]]);
            TRAINED_GRADIENT_WEIGHT * grad_t
                + TRAINED_LAPLACE_WEIGHT * lap
                + TRAINED_REMAINDER_WEIGHT * (dir + edge_t + inside_t + outside_t)
        } else {
            GRADIENT_WEIGHT * grad + LAPLACE_WEIGHT * lap + DIRECTION_WEIGHT * dir
        }
    }

    /// Rebuild the lookup tables from a committed path.
    ///
    /// Paths shorter than 8 points are ignored (tables and trained state
    /// untouched). With 8 or more points all four tables are rebuilt; until
    /// `training_length` points are available the gradient table is blended
    /// toward a linear ramp so a short path cannot dominate it.
    pub fn train(&mut self, points: &[Point], fields: &FieldSet) {
        if points.len() < MIN_TRAINING_POINTS {
            debug!(
                "training skipped: {} points (< {MIN_TRAINING_POINTS})",
                points.len()
            );
            return;
        }

        self.tables.edge = trained_table(points, self.tables.edge.len(), |p| {
            fields.greyscale.get(p.x, p.y)
        });
        self.tables.gradient = trained_table(points, self.tables.gradient.len(), |p| {
            fields.gradient.inverted[[p.y, p.x]]
        });
        self.tables.inside = trained_table(points, self.tables.inside.len(), |p| {
            fields.sides.inside[[p.y, p.x]]
        });
        self.tables.outside = trained_table(points, self.tables.outside.len(), |p| {
            fields.sides.outside[[p.y, p.x]]
        });

        if points.len() < self.training_length {
            blend_static_gradient(&mut self.tables.gradient, points.len(), self.training_length);
        }

        self.trained = true;
        debug!("trained cost model from {} path points", points.len());
    }
}

/// Direction factor: how well the step p→q follows the local edge.
///
/// `dp`/`dq` are the cross products of the unit gradients at p and q with the
/// step vector, sign-normalized so `dp >= 0`, scaled by √½ for diagonal steps
/// so both stay within acos range.
fn direction(fields: &FieldSet, p: Point, q: Point) -> f32 {
    let (pux, puy) = fields.gradient.unit_vector(p.x, p.y);
    let (qux, quy) = fields.gradient.unit_vector(q.x, q.y);
    let dx = q.x as f32 - p.x as f32;
    let dy = q.y as f32 - p.y as f32;

    let mut dp = puy * dx - pux * dy;
    let mut dq = quy * dx - qux * dy;
    if dp < 0.0 {
        dp = -dp;
        dq = -dq;
    }
    if p.is_diagonal_to(&q) {
        dp *= FRAC_1_SQRT_2;
        dq *= FRAC_1_SQRT_2;
    }

    DIRECTION_SCALE * (dp.clamp(-1.0, 1.0).acos() + dq.clamp(-1.0, 1.0).acos())
}

/// Quantized table lookup for a feature value in [0, 1].
#[inline]
fn lookup(table: &[f32], value: f32) -> f32 {
    let last = table.len() - 1;
    let idx = (value * last as f32).round() as usize;
    table[idx.min(last)]
}

/// Histogram the feature over the path, invert/scale by the histogram's own
/// maximum and smooth, so frequent values map to low trained cost.
fn trained_table<F>(points: &[Point], granularity: usize, feature: F) -> Vec<f32>
where
    F: Fn(Point) -> f32,
{
    let last = granularity - 1;
    let mut histogram = vec![0.0f32; granularity];
    for &p in points {
        let idx = (feature(p) * last as f32).round() as usize;
        histogram[idx.min(last)] += 1.0;
    }

    let max = histogram.iter().fold(1.0f32, |m, &v| m.max(v));
    for v in histogram.iter_mut() {
        *v = 1.0 - *v / max;
    }

    smooth(&histogram)
}

/// Five-tap smoothing kernel [0.05, 0.25, 0.4, 0.25, 0.05] with truncated
/// asymmetric variants at the two first/last buckets. Every variant sums to 1.
fn smooth(buffer: &[f32]) -> Vec<f32> {
    let n = buffer.len();
    if n < 5 {
        return buffer.to_vec();
    }
    let mut out = vec![0.0f32; n];
    out[0] = 0.4 * buffer[0] + 0.5 * buffer[1] + 0.1 * buffer[2];
    out[1] = 0.25 * buffer[0] + 0.4 * buffer[1] + 0.25 * buffer[2] + 0.1 * buffer[3];
    for i in 2..n - 2 {
        out[i] = 0.05 * buffer[i - 2]
            + 0.25 * buffer[i - 1]
            + 0.4 * buffer[i]
            + 0.25 * buffer[i + 1]
            + 0.05 * buffer[i + 2];
    }
    out[n - 2] =
        0.1 * buffer[n - 4] + 0.25 * buffer[n - 3] + 0.4 * buffer[n - 2] + 0.25 * buffer[n - 1];
    out[n - 1] = 0.1 * buffer[n - 3] + 0.5 * buffer[n - 2] + 0.4 * buffer[n - 1];
    out
}

/// Blend a freshly trained gradient table toward the linear ramp, weighted by
/// how far the path fell short of `needed` points.
fn blend_static_gradient(table: &mut [f32], points: usize, needed: usize) {
    let s = points as f32 / needed as f32;
    let last = (table.len() - 1) as f32;
    for (i, v) in table.iter_mut().enumerate() {
        let ramp = 1.0 - s + s * i as f32 / last;
        *v = v.min(ramp);
    }
}
