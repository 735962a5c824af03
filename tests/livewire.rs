//! End-to-end scenarios for the live-wire engine on synthetic images.

use livewire::{LiveWire, LiveWireOptions, Point, TracedPoint};

/// 8x8 RGBA image with a strong vertical intensity edge at column 4.
fn vertical_edge_image() -> Vec<u8> {
    let mut data = vec![0u8; 8 * 8 * 4];
    for y in 0..8 {
        for x in 0..8 {
            let v = if x < 4 { 30u8 } else { 220 };
            let idx = (y * 8 + x) * 4;
            data[idx] = v;
            data[idx + 1] = v;
            data[idx + 2] = v;
            data[idx + 3] = 255;
        }
    }
    data
}

fn engine_with_edge(options: LiveWireOptions) -> LiveWire {
    let mut engine = LiveWire::new(options);
    engine.set_dimensions(8, 8);
    engine.set_data(&vertical_edge_image()).unwrap();
    engine
}

/// Run `do_work` to exhaustion, returning every finalized point in order.
fn run_to_completion(engine: &mut LiveWire) -> Vec<TracedPoint> {
    let mut all = Vec::new();
    loop {
        let batch = engine.do_work();
        if batch.is_empty() {
            break;
        }
        all.extend(batch);
    }
    all
}

#[test]
fn flat_batch_termination_and_coverage() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine = engine_with_edge(LiveWireOptions::default());
    engine.set_point(Point::new(0, 0)).unwrap();

    let all = run_to_completion(&mut engine);

    // Every pixel visited exactly once.
    assert_eq!(all.len(), 64);
    let mut seen = vec![false; 64];
    for traced in &all {
        let idx = traced.point.y * 8 + traced.point.x;
        assert!(!seen[idx], "pixel {:?} finalized twice", traced.point);
        seen[idx] = true;
    }
    assert!(seen.iter().all(|&v| v));

    // Cost floor: non-negative everywhere, zero at the seed.
    assert_eq!(engine.cost_at(Point::new(0, 0)), Some(0.0));
    for traced in &all {
        assert!(engine.cost_at(traced.point).unwrap() >= 0.0);
    }

    // The reconstructed path has strictly non-decreasing cumulative cost.
    let path = engine.path_to(Point::new(7, 0));
    assert!(!path.is_empty());
    assert_eq!(path[0], Point::new(0, 0));
    assert_eq!(*path.last().unwrap(), Point::new(7, 0));
    for pair in path.windows(2) {
        let a = engine.cost_at(pair[0]).unwrap();
        let b = engine.cost_at(pair[1]).unwrap();
        assert!(b >= a, "cost decreased along the path: {b} < {a}");
    }
}

#[test]
fn parent_chains_terminate_at_the_seed_without_cycles() {
    let mut engine = engine_with_edge(LiveWireOptions::default());
    engine.set_point(Point::new(3, 3)).unwrap();
    run_to_completion(&mut engine);

    for y in 0..8 {
        for x in 0..8 {
            let mut current = Point::new(x, y);
            let mut steps = 0;
            while let Some(parent) = engine.parent_of(current) {
                current = parent;
                steps += 1;
                assert!(steps <= 64, "cycle in parent chain from ({x}, {y})");
            }
            assert_eq!(current, Point::new(3, 3));
        }
    }
}

#[test]
fn finalized_costs_are_locally_optimal() {
    let mut engine = engine_with_edge(LiveWireOptions::default());
    engine.set_point(Point::new(0, 0)).unwrap();
    run_to_completion(&mut engine);

    // Bucket quantization permits ordering errors up to one bucket width on
    // either side of a pop; with the default 256 buckets that bounds any
    // optimality slack to 2/256.
    let slack = 2.0 / 256.0 + 1e-5;
    for y in 0..8i32 {
        for x in 0..8i32 {
            let p = Point::new(x as usize, y as usize);
            let cp = engine.cost_at(p).unwrap();
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (qx, qy) = (x + dx, y + dy);
                    if !(0..8).contains(&qx) || !(0..8).contains(&qy) {
                        continue;
                    }
                    let q = Point::new(qx as usize, qy as usize);
                    let cq = engine.cost_at(q).unwrap();
                    let d = engine.edge_cost(q, p).unwrap();
                    assert!(
                        cp <= cq + d + slack,
                        "cost[{p:?}]={cp} exceeds cost[{q:?}]={cq} + dist={d}"
                    );
                }
            }
        }
    }
}

#[test]
fn identical_runs_are_deterministic() {
    let run = || {
        let mut engine = engine_with_edge(LiveWireOptions {
            batch_size: 7,
            ..Default::default()
        });
        engine.set_point(Point::new(2, 5)).unwrap();
        let all = run_to_completion(&mut engine);
        (all, engine)
    };

    let (batches_a, engine_a) = run();
    let (batches_b, engine_b) = run();

    assert_eq!(batches_a, batches_b);
    for y in 0..8 {
        for x in 0..8 {
            let p = Point::new(x, y);
            assert_eq!(engine_a.cost_at(p), engine_b.cost_at(p));
            assert_eq!(engine_a.parent_of(p), engine_b.parent_of(p));
        }
    }
}

#[test]
fn pause_preserves_state_and_resume_matches_uninterrupted_run() {
    let _ = env_logger::builder().is_test(true).try_init();
    let options = LiveWireOptions {
        batch_size: 9,
        ..Default::default()
    };

    // Reference: uninterrupted run.
    let mut reference = engine_with_edge(options.clone());
    reference.set_point(Point::new(0, 0)).unwrap();
    run_to_completion(&mut reference);

    // Interrupted run: pause after the first batch.
    let mut engine = engine_with_edge(options);
    engine.set_point(Point::new(0, 0)).unwrap();
    let first = engine.do_work();
    assert_eq!(first.len(), 9);

    engine.set_working(false);
    let snapshot: Vec<(Option<f32>, Option<Point>, bool)> = (0..64)
        .map(|i| {
            let p = Point::new(i % 8, i / 8);
            (engine.cost_at(p), engine.parent_of(p), engine.is_visited(p))
        })
        .collect();

    // While paused, do_work must not touch anything.
    for _ in 0..3 {
        assert!(engine.do_work().is_empty());
    }
    let after_pause: Vec<(Option<f32>, Option<Point>, bool)> = (0..64)
        .map(|i| {
            let p = Point::new(i % 8, i / 8);
            (engine.cost_at(p), engine.parent_of(p), engine.is_visited(p))
        })
        .collect();
    assert_eq!(snapshot, after_pause);

    // Resuming completes to the same final state as the uninterrupted run.
    engine.set_working(true);
    run_to_completion(&mut engine);
    for y in 0..8 {
        for x in 0..8 {
            let p = Point::new(x, y);
            assert_eq!(engine.cost_at(p), reference.cost_at(p));
            assert_eq!(engine.parent_of(p), reference.parent_of(p));
        }
    }
}

#[test]
fn committing_a_path_trains_the_cost_function() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine = LiveWire::default();
    engine.set_dimensions(8, 16);
    let mut data = vec![0u8; 8 * 16 * 4];
    for y in 0..16 {
        for x in 0..8 {
            let v = if x < 4 { 30u8 } else { 220 };
            let idx = (y * 8 + x) * 4;
            data[idx] = v;
            data[idx + 1] = v;
            data[idx + 2] = v;
            data[idx + 3] = 255;
        }
    }
    engine.set_data(&data).unwrap();
    engine.set_point(Point::new(3, 0)).unwrap();
    run_to_completion(&mut engine);
    assert!(!engine.trained());

    // Commit the boundary the user traced down the edge.
    engine.train(Point::new(3, 15));
    assert!(engine.trained());

    // A fresh search from a new seed uses the trained weighting and still
    // produces bounded edge costs.
    engine.set_point(Point::new(0, 0)).unwrap();
    let all = run_to_completion(&mut engine);
    assert_eq!(all.len(), 8 * 16);
    let d = engine.edge_cost(Point::new(3, 7), Point::new(3, 8)).unwrap();
    assert!((0.0..=1.0).contains(&d));
}

#[test]
fn training_on_a_short_chain_is_a_silent_noop() {
    let mut engine = engine_with_edge(LiveWireOptions {
        batch_size: 1,
        ..Default::default()
    });
    engine.set_point(Point::new(0, 0)).unwrap();
    // Finalize only the seed: its parent chain has a single point.
    engine.do_work();
    engine.train(Point::new(0, 0));
    assert!(!engine.trained());
}

#[test]
fn replacing_the_image_resets_search_and_trainer() {
    let mut engine = engine_with_edge(LiveWireOptions::default());
    engine.set_point(Point::new(0, 0)).unwrap();
    run_to_completion(&mut engine);
    engine.train(Point::new(7, 7));
    assert!(engine.trained());

    engine.set_data(&vertical_edge_image()).unwrap();
    assert!(!engine.trained());
    assert!(!engine.working());
    assert!(engine.do_work().is_empty());
    assert!(engine.path_to(Point::new(7, 7)).is_empty());
}
