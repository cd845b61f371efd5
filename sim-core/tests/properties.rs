//! Long-running checks of the graph invariants over many ticks.

use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use sim_core::{config::GrowthConfig, simulation::Simulation};

fn run(cfg: GrowthConfig, seed: u64, ticks: usize, mut check: impl FnMut(&Simulation<StdRng>)) {
    let mut sim = Simulation::new(cfg, StdRng::seed_from_u64(seed)).unwrap();
    sim.initialize(Vec2::new(400.0, 300.0));
    for _ in 0..ticks {
        sim.step().unwrap();
        check(&sim);
    }
}

#[test]
fn node_count_never_exceeds_budget() {
    let cfg = GrowthConfig {
        max_nodes: 30,
        growth_chance: 1.0,
        ..GrowthConfig::default()
    };
    let mut reached_cap = false;
    run(cfg, 1, 200, |sim| {
        let g = sim.graph().unwrap();
        assert!(g.nodes.len() <= 30);
        assert_eq!(g.segments.len(), g.nodes.len() - 1);
        reached_cap |= g.nodes.len() == 30;
    });
    assert!(reached_cap);
}

#[test]
fn desired_lengths_never_shrink() {
    let cfg = GrowthConfig {
        max_nodes: 60,
        growth_chance: 0.3,
        ..GrowthConfig::default()
    };
    let mut previous: Vec<f32> = Vec::new();
    run(cfg, 2, 300, |sim| {
        let g = sim.graph().unwrap();
        for (s, before) in g.segments.iter().zip(&previous) {
            assert!(s.desired_length >= *before);
        }
        previous = g.segments.iter().map(|s| s.desired_length).collect();
    });
}

#[test]
fn radii_stay_above_floor_and_positions_finite() {
    let cfg = GrowthConfig {
        max_nodes: 80,
        growth_chance: 0.5,
        ..GrowthConfig::default()
    };
    run(cfg, 3, 300, |sim| {
        let g = sim.graph().unwrap();
        for n in &g.nodes {
            assert!(n.radius >= cfg.min_radius);
            assert!(n.pos.is_finite(), "non-finite position {:?}", n.pos);
        }
    });
}

#[test]
fn segments_reference_distinct_existing_nodes() {
    let cfg = GrowthConfig {
        max_nodes: 50,
        growth_chance: 0.8,
        ..GrowthConfig::default()
    };
    run(cfg, 4, 100, |sim| {
        let g = sim.graph().unwrap();
        for s in &g.segments {
            assert_ne!(s.a, s.b);
            assert!(s.a < g.nodes.len() && s.b < g.nodes.len());
        }
    });
}

#[test]
fn zero_growth_chance_only_lengthens() {
    let cfg = GrowthConfig {
        growth_chance: 0.0,
        growth_rate: 0.25,
        initial_branch_length: 4.0,
        ..GrowthConfig::default()
    };
    let mut ticks = 0;
    run(cfg, 5, 40, |sim| {
        ticks += 1;
        let g = sim.graph().unwrap();
        assert_eq!(g.nodes.len(), 2);
        assert_eq!(g.segments.len(), 1);
        let expected = 4.0 + 0.25 * ticks as f32;
        assert!((g.segments[0].desired_length - expected).abs() < 1e-4);
    });
}

#[test]
fn new_segments_start_at_branch_length() {
    let cfg = GrowthConfig {
        growth_chance: 1.0,
        initial_branch_length: 3.0,
        max_nodes: 40,
        ..GrowthConfig::default()
    };
    let mut sim = Simulation::new(cfg, StdRng::seed_from_u64(6)).unwrap();
    sim.initialize(Vec2::ZERO);

    // The seed segment exists before the first tick, so its length at
    // tick `t` is 3 + 0.1 * t. A branch added on tick `t` was not
    // elongated on that tick.
    for _ in 0..20 {
        sim.step().unwrap();
        let g = sim.graph().unwrap();
        let newest = g.segments.last().unwrap();
        if sim.last_new_node().is_some() {
            assert!((newest.desired_length - 3.0).abs() < 1e-4);
        }
    }
}
