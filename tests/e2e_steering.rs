//! End-to-end tests for steering through a constraint graph.
//!
//! Each test authors a small graph, freezes it behind an `Arc`, and asks
//! `GraphSteeringMethod::compute()` for a path between two configurations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use manip_graph::{
    Configuration, ConstraintGraph, ConstraintSet, GraphSteeringMethod, JointRange, LeafPath, Path,
    SteeringMethod, StateId, StraightSteering, TimeRange,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

/// Straight interpolation over `[0, 1]` that counts its calls.
#[derive(Default)]
struct CountingSteering {
    calls: AtomicUsize,
}

impl SteeringMethod for CountingSteering {
    fn compute(&self, q1: &Configuration, q2: &Configuration) -> Option<Path> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Some(LeafPath::over(q1.clone(), q2.clone(), TimeRange::new(0.0, 1.0)).into())
    }
}

/// Configurations are `[x, gripper]`; `grasped` needs the gripper closed
/// (>= 0.5) and has priority over `free`.
fn free_grasped(free_is_catch_all: bool) -> (ConstraintGraph, StateId, StateId) {
    let mut graph = ConstraintGraph::new("free-grasped");
    let grasped = graph.add_state(
        "grasped",
        ConstraintSet::new("grasped").with(JointRange::new(1, 0.5, 1.0)),
    );
    let free_constraints = if free_is_catch_all {
        ConstraintSet::new("free")
    } else {
        ConstraintSet::new("free").with(JointRange::new(0, -1.0, 1.0))
    };
    let free = graph.add_state("free", free_constraints);
    (graph, free, grasped)
}

fn q(x: f64, gripper: f64) -> Configuration {
    Configuration::from([x, gripper])
}

// ============================================================================
// 1. A single edge that builds: its path is returned
// ============================================================================

#[test]
fn test_single_edge_path_is_returned() {
    let (mut graph, free, grasped) = free_grasped(true);
    let pick = graph.add_edge("pick", free, grasped, ConstraintSet::new("pick")).unwrap();
    let graph = Arc::new(graph);

    let steering = GraphSteeringMethod::new(graph.clone());
    let path = steering.compute(&q(0.0, 0.0), &q(1.0, 1.0)).unwrap();

    let expected: Path = StraightSteering::new()
        .compute(&q(0.0, 0.0), &q(1.0, 1.0))
        .unwrap()
        .with_edge(pick);
    assert_eq!(path.as_leaf().unwrap().edge(), Some(pick));
    assert_eq!(path.initial().unwrap(), expected.initial().unwrap());
    assert_eq!(path.end().unwrap(), expected.end().unwrap());
    assert_eq!(path.time_range(), expected.time_range());
}

// ============================================================================
// 2. The only edge fails to build: no path
// ============================================================================

#[test]
fn test_single_failing_edge_gives_no_path() {
    let (mut graph, free, grasped) = free_grasped(true);
    // Paths of this edge must keep x <= 0.5, the goal is at x = 1.
    graph
        .add_edge("pick-near", free, grasped, ConstraintSet::new("near").with(JointRange::new(0, -1.0, 0.5)))
        .unwrap();
    let steering = GraphSteeringMethod::new(Arc::new(graph));

    assert!(steering.compute(&q(0.0, 0.0), &q(1.0, 1.0)).is_none());
}

// ============================================================================
// 3. Unclassifiable configuration: no path, no edge attempted
// ============================================================================

#[test]
fn test_unclassifiable_configuration_attempts_no_edge() {
    let (mut graph, free, grasped) = free_grasped(false);
    let counter = Arc::new(CountingSteering::default());
    graph
        .add_edge_with_steering("pick", free, grasped, ConstraintSet::new("pick"), counter.clone())
        .unwrap();
    let steering = GraphSteeringMethod::new(Arc::new(graph));

    // x = 5 is outside `free` and the gripper is open: no state.
    assert!(steering.compute(&q(5.0, 0.0), &q(0.0, 1.0)).is_none());
    assert!(steering.compute(&q(0.0, 0.0), &q(5.0, 0.0)).is_none());
    assert_eq!(counter.calls.load(Ordering::SeqCst), 0);

    // Sanity: classifiable endpoints do reach the edge.
    assert!(steering.compute(&q(0.0, 0.0), &q(0.0, 1.0)).is_some());
    assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// 4. States with no edge between them
// ============================================================================

#[test]
fn test_unconnected_states() {
    let (mut graph, free, grasped) = free_grasped(true);
    graph.add_edge("pick", free, grasped, ConstraintSet::new("pick")).unwrap();
    let steering = GraphSteeringMethod::new(Arc::new(graph));

    // grasped → free has no edge
    assert!(steering.compute(&q(0.0, 1.0), &q(0.0, 0.0)).is_none());
}

// ============================================================================
// 5. Loop edge inside a state
// ============================================================================

#[test]
fn test_loop_edge() {
    let (mut graph, free, grasped) = free_grasped(true);
    let transit = graph.add_edge("transit", free, free, ConstraintSet::new("transit")).unwrap();
    graph.add_edge("pick", free, grasped, ConstraintSet::new("pick")).unwrap();
    let steering = GraphSteeringMethod::new(Arc::new(graph));

    let path = steering.compute(&q(0.0, 0.0), &q(3.0, 0.2)).unwrap();
    assert_eq!(path.as_leaf().unwrap().edge(), Some(transit));
}

// ============================================================================
// 6. Same inputs, same answer
// ============================================================================

#[test]
fn test_compute_is_deterministic() {
    let (mut graph, free, grasped) = free_grasped(true);
    graph.add_edge("pick-a", free, grasped, ConstraintSet::new("a")).unwrap();
    graph.add_edge("pick-b", free, grasped, ConstraintSet::new("b")).unwrap();
    let steering = GraphSteeringMethod::new(Arc::new(graph));

    let first = steering.compute(&q(0.0, 0.0), &q(1.0, 1.0)).unwrap();
    for _ in 0..5 {
        assert_eq!(steering.compute(&q(0.0, 0.0), &q(1.0, 1.0)).unwrap(), first);
    }
}
