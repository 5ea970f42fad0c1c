//! End-to-end tests of the flow facade against known circuits.
//!
//! Vertices and edges come from `MeshGraph`, so caller handles are plain
//! `usize` indices; `res` closures price edges by token.

use fx_flow::{FlowError, FlowNetwork, SourceSpec};
use fx_graph::MeshGraph;

const TOL: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOL
}

/// Battery across one resistor: flow = V/R, equivalent resistance = R.
#[test]
fn single_resistor() {
    let mut mesh = MeshGraph::new(2);
    let battery = mesh.link(0, 1);
    let r = mesh.link(0, 1);

    let mut net = FlowNetwork::clone_from(&mesh, |e| if e == r { 8.0 } else { 0.0 }).unwrap();
    let equivalent = net.register_source(battery, 24.0, 1).unwrap();

    assert!(close(equivalent, 8.0));
    let flows = net.total_flow();
    assert!(close(flows[&r], 3.0));
    assert!(close(flows[&battery], 3.0));
}

/// Two resistors in series share one current.
#[test]
fn series_pair() {
    let mut mesh = MeshGraph::new(3);
    let battery = mesh.link(0, 2);
    let r1 = mesh.link(0, 1);
    let r2 = mesh.link(1, 2);
    let res = move |e: usize| [0.0, 10.0, 20.0][e];

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    let equivalent = net.register_source(battery, 12.0, 0).unwrap();

    assert!(close(equivalent, 30.0));
    let flows = net.total_flow();
    assert!(close(flows[&r1], 0.4));
    assert!(close(flows[&r2], 0.4));
    assert!(close(flows[&battery], 0.4));
}

/// The canonical worked example: 12 units of pressure across 3Ω ∥ 6Ω.
#[test]
fn parallel_pair_worked_example() {
    let mut mesh = MeshGraph::new(2);
    let battery = mesh.link(0, 1);
    let r3 = mesh.link(0, 1);
    let r6 = mesh.link(0, 1);
    let res = move |e: usize| [0.0, 3.0, 6.0][e];

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    let equivalent = net.register_source(battery, 12.0, 1).unwrap();

    assert!(close(equivalent, 2.0));
    let flows = net.total_flow();
    assert!(close(flows[&r3], 4.0));
    assert!(close(flows[&r6], 2.0));
    // the source edge carries the whole 6 A, matching 12 / 2
    assert!(close(flows[&battery], 6.0));
}

/// Kirchhoff current law at both junctions of a split-and-merge net.
#[test]
fn current_is_conserved_at_junctions() {
    // 0 -a- 1, then 1 -b-/-c- 2 in parallel, battery closing 2-0.
    let mut mesh = MeshGraph::new(3);
    let battery = mesh.link(0, 2);
    let a = mesh.link(0, 1);
    let b = mesh.link(1, 2);
    let c = mesh.link(1, 2);
    let res = move |e: usize| [0.0, 1.0, 3.0, 6.0][e];

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    net.register_source(battery, 9.0, 0).unwrap();

    let flow = net.flow(battery).unwrap();
    // Signed currents are canonical (lower vertex id is the inlet), so
    // conservation at junction 1 reads: a in, b and c out.
    let ids: Vec<_> = [a, b, c]
        .iter()
        .map(|&t| {
            // token order equals clone order here: battery, a, b, c
            fx_core::Id::from_index(t as u32)
        })
        .collect();
    let into = flow.current(ids[0]);
    let out = flow.current(ids[1]) + flow.current(ids[2]);
    assert!(close(into, out));
    assert!(into > 0.0);
}

/// Kirchhoff voltage law: R·I summed along each branch equals the drive.
#[test]
fn pressure_drops_sum_along_paths() {
    let mut mesh = MeshGraph::new(3);
    let battery = mesh.link(0, 2);
    let a = mesh.link(0, 1);
    let b = mesh.link(1, 2);
    let c = mesh.link(0, 2);
    let res = move |e: usize| [0.0, 2.0, 4.0, 5.0][e];

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    net.register_source(battery, 18.0, 0).unwrap();
    let flows = net.total_flow();

    // series branch a-b and lone branch c both span the full drive
    assert!(close(2.0 * flows[&a] + 4.0 * flows[&b], 18.0));
    assert!(close(5.0 * flows[&c], 18.0));
}

#[test]
fn total_flow_is_idempotent() {
    let mut mesh = MeshGraph::new(2);
    let battery = mesh.link(0, 1);
    let r3 = mesh.link(0, 1);
    let r6 = mesh.link(0, 1);
    let res = move |e: usize| [0.0, 3.0, 6.0][e];

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    net.register_source(battery, 12.0, 1).unwrap();

    let first = net.total_flow();
    let second = net.total_flow();
    assert_eq!(first, second);
}

/// The pinned aggregation rule: signed sums first, magnitude last.
/// Opposing sources on a shared edge cancel instead of adding.
#[test]
fn opposing_sources_cancel() {
    // Triangle: s1 on 0-1, r on 1-2, s2 on 2-0.
    let mut mesh = MeshGraph::new(3);
    let s1 = mesh.link(0, 1);
    let r = mesh.link(1, 2);
    let s2 = mesh.link(2, 0);
    let res = move |e: usize| if e == r { 5.0 } else { 0.0 };

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    // s1 pushes 1 -> 2 through r; s2 (positive at 2) pushes 2 -> 1.
    net.register_source(s1, 10.0, 1).unwrap();
    net.register_source(s2, 10.0, 2).unwrap();

    let flows = net.total_flow();
    assert!(close(flows[&r], 0.0));
}

/// Same circuit, sources aligned: contributions add.
#[test]
fn aligned_sources_add() {
    let mut mesh = MeshGraph::new(3);
    let s1 = mesh.link(0, 1);
    let r = mesh.link(1, 2);
    let s2 = mesh.link(2, 0);
    let res = move |e: usize| if e == r { 5.0 } else { 0.0 };

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    net.register_source(s1, 10.0, 1).unwrap();
    net.register_source(s2, 10.0, 0).unwrap();

    let flows = net.total_flow();
    assert!(close(flows[&r], 4.0));
}

#[test]
fn batch_registration_matches_sequential() {
    let mut mesh = MeshGraph::new(3);
    let s1 = mesh.link(0, 1);
    let r = mesh.link(1, 2);
    let s2 = mesh.link(2, 0);
    let res = move |e: usize| if e == r { 5.0 } else { 0.0 };

    let mut sequential = FlowNetwork::clone_from(&mesh, res).unwrap();
    let eq1 = sequential.register_source(s1, 10.0, 1).unwrap();
    let eq2 = sequential.register_source(s2, 4.0, 2).unwrap();

    let mut batch = FlowNetwork::clone_from(&mesh, res).unwrap();
    let eqs = batch
        .register_sources(&[
            SourceSpec {
                edge: s1,
                pressure: 10.0,
                positive_terminal: 1,
            },
            SourceSpec {
                edge: s2,
                pressure: 4.0,
                positive_terminal: 2,
            },
        ])
        .unwrap();

    assert_eq!(eqs, vec![eq1, eq2]);
    assert_eq!(batch.total_flow(), sequential.total_flow());
}

#[test]
fn configuration_errors_are_reported() {
    let mut mesh = MeshGraph::new(3);
    let battery = mesh.link(0, 1);
    let r = mesh.link(0, 1);
    let res = move |e: usize| if e == r { 2.0 } else { 0.0 };

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    net.register_source(battery, 5.0, 0).unwrap();

    // duplicate registration
    let err = net.register_source(battery, 5.0, 0).unwrap_err();
    assert!(matches!(err, FlowError::Config { .. }));

    // unknown edge
    let err = net.register_source(99, 5.0, 0).unwrap_err();
    assert!(matches!(err, FlowError::Config { .. }));

    // unknown terminal
    let err = net.register_source(r, 5.0, 42).unwrap_err();
    assert!(matches!(err, FlowError::Config { .. }));

    // terminal exists but is detached from the source edge
    let err = net.register_source(r, 5.0, 2).unwrap_err();
    assert!(matches!(err, FlowError::Config { .. }));
}

#[test]
fn isolated_source_is_a_topology_error() {
    let mut mesh = MeshGraph::new(4);
    let battery = mesh.link(0, 1);
    mesh.link(2, 3);

    let mut net = FlowNetwork::clone_from(&mesh, |_| 1.0).unwrap();
    let err = net.register_source(battery, 5.0, 0).unwrap_err();
    assert!(matches!(err, FlowError::Topology { .. }));
}

#[test]
fn path_limit_aborts_dense_enumeration() {
    let mut mesh = MeshGraph::new(2);
    let battery = mesh.link(0, 1);
    for _ in 0..4 {
        mesh.link(0, 1);
    }

    let mut net = FlowNetwork::clone_from(&mesh, |_| 1.0)
        .unwrap()
        .with_path_limit(3);
    let err = net.register_source(battery, 5.0, 0).unwrap_err();
    assert!(matches!(err, FlowError::Topology { .. }));
}

/// An unbalanced bridge defeats series/parallel reduction and must fail
/// loudly rather than spin.
#[test]
fn unbalanced_bridge_is_rejected() {
    let mut mesh = MeshGraph::new(4);
    let battery = mesh.link(0, 3);
    mesh.link(0, 1);
    mesh.link(0, 2);
    mesh.link(1, 2);
    mesh.link(1, 3);
    mesh.link(2, 3);
    let res = move |e: usize| [0.0, 1.0, 2.0, 5.0, 3.0, 4.0][e];

    let mut net = FlowNetwork::clone_from(&mesh, res).unwrap();
    let err = net.register_source(battery, 5.0, 0).unwrap_err();
    assert!(matches!(
        err,
        FlowError::Topology { .. } | FlowError::Numeric { .. }
    ));
}
