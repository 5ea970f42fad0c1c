//! Assembling and solving the Kirchhoff system.
//!
//! One unknown per used edge. Loop rows normalize the driving pressure to
//! one; junction rows conserve flow at every internal branch point. The
//! system is usually overdetermined but consistent; a residual check
//! rejects anything singular or contradictory instead of handing back a
//! least-squares compromise.

use std::collections::HashMap;

use fx_core::{EdgeId, Real};
use fx_graph::Network;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{FlowError, FlowResult};
use crate::trace::Trace;

/// Singular-value cutoff for rank decisions.
const SVD_EPS: Real = 1e-12;

/// Unit-pressure currents for one source.
#[derive(Debug, Clone)]
pub(crate) struct UnitFlow {
    /// Per used edge, the current under unit pressure, signed relative to
    /// the edge's canonical inlet -> outlet direction.
    pub per_edge: HashMap<EdgeId, Real>,
    /// Total unit current leaving the start state, i.e. the current the
    /// source edge itself carries.
    pub source_total: Real,
}

pub(crate) fn solve_unit(network: &Network, trace: &Trace) -> FlowResult<UnitFlow> {
    let columns: HashMap<EdgeId, usize> = trace
        .edges
        .iter()
        .enumerate()
        .map(|(i, &e)| (e, i))
        .collect();
    let unknowns = columns.len();
    if unknowns == 0 {
        return Err(FlowError::Invariant {
            what: "no unknowns despite a successful enumeration",
        });
    }

    let automaton = &trace.automaton;
    let internal: Vec<usize> = (0..automaton.len())
        .filter(|&i| {
            let s = &automaton.states()[i];
            !s.incoming().is_empty() && !s.outgoing().is_empty()
        })
        .collect();

    let rows = trace.paths.len() + internal.len();
    let mut a = DMatrix::<Real>::zeros(rows, unknowns);
    let mut b = DVector::<Real>::zeros(rows);

    // Loop rule: resistance-weighted currents along a path sum to the
    // (unit) driving pressure.
    for (row, path) in trace.paths.iter().enumerate() {
        for edge in path {
            a[(row, columns[edge])] = network.resistance(*edge);
        }
        b[row] = 1.0;
    }

    // Junction rule: flow in equals flow out at internal branch points.
    for (k, &state_idx) in internal.iter().enumerate() {
        let row = trace.paths.len() + k;
        let state = &automaton.states()[state_idx];
        for t in state.incoming() {
            a[(row, columns[&t.edge])] = 1.0;
        }
        for t in state.outgoing() {
            a[(row, columns[&t.edge])] = -1.0;
        }
    }

    debug!(rows, unknowns, "kirchhoff system assembled");

    let x = if rows == unknowns {
        a.clone().lu().solve(&b).ok_or_else(|| FlowError::Numeric {
            what: "singular junction/loop system".into(),
        })?
    } else {
        let svd = a.clone().svd(true, true);
        if svd.rank(SVD_EPS) < unknowns {
            return Err(FlowError::Numeric {
                what: "rank-deficient junction/loop system".into(),
            });
        }
        svd.solve(&b, SVD_EPS).map_err(|e| FlowError::Numeric {
            what: format!("least-squares solve failed: {e}"),
        })?
    };

    // An inconsistent overdetermined system still yields a least-squares
    // x; only a small residual certifies an actual solution.
    let residual = (&a * &x - &b).amax();
    let tolerance = 1e-9 * b.amax().max(1.0);
    if residual > tolerance {
        return Err(FlowError::Numeric {
            what: format!("inconsistent system, residual {residual:.3e}"),
        });
    }

    let mut per_edge = HashMap::with_capacity(unknowns);
    for (&edge, &col) in &columns {
        let sign = Real::from(*trace.signs.get(&edge).ok_or(FlowError::Invariant {
            what: "used edge is missing its direction sign",
        })?);
        per_edge.insert(edge, x[col] * sign);
    }

    let mut source_total = 0.0;
    for t in automaton.state(automaton.start()).outgoing() {
        source_total += x[columns[&t.edge]];
    }

    Ok(UnitFlow {
        per_edge,
        source_total,
    })
}
