//! Equivalent resistance by state elimination.
//!
//! The automaton doubles as a finite automaton whose labels are
//! resistances; converting it to a "regular expression" with series for
//! concatenation and parallel for alternation yields the closed-form
//! equivalent resistance between start and sink. Two rewrites suffice on
//! an acyclic structure: merge co-targeted transitions into a parallel
//! combinator, splice out pass-through states into a series combinator.

use fx_core::{EdgeId, Real};
use tracing::debug;

use crate::automaton::Automaton;
use crate::error::{FlowError, FlowResult};
use crate::expr::{ExprArena, ExprId};

/// Reduce `automaton` to a single equivalent resistance.
///
/// Fails with a topology error when the structure is not
/// series/parallel-reducible (a shared edge ridden in both directions, as
/// in an unbalanced bridge, leaves states no rewrite can eliminate).
pub(crate) fn equivalent_resistance(
    automaton: &Automaton,
    resistance_of: &dyn Fn(EdgeId) -> Real,
) -> FlowResult<Real> {
    let mut reducer = Reducer::transmute(automaton);
    let expr = reducer.run()?;
    Ok(reducer.arena.evaluate(expr, resistance_of))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Link {
    label: ExprId,
    to: usize,
}

struct Reducer {
    arena: ExprArena,
    /// Outgoing links per state; incoming sides are recomputed on demand.
    out: Vec<Vec<Link>>,
    alive: Vec<bool>,
    start: usize,
    sink: usize,
}

impl Reducer {
    /// Copy the automaton into scratch form, folding multi-edges between
    /// a state pair into one parallel label as we go.
    fn transmute(automaton: &Automaton) -> Reducer {
        let mut arena = ExprArena::new();
        let mut out = vec![Vec::new(); automaton.len()];

        for (i, state) in automaton.states().iter().enumerate() {
            for target in state.successors() {
                let constants: Vec<ExprId> = state
                    .edges_to(target)
                    .into_iter()
                    .map(|e| arena.constant(e))
                    .collect();
                let label = arena.parallel(constants);
                out[i].push(Link {
                    label,
                    to: target.idx(),
                });
            }
        }

        Reducer {
            arena,
            alive: vec![true; automaton.len()],
            start: automaton.start().idx(),
            sink: automaton.sink().idx(),
            out,
        }
    }

    fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    fn done(&self) -> bool {
        self.alive_count() == 2 && self.out[self.start].len() == 1
    }

    fn run(&mut self) -> FlowResult<ExprId> {
        let mut rounds = 0usize;
        while !self.done() {
            let progressed = self.merge_parallel() | self.splice_series();
            rounds += 1;
            if !progressed {
                return Err(FlowError::Topology {
                    what: "network is not series/parallel-reducible".into(),
                });
            }
        }
        debug!(rounds, "reduction converged");

        let last = self.out[self.start][0];
        if last.to != self.sink {
            return Err(FlowError::Invariant {
                what: "reduction terminated off the sink state",
            });
        }
        Ok(last.label)
    }

    /// Unify transitions sharing source and target into one parallel label.
    fn merge_parallel(&mut self) -> bool {
        let mut progressed = false;
        for i in 0..self.out.len() {
            if !self.alive[i] {
                continue;
            }
            let links = &self.out[i];
            let mut targets: Vec<usize> = Vec::new();
            for l in links {
                if !targets.contains(&l.to) {
                    targets.push(l.to);
                }
            }
            if targets.len() == links.len() {
                continue;
            }

            let old = std::mem::take(&mut self.out[i]);
            for to in targets {
                let labels: Vec<ExprId> =
                    old.iter().filter(|l| l.to == to).map(|l| l.label).collect();
                let label = self.arena.parallel(labels);
                self.out[i].push(Link { label, to });
            }
            progressed = true;
        }
        progressed
    }

    /// Remove states with exactly one incoming and one outgoing link,
    /// joining the two labels in series on the bypass.
    fn splice_series(&mut self) -> bool {
        let mut progressed = false;
        loop {
            let Some((pred, pos, mid)) = self.find_pass_through() else {
                break;
            };
            let inbound = self.out[pred][pos].label;
            let Link { label: outbound, to } = self.out[mid][0];

            let joined = self.arena.series(vec![inbound, outbound]);
            self.out[pred][pos] = Link { label: joined, to };
            self.out[mid].clear();
            self.alive[mid] = false;
            progressed = true;
        }
        progressed
    }

    /// Locate a state with in-degree 1 and out-degree 1, returning its
    /// single predecessor and the link position pointing at it.
    fn find_pass_through(&self) -> Option<(usize, usize, usize)> {
        for mid in 0..self.out.len() {
            if !self.alive[mid] || mid == self.start || mid == self.sink {
                continue;
            }
            if self.out[mid].len() != 1 {
                continue;
            }
            let mut hits = Vec::new();
            for (i, links) in self.out.iter().enumerate() {
                if !self.alive[i] {
                    continue;
                }
                for (pos, l) in links.iter().enumerate() {
                    if l.to == mid {
                        hits.push((i, pos));
                    }
                }
            }
            if let [(pred, pos)] = hits[..] {
                return Some((pred, pos, mid));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testnet::build;
    use crate::trace::{TraceLimits, trace};
    use fx_core::Id;
    use fx_graph::Network;

    fn reduce(net: &Network, source: fx_core::EdgeId) -> FlowResult<Real> {
        let t = trace(net, source, Id::from_index(0), &TraceLimits::default())?;
        equivalent_resistance(&t.automaton, &|e| net.resistance(e))
    }

    #[test]
    fn lone_resistor() {
        let (net, edges) = build(2, &[(0, 1, 0.0), (0, 1, 7.5)]);
        assert_eq!(reduce(&net, edges[0]).unwrap(), 7.5);
    }

    #[test]
    fn series_pair_sums() {
        let (net, edges) = build(3, &[(0, 2, 0.0), (0, 1, 2.0), (1, 2, 4.0)]);
        assert_eq!(reduce(&net, edges[0]).unwrap(), 6.0);
    }

    #[test]
    fn parallel_pair_takes_harmonic_sum() {
        let (net, edges) = build(2, &[(0, 1, 0.0), (0, 1, 3.0), (0, 1, 6.0)]);
        assert!((reduce(&net, edges[0]).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn series_of_parallel_blocks() {
        // 0 -(3||6)- 1 -(1)- 2, source closing 0-2: expect 2 + 1 = 3.
        let (net, edges) = build(
            3,
            &[(0, 2, 0.0), (0, 1, 3.0), (0, 1, 6.0), (1, 2, 1.0)],
        );
        assert!((reduce(&net, edges[0]).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bridge_is_not_reducible() {
        // Wheatstone bridge with a cross edge between the two midpoints.
        let (net, edges) = build(
            4,
            &[
                (0, 3, 0.0), // source
                (0, 1, 1.0),
                (0, 2, 2.0),
                (1, 2, 5.0), // bridge edge, ridden both ways
                (1, 3, 3.0),
                (2, 3, 4.0),
            ],
        );
        let err = reduce(&net, edges[0]).unwrap_err();
        assert!(matches!(err, FlowError::Topology { .. }));
    }
}
