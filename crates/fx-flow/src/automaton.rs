//! The acyclic automaton produced by path enumeration.
//!
//! States correspond to network vertices visited on at least one
//! source-to-sink path; transitions are the edges those paths ride.
//! Because every vertex maps to exactly one state, branches that
//! reconverge share states and the structure is a DAG, not a tree.

use fx_core::{EdgeId, StateId};

use crate::error::{FlowError, FlowResult};

/// One labeled transition. Equality is structural: same edge, same target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub edge: EdgeId,
    pub to: StateId,
}

/// A state and its transitions in both directions.
///
/// `incoming` mirrors `outgoing` on the far side: for an incoming entry,
/// `to` names the state the transition comes *from*.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub(crate) outgoing: Vec<Transition>,
    pub(crate) incoming: Vec<Transition>,
}

impl State {
    pub fn outgoing(&self) -> &[Transition] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &[Transition] {
        &self.incoming
    }

    /// Follow `edge` out of this state, if such a transition exists.
    /// Deterministic: a state carries at most one transition per edge.
    pub fn next(&self, edge: EdgeId) -> Option<StateId> {
        self.outgoing.iter().find(|t| t.edge == edge).map(|t| t.to)
    }

    /// Distinct successor states, in first-recorded order.
    pub fn successors(&self) -> Vec<StateId> {
        let mut seen = Vec::new();
        for t in &self.outgoing {
            if !seen.contains(&t.to) {
                seen.push(t.to);
            }
        }
        seen
    }

    /// All edges labeling transitions from this state to `to`.
    pub fn edges_to(&self, to: StateId) -> Vec<EdgeId> {
        self.outgoing
            .iter()
            .filter(|t| t.to == to)
            .map(|t| t.edge)
            .collect()
    }

    /// Record `edge -> to`, ignoring an exact duplicate.
    pub(crate) fn push_outgoing(&mut self, edge: EdgeId, to: StateId) -> bool {
        let t = Transition { edge, to };
        if self.outgoing.contains(&t) {
            return false;
        }
        self.outgoing.push(t);
        true
    }

    pub(crate) fn push_incoming(&mut self, edge: EdgeId, from: StateId) {
        let t = Transition { edge, to: from };
        if !self.incoming.contains(&t) {
            self.incoming.push(t);
        }
    }
}

/// The enumerated path structure: states, a start id and a final id.
///
/// Read-only after assembly. Start is always index 0 and the final state
/// the last index.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    start: StateId,
    sink: StateId,
}

impl Automaton {
    /// Renumber raw states so the walk origin comes first and the sink
    /// last, dropping states that carry no transition at all (dead-end
    /// visits never joined a path and would gum up reduction).
    pub(crate) fn assemble(
        raw: Vec<State>,
        start: usize,
        sink: usize,
    ) -> FlowResult<Automaton> {
        if start == sink {
            return Err(FlowError::Invariant {
                what: "automaton start and sink coincide",
            });
        }

        let mut order: Vec<usize> = Vec::with_capacity(raw.len());
        order.push(start);
        for (i, state) in raw.iter().enumerate() {
            if i == start || i == sink {
                continue;
            }
            if !state.outgoing.is_empty() || !state.incoming.is_empty() {
                order.push(i);
            }
        }
        order.push(sink);

        let mut remap = vec![None::<StateId>; raw.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = Some(StateId::from_index(new as u32));
        }

        let relabel = |t: &Transition| -> FlowResult<Transition> {
            Ok(Transition {
                edge: t.edge,
                to: remap[t.to.idx()].ok_or(FlowError::Invariant {
                    what: "transition targets a pruned state",
                })?,
            })
        };

        let mut states = Vec::with_capacity(order.len());
        for &old in &order {
            let state = &raw[old];
            states.push(State {
                outgoing: state.outgoing.iter().map(&relabel).collect::<FlowResult<_>>()?,
                incoming: state.incoming.iter().map(&relabel).collect::<FlowResult<_>>()?,
            });
        }

        Ok(Automaton {
            start: StateId::from_index(0),
            sink: StateId::from_index(states.len() as u32 - 1),
            states,
        })
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.idx()]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    /// The final (accepting) state.
    pub fn sink(&self) -> StateId {
        self.sink
    }

    /// Membership test: does this edge sequence walk from the start state
    /// to the final state? Validation and testing only; the numeric path
    /// never calls it.
    pub fn accepts(&self, edges: &[EdgeId]) -> bool {
        let mut current = self.start;
        for &edge in edges {
            match self.state(current).next(edge) {
                Some(next) => current = next,
                None => return false,
            }
        }
        current == self.sink
    }
}
