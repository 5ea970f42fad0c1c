//! The caller-facing facade over a cloned network and its flows.

use std::collections::HashMap;
use std::hash::Hash;

use fx_core::Real;
use fx_graph::{ClonedNetwork, SourceGraph, clone_from};
use rayon::prelude::*;

use crate::error::{FlowError, FlowResult};
use crate::flow::Flow;
use crate::trace::TraceLimits;

/// One pressure source to register: the driving edge, the potential
/// difference it applies, and its positive-pressure terminal.
#[derive(Debug, Clone, Copy)]
pub struct SourceSpec<V, E> {
    pub edge: E,
    pub pressure: Real,
    pub positive_terminal: V,
}

/// A snapshot of the caller's graph plus every registered source's flow.
///
/// Built fresh for each recalculation; nothing here observes later edits
/// to the caller's domain. Registration order is preserved and fixes the
/// aggregation order in [`FlowNetwork::total_flow`], keeping results
/// bit-identical across repeated calls.
pub struct FlowNetwork<V, E>
where
    V: Copy + Eq + Hash,
    E: Copy + Eq + Hash,
{
    cloned: ClonedNetwork<V, E>,
    flows: Vec<(E, Flow)>,
    limits: TraceLimits,
}

impl<V, E> FlowNetwork<V, E>
where
    V: Copy + Eq + Hash,
    E: Copy + Eq + Hash,
{
    /// Snapshot `graph`, pricing each edge once through `resistance_of`.
    pub fn clone_from<G>(graph: &G, resistance_of: impl Fn(E) -> Real) -> FlowResult<Self>
    where
        G: SourceGraph<Vertex = V, Edge = E>,
    {
        Ok(Self {
            cloned: clone_from(graph, resistance_of)?,
            flows: Vec::new(),
            limits: TraceLimits::default(),
        })
    }

    /// Cap path enumeration; exceeding the cap fails the registration
    /// with a topology error instead of hanging on a dense graph.
    pub fn with_path_limit(mut self, max_paths: usize) -> Self {
        self.limits.max_paths = Some(max_paths);
        self
    }

    /// Register `edge` as a pressure source and return the equivalent
    /// resistance the rest of the network presents to it.
    pub fn register_source(
        &mut self,
        edge: E,
        pressure: Real,
        positive_terminal: V,
    ) -> FlowResult<Real> {
        let (edge_id, vertex_id) = self.validate_source(edge, positive_terminal, &[])?;
        let flow = Flow::build(
            &self.cloned.network,
            edge_id,
            vertex_id,
            pressure,
            &self.limits,
        )?;
        let equivalent = flow.equivalent_resistance();
        self.flows.push((edge, flow));
        Ok(equivalent)
    }

    /// Register a batch of sources. Flows are built in parallel (each one
    /// only reads the shared snapshot) and committed in slice order, so
    /// the result is identical to sequential registration. On error
    /// nothing is committed.
    pub fn register_sources(&mut self, specs: &[SourceSpec<V, E>]) -> FlowResult<Vec<Real>>
    where
        V: Send + Sync,
        E: Send + Sync,
    {
        let mut resolved = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            let ids = self.validate_source(spec.edge, spec.positive_terminal, &specs[..i])?;
            resolved.push(ids);
        }

        let network = &self.cloned.network;
        let limits = &self.limits;
        let built: Vec<FlowResult<Flow>> = specs
            .par_iter()
            .zip(resolved.par_iter())
            .map(|(spec, &(edge_id, vertex_id))| {
                Flow::build(network, edge_id, vertex_id, spec.pressure, limits)
            })
            .collect();

        let mut flows = Vec::with_capacity(specs.len());
        for flow in built {
            flows.push(flow?);
        }

        let mut equivalents = Vec::with_capacity(flows.len());
        for (spec, flow) in specs.iter().zip(flows) {
            equivalents.push(flow.equivalent_resistance());
            self.flows.push((spec.edge, flow));
        }
        Ok(equivalents)
    }

    /// Magnitude of the total current through every touched edge.
    ///
    /// Aggregation rule: each source's *signed* canonical-direction
    /// currents are summed first and the magnitude taken once at the end,
    /// so two sources driving an edge in opposition cancel.
    pub fn total_flow(&self) -> HashMap<E, Real> {
        let mut signed: HashMap<E, Real> = HashMap::new();
        for (_, flow) in &self.flows {
            for &edge_id in flow.touched_edges() {
                let token = self.cloned.edge_tokens[edge_id.idx()];
                *signed.entry(token).or_insert(0.0) += flow.current(edge_id);
            }
        }
        for value in signed.values_mut() {
            *value = value.abs();
        }
        signed
    }

    /// The flow registered for `edge`, if any.
    pub fn flow(&self, edge: E) -> Option<&Flow> {
        self.flows
            .iter()
            .find(|(token, _)| *token == edge)
            .map(|(_, flow)| flow)
    }

    /// Equivalent resistance seen by a registered source.
    pub fn equivalent_resistance(&self, edge: E) -> Option<Real> {
        self.flow(edge).map(Flow::equivalent_resistance)
    }

    /// Registered source edges, in registration order.
    pub fn sources(&self) -> impl Iterator<Item = E> + '_ {
        self.flows.iter().map(|(token, _)| *token)
    }

    pub fn source_count(&self) -> usize {
        self.flows.len()
    }

    fn validate_source(
        &self,
        edge: E,
        positive_terminal: V,
        pending: &[SourceSpec<V, E>],
    ) -> FlowResult<(fx_core::EdgeId, fx_core::VertexId)> {
        if self.flows.iter().any(|(token, _)| *token == edge)
            || pending.iter().any(|spec| spec.edge == edge)
        {
            return Err(FlowError::Config {
                what: "edge is already registered as a pressure source".into(),
            });
        }
        let edge_id = *self.cloned.edge_ids.get(&edge).ok_or_else(|| FlowError::Config {
            what: "source edge does not exist in the network".into(),
        })?;
        let vertex_id = *self
            .cloned
            .vertex_ids
            .get(&positive_terminal)
            .ok_or_else(|| FlowError::Config {
                what: "positive terminal does not exist in the network".into(),
            })?;
        if !self.cloned.network.is_endpoint(vertex_id, edge_id) {
            return Err(FlowError::Config {
                what: "positive terminal is not an endpoint of the source edge".into(),
            });
        }
        Ok((edge_id, vertex_id))
    }
}
