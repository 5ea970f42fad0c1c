//! Component/junction arenas and the solve entry point.

use fx_core::{ComponentId, JunctionId, Real};
use fx_flow::{FlowNetwork, SourceSpec};
use fx_graph::SourceGraph;

use crate::error::{CircuitError, CircuitResult};
use crate::solution::CircuitSolution;

/// What a two-terminal component is, and the single value that drives it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentKind {
    Resistor { resistance: Real },
    VoltageSource { voltage: Real },
}

/// The two terminals every component carries. Current is reckoned as
/// entering at `Input` and leaving at `Output`; a source drives its
/// `Output` junction positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Input,
    Output,
}

impl Terminal {
    fn slot(self) -> usize {
        match self {
            Terminal::Input => 0,
            Terminal::Output => 1,
        }
    }
}

/// A uniform two-terminal record: the kind tag plus where each terminal
/// is wired (None = hanging loose).
#[derive(Debug, Clone)]
struct ComponentData {
    kind: ComponentKind,
    wired: [Option<JunctionId>; 2],
}

#[derive(Debug, Clone, Default)]
struct JunctionData {
    attached: Vec<ComponentId>,
}

/// An editable circuit: junction and component arenas with tombstoned
/// removal so handles stay stable across edits.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    components: Vec<Option<ComponentData>>,
    junctions: Vec<Option<JunctionData>>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_junction(&mut self) -> JunctionId {
        let id = JunctionId::from_index(self.junctions.len() as u32);
        self.junctions.push(Some(JunctionData::default()));
        id
    }

    pub fn add_resistor(&mut self, resistance: Real) -> ComponentId {
        self.add_component(ComponentKind::Resistor { resistance })
    }

    pub fn add_voltage_source(&mut self, voltage: Real) -> ComponentId {
        self.add_component(ComponentKind::VoltageSource { voltage })
    }

    fn add_component(&mut self, kind: ComponentKind) -> ComponentId {
        let id = ComponentId::from_index(self.components.len() as u32);
        self.components.push(Some(ComponentData {
            kind,
            wired: [None, None],
        }));
        id
    }

    /// Wire one terminal of a component into a junction, detaching it
    /// from wherever it was before.
    pub fn connect(
        &mut self,
        component: ComponentId,
        terminal: Terminal,
        junction: JunctionId,
    ) -> CircuitResult<()> {
        self.junction_data(junction)?;
        self.component_data(component)?;

        self.disconnect(component, terminal)?;
        self.component_mut(component)?.wired[terminal.slot()] = Some(junction);

        if let Some(data) = self.junctions[junction.idx()].as_mut()
            && !data.attached.contains(&component)
        {
            data.attached.push(component);
        }
        Ok(())
    }

    /// Unwire one terminal. A no-op when it was already loose.
    pub fn disconnect(&mut self, component: ComponentId, terminal: Terminal) -> CircuitResult<()> {
        let data = self.component_mut(component)?;
        let Some(old) = data.wired[terminal.slot()].take() else {
            return Ok(());
        };
        let still_attached = data.wired.contains(&Some(old));
        if !still_attached
            && let Some(junction) = self.junctions[old.idx()].as_mut()
        {
            junction.attached.retain(|&c| c != component);
        }
        Ok(())
    }

    /// Remove a component, unwiring both terminals.
    pub fn remove_component(&mut self, component: ComponentId) -> CircuitResult<()> {
        self.disconnect(component, Terminal::Input)?;
        self.disconnect(component, Terminal::Output)?;
        self.components[component.idx()] = None;
        Ok(())
    }

    /// Remove a junction, leaving every terminal wired to it loose.
    pub fn remove_junction(&mut self, junction: JunctionId) -> CircuitResult<()> {
        let data = self
            .junctions
            .get_mut(junction.idx())
            .and_then(|j| j.take())
            .ok_or(CircuitError::UnknownJunction)?;
        for component in data.attached {
            if let Some(comp) = self.components[component.idx()].as_mut() {
                for slot in &mut comp.wired {
                    if *slot == Some(junction) {
                        *slot = None;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn set_resistance(&mut self, component: ComponentId, resistance: Real) -> CircuitResult<()> {
        match &mut self.component_mut(component)?.kind {
            ComponentKind::Resistor { resistance: r } => {
                *r = resistance;
                Ok(())
            }
            ComponentKind::VoltageSource { .. } => Err(CircuitError::NotAResistor { component }),
        }
    }

    pub fn set_voltage(&mut self, component: ComponentId, voltage: Real) -> CircuitResult<()> {
        match &mut self.component_mut(component)?.kind {
            ComponentKind::VoltageSource { voltage: v } => {
                *v = voltage;
                Ok(())
            }
            ComponentKind::Resistor { .. } => Err(CircuitError::NotAVoltageSource { component }),
        }
    }

    pub fn kind(&self, component: ComponentId) -> CircuitResult<ComponentKind> {
        Ok(self.component_data(component)?.kind)
    }

    /// Where a terminal is wired, if anywhere.
    pub fn wired_to(
        &self,
        component: ComponentId,
        terminal: Terminal,
    ) -> CircuitResult<Option<JunctionId>> {
        Ok(self.component_data(component)?.wired[terminal.slot()])
    }

    /// Live junction handles, in creation order.
    pub fn junctions(&self) -> impl Iterator<Item = JunctionId> + '_ {
        self.junctions
            .iter()
            .enumerate()
            .filter(|(_, j)| j.is_some())
            .map(|(i, _)| JunctionId::from_index(i as u32))
    }

    /// Live component handles, in creation order.
    pub fn components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .map(|(i, _)| ComponentId::from_index(i as u32))
    }

    /// Recompute the whole circuit from scratch.
    ///
    /// Builds a fresh flow network snapshot, registers every fully wired
    /// voltage source (in creation order, its `Output` junction positive)
    /// and aggregates the per-component currents. Components with exactly
    /// one wired terminal are rejected up front; fully loose components
    /// are simply not part of the network.
    pub fn solve(&self) -> CircuitResult<CircuitSolution> {
        let mut sources = Vec::new();
        for id in self.components() {
            let data = self.component_data(id)?;
            match (data.wired[0], data.wired[1]) {
                (Some(_), Some(output)) => {
                    if let ComponentKind::VoltageSource { voltage } = data.kind {
                        sources.push(SourceSpec {
                            edge: id,
                            pressure: voltage,
                            positive_terminal: output,
                        });
                    }
                }
                (None, None) => {}
                _ => return Err(CircuitError::DanglingComponent { component: id }),
            }
        }

        let mut network = FlowNetwork::clone_from(self, |c| self.resistance_value(c))?;
        let equivalents = network.register_sources(&sources)?;

        Ok(CircuitSolution {
            currents: network.total_flow(),
            equivalent_resistances: sources
                .iter()
                .map(|s| s.edge)
                .zip(equivalents)
                .collect(),
        })
    }

    /// A voltage source presents no resistance of its own.
    fn resistance_value(&self, component: ComponentId) -> Real {
        match self.components[component.idx()]
            .as_ref()
            .expect("attached component is live")
            .kind
        {
            ComponentKind::Resistor { resistance } => resistance,
            ComponentKind::VoltageSource { .. } => 0.0,
        }
    }

    fn component_data(&self, component: ComponentId) -> CircuitResult<&ComponentData> {
        self.components
            .get(component.idx())
            .and_then(|c| c.as_ref())
            .ok_or(CircuitError::UnknownComponent)
    }

    fn component_mut(&mut self, component: ComponentId) -> CircuitResult<&mut ComponentData> {
        self.components
            .get_mut(component.idx())
            .and_then(|c| c.as_mut())
            .ok_or(CircuitError::UnknownComponent)
    }

    fn junction_data(&self, junction: JunctionId) -> CircuitResult<&JunctionData> {
        self.junctions
            .get(junction.idx())
            .and_then(|j| j.as_ref())
            .ok_or(CircuitError::UnknownJunction)
    }
}

impl SourceGraph for Circuit {
    type Vertex = JunctionId;
    type Edge = ComponentId;

    fn vertices(&self) -> Vec<JunctionId> {
        self.junctions().collect()
    }

    fn incident_edges(&self, junction: JunctionId) -> Vec<ComponentId> {
        self.junctions
            .get(junction.idx())
            .and_then(|j| j.as_ref())
            .map(|j| j.attached.clone())
            .unwrap_or_default()
    }

    fn across(&self, junction: JunctionId, component: ComponentId) -> Option<JunctionId> {
        let data = self.components.get(component.idx())?.as_ref()?;
        let [input, output] = data.wired;
        if input == Some(junction) {
            output
        } else if output == Some(junction) {
            input
        } else {
            None
        }
    }
}
