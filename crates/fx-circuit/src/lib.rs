//! fx-circuit: the domain layer above the flow engine.
//!
//! Users place two-terminal components (resistors, voltage sources) and
//! wire their terminals into junctions; `Circuit::solve` turns the wired
//! circuit into an abstract flow network, registers every voltage source,
//! and reports per-component current plus each source's equivalent
//! resistance.
//!
//! A solve always starts from a fresh snapshot of the circuit, so edits
//! made after one solve simply require calling `solve` again; there is
//! no cache to invalidate.
//!
//! # Example
//!
//! ```
//! use fx_circuit::{Circuit, Terminal};
//!
//! let mut circuit = Circuit::new();
//! let top = circuit.add_junction();
//! let bottom = circuit.add_junction();
//! let battery = circuit.add_voltage_source(12.0);
//! let r = circuit.add_resistor(4.0);
//!
//! for (comp, terminal, junction) in [
//!     (battery, Terminal::Input, top),
//!     (battery, Terminal::Output, bottom),
//!     (r, Terminal::Input, top),
//!     (r, Terminal::Output, bottom),
//! ] {
//!     circuit.connect(comp, terminal, junction).unwrap();
//! }
//!
//! let solution = circuit.solve().unwrap();
//! assert!((solution.currents[&r] - 3.0).abs() < 1e-9);
//! ```

pub mod circuit;
pub mod error;
pub mod solution;

pub use circuit::{Circuit, ComponentKind, Terminal};
pub use error::{CircuitError, CircuitResult};
pub use solution::CircuitSolution;
