//! Circuit editing and solving errors.

use fx_core::ComponentId;
use fx_flow::FlowError;
use thiserror::Error;

/// Errors from editing or solving a circuit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CircuitError {
    #[error("unknown component handle")]
    UnknownComponent,

    #[error("unknown junction handle")]
    UnknownJunction,

    #[error("component {component} is not a resistor")]
    NotAResistor { component: ComponentId },

    #[error("component {component} is not a voltage source")]
    NotAVoltageSource { component: ComponentId },

    #[error("component {component} has exactly one wired terminal")]
    DanglingComponent { component: ComponentId },

    #[error("flow engine error: {0}")]
    Flow(#[from] FlowError),
}

pub type CircuitResult<T> = Result<T, CircuitError>;
