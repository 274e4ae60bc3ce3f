//! Per-core interrupt controller.
//!
//! Every core owns exactly one controller, instance `interrupts[0]`. Its three
//! ports are wired to the system-wide bus identically for every CPU style:
//! `pio` and `int_responder` on the memory side, `int_requestor` on the CPU side.

use crate::common::{ConfigError, ParamDefault, param::param_set};
use crate::soc::interconnect::{self, Crossbar};
use crate::soc::system::{ComponentId, ComponentKind, PortId, PortRole, System};

/// Instance name relative to the owning core.
pub const INSTANCE_NAME: &str = "interrupts[0]";

/// Class name recorded as the controller's model.
pub const MODEL_NAME: &str = "X86LocalApic";

/// Programmed-I/O port (responder).
pub const PIO: &str = "pio";

/// Port the controller sends interrupt messages through (requestor).
pub const INT_REQUESTOR: &str = "int_requestor";

/// Port the controller receives interrupt messages on (responder).
pub const INT_RESPONDER: &str = "int_responder";

/// Names of the three interrupt ports, in wiring order.
pub const PORTS: [&str; 3] = [PIO, INT_REQUESTOR, INT_RESPONDER];

const DEFAULTS: &[(&str, ParamDefault)] = &[
    ("int_latency", ParamDefault::Str("1ns")),
    ("pio_latency", ParamDefault::Str("100ns")),
];

/// Handle to a constructed interrupt controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterruptController {
    /// The controller component.
    pub id: ComponentId,
    /// Programmed-I/O responder port.
    pub pio: PortId,
    /// Interrupt requestor port.
    pub int_requestor: PortId,
    /// Interrupt responder port.
    pub int_responder: PortId,
}

impl InterruptController {
    /// Creates the controller under `core` with its three ports unconnected.
    pub fn create(system: &mut System, core: ComponentId) -> Self {
        let id = system.add_component(
            INSTANCE_NAME,
            ComponentKind::InterruptController,
            MODEL_NAME,
            Some(core),
            param_set(DEFAULTS),
        );
        Self {
            id,
            pio: system.add_port(id, PIO, PortRole::Responder),
            int_requestor: system.add_port(id, INT_REQUESTOR, PortRole::Requestor),
            int_responder: system.add_port(id, INT_RESPONDER, PortRole::Responder),
        }
    }

    /// Wires all three ports to the system-wide bus.
    pub fn connect(&self, system: &mut System, membus: &Crossbar) -> Result<(), ConfigError> {
        for port in [self.pio, self.int_requestor, self.int_responder] {
            let _ = interconnect::attach(system, membus, port)?;
        }
        Ok(())
    }
}
