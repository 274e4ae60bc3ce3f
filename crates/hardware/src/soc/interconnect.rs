//! Crossbar interconnect builder.
//!
//! This module builds the bus fabrics that join caches, the core, the interrupt
//! controller, and the memory controller. It provides:
//! 1. **Roles:** A per-core crossbar (L1 tiers to L2) and a system-wide crossbar (L2 to memory).
//! 2. **Construction:** Crossbar components with width and latency parameters.
//! 3. **Attachment:** Binding any port to the bus's next free slot on the matching side.
//!
//! A crossbar has two vector sides with unbounded fan-in/fan-out. Requestors
//! attach to the CPU side (`cpu_side_ports[n]`, bus responders); responders
//! attach to the memory side (`mem_side_ports[n]`, bus requestors).

use serde::Serialize;
use tracing::debug;

use crate::common::{ConfigError, ParamSet};
use crate::soc::system::{ComponentId, ComponentKind, PortId, PortRole, System};

/// Prefix of the bus ports that face upstream requestors.
pub const CPU_SIDE_PORTS: &str = "cpu_side_ports";

/// Prefix of the bus ports that face downstream responders.
pub const MEM_SIDE_PORTS: &str = "mem_side_ports";

/// Position of a crossbar in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XBarRole {
    /// Joins a core's L1 caches to its L2.
    PerCore,
    /// Joins the L2 (or the core) to the memory controller and interrupt path.
    SystemWide,
}

impl XBarRole {
    /// Class name recorded as the component's model.
    pub const fn model_name(self) -> &'static str {
        match self {
            Self::PerCore => "L2XBar",
            Self::SystemWide => "SystemXBar",
        }
    }

    /// Instance name under the root component.
    pub const fn instance_name(self) -> &'static str {
        match self {
            Self::PerCore => "l2bus",
            Self::SystemWide => "membus",
        }
    }

    /// `(width in bytes, frontend, forward, response latency in cycles)`.
    const fn timing(self) -> (u32, u32, u32, u32) {
        match self {
            Self::PerCore => (32, 1, 0, 1),
            Self::SystemWide => (16, 3, 4, 2),
        }
    }
}

/// Handle to a constructed crossbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crossbar {
    /// The bus component.
    pub id: ComponentId,
    /// Role of the bus.
    pub role: XBarRole,
}

/// Creates a crossbar in `role` under the system root.
pub fn create_crossbar(system: &mut System, role: XBarRole) -> Crossbar {
    let (width, frontend, forward, response) = role.timing();
    let mut params = ParamSet::new();
    let _ = params.insert("width".into(), width.into());
    let _ = params.insert("frontend_latency".into(), frontend.into());
    let _ = params.insert("forward_latency".into(), forward.into());
    let _ = params.insert("response_latency".into(), response.into());

    let root = system.root();
    let id = system.add_component(
        role.instance_name(),
        ComponentKind::Crossbar(role),
        role.model_name(),
        Some(root),
        params,
    );
    Crossbar { id, role }
}

/// Binds `port` to the next free slot of `bus`.
///
/// A requestor gets a new CPU-side (responder) slot; a responder gets a new
/// memory-side (requestor) slot. There is no capacity limit.
///
/// # Returns
///
/// The bus-side slot now connected to `port`, or `ConfigError::PortInUse` if
/// `port` already has a peer. No slot is created in that case.
pub fn attach(system: &mut System, bus: &Crossbar, port: PortId) -> Result<PortId, ConfigError> {
    let (prefix, slot_role) = match system.port(port).role {
        PortRole::Requestor => (CPU_SIDE_PORTS, PortRole::Responder),
        PortRole::Responder => (MEM_SIDE_PORTS, PortRole::Requestor),
    };
    if let Some(peer) = system.port(port).peer {
        return Err(ConfigError::PortInUse {
            port: system.port_path(port),
            peer: system.port_path(peer),
        });
    }

    let index = slots(system, bus, slot_role).count();
    let slot = system.add_port(bus.id, &format!("{prefix}[{index}]"), slot_role);
    system.connect(slot, port)?;
    debug!(bus = bus.role.instance_name(), slot = index, side = prefix, "attached");
    Ok(slot)
}

/// Bus slots on the side with `role` (`Responder` = CPU side, `Requestor` = memory side).
pub fn slots<'a>(
    system: &'a System,
    bus: &Crossbar,
    role: PortRole,
) -> impl Iterator<Item = PortId> + 'a {
    system
        .ports_of(bus.id)
        .filter(move |p| p.role == role)
        .map(|p| p.id)
}
