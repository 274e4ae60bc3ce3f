//! Component graph and the root `System` aggregate.
//!
//! The system owns every component and every port in two arenas. Ports refer
//! to their owner and their peer by index only, so the graph has no shared
//! mutable handles and no reference cycles. It provides:
//! 1. **Identity:** `ComponentId` and `PortId`, stable for the lifetime of the system.
//! 2. **Construction:** Adding components and ports, and connecting port pairs.
//! 3. **Queries:** Lookups by kind, parent, and name used by builders, the validator, and stats.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::common::{AddrRange, ConfigError, ParamSet};
use crate::config::MemMode;
use crate::sim::loader::WorkloadBinding;
use crate::soc::cache::CacheTier;
use crate::soc::catalog::DefaultingEvent;
use crate::soc::interconnect::XBarRole;

/// Name of the root component; every instance name is qualified under it.
pub const ROOT_NAME: &str = "system";

/// Stable identity of a component within one system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Arena index of this component.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Stable identity of a port within one system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PortId(usize);

impl PortId {
    /// Arena index of this port.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Direction of a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortRole {
    /// Emits requests (e.g. a CPU's data port, a cache's memory side).
    Requestor,
    /// Services requests (e.g. a cache's CPU side, a memory controller).
    Responder,
}

impl PortRole {
    /// The role a peer must have to connect to a port of this role.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Requestor => Self::Responder,
            Self::Responder => Self::Requestor,
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requestor => f.write_str("requestor"),
            Self::Responder => f.write_str("responder"),
        }
    }
}

/// What a component is, structurally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// The root aggregate itself (owns the functional system port).
    System,
    /// A processor core.
    Cpu,
    /// A per-core interrupt controller.
    InterruptController,
    /// A cache at the given tier.
    Cache(CacheTier),
    /// A crossbar in the given role.
    Crossbar(XBarRole),
    /// A memory controller.
    MemCtrl,
    /// A DRAM timing model bound to a memory controller.
    TimingModel,
}

/// A constructed hardware element.
#[derive(Clone, Debug, Serialize)]
pub struct Component {
    /// Identity within the owning system.
    pub id: ComponentId,
    /// Fully qualified instance name (e.g. `system.cpu.icache`).
    pub name: String,
    /// Structural kind.
    pub kind: ComponentKind,
    /// Model name (catalog selector or fixed class name, e.g. `L2Cache`).
    pub model: String,
    /// Enclosing component, if any.
    pub parent: Option<ComponentId>,
    /// Resolved parameters.
    pub params: ParamSet,
    /// Ports owned by this component, in creation order.
    pub ports: Vec<PortId>,
}

/// A typed attachment point owned by exactly one component.
#[derive(Clone, Debug, Serialize)]
pub struct Port {
    /// Identity within the owning system.
    pub id: PortId,
    /// Owning component.
    pub owner: ComponentId,
    /// Port name, unique within its owner (e.g. `icache_port`, `mem_side_ports[2]`).
    pub name: String,
    /// Direction.
    pub role: PortRole,
    /// Connected peer, if any.
    pub peer: Option<PortId>,
}

/// Clock and voltage domain shared by every component of the system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClockDomain {
    /// Clock frequency (e.g. `"1GHz"`).
    pub clock: String,
    /// Voltage of the enclosing voltage domain (e.g. `"1.0V"`).
    pub voltage: String,
}

/// Root aggregate: owns every component, port, and the workload binding.
///
/// Created once per configuration run, populated by the builders, validated,
/// and moved into the engine's `Root` at hand-off; it is never mutated after that.
#[derive(Debug, Serialize)]
pub struct System {
    /// Clock and voltage domain.
    pub clk_domain: ClockDomain,
    /// Memory access mode.
    pub mem_mode: MemMode,
    /// Declared physical address ranges.
    pub mem_ranges: Vec<AddrRange>,
    components: Vec<Component>,
    ports: Vec<Port>,
    diagnostics: Vec<DefaultingEvent>,
    workload: Option<WorkloadBinding>,
}

impl System {
    /// Creates an empty system holding only the root component.
    ///
    /// # Arguments
    ///
    /// * `clk_domain` - Clock and voltage of the system.
    /// * `mem_mode` - Memory access mode.
    /// * `mem_ranges` - Declared physical address ranges.
    pub fn new(clk_domain: ClockDomain, mem_mode: MemMode, mem_ranges: Vec<AddrRange>) -> Self {
        let mut system = Self {
            clk_domain,
            mem_mode,
            mem_ranges,
            components: Vec::new(),
            ports: Vec::new(),
            diagnostics: Vec::new(),
            workload: None,
        };
        let _ = system.add_component(
            ROOT_NAME,
            ComponentKind::System,
            "System",
            None,
            ParamSet::new(),
        );
        system
    }

    /// Identity of the root component.
    pub const fn root(&self) -> ComponentId {
        ComponentId(0)
    }

    /// Adds a component and returns its identity.
    ///
    /// The instance name is qualified with the parent's name (`system.cpu` +
    /// `icache` becomes `system.cpu.icache`); a component without a parent
    /// keeps `name` as given.
    ///
    /// # Panics
    ///
    /// If `parent` was issued by a different `System`.
    pub fn add_component(
        &mut self,
        name: &str,
        kind: ComponentKind,
        model: &str,
        parent: Option<ComponentId>,
        params: ParamSet,
    ) -> ComponentId {
        let id = ComponentId(self.components.len());
        let name = match parent {
            Some(p) => format!("{}.{}", self.components[p.0].name, name),
            None => name.to_string(),
        };
        debug!(component = %name, model, "created component");
        self.components.push(Component {
            id,
            name,
            kind,
            model: model.to_string(),
            parent,
            params,
            ports: Vec::new(),
        });
        id
    }

    /// Adds an unconnected port to `owner`.
    ///
    /// # Panics
    ///
    /// If `owner` was issued by a different `System`.
    pub fn add_port(&mut self, owner: ComponentId, name: &str, role: PortRole) -> PortId {
        let id = PortId(self.ports.len());
        self.ports.push(Port {
            id,
            owner,
            name: name.to_string(),
            role,
            peer: None,
        });
        self.components[owner.0].ports.push(id);
        id
    }

    /// Connects two ports.
    ///
    /// # Returns
    ///
    /// `ConfigError::PortInUse` if either port already has a peer, or
    /// `ConfigError::RoleMismatch` if both ports have the same direction.
    /// The graph is left unchanged on error.
    pub fn connect(&mut self, a: PortId, b: PortId) -> Result<(), ConfigError> {
        for port in [a, b] {
            if let Some(peer) = self.ports[port.0].peer {
                return Err(ConfigError::PortInUse {
                    port: self.port_path(port),
                    peer: self.port_path(peer),
                });
            }
        }
        let role = self.ports[a.0].role;
        if self.ports[b.0].role == role {
            return Err(ConfigError::RoleMismatch {
                from: self.port_path(a),
                to: self.port_path(b),
                role,
            });
        }
        self.ports[a.0].peer = Some(b);
        self.ports[b.0].peer = Some(a);
        debug!(from = %self.port_path(a), to = %self.port_path(b), "connected");
        Ok(())
    }

    /// Returns the component with the given identity.
    ///
    /// Ids are arena indices and only meaningful for the system that issued
    /// them.
    ///
    /// # Panics
    ///
    /// If `id` was issued by a different, larger `System`.
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    /// Mutable access to a component's parameter map.
    pub fn params_mut(&mut self, id: ComponentId) -> &mut ParamSet {
        &mut self.components[id.0].params
    }

    /// Returns the port with the given identity.
    ///
    /// # Panics
    ///
    /// If `id` was issued by a different, larger `System`.
    pub fn port(&self, id: PortId) -> &Port {
        &self.ports[id.0]
    }

    /// All components, in creation order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// All ports, in creation order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Components whose kind satisfies `pred`.
    pub fn components_where(
        &self,
        pred: impl Fn(ComponentKind) -> bool,
    ) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| pred(c.kind))
    }

    /// Direct children of `parent`.
    pub fn children(&self, parent: ComponentId) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(move |c| c.parent == Some(parent))
    }

    /// Ports owned by `owner`.
    pub fn ports_of(&self, owner: ComponentId) -> impl Iterator<Item = &Port> {
        self.components[owner.0]
            .ports
            .iter()
            .map(move |id| &self.ports[id.0])
    }

    /// Finds a port of `owner` by name.
    pub fn find_port(&self, owner: ComponentId, name: &str) -> Option<PortId> {
        self.ports_of(owner).find(|p| p.name == name).map(|p| p.id)
    }

    /// Finds a component by fully qualified name.
    pub fn find_component(&self, name: &str) -> Option<ComponentId> {
        self.components.iter().find(|c| c.name == name).map(|c| c.id)
    }

    /// Fully qualified port name, e.g. `system.membus.cpu_side_ports[0]`.
    pub fn port_path(&self, id: PortId) -> String {
        let port = &self.ports[id.0];
        format!("{}.{}", self.components[port.owner.0].name, port.name)
    }

    /// Records a defaulting event emitted while building this system.
    pub fn record_default(&mut self, event: DefaultingEvent) {
        self.diagnostics.push(event);
    }

    /// Defaulting events emitted while building this system.
    pub fn diagnostics(&self) -> &[DefaultingEvent] {
        &self.diagnostics
    }

    /// The bound workload, if any.
    pub const fn workload(&self) -> Option<&WorkloadBinding> {
        self.workload.as_ref()
    }

    /// Attaches the workload binding; a system accepts exactly one.
    ///
    /// # Returns
    ///
    /// The rejected binding if one was already attached.
    pub fn set_workload(&mut self, binding: WorkloadBinding) -> Result<(), WorkloadBinding> {
        if self.workload.is_some() {
            return Err(binding);
        }
        self.workload = Some(binding);
        Ok(())
    }

    /// Every component's `(name, model, params)`, in creation order.
    ///
    /// Two runs with identical inputs produce equal parameter sets; this is
    /// what determinism is measured against (not object identity).
    pub fn parameter_sets(&self) -> Vec<(String, String, ParamSet)> {
        self.components
            .iter()
            .map(|c| (c.name.clone(), c.model.clone(), c.params.clone()))
            .collect()
    }
}
