//! Core assembly.
//!
//! This module builds the processor core of the topology. It provides:
//! 1. **Style dispatch:** Selecting a CPU model through the catalog in [`cpu`].
//! 2. **Port wiring:** The core's instruction and data ports, attached to L1 caches or straight to the system bus.
//! 3. **Interrupt path:** One interrupt controller per core, wired to the system-wide bus.

/// CPU style catalog.
pub mod cpu;

/// Per-core interrupt controller.
pub mod interrupts;

use tracing::{debug, info};

use crate::common::{ConfigError, Param, param::param_set, resolve};
use crate::config::Config;
use crate::soc::interconnect::{self, Crossbar};
use crate::soc::system::{ComponentId, ComponentKind, PortId, PortRole, System};

pub use self::cpu::{CPU_CATALOG, CpuModel, CpuStyle};
pub use self::interrupts::InterruptController;

/// Instance name of the core under the root.
pub const INSTANCE_NAME: &str = "cpu";

/// Name of the core's instruction-fetch port.
pub const ICACHE_PORT: &str = "icache_port";

/// Name of the core's data port.
pub const DCACHE_PORT: &str = "dcache_port";

/// Functional-unit latency overrides, in cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FuOverrides {
    /// Floating-point/SIMD operation latency.
    pub fpu_operation_latency: Option<u32>,
    /// Floating-point/SIMD issue latency.
    pub fpu_issue_latency: Option<u32>,
    /// Integer operation latency.
    pub intfu_operation_latency: Option<u32>,
}

impl FuOverrides {
    /// Extracts the functional-unit overrides from a configuration.
    pub const fn from_config(config: &Config) -> Self {
        Self {
            fpu_operation_latency: config.fpu_operation_latency,
            fpu_issue_latency: config.fpu_issue_latency,
            intfu_operation_latency: config.intfu_operation_latency,
        }
    }

    /// Returns `true` if no override is set.
    pub const fn is_empty(&self) -> bool {
        self.fpu_operation_latency.is_none()
            && self.fpu_issue_latency.is_none()
            && self.intfu_operation_latency.is_none()
    }

    const fn entries(&self) -> [(&'static str, Option<u32>); 3] {
        [
            (cpu::FPU_OPERATION_LATENCY, self.fpu_operation_latency),
            (cpu::FPU_ISSUE_LATENCY, self.fpu_issue_latency),
            (cpu::INTFU_OPERATION_LATENCY, self.intfu_operation_latency),
        ]
    }
}

/// Handle to a constructed core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Core {
    /// The core component.
    pub id: ComponentId,
    /// Selected style.
    pub style: CpuStyle,
    /// Selected catalog name.
    pub model: &'static str,
    /// Instruction-fetch requestor port.
    pub icache_port: PortId,
    /// Data requestor port.
    pub dcache_port: PortId,
}

/// Builds the core and its interrupt controller.
///
/// The interrupt controller is wired to `membus` here; the core's own ports are
/// left unconnected for the caller to attach to caches or the bus.
///
/// # Arguments
///
/// * `system` - The system that will own the core.
/// * `selector` - CPU style name; absent, empty, or unknown selects `TimingSimpleCPU`.
/// * `overrides` - Functional-unit latency overrides.
/// * `membus` - The system-wide crossbar.
///
/// # Returns
///
/// The core and its interrupt controller.
pub fn build(
    system: &mut System,
    selector: Option<&str>,
    overrides: &FuOverrides,
    membus: &Crossbar,
) -> Result<(Core, InterruptController), ConfigError> {
    let selection = CPU_CATALOG.lookup(selector);
    if let Some(event) = selection.fallback {
        system.record_default(event);
    }
    let entry = selection.entry;
    let style = entry.variant.style;

    let mut params = param_set(entry.variant.defaults);
    if style.models_functional_units() {
        for (name, value) in overrides.entries() {
            let default = params.get(name).and_then(Param::as_int).unwrap_or_default();
            let _ = params.insert(name.to_string(), resolve(value.map(u64::from), default).into());
        }
    } else if !overrides.is_empty() {
        debug!(
            cpu = entry.name,
            "style has no functional units; ignoring latency overrides"
        );
    }
    entry.check_required(INSTANCE_NAME, &params)?;

    let root = system.root();
    let id = system.add_component(INSTANCE_NAME, ComponentKind::Cpu, entry.name, Some(root), params);
    let icache_port = system.add_port(id, ICACHE_PORT, PortRole::Requestor);
    let dcache_port = system.add_port(id, DCACHE_PORT, PortRole::Requestor);

    let interrupts = InterruptController::create(system, id);
    interrupts.connect(system, membus)?;

    info!(cpu = entry.name, "core assembled");
    Ok((
        Core {
            id,
            style,
            model: entry.name,
            icache_port,
            dcache_port,
        },
        interrupts,
    ))
}

impl Core {
    /// Attaches both core ports directly to `bus` (no cache hierarchy).
    pub fn connect_to_bus(&self, system: &mut System, bus: &Crossbar) -> Result<(), ConfigError> {
        let _ = interconnect::attach(system, bus, self.icache_port)?;
        let _ = interconnect::attach(system, bus, self.dcache_port)?;
        Ok(())
    }
}
