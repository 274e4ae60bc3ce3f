//! Cache tier builder.
//!
//! This module constructs individual cache instances of the two-level hierarchy. It provides:
//! 1. **Tiers:** L1 instruction, L1 data, and unified L2, each with its own default geometry.
//! 2. **Construction:** A cache component with a CPU-side (responder) and memory-side (requestor) port.
//! 3. **Wiring:** Attaching the CPU side to a core port or an upstream bus, and the memory side to a bus.
//!
//! Geometry is not validated here; sizes flow straight from resolution into the
//! component and legality is left to the simulation engine.

use serde::Serialize;

use crate::common::{ConfigError, ParamSet};
use crate::config::defaults;
use crate::soc::interconnect::{self, Crossbar};
use crate::soc::system::{ComponentId, ComponentKind, PortId, PortRole, System};

/// Name of a cache's CPU-side port.
pub const CPU_SIDE: &str = "cpu_side";

/// Name of a cache's memory-side port.
pub const MEM_SIDE: &str = "mem_side";

/// A level of the cache hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheTier {
    /// Private L1 instruction cache.
    L1Instruction,
    /// Private L1 data cache.
    L1Data,
    /// Unified L2 cache behind the per-core crossbar.
    L2,
}

impl CacheTier {
    /// Class name recorded as the component's model.
    pub const fn model_name(self) -> &'static str {
        match self {
            Self::L1Instruction => "L1ICache",
            Self::L1Data => "L1DCache",
            Self::L2 => "L2Cache",
        }
    }

    /// Instance name relative to the parent component.
    pub const fn instance_name(self) -> &'static str {
        match self {
            Self::L1Instruction => "icache",
            Self::L1Data => "dcache",
            Self::L2 => "l2cache",
        }
    }

    /// Returns `true` for the private L1 tiers, whose CPU side faces a core port.
    pub const fn is_l1(self) -> bool {
        matches!(self, Self::L1Instruction | Self::L1Data)
    }
}

/// Resolved parameters of one cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheParams {
    /// Capacity, as given (e.g. `"64kB"`).
    pub size: String,
    /// Associativity.
    pub assoc: u32,
    /// Tag lookup latency in cycles.
    pub tag_latency: u32,
    /// Data access latency in cycles.
    pub data_latency: u32,
    /// Response latency in cycles.
    pub response_latency: u32,
    /// Miss status holding registers.
    pub mshrs: u32,
    /// Outstanding targets per MSHR.
    pub tgts_per_mshr: u32,
}

impl CacheParams {
    /// Default geometry and timing of `tier`.
    pub fn for_tier(tier: CacheTier) -> Self {
        let l1 = |size: &str| Self {
            size: size.to_string(),
            assoc: 2,
            tag_latency: 2,
            data_latency: 2,
            response_latency: 2,
            mshrs: 4,
            tgts_per_mshr: 20,
        };
        match tier {
            CacheTier::L1Instruction => l1(defaults::L1I_SIZE),
            CacheTier::L1Data => l1(defaults::L1D_SIZE),
            CacheTier::L2 => Self {
                size: defaults::L2_SIZE.to_string(),
                assoc: 8,
                tag_latency: 20,
                data_latency: 20,
                response_latency: 20,
                mshrs: 20,
                tgts_per_mshr: 12,
            },
        }
    }

    /// Replaces the capacity.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    fn to_param_set(&self) -> ParamSet {
        let mut params = ParamSet::new();
        let _ = params.insert("size".into(), self.size.clone().into());
        let _ = params.insert("assoc".into(), self.assoc.into());
        let _ = params.insert("tag_latency".into(), self.tag_latency.into());
        let _ = params.insert("data_latency".into(), self.data_latency.into());
        let _ = params.insert("response_latency".into(), self.response_latency.into());
        let _ = params.insert("mshrs".into(), self.mshrs.into());
        let _ = params.insert("tgts_per_mshr".into(), self.tgts_per_mshr.into());
        params
    }
}

/// Handle to a constructed cache inside a `System`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cache {
    /// The cache component.
    pub id: ComponentId,
    /// Tier of this cache.
    pub tier: CacheTier,
    /// CPU-side (responder) port.
    pub cpu_side: PortId,
    /// Memory-side (requestor) port.
    pub mem_side: PortId,
}

/// Constructs one cache under `parent`.
///
/// # Arguments
///
/// * `system` - The system that will own the cache.
/// * `tier` - Which level to build.
/// * `parent` - Enclosing component (the core for L1 tiers, the root for L2).
/// * `params` - Resolved parameters.
///
/// # Returns
///
/// A handle exposing the cache's two unconnected ports.
pub fn build(
    system: &mut System,
    tier: CacheTier,
    parent: ComponentId,
    params: &CacheParams,
) -> Cache {
    let id = system.add_component(
        tier.instance_name(),
        ComponentKind::Cache(tier),
        tier.model_name(),
        Some(parent),
        params.to_param_set(),
    );
    let cpu_side = system.add_port(id, CPU_SIDE, PortRole::Responder);
    let mem_side = system.add_port(id, MEM_SIDE, PortRole::Requestor);
    Cache {
        id,
        tier,
        cpu_side,
        mem_side,
    }
}

impl Cache {
    /// Connects the CPU side to a single upstream port (e.g. a core's `icache_port`).
    ///
    /// Fails with `ConfigError::PortInUse` if either side is already connected.
    pub fn connect_cpu_side(&self, system: &mut System, port: PortId) -> Result<(), ConfigError> {
        system.connect(self.cpu_side, port)
    }

    /// Connects the CPU side to the memory side of an upstream bus (the L2 behind the per-core crossbar).
    pub fn connect_cpu_side_bus(
        &self,
        system: &mut System,
        bus: &Crossbar,
    ) -> Result<(), ConfigError> {
        interconnect::attach(system, bus, self.cpu_side).map(|_| ())
    }

    /// Connects the memory side to the CPU side of a downstream bus.
    pub fn connect_bus_side(&self, system: &mut System, bus: &Crossbar) -> Result<(), ConfigError> {
        interconnect::attach(system, bus, self.mem_side).map(|_| ())
    }
}
