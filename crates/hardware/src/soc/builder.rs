//! Topology construction.
//!
//! This module assembles a complete `System` from a configuration. It performs:
//! 1. **Resolution:** Applies the override-else-default rule to every recognized setting.
//! 2. **Bus setup:** Creates the system-wide crossbar, and the per-core crossbar when caches are built.
//! 3. **Core and caches:** Builds the core, then either the L1/L2 hierarchy or a direct bus connection.
//! 4. **Memory:** Builds the controller for the declared range and attaches it and the system port.
//! 5. **Validation:** `System::build` runs the structural checks before returning.

use tracing::info;

use crate::common::{AddrRange, ConfigError, resolve};
use crate::config::{Config, MemMode, defaults};
use crate::core::{self, FuOverrides};
use crate::soc::cache::{self, CacheParams, CacheTier};
use crate::soc::interconnect::{self, XBarRole};
use crate::soc::memory;
use crate::soc::system::{ClockDomain, PortRole, System};

/// Name of the root component's functional port.
pub const SYSTEM_PORT: &str = "system_port";

impl System {
    /// Assembles the topology described by `config` without validating it.
    ///
    /// Absent selectors resolve to `defaults::CPU` and `defaults::MEMORY`
    /// before the catalog lookup. Unknown ones fall back to the catalog
    /// default and are recorded in [`System::diagnostics`].
    ///
    /// # Arguments
    ///
    /// * `config` - The run's overrides; absent fields take their defaults.
    ///
    /// # Returns
    ///
    /// The wired system, or the first fatal wiring or range error.
    pub fn assemble(config: &Config) -> Result<Self, ConfigError> {
        let clk_domain = ClockDomain {
            clock: resolve(config.clock.as_deref(), defaults::CLOCK).to_string(),
            voltage: resolve(config.voltage.as_deref(), defaults::VOLTAGE).to_string(),
        };
        let mem_mode = resolve(config.mem_mode, MemMode::default());
        let mem_range = AddrRange::parse(resolve(config.mem_size.as_deref(), defaults::MEM_SIZE))?;
        let caches = resolve(config.caches, defaults::CACHES);

        info!(
            clock = %clk_domain.clock,
            mem_mode = ?mem_mode,
            mem_range = %mem_range,
            caches,
            "assembling topology"
        );
        let mut system = Self::new(clk_domain, mem_mode, vec![mem_range]);
        let membus = interconnect::create_crossbar(&mut system, XBarRole::SystemWide);

        let (cpu, _) = core::build(
            &mut system,
            Some(resolve(config.cpu.as_deref(), defaults::CPU)),
            &FuOverrides::from_config(config),
            &membus,
        )?;

        if caches {
            let l1i = CacheParams::for_tier(CacheTier::L1Instruction)
                .with_size(resolve(config.l1i_size.as_deref(), defaults::L1I_SIZE));
            let l1d = CacheParams::for_tier(CacheTier::L1Data)
                .with_size(resolve(config.l1d_size.as_deref(), defaults::L1D_SIZE));
            let l2 = CacheParams::for_tier(CacheTier::L2)
                .with_size(resolve(config.l2_size.as_deref(), defaults::L2_SIZE));

            let icache = cache::build(&mut system, CacheTier::L1Instruction, cpu.id, &l1i);
            let dcache = cache::build(&mut system, CacheTier::L1Data, cpu.id, &l1d);
            icache.connect_cpu_side(&mut system, cpu.icache_port)?;
            dcache.connect_cpu_side(&mut system, cpu.dcache_port)?;

            let l2bus = interconnect::create_crossbar(&mut system, XBarRole::PerCore);
            icache.connect_bus_side(&mut system, &l2bus)?;
            dcache.connect_bus_side(&mut system, &l2bus)?;

            let root = system.root();
            let l2cache = cache::build(&mut system, CacheTier::L2, root, &l2);
            l2cache.connect_cpu_side_bus(&mut system, &l2bus)?;
            l2cache.connect_bus_side(&mut system, &membus)?;
        } else {
            cpu.connect_to_bus(&mut system, &membus)?;
        }

        let root = system.root();
        let system_port = system.add_port(root, SYSTEM_PORT, PortRole::Requestor);
        let _ = interconnect::attach(&mut system, &membus, system_port)?;

        let mem = memory::build(
            &mut system,
            Some(resolve(config.memory.as_deref(), defaults::MEMORY)),
            mem_range,
        )?;
        mem.connect(&mut system, &membus)?;

        info!(
            components = system.components().len(),
            defaults_applied = system.diagnostics().len(),
            "topology assembled"
        );
        Ok(system)
    }

    /// Assembles and validates the topology described by `config`.
    ///
    /// # Returns
    ///
    /// A system ready for workload binding and hand-off, or
    /// `ConfigError::Structural` naming every violated invariant.
    pub fn build(config: &Config) -> Result<Self, ConfigError> {
        let system = Self::assemble(config)?;
        system.validate()?;
        Ok(system)
    }
}
