//! Topology statistics and reporting.
//!
//! This module summarizes an assembled system. It provides:
//! 1. **Component counts:** Cores, caches per tier, crossbars, memory controllers.
//! 2. **Wiring:** Total ports, established connections, and dangling ports.
//! 3. **Memory:** Declared capacity and the selected timing model's peak bandwidth.
//! 4. **Diagnostics:** Defaulting events recorded while building.

use serde::Serialize;

use crate::soc::cache::CacheTier;
use crate::soc::memory::DRAM_CATALOG;
use crate::soc::system::{ComponentKind, System};

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"components"`, `"memory"`, `"diagnostics"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "components", "memory", "diagnostics"];

/// Structural statistics of one system.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TopologyStats {
    /// Total components, including the root.
    pub components: usize,
    /// Total ports.
    pub ports: usize,
    /// Connected port pairs.
    pub connections: usize,
    /// Ports without a peer.
    pub unconnected_ports: usize,

    /// Processor cores.
    pub cores: usize,
    /// Interrupt controllers.
    pub interrupt_controllers: usize,
    /// L1 instruction caches.
    pub l1i_caches: usize,
    /// L1 data caches.
    pub l1d_caches: usize,
    /// L2 caches.
    pub l2_caches: usize,
    /// Crossbars of either role.
    pub crossbars: usize,
    /// Memory controllers.
    pub mem_ctrls: usize,

    /// Bytes covered by the declared address ranges.
    pub declared_bytes: u64,
    /// Timing model names bound to memory controllers.
    pub dram_models: Vec<String>,
    /// Sum of the bound timing models' peak bandwidth, in bytes per second.
    pub peak_bandwidth: u64,

    /// Defaulting events, formatted.
    pub defaulting_events: Vec<String>,
}

impl TopologyStats {
    /// Collects statistics from `system`.
    pub fn from_system(system: &System) -> Self {
        let mut stats = Self {
            components: system.components().len(),
            ports: system.ports().len(),
            ..Self::default()
        };

        for component in system.components() {
            match component.kind {
                ComponentKind::Cpu => stats.cores += 1,
                ComponentKind::InterruptController => stats.interrupt_controllers += 1,
                ComponentKind::Cache(CacheTier::L1Instruction) => stats.l1i_caches += 1,
                ComponentKind::Cache(CacheTier::L1Data) => stats.l1d_caches += 1,
                ComponentKind::Cache(CacheTier::L2) => stats.l2_caches += 1,
                ComponentKind::Crossbar(_) => stats.crossbars += 1,
                ComponentKind::MemCtrl => stats.mem_ctrls += 1,
                ComponentKind::TimingModel => {
                    if let Some(entry) = DRAM_CATALOG.get(&component.model) {
                        stats.peak_bandwidth += entry.variant.peak_bandwidth();
                    }
                    stats.dram_models.push(component.model.clone());
                }
                ComponentKind::System => {}
            }
        }

        let connected = system.ports().iter().filter(|p| p.peer.is_some()).count();
        stats.connections = connected / 2;
        stats.unconnected_ports = stats.ports - connected;
        stats.declared_bytes = system.mem_ranges.iter().map(|r| r.size()).sum();
        stats.defaulting_events = system
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect();
        stats
    }

    /// Prints all sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    /// Prints only the requested sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Names from [`STATS_SECTIONS`], or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("summary") {
            println!("\n==========================================================");
            println!("SIMULATION TOPOLOGY STATISTICS");
            println!("==========================================================");
            println!("topo_components          {}", self.components);
            println!("topo_ports               {}", self.ports);
            println!("topo_connections         {}", self.connections);
            println!("topo_unconnected         {}", self.unconnected_ports);
            println!("----------------------------------------------------------");
        }
        if want("components") {
            println!("COMPONENTS");
            println!("  cpu                    {}", self.cores);
            println!("  interrupts             {}", self.interrupt_controllers);
            println!("  cache.l1i              {}", self.l1i_caches);
            println!("  cache.l1d              {}", self.l1d_caches);
            println!("  cache.l2               {}", self.l2_caches);
            println!("  xbar                   {}", self.crossbars);
            println!("  mem_ctrl               {}", self.mem_ctrls);
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            println!("MEMORY");
            println!(
                "  mem.declared           {} MiB",
                self.declared_bytes / (1024 * 1024)
            );
            println!("  mem.models             {}", self.dram_models.join(", "));
            println!(
                "  mem.peak_bw            {:.2} GB/s",
                self.peak_bandwidth as f64 / 1e9
            );
            println!("----------------------------------------------------------");
        }
        if want("diagnostics") {
            println!("DIAGNOSTICS");
            if self.defaulting_events.is_empty() {
                println!("  (none)");
            }
            for event in &self.defaulting_events {
                println!("  {event}");
            }
            println!("==========================================================");
        }
    }
}
