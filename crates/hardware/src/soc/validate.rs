//! Topology validation.
//!
//! This module checks an assembled system before it is handed to the engine. It provides:
//! 1. **Cache wiring:** Each cache has one upstream consumer of the right kind and one bus downstream.
//! 2. **Bus termination:** Every bus reaches a responder; the system bus reaches interrupts and memory.
//! 3. **Address coverage:** Controller ranges exactly cover the declared ranges, without overlap.
//! 4. **Interrupt path:** One fully wired interrupt controller per core.
//! 5. **Completeness:** No port is left dangling.
//!
//! Every check runs to completion and all violations are returned together.

use tracing::{info, warn};

use crate::common::addr::{coalesce, describe};
use crate::common::{StructuralError, Violation};
use crate::core::{self, interrupts};
use crate::soc::cache::{self, CacheTier};
use crate::soc::interconnect::XBarRole;
use crate::soc::memory;
use crate::soc::system::{Component, ComponentKind, PortId, PortRole, System};

/// Checks every structural invariant of `system`.
///
/// # Returns
///
/// `Ok(())` if the topology is well formed, otherwise a `StructuralError`
/// listing every violation found.
pub fn validate(system: &System) -> Result<(), StructuralError> {
    let mut violations = Vec::new();
    check_caches(system, &mut violations);
    check_buses(system, &mut violations);
    check_address_map(system, &mut violations);
    check_interrupts(system, &mut violations);
    check_dangling(system, &mut violations);

    if violations.is_empty() {
        info!(
            components = system.components().len(),
            ports = system.ports().len(),
            "topology validated"
        );
        Ok(())
    } else {
        for violation in &violations {
            warn!("{violation}");
        }
        Err(StructuralError { violations })
    }
}

impl System {
    /// Checks every structural invariant; see [`validate`].
    pub fn validate(&self) -> Result<(), StructuralError> {
        validate(self)
    }
}

/// Owner of the peer of `port`, if connected.
fn peer_owner(system: &System, port: PortId) -> Option<(&Component, PortId)> {
    system
        .port(port)
        .peer
        .map(|peer| (system.component(system.port(peer).owner), peer))
}

fn check_caches(system: &System, out: &mut Vec<Violation>) {
    for cache in system.components_where(|k| matches!(k, ComponentKind::Cache(_))) {
        let ComponentKind::Cache(tier) = cache.kind else {
            continue;
        };

        match system.find_port(cache.id, cache::CPU_SIDE) {
            Some(port) => match peer_owner(system, port) {
                None => out.push(Violation::CacheCpuSideUnconnected {
                    cache: cache.name.clone(),
                    port: cache::CPU_SIDE.into(),
                }),
                Some((owner, peer)) => {
                    let peer_name = &system.port(peer).name;
                    let (ok, expected) = match tier {
                        CacheTier::L1Instruction => (
                            owner.kind == ComponentKind::Cpu && peer_name == core::ICACHE_PORT,
                            format!("a core's {}", core::ICACHE_PORT),
                        ),
                        CacheTier::L1Data => (
                            owner.kind == ComponentKind::Cpu && peer_name == core::DCACHE_PORT,
                            format!("a core's {}", core::DCACHE_PORT),
                        ),
                        CacheTier::L2 => (
                            owner.kind == ComponentKind::Crossbar(XBarRole::PerCore),
                            "a per-core bus port".to_string(),
                        ),
                    };
                    if !ok {
                        out.push(Violation::CacheCpuSideMismatch {
                            cache: cache.name.clone(),
                            port: cache::CPU_SIDE.into(),
                            peer: system.port_path(peer),
                            expected,
                        });
                    }
                }
            },
            None => out.push(Violation::CacheCpuSideUnconnected {
                cache: cache.name.clone(),
                port: cache::CPU_SIDE.into(),
            }),
        }

        let bus_side = system
            .find_port(cache.id, cache::MEM_SIDE)
            .and_then(|port| peer_owner(system, port));
        match bus_side {
            None => out.push(Violation::CacheBusSideUnconnected {
                cache: cache.name.clone(),
                port: cache::MEM_SIDE.into(),
            }),
            Some((owner, peer)) if !matches!(owner.kind, ComponentKind::Crossbar(_)) => {
                out.push(Violation::CacheBusSideNotBus {
                    cache: cache.name.clone(),
                    port: cache::MEM_SIDE.into(),
                    peer: system.port_path(peer),
                });
            }
            Some(_) => {}
        }
    }
}

fn check_buses(system: &System, out: &mut Vec<Violation>) {
    for bus in system.components_where(|k| matches!(k, ComponentKind::Crossbar(_))) {
        let downstream: Vec<ComponentKind> = system
            .ports_of(bus.id)
            .filter(|p| p.role == PortRole::Requestor)
            .filter_map(|p| peer_owner(system, p.id))
            .map(|(owner, _)| owner.kind)
            .collect();

        if downstream.is_empty() {
            out.push(Violation::BusWithoutResponder {
                bus: bus.name.clone(),
            });
        }

        if bus.kind == ComponentKind::Crossbar(XBarRole::SystemWide) {
            let required = [
                (ComponentKind::InterruptController, "an interrupt controller"),
                (ComponentKind::MemCtrl, "a memory controller"),
            ];
            for (kind, missing) in required {
                if !downstream.contains(&kind) {
                    out.push(Violation::SystemBusMissingResponder {
                        bus: bus.name.clone(),
                        missing: missing.into(),
                    });
                }
            }
        }
    }
}

fn check_address_map(system: &System, out: &mut Vec<Violation>) {
    let mut serviced = Vec::new();
    for controller in system.components_where(|k| k == ComponentKind::MemCtrl) {
        match memory::serviced_range(system, controller.id) {
            Some(range) => serviced.push(range),
            None => out.push(Violation::MissingTimingModel {
                controller: controller.name.clone(),
            }),
        }
    }

    for (i, first) in serviced.iter().enumerate() {
        for second in &serviced[i + 1..] {
            if first.overlaps(second) {
                out.push(Violation::RangeOverlap {
                    first: *first,
                    second: *second,
                });
            }
        }
    }

    if coalesce(&serviced) != coalesce(&system.mem_ranges) {
        out.push(Violation::RangeMismatch {
            declared: describe(&system.mem_ranges),
            serviced: describe(&serviced),
        });
    }
}

fn check_interrupts(system: &System, out: &mut Vec<Violation>) {
    for core in system.components_where(|k| k == ComponentKind::Cpu) {
        let controllers: Vec<&Component> = system
            .children(core.id)
            .filter(|c| c.kind == ComponentKind::InterruptController)
            .collect();
        if controllers.len() != 1 {
            out.push(Violation::InterruptControllerCount {
                core: core.name.clone(),
                count: controllers.len(),
            });
        }

        for controller in controllers {
            for name in interrupts::PORTS {
                let connected = system
                    .find_port(controller.id, name)
                    .is_some_and(|port| system.port(port).peer.is_some());
                if !connected {
                    out.push(Violation::InterruptPortUnconnected {
                        controller: controller.name.clone(),
                        port: name.into(),
                    });
                }
            }
        }
    }
}

fn check_dangling(system: &System, out: &mut Vec<Violation>) {
    for port in system.ports().iter().filter(|p| p.peer.is_none()) {
        out.push(Violation::PortUnconnected {
            component: system.component(port.owner).name.clone(),
            port: port.name.clone(),
        });
    }
}
