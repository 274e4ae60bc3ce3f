//! Interconnect Builder Tests.
//!
//! Requestors attach to new CPU-side slots, responders to new memory-side
//! slots, with no capacity limit.

use hbmcfg_core::common::{AddrRange, Param};
use hbmcfg_core::config::MemMode;
use hbmcfg_core::soc::interconnect::{self, XBarRole};
use hbmcfg_core::soc::system::{ClockDomain, ComponentKind, PortRole, System};

fn system() -> System {
    System::new(
        ClockDomain {
            clock: "1GHz".into(),
            voltage: "1.0V".into(),
        },
        MemMode::Timing,
        vec![AddrRange::with_size(0x1000)],
    )
}

#[test]
fn crossbar_roles_and_defaults() {
    let mut system = system();
    let membus = interconnect::create_crossbar(&mut system, XBarRole::SystemWide);
    let l2bus = interconnect::create_crossbar(&mut system, XBarRole::PerCore);

    let m = system.component(membus.id);
    assert_eq!(m.name, "system.membus");
    assert_eq!(m.model, "SystemXBar");
    assert_eq!(m.kind, ComponentKind::Crossbar(XBarRole::SystemWide));
    assert_eq!(m.params["width"], Param::Int(16));
    assert_eq!(m.params["forward_latency"], Param::Int(4));

    let l = system.component(l2bus.id);
    assert_eq!(l.name, "system.l2bus");
    assert_eq!(l.params["width"], Param::Int(32));
    assert_eq!(l.params["forward_latency"], Param::Int(0));
}

#[test]
fn requestors_and_responders_get_separate_slot_sequences() {
    let mut system = system();
    let root = system.root();
    let bus = interconnect::create_crossbar(&mut system, XBarRole::SystemWide);

    let r0 = system.add_port(root, "r0", PortRole::Requestor);
    let r1 = system.add_port(root, "r1", PortRole::Requestor);
    let s0 = system.add_port(root, "s0", PortRole::Responder);

    let a = interconnect::attach(&mut system, &bus, r0).unwrap();
    let b = interconnect::attach(&mut system, &bus, s0).unwrap();
    let c = interconnect::attach(&mut system, &bus, r1).unwrap();

    assert_eq!(system.port(a).name, "cpu_side_ports[0]");
    assert_eq!(system.port(a).role, PortRole::Responder);
    assert_eq!(system.port(b).name, "mem_side_ports[0]");
    assert_eq!(system.port(b).role, PortRole::Requestor);
    assert_eq!(system.port(c).name, "cpu_side_ports[1]");
    assert_eq!(system.port(r1).peer, Some(c));

    assert_eq!(interconnect::slots(&system, &bus, PortRole::Responder).count(), 2);
    assert_eq!(interconnect::slots(&system, &bus, PortRole::Requestor).count(), 1);
}

#[test]
fn unbounded_fan_in() {
    let mut system = system();
    let root = system.root();
    let bus = interconnect::create_crossbar(&mut system, XBarRole::PerCore);
    for i in 0..64 {
        let port = system.add_port(root, &format!("p{i}"), PortRole::Requestor);
        let _ = interconnect::attach(&mut system, &bus, port).unwrap();
    }
    assert_eq!(interconnect::slots(&system, &bus, PortRole::Responder).count(), 64);
}

#[test]
fn attaching_a_connected_port_fails_without_new_slot() {
    let mut system = system();
    let root = system.root();
    let bus = interconnect::create_crossbar(&mut system, XBarRole::PerCore);
    let port = system.add_port(root, "p", PortRole::Requestor);
    let _ = interconnect::attach(&mut system, &bus, port).unwrap();

    assert!(interconnect::attach(&mut system, &bus, port).is_err());
    assert_eq!(interconnect::slots(&system, &bus, PortRole::Responder).count(), 1);
}
