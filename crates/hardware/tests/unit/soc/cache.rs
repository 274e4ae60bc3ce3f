//! Cache Tier Builder Tests.

use hbmcfg_core::common::{AddrRange, ConfigError, Param};
use hbmcfg_core::config::MemMode;
use hbmcfg_core::soc::cache::{self, CacheParams, CacheTier};
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
fn tier_defaults() {
    let l1i = CacheParams::for_tier(CacheTier::L1Instruction);
    assert_eq!(l1i.size, "16kB");
    assert_eq!(l1i.assoc, 2);
    assert_eq!(l1i.mshrs, 4);
    assert_eq!(l1i.tgts_per_mshr, 20);

    assert_eq!(CacheParams::for_tier(CacheTier::L1Data).size, "64kB");

    let l2 = CacheParams::for_tier(CacheTier::L2);
    assert_eq!(l2.size, "256kB");
    assert_eq!(l2.assoc, 8);
    assert_eq!(l2.tag_latency, 20);
    assert_eq!(l2.tgts_per_mshr, 12);
}

#[test]
fn build_creates_component_and_two_ports() {
    let mut system = system();
    let root = system.root();
    let params = CacheParams::for_tier(CacheTier::L2).with_size("1MB");
    let l2 = cache::build(&mut system, CacheTier::L2, root, &params);

    let component = system.component(l2.id);
    assert_eq!(component.name, "system.l2cache");
    assert_eq!(component.model, "L2Cache");
    assert_eq!(component.kind, ComponentKind::Cache(CacheTier::L2));
    assert_eq!(component.params["size"], Param::from("1MB"));
    assert_eq!(system.port(l2.cpu_side).role, PortRole::Responder);
    assert_eq!(system.port(l2.mem_side).role, PortRole::Requestor);
    assert_eq!(system.port(l2.cpu_side).peer, None);
}

#[test]
fn geometry_is_not_validated() {
    let mut system = system();
    let root = system.root();
    let params = CacheParams::for_tier(CacheTier::L1Data).with_size("3kB");
    let dcache = cache::build(&mut system, CacheTier::L1Data, root, &params);
    assert_eq!(system.component(dcache.id).params["size"], Param::from("3kB"));
}

#[test]
fn connect_cpu_side_twice_fails() {
    let mut system = system();
    let root = system.root();
    let core_port = system.add_port(root, "icache_port", PortRole::Requestor);
    let other = system.add_port(root, "other", PortRole::Requestor);
    let icache = cache::build(
        &mut system,
        CacheTier::L1Instruction,
        root,
        &CacheParams::for_tier(CacheTier::L1Instruction),
    );

    icache.connect_cpu_side(&mut system, core_port).unwrap();
    assert!(matches!(
        icache.connect_cpu_side(&mut system, other),
        Err(ConfigError::PortInUse { .. })
    ));
}

#[test]
fn bus_side_attaches_to_cpu_side_slot() {
    let mut system = system();
    let root = system.root();
    let bus = interconnect::create_crossbar(&mut system, XBarRole::PerCore);
    let dcache = cache::build(
        &mut system,
        CacheTier::L1Data,
        root,
        &CacheParams::for_tier(CacheTier::L1Data),
    );

    dcache.connect_bus_side(&mut system, &bus).unwrap();
    let peer = system.port(dcache.mem_side).peer.unwrap();
    assert_eq!(system.port_path(peer), "system.l2bus.cpu_side_ports[0]");

    assert!(matches!(
        dcache.connect_bus_side(&mut system, &bus),
        Err(ConfigError::PortInUse { .. })
    ));
}
