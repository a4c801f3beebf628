//! Per-core assembly: private L1 instruction/data caches, optional walker
//! caches, prefetcher overrides, monitor substitution, the predictor
//! frontend splice, or the external-adapter path; plus the interrupt
//! controller, which always reaches memory through the system bus. Every
//! instance built here is owned by exactly one core.

use crate::config::TopologyConfig;
use crate::errors::BuildError;
use crate::factory::{CacheClass, CacheClasses};
use crate::hwp;
use crate::system::{CoreHandles, System};
use crate::topo::{CacheAttrs, CacheLevel, ClockDomain, Component, NodeId};

use super::{external, monitor, predictor};

pub(super) fn assemble_core(
    system: &mut System,
    cfg: &TopologyConfig,
    classes: &CacheClasses,
    core_id: usize,
) -> Result<(), BuildError> {
    let core = system
        .topo
        .add_node(format!("cpu{core_id}"), Component::Core { core_id });

    let mut handles = CoreHandles {
        core,
        ..CoreHandles::default()
    };

    if cfg.caches {
        build_private_caches(system, cfg, classes, core_id, core, &mut handles)?;
    } else if let Some(port_type) = cfg.external_memory_system.as_deref() {
        handles.external = external::attach_external_caches(system, cfg, core_id, core, port_type)?;
    } else {
        // No caches at all: every core port goes straight onto the memory
        // bus.
        for port_name in [
            "icache_port",
            "dcache_port",
            "itb_walker_port",
            "dtb_walker_port",
        ] {
            let slot = system.topo.target_slot(system.membus);
            let issue = system.topo.port(core, port_name)?;
            system.topo.bind(issue, slot)?;
        }
    }

    handles.int_ctrl = wire_interrupt_controller(system, core_id)?;
    system.cores.push(handles);
    Ok(())
}

fn build_private_caches(
    system: &mut System,
    cfg: &TopologyConfig,
    classes: &CacheClasses,
    core_id: usize,
    core: NodeId,
    handles: &mut CoreHandles,
) -> Result<(), BuildError> {
    // The L1-facing upstream: the L2 crossbar when shared levels exist,
    // otherwise the memory bus directly.
    let upstream = system.tol2bus.unwrap_or(system.membus);
    let topo = &mut system.topo;

    let icache = topo.add_node(
        format!("cpu{core_id}.icache"),
        Component::Cache(cache_attrs(
            classes.icache,
            CacheLevel::L1I,
            cfg.l1i_size.0,
            cfg.l1i_assoc,
        )),
    );
    let dcache = topo.add_node(
        format!("cpu{core_id}.dcache"),
        Component::Cache(cache_attrs(
            classes.dcache,
            CacheLevel::L1D,
            cfg.l1d_size.0,
            cfg.l1d_assoc,
        )),
    );
    if let Some(selector) = &cfg.l1i_hwp_type {
        hwp::apply_override(topo, icache, selector)?;
    }
    if let Some(selector) = &cfg.l1d_hwp_type {
        hwp::apply_override(topo, dcache, selector)?;
    }

    // Monitor substitution: later wiring binds to the wrapper exactly as it
    // would to the raw data cache.
    let mut dcache_path = dcache;
    if let Some(checker) = &system.memchecker {
        let mon = monitor::wrap_dcache(topo, core_id, dcache, checker)?;
        handles.dcache_monitor = Some(mon);
        dcache_path = mon;
    }

    if cfg.predictor.frontend() {
        let pf = predictor::splice_frontend(topo, core_id, core, dcache_path)?;
        handles.predictor_frontend = Some(pf);
    } else {
        let issue = topo.port(core, "dcache_port")?;
        topo.bind(issue, topo.port(dcache_path, "cpu_side")?)?;
    }

    let fetch = topo.port(core, "icache_port")?;
    topo.bind(fetch, topo.port(icache, "cpu_side")?)?;

    for l1 in [icache, dcache] {
        let slot = topo.target_slot(upstream);
        let mem_side = topo.port(l1, "mem_side")?;
        topo.bind(mem_side, slot)?;
    }

    // Two walker cache instances when the family has a walker class; bare
    // walker ports bind straight to the upstream bus otherwise.
    for (port_name, suffix, slot_out) in [
        ("itb_walker_port", "itb_walker_cache", &mut handles.iwalkcache),
        ("dtb_walker_port", "dtb_walker_cache", &mut handles.dwalkcache),
    ] {
        let issue = topo.port(core, port_name)?;
        match classes.walker {
            Some(class) => {
                let walkcache = topo.add_node(
                    format!("cpu{core_id}.{suffix}"),
                    Component::Cache(cache_attrs(
                        class,
                        CacheLevel::Walker,
                        class.size,
                        class.assoc,
                    )),
                );
                topo.bind(issue, topo.port(walkcache, "cpu_side")?)?;
                let slot = topo.target_slot(upstream);
                let mem_side = topo.port(walkcache, "mem_side")?;
                topo.bind(mem_side, slot)?;
                *slot_out = Some(walkcache);
            }
            None => {
                let slot = topo.target_slot(upstream);
                topo.bind(issue, slot)?;
            }
        }
    }

    handles.icache = Some(icache);
    handles.dcache = Some(dcache);
    Ok(())
}

fn cache_attrs(class: &'static CacheClass, level: CacheLevel, size: u64, assoc: u32) -> CacheAttrs {
    CacheAttrs {
        class_name: class.name,
        level,
        size,
        assoc,
        // private caches inherit the clock of the CPU they connect to
        clk: ClockDomain::Cpu,
        prefetcher: class.prefetcher,
    }
}

fn wire_interrupt_controller(system: &mut System, core_id: usize) -> Result<NodeId, BuildError> {
    let int_ctrl = system.topo.add_node(
        format!("cpu{core_id}.interrupts"),
        Component::IntCtrl { core_id },
    );
    let slot = system.topo.initiator_slot(system.membus);
    let pio = system.topo.port(int_ctrl, "pio")?;
    system.topo.bind(slot, pio)?;
    let slot = system.topo.target_slot(system.membus);
    let requestor = system.topo.port(int_ctrl, "int_requestor")?;
    system.topo.bind(requestor, slot)?;
    let slot = system.topo.initiator_slot(system.membus);
    let responder = system.topo.port(int_ctrl, "int_responder")?;
    system.topo.bind(slot, responder)?;
    Ok(int_ctrl)
}
