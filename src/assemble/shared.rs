//! Shared L2/L3 levels and the crossbars joining them, built once per
//! system. Both levels and both buses take the CPU clock domain so the
//! shared hierarchy is never clocked independently of the cores.

use crate::config::TopologyConfig;
use crate::errors::BuildError;
use crate::factory::CacheClasses;
use crate::hwp;
use crate::system::System;
use crate::topo::{CacheAttrs, CacheLevel, ClockDomain, Component};

use super::predictor;

pub(super) fn build_shared_levels(
    system: &mut System,
    cfg: &TopologyConfig,
    classes: &CacheClasses,
) -> Result<(), BuildError> {
    let l3_class = classes.l3.ok_or_else(|| BuildError::MissingL3Class {
        model: cfg.cpu_type.clone(),
    })?;

    let topo = &mut system.topo;
    let l2 = topo.add_node(
        "l2",
        Component::Cache(CacheAttrs {
            class_name: classes.l2.name,
            level: CacheLevel::L2,
            size: cfg.l2_size.0,
            assoc: cfg.l2_assoc,
            clk: ClockDomain::Cpu,
            prefetcher: classes.l2.prefetcher,
        }),
    );
    let l3 = topo.add_node(
        "l3",
        Component::Cache(CacheAttrs {
            class_name: l3_class.name,
            level: CacheLevel::L3,
            size: cfg.l3_size.0,
            assoc: cfg.l3_assoc,
            clk: ClockDomain::Cpu,
            prefetcher: l3_class.prefetcher,
        }),
    );
    let tol2bus = topo.add_node(
        "tol2bus",
        Component::Crossbar {
            clk: ClockDomain::Cpu,
        },
    );
    let tol3bus = topo.add_node(
        "tol3bus",
        Component::Crossbar {
            clk: ClockDomain::Cpu,
        },
    );

    // L2 sits between the L1-facing bus fan-out and the L3 bus fan-in.
    let slot = topo.initiator_slot(tol2bus);
    topo.bind(slot, topo.port(l2, "cpu_side")?)?;
    let slot = topo.target_slot(tol3bus);
    topo.bind(topo.port(l2, "mem_side")?, slot)?;
    let slot = topo.initiator_slot(tol3bus);
    topo.bind(slot, topo.port(l3, "cpu_side")?)?;

    if let Some(selector) = &cfg.l2_hwp_type {
        hwp::apply_override(topo, l2, selector)?;
    }

    system.l2 = Some(l2);
    system.l3 = Some(l3);
    system.tol2bus = Some(tol2bus);
    system.tol3bus = Some(tol3bus);

    // Downstream of the outermost level: through the predictor backend when
    // the mode asks for one, otherwise straight onto the memory bus.
    if cfg.predictor.backend() {
        predictor::insert_backend(system, l3)?;
    } else {
        let slot = system.topo.target_slot(system.membus);
        let mem_side = system.topo.port(l3, "mem_side")?;
        system.topo.bind(mem_side, slot)?;
    }
    Ok(())
}
