//! Predictor pipeline splice points. The predictor observes and buffers
//! writes headed for persistent memory, so it must sit on every path a write
//! can take: one frontend per core right at the issue path, and a single
//! backend at the chokepoint between the outermost shared level and the
//! memory bus.

use log::info;

use crate::errors::WiringError;
use crate::system::System;
use crate::topo::{Component, NodeId, Topology};

/// Splice a frontend between `core`'s data path and `dcache_path` (the L1
/// data cache, or the monitor wrapper standing in for it).
pub(super) fn splice_frontend(
    topo: &mut Topology,
    core_id: usize,
    core: NodeId,
    dcache_path: NodeId,
) -> Result<NodeId, WiringError> {
    info!("adding predictor frontend for cpu {core_id}");
    let pf = topo.add_node(format!("cpu{core_id}.pf"), Component::PredictorFrontend);
    let issue = topo.port(core, "dcache_port")?;
    topo.bind(issue, topo.port(pf, "cpu_side")?)?;
    let mem_side = topo.port(pf, "mem_side")?;
    topo.bind(mem_side, topo.port(dcache_path, "cpu_side")?)?;
    Ok(pf)
}

/// Insert the single backend behind `last_shared`, in front of the memory
/// bus. Shared per system, never per core.
pub(super) fn insert_backend(
    system: &mut System,
    last_shared: NodeId,
) -> Result<NodeId, WiringError> {
    assert!(
        system.predictor_backend.is_none(),
        "at most one predictor backend per system"
    );
    info!("attaching predictor backend");
    let topo = &mut system.topo;
    let pb = topo.add_node("pb", Component::PredictorBackend);
    let downstream = topo.port(last_shared, "mem_side")?;
    topo.bind(downstream, topo.port(pb, "cpu_side")?)?;
    let slot = topo.target_slot(system.membus);
    let mem_side = topo.port(pb, "mem_side")?;
    topo.bind(mem_side, slot)?;
    system.predictor_backend = Some(pb);
    Ok(pb)
}
