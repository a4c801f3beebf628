//! External memory system path: per-core adapters that present the
//! conventional cache port contract for a foreign cache implementation. The
//! deterministic `cpu<N>.<cache>` naming and the full address range are part
//! of the contract external tooling relies on.

use crate::config::{TargetIsa, TopologyConfig};
use crate::errors::WiringError;
use crate::system::System;
use crate::topo::{AddrRange, Component, NodeId};

/// Build and bind the adapters for core `core_id`. Returns the adapter nodes
/// in `icache`, `dcache` (then walker, where the ISA has walker ports routed
/// externally) order.
pub(super) fn attach_external_caches(
    system: &mut System,
    cfg: &TopologyConfig,
    core_id: usize,
    core: NodeId,
    port_type: &str,
) -> Result<Vec<NodeId>, WiringError> {
    let walker_external = matches!(cfg.target_isa, TargetIsa::X86 | TargetIsa::Arm);
    let mut pairs = vec![("icache", "icache_port"), ("dcache", "dcache_port")];
    if walker_external {
        pairs.push(("itb_walker_cache", "itb_walker_port"));
        pairs.push(("dtb_walker_cache", "dtb_walker_port"));
    }

    let mut adapters = Vec::with_capacity(pairs.len());
    for (suffix, core_port) in pairs {
        let name = format!("cpu{core_id}.{suffix}");
        let adapter = system.topo.add_node(
            name.clone(),
            Component::ExternalAdapter {
                port_data: name,
                port_type: port_type.to_string(),
                addr_range: AddrRange::ALL,
            },
        );
        let issue = system.topo.port(core, core_port)?;
        // "cpu_side" resolves to the adapter's real port
        let cpu_side = system.topo.port(adapter, "cpu_side")?;
        system.topo.bind(issue, cpu_side)?;
        adapters.push(adapter);
    }

    if !walker_external {
        // ISAs without externally routed walkers keep the walker ports on
        // the uncached path.
        for core_port in ["itb_walker_port", "dtb_walker_port"] {
            let slot = system.topo.target_slot(system.membus);
            let issue = system.topo.port(core, core_port)?;
            system.topo.bind(issue, slot)?;
        }
    }
    Ok(adapters)
}
