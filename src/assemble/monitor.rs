//! Memchecker monitor wrapper: a transparent, port-preserving node on a
//! core's data-cache path. Peers bind to the wrapper exactly as they would
//! to the undecorated cache.

use std::sync::Arc;

use crate::errors::WiringError;
use crate::topo::{Component, MemChecker, NodeId, Topology};

/// Interpose a wrapper in front of `dcache` and return it; the caller
/// substitutes it for the raw cache in every later wiring step.
///
/// The checker is passed by reference and cloned as a handle. Constructing a
/// fresh `MemChecker` per wrapper would fork the check state across cores.
pub(super) fn wrap_dcache(
    topo: &mut Topology,
    core_id: usize,
    dcache: NodeId,
    checker: &Arc<MemChecker>,
) -> Result<NodeId, WiringError> {
    let monitor = topo.add_node(
        format!("cpu{core_id}.dcache_mon"),
        Component::MonitorWrapper {
            checker: Arc::clone(checker),
        },
    );
    let mem_side = topo.port(monitor, "mem_side")?;
    topo.bind(mem_side, topo.port(dcache, "cpu_side")?)?;
    Ok(monitor)
}
