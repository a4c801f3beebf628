use std::sync::Arc;

use crate::topo::{CacheLevel, ClockDomain, Component, MemChecker, NodeId, Topology};

/// Per-core node handles into the topology arena. Every handle is owned by
/// exactly one core; nothing here is shared across cores.
#[derive(Debug, Default)]
pub struct CoreHandles {
    pub core: NodeId,
    pub int_ctrl: NodeId,
    pub icache: Option<NodeId>,
    pub dcache: Option<NodeId>,
    pub dcache_monitor: Option<NodeId>,
    pub predictor_frontend: Option<NodeId>,
    pub iwalkcache: Option<NodeId>,
    pub dwalkcache: Option<NodeId>,
    /// External adapters, when the foreign memory system path is selected.
    pub external: Vec<NodeId>,
}

/// The assembled system: the component arena plus handles to the shared
/// pieces. Frozen once assembly's completeness check passes.
#[derive(Debug)]
pub struct System {
    pub topo: Topology,
    pub cache_line_size: u64,
    pub membus: NodeId,
    pub l2: Option<NodeId>,
    pub l3: Option<NodeId>,
    pub tol2bus: Option<NodeId>,
    pub tol3bus: Option<NodeId>,
    pub predictor_backend: Option<NodeId>,
    /// The single checker instance, shared by reference across all monitor
    /// wrappers.
    pub memchecker: Option<Arc<MemChecker>>,
    pub cores: Vec<CoreHandles>,
}

impl System {
    pub fn new(cache_line_size: u64) -> Self {
        let mut topo = Topology::new();
        let membus = topo.add_node(
            "membus",
            Component::Crossbar {
                clk: ClockDomain::System,
            },
        );
        Self {
            topo,
            cache_line_size,
            membus,
            l2: None,
            l3: None,
            tol2bus: None,
            tol3bus: None,
            predictor_backend: None,
            memchecker: None,
            cores: Vec::new(),
        }
    }

    /// The outermost shared cache level: L3, or L2 when L3 is absent.
    pub fn last_shared_level(&self) -> Option<NodeId> {
        self.l3.or(self.l2)
    }

    pub fn count_caches(&self, level: CacheLevel) -> usize {
        self.topo
            .nodes()
            .filter(|(_, c)| matches!(c, Component::Cache(attrs) if attrs.level == level))
            .count()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.topo
            .nodes()
            .filter(|(_, c)| c.kind_name() == kind)
            .count()
    }
}
