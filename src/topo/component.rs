use std::fmt;
use std::sync::Arc;

use crate::hwp::HwpClass;

/// Direction role of a connection endpoint. A binding always joins one
/// initiator to one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortRole {
    Initiator,
    Target,
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRole::Initiator => write!(f, "initiator"),
            PortRole::Target => write!(f, "target"),
        }
    }
}

/// Clock-domain reference carried by clocked components. Shared cache levels
/// and the inter-level crossbars run on the CPU domain so they are never
/// clocked independently of the cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDomain {
    Cpu,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLevel {
    L1I,
    L1D,
    L2,
    L3,
    Walker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrRange {
    pub start: u64,
    pub end: u64,
}

impl AddrRange {
    /// The full address space, used by external adapters so foreign tooling
    /// never has to inspect internals.
    pub const ALL: AddrRange = AddrRange {
        start: 0,
        end: u64::MAX,
    };
}

/// The single system-wide correctness checker. Exactly one instance exists
/// per system; monitor wrappers share it through an `Arc`, never by value.
#[derive(Debug)]
pub struct MemChecker {
    pub warn_only: bool,
}

/// Scalar attributes of a concrete cache instance. `class_name` records the
/// factory class the instance was stamped from.
#[derive(Debug, Clone)]
pub struct CacheAttrs {
    pub class_name: &'static str,
    pub level: CacheLevel,
    pub size: u64,
    pub assoc: u32,
    pub clk: ClockDomain,
    pub prefetcher: Option<&'static HwpClass>,
}

/// A node in the topology arena. Each variant carries a fixed, named port
/// set (see [`Component::ports`]); crossbars instead grow indexed fan-in and
/// fan-out slots on demand.
#[derive(Debug)]
pub enum Component {
    Cache(CacheAttrs),
    Crossbar { clk: ClockDomain },
    PredictorFrontend,
    PredictorBackend,
    MonitorWrapper { checker: Arc<MemChecker> },
    ExternalAdapter {
        port_data: String,
        port_type: String,
        addr_range: AddrRange,
    },
    Core { core_id: usize },
    IntCtrl { core_id: usize },
}

use PortRole::{Initiator, Target};

impl Component {
    /// Fixed ports declared at construction. Crossbar slots are allocated
    /// separately through the topology.
    pub fn ports(&self) -> &'static [(&'static str, PortRole)] {
        match self {
            Component::Cache(_)
            | Component::PredictorFrontend
            | Component::PredictorBackend
            | Component::MonitorWrapper { .. } => &[("cpu_side", Target), ("mem_side", Initiator)],
            Component::Crossbar { .. } => &[],
            // The adapter's real port; wiring code addresses it as
            // "cpu_side" and is redirected by `resolve_port`.
            Component::ExternalAdapter { .. } => &[("port", Target)],
            Component::Core { .. } => &[
                ("icache_port", Initiator),
                ("dcache_port", Initiator),
                ("itb_walker_port", Initiator),
                ("dtb_walker_port", Initiator),
            ],
            Component::IntCtrl { .. } => &[
                ("pio", Target),
                ("int_requestor", Initiator),
                ("int_responder", Target),
            ],
        }
    }

    /// Translate the conventional port name used by wiring code to the port
    /// the component actually exposes. Only external adapters rename: they
    /// satisfy the cache port contract (`cpu_side`) with a single generic
    /// `port`, so nothing else in the assembler has to know the foreign
    /// object's naming.
    pub fn resolve_port<'a>(&self, name: &'a str) -> &'a str {
        match self {
            Component::ExternalAdapter { .. } if name == "cpu_side" => "port",
            _ => name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Component::Cache(_) => "cache",
            Component::Crossbar { .. } => "crossbar",
            Component::PredictorFrontend => "predictor_frontend",
            Component::PredictorBackend => "predictor_backend",
            Component::MonitorWrapper { .. } => "monitor_wrapper",
            Component::ExternalAdapter { .. } => "external_adapter",
            Component::Core { .. } => "core",
            Component::IntCtrl { .. } => "int_ctrl",
        }
    }
}
