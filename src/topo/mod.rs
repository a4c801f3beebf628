pub mod component;
pub mod graph;

pub use component::{
    AddrRange, CacheAttrs, CacheLevel, ClockDomain, Component, MemChecker, PortRole,
};
pub use graph::{Binding, NodeId, PortRef, Topology};
