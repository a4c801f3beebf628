//! memtopo builds the per-core cache-and-interconnect topology of a simulated
//! multiprocessor from a declarative configuration: shared L2/L3 levels and
//! their crossbars, private L1 and page-table-walker caches, hardware
//! prefetcher overrides, the write-buffering predictor pipeline, memchecker
//! monitor wrappers, and adapters for externally supplied cache
//! implementations.
//!
//! Assembly runs once, synchronously, before simulation starts. The result is
//! a frozen [`system::System`] whose component graph is port-complete: every
//! port is bound to exactly one peer of the opposite role. The timing engine
//! that executes the graph lives elsewhere.

pub mod assemble;
pub mod config;
pub mod cores;
pub mod errors;
pub mod factory;
pub mod hwp;
pub mod system;
pub mod topo;
pub mod validate;
