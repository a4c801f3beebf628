//! Staged topology assembly: validate the option set, resolve the cache
//! class family, build the shared levels once per system, then replicate the
//! per-core subtree, and finally prove port completeness. Control never
//! reaches a later stage after a fatal error, so no partial system escapes.

mod core;
mod external;
mod monitor;
mod predictor;
mod shared;


use std::sync::Arc;

use log::info;

use crate::config::TopologyConfig;
use crate::errors::BuildError;
use crate::factory;
use crate::system::System;
use crate::topo::MemChecker;
use crate::validate;

/// Build the complete system topology from `cfg`.
pub fn assemble(cfg: &TopologyConfig) -> Result<System, BuildError> {
    validate::validate(cfg)?;
    let classes = factory::cache_classes(&cfg.cpu_type, cfg.target_isa)?;

    let mut system = System::new(cfg.cacheline_size);

    if cfg.l2cache && cfg.l3cache {
        shared::build_shared_levels(&mut system, cfg, &classes)?;
    }

    if cfg.memchecker {
        // One checker per system; wrappers get Arc clones of this handle.
        system.memchecker = Some(Arc::new(MemChecker { warn_only: true }));
    }

    for i in 0..cfg.num_cpus {
        core::assemble_core(&mut system, cfg, &classes, i)?;
    }

    system.topo.check_complete()?;
    info!(
        "assembled topology: {} components, {} bindings, {} cores",
        system.topo.num_nodes(),
        system.topo.num_bindings(),
        system.cores.len()
    );
    Ok(system)
}
