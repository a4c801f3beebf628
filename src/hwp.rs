//! Hardware prefetcher selection. Per-level `*_hwp_type` options name an
//! entry in the static prefetcher table; installing one over a cache class
//! that ships a non-null default is a non-fatal override that logs the
//! discarded default and proceeds.

use log::warn;
use phf::phf_map;

use crate::errors::BuildError;
use crate::topo::{Component, NodeId, Topology};

/// Identity of a hardware prefetcher implementation. Only the class identity
/// matters here; the prefetch algorithm itself runs in the execution engine.
#[derive(Debug, PartialEq, Eq)]
pub struct HwpClass {
    pub name: &'static str,
}

pub static STRIDE: HwpClass = HwpClass {
    name: "StridePrefetcher",
};
pub static TAGGED: HwpClass = HwpClass {
    name: "TaggedPrefetcher",
};
pub static BOP: HwpClass = HwpClass {
    name: "BOPPrefetcher",
};
pub static AMPM: HwpClass = HwpClass {
    name: "AMPMPrefetcher",
};
pub static DCPT: HwpClass = HwpClass {
    name: "DCPTPrefetcher",
};
pub static SPP: HwpClass = HwpClass {
    name: "SignaturePathPrefetcher",
};

static HWP_LIST: phf::Map<&'static str, &'static HwpClass> = phf_map! {
    "StridePrefetcher" => &STRIDE,
    "TaggedPrefetcher" => &TAGGED,
    "BOPPrefetcher" => &BOP,
    "AMPMPrefetcher" => &AMPM,
    "DCPTPrefetcher" => &DCPT,
    "SignaturePathPrefetcher" => &SPP,
};

pub fn get(name: &str) -> Option<&'static HwpClass> {
    HWP_LIST.get(name).copied()
}

/// Install the prefetcher selected by `selector` on `cache`, warning when a
/// class default gets replaced.
pub fn apply_override(
    topo: &mut Topology,
    cache: NodeId,
    selector: &str,
) -> Result<(), BuildError> {
    let class = get(selector).ok_or_else(|| BuildError::UnknownPrefetcher {
        name: selector.to_string(),
    })?;
    let label = topo.node_name(cache).to_string();
    match topo.component_mut(cache) {
        Component::Cache(attrs) => {
            if let Some(default) = attrs.prefetcher {
                warn!(
                    "{label}: hwp type is set ({}), but the cache has a default hardware \
                     prefetcher of type {}; using the one specified by the flag option",
                    class.name, default.name
                );
            }
            attrs.prefetcher = Some(class);
            Ok(())
        }
        other => Err(BuildError::PrefetcherOnNonCache {
            node: label,
            kind: other.kind_name(),
        }),
    }
}
