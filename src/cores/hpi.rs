//! HPI cache class family. Feature `hpi`, off by default.

use crate::factory::CacheClasses;

#[cfg(feature = "hpi")]
mod model {
    use crate::factory::{CacheClass, CacheClasses};

    static ICACHE: CacheClass = CacheClass {
        name: "HPI_ICache",
        size: 32 * 1024,
        assoc: 2,
        prefetcher: None,
    };
    static DCACHE: CacheClass = CacheClass {
        name: "HPI_DCache",
        size: 32 * 1024,
        assoc: 4,
        prefetcher: None,
    };
    static L2: CacheClass = CacheClass {
        name: "HPI_L2",
        size: 1 << 20,
        assoc: 16,
        prefetcher: None,
    };
    static WALK_CACHE: CacheClass = CacheClass {
        name: "HPI_WalkCache",
        size: 1024,
        assoc: 8,
        prefetcher: None,
    };

    pub(super) fn classes() -> CacheClasses {
        CacheClasses {
            icache: &ICACHE,
            dcache: &DCACHE,
            l2: &L2,
            l3: None,
            walker: Some(&WALK_CACHE),
        }
    }
}

pub fn classes() -> Option<CacheClasses> {
    #[cfg(feature = "hpi")]
    {
        Some(model::classes())
    }
    #[cfg(not(feature = "hpi"))]
    {
        None
    }
}
