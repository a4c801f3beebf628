//! O3_ARM_v7a cache class family. Feature `o3-arm`.

use crate::factory::CacheClasses;

#[cfg(feature = "o3-arm")]
mod model {
    use crate::factory::{CacheClass, CacheClasses};
    use crate::hwp;

    static ICACHE: CacheClass = CacheClass {
        name: "O3_ARM_v7a_ICache",
        size: 32 * 1024,
        assoc: 2,
        prefetcher: None,
    };
    static DCACHE: CacheClass = CacheClass {
        name: "O3_ARM_v7a_DCache",
        size: 32 * 1024,
        assoc: 2,
        prefetcher: None,
    };
    // The v7a L2 ships with a stride prefetcher by default.
    static L2: CacheClass = CacheClass {
        name: "O3_ARM_v7aL2",
        size: 1 << 20,
        assoc: 16,
        prefetcher: Some(&hwp::STRIDE),
    };
    static WALK_CACHE: CacheClass = CacheClass {
        name: "O3_ARM_v7aWalkCache",
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
    #[cfg(feature = "o3-arm")]
    {
        Some(model::classes())
    }
    #[cfg(not(feature = "o3-arm"))]
    {
        None
    }
}
