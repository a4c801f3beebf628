//! Component factory: maps the `cpu_type` selector to the cache class family
//! to instantiate. Three mutually exclusive families exist: the ISA-generic
//! default family (the only one with an L3 class, with a page-table-walker
//! cache substituted on x86) and two CPU-specific accelerated-core families
//! that are compiled in behind cargo features. Requesting a family that was
//! not compiled in is fatal; no fallback family is substituted.

use crate::config::TargetIsa;
use crate::cores;
use crate::errors::BuildError;
use crate::hwp::HwpClass;

/// Construction-time identity of a cache class: the defaults a concrete
/// instance starts from before per-level sizing options are applied.
#[derive(Debug)]
pub struct CacheClass {
    pub name: &'static str,
    pub size: u64,
    pub assoc: u32,
    pub prefetcher: Option<&'static HwpClass>,
}

/// The class set a core model family provides. `l3` is only present in the
/// default family; `walker` is absent for families without a walker cache.
#[derive(Debug, Clone, Copy)]
pub struct CacheClasses {
    pub icache: &'static CacheClass,
    pub dcache: &'static CacheClass,
    pub l2: &'static CacheClass,
    pub l3: Option<&'static CacheClass>,
    pub walker: Option<&'static CacheClass>,
}

pub static L1_ICACHE: CacheClass = CacheClass {
    name: "L1_ICache",
    size: 32 * 1024,
    assoc: 2,
    prefetcher: None,
};
pub static L1_DCACHE: CacheClass = CacheClass {
    name: "L1_DCache",
    size: 64 * 1024,
    assoc: 2,
    prefetcher: None,
};
pub static L2_CACHE: CacheClass = CacheClass {
    name: "L2Cache",
    size: 2 << 20,
    assoc: 8,
    prefetcher: None,
};
pub static L3_CACHE: CacheClass = CacheClass {
    name: "L3Cache",
    size: 16 << 20,
    assoc: 16,
    prefetcher: None,
};
pub static PAGE_TABLE_WALKER_CACHE: CacheClass = CacheClass {
    name: "PageTableWalkerCache",
    size: 1024,
    assoc: 2,
    prefetcher: None,
};

/// Resolve the class family for `cpu_type`. Any selector that is not one of
/// the accelerated-core names falls to the default family.
pub fn cache_classes(cpu_type: &str, isa: TargetIsa) -> Result<CacheClasses, BuildError> {
    match cpu_type {
        "O3_ARM_v7a_3" => cores::o3_arm::classes().ok_or_else(|| unavailable(cpu_type)),
        "HPI" => cores::hpi::classes().ok_or_else(|| unavailable(cpu_type)),
        _ => Ok(CacheClasses {
            icache: &L1_ICACHE,
            dcache: &L1_DCACHE,
            l2: &L2_CACHE,
            l3: Some(&L3_CACHE),
            walker: (isa == TargetIsa::X86).then_some(&PAGE_TABLE_WALKER_CACHE),
        }),
    }
}

fn unavailable(model: &str) -> BuildError {
    BuildError::UnsupportedCoreModel {
        model: model.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_family_carries_l3() {
        let classes = cache_classes("TimingSimpleCPU", TargetIsa::Arm).unwrap();
        assert_eq!(classes.l3.unwrap().name, "L3Cache");
        assert!(classes.walker.is_none());
    }

    #[test]
    fn x86_substitutes_the_walker_cache() {
        let classes = cache_classes("TimingSimpleCPU", TargetIsa::X86).unwrap();
        assert_eq!(classes.walker.unwrap().name, "PageTableWalkerCache");
    }

    #[cfg(feature = "o3-arm")]
    #[test]
    fn o3_family_has_no_l3_but_a_walker() {
        let classes = cache_classes("O3_ARM_v7a_3", TargetIsa::Arm).unwrap();
        assert!(classes.l3.is_none());
        assert!(classes.walker.is_some());
        // the O3 L2 ships a default prefetcher, exercised by the override path
        assert!(classes.l2.prefetcher.is_some());
    }

    #[cfg(not(feature = "o3-arm"))]
    #[test]
    fn o3_family_unavailable_without_the_feature() {
        let err = cache_classes("O3_ARM_v7a_3", TargetIsa::Arm).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedCoreModel { .. }));
    }

    #[cfg(not(feature = "hpi"))]
    #[test]
    fn hpi_unavailable_is_fatal_with_no_fallback() {
        let err = cache_classes("HPI", TargetIsa::Arm).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedCoreModel { model } if model == "HPI"));
    }

    #[cfg(feature = "hpi")]
    #[test]
    fn hpi_family_resolves_when_compiled_in() {
        let classes = cache_classes("HPI", TargetIsa::Arm).unwrap();
        assert_eq!(classes.icache.name, "HPI_ICache");
    }
}
