//! Pure option validation, run before any component is built. A failure here
//! terminates assembly with nothing constructed.

use crate::config::TopologyConfig;
use crate::errors::ConfigurationError;

pub fn validate(cfg: &TopologyConfig) -> Result<(), ConfigurationError> {
    if cfg.external_memory_system.is_some() && (cfg.caches || cfg.l2cache) {
        return Err(ConfigurationError::InternalExternalExclusive);
    }
    // Elastic trace wants a minimal memory system so compute delays do not
    // include memory access latencies.
    if cfg.l2cache && cfg.elastic_trace_en {
        return Err(ConfigurationError::ElasticTraceWithL2);
    }
    if cfg.l2cache != cfg.l3cache {
        return Err(ConfigurationError::PartialSharedHierarchy);
    }
    // The backend splices behind the outermost shared level; with caches on
    // and no shared hierarchy there is no chokepoint to splice behind.
    if cfg.caches && cfg.predictor.backend() && !cfg.l2cache {
        return Err(ConfigurationError::BackendWithoutSharedCache);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PredictorMode;

    fn base() -> TopologyConfig {
        TopologyConfig::default()
    }

    #[test]
    fn default_options_are_valid() {
        validate(&base()).unwrap();
    }

    #[test]
    fn internal_and_external_caches_are_exclusive() {
        let mut cfg = base();
        cfg.external_memory_system = Some("testsystem".to_string());
        assert_eq!(
            validate(&cfg),
            Err(ConfigurationError::InternalExternalExclusive)
        );

        // still exclusive when only the shared levels are internal
        cfg.caches = false;
        assert_eq!(
            validate(&cfg),
            Err(ConfigurationError::InternalExternalExclusive)
        );
    }

    #[test]
    fn elastic_trace_forbids_l2() {
        let mut cfg = base();
        cfg.elastic_trace_en = true;
        assert_eq!(validate(&cfg), Err(ConfigurationError::ElasticTraceWithL2));
    }

    #[test]
    fn shared_levels_must_be_paired() {
        let mut cfg = base();
        cfg.l3cache = false;
        assert_eq!(
            validate(&cfg),
            Err(ConfigurationError::PartialSharedHierarchy)
        );

        let mut cfg = base();
        cfg.l2cache = false;
        cfg.predictor = PredictorMode::None;
        assert_eq!(
            validate(&cfg),
            Err(ConfigurationError::PartialSharedHierarchy)
        );
    }

    #[test]
    fn backend_needs_a_shared_hierarchy() {
        let mut cfg = base();
        cfg.l2cache = false;
        cfg.l3cache = false;
        cfg.predictor = PredictorMode::FrontendBackend;
        assert_eq!(
            validate(&cfg),
            Err(ConfigurationError::BackendWithoutSharedCache)
        );

        // frontend-only is fine without shared levels
        cfg.predictor = PredictorMode::Frontend;
        validate(&cfg).unwrap();
    }

    #[test]
    fn external_memory_system_alone_is_valid() {
        let mut cfg = base();
        cfg.caches = false;
        cfg.l2cache = false;
        cfg.l3cache = false;
        cfg.external_memory_system = Some("testsystem".to_string());
        validate(&cfg).unwrap();
    }
}
