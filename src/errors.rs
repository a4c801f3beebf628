use thiserror::Error;

/// Mutually exclusive or incomplete option combinations. Always fatal: the
/// validator runs before any component exists, so a failure constructs
/// nothing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("external caches and internal caches are exclusive options")]
    InternalExternalExclusive,
    #[error("when elastic trace is enabled, do not configure L2 caches")]
    ElasticTraceWithL2,
    #[error("l2cache and l3cache must be enabled together")]
    PartialSharedHierarchy,
    #[error("the backend predictor requires a shared cache hierarchy")]
    BackendWithoutSharedCache,
}

/// Port wiring defects. `AlreadyBound` and `RoleMismatch` are caught eagerly
/// at bind time; `Unbound` comes out of the final completeness sweep.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WiringError {
    #[error("unknown port {0}")]
    UnknownPort(String),
    #[error("port {0} is already bound")]
    AlreadyBound(String),
    #[error("cannot bind {a} to {b}: both are {role} ports")]
    RoleMismatch { a: String, b: String, role: String },
    #[error("port {0} is left unbound after assembly")]
    Unbound(String),
}

/// Top-level assembly failure. All variants are fatal; no partial system is
/// ever returned.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("core model '{model}' is unavailable; was it compiled in?")]
    UnsupportedCoreModel { model: String },
    #[error("core model '{model}' does not define an L3 cache class but l3cache is enabled")]
    MissingL3Class { model: String },
    #[error("unknown hardware prefetcher type '{name}'")]
    UnknownPrefetcher { name: String },
    #[error("prefetcher override target '{node}' is a {kind}, not a cache")]
    PrefetcherOnNonCache { node: String, kind: &'static str },
    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
}
