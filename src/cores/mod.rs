//! Accelerated-core cache class families. Each module answers `None` when
//! its feature is not compiled in, which the factory turns into a fatal
//! `UnsupportedCoreModel`.

pub mod hpi;
pub mod o3_arm;
