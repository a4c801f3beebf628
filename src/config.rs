use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer};
use toml::Value;

/// Deserializable config section with defaults, loaded from one table of the
/// top-level TOML file.
pub trait Config: DeserializeOwned + Default {
    fn from_section(section: Option<&Value>) -> Self {
        match section {
            Some(value) => value.clone().try_into().expect("cannot deserialize config"),
            None => {
                warn!("config section not found");
                Self::default()
            }
        }
    }
}

/// A byte count that also accepts option-style suffix strings ("32kB",
/// "2MB", "16GB").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemSize(pub u64);

impl FromStr for MemSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let split = value
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(value.len());
        let (digits, suffix) = value.split_at(split);
        let count: u64 = digits
            .parse()
            .map_err(|_| format!("invalid memory size '{}'", value))?;
        let scale = match suffix.trim() {
            "" | "B" => 1,
            "kB" | "KiB" => 1 << 10,
            "MB" | "MiB" => 1 << 20,
            "GB" | "GiB" => 1 << 30,
            other => return Err(format!("unknown memory size suffix '{}'", other)),
        };
        count
            .checked_mul(scale)
            .map(MemSize)
            .ok_or_else(|| format!("memory size '{}' overflows", value))
    }
}

impl fmt::Display for MemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", self.0)
    }
}

impl<'de> Deserialize<'de> for MemSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MemSizeVisitor;

        impl Visitor<'_> for MemSizeVisitor {
            type Value = MemSize;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a byte count or a size string like \"32kB\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MemSize, E> {
                Ok(MemSize(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MemSize, E> {
                u64::try_from(v)
                    .map(MemSize)
                    .map_err(|_| E::custom("memory size must be non-negative"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MemSize, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MemSizeVisitor)
    }
}

/// Target instruction-set architecture. Drives the walker-cache substitution
/// in the default class family and the external-adapter port set.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetIsa {
    #[default]
    X86,
    Arm,
    Riscv,
}

impl FromStr for TargetIsa {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "x86" => Ok(Self::X86),
            "arm" => Ok(Self::Arm),
            "riscv" => Ok(Self::Riscv),
            _ => Err(format!(
                "unsupported target isa '{}', expected one of: x86, arm, riscv",
                value
            )),
        }
    }
}

/// Where to splice the write-buffering predictor pipeline. The frontend sits
/// between each core and its L1 data cache; the backend sits between the
/// outermost shared cache level and the memory bus.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PredictorMode {
    None,
    Frontend,
    #[default]
    FrontendBackend,
}

impl FromStr for PredictorMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::None),
            "frontend" => Ok(Self::Frontend),
            "frontend_backend" => Ok(Self::FrontendBackend),
            _ => Err(format!(
                "unsupported predictor mode '{}', expected one of: none, frontend, frontend_backend",
                value
            )),
        }
    }
}

impl PredictorMode {
    pub fn frontend(self) -> bool {
        !matches!(self, PredictorMode::None)
    }

    pub fn backend(self) -> bool {
        matches!(self, PredictorMode::FrontendBackend)
    }
}

/// The full topology option set, `[topology]` section of the config file.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TopologyConfig {
    pub num_cpus: usize,
    pub cpu_type: String,
    pub target_isa: TargetIsa,
    pub cacheline_size: u64,
    /// Internal per-core L1 construction.
    pub caches: bool,
    /// Shared levels; both must be enabled together.
    pub l2cache: bool,
    pub l3cache: bool,
    /// Port type of the foreign memory system; exclusive with `caches` and
    /// `l2cache`.
    pub external_memory_system: Option<String>,
    pub elastic_trace_en: bool,
    pub memchecker: bool,
    pub predictor: PredictorMode,
    pub l1i_size: MemSize,
    pub l1i_assoc: u32,
    pub l1d_size: MemSize,
    pub l1d_assoc: u32,
    pub l2_size: MemSize,
    pub l2_assoc: u32,
    pub l3_size: MemSize,
    pub l3_assoc: u32,
    pub l1i_hwp_type: Option<String>,
    pub l1d_hwp_type: Option<String>,
    pub l2_hwp_type: Option<String>,
}

impl Config for TopologyConfig {}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            num_cpus: 1,
            cpu_type: "TimingSimpleCPU".to_string(),
            target_isa: TargetIsa::default(),
            cacheline_size: 64,
            caches: true,
            l2cache: true,
            l3cache: true,
            external_memory_system: None,
            elastic_trace_en: false,
            memchecker: false,
            predictor: PredictorMode::default(),
            l1i_size: MemSize(32 * 1024),
            l1i_assoc: 2,
            l1d_size: MemSize(64 * 1024),
            l1d_assoc: 2,
            l2_size: MemSize(2 << 20),
            l2_assoc: 8,
            l3_size: MemSize(16 << 20),
            l3_assoc: 16,
            l1i_hwp_type: None,
            l1d_hwp_type: None,
            l2_hwp_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Table;

    #[test]
    fn mem_size_accepts_suffix_strings() {
        assert_eq!("32kB".parse::<MemSize>().unwrap(), MemSize(32 * 1024));
        assert_eq!("2MB".parse::<MemSize>().unwrap(), MemSize(2 << 20));
        assert_eq!("512".parse::<MemSize>().unwrap(), MemSize(512));
        assert!("lots".parse::<MemSize>().is_err());
        assert!("4TB".parse::<MemSize>().is_err());
        // 2^64 bytes does not fit in u64
        assert!("17179869184GB".parse::<MemSize>().is_err());
    }

    #[test]
    fn topology_section_parses_with_defaults() {
        let raw = r#"
            [topology]
            num_cpus = 2
            l1d_size = "64kB"
            l2_size = 4194304
            predictor = "frontend_backend"
            l2_hwp_type = "TaggedPrefetcher"
        "#;
        let table: Table = toml::from_str(raw).unwrap();
        let cfg = TopologyConfig::from_section(table.get("topology"));
        assert_eq!(cfg.num_cpus, 2);
        assert_eq!(cfg.l1d_size, MemSize(64 * 1024));
        assert_eq!(cfg.l2_size, MemSize(4 << 20));
        assert_eq!(cfg.predictor, PredictorMode::FrontendBackend);
        assert_eq!(cfg.l2_hwp_type.as_deref(), Some("TaggedPrefetcher"));
        // untouched options keep their defaults
        assert!(cfg.caches);
        assert_eq!(cfg.l1i_assoc, 2);
    }

    #[test]
    fn missing_section_falls_back_to_defaults() {
        let table: Table = toml::from_str("").unwrap();
        let cfg = TopologyConfig::from_section(table.get("topology"));
        assert_eq!(cfg.num_cpus, 1);
        assert!(cfg.external_memory_system.is_none());
    }

    #[test]
    fn predictor_mode_parses_from_cli_strings() {
        assert_eq!("none".parse(), Ok(PredictorMode::None));
        assert_eq!("frontend".parse(), Ok(PredictorMode::Frontend));
        assert_eq!("frontend_backend".parse(), Ok(PredictorMode::FrontendBackend));
        assert!("backend".parse::<PredictorMode>().is_err());
    }

    #[test]
    fn predictor_mode_splice_points() {
        assert!(!PredictorMode::None.frontend());
        assert!(PredictorMode::Frontend.frontend());
        assert!(!PredictorMode::Frontend.backend());
        assert!(PredictorMode::FrontendBackend.backend());
    }
}
