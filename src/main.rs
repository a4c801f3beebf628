use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use toml::Table;

use memtopo::assemble::assemble;
use memtopo::config::{Config, PredictorMode, TopologyConfig};
use memtopo::topo::CacheLevel;

#[derive(Parser)]
#[command(version, about)]
struct MemtopoArgs {
    #[arg(help = "Path to config.toml")]
    config_path: PathBuf,
    #[arg(long, help = "Override number of cores to assemble")]
    num_cpus: Option<usize>,
    #[arg(long, help = "Override CPU model selector")]
    cpu_type: Option<String>,
    #[arg(long, help = "Predictor pipeline mode (none, frontend, frontend_backend)")]
    predictor: Option<PredictorMode>,
    #[arg(long, help = "Enable the memchecker monitor path")]
    memchecker: bool,
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();

    let argv = MemtopoArgs::parse();
    let raw = fs::read_to_string(&argv.config_path).with_context(|| {
        format!("failed to read config file {}", argv.config_path.display())
    })?;
    let table: Table = toml::from_str(&raw).context("cannot parse config toml")?;
    let mut cfg = TopologyConfig::from_section(table.get("topology"));

    // override toml config with argv
    cfg.num_cpus = argv.num_cpus.unwrap_or(cfg.num_cpus);
    cfg.cpu_type = argv.cpu_type.unwrap_or(cfg.cpu_type);
    cfg.predictor = argv.predictor.unwrap_or(cfg.predictor);
    cfg.memchecker = cfg.memchecker || argv.memchecker;

    let system = assemble(&cfg)?;

    println!(
        "assembled {} components and {} bindings for {} cores",
        system.topo.num_nodes(),
        system.topo.num_bindings(),
        system.cores.len()
    );
    println!(
        "caches: {} L1I, {} L1D, {} L2, {} L3, {} walker",
        system.count_caches(CacheLevel::L1I),
        system.count_caches(CacheLevel::L1D),
        system.count_caches(CacheLevel::L2),
        system.count_caches(CacheLevel::L3),
        system.count_caches(CacheLevel::Walker),
    );
    println!(
        "predictor: {} frontend(s), {} backend(s); monitors: {}; external adapters: {}",
        system.count_kind("predictor_frontend"),
        system.count_kind("predictor_backend"),
        system.count_kind("monitor_wrapper"),
        system.count_kind("external_adapter"),
    );
    Ok(())
}
