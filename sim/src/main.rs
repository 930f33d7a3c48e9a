//! wrap-sim: replay exchange scenarios against an in-memory chain.

mod scenario;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use wrap_exchange::{ExchangeConfig, ExchangeParams, Principal};
use wrap_utils::LogFormat;

use crate::scenario::{Scenario, Simulator};

#[derive(Parser)]
#[command(name = "wrap-sim", about = "Wrapped-asset exchange scenario simulator")]
struct Cli {
    /// Log format: "human" or "json". Overrides the config file.
    #[arg(long, env = "WRAP_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error". Overrides the config file.
    #[arg(long, env = "WRAP_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a scenario and print one JSON record per step.
    Run {
        /// Path to the exchange TOML configuration.
        #[arg(long, env = "WRAP_CONFIG")]
        config: PathBuf,

        /// Path to the scenario TOML file.
        #[arg(long)]
        scenario: PathBuf,

        /// Write the final exchange state here as a snapshot.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Print a configuration file with default parameters.
    InitConfig {
        /// Identity that will hold deposited reserve.
        #[arg(long)]
        escrow: Principal,

        /// Bootstrap custodian.
        #[arg(long)]
        custodian: Principal,

        /// Use a 10-block activation delay instead of 21000.
        #[arg(long)]
        dev: bool,
    },
}

fn init_logging(cli: &Cli, config: Option<&ExchangeConfig>) -> anyhow::Result<()> {
    let format = cli
        .log_format
        .as_deref()
        .or(config.map(|c| c.log_format.as_str()))
        .unwrap_or("human");
    let level = cli
        .log_level
        .as_deref()
        .or(config.map(|c| c.log_level.as_str()))
        .unwrap_or("info");
    wrap_utils::init_logging(format.parse::<LogFormat>()?, level);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Run {
            config,
            scenario,
            snapshot,
        } => {
            let cfg = ExchangeConfig::from_toml_file(config)
                .with_context(|| format!("loading config {}", config.display()))?;
            init_logging(&cli, Some(&cfg))?;
            tracing::info!("Loaded config from {}", config.display());

            let scenario = Scenario::from_toml_file(scenario)?;
            let mut sim = Simulator::new(&cfg, scenario.start_height)?;
            let records = sim.run(&scenario);

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for record in &records {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
            }
            writeln!(out, "{}", serde_json::to_string(&sim.status())?)?;

            sim.exchange().check_conservation()?;
            if !sim.escrow_backs_supply() {
                tracing::warn!("escrow reserve no longer matches claim supply");
            }

            if let Some(path) = snapshot {
                let bytes = sim.exchange().snapshot().to_bytes()?;
                std::fs::write(path, bytes)
                    .with_context(|| format!("writing snapshot {}", path.display()))?;
                tracing::info!("Snapshot written to {}", path.display());
            }
        }
        Command::InitConfig {
            escrow,
            custodian,
            dev,
        } => {
            init_logging(&cli, None)?;
            let mut cfg = ExchangeConfig::new(escrow.clone(), custodian.clone());
            if *dev {
                cfg.params = ExchangeParams::dev_defaults();
            }
            cfg.validate()?;
            print!("{}", cfg.to_toml_string()?);
        }
    }

    Ok(())
}
