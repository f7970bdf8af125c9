//! Command-line interface for the scenario simulator.

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// breakpoint-gutter-sim - replay a breakpoint gutter scenario against an in-memory editor
#[derive(Parser, Debug)]
#[command(name = "breakpoint-gutter-sim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Scenario file (YAML) to replay
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Gutter config file (defaults to ~/.config/breakpoint-gutter/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level for the debug log (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LevelFilter>,
}

/// Options the simulator runs with
#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    pub scenario: PathBuf,
    pub config: Option<PathBuf>,
    pub log_level: Option<LevelFilter>,
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            scenario: cli.scenario,
            config: cli.config,
            log_level: cli.log_level,
        }
    }
}

/// Parse CLI arguments
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}
