use anyhow::{Context, Result};
use breakpoint_gutter::cli;
use breakpoint_gutter::config::GutterConfig;
use breakpoint_gutter::sim::Scenario;

fn main() -> Result<()> {
    let options = cli::process_cli();

    let config = match &options.config {
        Some(path) => GutterConfig::load_from(path)?,
        None => GutterConfig::load()?,
    };

    // CLI --log-level takes precedence, then RUST_LOG / DEBUG_LEVEL, then config.
    breakpoint_gutter::debug::init_log_bridge(
        options.log_level,
        config.log_level.to_level_filter(),
    );
    log::info!(
        "breakpoint-gutter-sim {} replaying {:?}",
        breakpoint_gutter::VERSION,
        options.scenario
    );

    let scenario = Scenario::load(&options.scenario)
        .with_context(|| format!("could not load {}", options.scenario.display()))?;
    let report = scenario.run(config);

    print!("{report}");
    log::info!("Scenario finished");
    Ok(())
}
