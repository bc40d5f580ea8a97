use clap::Parser;
use tracing::{debug, info};

use regime_cli::app::Simulator;
use regime_cli::cli::Cli;
use regime_cli::config::SimulatorConfig;
use regime_cli::logging::init_logging;

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = SimulatorConfig::load_or_default(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_logging(&config.logging)?;

    match &cli.config {
        Some(path) => info!(path = %path.display(), "loaded configuration"),
        None => debug!("no configuration file; using built-in defaults"),
    }

    let simulator = Simulator::from_config(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    simulator.run(&cli.command, cli.json, &mut out)?;

    debug!("done");
    Ok(())
}
