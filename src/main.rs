use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use porous_flow::{Phase, SimulationConfig, TimeStepper};

/// Two-phase porous flow simulator
#[derive(Parser)]
#[command(name = "porous-flow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Gas/liquid flow through a porous medium on a 2-D grid", long_about = None)]
struct Cli {
    /// TOML configuration file; the reference 40x40 scenario when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of time steps
    #[arg(short, long)]
    steps: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::reference(),
    };
    if let Some(steps) = cli.steps {
        config.run.nsteps = steps;
    }
    for line in config.summary().lines() {
        info!("{}", line);
    }

    let mut stepper = TimeStepper::new(&config).context("Failed to set up simulation")?;
    let summary = stepper.run().context("Simulation aborted")?;

    let fields = stepper.current();
    info!("=== Run Summary ===");
    info!("Steps: {} (t={:.4}s)", summary.steps, stepper.current_time());
    info!(
        "Pressure: [{:.1}, {:.1}] Pa",
        summary.pressure_range.0, summary.pressure_range.1
    );
    info!(
        "Gas saturation: [{:.4}, {:.4}]",
        summary.saturation_range.0, summary.saturation_range.1
    );
    info!(
        "Mass per unit depth: gas={:.6} kg/m, liquid={:.3} kg/m",
        summary.gas_mass, summary.liquid_mass
    );
    for phase in Phase::ALL {
        let vmax = fields
            .velocity_magnitude(phase)
            .iter()
            .fold(0.0_f64, |acc, &x| acc.max(x));
        info!("Max {} speed: {:.4e} m/s", phase.name(), vmax);
    }
    if summary.unconverged_cells > 0 {
        info!(
            "Equilibrium solve hit the iteration cap {} time(s)",
            summary.unconverged_cells
        );
    }

    Ok(())
}
