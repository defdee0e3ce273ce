//! river-rs - run one pollutant-transport simulation
//!
//! ```text
//! river-rs [CONFIG] [--output-dir DIR] [--verbose]
//! ```
//!
//! Without a configuration file the base case is run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use river_rs::config::RunConfig;
use river_rs::error::TransportResult;

#[derive(Parser, Debug)]
#[command(name = "river-rs")]
#[command(about = "Implicit upwind advection-decay solver for a river reach")]
struct Cli {
    /// JSON run configuration (base case when omitted)
    config: Option<PathBuf>,

    /// Override the output directory of the configuration
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log solver details
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Off)
        .build();

    // A logger may already be installed when embedded; keep it.
    let _ = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto);
}

fn run(cli: Cli) -> TransportResult<()> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration {}", path.display());
            RunConfig::from_file(path)?
        }
        None => {
            info!("No configuration given, running the base case");
            RunConfig::default()
        }
    };
    if let Some(directory) = cli.output_dir {
        config.output.directory = directory;
    }

    let run = config.run()?;
    info!(
        "Solved: nx={}, nt={}, outlet at t_end = {:.4}",
        run.space.len(),
        run.time.len(),
        run.final_outlet()
    );

    let written = config.write_outputs(&run)?;
    info!("{} file(s) written to {}", written.len(), config.output.directory.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
