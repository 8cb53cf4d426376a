use anyhow::{Context, Result};
use clap::Parser;
use coinflip::{config::Config, manager::Manager};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of independent trials.
    #[arg(long)]
    n_cases: Option<usize>,

    /// Number of coin flips per trial.
    #[arg(long)]
    flips_per_case: Option<usize>,

    /// Random number generator seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Chart image file (an empty path disables saving).
    #[arg(long)]
    output: Option<String>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mut cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };

    if let Some(n_cases) = args.n_cases {
        cfg.sim.n_cases = n_cases;
    }
    if let Some(flips_per_case) = args.flips_per_case {
        cfg.sim.flips_per_case = flips_per_case;
    }
    if args.seed.is_some() {
        cfg.sim.seed = args.seed;
    }
    if let Some(output) = args.output {
        cfg.output.plot_file = Some(PathBuf::from(output));
    }

    let mgr = Manager::new(cfg).context("failed to construct mgr")?;
    mgr.run()?;

    Ok(())
}
