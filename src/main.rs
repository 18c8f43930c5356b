//! Runs the annealer on the reference 8-city instance and prints every
//! generation as `GNOME FITNESS` rows.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (default `tsp_anneal=info`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tsp_anneal::anneal::{AcceptanceRule, AnnealConfig, AnnealRunner, GenerationReport};
use tsp_anneal::tsp::TspInstance;
use tsp_anneal::AnnealError;

#[derive(Debug, Parser)]
#[command(
    name = "tsp-anneal",
    version,
    about = "Simulated annealing over the reference TSP instance"
)]
struct Cli {
    /// TOML configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Individuals per generation.
    #[arg(long)]
    population_size: Option<usize>,

    /// Maximum number of generations.
    #[arg(long)]
    generations: Option<usize>,

    /// Starting temperature.
    #[arg(long)]
    initial_temperature: Option<f64>,

    /// Stopping temperature.
    #[arg(long)]
    min_temperature: Option<f64>,

    /// Multiplicative cooling per generation.
    #[arg(long)]
    cooling_ratio: Option<f64>,

    /// Fixed acceptance threshold for worse tours.
    #[arg(long, conflicts_with = "metropolis")]
    accept_threshold: Option<f64>,

    /// Use the Metropolis criterion instead of a fixed threshold.
    #[arg(long)]
    metropolis: bool,

    /// Only print the best tour.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<(AnnealConfig, bool), AnnealError> {
        let mut config = match &self.config {
            Some(path) => AnnealConfig::from_toml_file(path)?,
            None => AnnealConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(n) = self.population_size {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.generations {
            config = config.with_max_generations(n);
        }
        if let Some(t) = self.initial_temperature {
            config = config.with_initial_temperature(t);
        }
        if let Some(t) = self.min_temperature {
            config = config.with_min_temperature(t);
        }
        if let Some(r) = self.cooling_ratio {
            config = config.with_cooling_ratio(r);
        }
        if let Some(t) = self.accept_threshold {
            config = config.with_accept_threshold(t);
        }
        if self.metropolis {
            config = config.with_acceptance(AcceptanceRule::Metropolis);
        }
        Ok((config, self.quiet))
    }
}

fn print_generation(report: &GenerationReport<'_>) {
    if report.generation == 0 {
        println!("\nInitial population:\nGNOME     FITNESS VALUE");
    } else {
        println!("\nCurrent temp: {}", report.temperature);
        println!("Generation {}\nGNOME     FITNESS VALUE", report.generation);
    }
    for ind in report.population {
        println!("{ind}");
    }
}

fn run(cli: Cli) -> Result<(), AnnealError> {
    let (config, quiet) = cli.into_config()?;
    let instance = TspInstance::reference();

    let result = if quiet {
        AnnealRunner::run(&instance, &config)?
    } else {
        AnnealRunner::run_with_observer(&instance, &config, &mut print_generation)?
    };

    println!(
        "\nBest tour after {} generations: {} (seed {})",
        result.generations, result.best, result.seed
    );
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_default_directive("tsp_anneal=info".parse().expect("valid directive"))
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
