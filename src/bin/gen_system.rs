//! Writes a random N x (N+1) linear system used as solver input.
//!
//! Usage: gen_system [-n 1000] [--output input.txt] [--seed 42] [--verify]

use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::info;

use parallel_perf::system_gen::{SystemGenerator, read_system};
use parallel_perf::utils::config::{
    DEFAULT_PRECISION, DEFAULT_SAMPLE_MAX, DEFAULT_SAMPLE_MIN, DEFAULT_SYSTEM_FILE,
    DEFAULT_SYSTEM_SIZE, GeneratorConfig,
};

#[derive(Parser, Debug)]
#[clap(name = "gen_system", about = "Generate a random dense linear system")]
struct Args {
    /// Output file, overwritten if it exists
    #[clap(short, long, default_value = DEFAULT_SYSTEM_FILE)]
    output: PathBuf,

    /// Number of equations
    #[clap(short = 'n', long, default_value_t = DEFAULT_SYSTEM_SIZE)]
    size: usize,

    #[clap(long, default_value_t = DEFAULT_SAMPLE_MIN)]
    min: f64,

    #[clap(long, default_value_t = DEFAULT_SAMPLE_MAX)]
    max: f64,

    /// Fractional digits per value
    #[clap(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Fixed RNG seed for reproducible output
    #[clap(long)]
    seed: Option<u64>,

    /// Read the file back and check its shape and range
    #[clap(long)]
    verify: bool,
}

impl Args {
    fn into_config(self) -> GeneratorConfig {
        GeneratorConfig {
            output_path: self.output,
            size: self.size,
            sample_range: self.min..=self.max,
            precision: self.precision,
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let verify = args.verify;

    let mut generator = SystemGenerator::new(args.into_config())?;
    let stats = generator.generate()?;

    println!("Generated {}x{} system in {}", stats.rows, stats.rows, stats.path.display());

    if verify {
        let range = &generator.config().sample_range;
        let system = read_system(&stats.path)?;
        if system.size != stats.rows || !system.within(*range.start(), *range.end()) {
            return Err(format!("verification of {} failed", stats.path.display()).into());
        }
        info!("Verified {} rows of {} values", system.size, system.size + 1);
        println!("Verified {}", stats.path.display());
    }

    Ok(())
}
