//! Speedup analysis: reads process-count timings → derives speedup, efficiency
//! and overhead → writes five SVG charts and prints a performance report.
//!
//! Usage: analyze [--input timing_manual.csv] [--output-dir .]

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::error;

use parallel_perf::utils::{
    config::{DEFAULT_INPUT_CSV, ReportConfig},
    error::PerfError,
    report::{analyze, render_charts},
    report_text::{analysis_report, generated_files, load_banner, missing_input_help, rule},
};

#[derive(Parser, Debug)]
#[clap(name = "analyze", about = "Speedup, efficiency and overhead report for a timing CSV")]
struct Args {
    /// CSV with `Processes` and `Time` columns
    #[clap(short, long, default_value = DEFAULT_INPUT_CSV)]
    input: PathBuf,

    /// Directory the charts are written into
    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let config = ReportConfig::new(args.input, args.output_dir);

    println!("{}", rule());
    println!("SPEEDUP ANALYSIS - Parallel Performance Report");
    println!("{}\n", rule());

    let (record, series, summary) = match analyze(&config) {
        Ok(loaded) => loaded,
        Err(PerfError::MissingInput { path }) => {
            eprintln!("{}", missing_input_help(&path));
            return ExitCode::FAILURE;
        }
        Err(e) => return fail(e),
    };

    print!("{}", load_banner(&record, &config.input_path));
    println!();

    let charts = match render_charts(&config, &record, &series, &summary) {
        Ok(charts) => charts,
        Err(e) => return fail(e),
    };

    for (_, path) in charts.produced() {
        println!("Saved: {}", path.display());
    }
    for (kind, e) in charts.failures() {
        eprintln!("Failed: {} ({})", kind.file_name(), e);
    }

    print!("{}", analysis_report(&summary));

    let produced: Vec<_> = charts.produced().map(|(kind, p)| (kind, p.clone())).collect();
    print!("{}", generated_files(&produced));

    match charts.into_result() {
        Ok(_) => {
            println!("\n{}", rule());
            println!("ALL PLOTS GENERATED SUCCESSFULLY");
            println!("{}", rule());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\nError: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn fail(e: PerfError) -> ExitCode {
    error!("Analysis aborted: {}", e);
    eprintln!("Error: {}", e);
    ExitCode::FAILURE
}
