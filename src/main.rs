//! Edalens: EDA report CLI
//!
//! Loads a train/test pair, merges them and prints the numerical,
//! outlier, categorical and correlation report.

use std::io;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use edalens::cli::{Cli, OutputFormat};
use edalens::pipeline::load_combined;
use edalens::report::{JsonSink, ReportGenerator, ReportMetadata, TerminalSink};
use edalens::utils::{
    init_logging, print_banner, print_completion, print_config, print_dataset_stats, print_error,
    print_info, print_success, print_warning,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.analysis_config()?;
    debug!(?config, "analysis configuration");

    match cli.format {
        OutputFormat::Terminal => {
            print_banner(env!("CARGO_PKG_VERSION"));
            print_config(&cli.train, &cli.test, &config.target);
            if config.allow_unmapped_target {
                print_warning("Unrecognized target labels will be treated as missing");
            }

            let start = Instant::now();
            let (df, stats) = load_combined(&cli.train, &cli.test, cli.infer_schema_length)?;
            print_dataset_stats(&stats);

            let mut sink = TerminalSink::new();
            ReportGenerator::new(&config).generate(df, &mut sink)?;

            println!();
            print_success("Report generated");
            print_info(&format!("Elapsed: {:.2}s", start.elapsed().as_secs_f64()));
            print_completion();
        }
        OutputFormat::Json => {
            let (df, _) = load_combined(&cli.train, &cli.test, cli.infer_schema_length)?;
            let metadata = ReportMetadata::new(
                &cli.train.display().to_string(),
                &cli.test.display().to_string(),
                &config.target,
            );
            let mut sink = JsonSink::new(metadata, io::stdout().lock());
            ReportGenerator::new(&config).generate(df, &mut sink)?;
        }
    }

    Ok(())
}
