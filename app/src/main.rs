// ==============================================================================
// main.rs - SNP Matcher Entry Point
// ==============================================================================
// Description: Command-line shell that matches target SNPs against raw genotype data
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snp_matcher::input::DEFAULT_MAX_FILE_SIZE;
use snp_matcher::models::SnpMatch;
use snp_matcher::output::{generate_raw_format, OutputFormat, OutputGenerator, CSV_HEADER};
use snp_matcher::processor::{
    AnalysisOutcome, AnalyzerConfig, SnpAnalyzer, DEFAULT_TARGETS_PATH,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw genotype data file (plain text or gzip)
    #[arg(short, long, env = "SNP_MATCHER_GENOME")]
    genome: PathBuf,

    /// Target SNP list (gene,rsid per line)
    #[arg(short, long, env = "SNP_MATCHER_TARGETS", default_value = DEFAULT_TARGETS_PATH)]
    targets: PathBuf,

    /// Directory for exported files
    #[arg(short, long, env = "SNP_MATCHER_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Export format (csv or raw); repeat for several, defaults to both
    #[arg(short = 'f', long = "format")]
    formats: Vec<OutputFormat>,

    /// Maximum input file size in bytes
    #[arg(long, env = "SNP_MATCHER_MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Only display results, do not write export files
    #[arg(long)]
    no_export: bool,
}

fn main() -> Result<ExitCode> {
    // Load .env before clap reads env fallbacks
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snp_matcher=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    info!("SNP Matcher starting...");

    let analyzer = SnpAnalyzer::new(AnalyzerConfig {
        targets_path: args.targets.clone(),
        genome_path: args.genome.clone(),
        max_file_size: args.max_file_size,
    });

    let report = analyzer.process();

    for notice in &report.notices {
        eprintln!("{}", notice);
    }

    let records = match &report.outcome {
        AnalysisOutcome::NoTargets => return Ok(ExitCode::from(1)),
        AnalysisOutcome::NoMatches => return Ok(ExitCode::from(2)),
        AnalysisOutcome::Matches(records) => records,
    };

    println!("Results");
    println!("{}", report.summary());
    println!();
    println!("Detailed View");
    print_table(records);
    println!();
    println!("Raw Data Format");
    println!("{}", generate_raw_format(records));

    if args.no_export {
        return Ok(ExitCode::SUCCESS);
    }

    let formats = if args.formats.is_empty() {
        OutputFormat::ALL.to_vec()
    } else {
        args.formats.clone()
    };

    let written = OutputGenerator::new(&args.output_dir).generate(&formats, records)?;
    for format in &formats {
        if let Some(path) = written.get(format) {
            println!("Saved {}: {}", format.file_name(), path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Print matches as an aligned table
fn print_table(records: &[SnpMatch]) {
    let header: [&str; 5] = CSV_HEADER;
    let rows: Vec<[&str; 5]> = records
        .iter()
        .map(|r| {
            [
                r.rsid.as_str(),
                r.chromosome.as_str(),
                r.position.as_str(),
                r.genotype.as_str(),
                r.gene.as_str(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}
