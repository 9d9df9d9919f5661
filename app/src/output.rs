// ==============================================================================
// output.rs - Result Export Generation
// ==============================================================================
// Description: Render matched SNPs as raw genotype text and CSV for download
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use anyhow::{anyhow, Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

use crate::models::SnpMatch;

/// Header line of the raw genotype format
pub const RAW_FORMAT_HEADER: &str = "# rsid\tchromosome\tposition\tgenotype";

/// Column order of the CSV export
pub const CSV_HEADER: [&str; 5] = ["rsid", "chromosome", "position", "genotype", "gene"];

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full result table, including gene names
    Csv,
    /// 23andMe-style raw data (no gene column)
    Raw,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Csv, OutputFormat::Raw];

    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Raw => "txt",
        }
    }

    /// Get MIME type for downloads
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Raw => "text/plain",
        }
    }

    /// Default download file name
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "results.csv",
            OutputFormat::Raw => "raw_format.txt",
        }
    }

    /// Render the records in this format
    pub fn render(&self, records: &[SnpMatch]) -> Result<String> {
        match self {
            OutputFormat::Csv => generate_csv(records),
            OutputFormat::Raw => Ok(generate_raw_format(records)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "raw" | "txt" => Ok(OutputFormat::Raw),
            other => Err(format!("unknown output format '{}' (expected csv or raw)", other)),
        }
    }
}

/// Render records in the 23andMe-style raw data layout
///
/// The header line is always newline-terminated; records are joined by a
/// single newline with none after the last one. The gene column is omitted.
///
/// # Example
/// ```
/// use snp_matcher::output::generate_raw_format;
///
/// assert_eq!(generate_raw_format(&[]), "# rsid\tchromosome\tposition\tgenotype\n");
/// ```
pub fn generate_raw_format(records: &[SnpMatch]) -> String {
    let rows: Vec<String> = records
        .iter()
        .map(|r| format!("{}\t{}\t{}\t{}", r.rsid, r.chromosome, r.position, r.genotype))
        .collect();

    format!("{}\n{}", RAW_FORMAT_HEADER, rows.join("\n"))
}

/// Render the full result table as CSV with a header row
pub fn generate_csv(records: &[SnpMatch]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write CSV row for {}", record.rsid))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e.error()))?;

    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Writes export files into a directory
pub struct OutputGenerator {
    output_dir: PathBuf,
}

impl OutputGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write each requested format to its default file name
    ///
    /// # Returns
    /// * HashMap of format -> written file path
    pub fn generate(
        &self,
        formats: &[OutputFormat],
        records: &[SnpMatch],
    ) -> Result<HashMap<OutputFormat, PathBuf>> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {:?}", self.output_dir)
        })?;

        let mut result = HashMap::new();

        for format in formats {
            if result.contains_key(format) {
                continue;
            }

            let path = self.output_dir.join(format.file_name());
            let content = format.render(records)?;
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {} output to {:?}", format, path))?;

            info!(
                "Wrote {} output ({}, {} records): {:?}",
                format,
                format.mime_type(),
                records.len(),
                path
            );
            result.insert(*format, path);
        }

        Ok(result)
    }
}
