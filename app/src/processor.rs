// ==============================================================================
// processor.rs - Target SNP Analysis
// ==============================================================================
// Description: Loads target SNPs, filters genotype data and reports user-facing notices
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Failures never escape this module: each one becomes a Notice and the
// affected stage continues with an empty result.
// ==============================================================================

use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::input::{InputLoader, DEFAULT_MAX_FILE_SIZE};
use crate::models::{SnpMatch, TargetSnps};
use crate::parsers::{GenotypeFilter, TargetListParser};

pub const DEFAULT_TARGETS_PATH: &str = "snps.txt";

pub const MSG_NO_TARGETS: &str = "No target SNPs loaded from the file";
pub const MSG_NO_MATCHES: &str = "No matching SNPs found in the genetic data file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A message meant for the person running the analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "warning: {}", self.message),
            Severity::Error => write!(f, "error: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Target list was empty or unreadable; genotype data was not examined
    NoTargets,
    /// Genotype data produced no matches (or could not be read)
    NoMatches,
    Matches(Vec<SnpMatch>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub target_count: usize,
    pub outcome: AnalysisOutcome,
    pub notices: Vec<Notice>,
}

impl AnalysisReport {
    pub fn matches(&self) -> &[SnpMatch] {
        match &self.outcome {
            AnalysisOutcome::Matches(records) => records,
            _ => &[],
        }
    }

    /// "Found N matching SNPs"
    pub fn summary(&self) -> String {
        format!("Found {} matching SNPs", self.matches().len())
    }
}

/// Parse a target list, reporting failures and falling back to an empty lookup
pub fn load_targets(content: &[u8], notices: &mut Vec<Notice>) -> TargetSnps {
    match TargetListParser::parse(content) {
        Ok(targets) => targets,
        Err(e) => {
            notices.push(target_read_error(e));
            TargetSnps::new()
        }
    }
}

/// Filter genotype data, reporting failures and falling back to no matches
pub fn filter_genome(content: &[u8], targets: &TargetSnps, notices: &mut Vec<Notice>) -> Vec<SnpMatch> {
    match GenotypeFilter::new(targets).filter(content) {
        Ok(records) => records,
        Err(e) => {
            notices.push(genome_read_error(e));
            Vec::new()
        }
    }
}

/// Run the analysis over in-memory target list and genotype data
pub fn analyze(targets_content: &[u8], genome_content: &[u8]) -> AnalysisReport {
    let mut notices = Vec::new();
    let targets = load_targets(targets_content, &mut notices);
    finish(targets, notices, |targets, notices| {
        filter_genome(genome_content, targets, notices)
    })
}

fn target_read_error(e: impl fmt::Display) -> Notice {
    let notice = Notice::error(format!("Error reading target SNPs file: {}", e));
    error!("{}", notice.message);
    notice
}

fn genome_read_error(e: impl fmt::Display) -> Notice {
    let notice = Notice::error(format!("Error processing genetic data: {}", e));
    error!("{}", notice.message);
    notice
}

/// Shared tail: empty-lookup and empty-result checks
fn finish<F>(targets: TargetSnps, mut notices: Vec<Notice>, filter: F) -> AnalysisReport
where
    F: FnOnce(&TargetSnps, &mut Vec<Notice>) -> Vec<SnpMatch>,
{
    if targets.is_empty() {
        warn!("{}", MSG_NO_TARGETS);
        notices.push(Notice::error(MSG_NO_TARGETS));
        return AnalysisReport {
            target_count: 0,
            outcome: AnalysisOutcome::NoTargets,
            notices,
        };
    }

    info!("Loaded {} target SNPs", targets.len());
    let records = filter(&targets, &mut notices);

    let outcome = if records.is_empty() {
        warn!("{}", MSG_NO_MATCHES);
        notices.push(Notice::warning(MSG_NO_MATCHES));
        AnalysisOutcome::NoMatches
    } else {
        info!("Found {} matching SNPs", records.len());
        AnalysisOutcome::Matches(records)
    };

    AnalysisReport {
        target_count: targets.len(),
        outcome,
        notices,
    }
}

/// Settings for a file-based analysis run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub targets_path: PathBuf,
    pub genome_path: PathBuf,
    pub max_file_size: u64,
}

impl AnalyzerConfig {
    pub fn new(genome_path: impl Into<PathBuf>) -> Self {
        Self {
            targets_path: PathBuf::from(DEFAULT_TARGETS_PATH),
            genome_path: genome_path.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Runs the analysis over files on disk
pub struct SnpAnalyzer {
    config: AnalyzerConfig,
    loader: InputLoader,
}

impl SnpAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let loader = InputLoader::new(config.max_file_size);
        Self { config, loader }
    }

    /// Load both files and run the analysis
    ///
    /// Read failures are reported the same way as parse failures. The
    /// genotype file is only read once at least one target is loaded.
    pub fn process(&self) -> AnalysisReport {
        info!(
            "Analyzing {:?} against targets {:?}",
            self.config.genome_path, self.config.targets_path
        );

        let mut notices = Vec::new();
        let targets = match self.loader.load(&self.config.targets_path) {
            Ok(input) => load_targets(&input.content, &mut notices),
            Err(e) => {
                notices.push(target_read_error(e));
                TargetSnps::new()
            }
        };

        finish(targets, notices, |targets, notices| {
            match self.loader.load(&self.config.genome_path) {
                Ok(input) => filter_genome(&input.content, targets, notices),
                Err(e) => {
                    notices.push(genome_read_error(e));
                    Vec::new()
                }
            }
        })
    }
}
