// ==============================================================================
// targets.rs - Target SNP List Parser
// ==============================================================================
// Description: Parser for the two-column gene/rsID target list
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Format: Comma-separated, no header, two fields per row
// Example:
//   BRCA1,rs80357906
//   TP53,28934578
//   APOE, RS429358
// ==============================================================================

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::debug;

use crate::models::TargetSnps;

/// Errors that can occur during target list parsing
#[derive(Error, Debug)]
pub enum TargetParseError {
    #[error("invalid UTF-8 in target list: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Parser for target SNP lists
pub struct TargetListParser;

impl TargetListParser {
    /// Parse a target list into a normalized rsID -> gene lookup
    ///
    /// # Arguments
    /// * `content` - Raw bytes of the target list
    ///
    /// # Returns
    /// * `Ok(TargetSnps)` - Lookup (possibly empty)
    /// * `Err(TargetParseError)` - Content is not valid UTF-8 or CSV
    ///
    /// # Format
    /// Each row is `<gene>,<rsid>`. Both fields are trimmed. The rsID is
    /// lower-cased and gets an "rs" prefix when it has none. Rows that do not
    /// have exactly two fields are skipped without error.
    pub fn parse(content: &[u8]) -> Result<TargetSnps, TargetParseError> {
        let text = std::str::from_utf8(content)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut targets = TargetSnps::new();
        let mut skipped = 0usize;

        for result in reader.records() {
            let record = result?;

            if record.len() != 2 {
                skipped += 1;
                continue;
            }

            let gene = record[0].trim();
            let rsid = record[1].trim();
            targets.insert(gene, rsid);
        }

        debug!(
            "Parsed target list: {} targets, {} rows skipped",
            targets.len(),
            skipped
        );

        Ok(targets)
    }
}
