// ==============================================================================
// models.rs - Target SNP Data Models
// ==============================================================================
// Description: Data structures for target SNP lookup and matched genotype records
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use serde::Serialize;
use std::collections::HashMap;

/// Prefix carried by every canonical marker identifier
pub const RSID_PREFIX: &str = "rs";

/// Normalize a marker identifier for lookup: lower-case, "rs" prefix added if missing
///
/// # Example
/// ```
/// use snp_matcher::models::normalize_rsid;
///
/// assert_eq!(normalize_rsid("RS1234"), "rs1234");
/// assert_eq!(normalize_rsid("1234"), "rs1234");
/// ```
pub fn normalize_rsid(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    if lowered.starts_with(RSID_PREFIX) {
        lowered
    } else {
        format!("{}{}", RSID_PREFIX, lowered)
    }
}

/// Target SNP lookup: normalized rsID -> gene name
///
/// Re-inserting an rsID overwrites the previous gene (last occurrence wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetSnps {
    genes: HashMap<String, String>,
}

impl TargetSnps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a target, normalizing the rsID
    pub fn insert(&mut self, gene: impl Into<String>, rsid: &str) {
        self.genes.insert(normalize_rsid(rsid), gene.into());
    }

    /// Gene for an already-normalized rsID
    pub fn gene(&self, normalized_rsid: &str) -> Option<&str> {
        self.genes.get(normalized_rsid).map(String::as_str)
    }

    pub fn contains(&self, normalized_rsid: &str) -> bool {
        self.genes.contains_key(normalized_rsid)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Iterate (normalized rsID, gene) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.genes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A genotype line that matched a target SNP
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnpMatch {
    /// Identifier exactly as written in the genotype file (case preserved)
    pub rsid: String,
    /// Chromosome token ("1"-"22", "X", "Y", "MT")
    pub chromosome: String,
    /// Position token, kept verbatim
    pub position: String,
    /// Genotype; two allele columns are concatenated without a separator
    pub genotype: String,
    /// Gene name from the target list
    pub gene: String,
}
