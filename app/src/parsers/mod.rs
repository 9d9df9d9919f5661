// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Parsers for target SNP lists and raw genotype data
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

pub mod targets;
pub mod genotype;

pub use targets::{TargetListParser, TargetParseError};
pub use genotype::{GenotypeFilter, GenomeParseError};
