// ==============================================================================
// lib.rs - SNP Matcher Library
// ==============================================================================
// Description: Library interface for target SNP matching modules
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

pub mod parsers;
pub mod input;
pub mod models;
pub mod processor;
pub mod output;
