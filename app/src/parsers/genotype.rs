// ==============================================================================
// genotype.rs - Raw Genotype Data Filter
// ==============================================================================
// Description: Parses raw genotype files and keeps lines matching target SNPs
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Format: Whitespace-delimited text with header comments
// Example:
//   # rsid    chromosome    position    genotype
//   rs548049170    1    69869    TT
//   rs13328684    1    74792    --
//   rs9283150    1    565508    A    A
// ==============================================================================

use thiserror::Error;
use tracing::debug;

use crate::models::{normalize_rsid, SnpMatch, TargetSnps};

/// Minimum whitespace-separated tokens for a data line
const MIN_TOKENS: usize = 4;

/// Errors that can occur during genotype file parsing
#[derive(Error, Debug)]
pub enum GenomeParseError {
    #[error("invalid UTF-8 in genotype data: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
}

/// Filter that extracts target SNPs from a raw genotype file
#[derive(Debug, Clone, Copy)]
pub struct GenotypeFilter<'a> {
    targets: &'a TargetSnps,
}

impl<'a> GenotypeFilter<'a> {
    pub fn new(targets: &'a TargetSnps) -> Self {
        Self { targets }
    }

    /// Extract matching genotype records
    ///
    /// # Arguments
    /// * `content` - Raw bytes of the genotype file
    ///
    /// # Returns
    /// * `Ok(Vec<SnpMatch>)` - Matches in file order (possibly empty)
    /// * `Err(GenomeParseError)` - Content is not valid UTF-8
    ///
    /// # Format
    /// Lines end at `\n`, `\r\n` or a bare `\r`. Lines starting with '#' are
    /// comments. Data lines are split on any whitespace and need at least 4
    /// tokens: rsid, chromosome, position, genotype. When a line carries 5 or more tokens the 4th and 5th are
    /// joined without a separator ("A C" -> "AC"); further tokens are ignored.
    /// Shorter lines are skipped silently.
    pub fn filter(&self, content: &[u8]) -> Result<Vec<SnpMatch>, GenomeParseError> {
        let text = std::str::from_utf8(content)?;

        let mut matches = Vec::new();
        let mut data_lines = 0usize;
        let mut short_lines = 0usize;

        // \n, \r\n and bare \r all end a line; the empty pieces are skipped below
        for line in text.split(['\n', '\r']) {
            if line.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < MIN_TOKENS {
                if !tokens.is_empty() {
                    short_lines += 1;
                }
                continue;
            }
            data_lines += 1;

            if let Some(record) = self.match_tokens(&tokens) {
                matches.push(record);
            }
        }

        debug!(
            "Scanned {} data lines ({} short lines skipped), {} matched",
            data_lines,
            short_lines,
            matches.len()
        );

        Ok(matches)
    }

    /// Build a record from a tokenized line if its rsID is a target
    fn match_tokens(&self, tokens: &[&str]) -> Option<SnpMatch> {
        let gene = self.targets.gene(&normalize_rsid(tokens[0]))?;

        // Known quirk: split allele columns lose their separator
        let genotype = if tokens.len() == MIN_TOKENS {
            tokens[3].to_string()
        } else {
            format!("{}{}", tokens[3], tokens[4])
        };

        Some(SnpMatch {
            rsid: tokens[0].to_string(),
            chromosome: tokens[1].to_string(),
            position: tokens[2].to_string(),
            genotype,
            gene: gene.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(pairs: &[(&str, &str)]) -> TargetSnps {
        let mut targets = TargetSnps::new();
        for (gene, rsid) in pairs {
            targets.insert(*gene, rsid);
        }
        targets
    }

    #[test]
    fn test_filter_matching_lines() {
        let targets = targets(&[("BRCA1", "rs80357906"), ("TP53", "rs28934578")]);
        let contents = "rs80357906\t17\t41276045\tAA\nrs28934578\t17\t7676154\tGT\nrsNOMATCH\t1\t100\tCC";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            SnpMatch {
                rsid: "rs80357906".to_string(),
                chromosome: "17".to_string(),
                position: "41276045".to_string(),
                genotype: "AA".to_string(),
                gene: "BRCA1".to_string(),
            }
        );
        assert_eq!(records[1].gene, "TP53");
        assert_eq!(records[1].genotype, "GT");
    }

    #[test]
    fn test_comment_lines_skipped() {
        let targets = targets(&[("BRCA1", "rs80357906")]);
        let contents = "\
# This data file generated by 23andMe
# rs80357906\t17\t41276045\tAA
#rs80357906\t17\t41276045\tAA
rs80357906\t17\t41276045\tAG
";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].genotype, "AG");
    }

    #[test]
    fn test_short_lines_skipped() {
        let targets = targets(&[("BRCA1", "rs80357906")]);
        let contents = "rs80357906\t17\t41276045\n\nrs80357906\n";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_five_tokens_concatenated() {
        let targets = targets(&[("APOE", "rs429358"), ("APOE", "rs7412")]);
        let contents = "rs429358 19 45411941 T C\nrs7412 19 45412079 C T extra\n";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].genotype, "TC");
        // Tokens past the fifth are dropped
        assert_eq!(records[1].genotype, "CT");
    }

    #[test]
    fn test_rsid_case_preserved() {
        let targets = targets(&[("MTHFR", "rs1801133"), ("VKORC1", "9923231")]);
        let contents = "RS1801133\t1\t11856378\tAG\n9923231\t16\t31107689\tCC\n";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rsid, "RS1801133");
        assert_eq!(records[0].gene, "MTHFR");
        assert_eq!(records[1].rsid, "9923231");
        assert_eq!(records[1].gene, "VKORC1");
    }

    #[test]
    fn test_file_order_preserved() {
        let targets = targets(&[("A", "rs1"), ("B", "rs2"), ("C", "rs3")]);
        let contents = "rs3 1 30 AA\nrs1 1 10 CC\nrs2 1 20 GG\nrs1 1 10 TT\n";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.rsid.as_str()).collect();
        assert_eq!(ids, vec!["rs3", "rs1", "rs2", "rs1"]);
    }

    #[test]
    fn test_bare_cr_line_endings() {
        let targets = targets(&[("BRCA1", "rs80357906"), ("TP53", "rs28934578")]);
        let contents = "# header\rrs80357906\t17\t41276045\tAA\rrs28934578\t17\t7676154\tGT\r";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rsid, "rs80357906");
        assert_eq!(records[0].genotype, "AA");
        assert_eq!(records[1].rsid, "rs28934578");
        assert_eq!(records[1].genotype, "GT");
    }

    #[test]
    fn test_mixed_line_endings() {
        let targets = targets(&[("BRCA1", "rs80357906"), ("TP53", "rs28934578")]);
        let contents = "# header\r\nrs80357906 17 41276045 AA\rrs28934578 17 7676154 GT\n";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].gene, "TP53");
    }

    #[test]
    fn test_mixed_whitespace_and_crlf() {
        let targets = targets(&[("BRCA1", "rs80357906")]);
        let contents = "  rs80357906 \t 17   41276045\t\tAA  \r\n";

        let records = GenotypeFilter::new(&targets).filter(contents.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].position, "41276045");
        assert_eq!(records[0].genotype, "AA");
    }

    #[test]
    fn test_empty_content() {
        let targets = targets(&[("BRCA1", "rs80357906")]);

        let records = GenotypeFilter::new(&targets).filter(b"").unwrap();
        assert!(records.is_empty());

        let records = GenotypeFilter::new(&targets)
            .filter(b"# rsid\tchromosome\tposition\tgenotype\n")
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_utf8() {
        let targets = targets(&[("BRCA1", "rs80357906")]);

        let result = GenotypeFilter::new(&targets).filter(b"rs80357906\t17\t1\t\xff\xff");
        assert!(matches!(result, Err(GenomeParseError::Utf8Error(_))));
    }
}
