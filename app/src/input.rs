// ==============================================================================
// input.rs - Input File Loading
// ==============================================================================
// Description: Reads target lists and genotype files into memory (size, gzip, hash)
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use flate2::read::MultiGzDecoder;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_MAX_FILE_SIZE: u64 = 500 * 1024 * 1024; // 500 MB

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Errors that can occur while loading an input file
#[derive(Error, Debug)]
pub enum InputError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("file too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

/// An input file held fully in memory
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub name: String,
    /// Size on disk, before decompression
    pub size: u64,
    /// SHA-256 of the bytes on disk
    pub hash_sha256: String,
    pub compressed: bool,
    /// Decompressed content
    pub content: Vec<u8>,
}

pub struct InputLoader {
    max_file_size: u64,
}

impl InputLoader {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Read a file into memory, decompressing gzip content transparently
    ///
    /// The size limit applies to both the file on disk and the decompressed
    /// content.
    pub fn load(&self, path: &Path) -> Result<LoadedInput, InputError> {
        if !path.exists() {
            return Err(InputError::NotFound(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let size = std::fs::metadata(path)?.len();
        self.check_size(size)?;

        let raw = std::fs::read(path)?;
        let hash_sha256 = format!("{:x}", Sha256::digest(&raw));
        debug!("SHA-256 of {}: {}", name, hash_sha256);

        let compressed = raw.starts_with(&GZIP_MAGIC);
        let content = if compressed {
            self.decompress(&raw)?
        } else {
            raw
        };

        info!(
            "Loaded {} ({} bytes on disk, {} bytes content{})",
            name,
            size,
            content.len(),
            if compressed { ", gzip" } else { "" }
        );

        Ok(LoadedInput {
            name,
            size,
            hash_sha256,
            compressed,
            content,
        })
    }

    fn check_size(&self, size: u64) -> Result<(), InputError> {
        if size > self.max_file_size {
            return Err(InputError::TooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    fn decompress(&self, raw: &[u8]) -> Result<Vec<u8>, InputError> {
        let mut content = Vec::new();
        MultiGzDecoder::new(raw)
            .take(self.max_file_size + 1)
            .read_to_end(&mut content)?;
        self.check_size(content.len() as u64)?;
        Ok(content)
    }
}

impl Default for InputLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}
