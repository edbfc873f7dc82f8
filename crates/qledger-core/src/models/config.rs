//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ValidationMode, Variant};
use crate::error::LedgerError;

/// Main configuration for qledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Layout scanner configuration.
    pub extraction: ExtractionConfig,

    /// Master store configuration.
    pub master: MasterConfig,

    /// Session output configuration.
    pub output: OutputConfig,
}

/// Layout scanner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Layout used when none is given on the command line.
    pub variant: Variant,

    /// Validation mode for Variant B.
    pub mode: ValidationMode,

    /// Line offsets of the Variant B block.
    pub parts_layout: PartsLayout,
}

/// Line offsets of each field inside a Variant B block, relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartsLayout {
    pub quantity: usize,
    pub unit_price: usize,
    pub unit: usize,
    pub description: usize,
    pub extension: usize,
    pub item_number: usize,
    pub part_number: usize,

    /// Lines consumed by one accepted block.
    pub block_len: usize,
}

impl Default for PartsLayout {
    fn default() -> Self {
        Self {
            quantity: 0,
            unit_price: 1,
            unit: 2,
            description: 3,
            extension: 4,
            item_number: 5,
            part_number: 6,
            block_len: 8,
        }
    }
}

impl PartsLayout {
    /// Largest accepted field offset or block length.
    pub const MAX_SPAN: usize = 64;

    fn offsets(&self) -> [usize; 7] {
        [
            self.quantity,
            self.unit_price,
            self.unit,
            self.description,
            self.extension,
            self.item_number,
            self.part_number,
        ]
    }

    /// Number of lines that must be available from the cursor to read one block.
    pub fn window(&self) -> usize {
        self.offsets()
            .into_iter()
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Check that every field has its own line within [`MAX_SPAN`](Self::MAX_SPAN)
    /// and the block length is non-zero.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.block_len == 0 || self.block_len > Self::MAX_SPAN {
            return Err(LedgerError::Config(format!(
                "parts_layout.block_len must be between 1 and {}",
                Self::MAX_SPAN
            )));
        }

        let offsets = self.offsets();
        if let Some(offset) = offsets.iter().find(|&&o| o >= Self::MAX_SPAN) {
            return Err(LedgerError::Config(format!(
                "parts_layout offset {offset} must be below {}",
                Self::MAX_SPAN
            )));
        }

        for (i, a) in offsets.iter().enumerate() {
            if offsets[i + 1..].contains(a) {
                return Err(LedgerError::Config(format!(
                    "parts_layout offset {a} is used by more than one field"
                )));
            }
        }

        Ok(())
    }
}

/// Master store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterConfig {
    /// Directory holding one CSV file per partition.
    pub store_dir: PathBuf,

    /// Consolidate every extraction batch into the master store.
    pub append: bool,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("ledger"),
            append: false,
        }
    }
}

/// Session output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the session report when no output path is given.
    pub session_file: Option<PathBuf>,
}

impl LedgerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, LedgerError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))?;
        config.extraction.parts_layout.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
