//! Data models for quotation line items, tables, and configuration.

pub mod config;
pub mod record;
pub mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported vendor quotation layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Six-line blocks: item number, description, category, quantity, net price, amount.
    #[default]
    A,
    /// Eight-line blocks with shape-checked quantity, price, UOM, sequence and part number.
    B,
}

impl Variant {
    /// Name of the master store partition holding this variant's rows.
    pub fn partition(&self) -> &'static str {
        match self {
            Self::A => "variant-a",
            Self::B => "variant-b",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "a"),
            Self::B => write!(f, "b"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "variant-a" => Ok(Self::A),
            "b" | "variant-b" => Ok(Self::B),
            other => Err(format!("unknown layout variant: {other}")),
        }
    }
}

/// Validation strictness for the Variant B scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Drop any block where a field fails its shape check.
    #[default]
    Strict,
    /// Keep partially matching blocks, blanking the failing fields.
    Relaxed,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Relaxed => write!(f, "relaxed"),
        }
    }
}
