//! Line-item records for the two vendor quotation layouts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A row type that can live in a session table and a master partition.
pub trait LedgerRecord: Clone + Serialize + DeserializeOwned {
    /// Spreadsheet column headers, in export order.
    const COLUMNS: &'static [&'static str];

    /// Name of the document this row came from.
    fn source_file(&self) -> &str;

    /// Tag the row with the document it came from.
    fn set_source_file(&mut self, name: &str);

    /// Values of the identity key used to detect duplicate rows.
    fn identity_key(&self) -> Vec<String>;
}

fn key_decimal(value: &Decimal) -> String {
    value.normalize().to_string()
}

fn key_opt_decimal(value: &Option<Decimal>) -> String {
    value.as_ref().map(key_decimal).unwrap_or_default()
}

/// A Variant A line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    #[serde(rename = "Item Number")]
    pub item_number: String,

    #[serde(rename = "Item Description")]
    pub description: String,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Quantity")]
    pub quantity: u64,

    #[serde(rename = "Net Price")]
    pub net_price: Decimal,

    #[serde(rename = "Amount")]
    pub amount: Decimal,

    /// ISO date found in the document header, empty when none was found.
    #[serde(rename = "Quotation Date", default)]
    pub quotation_date: String,

    #[serde(rename = "Source File", default)]
    pub source_file: String,
}

impl LedgerRecord for QuoteItem {
    const COLUMNS: &'static [&'static str] = &[
        "Item Number",
        "Item Description",
        "Category",
        "Quantity",
        "Net Price",
        "Amount",
        "Quotation Date",
        "Source File",
    ];

    fn source_file(&self) -> &str {
        &self.source_file
    }

    fn set_source_file(&mut self, name: &str) {
        self.source_file = name.to_string();
    }

    fn identity_key(&self) -> Vec<String> {
        vec![
            self.item_number.clone(),
            self.description.clone(),
            self.category.clone(),
            self.quantity.to_string(),
            key_decimal(&self.net_price),
            key_decimal(&self.amount),
            self.source_file.clone(),
        ]
    }
}

/// Unit-of-measure codes accepted on Variant B quotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    #[serde(rename = "EA")]
    Each,
    #[serde(rename = "SET")]
    Set,
    #[serde(rename = "FT")]
    Foot,
    #[serde(rename = "HR")]
    Hour,
}

impl UnitOfMeasure {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Each => "EA",
            Self::Set => "SET",
            Self::Foot => "FT",
            Self::Hour => "HR",
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UnitOfMeasure {
    type Err = ();

    /// Codes are matched exactly; "ea" or "EACH" are not units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EA" => Ok(Self::Each),
            "SET" => Ok(Self::Set),
            "FT" => Ok(Self::Foot),
            "HR" => Ok(Self::Hour),
            _ => Err(()),
        }
    }
}

/// A Variant B line item.
///
/// Fields that failed their shape check in relaxed mode are `None` or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartItem {
    #[serde(rename = "Quantity")]
    pub quantity: Option<Decimal>,

    #[serde(rename = "Unit Price")]
    pub unit_price: Option<Decimal>,

    #[serde(rename = "UOM")]
    pub unit: Option<UnitOfMeasure>,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Extension")]
    pub extension: Option<Decimal>,

    /// Three-digit line sequence number.
    #[serde(rename = "Item No", default)]
    pub item_number: String,

    #[serde(rename = "Part Number", default)]
    pub part_number: String,

    /// `M/D/YYYY` date found in the document, empty when none was found.
    #[serde(rename = "Quotation Date", default)]
    pub quotation_date: String,

    #[serde(rename = "Source File", default)]
    pub source_file: String,
}

impl LedgerRecord for PartItem {
    const COLUMNS: &'static [&'static str] = &[
        "Quantity",
        "Unit Price",
        "UOM",
        "Description",
        "Extension",
        "Item No",
        "Part Number",
        "Quotation Date",
        "Source File",
    ];

    fn source_file(&self) -> &str {
        &self.source_file
    }

    fn set_source_file(&mut self, name: &str) {
        self.source_file = name.to_string();
    }

    fn identity_key(&self) -> Vec<String> {
        vec![
            self.part_number.clone(),
            self.description.clone(),
            self.unit.map(|u| u.code().to_string()).unwrap_or_default(),
            key_opt_decimal(&self.quantity),
            key_opt_decimal(&self.unit_price),
            key_opt_decimal(&self.extension),
            self.source_file.clone(),
        ]
    }
}
