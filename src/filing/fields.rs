use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::report::FilingType;
use super::tickers::Ticker;

/// Plain text of the leading pages of one source document.
#[derive(Debug, Clone, PartialEq)]
pub struct FilingText(String);

impl FilingText {
    pub fn new(text: String) -> Self {
        FilingText(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for FilingText {
    fn from(s: &str) -> Self {
        FilingText(s.to_string())
    }
}

static PERCENT_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Ownership percentage carrying the exact digits found in the source text.
/// Stored as a string so "30.7" and "30.70" stay distinct; parsing through a
/// float would invent or drop precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnershipPercent(String);

impl OwnershipPercent {
    pub fn new(value: String) -> Result<Self> {
        let value = value.trim().to_string();
        if !PERCENT_SHAPE.is_match(&value) {
            return Err(anyhow!("Not a decimal percentage: {}", value));
        }
        Ok(OwnershipPercent(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rendering used inside file names: `5.01` becomes `5-01PCT`.
    pub fn name_segment(&self) -> String {
        format!("{}PCT", self.0.replace('.', "-"))
    }
}

impl TryFrom<String> for OwnershipPercent {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        OwnershipPercent::new(s).map_err(|e| e.to_string())
    }
}

impl From<OwnershipPercent> for String {
    fn from(p: OwnershipPercent) -> String {
        p.0
    }
}

impl fmt::Display for OwnershipPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Everything extraction could recover from one document. Slots are filled
/// independently; a missing filing type or date makes the document
/// unprocessable, the other fields only shorten the derived name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSet {
    pub filing_type: Option<FilingType>,
    pub filing_date: Option<NaiveDate>,
    pub ticker: Option<Ticker>,
    pub filer_name: Option<String>,
    pub ownership_percent: Option<OwnershipPercent>,
    /// More than one equally-ranked percentage row was seen; the first one
    /// was kept.
    pub percent_ambiguous: bool,
}

impl FieldSet {
    pub fn has_required(&self) -> bool {
        self.filing_type.is_some() && self.filing_date.is_some()
    }

    /// Names of the fields that were successfully extracted, for skip
    /// reporting.
    pub fn found_fields(&self) -> Vec<&'static str> {
        let mut found = Vec::new();
        if self.filing_type.is_some() {
            found.push("filing-type");
        }
        if self.filing_date.is_some() {
            found.push("filing-date");
        }
        if self.ticker.is_some() {
            found.push("ticker");
        }
        if self.filer_name.is_some() {
            found.push("filer-name");
        }
        if self.ownership_percent.is_some() {
            found.push("ownership-percent");
        }
        found
    }
}
