use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filing::fields::FieldSet;

/// Controls which optional segments the canonical rendering carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NameOptions {
    /// Include the ownership-percent segment when the field is present.
    /// Turning this off shortens names; the collision resolver will still
    /// re-render with the percent if two short names clash.
    pub include_percent: bool,
}

impl Default for NameOptions {
    fn default() -> Self {
        NameOptions {
            include_percent: true,
        }
    }
}

/// Name derived purely from extracted fields, before any uniqueness
/// adjustment. Same fields, same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static AMPERSAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*&\s*").unwrap());
static ILLEGAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z0-9-]").unwrap());
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Normalize one name segment: uppercase, spaces and ampersands to hyphens,
/// everything outside `[A-Z0-9-]` stripped, hyphen runs collapsed.
fn clean_segment(raw: &str) -> String {
    let mut segment = raw.to_uppercase();
    segment = AMPERSAND.replace_all(&segment, "-").into_owned();
    segment = segment.replace([' ', '/', '.'], "-");
    segment = ILLEGAL.replace_all(&segment, "").into_owned();
    segment = HYPHEN_RUN.replace_all(&segment, "-").into_owned();
    segment.trim_matches('-').to_string()
}

/// Render `YYYY-MM-DD_FILINGTYPE_TICKER_FILER-NAME_X-XXPCT` from whichever
/// fields are present, dropping absent segments. Pure and deterministic.
pub fn build(fields: &FieldSet, options: &NameOptions) -> CanonicalName {
    let mut parts: Vec<String> = Vec::new();

    if let Some(date) = fields.filing_date {
        parts.push(date.format("%Y-%m-%d").to_string());
    }
    if let Some(filing_type) = fields.filing_type {
        parts.push(clean_segment(&filing_type.name_segment()));
    }
    if let Some(ticker) = &fields.ticker {
        parts.push(ticker.as_str().to_string());
    }
    if let Some(filer) = &fields.filer_name {
        let segment = clean_segment(filer);
        if !segment.is_empty() {
            parts.push(segment);
        }
    }
    if options.include_percent {
        if let Some(percent) = &fields.ownership_percent {
            parts.push(clean_segment(&percent.name_segment()));
        }
    }

    CanonicalName(parts.join("_"))
}

/// Re-render with the percent segment forced on, for collision
/// disambiguation.
pub fn build_with_percent(fields: &FieldSet) -> CanonicalName {
    build(
        fields,
        &NameOptions {
            include_percent: true,
        },
    )
}
