use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filing::fields::OwnershipPercent;

/// Which disclosure-table row a percentage candidate came from. Rows are not
/// equally trustworthy, so extraction ranks candidates by a configurable
/// priority order over these sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PercentSource {
    PercentOfClass,
    ItemFourB,
    AggregateAmount,
}

impl fmt::Display for PercentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentSource::PercentOfClass => write!(f, "percent-of-class"),
            PercentSource::ItemFourB => write!(f, "item-4b"),
            PercentSource::AggregateAmount => write!(f, "aggregate-amount"),
        }
    }
}

pub const DEFAULT_PERCENT_PRIORITY: &[PercentSource] = &[
    PercentSource::PercentOfClass,
    PercentSource::ItemFourB,
    PercentSource::AggregateAmount,
];

// Row labels are matched case-insensitively throughout: filings have shipped
// with "Row", "ROW" and "row" in the same label position.
static PERCENT_PATTERNS: Lazy<Vec<(Regex, PercentSource)>> = Lazy::new(|| {
    [
        (
            // Label, then the row number on its own line, then the value
            r"(?i)Percent\s+of\s+class\s+represented\s+by\s+amount\s+in\s+row\s*\([^)]*\)\s*\n\s*\d+\s*\n\s*(\d+\.?\d*)\s*(?:%|percent)",
            PercentSource::PercentOfClass,
        ),
        (
            r"(?i)Percent\s+of\s+class\s+represented\s+by\s+amount\s+in\s+row\s*(?:\([^)]*\))?[^0-9]*(\d+\.?\d*)\s*(?:%|percent)",
            PercentSource::PercentOfClass,
        ),
        (
            r"(?i)Percent\s+of\s+class[:\s]*(\d+\.?\d*)\s*(?:%|percent)",
            PercentSource::PercentOfClass,
        ),
        (
            r"(?i)Item\s+4\.?[^(]*\(b\)[^:\n]*:\s*(\d+\.?\d*)\s*(?:%|percent)",
            PercentSource::ItemFourB,
        ),
        (
            r"(?i)Aggregate\s+amount[^%\n]*?(\d+\.?\d*)\s*(?:%|percent)",
            PercentSource::AggregateAmount,
        ),
    ]
    .iter()
    .map(|(p, source)| (Regex::new(p).unwrap(), *source))
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentScan {
    pub value: Option<OwnershipPercent>,
    /// Distinct values competed at the same priority; the earliest in the
    /// text was kept.
    pub ambiguous: bool,
}

pub fn find_ownership_percent(text: &str, priority: &[PercentSource]) -> PercentScan {
    let mut candidates: Vec<(usize, PercentSource, OwnershipPercent)> = Vec::new();

    for (pattern, source) in PERCENT_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let m = caps.get(1).unwrap();
            if let Ok(value) = OwnershipPercent::new(m.as_str().to_string()) {
                candidates.push((m.start(), *source, value));
            }
        }
    }

    for source in priority {
        let mut of_source: Vec<&(usize, PercentSource, OwnershipPercent)> = candidates
            .iter()
            .filter(|(_, s, _)| s == source)
            .collect();
        if of_source.is_empty() {
            continue;
        }
        of_source.sort_by_key(|(offset, _, _)| *offset);

        let winner = of_source[0].2.clone();
        let disagreeing = of_source
            .iter()
            .filter(|(_, _, v)| *v != winner)
            .count();
        if disagreeing > 0 {
            log::warn!(
                "{} percentage rows disagree; keeping first value {}",
                source,
                winner
            );
        }
        return PercentScan {
            value: Some(winner),
            ambiguous: disagreeing > 0,
        };
    }

    PercentScan::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> PercentScan {
        find_ownership_percent(text, DEFAULT_PERCENT_PRIORITY)
    }

    fn pct(s: &str) -> OwnershipPercent {
        OwnershipPercent::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_row_label_case_insensitive() {
        for label in ["Row", "ROW", "row"] {
            let text = format!(
                "11. Percent of class represented by amount in {} (9)\n9\n5.01 %\n",
                label
            );
            let result = scan(&text);
            assert_eq!(result.value, Some(pct("5.01")), "label: {}", label);
            assert!(!result.ambiguous);
        }
    }

    #[test]
    fn test_single_line_row() {
        let text = "Percent of class represented by amount in Row (11): 5.5 %";
        assert_eq!(scan(text).value, Some(pct("5.5")));
    }

    #[test]
    fn test_short_percent_of_class() {
        let text = "Percent of class: 30.7%";
        assert_eq!(scan(text).value, Some(pct("30.7")));
    }

    #[test]
    fn test_item_4b() {
        let text = "Item 4. Ownership (b) Percent of class: see below\nItem 4 (b) amount: 6.2 %";
        // The dedicated percent-of-class row outranks Item 4(b) when both hit
        let both = "Percent of class: 5.01%\nItem 4 (b) holding: 6.2 %";
        assert_eq!(scan(both).value, Some(pct("5.01")));
        assert_eq!(scan(text).value, Some(pct("6.2")));
    }

    #[test]
    fn test_aggregate_amount_is_lowest_priority() {
        let text = "Aggregate amount beneficially owned: 6.0 %\nPercent of class: 5.01%";
        assert_eq!(scan(text).value, Some(pct("5.01")));

        let only_aggregate = "Aggregate amount beneficially owned: 6.0 percent";
        assert_eq!(scan(only_aggregate).value, Some(pct("6.0")));
    }

    #[test]
    fn test_share_counts_never_match() {
        let text = "Aggregate amount beneficially owned by each reporting person: 12,345,678";
        assert_eq!(scan(text).value, None);
    }

    #[test]
    fn test_precision_preserved() {
        assert_eq!(scan("Percent of class: 5.10%").value, Some(pct("5.10")));
        assert_eq!(scan("Percent of class: 5.1%").value, Some(pct("5.1")));
    }

    #[test]
    fn test_ambiguity_flagged_and_first_kept() {
        let text = "Percent of class: 5.01%\nsecond reporting person\nPercent of class: 7.2%";
        let result = scan(text);
        assert_eq!(result.value, Some(pct("5.01")));
        assert!(result.ambiguous);
    }

    #[test]
    fn test_duplicate_values_not_ambiguous() {
        let text =
            "Percent of class represented by amount in row (9): 5.01 %\nPercent of class: 5.01%";
        let result = scan(text);
        assert_eq!(result.value, Some(pct("5.01")));
        assert!(!result.ambiguous);
    }

    #[test]
    fn test_priority_is_configurable() {
        let text = "Aggregate amount held: 6.0 %\nPercent of class: 5.01%";
        let reversed = [PercentSource::AggregateAmount, PercentSource::PercentOfClass];
        assert_eq!(
            find_ownership_percent(text, &reversed).value,
            Some(pct("6.0"))
        );
    }
}
