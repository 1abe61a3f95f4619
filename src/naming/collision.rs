use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::name::{build_with_percent, CanonicalName, NameOptions};
use crate::filing::fields::{FieldSet, OwnershipPercent};

/// One claimed output name: the document that claimed it and the percent that
/// fed the rendering, kept so a later collision can tell whether re-rendering
/// with the percent would separate the two.
#[derive(Debug, Clone, Serialize)]
pub struct Claim {
    pub source: PathBuf,
    pub percent: Option<OwnershipPercent>,
}

/// Names already produced in the current run. Owned by the caller and
/// threaded through planning, so independent runs never share state.
/// Append-only; entries are never replaced.
#[derive(Debug, Clone, Default)]
pub struct ClaimedNameSet {
    claims: HashMap<String, Claim>,
}

impl ClaimedNameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Claim> {
        self.claims.get(name)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    fn insert(&mut self, name: String, source: &Path, percent: Option<OwnershipPercent>) {
        debug_assert!(!self.claims.contains_key(&name));
        self.claims.insert(
            name,
            Claim {
                source: source.to_path_buf(),
                percent,
            },
        );
    }
}

/// Turn a canonical name into a run-unique final name and record the claim.
///
/// An unclaimed name passes through unchanged. On a clash, a percent-bearing
/// re-rendering is tried first when the canonical form omitted a percent that
/// differs between the two claimants; otherwise ordinal suffixes `-2`, `-3`,
/// … are appended in processing order. Ordinal assignment therefore depends
/// on the order documents are fed in; callers that need stable output sort
/// their inputs first.
pub fn resolve(
    name: CanonicalName,
    fields: &FieldSet,
    source: &Path,
    options: &NameOptions,
    claimed: &mut ClaimedNameSet,
) -> String {
    if !claimed.contains(name.as_str()) {
        let final_name = name.into_string();
        claimed.insert(
            final_name.clone(),
            source,
            fields.ownership_percent.clone(),
        );
        return final_name;
    }

    if !options.include_percent && fields.ownership_percent.is_some() {
        let prior_percent = claimed
            .get(name.as_str())
            .and_then(|claim| claim.percent.as_ref());
        if prior_percent != fields.ownership_percent.as_ref() {
            let with_percent = build_with_percent(fields);
            if !claimed.contains(with_percent.as_str()) {
                log::debug!(
                    "Collision on {} resolved by percent re-rendering: {}",
                    name,
                    with_percent
                );
                let final_name = with_percent.into_string();
                claimed.insert(
                    final_name.clone(),
                    source,
                    fields.ownership_percent.clone(),
                );
                return final_name;
            }
        }
    }

    let mut ordinal = 2usize;
    loop {
        let candidate = format!("{}-{}", name, ordinal);
        if !claimed.contains(&candidate) {
            log::debug!("Collision on {} resolved by ordinal: {}", name, candidate);
            claimed.insert(candidate.clone(), source, fields.ownership_percent.clone());
            return candidate;
        }
        ordinal += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filing::report::FilingType;
    use crate::naming::name::build;
    use chrono::NaiveDate;

    fn fields(percent: Option<&str>) -> FieldSet {
        FieldSet {
            filing_type: Some(FilingType::Form13GA),
            filing_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            ticker: None,
            filer_name: Some("BAILLIE GIFFORD & CO".to_string()),
            ownership_percent: percent
                .map(|p| OwnershipPercent::new(p.to_string()).unwrap()),
            percent_ambiguous: false,
        }
    }

    fn src(n: usize) -> PathBuf {
        PathBuf::from(format!("doc-{}.pdf", n))
    }

    #[test]
    fn test_unclaimed_name_passes_through() {
        let opts = NameOptions::default();
        let f = fields(Some("5.01"));
        let name = build(&f, &opts);
        let mut claimed = ClaimedNameSet::new();

        let resolved = resolve(name.clone(), &f, &src(1), &opts, &mut claimed);
        assert_eq!(resolved, name.as_str());
        assert!(claimed.contains(name.as_str()));
        assert_eq!(claimed.len(), 1);
    }

    #[test]
    fn test_colliding_sequence_gets_distinct_names() {
        let opts = NameOptions::default();
        let f = fields(None);
        let name = build(&f, &opts);
        let mut claimed = ClaimedNameSet::new();

        let mut resolved: Vec<String> = (0..5)
            .map(|i| resolve(name.clone(), &f, &src(i), &opts, &mut claimed))
            .collect();
        assert_eq!(resolved.len(), 5);
        assert_eq!(resolved[1], format!("{}-2", name));
        assert_eq!(resolved[4], format!("{}-5", name));
        resolved.sort();
        resolved.dedup();
        assert_eq!(resolved.len(), 5, "all final names must be distinct");
    }

    #[test]
    fn test_resolution_is_order_deterministic() {
        let opts = NameOptions::default();
        let f = fields(None);
        let name = build(&f, &opts);

        let run = || {
            let mut claimed = ClaimedNameSet::new();
            (0..4)
                .map(|i| resolve(name.clone(), &f, &src(i), &opts, &mut claimed))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_percent_rerendering_beats_ordinal() {
        let opts = NameOptions {
            include_percent: false,
        };
        let first = fields(Some("30.7"));
        let second = fields(Some("5.01"));
        let mut claimed = ClaimedNameSet::new();

        let a = resolve(build(&first, &opts), &first, &src(1), &opts, &mut claimed);
        let b = resolve(build(&second, &opts), &second, &src(2), &opts, &mut claimed);

        assert_eq!(a, "2025-06-30_13G-A_BAILLIE-GIFFORD-CO");
        assert_eq!(b, "2025-06-30_13G-A_BAILLIE-GIFFORD-CO_5-01PCT");
    }

    #[test]
    fn test_identical_percents_fall_back_to_ordinal() {
        let opts = NameOptions {
            include_percent: false,
        };
        let f = fields(Some("5.01"));
        let mut claimed = ClaimedNameSet::new();

        let a = resolve(build(&f, &opts), &f, &src(1), &opts, &mut claimed);
        let b = resolve(build(&f, &opts), &f, &src(2), &opts, &mut claimed);
        assert_eq!(b, format!("{}-2", a));
    }

    #[test]
    fn test_claims_record_sources() {
        let opts = NameOptions::default();
        let f = fields(Some("5.01"));
        let mut claimed = ClaimedNameSet::new();
        let resolved = resolve(build(&f, &opts), &f, &src(7), &opts, &mut claimed);
        assert_eq!(claimed.get(&resolved).unwrap().source, src(7));
    }
}
