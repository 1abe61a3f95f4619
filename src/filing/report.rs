use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(try_from = "String", into = "String")]
pub enum FilingType {
    Form13DA,
    Form13GA,
    Form10K,
    Form10Q,
    Form8K,
    Form20F,
    Form13D,
    Form13G,
    Form13F,
    FormS1,
    FormS3,
    FormS4,
    FormS8,
    FormDEF14A,
    FormDEFA14A,
    FormSC13D,
    FormSC13G,
    Form6K,
    Form424B5,
    FormFWP,
}

impl TryFrom<String> for FilingType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        FilingType::from_str(&s)
    }
}

impl From<FilingType> for String {
    fn from(t: FilingType) -> String {
        t.to_string()
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilingType::Form13DA => write!(f, "13D/A"),
            FilingType::Form13GA => write!(f, "13G/A"),
            FilingType::Form10K => write!(f, "10-K"),
            FilingType::Form10Q => write!(f, "10-Q"),
            FilingType::Form8K => write!(f, "8-K"),
            FilingType::Form20F => write!(f, "20-F"),
            FilingType::Form13D => write!(f, "13D"),
            FilingType::Form13G => write!(f, "13G"),
            FilingType::Form13F => write!(f, "13F"),
            FilingType::FormS1 => write!(f, "S-1"),
            FilingType::FormS3 => write!(f, "S-3"),
            FilingType::FormS4 => write!(f, "S-4"),
            FilingType::FormS8 => write!(f, "S-8"),
            FilingType::FormDEF14A => write!(f, "DEF 14A"),
            FilingType::FormDEFA14A => write!(f, "DEFA14A"),
            FilingType::FormSC13D => write!(f, "SC 13D"),
            FilingType::FormSC13G => write!(f, "SC 13G"),
            FilingType::Form6K => write!(f, "6-K"),
            FilingType::Form424B5 => write!(f, "424B5"),
            FilingType::FormFWP => write!(f, "FWP"),
        }
    }
}

impl FromStr for FilingType {
    type Err = String;

    fn from_str(s: &str) -> Result<FilingType, String> {
        match s.to_uppercase().replace('-', "/").as_str() {
            "13D/A" => Ok(FilingType::Form13DA),
            "13G/A" => Ok(FilingType::Form13GA),
            "10/K" => Ok(FilingType::Form10K),
            "10/Q" => Ok(FilingType::Form10Q),
            "8/K" => Ok(FilingType::Form8K),
            "20/F" => Ok(FilingType::Form20F),
            "13D" => Ok(FilingType::Form13D),
            "13G" => Ok(FilingType::Form13G),
            "13F" => Ok(FilingType::Form13F),
            "S/1" => Ok(FilingType::FormS1),
            "S/3" => Ok(FilingType::FormS3),
            "S/4" => Ok(FilingType::FormS4),
            "S/8" => Ok(FilingType::FormS8),
            "DEF 14A" => Ok(FilingType::FormDEF14A),
            "DEFA14A" => Ok(FilingType::FormDEFA14A),
            "SC 13D" => Ok(FilingType::FormSC13D),
            "SC 13G" => Ok(FilingType::FormSC13G),
            "SC 13D/A" => Ok(FilingType::Form13DA),
            "SC 13G/A" => Ok(FilingType::Form13GA),
            "6/K" => Ok(FilingType::Form6K),
            "424B5" => Ok(FilingType::Form424B5),
            "FWP" => Ok(FilingType::FormFWP),
            _ => Err(format!("Unknown filing type: {}", s)),
        }
    }
}

pub static FILING_TYPES: Lazy<String> = Lazy::new(|| {
    FilingType::iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
});

// Token patterns ordered most-specific-first: amendments and SC-prefixed
// schedules before the base forms they contain, so "SC 13G/A" never falls
// through to "13G" or "SC 13G".
static TOKEN_PATTERNS: &[(&str, FilingType)] = &[
    (r"(?:SC\s*)?13\s*D\s*[/-]\s*A", FilingType::Form13DA),
    (r"(?:SC\s*)?13\s*G\s*[/-]\s*A", FilingType::Form13GA),
    (r"DEFA\s*14A", FilingType::FormDEFA14A),
    (r"DEF\s*14A", FilingType::FormDEF14A),
    (r"SC\s*13\s*D", FilingType::FormSC13D),
    (r"SC\s*13\s*G", FilingType::FormSC13G),
    (r"10\s*-\s*K", FilingType::Form10K),
    (r"10\s*-\s*Q", FilingType::Form10Q),
    (r"8\s*-\s*K", FilingType::Form8K),
    (r"20\s*-\s*F", FilingType::Form20F),
    (r"6\s*-\s*K", FilingType::Form6K),
    (r"424\s*B\s*5", FilingType::Form424B5),
    (r"13\s*F", FilingType::Form13F),
    (r"13\s*D", FilingType::Form13D),
    (r"13\s*G", FilingType::Form13G),
    (r"S\s*-\s*1", FilingType::FormS1),
    (r"S\s*-\s*3", FilingType::FormS3),
    (r"S\s*-\s*4", FilingType::FormS4),
    (r"S\s*-\s*8", FilingType::FormS8),
    (r"FWP", FilingType::FormFWP),
];

struct TypeMatcher {
    labelled: Regex,
    bare: Regex,
    filing_type: FilingType,
}

static TYPE_MATCHERS: Lazy<Vec<TypeMatcher>> = Lazy::new(|| {
    TOKEN_PATTERNS
        .iter()
        .map(|(token, filing_type)| TypeMatcher {
            labelled: Regex::new(&format!(
                r"(?i)(?:FORM|TYPE|SCHEDULE)[\s:]*{}\b",
                token
            ))
            .unwrap(),
            bare: Regex::new(&format!(r"(?i)\b{}\b", token)).unwrap(),
            filing_type: *filing_type,
        })
        .collect()
});

impl FilingType {
    pub fn list_types() -> &'static str {
        &FILING_TYPES
    }

    /// Locate the filing type mentioned in document text. Label-anchored
    /// mentions ("FORM 10-K", "Schedule 13G/A") win over bare mentions, and
    /// within each pass more specific tokens win over their substrings.
    pub fn find_in(text: &str) -> Option<FilingType> {
        for matcher in TYPE_MATCHERS.iter() {
            if matcher.labelled.is_match(text) {
                log::debug!("Matched labelled filing type {}", matcher.filing_type);
                return Some(matcher.filing_type);
            }
        }
        for matcher in TYPE_MATCHERS.iter() {
            if matcher.bare.is_match(text) {
                log::debug!("Matched bare filing type {}", matcher.filing_type);
                return Some(matcher.filing_type);
            }
        }
        None
    }

    /// Rendering used inside file names: slashes and spaces become hyphens.
    pub fn name_segment(&self) -> String {
        self.to_string().replace('/', "-").replace(' ', "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_match_wins() {
        let text = "UNITED STATES\nSECURITIES AND EXCHANGE COMMISSION\nSCHEDULE 13G/A\n";
        assert_eq!(FilingType::find_in(text), Some(FilingType::Form13GA));
    }

    #[test]
    fn test_amendment_not_misread_as_base_form() {
        assert_eq!(
            FilingType::find_in("Form 13G/A (Amendment No. 4)"),
            Some(FilingType::Form13GA)
        );
        assert_eq!(FilingType::find_in("Form 13G"), Some(FilingType::Form13G));
    }

    #[test]
    fn test_punctuation_and_case_variants_normalize() {
        for variant in ["form 13g-a", "FORM 13G/A", "Schedule SC 13G/A"] {
            assert_eq!(
                FilingType::find_in(variant),
                Some(FilingType::Form13GA),
                "variant: {}",
                variant
            );
        }
    }

    #[test]
    fn test_sc_prefix_without_amendment() {
        assert_eq!(
            FilingType::find_in("SCHEDULE SC 13G under the Securities Exchange Act"),
            Some(FilingType::FormSC13G)
        );
    }

    #[test]
    fn test_bare_mention_fallback() {
        assert_eq!(
            FilingType::find_in("This Amendment No. 2 amends the 13G previously filed"),
            Some(FilingType::Form13G)
        );
    }

    #[test]
    fn test_def_14a_variants() {
        assert_eq!(
            FilingType::find_in("TYPE: DEF 14A"),
            Some(FilingType::FormDEF14A)
        );
        assert_eq!(
            FilingType::find_in("TYPE: DEFA14A"),
            Some(FilingType::FormDEFA14A)
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(FilingType::find_in("quarterly newsletter"), None);
    }

    #[test]
    fn test_from_str_round_trip() {
        for t in [FilingType::Form13GA, FilingType::FormDEF14A, FilingType::Form424B5] {
            assert_eq!(t.to_string().parse::<FilingType>(), Ok(t));
        }
        assert_eq!("13g-a".parse::<FilingType>(), Ok(FilingType::Form13GA));
        assert_eq!("SC 13G/A".parse::<FilingType>(), Ok(FilingType::Form13GA));
    }

    #[test]
    fn test_list_types_covers_vocabulary() {
        let listed = FilingType::list_types();
        assert!(listed.contains("13G/A"));
        assert!(listed.contains("DEF 14A"));
        assert!(listed.contains("FWP"));
    }

    #[test]
    fn test_name_segment() {
        assert_eq!(FilingType::Form13GA.name_segment(), "13G-A");
        assert_eq!(FilingType::FormDEF14A.name_segment(), "DEF-14A");
        assert_eq!(FilingType::Form10K.name_segment(), "10-K");
    }
}
