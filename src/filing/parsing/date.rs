use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// Labelled date fields are tried in priority order; a bare MM/DD/YYYY is a
// last resort and only trusted near the top of the document, where cover-page
// dates live.
static LABELLED_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "(Date of Event Which Requires Filing of this Statement)" with the
        // date on the line before or after the parenthetical
        r"(?i)(\d{1,2}/\d{1,2}/\d{4})\s*\n\s*\(Date of Event",
        r"(?i)\(Date of Event[^)]*\)\s*\n\s*(\d{1,2}/\d{1,2}/\d{4})",
        r"(?i)EVENT DATE[:\s]*([A-Za-z]+\s+\d{1,2},?\s+\d{4})",
        r"(?i)FILED(?:\s+AS\s+OF\s+DATE)?[:\s]+(\d{1,2}/\d{1,2}/\d{4})",
        r"(?i)CONFORMED PERIOD OF REPORT[:\s]*(\d{8})",
        r"(?i)for the (?:fiscal|quarterly) (?:year|period) ended[:\s]*([A-Za-z]+\s+\d{1,2},?\s+\d{4})",
        r"(?i)\bDate[:\s]*([A-Za-z]+\s+\d{1,2},?\s+\d{4})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static BARE_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{2}/\d{2}/\d{4})\b").unwrap());

// How much of the document counts as "the top" for the bare-date fallback.
const BARE_DATE_WINDOW: usize = 2048;

const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // June 30, 2025
    "%B %d %Y",  // June 30 2025
    "%m/%d/%Y",  // 06/30/2025
    "%Y%m%d",    // 20250630
    "%d-%b-%Y",  // 30-Jun-2025
];

pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_str, fmt).ok())
}

pub fn find_filing_date(text: &str) -> Option<NaiveDate> {
    for pattern in LABELLED_DATE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(date) = parse_date(&caps[1]) {
                log::debug!("Matched labelled date: {}", &caps[1]);
                return Some(date);
            }
        }
    }

    let head = if text.len() > BARE_DATE_WINDOW {
        let mut end = BARE_DATE_WINDOW;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    } else {
        text
    };
    for caps in BARE_DATE.captures_iter(head) {
        if let Some(date) = parse_date(&caps[1]) {
            log::debug!("Matched bare date near top: {}", &caps[1]);
            return Some(date);
        }
    }

    None
}
