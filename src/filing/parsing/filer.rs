use once_cell::sync::Lazy;
use regex::Regex;

// "Names of Reporting Persons" blocks as they appear on 13D/G cover pages,
// with or without an interleaved row number, plus the older "Name of person
// filing" phrasing.
static FILER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?im)Names?\s+of\s+Reporting\s+Persons?\.?\s*\n\s*([A-Za-z][A-Za-z\s&,\.]+?)(?:\n\s*\d|\n\s*Check|\n\s*\n|$)",
        r"(?im)Names?\s+of\s+Reporting\s+Persons?\.?\s*\n\s*\d+\s*\n\s*([A-Za-z][A-Za-z\s&,\.]+?)(?:\n|$)",
        r"(?im)Name\s+of\s+reporting\s+person\s*\n\s*\d*\s*\n?\s*([A-Za-z][A-Za-z\s]+?)(?:\n\s*\d|\n\s*Check|$)",
        r"(?im)Name\s+of\s+person\s+filing[:\s]*\n?\s*([A-Za-z][A-Za-z\s&,\.]+?)(?:\n|$)",
        r"(?im)Item\s+2\.?\s*\(a\)\.?\s*Name\s+of\s+person\s+filing[:\s]*\n?\s*([^\n]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LEGAL_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(LLC|LP|LLP|LTD|LIMITED|INC|INCORPORATED|CORP|CORPORATION)\.?$").unwrap()
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const MAX_FILER_LEN: usize = 30;

pub fn find_filer_name(text: &str) -> Option<String> {
    for pattern in FILER_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(name) = normalize(&caps[1]) {
                log::debug!("Matched filer name: {}", name);
                return Some(name);
            }
        }
    }
    None
}

fn normalize(raw: &str) -> Option<String> {
    let mut name = raw.replace('\n', " ");
    name = LEGAL_SUFFIX.replace(&name, "").into_owned();
    name = WHITESPACE_RUN.replace_all(&name, " ").trim().to_string();

    // Long entity names get abbreviated to their leading words so the file
    // name stays readable.
    if name.len() > MAX_FILER_LEN {
        let words: Vec<&str> = name.split_whitespace().collect();
        if words.len() > 2 {
            name = words[..2].join(" ");
        }
    }

    if name.is_empty() {
        None
    } else {
        Some(name.to_uppercase())
    }
}
