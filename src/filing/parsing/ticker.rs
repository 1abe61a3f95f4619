use once_cell::sync::Lazy;
use regex::Regex;

use crate::filing::tickers::Ticker;

// A symbol-shaped token on its own proves nothing; it must sit next to an
// issuer label before we trust it.
static TICKER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)TRADING\s+SYMBOL[:\s]+([A-Za-z0-9]{1,6})\b",
        r"(?i)TICKER(?:\s+SYMBOL)?[:\s]+([A-Za-z0-9]{1,6})\b",
        r"(?i)\bSYMBOL[:\s]+([A-Za-z0-9]{1,6})\b",
        // "(NASDAQ: RDDT)" style exchange references on the cover page
        r#"(?i)\b(?:NYSE|NASDAQ|OTC)[:\s]+"?([A-Za-z0-9]{1,6})\b"#,
        // 13D/G cover pages repeat the symbol after the CUSIP number
        r"(?i)CUSIP\s+NO\.?\s*[0-9A-Z]+\s+([A-Z]{1,6})\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// Legal suffixes that pass the symbol shape test but never name a listing.
const FALSE_POSITIVES: &[&str] = &["INC", "CO", "LLC", "LP", "LTD"];

pub fn find_ticker(text: &str) -> Option<Ticker> {
    for pattern in TICKER_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let candidate = caps[1].to_uppercase();
            if FALSE_POSITIVES.contains(&candidate.as_str()) {
                continue;
            }
            if let Ok(ticker) = Ticker::new(candidate) {
                log::debug!("Matched ticker {}", ticker);
                return Some(ticker);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trading_symbol_anchor() {
        let text = "Common Stock\nTrading Symbol: RDDT\nNew York Stock Exchange";
        assert_eq!(find_ticker(text).unwrap().as_str(), "RDDT");
    }

    #[test]
    fn test_exchange_anchor() {
        let text = "Class A Common Stock (NASDAQ: RDDT)";
        assert_eq!(find_ticker(text).unwrap().as_str(), "RDDT");
    }

    #[test]
    fn test_cusip_anchor() {
        let text = "CUSIP No. 75734B100 RDDT\n";
        assert_eq!(find_ticker(text).unwrap().as_str(), "RDDT");
    }

    #[test]
    fn test_legal_suffix_rejected() {
        let text = "Ticker: INC\nSymbol: LLC";
        assert_eq!(find_ticker(text), None);
    }

    #[test]
    fn test_unanchored_symbol_rejected() {
        // Symbol-shaped words in running prose are not tickers.
        let text = "THE BOARD APPROVED THE PLAN AT ITS JUNE MEETING";
        assert_eq!(find_ticker(text), None);
    }
}
