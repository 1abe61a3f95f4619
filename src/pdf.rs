use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::filing::fields::FilingText;

pub const DEFAULT_MAX_PAGES: usize = 5;

/// Extract the text of the first `max_pages` pages of a PDF. Everything the
/// extraction engine sees comes through here, so a bounded page count bounds
/// per-document work.
///
/// `pdf-extract` gives back the whole document with form feeds between
/// pages; the page split keys off those.
pub fn read_filing_text(path: &Path, max_pages: usize) -> Result<FilingText> {
    log::debug!("Extracting text from {:?}", path);
    let full_text = pdf_extract::extract_text(path)
        .with_context(|| format!("Failed to extract text from {:?}", path))?;

    let text: String = full_text
        .split('\x0C')
        .take(max_pages)
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return Err(anyhow!("No text layer in {:?}", path));
    }

    Ok(FilingText::new(text))
}
