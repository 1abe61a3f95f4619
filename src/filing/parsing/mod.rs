pub mod date;
pub mod filer;
pub mod percent;
pub mod ticker;

use crate::filing::fields::{FieldSet, FilingText};
use crate::filing::report::FilingType;

pub use percent::{PercentSource, DEFAULT_PERCENT_PRIORITY};

/// Run every field matcher over the document text. Total: a field that
/// cannot be located is left empty, never an error.
pub fn extract(text: &FilingText, percent_priority: &[PercentSource]) -> FieldSet {
    let text = text.as_str();

    let filing_type = FilingType::find_in(text);
    let filing_date = date::find_filing_date(text);
    let ticker = ticker::find_ticker(text);
    let filer_name = filer::find_filer_name(text);
    let percent_scan = percent::find_ownership_percent(text, percent_priority);

    let fields = FieldSet {
        filing_type,
        filing_date,
        ticker,
        filer_name,
        ownership_percent: percent_scan.value,
        percent_ambiguous: percent_scan.ambiguous,
    };
    log::debug!("Extracted fields: {:?}", fields.found_fields());
    fields
}
