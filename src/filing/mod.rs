pub mod fields;
pub mod parsing;
pub mod report;
pub mod tickers;

pub use fields::{FieldSet, FilingText, OwnershipPercent};
pub use report::FilingType;
pub use tickers::Ticker;
