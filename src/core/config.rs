use crate::filing::parsing::percent::{PercentSource, DEFAULT_PERCENT_PRIORITY};
use crate::naming::name::NameOptions;
use crate::pdf::DEFAULT_MAX_PAGES;

/// Settings for one run. Everything has a sensible default; the CLI only
/// overrides what the user asked for.
#[derive(Clone, Debug)]
pub struct RefileConfig {
    /// How many leading pages of each PDF feed extraction.
    pub max_pages: usize,
    /// Plan and report without touching the filesystem.
    pub dry_run: bool,
    /// Which disclosure-table rows win when several carry a percentage.
    pub percent_priority: Vec<PercentSource>,
    pub name_options: NameOptions,
}

impl Default for RefileConfig {
    fn default() -> Self {
        RefileConfig {
            max_pages: DEFAULT_MAX_PAGES,
            dry_run: false,
            percent_priority: DEFAULT_PERCENT_PRIORITY.to_vec(),
            name_options: NameOptions::default(),
        }
    }
}
