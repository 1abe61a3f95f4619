use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::config::RefileConfig;
use crate::filing::fields::FilingText;
use crate::filing::parsing;
use crate::naming::collision::{resolve, ClaimedNameSet};
use crate::naming::name::build;

/// Why a document was left alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SkipReason {
    /// Filing type and/or date could not be extracted; lists the fields
    /// that were found.
    MissingRequiredField { found: Vec<String> },
    /// A file outside this run already owns the destination name.
    DestinationExists,
    /// The input collaborator produced no text, so extraction never ran.
    UnreadableDocument,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRequiredField { .. } => write!(f, "missing-required-field"),
            SkipReason::DestinationExists => write!(f, "destination-exists"),
            SkipReason::UnreadableDocument => write!(f, "unreadable-document"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PlanAction {
    /// Destination name without extension; the executing collaborator adds
    /// the source extension back.
    Rename { destination: String },
    Skip { reason: SkipReason },
}

/// The decision for one document: what to do, and anything worth telling the
/// user about how the decision was made. Executing it is someone else's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    pub source: PathBuf,
    #[serde(flatten)]
    pub action: PlanAction,
    pub warnings: Vec<String>,
}

impl PlanEntry {
    pub fn is_rename(&self) -> bool {
        matches!(self.action, PlanAction::Rename { .. })
    }

    pub fn destination(&self) -> Option<&str> {
        match &self.action {
            PlanAction::Rename { destination } => Some(destination),
            PlanAction::Skip { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.action {
            PlanAction::Rename { .. } => None,
            PlanAction::Skip { reason } => Some(reason),
        }
    }
}

/// Per-document pipeline: extract, check the required fields, render the
/// name, make it unique. Holds the run's claimed names; never touches the
/// filesystem.
pub struct RenamePlanner<'a> {
    config: &'a RefileConfig,
    claimed: ClaimedNameSet,
}

impl<'a> RenamePlanner<'a> {
    pub fn new(config: &'a RefileConfig) -> Self {
        RenamePlanner {
            config,
            claimed: ClaimedNameSet::new(),
        }
    }

    pub fn claimed(&self) -> &ClaimedNameSet {
        &self.claimed
    }

    pub fn plan(&mut self, source: &Path, text: Option<&FilingText>) -> PlanEntry {
        let text = match text {
            Some(text) if !text.is_empty() => text,
            _ => {
                log::warn!("No text extracted from {:?}", source);
                return PlanEntry {
                    source: source.to_path_buf(),
                    action: PlanAction::Skip {
                        reason: SkipReason::UnreadableDocument,
                    },
                    warnings: Vec::new(),
                };
            }
        };

        let fields = parsing::extract(text, &self.config.percent_priority);
        if !fields.has_required() {
            log::warn!(
                "Missing filing type or date in {:?}; found {:?}",
                source,
                fields.found_fields()
            );
            return PlanEntry {
                source: source.to_path_buf(),
                action: PlanAction::Skip {
                    reason: SkipReason::MissingRequiredField {
                        found: fields
                            .found_fields()
                            .iter()
                            .map(|s| s.to_string())
                            .collect(),
                    },
                },
                warnings: Vec::new(),
            };
        }

        let mut warnings = Vec::new();
        if fields.percent_ambiguous {
            warnings.push(format!(
                "multiple percentage rows found; kept {}",
                fields
                    .ownership_percent
                    .as_ref()
                    .map(|p| p.to_string())
                    .unwrap_or_default()
            ));
        }

        let canonical = build(&fields, &self.config.name_options);
        let destination = resolve(
            canonical,
            &fields,
            source,
            &self.config.name_options,
            &mut self.claimed,
        );
        log::info!("{:?} -> {}", source, destination);

        PlanEntry {
            source: source.to_path_buf(),
            action: PlanAction::Rename { destination },
            warnings,
        }
    }
}
