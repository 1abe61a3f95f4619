use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::RefileConfig;
use crate::pdf;
use crate::plan::{PlanAction, PlanEntry, RenamePlanner, SkipReason};

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub entries: Vec<PlanEntry>,
}

/// Process every PDF in `folder`: read, plan, execute (or just report in
/// dry-run mode). A failing document becomes a skip entry; the run itself
/// only fails when the folder is unusable.
pub fn process_folder(folder: &Path, config: &RefileConfig) -> Result<RunSummary> {
    if !folder.is_dir() {
        return Err(anyhow!("{:?} is not a directory", folder));
    }

    let files = list_pdf_files(folder)?;
    log::info!("Found {} PDF file(s) in {:?}", files.len(), folder);

    let mut planner = RenamePlanner::new(config);
    let mut summary = RunSummary::default();

    for file in &files {
        let text = match pdf::read_filing_text(file, config.max_pages) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("{:#}", e);
                None
            }
        };
        let entry = planner.plan(file, text.as_ref());
        let entry = apply_entry(folder, entry, config.dry_run)?;

        if entry.is_rename() {
            summary.renamed += 1;
        } else {
            summary.skipped += 1;
        }
        summary.entries.push(entry);
    }

    Ok(summary)
}

/// Execute one plan entry against the filesystem — the half of the system
/// the planner explicitly stays out of. Refuses to overwrite a file that
/// already owns the destination name, and treats a file already bearing its
/// final name as done.
pub fn apply_entry(folder: &Path, entry: PlanEntry, dry_run: bool) -> Result<PlanEntry> {
    let destination = match entry.destination() {
        Some(destination) => destination.to_string(),
        None => return Ok(entry),
    };

    let dest_path = folder.join(format!("{}.pdf", destination));
    if dest_path == entry.source {
        return Ok(entry);
    }

    if dest_path.exists() {
        log::warn!("Destination already on disk: {:?}", dest_path);
        return Ok(PlanEntry {
            source: entry.source,
            action: PlanAction::Skip {
                reason: SkipReason::DestinationExists,
            },
            warnings: entry.warnings,
        });
    }

    if !dry_run {
        fs::rename(&entry.source, &dest_path)
            .with_context(|| format!("Failed to rename {:?} to {:?}", entry.source, dest_path))?;
    }

    Ok(entry)
}

fn list_pdf_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(folder)
        .with_context(|| format!("Failed to read directory {:?}", folder))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
        })
        .collect();

    // Sorted input order keeps collision ordinals reproducible across runs.
    files.sort();
    Ok(files)
}
