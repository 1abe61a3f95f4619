use anyhow::Result;
use colored::*;
use refile::core::config::RefileConfig;
use refile::plan::PlanEntry;
use refile::run;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "refile",
    about = "Rename SEC filing PDFs from the metadata in their text"
)]
struct Opt {
    /// Folder containing the PDFs to rename
    #[structopt(parse(from_os_str))]
    folder: std::path::PathBuf,

    /// Print the rename plan without touching any file
    #[structopt(long)]
    dry_run: bool,

    /// Emit the plan as JSON instead of human-readable lines
    #[structopt(long)]
    json: bool,

    /// Number of leading pages to read from each PDF
    #[structopt(long, default_value = "5")]
    max_pages: usize,
}

fn print_entry(entry: &PlanEntry, dry_run: bool) {
    let source = entry
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.source.display().to_string());
    match entry.destination() {
        Some(destination) => {
            let verb = if dry_run { "would rename" } else { "renamed" };
            println!(
                "{} {} {} -> {}.pdf",
                "ok".green(),
                verb,
                source,
                destination
            );
        }
        None => {
            let reason = entry
                .skip_reason()
                .map(|r| r.to_string())
                .unwrap_or_default();
            println!("{} skipped {} ({})", "--".yellow(), source, reason);
        }
    }
    for warning in &entry.warnings {
        println!("   {} {}", "warning:".yellow(), warning);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    if !opt.folder.exists() {
        eprintln!("Folder does not exist: {:?}", opt.folder);
        std::process::exit(1);
    }

    let config = RefileConfig {
        max_pages: opt.max_pages,
        dry_run: opt.dry_run,
        ..RefileConfig::default()
    };

    if opt.dry_run && !opt.json {
        println!("{}", "Dry run - no files will be renamed".bold());
    }

    let summary = run::process_folder(&opt.folder, &config)?;

    if opt.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for entry in &summary.entries {
        print_entry(entry, opt.dry_run);
    }

    println!();
    println!(
        "{} {} renamed, {} skipped",
        "Summary:".bold(),
        summary.renamed,
        summary.skipped
    );

    // Skips are reported above, not treated as failures.
    Ok(())
}
