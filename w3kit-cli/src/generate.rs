//! The scan-and-merge flow: discover keys, grow the working table.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};
use w3kit::csv::MergeDocument;
use w3kit::{Result, scan};

use crate::Args;

pub fn run(args: &Args) -> Result<()> {
    let sections = scan::scan_dir(&args.input, args.search.as_deref())?;
    if sections.is_empty() {
        warn!("no localization keys found under {}", args.input.display());
        return Ok(());
    }

    let target = target_csv(args);
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut doc = MergeDocument::open(&target)?;
    let mut inserted = 0;
    for (section, records) in &sections {
        inserted += doc.insert(section, records);
    }
    if inserted == 0 {
        info!(path = %doc.path().display(), "every discovered key is already present");
        return Ok(());
    }

    doc.save()?;
    info!(inserted, path = %doc.path().display(), "merged new keys");
    Ok(())
}

/// The working table to grow: an explicit `.csv` target, a directory to
/// put `strings.en.csv` in, or the scanned directory itself.
fn target_csv(args: &Args) -> PathBuf {
    match &args.output {
        Some(path) if path.extension().and_then(|s| s.to_str()) == Some("csv") => path.clone(),
        Some(dir) => dir.join("strings.en.csv"),
        None => args.input.join("strings.en.csv"),
    }
}
