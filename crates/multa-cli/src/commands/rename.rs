//! Rename command - name downloaded PDFs by the plate found in their text.
//!
//! The acquisition stage downloads notices under opaque names; this pass
//! reads each PDF and appends the plate to the stem so the reconciliation
//! run can trust file names. Collisions get `_2`, `_3`, ... markers.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use multa_core::models::document::strip_duplicate_marker;
use multa_core::pdf::DocumentReader;
use multa_core::text::{self, plate};
use multa_core::PdfTextReader;

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Directory of downloaded PDFs
    #[arg(required = true)]
    dir: PathBuf,

    /// Use the separator-tolerant plate search
    #[arg(long)]
    loose: bool,

    /// Report what would change without touching anything
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: RenameArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.dir.is_dir() {
        anyhow::bail!("Not a directory: {}", args.dir.display());
    }

    let mut pdfs: Vec<PathBuf> = fs::read_dir(&args.dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdfs.sort();

    if pdfs.is_empty() {
        println!("{} No PDFs in {}", style("ℹ").blue(), args.dir.display());
        return Ok(());
    }

    let pb = ProgressBar::new(pdfs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let reader = PdfTextReader::new();
    let mut renamed = 0usize;
    let mut untouched = 0usize;

    for path in &pdfs {
        match rename_one(
            &reader,
            path,
            &config.rename.excluded_starts,
            args.loose,
            args.dry_run,
        ) {
            Ok(Some(new_name)) => {
                renamed += 1;
                pb.println(format!(
                    "{} {} -> {}",
                    style("✓").green(),
                    file_name_of(path),
                    new_name
                ));
            }
            Ok(None) => untouched += 1,
            Err(e) => {
                untouched += 1;
                pb.println(format!("{} {}: {}", style("✗").red(), file_name_of(path), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{} {} renamed, {} left untouched{}",
        style("✓").green(),
        renamed,
        untouched,
        if args.dry_run { " (dry run)" } else { "" }
    );

    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn rename_one(
    reader: &PdfTextReader,
    path: &Path,
    excluded_starts: &[String],
    loose: bool,
    dry_run: bool,
) -> anyhow::Result<Option<String>> {
    let text = reader.read(path)?;

    // Known non-notice paperwork is left alone, judged by the leading text.
    let head: String = text.full_text.chars().take(600).collect();
    if excluded_starts
        .iter()
        .any(|prefix| text::contains_normalized(&head, prefix))
    {
        debug!("{} matches an excluded prefix", path.display());
        return Ok(None);
    }

    let found = if loose {
        plate::find_plate_loose(&text.full_text)
    } else {
        plate::find_plate(&text.full_text)
    };
    let Some(found_plate) = found else {
        warn!("no plate found in {}", path.display());
        return Ok(None);
    };

    let dir = path.parent().unwrap_or(Path::new("."));
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let base = strip_duplicate_marker(stem);

    // Already carries this plate; nothing to do.
    if base.to_uppercase().ends_with(&format!("_{found_plate}")) {
        return Ok(None);
    }

    let mut target = dir.join(format!("{base}_{found_plate}.pdf"));
    let mut dup = 2;
    while target.exists() {
        target = dir.join(format!("{base}_{found_plate}_{dup}.pdf"));
        dup += 1;
    }

    if !dry_run {
        fs::rename(path, &target)?;
    }

    Ok(Some(file_name_of(&target)))
}
