//! Run command - reconcile every PDF in the input directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use clap::Args;
use console::style;

use multa_core::models::document::DocumentStatus;
use multa_core::{CsvContractStore, PdfTextReader, Pipeline, PipelineEvent, RunSummary};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Input directory with infraction PDFs (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output root for evidence folders (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory with branch contract PDFs (overrides config)
    #[arg(long)]
    contracts: Option<PathBuf>,

    /// Rental-history CSV export (overrides config)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Also write a per-document summary CSV under the output root
    #[arg(long)]
    summary: bool,
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(input) = args.input {
        config.input.dir = input;
    }
    if let Some(output) = args.output {
        config.output.root = output;
    }
    if let Some(contracts) = args.contracts {
        config.contracts.root = contracts;
    }
    if let Some(history) = args.history {
        config.contracts.history = history;
    }

    let store = CsvContractStore::open(&config.contracts.history)?;
    let pipeline = Pipeline::new(&config, Box::new(PdfTextReader::new()), Box::new(store));

    // Audit header; one CSV-like line per document follows.
    println!("matricula,fecha,hora,archivo");

    let cancel = AtomicBool::new(false);
    let summary = pipeline.run(&cancel, |event| match event {
        PipelineEvent::Document {
            plate,
            date,
            time,
            file_name,
        } => {
            println!("{plate},{date},{time},{file_name}");
        }
        PipelineEvent::Match { branch, customer } => {
            println!("  > Suc={branch}, Cliente={customer}");
        }
        PipelineEvent::NoMatch => {
            println!("  > (sin coincidencias)");
        }
        PipelineEvent::Failed { file_name, error } => {
            eprintln!("{} {}: {}", style("✗").red(), file_name, error);
        }
    })?;

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        summary.processed + summary.failed,
        start.elapsed()
    );
    println!(
        "   {} matched, {} without contract, {} unresolved, {} failed",
        style(summary.matched).green(),
        summary.unmatched,
        summary.unresolved,
        style(summary.failed).red()
    );

    if args.summary {
        fs::create_dir_all(&config.output.root)?;
        let path = config.output.root.join("resumen.csv");
        write_summary(&path, &summary)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            path.display()
        );
    }

    Ok(())
}

fn write_summary(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "archivo",
        "matricula",
        "fecha",
        "hora",
        "extractor",
        "carpeta",
        "estado",
        "error",
    ])?;

    for report in &summary.reports {
        wtr.write_record([
            report.file_name.as_str(),
            report.plate.as_str(),
            report.date.as_deref().unwrap_or(""),
            report.time.as_deref().unwrap_or(""),
            report.extractor.as_deref().unwrap_or(""),
            report.folder.as_deref().unwrap_or(""),
            if report.status == DocumentStatus::Done {
                "ok"
            } else {
                "error"
            },
            report.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
