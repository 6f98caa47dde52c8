//! Inspect command - show what would be extracted from a single PDF.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use multa_core::models::document::InfractionDocument;
use multa_core::pdf::DocumentReader;
use multa_core::text::plate;
use multa_core::{Dispatcher, PdfTextReader};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also print the reconstructed lines
    #[arg(long)]
    show_lines: bool,
}

#[derive(Serialize)]
struct Inspection {
    file_name: String,
    plate_from_name: Option<String>,
    plate_from_text: Option<String>,
    duplicate_suffix: Option<String>,
    date: Option<String>,
    time: Option<String>,
    extractor: Option<String>,
}

pub fn run(args: InspectArgs, _config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let doc = InfractionDocument::from_path(&args.input);
    let reader = PdfTextReader::new();
    let text = reader.read(&args.input)?;

    let plate_from_text =
        plate::find_plate(&text.full_text).or_else(|| plate::find_plate_loose(&text.full_text));

    let extraction = Dispatcher::new().dispatch(&doc.file_name, &text.full_text, &text.lines);

    let inspection = Inspection {
        file_name: doc.file_name.clone(),
        plate_from_name: doc.plate.clone(),
        plate_from_text,
        duplicate_suffix: doc.duplicate_suffix.clone(),
        date: extraction.as_ref().map(|e| e.date.clone()),
        time: extraction.as_ref().map(|e| e.time.clone()),
        extractor: extraction.as_ref().map(|e| e.extractor.to_string()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        print_text(&inspection);
    }

    if args.show_lines {
        println!();
        for (i, line) in text.lines.iter().enumerate() {
            println!("{:>4} {}", i + 1, line);
        }
    }

    Ok(())
}

fn print_text(inspection: &Inspection) {
    println!("Archivo: {}", inspection.file_name);

    match &inspection.plate_from_name {
        Some(p) => println!("Matrícula (nombre): {p}"),
        None => println!("Matrícula (nombre): {}", style("no encontrada").yellow()),
    }
    match &inspection.plate_from_text {
        Some(p) => println!("Matrícula (texto):  {p}"),
        None => println!("Matrícula (texto):  {}", style("no encontrada").yellow()),
    }
    if let Some(suffix) = &inspection.duplicate_suffix {
        println!("Sufijo duplicado:   {suffix}");
    }

    match (&inspection.date, &inspection.time) {
        (Some(d), Some(t)) => {
            println!("Fecha y hora:       {d} {t}");
            if let Some(e) = &inspection.extractor {
                println!("Extractor:          {e}");
            }
        }
        _ => println!("Fecha y hora:       {}", style("sin resolver").yellow()),
    }
}
