//! Extract command - pull financial data from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::SecondsFormat;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use fdx_core::extract::{ExtractionResult, FinancialExtractor};
use fdx_core::ledger::{ApprovalStatus, DocumentEntry, JsonFileStore, RecordStore};
use fdx_core::models::record::ExtractedFinancialRecord;
use fdx_core::source::read_document;
use fdx_core::ExtractionError;

use super::{ledger_path, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input document (recognized text or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// External reference id the document belongs to
    #[arg(short, long)]
    reference: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Append the document to the ledger
    #[arg(long)]
    save: bool,

    /// Save as a draft instead of approved
    #[arg(long, requires = "save")]
    draft: bool,

    /// Ledger file (default: from configuration)
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// Show extraction confidence and warnings
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Approval status selected by `--draft`.
pub fn approval_status(draft: bool) -> ApprovalStatus {
    if draft {
        ApprovalStatus::Draft
    } else {
        ApprovalStatus::Approved
    }
}

/// File name used as the record source.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);
    let text = read_document(&args.input, &config.source)?;
    debug!("Recognized {} characters", text.len());

    pb.set_message("Extracting financial data...");
    pb.set_position(60);
    let name = document_name(&args.input);
    let extractor = FinancialExtractor::from_config(&config.extraction);
    let outcome = extractor.analyze(&text, &name, &args.reference);

    pb.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(ExtractionError::NoAmountFound) => {
            if args.save {
                let mut store = JsonFileStore::open(ledger_path(args.ledger.as_deref(), &config))?;
                store.append(DocumentEntry::without_data(
                    &args.reference,
                    &name,
                    approval_status(args.draft),
                ))?;
                eprintln!(
                    "{} Saved {} to {} without financial data",
                    style("!").yellow(),
                    name,
                    store.path().display()
                );
            }
            anyhow::bail!("No financial amount found in {}", args.input.display());
        }
    };

    if args.save {
        let mut store = JsonFileStore::open(ledger_path(args.ledger.as_deref(), &config))?;
        store.append(DocumentEntry::extracted(
            result.record.clone(),
            approval_status(args.draft),
        ))?;
        eprintln!(
            "{} Saved {} to {}",
            style("✓").green(),
            name,
            store.path().display()
        );
    }

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        print_diagnostics(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_diagnostics(result: &ExtractionResult) {
    println!();
    println!(
        "{} Extraction confidence: {:.1}%",
        style("ℹ").blue(),
        result.confidence * 100.0
    );
    println!(
        "{} Reference number: {}",
        style("ℹ").blue(),
        result.reference_number
    );
    println!(
        "{} Processing time: {}ms",
        style("ℹ").blue(),
        result.processing_time_ms
    );

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }
}

/// Render a record in the requested format.
pub fn format_record(record: &ExtractedFinancialRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ExtractedFinancialRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "external_reference_id",
        "source",
        "category",
        "amount",
        "vendor",
        "date",
        "description",
        "timestamp",
    ])?;

    wtr.write_record([
        record.external_reference_id.as_str(),
        record.source.as_str(),
        record.category.as_str(),
        record.amount.to_string().as_str(),
        record.vendor.as_deref().unwrap_or_default(),
        record.date.as_deref().unwrap_or_default(),
        record.description.as_deref().unwrap_or_default(),
        record
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractedFinancialRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", record.source));
    output.push_str(&format!("Reference: {}\n", record.external_reference_id));
    output.push_str(&format!("Category: {}\n", record.category));
    output.push('\n');

    output.push_str(&format!("Amount: ${}\n", record.amount));
    if let Some(vendor) = &record.vendor {
        output.push_str(&format!("Vendor: {}\n", vendor));
    }
    if let Some(date) = &record.date {
        output.push_str(&format!("Date: {}\n", date));
    }
    if let Some(description) = &record.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}
