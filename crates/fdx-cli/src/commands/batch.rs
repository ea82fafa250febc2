//! Batch command - extract financial data from many documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use fdx_core::extract::{ExtractionResult, FinancialExtractor};
use fdx_core::ledger::{ApprovalStatus, DocumentEntry, JsonFileStore, RecordStore};
use fdx_core::models::config::FdxConfig;
use fdx_core::source::{read_document, DocumentKind};
use fdx_core::ExtractionError;

use super::extract::{approval_status, document_name, format_record, OutputFormat};
use super::{ledger_path, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// External reference id the documents belong to
    #[arg(short, long)]
    reference: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Append every document to the ledger
    #[arg(long)]
    save: bool,

    /// Save as drafts instead of approved
    #[arg(long, requires = "save")]
    draft: bool,

    /// Ledger file (default: from configuration)
    #[arg(long)]
    ledger: Option<PathBuf>,
}

/// Result of processing a single file.
struct FileOutcome {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && DocumentKind::from_path(p, &config.source).is_ok())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let mut store = if args.save {
        Some(JsonFileStore::open(ledger_path(args.ledger.as_deref(), &config))?)
    } else {
        None
    };
    let status = approval_status(args.draft);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = FinancialExtractor::from_config(&config.extraction);
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &extractor, &args.reference, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        if let Some(store) = store.as_mut() {
            save_outcome(store, &path, &args.reference, status, &result)?;
        }

        match result {
            Ok(result) => outcomes.push(FileOutcome {
                path,
                result: Some(result),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    outcomes.push(FileOutcome {
                        path,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<_> = outcomes.iter().filter(|o| o.result.is_some()).collect();
    let failed: Vec<_> = outcomes.iter().filter(|o| o.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for outcome in &successful {
            if let Some(result) = &outcome.result {
                let stem = outcome
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));

                fs::write(&output_path, format_record(&result.record, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let total: Decimal = successful
        .iter()
        .filter_map(|o| o.result.as_ref())
        .map(|r| r.record.amount)
        .sum();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );
    println!("   Total extracted: ${}", total);

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    extractor: &FinancialExtractor,
    reference: &str,
    config: &FdxConfig,
) -> anyhow::Result<ExtractionResult> {
    let text = read_document(path, &config.source)?;
    let result = extractor.analyze(&text, &document_name(path), reference)?;

    for warning in &result.warnings {
        debug!("{}: {}", path.display(), warning);
    }

    Ok(result)
}

/// Append the file to the ledger. Documents without an amount are kept with a note.
fn save_outcome(
    store: &mut JsonFileStore,
    path: &Path,
    reference: &str,
    status: ApprovalStatus,
    result: &anyhow::Result<ExtractionResult>,
) -> anyhow::Result<()> {
    match result {
        Ok(result) => store.append(DocumentEntry::extracted(result.record.clone(), status))?,
        Err(e) if e.downcast_ref::<ExtractionError>().is_some() => {
            store.append(DocumentEntry::without_data(reference, document_name(path), status))?
        }
        Err(_) => {}
    }
    Ok(())
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "category",
        "amount",
        "vendor",
        "date",
        "confidence",
        "reference_number",
        "processing_time_ms",
        "error",
    ])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(result) = &outcome.result {
            let record = &result.record;
            wtr.write_record([
                filename,
                "success",
                record.category.as_str(),
                record.amount.to_string().as_str(),
                record.vendor.as_deref().unwrap_or_default(),
                record.date.as_deref().unwrap_or_default(),
                format!("{:.2}", result.confidence).as_str(),
                result.reference_number.as_str(),
                outcome.processing_time_ms.to_string().as_str(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                outcome.processing_time_ms.to_string().as_str(),
                outcome.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
