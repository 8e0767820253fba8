//! Batch processing command for multiple receipt text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use rcpt_core::models::config::OutputFormat;
use rcpt_core::{ParsedReceipt, RawText, ReceiptParser, RuleBasedParser};

use super::process::{csv_fields, format_receipt, CSV_COLUMNS};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input text files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<super::process::OutputFormat>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of files parsed concurrently (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    receipt: Option<ParsedReceipt>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && config.batch.accepts(p))
        .collect();

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

    let jobs = args.jobs.unwrap_or(config.batch.jobs).max(1);
    let continue_on_error = args.continue_on_error || config.batch.continue_on_error;
    let format: OutputFormat = args.format.map(Into::into).unwrap_or(config.output.format);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = Arc::new(RuleBasedParser::from_config(&config.extraction));
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut handles = Vec::with_capacity(files.len());

    debug!("Parsing {} files with {} workers", files.len(), jobs);

    for path in files {
        let permit = semaphore.clone().acquire_owned().await?;
        let parser = Arc::clone(&parser);
        let pb = pb.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let result = process_single_file(&path, &parser);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            pb.inc(1);

            match result {
                Ok(receipt) => ProcessResult {
                    path,
                    receipt: Some(receipt),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => ProcessResult {
                    path,
                    receipt: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await?;

        if let Some(error_msg) = &result.error {
            if continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(result);
    }

    pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.receipt.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        let Some(receipt) = &result.receipt else {
            continue;
        };
        let content = format_receipt(receipt, format, config.output.pretty_json)?;

        match &args.output_dir {
            Some(output_dir) => {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt");

                let extension = match format {
                    OutputFormat::Json => "json",
                    OutputFormat::Csv => "csv",
                    OutputFormat::Text => "txt",
                };

                let output_path = output_dir.join(format!("{}.{}", output_name, extension));
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => {
                println!("{} {}", style("==>").cyan(), result.path.display());
                println!("{}", content);
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: &Path, parser: &RuleBasedParser) -> anyhow::Result<ParsedReceipt> {
    let bytes = fs::read(path)?;
    let text = RawText::from_utf8_lossy(&bytes);

    if text.is_empty() {
        debug!("{} contains no text", path.display());
    }

    Ok(parser.parse(&text))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(CSV_COLUMNS);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];
        match &result.receipt {
            Some(receipt) => {
                record.push("success".to_string());
                record.extend(csv_fields(receipt));
            }
            None => {
                record.push("error".to_string());
                record.extend(std::iter::repeat_n(String::new(), CSV_COLUMNS.len()));
            }
        }
        record.push(result.processing_time_ms.to_string());
        record.push(result.error.clone().unwrap_or_default());

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
