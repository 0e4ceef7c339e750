//! Batch command - scan many receipt text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{debug, error, warn};

use homeops_core::{ReceiptScanner, ScanResult};

use super::scan::{format_result, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching receipt text files
    #[arg(required = true)]
    input: String,

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
}

/// Result of scanning a single file.
struct FileResult {
    path: PathBuf,
    scan: Option<ScanResult>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to scan",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let scanner = ReceiptScanner::from_config(&config.extraction);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match scan_file(&path, &scanner) {
            Ok(scan) => results.push(FileResult {
                path,
                scan: Some(scan),
                error: None,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to scan {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        scan: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to scan {}: {}", path.display(), error_msg);
                    anyhow::bail!("Scanning failed: {}", error_msg);
                }
            }
        }
    }

    let successful: Vec<_> = results.iter().filter(|r| r.scan.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(scan) = &result.scan {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_result(scan, args.format)?)?;
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

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let incomplete = successful
        .iter()
        .filter(|r| r.scan.as_ref().is_some_and(|s| !s.missing_fields.is_empty()))
        .count();

    println!();
    println!(
        "{} Scanned {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} incomplete), {} failed",
        style(successful.len()).green(),
        style(incomplete).yellow(),
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

fn scan_file(path: &Path, scanner: &ReceiptScanner) -> anyhow::Result<ScanResult> {
    let text = fs::read_to_string(path)?;
    let result = scanner.scan(&text);
    for warning in &result.warnings {
        debug!("{}: {}", path.display(), warning);
    }
    Ok(result)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "product_name",
        "purchase_date",
        "price",
        "store_name",
        "missing_fields",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(scan) = &result.scan {
            let draft = &scan.draft;
            let missing: Vec<&str> = scan.missing_fields.iter().map(|f| f.label()).collect();
            wtr.write_record([
                filename,
                "success",
                draft.product_name.as_deref().unwrap_or(""),
                &draft.purchase_date.map(|d| d.to_string()).unwrap_or_default(),
                &draft.price.map(|p| p.to_string()).unwrap_or_default(),
                draft.store_name.as_deref().unwrap_or(""),
                &missing.join(";"),
                &scan.processing_time_ms.to_string(),
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
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
