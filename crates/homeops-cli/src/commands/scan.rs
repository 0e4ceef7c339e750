//! Scan command - extract a purchase draft from receipt text.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use homeops_core::receipt::rules::ExtractionMatch;
use homeops_core::receipt::FieldCandidates;
use homeops_core::{PurchaseDraft, ReceiptScanner, ScanResult};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Text file produced by OCR, or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show every candidate considered for each field
    #[arg(long)]
    explain: bool,
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
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let text = read_input(&args.input)?;
    info!("Scanning {} bytes from {}", text.len(), args.input.display());

    let scanner = ReceiptScanner::from_config(&config.extraction);
    let result = scanner.scan(&text);

    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let output = format_result(&result, args.format)?;

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

    if args.explain {
        println!();
        print!("{}", explain(&scanner.candidates(&text)));
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read_to_string(input)?)
}

pub fn format_result(result: &ScanResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_draft_csv(&result.draft),
        OutputFormat::Text => Ok(format_draft_text(result)),
    }
}

fn format_draft_csv(draft: &PurchaseDraft) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["product_name", "purchase_date", "price", "store_name"])?;
    wtr.write_record([
        draft.product_name.clone().unwrap_or_default(),
        draft.purchase_date.map(|d| d.to_string()).unwrap_or_default(),
        draft.price.map(|p| p.to_string()).unwrap_or_default(),
        draft.store_name.clone().unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_draft_text(result: &ScanResult) -> String {
    let draft = &result.draft;
    let missing = || style("-").dim().to_string();

    let mut output = String::new();
    output.push_str(&format!(
        "Product: {}\n",
        draft.product_name.clone().unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Date:    {}\n",
        draft.purchase_date.map(|d| d.to_string()).unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Price:   {}\n",
        draft.price.map(|p| format!("{:.2}", p)).unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Store:   {}\n",
        draft.store_name.clone().unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "\n{} lines scanned in {}ms\n",
        result.line_count, result.processing_time_ms
    ));

    output
}

fn explain(candidates: &FieldCandidates) -> String {
    let mut output = String::new();

    push_candidates(&mut output, "Product name", &candidates.product_names, |v| v.clone());
    push_candidates(&mut output, "Purchase date", &candidates.dates, |v| v.to_string());
    push_candidates(&mut output, "Price", &candidates.prices, |v| v.to_string());
    push_candidates(&mut output, "Store name", &candidates.store_names, |v| v.clone());

    output
}

fn push_candidates<T>(
    output: &mut String,
    title: &str,
    matches: &[ExtractionMatch<T>],
    render: impl Fn(&T) -> String,
) {
    output.push_str(&format!("{}:\n", style(title).bold()));
    if matches.is_empty() {
        output.push_str("  (none)\n");
        return;
    }

    for (i, m) in matches.iter().enumerate() {
        let marker = if i == 0 { "*" } else { " " };
        let place = match (m.line, m.position) {
            (Some(line), _) => format!("line {}", line + 1),
            (None, Some((start, end))) => format!("bytes {}..{}", start, end),
            (None, None) => String::new(),
        };
        output.push_str(&format!(
            "  {} {:<14} {:<32} {}\n",
            marker,
            m.rule,
            render(&m.value),
            style(place).dim()
        ));
    }
}
