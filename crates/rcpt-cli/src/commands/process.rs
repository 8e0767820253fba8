//! Process command - parse a single receipt text file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use rcpt_core::models::config;
use rcpt_core::{ParsedReceipt, RawText, RuleBasedParser};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file, or `-` to read stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print extraction warnings to stderr
    #[arg(long)]
    warnings: bool,
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

impl From<OutputFormat> for config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => config::OutputFormat::Json,
            OutputFormat::Csv => config::OutputFormat::Csv,
            OutputFormat::Text => config::OutputFormat::Text,
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    let bytes = read_input(&args.input)?;
    info!("Processing {}", args.input.display());

    let text = RawText::from_utf8_lossy(&bytes);
    let parser = RuleBasedParser::from_config(&config.extraction);
    let result = parser.parse_detailed(&text);

    if args.warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let format = args.format.map(Into::into).unwrap_or(config.output.format);
    let output = format_receipt(&result.receipt, format, config.output.pretty_json)?;

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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<Vec<u8>> {
    if input == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        return Ok(bytes);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read(input)?)
}

/// Render a receipt in the given format.
pub fn format_receipt(
    receipt: &ParsedReceipt,
    format: config::OutputFormat,
    pretty_json: bool,
) -> anyhow::Result<String> {
    match format {
        config::OutputFormat::Json if pretty_json => Ok(serde_json::to_string_pretty(receipt)?),
        config::OutputFormat::Json => Ok(serde_json::to_string(receipt)?),
        config::OutputFormat::Csv => format_csv(receipt),
        config::OutputFormat::Text => Ok(format_text(receipt)),
    }
}

/// Column headers shared by CSV output and the batch summary.
pub const CSV_COLUMNS: [&str; 6] = [
    "store_name",
    "date",
    "time",
    "total",
    "payment_method",
    "item_count",
];

/// CSV fields for a receipt, in [`CSV_COLUMNS`] order.
pub fn csv_fields(receipt: &ParsedReceipt) -> [String; 6] {
    [
        receipt.store_name.clone(),
        receipt.date_string().unwrap_or_default(),
        receipt.time.clone().unwrap_or_default(),
        money(receipt.total),
        receipt.payment_method.to_string(),
        receipt.items.len().to_string(),
    ]
}

/// Amount with exactly two fraction digits, e.g. `0.00`.
fn money(amount: Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount.to_string()
}

fn format_csv(receipt: &ParsedReceipt) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_COLUMNS)?;
    wtr.write_record(csv_fields(receipt))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(receipt: &ParsedReceipt) -> String {
    let mut output = String::new();

    output.push_str(&format!("Store:   {}\n", receipt.store_name));
    output.push_str(&format!(
        "Date:    {}\n",
        receipt.date_string().as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Time:    {}\n",
        receipt.time.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("Payment: {}\n", receipt.payment_method));
    output.push('\n');

    if receipt.items.is_empty() {
        output.push_str("Items:   none\n");
    } else {
        output.push_str("Items:\n");
        for item in &receipt.items {
            output.push_str(&format!(
                "  {:>3} x {:<30} {:>10}\n",
                item.quantity,
                item.name,
                money(item.price)
            ));
        }
    }
    output.push('\n');

    output.push_str(&format!("Total:   {}\n", money(receipt.total)));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rcpt_core::{LineItem, PaymentMethod};

    fn sample() -> ParsedReceipt {
        let mut receipt = ParsedReceipt::new();
        receipt.store_name = "STORE NAME".to_string();
        receipt.items.push(LineItem::new("Widget", 2, Decimal::new(500, 2)));
        receipt.total = Decimal::new(1234, 2);
        receipt.payment_method = PaymentMethod::Visa;
        receipt
    }

    #[test]
    fn test_csv_output() {
        let csv = format_receipt(&sample(), config::OutputFormat::Csv, true).unwrap();
        assert_eq!(
            csv,
            "store_name,date,time,total,payment_method,item_count\nSTORE NAME,,,12.34,Visa,1\n"
        );
    }

    #[test]
    fn test_csv_default_total_has_two_decimals() {
        let csv = format_receipt(&ParsedReceipt::default(), config::OutputFormat::Csv, true).unwrap();
        assert_eq!(
            csv,
            "store_name,date,time,total,payment_method,item_count\nUnknown,,,0.00,Unknown,0\n"
        );
    }

    #[test]
    fn test_money_scale() {
        assert_eq!(money(Decimal::ZERO), "0.00");
        assert_eq!(money(Decimal::new(5, 0)), "5.00");
        assert_eq!(money(Decimal::new(1051, 2)), "10.51");
    }

    #[test]
    fn test_compact_json_output() {
        let json = format_receipt(&sample(), config::OutputFormat::Json, false).unwrap();
        assert!(json.contains("\"total\":12.34"));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_text_output() {
        let text = format_receipt(&sample(), config::OutputFormat::Text, true).unwrap();
        assert!(text.contains("Store:   STORE NAME\n"));
        assert!(text.contains("Date:    -\n"));
        assert!(text.contains("Widget"));
        assert!(text.ends_with("Total:   12.34\n"));
    }
}
