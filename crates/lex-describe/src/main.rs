//! CLI entry point for dataset description.

use anyhow::{Result, anyhow};
use clap::Parser;
use lex_describe::loader::load_csv;
use lex_describe::{AnalyzerConfig, ColumnReport, DataAnalyzer, DescriptionReport, GlobalInfo};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Descriptive statistics for CSV datasets",
    long_about = "Summarize a CSV dataset: column types, missing values, ranges,\n\
                  value distributions, duplicate rows and constant columns.\n\n\
                  EXAMPLES:\n  \
                  # Describe every column\n  \
                  lex-describe -i data.csv\n\n  \
                  # Attach descriptions from a metadata file keyed by 'Row'\n  \
                  lex-describe -i data.csv -m metadata.csv\n\n  \
                  # Describe a few columns and print JSON\n  \
                  lex-describe -i data.csv -c age,city --json"
)]
struct Args {
    /// Path to the CSV file to describe
    #[arg(short, long)]
    input: String,

    /// Path to a CSV metadata file with variable descriptions
    #[arg(short, long)]
    metadata: Option<String>,

    /// Comma-separated columns to include in the column report
    #[arg(short, long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Metadata column holding variable names
    #[arg(long, default_value = "Row")]
    key_column: String,

    /// Metadata column holding descriptions
    #[arg(long, default_value = "Description")]
    description_column: String,

    /// Decimals kept for percentages
    #[arg(long, default_value = "2")]
    decimals: u32,

    /// Text shown when no metadata file is given
    #[arg(long)]
    no_metadata_text: Option<String>,

    /// Text shown for variables missing from the metadata file
    #[arg(long)]
    not_found_text: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only the report is written.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is left uninitialized so stdout
/// only carries the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut builder = AnalyzerConfig::builder()
        .metadata_key_column(&args.key_column)
        .metadata_description_column(&args.description_column)
        .percentage_decimals(args.decimals);

    if let Some(ref text) = args.no_metadata_text {
        builder = builder.no_metadata_text(text);
    }
    if let Some(ref text) = args.not_found_text {
        builder = builder.description_not_found_text(text);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    info!("Loading dataset from: {}", args.input);
    let data = load_csv(&args.input)?;

    let metadata = match args.metadata {
        Some(ref path) => {
            info!("Loading metadata from: {}", path);
            Some(load_csv(path)?)
        }
        None => None,
    };

    let analyzer = DataAnalyzer::with_config(data, metadata, config)?;

    let report = DescriptionReport::build(&analyzer, Some(&args.input), args.columns.as_deref())
        .map_err(|e| {
            error!("Description failed: {}", e);
            anyhow!("Description failed: {}", e)
        })?;

    if args.json {
        println!("{}", report.to_json_pretty()?);
        return Ok(());
    }

    print_human_readable_summary(&report);
    Ok(())
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

/// Print the report for a terminal.
///
/// Uses `println!` on purpose: this is the command's output, not logging.
fn print_human_readable_summary(report: &DescriptionReport) {
    println!();
    println!("{}", "=".repeat(80));
    println!("DATASET DESCRIPTION");
    println!("{}", "=".repeat(80));
    if let Some(ref source) = report.source {
        println!("Source: {}", source);
    }
    println!("Generated: {}", report.generated_at);
    println!();

    if let Some(info) = report.global_info.first() {
        print_global_info(info);
    }

    println!("COLUMNS");
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {:<12} {:>10} {:>10}  {}",
        "Column", "Kind", "Values", "Missing %", "Details"
    );
    println!("{}", "-".repeat(80));

    for row in &report.columns {
        let details = match row {
            ColumnReport::Numeric(r) => format!(
                "mean {} | min {} | max {}",
                format_optional(r.mean),
                format_optional(r.min),
                format_optional(r.max)
            ),
            ColumnReport::Boolean(r) => r.distribution.clone(),
            ColumnReport::Categorical(r) => {
                format!("{} distinct | {}", r.distinct_categories, r.top_categories)
            }
        };

        println!(
            "{:<20} {:<12} {:>10} {:>10.2}  {}",
            truncate_str(row.column(), 19),
            row.kind().display_name(),
            row.non_missing(),
            row.missing_pct(),
            truncate_str(&details, 60)
        );
        println!("{:<20} {}", "", truncate_str(row.description(), 58));
    }

    println!();
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}

fn print_global_info(info: &GlobalInfo) {
    println!("OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  Rows: {}", info.rows);
    println!("  Columns: {}", info.columns);
    println!("  Duplicate rows: {}", info.duplicate_rows);
    println!("  Missing values: {}%", info.missing_pct);
    println!(
        "  Constant columns: {}{}",
        info.constant_column_count,
        if info.constant_columns.is_empty() {
            String::new()
        } else {
            format!(" ({})", info.constant_columns.join(", "))
        }
    );
    println!(
        "  Types: {} numeric, {} boolean, {} categorical",
        info.dtypes.numeric, info.dtypes.boolean, info.dtypes.categorical
    );
    println!();
}
