//! Extract command - parse a batch of quotation PDFs into a session table.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use qledger_core::ledger::{consolidate_into, CsvMasterStore};
use qledger_core::{
    BatchContext, LayoutParser, LedgerConfig, LedgerRecord, PartsLayoutParser, PdfExtractor,
    QuoteLayoutParser, RecordTable, Variant,
};

use super::config::load_config;
use super::{ModeArg, VariantArg};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Quotation layout
    #[arg(short = 'l', long, value_enum)]
    variant: Option<VariantArg>,

    /// Validation mode for layout b
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Session report output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Append the session to the master ledger
    #[arg(long)]
    append: bool,

    /// Master ledger directory
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV with spreadsheet column headers
    Csv,
    /// JSON array of records
    Json,
    /// Plain text table
    Text,
}

/// Failed document and the reason.
struct Failure {
    file_name: String,
    error: String,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let ctx = BatchContext::new(args.variant.map(Into::into).unwrap_or(config.extraction.variant))
        .with_mode(args.mode.map(Into::into).unwrap_or(config.extraction.mode))
        .with_append(args.append || config.master.append);

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No PDF files found for: {}", args.inputs.join(" "));
    }

    info!(
        "Processing {} files as layout {} ({} mode)",
        files.len(),
        ctx.variant,
        ctx.mode
    );

    match ctx.variant {
        Variant::A => run_batch(&QuoteLayoutParser::new(), &files, &args, &config, &ctx),
        Variant::B => {
            let parser =
                PartsLayoutParser::new(ctx.mode).with_layout(config.extraction.parts_layout);
            run_batch(&parser, &files, &args, &config, &ctx)
        }
    }
}

/// Expand glob patterns, keeping literal paths as given.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let literal = Path::new(input);
        if literal.is_file() {
            files.push(literal.to_path_buf());
            continue;
        }

        for path in glob(input)?.filter_map(|r| r.ok()) {
            let is_pdf = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
            if is_pdf && path.is_file() {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

fn run_batch<P: LayoutParser>(
    parser: &P,
    files: &[PathBuf],
    args: &ExtractArgs,
    config: &LedgerConfig,
    ctx: &BatchContext,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let reader = PdfExtractor::new();
    debug!("Scanning with layout {} parser", parser.variant());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut session: RecordTable<P::Record> = RecordTable::new();
    let mut failures = Vec::new();

    for path in files {
        let file_name = display_name(path);
        pb.set_message(file_name.clone());

        let result = fs::read(path)
            .map_err(anyhow::Error::from)
            .and_then(|data| Ok(parser.parse_document(&reader, &data)?));

        match result {
            Ok(extraction) => {
                let count = extraction.records.len();
                pb.suspend(|| {
                    eprintln!(
                        "{} Extracted {} line items from {}",
                        style("✓").green(),
                        count,
                        file_name
                    );
                    for warning in &extraction.warnings {
                        eprintln!("  {} {}", style("⚠").yellow(), warning);
                    }
                });
                session.append_document(&file_name, extraction.records);
            }
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                pb.suspend(|| {
                    eprintln!("{} Error processing {}: {}", style("✗").red(), file_name, e)
                });
                failures.push(Failure {
                    file_name,
                    error: e.to_string(),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    print_summary(&session, &failures);

    if session.is_empty() {
        eprintln!(
            "{} No line items extracted from the given files.",
            style("⚠").yellow()
        );
    } else {
        let output_path = args.output.as_ref().or(config.output.session_file.as_ref());
        let content = format_table(&session, args.format)?;
        match output_path {
            Some(path) => {
                fs::write(path, content)?;
                eprintln!(
                    "{} Session report written to {}",
                    style("✓").green(),
                    path.display()
                );
            }
            None => print!("{}", content),
        }

        if ctx.append_to_master {
            append_to_master(&session, args, config, ctx.variant);
        }
    }

    debug!("Batch finished in {:?}", start.elapsed());
    Ok(())
}

/// Merge the session into the master partition, reporting any failure.
fn append_to_master<R: LedgerRecord>(
    session: &RecordTable<R>,
    args: &ExtractArgs,
    config: &LedgerConfig,
    variant: Variant,
) {
    let store_dir = args.store.clone().unwrap_or_else(|| config.master.store_dir.clone());
    let store = CsvMasterStore::new(store_dir);
    let partition = variant.partition();

    match consolidate_into(&store, partition, session) {
        Ok(consolidation) => eprintln!(
            "{} Master ledger updated at {}: added {} new records ({} total)",
            style("✓").green(),
            store.partition_path(partition).display(),
            consolidation.net_new,
            consolidation.table.len()
        ),
        Err(e) => {
            warn!("Master update failed: {}", e);
            eprintln!("{} Failed to update master ledger: {}", style("✗").red(), e);
        }
    }
}

fn print_summary<R: LedgerRecord>(session: &RecordTable<R>, failures: &[Failure]) {
    eprintln!();
    eprintln!("{:<40} {:>6}", style("File").bold(), style("Rows").bold());
    for entry in session.summary() {
        eprintln!("{:<40} {:>6}", entry.file_name, entry.rows);
    }
    eprintln!(
        "{} documents parsed, {} failed, {} line items",
        style(session.summary().len()).green(),
        style(failures.len()).red(),
        session.len()
    );

    if !failures.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for failure in failures {
            eprintln!("  - {}: {}", failure.file_name, failure.error);
        }
    }
}

/// Render a table in the requested format.
pub fn format_table<R: LedgerRecord>(
    table: &RecordTable<R>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => format_csv(table),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(table.rows())?)),
        OutputFormat::Text => format_text(table),
    }
}

fn format_csv<R: LedgerRecord>(table: &RecordTable<R>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    qledger_core::ledger::write_table(&mut wtr, table)?;
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text<R: LedgerRecord>(table: &RecordTable<R>) -> anyhow::Result<String> {
    let mut rows: Vec<Vec<String>> = vec![R::COLUMNS.iter().map(|c| c.to_string()).collect()];
    for row in table.rows() {
        let value = serde_json::to_value(row)?;
        rows.push(
            R::COLUMNS
                .iter()
                .map(|column| match value.get(*column) {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(serde_json::Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                })
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..R::COLUMNS.len())
        .map(|i| rows.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
        .collect();

    let mut output = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }

    Ok(output)
}
