//! Master command - export, import, and locate master ledger partitions.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use qledger_core::ledger::{consolidate_into, workbook, CsvMasterStore};
use qledger_core::{
    LedgerConfig, LedgerRecord, MasterStore, PartItem, QuoteItem, RecordTable, Variant,
};

use super::config::load_config;
use super::extract::{format_table, OutputFormat};
use super::VariantArg;

/// Arguments for the master command.
#[derive(Args)]
pub struct MasterArgs {
    /// Master ledger directory
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: MasterCommand,
}

#[derive(Subcommand)]
enum MasterCommand {
    /// Write the current master partition to a file or stdout
    Export(ExportArgs),

    /// Merge a sheet of an existing spreadsheet workbook into a partition
    Import(ImportArgs),

    /// Show the partition file path
    Path {
        /// Quotation layout
        #[arg(short = 'l', long, value_enum)]
        variant: Option<VariantArg>,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Quotation layout
    #[arg(short = 'l', long, value_enum)]
    variant: Option<VariantArg>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

#[derive(Args)]
struct ImportArgs {
    /// Workbook file (xlsx, xls, ods)
    #[arg(required = true)]
    workbook: PathBuf,

    /// Sheet name (default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Quotation layout of the sheet's rows
    #[arg(short = 'l', long, value_enum)]
    variant: Option<VariantArg>,
}

pub fn run(args: MasterArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = CsvMasterStore::new(
        args.store
            .clone()
            .unwrap_or_else(|| config.master.store_dir.clone()),
    );

    match args.command {
        MasterCommand::Export(export) => {
            match resolve_variant(export.variant, &config) {
                Variant::A => export_partition::<QuoteItem>(&store, Variant::A, &export),
                Variant::B => export_partition::<PartItem>(&store, Variant::B, &export),
            }
        }
        MasterCommand::Import(import) => {
            match resolve_variant(import.variant, &config) {
                Variant::A => import_workbook::<QuoteItem>(&store, Variant::A, &import),
                Variant::B => import_workbook::<PartItem>(&store, Variant::B, &import),
            }
        }
        MasterCommand::Path { variant } => {
            let variant = resolve_variant(variant, &config);
            let path = store.partition_path(variant.partition());
            println!("Master partition: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
            }
            Ok(())
        }
    }
}

fn resolve_variant(arg: Option<VariantArg>, config: &LedgerConfig) -> Variant {
    arg.map(Into::into).unwrap_or(config.extraction.variant)
}

fn export_partition<R: LedgerRecord>(
    store: &CsvMasterStore,
    variant: Variant,
    args: &ExportArgs,
) -> anyhow::Result<()> {
    let Some(table) = store.load::<R>(variant.partition())? else {
        eprintln!(
            "{} Master ledger not found at {}",
            style("⚠").yellow(),
            store.partition_path(variant.partition()).display()
        );
        return Ok(());
    };

    let content = format_table(&table, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!(
                "{} Exported {} rows to {}",
                style("✓").green(),
                table.len(),
                path.display()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

fn import_workbook<R: LedgerRecord>(
    store: &CsvMasterStore,
    variant: Variant,
    args: &ImportArgs,
) -> anyhow::Result<()> {
    let imported: RecordTable<R> = workbook::read_sheet(&args.workbook, args.sheet.as_deref())?;
    if imported.is_empty() {
        eprintln!(
            "{} No rows found in {}",
            style("⚠").yellow(),
            args.workbook.display()
        );
        return Ok(());
    }

    let partition = variant.partition();
    let consolidation = consolidate_into(store, partition, &imported)?;

    eprintln!(
        "{} Imported {} rows into {}: added {} new records ({} total)",
        style("✓").green(),
        imported.len(),
        store.partition_path(partition).display(),
        consolidation.net_new,
        consolidation.table.len()
    );

    Ok(())
}
