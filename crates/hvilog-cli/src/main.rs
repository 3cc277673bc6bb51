use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use hvilog_core::{process_log_file, write_spreadsheet, DecodePolicy, PipelineOutput};
use polars::prelude::AnyValue;
use tracing_subscriber::EnvFilter;

/// A CLI for the HVI classing-log aggregation pipeline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate a classing log and export the per-bale table as a spreadsheet.
    Process(ProcessArgs),
    /// Aggregate a classing log and print the per-bale table to the terminal.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Path to the @-delimited classing log
    #[arg(short, long)]
    input: PathBuf,
    /// Destination spreadsheet (.xlsx, or .csv for delimited text)
    #[arg(short, long)]
    output: PathBuf,
    /// What to do with lines that fail field decoding
    #[arg(long, value_enum, default_value_t = DecodeErrorMode::Skip)]
    on_decode_error: DecodeErrorMode,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Path to the @-delimited classing log
    #[arg(short, long)]
    input: PathBuf,
    /// Maximum number of bales to print
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DecodeErrorMode {
    Skip,
    Collect,
    Abort,
}

impl From<DecodeErrorMode> for DecodePolicy {
    fn from(mode: DecodeErrorMode) -> Self {
        match mode {
            DecodeErrorMode::Skip => DecodePolicy::Skip,
            DecodeErrorMode::Collect => DecodePolicy::Collect,
            DecodeErrorMode::Abort => DecodePolicy::Abort,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Process(args) => handle_process(args),
        Command::Preview(args) => handle_preview(args),
    }
}

fn handle_process(args: ProcessArgs) -> Result<()> {
    let output = run_pipeline(&args.input, args.on_decode_error.into())?;

    for failure in &output.report.failures {
        eprintln!(
            "dropped line {}: field '{}': {}",
            failure.line_index, failure.field, failure.message
        );
    }

    write_spreadsheet(&output.table, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Wrote {} bales ({} records, {} lines discarded) to {}",
        output.aggregates.len(),
        output.report.records.len(),
        output.report.short_lines + output.report.dropped_lines,
        args.output.display()
    );
    Ok(())
}

fn handle_preview(args: PreviewArgs) -> Result<()> {
    let output = run_pipeline(&args.input, DecodePolicy::Skip)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(output.table.get_column_names_str());

    let rows = output.table.height().min(args.limit);
    for row in 0..rows {
        let cells: Vec<String> = output
            .table
            .get_columns()
            .iter()
            .map(|column| match column.get(row) {
                Ok(value) => display_cell(&value),
                Err(_) => String::new(),
            })
            .collect();
        table.add_row(cells);
    }

    println!("{table}");
    if output.table.height() > rows {
        println!("... {} more bales", output.table.height() - rows);
    }
    Ok(())
}

fn run_pipeline(input: &Path, policy: DecodePolicy) -> Result<PipelineOutput> {
    process_log_file(input, policy)
        .with_context(|| format!("failed to process {}", input.display()))
}

fn display_cell(value: &AnyValue) -> String {
    match value {
        AnyValue::String(v) => v.to_string(),
        AnyValue::StringOwned(v) => v.to_string(),
        AnyValue::Null => String::new(),
        other => other.to_string(),
    }
}
