//! Command-line front end: split one input file into a ZIP of per-group CSVs.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use ironsplit::{
    Delimiter, ExecMode, GroupOrder, PayloadCompression, SanitizeMode, SplitOptions, Table,
    export_groups, read_table_file, table_to_csv,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SanitizeArg {
    PathSafe,
    SpacesOnly,
}

impl From<SanitizeArg> for SanitizeMode {
    fn from(v: SanitizeArg) -> Self {
        match v {
            SanitizeArg::PathSafe => SanitizeMode::PathSafe,
            SanitizeArg::SpacesOnly => SanitizeMode::SpacesOnly,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ironsplit", version, about = "Split a table into one CSV per column value, zipped")]
struct Cli {
    /// Input file: .xlsx, .xls, .csv or .txt
    input: PathBuf,

    /// Column whose values define the groups
    #[arg(short, long)]
    column: Option<String>,

    /// Delimiter for .txt input: comma, tab, semicolon or pipe
    #[arg(short, long)]
    delimiter: Option<Delimiter>,

    /// Gzip each group's CSV (entries become group_<key>.csv.gz)
    #[arg(long)]
    gzip: bool,

    /// Archive path (defaults to the configured archive name, split_groups.zip)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How group keys are turned into entry names
    #[arg(long, value_enum)]
    sanitize: Option<SanitizeArg>,

    /// Order groups by key instead of first appearance
    #[arg(long)]
    sorted: bool,

    /// Serialize groups on this many threads
    #[arg(long)]
    threads: Option<usize>,

    /// JSON options file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the column names and exit
    #[arg(long)]
    list_columns: bool,

    /// Print the first N rows as CSV before exporting
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Print the export report as JSON
    #[arg(long)]
    report: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut opts = match &cli.config {
        Some(path) => SplitOptions::from_json_file(path)
            .with_context(|| format!("load options from {}", path.display()))?,
        None => SplitOptions::default(),
    };
    apply_flags(&mut opts, &cli);

    let table = read_table_file(&cli.input, opts.delimiter)
        .with_context(|| format!("read {}", cli.input.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.list_columns {
        for name in table.columns() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }
    if let Some(n) = cli.preview {
        print_preview(&mut out, &table, n)?;
    }

    if opts.split_column.is_empty() {
        bail!(
            "no split column given; choose one of: {}",
            table.columns().join(", ")
        );
    }

    let export = export_groups(&table, &opts).context("export groups")?;
    let target = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&export.file_name));
    std::fs::write(&target, &export.archive)
        .with_context(|| format!("write {}", target.display()))?;

    if cli.report {
        serde_json::to_writer_pretty(&mut out, &export.report)?;
        writeln!(out)?;
    } else {
        for g in &export.report.groups {
            writeln!(out, "{}\t{} rows\t{}", g.file_name, g.rows, g.key)?;
        }
        writeln!(
            out,
            "wrote {} ({} groups, {} bytes, {})",
            target.display(),
            export.report.groups.len(),
            export.report.archive_bytes,
            export.media_type
        )?;
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn apply_flags(opts: &mut SplitOptions, cli: &Cli) {
    if let Some(column) = &cli.column {
        opts.split_column = column.clone();
    }
    if cli.delimiter.is_some() {
        opts.delimiter = cli.delimiter;
    }
    if cli.gzip {
        opts.compression = PayloadCompression::from_flag(cli.gzip);
    }
    if let Some(mode) = cli.sanitize {
        opts.sanitize = mode.into();
    }
    if cli.sorted {
        opts.group_order = GroupOrder::Sorted;
    }
    if let Some(threads) = cli.threads {
        opts.exec_mode = ExecMode::Parallel {
            threads: Some(threads),
        };
    }
}

fn print_preview(out: &mut impl Write, table: &Table, n: usize) -> Result<()> {
    let csv = table_to_csv(&table.head(n)).context("render preview")?;
    out.write_all(&csv)?;
    writeln!(out, "({} rows x {} columns)", table.row_count(), table.column_count())?;
    Ok(())
}
