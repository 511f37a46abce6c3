use clap::{Parser, Subcommand};
use colored::Colorize;
use royalbit_gridmap::cli;
use royalbit_gridmap::error::GridmapResult;
use royalbit_gridmap::types::{ExtraDataPolicy, LocatorKind, RangeDefinition, ReadRowsUntil};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridmap")]
#[command(about = "Find the real table in a sheet range, and map records back onto it.")]
#[command(long_about = "Gridmap - tabular range detection and record mapping

Reads loosely-structured sheet ranges, detects the header row and table
boundaries, and appends records onto an existing column layout.

Workbooks are YAML/JSON files (sheets: [{title, rows}]) or Excel files
(.xlsx, .xls, .xlsb, .ods; saved back as .xlsx).

COMMANDS:
  read      - Detect the table in a range and print its records
  append    - Map records onto a sheet's header and append them
  sheets    - List sheet titles
  column    - Convert column letters <-> ordinals (AA <-> 27)
  color     - Decode a hex color to RGB
  sheet-id  - Extract a spreadsheet id from an id, list value or URL

EXAMPLES:
  gridmap read book.yaml --sheet Data --until-empty
  gridmap read book.xlsx --sheet Data --range A3:F40 --header-row 1 --first-data-row 2
  gridmap append book.yaml --sheet Data --input items.json --extra error
  gridmap column AZ")]
#[command(version)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Detect the table in a sheet range and print its records.

Without --range/--header-row the table is detected automatically: leading
empty rows and columns are trimmed. --until-empty also stops at the first
empty row. With --range or --header-row the range is taken as given.")]
    /// Detect the table in a range and print its records
    Read {
        /// Workbook file (.yaml, .json, .xlsx, ...)
        file: PathBuf,

        /// Sheet name
        #[arg(short, long, default_value = "Sheet1")]
        sheet: String,

        /// Explicit A1 range inside the sheet (e.g. A1:C10)
        #[arg(short, long)]
        range: Option<String>,

        /// 1-based header row (explicit ranges only)
        #[arg(long)]
        header_row: Option<usize>,

        /// 1-based first data row (explicit ranges only)
        #[arg(long)]
        first_data_row: Option<usize>,

        /// Stop reading at the first empty row (automatic detection only)
        #[arg(long)]
        until_empty: bool,

        /// Do not add the row_number column
        #[arg(long)]
        no_row_numbers: bool,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    #[command(long_about = "Map records onto a sheet's header and append them.

An empty sheet gets a header from the first record's keys. Fields with no
matching column are handled by --extra:
  insertInNewColumn - extend the header with new columns (default)
  ignoreIt          - keep going, the field is not written
  error             - stop and report the field and item index")]
    /// Map records onto a sheet's header and append them
    Append {
        /// Workbook file (.yaml, .json, .xlsx)
        file: PathBuf,

        /// Sheet name (created if missing)
        #[arg(short, long, default_value = "Sheet1")]
        sheet: String,

        /// JSON/YAML file with records, or per-item [{fieldId, fieldValue}] lists
        #[arg(short, long)]
        input: PathBuf,

        /// Handling of fields with no matching column
        #[arg(short, long, default_value = "insertInNewColumn")]
        extra: ExtraDataPolicy,

        /// Parse values as if typed by a user (numbers become numbers)
        #[arg(long)]
        user_entered: bool,

        /// Preview changes without writing to file
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List sheet titles in workbook order
    Sheets {
        /// Workbook file
        file: PathBuf,
    },

    /// Convert column letters to an ordinal or back (AA <-> 27)
    Column {
        /// Column letters or 1-based ordinal
        value: String,
    },

    /// Decode a hex color (#RRGGBB or #RGB)
    Color {
        /// Hex color
        hex: String,
    },

    /// Extract a spreadsheet id
    SheetId {
        /// Locator type: byId, byList or byUrl
        kind: LocatorKind,

        /// Raw id, list value or URL
        value: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "royalbit_gridmap=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn range_definition(
    range: Option<String>,
    header_row: Option<usize>,
    first_data_row: Option<usize>,
    until_empty: bool,
) -> RangeDefinition {
    if range.is_none() && header_row.is_none() && first_data_row.is_none() {
        return RangeDefinition::DetectAutomatically {
            read_rows_until: if until_empty {
                ReadRowsUntil::FirstEmptyRow
            } else {
                ReadRowsUntil::Bottom
            },
        };
    }

    let header_row = header_row.unwrap_or(1);
    RangeDefinition::SpecifyRange {
        range,
        header_row,
        first_data_row: first_data_row.unwrap_or(header_row + 1),
    }
}

async fn run(command: Commands) -> GridmapResult<()> {
    match command {
        Commands::Read {
            file,
            sheet,
            range,
            header_row,
            first_data_row,
            until_empty,
            no_row_numbers,
            json,
        } => {
            let definition = range_definition(range, header_row, first_data_row, until_empty);
            cli::read(file, sheet, definition, !no_row_numbers, json).await
        }

        Commands::Append {
            file,
            sheet,
            input,
            extra,
            user_entered,
            dry_run,
        } => cli::append(file, sheet, input, extra, user_entered, dry_run).await,

        Commands::Sheets { file } => cli::sheets(file).await,

        Commands::Column { value } => cli::column(value),

        Commands::Color { hex } => cli::color(hex),

        Commands::SheetId { kind, value } => cli::sheet_id(kind, value),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("{} {}", "Error:".red().bold(), e.detailed());
        std::process::exit(1);
    }
}
