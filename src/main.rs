use clap::{Parser, Subcommand};
use colored::Colorize;
use sheetbind::cli;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetbind")]
#[command(about = "Bind SQL query results to spreadsheet templates, in both directions")]
#[command(long_about = "Sheetbind - SQL ↔ spreadsheet template binding

FORWARD (to-excel):
  Template cells hold query references:
    ?summary[0].total_value   direct - one value at an explicit row index
    ?products.name            iterative - one generated row per record
  Iterative template rows are expanded in place: rows below shift down,
  formulas copy with row offsets rewritten, styles propagate.

REVERSE (to-sql):
  Text templates hold cell references:
    <Sheet1>!A1               single cell
    <Sheet1>!A1:A10           closed range
    <Sheet1>!A1:              open range - extends to the last populated row
  Templates with ranges expand to one statement per row.

EXAMPLES:
  sheetbind to-excel report-template.xlsx results.json report.xlsx
  sheetbind to-sql data.xlsx inserts.sql.tmpl -o inserts.sql")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate a spreadsheet template with query results
    ToExcel {
        /// Template workbook (.xlsx) with query references
        template: PathBuf,
        /// Query results as JSON: {"query": [{"column": value, ...}, ...]}
        queries: PathBuf,
        /// Output workbook path
        output: PathBuf,
        /// Show query and sheet details
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate SQL statements from a populated workbook
    ToSql {
        /// Populated workbook (.xlsx)
        workbook: PathBuf,
        /// Templates file, one statement template per line
        templates: PathBuf,
        /// Write statements to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::ToExcel {
            template,
            queries,
            output,
            verbose,
        } => cli::to_excel(template, queries, output, verbose),
        Commands::ToSql {
            workbook,
            templates,
            output,
        } => cli::to_sql(workbook, templates, output),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "❌ Error:".red().bold(), e);
        std::process::exit(1);
    }
}
