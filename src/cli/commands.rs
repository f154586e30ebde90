use crate::bind::{sql_to_workbook, workbook_to_sql};
use crate::error::BindResult;
use crate::excel;
use crate::types::QueryResultSet;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Execute the to-excel command: populate a template workbook with query
/// results from a JSON file and write the bound workbook out.
pub fn to_excel(
    template: PathBuf,
    queries: PathBuf,
    output: PathBuf,
    verbose: bool,
) -> BindResult<()> {
    println!("{}", "📊 Sheetbind - populating template".bold().green());
    println!("   Template: {}", template.display());
    println!("   Queries:  {}", queries.display());
    println!();

    let workbook = excel::read_workbook(&template)?;
    let json = fs::read_to_string(&queries)?;
    let results: QueryResultSet = serde_json::from_str(&json)?;

    if verbose {
        println!(
            "   Found {} sheets, {} query result sets",
            workbook.len(),
            results.len()
        );
        for (name, records) in &results {
            println!("      {} ({} rows)", name.cyan(), records.len());
        }
        println!();
    }

    let bound = sql_to_workbook(&workbook, &results)?;
    excel::write_workbook(&bound, &output)?;

    println!(
        "{}",
        format!("✅ Wrote {}", output.display()).bold().green()
    );
    Ok(())
}

/// Execute the to-sql command: generate SQL statements from a populated
/// workbook and a templates file (one template per line).
pub fn to_sql(
    workbook_path: PathBuf,
    templates_path: PathBuf,
    output: Option<PathBuf>,
) -> BindResult<()> {
    let workbook = excel::read_workbook(&workbook_path)?;

    let content = fs::read_to_string(&templates_path)?;
    let templates: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    let statements = workbook_to_sql(&workbook, &templates)?;

    match output {
        Some(path) => {
            let mut body = statements.join("\n");
            body.push('\n');
            fs::write(&path, body)?;
            println!(
                "{}",
                format!("✅ Wrote {} statements to {}", statements.len(), path.display())
                    .bold()
                    .green()
            );
        }
        None => {
            for statement in &statements {
                println!("{}", statement);
            }
        }
    }
    Ok(())
}
