//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use sheetbind::excel::{read_workbook, write_workbook};
use sheetbind::types::{Scalar, Sheet, Workbook};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("sheetbind").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("to-excel"))
        .stdout(predicate::str::contains("to-sql"));
}

#[test]
fn test_to_sql_prints_statements() {
    let temp_dir = TempDir::new().unwrap();
    let workbook_path = temp_dir.path().join("data.xlsx");
    let templates_path = temp_dir.path().join("templates.sql");

    let mut sheet = Sheet::new();
    sheet.set_value(0, 0, Scalar::Text("One".to_string()));
    sheet.set_value(1, 0, Scalar::Text("Two".to_string()));
    sheet.set_value(2, 0, Scalar::Text("Three".to_string()));
    sheet.set_value(0, 1, Scalar::Number(1.0));
    sheet.set_value(1, 1, Scalar::Number(2.0));
    sheet.set_value(2, 1, Scalar::Number(3.0));
    let mut workbook = Workbook::new();
    workbook.add_sheet("Sheet1", sheet);
    write_workbook(&workbook, &workbook_path).unwrap();

    fs::write(
        &templates_path,
        "INSERT INTO t (s, n) VALUES ('<Sheet1>!A1:', <Sheet1>!B1:);\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("sheetbind").unwrap();
    cmd.arg("to-sql")
        .arg(&workbook_path)
        .arg(&templates_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("VALUES ('One', 1);"))
        .stdout(predicate::str::contains("VALUES ('Two', 2);"))
        .stdout(predicate::str::contains("VALUES ('Three', 3);"));
}

#[test]
fn test_to_sql_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let workbook_path = temp_dir.path().join("data.xlsx");
    let templates_path = temp_dir.path().join("templates.sql");
    let output_path = temp_dir.path().join("out.sql");

    let mut sheet = Sheet::new();
    sheet.set_value(0, 0, Scalar::Text("One".to_string()));
    let mut workbook = Workbook::new();
    workbook.add_sheet("Sheet1", sheet);
    write_workbook(&workbook, &workbook_path).unwrap();

    fs::write(&templates_path, "SELECT '<Sheet1>!A1';\n").unwrap();

    let mut cmd = Command::cargo_bin("sheetbind").unwrap();
    cmd.arg("to-sql")
        .arg(&workbook_path)
        .arg(&templates_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let written = fs::read_to_string(&output_path).unwrap();
    assert_eq!(written, "SELECT 'One';\n");
}

#[test]
fn test_to_excel_populates_template() {
    let temp_dir = TempDir::new().unwrap();
    let template_path = temp_dir.path().join("template.xlsx");
    let queries_path = temp_dir.path().join("queries.json");
    let output_path = temp_dir.path().join("out.xlsx");

    let mut sheet = Sheet::new();
    sheet.set_value(0, 0, Scalar::Text("?data.id".to_string()));
    sheet.set_value(0, 1, Scalar::Text("?data.name".to_string()));
    let mut template = Workbook::new();
    template.add_sheet("Sheet1", sheet);
    write_workbook(&template, &template_path).unwrap();

    fs::write(
        &queries_path,
        r#"{"data": [{"id": 1, "name": "John"}, {"id": 2, "name": "Jane"}]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("sheetbind").unwrap();
    cmd.arg("to-excel")
        .arg(&template_path)
        .arg(&queries_path)
        .arg(&output_path)
        .assert()
        .success();

    let bound = read_workbook(&output_path).unwrap();
    let sheet = bound.sheet("Sheet1").unwrap();
    assert_eq!(sheet.cell(0, 0).unwrap().value, Scalar::Number(1.0));
    assert_eq!(sheet.cell(1, 1).unwrap().value, Scalar::Text("Jane".to_string()));
}

#[test]
fn test_missing_input_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("sheetbind").unwrap();
    cmd.arg("to-sql")
        .arg(temp_dir.path().join("missing.xlsx"))
        .arg(temp_dir.path().join("missing.sql"))
        .assert()
        .failure();
}
