//! Tests for the output module

use super::*;
use crate::mapping::ColumnMapping;
use crate::types::{Batch, Cell, FileFormat, Row};
use pretty_assertions::assert_eq;
use serde_json::json;

fn mapping() -> ColumnMapping {
    ColumnMapping::new(
        vec![("id", "id"), ("title", "Title"), ("positions", "Positions")],
        &["positions".to_string()],
        &["id".to_string()],
    )
    .unwrap()
}

fn batch() -> Batch {
    Batch::new(
        vec!["id".into(), "Title".into(), "Positions".into()],
        vec![
            Row::new(vec![
                Cell::Scalar(json!(1)),
                Cell::Scalar(json!("Eng")),
                Cell::Null,
            ]),
            Row::new(vec![
                Cell::Scalar(json!(2)),
                Cell::Scalar(json!("Mgr")),
                Cell::Scalar(json!("A")),
            ]),
        ],
    )
}

// ============================================================================
// CSV Tests
// ============================================================================

#[test]
fn test_csv_drops_skip_columns_and_keeps_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let written = write_csv(&batch(), &mapping(), &path).unwrap();
    assert_eq!(written, 2);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Title,Positions\nEng,\nMgr,A\n");
}

#[test]
fn test_csv_rewrite_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");

    write_csv(&batch(), &mapping(), &first).unwrap();
    write_csv(&batch(), &mapping(), &second).unwrap();

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn test_csv_serializes_structured_cells_as_json_text() {
    let mapping =
        ColumnMapping::new(vec![("positions", "Positions")], &["positions".to_string()], &[])
            .unwrap();
    let batch = Batch::new(
        vec!["Positions".into()],
        vec![Row::new(vec![Cell::List(vec![json!("A"), json!("B")])])],
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("json.csv");
    write_csv(&batch, &mapping, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Positions\n\"[\"\"A\"\",\"\"B\"\"]\"\n");
}

#[test]
fn test_empty_buffer_still_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    let empty = Batch::empty(vec!["id".into(), "Title".into(), "Positions".into()]);
    let written = write_csv(&empty, &mapping(), &path).unwrap();
    assert_eq!(written, 0);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Title,Positions\n");
}

// ============================================================================
// XLSX Tests
// ============================================================================

#[test]
fn test_xlsx_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");

    let written = write_xlsx(&batch(), &mapping(), &path).unwrap();
    assert_eq!(written, 2);
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_sheet_capacity_predicate() {
    assert!(!sheet_capacity_exceeded(0));
    assert!(!sheet_capacity_exceeded(XLSX_ROW_CEILING - 1));
    assert!(sheet_capacity_exceeded(XLSX_ROW_CEILING));
    assert!(sheet_capacity_exceeded(XLSX_ROW_CEILING + 1));
}

fn wide_batch(rows: usize) -> Batch {
    Batch::new(
        vec!["id".into(), "Title".into(), "Positions".into()],
        (0..rows)
            .map(|i| {
                Row::new(vec![
                    Cell::Scalar(json!(i)),
                    Cell::Scalar(json!(format!("t{i}"))),
                    Cell::Null,
                ])
            })
            .collect(),
    )
}

#[test]
fn test_xlsx_over_ceiling_still_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("over.xlsx");

    // ceiling of 3 sheet rows = header + 2 data rows
    let written = write_xlsx_with_ceiling(&wide_batch(5), &mapping(), &path, 3).unwrap();
    assert_eq!(written, 2);
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_xlsx_exact_fit_keeps_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fit.xlsx");

    let written = write_xlsx_with_ceiling(&wide_batch(3), &mapping(), &path, 4).unwrap();
    assert_eq!(written, 3);
    assert!(path.exists());
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[test]
fn test_write_file_dispatch() {
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("d.csv");
    write_file(&batch(), &mapping(), FileFormat::Csv, &csv_path).unwrap();
    assert!(csv_path.exists());

    let xlsx_path = dir.path().join("d.xlsx");
    write_file(&batch(), &mapping(), FileFormat::Xlsx, &xlsx_path).unwrap();
    assert!(xlsx_path.exists());
}
