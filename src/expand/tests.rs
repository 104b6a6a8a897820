//! Tests for the expansion module

use super::*;
use crate::mapping::ColumnMapping;
use crate::types::{Batch, Cell, Row};
use pretty_assertions::assert_eq;
use serde_json::json;

fn mapping(json_columns: &[&str]) -> ColumnMapping {
    let json: Vec<String> = json_columns.iter().map(|s| (*s).to_string()).collect();
    ColumnMapping::new(
        vec![
            ("id", "id"),
            ("title", "Title"),
            ("positions", "Positions"),
            ("skills", "Skills"),
        ],
        &json,
        &[],
    )
    .unwrap()
}

fn scalar(v: serde_json::Value) -> Cell {
    Cell::Scalar(v)
}

fn source_row(id: i64, title: &str, positions: &[&str], skills: &[&str]) -> Row {
    Row::new(vec![
        scalar(json!(id)),
        scalar(json!(title)),
        Cell::List(positions.iter().map(|s| json!(s)).collect()),
        Cell::List(skills.iter().map(|s| json!(s)).collect()),
    ])
}

fn expand(rows: Vec<Row>, fill: FillMode) -> Vec<Row> {
    let mapping = mapping(&["positions", "skills"]);
    let expander = VerticalExpander::new(&mapping, fill);
    let batch = Batch::new(mapping.output_header(), rows);
    expander.expand(batch).rows
}

// ============================================================================
// Row-count and base-row laws
// ============================================================================

#[test]
fn test_base_row_keeps_scalars_and_blanks_lists() {
    let rows = expand(
        vec![source_row(1, "Eng", &["A", "B"], &["X"])],
        FillMode::Blank,
    );
    // base + max(2, 1) synthetic rows
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].cells[1], scalar(json!("Eng")));
    assert_eq!(rows[0].cells[2], Cell::Null);
    assert_eq!(rows[0].cells[3], Cell::Null);
}

#[test]
fn test_row_count_is_one_plus_longest_list() {
    let rows = expand(
        vec![source_row(1, "Eng", &["A", "B", "C"], &["X", "Y"])],
        FillMode::Blank,
    );
    assert_eq!(rows.len(), 4);

    let rows = expand(vec![source_row(1, "Eng", &[], &[])], FillMode::Blank);
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_independent_lists_pack_into_shared_rows() {
    let rows = expand(
        vec![source_row(1, "Eng", &["A", "B"], &["X"])],
        FillMode::Blank,
    );
    // items pack column-wise, starting at the first synthetic row
    assert_eq!(rows[1].cells[2], scalar(json!("A")));
    assert_eq!(rows[1].cells[3], scalar(json!("X")));
    assert_eq!(rows[2].cells[2], scalar(json!("B")));
    assert_eq!(rows[2].cells[3], Cell::Null);
}

#[test]
fn test_no_item_lost() {
    let rows = expand(
        vec![source_row(1, "Eng", &["A", "B", "C"], &["X", "Y", "Z"])],
        FillMode::Blank,
    );
    let placed: Vec<String> = rows
        .iter()
        .flat_map(|r| [r.cells[2].render(), r.cells[3].render()])
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(placed, vec!["A", "X", "B", "Y", "C", "Z"]);
}

#[test]
fn test_duplicate_fill_copies_parent_scalars() {
    let rows = expand(
        vec![source_row(1, "Eng", &["A", "B"], &[])],
        FillMode::Duplicate,
    );
    assert_eq!(rows.len(), 3);
    // synthetic rows carry the parent's scalar fields
    assert_eq!(rows[1].cells[0], scalar(json!(1)));
    assert_eq!(rows[1].cells[1], scalar(json!("Eng")));
    assert_eq!(rows[2].cells[1], scalar(json!("Eng")));
    assert_eq!(rows[2].cells[2], scalar(json!("B")));
}

#[test]
fn test_blank_fill_leaves_synthetic_scalars_empty() {
    let rows = expand(vec![source_row(1, "Eng", &["A"], &[])], FillMode::Blank);
    assert_eq!(rows[1].cells[0], Cell::Null);
    assert_eq!(rows[1].cells[1], Cell::Null);
    assert_eq!(rows[1].cells[2], scalar(json!("A")));
}

#[test]
fn test_multiple_source_rows_stay_ordered() {
    let rows = expand(
        vec![
            source_row(1, "Eng", &["A"], &[]),
            source_row(2, "Mgr", &["B"], &[]),
        ],
        FillMode::Blank,
    );
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].cells[1], scalar(json!("Eng")));
    assert_eq!(rows[2].cells[1], scalar(json!("Mgr")));
    assert_eq!(rows[3].cells[2], scalar(json!("B")));
}

#[test]
fn test_object_cells_pass_through_untouched() {
    let mapping = ColumnMapping::new(
        vec![("id", "id"), ("meta", "Meta")],
        &["meta".to_string()],
        &[],
    )
    .unwrap();
    let mut obj = serde_json::Map::new();
    obj.insert("k".to_string(), json!("v"));
    let row = Row::new(vec![scalar(json!(1)), Cell::Object(obj.clone())]);

    let expander = VerticalExpander::new(&mapping, FillMode::Blank);
    let out = expander.expand(Batch::new(mapping.output_header(), vec![row]));

    // object-valued columns are the horizontal stage's concern
    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].cells[1], Cell::Object(obj));
}

#[test]
fn test_object_list_items_become_object_cells() {
    let mapping = ColumnMapping::new(
        vec![("id", "id"), ("positions", "Positions")],
        &["positions".to_string()],
        &[],
    )
    .unwrap();
    let row = Row::new(vec![
        scalar(json!(1)),
        Cell::List(vec![json!({"company": "Acme"})]),
    ]);

    let expander = VerticalExpander::new(&mapping, FillMode::Blank);
    let out = expander.expand(Batch::new(mapping.output_header(), vec![row]));

    assert_eq!(out.rows.len(), 2);
    assert!(matches!(out.rows[1].cells[1], Cell::Object(_)));
}

// ============================================================================
// Horizontal extension point
// ============================================================================

#[test]
fn test_passthrough_horizontal_is_identity() {
    let batch = Batch::new(
        vec!["id".to_string()],
        vec![Row::new(vec![scalar(json!(1))])],
    );
    let out = PassthroughHorizontal.expand(batch.clone()).unwrap();
    assert_eq!(out, batch);
}
