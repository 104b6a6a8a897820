//! Tests for the fetch module

use super::*;
use crate::mapping::ColumnMapping;
use crate::types::{Cell, JsonObject, SourceRow};
use pretty_assertions::assert_eq;
use serde_json::json;

fn row(pairs: &[(&str, serde_json::Value)]) -> SourceRow {
    let mut obj = JsonObject::new();
    for (k, v) in pairs {
        obj.insert((*k).to_string(), v.clone());
    }
    obj
}

fn mapping() -> ColumnMapping {
    ColumnMapping::new(
        vec![("id", "id"), ("title", "Title"), ("positions", "Positions")],
        &["positions".to_string()],
        &["id".to_string()],
    )
    .unwrap()
}

// ============================================================================
// StaticSource Tests
// ============================================================================

#[test]
fn test_static_source_honors_bounds_and_take() {
    let mut source = StaticSource::new(vec![
        row(&[("id", json!(1))]),
        row(&[("id", json!(2))]),
        row(&[("id", json!(3))]),
    ]);

    let states: Vec<String> = vec![];
    let columns = vec!["id".to_string()];
    let request = FetchRequest {
        columns: &columns,
        identifier_column: "id",
        previous_id: 1,
        take: 1,
        eligible_states: &states,
    };

    let rows = source.fetch_rows(&request).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!(2));
}

#[test]
fn test_static_source_status_filter() {
    let mut source = StaticSource::new(vec![
        row(&[("id", json!(1)), ("status", json!("success"))]),
        row(&[("id", json!(2)), ("status", json!("error"))]),
    ])
    .with_status_column("status");

    let states = vec!["success".to_string()];
    let columns = vec!["id".to_string()];
    let request = FetchRequest {
        columns: &columns,
        identifier_column: "id",
        previous_id: 0,
        take: 10,
        eligible_states: &states,
    };

    let rows = source.fetch_rows(&request).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!(1));
}

// ============================================================================
// Fetcher Tests
// ============================================================================

#[test]
fn test_fetch_renames_and_orders_columns() {
    let mapping = mapping();
    let states: Vec<String> = vec![];
    let fetcher = Fetcher::new(&mapping, "id", &states);
    let mut source = StaticSource::new(vec![row(&[
        ("title", json!("Engineer")),
        ("positions", json!("[\"A\"]")),
        ("id", json!(1)),
    ])]);

    let batch = fetcher.fetch(&mut source, 0, 10).unwrap();
    assert_eq!(batch.header, vec!["id", "Title", "Positions"]);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.rows[0].cells[0], Cell::Scalar(json!(1)));
    assert_eq!(batch.rows[0].cells[1], Cell::Scalar(json!("Engineer")));
    assert_eq!(batch.rows[0].cells[2], Cell::List(vec![json!("A")]));
}

#[test]
fn test_fetch_parses_structured_objects() {
    let mapping = ColumnMapping::new(
        vec![("id", "id"), ("meta", "Meta")],
        &["meta".to_string()],
        &[],
    )
    .unwrap();
    let states: Vec<String> = vec![];
    let fetcher = Fetcher::new(&mapping, "id", &states);
    let mut source = StaticSource::new(vec![row(&[
        ("id", json!(1)),
        ("meta", json!("{\"k\":\"v\"}")),
    ])]);

    let batch = fetcher.fetch(&mut source, 0, 10).unwrap();
    let mut expected = JsonObject::new();
    expected.insert("k".into(), json!("v"));
    assert_eq!(batch.rows[0].cells[1], Cell::Object(expected));
}

#[test]
fn test_malformed_json_becomes_blank_cell() {
    let mapping = mapping();
    let states: Vec<String> = vec![];
    let fetcher = Fetcher::new(&mapping, "id", &states);
    let mut source = StaticSource::new(vec![row(&[
        ("id", json!(1)),
        ("title", json!("Engineer")),
        ("positions", json!("[not json")),
    ])]);

    let batch = fetcher.fetch(&mut source, 0, 10).unwrap();
    // The row survives, only the bad cell is blanked.
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.rows[0].cells[2], Cell::Null);
    assert_eq!(batch.rows[0].cells[1], Cell::Scalar(json!("Engineer")));
}

#[test]
fn test_missing_source_column_is_blank() {
    let mapping = mapping();
    let states: Vec<String> = vec![];
    let fetcher = Fetcher::new(&mapping, "id", &states);
    let mut source = StaticSource::new(vec![row(&[("id", json!(1))])]);

    let batch = fetcher.fetch(&mut source, 0, 10).unwrap();
    assert_eq!(batch.rows[0].cells[1], Cell::Null);
    assert_eq!(batch.rows[0].cells[2], Cell::Null);
}

#[test]
fn test_empty_source_returns_header_only_batch() {
    let mapping = mapping();
    let states: Vec<String> = vec![];
    let fetcher = Fetcher::new(&mapping, "id", &states);
    let mut source = StaticSource::new(vec![]);

    let batch = fetcher.fetch(&mut source, 0, 10).unwrap();
    assert!(batch.is_empty());
    assert_eq!(batch.header, vec!["id", "Title", "Positions"]);
}
