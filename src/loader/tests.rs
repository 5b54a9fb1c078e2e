//! Tests for YAML loader module

use super::*;
use crate::error::Error;
use std::io::Write;

// ============================================================================
// Basic Loading Tests
// ============================================================================

#[test]
fn test_load_minimal_source() {
    let yaml = r"
name: users
table: main.users
";

    let def = load_source_from_str(yaml).unwrap();
    assert_eq!(def.name, "users");
    assert_eq!(def.database, ":memory:");
    assert_eq!(def.table.as_deref(), Some("main.users"));
    assert!(def.query.is_none());
    assert!(def.order_by.is_none());
    assert!(def.setup.is_none());
}

#[test]
fn test_load_full_source() {
    let yaml = r"
name: recent
database: ./data/app.duckdb
query: SELECT * FROM events WHERE kind = 'click'
order_by: created_at DESC
setup: |
  CREATE TABLE IF NOT EXISTS events (kind VARCHAR, created_at TIMESTAMP);
";

    let def = load_source_from_str(yaml).unwrap();
    assert_eq!(def.database, "./data/app.duckdb");
    assert_eq!(
        def.query.as_deref(),
        Some("SELECT * FROM events WHERE kind = 'click'")
    );
    assert_eq!(def.order_by.as_deref(), Some("created_at DESC"));
    assert!(def.setup.unwrap().contains("CREATE TABLE"));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_reject_empty_name() {
    let yaml = r#"
name: ""
table: users
"#;

    let err = load_source_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("name cannot be empty"));
}

#[test]
fn test_reject_table_and_query() {
    let yaml = r"
name: users
table: users
query: SELECT 1
";

    let err = load_source_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("both 'table' and 'query'"));
}

#[test]
fn test_reject_missing_table_and_query() {
    let yaml = r"
name: users
";

    let err = load_source_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("either 'table' or 'query'"));
}

#[test]
fn test_reject_invalid_yaml() {
    let err = load_source_from_str("name: [unclosed").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
    assert!(err.to_string().starts_with("Failed to parse YAML"));
}

#[test]
fn test_reject_wrong_field_type_as_yaml_error() {
    let err = load_source_from_str("name: [a, b]
table: users").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
}

// ============================================================================
// File Loading Tests
// ============================================================================

#[test]
fn test_load_source_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name: numbers\ntable: numbers\norder_by: i").unwrap();

    let def = load_source(file.path()).unwrap();
    assert_eq!(def.name, "numbers");
    assert_eq!(def.order_by.as_deref(), Some("i"));
}

#[test]
fn test_load_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_source(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}
