//! Integration tests for configuration loading and early pipeline failures.
//!
//! Every case here fails before a connection is attempted, so no database
//! is needed. The host points at a reserved TEST-NET address to make any
//! accidental connection attempt obvious.

use dbstruct::config::{DEFAULT_PROFILE, load_config};
use dbstruct::error::GenError;
use dbstruct::{Generator, Stage};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("dbstruct-")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn yaml(db_type: &str, json_format: &str) -> String {
    format!(
        r#"
generate-dbstruct:
  dbHost: 192.0.2.1
  dbPort: 3306
  dbName: shop
  dbUser: app
  dbPassword: hunter2
  dbType: {db_type}
  tableName: orders
  jsonFormat: {json_format}
  structName: Order
"#
    )
}

#[test]
fn test_load_yaml_file() {
    let file = write_config(".yml", &yaml("mysql", "underscore"));
    let config = load_config(file.path(), DEFAULT_PROFILE).unwrap();
    assert_eq!(config.table_name, "orders");
    assert_eq!(config.options.struct_name, "Order");
    assert_eq!(config.port, Some(3306));
}

#[test]
fn test_load_json_file() {
    let file = write_config(
        ".json",
        r#"{"custom": {"dbType": "postgres", "tableName": "t", "jsonFormat": "camelcase", "structName": "T"}}"#,
    );
    let config = load_config(file.path(), "custom").unwrap();
    assert_eq!(config.db_type, "postgres");
    assert_eq!(config.port, None);
}

#[test]
fn test_missing_file() {
    let err = load_config("/definitely/not/here/generate.yml", DEFAULT_PROFILE).unwrap_err();
    assert!(matches!(err, GenError::ConfigMissing { .. }));
    assert!(err.suggestion().is_some());
}

#[test]
fn test_malformed_yaml() {
    let file = write_config(".yml", "generate-dbstruct: [unclosed");
    let err = load_config(file.path(), DEFAULT_PROFILE).unwrap_err();
    assert!(matches!(err, GenError::ConfigInvalid { .. }));
}

#[tokio::test]
async fn test_unsupported_kind_fails_before_connecting() {
    let file = write_config(".yml", &yaml("oracle", "camelcase"));
    let mut generator = Generator::new();
    let err = generator
        .run(file.path(), DEFAULT_PROFILE)
        .await
        .unwrap_err();

    assert!(matches!(err, GenError::UnsupportedDatabaseKind { ref kind } if kind == "oracle"));
    assert_eq!(generator.stage(), Stage::Failed);
}

#[tokio::test]
async fn test_invalid_json_format_fails_before_connecting() {
    let file = write_config(".yml", &yaml("mysql", "snake"));
    let mut generator = Generator::new();
    let err = generator
        .run(file.path(), DEFAULT_PROFILE)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("json format not valid"));
    assert_eq!(generator.stage(), Stage::Failed);
}
