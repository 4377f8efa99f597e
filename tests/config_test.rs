use std::fs;
use std::path::Path;

use ahoy::config::{
    get_config, parse_config, Choice, ConfigFormat, FieldType, SkeletonConfig, Widget,
};
use ahoy::error::Error;
use tempfile::TempDir;

fn write_descriptor(root: &Path, name: &str, content: &str) {
    let dir = root.join(".ahoy");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_json_descriptor_wins_over_yaml() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), "skeleton.json", r#"{ "copy": ["from-json/**"] }"#);
    write_descriptor(dir.path(), "skeleton.yml", "copy:\n  - from-yaml/**\n");

    let config = get_config(dir.path()).unwrap();

    assert_eq!(config.copy, vec!["from-json/**"]);
}

#[test]
fn test_yaml_descriptor() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        dir.path(),
        "skeleton.yml",
        r#"
copy:
  - "assets/**"
ignore:
  - "*.log"
fields:
  - name: database
    type: select
    message: Which database?
    initial: postgres
    choices:
      - title: PostgreSQL
        value: postgres
      - sqlite
  - name: ci
    type: checkbox
    initial: true
  - name: tags
    widget: list
    required: false
"#,
    );

    let config = get_config(dir.path()).unwrap();

    assert_eq!(config.copy, vec!["assets/**"]);
    assert_eq!(config.ignore, vec!["*.log"]);
    assert_eq!(config.fields.len(), 3);

    let database = &config.fields[0];
    assert_eq!(database.field_type, FieldType::Select);
    assert_eq!(database.message(), "Which database?");
    assert!(database.required);
    assert_eq!(database.choices[0].title(), "PostgreSQL");
    assert_eq!(database.choices[0].value(), "postgres");
    assert_eq!(database.choices[1], Choice::Plain("sqlite".to_string()));
    assert_eq!(database.choices[1].title(), "sqlite");

    let ci = &config.fields[1];
    assert_eq!(ci.field_type, FieldType::Checkbox);
    assert_eq!(ci.initial, Some(serde_json::Value::Bool(true)));
    assert_eq!(ci.message(), "ci");

    let tags = &config.fields[2];
    assert_eq!(tags.field_type, FieldType::Text);
    assert_eq!(tags.widget, Some(Widget::List));
    assert!(!tags.required);
}

#[test]
fn test_empty_descriptors_declare_nothing() {
    assert_eq!(parse_config("", ConfigFormat::Yaml).unwrap(), SkeletonConfig::default());
    assert_eq!(parse_config("{}", ConfigFormat::Json).unwrap(), SkeletonConfig::default());
}

#[test]
fn test_missing_descriptor() {
    let dir = TempDir::new().unwrap();

    match get_config(dir.path()) {
        Err(Error::ConfigError(message)) => assert!(message.contains("skeleton.json")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_malformed_descriptor() {
    let result = parse_config(r#"{ "copy": "not-a-list" }"#, ConfigFormat::Json);
    assert!(matches!(result, Err(Error::ConfigError(_))));

    let result = parse_config("fields: [", ConfigFormat::Yaml);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_reserved_field_name_is_rejected() {
    let content = r#"{ "fields": [{ "name": "skeleton_author" }] }"#;

    match parse_config(content, ConfigFormat::Json) {
        Err(Error::ConfigError(message)) => assert!(message.contains("reserved")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_duplicate_field_name_is_rejected() {
    let content = "fields:\n  - name: db\n  - name: db\n";

    assert!(matches!(parse_config(content, ConfigFormat::Yaml), Err(Error::ConfigError(_))));
}

#[test]
fn test_unknown_field_type_is_rejected() {
    let content = r#"{ "fields": [{ "name": "x", "type": "hologram" }] }"#;

    assert!(matches!(parse_config(content, ConfigFormat::Json), Err(Error::ConfigError(_))));
}

#[test]
fn test_field_type_names() {
    let content = r#"{ "fields": [
        { "name": "a", "type": "datetime-local" },
        { "name": "b", "type": "multi-select", "choices": ["x", "y"] }
    ] }"#;

    let config = parse_config(content, ConfigFormat::Json).unwrap();

    assert_eq!(config.fields[0].field_type, FieldType::DatetimeLocal);
    assert_eq!(config.fields[0].field_type.as_str(), "datetime-local");
    assert_eq!(config.fields[1].field_type, FieldType::MultiSelect);
}

#[test]
fn test_null_lists_read_as_empty() {
    let json = parse_config(r#"{ "copy": null, "ignore": null, "fields": null }"#, ConfigFormat::Json)
        .unwrap();
    assert_eq!(json, SkeletonConfig::default());

    let yaml = parse_config("copy:\nignore:\nfields:\n", ConfigFormat::Yaml).unwrap();
    assert_eq!(yaml, SkeletonConfig::default());
}
