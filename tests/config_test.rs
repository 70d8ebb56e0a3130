use scoffy::config::{find_config, load_config, parse_options, CONFIG_FILES};
use scoffy::error::Error;
use scoffy::generator::{Database, ProjectOptions};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_config_lookup_order() {
    let temp_dir = TempDir::new().unwrap();
    assert!(find_config(temp_dir.path(), &CONFIG_FILES).is_none());
    assert!(matches!(load_config(temp_dir.path(), &CONFIG_FILES), Err(Error::ConfigError(_))));

    fs::write(temp_dir.path().join("scoffy.yaml"), "project_name: from-yaml\n").unwrap();
    assert_eq!(load_config(temp_dir.path(), &CONFIG_FILES).unwrap(), "project_name: from-yaml\n");

    fs::write(temp_dir.path().join("scoffy.json"), r#"{"project_name": "from-json"}"#).unwrap();
    assert_eq!(
        find_config(temp_dir.path(), &CONFIG_FILES),
        Some(temp_dir.path().join("scoffy.json"))
    );
}

#[test]
fn test_parse_json_options() {
    let options = parse_options(
        r#"{
            "project_name": "billing",
            "database": "mongodb",
            "use_docker": true,
            "use_redis": true,
            "redis_password": "secret"
        }"#,
    )
    .unwrap();
    assert_eq!(options.project_name, "billing");
    assert_eq!(options.database, Database::Mongodb);
    assert!(options.use_docker && options.use_redis);
    assert!(options.use_code_quality);
    assert_eq!(options.extra["redis_password"], serde_json::json!("secret"));
}

#[test]
fn test_parse_yaml_options() {
    let options = parse_options(
        "project_name: billing\ndatabase: sqlite\nuse_code_quality: false\n\
         plugins:\n  - pydantic.mypy\n",
    )
    .unwrap();
    assert_eq!(options.database, Database::Sqlite);
    assert!(!options.use_code_quality);
    assert_eq!(options.language, "python");
    assert_eq!(options.extra["plugins"], serde_json::json!(["pydantic.mypy"]));
}

#[test]
fn test_parse_invalid_options() {
    assert!(matches!(parse_options("database: oracle\n"), Err(Error::ConfigError(_))));
    assert!(matches!(parse_options("- not\n- a mapping\n"), Err(Error::ConfigError(_))));
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let content = match load_config(temp_dir.path(), &CONFIG_FILES) {
        Ok(content) => content,
        Err(Error::ConfigError(_)) => String::new(),
        Err(e) => panic!("Expected ConfigError, got {e:?}"),
    };
    assert_eq!(parse_options(&content).unwrap(), ProjectOptions::default());
}
