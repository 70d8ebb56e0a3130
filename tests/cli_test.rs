use clap::Parser;
use scoffy::cli::Args;
use scoffy::generator::{Database, ProjectOptions};
use scoffy::renderer::Environment;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("scoffy")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["./output"])).unwrap();

    assert_eq!(parsed.output_dir, Some(PathBuf::from("./output")));
    assert!(parsed.templates.is_none());
    assert!(!parsed.force);
    assert!(!parsed.verbose);
    assert!(!parsed.docker);
    assert!(parsed.set.is_empty());
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--force",
        "--verbose",
        "--docker",
        "--redis",
        "--git-hooks",
        "--vscode",
        "--no-code-quality",
        "--database",
        "postgresql",
        "--project-name",
        "billing",
        "--templates",
        "./my-templates",
        "./output",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.force);
    assert!(parsed.verbose);
    assert!(parsed.docker && parsed.redis && parsed.git_hooks && parsed.vscode);
    assert!(parsed.no_code_quality);
    assert_eq!(parsed.database, Some(Database::Postgresql));
    assert_eq!(parsed.project_name.as_deref(), Some("billing"));
    assert_eq!(parsed.templates, Some(PathBuf::from("./my-templates")));
}

#[test]
fn test_short_flags() {
    let parsed = Args::try_parse_from(make_args(&["-f", "-v", "./output"])).unwrap();

    assert!(parsed.force);
    assert!(parsed.verbose);
}

#[test]
fn test_set_values() {
    let args = make_args(&["--set", "app_port=9000", "--set", "app_name=billing-api", "./output"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.set.len(), 2);
    assert_eq!(parsed.set[0], ("app_port".to_string(), serde_json::json!(9000)));
    assert_eq!(parsed.set[1], ("app_name".to_string(), serde_json::json!("billing-api")));
}

#[test]
fn test_invalid_set_value() {
    assert!(Args::try_parse_from(make_args(&["--set", "novalue", "./output"])).is_err());
}

#[test]
fn test_invalid_database() {
    assert!(Args::try_parse_from(make_args(&["--database", "oracle", "./output"])).is_err());
}

#[test]
fn test_missing_args() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_list_needs_no_output_dir() {
    let parsed = Args::try_parse_from(make_args(&["--list"])).unwrap();
    assert!(parsed.list);
    assert!(parsed.output_dir.is_none());
}

#[test]
fn test_apply_overrides_options_file() {
    let mut options = ProjectOptions {
        project_name: "from-file".to_string(),
        use_redis: true,
        ..Default::default()
    };
    let args = make_args(&["--docker", "--no-code-quality", "--set", "use_nginx=true", "./output"]);
    Args::try_parse_from(args).unwrap().apply(&mut options);

    assert_eq!(options.project_name, "from-file");
    assert!(options.use_redis);
    assert!(options.use_docker);
    assert!(!options.use_code_quality);
    assert_eq!(options.extra.get("use_nginx"), Some(&serde_json::json!(true)));
}

#[test]
fn test_set_keeps_version_text() {
    let mut options = ProjectOptions::default();
    let args = make_args(&["--set", "python_version=3.10", "./output"]);
    Args::try_parse_from(args).unwrap().apply(&mut options);

    let env = Environment::embedded();
    let out = env.render_template("docker", "Dockerfile.j2", &options.to_context()).unwrap();
    assert!(out.contains("FROM python:3.10\n"), "{out}");
}
