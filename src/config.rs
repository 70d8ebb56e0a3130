//! Options files.
//! A project can keep its generation options in `scoffy.json`, `scoffy.yml`
//! or `scoffy.yaml`; command-line flags are applied on top.

use crate::error::{Error, Result};
use crate::generator::ProjectOptions;
use log::debug;
use std::path::{Path, PathBuf};

/// Supported options file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["scoffy.json", "scoffy.yml", "scoffy.yaml"];

/// Returns the first of `config_files` present in `dir`.
pub fn find_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Option<PathBuf> {
    config_files.iter().map(|file| dir.as_ref().join(file)).find(|path| path.is_file())
}

/// Loads the first options file found in `dir`.
///
/// # Errors
/// * `Error::ConfigError` if none of `config_files` exists
/// * `Error::IoError` if the file cannot be read
pub fn load_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<String> {
    let Some(config_path) = find_config(&dir, config_files) else {
        return Err(Error::ConfigError(format!(
            "No configuration file found (tried: {})",
            config_files.join(", ")
        )));
    };
    debug!("Loading configuration from {}", config_path.display());
    Ok(std::fs::read_to_string(&config_path)?)
}

/// Parses options file content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither
pub fn parse_options(content: &str) -> Result<ProjectOptions> {
    if content.trim().is_empty() {
        return Ok(ProjectOptions::default());
    }
    match serde_json::from_str(content) {
        Ok(options) => Ok(options),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Parses a `KEY=VALUE` assignment. The value is read as JSON when it is
/// valid JSON and kept as a plain string otherwise. Numbers that would not
/// print back as written (`3.10`, `1e3`) stay strings.
///
/// # Errors
/// * `Error::ConfigError` if there is no `=` or the key is empty
pub fn parse_assignment(raw: &str) -> Result<(String, serde_json::Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(Error::ConfigError(format!("expected KEY=VALUE, got '{raw}'")));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::ConfigError(format!("missing key in '{raw}'")));
    }
    let parsed = match serde_json::from_str(value) {
        Ok(serde_json::Value::Number(n)) if n.to_string() != value.trim() => None,
        Ok(parsed) => Some(parsed),
        Err(_) => None,
    };
    let value = parsed.unwrap_or_else(|| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
