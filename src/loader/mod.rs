//! Template loaders: resolve a template name to its source text.
//!
//! Names are `/`-separated paths relative to a template root, such as
//! `docker/docker-compose.yml.j2`. A template may declare default option
//! values in a YAML sidecar next to it (`docker-compose.yml.defaults.yml`).

use crate::context::Context;
use crate::error::{Error, Result};
use crate::value::Value;
use std::path::PathBuf;

pub mod embedded;
pub mod local;

pub use embedded::EmbeddedLoader;
pub use local::LocalLoader;

/// Extension carried by template files.
pub const TEMPLATE_EXTENSION: &str = ".j2";

/// Suffix of the defaults sidecar that replaces the template extension.
pub const DEFAULTS_SUFFIX: &str = ".defaults.yml";

/// Trait for loading templates from different sources.
pub trait TemplateLoader: Send + Sync {
    /// Returns the raw text of the named template.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the root has no such entry
    fn load(&self, name: &str) -> Result<String>;

    /// Names of all templates under this root, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Returns the defaults declared by the named template, or an empty
    /// context when it declares none.
    fn load_defaults(&self, name: &str) -> Result<Context> {
        let sidecar = defaults_name(name);
        match self.load(&sidecar) {
            Ok(text) => parse_defaults(&sidecar, &text),
            Err(Error::TemplateNotFound { .. }) => Ok(Context::new()),
            Err(e) => Err(e),
        }
    }
}

/// Name of the defaults sidecar for a template name.
pub fn defaults_name(name: &str) -> String {
    let stem = name.strip_suffix(TEMPLATE_EXTENSION).unwrap_or(name);
    format!("{stem}{DEFAULTS_SUFFIX}")
}

/// Parses a YAML defaults sidecar. An empty document declares nothing.
pub fn parse_defaults(name: &str, text: &str) -> Result<Context> {
    if text.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
        return Ok(Context::new());
    }
    let raw: serde_json::Value = serde_yaml::from_str(text)
        .map_err(|e| Error::ConfigError(format!("invalid defaults in '{name}': {e}")))?;
    match Value::from(raw) {
        Value::None => Ok(Context::new()),
        Value::Map(vars) => Ok(Context::from(vars)),
        other => Err(Error::ConfigError(format!(
            "defaults in '{name}' must be a mapping, found {}",
            other.kind()
        ))),
    }
}

/// Represents the source location of a template set.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSource {
    /// Template root directory on the local filesystem
    FileSystem(PathBuf),
    /// Templates compiled into the binary
    Embedded,
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Embedded => write!(f, "built-in templates"),
        }
    }
}

impl TemplateSource {
    /// Picks the filesystem root when one is given, the embedded set otherwise.
    pub fn from_option(root: Option<PathBuf>) -> Self {
        match root {
            Some(path) => Self::FileSystem(path),
            None => Self::Embedded,
        }
    }

    /// Creates the loader for this source.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if a filesystem root does not exist
    pub fn into_loader(self) -> Result<Box<dyn TemplateLoader>> {
        match self {
            TemplateSource::FileSystem(path) => Ok(Box::new(LocalLoader::new(path)?)),
            TemplateSource::Embedded => Ok(Box::new(EmbeddedLoader::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_source_display() {
        let fs_source = TemplateSource::FileSystem(PathBuf::from("/path/to/templates"));
        assert_eq!(format!("{}", fs_source), "local path: '/path/to/templates'");
        assert_eq!(format!("{}", TemplateSource::Embedded), "built-in templates");
    }

    #[test]
    fn test_defaults_name() {
        assert_eq!(defaults_name("code_quality/mypy.ini.j2"), "code_quality/mypy.ini.defaults.yml");
        assert_eq!(defaults_name("plain"), "plain.defaults.yml");
    }

    #[test]
    fn test_parse_defaults() {
        let ctx =
            parse_defaults("x.defaults.yml", "python_version: \"3.12\"\nport: 8000\n").unwrap();
        assert_eq!(ctx.get("python_version"), Some(&Value::from("3.12")));
        assert_eq!(ctx.get("port"), Some(&Value::from(8000)));

        assert!(parse_defaults("empty.defaults.yml", "").unwrap().is_empty());
        assert!(matches!(
            parse_defaults("list.defaults.yml", "- a\n- b\n"),
            Err(Error::ConfigError(_))
        ));
    }
}
