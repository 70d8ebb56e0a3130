use super::{TemplateLoader, TEMPLATE_EXTENSION};
use crate::error::{Error, Result};

macro_rules! embed {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../../templates/", $name)))),*]
    };
}

/// Template set compiled into the binary, keyed by name.
const TEMPLATES: &[(&str, &str)] = embed![
    "docker/Dockerfile.j2",
    "docker/Dockerfile.defaults.yml",
    "docker/docker-compose.yml.j2",
    "docker/docker-compose.yml.defaults.yml",
    "docker/.dockerignore.j2",
    "git/.gitignore.j2",
    "git/.gitignore.defaults.yml",
    "git/.pre-commit-config.yaml.j2",
    "git/.pre-commit-config.yaml.defaults.yml",
    "code_quality/mypy.ini.j2",
    "code_quality/mypy.ini.defaults.yml",
    "code_quality/pytest.ini.j2",
    "code_quality/pytest.ini.defaults.yml",
    "code_quality/ruff.toml.j2",
    "code_quality/ruff.toml.defaults.yml",
    ".vscode/settings.json.j2",
    ".vscode/launch.json.j2",
    ".vscode/extensions.json.j2",
];

/// Loader for the built-in template set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLoader;

impl EmbeddedLoader {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateLoader for EmbeddedLoader {
    fn load(&self, name: &str) -> Result<String> {
        TEMPLATES
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, text)| text.to_string())
            .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = TEMPLATES
            .iter()
            .map(|(name, _)| name.to_string())
            .filter(|name| name.ends_with(TEMPLATE_EXTENSION))
            .collect();
        names.sort();
        Ok(names)
    }
}
