//! Turns project options into files on disk.
//!
//! [`plan`] picks the templates a project needs, [`Generator`] renders and
//! writes each one on its own: a template that fails is logged and recorded
//! while the rest are still generated.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::loader::TEMPLATE_EXTENSION;
use crate::renderer::Environment;
use crate::value::Value;
use indexmap::IndexMap;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Database backing the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    None,
    Postgresql,
    Mongodb,
    Sqlite,
}

impl Database {
    /// The `database_type` templates switch on; `None` sets nothing.
    pub fn template_value(self) -> Option<&'static str> {
        match self {
            Database::None => None,
            Database::Postgresql => Some("postgresql"),
            Database::Mongodb => Some("document"),
            Database::Sqlite => Some("sqlite"),
        }
    }
}

/// Feature selection for a generated project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    pub project_name: String,
    pub language: String,
    pub database: Database,
    pub use_docker: bool,
    pub use_redis: bool,
    pub use_git_hooks: bool,
    pub use_vscode: bool,
    pub use_code_quality: bool,
    /// Any other template variable, passed through as given.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            project_name: "my-project".to_string(),
            language: "python".to_string(),
            database: Database::None,
            use_docker: false,
            use_redis: false,
            use_git_hooks: false,
            use_vscode: false,
            use_code_quality: true,
            extra: IndexMap::new(),
        }
    }
}

impl ProjectOptions {
    /// The user context handed to every template. Values in `extra` win
    /// over the ones derived from the feature flags.
    pub fn to_context(&self) -> Context {
        let mut ctx = Context::new()
            .with("project_name", self.project_name.as_str())
            .with("language", self.language.as_str())
            .with("use_docker", self.use_docker)
            .with("use_redis", self.use_redis)
            .with("use_git", self.use_git_hooks)
            .with("use_git_hooks", self.use_git_hooks)
            .with("use_vscode", self.use_vscode)
            .with("use_code_quality", self.use_code_quality)
            .with("use_mypy", self.use_code_quality);
        if let Some(database_type) = self.database.template_value() {
            ctx.insert("database_type", database_type);
        }
        for (key, value) in &self.extra {
            ctx.insert(key.as_str(), Value::from(value.clone()));
        }
        ctx
    }
}

/// One template and the path it is written to, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub category: &'static str,
    pub template: &'static str,
    pub output: PathBuf,
}

impl Artifact {
    fn new(category: &'static str, template: &'static str) -> Self {
        let file_name = template.strip_suffix(TEMPLATE_EXTENSION).unwrap_or(template);
        let output = match category {
            ".vscode" => Path::new(category).join(file_name),
            _ => PathBuf::from(file_name),
        };
        Self { category, template, output }
    }

    /// Template name as the loader knows it.
    pub fn name(&self) -> String {
        format!("{}/{}", self.category, self.template)
    }
}

/// Lists the artifacts selected by `options`, in generation order.
pub fn plan(options: &ProjectOptions) -> Vec<Artifact> {
    let mut artifacts = vec![Artifact::new("git", ".gitignore.j2")];
    if options.use_docker {
        artifacts.push(Artifact::new("docker", "Dockerfile.j2"));
        artifacts.push(Artifact::new("docker", "docker-compose.yml.j2"));
        artifacts.push(Artifact::new("docker", ".dockerignore.j2"));
    }
    if options.use_git_hooks {
        artifacts.push(Artifact::new("git", ".pre-commit-config.yaml.j2"));
    }
    if options.use_code_quality {
        artifacts.push(Artifact::new("code_quality", "mypy.ini.j2"));
        artifacts.push(Artifact::new("code_quality", "pytest.ini.j2"));
        artifacts.push(Artifact::new("code_quality", "ruff.toml.j2"));
    }
    if options.use_vscode {
        artifacts.push(Artifact::new(".vscode", "settings.json.j2"));
        artifacts.push(Artifact::new(".vscode", "launch.json.j2"));
        artifacts.push(Artifact::new(".vscode", "extensions.json.j2"));
    }
    debug!("Planned {} artifacts", artifacts.len());
    artifacts
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, absolute or relative to the working directory.
    pub written: Vec<PathBuf>,
    pub failed: Vec<(Artifact, Error)>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ensures the output directory is safe to write to.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists and `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}

/// Renders planned artifacts into an output directory.
pub struct Generator<'a> {
    env: &'a Environment,
    output_dir: PathBuf,
}

impl<'a> Generator<'a> {
    pub fn new<P: AsRef<Path>>(env: &'a Environment, output_dir: P) -> Self {
        Self { env, output_dir: output_dir.as_ref().to_path_buf() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders one artifact and writes it, returning the written path.
    pub fn generate_one(&self, artifact: &Artifact, context: &Context) -> Result<PathBuf> {
        let content = self.env.render_template(artifact.category, artifact.template, context)?;
        let target = self.output_dir.join(&artifact.output);
        debug!("Writing file: {}", target.display());
        write_file(&target, &content)?;
        Ok(target)
    }

    /// Generates every artifact `options` selects.
    pub fn generate(&self, options: &ProjectOptions) -> GenerationReport {
        let context = options.to_context();
        let mut report = GenerationReport::default();
        for artifact in plan(options) {
            match self.generate_one(&artifact, &context) {
                Ok(target) => {
                    info!("Generated '{}'", target.display());
                    report.written.push(target);
                }
                Err(e) => {
                    error!("Failed to generate '{}': {}", artifact.output.display(), e);
                    report.failed.push((artifact, e));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(options: &ProjectOptions) -> Vec<String> {
        plan(options).into_iter().map(|a| a.output.display().to_string()).collect()
    }

    #[test]
    fn test_default_plan() {
        assert_eq!(
            outputs(&ProjectOptions::default()),
            [".gitignore", "mypy.ini", "pytest.ini", "ruff.toml"]
        );
    }

    #[test]
    fn test_minimal_plan_is_gitignore_only() {
        let options = ProjectOptions { use_code_quality: false, ..Default::default() };
        assert_eq!(outputs(&options), [".gitignore"]);
    }

    #[test]
    fn test_full_plan() {
        let options = ProjectOptions {
            use_docker: true,
            use_git_hooks: true,
            use_vscode: true,
            ..Default::default()
        };
        let outputs = outputs(&options);
        assert_eq!(outputs.len(), 11);
        assert!(outputs.contains(&".dockerignore".to_string()));
        assert!(outputs.contains(&".pre-commit-config.yaml".to_string()));
        assert!(outputs.contains(&Path::new(".vscode").join("launch.json").display().to_string()));
    }

    #[test]
    fn test_to_context() {
        let mut options = ProjectOptions {
            database: Database::Mongodb,
            use_redis: true,
            ..Default::default()
        };
        options.extra.insert("redis_password".to_string(), serde_json::json!("secret"));
        options.extra.insert("use_redis".to_string(), serde_json::json!(false));
        let ctx = options.to_context();
        assert_eq!(ctx.get("database_type"), Some(&Value::from("document")));
        assert_eq!(ctx.get("redis_password"), Some(&Value::from("secret")));
        assert_eq!(ctx.get("use_redis"), Some(&Value::from(false)));
        assert!(!ProjectOptions::default().to_context().contains_key("database_type"));
    }

    #[test]
    fn test_options_deserialize_with_extra() {
        let options: ProjectOptions = serde_json::from_str(
            r#"{"project_name": "svc", "database": "postgresql", "app_port": 9000}"#,
        )
        .unwrap();
        assert_eq!(options.project_name, "svc");
        assert_eq!(options.database, Database::Postgresql);
        assert!(options.use_code_quality);
        assert_eq!(options.extra.get("app_port"), Some(&serde_json::json!(9000)));
    }
}
