//! Command-line interface for scoffy.
//! Provides argument parsing and help text formatting using clap.

use crate::config::parse_assignment;
use crate::generator::{Database, ProjectOptions};
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for scoffy.
#[derive(Parser, Debug)]
#[command(author, version, about = "scoffy: project configuration scaffolding", long_about = None)]
pub struct Args {
    /// Directory where the project files are generated
    #[arg(value_name = "OUTPUT_DIR", required_unless_present = "list")]
    pub output_dir: Option<PathBuf>,

    /// Directory with custom templates (built-in templates otherwise)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Options file (scoffy.json, scoffy.yml or scoffy.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub project_name: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long, value_enum)]
    pub database: Option<Database>,

    /// Generate Dockerfile, docker-compose.yml and .dockerignore
    #[arg(long)]
    pub docker: bool,

    /// Add a Redis service and its ignores
    #[arg(long)]
    pub redis: bool,

    /// Generate .pre-commit-config.yaml
    #[arg(long)]
    pub git_hooks: bool,

    /// Generate the .vscode directory
    #[arg(long)]
    pub vscode: bool,

    /// Skip mypy.ini, pytest.ini and ruff.toml
    #[arg(long)]
    pub no_code_quality: bool,

    /// Set any template variable; VALUE is read as JSON when possible
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, serde_json::Value)>,

    /// Overwrite an existing output directory
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// List available templates and exit
    #[arg(long)]
    pub list: bool,
}

impl Args {
    /// Applies the command-line options on top of `options`.
    pub fn apply(&self, options: &mut ProjectOptions) {
        if let Some(name) = &self.project_name {
            options.project_name = name.clone();
        }
        if let Some(language) = &self.language {
            options.language = language.clone();
        }
        if let Some(database) = self.database {
            options.database = database;
        }
        options.use_docker |= self.docker;
        options.use_redis |= self.redis;
        options.use_git_hooks |= self.git_hooks;
        options.use_vscode |= self.vscode;
        if self.no_code_quality {
            options.use_code_quality = false;
        }
        for (key, value) in &self.set {
            options.extra.insert(key.clone(), value.clone());
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
