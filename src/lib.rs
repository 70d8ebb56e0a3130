//! scoffy renders project configuration files (Docker, Git, code quality
//! tools, VS Code) from parameterized templates.
//! It provides a small Jinja-style template engine, template loaders with
//! per-template defaults and a generator that writes the selected files.

/// Command-line interface module for the scoffy application
pub mod cli;

/// Options files (scoffy.json, scoffy.yml, scoffy.yaml)
pub mod config;

/// Render contexts and default merging
pub mod context;

/// Error types and handling for the scoffy application
pub mod error;

/// Project options, the generation plan and file output
pub mod generator;

/// Template loading from a directory or the built-in set
pub mod loader;

/// Template lexing, parsing and evaluation
pub mod renderer;

/// Values templates operate on
pub mod value;

pub use context::{Context, ContextBuilder};
pub use error::{Error, Result};
pub use renderer::{Environment, Template, TemplateRenderer};
pub use value::Value;
