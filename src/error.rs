//! Error handling for the scoffy application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for scoffy operations.
///
/// Missing context variables are not errors; they render as empty strings.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested template name has no entry under the template root.
    #[error("Template '{name}' not found.")]
    TemplateNotFound { name: String },

    /// Malformed block nesting or expression syntax inside a template.
    #[error("Syntax error in template '{template}' at line {line}, column {column}: {message}.")]
    TemplateSyntax { template: String, line: usize, column: usize, message: String },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Options file or defaults sidecar could not be parsed
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },
}

/// Convenience type alias for Results with scoffy's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
