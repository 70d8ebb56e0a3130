//! scoffy's main application entry point.
//! Handles command-line argument parsing, logging setup and exit codes.

use scoffy::{
    cli::{get_args, Args},
    config::{load_config, parse_options, CONFIG_FILES},
    error::{default_error_handler, Error, Result},
    generator::{ensure_output_dir, Generator, ProjectOptions},
    loader::TemplateSource,
    renderer::Environment,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Trace } else { log::LevelFilter::Warn })
        .init();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => default_error_handler(err),
    }
}

/// Reads the options file named on the command line, or the first one
/// found in the working directory.
fn load_options(args: &Args) -> Result<ProjectOptions> {
    let content = match &args.config {
        Some(path) => {
            log::debug!("Loading options from {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => match load_config(".", &CONFIG_FILES) {
            Ok(content) => content,
            Err(Error::ConfigError(_)) => String::new(),
            Err(e) => return Err(e),
        },
    };
    let mut options = parse_options(&content)?;
    args.apply(&mut options);
    Ok(options)
}

/// Main application logic. Returns whether every file was generated.
fn run(args: Args) -> Result<bool> {
    let env = Environment::from_source(TemplateSource::from_option(args.templates.clone()))?;

    if args.list {
        for name in env.loader().list()? {
            println!("{name}");
        }
        return Ok(true);
    }

    let options = load_options(&args)?;
    let output_dir = args
        .output_dir
        .as_ref()
        .ok_or_else(|| Error::ConfigError("missing OUTPUT_DIR".to_string()))?;
    let output_root = ensure_output_dir(output_dir, args.force)?;

    let report = Generator::new(&env, &output_root).generate(&options);
    for path in &report.written {
        println!("Generated: '{}'", path.display());
    }
    if report.is_success() {
        println!("Project files generated successfully in {}.", output_root.display());
    } else {
        eprintln!(
            "{} of {} files failed to generate.",
            report.failed.len(),
            report.failed.len() + report.written.len()
        );
    }
    Ok(report.is_success())
}
