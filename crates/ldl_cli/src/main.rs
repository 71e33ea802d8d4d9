//! ldl - design token pipeline CLI
//!
//! Usage:
//!   ldl detect tokens.json
//!   ldl validate tokens.json
//!   ldl generate tokens.json --format css --format tailwind --out dist
//!   ldl merge base.json brand.json > merged.json

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ldl_tokens::{validate, InputFormat, OutputFormat};
use tracing_subscriber::EnvFilter;

use crate::config::LdlConfig;

#[derive(Parser)]
#[command(name = "ldl")]
#[command(about = "Detect, validate, generate and merge design tokens", version)]
struct Cli {
    /// Config file (defaults to ./ldl.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read inputs as this dialect instead of detecting it
    #[arg(long, global = true, value_parser = parse_input_format)]
    input_format: Option<InputFormat>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the detected input dialect
    Detect {
        file: PathBuf,
        /// Print every dialect score as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a token file; exits non-zero on errors
    Validate {
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate output files
    Generate {
        file: PathBuf,
        /// Output format, repeatable (defaults to output.formats)
        #[arg(short, long = "format")]
        formats: Vec<String>,
        /// Output directory (defaults to output.dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
        /// Generate even when validation reports errors
        #[arg(long)]
        force: bool,
    },

    /// Merge documents in order and print canonical JSON
    Merge {
        base: PathBuf,
        #[arg(required = true)]
        overlays: Vec<PathBuf>,
    },
}

fn parse_input_format(s: &str) -> Result<InputFormat, String> {
    s.parse()
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let config = LdlConfig::load(cli.config.as_deref(), &cwd)?;
    let hint = cli.input_format;

    match cli.command {
        Command::Detect { file, json } => {
            println!("{}", commands::detect(&file, json)?);
        }
        Command::Validate { file, json } => {
            let document = commands::read_document(&file, hint)?.document;
            let result = validate(&document);
            result.log_diagnostics();
            println!("{}", commands::validate_report(&result, json)?);
            if !result.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Generate {
            file,
            formats,
            out,
            stdout,
            force,
        } => {
            let document = commands::read_document(&file, hint)?.document;
            commands::check_document(&file, &document, config.output.fail_on_errors && !force)?;

            let formats = if formats.is_empty() {
                config.formats()?
            } else {
                formats
                    .iter()
                    .map(|name| name.parse::<OutputFormat>())
                    .collect::<Result<Vec<_>, _>>()?
            };
            let outputs = commands::render_all(&document, &formats, &config.generator)?;

            if stdout {
                for output in &outputs {
                    print!("{}", output.code);
                }
            } else {
                let dir = out.unwrap_or_else(|| config.output.dir.clone());
                for path in commands::write_outputs(&dir, &outputs)? {
                    println!("{}", path.display());
                }
            }
        }
        Command::Merge { base, overlays } => {
            print!("{}", commands::merge_files(&base, &overlays, hint)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::parse_from([
            "ldl",
            "--input-format",
            "figma",
            "generate",
            "tokens.json",
            "-f",
            "css",
            "--format",
            "ts",
        ]);
        assert_eq!(cli.input_format, Some(InputFormat::FigmaVariables));
        match cli.command {
            Command::Generate { formats, out, .. } => {
                assert_eq!(formats, vec!["css".to_string(), "ts".to_string()]);
                assert!(out.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn merge_needs_an_overlay() {
        assert!(Cli::try_parse_from(["ldl", "merge", "base.json"]).is_err());
    }
}
