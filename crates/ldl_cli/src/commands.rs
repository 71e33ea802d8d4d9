//! Subcommand implementations

use anyhow::{Context, Result};
use ldl_tokens::{
    detect_with_scores, format_issues, generate, merge_documents, parse, to_json, validate,
    GeneratorOptions, GeneratorResult, InputFormat, OutputFormat, ParseResult, RawInput,
    TokenDocument, ValidationResult,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failures that are about the tokens rather than the host
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{path}: {count} validation error(s)")]
    Invalid { path: String, count: usize },

    #[error("no output formats selected; pass --format or set output.formats in ldl.toml")]
    NoFormats,
}

/// Read and parse a token file, logging conversion warnings
pub fn read_document(path: &Path, hint: Option<InputFormat>) -> Result<ParseResult> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let result = parse(RawInput::Text(&text), hint)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    for warning in &result.warnings {
        warn!(file = %path.display(), "{warning}");
    }
    debug!(
        file = %path.display(),
        format = %result.format,
        tokens = result.document.token_count(),
        "read token document"
    );
    Ok(result)
}

/// `ldl detect`: the detected dialect, or every score with `json`
pub fn detect(path: &Path, as_json: bool) -> Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = RawInput::Text(&text)
        .to_value()
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let detection = detect_with_scores(&value);
    if !as_json {
        return Ok(detection.format.to_string());
    }
    let scores = &detection.scores;
    let report = json!({
        "format": detection.format,
        "scores": {
            "ldl": scores.ldl,
            "dtcg": scores.dtcg,
            "figma-variables": scores.figma_variables,
            "tokens-studio": scores.tokens_studio,
        }
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

/// `ldl validate`: the issue report and whether the document is valid
pub fn validate_report(result: &ValidationResult, as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    if result.issues.is_empty() {
        return Ok("no issues found".to_string());
    }
    Ok(format_issues(&result.issues))
}

/// Render every requested format
pub fn render_all(
    document: &TokenDocument,
    formats: &[OutputFormat],
    options: &GeneratorOptions,
) -> Result<Vec<GeneratorResult>> {
    if formats.is_empty() {
        return Err(CommandError::NoFormats.into());
    }
    formats
        .iter()
        .map(|format| {
            generate(document, *format, options).with_context(|| format!("Failed to generate {format}"))
        })
        .collect()
}

/// Refuse documents with error-level issues when asked to
pub fn check_document(path: &Path, document: &TokenDocument, fail_on_errors: bool) -> Result<()> {
    let result = validate(document);
    result.log_diagnostics();
    for warning in result.warnings() {
        warn!(file = %path.display(), "{warning}");
    }
    if fail_on_errors && result.has_errors() {
        return Err(CommandError::Invalid {
            path: path.display().to_string(),
            count: result.errors().count(),
        }
        .into());
    }
    Ok(())
}

/// Write generated files into `dir`, returning the written paths
pub fn write_outputs(dir: &Path, outputs: &[GeneratorResult]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    outputs
        .iter()
        .map(|output| {
            let path = dir.join(&output.filename);
            fs::write(&path, &output.code).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(file = %path.display(), language = %output.language, "wrote tokens");
            Ok(path)
        })
        .collect()
}

/// `ldl merge`: cascade the files in order and emit canonical JSON
pub fn merge_files(base: &Path, overlays: &[PathBuf], hint: Option<InputFormat>) -> Result<String> {
    let base = read_document(base, hint)?.document;
    let overlays = overlays
        .iter()
        .map(|path| read_document(path, hint).map(|result| result.document))
        .collect::<Result<Vec<_>>>()?;
    let merged = merge_documents(&base, &overlays);
    Ok(to_json(&merged)?)
}
