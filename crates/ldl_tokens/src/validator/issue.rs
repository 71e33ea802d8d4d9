//! Validation issue types

use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::debug;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Semantically invalid; the document should not be shipped
    Error,
    /// Likely a mistake, but output can still be generated
    Warning,
    /// Informational only
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Machine-readable issue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    DuplicateName,
    ReservedName,
    InvalidName,
    UnknownGroup,
    UnresolvedReference,
    CircularReference,
    ModeNewKey,
    RedundantOverride,
    MissingUnit,
    UnknownUnit,
    EmptyValue,
    InvalidColor,
    AliasLiteral,
    NameCollision,
    UnsupportedVersion,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateName => "duplicate-name",
            Self::ReservedName => "reserved-name",
            Self::InvalidName => "invalid-name",
            Self::UnknownGroup => "unknown-group",
            Self::UnresolvedReference => "unresolved-reference",
            Self::CircularReference => "circular-reference",
            Self::ModeNewKey => "mode-new-key",
            Self::RedundantOverride => "redundant-override",
            Self::MissingUnit => "missing-unit",
            Self::UnknownUnit => "unknown-unit",
            Self::EmptyValue => "empty-value",
            Self::InvalidColor => "invalid-color",
            Self::AliasLiteral => "alias-literal",
            Self::NameCollision => "name-collision",
            Self::UnsupportedVersion => "unsupported-version",
        }
    }

    /// Severity every issue with this code is reported at
    pub fn severity(self) -> Severity {
        match self {
            Self::DuplicateName
            | Self::ReservedName
            | Self::InvalidName
            | Self::UnresolvedReference
            | Self::CircularReference
            | Self::EmptyValue
            | Self::AliasLiteral => Severity::Error,
            Self::RedundantOverride => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding, located by a dotted path into the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// `colors.primary.foreground`, `modes.dark.spacing.4`, ...
    pub path: String,
    pub message: String,
    pub code: IssueCode,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            path: path.into(),
            message: message.into(),
            code,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.path, self.message
        )
    }
}

/// Outcome of validating a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// `true` when no issue is an error
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: !issues.iter().any(ValidationIssue::is_error),
            issues,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    /// Get only the errors
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Get only the warnings
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Emit every issue as a `debug` event
    pub fn log_diagnostics(&self) {
        for issue in &self.issues {
            match issue.severity {
                Severity::Error => debug!(
                    severity = "error",
                    code = %issue.code,
                    path = %issue.path,
                    message = %issue.message,
                    "token validation error"
                ),
                Severity::Warning => debug!(
                    severity = "warning",
                    code = %issue.code,
                    path = %issue.path,
                    message = %issue.message,
                    "token validation warning"
                ),
                Severity::Info => debug!(
                    severity = "info",
                    code = %issue.code,
                    path = %issue.path,
                    "token validation info"
                ),
            }
        }
    }
}

/// Render issues one per line, in order
pub fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn codes_carry_fixed_severities() {
        assert_eq!(IssueCode::DuplicateName.severity(), Severity::Error);
        assert_eq!(IssueCode::UnknownGroup.severity(), Severity::Warning);
        assert_eq!(IssueCode::RedundantOverride.severity(), Severity::Info);
        assert_eq!(
            serde_json::to_value(IssueCode::UnresolvedReference).unwrap(),
            serde_json::json!("unresolved-reference")
        );
    }

    #[test]
    fn formats_issue_lines() {
        let issues = vec![
            ValidationIssue::new(IssueCode::DuplicateName, "colors.primary", "defined twice"),
            ValidationIssue::new(IssueCode::MissingUnit, "spacing.4", "`16` has no unit"),
        ];
        assert_eq!(
            format_issues(&issues),
            "error[duplicate-name] colors.primary: defined twice\n\
             warning[missing-unit] spacing.4: `16` has no unit"
        );
        let result = ValidationResult::from_issues(issues);
        assert!(!result.valid);
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.warnings().count(), 1);
        assert!(result.has_errors());
        assert!(result.has_warnings());
        assert!(format_issues(&[]).is_empty());

        let info_only = ValidationResult::from_issues(vec![ValidationIssue::new(
            IssueCode::RedundantOverride,
            "modes.dark.colors.primary",
            "same as base",
        )]);
        assert!(info_only.valid);
        assert!(!info_only.has_errors());
        assert!(!info_only.has_warnings());
    }
}
