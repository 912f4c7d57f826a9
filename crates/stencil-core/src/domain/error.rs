// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports may carry them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid package name '{0}'")]
    InvalidPackageName(String),

    #[error("Invalid dependency group name '{0}'")]
    InvalidGroupName(String),

    #[error("Unknown manifest scheme '{0}'")]
    UnknownScheme(String),

    #[error("Unknown replace scope '{0}'")]
    UnknownScope(String),

    #[error("Unknown comparison operator '{0}'")]
    UnknownOperator(String),

    #[error("{format} manifest could not be decoded: {reason}")]
    MalformedManifest {
        format: &'static str,
        reason: String,
    },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPackageName(name) => vec![
                format!("'{}' is not a valid package name", name),
                "Names start and end with a letter or digit; '.', '_' and '-' may appear inside"
                    .into(),
            ],
            Self::UnknownScheme(_) => vec![
                "Supported manifest schemes:".into(),
                "  • pep621  - [project] dependencies + [dependency-groups]".into(),
                "  • poetry  - [tool.poetry.*dependencies] sections".into(),
            ],
            Self::UnknownScope(_) => vec![
                "Supported replace scopes:".into(),
                "  • section - only rewrite inside the matching dependency section".into(),
                "  • global  - rewrite every `name = value` line in the file".into(),
            ],
            Self::MalformedManifest { .. } => vec![
                "Fix the manifest syntax before syncing".into(),
                "Nothing was written; the target is unchanged".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
