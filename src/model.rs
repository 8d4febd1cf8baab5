// Core records: IssueRecord, Fragment, error types
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Issue category mapping on the audit report, scanned in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Errors,
    Warnings,
    Notices,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 3] = [Self::Errors, Self::Warnings, Self::Notices];

    pub fn key(self) -> &'static str {
        match self {
            Self::Errors => "errors",
            Self::Warnings => "warnings",
            Self::Notices => "notices",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueRecord {
    pub name: String,
    pub count: i64,
    pub severity: String,
    pub category: IssueCategory,
}

/// Result of a single analysis pass as it appears in the output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Fragment<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> Fragment<T> {
    pub fn from_result(pass: &str, result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(value) => Fragment::Ok(value),
            Err(e) => {
                warn!("Pass {} failed: {}", pass, e);
                Fragment::Failed { error: e.to_string() }
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("field `{field}` must be {expected}")]
    InvalidField { field: String, expected: &'static str },
    #[error("cannot describe an empty sample")]
    EmptySample,
    #[error("noise sampling failed: {0}")]
    Noise(String),
}

impl AnalysisError {
    pub fn invalid(field: impl Into<String>, expected: &'static str) -> Self {
        AnalysisError::InvalidField {
            field: field.into(),
            expected,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config `{path}`: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Failures that abort the whole invocation (exit code 1).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No input data provided")]
    MissingInput,
    #[error("{0}")]
    Usage(String),
    #[error("Invalid input JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to encode result: {0}")]
    Encode(serde_json::Error),
}
