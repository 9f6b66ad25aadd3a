//! Validation issues and reports.

use serde::Serialize;
use std::fmt;

/// A single field that failed its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, e.g. `rss.channel.item[3].pubDate`
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered collection of issues found while validating a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn first(&self) -> Option<&ValidationIssue> {
        self.issues.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter()
    }
}

/// The export failed validation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", summarize(.report))]
pub struct ValidationError {
    pub report: ValidationReport,
}

impl ValidationError {
    pub fn new(report: ValidationReport) -> Self {
        Self { report }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.report.issues
    }
}

fn summarize(report: &ValidationReport) -> String {
    match report.first() {
        Some(first) if report.len() == 1 => format!("validation failed: {}", first),
        Some(first) => format!(
            "validation failed with {} issues; first: {}",
            report.len(),
            first
        ),
        None => "validation failed".to_string(),
    }
}

/// Child path for an object key.
pub fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Child path for an array index.
pub fn indexed(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}
