//! Validation report types for structured error reporting.
//!
//! This module provides rich, structured validation results that can be
//! displayed to users, written to files, or processed programmatically.

use serde::Serialize;
use std::fmt;

/// The result of validating a scene.
///
/// Contains all issues found during validation, categorized by severity.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if any issue carries the given code.
    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    pub message: String,

    /// Where in the scene tree the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Suspicious but usable data.
    Warning,
    /// Data that breaks an invariant of its coordinate space.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Scene issues
    /// The scene has zero or negative image dimensions.
    InvalidSceneDimensions,

    // Coordinate issues
    /// A point or rectangle has NaN or infinite components.
    NonFiniteCoordinate,
    /// A landmark lies outside the image.
    LandmarkOutOfBounds,
    /// A depth value lies outside its range (only checked on request).
    DepthOutOfBounds,
    /// An object's bounding extends outside the image.
    ObjectOutOfBounds,
    /// A bounding has left > right or top > bottom.
    InvalidRectOrdering,

    // Identity and score issues
    /// A score lies outside [0, 1].
    ScoreOutOfRange,
    /// Two siblings share a tracking id.
    DuplicateTrackingId,
    /// An entity has an empty type id.
    EmptyTypeId,
}

/// Where in the scene tree an issue occurred.
///
/// `path` is the chain of object indices from the scene root, e.g.
/// `objects[1].objects[0]`; an empty path is the scene itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "at", rename_all = "snake_case")]
pub enum IssueContext {
    Scene,
    Object { path: String },
    Landmark { path: String, index: usize },
    Param { path: String, index: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Scene => write!(f, "scene"),
            IssueContext::Object { path } => write!(f, "{}", path),
            IssueContext::Landmark { path, index } if path.is_empty() => {
                write!(f, "landmarks[{}]", index)
            }
            IssueContext::Landmark { path, index } => write!(f, "{}.landmarks[{}]", path, index),
            IssueContext::Param { path, index } if path.is_empty() => {
                write!(f, "params[{}]", index)
            }
            IssueContext::Param { path, index } => write!(f, "{}.params[{}]", path, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = ValidationReport::new();
        assert!(report.is_clean());

        report.add(ValidationIssue::warning(
            IssueCode::ScoreOutOfRange,
            "score 1.5",
            IssueContext::Landmark {
                path: String::new(),
                index: 0,
            },
        ));
        assert!(report.is_ok());
        assert!(!report.is_clean());

        report.add(ValidationIssue::error(
            IssueCode::ObjectOutOfBounds,
            "outside",
            IssueContext::Object {
                path: "objects[2]".into(),
            },
        ));
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has(IssueCode::ObjectOutOfBounds));
    }

    #[test]
    fn test_context_display() {
        let nested = IssueContext::Landmark {
            path: "objects[0].objects[1]".into(),
            index: 3,
        };
        assert_eq!(nested.to_string(), "objects[0].objects[1].landmarks[3]");
        assert_eq!(
            IssueContext::Param {
                path: String::new(),
                index: 1
            }
            .to_string(),
            "params[1]"
        );
        assert_eq!(IssueContext::Scene.to_string(), "scene");
    }

    #[test]
    fn test_display_lists_issues() {
        let mut report = ValidationReport::new();
        report.add(ValidationIssue::error(
            IssueCode::InvalidRectOrdering,
            "left > right",
            IssueContext::Object {
                path: "objects[0]".into(),
            },
        ));
        let text = report.to_string();
        assert!(text.contains("1 error(s)"));
        assert!(text.contains("[ERROR] InvalidRectOrdering in objects[0]: left > right"));
    }
}
