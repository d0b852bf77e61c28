//! Validation report types for structured error reporting.

use std::fmt;

use serde::Serialize;

/// The result of validating a list of detections.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation, in detection order.
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
    pub code: IssueCode,
    pub message: String,
    /// Position of the offending detection in the input list.
    pub index: usize,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        index: usize,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            index,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, index: usize) -> Self {
        Self::new(Severity::Error, code, message, index)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, index: usize) -> Self {
        Self::new(Severity::Warning, code, message, index)
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
            "[{}] {:?} in detection {}: {}",
            severity, self.code, self.index, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// The detection will still be drawn, possibly clipped or skipped.
    Warning,
    /// The detection carries values that can't be drawn meaningfully.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    /// The label is empty, so the caption would read ": NN%".
    EmptyLabel,
    /// The confidence is NaN or infinite.
    ConfidenceNotFinite,
    /// The confidence lies outside `[0, 1]`.
    ConfidenceOutOfRange,
    /// A box coordinate is NaN or infinite.
    BBoxNotFinite,
    /// The box is inverted (y1 > y2 or x1 > x2) and will not be drawn.
    InvalidBBoxOrdering,
    /// A box coordinate lies outside `[0, 1]`; drawing clips it.
    BBoxOutOfRange,
}
