//! Detection validation.
//!
//! Annotation never fails because of a strange detection: inverted boxes are
//! skipped and out-of-range boxes are clipped. This module reports those
//! cases up front so a caller can tell a silent skip from a model bug.

mod report;

pub use report::{IssueCode, Severity, ValidationIssue, ValidationReport};

use crate::detection::Detection;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

impl ValidateOptions {
    /// Returns true if `report` passes under these options.
    pub fn accepts(&self, report: &ValidationReport) -> bool {
        if self.strict {
            report.is_clean()
        } else {
            report.is_ok()
        }
    }
}

/// Validates detections and returns a report of all issues found.
pub fn validate_detections(detections: &[Detection], _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (index, detection) in detections.iter().enumerate() {
        validate_label(detection, index, &mut report);
        validate_confidence(detection, index, &mut report);
        validate_bbox(detection, index, &mut report);
    }

    report
}

fn validate_label(detection: &Detection, index: usize, report: &mut ValidationReport) {
    if detection.label.trim().is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyLabel,
            "Empty label",
            index,
        ));
    }
}

fn validate_confidence(detection: &Detection, index: usize, report: &mut ValidationReport) {
    let confidence = detection.confidence;

    if !confidence.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::ConfidenceNotFinite,
            format!("Non-finite confidence {}", confidence),
            index,
        ));
    } else if !(0.0..=1.0).contains(&confidence) {
        report.add(ValidationIssue::warning(
            IssueCode::ConfidenceOutOfRange,
            format!("Confidence {} outside [0, 1]", confidence),
            index,
        ));
    }
}

fn validate_bbox(detection: &Detection, index: usize, report: &mut ValidationReport) {
    let bbox = &detection.bbox;

    if !bbox.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::BBoxNotFinite,
            format!(
                "Non-finite coordinates ({}, {}, {}, {})",
                bbox.y1, bbox.x1, bbox.y2, bbox.x2
            ),
            index,
        ));
        return; // Skip further bbox checks if coordinates are invalid
    }

    if !bbox.is_ordered() {
        report.add(ValidationIssue::warning(
            IssueCode::InvalidBBoxOrdering,
            format!(
                "Inverted box: top-left ({}, {}) should be <= bottom-right ({}, {}); it will not be drawn",
                bbox.y1, bbox.x1, bbox.y2, bbox.x2
            ),
            index,
        ));
    }

    if !bbox.is_within_unit_range() {
        report.add(ValidationIssue::warning(
            IssueCode::BBoxOutOfRange,
            format!(
                "Box ({:.3}, {:.3}, {:.3}, {:.3}) extends outside [0, 1]; it will be clipped",
                bbox.y1, bbox.x1, bbox.y2, bbox.x2
            ),
            index,
        ));
    }
}
