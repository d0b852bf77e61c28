use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for boxlabel operations.
#[derive(Debug, Error)]
pub enum BoxlabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {source}")]
    Decode {
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode annotated image: {source}")]
    Encode {
        #[source]
        source: image::ImageError,
    },

    #[error("Malformed detection result: {0}")]
    MalformedResult(String),

    #[error("Malformed detection at index {index}: {message}")]
    MalformedDetection { index: usize, message: String },

    #[error("Failed to parse detections JSON from {path}: {source}")]
    DetectionJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write detections JSON to {path}: {source}")]
    DetectionJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load caption font: {0}")]
    FontLoad(String),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
