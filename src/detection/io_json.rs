//! JSON reading and writing for detection results.
//!
//! Two input shapes are accepted.
//!
//! # Tuple form
//!
//! What the upstream model-output converter emits: an object whose first
//! value is the list of detections. Each detection is an object of exactly
//! five numbers. The first key is the label and its value the confidence;
//! the remaining four values are read positionally as y1, x1, y2, x2 (their
//! keys are ignored).
//!
//! ```json
//! {"labels": [{"cat": 0.95, "y1": 0.1, "x1": 0.2, "y2": 0.5, "x2": 0.6}]}
//! ```
//!
//! # Typed form
//!
//! An array of [`Detection`] records, which is also what the writers emit.
//!
//! ```json
//! [{"label": "cat", "confidence": 0.95,
//!   "bbox": {"y1": 0.1, "x1": 0.2, "y2": 0.5, "x2": 0.6}}]
//! ```
//!
//! Entry order matters for the tuple form, so this relies on `serde_json`'s
//! `preserve_order` feature.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde_json::{Map, Value};

use super::bbox::BBox;
use super::model::Detection;
use crate::error::BoxlabelError;

const TUPLE_ARITY: usize = 5;

/// Reads detections from a JSON file in either tuple or typed form.
///
/// # Errors
/// Returns an error if the file cannot be read, is not JSON, or does not
/// have one of the expected shapes.
pub fn read_detections_json(path: &Path) -> Result<Vec<Detection>, BoxlabelError> {
    let bytes = std::fs::read(path).map_err(BoxlabelError::Io)?;
    parse(&bytes, path)
}

/// Writes detections to a JSON file in typed form.
pub fn write_detections_json(path: &Path, detections: &[Detection]) -> Result<(), BoxlabelError> {
    let file = File::create(path).map_err(BoxlabelError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, detections).map_err(|source| {
        BoxlabelError::DetectionJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads detections from a JSON string.
pub fn from_json_str(json: &str) -> Result<Vec<Detection>, BoxlabelError> {
    from_json_slice(json.as_bytes())
}

/// Reads detections from JSON bytes.
///
/// Useful for fuzzing and for payloads that arrive as raw bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<Vec<Detection>, BoxlabelError> {
    parse(bytes, Path::new("<bytes>"))
}

/// Writes detections to a typed-form JSON string.
pub fn to_json_string(detections: &[Detection]) -> Result<String, BoxlabelError> {
    serde_json::to_string(detections).map_err(|source| BoxlabelError::DetectionJsonWrite {
        path: Path::new("<string>").to_path_buf(),
        source,
    })
}

/// Converts an already-parsed JSON value into detections.
pub fn from_json_value(value: Value) -> Result<Vec<Detection>, BoxlabelError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| BoxlabelError::MalformedDetection {
                    index,
                    message: e.to_string(),
                })
            })
            .collect(),
        Value::Object(map) => from_tuple_form(map),
        other => Err(BoxlabelError::MalformedResult(format!(
            "expected an array of detections or a tuple-form object, found {}",
            json_type_name(&other)
        ))),
    }
}

fn parse(bytes: &[u8], path: &Path) -> Result<Vec<Detection>, BoxlabelError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|source| BoxlabelError::DetectionJsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    from_json_value(value)
}

fn from_tuple_form(map: Map<String, Value>) -> Result<Vec<Detection>, BoxlabelError> {
    let (_, first) = map.into_iter().next().ok_or_else(|| {
        BoxlabelError::MalformedResult("tuple-form result has no entries".to_string())
    })?;

    let Value::Array(records) = first else {
        return Err(BoxlabelError::MalformedResult(format!(
            "first value of a tuple-form result must be an array, found {}",
            json_type_name(&first)
        )));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| tuple_record(index, record))
        .collect()
}

fn tuple_record(index: usize, record: Value) -> Result<Detection, BoxlabelError> {
    let malformed = |message: String| BoxlabelError::MalformedDetection { index, message };

    let Value::Object(fields) = record else {
        return Err(malformed(format!(
            "expected an object, found {}",
            json_type_name(&record)
        )));
    };

    if fields.len() != TUPLE_ARITY {
        return Err(malformed(format!(
            "expected {} entries (label: confidence, y1, x1, y2, x2), found {}",
            TUPLE_ARITY,
            fields.len()
        )));
    }

    let mut entries = fields.into_iter();
    let mut values = [0.0f32; TUPLE_ARITY];
    let mut label = String::new();

    for (position, slot) in values.iter_mut().enumerate() {
        // Arity was checked above.
        let Some((key, value)) = entries.next() else {
            break;
        };
        let number = value.as_f64().ok_or_else(|| {
            malformed(format!(
                "entry {} ('{}') must be a number, found {}",
                position,
                key,
                json_type_name(&value)
            ))
        })?;
        *slot = number as f32;
        if position == 0 {
            label = key;
        }
    }

    let [confidence, y1, x1, y2, x2] = values;
    Ok(Detection::new(label, confidence, BBox::from_yxyx(y1, x1, y2, x2)))
}

/// Fuzz-only entrypoint for parsing a single tuple-form record.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_tuple_record(input: &[u8]) -> Result<(), BoxlabelError> {
    let value: Value =
        serde_json::from_slice(input).map_err(|source| BoxlabelError::DetectionJsonParse {
            path: Path::new("<fuzz>").to_path_buf(),
            source,
        })?;
    let _ = tuple_record(0, value)?;
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
