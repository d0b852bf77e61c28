//! Fuzz target for annotating arbitrary image bytes.
//!
//! A fixed detection list is drawn onto whatever the fuzzer supplies as a
//! JPEG. Inputs that are not annotated must come back untouched.

#![no_main]

use boxlabel::annotate::{AnnotationResult, Annotator};
use boxlabel::detection::{BBox, Detection};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(annotator) = Annotator::new() else {
        return;
    };
    let detections = [
        Detection::new("cat", 0.95, BBox::from_yxyx(0.1, 0.2, 0.5, 0.6)),
        Detection::new("edge", 0.5, BBox::from_yxyx(-0.1, 0.9, 1.2, 1.0)),
    ];

    match annotator.annotate(data, Some(&detections)) {
        AnnotationResult::Unchanged(bytes) | AnnotationResult::Failed { original: bytes, .. } => {
            assert_eq!(bytes, data);
        }
        AnnotationResult::Annotated(_) => {}
    }
});
