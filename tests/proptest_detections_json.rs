use boxlabel::detection::io_json::{from_json_str, from_json_value, to_json_string};
use boxlabel::detection::Detection;
use proptest::prelude::*;
use serde_json::{Map, Value};

mod proptest_helpers;

/// Renders detections the way the upstream converter does.
fn to_tuple_form(detections: &[Detection]) -> Value {
    let records = detections
        .iter()
        .map(|d| {
            let mut record = Map::new();
            record.insert(d.label.clone(), Value::from(d.confidence));
            record.insert("y1".into(), Value::from(d.bbox.y1));
            record.insert("x1".into(), Value::from(d.bbox.x1));
            record.insert("y2".into(), Value::from(d.bbox.y2));
            record.insert("x2".into(), Value::from(d.bbox.x2));
            Value::Object(record)
        })
        .collect();

    let mut root = Map::new();
    root.insert("labels".into(), Value::Array(records));
    Value::Object(root)
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn typed_json_roundtrip_is_lossless(detections in proptest_helpers::arb_detections(8)) {
        let json = to_json_string(&detections).expect("serialize detections");
        let restored = from_json_str(&json).expect("parse detections");

        prop_assert_eq!(detections, restored);
    }

    #[test]
    fn tuple_form_matches_typed_form(detections in proptest_helpers::arb_detections(8)) {
        let from_tuple = from_json_value(to_tuple_form(&detections)).expect("parse tuple form");

        prop_assert_eq!(detections, from_tuple);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = boxlabel::detection::io_json::from_json_slice(&bytes);
    }
}
