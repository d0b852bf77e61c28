#![allow(dead_code)]

use boxlabel::detection::{BBox, Detection, Normalized};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Keys the tuple form uses for box coordinates.
pub const COORD_KEYS: [&str; 4] = ["y1", "x1", "y2", "x2"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_label() -> BoxedStrategy<String> {
    "[a-z][a-z _-]{0,15}"
        .prop_filter("label must not collide with coordinate keys", |label| {
            !COORD_KEYS.contains(&label.as_str())
        })
        .boxed()
}

/// Boxes whose corners lie in [0, 1], in either order.
pub fn arb_unit_bbox() -> BoxedStrategy<BBox<Normalized>> {
    (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0)
        .prop_map(|(y1, x1, y2, x2)| BBox::from_yxyx(y1, x1, y2, x2))
        .boxed()
}

/// Well-formed boxes: ordered corners inside the unit square.
pub fn arb_ordered_unit_bbox() -> BoxedStrategy<BBox<Normalized>> {
    arb_unit_bbox()
        .prop_map(|b| {
            BBox::from_yxyx(b.y1.min(b.y2), b.x1.min(b.x2), b.y1.max(b.y2), b.x1.max(b.x2))
        })
        .boxed()
}

/// Any f32 coordinates, including NaN, infinities and huge magnitudes.
pub fn arb_wild_bbox() -> BoxedStrategy<BBox<Normalized>> {
    let coord = prop_oneof![
        4 => -2.0f32..3.0,
        1 => any::<f32>(),
    ];
    (coord.clone(), coord.clone(), coord.clone(), coord)
        .prop_map(|(y1, x1, y2, x2)| BBox::from_yxyx(y1, x1, y2, x2))
        .boxed()
}

pub fn arb_detection() -> BoxedStrategy<Detection> {
    (arb_label(), 0.0f32..=1.0, arb_unit_bbox())
        .prop_map(|(label, confidence, bbox)| Detection::new(label, confidence, bbox))
        .boxed()
}

pub fn arb_wild_detection() -> BoxedStrategy<Detection> {
    (arb_label(), any::<f32>(), arb_wild_bbox())
        .prop_map(|(label, confidence, bbox)| Detection::new(label, confidence, bbox))
        .boxed()
}

pub fn arb_detections(max: usize) -> BoxedStrategy<Vec<Detection>> {
    prop::collection::vec(arb_detection(), 0..=max).boxed()
}
