#![allow(dead_code)]

use std::fs;
use std::path::Path;

use boxlabel::annotate::encode_jpeg;
use image::{Rgb, RgbImage};

pub const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// A solid-gray JPEG of the given size.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_jpeg(&RgbImage::from_pixel(width, height, GRAY)).expect("encode test jpeg")
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, jpeg_bytes(width, height)).expect("write jpeg file");
}

/// Tuple-form detections, as emitted by the model-output converter.
pub const CAT_TUPLE_JSON: &str =
    r#"{"labels":[{"cat":0.95,"y1":0.1,"x1":0.2,"y2":0.5,"x2":0.6}]}"#;

/// BT.601 luma. Chroma is subsampled by the JPEG encoder, so thin colored
/// lines only survive a round trip reliably in the luma channel.
pub fn luma(pixel: Rgb<u8>) -> f32 {
    let [r, g, b] = pixel.0.map(f32::from);
    0.299 * r + 0.587 * g + 0.114 * b
}
