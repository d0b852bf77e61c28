//! The detection record produced by an object-detection model.

use serde::{Deserialize, Serialize};

use super::bbox::BBox;
use super::space::Normalized;

/// One predicted object instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Detection {
    /// Class name (e.g., "person", "cat").
    pub label: String,

    /// Model score, nominally in `[0, 1]`.
    pub confidence: f32,

    /// Box relative to the image height and width.
    pub bbox: BBox<Normalized>,
}

impl Detection {
    /// Creates a detection from a label, a score and a model-order box.
    pub fn new(label: impl Into<String>, confidence: f32, bbox: BBox<Normalized>) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }

    /// Confidence as a whole percentage, truncated toward zero.
    ///
    /// 0.8734 becomes 87, never 88.
    pub fn percent(&self) -> i32 {
        (100.0 * self.confidence) as i32
    }

    /// Caption text drawn above the box, e.g. `"cat: 95%"`.
    pub fn caption(&self) -> String {
        format!("{}: {}%", self.label, self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(confidence: f32) -> Detection {
        Detection::new("cat", confidence, BBox::from_yxyx(0.1, 0.2, 0.5, 0.6))
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(cat(0.8734).percent(), 87);
        assert_eq!(cat(0.999).percent(), 99);
        assert_eq!(cat(0.0).percent(), 0);
        assert_eq!(cat(1.0).percent(), 100);
    }

    #[test]
    fn test_percent_single_precision() {
        // 0.95f32 * 100 rounds to exactly 95.0 in f32; in f64 it would be 94.99...
        assert_eq!(cat(0.95).percent(), 95);
    }

    #[test]
    fn test_caption() {
        assert_eq!(cat(0.95).caption(), "cat: 95%");
        assert_eq!(cat(0.8734).caption(), "cat: 87%");
    }
}
