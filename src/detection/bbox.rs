//! Bounding boxes in model (y1, x1, y2, x2) order.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::{Normalized, Pixel};

/// An axis-aligned bounding box stored in the order detection models emit it:
/// top, left, bottom, right.
///
/// Values are `f32` because the annotation arithmetic is single precision;
/// doing it in `f64` changes which integer some products truncate to.
///
/// The constructor does not enforce `y1 <= y2` or `x1 <= x2`. Inverted boxes
/// can be represented so [`validation`](crate::validation) can report them
/// and the annotator can skip them.
#[derive(Clone, Copy, PartialEq)]
pub struct BBox<TSpace> {
    pub y1: f32,
    pub x1: f32,
    pub y2: f32,
    pub x2: f32,
    _space: PhantomData<TSpace>,
}

impl<TSpace> BBox<TSpace> {
    /// Creates a box from model-order coordinates.
    #[inline]
    pub fn from_yxyx(y1: f32, x1: f32, y2: f32, x2: f32) -> Self {
        Self {
            y1,
            x1,
            y2,
            x2,
            _space: PhantomData,
        }
    }

    /// Returns the width. Negative if the box is inverted.
    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the height. Negative if the box is inverted.
    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.y1.is_finite() && self.x1.is_finite() && self.y2.is_finite() && self.x2.is_finite()
    }

    /// Returns true if top <= bottom and left <= right.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.y1 <= self.y2 && self.x1 <= self.x2
    }
}

impl<TSpace> std::fmt::Debug for BBox<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBox")
            .field("y1", &self.y1)
            .field("x1", &self.x1)
            .field("y2", &self.y2)
            .field("x2", &self.x2)
            .finish()
    }
}

impl<TSpace> Default for BBox<TSpace> {
    fn default() -> Self {
        Self::from_yxyx(0.0, 0.0, 0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for BBox<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BBox", 4)?;
        state.serialize_field("y1", &self.y1)?;
        state.serialize_field("x1", &self.x1)?;
        state.serialize_field("y2", &self.y2)?;
        state.serialize_field("x2", &self.x2)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for BBox<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct BBoxData {
            y1: f32,
            x1: f32,
            y2: f32,
            x2: f32,
        }
        let data = BBoxData::deserialize(deserializer)?;
        Ok(BBox::from_yxyx(data.y1, data.x1, data.y2, data.x2))
    }
}

impl BBox<Normalized> {
    /// Scales to pixel coordinates of a `width` x `height` image.
    pub fn to_pixel(&self, width: u32, height: u32) -> BBox<Pixel> {
        let (w, h) = (width as f32, height as f32);
        BBox::from_yxyx(self.y1 * h, self.x1 * w, self.y2 * h, self.x2 * w)
    }

    /// Returns true if every coordinate lies in `[0, 1]`.
    pub fn is_within_unit_range(&self) -> bool {
        [self.y1, self.x1, self.y2, self.x2]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

impl BBox<Pixel> {
    /// Truncates toward zero into an integer rectangle.
    ///
    /// The corner is the truncated `(x1, y1)`; the extent is the truncated
    /// difference `x2 - x1` (not the difference of truncated edges), so a
    /// 39.8 px wide box is 39 px wide wherever it starts. Non-finite values
    /// saturate the way `as i32` does.
    pub fn to_rect(&self) -> PixelRect {
        PixelRect {
            x: self.x1 as i32,
            y: self.y1 as i32,
            width: (self.x2 - self.x1) as i32,
            height: (self.y2 - self.y1) as i32,
        }
    }
}

/// An integer rectangle anchored at its top-left corner.
///
/// `width` and `height` are signed: an inverted box produces a negative
/// extent, which drawing treats as empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns true if the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
