//! Coordinate space markers.
//!
//! Zero-sized types used as the `TSpace` parameter of [`BBox`](super::BBox),
//! so a box straight out of the model can't be drawn without first being
//! scaled to the image it belongs to.

use std::fmt;

/// Absolute image coordinates, with (0, 0) at the top-left pixel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Fractions (0.0 to 1.0) of the image height and width, as emitted by
/// detection models.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
