//! Where each part of a detection overlay lands on the image.

use crate::detection::{Detection, PixelRect};

use super::text::{CaptionFont, TextMetrics};
use super::CAPTION_PADDING;

/// Pixel geometry for one detection, computed before anything is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectionLayout {
    /// The box outline, truncated to whole pixels.
    pub frame: PixelRect,
    /// Caption text, e.g. `"cat: 95%"`.
    pub caption: String,
    /// Top-left corner of the caption text. It sits one ascent above the
    /// frame's top edge so the text baseline lines up with the frame.
    pub caption_origin: (i32, i32),
    /// Filled area behind the caption, six pixels wider than the text.
    pub caption_background: PixelRect,
    /// Measured caption extent.
    pub metrics: TextMetrics,
}

impl DetectionLayout {
    /// Lays out `detection` on a `width` x `height` image.
    ///
    /// Returns `None` when the box has non-finite coordinates or truncates to
    /// zero or negative area; such detections are not drawn at all.
    pub fn compute(
        detection: &Detection,
        width: u32,
        height: u32,
        font: &CaptionFont<'_>,
    ) -> Option<Self> {
        if !detection.bbox.is_finite() {
            return None;
        }
        let frame = detection.bbox.to_pixel(width, height).to_rect();
        if frame.is_empty() {
            return None;
        }

        let caption = detection.caption();
        let metrics = font.measure(&caption);

        let caption_top = frame.y.saturating_sub(metrics.ascent);

        Some(Self {
            frame,
            caption_origin: (frame.x.saturating_add(CAPTION_PADDING), caption_top),
            caption_background: PixelRect::new(
                frame.x,
                caption_top,
                metrics.width.saturating_add(2 * CAPTION_PADDING),
                metrics.height,
            ),
            caption,
            metrics,
        })
    }
}
