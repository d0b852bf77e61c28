//! Bounding-box annotation.
//!
//! Takes an encoded JPEG and a list of [`Detection`]s and returns a new JPEG
//! with each detection outlined and captioned:
//!
//! 1. scale the normalized box to pixels, truncating toward zero;
//! 2. outline it with a 2 px stroke in [`BOX_COLOR`];
//! 3. fill a caption background one ascent above the box's top edge;
//! 4. draw `"<label>: <percent>%"` in [`TEXT_COLOR`] on that background.
//!
//! Detections are drawn in input order, so later captions overlap earlier
//! ones. The input buffer is never modified.
//!
//! # Failure handling
//!
//! [`Annotator::annotate`] returns an [`AnnotationResult`] rather than a
//! `Result`, so the caller picks the policy: [`AnnotationResult::into_best_effort`]
//! logs and passes the original image through, [`AnnotationResult::into_strict`]
//! surfaces the error.
//!
//! # Example
//!
//! ```
//! use boxlabel::annotate::annotate;
//!
//! let not_a_jpeg = b"garbage";
//! // Nothing to draw: the input comes back untouched.
//! assert_eq!(&*annotate(not_a_jpeg, None).into_best_effort(), not_a_jpeg);
//! ```

mod codec;
mod layout;
mod shapes;
mod text;

use std::borrow::Cow;

use image::{Rgb, RgbImage};
use tracing::{debug, error};

use crate::detection::Detection;
use crate::error::BoxlabelError;

pub use codec::{decode_jpeg, encode_jpeg, JPEG_QUALITY};
pub use layout::DetectionLayout;
pub use shapes::{draw_frame, fill_rect};
pub use text::{CaptionFont, TextMetrics, CAPTION_PX_HEIGHT};

/// Caption text color.
pub const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Box outline and caption background color.
pub const BOX_COLOR: Rgb<u8> = Rgb([167, 252, 0]);

/// Box outline thickness in pixels.
pub const STROKE_WIDTH: i32 = 2;

/// Horizontal space between the caption background edge and the text.
pub const CAPTION_PADDING: i32 = 3;

/// What to do when an image can't be decoded or re-encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and forward the original bytes.
    #[default]
    BestEffort,
    /// Return the error to the caller.
    Strict,
}

/// Outcome of annotating one image.
#[derive(Debug)]
pub enum AnnotationResult<'a> {
    /// A freshly encoded image with the detections drawn on it.
    Annotated(Vec<u8>),
    /// There was nothing to draw; the input is returned as-is.
    Unchanged(&'a [u8]),
    /// Decoding or encoding failed.
    Failed {
        original: &'a [u8],
        reason: BoxlabelError,
    },
}

impl<'a> AnnotationResult<'a> {
    /// Returns true if a new image was produced.
    pub fn is_annotated(&self) -> bool {
        matches!(self, AnnotationResult::Annotated(_))
    }

    /// Returns the annotated bytes, or the original bytes if annotation was
    /// skipped or failed. Failures are logged at `error` level.
    pub fn into_best_effort(self) -> Cow<'a, [u8]> {
        match self {
            AnnotationResult::Annotated(bytes) => Cow::Owned(bytes),
            AnnotationResult::Unchanged(original) => Cow::Borrowed(original),
            AnnotationResult::Failed { original, reason } => {
                error!(error = %reason, "annotation failed; passing original image through");
                Cow::Borrowed(original)
            }
        }
    }

    /// Returns the output bytes, or the failure reason.
    pub fn into_strict(self) -> Result<Cow<'a, [u8]>, BoxlabelError> {
        match self {
            AnnotationResult::Annotated(bytes) => Ok(Cow::Owned(bytes)),
            AnnotationResult::Unchanged(original) => Ok(Cow::Borrowed(original)),
            AnnotationResult::Failed { reason, .. } => Err(reason),
        }
    }

    /// Applies `policy`: [`into_best_effort`](Self::into_best_effort) or
    /// [`into_strict`](Self::into_strict).
    pub fn resolve(self, policy: FailurePolicy) -> Result<Cow<'a, [u8]>, BoxlabelError> {
        match policy {
            FailurePolicy::BestEffort => Ok(self.into_best_effort()),
            FailurePolicy::Strict => self.into_strict(),
        }
    }
}

/// Draws detections onto images with a fixed style.
///
/// Holds only the parsed caption font, so one instance can be shared
/// between threads and reused for every image.
#[derive(Clone, Debug)]
pub struct Annotator<'f> {
    font: CaptionFont<'f>,
}

impl Annotator<'static> {
    /// Creates an annotator using the embedded caption font.
    pub fn new() -> Result<Self, BoxlabelError> {
        Ok(Self::with_font(CaptionFont::embedded()?))
    }
}

impl<'f> Annotator<'f> {
    pub fn with_font(font: CaptionFont<'f>) -> Self {
        Self { font }
    }

    /// Annotates an encoded JPEG.
    ///
    /// With no detections the input is returned without a decode/encode
    /// round trip.
    pub fn annotate<'a>(
        &self,
        image_bytes: &'a [u8],
        detections: Option<&[Detection]>,
    ) -> AnnotationResult<'a> {
        let detections = match detections {
            Some(detections) if !detections.is_empty() => detections,
            _ => return AnnotationResult::Unchanged(image_bytes),
        };

        match self.annotate_bytes(image_bytes, detections) {
            Ok(bytes) => AnnotationResult::Annotated(bytes),
            Err(reason) => AnnotationResult::Failed {
                original: image_bytes,
                reason,
            },
        }
    }

    /// Draws `detections` onto a decoded image in place and returns how many
    /// were drawn. Skipped detections (empty or non-finite boxes) are logged
    /// at `debug` level.
    pub fn draw(&self, image: &mut RgbImage, detections: &[Detection]) -> usize {
        let (width, height) = image.dimensions();
        let mut drawn = 0;

        for (index, detection) in detections.iter().enumerate() {
            let Some(layout) = self.layout(detection, width, height) else {
                debug!(index, label = %detection.label, bbox = ?detection.bbox, "skipping detection with empty box");
                continue;
            };
            draw_frame(image, layout.frame, STROKE_WIDTH, BOX_COLOR);
            // The caption never extends past its background.
            if fill_rect(image, layout.caption_background, BOX_COLOR) {
                let (x, top) = layout.caption_origin;
                self.font.draw(image, x, top, &layout.caption, TEXT_COLOR);
            }
            drawn += 1;
        }

        drawn
    }

    /// Computes where `detection` would be drawn on a `width` x `height`
    /// image, without drawing it.
    pub fn layout(&self, detection: &Detection, width: u32, height: u32) -> Option<DetectionLayout> {
        DetectionLayout::compute(detection, width, height, &self.font)
    }

    fn annotate_bytes(
        &self,
        image_bytes: &[u8],
        detections: &[Detection],
    ) -> Result<Vec<u8>, BoxlabelError> {
        let mut image = decode_jpeg(image_bytes)?;
        let drawn = self.draw(&mut image, detections);
        debug!(
            width = image.width(),
            height = image.height(),
            detections = detections.len(),
            drawn,
            "annotated image"
        );
        encode_jpeg(&image)
    }
}

/// Annotates an encoded JPEG with a one-off [`Annotator`].
///
/// Prefer keeping an [`Annotator`] around when processing many images.
pub fn annotate<'a>(image_bytes: &'a [u8], detections: Option<&[Detection]>) -> AnnotationResult<'a> {
    if detections.map_or(true, |d| d.is_empty()) {
        return AnnotationResult::Unchanged(image_bytes);
    }
    match Annotator::new() {
        Ok(annotator) => annotator.annotate(image_bytes, detections),
        Err(reason) => AnnotationResult::Failed {
            original: image_bytes,
            reason,
        },
    }
}
