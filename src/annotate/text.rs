//! Caption font metrics and text drawing.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::error::BoxlabelError;

/// DejaVu Sans, shipped with the crate so captions render identically on
/// every host.
const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Pixel height (ascent minus descent) captions are rendered at.
pub const CAPTION_PX_HEIGHT: f32 = 14.0;

/// Rendered extent of a caption, in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextMetrics {
    /// Advance width of the text, truncated.
    pub width: i32,
    /// Line height (ascent - descent + line gap), rounded up.
    pub height: i32,
    /// Distance from the top of the line to the baseline, rounded up.
    pub ascent: i32,
}

/// A parsed font at a fixed caption scale.
#[derive(Clone, Debug)]
pub struct CaptionFont<'f> {
    font: FontRef<'f>,
    scale: PxScale,
}

impl CaptionFont<'static> {
    /// Loads the embedded caption font.
    pub fn embedded() -> Result<Self, BoxlabelError> {
        Self::from_bytes(EMBEDDED_FONT, CAPTION_PX_HEIGHT)
    }
}

impl<'f> CaptionFont<'f> {
    /// Parses TrueType/OpenType font data.
    pub fn from_bytes(data: &'f [u8], px_height: f32) -> Result<Self, BoxlabelError> {
        let font = FontRef::try_from_slice(data).map_err(|e| BoxlabelError::FontLoad(e.to_string()))?;
        Ok(Self {
            font,
            scale: PxScale::from(px_height),
        })
    }

    /// Measures `text` as it would be drawn by [`draw`](Self::draw).
    pub fn measure(&self, text: &str) -> TextMetrics {
        let scaled = self.font.as_scaled(self.scale);
        let (width, _) = text_size(self.scale, &self.font, text);

        TextMetrics {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: (scaled.height() + scaled.line_gap()).ceil() as i32,
            ascent: scaled.ascent().ceil() as i32,
        }
    }

    /// Draws `text` with the top of its line at `(x, top)`; the baseline
    /// falls one ascent below `top`.
    pub fn draw(&self, image: &mut RgbImage, x: i32, top: i32, text: &str, color: Rgb<u8>) {
        draw_text_mut(image, color, x, top, self.scale, &self.font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_font_loads() {
        assert!(CaptionFont::embedded().is_ok());
    }

    #[test]
    fn test_invalid_font_data() {
        let err = CaptionFont::from_bytes(b"not a font", CAPTION_PX_HEIGHT).unwrap_err();
        assert!(matches!(err, BoxlabelError::FontLoad(_)));
    }

    #[test]
    fn test_measure_grows_with_text() {
        let font = CaptionFont::embedded().unwrap();
        let short = font.measure("cat: 9%");
        let long = font.measure("cat: 95%");

        assert!(long.width > short.width);
        assert_eq!(long.height, short.height);
        assert!(short.ascent > 0 && short.ascent <= short.height);
    }

    #[test]
    fn test_measure_matches_imageproc_width() {
        let font = CaptionFont::embedded().unwrap();
        let (width, _) = text_size(font.scale, &font.font, "dog: 87%");
        assert_eq!(font.measure("dog: 87%").width, width as i32);
        assert_eq!(font.measure("").width, 0);
    }

    #[test]
    fn test_draw_stays_below_top() {
        let font = CaptionFont::embedded().unwrap();
        let mut image = RgbImage::from_pixel(60, 30, Rgb([255, 255, 255]));
        font.draw(&mut image, 2, 5, "Hi", Rgb([0, 0, 0]));

        let dark = image.pixels().filter(|p| p.0[0] < 128).count();
        assert!(dark > 0);
        // Capitals sit between the line top and the baseline.
        let baseline = 5 + font.measure("Hi").ascent as u32;
        assert!((0..5).all(|y| (0..60).all(|x| image.get_pixel(x, y).0[0] > 128)));
        assert!((baseline + 1..30).all(|y| (0..60).all(|x| image.get_pixel(x, y).0[0] > 128)));
    }

    #[test]
    fn test_draw_clips_outside_image() {
        let font = CaptionFont::embedded().unwrap();
        let mut image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        font.draw(&mut image, -50, -5, "clipped caption", Rgb([0, 0, 0]));
        font.draw(&mut image, 8, 40, "clipped caption", Rgb([0, 0, 0]));
    }
}
