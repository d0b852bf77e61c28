//! Box frames and caption backgrounds.
//!
//! Drawing is delegated to `imageproc`. Coordinates arrive as signed
//! [`PixelRect`]s that may hang off the image (or lie far outside it), so
//! they are clamped first: line drawing walks every point of a segment, and
//! `imageproc::rect::Rect` edge arithmetic is plain `i32`.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::detection::PixelRect;

/// Outlines `frame` with a `stroke`-pixel line centred on its edges.
///
/// The edges are the frame's `x`, `y`, `right()` and `bottom()`. A 2 px
/// stroke is two nested one-pixel rings: one through the far edges and the
/// row/column before the near edges, one just inside it. Empty frames draw
/// nothing.
pub fn draw_frame(image: &mut RgbImage, frame: PixelRect, stroke: i32, color: Rgb<u8>) {
    if frame.is_empty() || stroke <= 0 {
        return;
    }
    let half = i64::from(stroke / 2);
    let (left, top) = (i64::from(frame.x) - half, i64::from(frame.y) - half);
    let (right, bottom) = (
        left + i64::from(frame.width) + i64::from(stroke) - 1,
        top + i64::from(frame.height) + i64::from(stroke) - 1,
    );

    for inset in 0..i64::from(stroke) {
        let ring = (left + inset, top + inset, right - inset, bottom - inset);
        if ring.0 > ring.2 || ring.1 > ring.3 {
            break;
        }
        if let Some(rect) = ring_rect(image, ring) {
            draw_hollow_rect_mut(image, rect, color);
        }
    }
}

/// Fills `rect` with `color`, clipped to the image. Returns false if no
/// part of `rect` is visible.
pub fn fill_rect(image: &mut RgbImage, rect: PixelRect, color: Rgb<u8>) -> bool {
    let Some(visible) = clip_to_image(image, rect) else {
        return false;
    };
    draw_filled_rect_mut(image, visible, color);
    true
}

/// The part of `rect` that lies inside the image, if any.
fn clip_to_image(image: &RgbImage, rect: PixelRect) -> Option<Rect> {
    if rect.is_empty() {
        return None;
    }
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));
    let x0 = i64::from(rect.x).clamp(0, w);
    let y0 = i64::from(rect.y).clamp(0, h);
    let x1 = (i64::from(rect.x) + i64::from(rect.width)).clamp(0, w);
    let y1 = (i64::from(rect.y) + i64::from(rect.height)).clamp(0, h);

    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32))
}

/// Builds a one-pixel ring from inclusive edges. Edges beyond the image are
/// pulled in to the first row/column outside it, which keeps them invisible
/// and bounds the line length. Returns `None` if the ring can't touch the
/// image at all.
fn ring_rect(image: &RgbImage, (left, top, right, bottom): (i64, i64, i64, i64)) -> Option<Rect> {
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));
    if right < 0 || bottom < 0 || left >= w || top >= h {
        return None;
    }
    let (left, top) = (left.max(-1), top.max(-1));
    let (right, bottom) = (right.min(w), bottom.min(h));

    Some(Rect::at(left as i32, top as i32).of_size((right - left + 1) as u32, (bottom - top + 1) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const GREEN: Rgb<u8> = Rgb([167, 252, 0]);

    fn canvas(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, WHITE)
    }

    fn painted(image: &RgbImage) -> usize {
        image.pixels().filter(|p| **p == GREEN).count()
    }

    #[test]
    fn test_fill_rect_exact() {
        let mut image = canvas(10, 10);
        assert!(fill_rect(&mut image, PixelRect::new(2, 3, 4, 2), GREEN));
        assert_eq!(painted(&image), 8);
        assert_eq!(*image.get_pixel(2, 3), GREEN);
        assert_eq!(*image.get_pixel(5, 4), GREEN);
        assert_eq!(*image.get_pixel(6, 4), WHITE);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut image = canvas(10, 10);
        fill_rect(&mut image, PixelRect::new(-5, -5, 8, 8), GREEN);
        assert_eq!(painted(&image), 9);

        assert!(!fill_rect(&mut image, PixelRect::new(50, 50, 5, 5), GREEN));
        assert!(!fill_rect(&mut image, PixelRect::new(i32::MAX - 1, 0, i32::MAX, 5), GREEN));
        assert_eq!(painted(&image), 9);
    }

    #[test]
    fn test_clip_to_image() {
        let image = canvas(10, 8);
        let rect = clip_to_image(&image, PixelRect::new(-3, 6, 5, 10)).unwrap();
        assert_eq!((rect.left(), rect.top(), rect.width(), rect.height()), (0, 6, 2, 2));

        assert!(clip_to_image(&image, PixelRect::new(10, 0, 4, 4)).is_none());
        assert!(clip_to_image(&image, PixelRect::new(2, 2, 0, 4)).is_none());
    }

    #[test]
    fn test_frame_two_pixel_edges() {
        let mut image = canvas(20, 20);
        draw_frame(&mut image, PixelRect::new(5, 5, 10, 10), 2, GREEN);

        // Top edge covers rows 4 and 5, bottom edge rows 14 and 15.
        for y in [4, 5, 14, 15] {
            assert_eq!(*image.get_pixel(10, y), GREEN, "row {y}");
        }
        for x in [4, 5, 14, 15] {
            assert_eq!(*image.get_pixel(x, 10), GREEN, "column {x}");
        }
        assert_eq!(*image.get_pixel(10, 10), WHITE);
        assert_eq!(*image.get_pixel(10, 3), WHITE);
        assert_eq!(*image.get_pixel(10, 16), WHITE);
        // Two 12x12 and 10x10 rings.
        assert_eq!(painted(&image), 44 + 36);
    }

    #[test]
    fn test_frame_full_image() {
        let mut image = canvas(8, 6);
        draw_frame(&mut image, PixelRect::new(0, 0, 8, 6), 2, GREEN);
        for (x, y) in [(0, 0), (7, 0), (0, 5), (7, 5)] {
            assert_eq!(*image.get_pixel(x, y), GREEN, "corner ({x}, {y})");
        }
        assert_eq!(*image.get_pixel(3, 3), WHITE);
    }

    #[test]
    fn test_frame_far_outside_edges_are_not_drawn() {
        let mut image = canvas(10, 10);
        draw_frame(&mut image, PixelRect::new(-1_000_000, 4, i32::MAX, 3), 2, GREEN);

        // Only the top and bottom rows of the frame cross the image.
        for y in [3, 4, 6, 7] {
            assert!((0..10).all(|x| *image.get_pixel(x, y) == GREEN), "row {y}");
        }
        assert_eq!(*image.get_pixel(5, 5), WHITE);
        assert_eq!(painted(&image), 40);

        let mut image = canvas(10, 10);
        draw_frame(&mut image, PixelRect::new(100, 100, 5, 5), 2, GREEN);
        assert_eq!(painted(&image), 0);
    }

    #[test]
    fn test_frame_skips_empty() {
        let mut image = canvas(10, 10);
        draw_frame(&mut image, PixelRect::new(8, 8, -4, -4), 2, GREEN);
        draw_frame(&mut image, PixelRect::new(2, 2, 0, 5), 2, GREEN);
        assert_eq!(painted(&image), 0);
    }
}
