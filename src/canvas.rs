use crate::{Colour, Font, Image, Px};
use ab_glyph::{Font as _, PxScale, ScaleFont as _};
use image::{Rgba, RgbaImage};

/// The drawing surface for one banner generation. A canvas starts as a copy
/// of the background and is mutated in place by successive drawing calls;
/// every operation clips against the canvas bounds, so placements that fall
/// partially outside simply lose the out-of-range pixels.
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(background: &Image) -> Canvas {
        Canvas {
            pixels: background.pixels().clone(),
        }
    }

    pub fn width(&self) -> Px {
        Px::from_u32(self.pixels.width())
    }

    pub fn height(&self) -> Px {
        Px::from_u32(self.pixels.height())
    }

    /// Draw a string with its top-left corner at `origin`. Glyph outlines are
    /// rasterised and coverage-blended over the existing pixels; the caret
    /// advances by the same metrics [`crate::Measure`] reports for the face.
    pub fn draw_text(&mut self, face: &Font, size: u32, origin: (Px, Px), colour: Colour, text: &str) {
        let scale = PxScale::from(size as f32);
        let scaled = face.face.as_scaled(scale);
        let colour = colour.to_rgba();

        let mut caret = origin.0 .0 as f32;
        let baseline = origin.1 .0 as f32 + scaled.ascent();

        for ch in text.chars() {
            let id = face.glyph_id(ch);
            let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
            caret += scaled.h_advance(id);

            if let Some(outlined) = face.face.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let pixels = &mut self.pixels;
                outlined.draw(|gx, gy, coverage| {
                    blend(
                        pixels,
                        bounds.min.x as i32 + gx as i32,
                        bounds.min.y as i32 + gy as i32,
                        colour,
                        coverage,
                    );
                });
            }
        }
    }

    /// Draw a straight segment between two points with a square pen of
    /// `stroke` pixels
    pub fn draw_line(&mut self, from: (Px, Px), to: (Px, Px), colour: Colour, stroke: Px) {
        let colour = colour.to_rgba();
        let (mut x, mut y) = (from.0 .0, from.1 .0);
        let (x_end, y_end) = (to.0 .0, to.1 .0);

        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let step_x = if x < x_end { 1 } else { -1 };
        let step_y = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x, y, colour, stroke);
            if x == x_end && y == y_end {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += step_x;
            }
            if doubled <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// Alpha-composite `image` onto the canvas with its top-left corner at
    /// `origin`, using the source's own alpha channel as the paste mask
    pub fn paste(&mut self, image: &Image, origin: (Px, Px)) {
        for (ox, oy, pixel) in image.pixels().enumerate_pixels() {
            let alpha = pixel.0[3];
            if alpha == 0 {
                continue;
            }
            blend(
                &mut self.pixels,
                origin.0 .0 + ox as i32,
                origin.1 .0 + oy as i32,
                *pixel,
                alpha as f32 / 255.0,
            );
        }
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    fn stamp(&mut self, x: i32, y: i32, colour: Rgba<u8>, stroke: Px) {
        let half = stroke.0 / 2;
        for oy in -half..(stroke.0 - half) {
            for ox in -half..(stroke.0 - half) {
                blend(&mut self.pixels, x + ox, y + oy, colour, 1.0);
            }
        }
    }
}

/// Blend a single source pixel over the destination at the given opacity,
/// skipping coordinates outside the buffer
fn blend(pixels: &mut RgbaImage, x: i32, y: i32, colour: Rgba<u8>, opacity: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= pixels.width() || y >= pixels.height() {
        return;
    }

    let opacity = opacity.clamp(0.0, 1.0);
    if opacity == 0.0 {
        return;
    }

    let inverse = 1.0 - opacity;
    let dst = pixels.get_pixel_mut(x, y);
    dst.0[0] = (colour.0[0] as f32 * opacity + dst.0[0] as f32 * inverse) as u8;
    dst.0[1] = (colour.0[1] as f32 * opacity + dst.0[1] as f32 * inverse) as u8;
    dst.0[2] = (colour.0[2] as f32 * opacity + dst.0[2] as f32 * inverse) as u8;
    dst.0[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;

    fn field(width: u32, height: u32) -> Image {
        Image::from_pixels(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])))
    }

    #[test]
    fn paste_respects_source_alpha() {
        let mut canvas = Canvas::new(&field(4, 4));
        let mut overlay = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        overlay.put_pixel(1, 1, Rgba([255, 0, 0, 0]));

        canvas.paste(&Image::from_pixels(overlay), (Px(0), Px(0)));
        let pixels = canvas.into_pixels();
        assert_eq!(pixels.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(pixels.get_pixel(1, 1), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn paste_clips_outside_the_canvas() {
        let mut canvas = Canvas::new(&field(4, 4));
        let overlay = RgbaImage::from_pixel(3, 3, Rgba([0, 255, 0, 255]));

        canvas.paste(&Image::from_pixels(overlay), (Px(-1), Px(3)));
        let pixels = canvas.into_pixels();
        assert_eq!(pixels.get_pixel(0, 3), &Rgba([0, 255, 0, 255]));
        assert_eq!(pixels.get_pixel(1, 3), &Rgba([0, 255, 0, 255]));
        assert_eq!(pixels.get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn lines_carry_their_stroke() {
        let mut canvas = Canvas::new(&field(8, 8));
        canvas.draw_line((Px(1), Px(4)), (Px(6), Px(4)), colours::WHITE, Px(3));

        let pixels = canvas.into_pixels();
        for x in 1..=6 {
            for y in 3..=5 {
                assert_eq!(pixels.get_pixel(x, y), &Rgba([255, 255, 255, 255]));
            }
        }
        assert_eq!(pixels.get_pixel(3, 1), &Rgba([0, 0, 0, 255]));
    }
}
