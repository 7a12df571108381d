use crate::{BannerError, Px};
use ab_glyph::{Font as _, FontArc, GlyphId, PxScale, ScaleFont as _};
use std::path::Path;

/// The text-measurement capability the layout engine works against. The
/// searches in [`crate::layout`] and the compositor only ever ask a face two
/// questions, so they take any implementor rather than a concrete [`Font`].
pub trait Measure {
    /// The pixel width of `text` set at `size`
    fn text_width(&self, size: u32, text: &str) -> Px;

    /// The vertical extent of a single line at `size`: ascent plus descent,
    /// uniform for every line of a wrapped block
    fn line_height(&self, size: u32) -> Px;
}

/// A parsed font face. Fonts can be TTF or OTF fonts; one face serves every
/// pixel size, both for measurement and for rasterisation, so the widths the
/// layout engine measures are exactly the widths the canvas draws.
#[derive(Debug, Clone)]
pub struct Font {
    pub face: FontArc,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not
    /// be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, BannerError> {
        let face = FontArc::try_from_vec(bytes)?;

        Ok(Font { face })
    }

    /// Load a font from a file on disk
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, BannerError> {
        Self::load(std::fs::read(path)?)
    }

    /// Calculate the ascent (distance from the baseline to the top of the
    /// font) for the given pixel size
    pub fn ascent(&self, size: u32) -> f32 {
        self.face.as_scaled(PxScale::from(size as f32)).ascent()
    }

    /// Calculate the descent (distance from the baseline to the bottom of the
    /// font) for the given pixel size. Note: this is usually negative
    pub fn descent(&self, size: u32) -> f32 {
        self.face.as_scaled(PxScale::from(size as f32)).descent()
    }

    /// Resolve a character to a glyph id, falling back to the replacement
    /// character and then to a question mark for glyphs the face is missing
    pub fn glyph_id(&self, ch: char) -> GlyphId {
        let id = self.face.glyph_id(ch);
        if id.0 != 0 {
            return id;
        }

        let replacement = self.face.glyph_id('\u{FFFD}');
        if replacement.0 != 0 {
            return replacement;
        }

        self.face.glyph_id('?')
    }
}

impl Measure for Font {
    fn text_width(&self, size: u32, text: &str) -> Px {
        let scaled = self.face.as_scaled(PxScale::from(size as f32));
        let width: f32 = text
            .chars()
            .map(|ch| scaled.h_advance(self.glyph_id(ch)))
            .sum();
        Px(width.ceil() as i32)
    }

    fn line_height(&self, size: u32) -> Px {
        let scaled = self.face.as_scaled(PxScale::from(size as f32));
        Px((scaled.ascent() - scaled.descent()).ceil() as i32)
    }
}

/// A face with synthetic, perfectly regular metrics: every glyph advances
/// `size / den` pixels and a line is a fifth taller than its size. Keeps
/// layout tests deterministic without shipping a font binary.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FixedFace {
    pub den: i32,
}

#[cfg(test)]
impl Measure for FixedFace {
    fn text_width(&self, size: u32, text: &str) -> Px {
        Px(text.chars().count() as i32 * size as i32 / self.den)
    }

    fn line_height(&self, size: u32) -> Px {
        Px(size as i32 * 6 / 5)
    }
}
