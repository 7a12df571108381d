use crate::{BannerError, Px};
use image::{imageops::FilterType, DynamicImage, RgbaImage};
use std::path::Path;

/// A raster asset, held in RGBA form so its alpha channel can double as the
/// paste mask during composition. Backgrounds, logo halves, and sub-images
/// are all `Image`s; opaque formats load with a fully opaque alpha channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: RgbaImage,
}

impl Image {
    /// Load an image from disk, guessing the format from its contents and
    /// converting to RGBA
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Image, BannerError> {
        let data = std::fs::read(path)?;
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;

        Ok(Self::from_raster(image))
    }

    /// Wrap an already-decoded raster, converting to RGBA
    pub fn from_raster(image: DynamicImage) -> Image {
        Image {
            pixels: image.to_rgba8(),
        }
    }

    /// Wrap an RGBA pixel buffer directly
    pub fn from_pixels(pixels: RgbaImage) -> Image {
        Image { pixels }
    }

    pub fn width(&self) -> Px {
        Px::from_u32(self.pixels.width())
    }

    pub fn height(&self) -> Px {
        Px::from_u32(self.pixels.height())
    }

    /// A copy scaled uniformly by `scale`, for shrinking logo parts and
    /// sub-images to banner proportions before configuration
    pub fn scaled(&self, scale: f32) -> Image {
        let width = ((self.pixels.width() as f32 * scale) as u32).max(1);
        let height = ((self.pixels.height() as f32 * scale) as u32).max(1);

        Image {
            pixels: image::imageops::resize(&self.pixels, width, height, FilterType::Lanczos3),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consume the wrapper, yielding the raw pixel buffer
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn scaling_truncates_to_whole_pixels() {
        let image = Image::from_pixels(RgbaImage::new(100, 50));
        let scaled = image.scaled(0.45);
        assert_eq!(scaled.width(), Px(45));
        assert_eq!(scaled.height(), Px(22));
    }

    #[test]
    fn scaling_never_collapses_to_zero() {
        let image = Image::from_pixels(RgbaImage::new(3, 3));
        let scaled = image.scaled(0.1);
        assert_eq!(scaled.width(), Px(1));
        assert_eq!(scaled.height(), Px(1));
    }

    #[test]
    fn opaque_rasters_keep_full_alpha() {
        let raster = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            2,
            2,
            image::Rgb([10, 20, 30]),
        ));
        let image = Image::from_raster(raster);
        assert_eq!(image.pixels().get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }
}
