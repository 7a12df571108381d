use crate::{
    layout::{fit_lines, fit_size},
    BannerError, Canvas, Composition, Config, Content, Font, Image, ImageLayout, Measure, Px,
    RuleLayout, SpanLayout,
};
use id_arena::Id;
use image::RgbaImage;
use log::debug;
use std::path::Path;

/// Headers longer than this many characters are resized to fit rather than
/// wrapped at their configured size
const HEADER_RESIZE_THRESHOLD: usize = 60;

/// Clearance required between the sub-image and the middle line before the
/// sub-image is allowed onto the banner
const SAVE_ZONE: Px = Px(5);

/// Horizontal gap between the two logo halves
const LOGO_GAP: Px = Px(5);

/// A validated two-part logo; composition stages only ever see the halves
/// together
struct LogoPair {
    first: Id<Image>,
    second: Id<Image>,
}

/// Where the bottom-anchored row ended up: the row's top edge, the combined
/// width of the logo halves, and whether the banner is running logoless
struct BottomAnchor {
    y: Px,
    width: Px,
    logoless: bool,
}

/// Composes banners over a [`Config`]: a single top-down pass places the
/// header block, an optional underlined subheader, the bottom-anchored
/// logo/site/small-text row, and finally the main text block balanced against
/// the optional sub-image. The pass emits a [`Composition`]; rendering
/// replays it onto a fresh copy of the background, so repeated generations
/// from one configuration are pixel-identical.
pub struct BannerGenerator<F = Font> {
    pub config: Config<F>,
}

impl<F: Measure> BannerGenerator<F> {
    pub fn new(config: Config<F>) -> BannerGenerator<F> {
        BannerGenerator { config }
    }

    /// Lay the banner out without touching a pixel. Fails fast on an
    /// incomplete configuration or on text no search can fit.
    pub fn compose(
        &self,
        header: &str,
        main_text: &str,
        subheader: Option<&str>,
        small_text: Option<&str>,
    ) -> Result<Composition<F>, BannerError> {
        let config = &self.config;

        let background = config.background.ok_or(BannerError::MissingBackground)?;
        let logo = match (config.logo_first_part, config.logo_second_part) {
            (Some(first), Some(second)) => Some(LogoPair { first, second }),
            (None, None) => None,
            (Some(_), None) => return Err(BannerError::IncompleteLogo("second")),
            (None, Some(_)) => return Err(BannerError::IncompleteLogo("first")),
        };

        let image_height = config.images[background].height();
        let mut composition = Composition::new();

        let mut height = self.place_header(&mut composition, header)?;
        if let Some(subheader) = subheader.filter(|text| !text.is_empty()) {
            height = self.place_subheader(&mut composition, subheader, height)?;
        }

        let anchor = self.anchor_logo(&mut composition, image_height, logo);
        let based_y = self.place_small_text(&mut composition, small_text, &anchor);
        let bottom_height = image_height - based_y;
        self.place_site(&mut composition, &anchor);

        self.place_main_text(&mut composition, main_text, height, bottom_height, image_height)?;

        Ok(composition)
    }

    /// Stack the header lines from just above the padding line, resizing the
    /// font first when the header is too long to read well at its configured
    /// size. Returns the y coordinate one line height below the last line.
    fn place_header(
        &self,
        composition: &mut Composition<F>,
        header: &str,
    ) -> Result<Px, BannerError> {
        let config = &self.config;
        let start_y = config.padding - Px(30);

        let mut font = config.header;
        if header.chars().count() > HEADER_RESIZE_THRESHOLD {
            font.size = fit_size(
                &config.fonts[font.id],
                header,
                config.wrap_count,
                config.max_header_width,
            )?;
            debug!("oversized header resized to {}px", font.size);
        }

        let block = fit_lines(
            &config.fonts[font.id],
            font.size,
            header,
            config.max_header_width,
            config.wrap_count,
        )?;

        for (i, line) in block.lines.iter().enumerate() {
            composition.add_span(SpanLayout {
                text: line.clone(),
                font,
                colour: config.text_colour,
                coords: (config.padding, start_y + block.line_height * i as i32),
            });
        }

        Ok(start_y + block.line_height * block.lines.len() as i32)
    }

    /// Draw the subheader 20px below the header block with a 3px underline,
    /// resizing it onto one line if it overflows the header ceiling. Returns
    /// the y coordinate 5px below the underline.
    fn place_subheader(
        &self,
        composition: &mut Composition<F>,
        subheader: &str,
        height: Px,
    ) -> Result<Px, BannerError> {
        let config = &self.config;

        let mut font = config.subheader;
        if config.fonts[font.id].text_width(font.size, subheader) > config.max_header_width {
            font.size = fit_size(
                &config.fonts[font.id],
                subheader,
                subheader.chars().count(),
                config.max_header_width,
            )?;
            debug!("subheader resized to {}px", font.size);
        }

        let face = &config.fonts[font.id];
        let subheader_y = height + Px(20);

        composition.add_span(SpanLayout {
            text: subheader.to_string(),
            font,
            colour: config.text_colour,
            coords: (config.padding, subheader_y),
        });

        let line_y = subheader_y + face.line_height(font.size) + Px(4);
        composition.add_rule(RuleLayout {
            from: (config.padding, line_y),
            to: (config.padding + face.text_width(font.size, subheader), line_y),
            colour: config.text_colour,
            stroke: Px(3),
        });

        Ok(line_y + Px(5))
    }

    /// Paste the logo halves side by side, left-aligned at the padding and
    /// bottom-anchored above the bottom padding. Without a pair the anchor
    /// collapses to the bottom padding line at zero width.
    fn anchor_logo(
        &self,
        composition: &mut Composition<F>,
        image_height: Px,
        logo: Option<LogoPair>,
    ) -> BottomAnchor {
        let config = &self.config;

        match logo {
            Some(pair) => {
                let first = &config.images[pair.first];
                let second = &config.images[pair.second];
                let y = image_height - config.bottom_padding - second.height();

                composition.add_image(ImageLayout {
                    image: pair.first,
                    coords: (config.padding, y),
                });
                composition.add_image(ImageLayout {
                    image: pair.second,
                    coords: (config.padding + first.width() + LOGO_GAP, y),
                });

                BottomAnchor {
                    y,
                    width: first.width() + LOGO_GAP + second.width(),
                    logoless: false,
                }
            }
            None => BottomAnchor {
                y: image_height - config.bottom_padding,
                width: Px::ZERO,
                logoless: true,
            },
        }
    }

    /// Right-align the small label so it ends just before the logo's left
    /// column. Drawn only when a logo was drawn. Returns the top edge of the
    /// bottom-anchored region.
    fn place_small_text(
        &self,
        composition: &mut Composition<F>,
        small_text: Option<&str>,
        anchor: &BottomAnchor,
    ) -> Px {
        let config = &self.config;
        let mut based_y = anchor.y - Px(5);

        if let Some(text) = small_text.filter(|text| !text.is_empty()) {
            if !anchor.logoless {
                let font = config.small_text;
                let face = &config.fonts[font.id];

                // Cyrillic glyphs sit differently on the baseline; the two
                // offsets are calibration constants, not derived metrics
                let cyrillic = is_cyrillic_text(text);
                let corrector = if cyrillic { Px::ZERO } else { Px(5) };
                debug!("small text {text:?}, cyrillic: {cyrillic}");

                based_y = anchor.y - face.line_height(font.size) - corrector;
                let based_x =
                    config.padding + anchor.width - face.text_width(font.size, text);

                composition.add_span(SpanLayout {
                    text: text.to_string(),
                    font,
                    colour: config.text_colour,
                    coords: (based_x, based_y),
                });
            }
        }

        based_y
    }

    /// Draw the site label to the right of the logo row, leaving a 40px gap
    /// after the logo when one is present
    fn place_site(&self, composition: &mut Composition<F>, anchor: &BottomAnchor) {
        let config = &self.config;

        if let Some(site) = config.site.as_deref().filter(|site| !site.is_empty()) {
            let corrector = if anchor.logoless { Px::ZERO } else { Px(40) };

            composition.add_span(SpanLayout {
                text: site.to_string(),
                font: config.text,
                colour: config.text_colour,
                coords: (
                    config.padding + anchor.width + corrector,
                    anchor.y - Px(15),
                ),
            });
        }
    }

    /// Place the wrapped main text in the vertical middle of the space left
    /// between the header region and the bottom-anchored region: centred on
    /// its own, or pushed below centre with the sub-image pasted immediately
    /// above when both fit without touching.
    ///
    /// Wrapping measures with the main style; the spans draw with the
    /// subheader style.
    fn place_main_text(
        &self,
        composition: &mut Composition<F>,
        main_text: &str,
        height: Px,
        bottom_height: Px,
        image_height: Px,
    ) -> Result<(), BannerError> {
        let config = &self.config;

        let block = fit_lines(
            &config.fonts[config.main.id],
            config.main.size,
            main_text,
            config.max_text_width,
            config.wrap_count,
        )?;

        let available = (image_height - bottom_height) - height;
        let middle = available / 2;

        let companion = match config.sub_image {
            Some(id)
                if config.images[id].height() + SAVE_ZONE <= middle
                    && block.stacked_height() <= middle =>
            {
                Some(id)
            }
            _ => None,
        };

        let font = config.subheader;
        let start_y = match companion {
            None => height + middle - block.line_height * block.lines.len() as i32 / 2,
            Some(_) => height + middle + Px(10),
        };

        debug!(
            "main text block of {} lines at y {start_y}, sub-image: {}",
            block.lines.len(),
            companion.is_some(),
        );

        for (i, line) in block.lines.iter().enumerate() {
            composition.add_span(SpanLayout {
                text: line.clone(),
                font,
                colour: config.text_colour,
                coords: (config.padding, start_y + block.line_height * i as i32),
            });
        }

        if let Some(id) = companion {
            composition.add_image(ImageLayout {
                image: id,
                coords: (
                    config.padding,
                    height + middle - Px(10) - config.images[id].height(),
                ),
            });
        }

        Ok(())
    }
}

impl BannerGenerator<Font> {
    /// Compose and render the banner, returning the finished raster
    pub fn generate(
        &self,
        header: &str,
        main_text: &str,
        subheader: Option<&str>,
        small_text: Option<&str>,
    ) -> Result<RgbaImage, BannerError> {
        let composition = self.compose(header, main_text, subheader, small_text)?;
        self.render(&composition)
    }

    /// Compose, render, and save the banner to `path`. JPEG targets are
    /// converted to RGB first; every other format receives the RGBA raster.
    pub fn generate_file<P: AsRef<Path>>(
        &self,
        path: P,
        header: &str,
        main_text: &str,
        subheader: Option<&str>,
        small_text: Option<&str>,
    ) -> Result<(), BannerError> {
        let pixels = self.generate(header, main_text, subheader, small_text)?;

        let path = path.as_ref();
        let jpeg = path.extension().map_or(false, |ext| {
            ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
        });

        if jpeg {
            image::DynamicImage::ImageRgba8(pixels).to_rgb8().save(path)?;
        } else {
            pixels.save(path)?;
        }

        Ok(())
    }

    /// Replay a composition onto a fresh copy of the background
    fn render(&self, composition: &Composition<Font>) -> Result<RgbaImage, BannerError> {
        let config = &self.config;
        let background = config.background.ok_or(BannerError::MissingBackground)?;
        let mut canvas = Canvas::new(&config.images[background]);

        for content in &composition.contents {
            match content {
                Content::Span(span) => canvas.draw_text(
                    &config.fonts[span.font.id],
                    span.font.size,
                    span.coords,
                    span.colour,
                    &span.text,
                ),
                Content::Rule(rule) => {
                    canvas.draw_line(rule.from, rule.to, rule.colour, rule.stroke)
                }
                Content::Image(layout) => {
                    canvas.paste(&config.images[layout.image], layout.coords)
                }
            }
        }

        Ok(canvas.into_pixels())
    }
}

/// Whether the text consists entirely of Cyrillic letters and whitespace
fn is_cyrillic_text(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|ch| ch.is_whitespace() || matches!(ch, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedFace;

    const FACE: FixedFace = FixedFace { den: 3 };

    fn blank(width: u32, height: u32) -> Image {
        Image::from_pixels(RgbaImage::new(width, height))
    }

    /// A full setup on a 800x600 background: 100x50 + 80x50 logo halves and
    /// a 200x100 sub-image
    fn full_config() -> Config<FixedFace> {
        let mut config = Config::new(FACE);
        config.set_background(blank(800, 600));
        config.set_logo(blank(100, 50), blank(80, 50));
        config.set_sub_image(blank(200, 100));
        config.site = Some("anime-recommend.ru".into());
        config
    }

    fn span_at<'a, F>(composition: &'a Composition<F>, text: &str) -> &'a SpanLayout<F> {
        composition
            .spans()
            .find(|span| span.text == text)
            .unwrap_or_else(|| panic!("no span {text:?}"))
    }

    #[test]
    fn full_banner_lays_out_every_region() {
        let generator = BannerGenerator::new(full_config());
        let composition = generator
            .compose(
                "Fruits Basket: The Final",
                "The best anime ever!",
                Some("フルーツバスケット The Final"),
                Some("based_on"),
            )
            .unwrap();

        // a 24-char header keeps its configured size and stays on one line
        let header = span_at(&composition, "Fruits Basket: The Final");
        assert_eq!(header.font.size, 64);
        assert_eq!(header.coords, (Px(70), Px(40)));

        // subheader underlined 4px below its line box
        let subheader = span_at(&composition, "フルーツバスケット The Final");
        assert_eq!(subheader.coords, (Px(70), Px(136)));
        let rule = composition
            .contents
            .iter()
            .find_map(|content| match content {
                Content::Rule(rule) => Some(rule),
                _ => None,
            })
            .expect("subheader underline");
        assert_eq!(rule.from, (Px(70), Px(178)));
        assert_eq!(rule.to, (Px(272), Px(178)));
        assert_eq!(rule.stroke, Px(3));

        // logo halves side by side with the fixed gap, bottom-anchored
        let images: Vec<_> = composition.images().collect();
        assert_eq!(images[0].coords, (Px(70), Px(505)));
        assert_eq!(images[1].coords, (Px(175), Px(505)));

        // latin small text takes the 5px corrector and right-aligns to the
        // logo's left column
        let small = span_at(&composition, "based_on");
        assert_eq!(small.coords, (Px(202), Px(476)));

        // site sits 40px after the logo row
        let site = span_at(&composition, "anime-recommend.ru");
        assert_eq!(site.coords, (Px(295), Px(490)));

        // main text fits beside the sub-image: text below centre, image
        // bottom-aligned 10px above it
        let main = span_at(&composition, "The best anime ever!");
        assert_eq!(main.coords, (Px(70), Px(339)));
        assert_eq!(main.font, generator.config.subheader);
        assert_eq!(images[2].coords, (Px(70), Px(219)));
    }

    #[test]
    fn oversized_headers_are_resized_to_the_boundary() {
        let generator = BannerGenerator::new(full_config());
        let header = "a".repeat(130);
        let composition = generator.compose(&header, "text", None, None).unwrap();

        let sized = composition.spans().next().expect("header span");
        assert_eq!(sized.font.size, 54);

        // the chosen size is the largest that still measures under the ceiling
        let probe: String = header.chars().take(40).collect();
        assert!(FACE.text_width(54, &probe) < Px(730));
        assert!(FACE.text_width(55, &probe) >= Px(730));
    }

    #[test]
    fn small_text_is_suppressed_without_a_logo() {
        let mut config = full_config();
        config.logo_first_part = None;
        config.logo_second_part = None;

        let generator = BannerGenerator::new(config);
        let composition = generator
            .compose("Header", "text", None, Some("based_on"))
            .unwrap();

        assert!(composition.spans().all(|span| span.text != "based_on"));

        // logoless: the site corrector collapses to zero and the anchor to
        // the bottom padding line
        let site = span_at(&composition, "anime-recommend.ru");
        assert_eq!(site.coords, (Px(70), Px(540)));
    }

    #[test]
    fn cyrillic_small_text_drops_the_corrector() {
        let generator = BannerGenerator::new(full_config());
        let composition = generator
            .compose("Header", "text", None, Some("по данным"))
            .unwrap();

        let small = span_at(&composition, "по данным");
        assert_eq!(small.coords.1, Px(481));
    }

    #[test]
    fn tall_sub_images_give_way_to_centred_text() {
        let mut config = full_config();
        config.sub_image = Some(config.add_image(blank(200, 400)));

        let generator = BannerGenerator::new(config);
        let composition = generator
            .compose(
                "Fruits Basket: The Final",
                "The best anime ever!",
                Some("フルーツバスケット The Final"),
                Some("based_on"),
            )
            .unwrap();

        // only the two logo halves are pasted
        assert_eq!(composition.images().count(), 2);

        // the single main line centres in the remaining space
        let main = span_at(&composition, "The best anime ever!");
        assert_eq!(main.coords, (Px(70), Px(305)));
    }

    #[test]
    fn composition_is_deterministic() {
        let generator = BannerGenerator::new(full_config());
        let args = (
            "Fruits Basket: The Final",
            "The best anime ever!",
            Some("フルーツバスケット The Final"),
            Some("based_on"),
        );

        let first = generator.compose(args.0, args.1, args.2, args.3).unwrap();
        let second = generator.compose(args.0, args.1, args.2, args.3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn a_background_is_required() {
        let mut config = Config::new(FACE);
        config.set_logo(blank(10, 10), blank(10, 10));

        let generator = BannerGenerator::new(config);
        let result = generator.compose("Header", "text", None, None);
        assert!(matches!(result, Err(BannerError::MissingBackground)));
    }

    #[test]
    fn half_a_logo_is_rejected() {
        let mut config = Config::new(FACE);
        config.set_background(blank(800, 600));
        config.logo_first_part = Some(config.add_image(blank(10, 10)));

        let generator = BannerGenerator::new(config);
        let result = generator.compose("Header", "text", None, None);
        assert!(matches!(result, Err(BannerError::IncompleteLogo("second"))));
    }

    #[test]
    fn cyrillic_detection_matches_letters_and_whitespace_only() {
        assert!(is_cyrillic_text("по данным"));
        assert!(is_cyrillic_text("ЁЖ и ёж"));
        assert!(!is_cyrillic_text("based_on"));
        assert!(!is_cyrillic_text("по данным!"));
        assert!(!is_cyrillic_text(""));
    }
}
