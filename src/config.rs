use crate::{colours, Colour, Font, Image, Px, SpanFont};
use id_arena::{Arena, Id};

pub const DEFAULT_MAX_TEXT_WIDTH: Px = Px(500);
pub const DEFAULT_MAX_HEADER_WIDTH: Px = Px(730);

pub const DEFAULT_PADDING: Px = Px(70);
pub const DEFAULT_BOTTOM_PADDING: Px = Px(45);

pub const DEFAULT_HEADER_SIZE: u32 = 64;
pub const DEFAULT_SUBHEADER_SIZE: u32 = 32;
pub const DEFAULT_MAIN_SIZE: u32 = 40;
pub const DEFAULT_TEXT_SIZE: u32 = 32;
pub const DEFAULT_SMALL_TEXT_SIZE: u32 = 20;

pub const DEFAULT_WRAP_COUNT: usize = 40;

/// Everything a banner generation needs up front: the pixel budgets, the text
/// colour, five text styles, and the raster assets. Faces and images are
/// owned by arenas and referred to by id, so styles and placements stay
/// cheap to copy around.
///
/// A configuration starts from one default face applied to every style;
/// individual styles are reassigned afterwards as needed:
///
/// ```no_run
/// use banner_gen::{Config, Font, Image, SpanFont};
///
/// let mut config = Config::new(Font::load_from_disk("fonts/regular.ttf").unwrap());
/// let bold = config.add_font(Font::load_from_disk("fonts/bold.ttf").unwrap());
/// config.header = SpanFont { id: bold, size: 64 };
/// config.set_background(Image::open("bg.jpg").unwrap());
/// ```
pub struct Config<F = Font> {
    pub fonts: Arena<F>,
    pub images: Arena<Image>,

    /// Pixel ceiling for main-text lines
    pub max_text_width: Px,
    /// Pixel ceiling for header and subheader lines
    pub max_header_width: Px,
    /// Initial character budget handed to the line wrapper
    pub wrap_count: usize,

    pub text_colour: Colour,

    /// Left edge of every text block, and the starting point of vertical layout
    pub padding: Px,
    /// Distance kept between the logo row and the bottom of the image
    pub bottom_padding: Px,

    pub header: SpanFont<F>,
    pub subheader: SpanFont<F>,
    pub main: SpanFont<F>,
    pub text: SpanFont<F>,
    pub small_text: SpanFont<F>,

    /// The canvas the banner is drawn over; required before generation
    pub background: Option<Id<Image>>,
    /// The two halves of the logo; used only as a pair
    pub logo_first_part: Option<Id<Image>>,
    pub logo_second_part: Option<Id<Image>>,
    /// Optional artwork balanced against the main text block
    pub sub_image: Option<Id<Image>>,
    /// Optional site label anchored next to the logo row
    pub site: Option<String>,
}

impl<F> Config<F> {
    /// Create a configuration with the default budgets and sizes, every style
    /// bound to `default_font`, and no assets
    pub fn new(default_font: F) -> Config<F> {
        let mut fonts = Arena::new();
        let default = fonts.alloc(default_font);

        Config {
            fonts,
            images: Arena::new(),
            max_text_width: DEFAULT_MAX_TEXT_WIDTH,
            max_header_width: DEFAULT_MAX_HEADER_WIDTH,
            wrap_count: DEFAULT_WRAP_COUNT,
            text_colour: colours::WHITE,
            padding: DEFAULT_PADDING,
            bottom_padding: DEFAULT_BOTTOM_PADDING,
            header: SpanFont {
                id: default,
                size: DEFAULT_HEADER_SIZE,
            },
            subheader: SpanFont {
                id: default,
                size: DEFAULT_SUBHEADER_SIZE,
            },
            main: SpanFont {
                id: default,
                size: DEFAULT_MAIN_SIZE,
            },
            text: SpanFont {
                id: default,
                size: DEFAULT_TEXT_SIZE,
            },
            small_text: SpanFont {
                id: default,
                size: DEFAULT_SMALL_TEXT_SIZE,
            },
            background: None,
            logo_first_part: None,
            logo_second_part: None,
            sub_image: None,
            site: None,
        }
    }

    /// Add a font to the configuration, returning its id for use in styles
    pub fn add_font(&mut self, font: F) -> Id<F> {
        self.fonts.alloc(font)
    }

    /// Add an image to the configuration, returning its id
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Add an image and make it the background
    pub fn set_background(&mut self, image: Image) -> Id<Image> {
        let id = self.add_image(image);
        self.background = Some(id);
        id
    }

    /// Add both halves of the two-part logo
    pub fn set_logo(&mut self, first: Image, second: Image) {
        self.logo_first_part = Some(self.add_image(first));
        self.logo_second_part = Some(self.add_image(second));
    }

    /// Add an image and make it the sub-image
    pub fn set_sub_image(&mut self, image: Image) -> Id<Image> {
        let id = self.add_image(image);
        self.sub_image = Some(id);
        id
    }
}
