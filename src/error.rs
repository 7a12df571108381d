use crate::Px;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum BannerError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [ab_glyph] failed to parse the font
    Font(#[from] ab_glyph::InvalidFont),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    /// No background was configured; a banner cannot be composed without one
    #[error("no background image has been configured")]
    MissingBackground,

    /// Only one half of the two-part logo was configured
    #[error("the two-part logo is missing its {0} half")]
    IncompleteLogo(&'static str),

    /// A colour string could not be parsed
    #[error("invalid colour: {0:?}")]
    InvalidColour(String),

    /// Neither wrapping nor resizing can fit the text under the pixel ceiling
    #[error("text cannot be fit within {max_width}px")]
    CannotFit { max_width: Px },
}
