mod banner;
pub use banner::*;

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod composition;
pub use composition::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

/// Utility functions and structures to fit text into pixel budgets
pub mod layout;

mod units;
pub use units::*;
