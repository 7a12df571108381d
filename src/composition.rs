use crate::{Colour, Font, Image, Px};
use id_arena::Id;

/// A font selection for one span of text: a face in the configuration's font
/// arena, bound to a pixel size
#[derive(Debug)]
pub struct SpanFont<F = Font> {
    pub id: Id<F>,
    pub size: u32,
}

impl<F> Clone for SpanFont<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for SpanFont<F> {}

impl<F> PartialEq for SpanFont<F> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.size == other.size
    }
}

impl<F> Eq for SpanFont<F> {}

/// A positioned run of text
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout<F = Font> {
    pub text: String,
    pub font: SpanFont<F>,
    pub colour: Colour,
    pub coords: (Px, Px),
}

/// A positioned stroked segment (the subheader underline)
#[derive(Clone, PartialEq, Debug)]
pub struct RuleLayout {
    pub from: (Px, Px),
    pub to: (Px, Px),
    pub colour: Colour,
    pub stroke: Px,
}

/// A positioned raster asset, pasted with its own alpha as the mask
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: Id<Image>,
    pub coords: (Px, Px),
}

#[derive(Clone, PartialEq, Debug)]
pub enum Content<F = Font> {
    Span(SpanLayout<F>),
    Rule(RuleLayout),
    Image(ImageLayout),
}

/// The laid-out banner: every placement the compositor decided on, in draw
/// order. Produced in a single top-down pass and replayed onto a canvas;
/// keeping the geometry separate from the rasterisation means the layout can
/// be inspected without drawing a pixel.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Composition<F = Font> {
    pub contents: Vec<Content<F>>,
}

impl<F> Composition<F> {
    pub fn new() -> Composition<F> {
        Composition {
            contents: Vec::new(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout<F>) {
        self.contents.push(Content::Span(span));
    }

    pub fn add_rule(&mut self, rule: RuleLayout) {
        self.contents.push(Content::Rule(rule));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(Content::Image(image));
    }

    /// The spans in draw order, skipping rules and images
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout<F>> {
        self.contents.iter().filter_map(|content| match content {
            Content::Span(span) => Some(span),
            _ => None,
        })
    }

    /// The pasted images in draw order
    pub fn images(&self) -> impl Iterator<Item = &ImageLayout> {
        self.contents.iter().filter_map(|content| match content {
            Content::Image(image) => Some(image),
            _ => None,
        })
    }
}
