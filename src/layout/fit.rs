use crate::layout::wrap;
use crate::{BannerError, Measure, Px};
use log::debug;

/// Ceiling on the font-size climb; a run that still fits at this size is not
/// going to be stopped by any banner-scale pixel budget, and an empty run
/// never overflows at all
const MAX_FONT_SIZE: u32 = 512;

/// How much each width-fitting retry tightens the character budget
const BUDGET_STEP: usize = 10;

/// An ordered stack of wrapped lines plus the uniform line height used to
/// space them; line order is top-to-bottom
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub line_height: Px,
}

impl TextBlock {
    /// Vertical distance from the top of the first line to the top of the
    /// last line
    pub fn stacked_height(&self) -> Px {
        self.line_height * self.lines.len().saturating_sub(1) as i32
    }
}

/// Wrap `text` so that every line, measured in `face` at `size`, is strictly
/// narrower than `max_width`.
///
/// The wrapper is first tried at `budget` characters; whenever any produced
/// line measures at or over the ceiling, the budget is tightened by
/// [`BUDGET_STEP`] and the wrap redone. The budget shrinks on every retry, so
/// the search is bounded: exhausting it (pathological ceilings, unbreakable
/// glyph-dense words) fails with [`BannerError::CannotFit`].
///
/// The result is empty only when `text` holds no words.
pub fn fit_lines<F: Measure>(
    face: &F,
    size: u32,
    text: &str,
    max_width: Px,
    budget: usize,
) -> Result<TextBlock, BannerError> {
    let mut budget = budget;

    while budget > 0 {
        let lines = wrap(text, budget);

        if lines
            .iter()
            .all(|line| face.text_width(size, line) < max_width)
        {
            return Ok(TextBlock {
                lines,
                line_height: face.line_height(size),
            });
        }

        budget = budget.saturating_sub(BUDGET_STEP);
        debug!("wrapped lines overflow {max_width}px, tightening budget to {budget} chars");
    }

    Err(BannerError::CannotFit { max_width })
}

/// Find the largest integer font size at which the first `span` characters of
/// `text` measure strictly narrower than `max_width` in `face`.
///
/// The climb is linear from size 1, stopping at the first overflowing size;
/// one step back is the answer. A ceiling too
/// tight for even size 1, or a run that never reaches the ceiling before
/// [`MAX_FONT_SIZE`], fails with [`BannerError::CannotFit`].
pub fn fit_size<F: Measure>(
    face: &F,
    text: &str,
    span: usize,
    max_width: Px,
) -> Result<u32, BannerError> {
    let probe: String = text.chars().take(span).collect();

    let mut size = 1;
    while face.text_width(size, &probe) < max_width {
        size += 1;
        if size > MAX_FONT_SIZE {
            return Err(BannerError::CannotFit { max_width });
        }
    }

    let size = size - 1;
    if size == 0 {
        return Err(BannerError::CannotFit { max_width });
    }

    debug!("sized a {span}-char run to {size}px against a {max_width}px ceiling");
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedFace;

    // every glyph advances size / 3 pixels
    const FACE: FixedFace = FixedFace { den: 3 };

    #[test]
    fn every_line_measures_under_the_ceiling() {
        let text = "a fairly long piece of copy that will need to wrap over several lines";
        let block = fit_lines(&FACE, 40, text, Px(500), 40).unwrap();

        assert!(block.lines.len() > 1);
        for line in &block.lines {
            assert!(FACE.text_width(40, line) < Px(500));
        }
    }

    #[test]
    fn generated_copy_always_fits() {
        let text = lipsum::lipsum(120);
        let block = fit_lines(&FACE, 32, &text, Px(500), 40).unwrap();

        assert!(!block.lines.is_empty());
        for line in &block.lines {
            assert!(FACE.text_width(32, line) < Px(500));
        }
    }

    #[test]
    fn overflowing_budgets_are_tightened_until_lines_fit() {
        let wide = FixedFace { den: 1 };
        let text = "ten chars ten chars ten chars ten chars";
        // at 40 chars a line measures 1600px; only a tighter wrap passes
        let block = fit_lines(&wide, 40, text, Px(500), 40).unwrap();

        for line in &block.lines {
            assert!(line.chars().count() <= 10);
            assert!(wide.text_width(40, line) < Px(500));
        }
    }

    #[test]
    fn exhausted_budgets_fail_instead_of_looping() {
        let wide = FixedFace { den: 1 };
        let result = fit_lines(&wide, 40, "unbreakablerunofletters", Px(100), 40);
        assert!(matches!(result, Err(BannerError::CannotFit { .. })));
    }

    #[test]
    fn empty_text_fits_as_an_empty_block() {
        let block = fit_lines(&FACE, 40, "", Px(500), 40).unwrap();
        assert!(block.lines.is_empty());
        assert_eq!(block.line_height, Px(48));
    }

    #[test]
    fn chosen_size_sits_exactly_on_the_boundary() {
        let text: String = "a".repeat(130);
        let size = fit_size(&FACE, &text, 40, Px(730)).unwrap();

        assert_eq!(size, 54);
        let probe: String = text.chars().take(40).collect();
        assert!(FACE.text_width(size, &probe) < Px(730));
        assert!(FACE.text_width(size + 1, &probe) >= Px(730));
    }

    #[test]
    fn ceilings_below_any_glyph_are_rejected() {
        let wide = FixedFace { den: 1 };
        let result = fit_size(&wide, "anything", 8, Px(1));
        assert!(matches!(result, Err(BannerError::CannotFit { .. })));
    }

    #[test]
    fn runs_that_never_reach_the_ceiling_are_rejected() {
        let result = fit_size(&FACE, "", 40, Px(730));
        assert!(matches!(result, Err(BannerError::CannotFit { .. })));
    }
}
