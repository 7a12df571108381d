/// Greedily wrap `text` into lines of at most `width` characters.
///
/// Words are taken whole across whitespace; a line holds as many as fit under
/// the budget. A single word longer than the budget is hard-broken into
/// budget-sized chunks rather than overflowing. Runs of whitespace collapse,
/// so joining the lines back with single spaces reconstructs the
/// whitespace-normalized input.
///
/// Pure and deterministic; empty input yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                if chunk.len() == width {
                    lines.push(chunk.iter().collect());
                } else {
                    // a short tail starts the next line and may still gain words
                    current = chunk.iter().collect();
                    current_len = chunk.len();
                }
            }
            continue;
        }

        let needed = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed <= width {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(wrap("", 40).is_empty());
        assert!(wrap("   \n\t ", 40).is_empty());
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("The best anime ever!", 40), vec!["The best anime ever!"]);
    }

    #[test]
    fn lines_never_exceed_the_budget() {
        let text = "a quick brown fox jumps over the lazy dog again and again";
        for width in 1..20 {
            for line in wrap(text, width) {
                assert!(line.chars().count() <= width, "{line:?} exceeds {width}");
            }
        }
    }

    #[test]
    fn words_are_kept_whole_when_they_fit() {
        assert_eq!(
            wrap("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn overlong_words_are_hard_broken() {
        assert_eq!(
            wrap("extraordinarily", 5),
            vec!["extra", "ordin", "arily"]
        );
    }

    #[test]
    fn broken_word_tails_still_gain_words() {
        assert_eq!(wrap("abcdefg hi", 5), vec!["abcde", "fg hi"]);
    }

    #[test]
    fn joining_lines_reconstructs_normalized_text() {
        let text = "  multiple   spaces\nand\t\tnewlines   collapse ";
        let rejoined = wrap(text, 12).join(" ");
        assert_eq!(
            rejoined,
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap("фрукты корзина", 7), vec!["фрукты", "корзина"]);
    }
}
