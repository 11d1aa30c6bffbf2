//! Hard line break classification.
//!
//! A line break right at a block boundary, or alone inside running prose,
//! is usually a paragraph typed the wrong way. Several breaks stacked
//! between boundaries read as intentional layout (addresses, poems) and
//! are accepted.

use crate::text::{self, SENTINEL};

use super::reports::DiscouragedBreak;

/// Characters of context inspected on each side of a break.
const WINDOW: usize = 50;

/// Characters of context kept in a reported excerpt.
const EXCERPT: usize = 33;

/// Find discouraged line breaks in flattened document text.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn find_discouraged_breaks(text: &str) -> Vec<DiscouragedBreak> {
    let chars: Vec<char> = text.chars().collect();
    let mut breaks = Vec::new();

    for (pos, _) in chars.iter().enumerate().filter(|(_, c)| **c == '\n') {
        let before: String = chars[pos.saturating_sub(WINDOW)..pos].iter().collect();
        let after_end = (pos + 1 + WINDOW).min(chars.len());
        let after: String = chars[pos + 1..after_end].iter().collect();

        if is_discouraged(&before, &after) {
            breaks.push(DiscouragedBreak {
                before: text::visible(text::tail(&before, EXCERPT)),
                after: text::visible(text::head(&after, EXCERPT)),
            });
        }
    }

    tracing::debug!(count = breaks.len(), "line breaks classified");
    breaks
}

/// Classify one break from its context windows.
fn is_discouraged(before: &str, after: &str) -> bool {
    if before.ends_with(SENTINEL) || after.starts_with(SENTINEL) || after.is_empty() {
        return true;
    }
    !(has_boundary(before) && has_boundary(after))
}

fn has_boundary(window: &str) -> bool {
    window.contains('\n') || window.contains(SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_breaks_no_findings() {
        assert!(find_discouraged_breaks(" $$ Plain text $$ More").is_empty());
        assert!(find_discouraged_breaks("").is_empty());
    }

    #[test]
    fn break_before_boundary_is_discouraged() {
        let found = find_discouraged_breaks(" $$ first\n $$ second");
        assert_eq!(
            found,
            vec![DiscouragedBreak {
                before: "first".to_string(),
                after: "second".to_string(),
            }]
        );
    }

    #[test]
    fn break_after_boundary_is_discouraged() {
        let found = find_discouraged_breaks(" $$ \nsecond\nthird $$ x");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].before, "");
    }

    #[test]
    fn trailing_break_is_discouraged() {
        let found = find_discouraged_breaks(" $$ a\nb $$ last\n");
        assert_eq!(found.len(), 1);
        assert!(found[0].before.ends_with("last"));
        assert_eq!(found[0].after, "");
    }

    #[test]
    fn excerpts_are_trimmed() {
        let found = find_discouraged_breaks(" $$ some words here \n  more words follow");
        assert_eq!(
            found,
            vec![DiscouragedBreak {
                before: "some words here".to_string(),
                after: "more words follow".to_string(),
            }]
        );
    }

    #[test]
    fn stacked_breaks_between_boundaries_are_fine() {
        let text = " $$ Street 1\n12345 Town\nCountry $$ Next paragraph";
        assert!(find_discouraged_breaks(text).is_empty());
    }

    #[test]
    fn isolated_break_in_prose_is_discouraged() {
        let text = " $$ This sentence runs on\nand keeps going without any structure";
        let found = find_discouraged_breaks(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].before, "This sentence runs on");
        assert_eq!(found[0].after, "and keeps going without any struc");
    }

    #[test]
    fn boundary_beyond_window_does_not_count() {
        let filler = "x".repeat(60);
        let text = format!(" $$ {filler}\nmore\n{filler}");
        let found = find_discouraged_breaks(&text);
        // first: no boundary within 50 chars before; second: none within 50 after
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn excerpts_are_clipped_to_33_chars() {
        let before = "a".repeat(40);
        let after = "b".repeat(40);
        let found = find_discouraged_breaks(&format!("{before}\n{after}"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].before.chars().count(), 33);
        assert_eq!(found[0].after.chars().count(), 33);
    }

    #[test]
    fn windows_count_characters_not_bytes() {
        let text = format!(" $$ {}\nüber", "ä".repeat(10));
        let found = find_discouraged_breaks(&text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].before, "ä".repeat(10));
        assert_eq!(found[0].after, "über");
    }
}
