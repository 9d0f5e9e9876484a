//! Hard wrapping of entry text to a column width.
//!
//! Rendering and measurement share this code, so an entry's measured
//! height is exactly the number of rows it draws.

use super::styles::ListStyles;
use crate::model::Entry;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Tab stops expand to this many spaces.
const TAB_WIDTH: usize = 4;

/// Wrap one logical line into rows no wider than `width` columns.
///
/// Breaks between characters, never inside one. A character wider than
/// the whole row gets a row of its own. An empty line yields one empty row.
pub fn wrap_line(line: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in line.chars() {
        let (text, ch_width) = if ch == '\t' {
            (" ".repeat(TAB_WIDTH), TAB_WIDTH)
        } else {
            (ch.to_string(), ch.width().unwrap_or(0))
        };

        if current_width + ch_width > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push_str(&text);
        current_width += ch_width;
    }

    rows.push(current);
    rows
}

/// Styled rows for `entry` at `width`, without the trailing separator.
pub fn entry_lines(entry: &Entry, width: u16, styles: &ListStyles) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = wrap_line(entry.title(), width)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, styles.title)))
        .collect();

    for body in entry.body() {
        lines.extend(
            wrap_line(body, width)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, styles.body))),
        );
    }
    lines
}

/// Rows `entry` occupies at `width`, separator included.
pub fn measure_entry(entry: &Entry, width: u16) -> u32 {
    let body_rows: usize = entry.body().map(|line| wrap_line(line, width).len()).sum();
    let rows = wrap_line(entry.title(), width).len() + body_rows + 1;
    u32::try_from(rows).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryId;
    use proptest::prelude::*;

    fn entry(text: &str) -> Entry {
        Entry::new(EntryId::new(0), text)
    }

    #[test]
    fn short_line_fits_one_row() {
        assert_eq!(wrap_line("hello", 10), vec!["hello"]);
    }

    #[test]
    fn long_line_breaks_at_width() {
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn exact_width_does_not_add_row() {
        assert_eq!(wrap_line("abcd", 4), vec!["abcd"]);
    }

    #[test]
    fn empty_line_is_one_row() {
        assert_eq!(wrap_line("", 8), vec![""]);
    }

    #[test]
    fn wide_characters_count_two_columns() {
        // Each CJK character is two columns wide.
        assert_eq!(wrap_line("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn wide_character_never_split_at_odd_width() {
        assert_eq!(wrap_line("日本", 3), vec!["日", "本"]);
    }

    #[test]
    fn zero_width_is_treated_as_one_column() {
        assert_eq!(wrap_line("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn tabs_expand_to_spaces() {
        assert_eq!(wrap_line("\tx", 10), vec!["    x"]);
    }

    #[test]
    fn measure_includes_separator() {
        assert_eq!(measure_entry(&entry("title"), 20), 2);
        assert_eq!(measure_entry(&entry("title\nbody"), 20), 3);
    }

    #[test]
    fn measure_grows_when_narrower() {
        let e = entry("a fairly long title line\nand a body");
        assert!(measure_entry(&e, 8) > measure_entry(&e, 80));
    }

    #[test]
    fn measure_matches_rendered_rows() {
        let e = entry("The title wraps here\nbody one\n\nbody after blank");
        let styles = ListStyles::default();
        for width in [1u16, 3, 7, 12, 40] {
            assert_eq!(
                measure_entry(&e, width) as usize,
                entry_lines(&e, width, &styles).len() + 1,
                "width {width}"
            );
        }
    }

    proptest! {
        #[test]
        fn rows_never_exceed_width(text in "\\PC{0,60}", width in 2u16..30) {
            for row in wrap_line(&text, width) {
                let columns: usize = row.chars().map(|c| c.width().unwrap_or(0)).sum();
                prop_assert!(columns <= usize::from(width));
            }
        }

        #[test]
        fn wrapping_preserves_content(text in "[a-z ]{0,80}", width in 1u16..20) {
            let joined: String = wrap_line(&text, width).concat();
            prop_assert_eq!(joined, text);
        }
    }
}
