//! README cleanup for tabular export.

/// Maximum number of characters kept from a README.
pub const README_PREVIEW_LEN: usize = 500;

/// Markdown characters removed from previews.
const STRIPPED_CHARS: [char; 3] = ['#', '*', '`'];

/// Flattens README text into a single-line preview.
///
/// Runs of line breaks become one space, heading/emphasis/code markers are
/// dropped, surrounding whitespace is trimmed and the result is cut to
/// [`README_PREVIEW_LEN`] characters.
#[must_use]
pub fn normalize_readme(raw: &str) -> String {
    let mut flattened = String::with_capacity(raw.len());
    let mut in_break = false;

    for ch in raw.chars() {
        if ch == '\n' || ch == '\r' {
            if !in_break {
                flattened.push(' ');
                in_break = true;
            }
            continue;
        }
        in_break = false;
        if !STRIPPED_CHARS.contains(&ch) {
            flattened.push(ch);
        }
    }

    truncate_chars(flattened.trim(), README_PREVIEW_LEN).to_string()
}

/// Returns at most `max` characters of `text`, on a char boundary.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_line_breaks() {
        assert_eq!(normalize_readme("one\n\n\ntwo\r\nthree"), "one two three");
    }

    #[test]
    fn strips_markdown_markers() {
        assert_eq!(
            normalize_readme("# Title\n\nSome **bold** and `code`."),
            "Title Some bold and code."
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_readme("\n\n  hello  \n"), "hello");
    }

    #[test]
    fn truncates_to_preview_length() {
        let long = "a".repeat(1200);
        assert_eq!(normalize_readme(&long).chars().count(), README_PREVIEW_LEN);

        let short = "b".repeat(37);
        assert_eq!(normalize_readme(&short), short);

        let exact = "c".repeat(README_PREVIEW_LEN);
        assert_eq!(normalize_readme(&exact), exact);
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let text = "é".repeat(600);
        let preview = normalize_readme(&text);

        assert_eq!(preview.chars().count(), README_PREVIEW_LEN);
        assert_eq!(preview.len(), README_PREVIEW_LEN * 2);
    }

    #[test]
    fn markup_only_readme_is_empty() {
        assert_eq!(normalize_readme("###\n***\n"), "");
    }
}
