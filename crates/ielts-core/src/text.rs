//! Whitespace and punctuation normalization shared by every stage.

/// Collapse every whitespace run to a single space and trim.
///
/// Idempotent: `normalize_whitespace(normalize_whitespace(s)) == normalize_whitespace(s)`.
pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map typographic quotes and dashes, and the replacement character, to ASCII.
pub fn normalize_punctuation(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{FFFD}' => '-',
            other => other,
        })
        .collect()
}

/// Punctuation then whitespace normalization.
pub fn normalize_text(value: &str) -> String {
    normalize_whitespace(&normalize_punctuation(value))
}

/// Whether the first alphabetic character is uppercase. False when there is none.
pub fn first_alpha_is_upper(value: &str) -> bool {
    value
        .chars()
        .find(|c| c.is_alphabetic())
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// Share of characters that are ASCII. An empty string counts as fully ASCII.
pub fn ascii_ratio(value: &str) -> f64 {
    let total = value.chars().count();
    if total == 0 {
        return 1.0;
    }
    let ascii = value.chars().filter(|c| c.is_ascii()).count();
    ascii as f64 / total as f64
}

/// Case-insensitive "starts with any of" over already-lowercased prefixes.
pub fn starts_with_any(value: &str, prefixes: &[String]) -> bool {
    let lower = value.to_lowercase();
    prefixes.iter().any(|p| lower.starts_with(p.as_str()))
}

/// Case-insensitive "contains any of" over already-lowercased needles.
pub fn contains_any(value: &str, needles: &[String]) -> bool {
    let lower = value.to_lowercase();
    needles.iter().any(|n| lower.contains(n.as_str()))
}

/// Largest char boundary `<= index`.
pub fn floor_char_boundary(value: &str, index: usize) -> usize {
    if index >= value.len() {
        return value.len();
    }
    let mut i = index;
    while !value.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= index`.
pub fn ceil_char_boundary(value: &str, index: usize) -> usize {
    if index >= value.len() {
        return value.len();
    }
    let mut i = index;
    while !value.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Iterate the lines of `text` with the byte offset at which each one starts.
pub fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line.strip_suffix('\r').unwrap_or(line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_whitespace_idempotent() {
        let once = normalize_whitespace(" x\u{00A0} y\r\n z ");
        assert_eq!(normalize_whitespace(&once), once);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            normalize_text("It\u{2019}s 1990\u{2013}2000 \u{201C}ok\u{201D}"),
            "It's 1990-2000 \"ok\""
        );
    }

    #[test]
    fn test_first_alpha_is_upper() {
        assert!(first_alpha_is_upper("(1) The study"));
        assert!(!first_alpha_is_upper("... and then"));
        assert!(!first_alpha_is_upper("123"));
    }

    #[test]
    fn test_ascii_ratio() {
        assert_eq!(ascii_ratio("abc"), 1.0);
        assert!(ascii_ratio("中文ab") < 0.6);
    }

    #[test]
    fn test_char_boundaries() {
        let s = "aé";
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(ceil_char_boundary(s, 2), 3);
        assert_eq!(floor_char_boundary(s, 10), 3);
    }

    #[test]
    fn test_lines_with_offsets() {
        let text = "ab\r\ncd\n\nef";
        let lines: Vec<_> = lines_with_offsets(text).collect();
        assert_eq!(lines, vec![(0, "ab"), (4, "cd"), (7, ""), (8, "ef")]);
    }
}
