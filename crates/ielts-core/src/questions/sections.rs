//! "Questions N" / "Questions N-M" segmentation shared by the section parsers.

use super::model::NumberedItem;
use crate::text::{lines_with_offsets, normalize_text};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

pub(crate) static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*Questions?[ \t]+(\d{1,3})(?:[ \t]*[-\u{2013}\u{2014}][ \t]*(\d{1,3}))?")
        .expect("valid regex")
});

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?:\s+(.*))?$").expect("valid regex"));

/// One question section, from its heading up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section<'a> {
    /// Byte offset of the heading in the question text.
    pub start: usize,
    pub end: usize,
    /// Trimmed section text, heading included.
    pub text: &'a str,
    pub first: Option<u32>,
    pub last: Option<u32>,
}

impl<'a> Section<'a> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Non-empty trimmed lines.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.text.lines().map(str::trim).filter(|l| !l.is_empty())
    }

    /// Whether `number` falls in the declared "N-M" range. Open when no range was given.
    pub fn declares(&self, number: u32) -> bool {
        match (self.first, self.last) {
            (Some(first), Some(last)) => (first..=last).contains(&number),
            _ => true,
        }
    }
}

/// Split question text at heading lines. Text without any heading is one section.
pub(crate) fn split_sections(text: &str) -> Vec<Section<'_>> {
    let headings: Vec<_> = SECTION_HEADING.captures_iter(text).collect();
    if headings.is_empty() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let start = text.len() - text.trim_start().len();
        return vec![Section {
            start,
            end: start + trimmed.len(),
            text: trimmed,
            first: None,
            last: None,
        }];
    }

    let mut sections = Vec::with_capacity(headings.len());
    for (idx, caps) in headings.iter().enumerate() {
        let Some(whole) = caps.get(0) else { continue };
        let start = whole.start();
        let end = headings
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        let body = text[start..end].trim();
        if body.is_empty() {
            continue;
        }
        sections.push(Section {
            start: start + (text[start..end].len() - text[start..end].trim_start().len()),
            end,
            text: body,
            first: caps.get(1).and_then(|m| m.as_str().parse().ok()),
            last: caps.get(2).and_then(|m| m.as_str().parse().ok()),
        });
    }
    sections
}

/// Whether a line opens a numbered item ("4 Statement" or a bare "4").
pub(crate) fn numbered_line(line: &str) -> Option<(&str, &str)> {
    let caps = NUMBERED_LINE.captures(line.trim())?;
    let number = caps.get(1)?.as_str();
    let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some((number, rest))
}

/// Group lines into numbered items; lines that do not open an item continue the previous one.
pub(crate) fn numbered_items<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<NumberedItem> {
    let mut items: Vec<(String, Vec<&str>)> = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match numbered_line(line) {
            Some((number, rest)) => items.push((number.to_string(), vec![rest])),
            None => {
                if let Some((_, parts)) = items.last_mut() {
                    parts.push(line);
                }
            }
        }
    }
    items
        .into_iter()
        .map(|(number, parts)| NumberedItem::new(number, normalize_text(&parts.join(" "))))
        .filter(|item| !item.text.is_empty())
        .collect()
}

/// Lines of `text` with absolute offsets, starting at `base`.
pub(crate) fn offset_lines(text: &str, base: usize) -> impl Iterator<Item = (usize, &str)> {
    lines_with_offsets(text).map(move |(offset, line)| (base + offset, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sections() {
        let text = "intro\nQuestions 1-3\nfirst\n  Question 4\nsecond\nQuestions 5\u{2013}7\nthird";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].text, "Questions 1-3\nfirst");
        assert_eq!((sections[0].first, sections[0].last), (Some(1), Some(3)));
        assert_eq!(sections[1].text, "Question 4\nsecond");
        assert_eq!(sections[1].last, None);
        assert_eq!(sections[2].last, Some(7));
        assert_eq!(&text[sections[1].span()][..10], "Question 4");
        assert_eq!(sections[2].end, text.len());
    }

    #[test]
    fn test_heading_must_start_line() {
        let text = "Write your answers in boxes 1-3.\nSee Questions 1-3 below.";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].first, None);
    }

    #[test]
    fn test_declared_range() {
        let sections = split_sections("Questions 4-6\nbody");
        assert!(sections[0].declares(5));
        assert!(!sections[0].declares(7));
    }

    #[test]
    fn test_numbered_items_with_continuations() {
        let items = numbered_items(
            "1 The first statement\nwraps onto a second line.\n2\nA bare number line.\n1990 is not a number line."
                .lines(),
        );
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].text,
            "The first statement wraps onto a second line."
        );
        assert_eq!(items[1].number, "2");
        assert_eq!(
            items[1].text,
            "A bare number line. 1990 is not a number line."
        );
    }
}
