//! Matching headings: a roman-numeral heading list and "N Paragraph X" slots.

use super::model::{Candidate, KeyedItem, ParagraphRef, Question};
use super::sections::split_sections;
use crate::split::{ROMAN_LEAD, ROMAN_ONLY};
use crate::text::normalize_text;
use regex::Regex;
use std::sync::LazyLock;

static PARAGRAPH_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,3})\s+(?:Paragraph|Section)\s+([A-Z])$").expect("valid regex")
});

static PARAGRAPH_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:Paragraph|Section)\s+([A-Z])$").expect("valid regex"));

static NUMBER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})$").expect("valid regex"));

static LIST_OF_HEADINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^List of Headings").expect("valid regex"));

#[derive(Debug, Default)]
struct HeadingScan {
    instructions: Vec<String>,
    headings: Vec<KeyedItem>,
    paragraphs: Vec<ParagraphRef>,
}

pub fn parse(questions_text: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for section in split_sections(questions_text) {
        if !section.lower().contains("heading") {
            continue;
        }
        let mut lines = section.lines();
        let Some(title) = lines.next().map(normalize_text) else {
            continue;
        };
        let mut scan = scan_lines(lines);

        if scan.headings.is_empty() && !scan.paragraphs.is_empty() {
            scan.headings = find_heading_list(&questions_text[section.end..]);
        }
        if scan.headings.is_empty() && scan.paragraphs.is_empty() {
            continue;
        }

        candidates.push(Candidate::with_span(
            Question::MatchingHeadings {
                title,
                instructions: scan.instructions,
                headings: scan.headings,
                paragraphs: scan.paragraphs,
            },
            section.span(),
        ));
    }

    candidates
}

fn scan_lines<'a>(lines: impl Iterator<Item = &'a str>) -> HeadingScan {
    let mut scan = HeadingScan::default();
    let mut pending_numeral: Option<&str> = None;
    let mut pending_number: Option<&str> = None;
    let mut list_started = false;

    for line in lines {
        if let Some(numeral) = pending_numeral.take() {
            if !ROMAN_ONLY.is_match(line) && !PARAGRAPH_PAIR.is_match(line) {
                scan.headings.push(KeyedItem::new(numeral, normalize_text(line)));
                continue;
            }
        }
        if let Some(number) = pending_number.take() {
            if let Some(caps) = PARAGRAPH_ONLY.captures(line) {
                push_paragraph(&mut scan.paragraphs, number, &caps[1]);
                continue;
            }
        }

        if ROMAN_ONLY.is_match(line) {
            list_started = true;
            pending_numeral = Some(line);
            continue;
        }
        if let Some(caps) = ROMAN_LEAD.captures(line) {
            list_started = true;
            scan.headings.push(KeyedItem::new(&caps[1], normalize_text(&caps[2])));
            continue;
        }
        if let Some(caps) = PARAGRAPH_PAIR.captures(line) {
            list_started = true;
            push_paragraph(&mut scan.paragraphs, &caps[1], &caps[2]);
            continue;
        }
        if let Some(caps) = NUMBER_ONLY.captures(line) {
            pending_number = caps.get(1).map(|m| m.as_str());
            continue;
        }
        if LIST_OF_HEADINGS.is_match(line) {
            list_started = true;
            continue;
        }
        if !list_started {
            scan.instructions.push(normalize_text(line));
        }
    }

    scan
}

fn push_paragraph(paragraphs: &mut Vec<ParagraphRef>, number: &str, letter: &str) {
    if let Some(letter) = letter.chars().next() {
        paragraphs.push(ParagraphRef {
            number: number.to_string(),
            letter: letter.to_ascii_uppercase(),
        });
    }
}

/// Look further on for a "List of Headings" block and read its entries.
fn find_heading_list(text: &str) -> Vec<KeyedItem> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .skip_while(|l| !LIST_OF_HEADINGS.is_match(l))
        .skip(1);

    let mut headings = Vec::new();
    while let Some(line) = lines.next() {
        if let Some(caps) = ROMAN_LEAD.captures(line) {
            headings.push(KeyedItem::new(&caps[1], normalize_text(&caps[2])));
        } else if ROMAN_ONLY.is_match(line) {
            match lines.next() {
                Some(text) => headings.push(KeyedItem::new(line, normalize_text(text))),
                None => break,
            }
        } else {
            break;
        }
    }
    headings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(text: &str) -> Question {
        parse(text)
            .into_iter()
            .next()
            .map(|c| c.question)
            .expect("one section")
    }

    #[test]
    fn test_heading_list_round_trip() {
        let text = "List of Headings\n\
                    i The origins of glass\n\
                    ii Glass in the modern world\n\
                    iii\nA royal monopoly\n\
                    iv Trade across the empire\n\
                    1 Paragraph A\n2 Paragraph B\n3\nParagraph C\n4 Paragraph D";
        match first(text) {
            Question::MatchingHeadings {
                headings,
                paragraphs,
                ..
            } => {
                assert_eq!(headings.len(), 4);
                assert_eq!(headings[2], KeyedItem::new("iii", "A royal monopoly"));
                assert_eq!(paragraphs.len(), 4);
                assert!(paragraphs
                    .iter()
                    .all(|p| ['A', 'B', 'C', 'D'].contains(&p.letter)));
                assert_eq!(paragraphs[2].number, "3");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_instructions_before_list() {
        let text = "Questions 1-2\n\
                    Choose the correct heading for each paragraph.\n\
                    List of Headings\n\
                    i Early days\nii Later days\n\
                    1 Paragraph A\n2 Paragraph B";
        match first(text) {
            Question::MatchingHeadings {
                title,
                instructions,
                ..
            } => {
                assert_eq!(title, "Questions 1-2");
                assert_eq!(
                    instructions,
                    vec!["Choose the correct heading for each paragraph."]
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_heading_list_found_later() {
        let text = "Questions 1-2\n\
                    Choose the correct heading for paragraphs A and B.\n\
                    1 Paragraph A\n2 Paragraph B\n\
                    Questions 3-5\n\
                    List of Headings\n\
                    i Early days\nii Later days\n\
                    Other text";
        match first(text) {
            Question::MatchingHeadings {
                headings,
                paragraphs,
                ..
            } => {
                assert_eq!(paragraphs.len(), 2);
                assert_eq!(
                    headings,
                    vec![
                        KeyedItem::new("i", "Early days"),
                        KeyedItem::new("ii", "Later days")
                    ]
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_gate() {
        assert!(parse("Questions 1-2\n1 Paragraph A\n2 Paragraph B").is_empty());
    }
}
