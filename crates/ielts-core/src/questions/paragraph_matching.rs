//! "Which paragraph contains the following information?"

use super::model::{Candidate, NumberedItem, Question};
use super::sections::{numbered_items, numbered_line, split_sections};
use crate::profile::schema::Profile;
use crate::text::{ascii_ratio, contains_any, normalize_text};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static LETTER_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])\s*-\s*([A-Z])").expect("valid regex"));

static LISTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:paragraphs?|sections?)\s+([A-Z][^.;]*)").expect("valid regex")
});

static LISTING_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;,\s]+").expect("valid regex"));

pub fn parse(questions_text: &str, profile: &Profile) -> Vec<Candidate> {
    let t = &profile.thresholds;
    let mut candidates = Vec::new();

    for section in split_sections(questions_text) {
        if !contains_any(section.text, &profile.paragraph_matching_phrases) {
            continue;
        }

        let mut lines = section.lines();
        let Some(title) = lines.next().map(normalize_text) else {
            continue;
        };
        let mut instructions = Vec::new();
        let mut statement_lines = Vec::new();
        for line in lines {
            if statement_lines.is_empty() && numbered_line(line).is_none() {
                instructions.push(normalize_text(line));
            } else {
                statement_lines.push(line);
            }
        }

        let mut seen = HashSet::new();
        let statements: Vec<NumberedItem> = numbered_items(statement_lines)
            .into_iter()
            .filter(|s| {
                s.text.chars().count() >= t.statement_min_len
                    && ascii_ratio(&s.text) >= t.min_ascii_ratio
            })
            .filter(|s| seen.insert(s.number.clone()))
            .collect();
        if statements.is_empty() {
            continue;
        }

        let options = paragraph_options(&instructions.join(" "));
        candidates.push(Candidate::with_span(
            Question::ParagraphMatching {
                title,
                instructions,
                statements,
                options,
            },
            section.span(),
        ));
    }

    candidates
}

/// Valid paragraph letters from "A-F" ranges, else from "paragraphs A, B and D".
fn paragraph_options(instructions: &str) -> Vec<String> {
    let mut letters: Vec<char> = Vec::new();
    let mut push = |c: char| {
        if !letters.contains(&c) {
            letters.push(c);
        }
    };

    let mut found_range = false;
    for caps in LETTER_RANGE.captures_iter(instructions) {
        let (Some(from), Some(to)) = (caps[1].chars().next(), caps[2].chars().next()) else {
            continue;
        };
        found_range = true;
        if from <= to {
            (from..=to).for_each(&mut push);
        } else {
            (to..=from).rev().for_each(&mut push);
        }
    }

    if !found_range {
        for caps in LISTING.captures_iter(instructions) {
            for token in LISTING_SEPARATOR.split(&caps[1]) {
                let mut chars = token.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    if c.is_ascii_uppercase() {
                        push(c);
                    }
                }
            }
        }
    }

    letters.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::academic;

    const SECTION: &str = "Questions 1-4\n\
        Reading Passage 1 has six paragraphs, A-F.\n\
        Which paragraph contains the following information?\n\
        1 a reference to the cost of early glass\n\
        2 an explanation of how\nsand is melted\n\
        2 a repeated number that should be dropped\n\
        3 short one\n\
        4 \u{4e2d}\u{6587}\u{6ce8}\u{91ca}\u{4e2d}\u{6587}\u{6ce8}\u{91ca}\u{4e2d}\u{6587}\u{6ce8}\u{91ca}\u{4e2d}\u{6587}\u{6ce8}\u{91ca}ab";

    #[test]
    fn test_statements_and_range() {
        let candidates = parse(SECTION, &academic());
        assert_eq!(candidates.len(), 1);
        match &candidates[0].question {
            Question::ParagraphMatching {
                title,
                instructions,
                statements,
                options,
            } => {
                assert_eq!(title, "Questions 1-4");
                assert_eq!(instructions.len(), 2);
                assert_eq!(statements.len(), 2);
                assert_eq!(statements[1].text, "an explanation of how sand is melted");
                assert_eq!(options, &["A", "B", "C", "D", "E", "F"]);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(candidates[0].span, Some(0..SECTION.len()));
    }

    #[test]
    fn test_listing_options() {
        assert_eq!(
            paragraph_options("Use paragraphs A-C only, not paragraphs E or F."),
            vec!["A", "B", "C"]
        );
        assert_eq!(
            paragraph_options("Choose from paragraphs B, C and E."),
            vec!["B", "C", "E"]
        );
    }

    #[test]
    fn test_gate() {
        let text = "Questions 1-2\nMatch each statement.\n1 a statement long enough here\n";
        assert!(parse(text, &academic()).is_empty());
    }
}
