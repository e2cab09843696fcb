//! Short-answer questions under a "NO MORE THAN N WORDS" instruction.

use super::model::{Candidate, Question};
use super::sections::{numbered_line, offset_lines, split_sections};
use crate::profile::schema::Profile;
use crate::text::{contains_any, normalize_text};
use regex::Regex;
use std::sync::LazyLock;

static WORD_LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:no more than|maximum of|maximum)\s+(\w+)\s+(?:words?|numbers?)")
        .expect("valid regex")
});

struct Item<'a> {
    number: &'a str,
    parts: Vec<&'a str>,
    start: usize,
    end: usize,
}

pub fn parse(questions_text: &str, profile: &Profile) -> Vec<Candidate> {
    if !WORD_LIMIT.is_match(questions_text) {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for section in split_sections(questions_text) {
        let Some(limit) = WORD_LIMIT.captures(section.text) else {
            continue;
        };
        let word_limit = limit[1].to_uppercase();

        let mut items: Vec<Item> = Vec::new();
        for (offset, line) in offset_lines(section.text, section.start) {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let opens_item = numbered_line(trimmed).filter(|(number, rest)| {
                !rest.is_empty() && number.parse::<u32>().is_ok_and(|n| section.declares(n))
            });
            if let Some((number, rest)) = opens_item {
                items.push(Item {
                    number,
                    parts: vec![rest],
                    start: offset,
                    end: offset + line.len(),
                });
            } else if let Some(item) = items.last_mut() {
                item.parts.push(trimmed);
                item.end = offset + line.len();
            }
        }

        for item in items {
            let text = normalize_text(&item.parts.join(" "));
            if contains_any(&text, &profile.short_answer_instruction_markers) {
                continue;
            }
            if profile.short_answer_requires_question_mark && !text.contains('?') {
                continue;
            }
            candidates.push(Candidate::with_span(
                Question::ShortAnswer {
                    number: item.number.to_string(),
                    text,
                    word_limit: word_limit.clone(),
                },
                item.start..item.end,
            ));
        }
    }

    candidates
}
