//! YES/NO/NOT GIVEN and TRUE/FALSE/NOT GIVEN judgement sections.

use super::model::{Candidate, Question};
use super::sections::{numbered_items, offset_lines, SECTION_HEADING};
use crate::text::normalize_text;
use regex::Regex;
use std::sync::LazyLock;

static YES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bYES\b").expect("valid regex"));
static TRUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bTRUE\b").expect("valid regex"));
static NOT_GIVEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bNOT\s+GIVEN\b").expect("valid regex"));

static STATEMENT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d{1,3}\s+\S").expect("valid regex"));

/// A word bank ("A  word") or a "List of ..." block ends the statements.
static LETTER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\s+\w").expect("valid regex"));

static LIST_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^List of").expect("valid regex"));

pub fn parse(questions_text: &str) -> Vec<Candidate> {
    let lines: Vec<(usize, &str)> = offset_lines(questions_text, 0).collect();
    let mut candidates = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (offset, line) = lines[i];
        let Some(heading) = SECTION_HEADING.captures(line) else {
            i += 1;
            continue;
        };
        let first: Option<u32> = heading.get(1).and_then(|m| m.as_str().parse().ok());
        let last: Option<u32> = heading.get(2).and_then(|m| m.as_str().parse().ok());

        let mut j = i + 1;
        while j < lines.len() && !SECTION_HEADING.is_match(lines[j].1) {
            j += 1;
        }
        let section: Vec<&str> = lines[i..j].iter().map(|(_, l)| *l).collect();
        i = j;

        if let Some(question) = parse_section(&section, first, last) {
            candidates.push(Candidate::at(question, offset));
        }
    }

    candidates
}

fn parse_section(section: &[&str], first: Option<u32>, last: Option<u32>) -> Option<Question> {
    let joined = section.join(" ");
    let options = if YES.is_match(&joined) && NOT_GIVEN.is_match(&joined) {
        ["YES", "NO", "NOT GIVEN"]
    } else if TRUE.is_match(&joined) && NOT_GIVEN.is_match(&joined) {
        ["TRUE", "FALSE", "NOT GIVEN"]
    } else {
        return None;
    };

    let start = section.iter().position(|l| STATEMENT_START.is_match(l))?;
    let mut preamble = section[..start]
        .iter()
        .map(|l| normalize_text(l))
        .filter(|l| !l.is_empty());
    let title = preamble.next().unwrap_or_else(|| normalize_text(section[0]));
    let instructions: Vec<String> = preamble.collect();

    let statement_lines = section[start..]
        .iter()
        .map(|l| l.trim())
        .take_while(|l| !ends_statements(l));

    let statements: Vec<_> = numbered_items(statement_lines)
        .into_iter()
        .filter(|s| match (first, last, s.number.parse::<u32>()) {
            (Some(first), Some(last), Ok(n)) => (first..=last).contains(&n),
            _ => true,
        })
        .collect();
    if statements.is_empty() {
        return None;
    }

    Some(Question::YesNoNotGiven {
        title,
        instructions,
        statements,
        options: options.iter().map(|o| o.to_string()).collect(),
    })
}

fn ends_statements(line: &str) -> bool {
    LETTER_LINE.is_match(line) || LIST_OF.is_match(line)
}
