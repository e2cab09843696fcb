//! Summary completion with a lettered word bank, reconstructed from layout blocks.

use super::model::{Candidate, KeyedItem, Question};
use super::sections::split_sections;
use crate::extraction::TextBlock;
use crate::profile::schema::Profile;
use crate::text::{contains_any, normalize_text};
use regex::Regex;
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

static BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<num>\d{1,2})\s*_{2,}").expect("valid regex"));

const STOP_PREFIXES: [&str; 3] = [
    "questions ",
    "choose the correct letter",
    "write the correct letter",
];

pub fn parse(questions_text: &str, blocks: &[&TextBlock], profile: &Profile) -> Vec<Candidate> {
    if blocks.is_empty() || !contains_any(questions_text, &profile.summary_phrases) {
        return Vec::new();
    }

    let texts: Vec<String> = blocks.iter().map(|b| normalize_text(&b.text)).collect();
    let Some(anchor) = texts.iter().position(|t| BLANK.is_match(t)) else {
        return Vec::new();
    };
    let page = blocks[anchor].page_index;
    let same_page = |idx: usize| blocks[idx].page_index == page;

    let lookback = anchor.saturating_sub(profile.thresholds.summary_option_lookback);
    let mut option_lines: Vec<&str> = (lookback..anchor)
        .filter(|&idx| same_page(idx) && is_option_line(&texts[idx]))
        .map(|idx| texts[idx].as_str())
        .collect();

    let mut start = anchor;
    while start > 0 && same_page(start - 1) {
        let previous = &texts[start - 1];
        if !previous.is_empty()
            && (previous.to_lowercase().starts_with("questions ") || is_option_line(previous))
        {
            break;
        }
        start -= 1;
    }

    let mut summary_lines: Vec<&str> = Vec::new();
    for idx in start..texts.len() {
        if !same_page(idx) {
            break;
        }
        let text = texts[idx].as_str();
        if text.is_empty() {
            continue;
        }
        if idx >= anchor && is_option_line(text) {
            if !option_lines.contains(&text) {
                option_lines.push(text);
            }
            continue;
        }
        let lower = text.to_lowercase();
        if idx > anchor && STOP_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            break;
        }
        summary_lines.push(text);
    }

    // Keep one line of context before the first blank.
    if let Some(first_blank) = summary_lines.iter().position(|l| BLANK.is_match(l)) {
        summary_lines.drain(..first_blank.saturating_sub(1));
    }
    let summary = summary_lines.join("\n").trim().to_string();
    if summary.is_empty() {
        return Vec::new();
    }

    let mut blanks: Vec<String> = Vec::new();
    let display = BLANK.replace_all(&summary, |caps: &regex::Captures| {
        let number = caps["num"].to_string();
        let marker = format!("[{}]", number);
        if !blanks.contains(&number) {
            blanks.push(number);
        }
        marker
    });
    let display = display.into_owned();

    let options = parse_options(&option_lines);
    if blanks.is_empty() || options.is_empty() {
        return Vec::new();
    }

    let span = blank_span(questions_text, &blanks);
    let position = span.as_ref().map_or(0, |s| s.start);
    vec![Candidate {
        question: Question::SummaryCompletion {
            text: display,
            blanks,
            options,
        },
        span,
        position,
    }]
}

/// At least two single-capital tokens, like "A grain B salt C iron".
fn is_option_line(text: &str) -> bool {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c| matches!(c, '.' | ',' | '(' | ')')))
        .filter(|t| is_key_token(t))
        .count()
        >= 2
}

fn is_key_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Read "A word B other words" runs into keyed options, first key wins, sorted by key.
fn parse_options(lines: &[&str]) -> Vec<KeyedItem> {
    let joined = lines.join(" ").replace('.', " ");
    let tokens: Vec<&str> = joined.split_whitespace().collect();
    let mut options: BTreeMap<String, String> = BTreeMap::new();

    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx].trim_matches(|c| matches!(c, ',' | '(' | ')'));
        idx += 1;
        if !is_key_token(token) || options.contains_key(token) {
            continue;
        }
        let mut value: Vec<&str> = Vec::new();
        while idx < tokens.len() {
            let next = tokens[idx].trim_matches(|c| matches!(c, ',' | '(' | ')'));
            if is_key_token(next) {
                break;
            }
            value.push(tokens[idx]);
            idx += 1;
        }
        if !value.is_empty() {
            options.insert(token.to_string(), value.join(" "));
        }
    }

    options
        .into_iter()
        .map(|(key, text)| KeyedItem::new(key, text))
        .collect()
}

/// Question-text range covering the sections that hold these blanks.
fn blank_span(questions_text: &str, blanks: &[String]) -> Option<Range<usize>> {
    let hits: Vec<Range<usize>> = BLANK
        .captures_iter(questions_text)
        .filter(|caps| blanks.iter().any(|b| b == &caps["num"]))
        .filter_map(|caps| caps.get(0).map(|m| m.range()))
        .collect();
    let first = hits.first()?.start;
    let last = hits.last()?.end;

    let sections = split_sections(questions_text);
    let covering: Vec<Range<usize>> = sections
        .iter()
        .map(|s| s.span())
        .filter(|span| hits.iter().any(|h| span.start <= h.start && h.end <= span.end))
        .collect();
    match (covering.first(), covering.last()) {
        (Some(a), Some(b)) => Some(a.start.min(first)..b.end.max(last)),
        _ => Some(first..last),
    }
}
