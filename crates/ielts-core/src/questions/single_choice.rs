//! Four-option multiple choice: a numbered prompt followed by A-D lines.

use super::model::{Candidate, Question};
use super::sections::{offset_lines, SECTION_HEADING};
use crate::profile::schema::Profile;
use crate::text::{contains_any, normalize_text};
use regex::Regex;
use std::sync::LazyLock;

static CHUNK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,3})(?:\s+(.*))?$").expect("valid regex"));

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-D])(?:\s+(.*))?$").expect("valid regex"));

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]\s+").expect("valid regex"));

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

struct Chunk<'a> {
    start: usize,
    end: usize,
    number: &'a str,
    lines: Vec<&'a str>,
}

pub fn parse(questions_text: &str, profile: &Profile) -> Vec<Candidate> {
    chunks(questions_text)
        .into_iter()
        .filter_map(|chunk| {
            let question = parse_chunk(&chunk, profile)?;
            Some(Candidate::with_span(question, chunk.start..chunk.end))
        })
        .collect()
}

/// Cut the text at every line that opens with a number or a "Questions N" heading.
fn chunks(text: &str) -> Vec<Chunk<'_>> {
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut current: Option<Chunk> = None;

    for (offset, line) in offset_lines(text, 0) {
        if SECTION_HEADING.is_match(line) {
            if let Some(mut chunk) = current.take() {
                chunk.end = offset;
                chunks.push(chunk);
            }
            continue;
        }
        if let Some(caps) = CHUNK_START.captures(line) {
            if let Some(mut chunk) = current.take() {
                chunk.end = offset;
                chunks.push(chunk);
            }
            let number = caps.get(1).map_or("", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str());
            current = Some(Chunk {
                start: offset,
                end: text.len(),
                number,
                lines: vec![rest],
            });
            continue;
        }
        if let Some(chunk) = current.as_mut() {
            chunk.lines.push(line);
        }
    }
    chunks.extend(current);
    chunks
}

fn parse_chunk(chunk: &Chunk<'_>, profile: &Profile) -> Option<Question> {
    let t = &profile.thresholds;
    let mut prompt_parts: Vec<&str> = Vec::new();
    let mut options: Vec<Vec<&str>> = Vec::new();

    for line in &chunk.lines {
        let trimmed = line.trim();
        if let Some(caps) = OPTION_LINE.captures(trimmed) {
            let expected = LETTERS.get(options.len()).copied();
            let letter = caps[1].chars().next();
            if letter.is_some() && letter == expected {
                options.push(vec![caps.get(2).map_or("", |m| m.as_str())]);
                continue;
            }
        }
        match options.last_mut() {
            Some(option) => option.push(trimmed),
            None => prompt_parts.push(trimmed),
        }
    }

    if options.len() != LETTERS.len() {
        return None;
    }

    let prompt = normalize_text(&prompt_parts.join(" "));
    let prompt_len = prompt.chars().count();
    if prompt_len < t.mcq_prompt_min_len || prompt_len > t.mcq_prompt_max_len {
        return None;
    }
    if contains_any(&prompt, &profile.mcq_instruction_keywords) {
        return None;
    }

    let options: Vec<String> = options
        .iter()
        .map(|parts| normalize_text(&parts.join(" ")))
        .collect();
    let lengths: Vec<usize> = options.iter().map(|o| o.chars().count()).collect();
    let average = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    if lengths.iter().any(|&l| l < t.mcq_min_option_len || l > t.mcq_max_option_len)
        || average < t.mcq_min_avg_option_len
    {
        return None;
    }
    if looks_like_judgement_scale(&options) {
        return None;
    }

    Some(Question::SingleChoice {
        number: chunk.number.to_string(),
        text: last_sentence(&prompt).to_string(),
        options,
    })
}

/// YES/NO/NOT GIVEN or TRUE/FALSE/NOT GIVEN laid out like options.
fn looks_like_judgement_scale(options: &[String]) -> bool {
    let joined = options.join(" ").to_uppercase();
    let first_two: Vec<String> = options.iter().take(2).map(|o| o.to_uppercase()).collect();
    joined.contains("NOT GIVEN")
        || first_two == ["YES", "NO"]
        || first_two == ["TRUE", "FALSE"]
}

fn last_sentence(prompt: &str) -> &str {
    match SENTENCE_BREAK.find_iter(prompt).last() {
        Some(m) if m.end() < prompt.len() => &prompt[m.end()..],
        _ => prompt,
    }
}
