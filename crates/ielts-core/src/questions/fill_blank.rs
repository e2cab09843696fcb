//! Numbered gaps in sentence, note and summary completion.
//!
//! Well-formed gaps are a number followed by an underscore run. Documents
//! whose gaps lost their underscore runs fall back to number-bounded chunks
//! that still contain an underscore.

use super::model::{Candidate, Question};
use super::sections::split_sections;
use crate::profile::schema::Profile;
use crate::text::{ceil_char_boundary, contains_any, floor_char_boundary, normalize_whitespace};
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

static GAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<num>\d{1,2})\s*[).:-]?\s*_{2,}(?P<after>[^0-9_]{0,200})")
        .expect("valid regex")
});

static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));

static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("valid regex"));

static SMALL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}\b").expect("valid regex"));

static SENTENCE_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.;!?]").expect("valid regex"));

const GAP_MARK: &str = "____";

pub fn parse(questions_text: &str, profile: &Profile) -> Vec<Candidate> {
    let regions = regions(questions_text, profile);
    let mut seen: HashSet<String> = HashSet::new();
    let mut found = Vec::new();

    for region in &regions {
        found.extend(primary(questions_text, region.clone(), profile, &mut seen));
    }
    if !found.is_empty() {
        return found;
    }

    for region in &regions {
        found.extend(fallback(questions_text, region.clone(), &mut seen));
    }
    found
}

/// Sections that announce a completion task, else sections with an underscore run.
fn regions(text: &str, profile: &Profile) -> Vec<Range<usize>> {
    let sections = split_sections(text);
    let announced: Vec<Range<usize>> = sections
        .iter()
        .filter(|s| contains_any(s.text, &profile.fill_blank_phrases))
        .map(|s| s.span())
        .collect();
    if !announced.is_empty() {
        return announced;
    }
    let with_gaps: Vec<Range<usize>> = sections
        .iter()
        .filter(|s| UNDERSCORE_RUN.is_match(s.text))
        .map(|s| s.span())
        .collect();
    if !with_gaps.is_empty() {
        return with_gaps;
    }
    vec![0..text.len()]
}

fn primary(
    text: &str,
    region: Range<usize>,
    profile: &Profile,
    seen: &mut HashSet<String>,
) -> Vec<Candidate> {
    let t = &profile.thresholds;
    let markers = &profile.fill_blank_instruction_markers;
    let body = &text[region.clone()];
    let mut found = Vec::new();

    for caps in GAP.captures_iter(body) {
        let (Some(whole), Some(num)) = (caps.get(0), caps.name("num")) else {
            continue;
        };
        if seen.contains(num.as_str()) {
            continue;
        }

        let window_start = floor_char_boundary(
            body,
            num.start().saturating_sub(t.fill_blank_context_window),
        );
        let prefix = context_before(
            &body[window_start..num.start()],
            markers,
            t.fill_blank_context_words,
        );

        let after = caps.name("after").map_or("", |m| m.as_str()).trim_start();
        let (punct, after) = match after.chars().next() {
            Some(c @ ('.' | ';' | ',' | '!' | '?')) => (Some(c), &after[c.len_utf8()..]),
            _ => (None, after),
        };
        let suffix = context_after(after, markers, t.fill_blank_context_words);

        let mut parts: Vec<String> = Vec::new();
        if !prefix.is_empty() {
            parts.push(prefix);
        }
        parts.push(match punct {
            Some(p) => format!("{}{}", GAP_MARK, p),
            None => GAP_MARK.to_string(),
        });
        // A capital after closing punctuation starts the next sentence.
        let next_sentence =
            punct.is_some() && suffix.chars().next().is_some_and(char::is_uppercase);
        if !suffix.is_empty() && !next_sentence {
            parts.push(suffix);
        }

        let snippet = parts
            .join(" ")
            .trim()
            .trim_matches(|c| matches!(c, '-' | ':' | ';' | ','))
            .to_string();
        if snippet.is_empty() || contains_any(&snippet, markers) {
            continue;
        }

        seen.insert(num.as_str().to_string());
        found.push(Candidate::with_span(
            Question::FillBlank {
                number: num.as_str().to_string(),
                text: snippet,
            },
            region.start + whole.start()..region.start + whole.end(),
        ));
    }

    found
}

fn context_before(chunk: &str, markers: &[String], words: usize) -> String {
    let cleaned = clean(chunk, markers);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let tail = tokens[tokens.len().saturating_sub(words)..].join(" ");
    let without_numbers = SMALL_NUMBER.replace_all(&tail, "");
    let last = SENTENCE_MARK.split(&without_numbers).last().unwrap_or("");
    normalize_whitespace(last)
}

fn context_after(chunk: &str, markers: &[String], words: usize) -> String {
    let cleaned = clean(chunk, markers);
    let head = cleaned.split_whitespace().take(words).collect::<Vec<_>>().join(" ");
    let without_numbers = SMALL_NUMBER.replace_all(&head, "");
    let first = SENTENCE_MARK.split(&without_numbers).next().unwrap_or("");
    normalize_whitespace(first)
}

fn clean(chunk: &str, markers: &[String]) -> String {
    strip_instructions(&normalize_whitespace(&UNDERSCORES.replace_all(chunk, " ")), markers)
}

/// Drop everything up to and including the last instruction marker.
fn strip_instructions(value: &str, markers: &[String]) -> String {
    let mut value = value.to_string();
    for marker in markers {
        // ASCII lowering keeps byte offsets aligned with `value`.
        if let Some(idx) = value.to_ascii_lowercase().rfind(marker.as_str()) {
            let cut = ceil_char_boundary(&value, idx + marker.len());
            value = value[cut..].to_string();
        }
    }
    value.trim().to_string()
}

/// Number-bounded chunks that still contain an underscore.
fn fallback(text: &str, region: Range<usize>, seen: &mut HashSet<String>) -> Vec<Candidate> {
    let body = &text[region.clone()];
    let numbers: Vec<regex::Match> = SMALL_NUMBER.find_iter(body).collect();
    let mut found = Vec::new();

    for (idx, number) in numbers.iter().enumerate() {
        if seen.contains(number.as_str()) {
            continue;
        }
        let end = numbers.get(idx + 1).map_or(body.len(), |next| next.start());
        let chunk = &body[number.end()..end];
        if !chunk.contains('_') {
            continue;
        }
        let cleaned = normalize_whitespace(chunk);
        if cleaned.is_empty() {
            continue;
        }
        seen.insert(number.as_str().to_string());
        found.push(Candidate::with_span(
            Question::FillBlank {
                number: number.as_str().to_string(),
                text: cleaned,
            },
            region.start + number.start()..region.start + end,
        ));
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::academic;

    fn gaps(text: &str) -> Vec<(String, String)> {
        parse(text, &academic())
            .into_iter()
            .map(|c| match c.question {
                Question::FillBlank { number, text } => (number, text),
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_snippets_around_gaps() {
        let text = "Questions 5-7\n\
                    Complete the sentences below.\n\
                    Write NO MORE THAN TWO WORDS for each answer.\n\
                    5 Glass was first made in 5 ________ around 3500 BC.\n\
                    6 Romans blew glass into 6 ________. It was cheap.\n\
                    7 ________ replaced wood in windows";
        let found = gaps(text);
        assert_eq!(
            found,
            vec![
                ("5".to_string(), "Glass was first made in ____ around".to_string()),
                ("6".to_string(), "Romans blew glass into ____.".to_string()),
                ("7".to_string(), "____ replaced wood in windows".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans_are_in_question_text() {
        let text = "Questions 1-2\nWhat follows.\n\nQuestions 3-4\nComplete the notes.\nsalt from 3 _____ mines";
        let candidates = parse(text, &academic());
        assert_eq!(candidates.len(), 1);
        let span = candidates[0].span.clone().unwrap();
        assert!(text[span].starts_with("3 _____ mines"));
    }

    #[test]
    fn test_fallback_chunks() {
        let text = "Questions 8-9\nComplete the notes.\n8 the _ kiln\n9 a _ pipe";
        let found = gaps(text);
        assert_eq!(
            found,
            vec![
                ("8".to_string(), "the _ kiln".to_string()),
                ("9".to_string(), "a _ pipe".to_string()),
            ]
        );
    }

    #[test]
    fn test_strip_instructions() {
        let markers = academic().fill_blank_instruction_markers;
        assert_eq!(
            strip_instructions("Complete the notes below. Salt is", &markers),
            "below. Salt is"
        );
    }
}
