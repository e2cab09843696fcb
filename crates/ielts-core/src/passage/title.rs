use crate::profile::schema::Thresholds;
use crate::text::{contains_any, normalize_whitespace, starts_with_any};

/// Pick the passage title from the first non-empty lines.
///
/// The result never contains a forbidden keyword; an empty title is
/// returned when every candidate line is contaminated.
pub(crate) fn extract_title(
    raw_passage: &str,
    instruction_prefixes: &[String],
    forbidden_keywords: &[String],
    thresholds: &Thresholds,
) -> String {
    let lines: Vec<String> = raw_passage
        .lines()
        .map(normalize_whitespace)
        .filter(|l| !l.is_empty())
        .collect();

    let clean = |line: &str| {
        !starts_with_any(line, instruction_prefixes) && !contains_any(line, forbidden_keywords)
    };

    let probable = lines
        .iter()
        .take(thresholds.title_scan_lines)
        .find(|line| clean(line) && is_title_shaped(line, thresholds));
    if let Some(title) = probable {
        return title.clone();
    }

    if let Some(first_clean) = lines.iter().find(|line| clean(line)) {
        return first_clean.clone();
    }

    match lines.first() {
        Some(first) if !contains_any(first, forbidden_keywords) => first.clone(),
        _ => String::new(),
    }
}

fn is_title_shaped(line: &str, thresholds: &Thresholds) -> bool {
    let len = line.chars().count();
    let single_letter = len == 1 && line.chars().all(|c| c.is_alphabetic());
    let sentence_end = line.ends_with(['.', ',', ';', ':']);
    !single_letter
        && len <= thresholds.title_max_len
        && !sentence_end
        && line.split_whitespace().count() <= thresholds.title_max_words
}
