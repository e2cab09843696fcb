use crate::text::{first_alpha_is_upper, normalize_whitespace};
use regex::Regex;
use std::sync::LazyLock;

static LETTER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]$").expect("valid regex"));

static INLINE_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<letter>[A-Z])(?:[.)]\s*|\s+)(?P<body>.+)$").expect("valid regex")
});

/// Result of scanning a passage for lettered paragraphs.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct LetterScan {
    /// Non-blank lines seen before the first paragraph letter.
    pub pre_letter: Vec<String>,
    /// `(letter, whitespace-joined text)` per lettered paragraph, in order.
    pub sections: Vec<(char, String)>,
}

struct Section {
    letter: char,
    lines: Vec<String>,
}

/// Scan raw lines for paragraph letters, standalone or inline.
pub(crate) fn extract_letter_sections(raw_passage: &str) -> LetterScan {
    let lines: Vec<&str> = raw_passage.lines().map(str::trim).collect();
    let mut scan = LetterScan::default();
    let mut current: Option<Section> = None;
    let mut closed: Vec<Section> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = INLINE_LETTER.captures(line) {
            let letter = caps["letter"].chars().next().unwrap_or('A');
            let body = caps["body"].trim();
            if first_alpha_is_upper(body) {
                closed.extend(current.take());
                current = Some(Section {
                    letter,
                    lines: vec![body.to_string()],
                });
            } else {
                push_line(&mut current, &mut scan.pre_letter, line);
            }
            continue;
        }

        if LETTER_ONLY.is_match(line) {
            let next = lines[idx + 1..].iter().find(|l| !l.is_empty());
            if next.is_some_and(|n| first_alpha_is_upper(n)) {
                closed.extend(current.take());
                current = Some(Section {
                    letter: line.chars().next().unwrap_or('A'),
                    lines: Vec::new(),
                });
                continue;
            }
        }

        push_line(&mut current, &mut scan.pre_letter, line);
    }
    closed.extend(current);

    scan.sections = closed
        .into_iter()
        .filter_map(|s| {
            let text = normalize_whitespace(&s.lines.join(" "));
            (!text.is_empty()).then_some((s.letter, text))
        })
        .collect();
    scan
}

fn push_line(current: &mut Option<Section>, pre_letter: &mut Vec<String>, line: &str) {
    match current {
        Some(section) => section.lines.push(line.to_string()),
        None => pre_letter.push(line.to_string()),
    }
}
