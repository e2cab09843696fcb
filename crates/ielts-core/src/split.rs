//! Locate the boundary between the reading passage and its questions.

use crate::error::IeltsError;
use crate::profile::schema::Profile;
use crate::text::{ceil_char_boundary, lines_with_offsets, starts_with_any};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::LazyLock;

static LIST_OF_HEADINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)List of Headings[ \t]*\r?\n").expect("valid regex"));

/// A roman numeral alone on its line.
pub(crate) static ROMAN_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:i{1,3}|iv|v|vi{0,3}|ix|x|xi{0,3})$").expect("valid regex")
});

/// A roman numeral followed by heading text on the same line.
pub(crate) static ROMAN_LEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(i{1,3}|iv|v|vi{0,3}|ix|x|xi{0,3})\s+(.+)$").expect("valid regex")
});

static NEXT_QUESTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\n\s*Questions?\s+\d+").expect("valid regex"));

static READING_PASSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)READING PASSAGE\s+\d+").expect("valid regex"));

static QUESTIONS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*Questions?\s+\d+").expect("valid regex"));

static BELOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)below\.").expect("valid regex"));

/// How far past a "READING PASSAGE N" header the "... below." instruction may end.
const HEADER_INSTRUCTION_WINDOW: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    HeadingList,
    ReadingPassageHeader,
    KeywordAnchor,
    /// No boundary found; passage and questions are both the whole text.
    Unsplit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub passage: String,
    pub questions: String,
    pub strategy: SplitStrategy,
}

/// Splits raw document text into passage and question regions.
#[derive(Debug, Clone)]
pub struct Splitter {
    question_patterns: Vec<Regex>,
    instruction_prefixes: Vec<String>,
    title_max_len: usize,
}

impl Splitter {
    pub fn new(profile: &Profile) -> Result<Self, IeltsError> {
        let question_patterns = profile
            .question_section_patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        IeltsError::ProfileInvalid(format!("pattern '{}': {}", p, e))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut instruction_prefixes = profile.title_instruction_prefixes.clone();
        instruction_prefixes.extend(profile.passage_instruction_prefixes.iter().cloned());

        Ok(Splitter {
            question_patterns,
            instruction_prefixes,
            title_max_len: profile.thresholds.heading_list_title_max_len,
        })
    }

    /// Split `full_text`. Never fails; the worst case returns the whole
    /// trimmed text as both passage and questions.
    pub fn split(&self, full_text: &str) -> Split {
        let split = self
            .split_heading_list(full_text)
            .or_else(|| self.split_reading_passage_header(full_text))
            .or_else(|| self.split_keyword_anchor(full_text))
            .unwrap_or_else(|| Split {
                passage: full_text.trim().to_string(),
                questions: full_text.trim().to_string(),
                strategy: SplitStrategy::Unsplit,
            });
        tracing::debug!(
            strategy = ?split.strategy,
            passage_chars = split.passage.len(),
            question_chars = split.questions.len(),
            "split passage and questions"
        );
        split
    }

    /// Matching-headings layout: questions and heading list first, then the passage.
    fn split_heading_list(&self, text: &str) -> Option<Split> {
        let marker = LIST_OF_HEADINGS.find(text)?;
        let search_start = marker.end();

        let mut seen_roman = false;
        let mut previous_was_bare_numeral = false;
        let mut title_offset = None;

        for (offset, line) in lines_with_offsets(&text[search_start..]) {
            let stripped = line.trim();
            if stripped.is_empty() {
                continue;
            }
            if ROMAN_ONLY.is_match(stripped) {
                seen_roman = true;
                previous_was_bare_numeral = true;
                continue;
            }
            if ROMAN_LEAD.is_match(stripped) {
                seen_roman = true;
                previous_was_bare_numeral = false;
                continue;
            }
            if previous_was_bare_numeral {
                // heading text of a numeral printed on its own line
                previous_was_bare_numeral = false;
                continue;
            }
            if seen_roman && self.looks_like_title(stripped) {
                title_offset = Some(search_start + offset);
                break;
            }
        }

        let passage_start = title_offset?;
        let rest = &text[passage_start..];
        let (passage, questions) = match NEXT_QUESTIONS.find(rest) {
            Some(next) => {
                let passage_end = passage_start + next.start();
                let before = &text[..passage_start];
                let after = &text[passage_end..];
                (
                    text[passage_start..passage_end].to_string(),
                    format!("{}\n\n{}", before, after),
                )
            }
            None => (rest.to_string(), text[..passage_start].to_string()),
        };

        Some(Split {
            passage: passage.trim().to_string(),
            questions: questions.trim().to_string(),
            strategy: SplitStrategy::HeadingList,
        })
    }

    fn looks_like_title(&self, line: &str) -> bool {
        let len = line.chars().count();
        let letter_only = len == 1 && line.chars().all(|c| c.is_alphabetic());
        let starts_with_digit = line.chars().next().is_some_and(|c| c.is_ascii_digit());
        len > 3
            && len < self.title_max_len
            && !letter_only
            && !starts_with_digit
            && !starts_with_any(line, &self.instruction_prefixes)
    }

    fn split_reading_passage_header(&self, text: &str) -> Option<Split> {
        let header = READING_PASSAGE.find(text)?;
        let mut start = header.end();

        // Skip a "You should spend ... Reading Passage 1 below." instruction.
        let window_end = ceil_char_boundary(text, start + HEADER_INSTRUCTION_WINDOW);
        if let Some(below) = BELOW.find(&text[start..window_end]) {
            start += below.end();
        }

        let heading = QUESTIONS_LINE.find(&text[start..])?;
        let passage = text[start..start + heading.start()].trim();
        if passage.is_empty() {
            return None;
        }

        Some(Split {
            passage: passage.to_string(),
            questions: text[start + heading.start()..].trim().to_string(),
            strategy: SplitStrategy::ReadingPassageHeader,
        })
    }

    fn split_keyword_anchor(&self, text: &str) -> Option<Split> {
        let anchor = BELOW.find(text)?;
        let start = anchor.end();
        let rest = &text[start..];

        let question_start = self
            .question_patterns
            .iter()
            .filter_map(|re| re.find(rest).map(|m| m.start()))
            .min();

        let (passage, questions) = match question_start {
            Some(q) => (&rest[..q], &rest[q..]),
            None => (rest, rest),
        };

        Some(Split {
            passage: passage.trim().to_string(),
            questions: questions.trim().to_string(),
            strategy: SplitStrategy::KeywordAnchor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::academic;

    fn splitter() -> Splitter {
        Splitter::new(&academic()).unwrap()
    }

    #[test]
    fn test_no_anchor_returns_whole_text() {
        let input = "  Some title\n\nJust prose without any markers.\n";
        let split = splitter().split(input);
        assert_eq!(split.strategy, SplitStrategy::Unsplit);
        assert_eq!(split.passage, input.trim());
        assert_eq!(split.questions, input.trim());
    }

    #[test]
    fn test_empty_input() {
        let split = splitter().split("");
        assert_eq!(split.passage, "");
        assert_eq!(split.questions, "");
    }

    #[test]
    fn test_keyword_anchor() {
        let input = "You should spend about 20 minutes on this, which is based on the passage below.\n\
                     The Title\n\nBody text here.\n\n\
                     Do the following statements agree with the claims?\n1 A statement.";
        let split = splitter().split(input);
        assert_eq!(split.strategy, SplitStrategy::KeywordAnchor);
        assert_eq!(split.passage, "The Title\n\nBody text here.");
        assert!(split
            .questions
            .starts_with("Do the following statements agree"));
    }

    #[test]
    fn test_keyword_anchor_picks_earliest_keyword() {
        let input = "Read the text below.\nPassage body.\nQuestions 1-3\nChoose the correct letter.";
        let split = splitter().split(input);
        assert_eq!(split.passage, "Passage body.");
        assert!(split.questions.starts_with("Questions 1-3"));
    }

    #[test]
    fn test_keyword_anchor_without_keyword() {
        let input = "Read the text below.\nOnly passage here.";
        let split = splitter().split(input);
        assert_eq!(split.passage, "Only passage here.");
        assert_eq!(split.questions, "Only passage here.");
    }

    #[test]
    fn test_reading_passage_header() {
        let input = "READING PASSAGE 1\n\
                     You should spend about 20 minutes on Questions 1-13, which are based on Reading Passage 1 below.\n\
                     The History of Salt\n\
                     Salt was traded widely.\n\
                     Questions 1-5\n\
                     Do the following statements agree with the information?";
        let split = splitter().split(input);
        assert_eq!(split.strategy, SplitStrategy::ReadingPassageHeader);
        assert_eq!(split.passage, "The History of Salt\nSalt was traded widely.");
        assert!(split.questions.starts_with("Questions 1-5"));
    }

    #[test]
    fn test_heading_list_layout() {
        let input = "Questions 1-3\n\
                     Choose the correct heading for each paragraph from the list of headings below.\n\
                     List of Headings\n\
                     i   The early years\n\
                     ii\n\
                     A turning point\n\
                     iii  Looking ahead\n\
                     1 Paragraph A\n\
                     2 Paragraph B\n\
                     The Story of Glass\n\
                     A Glass was first made long ago.\n\
                     B Later it became common.\n\
                     Questions 4-6\n\
                     Do the following statements agree with the information?";
        let split = splitter().split(input);
        assert_eq!(split.strategy, SplitStrategy::HeadingList);
        assert!(split.passage.starts_with("The Story of Glass"));
        assert!(split.passage.ends_with("Later it became common."));
        assert!(split.questions.starts_with("Questions 1-3"));
        assert!(split.questions.contains("2 Paragraph B"));
        assert!(split.questions.contains("Questions 4-6"));
        assert!(!split.questions.contains("The Story of Glass"));
    }
}
