//! Matching sentence endings: numbered beginnings, lettered endings.

use super::model::{Candidate, KeyedItem, NumberedItem, Question};
use super::sections::{numbered_line, split_sections};
use crate::profile::schema::Profile;
use crate::text::{contains_any, normalize_text};
use regex::Regex;
use std::sync::LazyLock;

static ENDING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])\s+(.+)$").expect("valid regex"));

static OPTION_A_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*A\s+\S").expect("valid regex"));

pub fn parse(questions_text: &str, profile: &Profile) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for section in split_sections(questions_text) {
        let lower = section.lower();
        let judgement = (lower.contains("yes") || lower.contains("true"))
            && lower.contains("not given");
        let multiple_choice = lower.contains("choose the correct letter")
            || OPTION_A_LINE.find_iter(section.text).count() > 1;
        if judgement
            || multiple_choice
            || !contains_any(section.text, &profile.sentence_ending_keywords)
        {
            continue;
        }

        let mut lines = section.lines();
        let Some(title) = lines.next().map(normalize_text) else {
            continue;
        };

        let mut instructions = Vec::new();
        let mut beginnings: Vec<NumberedItem> = Vec::new();
        let mut endings: Vec<KeyedItem> = Vec::new();

        for line in lines {
            if endings.is_empty() {
                if let Some((number, text)) = numbered_line(line) {
                    if !text.is_empty() {
                        beginnings.push(NumberedItem::new(number, normalize_text(text)));
                        continue;
                    }
                }
            }
            if !beginnings.is_empty() {
                if let Some(caps) = ENDING_LINE.captures(line) {
                    endings.push(KeyedItem::new(&caps[1], normalize_text(&caps[2])));
                    continue;
                }
            }
            if beginnings.is_empty() {
                instructions.push(normalize_text(line));
            }
        }

        if beginnings.is_empty() || endings.is_empty() {
            continue;
        }

        candidates.push(Candidate::with_span(
            Question::MatchingSentenceEndings {
                title,
                instructions,
                sentence_beginnings: beginnings,
                endings,
            },
            section.span(),
        ));
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::academic;

    #[test]
    fn test_beginnings_and_endings() {
        let text = "Questions 10-11\n\
                    Complete each sentence with the correct ending, A-C, below.\n\
                    10 Early glass makers\n\
                    11 The Venetian guild\n\
                    A kept its methods secret.\n\
                    B used ash from plants.\n\
                    C traded with Egypt.";
        let candidates = parse(text, &academic());
        assert_eq!(candidates.len(), 1);
        match &candidates[0].question {
            Question::MatchingSentenceEndings {
                instructions,
                sentence_beginnings,
                endings,
                ..
            } => {
                assert_eq!(instructions.len(), 1);
                assert_eq!(sentence_beginnings.len(), 2);
                assert_eq!(endings.len(), 3);
                assert_eq!(endings[2].text, "traded with Egypt.");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_skips_judgement_sections() {
        let text = "Questions 1-2\nDo the statements agree? Write TRUE, FALSE or NOT GIVEN to complete\n\
                    1 A sentence\nA ending";
        assert!(parse(text, &academic()).is_empty());
    }

    #[test]
    fn test_skips_multiple_choice_sections() {
        let text = "Questions 1-2\nComplete the sentence.\n\
                    1 The first sentence\nA one\nB two\n\
                    2 The second sentence\nA three\nB four";
        assert!(parse(text, &academic()).is_empty());
    }
}
