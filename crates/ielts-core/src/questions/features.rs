//! Matching features: numbered statements against a lettered list of people, places or things.

use super::model::{Candidate, KeyedItem, NumberedItem, Question};
use super::sections::{numbered_line, split_sections};
use crate::profile::schema::Profile;
use crate::text::{contains_any, normalize_text};
use regex::Regex;
use std::sync::LazyLock;

static LIST_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^List of\s").expect("valid regex"));

static FEATURE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])\s+(\D.*)$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Preamble,
    Statements,
    Features,
}

pub fn parse(questions_text: &str, profile: &Profile) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for section in split_sections(questions_text) {
        if !contains_any(section.text, &profile.feature_keywords)
            || contains_any(section.text, &profile.paragraph_matching_phrases)
        {
            continue;
        }

        let mut lines = section.lines();
        let Some(title) = lines.next().map(normalize_text) else {
            continue;
        };

        let mut state = State::Preamble;
        let mut instructions = Vec::new();
        let mut features = Vec::new();
        let mut statements: Vec<NumberedItem> = Vec::new();

        for line in lines {
            if LIST_OF.is_match(line) {
                state = State::Features;
                continue;
            }
            if let Some((number, text)) = numbered_line(line) {
                // Numbers after a complete statements-then-features layout belong elsewhere.
                if !(state == State::Features && !statements.is_empty()) && !text.is_empty() {
                    statements.push(NumberedItem::new(number, normalize_text(text)));
                    state = State::Statements;
                }
                continue;
            }
            if let Some(caps) = FEATURE_LINE.captures(line) {
                features.push(KeyedItem::new(&caps[1], normalize_text(&caps[2])));
                state = State::Features;
                continue;
            }
            if state == State::Preamble {
                instructions.push(normalize_text(line));
            }
        }

        if features.is_empty() && !statements.is_empty() {
            features = find_feature_list(&questions_text[section.end..]);
        }
        if features.is_empty() || statements.is_empty() {
            continue;
        }

        candidates.push(Candidate::with_span(
            Question::MatchingFeatures {
                title,
                instructions,
                features,
                statements,
            },
            section.span(),
        ));
    }

    candidates
}

/// Read the lettered entries under the next "List of ..." line.
fn find_feature_list(text: &str) -> Vec<KeyedItem> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .skip_while(|l| !LIST_OF.is_match(l))
        .skip(1)
        .map_while(|line| {
            FEATURE_LINE
                .captures(line)
                .map(|caps| KeyedItem::new(&caps[1], normalize_text(&caps[2])))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::academic;

    fn first(text: &str) -> Option<Question> {
        parse(text, &academic()).into_iter().next().map(|c| c.question)
    }

    #[test]
    fn test_features_then_statements() {
        let text = "Questions 1-3\n\
                    Match each statement with the correct researcher.\n\
                    List of Researchers\n\
                    A Anna Smith\nB Li Wei\nC Tom Brown\n\
                    1 found that glass cools slowly\n\
                    2 measured the furnace heat\n\
                    3 repeated the early tests";
        match first(text) {
            Some(Question::MatchingFeatures {
                instructions,
                features,
                statements,
                ..
            }) => {
                assert_eq!(instructions.len(), 1);
                assert_eq!(features.len(), 3);
                assert_eq!(features[1], KeyedItem::new("B", "Li Wei"));
                assert_eq!(statements.len(), 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_statements_then_features() {
        let text = "Questions 4-5\n\
                    Classify the following as belonging to\n\
                    4 sand from rivers\n\
                    5 ash from plants\n\
                    A the Romans\nB the Venetians";
        match first(text) {
            Some(Question::MatchingFeatures {
                features,
                statements,
                ..
            }) => {
                assert_eq!(statements[0].number, "4");
                assert_eq!(features.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_feature_list_recovered_from_later_text() {
        let text = "Questions 6-7\n\
                    Match each statement with the correct place.\n\
                    6 the oldest furnace\n\
                    7 the largest market\n\
                    Questions 8-9\n\
                    List of Places\n\
                    A Murano\nB Alexandria\n\
                    8 something else";
        match first(text) {
            Some(Question::MatchingFeatures { features, .. }) => {
                assert_eq!(
                    features,
                    vec![KeyedItem::new("A", "Murano"), KeyedItem::new("B", "Alexandria")]
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_paragraph_matching_excluded() {
        let text = "Questions 1-2\nWhich paragraph contains the list of\n1 a fact\nA first";
        assert!(first(text).is_none());
    }
}
