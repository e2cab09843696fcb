//! Question model, shared section segmentation, and one parser per question type.

pub mod diagram;
pub mod features;
pub mod fill_blank;
pub mod headings;
pub mod model;
pub mod paragraph_matching;
pub(crate) mod sections;
pub mod sentence_endings;
pub mod short_answer;
pub mod single_choice;
pub mod summary;
pub mod yes_no;

pub use model::{Candidate, KeyedItem, NumberedItem, ParagraphRef, Question};

use crate::extraction::TextBlock;
use crate::profile::schema::Profile;
use serde::Serialize;
use std::fmt;

/// The ten question parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    SummaryCompletion,
    MatchingHeadings,
    ParagraphMatching,
    MatchingFeatures,
    MatchingSentenceEndings,
    DiagramLabelCompletion,
    ShortAnswer,
    FillBlank,
    YesNoNotGiven,
    SingleChoice,
}

impl ParserKind {
    /// Aggregation order. Multi-signal section types come before the loose ones.
    pub const PRIORITY: [ParserKind; 10] = [
        ParserKind::SummaryCompletion,
        ParserKind::MatchingHeadings,
        ParserKind::ParagraphMatching,
        ParserKind::MatchingFeatures,
        ParserKind::MatchingSentenceEndings,
        ParserKind::DiagramLabelCompletion,
        ParserKind::ShortAnswer,
        ParserKind::FillBlank,
        ParserKind::YesNoNotGiven,
        ParserKind::SingleChoice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParserKind::SummaryCompletion => "summary_completion",
            ParserKind::MatchingHeadings => "matching_headings",
            ParserKind::ParagraphMatching => "paragraph_matching",
            ParserKind::MatchingFeatures => "matching_features",
            ParserKind::MatchingSentenceEndings => "matching_sentence_endings",
            ParserKind::DiagramLabelCompletion => "diagram_label_completion",
            ParserKind::ShortAnswer => "short_answer",
            ParserKind::FillBlank => "fill_blank",
            ParserKind::YesNoNotGiven => "yes_no_not_given",
            ParserKind::SingleChoice => "single_choice",
        }
    }

    /// Run this parser. Only summary completion reads the blocks.
    pub fn run(
        self,
        questions_text: &str,
        blocks: &[&TextBlock],
        profile: &Profile,
    ) -> Vec<Candidate> {
        match self {
            ParserKind::SummaryCompletion => summary::parse(questions_text, blocks, profile),
            ParserKind::MatchingHeadings => headings::parse(questions_text),
            ParserKind::ParagraphMatching => paragraph_matching::parse(questions_text, profile),
            ParserKind::MatchingFeatures => features::parse(questions_text, profile),
            ParserKind::MatchingSentenceEndings => sentence_endings::parse(questions_text, profile),
            ParserKind::DiagramLabelCompletion => diagram::parse(questions_text, profile),
            ParserKind::ShortAnswer => short_answer::parse(questions_text, profile),
            ParserKind::FillBlank => fill_blank::parse(questions_text, profile),
            ParserKind::YesNoNotGiven => yes_no::parse(questions_text),
            ParserKind::SingleChoice => single_choice::parse(questions_text, profile),
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn questions_only(candidates: Vec<Candidate>) -> Vec<Question> {
    candidates.into_iter().map(|c| c.question).collect()
}

/// Multiple-choice questions with four options, in text order.
pub fn parse_single_choice(questions_text: &str, profile: &Profile) -> Vec<Question> {
    questions_only(single_choice::parse(questions_text, profile))
}

/// YES/NO/NOT GIVEN and TRUE/FALSE/NOT GIVEN sections.
pub fn parse_yes_no_not_given(questions_text: &str) -> Vec<Question> {
    questions_only(yes_no::parse(questions_text))
}

pub fn parse_summary_completion(
    questions_text: &str,
    blocks: &[&TextBlock],
    profile: &Profile,
) -> Vec<Question> {
    questions_only(summary::parse(questions_text, blocks, profile))
}

pub fn parse_matching_headings(questions_text: &str) -> Vec<Question> {
    questions_only(headings::parse(questions_text))
}

pub fn parse_paragraph_matching(questions_text: &str, profile: &Profile) -> Vec<Question> {
    questions_only(paragraph_matching::parse(questions_text, profile))
}

pub fn parse_matching_features(questions_text: &str, profile: &Profile) -> Vec<Question> {
    questions_only(features::parse(questions_text, profile))
}

pub fn parse_matching_sentence_endings(questions_text: &str, profile: &Profile) -> Vec<Question> {
    questions_only(sentence_endings::parse(questions_text, profile))
}

pub fn parse_diagram_label_completion(questions_text: &str, profile: &Profile) -> Vec<Question> {
    questions_only(diagram::parse(questions_text, profile))
}

pub fn parse_short_answer(questions_text: &str, profile: &Profile) -> Vec<Question> {
    questions_only(short_answer::parse(questions_text, profile))
}

pub fn parse_fill_blank(questions_text: &str, profile: &Profile) -> Vec<Question> {
    questions_only(fill_blank::parse(questions_text, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::academic;

    #[test]
    fn test_simple_mcq() {
        let questions = parse_single_choice(
            "1 What is X?\nA one\nB two\nC three\nD four",
            &academic(),
        );
        assert_eq!(
            questions,
            vec![Question::SingleChoice {
                number: "1".into(),
                text: "What is X?".into(),
                options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
            }]
        );
    }

    #[test]
    fn test_yes_no_block() {
        let text = "Questions 4-6\n\nWrite YES, NO, or NOT GIVEN\n\n\
                    4 Statement one.\n5 Statement two.\n6 Statement three.";
        let questions = parse_yes_no_not_given(text);
        assert_eq!(questions.len(), 1);
        match &questions[0] {
            Question::YesNoNotGiven {
                options,
                statements,
                ..
            } => {
                assert_eq!(options, &["YES", "NO", "NOT GIVEN"]);
                let numbers: Vec<&str> = statements.iter().map(|s| s.number.as_str()).collect();
                assert_eq!(numbers, ["4", "5", "6"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_priority_covers_every_parser() {
        let names: std::collections::HashSet<&str> =
            ParserKind::PRIORITY.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(ParserKind::PRIORITY[0], ParserKind::SummaryCompletion);
        assert_eq!(ParserKind::PRIORITY[9], ParserKind::SingleChoice);
    }

    #[test]
    fn test_parser_names_match_question_kinds() {
        let question = Question::FillBlank {
            number: "1".into(),
            text: "____".into(),
        };
        assert_eq!(ParserKind::FillBlank.name(), question.kind());
    }
}
