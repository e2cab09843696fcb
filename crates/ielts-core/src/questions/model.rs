use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

/// A numbered entry: statement, sentence beginning, label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberedItem {
    pub number: String,
    pub text: String,
}

impl NumberedItem {
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        NumberedItem {
            number: number.into(),
            text: text.into(),
        }
    }
}

/// An entry identified by a letter or roman numeral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedItem {
    pub key: String,
    pub text: String,
}

impl KeyedItem {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        KeyedItem {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// Question number to passage paragraph, as listed under a heading list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphRef {
    pub number: String,
    pub letter: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    SingleChoice {
        number: String,
        text: String,
        options: Vec<String>,
    },
    /// `text` carries `[n]` markers where the blanks were.
    SummaryCompletion {
        text: String,
        blanks: Vec<String>,
        options: Vec<KeyedItem>,
    },
    ParagraphMatching {
        title: String,
        instructions: Vec<String>,
        statements: Vec<NumberedItem>,
        options: Vec<String>,
    },
    YesNoNotGiven {
        title: String,
        instructions: Vec<String>,
        statements: Vec<NumberedItem>,
        options: Vec<String>,
    },
    MatchingHeadings {
        title: String,
        instructions: Vec<String>,
        headings: Vec<KeyedItem>,
        paragraphs: Vec<ParagraphRef>,
    },
    MatchingFeatures {
        title: String,
        instructions: Vec<String>,
        features: Vec<KeyedItem>,
        statements: Vec<NumberedItem>,
    },
    MatchingSentenceEndings {
        title: String,
        instructions: Vec<String>,
        sentence_beginnings: Vec<NumberedItem>,
        endings: Vec<KeyedItem>,
    },
    DiagramLabelCompletion {
        title: String,
        instructions: Vec<String>,
        labels: Vec<NumberedItem>,
    },
    ShortAnswer {
        number: String,
        text: String,
        word_limit: String,
    },
    FillBlank {
        number: String,
        text: String,
    },
}

impl Question {
    /// The `type` tag as it appears in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Question::SingleChoice { .. } => "single_choice",
            Question::SummaryCompletion { .. } => "summary_completion",
            Question::ParagraphMatching { .. } => "paragraph_matching",
            Question::YesNoNotGiven { .. } => "yes_no_not_given",
            Question::MatchingHeadings { .. } => "matching_headings",
            Question::MatchingFeatures { .. } => "matching_features",
            Question::MatchingSentenceEndings { .. } => "matching_sentence_endings",
            Question::DiagramLabelCompletion { .. } => "diagram_label_completion",
            Question::ShortAnswer { .. } => "short_answer",
            Question::FillBlank { .. } => "fill_blank",
        }
    }

    /// Question numbers this entry answers for.
    pub fn identifiers(&self) -> BTreeSet<u32> {
        let numbers: Vec<&str> = match self {
            Question::SingleChoice { number, .. }
            | Question::ShortAnswer { number, .. }
            | Question::FillBlank { number, .. } => vec![number.as_str()],
            Question::SummaryCompletion { blanks, .. } => {
                blanks.iter().map(String::as_str).collect()
            }
            Question::ParagraphMatching { statements, .. }
            | Question::YesNoNotGiven { statements, .. }
            | Question::MatchingFeatures { statements, .. } => {
                statements.iter().map(|s| s.number.as_str()).collect()
            }
            Question::MatchingHeadings { paragraphs, .. } => {
                paragraphs.iter().map(|p| p.number.as_str()).collect()
            }
            Question::MatchingSentenceEndings {
                sentence_beginnings,
                ..
            } => sentence_beginnings
                .iter()
                .map(|s| s.number.as_str())
                .collect(),
            Question::DiagramLabelCompletion { labels, .. } => {
                labels.iter().map(|l| l.number.as_str()).collect()
            }
        };
        numbers.into_iter().filter_map(|n| n.parse().ok()).collect()
    }
}

/// A parser's output before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub question: Question,
    /// Byte range in the question text this candidate covers.
    pub span: Option<Range<usize>>,
    /// Byte offset where the candidate was found, for ordering.
    pub position: usize,
}

impl Candidate {
    pub fn with_span(question: Question, span: Range<usize>) -> Self {
        Candidate {
            position: span.start,
            span: Some(span),
            question,
        }
    }

    pub fn at(question: Question, position: usize) -> Self {
        Candidate {
            question,
            span: None,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let q = Question::FillBlank {
            number: "7".into(),
            text: "the ____ of salt".into(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "fill_blank");
        assert_eq!(json["number"], "7");
        assert_eq!(q.kind(), "fill_blank");
    }

    #[test]
    fn test_identifiers() {
        let q = Question::MatchingHeadings {
            title: "Questions 1-2".into(),
            instructions: vec![],
            headings: vec![KeyedItem::new("i", "Origins")],
            paragraphs: vec![
                ParagraphRef {
                    number: "2".into(),
                    letter: 'B',
                },
                ParagraphRef {
                    number: "1".into(),
                    letter: 'A',
                },
            ],
        };
        assert_eq!(q.identifiers().into_iter().collect::<Vec<_>>(), vec![1, 2]);

        let summary = Question::SummaryCompletion {
            text: "[9] and [10]".into(),
            blanks: vec!["9".into(), "10".into()],
            options: vec![],
        };
        assert_eq!(summary.identifiers().len(), 2);
    }
}
