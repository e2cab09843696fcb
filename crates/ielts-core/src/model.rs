use crate::questions::Question;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph letter (A, B, C, ...) when the passage letters its paragraphs.
    pub letter: Option<char>,
    pub text: String,
}

impl Paragraph {
    pub fn lettered(letter: char, text: impl Into<String>) -> Self {
        Paragraph {
            letter: Some(letter),
            text: text.into(),
        }
    }

    pub fn unlettered(text: impl Into<String>) -> Self {
        Paragraph {
            letter: None,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub title: String,
    pub intro: Option<String>,
    pub paragraphs: Vec<Paragraph>,
    #[serde(rename = "raw")]
    pub raw_text: String,
}

impl Passage {
    /// Letters of the lettered paragraphs, in document order.
    pub fn letters(&self) -> Vec<char> {
        self.paragraphs.iter().filter_map(|p| p.letter).collect()
    }
}

/// A reconstructed reading test: one passage and its ordered questions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingTest {
    pub passage: Passage,
    pub questions: Vec<Question>,
}
