//! Compiled profile plus the stage order: split, locate, structure, parse, aggregate.

use crate::aggregate::aggregate;
use crate::error::IeltsError;
use crate::extraction::{ExtractedDocument, TextBlock};
use crate::locate::{collect_passage_blocks, locate_question_blocks};
use crate::model::{Passage, ReadingTest};
use crate::passage::PassageStructurer;
use crate::profile::builtin::academic;
use crate::profile::schema::Profile;
use crate::profile::validate_profile;
use crate::questions::{ParserKind, Question};
use crate::split::{Split, Splitter};

/// A validated profile with its patterns compiled. Immutable once built.
#[derive(Debug, Clone)]
pub struct ReadingParser {
    profile: Profile,
    splitter: Splitter,
    structurer: PassageStructurer,
}

impl ReadingParser {
    pub fn new(profile: Profile) -> Result<Self, IeltsError> {
        validate_profile(&profile)?;
        Ok(ReadingParser {
            splitter: Splitter::new(&profile)?,
            structurer: PassageStructurer::new(&profile)?,
            profile,
        })
    }

    /// Parser for the builtin academic profile.
    pub fn academic() -> Result<Self, IeltsError> {
        Self::new(academic())
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn structurer(&self) -> &PassageStructurer {
        &self.structurer
    }

    pub fn split(&self, full_text: &str) -> Split {
        self.splitter.split(full_text)
    }

    pub fn parse_document(&self, document: &ExtractedDocument) -> ReadingTest {
        let split = self.splitter.split(&document.full_text);
        let passage = self.parse_passage(&split.passage, &document.blocks);
        let questions = self.parse_questions(&split.questions, &document.blocks);
        tracing::debug!(
            strategy = ?split.strategy,
            paragraphs = passage.paragraphs.len(),
            questions = questions.len(),
            "document parsed"
        );
        ReadingTest { passage, questions }
    }

    pub fn parse_passage(&self, raw_passage: &str, blocks: &[TextBlock]) -> Passage {
        let passage_blocks = collect_passage_blocks(
            raw_passage,
            blocks,
            &self.profile.passage_instruction_prefixes,
        );
        self.structurer.structure(raw_passage, &passage_blocks)
    }

    /// Run every question parser in priority order and aggregate.
    pub fn parse_questions(&self, questions_text: &str, blocks: &[TextBlock]) -> Vec<Question> {
        let question_blocks = locate_question_blocks(questions_text, blocks);
        let batches = ParserKind::PRIORITY
            .iter()
            .map(|&kind| {
                let candidates = kind.run(questions_text, &question_blocks, &self.profile);
                (kind, candidates)
            })
            .collect();
        aggregate(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_profile() {
        let mut profile = academic();
        profile.question_section_patterns = vec!["(unclosed".into()];
        assert!(matches!(
            ReadingParser::new(profile),
            Err(IeltsError::ProfileInvalid(_))
        ));
    }

    #[test]
    fn test_fill_blank_beats_single_choice_on_same_number() {
        let parser = ReadingParser::academic().unwrap();
        let text = "Questions 1-2\n\
                    Complete the sentences below.\n\
                    1 Glass is made from 1 ________ and soda.\n\
                    2 It is heated in a 2 ________.";
        let questions = parser.parse_questions(text, &[]);
        let kinds: Vec<&str> = questions.iter().map(|q| q.kind()).collect();
        assert_eq!(kinds, ["fill_blank", "fill_blank"]);
    }

    #[test]
    fn test_empty_document() {
        let parser = ReadingParser::academic().unwrap();
        let test = parser.parse_document(&ExtractedDocument::default());
        assert!(test.questions.is_empty());
        assert_eq!(test.passage.title, "");
    }
}
