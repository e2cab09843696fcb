//! Structural sanity checks over a parsed reading test, for batch runs.

use crate::model::ReadingTest;
use crate::pipeline::ReadingParser;
use crate::questions::Question;
use crate::text::contains_any;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

const TITLE_MIN_CHARS: usize = 5;
const TITLE_MAX_CHARS: usize = 150;
const MIN_PARAGRAPHS: usize = 3;

/// Part of the document an issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Passage,
    Questions,
    MatchingHeadings,
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::Passage => write!(f, "passage"),
            Area::Questions => write!(f, "questions"),
            Area::MatchingHeadings => write!(f, "matching_headings"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub area: Area,
    pub message: String,
}

impl Issue {
    fn new(area: Area, message: impl Into<String>) -> Self {
        Issue {
            area,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.area, self.message)
    }
}

/// Summary facts about a parsed document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentInfo {
    pub title: String,
    pub paragraph_count: usize,
    /// Letters of lettered paragraphs, in order.
    pub paragraph_letters: Vec<char>,
    pub question_count: usize,
    /// Question entries per `type` tag.
    pub question_types: BTreeMap<String, usize>,
    /// Every question number claimed by some entry.
    pub claimed_numbers: Vec<u32>,
}

/// Result of checking one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentCheck {
    /// True when there are no errors. Warnings do not fail a document.
    pub passed: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub info: DocumentInfo,
}

#[derive(Default)]
struct Findings {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Findings {
    fn error(&mut self, area: Area, message: impl Into<String>) {
        self.errors.push(Issue::new(area, message));
    }

    fn warn(&mut self, area: Area, message: impl Into<String>) {
        self.warnings.push(Issue::new(area, message));
    }
}

pub fn check_document(test: &ReadingTest, parser: &ReadingParser) -> DocumentCheck {
    let mut findings = Findings::default();
    check_passage(test, parser, &mut findings);
    let claimed = check_questions(test, &mut findings);
    check_matching_headings(test, &mut findings);

    let mut question_types = BTreeMap::new();
    for question in &test.questions {
        *question_types.entry(question.kind().to_string()).or_insert(0) += 1;
    }

    let info = DocumentInfo {
        title: test.passage.title.clone(),
        paragraph_count: test.passage.paragraphs.len(),
        paragraph_letters: test.passage.letters(),
        question_count: test.questions.len(),
        question_types,
        claimed_numbers: claimed.into_iter().collect(),
    };

    DocumentCheck {
        passed: findings.errors.is_empty(),
        errors: findings.errors,
        warnings: findings.warnings,
        info,
    }
}

fn check_passage(test: &ReadingTest, parser: &ReadingParser, findings: &mut Findings) {
    let passage = &test.passage;
    let title = passage.title.trim();

    if title.is_empty() {
        findings.error(Area::Passage, "no title");
    } else {
        let chars = title.chars().count();
        if chars < TITLE_MIN_CHARS {
            findings.warn(Area::Passage, format!("title is very short ({} chars)", chars));
        }
        if chars > TITLE_MAX_CHARS {
            findings.warn(Area::Passage, format!("title is very long ({} chars)", chars));
        }
        if contains_any(title, &parser.profile().title_forbidden_keywords) {
            findings.error(
                Area::Passage,
                format!("title contains instruction text: '{}'", title),
            );
        }
    }

    match passage.paragraphs.len() {
        0 => findings.error(Area::Passage, "no paragraphs"),
        n if n < MIN_PARAGRAPHS => {
            findings.warn(Area::Passage, format!("only {} paragraphs", n))
        }
        _ => {}
    }

    let letters = passage.letters();
    if !letters.is_empty() {
        let expected: Vec<char> = ('A'..='Z').take(letters.len()).collect();
        if letters != expected {
            let found: String = letters.iter().collect();
            findings.warn(
                Area::Passage,
                format!("paragraph letters are not sequential from A: {}", found),
            );
        }
    }

    let subheadings = parser.structurer().subheadings();
    for paragraph in &passage.paragraphs {
        if subheadings.is_bare_subheading(&paragraph.text) {
            findings.error(
                Area::Passage,
                format!("standalone subheading paragraph: '{}'", paragraph.text.trim()),
            );
        }
    }
}

fn check_questions(test: &ReadingTest, findings: &mut Findings) -> BTreeSet<u32> {
    if test.questions.is_empty() {
        findings.error(Area::Questions, "no questions");
    }

    let mut owners: BTreeMap<u32, usize> = BTreeMap::new();
    for question in &test.questions {
        for number in question.identifiers() {
            *owners.entry(number).or_insert(0) += 1;
        }
    }
    for (number, count) in &owners {
        if *count > 1 {
            findings.error(
                Area::Questions,
                format!("question {} is claimed by {} entries", number, count),
            );
        }
    }

    owners.into_keys().collect()
}

fn check_matching_headings(test: &ReadingTest, findings: &mut Findings) {
    let letters: BTreeSet<char> = test.passage.letters().into_iter().collect();

    for question in &test.questions {
        let Question::MatchingHeadings {
            title,
            instructions,
            headings,
            paragraphs,
        } = question
        else {
            continue;
        };

        if headings.is_empty() {
            findings.error(Area::MatchingHeadings, format!("{}: no headings", title));
        }
        if paragraphs.is_empty() {
            findings.error(
                Area::MatchingHeadings,
                format!("{}: no paragraph mappings", title),
            );
        }
        if !letters.is_empty() {
            for mapping in paragraphs {
                if !letters.contains(&mapping.letter) {
                    findings.warn(
                        Area::MatchingHeadings,
                        format!(
                            "question {} refers to paragraph {} which the passage does not have",
                            mapping.number, mapping.letter
                        ),
                    );
                }
            }
        }
        if instructions.is_empty() {
            findings.warn(Area::MatchingHeadings, format!("{}: no instructions", title));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Passage};
    use crate::questions::{KeyedItem, ParagraphRef};

    fn parser() -> ReadingParser {
        ReadingParser::academic().unwrap()
    }

    fn passage(letters: &[char]) -> Passage {
        Passage {
            title: "The History of Glass".into(),
            intro: None,
            paragraphs: letters
                .iter()
                .map(|&l| Paragraph::lettered(l, "Glass was made in many places long ago."))
                .collect(),
            raw_text: String::new(),
        }
    }

    fn fill(number: &str) -> Question {
        Question::FillBlank {
            number: number.into(),
            text: "____".into(),
        }
    }

    #[test]
    fn test_clean_document_passes() {
        let test = ReadingTest {
            passage: passage(&['A', 'B', 'C']),
            questions: vec![fill("1"), fill("2")],
        };
        let check = check_document(&test, &parser());
        assert!(check.passed, "{:?}", check.errors);
        assert!(check.warnings.is_empty());
        assert_eq!(check.info.claimed_numbers, vec![1, 2]);
        assert_eq!(check.info.question_types["fill_blank"], 2);
        assert_eq!(check.info.paragraph_letters, vec!['A', 'B', 'C']);
    }

    #[test]
    fn test_duplicate_claim_fails() {
        let test = ReadingTest {
            passage: passage(&['A', 'B', 'C']),
            questions: vec![fill("1"), fill("1")],
        };
        let check = check_document(&test, &parser());
        assert!(!check.passed);
        assert_eq!(check.errors[0].area, Area::Questions);
    }

    #[test]
    fn test_passage_problems() {
        let mut p = passage(&['A', 'C']);
        p.title = "Questions 1-5".into();
        p.paragraphs.push(Paragraph::unlettered("Introduction"));
        let test = ReadingTest {
            passage: p,
            questions: vec![fill("1")],
        };
        let check = check_document(&test, &parser());
        assert!(!check.passed);
        let errors: Vec<String> = check.errors.iter().map(|e| e.message.clone()).collect();
        assert!(errors.iter().any(|e| e.contains("instruction text")));
        assert!(errors.iter().any(|e| e.contains("standalone subheading")));
        assert!(check
            .warnings
            .iter()
            .any(|w| w.message.contains("not sequential")));
    }

    #[test]
    fn test_short_merged_subheading_passes() {
        let mut p = passage(&['A', 'C']);
        p.paragraphs
            .insert(1, Paragraph::lettered('B', "Background\n\nSalt was traded for gold."));
        let test = ReadingTest {
            passage: p,
            questions: vec![fill("1")],
        };
        let check = check_document(&test, &parser());
        assert!(check.passed, "{:?}", check.errors);
    }

    #[test]
    fn test_empty_document() {
        let check = check_document(&ReadingTest::default(), &parser());
        let messages: Vec<&str> = check.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["no title", "no paragraphs", "no questions"]);
    }

    #[test]
    fn test_heading_mapping_to_missing_paragraph() {
        let headings = Question::MatchingHeadings {
            title: "Questions 1-2".into(),
            instructions: vec!["Choose the correct heading.".into()],
            headings: vec![KeyedItem::new("i", "Early days")],
            paragraphs: vec![
                ParagraphRef {
                    number: "1".into(),
                    letter: 'A',
                },
                ParagraphRef {
                    number: "2".into(),
                    letter: 'F',
                },
            ],
        };
        let test = ReadingTest {
            passage: passage(&['A', 'B', 'C']),
            questions: vec![headings],
        };
        let check = check_document(&test, &parser());
        assert!(check.passed);
        assert_eq!(check.warnings.len(), 1);
        assert_eq!(check.warnings[0].area, Area::MatchingHeadings);
    }
}
