//! Rebuild title, intro and paragraphs from the passage region.

mod letters;
pub mod subheading;
mod title;

use crate::error::IeltsError;
use crate::model::{Paragraph, Passage};
use crate::profile::schema::{Profile, Thresholds};
use crate::text::{normalize_whitespace, starts_with_any};
use regex::Regex;
use std::sync::LazyLock;
use subheading::SubheadingDetector;

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n){2,}").expect("valid regex"));

#[derive(Debug, Clone)]
pub struct PassageStructurer {
    title_prefixes: Vec<String>,
    /// Title prefixes plus the block locator's question-instruction prefixes.
    instruction_prefixes: Vec<String>,
    forbidden_keywords: Vec<String>,
    thresholds: Thresholds,
    subheadings: SubheadingDetector,
}

impl PassageStructurer {
    pub fn new(profile: &Profile) -> Result<Self, IeltsError> {
        let mut instruction_prefixes = profile.title_instruction_prefixes.clone();
        instruction_prefixes.extend(profile.passage_instruction_prefixes.iter().cloned());
        Ok(PassageStructurer {
            title_prefixes: profile.title_instruction_prefixes.clone(),
            instruction_prefixes,
            forbidden_keywords: profile.title_forbidden_keywords.clone(),
            thresholds: profile.thresholds.clone(),
            subheadings: SubheadingDetector::new(profile)?,
        })
    }

    pub fn subheadings(&self) -> &SubheadingDetector {
        &self.subheadings
    }

    /// Build a [`Passage`] from the passage text and its located blocks.
    ///
    /// Lettered paragraphs win when any are found; otherwise the blocks are
    /// used, and without blocks the text is split on blank lines.
    pub fn structure(&self, raw_passage: &str, passage_blocks: &[String]) -> Passage {
        let title = title::extract_title(
            raw_passage,
            &self.title_prefixes,
            &self.forbidden_keywords,
            &self.thresholds,
        );

        let scan = letters::extract_letter_sections(raw_passage);
        let (intro, paragraphs) = if !scan.sections.is_empty() {
            tracing::debug!(sections = scan.sections.len(), "lettered paragraphs found");
            self.from_letter_sections(&title, scan)
        } else if !passage_blocks.is_empty() {
            tracing::debug!(blocks = passage_blocks.len(), "paragraphs from layout blocks");
            self.from_chunks(&title, passage_blocks.iter().map(String::as_str))
        } else {
            tracing::debug!("paragraphs from blank-line runs");
            self.from_chunks(&title, BLANK_LINE_RUN.split(raw_passage))
        };

        let (paragraphs, orphans) = self.subheadings.merge(paragraphs);
        let intro = match (intro, orphans) {
            (Some(intro), Some(headings)) => Some(format!("{}\n\n{}", intro, headings)),
            (intro, headings) => intro.or(headings),
        };

        Passage {
            title,
            intro,
            paragraphs,
            raw_text: raw_passage.to_string(),
        }
    }

    fn is_instruction(&self, text: &str) -> bool {
        starts_with_any(text, &self.instruction_prefixes)
    }

    fn from_letter_sections(
        &self,
        title: &str,
        scan: letters::LetterScan,
    ) -> (Option<String>, Vec<Paragraph>) {
        let pre_letter: Vec<&str> = scan
            .pre_letter
            .iter()
            .map(String::as_str)
            .filter(|line| !self.is_instruction(line) && !same_text(line, title))
            .collect();
        let pre_text = normalize_whitespace(&pre_letter.join(" "));

        let mut paragraphs: Vec<Paragraph> = scan
            .sections
            .into_iter()
            .map(|(letter, text)| Paragraph::lettered(letter, text))
            .collect();

        if pre_text.is_empty() {
            return (None, paragraphs);
        }

        // Content before "B" fills the missing "A" slot.
        let synthetic = paragraphs
            .first()
            .and_then(|p| p.letter)
            .filter(|&l| l > 'A')
            .and_then(|l| char::from_u32(l as u32 - 1));
        match synthetic {
            Some(letter) => {
                paragraphs.insert(0, Paragraph::lettered(letter, pre_text));
                (None, paragraphs)
            }
            None => (Some(pre_text), paragraphs),
        }
    }

    fn from_chunks<'a>(
        &self,
        title: &str,
        chunks: impl Iterator<Item = &'a str>,
    ) -> (Option<String>, Vec<Paragraph>) {
        let mut candidates: Vec<String> = chunks
            .map(normalize_whitespace)
            .filter(|c| !c.is_empty() && !same_text(c, title))
            .skip_while(|c| self.is_instruction(c))
            .collect();

        let mut intro = None;
        if let Some(first) = candidates.first() {
            if first.chars().count() <= self.thresholds.intro_max_len && !first.contains('.') {
                intro = Some(candidates.remove(0));
            }
        }

        candidates.retain(|c| !self.is_instruction(c));
        let paragraphs = candidates.into_iter().map(Paragraph::unlettered).collect();
        (intro, paragraphs)
    }
}

fn same_text(a: &str, b: &str) -> bool {
    !b.is_empty() && normalize_whitespace(a).eq_ignore_ascii_case(&normalize_whitespace(b))
}
