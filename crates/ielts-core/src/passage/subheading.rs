use crate::error::IeltsError;
use crate::model::Paragraph;
use crate::profile::schema::Profile;
use crate::text::normalize_whitespace;
use regex::Regex;

/// Recognizes short structural subheadings ("Introduction", "Description of ...").
#[derive(Debug, Clone)]
pub struct SubheadingDetector {
    patterns: Vec<Regex>,
    max_len: usize,
}

impl SubheadingDetector {
    pub fn new(profile: &Profile) -> Result<Self, IeltsError> {
        let patterns = profile
            .subheading_keywords
            .iter()
            .map(|kw| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw))).map_err(|e| {
                    IeltsError::ProfileInvalid(format!("subheading keyword '{}': {}", kw, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SubheadingDetector {
            patterns,
            max_len: profile.thresholds.subheading_max_len,
        })
    }

    /// Short text containing a subheading keyword as a whole word.
    pub fn is_subheading(&self, text: &str) -> bool {
        let normalized = normalize_whitespace(text);
        !normalized.is_empty()
            && normalized.chars().count() < self.max_len
            && self.patterns.iter().any(|re| re.is_match(&normalized))
    }

    /// A paragraph that is nothing but a subheading line.
    ///
    /// Merged paragraphs carry their body after a blank line and never match.
    pub fn is_bare_subheading(&self, text: &str) -> bool {
        !text.trim().contains("\n\n") && self.is_subheading(text)
    }

    /// Fold each subheading into the paragraph that follows it.
    ///
    /// The merged paragraph keeps the following paragraph's letter. Trailing
    /// subheadings are appended to the last paragraph. When there is no body
    /// paragraph at all the subheadings are handed back in the second slot.
    pub fn merge(&self, paragraphs: Vec<Paragraph>) -> (Vec<Paragraph>, Option<String>) {
        let mut merged: Vec<Paragraph> = Vec::with_capacity(paragraphs.len());
        let mut pending: Vec<String> = Vec::new();

        for paragraph in paragraphs {
            if self.is_subheading(&paragraph.text) {
                pending.push(paragraph.text);
                continue;
            }
            if pending.is_empty() {
                merged.push(paragraph);
            } else {
                let heading = pending.join("\n\n");
                pending.clear();
                merged.push(Paragraph {
                    letter: paragraph.letter,
                    text: format!("{}\n\n{}", heading, paragraph.text),
                });
            }
        }

        if pending.is_empty() {
            return (merged, None);
        }
        let heading = pending.join("\n\n");
        match merged.last_mut() {
            Some(last) => {
                last.text = format!("{}\n\n{}", last.text, heading);
                (merged, None)
            }
            None => (merged, Some(heading)),
        }
    }
}
