use super::schema::{Profile, Thresholds};

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["academic"];

fn phrases(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The default profile, tuned on Academic Reading test PDFs.
pub fn academic() -> Profile {
    Profile {
        name: "academic".into(),
        description: Some("IELTS Academic Reading, single passage per document".into()),
        passage_instruction_prefixes: phrases(&[
            "questions ",
            "choose the correct letter",
            "complete the summary",
            "complete the sentences",
            "do the following statements",
            "list of headings",
            "match the",
            "writing no more than",
        ]),
        title_instruction_prefixes: phrases(&["reading passage", "you should spend", "questions"]),
        title_forbidden_keywords: phrases(&[
            "reading passage",
            "questions",
            "you should spend",
            "choose the correct",
            "complete the",
            "match the",
        ]),
        subheading_keywords: phrases(&[
            "introduction",
            "background",
            "conclusion",
            "discussion",
            "results",
            "methods",
            "methodology",
            "description of",
            "methodological issues",
            "lessons to consider",
        ]),
        question_section_patterns: phrases(&[
            r"Choose the correct letter",
            r"Complete the sentences",
            r"Complete the summary",
            r"Do the following statements agree",
            r"Matching",
            r"Questions?\s+\d+",
        ]),
        summary_phrases: phrases(&["complete the summary", "complete the notes"]),
        paragraph_matching_phrases: phrases(&["which paragraph", "which section"]),
        feature_keywords: phrases(&["match", "list of", "classify"]),
        sentence_ending_keywords: phrases(&["complete", "sentence", "ending"]),
        diagram_keywords: phrases(&["diagram", "label", "figure", "illustration"]),
        mcq_instruction_keywords: phrases(&[
            "choose the correct letter",
            "write the correct letter",
            "boxes",
        ]),
        short_answer_instruction_markers: phrases(&[
            "questions",
            "answer the",
            "write",
            "using no more",
        ]),
        fill_blank_phrases: phrases(&[
            "complete the summary",
            "complete the sentences",
            "complete the notes",
            "complete the table",
            "complete the flow-chart",
        ]),
        fill_blank_instruction_markers: phrases(&[
            "complete the summary",
            "complete the sentences",
            "complete the notes",
            "write your answers",
        ]),
        short_answer_requires_question_mark: true,
        thresholds: Thresholds::default(),
    }
}

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Option<Profile> {
    match name {
        "academic" => Some(academic()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_lists_are_lowercase() {
        let p = academic();
        for list in [
            &p.passage_instruction_prefixes,
            &p.title_forbidden_keywords,
            &p.subheading_keywords,
            &p.fill_blank_phrases,
        ] {
            for item in list {
                assert_eq!(item, &item.to_lowercase());
            }
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("general").is_none());
        assert!(load_preset("academic").is_some());
    }
}
