//! Diagram and figure labelling.

use super::model::{Candidate, NumberedItem, Question};
use super::sections::{numbered_line, split_sections};
use crate::profile::schema::Profile;
use crate::text::{contains_any, normalize_text};

pub fn parse(questions_text: &str, profile: &Profile) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for section in split_sections(questions_text) {
        if !contains_any(section.text, &profile.diagram_keywords) {
            continue;
        }
        let mut lines = section.lines();
        let Some(title) = lines.next().map(normalize_text) else {
            continue;
        };

        let mut instructions = Vec::new();
        let mut labels: Vec<NumberedItem> = Vec::new();
        for line in lines {
            if let Some((number, text)) = numbered_line(line) {
                let text = normalize_text(text);
                if text.contains('_') || text.to_lowercase().contains("label") {
                    labels.push(NumberedItem::new(number, text));
                    continue;
                }
            }
            if labels.is_empty() {
                instructions.push(normalize_text(line));
            }
        }

        if labels.is_empty() {
            continue;
        }
        candidates.push(Candidate::with_span(
            Question::DiagramLabelCompletion {
                title,
                instructions,
                labels,
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
    fn test_labels() {
        let text = "Questions 12-13\n\
                    Label the diagram below.\n\
                    12 the ________ of the furnace\n\
                    13 cooling ________\n\
                    14 label the chimney";
        let candidates = parse(text, &academic());
        match &candidates[0].question {
            Question::DiagramLabelCompletion {
                instructions,
                labels,
                ..
            } => {
                assert_eq!(instructions, &["Label the diagram below."]);
                assert_eq!(labels.len(), 3);
                assert_eq!(labels[1].text, "cooling ________");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_requires_blank_or_label() {
        let text = "Questions 1-2\nLook at the figure.\n1 plain text\n2 more text";
        assert!(parse(text, &academic()).is_empty());
    }
}
