//! Merge parser output into one question list where no number is answered twice.

pub mod claims;

pub use claims::{ClaimRegistry, Conflict};

use crate::questions::{Candidate, ParserKind, Question};

struct Accepted {
    question: Question,
    first_number: Option<u32>,
    position: usize,
    order: usize,
}

/// Accept candidates in the given parser order, dropping any that reuse a
/// claimed question number or overlap a claimed span.
///
/// The result is sorted by lowest question number (entries without one
/// last), then text position, then discovery order. Spans are dropped.
pub fn aggregate(batches: Vec<(ParserKind, Vec<Candidate>)>) -> Vec<Question> {
    let mut claims = ClaimRegistry::new();
    let mut accepted: Vec<Accepted> = Vec::new();

    for (kind, candidates) in batches {
        let total = candidates.len();
        let mut kept = 0;
        for candidate in candidates {
            let numbers = candidate.question.identifiers();
            if let Some(conflict) = claims.conflict(&numbers, candidate.span.as_ref()) {
                tracing::debug!(parser = %kind, %conflict, "candidate discarded");
                continue;
            }
            claims.claim(&numbers, candidate.span.as_ref());
            kept += 1;
            accepted.push(Accepted {
                first_number: numbers.first().copied(),
                position: candidate.position,
                order: accepted.len(),
                question: candidate.question,
            });
        }
        if total > 0 {
            tracing::debug!(parser = %kind, total, kept, "candidates aggregated");
        }
    }

    accepted.sort_by_key(|a| (a.first_number.is_none(), a.first_number, a.position, a.order));
    accepted.into_iter().map(|a| a.question).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::NumberedItem;

    fn fill(number: &str) -> Question {
        Question::FillBlank {
            number: number.into(),
            text: "____".into(),
        }
    }

    fn choice(number: &str) -> Question {
        Question::SingleChoice {
            number: number.into(),
            text: "Why?".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        }
    }

    #[test]
    fn test_earlier_parser_wins_number() {
        let questions = aggregate(vec![
            (ParserKind::FillBlank, vec![Candidate::with_span(fill("3"), 0..10)]),
            (ParserKind::SingleChoice, vec![Candidate::with_span(choice("3"), 50..60)]),
        ]);
        assert_eq!(questions, vec![fill("3")]);
    }

    #[test]
    fn test_overlapping_span_discarded() {
        let questions = aggregate(vec![
            (ParserKind::FillBlank, vec![Candidate::with_span(fill("3"), 0..10)]),
            (ParserKind::SingleChoice, vec![Candidate::with_span(choice("4"), 9..20)]),
        ]);
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_sorted_by_first_number_then_position() {
        let judgement = Question::YesNoNotGiven {
            title: "Questions 1-2".into(),
            instructions: Vec::new(),
            statements: vec![NumberedItem::new("1", "a"), NumberedItem::new("2", "b")],
            options: vec!["YES".into(), "NO".into(), "NOT GIVEN".into()],
        };
        let empty = Question::ParagraphMatching {
            title: "Questions".into(),
            instructions: Vec::new(),
            statements: Vec::new(),
            options: Vec::new(),
        };
        let questions = aggregate(vec![
            (ParserKind::ParagraphMatching, vec![Candidate::at(empty.clone(), 0)]),
            (ParserKind::FillBlank, vec![Candidate::with_span(fill("5"), 100..110)]),
            (ParserKind::YesNoNotGiven, vec![Candidate::at(judgement.clone(), 20)]),
            (ParserKind::SingleChoice, vec![Candidate::with_span(choice("3"), 60..90)]),
        ]);
        assert_eq!(questions, vec![judgement, choice("3"), fill("5"), empty]);
    }

    #[test]
    fn test_candidate_without_span_still_claims_numbers() {
        let judgement = Question::YesNoNotGiven {
            title: "Questions 7".into(),
            instructions: Vec::new(),
            statements: vec![NumberedItem::new("7", "a")],
            options: vec!["TRUE".into(), "FALSE".into(), "NOT GIVEN".into()],
        };
        let questions = aggregate(vec![
            (ParserKind::YesNoNotGiven, vec![Candidate::at(judgement.clone(), 0)]),
            (ParserKind::SingleChoice, vec![Candidate::with_span(choice("7"), 0..30)]),
        ]);
        assert_eq!(questions, vec![judgement]);
    }

    #[test]
    fn test_earlier_parser_wins_number_over_judgement_group() {
        let judgement = Question::YesNoNotGiven {
            title: "Questions 1-2".into(),
            instructions: Vec::new(),
            statements: vec![NumberedItem::new("1", "a"), NumberedItem::new("2", "b")],
            options: vec!["YES".into(), "NO".into(), "NOT GIVEN".into()],
        };
        let questions = aggregate(vec![
            (ParserKind::FillBlank, vec![Candidate::with_span(fill("2"), 0..10)]),
            (ParserKind::YesNoNotGiven, vec![Candidate::at(judgement, 0)]),
        ]);
        assert_eq!(questions, vec![fill("2")]);
    }

    #[test]
    fn test_judgement_group_ignores_claimed_spans() {
        let judgement = Question::YesNoNotGiven {
            title: "Questions 8".into(),
            instructions: Vec::new(),
            statements: vec![NumberedItem::new("8", "a")],
            options: vec!["YES".into(), "NO".into(), "NOT GIVEN".into()],
        };
        let questions = aggregate(vec![
            (ParserKind::FillBlank, vec![Candidate::with_span(fill("2"), 0..100)]),
            (ParserKind::YesNoNotGiven, vec![Candidate::at(judgement.clone(), 50)]),
        ]);
        assert_eq!(questions, vec![fill("2"), judgement]);
    }
}
