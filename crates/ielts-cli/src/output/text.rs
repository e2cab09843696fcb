use ielts_core::diagnostics::DocumentCheck;
use ielts_core::model::{Passage, ReadingTest};
use ielts_core::questions::{KeyedItem, NumberedItem, Question};
use std::fmt::Write;

pub fn format_test(test: &ReadingTest) -> String {
    let mut out = String::new();
    format_passage(&mut out, &test.passage);

    let _ = writeln!(out, "\n=== Questions ({}) ===", test.questions.len());
    for question in &test.questions {
        out.push('\n');
        format_question(&mut out, question);
    }
    out
}

fn format_passage(out: &mut String, passage: &Passage) {
    let title = if passage.title.is_empty() {
        "(no title)"
    } else {
        passage.title.as_str()
    };
    let _ = writeln!(out, "=== {} ===\n", title);
    if let Some(ref intro) = passage.intro {
        let _ = writeln!(out, "  {}\n", intro);
    }
    for paragraph in &passage.paragraphs {
        match paragraph.letter {
            Some(letter) => {
                let _ = writeln!(out, "  [{}] {}\n", letter, paragraph.text);
            }
            None => {
                let _ = writeln!(out, "  {}\n", paragraph.text);
            }
        }
    }
}

fn format_question(out: &mut String, question: &Question) {
    match question {
        Question::SingleChoice {
            number,
            text,
            options,
        } => {
            let _ = writeln!(out, "{}. {}", number, text);
            for (letter, option) in ('A'..='D').zip(options) {
                let _ = writeln!(out, "    {}  {}", letter, option);
            }
        }
        Question::SummaryCompletion {
            text,
            blanks,
            options,
        } => {
            let _ = writeln!(out, "Summary completion (blanks {})", blanks.join(", "));
            for line in text.lines() {
                let _ = writeln!(out, "    {}", line);
            }
            keyed(out, options);
        }
        Question::ParagraphMatching {
            title,
            instructions,
            statements,
            options,
        } => {
            header(out, title, instructions);
            numbered(out, statements);
            let _ = writeln!(out, "    Paragraphs: {}", options.join(", "));
        }
        Question::YesNoNotGiven {
            title,
            instructions,
            statements,
            options,
        } => {
            header(out, title, instructions);
            numbered(out, statements);
            let _ = writeln!(out, "    Answers: {}", options.join(" / "));
        }
        Question::MatchingHeadings {
            title,
            instructions,
            headings,
            paragraphs,
        } => {
            header(out, title, instructions);
            keyed(out, headings);
            for mapping in paragraphs {
                let _ = writeln!(out, "  {:>3}  Paragraph {}", mapping.number, mapping.letter);
            }
        }
        Question::MatchingFeatures {
            title,
            instructions,
            features,
            statements,
        } => {
            header(out, title, instructions);
            numbered(out, statements);
            keyed(out, features);
        }
        Question::MatchingSentenceEndings {
            title,
            instructions,
            sentence_beginnings,
            endings,
        } => {
            header(out, title, instructions);
            numbered(out, sentence_beginnings);
            keyed(out, endings);
        }
        Question::DiagramLabelCompletion {
            title,
            instructions,
            labels,
        } => {
            header(out, title, instructions);
            numbered(out, labels);
        }
        Question::ShortAnswer {
            number,
            text,
            word_limit,
        } => {
            let _ = writeln!(out, "{}. {}  (max {} words)", number, text, word_limit);
        }
        Question::FillBlank { number, text } => {
            let _ = writeln!(out, "{}. {}", number, text);
        }
    }
}

fn header(out: &mut String, title: &str, instructions: &[String]) {
    let _ = writeln!(out, "{}", title);
    for line in instructions {
        let _ = writeln!(out, "  {}", line);
    }
}

fn numbered(out: &mut String, items: &[NumberedItem]) {
    for item in items {
        let _ = writeln!(out, "  {:>3}  {}", item.number, item.text);
    }
}

fn keyed(out: &mut String, items: &[KeyedItem]) {
    for item in items {
        let _ = writeln!(out, "  {:>5}  {}", item.key, item.text);
    }
}

/// One line per issue, errors first.
pub fn format_check(check: &DocumentCheck) -> String {
    let mut out = String::new();
    for issue in &check.errors {
        let _ = writeln!(out, "    error   {}", issue);
    }
    for issue in &check.warnings {
        let _ = writeln!(out, "    warning {}", issue);
    }
    let info = &check.info;
    let letters: String = info.paragraph_letters.iter().collect();
    let _ = writeln!(
        out,
        "    title: '{}', {} paragraph(s) {}, {} question group(s)",
        info.title,
        info.paragraph_count,
        if letters.is_empty() { "unlettered".to_string() } else { letters },
        info.question_count
    );
    out
}
