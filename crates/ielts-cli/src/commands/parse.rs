use ielts_core::error::IeltsError;
use ielts_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    profile: Option<PathBuf>,
) -> Result<(), IeltsError> {
    let parser = super::load_parser(profile.as_deref())?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let test = ielts_core::parse_pdf(&pdf_bytes, &extractor, &parser)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            output::json::write(&path, &test)?;
            eprintln!(
                "Parsed '{}': {} paragraph(s), {} question group(s), written to {}",
                test.passage.title,
                test.passage.paragraphs.len(),
                test.questions.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&test)?,
            _ => println!("{}", output::text::format_test(&test)),
        },
    }

    Ok(())
}
