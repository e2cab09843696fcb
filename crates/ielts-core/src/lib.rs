pub mod aggregate;
pub mod diagnostics;
pub mod error;
pub mod extraction;
pub mod locate;
pub mod model;
pub mod passage;
pub mod pipeline;
pub mod profile;
pub mod questions;
pub mod split;
pub mod text;

use error::IeltsError;
use extraction::PdfExtractor;
use model::ReadingTest;
use pipeline::ReadingParser;

/// Main API entry point: rebuild the passage and questions of an IELTS
/// Reading PDF.
///
/// Only extraction can fail. Once text is available the pipeline always
/// returns a result, possibly with an empty title, no paragraphs or no
/// questions.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    parser: &ReadingParser,
) -> Result<ReadingTest, IeltsError> {
    let document = extractor.extract(pdf_bytes)?;
    Ok(parser.parse_document(&document))
}
