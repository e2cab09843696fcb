use crate::error::IeltsError;
use crate::extraction::{BBox, ExtractedDocument, PdfExtractor, TextBlock};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Page text comes from plain `pdftotext` (reading order, no column
/// padding); blocks come from `pdftotext -bbox-layout`, whose `<block>`
/// elements play the role of layout text blocks.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedDocument, IeltsError> {
        // The temp file lives until this function returns.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| IeltsError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| IeltsError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let text = run_pdftotext(&["-enc", "UTF-8"], &tmp_path)?;
        let full_text = join_pages(&text);

        let xml = run_pdftotext(&["-enc", "UTF-8", "-bbox-layout"], &tmp_path)?;
        let blocks = parse_bbox_blocks(&xml)?;

        if full_text.trim().is_empty() {
            tracing::warn!("pdftotext returned no text; the PDF may lack a text layer");
        }
        tracing::debug!(
            chars = full_text.len(),
            blocks = blocks.len(),
            "extracted document"
        );

        Ok(ExtractedDocument { full_text, blocks })
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(args: &[&str], pdf_path: &Path) -> Result<String, IeltsError> {
    let output = Command::new("pdftotext")
        .args(args)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IeltsError::PdftotextNotFound
            } else {
                IeltsError::Extraction(format!("pdftotext {} failed: {}", args.join(" "), e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(IeltsError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// pdftotext separates pages with a form feed; the pipeline expects newlines.
fn join_pages(text: &str) -> String {
    text.split('\x0c').collect::<Vec<_>>().join("\n")
}

#[derive(Default)]
struct BlockBuilder {
    bbox: Option<BBox>,
    lines: Vec<String>,
    words: Vec<String>,
}

/// Read `pdftotext -bbox-layout` XHTML into text blocks.
fn parse_bbox_blocks(xml: &str) -> Result<Vec<TextBlock>, IeltsError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut blocks = Vec::new();
    let mut page_index: Option<usize> = None;
    let mut current: Option<BlockBuilder> = None;
    let mut in_word = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| IeltsError::LayoutXml(e.to_string()))?;
        match event {
            Event::Start(tag) => match tag.name().as_ref() {
                b"page" => {
                    page_index = Some(page_index.map_or(0, |p| p + 1));
                }
                b"block" => {
                    current = Some(BlockBuilder {
                        bbox: parse_bbox(&tag),
                        ..BlockBuilder::default()
                    });
                }
                b"word" => in_word = true,
                _ => {}
            },
            Event::Text(text) if in_word => {
                let word = text
                    .unescape()
                    .map(|w| w.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                let word = word.trim();
                if let Some(block) = current.as_mut() {
                    if !word.is_empty() {
                        block.words.push(word.to_string());
                    }
                }
            }
            Event::End(tag) => match tag.name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    if let Some(block) = current.as_mut() {
                        if !block.words.is_empty() {
                            let line = block.words.join(" ");
                            block.lines.push(line);
                            block.words.clear();
                        }
                    }
                }
                b"block" => {
                    if let (Some(block), Some(page)) = (current.take(), page_index) {
                        let text = block.lines.join("\n");
                        if !text.trim().is_empty() {
                            blocks.push(TextBlock {
                                page_index: page,
                                bbox: block.bbox.unwrap_or_default(),
                                text,
                            });
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(blocks)
}

fn parse_bbox(tag: &BytesStart<'_>) -> Option<BBox> {
    Some(BBox {
        x_min: attr_f32(tag, "xMin")?,
        y_min: attr_f32(tag, "yMin")?,
        x_max: attr_f32(tag, "xMax")?,
        y_max: attr_f32(tag, "yMax")?,
    })
}

fn attr_f32(tag: &BytesStart<'_>, name: &str) -> Option<f32> {
    let attr = tag.try_get_attribute(name).ok()??;
    attr.unescape_value().ok()?.trim().parse().ok()
}
