use ielts_core::diagnostics::{check_document, DocumentCheck};
use ielts_core::error::IeltsError;
use ielts_core::extraction::pdftotext::PdftotextExtractor;
use ielts_core::extraction::PdfExtractor;
use ielts_core::model::ReadingTest;
use ielts_core::pipeline::ReadingParser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::output;

/// Outcome for one file of a batch run.
#[derive(Debug, Serialize)]
struct FileResult {
    file: String,
    passed: bool,
    /// Extraction failure, when the file could not be read at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<DocumentCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test: Option<ReadingTest>,
}

/// Returns whether every file passed.
pub fn run(
    dir: &Path,
    max: Option<usize>,
    verbose: bool,
    json_file: Option<PathBuf>,
    profile: Option<PathBuf>,
) -> Result<bool, IeltsError> {
    let parser = super::load_parser(profile.as_deref())?;
    if !PdftotextExtractor::is_available() {
        return Err(IeltsError::PdftotextNotFound);
    }
    let extractor = PdftotextExtractor::new();

    let mut files = pdf_files(dir)?;
    if let Some(max) = max {
        files.truncate(max);
    }
    if files.is_empty() {
        eprintln!("No PDF files found in {}", dir.display());
        return Ok(true);
    }

    println!("Checking {} file(s) in {}\n", files.len(), dir.display());

    let mut results = Vec::with_capacity(files.len());
    for path in &files {
        let result = process(path, &extractor, &parser);
        report(&result, verbose);
        results.push(result);
    }

    print_summary(&results);

    if let Some(path) = json_file {
        output::json::write(&path, &results)?;
        println!("\nResults written to {}", path.display());
    }

    Ok(results.iter().all(|r| r.passed))
}

/// `*.pdf` files directly in `dir`, sorted by name.
fn pdf_files(dir: &Path) -> Result<Vec<PathBuf>, IeltsError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn process(path: &Path, extractor: &dyn PdfExtractor, parser: &ReadingParser) -> FileResult {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match extractor.extract_file(path) {
        Ok(document) => {
            let test = parser.parse_document(&document);
            let check = check_document(&test, parser);
            FileResult {
                file,
                passed: check.passed,
                error: None,
                check: Some(check),
                test: Some(test),
            }
        }
        Err(e) => {
            tracing::warn!(file = %file, error = %e, "extraction failed");
            FileResult {
                file,
                passed: false,
                error: Some(e.to_string()),
                check: None,
                test: None,
            }
        }
    }
}

fn report(result: &FileResult, verbose: bool) {
    let status = if result.passed { "PASS" } else { "FAIL" };
    println!("  {}  {}", status, result.file);

    if let Some(ref error) = result.error {
        println!("    error   {}", error);
        return;
    }
    if let Some(ref check) = result.check {
        if verbose || !result.passed {
            print!("{}", output::text::format_check(check));
        }
    }
}

fn print_summary(results: &[FileResult]) {
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    let mut by_area: BTreeMap<String, usize> = BTreeMap::new();
    let mut question_types: BTreeMap<String, usize> = BTreeMap::new();
    let mut extraction_failures = 0;
    for result in results {
        if result.error.is_some() {
            extraction_failures += 1;
        }
        let Some(ref check) = result.check else {
            continue;
        };
        for issue in check.errors.iter().chain(&check.warnings) {
            *by_area.entry(issue.area.to_string()).or_insert(0) += 1;
        }
        for (kind, count) in &check.info.question_types {
            *question_types.entry(kind.clone()).or_insert(0) += count;
        }
    }

    println!("\n=== Summary ===\n");
    println!("  Passed: {}", passed);
    println!("  Failed: {}", failed);
    if extraction_failures > 0 {
        println!("  Extraction failures: {}", extraction_failures);
    }

    if !by_area.is_empty() {
        println!("\n  Issues by area:");
        for (area, count) in &by_area {
            println!("    {:<20} {}", area, count);
        }
    }

    if !question_types.is_empty() {
        println!("\n  Question types:");
        for (kind, count) in &question_types {
            println!("    {:<28} {}", kind, count);
        }
    }
}
