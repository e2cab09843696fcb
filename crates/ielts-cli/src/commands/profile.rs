use ielts_core::error::IeltsError;
use ielts_core::pipeline::ReadingParser;
use ielts_core::profile::{builtin, load_profile};
use std::path::Path;

use crate::output;

pub fn show() -> Result<(), IeltsError> {
    output::json::print(&builtin::academic())
}

pub fn validate(file: &Path) -> Result<(), IeltsError> {
    let profile = load_profile(file)?;
    let parser = ReadingParser::new(profile)?;
    let profile = parser.profile();

    println!("Profile '{}' is valid.", profile.name);
    if let Some(ref desc) = profile.description {
        println!("  {}", desc);
    }
    println!(
        "  {} question section pattern(s), {} subheading keyword(s), {} title keyword(s)",
        profile.question_section_patterns.len(),
        profile.subheading_keywords.len(),
        profile.title_forbidden_keywords.len()
    );
    Ok(())
}
