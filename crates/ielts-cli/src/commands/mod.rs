pub mod batch;
pub mod parse;
pub mod profile;

use ielts_core::error::IeltsError;
use ielts_core::pipeline::ReadingParser;
use ielts_core::profile::{builtin, load_profile};
use std::path::Path;

/// Compile the given profile file, or the builtin academic profile.
pub fn load_parser(profile: Option<&Path>) -> Result<ReadingParser, IeltsError> {
    let profile = match profile {
        Some(path) => load_profile(path)?,
        None => builtin::academic(),
    };
    ReadingParser::new(profile)
}
