pub mod builtin;
pub mod schema;

use crate::error::IeltsError;
use regex::RegexBuilder;
use schema::Profile;
use std::path::Path;

/// Load a profile from a JSON file. Missing fields keep their builtin values.
pub fn load_profile(path: &Path) -> Result<Profile, IeltsError> {
    let content = std::fs::read_to_string(path).map_err(|e| IeltsError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<Profile, IeltsError> {
    let profile: Profile = serde_json::from_str(json).map_err(|e| IeltsError::ProfileLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<Profile, IeltsError> {
    let profile: Profile = serde_json::from_str(json).map_err(IeltsError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is usable.
pub fn validate_profile(profile: &Profile) -> Result<(), IeltsError> {
    if profile.question_section_patterns.is_empty() {
        return Err(IeltsError::ProfileInvalid(
            "question_section_patterns must not be empty".into(),
        ));
    }

    for pattern in &profile.question_section_patterns {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                IeltsError::ProfileInvalid(format!(
                    "question section pattern '{}' does not compile: {}",
                    pattern, e
                ))
            })?;
    }

    let phrase_lists: [(&str, &Vec<String>); 13] = [
        (
            "passage_instruction_prefixes",
            &profile.passage_instruction_prefixes,
        ),
        ("title_instruction_prefixes", &profile.title_instruction_prefixes),
        ("title_forbidden_keywords", &profile.title_forbidden_keywords),
        ("subheading_keywords", &profile.subheading_keywords),
        ("summary_phrases", &profile.summary_phrases),
        ("paragraph_matching_phrases", &profile.paragraph_matching_phrases),
        ("feature_keywords", &profile.feature_keywords),
        ("sentence_ending_keywords", &profile.sentence_ending_keywords),
        ("diagram_keywords", &profile.diagram_keywords),
        ("mcq_instruction_keywords", &profile.mcq_instruction_keywords),
        (
            "short_answer_instruction_markers",
            &profile.short_answer_instruction_markers,
        ),
        ("fill_blank_phrases", &profile.fill_blank_phrases),
        (
            "fill_blank_instruction_markers",
            &profile.fill_blank_instruction_markers,
        ),
    ];

    for (field, list) in phrase_lists {
        for phrase in list {
            if phrase.trim().is_empty() {
                return Err(IeltsError::ProfileInvalid(format!(
                    "{} contains an empty phrase",
                    field
                )));
            }
            if *phrase != phrase.to_lowercase() {
                return Err(IeltsError::ProfileInvalid(format!(
                    "{} entry '{}' must be lowercase",
                    field, phrase
                )));
            }
        }
    }

    let t = &profile.thresholds;
    if t.mcq_prompt_min_len > t.mcq_prompt_max_len {
        return Err(IeltsError::ProfileInvalid(format!(
            "mcq_prompt_min_len ({}) exceeds mcq_prompt_max_len ({})",
            t.mcq_prompt_min_len, t.mcq_prompt_max_len
        )));
    }
    if t.mcq_min_option_len > t.mcq_max_option_len {
        return Err(IeltsError::ProfileInvalid(format!(
            "mcq_min_option_len ({}) exceeds mcq_max_option_len ({})",
            t.mcq_min_option_len, t.mcq_max_option_len
        )));
    }
    if !(0.0..=1.0).contains(&t.min_ascii_ratio) {
        return Err(IeltsError::ProfileInvalid(format!(
            "min_ascii_ratio must be within 0..=1, got {}",
            t.min_ascii_ratio
        )));
    }
    if t.title_scan_lines == 0 || t.fill_blank_context_words == 0 {
        return Err(IeltsError::ProfileInvalid(
            "title_scan_lines and fill_blank_context_words must be positive".into(),
        ));
    }

    Ok(())
}
