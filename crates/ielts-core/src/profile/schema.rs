use serde::{Deserialize, Serialize};

/// Keyword lists and thresholds consulted by the pipeline.
///
/// Every list holds lowercase phrases unless noted otherwise. Missing
/// fields in a JSON profile fall back to the builtin academic profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Block prefixes that mark question instructions, skipped when locating passage blocks.
    pub passage_instruction_prefixes: Vec<String>,
    /// Line prefixes that disqualify a line from being the passage title.
    pub title_instruction_prefixes: Vec<String>,
    /// Phrases that must never appear in an extracted title.
    pub title_forbidden_keywords: Vec<String>,
    /// Structural subheadings merged into the paragraph that follows them.
    pub subheading_keywords: Vec<String>,
    /// Regular expressions (matched case-insensitively) marking the start of the question region.
    pub question_section_patterns: Vec<String>,
    pub summary_phrases: Vec<String>,
    pub paragraph_matching_phrases: Vec<String>,
    pub feature_keywords: Vec<String>,
    pub sentence_ending_keywords: Vec<String>,
    pub diagram_keywords: Vec<String>,
    /// Phrases that turn an MCQ-shaped match into an instruction line.
    pub mcq_instruction_keywords: Vec<String>,
    pub short_answer_instruction_markers: Vec<String>,
    /// Phrases that introduce a sentence/summary/notes completion section.
    pub fill_blank_phrases: Vec<String>,
    /// Instruction text trimmed out of fill-blank context snippets.
    pub fill_blank_instruction_markers: Vec<String>,
    pub short_answer_requires_question_mark: bool,
    pub thresholds: Thresholds,
}

/// Numeric cut-offs. These are corpus-tuned starting points, not domain constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// How many non-empty lines are scanned for a probable title.
    pub title_scan_lines: usize,
    pub title_max_len: usize,
    pub title_max_words: usize,
    /// A first paragraph up to this length without a period becomes the intro.
    pub intro_max_len: usize,
    pub subheading_max_len: usize,
    /// Longest line after a heading list that can be the passage title.
    pub heading_list_title_max_len: usize,
    pub mcq_prompt_min_len: usize,
    pub mcq_prompt_max_len: usize,
    pub mcq_min_option_len: usize,
    pub mcq_min_avg_option_len: f64,
    pub mcq_max_option_len: usize,
    pub statement_min_len: usize,
    pub min_ascii_ratio: f64,
    pub fill_blank_context_words: usize,
    /// Bytes of text inspected on each side of a blank.
    pub fill_blank_context_window: usize,
    /// Blocks before the summary anchor searched for option lines.
    pub summary_option_lookback: usize,
}

impl Default for Profile {
    fn default() -> Self {
        super::builtin::academic()
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            title_scan_lines: 8,
            title_max_len: 120,
            title_max_words: 15,
            intro_max_len: 120,
            subheading_max_len: 60,
            heading_list_title_max_len: 80,
            mcq_prompt_min_len: 10,
            mcq_prompt_max_len: 300,
            mcq_min_option_len: 3,
            mcq_min_avg_option_len: 3.0,
            mcq_max_option_len: 200,
            statement_min_len: 15,
            min_ascii_ratio: 0.5,
            fill_blank_context_words: 8,
            fill_blank_context_window: 200,
            summary_option_lookback: 12,
        }
    }
}
