//! Greedy, order-preserving alignment of layout blocks onto a text region.

use crate::extraction::TextBlock;
use crate::text::{normalize_whitespace, starts_with_any};

/// Blocks whose text lies inside the passage region, skipping question instructions.
pub fn collect_passage_blocks(
    passage: &str,
    blocks: &[TextBlock],
    instruction_prefixes: &[String],
) -> Vec<String> {
    locate_blocks(passage, blocks, |normalized| {
        starts_with_any(normalized, instruction_prefixes)
    })
    .into_iter()
    .map(|b| b.text.trim().to_string())
    .collect()
}

/// Blocks whose text lies inside the question region.
pub fn collect_question_blocks(questions: &str, blocks: &[TextBlock]) -> Vec<String> {
    locate_question_blocks(questions, blocks)
        .into_iter()
        .map(|b| b.text.trim().to_string())
        .collect()
}

/// Like [`collect_question_blocks`], keeping page and layout information.
pub fn locate_question_blocks<'a>(questions: &str, blocks: &'a [TextBlock]) -> Vec<&'a TextBlock> {
    locate_blocks(questions, blocks, |_| false)
}

fn locate_blocks<'a>(
    region: &str,
    blocks: &'a [TextBlock],
    skip: impl Fn(&str) -> bool,
) -> Vec<&'a TextBlock> {
    let normalized_region = normalize_whitespace(region);
    if normalized_region.is_empty() {
        return Vec::new();
    }

    let mut cursor = 0;
    let mut found = Vec::new();

    for block in blocks {
        let normalized = normalize_whitespace(&block.text);
        if normalized.is_empty() || skip(&normalized) {
            continue;
        }
        // Blocks that are not at or after the cursor are dropped.
        let Some(index) = normalized_region[cursor..].find(&normalized) else {
            continue;
        };
        found.push(block);
        cursor += index + normalized.len();
        if cursor >= normalized_region.len() {
            break;
        }
    }

    found
}
