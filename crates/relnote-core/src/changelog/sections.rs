//! Splitting a version body into labelled sections.

use std::sync::LazyLock;

use regex::Regex;

use super::{ParsedSections, Section, scan_blocks};

/// A section header: exactly three `#` and a space at the start of a line.
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### ").expect("Invalid section header regex"));

/// Split a version body into its unlabelled preamble and titled sections.
///
/// A header with nothing at all after its marker ends the scan; the sections
/// before it are kept. A header holding only whitespace still opens a section,
/// with an empty title.
pub fn split_sections(body: &str) -> ParsedSections {
    let (preamble, blocks) = scan_blocks(body, &SECTION_HEADER);

    let sections = blocks
        .into_iter()
        .take_while(|block| !block.heading.is_empty())
        .map(|block| Section::new(block.heading.trim(), block.body.trim()))
        .collect();

    ParsedSections {
        unlabelled: preamble.trim().to_string(),
        sections,
    }
}
