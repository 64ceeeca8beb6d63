//! Reassembling parsed sections into a release body.

use std::sync::LazyLock;

use regex::Regex;

use super::ParsedSections;

/// Header markers, and the space after them, at the start of a body line.
static NESTED_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+ ?").expect("Invalid nested marker regex"));

/// Render the release body.
///
/// Unlabelled text comes first, then each section as a level-2 header
/// followed by its body. Header markers inside section bodies are stripped so
/// nested headings read as plain text.
pub fn assemble_release(parsed: &ParsedSections) -> String {
    let mut release = String::new();

    let unlabelled = parsed.unlabelled.trim();
    if !unlabelled.is_empty() {
        release.push_str(unlabelled);
        release.push_str("\n\n");
    }

    for section in &parsed.sections {
        let body = NESTED_MARKERS.replace_all(&section.body, "");
        release.push_str(&format!("## {}\n\n{body}\n\n", section.title));
    }

    release.trim_end().to_string()
}
