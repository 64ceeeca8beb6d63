//! Changelog parsing and release body formatting.
//!
//! A changelog is split into versions by level-2 headers (`## `), and each
//! version body is split into labelled sections by level-3 headers (`### `).
//! The sections are then reordered, decorated with emoji, and reassembled:
//!
//! ```
//! use relnote_core::changelog::{split_versions, split_sections, assemble_release};
//!
//! let versions = split_versions("## v1.0.0\n\nHello\n\n### Features\n\n- A\n");
//! let entry = versions.get("v1.0.0").unwrap();
//! let parsed = split_sections(&entry.body);
//! assert_eq!(assemble_release(&parsed), "Hello\n\n## Features\n\n- A");
//! ```
//!
//! Nothing in this module fails. Text that doesn't match the expected header
//! shapes produces fewer versions or a larger unlabelled block.

mod assemble;
mod decorate;
mod order;
mod sections;
mod versions;

pub use assemble::assemble_release;
pub use decorate::decorate_sections;
pub use order::order_sections;
pub use sections::split_sections;
pub use versions::split_versions;

use regex::Regex;
use serde::Serialize;

/// A single version's entry in a changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    /// The full header text, e.g. `v1.0.0 - 2024-01-01`.
    pub title: String,
    /// Everything between this header and the next, trimmed.
    pub body: String,
}

/// Version entries keyed by version token, in document order.
///
/// Inserting a token that already exists replaces its entry in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionCollection {
    entries: Vec<(String, VersionEntry)>,
}

impl VersionCollection {
    /// Create an empty collection.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an entry, replacing any previous entry for the same token.
    pub fn insert(&mut self, version: impl Into<String>, entry: VersionEntry) {
        let version = version.into();
        match self.entries.iter_mut().find(|(key, _)| *key == version) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((version, entry)),
        }
    }

    /// Look up the entry for a version token.
    pub fn get(&self, version: &str) -> Option<&VersionEntry> {
        self.entries
            .iter()
            .find(|(key, _)| key == version)
            .map(|(_, entry)| entry)
    }

    /// Whether an entry exists for the version token.
    pub fn contains(&self, version: &str) -> bool {
        self.get(version).is_some()
    }

    /// Number of distinct versions.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection is empty.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Version tokens in document order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(token, entry)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }
}

/// A labelled section within a version body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Header text, without the `### ` marker.
    pub title: String,
    /// Section content, trimmed.
    pub body: String,
}

impl Section {
    /// Build a section from a title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A version body split into free text and labelled sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedSections {
    /// Text that appears before the first section header.
    pub unlabelled: String,
    /// Sections in the order they should be emitted.
    pub sections: Vec<Section>,
}

/// A header line together with the text it governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block<'a> {
    /// Remainder of the header line after the marker, untrimmed.
    heading: &'a str,
    /// Text from the line after the header up to the next header.
    body: &'a str,
}

/// Split `text` at every match of `header`.
///
/// `header` must match a marker at the start of a line. Returns the text
/// before the first header and one [`Block`] per header, in order.
fn scan_blocks<'a>(text: &'a str, header: &Regex) -> (&'a str, Vec<Block<'a>>) {
    let markers: Vec<_> = header.find_iter(text).collect();
    let preamble_end = markers.first().map_or(text.len(), |m| m.start());

    let blocks = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let line_end = text[marker.end()..]
                .find('\n')
                .map_or(text.len(), |offset| marker.end() + offset);
            let body_end = markers.get(i + 1).map_or(text.len(), |next| next.start());
            let body_start = (line_end + 1).min(body_end);

            Block {
                heading: &text[marker.end()..line_end],
                body: &text[body_start..body_end],
            }
        })
        .collect();

    (&text[..preamble_end], blocks)
}
