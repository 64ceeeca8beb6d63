//! Splitting a changelog into per-version entries.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{VersionCollection, VersionEntry, scan_blocks};

/// A version header: exactly two `#` and a space at the start of a line.
static VERSION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## ").expect("Invalid version header regex"));

/// Partition a changelog into versions keyed by version token.
///
/// The token is the first word after the `## ` marker; the title is the whole
/// header line. A header with nothing directly after the marker ends the scan,
/// so only the versions before it are returned. A repeated token keeps the
/// last entry seen.
pub fn split_versions(changelog: &str) -> VersionCollection {
    let (_, blocks) = scan_blocks(changelog, &VERSION_HEADER);
    let mut versions = VersionCollection::new();

    for block in blocks {
        let token = block
            .heading
            .split(char::is_whitespace)
            .next()
            .unwrap_or_default()
            .trim();
        if token.is_empty() {
            debug!(
                found = versions.len(),
                "version header without a token, stopping"
            );
            break;
        }

        if versions.contains(token) {
            debug!(version = token, "duplicate version header, keeping the later one");
        }
        versions.insert(
            token,
            VersionEntry {
                title: block.heading.trim().to_string(),
                body: block.body.trim().to_string(),
            },
        );
    }

    versions
}
