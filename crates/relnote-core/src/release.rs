//! Rendering a single version's release from a changelog.
//!
//! Runs the [`changelog`](crate::changelog) pipeline end to end: find the
//! version, split its sections, order and decorate them, then assemble the
//! body.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::changelog::{
    VersionCollection, assemble_release, decorate_sections, order_sections, split_sections,
    split_versions,
};
use crate::config::FormatConfig;
use crate::error::{ReleaseError, ReleaseResult};

/// How many version tokens [`version_summary`] lists before eliding.
const SUMMARY_LIMIT: usize = 5;

/// A rendered release, ready to publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    /// The version token that was requested.
    pub version: String,
    /// The changelog header for the version.
    pub title: String,
    /// The formatted release body.
    pub body: String,
}

/// Trim a changelog and terminate it with a single newline.
pub fn normalize_changelog(text: &str) -> String {
    let mut normalized = text.trim().to_string();
    normalized.push('\n');
    normalized
}

/// Short, human-readable list of the versions in a collection.
///
/// Lists the first few tokens and counts the rest, e.g.
/// `v5, v4, v3, v2, v1, ... [2 more]`.
pub fn version_summary(versions: &VersionCollection) -> String {
    let shown: Vec<_> = versions.versions().take(SUMMARY_LIMIT).collect();
    let mut summary = shown.join(", ");
    if versions.len() > SUMMARY_LIMIT {
        summary.push_str(&format!(", ... [{} more]", versions.len() - SUMMARY_LIMIT));
    }
    summary
}

/// Render the release for `version` from `changelog`.
///
/// `source_name` names the changelog in the error when the version is
/// missing, usually the file's basename.
///
/// # Errors
///
/// Returns [`ReleaseError::MissingVersion`] if the changelog has no entry for
/// `version`.
#[instrument(skip(changelog, format), fields(changelog_len = changelog.len()))]
pub fn render_release(
    changelog: &str,
    version: &str,
    format: &FormatConfig,
    source_name: &str,
) -> ReleaseResult<Release> {
    let versions = split_versions(changelog);
    debug!(
        count = versions.len(),
        versions = %version_summary(&versions),
        "versions found"
    );

    let entry = versions
        .get(version)
        .ok_or_else(|| ReleaseError::MissingVersion {
            version: version.to_string(),
            source_name: source_name.to_string(),
        })?;

    let mut parsed = split_sections(&entry.body);
    debug!(
        sections = parsed.sections.len(),
        unlabelled = !parsed.unlabelled.is_empty(),
        "sections parsed"
    );
    parsed.sections = order_sections(parsed.sections, &format.order);
    parsed.sections = decorate_sections(parsed.sections, &format.emojis, format.emojis_prefix);

    Ok(Release {
        version: version.to_string(),
        title: entry.title.clone(),
        body: assemble_release(&parsed),
    })
}
