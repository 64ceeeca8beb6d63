//! Command implementations

pub mod doctor;

pub mod info;

pub mod release;

pub mod versions;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use relnote_core::config::Config;
use relnote_core::release::normalize_changelog;

/// Resolve the changelog to read: CLI flag, then config, then the default.
///
/// Relative paths are taken from `cwd`.
pub fn resolve_changelog(
    flag: Option<&Utf8Path>,
    config: &Config,
    cwd: &Utf8Path,
) -> Utf8PathBuf {
    let path = flag.map_or_else(|| config.changelog_path(), Utf8Path::to_path_buf);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Read a changelog and normalise its surrounding whitespace.
///
/// Shared by the commands that parse a changelog (release, versions).
pub fn read_changelog(path: &Utf8Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read changelog at {path}"))?;
    Ok(normalize_changelog(&text))
}

/// The file name used to identify a changelog in messages.
pub fn source_name(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or(path.as_str())
}
