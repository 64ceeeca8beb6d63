//! Versions command — list the versions a changelog contains.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use relnote_core::changelog::split_versions;
use relnote_core::config::Config;
use relnote_core::release::version_summary;

use crate::paint;

/// Arguments for the `versions` subcommand.
#[derive(Args, Debug, Default)]
pub struct VersionsArgs {
    /// Changelog to read (default: config `changelog`, else CHANGELOG.md)
    #[arg(long, value_name = "FILE")]
    pub changelog: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct VersionListing<'a> {
    version: &'a str,
    title: &'a str,
}

/// List every version token and title in the changelog.
#[instrument(name = "cmd_versions", skip_all, fields(json_output))]
pub fn cmd_versions(
    args: VersionsArgs,
    global_json: bool,
    config: &Config,
    cwd: &camino::Utf8Path,
) -> anyhow::Result<()> {
    let changelog_path = super::resolve_changelog(args.changelog.as_deref(), config, cwd);
    debug!(json_output = global_json, changelog = %changelog_path, "executing versions command");

    let changelog = super::read_changelog(&changelog_path)?;
    let versions = split_versions(&changelog);
    debug!(versions = %version_summary(&versions), "versions found");

    let listing: Vec<_> = versions
        .iter()
        .map(|(version, entry)| VersionListing {
            version,
            title: &entry.title,
        })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        println!(
            "{} No versions found in {}",
            paint("○", Style::new().yellow()),
            paint(&changelog_path, Style::new().cyan())
        );
        return Ok(());
    }

    for item in &listing {
        let version = paint(item.version, Style::new().bold());
        if item.title == item.version {
            println!("{version}");
        } else {
            println!("{version}  {}", paint(item.title, Style::new().dimmed()));
        }
    }

    Ok(())
}
