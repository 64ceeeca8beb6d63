//! Release command — thin CLI layer over `relnote_core::release::render_release`.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, info, instrument};

use relnote_core::config::{self, Config, FormatConfig};
use relnote_core::release::{self, Release};

use crate::actions;

/// Arguments for the `release` subcommand.
#[derive(Args, Debug, Default)]
pub struct ReleaseArgs {
    /// Version to render, as written in the changelog header (e.g. "v1.2.0")
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Changelog to read (default: config `changelog`, else CHANGELOG.md)
    #[arg(long, value_name = "FILE")]
    pub changelog: Option<Utf8PathBuf>,

    /// Format configuration file (JSON, or TOML/YAML by extension)
    #[arg(long, value_name = "FILE")]
    pub configuration: Option<Utf8PathBuf>,

    /// Also write `title` and `body` to the $GITHUB_OUTPUT file
    #[arg(long)]
    pub github_output: bool,
}

/// Execute the release command.
#[instrument(name = "cmd_release", skip_all, fields(version = %args.version))]
pub fn cmd_release(
    args: ReleaseArgs,
    global_json: bool,
    config: &Config,
    cwd: &camino::Utf8Path,
) -> anyhow::Result<()> {
    let changelog_path = super::resolve_changelog(args.changelog.as_deref(), config, cwd);
    let configuration_path = args.configuration.as_ref().map(|path| cwd.join(path));

    info!(
        version = %args.version,
        changelog = %changelog_path,
        configuration = configuration_path.as_ref().map_or("{default}", |p| p.as_str()),
        "rendering release"
    );

    let format = resolve_format(config, configuration_path.as_deref())?;
    let changelog = super::read_changelog(&changelog_path)?;

    let release = release::render_release(
        &changelog,
        &args.version,
        &format,
        super::source_name(&changelog_path),
    )?;
    debug!(title = %release.title, body_len = release.body.len(), "release rendered");

    if args.github_output {
        write_github_outputs(&release)?;
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&release)?);
    } else {
        println!("{}", release.body);
    }

    Ok(())
}

/// Built-in formatting, then the config `[format]` section, then the
/// `--configuration` file.
fn resolve_format(
    config: &Config,
    configuration: Option<&camino::Utf8Path>,
) -> anyhow::Result<FormatConfig> {
    let format = config.format_config();
    let Some(path) = configuration else {
        return Ok(format);
    };

    let overrides = config::load_format_file(path)
        .with_context(|| format!("failed to load format configuration from {path}"))?;
    Ok(format.merge(overrides))
}

fn write_github_outputs(release: &Release) -> anyhow::Result<()> {
    let Some(path) = actions::github_output_path() else {
        bail!(
            "--github-output requires the {} environment variable",
            actions::ENV_GITHUB_OUTPUT
        );
    };

    let outputs = [
        ("title", release.title.as_str()),
        ("body", release.body.as_str()),
    ];
    actions::write_outputs(&path, &outputs)
        .with_context(|| format!("failed to write step outputs to {}", path.display()))?;
    debug!(path = %path.display(), "step outputs written");
    Ok(())
}
