//! Info command — show package, config, and effective release formatting.

use clap::Args;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use relnote_core::config::{Config, FormatConfig};

use crate::paint;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    /// Files the loader merged, lowest precedence first.
    config_files: Vec<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    changelog: String,
}

impl ConfigInfo {
    fn from_config(config: &Config) -> Self {
        Self {
            config_files: config.sources.iter().map(ToString::to_string).collect(),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            changelog: config.changelog_path().to_string(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
    format: FormatConfig,
}

/// Print package information.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(_args: InfoArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config),
        format: config.format_config(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let bold = Style::new().bold();
    let dimmed = Style::new().dimmed();
    let cyan = Style::new().cyan();
    let heading = Style::new().bold().underline();

    let package = &full_info.package;
    println!(
        "{} {}",
        paint(package.name, bold),
        paint(package.version, Style::new().green())
    );
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", paint("License", dimmed), package.license);
    }
    if !package.repository.is_empty() {
        println!(
            "{}: {}",
            paint("Repository", dimmed),
            paint(package.repository, cyan)
        );
    }

    println!();
    println!("{}", paint("Configuration", heading));
    let config_info = &full_info.config;
    if config_info.config_files.is_empty() {
        println!(
            "{}: {}",
            paint("Config files", dimmed),
            paint("none loaded", Style::new().yellow())
        );
    } else {
        println!("{}:", paint("Config files", dimmed));
        for path in &config_info.config_files {
            println!("  {}", paint(path, cyan));
        }
    }
    println!("{}: {}", paint("Log level", dimmed), config_info.log_level);
    if let Some(ref dir) = config_info.log_dir {
        println!("{}: {}", paint("Log directory", dimmed), dir);
    }
    println!(
        "{}: {}",
        paint("Changelog", dimmed),
        paint(&config_info.changelog, cyan)
    );

    println!();
    println!("{}", paint("Release Format", heading));
    let format = &full_info.format;
    let placement = if format.emojis_prefix {
        "before title"
    } else {
        "after title"
    };
    println!("{}: {}", paint("Emoji", dimmed), placement);
    println!(
        "{}: {}",
        paint("Section order", dimmed),
        paint(format.order.join(", "), cyan)
    );
    for (title, emoji) in &format.emojis {
        println!("  {emoji} {title}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &test_config()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(cmd_info(InfoArgs::default(), true, &test_config()).is_ok());
    }

    #[test]
    fn test_config_info_no_file() {
        let info = ConfigInfo::from_config(&Config::default());
        assert!(info.config_files.is_empty());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.changelog, "CHANGELOG.md");
    }

    #[test]
    fn test_config_info_lists_loaded_sources() {
        let config = Config {
            sources: vec!["/home/me/.config/relnote/config.toml".into(), "/repo/.relnote.toml".into()],
            ..Default::default()
        };
        let info = ConfigInfo::from_config(&config);
        assert_eq!(
            info.config_files,
            ["/home/me/.config/relnote/config.toml", "/repo/.relnote.toml"]
        );
    }
}
