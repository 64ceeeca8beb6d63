//! Doctor command — diagnose configuration and environment.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Confirm;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use relnote_core::changelog::split_versions;
use relnote_core::config::{self, Config, FormatConfig, PartialFormatConfig};

use crate::paint;

/// Arguments for the `doctor` subcommand.
#[derive(Args, Debug, Default)]
pub struct DoctorArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct DoctorReport {
    directories: DirectoryPaths,
    config: ConfigStatus,
    changelog: ChangelogStatus,
    environment: EnvironmentInfo,
}

#[derive(Serialize)]
struct DirectoryPaths {
    config: Option<String>,
    data_local: Option<String>,
}

#[derive(Serialize)]
struct ConfigStatus {
    /// Config files that were merged, lowest precedence first
    files: Vec<String>,
    /// Whether any config file was loaded
    found: bool,
}

#[derive(Serialize)]
struct ChangelogStatus {
    path: String,
    readable: bool,
    /// Number of versions parsed from it
    versions: usize,
    /// Most recent version token, if any
    latest: Option<String>,
}

#[derive(Serialize)]
struct EnvironmentInfo {
    /// Current working directory
    cwd: Option<String>,
    /// Relevant environment variables
    env_vars: Vec<EnvVar>,
}

#[derive(Serialize)]
struct EnvVar {
    name: &'static str,
    value: Option<String>,
    description: &'static str,
}

impl ChangelogStatus {
    fn gather(config: &Config, cwd: &camino::Utf8Path) -> Self {
        let path = super::resolve_changelog(None, config, cwd);
        match super::read_changelog(&path) {
            Ok(text) => {
                let versions = split_versions(&text);
                Self {
                    path: path.to_string(),
                    readable: true,
                    versions: versions.len(),
                    latest: versions.versions().next().map(str::to_string),
                }
            }
            Err(_) => Self {
                path: path.to_string(),
                readable: false,
                versions: 0,
                latest: None,
            },
        }
    }
}

impl DoctorReport {
    fn gather(config: &Config, cwd: &camino::Utf8Path) -> Self {
        Self {
            directories: DirectoryPaths {
                config: config::user_config_dir().map(|p| p.to_string()),
                data_local: config::user_data_local_dir().map(|p| p.to_string()),
            },
            config: ConfigStatus {
                found: !config.sources.is_empty(),
                files: config.sources.iter().map(ToString::to_string).collect(),
            },
            changelog: ChangelogStatus::gather(config, cwd),
            environment: EnvironmentInfo {
                cwd: Some(cwd.to_string()),
                env_vars: vec![
                    EnvVar {
                        name: "XDG_CONFIG_HOME",
                        value: std::env::var("XDG_CONFIG_HOME").ok(),
                        description: "Override config directory",
                    },
                    EnvVar {
                        name: "RUST_LOG",
                        value: std::env::var("RUST_LOG").ok(),
                        description: "Log filter directive",
                    },
                    EnvVar {
                        name: "RELNOTE_LOG_PATH",
                        value: std::env::var("RELNOTE_LOG_PATH").ok(),
                        description: "Explicit log file path",
                    },
                    EnvVar {
                        name: "RELNOTE_LOG_DIR",
                        value: std::env::var("RELNOTE_LOG_DIR").ok(),
                        description: "Log directory",
                    },
                    EnvVar {
                        name: "GITHUB_ACTIONS",
                        value: std::env::var("GITHUB_ACTIONS").ok(),
                        description: "Running as a GitHub Actions step",
                    },
                    EnvVar {
                        name: crate::actions::ENV_GITHUB_OUTPUT,
                        value: std::env::var(crate::actions::ENV_GITHUB_OUTPUT).ok(),
                        description: "Step output file for --github-output",
                    },
                ],
            },
        }
    }
}

/// Run diagnostics and report configuration status.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `cwd` - Current working directory
#[instrument(name = "cmd_doctor", skip_all)]
pub fn cmd_doctor(
    _args: DoctorArgs,
    global_json: bool,
    config: &Config,
    cwd: &camino::Utf8Path,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing doctor command");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    spinner.set_message("Gathering diagnostics...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let report = DoctorReport::gather(config, cwd);
    spinner.finish_and_clear();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let heading = Style::new().bold().underline();
    let ok = paint("✓", Style::new().green());
    let missing = paint("○", Style::new().yellow());
    let dimmed = Style::new().dimmed();
    let cyan = Style::new().cyan();

    println!("{}", paint("Configuration", heading));
    if report.config.found {
        for file in &report.config.files {
            println!("  {ok} Config file: {}", paint(file, cyan));
        }
    } else {
        println!("  {missing} No config file found");
        offer_config_creation()?;
    }
    println!();

    println!("{}", paint("Changelog", heading));
    let changelog = &report.changelog;
    if !changelog.readable {
        println!(
            "  {} Cannot read {}",
            paint("✗", Style::new().red()),
            paint(&changelog.path, cyan)
        );
    } else if changelog.versions == 0 {
        println!(
            "  {missing} {} has no `## ` version headers",
            paint(&changelog.path, cyan)
        );
    } else {
        println!(
            "  {ok} {}: {} version(s), latest {}",
            paint(&changelog.path, cyan),
            changelog.versions,
            paint(changelog.latest.as_deref().unwrap_or(""), Style::new().bold())
        );
    }
    println!();

    println!("{}", paint("Directories", heading));
    print_dir("  Config", report.directories.config.as_deref());
    print_dir("  Data (local)", report.directories.data_local.as_deref());
    println!();

    println!("{}", paint("Environment", heading));
    println!("  {}: {}", paint("Working directory", dimmed), paint(cwd, cyan));

    let set_vars: Vec<_> = report
        .environment
        .env_vars
        .iter()
        .filter_map(|var| var.value.as_deref().map(|value| (var.name, value)))
        .collect();

    if set_vars.is_empty() {
        println!(
            "  {} No XDG/logging/Actions overrides set",
            paint("○", dimmed)
        );
    } else {
        for (name, value) in set_vars {
            println!("  {}: {}", paint(name, dimmed), paint(value, cyan));
        }
    }

    Ok(())
}

fn print_dir(label: &str, path: Option<&str>) {
    let value = match path {
        Some(p) => paint(p, Style::new().cyan()),
        None => paint("(unavailable)", Style::new().yellow()),
    };
    println!("{}: {value}", paint(label, Style::new().dimmed()));
}

/// The config written by [`offer_config_creation`]: defaults with the
/// built-in release format spelled out so it can be edited.
fn starter_config() -> Config {
    let format = FormatConfig::default();
    Config {
        format: Some(PartialFormatConfig {
            emojis_prefix: Some(format.emojis_prefix),
            emojis: Some(format.emojis),
            order: Some(format.order),
        }),
        ..Config::default()
    }
}

/// Offer to create a default config file when none exists.
fn offer_config_creation() -> anyhow::Result<()> {
    let Some(config_dir) = config::user_config_dir() else {
        return Ok(());
    };

    let config_path = config_dir.join("config.yaml");

    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Ok(());
    }

    let create = Confirm::new("Create a default config file?")
        .with_default(false)
        .with_help_message(&format!("Will create {config_path}"))
        .prompt();

    match create {
        Ok(true) => {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let yaml = serde_saphyr::to_string(&starter_config())?;
            std::fs::write(&config_path, yaml)?;

            println!(
                "  {} Created {}",
                paint("✓", Style::new().green()),
                paint(&config_path, Style::new().cyan())
            );
        }
        Ok(false) => {}
        Err(_) => {
            // Prompt interrupted (Ctrl+C, etc.)
        }
    }

    Ok(())
}
