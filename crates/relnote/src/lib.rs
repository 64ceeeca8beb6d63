//! Library interface for the `relnote` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - [`actions`] - GitHub Actions outputs and annotations
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions via `xtask`.

pub mod actions;

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::Display;
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode. Only output written
    /// through [`paint`] honors it.
    pub fn apply(self) {
        match self {
            Self::Auto => owo_colors::unset_override(),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

/// Render `value` with `style` if stdout should be colored.
///
/// Plain text under `--color never`, or under `auto` when stdout isn't a
/// terminal.
pub fn paint<T: Display>(value: T, style: Style) -> String {
    value
        .if_supports_color(Stream::Stdout, |text| text.style(style))
        .to_string()
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG              Log filter (e.g., debug, relnote=trace)
    RELNOTE_LOG_PATH      Explicit log file path
    RELNOTE_LOG_DIR       Log directory
    GITHUB_OUTPUT         Step output file used by `release --github-output`
";
/// Command-line interface definition for relnote.
#[derive(Parser)]
#[command(name = "relnote")]
#[command(about = "Turn a changelog entry into a polished release body", long_about = None)]
#[command(version)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Render the release title and body for a version
    Release(commands::release::ReleaseArgs),

    /// List the versions found in the changelog
    Versions(commands::versions::VersionsArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Diagnose configuration and environment
    Doctor(commands::doctor::DoctorArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
