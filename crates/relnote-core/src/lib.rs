//! Core library for relnote.
//!
//! This crate turns one version's entry in a Markdown changelog into a
//! release body: sections reordered by priority, decorated with emoji, with
//! any free text before the first section kept at the top.
//!
//! # Modules
//!
//! - [`changelog`] - Version and section splitting, ordering, decoration, assembly
//! - [`config`] - Configuration loading and release formatting defaults
//! - [`error`] - Error types and result aliases
//! - [`release`] - End-to-end rendering of a single version
//!
//! # Quick Start
//!
//! ```
//! use relnote_core::{FormatConfig, render_release};
//!
//! let changelog = "# Changelog\n\n## v1.0.0\n\n### Fixes\n\n- x\n\n### Features\n\n- y\n";
//! let release = render_release(changelog, "v1.0.0", &FormatConfig::default(), "CHANGELOG.md")
//!     .expect("version exists");
//!
//! assert_eq!(release.title, "v1.0.0");
//! assert_eq!(release.body, "## 🚀 Features\n\n- y\n\n## 🔧 Fixes\n\n- x");
//! ```
#![deny(unsafe_code)]

pub mod changelog;

pub mod config;

pub mod error;

pub mod release;

pub use config::{Config, ConfigLoader, FormatConfig, LogLevel, PartialFormatConfig};

pub use error::{ConfigError, ConfigResult, ReleaseError, ReleaseResult};

pub use release::{Release, render_release};
