//! Configuration loading and discovery.
//!
//! This module provides configuration file discovery by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from XDG config directory
//! 3. Merging with sensible defaults
//!
//! # Supported formats
//!
//! The following configuration file formats are supported:
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `.relnote.<ext>` in current directory or any parent
//! - `relnote.<ext>` in current directory or any parent
//! - `~/.config/relnote/config.<ext>` (user config)
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`
//!
//! # Release formatting
//!
//! How release bodies are formatted is described by [`FormatConfig`]. The
//! built-in defaults can be overridden by the `[format]` section of any config
//! file, and again by a standalone format file (see [`load_format_file`]).
//! Each override is applied with [`FormatConfig::merge`].
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use relnote_core::config::{Config, ConfigLoader};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let config = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! let format = config.format_config();
//! ```

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Changelog path used when neither the CLI nor config names one.
pub const DEFAULT_CHANGELOG: &str = "CHANGELOG.md";

/// The configuration for relnote.
///
/// Deserialized from config files found during discovery (TOML, YAML, or JSON).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Changelog to read when `--changelog` isn't given.
    pub changelog: Option<Utf8PathBuf>,
    /// Overrides for the built-in release formatting.
    pub format: Option<PartialFormatConfig>,
    /// Config files merged into this config, lowest precedence first.
    #[serde(skip)]
    pub sources: Vec<Utf8PathBuf>,
}

impl Config {
    /// The changelog path, falling back to [`DEFAULT_CHANGELOG`].
    pub fn changelog_path(&self) -> Utf8PathBuf {
        self.changelog
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CHANGELOG))
    }

    /// Release formatting with this config's `[format]` section applied.
    pub fn format_config(&self) -> FormatConfig {
        match &self.format {
            Some(partial) => FormatConfig::default().merge(partial.clone()),
            None => FormatConfig::default(),
        }
    }
}

/// How a release body is ordered and decorated.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormatConfig {
    /// Put emoji before the section title (`true`) or after it.
    pub emojis_prefix: bool,
    /// Emoji per lowercased section title.
    pub emojis: BTreeMap<String, String>,
    /// Lowercased section titles, highest priority first.
    pub order: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        let emojis = [
            ("changes", "⚙️"),
            ("dependencies", "📦"),
            ("distribution", "🚚"),
            ("features", "🚀"),
            ("new features", "🚀"),
            ("fixes", "🔧"),
            ("links", "🔗"),
            ("notes", "📝"),
            ("other", "💬"),
            ("security", "🛡"),
        ];
        let order = [
            "new features",
            "features",
            "changes",
            "fixes",
            "security",
            "dependencies",
            "distribution",
            "notes",
            "other",
            "links",
        ];

        Self {
            emojis_prefix: true,
            emojis: emojis
                .into_iter()
                .map(|(title, emoji)| (title.to_string(), emoji.to_string()))
                .collect(),
            order: order.into_iter().map(String::from).collect(),
        }
    }
}

impl FormatConfig {
    /// Apply a partial override.
    ///
    /// `emojis` and `order` replace the current values wholesale when
    /// present. `emojis_prefix` is kept only when the override leaves it
    /// unset, so an explicit `false` wins.
    pub fn merge(self, overrides: PartialFormatConfig) -> Self {
        Self {
            emojis_prefix: overrides.emojis_prefix.unwrap_or(self.emojis_prefix),
            emojis: overrides.emojis.unwrap_or(self.emojis),
            order: overrides.order.unwrap_or(self.order),
        }
    }
}

/// A partially specified [`FormatConfig`], as read from a file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialFormatConfig {
    /// Override for [`FormatConfig::emojis_prefix`].
    #[serde(alias = "emojis_prefix", skip_serializing_if = "Option::is_none")]
    pub emojis_prefix: Option<bool>,
    /// Replacement for [`FormatConfig::emojis`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emojis: Option<BTreeMap<String, String>>,
    /// Replacement for [`FormatConfig::order`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
}

/// Read a standalone format configuration file.
///
/// The format is chosen by extension; anything other than TOML or YAML is
/// read as JSON.
///
/// # Errors
///
/// Returns [`ConfigError::Deserialize`] if the file is missing, unreadable,
/// or not a valid format object.
#[tracing::instrument]
pub fn load_format_file(path: &Utf8Path) -> ConfigResult<PartialFormatConfig> {
    let figment = match path.extension() {
        Some("toml") => Figment::from(Toml::file_exact(path.as_str())),
        Some("yaml" | "yml") => Figment::from(Yaml::file_exact(path.as_str())),
        _ => Figment::from(Json::file_exact(path.as_str())),
    };

    let partial: PartialFormatConfig = figment
        .extract()
        .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
    tracing::debug!(
        emojis_prefix = ?partial.emojis_prefix,
        emojis = ?partial.emojis.as_ref().map(BTreeMap::len),
        order = ?partial.order.as_ref().map(Vec::len),
        "format configuration read"
    );
    Ok(partial)
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "relnote";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/relnote/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal.
    ///
    /// When walking up directories, stop if we find a directory containing
    /// this file or directory name. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. Explicit files (in order added via `with_file`)
    /// 2. Project config (closest to search root)
    /// 3. User config (`~/.config/relnote/config.<ext>`)
    /// 4. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<Config> {
        tracing::debug!("loading configuration");
        let sources = self.sources();

        let figment = sources.iter().fold(
            Figment::new().merge(Serialized::defaults(Config::default())),
            |figment, path| Self::merge_file(figment, path),
        );

        let mut config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        config.sources = sources;
        tracing::info!(
            log_level = config.log_level.as_str(),
            changelog = ?config.changelog,
            sources = ?config.sources,
            format_overrides = config.format.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration, returning an error if no config file is found.
    pub fn load_or_error(self) -> ConfigResult<Config> {
        if self.sources().is_empty() {
            return Err(ConfigError::NotFound);
        }
        self.load()
    }

    /// The config files [`load`](Self::load) merges, lowest precedence first:
    /// user config, then project config, then explicit files.
    pub fn sources(&self) -> Vec<Utf8PathBuf> {
        let user = self
            .include_user_config
            .then(|| self.find_user_config())
            .flatten();
        let project = self
            .project_search_root
            .as_ref()
            .and_then(|root| self.find_project_config(root));

        user.into_iter()
            .chain(project)
            .chain(self.explicit_files.iter().cloned())
            .collect()
    }

    /// Find project config by walking up from the given directory.
    fn find_project_config(&self, start: &Utf8Path) -> Option<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            for ext in CONFIG_EXTENSIONS {
                // Dotfile first (.relnote.toml)
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    return Some(dotfile);
                }

                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    return Some(regular);
                }
            }

            // The directory holding the marker is the last one searched.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        None
    }

    /// Find user config in XDG config directory.
    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let proj_dirs = project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        for ext in CONFIG_EXTENSIONS {
            let config_path = config_dir.join(format!("config.{ext}"));
            if config_path.is_file() {
                return Utf8PathBuf::from_path_buf(config_path).ok();
            }
        }

        None
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("toml") => figment.merge(Toml::file_exact(path.as_str())),
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the project directories for XDG-compliant path resolution.
///
/// Returns `None` if the home directory cannot be determined.
fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Get the user config directory path.
///
/// Returns `~/.config/relnote/` on Linux, `~/Library/Application Support/relnote/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// Get the local data directory path (machine-specific, not synced).
pub fn user_data_local_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_local_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert!(config.format.is_none());
        assert_eq!(config.changelog_path().as_str(), DEFAULT_CHANGELOG);
    }

    #[test]
    fn test_default_format() {
        let format = FormatConfig::default();
        assert!(format.emojis_prefix);
        assert_eq!(format.emojis.get("features").map(String::as_str), Some("🚀"));
        assert_eq!(format.emojis.get("fixes").map(String::as_str), Some("🔧"));
        assert_eq!(format.emojis.len(), 10);
        assert_eq!(format.order.first().map(String::as_str), Some("new features"));
        assert_eq!(format.order.last().map(String::as_str), Some("links"));
        assert_eq!(format.order.len(), 10);
    }

    #[test]
    fn test_merge_empty_keeps_defaults() {
        let merged = FormatConfig::default().merge(PartialFormatConfig::default());
        assert_eq!(merged, FormatConfig::default());
    }

    #[test]
    fn test_merge_explicit_false_is_honored() {
        let merged = FormatConfig::default().merge(PartialFormatConfig {
            emojis_prefix: Some(false),
            ..Default::default()
        });
        assert!(!merged.emojis_prefix);
        assert_eq!(merged.order, FormatConfig::default().order);
    }

    #[test]
    fn test_merge_replaces_emojis_wholesale() {
        let merged = FormatConfig::default().merge(PartialFormatConfig {
            emojis: Some(BTreeMap::from([("fixes".to_string(), "🐛".to_string())])),
            order: Some(vec!["fixes".into(), "features".into()]),
            ..Default::default()
        });
        assert_eq!(merged.emojis.len(), 1);
        assert_eq!(merged.emojis.get("fixes").map(String::as_str), Some("🐛"));
        assert!(!merged.emojis.contains_key("features"));
        assert_eq!(merged.order, ["fixes", "features"]);
        assert!(merged.emojis_prefix);
    }

    #[test]
    fn test_load_format_file_json() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "format.json",
            r#"{"emojisPrefix": false, "emojis": {"features": "⭐"}, "order": ["fixes", "features"]}"#,
        );

        let partial = load_format_file(&path).unwrap();
        assert_eq!(partial.emojis_prefix, Some(false));
        assert_eq!(
            partial.emojis.as_ref().and_then(|e| e.get("features")).map(String::as_str),
            Some("⭐")
        );
        assert_eq!(partial.order, Some(vec!["fixes".to_string(), "features".to_string()]));
    }

    #[test]
    fn test_load_format_file_null_prefix_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "format.json", r#"{"emojisPrefix": null}"#);

        let partial = load_format_file(&path).unwrap();
        assert_eq!(partial.emojis_prefix, None);
        assert!(FormatConfig::default().merge(partial).emojis_prefix);
    }

    #[test]
    fn test_load_format_file_toml_snake_case() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "format.toml", "emojis_prefix = false\n");

        let partial = load_format_file(&path).unwrap();
        assert_eq!(partial.emojis_prefix, Some(false));
    }

    #[test]
    fn test_load_format_file_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "format.json", "{ not json");

        let result = load_format_file(&path);
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_load_format_file_missing() {
        let result = load_format_file(Utf8Path::new("/nonexistent/relnote-format.json"));
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let loader = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker();

        let config = loader.load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_single_file_overrides_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = write(
            &tmp,
            "config.toml",
            r#"log_level = "debug"
log_dir = "/tmp/relnote"
changelog = "docs/CHANGES.md"
"#,
        );

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.log_dir.as_ref().map(|dir| dir.as_str()),
            Some("/tmp/relnote")
        );
        assert_eq!(config.changelog_path().as_str(), "docs/CHANGES.md");
    }

    #[test]
    fn test_format_section_in_config() {
        let tmp = TempDir::new().unwrap();
        let config_path = write(
            &tmp,
            "config.toml",
            r#"
[format]
emojisPrefix = false
order = ["fixes"]
"#,
        );

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        let format = config.format_config();
        assert!(!format.emojis_prefix);
        assert_eq!(format.order, ["fixes"]);
        assert_eq!(format.emojis, FormatConfig::default().emojis);
    }

    #[test]
    fn test_format_section_in_yaml_config() {
        let tmp = TempDir::new().unwrap();
        let config_path = write(
            &tmp,
            "config.yaml",
            "format:\n  emojis:\n    fixes: \"🐛\"\n",
        );

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        let format = config.format_config();
        assert!(format.emojis_prefix);
        assert_eq!(format.emojis.len(), 1);
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base_config = write(&tmp, "base.toml", r#"log_level = "warn""#);
        let override_config = write(&tmp, "override.toml", r#"log_level = "error""#);

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base_config)
            .with_file(&override_config)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_project_config_discovery() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("src").join("deep");
        fs::create_dir_all(&sub_dir).unwrap();

        fs::write(project_dir.join(".relnote.toml"), r#"log_level = "debug""#).unwrap();

        let sub_dir = Utf8PathBuf::try_from(sub_dir).unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&sub_dir)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();

        // /parent/.relnote.toml, /parent/child/.git/, /parent/child/work/
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();

        fs::write(parent.join(".relnote.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_config_beside_boundary_marker_is_found() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        let src = repo.join("src");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(repo.join(".relnote.toml"), r#"log_level = "error""#).unwrap();

        let src = Utf8PathBuf::try_from(src).unwrap();
        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&src)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_explicit_file_overrides_project_config() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, ".relnote.toml", r#"log_level = "warn""#);
        let override_config = write(&tmp, "override.toml", r#"log_level = "error""#);

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&tmp_path)
            .with_file(&override_config)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = write(&tmp, "config.toml", r#"log_level = "loud""#);

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load();

        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_load_or_error_fails_when_no_config() {
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load_or_error();

        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_load_or_error_succeeds_with_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = write(&tmp, "config.toml", r#"log_level = "debug""#);

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load_or_error()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_sources_prefer_dotfile() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, "relnote.toml", r#"log_level = "error""#);
        let dotfile = write(&tmp, ".relnote.toml", r#"log_level = "debug""#);

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let loader = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&root);
        assert_eq!(loader.sources(), vec![dotfile]);
    }

    #[test]
    fn test_loaded_config_records_sources_in_merge_order() {
        let tmp = TempDir::new().unwrap();
        let project = write(&tmp, ".relnote.toml", r#"log_level = "warn""#);
        let explicit = write(&tmp, "override.yaml", "log_level: error\n");

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&root)
            .with_file(&explicit)
            .load()
            .unwrap();

        assert_eq!(config.sources, vec![project, explicit]);
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_sources_skip_config_above_boundary() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        write(&tmp, ".relnote.toml", r#"log_level = "warn""#);

        let repo = Utf8PathBuf::try_from(repo).unwrap();
        let loader = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&repo);
        assert!(loader.sources().is_empty());
    }

    #[test]
    fn test_user_config_dir() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("relnote"));
        }
    }
}
