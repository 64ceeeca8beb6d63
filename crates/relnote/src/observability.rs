//! Structured logging to JSON Lines files.
//!
//! Nothing here writes to stdout, which carries the rendered release body and
//! workflow commands. Logs go to a file, or to stderr when no file is usable.

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context as LayerContext, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

const ENV_LOG_PATH: &str = "RELNOTE_LOG_PATH";
const ENV_LOG_DIR: &str = "RELNOTE_LOG_DIR";
const DEFAULT_LOG_DIR_UNIX: &str = "/var/log";
const LOG_FILE_SUFFIX: &str = ".jsonl";

/// Where and under which name logs are written.
#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    /// Service name, stamped on every entry and used for the log file name.
    pub service: String,
    /// Directory from the app config (`log_dir`), if set.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Config for this binary, with an optional configured log directory.
    pub fn new(log_dir: Option<PathBuf>) -> Self {
        Self {
            service: env!("CARGO_PKG_NAME").to_string(),
            log_dir,
        }
    }
}

/// Keeps the background log writer alive; dropping it flushes pending lines.
pub struct ObservabilityGuard {
    _writer: WorkerGuard,
}

/// Install the global subscriber.
///
/// An unusable log location is reported on stderr and logging falls back to
/// stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_observability(
    cfg: &ObservabilityConfig,
    env_filter: EnvFilter,
) -> Result<ObservabilityGuard> {
    let (writer, guard) = match LogTarget::resolve(&cfg.service, cfg.log_dir.as_deref()) {
        Ok(target) => tracing_appender::non_blocking(tracing_appender::rolling::daily(
            &target.dir,
            &target.file_name,
        )),
        Err(err) => {
            eprintln!("Warning: {err:#}. Falling back to stderr logging.");
            tracing_appender::non_blocking(std::io::stderr())
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(JsonLines::new(writer, &cfg.service))
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    tracing::debug!("observability initialized");
    Ok(ObservabilityGuard { _writer: guard })
}

/// `EnvFilter` from CLI flags and environment.
///
/// `--quiet` wins over `-v`, which wins over `RUST_LOG`, which wins over the
/// configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    match (quiet, verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level)),
        (false, 1) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("trace"),
    }
}

// ============================================================================
// JSON Lines layer
// ============================================================================

/// One JSON object per event: timestamp, level, service, target, the names of
/// the enclosing spans, and the fields of those spans and the event.
struct JsonLines {
    writer: NonBlocking,
    service: Value,
}

impl JsonLines {
    fn new(writer: NonBlocking, service: &str) -> Self {
        Self {
            writer,
            service: Value::String(service.to_string()),
        }
    }
}

/// Fields captured when a span is created.
struct SpanFields(Map<String, Value>);

impl<S> Layer<S> for JsonLines
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: LayerContext<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut fields = FieldMap::default();
            attrs.record(&mut fields);
            span.extensions_mut().insert(SpanFields(fields.0));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: LayerContext<'_, S>) {
        let metadata = event.metadata();
        let mut record = Map::new();
        record.insert("timestamp".into(), Value::String(timestamp()));
        record.insert(
            "level".into(),
            Value::String(metadata.level().as_str().to_lowercase()),
        );
        record.insert("service".into(), self.service.clone());
        record.insert("target".into(), Value::String(metadata.target().into()));

        if let Some(scope) = ctx.event_scope(event) {
            let mut names = Vec::new();
            for span in scope.from_root() {
                names.push(Value::String(span.name().into()));
                if let Some(SpanFields(fields)) = span.extensions().get::<SpanFields>() {
                    record.extend(fields.clone());
                }
            }
            record.insert("spans".into(), Value::Array(names));
        }

        let mut fields = FieldMap::default();
        event.record(&mut fields);
        record.extend(fields.0);

        let mut line = Value::Object(record).to_string();
        line.push('\n');
        let _ = self.writer.make_writer().write_all(line.as_bytes());
    }
}

/// Collects fields as JSON; anything that isn't a bool, integer or string is
/// recorded through its `Debug` form.
#[derive(Default)]
struct FieldMap(Map<String, Value>);

impl Visit for FieldMap {
    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().into(), Value::Bool(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().into(), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().into(), Value::String(value.into()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().into(), Value::String(format!("{value:?}")));
    }
}

/// UTC, RFC 3339, millisecond precision.
fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// ============================================================================
// Log target
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
struct LogTarget {
    dir: PathBuf,
    file_name: String,
}

impl LogTarget {
    fn resolve(service: &str, config_dir: Option<&Path>) -> Result<Self> {
        Self::resolve_with(
            service,
            std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
            config_dir.map(Path::to_path_buf),
        )
    }

    /// `RELNOTE_LOG_PATH`, then `RELNOTE_LOG_DIR`, then the configured
    /// directory, then the first writable default location.
    fn resolve_with(
        service: &str,
        path: Option<PathBuf>,
        dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = path {
            return Self::at_path(&path);
        }
        if let Some(dir) = dir.or(config_dir) {
            return Self::in_dir(dir, service);
        }

        Self::default_dirs(service)
            .into_iter()
            .find_map(|dir| Self::in_dir(dir, service).ok())
            .ok_or_else(|| anyhow!("no writable log directory found"))
    }

    fn default_dirs(service: &str) -> Vec<PathBuf> {
        let unix = cfg!(unix).then(|| PathBuf::from(DEFAULT_LOG_DIR_UNIX));
        let data = directories::ProjectDirs::from("", "", service)
            .map(|dirs| dirs.data_local_dir().join("logs"));
        let cwd = std::env::current_dir().ok();
        unix.into_iter().chain(data).chain(cwd).collect()
    }

    fn in_dir(dir: PathBuf, service: &str) -> Result<Self> {
        let target = Self {
            dir,
            file_name: format!("{service}{LOG_FILE_SUFFIX}"),
        };
        target.ensure_writable()?;
        Ok(target)
    }

    fn at_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("{ENV_LOG_PATH} must end in a UTF-8 file name"))?;
        let target = Self {
            dir: path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
            file_name: file_name.to_string(),
        };
        target.ensure_writable()?;
        Ok(target)
    }

    fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    fn ensure_writable(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create log directory {}", self.dir.display()))?;
        let path = self.path();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(env_filter(true, 3, "info").to_string(), "error");
    }

    #[test]
    fn verbose_maps_to_debug_then_trace() {
        assert_eq!(env_filter(false, 1, "info").to_string(), "debug");
        assert_eq!(env_filter(false, 2, "info").to_string(), "trace");
    }

    #[test]
    fn explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("logs").join("custom.jsonl");

        let target = LogTarget::resolve_with(
            "relnote",
            Some(file.clone()),
            Some(tmp.path().join("ignored")),
            Some(tmp.path().join("also-ignored")),
        )
        .unwrap();

        assert_eq!(target.path(), file);
        assert!(file.exists());
    }

    #[test]
    fn dir_override_beats_config_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("override");

        let target = LogTarget::resolve_with(
            "relnote",
            None,
            Some(dir.clone()),
            Some(tmp.path().join("config")),
        )
        .unwrap();

        assert_eq!(target.dir, dir);
        assert_eq!(target.file_name, "relnote.jsonl");
    }

    #[test]
    fn config_dir_used_without_overrides() {
        let tmp = TempDir::new().unwrap();

        let target =
            LogTarget::resolve_with("relnote", None, None, Some(tmp.path().to_path_buf()))
                .unwrap();

        assert_eq!(target.path(), tmp.path().join("relnote.jsonl"));
    }

    #[test]
    fn unwritable_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let err = LogTarget::resolve_with("relnote", None, Some(blocker), None).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create log directory"));
    }

    #[test]
    fn timestamp_is_rfc3339_utc_millis() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'), "{ts}");
        assert_eq!(ts.len(), 24, "{ts}");
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn field_map_keeps_json_types() {
        use tracing::subscriber::with_default;

        #[derive(Clone, Default)]
        struct Capture(std::sync::Arc<std::sync::Mutex<Vec<Map<String, Value>>>>);

        impl<S: Subscriber> Layer<S> for Capture {
            fn on_event(&self, event: &Event<'_>, _: LayerContext<'_, S>) {
                let mut fields = FieldMap::default();
                event.record(&mut fields);
                self.0.lock().unwrap().push(fields.0);
            }
        }

        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        with_default(subscriber, || {
            tracing::info!(count = 3_usize, json = true, version = "v1", path = ?"a b");
        });

        let events = capture.0.lock().unwrap();
        let fields = &events[0];
        assert_eq!(fields["count"], 3);
        assert_eq!(fields["json"], true);
        assert_eq!(fields["version"], "v1");
        assert_eq!(fields["path"], "\"a b\"");
    }
}
