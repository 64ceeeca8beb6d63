//! GitHub Actions integration: step outputs and failure annotations.
//!
//! Step outputs are appended to the file named by `$GITHUB_OUTPUT` using the
//! multi-line form:
//!
//! ```text
//! body<<RELNOTE_EOF
//! ## 🚀 Features
//! ...
//! RELNOTE_EOF
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File the runner reads step outputs from.
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

const ENV_GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";
const DELIMITER: &str = "RELNOTE_EOF";

/// Whether the process is running as a GitHub Actions step.
pub fn running_in_actions() -> bool {
    matches!(std::env::var(ENV_GITHUB_ACTIONS).as_deref(), Ok("true"))
}

/// Path of the step output file, if the runner provided one.
pub fn github_output_path() -> Option<PathBuf> {
    std::env::var_os(ENV_GITHUB_OUTPUT)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Emit an `::error::` workflow command so the step is annotated as failed.
pub fn report_failure(message: &str) {
    println!("::error::{}", escape_command_data(message));
}

/// Append named outputs to a step output file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn write_outputs(path: &Path, outputs: &[(&str, &str)]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (name, value) in outputs {
        file.write_all(format_output(name, value).as_bytes())?;
    }
    file.flush()
}

/// Format one output in the multi-line `name<<DELIMITER` syntax.
///
/// The delimiter is extended until it doesn't occur in the value.
pub fn format_output(name: &str, value: &str) -> String {
    let mut delimiter = DELIMITER.to_string();
    let mut attempt = 0;
    while value.contains(&delimiter) {
        attempt += 1;
        delimiter = format!("{DELIMITER}_{attempt}");
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
