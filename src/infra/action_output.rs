use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::error::AppResult;

const DELIMITER_BASE: &str = "WEEKLOG_EOF";

/// Appends step outputs to the file named by `GITHUB_OUTPUT`.
pub struct ActionOutputs {
    path: PathBuf,
}

impl ActionOutputs {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn set(&self, name: &str, value: &str) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_output(name, value).as_bytes())?;
        debug!(name, "published output");
        Ok(())
    }
}

/// Multi-line `name<<DELIM` form; the delimiter never occurs in `value`.
fn format_output(name: &str, value: &str) -> String {
    let mut delimiter = DELIMITER_BASE.to_string();
    let mut suffix = 0;
    while value.contains(&delimiter) {
        suffix += 1;
        delimiter = format!("{DELIMITER_BASE}_{suffix}");
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}
