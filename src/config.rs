//! Runtime settings.
//!
//! The data file is resolved from, in order: an explicit path (the CLI
//! `--data-file` flag), the `LIBRARY_DATA_FILE` environment variable, and
//! finally `books.json` in the working directory.

use std::path::PathBuf;

/// Environment variable naming the catalog data file
pub const DATA_FILE_ENV: &str = "LIBRARY_DATA_FILE";

/// Data file used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "books.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: PathBuf,
}

impl Settings {
    /// Resolve settings from an optional override and the process environment
    pub fn resolve(data_file: Option<PathBuf>) -> Self {
        Self::resolve_with(data_file, std::env::var(DATA_FILE_ENV).ok())
    }

    fn resolve_with(data_file: Option<PathBuf>, env_value: Option<String>) -> Self {
        let data_file = data_file
            .or_else(|| {
                env_value
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        Self { data_file }
    }
}
