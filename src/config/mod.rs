//! Configuration management.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default page size, matching the dashboard's user table.
const DEFAULT_PAGE_SIZE: usize = 6;

/// Main configuration for aula.
///
/// Loaded from an optional TOML file; every field has a default so a
/// missing file or empty table is valid.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AulaConfig {
    /// Records shown per page.
    pub page_size: usize,
    /// Directory exports are written into.
    pub export_dir: PathBuf,
    /// Base name for export files (`<base>_<timestamp>.<ext>`).
    pub export_base: String,
}

impl Default for AulaConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            export_dir: PathBuf::from("."),
            export_base: "usuarios".to_string(),
        }
    }
}

impl AulaConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] on malformed TOML, unknown keys, or
    /// a zero page size.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| Error::InvalidInput(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file, falling back to defaults when no
    /// path is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the file cannot be read, and
    /// [`Error::InvalidInput`] if its contents are malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| Error::operation("read_config", e))?;
                Self::from_toml(&text)
            },
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidInput(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
