//! JSON file persistence.
//!
//! Writes are whole-file overwrites with parent directories created on
//! demand. There is no locking: one process per file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::question::Question;
use crate::{Error, Result};

/// Serialize `value` as JSON to `path`, replacing any existing file.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    debug!("Saved {}", path.display());
    Ok(())
}

/// Load a JSON value from `path`.
///
/// Returns [`Error::NotFound`] when the file does not exist, so callers can
/// fall back to generating the value.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// A question set persisted as a JSON array.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, questions: &[Question]) -> Result<()> {
        save_json(&self.path, questions)
    }

    /// Load and validate every question; any invalid record fails the load.
    pub fn load(&self) -> Result<Vec<Question>> {
        load_json(&self.path)
    }
}
