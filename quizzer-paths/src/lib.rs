//! XDG data paths for quizzer.
//!
//! Generated embeddings are cached under the data directory so they survive
//! across runs. Configuration files are located by the CLI's config loader.

use std::path::{Path, PathBuf};

/// Name of the subdirectory holding cached embedding sets.
pub const EMBEDDINGS_DIR: &str = "embeddings";

/// Get the quizzer data directory.
///
/// Returns `$XDG_DATA_HOME/quizzer` if set, otherwise `~/.local/share/quizzer`.
///
/// # Examples
///
/// ```
/// use quizzer_paths::{data_dir, embeddings_dir_in};
///
/// let cache = embeddings_dir_in(&data_dir());
/// assert!(cache.ends_with("quizzer/embeddings"));
/// ```
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("quizzer")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/quizzer")
    } else {
        PathBuf::from(".local/share/quizzer")
    }
}

/// Directory where embedding sets are cached, below the given data root.
pub fn embeddings_dir_in(data_root: &Path) -> PathBuf {
    data_root.join(EMBEDDINGS_DIR)
}
