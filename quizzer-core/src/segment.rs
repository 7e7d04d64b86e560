//! Paragraph segmentation of source documents.
//!
//! A chunk is one paragraph: consecutive non-blank lines, trimmed and joined
//! with single spaces. Blank lines (after trimming) separate chunks.

use std::path::Path;

use crate::{Error, Result};

/// Split raw text into paragraph chunks, in document order.
///
/// # Examples
///
/// ```
/// use quizzer_core::segment;
///
/// let chunks = segment("  One line\nand another  \n\n\nSecond paragraph\n");
/// assert_eq!(chunks, vec!["One line and another", "Second paragraph"]);
/// ```
pub fn segment(raw: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if !line.is_empty() {
            buffer.push(line);
        } else if !buffer.is_empty() {
            chunks.push(buffer.join(" "));
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        chunks.push(buffer.join(" "));
    }

    chunks
}

/// Read a UTF-8 document, dropping a leading byte-order mark.
///
/// Fails with [`Error::NotFound`] when `path` does not exist.
pub fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Read and segment a document in one step.
pub fn segment_file(path: &Path) -> Result<Vec<String>> {
    Ok(segment(&read_document(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn splits_on_blank_lines() {
        let text = "First line\nstill first\n\nSecond\n";
        assert_eq!(segment(text), vec!["First line still first", "Second"]);
    }

    #[test]
    fn whitespace_only_lines_count_as_blank() {
        let text = "alpha\n   \t \nbeta";
        assert_eq!(segment(text), vec!["alpha", "beta"]);
    }

    #[test]
    fn blank_runs_never_produce_empty_chunks() {
        let text = "\n\n\nalpha\n\n\n\n\nbeta\n\n\n";
        let chunks = segment(text);
        assert_eq!(chunks, vec!["alpha", "beta"]);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(segment("").is_empty());
        assert!(segment("\n  \n\t\n").is_empty());
    }

    #[test]
    fn trailing_paragraph_without_newline_is_flushed() {
        assert_eq!(segment("only paragraph"), vec!["only paragraph"]);
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let text = "one\r\ntwo\r\n\r\nthree\r\n";
        assert_eq!(segment(text), vec!["one two", "three"]);
    }

    #[test]
    fn joined_chunks_reconstruct_non_blank_content() {
        let text = "  a b \n c\n\n\n d \n\ne\n";
        let expected: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(segment(text).join(" "), expected.join(" "));
    }

    #[test]
    fn read_document_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("story.txt");
        std::fs::write(&path, "\u{feff}Once upon a time.\n\nThe end.\n").unwrap();

        let chunks = segment_file(&path).unwrap();
        assert_eq!(chunks, vec!["Once upon a time.", "The end."]);
    }

    #[test]
    fn read_document_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, Error::NotFound(p) if p == path));
    }
}
