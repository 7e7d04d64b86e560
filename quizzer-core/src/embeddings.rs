//! Per-document embedding cache.
//!
//! Embedding sets are stored as one JSON array of float arrays per document,
//! under `<dir>/<model-slug>/<document-name>-<fingerprint>.json`. The
//! fingerprint is derived from the chunk sequence, so an edited document
//! maps to a fresh file instead of reusing stale vectors.

use std::path::{Path, PathBuf};

use quizzer_models::ModelId;
use quizzer_models::providers::{EmbedRequest, ModelProvider};
use tracing::{debug, info};

use crate::hash::ContentHash;
use crate::store::{load_json, save_json};
use crate::{Error, Result};

/// Hex digits of the fingerprint kept in cache file names.
const FINGERPRINT_LEN: usize = 16;

/// Identity of a segmented document: its name plus a fingerprint of its
/// chunks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    name: String,
    fingerprint: ContentHash,
}

impl DocumentId {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, chunks: &[S]) -> Self {
        Self {
            name: name.into(),
            fingerprint: ContentHash::from_chunks(chunks),
        }
    }

    /// Use the file name of `path` as the document name.
    pub fn for_path<S: AsRef<str>>(path: &Path, chunks: &[S]) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Self::new(name, chunks)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fingerprint(&self) -> &ContentHash {
        &self.fingerprint
    }

    fn file_stem(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        format!("{}-{}", name, self.fingerprint.short(FINGERPRINT_LEN))
    }
}

/// File-backed cache of chunk embeddings for one embedding model.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    dir: PathBuf,
    model: ModelId,
}

impl EmbeddingStore {
    /// Create a store rooted at `dir` for the given embedding model.
    pub fn new(dir: impl Into<PathBuf>, model: ModelId) -> Self {
        Self {
            dir: dir.into(),
            model,
        }
    }

    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// Cache file for a document.
    pub fn path_for(&self, doc: &DocumentId) -> PathBuf {
        self.dir
            .join(self.model.slug())
            .join(format!("{}.json", doc.file_stem()))
    }

    /// Load a cached embedding set, if one exists.
    pub fn load(&self, doc: &DocumentId) -> Result<Option<Vec<Vec<f32>>>> {
        match load_json(&self.path_for(doc)) {
            Ok(embeddings) => Ok(Some(embeddings)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Return the cached embeddings for `doc`, or embed every chunk and
    /// persist the result.
    ///
    /// A cached set is returned unchanged. When generating, the gateway is
    /// called once per chunk in order; if any call fails nothing is written.
    pub async fn get_embeddings(
        &self,
        provider: &dyn ModelProvider,
        doc: &DocumentId,
        chunks: &[String],
    ) -> Result<Vec<Vec<f32>>> {
        if let Some(cached) = self.load(doc)? {
            debug!("Embedding cache hit for {} ({} vectors)", doc.name(), cached.len());
            return Ok(cached);
        }

        info!(
            "Embedding {} chunks of {} with {}",
            chunks.len(),
            doc.name(),
            self.model
        );
        let mut embeddings = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            embeddings.push(self.embed_text(provider, chunk).await?);
        }

        save_json(&self.path_for(doc), &embeddings)?;
        Ok(embeddings)
    }

    /// Embed a single text with this store's model.
    pub async fn embed_text(&self, provider: &dyn ModelProvider, text: &str) -> Result<Vec<f32>> {
        let response = provider
            .embed(EmbedRequest::single(self.model.model(), text))
            .await?;

        let count = response.embeddings.len();
        let mut vectors = response.embeddings.into_iter();
        match (vectors.next(), count) {
            (Some(vector), 1) => Ok(vector),
            _ => Err(Error::MalformedResponse(format!(
                "expected 1 embedding, got {count}"
            ))),
        }
    }
}
