//! Cosine-similarity ranking of chunk embeddings.
//!
//! Vectors with zero norm, or whose length differs from the query, score
//! `0.0` instead of producing NaN. Equal scores keep ascending index order.

use std::cmp::Ordering;

/// A scored corpus entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub score: f32,
    pub index: usize,
}

/// Cosine similarity of two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Score every corpus vector against `query`, best first.
pub fn rank(query: &[f32], corpus: &[Vec<f32>]) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = corpus
        .iter()
        .enumerate()
        .map(|(index, item)| Ranked {
            score: cosine_similarity(query, item),
            index,
        })
        .collect();

    // Stable sort keeps ascending index among ties
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

/// The `k` best-scoring entries.
pub fn top_k(query: &[f32], corpus: &[Vec<f32>], k: usize) -> Vec<Ranked> {
    let mut ranked = rank(query, corpus);
    ranked.truncate(k);
    ranked
}
