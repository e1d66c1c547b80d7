use super::vectorizer::{SparseVector, TermMatrix};

/// A matrix row and its cosine similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRow {
    pub row: usize,
    pub score: f64,
}

/// Cosine similarity given precomputed norms.
///
/// A zero-length side makes the ratio 0/0; that case scores 0.
pub fn cosine_similarity(a: &SparseVector, a_norm: f64, b: &SparseVector, b_norm: f64) -> f64 {
    let denom = a_norm * b_norm;
    if denom == 0.0 {
        0.0
    } else {
        a.dot(b) / denom
    }
}

/// Scores every row against `query`, best first.
///
/// Equal scores keep catalog order, so an all-zero query returns the rows
/// untouched.
pub fn rank(query: &SparseVector, matrix: &TermMatrix) -> Vec<ScoredRow> {
    let query_norm = query.norm();
    let mut scored: Vec<ScoredRow> = matrix
        .iter()
        .map(|(row, vector, norm)| ScoredRow {
            row,
            score: cosine_similarity(query, query_norm, vector, norm),
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
