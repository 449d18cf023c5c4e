use rayon::prelude::*;

use crate::index::DocVector;

/// Dense, row-major n x n cosine similarity matrix.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize { self.n }
    pub fn is_empty(&self) -> bool { self.n == 0 }

    pub fn get(&self, i: usize, j: usize) -> f64 { self.data[i * self.n + j] }

    pub fn row(&self, i: usize) -> &[f64] { &self.data[i * self.n..(i + 1) * self.n] }
}

/// Final score for cell (i, j) given the raw dot product.
///
/// Self-similarity is 1.0 for a non-zero vector and 0.0 for a zero vector;
/// everything else is clamped into [0, 1] to absorb rounding.
pub(crate) fn finish_score(i: usize, j: usize, raw: f64, row_is_zero: bool) -> f64 {
    if i == j {
        if row_is_zero { 0.0 } else { 1.0 }
    } else {
        raw.clamp(0.0, 1.0)
    }
}

fn upper_row(vectors: &[DocVector], i: usize) -> Vec<f64> {
    let a = &vectors[i];
    vectors[i + 1..].iter().map(|b| a.dot(b)).collect()
}

/// Pairwise similarity of pre-normalized vectors.
///
/// The upper triangle is computed (row-parallel when `parallel` is set) and mirrored,
/// so the result is exactly symmetric.
pub fn compute_similarity_with(vectors: &[DocVector], parallel: bool) -> SimilarityMatrix {
    let n = vectors.len();
    let upper: Vec<Vec<f64>> = if parallel {
        (0..n).into_par_iter().map(|i| upper_row(vectors, i)).collect()
    } else {
        (0..n).map(|i| upper_row(vectors, i)).collect()
    };

    let mut data = vec![0.0f64; n * n];
    for (i, row) in upper.into_iter().enumerate() {
        data[i * n + i] = finish_score(i, i, 0.0, vectors[i].is_zero());
        for (offset, raw) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            let score = finish_score(i, j, raw, vectors[i].is_zero());
            data[i * n + j] = score;
            data[j * n + i] = score;
        }
    }
    tracing::info!(n, parallel, "computed similarity matrix");
    SimilarityMatrix { n, data }
}

pub fn compute_similarity(vectors: &[DocVector]) -> SimilarityMatrix {
    compute_similarity_with(vectors, true)
}
