use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;

use crate::catalog::Item;
use crate::config::{Backend, EngineConfig};
use crate::error::{RecommendError, RecommendResult};
use crate::features::compose_all;
use crate::index::InvertedIndex;
use crate::similarity::{compute_similarity_with, SimilarityMatrix};
use crate::titles::TitleIndex;
use crate::vectorizer::fit;

/// Fitted similarity structure behind the recommender.
#[derive(Debug)]
pub enum SimilarityModel {
    Dense(SimilarityMatrix),
    Inverted(InvertedIndex),
}

impl SimilarityModel {
    pub fn len(&self) -> usize {
        match self {
            SimilarityModel::Dense(m) => m.len(),
            SimilarityModel::Inverted(idx) => idx.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Full similarity row for `row`, length n.
    pub fn row(&self, row: usize) -> Cow<'_, [f64]> {
        match self {
            SimilarityModel::Dense(m) => Cow::Borrowed(m.row(row)),
            SimilarityModel::Inverted(idx) => Cow::Owned(idx.row_scores(row)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub row: usize,
    pub title: String,
    pub score: f64,
}

/// Immutable model built once from a catalog and queried by shared reference.
#[derive(Debug)]
pub struct Recommender {
    titles: TitleIndex,
    model: SimilarityModel,
}

impl Recommender {
    pub fn build(items: &[Item], config: &EngineConfig) -> Self {
        let documents = compose_all(items);
        let space = fit(&documents);
        let model = match config.backend {
            Backend::Dense => SimilarityModel::Dense(compute_similarity_with(&space.vectors, config.parallel)),
            Backend::Inverted => SimilarityModel::Inverted(InvertedIndex::build(&space)),
        };
        let titles = TitleIndex::build(items.iter().map(|item| item.title.as_str()));
        tracing::info!(items = items.len(), backend = %config.backend, "recommender ready");
        Self { titles, model }
    }

    pub fn len(&self) -> usize { self.titles.len() }
    pub fn is_empty(&self) -> bool { self.titles.is_empty() }
    pub fn model(&self) -> &SimilarityModel { &self.model }

    /// Similarity between two rows.
    pub fn similarity(&self, i: usize, j: usize) -> RecommendResult<f64> {
        let len = self.model.len();
        for row in [i, j] {
            if row >= len {
                return Err(RecommendError::RowOutOfRange { row, len });
            }
        }
        Ok(self.model.row(i)[j])
    }

    /// Titles of the `n` most similar items to `seed`, best first.
    pub fn recommend(&self, seed: &str, n: usize) -> RecommendResult<Vec<String>> {
        Ok(self.recommend_scored(seed, n)?.into_iter().map(|r| r.title).collect())
    }

    pub fn recommend_scored(&self, seed: &str, n: usize) -> RecommendResult<Vec<Recommendation>> {
        let idx = self.titles.resolve(seed)?;
        let scores = self.model.row(idx);
        let top = top_n_excluding(&scores, idx, n);
        tracing::debug!(seed, row = idx, requested = n, returned = top.len(), "recommendation query");
        top.into_iter()
            .map(|(row, score)| {
                self.titles
                    .title_at(row)
                    .map(|title| Recommendation { row, title: title.to_string(), score })
                    .ok_or(RecommendError::RowOutOfRange { row, len: self.titles.len() })
            })
            .collect()
    }
}

fn by_score_then_row(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

/// Highest `n` scores other than `exclude`, descending; equal scores keep catalog order.
pub fn top_n_excluding(scores: &[f64], exclude: usize, n: usize) -> Vec<(usize, f64)> {
    if n == 0 {
        return Vec::new();
    }
    let mut candidates: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(row, _)| *row != exclude)
        .collect();
    if n < candidates.len() {
        candidates.select_nth_unstable_by(n - 1, by_score_then_row);
        candidates.truncate(n);
    }
    candidates.sort_by(by_score_then_row);
    candidates
}
