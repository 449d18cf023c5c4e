use std::collections::HashMap;

use crate::similarity::finish_score;
use crate::vectorizer::VectorSpace;

pub type TermId = u32;
pub type DocId = u32;

/// Terms retained after tokenization, with their document frequencies and smoothed idf.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub dictionary: HashMap<String, TermId>,
    /// Term text by id; ids follow lexicographic term order.
    pub terms: Vec<String>,
    pub df: Vec<u32>,
    pub idf: Vec<f64>,
    pub num_docs: u32,
}

impl Vocabulary {
    pub fn len(&self) -> usize { self.terms.len() }
    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }
    pub fn idf_of(&self, term: &str) -> Option<f64> { self.term_id(term).map(|id| self.idf[id as usize]) }
}

/// Sparse L2-normalized tf-idf vector, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocVector {
    pub terms: Vec<(TermId, f64)>,
}

impl DocVector {
    /// A document with no surviving tokens.
    pub fn is_zero(&self) -> bool { self.terms.is_empty() }

    pub fn norm(&self) -> f64 {
        self.terms.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn weight(&self, term: TermId) -> f64 {
        self.terms
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|pos| self.terms[pos].1)
            .unwrap_or(0.0)
    }

    /// Sparse dot product, summed in ascending term order.
    pub fn dot(&self, other: &DocVector) -> f64 {
        let (a, b) = (&self.terms, &other.terms);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f64;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: f64, // normalized tf-idf weight
}

/// Term to postings map answering one similarity row at a time without an n x n matrix.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub postings: Vec<Vec<Posting>>, // indexed by term id, postings sorted by doc_id
    pub vectors: Vec<DocVector>,
}

impl InvertedIndex {
    pub fn build(space: &VectorSpace) -> Self {
        let mut postings: Vec<Vec<Posting>> = vec![Vec::new(); space.vocabulary.len()];
        for (doc_id, vector) in space.vectors.iter().enumerate() {
            for &(term_id, weight) in &vector.terms {
                postings[term_id as usize].push(Posting { doc_id: doc_id as DocId, weight });
            }
        }
        let total: usize = postings.iter().map(Vec::len).sum();
        tracing::info!(terms = postings.len(), postings = total, "built inverted index");
        Self { postings, vectors: space.vectors.clone() }
    }

    pub fn len(&self) -> usize { self.vectors.len() }
    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    /// Similarity of `row` against every document, equal to the dense matrix row.
    pub fn row_scores(&self, row: usize) -> Vec<f64> {
        let mut scores = vec![0.0f64; self.vectors.len()];
        let seed = &self.vectors[row];
        for &(term_id, weight) in &seed.terms {
            for p in &self.postings[term_id as usize] {
                scores[p.doc_id as usize] += weight * p.weight;
            }
        }
        for (j, score) in scores.iter_mut().enumerate() {
            *score = finish_score(row, j, *score, seed.is_zero());
        }
        scores
    }
}
