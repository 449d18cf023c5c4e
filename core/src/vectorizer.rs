use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::index::{DocVector, TermId, Vocabulary};
use crate::tokenizer::tokenize;

/// Fitted vocabulary plus one normalized vector per input document, in input order.
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    pub vocabulary: Vocabulary,
    pub vectors: Vec<DocVector>,
}

impl VectorSpace {
    pub fn len(&self) -> usize { self.vectors.len() }
    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    pub fn degenerate_count(&self) -> usize {
        self.vectors.iter().filter(|v| v.is_zero()).count()
    }
}

/// Smoothed idf: ln((1 + n) / (1 + df)) + 1.
pub fn smoothed_idf(num_docs: u32, df: u32) -> f64 {
    ((1.0 + num_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

pub fn fit<S: AsRef<str>>(documents: &[S]) -> VectorSpace {
    let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();
    let num_docs = tokenized.len() as u32;

    // Term ids follow sorted term order so the layout is reproducible.
    let all_terms: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
    let terms: Vec<String> = all_terms.into_iter().map(str::to_string).collect();
    let dictionary: HashMap<String, TermId> =
        terms.iter().enumerate().map(|(id, t)| (t.clone(), id as TermId)).collect();

    let mut df: Vec<u32> = vec![0; terms.len()];
    let mut counts_per_doc: Vec<BTreeMap<TermId, u32>> = Vec::with_capacity(tokenized.len());
    for tokens in &tokenized {
        let mut tf_counts: BTreeMap<TermId, u32> = BTreeMap::new();
        for term in tokens {
            let tid = dictionary[term];
            *tf_counts.entry(tid).or_insert(0) += 1;
        }
        for tid in tf_counts.keys() {
            df[*tid as usize] += 1;
        }
        counts_per_doc.push(tf_counts);
    }

    let idf: Vec<f64> = df.iter().map(|&d| smoothed_idf(num_docs, d)).collect();

    let mut vectors = Vec::with_capacity(counts_per_doc.len());
    for (doc_id, tf_counts) in counts_per_doc.into_iter().enumerate() {
        let mut weights: Vec<(TermId, f64)> = tf_counts
            .into_iter()
            .map(|(tid, tf_raw)| (tid, tf_raw as f64 * idf[tid as usize]))
            .collect();
        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            tracing::debug!(doc_id, "document has no indexable terms");
        } else {
            for (_, w) in weights.iter_mut() { *w /= norm; }
        }
        vectors.push(DocVector { terms: weights });
    }

    let space = VectorSpace {
        vocabulary: Vocabulary { dictionary, terms, df, idf, num_docs },
        vectors,
    };
    tracing::info!(
        num_docs,
        num_terms = space.vocabulary.len(),
        degenerate = space.degenerate_count(),
        "fitted vector space"
    );
    space
}
