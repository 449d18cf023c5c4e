use std::collections::HashMap;

use crate::error::{RecommendError, RecommendResult};

/// Title to row mapping. When a title repeats, its first occurrence is canonical.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    by_title: HashMap<String, usize>,
    titles: Vec<String>,
}

impl TitleIndex {
    pub fn build<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        let mut by_title = HashMap::with_capacity(titles.len());
        let mut shadowed = 0usize;
        for (row, title) in titles.iter().enumerate() {
            if by_title.contains_key(title) {
                shadowed += 1;
                tracing::debug!(row, title = %title, "duplicate title shadowed by earlier row");
            } else {
                by_title.insert(title.clone(), row);
            }
        }
        if shadowed > 0 {
            tracing::warn!(shadowed, "catalog contains duplicate titles; first occurrence wins");
        }
        Self { by_title, titles }
    }

    pub fn len(&self) -> usize { self.titles.len() }
    pub fn is_empty(&self) -> bool { self.titles.is_empty() }

    pub fn resolve(&self, title: &str) -> RecommendResult<usize> {
        self.by_title
            .get(title)
            .copied()
            .ok_or_else(|| RecommendError::NotFound { title: title.to_string() })
    }

    pub fn title_at(&self, row: usize) -> Option<&str> {
        self.titles.get(row).map(String::as_str)
    }
}
