use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("title '{title}' not found in the catalog")]
    NotFound { title: String },
    #[error("row {row} out of range for a catalog of {len} items")]
    RowOutOfRange { row: usize, len: usize },
}

pub type RecommendResult<T> = std::result::Result<T, RecommendError>;
