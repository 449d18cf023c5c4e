pub mod catalog;
pub mod config;
pub mod error;
pub mod features;
pub mod index;
pub mod recommend;
pub mod rules;
pub mod similarity;
pub mod titles;
pub mod tokenizer;
pub mod vectorizer;

pub use catalog::{load_catalog, Item};
pub use config::{Backend, EngineConfig};
pub use error::{RecommendError, RecommendResult};
pub use index::{DocId, DocVector, InvertedIndex, Posting, TermId, Vocabulary};
pub use recommend::{Recommendation, Recommender, SimilarityModel};
pub use similarity::{compute_similarity, SimilarityMatrix};
pub use titles::TitleIndex;
pub use vectorizer::{fit, VectorSpace};
