pub mod analyzer;
pub mod normalize;
pub mod sparse;
pub mod tfidf;

pub use analyzer::{Analyzer, AnalyzerConfig};
pub use normalize::{normalize_value, ValueNormalizer, DIGIT_MARKER, EMPTY_TOKEN};
pub use sparse::SparseVector;
pub use tfidf::{TfidfConfig, TfidfModel, TfidfVectorizer};
