//! Part-of-speech tagging with a first-order hidden Markov model.
//!
//! Parameters are estimated from tagged sentences with Laplace-style
//! smoothing, either with one constant for every tag or with a constant
//! weighted by how many singleton words each tag owns. Sentences are decoded
//! with the Viterbi algorithm.
//!
//! ```
//! use hmmtagger::{decode, estimate, Smoothing};
//!
//! let train = vec![vec![("the", "DET"), ("dog", "NOUN"), ("runs", "VERB")]];
//! let model = estimate(&train, &Smoothing::constant());
//! let tagged = decode(&model, &[vec!["the", "dog", "runs"]]).unwrap();
//! assert_eq!(tagged[0][1], ("dog".to_string(), "NOUN".to_string()));
//! ```

pub mod config;
pub mod dataset;
pub mod evaluation;
pub mod hmm;
pub mod quark;

pub use crate::config::TaggerConfig;
pub use crate::dataset::Corpus;
pub use crate::evaluation::Evaluation;
pub use crate::hmm::{
    estimate,
    model::HmmModel,
    smoothing::{ConstantSmoothing, RaritySmoothing, ScoreUnits, Smoothing, SmoothingPolicy},
    tagger::{decode, HmmTagger, Tagger},
};

pub type TaggedWord = (String, String);
pub type TaggedSentence = Vec<TaggedWord>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model has no tags, train it on at least one tagged word")]
    EmptyModel,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("smoothing constant must lie strictly between 0 and 1, got {0}")]
    InvalidSmoothing(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
