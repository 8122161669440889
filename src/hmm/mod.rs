pub mod counts;
pub mod model;
pub mod rarity;
pub mod smoothing;
pub mod tagger;
mod trellis;

use self::{model::HmmModel, smoothing::SmoothingPolicy};

/// Estimate model parameters from tagged sentences.
pub fn estimate<W, T, P>(corpus: &[Vec<(W, T)>], policy: &P) -> HmmModel
where
    W: AsRef<str>,
    T: AsRef<str>,
    P: SmoothingPolicy + ?Sized,
{
    HmmModel::estimate(corpus, policy)
}
