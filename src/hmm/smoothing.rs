//! Smoothing strategies for the transition and emission tables.
//!
//! A strategy only decides the smoothing constant alpha for each tag; the
//! estimator applies the same interpolation formulas whatever the strategy.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::{counts::CountTables, rarity::RarityTable};

/// Alpha shared by every tag under [`ConstantSmoothing`].
pub const DEFAULT_CONSTANT_ALPHA: f64 = 1e-6;

/// Base alpha scaled by the hapax share under [`RaritySmoothing`].
pub const DEFAULT_RARITY_BASE: f64 = 1e-5;

pub trait SmoothingPolicy {
    /// Smoothing constant for every tag id of `counts`.
    fn alphas(&self, counts: &CountTables) -> Vec<f64>;
}

/// Same alpha for every tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSmoothing {
    pub alpha: f64,
}

impl Default for ConstantSmoothing {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_CONSTANT_ALPHA,
        }
    }
}

impl SmoothingPolicy for ConstantSmoothing {
    fn alphas(&self, counts: &CountTables) -> Vec<f64> {
        vec![self.alpha; counts.num_tags()]
    }
}

/// Alpha proportional to the share of hapax words seen under each tag.
///
/// Open classes that collect many singletons get more mass for unseen words
/// than closed classes. A tag without any hapax word gets alpha 0. When the
/// corpus has no hapax word at all, every tag falls back to `base`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaritySmoothing {
    pub base: f64,
}

impl Default for RaritySmoothing {
    fn default() -> Self {
        Self {
            base: DEFAULT_RARITY_BASE,
        }
    }
}

impl RaritySmoothing {
    pub fn alphas_from(&self, rarity: &RarityTable, num_tags: usize) -> Vec<f64> {
        (0..num_tags)
            .map(|tag| match rarity.share(tag) {
                Some(share) => self.base * share,
                None => self.base,
            })
            .collect()
    }
}

impl SmoothingPolicy for RaritySmoothing {
    fn alphas(&self, counts: &CountTables) -> Vec<f64> {
        let rarity = RarityTable::classify(counts);
        if rarity.total() == 0 && counts.num_tags() > 0 {
            log::warn!("no hapax words in training data, using alpha {} for every tag", self.base);
        }
        self.alphas_from(&rarity, counts.num_tags())
    }
}

/// Serializable choice between the two strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Smoothing {
    Constant {
        #[serde(default = "default_constant_alpha")]
        alpha: f64,
    },
    Rarity {
        #[serde(default = "default_rarity_base")]
        base: f64,
    },
}

fn default_constant_alpha() -> f64 {
    DEFAULT_CONSTANT_ALPHA
}

fn default_rarity_base() -> f64 {
    DEFAULT_RARITY_BASE
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::Rarity {
            base: DEFAULT_RARITY_BASE,
        }
    }
}

impl Smoothing {
    /// Reject constants outside the open interval (0, 1), NaN included.
    pub fn validate(&self) -> Result<()> {
        let value = match *self {
            Smoothing::Constant { alpha } => alpha,
            Smoothing::Rarity { base } => base,
        };
        if value > 0.0 && value < 1.0 {
            Ok(())
        } else {
            Err(Error::InvalidSmoothing(value))
        }
    }

    pub fn constant() -> Self {
        Smoothing::Constant {
            alpha: DEFAULT_CONSTANT_ALPHA,
        }
    }

    pub fn rarity() -> Self {
        Smoothing::Rarity {
            base: DEFAULT_RARITY_BASE,
        }
    }
}

impl SmoothingPolicy for Smoothing {
    fn alphas(&self, counts: &CountTables) -> Vec<f64> {
        match *self {
            Smoothing::Constant { alpha } => ConstantSmoothing { alpha }.alphas(counts),
            Smoothing::Rarity { base } => RaritySmoothing { base }.alphas(counts),
        }
    }
}

/// How the linear-scale pieces of the model enter the log-scale trellis.
///
/// The initial table holds plain probabilities and the by-name transition
/// fallback is a raw alpha. `Mixed` adds both to log scores unchanged, which
/// is how the tagger has always scored; `Log` takes their logarithm first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreUnits {
    Mixed,
    Log,
}

impl Default for ScoreUnits {
    fn default() -> Self {
        ScoreUnits::Mixed
    }
}

impl ScoreUnits {
    /// Term added for the initial probability `p` at position 0.
    #[inline]
    pub fn initial_term(self, p: f64) -> f64 {
        match self {
            ScoreUnits::Mixed => p,
            ScoreUnits::Log => p.ln(),
        }
    }

    /// Transition score used when a pair is missing from the table.
    #[inline]
    pub fn transition_fallback(self, alpha: f64) -> f64 {
        match self {
            ScoreUnits::Mixed => alpha,
            ScoreUnits::Log => alpha.ln(),
        }
    }
}
