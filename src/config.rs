use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    hmm::{model::HmmModel, smoothing::{ScoreUnits, Smoothing}},
    Result,
};

/// Training and decoding options, readable from JSON.
///
/// ```json
/// { "smoothing": { "kind": "rarity", "base": 1e-5 }, "units": "mixed" }
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    pub smoothing: Smoothing,
    pub units: ScoreUnits,
}

impl TaggerConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.smoothing.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(f))?;
        config.smoothing.validate()?;
        log::info!("loaded config: {:?}", config);
        Ok(config)
    }

    /// Estimate a model from `corpus` with these options.
    pub fn estimate<W, T>(&self, corpus: &[Vec<(W, T)>]) -> HmmModel
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        HmmModel::estimate(corpus, &self.smoothing).with_units(self.units)
    }
}
