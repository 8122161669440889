use std::{collections::HashMap, time::Instant};

use crate::quark::{Quark, StringTable};

use super::{
    counts::CountTables,
    smoothing::{ScoreUnits, SmoothingPolicy},
};

/// Emission log-probabilities of one tag.
#[derive(Debug, Default, Clone)]
pub struct Emission {
    /// Score of any word never seen under this tag.
    pub unknown: f64,
    words: HashMap<usize, f64>,
}

impl Emission {
    /// Score of vocabulary word `wid`, or the unknown score.
    #[inline]
    pub fn score(&self, wid: Option<usize>) -> f64 {
        wid.and_then(|w| self.words.get(&w))
            .copied()
            .unwrap_or(self.unknown)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parameters of a first-order HMM tagger.
///
/// Built once from a training corpus and never mutated afterwards; taggers
/// borrow it immutably.
#[derive(Debug, Clone)]
pub struct HmmModel {
    tags: Quark,
    vocab: Quark,
    /// Linear-scale initial probability per tag.
    initial: Vec<f64>,
    /// [L][L] log-probabilities, row = previous tag.
    transition: Vec<f64>,
    emission: Vec<Emission>,
    alphas: Vec<f64>,
    units: ScoreUnits,
}

impl HmmModel {
    pub fn estimate<W, T, P>(corpus: &[Vec<(W, T)>], policy: &P) -> Self
    where
        W: AsRef<str>,
        T: AsRef<str>,
        P: SmoothingPolicy + ?Sized,
    {
        let counts = CountTables::from_corpus(corpus);
        Self::from_counts(counts, policy)
    }

    pub fn from_counts<P: SmoothingPolicy + ?Sized>(counts: CountTables, policy: &P) -> Self {
        let begin = Instant::now();
        let L = counts.num_tags();
        let alphas = policy.alphas(&counts);
        debug_assert_eq!(alphas.len(), L);
        for (tag, alpha) in counts.tags.iter().zip(&alphas) {
            log::debug!("smoothing alpha for {tag}: {alpha:e}");
        }

        /* Initial probabilities stay in linear scale. */
        let mut initial = vec![0.0; L];
        if counts.num_sentences > 0 {
            for (p, &c) in initial.iter_mut().zip(&counts.initial) {
                *p = c as f64 / counts.num_sentences as f64;
            }
        }

        /* Transition scores for every ordered pair (prev, tag). */
        let mut transition = vec![0.0; L * L];
        for prev in 0..L {
            let total = counts.bigram_total(prev);
            for tag in 0..L {
                let alpha = alphas[tag];
                transition[L * prev + tag] = if total == 0 {
                    alpha.ln()
                } else {
                    let freq = counts.bigram_count(prev, tag) as f64 / total as f64;
                    (freq * (1.0 - alpha) + alpha).ln()
                };
            }
        }

        /* Emission scores with mass reserved for the unknown word. */
        let emission = counts
            .emission
            .iter()
            .zip(&alphas)
            .map(|(words, &alpha)| {
                let v = words.len() as f64;
                let n = words.values().sum::<usize>() as f64;
                let denom = n + alpha * (v + 1.0);
                Emission {
                    unknown: (alpha / denom).ln(),
                    words: words
                        .iter()
                        .map(|(&wid, &c)| (wid, ((c as f64 + alpha) / denom).ln()))
                        .collect(),
                }
            })
            .collect();

        log::info!(
            "estimated hmm (tags: {}, words: {}, sentences: {}), time cost: {:?}",
            L,
            counts.words.len(),
            counts.num_sentences,
            begin.elapsed()
        );

        Self {
            tags: counts.tags,
            vocab: counts.words,
            initial,
            transition,
            emission,
            alphas,
            units: ScoreUnits::default(),
        }
    }

    /// Switch how linear-scale terms enter the trellis.
    pub fn with_units(mut self, units: ScoreUnits) -> Self {
        self.units = units;
        self
    }

    pub fn units(&self) -> ScoreUnits {
        self.units
    }

    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    pub fn tags(&self) -> &Quark {
        &self.tags
    }

    pub fn vocab(&self) -> &Quark {
        &self.vocab
    }

    pub fn knows_word(&self, word: &str) -> bool {
        self.vocab.to_id(word).is_some()
    }

    pub fn word_id(&self, word: &str) -> Option<usize> {
        self.vocab.to_id(word)
    }

    /// Number of tags `word` was seen with in training.
    pub fn num_tags_of(&self, word: &str) -> usize {
        match self.word_id(word) {
            Some(wid) => self
                .emission
                .iter()
                .filter(|e| e.words.contains_key(&wid))
                .count(),
            None => 0,
        }
    }

    /// Linear initial probability of `tag`; 0 for tags never starting a sentence.
    pub fn initial(&self, tag: &str) -> f64 {
        self.tags
            .to_id(tag)
            .map_or(0.0, |t| self.initial[t])
    }

    pub(crate) fn initial_term(&self, tag: usize) -> f64 {
        self.units.initial_term(self.initial[tag])
    }

    #[inline]
    pub(crate) fn transition_score(&self, prev: usize, tag: usize) -> f64 {
        self.transition[self.num_tags() * prev + tag]
    }

    #[inline]
    pub(crate) fn emission_score(&self, tag: usize, wid: Option<usize>) -> f64 {
        self.emission[tag].score(wid)
    }

    /// Transition log-probability between two known tags.
    pub fn transition(&self, prev: &str, tag: &str) -> Option<f64> {
        let p = self.tags.to_id(prev)?;
        let t = self.tags.to_id(tag)?;
        Some(self.transition_score(p, t))
    }

    /// Transition score as the decoder sees it, falling back to the smoothing
    /// constant of `tag` when the pair is not in the table. Unknown tags have
    /// alpha 0.
    pub fn transition_by_name(&self, prev: &str, tag: &str) -> f64 {
        match self.transition(prev, tag) {
            Some(score) => score,
            None => {
                let alpha = self.tags.to_id(tag).map_or(0.0, |t| self.alphas[t]);
                self.units.transition_fallback(alpha)
            }
        }
    }

    /// Emission log-probability of `word` under `tag`, the unknown score for
    /// unseen words, `None` for an unknown tag.
    pub fn emission(&self, tag: &str, word: &str) -> Option<f64> {
        let t = self.tags.to_id(tag)?;
        Some(self.emission_score(t, self.word_id(word)))
    }

    pub fn unknown_emission(&self, tag: &str) -> Option<f64> {
        let t = self.tags.to_id(tag)?;
        Some(self.emission[t].unknown)
    }

    /// Observed words of `tag` with their emission scores, in no particular order.
    pub fn emissions<'a>(&'a self, tag: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        let words = self
            .tags
            .to_id(tag)
            .map(|t| &self.emission[t].words);
        let vocab = &self.vocab;
        words.into_iter().flat_map(move |words| {
            words
                .iter()
                .filter_map(move |(&wid, &score)| vocab.to_str(wid).map(|w| (w, score)))
        })
    }

    /// Smoothing constant of `tag`.
    pub fn alpha(&self, tag: &str) -> Option<f64> {
        self.tags.to_id(tag).map(|t| self.alphas[t])
    }
}
