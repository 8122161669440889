use crate::{
    quark::StringTable,
    Error, Result, TaggedSentence,
};

use super::{model::HmmModel, trellis::Trellis};

pub trait Tagger {
    /// Tag one sentence, returning `(word, tag)` pairs in input order.
    fn tag<S: AsRef<str>>(&mut self, words: &[S]) -> Result<TaggedSentence>;

    /// Run Viterbi over `words`, writing tag ids into `labels`.
    /// Returns the score of the best path.
    fn viterbi<S: AsRef<str>>(&mut self, words: &[S], labels: &mut Vec<usize>) -> Result<f64>;
}

/// Viterbi tagger over a borrowed model; keeps its lattice between calls.
pub struct HmmTagger<'a> {
    model: &'a HmmModel,
    trellis: Trellis,
    wids: Vec<Option<usize>>,
}

impl<'a> HmmTagger<'a> {
    pub fn new(model: &'a HmmModel) -> Self {
        Self {
            model,
            trellis: Trellis::new(model.num_tags(), 0),
            wids: Vec::new(),
        }
    }

    pub fn model(&self) -> &'a HmmModel {
        self.model
    }
}

impl<'a> Tagger for HmmTagger<'a> {
    fn tag<S: AsRef<str>>(&mut self, words: &[S]) -> Result<TaggedSentence> {
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let mut labels = Vec::new();
        self.viterbi(words, &mut labels)?;
        let tags = self.model.tags();
        words
            .iter()
            .zip(labels)
            .map(|(word, l)| -> Result<(String, String)> {
                let tag = tags.to_str(l).ok_or(Error::EmptyModel)?;
                Ok((word.as_ref().to_string(), tag.to_string()))
            })
            .collect()
    }

    fn viterbi<S: AsRef<str>>(&mut self, words: &[S], labels: &mut Vec<usize>) -> Result<f64> {
        labels.clear();
        if words.is_empty() {
            return Ok(0.0);
        }
        if self.model.num_tags() == 0 {
            return Err(Error::EmptyModel);
        }
        let model = self.model;
        self.wids.clear();
        self.wids
            .extend(words.iter().map(|w| model.word_id(w.as_ref())));
        self.trellis.forward(self.model, &self.wids);
        labels.resize(self.trellis.num_items(), 0);
        Ok(self.trellis.backtrack(labels))
    }
}

/// Tag every sentence of `corpus` with `model`.
///
/// Empty sentences come back empty; any other sentence fails with
/// [`Error::EmptyModel`] when the model knows no tags.
pub fn decode<S: AsRef<str>>(model: &HmmModel, corpus: &[Vec<S>]) -> Result<Vec<TaggedSentence>> {
    let mut tagger = HmmTagger::new(model);
    corpus
        .iter()
        .map(|sentence| tagger.tag(sentence.as_slice()))
        .collect()
}
