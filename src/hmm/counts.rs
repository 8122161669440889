use std::collections::HashMap;

use crate::quark::{Quark, StringTable, TextVectorizer};

/// Raw frequencies gathered in one pass over the training corpus.
///
/// Every per-tag vector is indexed by the tag id handed out by `tags`, so the
/// tag universe is exactly the set of tags with a unigram count.
#[derive(Debug, Default, Clone)]
pub struct CountTables {
    /// Tags in first-seen order.
    pub tags: Quark,
    /// Training vocabulary in first-seen order.
    pub words: Quark,
    /// Occurrences of each tag.
    pub unigram: Vec<usize>,
    /// Number of sentences starting with each tag.
    pub initial: Vec<usize>,
    /// tag -> word -> count.
    pub emission: Vec<HashMap<usize, usize>>,
    /// preceding tag -> next tag -> count.
    pub bigram: Vec<HashMap<usize, usize>>,
    /// Number of training sentences, empty ones included.
    pub num_sentences: usize,
}

impl CountTables {
    pub fn from_corpus<W, T>(corpus: &[Vec<(W, T)>]) -> Self
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let mut counts = CountTables::default();
        for sentence in corpus {
            counts.add_sentence(sentence);
        }
        counts
    }

    pub fn add_sentence<W, T>(&mut self, sentence: &[(W, T)])
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        self.num_sentences += 1;
        let mut prev: Option<usize> = None;
        for (i, (word, tag)) in sentence.iter().enumerate() {
            let tid = self.tag_id(tag.as_ref());
            let wid = self.words.find_or_insert(word.as_ref());

            self.unigram[tid] += 1;
            if i == 0 {
                self.initial[tid] += 1;
            }
            *self.emission[tid].entry(wid).or_insert(0) += 1;
            if let Some(p) = prev {
                *self.bigram[p].entry(tid).or_insert(0) += 1;
            }
            prev = Some(tid);
        }
    }

    fn tag_id(&mut self, tag: &str) -> usize {
        let tid = self.tags.find_or_insert(tag);
        if tid == self.unigram.len() {
            self.unigram.push(0);
            self.initial.push(0);
            self.emission.push(HashMap::new());
            self.bigram.push(HashMap::new());
        }
        tid
    }

    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    /// Total count of successors recorded after `prev`.
    pub fn bigram_total(&self, prev: usize) -> usize {
        self.bigram[prev].values().sum()
    }

    pub fn bigram_count(&self, prev: usize, next: usize) -> usize {
        self.bigram[prev].get(&next).copied().unwrap_or(0)
    }

    /// Token count observed under `tag`.
    pub fn tag_tokens(&self, tag: usize) -> usize {
        self.emission[tag].values().sum()
    }

    /// Global occurrence count of every vocabulary word, summed over tags.
    pub fn word_totals(&self) -> Vec<usize> {
        let mut totals = vec![0; self.words.len()];
        for words in &self.emission {
            for (&wid, &c) in words {
                totals[wid] += c;
            }
        }
        totals
    }
}
