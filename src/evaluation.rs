use std::{collections::BTreeMap, fmt::Display, iter::zip};

use crate::{hmm::model::HmmModel, TaggedWord};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Measure {
    pub n_match: usize,
    pub n_total: usize,
}

impl Measure {
    #[inline]
    pub fn accuracy(&self) -> f64 {
        if self.n_total == 0 {
            return 0.0;
        }
        self.n_match as f64 / self.n_total as f64
    }

    fn add(&mut self, matched: bool) {
        self.n_total += 1;
        if matched {
            self.n_match += 1;
        }
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} => {:.4}", self.n_match, self.n_total, self.accuracy())
    }
}

/// Tag-wise performance values.
#[derive(Debug, Default, Clone)]
struct LabelMeasure {
    /// Number of correct predictions.
    num_correct: usize,
    /** Number of occurrences of the tag in the gold-standard data. */
    num_observation: usize,
    /** Number of predictions. */
    num_prediction: usize,
    precision: f64,
    recall: f64,
    fmeasure: f64,
}

/// Overall performance of a tagger against gold-standard sentences.
#[derive(Debug, Default)]
pub struct Evaluation {
    /** Number of tags for macro averages; 0 means every tag seen so far. */
    pub num_labels: usize,
    tbl: BTreeMap<String, LabelMeasure>,

    /** Word-level accuracy. */
    items: Measure,
    /** Sentence-level accuracy. */
    instances: Measure,
    /** Accuracy on words never seen in training. */
    unseen: Measure,
    /** Accuracy on words seen in training with more than one tag. */
    ambiguous: Measure,

    macro_precision: f64,
    macro_recall: f64,
    macro_fmeasure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimation {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
    pub accuracy: f64,
}

impl Evaluation {
    pub fn accumulate(&mut self, reference: &[TaggedWord], prediction: &[TaggedWord]) {
        self.accumulate_inner(reference, prediction, None)
    }

    /// Like [`Evaluation::accumulate`], also tracking unseen and ambiguous
    /// words of `model`'s training data.
    pub fn accumulate_with(&mut self, reference: &[TaggedWord], prediction: &[TaggedWord], model: &HmmModel) {
        self.accumulate_inner(reference, prediction, Some(model))
    }

    fn accumulate_inner(&mut self, reference: &[TaggedWord], prediction: &[TaggedWord], model: Option<&HmmModel>) {
        if reference.len() != prediction.len() {
            log::warn!(
                "length mismatch: {} reference words, {} predicted",
                reference.len(),
                prediction.len()
            );
        }
        let mut matched = 0;
        for ((word, r), (_, p)) in zip(reference, prediction) {
            let ok = r == p;
            self.tbl.entry(r.clone()).or_default().num_observation += 1;
            self.tbl.entry(p.clone()).or_default().num_prediction += 1;
            if ok {
                self.tbl.entry(r.clone()).or_default().num_correct += 1;
                matched += 1;
            }
            self.items.add(ok);
            if let Some(model) = model {
                match model.num_tags_of(word) {
                    0 => self.unseen.add(ok),
                    1 => {}
                    _ => self.ambiguous.add(ok),
                }
            }
        }
        self.instances
            .add(matched == reference.len() && matched == prediction.len());
    }

    pub fn evaluate(&mut self) -> Estimation {
        self.macro_precision = 0.0;
        self.macro_recall = 0.0;
        self.macro_fmeasure = 0.0;
        let mut observed = 0;
        for lev in self.tbl.values_mut() {
            if lev.num_observation == 0 {
                continue;
            }
            observed += 1;

            lev.precision = 0.0;
            lev.recall = 0.0;
            lev.fmeasure = 0.0;

            if lev.num_prediction > 0 {
                lev.precision = lev.num_correct as f64 / lev.num_prediction as f64;
            }
            lev.recall = lev.num_correct as f64 / lev.num_observation as f64;
            if lev.precision + lev.recall > 0.0 {
                lev.fmeasure = lev.precision * lev.recall * 2.0 / (lev.precision + lev.recall);
            }
            self.macro_precision += lev.precision;
            self.macro_recall += lev.recall;
            self.macro_fmeasure += lev.fmeasure;
        }

        let n = if self.num_labels > 0 { self.num_labels } else { observed };
        if n > 0 {
            self.macro_precision /= n as f64;
            self.macro_recall /= n as f64;
            self.macro_fmeasure /= n as f64;
        }
        Estimation {
            precision: self.macro_precision,
            recall: self.macro_recall,
            fmeasure: self.macro_fmeasure,
            accuracy: self.items.accuracy(),
        }
    }

    pub fn items(&self) -> Measure {
        self.items
    }

    pub fn instances(&self) -> Measure {
        self.instances
    }

    pub fn unseen(&self) -> Measure {
        self.unseen
    }

    pub fn ambiguous(&self) -> Measure {
        self.ambiguous
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance by tag (#match, #model, #ref) (precision, recall, F1):")?;
        for (label, lev) in &self.tbl {
            if lev.num_observation == 0 {
                writeln!(f, "\t{}: ({}, {}, {}) (******, ******, ******)", label, lev.num_correct, lev.num_prediction, lev.num_observation)?;
            } else {
                writeln!(f, "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})", label, lev.num_correct, lev.num_prediction, lev.num_observation,
                    lev.precision, lev.recall, lev.fmeasure
                )?;
            }
        }
        writeln!(f, "Macro-average precision, recall, F1: ({:.4}, {:.4}, {:.4})", self.macro_precision, self.macro_recall, self.macro_fmeasure)?;
        writeln!(f, "Word accuracy: {}", self.items)?;
        writeln!(f, "Sentence accuracy: {}", self.instances)?;
        writeln!(f, "Unseen word accuracy: {}", self.unseen)?;
        write!(f, "Ambiguous word accuracy: {}", self.ambiguous)
    }
}
