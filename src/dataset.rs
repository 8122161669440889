use std::{
    convert::TryFrom,
    fs::File,
    io::{BufRead, BufReader, Write},
};

use crate::{Error, TaggedSentence};

/// Tagged sentences read from a corpus file.
///
/// One token per line as `TAG<TAB>word`, sentences separated by blank lines.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Corpus {
    sentences: Vec<TaggedSentence>,
}

impl Corpus {
    pub fn read<R: BufRead>(reader: R) -> Result<Self, std::io::Error> {
        let mut corpus = Corpus::default();
        let mut sentence = TaggedSentence::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                if let Some((tag, word)) = line.split_once('\t') {
                    let word = word.split('\t').next().unwrap_or_default();
                    if tag.is_empty() || word.is_empty() {
                        log::warn!("invalid line: {line}");
                        continue;
                    }
                    sentence.push((word.to_string(), tag.to_string()));
                } else {
                    log::warn!("invalid line: {line}");
                }
            } else if !sentence.is_empty() {
                corpus.sentences.push(sentence);
                sentence = TaggedSentence::new();
            }
        }
        if !sentence.is_empty() {
            corpus.sentences.push(sentence);
        }
        log::info!(
            "read {} sentences ({} words)",
            corpus.len(),
            corpus.total_words()
        );
        Ok(corpus)
    }

    /// Write `sentences` in the corpus format.
    pub fn write<W: Write>(mut writer: W, sentences: &[TaggedSentence]) -> Result<(), std::io::Error> {
        for sentence in sentences {
            for (word, tag) in sentence {
                writeln!(writer, "{tag}\t{word}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }

    pub fn sentences(&self) -> &[TaggedSentence] {
        &self.sentences
    }

    /// Sentences with the tags stripped.
    pub fn words(&self) -> Vec<Vec<String>> {
        self.sentences
            .iter()
            .map(|s| s.iter().map(|(w, _)| w.clone()).collect())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.sentences.iter().map(|x| x.len()).max().unwrap_or_default()
    }

    pub fn total_words(&self) -> usize {
        self.sentences.iter().map(|x| x.len()).sum()
    }
}

impl TryFrom<File> for Corpus {
    type Error = Error;

    fn try_from(value: File) -> Result<Self, Self::Error> {
        Ok(Corpus::read(BufReader::new(value))?)
    }
}

impl From<Vec<TaggedSentence>> for Corpus {
    fn from(sentences: Vec<TaggedSentence>) -> Self {
        Self { sentences }
    }
}
