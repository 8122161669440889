use super::counts::CountTables;

/// Per-tag counts of hapax words (words seen exactly once in training).
///
/// Hapax words stand in for words never seen at all: a tag that owns many of
/// them is a tag that unseen words are likely to carry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RarityTable {
    counts: Vec<usize>,
    total: usize,
}

impl RarityTable {
    pub fn classify(counts: &CountTables) -> Self {
        let mut table = RarityTable {
            counts: vec![0; counts.num_tags()],
            total: 0,
        };
        for (wid, &total) in counts.word_totals().iter().enumerate() {
            if total != 1 {
                continue;
            }
            if let Some(tag) = first_tag_of(counts, wid) {
                table.counts[tag] += 1;
                table.total += 1;
            }
        }
        log::debug!("hapax words: {} over {} tags", table.total, table.counts.len());
        table
    }

    /// Hapax words charged to `tag`; 0 for tags outside the table.
    pub fn count(&self, tag: usize) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Number of distinct hapax words.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of hapax words charged to `tag`, or `None` without any hapax word.
    pub fn share(&self, tag: usize) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.count(tag) as f64 / self.total as f64)
    }
}

fn first_tag_of(counts: &CountTables, wid: usize) -> Option<usize> {
    counts
        .emission
        .iter()
        .position(|words| words.get(&wid).map_or(false, |&c| c > 0))
}
