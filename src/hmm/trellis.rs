use super::model::HmmModel;

/// Viterbi lattice for one sentence, reused between sentences.
#[derive(Debug, Default)]
pub(crate) struct Trellis {
    /**
     * The total number of distinct tags (L).
     */
    pub num_tags: usize,

    /**
     * The number of words (T) in the current sentence.
     */
    num_items: usize,

    /**
     * The number of words the tables can hold.
     */
    cap_items: usize,

    /**
     * Best path scores.
     *  This is a [T][L] matrix whose element [t][l] presents the best
     *  log score of any tag path ending at word #t with tag #l.
     */
    score: Vec<f64>,

    /**
     * Backward edges.
     *  This is a [T][L] matrix whose element [t][j] represents the tag #i
     *  at #t-1 that yields the best score to arrive at (t, j). Row 0 is unused.
     */
    backward_edge: Vec<usize>,
}

impl Trellis {
    pub fn new(L: usize, T: usize) -> Self {
        let mut this = Self {
            num_tags: L,
            ..Default::default()
        };
        this.set_num_items(T);
        this.num_items = 0;
        this
    }

    pub fn set_num_items(&mut self, T: usize) {
        let L = self.num_tags;
        self.num_items = T;
        if self.cap_items < T {
            self.score.resize(T * L, 0.0);
            self.backward_edge.resize(T * L, 0);
            self.cap_items = T;
        }
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    #[inline]
    pub fn score(&self, t: usize, l: usize) -> f64 {
        self.score[self.num_tags * t + l]
    }

    #[inline]
    pub fn backward_edge(&self, t: usize, l: usize) -> usize {
        self.backward_edge[self.num_tags * t + l]
    }

    /// Fill the lattice for the words `wids` (vocabulary ids, `None` when unseen).
    ///
    /// Among predecessors with equal scores the one coming last in tag order
    /// is kept.
    pub fn forward(&mut self, model: &HmmModel, wids: &[Option<usize>]) {
        let T = wids.len();
        let L = self.num_tags;
        debug_assert_eq!(L, model.num_tags());
        self.set_num_items(T);
        if T == 0 {
            return;
        }

        /* Compute the scores at (0, *). */
        for j in 0..L {
            self.score[L * 0 + j] = model.initial_term(j) + model.emission_score(j, wids[0]);
        }

        /* Compute the scores at (t, *). */
        for t in 1..T {
            for j in 0..L {
                let emit = model.emission_score(j, wids[t]);
                let mut max_score = f64::NEG_INFINITY;
                let mut argmax_score = 0;
                for i in 0..L {
                    /* Transit from (t-1, i) to (t, j). */
                    let score = self.score[L * (t - 1) + i] + model.transition_score(i, j) + emit;
                    if score >= max_score {
                        max_score = score;
                        argmax_score = i;
                    }
                }
                /* Backward link (#t, #j) -> (#t-1, #i). */
                self.backward_edge[L * t + j] = argmax_score;
                self.score[L * t + j] = max_score;
            }
        }
    }

    /// Trace the backward links from the best final tag into `labels`.
    /// Returns the score of the best path.
    pub fn backtrack(&self, labels: &mut [usize]) -> f64 {
        let T = self.num_items;
        let L = self.num_tags;
        debug_assert!(labels.len() >= T);
        if T == 0 || L == 0 {
            return f64::NEG_INFINITY;
        }

        /* Find the node (#T-1, #i) with the maximum score, last one on ties. */
        let mut max_score = f64::NEG_INFINITY;
        labels[T - 1] = 0;
        for i in 0..L {
            let s = self.score(T - 1, i);
            if s >= max_score {
                max_score = s;
                labels[T - 1] = i;
            }
        }
        /* Tag words by tracing the backward links. */
        for t in (0..T - 1).rev() {
            let i = labels[t + 1];
            labels[t] = self.backward_edge(t + 1, i);
        }
        max_score
    }
}
