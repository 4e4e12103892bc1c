//! # Sentence Length Distribution
//!
//! A diagnostic histogram of sentence lengths, used to pick a label width.

use std::collections::BTreeMap;

/// One row of the cumulative length distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthRow {
    /// Sentence length, in tokens.
    pub length: usize,

    /// Number of sentences of exactly this length.
    pub count: usize,

    /// `count` as a percentage of all sentences.
    pub pct: f64,

    /// Percentage of sentences of this length or shorter.
    pub cumulative_pct: f64,
}

/// Histogram of ``{ length -> sentence count }``.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceLengthHistogram {
    counts: BTreeMap<usize, usize>,
    total: usize,
}

impl SentenceLengthHistogram {
    /// Build a histogram from token lists.
    pub fn from_token_lists<'a, I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = &'a [S]>,
        S: 'a,
    {
        let mut hist = Self::default();
        for tokens in sentences {
            hist.add(tokens.len());
        }
        hist
    }

    /// Record one sentence of `length` tokens.
    pub fn add(
        &mut self,
        length: usize,
    ) {
        *self.counts.entry(length).or_default() += 1;
        self.total += 1;
    }

    /// The number of sentences recorded.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The longest sentence length, or `None` if empty.
    pub fn max_length(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }

    /// The number of sentences of exactly `length` tokens.
    pub fn count(
        &self,
        length: usize,
    ) -> usize {
        self.counts.get(&length).copied().unwrap_or(0)
    }

    /// The cumulative distribution, for every length from 0 to the max.
    pub fn distribution(&self) -> Vec<LengthRow> {
        let Some(max_len) = self.max_length() else {
            return Vec::new();
        };

        let total = self.total as f64;
        let mut acc = 0;
        (0..=max_len)
            .map(|length| {
                let count = self.count(length);
                acc += count;
                LengthRow {
                    length,
                    count,
                    pct: count as f64 * 100.0 / total,
                    cumulative_pct: acc as f64 * 100.0 / total,
                }
            })
            .collect()
    }

    /// Log the distribution at info level.
    pub fn log_report(&self) {
        let Some(max_len) = self.max_length() else {
            log::info!("no sentences; skipping sentence length distribution");
            return;
        };

        log::info!("max length of sentence in raw data is {max_len}");
        log::info!("sentence length distribution (count, number of words):");
        for row in self.distribution() {
            log::info!(
                "{:2}: {:10} {:.3}% {:.3}%",
                row.length,
                row.count,
                row.pct,
                row.cumulative_pct
            );
        }
    }
}
