//! # Thresholded Vocabulary Builder

use indexmap::IndexMap;

use crate::errors::PreproResult;
use crate::types::{SentId, TokenType};
use crate::vocab::word_vocab::{UNK_TOKEN, WordVocab};

/// Options for [`VocabBuilder`].
#[derive(Debug, Clone)]
pub struct VocabBuilderOptions {
    /// Words must occur strictly more often than this to be kept.
    pub word_count_threshold: usize,

    /// The marker substituted for dropped words.
    pub unk_token: String,
}

impl Default for VocabBuilderOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl VocabBuilderOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `word_count_threshold` - words with a corpus count `<=` this are dropped.
    pub fn new(word_count_threshold: usize) -> Self {
        Self {
            word_count_threshold,
            unk_token: UNK_TOKEN.to_string(),
        }
    }

    /// Sets the word count threshold.
    pub fn with_word_count_threshold(
        self,
        word_count_threshold: usize,
    ) -> Self {
        Self {
            word_count_threshold,
            ..self
        }
    }

    /// Sets the out-of-vocabulary marker.
    pub fn with_unk_token<S: Into<String>>(
        self,
        unk_token: S,
    ) -> Self {
        Self {
            unk_token: unk_token.into(),
            ..self
        }
    }

    /// Initializes a [`VocabBuilder`] from these options.
    pub fn init(self) -> VocabBuilder {
        VocabBuilder::new(self)
    }
}

/// Corpus statistics gathered while building a vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabStats {
    /// Total token occurrences across all sentences.
    pub total_words: usize,

    /// Number of distinct words in the corpus.
    pub distinct_words: usize,

    /// Number of distinct words kept.
    pub kept_words: usize,

    /// Number of distinct words dropped.
    pub bad_words: usize,

    /// Number of token occurrences replaced by the marker.
    pub unk_count: usize,
}

fn percent(
    part: usize,
    whole: usize,
) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl VocabStats {
    /// Dropped distinct words, as a percentage of distinct words.
    pub fn bad_word_pct(&self) -> f64 {
        percent(self.bad_words, self.distinct_words)
    }

    /// Marker substitutions, as a percentage of all token occurrences.
    pub fn unk_pct(&self) -> f64 {
        percent(self.unk_count, self.total_words)
    }

    /// Log the statistics at info level.
    pub fn log_report(&self) {
        log::info!("total words: {}", self.total_words);
        log::info!("number of good words: {}", self.kept_words);
        log::info!(
            "number of bad words: {}/{} = {:.2}%",
            self.bad_words,
            self.distinct_words,
            self.bad_word_pct()
        );
        log::info!(
            "number of UNKs in sentences: {}/{} = {:.2}%",
            self.unk_count,
            self.total_words,
            self.unk_pct()
        );
    }
}

/// The output of [`VocabBuilder::build`].
#[derive(Debug, Clone)]
pub struct BuiltVocab<T: TokenType> {
    /// The final vocabulary.
    pub vocab: WordVocab<T>,

    /// The rewritten token list of every sentence, in input order.
    pub sentences: IndexMap<SentId, Vec<String>>,

    /// Corpus statistics.
    pub stats: VocabStats,
}

/// Frequency-thresholded vocabulary builder.
///
/// Sentences are accumulated with [`VocabBuilder::update_from_sentences`];
/// [`VocabBuilder::build`] counts words, drops every word occurring
/// `<= word_count_threshold` times, and rewrites dropped tokens as the
/// marker. The marker joins the vocabulary (as its last entry) only when
/// at least one token was rewritten.
#[derive(Debug, Clone)]
pub struct VocabBuilder {
    /// The config options.
    pub options: VocabBuilderOptions,

    sentences: IndexMap<SentId, Vec<String>>,
}

impl VocabBuilder {
    /// Create a new builder.
    pub fn new(options: VocabBuilderOptions) -> Self {
        Self {
            options,
            sentences: IndexMap::new(),
        }
    }

    /// The number of sentences seen.
    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }

    /// Add one sentence; a repeated id replaces the earlier tokens in place.
    pub fn update_from_sentence<I, S>(
        &mut self,
        sent_id: SentId,
        tokens: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect();
        self.sentences.insert(sent_id, tokens);
    }

    /// Add sentences from a ``(sent_id, tokens)`` iterator.
    pub fn update_from_sentences<I, J, S>(
        &mut self,
        sentences: I,
    ) where
        I: IntoIterator<Item = (SentId, J)>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (sent_id, tokens) in sentences {
            self.update_from_sentence(sent_id, tokens);
        }
    }

    /// Count every word, in first-seen order.
    pub fn word_counts(&self) -> IndexMap<&str, usize> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for tokens in self.sentences.values() {
            for word in tokens {
                *counts.entry(word.as_str()).or_default() += 1;
            }
        }
        counts
    }

    /// Build the vocabulary and rewrite the sentences.
    pub fn build<T: TokenType>(self) -> PreproResult<BuiltVocab<T>> {
        let threshold = self.options.word_count_threshold;
        let unk_token = self.options.unk_token.as_str();

        let counts = self.word_counts();

        let mut stats = VocabStats {
            total_words: counts.values().sum(),
            distinct_words: counts.len(),
            ..Default::default()
        };

        let mut vocab_words: Vec<&str> = Vec::with_capacity(counts.len() + 1);
        for (&word, &count) in &counts {
            if count > threshold {
                vocab_words.push(word);
            } else {
                stats.bad_words += 1;
                stats.unk_count += count;
            }
        }
        stats.kept_words = vocab_words.len();

        // A corpus word may already spell the marker.
        if stats.unk_count > 0 && !vocab_words.contains(&unk_token) {
            vocab_words.push(unk_token);
        }
        stats.log_report();

        let vocab: WordVocab<T> = WordVocab::from_words(vocab_words)?;

        let sentences: IndexMap<SentId, Vec<String>> = self
            .sentences
            .iter()
            .map(|(&sent_id, tokens)| {
                let rewritten = tokens
                    .iter()
                    .map(|w| {
                        if counts[w.as_str()] > threshold {
                            w.clone()
                        } else {
                            unk_token.to_string()
                        }
                    })
                    .collect();
                (sent_id, rewritten)
            })
            .collect();

        Ok(BuiltVocab {
            vocab,
            sentences,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(
        threshold: usize,
        sentences: &[&[&str]],
    ) -> BuiltVocab<u32> {
        let mut builder = VocabBuilderOptions::new(threshold).init();
        builder.update_from_sentences(
            sentences
                .iter()
                .enumerate()
                .map(|(idx, tokens)| (idx as SentId, tokens.iter().copied())),
        );
        builder.build().unwrap()
    }

    #[test]
    fn test_zero_threshold_keeps_everything() {
        let built = build(0, &[&["a", "b"], &["a"]]);

        assert_eq!(built.vocab.words(), &["a", "b"]);
        assert!(!built.vocab.has_unk());
        assert_eq!(built.sentences[&0], vec!["a", "b"]);
        assert_eq!(built.sentences[&1], vec!["a"]);
        assert_eq!(
            built.stats,
            VocabStats {
                total_words: 3,
                distinct_words: 2,
                kept_words: 2,
                bad_words: 0,
                unk_count: 0,
            }
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        let built = build(1, &[&["a", "a", "b"]]);

        assert_eq!(built.vocab.words(), &["a", UNK_TOKEN]);
        assert_eq!(built.sentences[&0], vec!["a", "a", UNK_TOKEN]);
        assert_eq!(built.stats.unk_count, 1);
        assert_eq!(built.stats.bad_words, 1);
        assert!((built.stats.unk_pct() - 100.0 / 3.0).abs() < 1e-9);
        assert!((built.stats.bad_word_pct() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_seen_order() {
        let built = build(1, &[&["man", "the", "left"], &["the", "man", "right"]]);

        assert_eq!(built.vocab.words(), &["man", "the", UNK_TOKEN]);
        assert_eq!(built.sentences[&0], vec!["man", "the", UNK_TOKEN]);
        assert_eq!(built.sentences[&1], vec!["the", "man", UNK_TOKEN]);
        assert_eq!(built.stats.bad_words, 2);
        assert_eq!(built.stats.unk_count, 2);
    }

    #[test]
    fn test_sentence_order_preserved() {
        let mut builder = VocabBuilderOptions::new(0).init();
        builder.update_from_sentence(42, ["x"]);
        builder.update_from_sentence(7, ["y"]);
        builder.update_from_sentence(19, ["z"]);

        let built: BuiltVocab<u32> = builder.build().unwrap();
        assert_eq!(built.sentences.keys().copied().collect::<Vec<_>>(), vec![42, 7, 19]);
    }

    #[test]
    fn test_custom_unk_token() {
        let mut builder = VocabBuilderOptions::default()
            .with_word_count_threshold(1)
            .with_unk_token("<unk>")
            .init();
        builder.update_from_sentence(0, ["a", "b", "b"]);

        let built: BuiltVocab<u32> = builder.build().unwrap();
        assert_eq!(built.vocab.words(), &["b", "<unk>"]);
        assert_eq!(built.sentences[&0], vec!["<unk>", "b", "b"]);
    }

    #[test]
    fn test_empty_corpus() {
        let built = build(3, &[]);

        assert!(built.vocab.is_empty());
        assert!(built.sentences.is_empty());
        assert_eq!(built.stats.unk_pct(), 0.0);
        assert_eq!(built.stats.bad_word_pct(), 0.0);
    }

    proptest::proptest! {
        #[test]
        fn rewrite_matches_counts(
            sentences in proptest::collection::vec(
                proptest::collection::vec("[a-e]{1,2}", 0..8),
                0..12,
            ),
            threshold in 0usize..4,
        ) {
            let mut builder = VocabBuilderOptions::new(threshold).init();
            builder.update_from_sentences(
                sentences.iter().enumerate().map(|(idx, s)| (idx as SentId, s.iter().cloned())),
            );
            let counts: IndexMap<String, usize> = builder
                .word_counts()
                .into_iter()
                .map(|(w, c)| (w.to_string(), c))
                .collect();

            let built: BuiltVocab<u32> = builder.build().unwrap();

            let mut substituted = false;
            for (idx, raw) in sentences.iter().enumerate() {
                let rewritten = &built.sentences[&(idx as SentId)];
                proptest::prop_assert_eq!(raw.len(), rewritten.len());
                for (w, r) in raw.iter().zip(rewritten) {
                    if counts[w] > threshold {
                        proptest::prop_assert_eq!(w, r);
                    } else {
                        proptest::prop_assert_eq!(r.as_str(), UNK_TOKEN);
                        substituted = true;
                    }
                    proptest::prop_assert!(built.vocab.word_index(r).is_some());
                }
            }
            proptest::prop_assert_eq!(built.vocab.has_unk(), substituted);
        }
    }
}
