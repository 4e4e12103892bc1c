//! # Padded Label Encoder
//!
//! Encodes every sentence twice into `(num_sentences, max_length)` matrices:
//!
//! * `seqz` - zero-padded at the end, for language model learning;
//! * `zseq` - zero-padded at the beginning, for embedding model learning.
//!
//! Row `r` holds the sentence whose `h5_id` is `r`. Tokens past `max_length`
//! are dropped from both; the kept prefix is left-aligned in `seqz` and
//! right-aligned in `zseq`.

use ndarray::{Array2, ArrayView1};

use crate::encoding::MaxLengthTable;
use crate::errors::{PreproError, PreproResult};
use crate::records::SentenceRecord;
use crate::types::TokenType;
use crate::vocab::WordVocab;

/// Options for [`LabelEncoder`].
#[derive(Debug, Clone, Default)]
pub struct LabelEncoderOptions {
    /// Explicit max length; overrides the table.
    pub max_length: Option<usize>,

    /// Per-dataset default max lengths.
    pub max_length_table: MaxLengthTable,
}

impl LabelEncoderOptions {
    /// Sets the explicit max length.
    pub fn with_max_length(
        self,
        max_length: Option<usize>,
    ) -> Self {
        Self { max_length, ..self }
    }

    /// Sets the per-dataset default table.
    pub fn with_max_length_table(
        self,
        max_length_table: MaxLengthTable,
    ) -> Self {
        Self {
            max_length_table,
            ..self
        }
    }

    /// Initializes a [`LabelEncoder`] for a dataset.
    pub fn init(
        &self,
        dataset: &str,
    ) -> PreproResult<LabelEncoder> {
        LabelEncoder::new(self.max_length_table.resolve(dataset, self.max_length)?)
    }
}

/// Which of the two label layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLayout {
    /// Left-aligned, zero tail.
    Seqz,

    /// Right-aligned, zero head.
    Zseq,
}

/// Counts of tokens lost to the max length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TruncationStats {
    /// Sentences longer than the max length.
    pub truncated_sentences: usize,

    /// Tokens dropped across all sentences.
    pub dropped_tokens: usize,
}

/// The encoded label matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedLabels<T: TokenType> {
    /// Forward-padded labels.
    pub seqz: Array2<T>,

    /// Reverse-padded labels.
    pub zseq: Array2<T>,

    /// Truncation counts from encoding.
    pub truncation: TruncationStats,
}

impl<T: TokenType> EncodedLabels<T> {
    /// Wrap a pair of matrices; they must have the same shape.
    pub fn from_arrays(
        seqz: Array2<T>,
        zseq: Array2<T>,
    ) -> PreproResult<Self> {
        if seqz.dim() != zseq.dim() {
            return Err(PreproError::Shape(format!(
                "seqz {:?} and zseq {:?} shapes differ",
                seqz.dim(),
                zseq.dim()
            )));
        }
        Ok(Self {
            seqz,
            zseq,
            truncation: TruncationStats::default(),
        })
    }

    /// The number of rows (sentences).
    pub fn num_rows(&self) -> usize {
        self.seqz.nrows()
    }

    /// The row width.
    pub fn max_length(&self) -> usize {
        self.seqz.ncols()
    }

    /// The matrix for a layout.
    pub fn labels(
        &self,
        layout: LabelLayout,
    ) -> &Array2<T> {
        match layout {
            LabelLayout::Seqz => &self.seqz,
            LabelLayout::Zseq => &self.zseq,
        }
    }

    /// View one row of a layout.
    pub fn row(
        &self,
        layout: LabelLayout,
        h5_id: usize,
    ) -> PreproResult<ArrayView1<'_, T>> {
        let labels = self.labels(layout);
        if h5_id >= labels.nrows() {
            return Err(PreproError::RowOutOfRange {
                h5_id,
                rows: labels.nrows(),
            });
        }
        Ok(labels.row(h5_id))
    }

    /// Decode one row back to words, skipping padding.
    pub fn decode_row<'v>(
        &self,
        layout: LabelLayout,
        h5_id: usize,
        vocab: &'v WordVocab<T>,
    ) -> PreproResult<Vec<&'v str>> {
        self.row(layout, h5_id)?
            .iter()
            .filter(|ix| !ix.is_zero())
            .map(|&ix| {
                vocab.word(ix).ok_or_else(|| {
                    PreproError::VocabConflict(format!("label index {ix} not in vocabulary"))
                })
            })
            .collect()
    }
}

/// Encodes sentence records into padded label matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelEncoder {
    max_length: usize,
}

impl LabelEncoder {
    /// Create an encoder with a fixed max length.
    pub fn new(max_length: usize) -> PreproResult<Self> {
        if max_length == 0 {
            return Err(PreproError::InvalidMaxLength);
        }
        Ok(Self { max_length })
    }

    /// The row width.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Encode sentences.
    ///
    /// ## Arguments
    /// * `sentences` - records whose `h5_id`s index rows in `0..sentences.len()`.
    /// * `vocab` - the vocabulary every kept token must be in.
    pub fn encode<T: TokenType>(
        &self,
        sentences: &[SentenceRecord],
        vocab: &WordVocab<T>,
    ) -> PreproResult<EncodedLabels<T>> {
        let rows = sentences.len();
        let max_length = self.max_length;

        let mut seqz = Array2::from_elem((rows, max_length), T::zero());
        let mut zseq = Array2::from_elem((rows, max_length), T::zero());
        let mut truncation = TruncationStats::default();

        for sent in sentences {
            let h5_id = sent.h5_id;
            if h5_id >= rows {
                return Err(PreproError::RowOutOfRange { h5_id, rows });
            }

            let num_tokens = sent.tokens.len();
            let kept = num_tokens.min(max_length);
            if num_tokens > max_length {
                truncation.truncated_sentences += 1;
                truncation.dropped_tokens += num_tokens - max_length;
            }

            let start = max_length - kept;
            let ids = vocab.encode_tokens(&sent.tokens[..kept])?;
            for (j, ix) in ids.into_iter().enumerate() {
                seqz[[h5_id, j]] = ix;
                zseq[[h5_id, start + j]] = ix;
            }
        }

        if truncation.truncated_sentences > 0 {
            log::warn!(
                "{} of {} sentences exceed max length {}; {} tokens truncated",
                truncation.truncated_sentences,
                rows,
                max_length,
                truncation.dropped_tokens
            );
        }

        Ok(EncodedLabels {
            seqz,
            zseq,
            truncation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::VocabBuilderOptions;

    fn records(sentences: &[&[&str]]) -> Vec<SentenceRecord> {
        sentences
            .iter()
            .enumerate()
            .map(|(h5_id, tokens)| SentenceRecord {
                sent_id: 100 + h5_id as u64,
                tokens: tokens.iter().map(|s| s.to_string()).collect(),
                sent: tokens.join(" "),
                h5_id,
            })
            .collect()
    }

    #[test]
    fn test_padding_layouts() {
        let vocab: WordVocab<u32> = WordVocab::from_words(["a", "b"]).unwrap();
        let sentences = records(&[&["a", "b"], &["a"]]);

        let labels = LabelEncoder::new(4).unwrap().encode(&sentences, &vocab).unwrap();

        assert_eq!(labels.seqz, ndarray::array![[1, 2, 0, 0], [1, 0, 0, 0]]);
        assert_eq!(labels.zseq, ndarray::array![[0, 0, 1, 2], [0, 0, 0, 1]]);
        assert_eq!(labels.truncation, TruncationStats::default());
    }

    #[test]
    fn test_truncation() {
        let vocab: WordVocab<u32> = WordVocab::from_words(["a", "b", "c"]).unwrap();
        let sentences = records(&[&["a", "b", "c"], &["c"]]);

        let labels = LabelEncoder::new(2).unwrap().encode(&sentences, &vocab).unwrap();

        assert_eq!(labels.seqz, ndarray::array![[1, 2], [3, 0]]);
        assert_eq!(labels.zseq, ndarray::array![[1, 2], [0, 3]]);
        assert_eq!(
            labels.truncation,
            TruncationStats {
                truncated_sentences: 1,
                dropped_tokens: 1,
            }
        );
    }

    #[test]
    fn test_rows_follow_h5_id() {
        let vocab: WordVocab<u32> = WordVocab::from_words(["a", "b"]).unwrap();
        let mut sentences = records(&[&["a"], &["b"]]);
        sentences.reverse();

        let labels = LabelEncoder::new(1).unwrap().encode(&sentences, &vocab).unwrap();
        assert_eq!(labels.seqz, ndarray::array![[1], [2]]);
    }

    #[test]
    fn test_words_past_max_length_are_not_looked_up() {
        let vocab: WordVocab<u32> = WordVocab::from_words(["a"]).unwrap();
        let sentences = records(&[&["a", "zzz"]]);

        let labels = LabelEncoder::new(1).unwrap().encode(&sentences, &vocab).unwrap();
        assert_eq!(labels.seqz, ndarray::array![[1]]);

        let res = LabelEncoder::new(2).unwrap().encode(&sentences, &vocab);
        assert!(matches!(res, Err(PreproError::UnknownWord { word }) if word == "zzz"));
    }

    #[test]
    fn test_bad_h5_id() {
        let vocab: WordVocab<u32> = WordVocab::from_words(["a"]).unwrap();
        let mut sentences = records(&[&["a"]]);
        sentences[0].h5_id = 3;

        assert!(matches!(
            LabelEncoder::new(2).unwrap().encode(&sentences, &vocab),
            Err(PreproError::RowOutOfRange { h5_id: 3, rows: 1 })
        ));
    }

    #[test]
    fn test_options_init() {
        let options = LabelEncoderOptions::default();
        assert_eq!(options.init("refcocog").unwrap().max_length(), 20);

        let options = options.with_max_length(Some(5));
        assert_eq!(options.init("refcocog").unwrap().max_length(), 5);

        let options = LabelEncoderOptions::default()
            .with_max_length_table(MaxLengthTable::empty().with_entry("mine", 3));
        assert_eq!(options.init("mine").unwrap().max_length(), 3);
        assert!(options.init("refcoco").is_err());

        assert!(matches!(
            LabelEncoder::new(0),
            Err(PreproError::InvalidMaxLength)
        ));
    }

    #[test]
    fn test_decode_row() {
        let vocab: WordVocab<u32> = WordVocab::from_words(["the", "red", "car"]).unwrap();
        let sentences = records(&[&["the", "red", "car"], &["car"]]);
        let labels = LabelEncoder::new(5).unwrap().encode(&sentences, &vocab).unwrap();

        assert_eq!(
            labels.decode_row(LabelLayout::Seqz, 0, &vocab).unwrap(),
            vec!["the", "red", "car"]
        );
        assert_eq!(
            labels.decode_row(LabelLayout::Zseq, 1, &vocab).unwrap(),
            vec!["car"]
        );
        assert!(labels.decode_row(LabelLayout::Zseq, 2, &vocab).is_err());

        let other: WordVocab<u32> = WordVocab::from_words(["the"]).unwrap();
        assert!(matches!(
            labels.decode_row(LabelLayout::Seqz, 0, &other),
            Err(PreproError::VocabConflict(_))
        ));
    }

    #[test]
    fn test_from_arrays_shape_check() {
        let a: Array2<u32> = Array2::zeros((2, 3));
        let b: Array2<u32> = Array2::zeros((2, 4));
        assert!(EncodedLabels::from_arrays(a.clone(), a.clone()).is_ok());
        assert!(matches!(
            EncodedLabels::from_arrays(a, b),
            Err(PreproError::Shape(_))
        ));
    }

    proptest::proptest! {
        #[test]
        fn padding_invariants(
            corpus in proptest::collection::vec(
                proptest::collection::vec("[a-f]", 0..9),
                1..10,
            ),
            threshold in 0usize..3,
            max_length in 1usize..7,
        ) {
            let mut builder = VocabBuilderOptions::new(threshold).init();
            builder.update_from_sentences(
                corpus.iter().enumerate().map(|(idx, s)| (idx as u64, s.iter().cloned())),
            );
            let built = builder.build::<u32>().unwrap();
            let sentences = crate::records::record_assembler::assemble_sentences(&built.sentences);

            let labels = LabelEncoder::new(max_length)
                .unwrap()
                .encode(&sentences, &built.vocab)
                .unwrap();

            for sent in &sentences {
                let r = sent.h5_id;
                let kept = sent.tokens.len().min(max_length);
                let start = max_length - kept;

                let seqz = labels.row(LabelLayout::Seqz, r).unwrap();
                let zseq = labels.row(LabelLayout::Zseq, r).unwrap();
                for col in 0..max_length {
                    proptest::prop_assert_eq!(seqz[col] != 0, col < kept);
                    proptest::prop_assert_eq!(zseq[col] != 0, col >= start);
                }
                proptest::prop_assert_eq!(
                    seqz.slice(ndarray::s![..kept]),
                    zseq.slice(ndarray::s![start..])
                );

                let decoded = labels.decode_row(LabelLayout::Seqz, r, &built.vocab).unwrap();
                proptest::prop_assert_eq!(decoded, sent.tokens[..kept].to_vec());
            }
        }
    }
}
