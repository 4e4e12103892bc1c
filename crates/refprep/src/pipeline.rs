//! # Preprocessing Pipeline
//!
//! Drives one run end to end:
//!
//! 1. build the vocabulary and rewrite sentences;
//! 2. report the sentence length distribution;
//! 3. assemble and write the JSON document;
//! 4. encode and write the label archive;
//! 5. optionally decode every row back as a check.

use std::{fs, path::PathBuf};

use crate::config::PreproOptions;
use crate::encoding::{EncodedLabels, LabelLayout, TruncationStats, save_labels_path};
use crate::errors::PreproResult;
use crate::records::{PreproDocument, SentenceRecord, assemble_records, save_document_path};
use crate::sentence_lengths::SentenceLengthHistogram;
use crate::source::{RefDataSource, ReferLoader};
use crate::vocab::{VocabStats, WordVocab};

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PreproSummary {
    /// The written document.
    pub json_path: PathBuf,

    /// The written label archive.
    pub labels_path: PathBuf,

    /// Number of reference records.
    pub num_refs: usize,

    /// Number of image records.
    pub num_images: usize,

    /// Number of annotation records.
    pub num_anns: usize,

    /// Number of sentence records (and label rows).
    pub num_sentences: usize,

    /// Vocabulary size, including the marker when present.
    pub vocab_size: usize,

    /// The label width.
    pub max_length: usize,

    /// Vocabulary statistics.
    pub vocab_stats: VocabStats,

    /// Encoder truncation counts.
    pub truncation: TruncationStats,
}

/// Decode every sentence's rows and log them against the stored tokens.
///
/// ## Returns
/// The number of sentences whose forward row does not match the stored
/// tokens truncated to the label width.
pub fn check_encoded_labels(
    sentences: &[SentenceRecord],
    labels: &EncodedLabels<u32>,
    vocab: &WordVocab<u32>,
) -> PreproResult<usize> {
    let max_length = labels.max_length();
    let mut mismatches = 0;

    for sent in sentences {
        let seqz = labels.decode_row(LabelLayout::Seqz, sent.h5_id, vocab)?;
        let zseq = labels.decode_row(LabelLayout::Zseq, sent.h5_id, vocab)?;

        log::debug!("gt:   {}", sent.sent);
        log::debug!("seqz: {}", seqz.join(" "));
        log::debug!("zseq: {}", zseq.join(" "));

        let kept = sent.tokens.len().min(max_length);
        if seqz != sent.tokens[..kept] || zseq != seqz {
            log::warn!("label mismatch for sentence {}", sent.sent_id);
            mismatches += 1;
        }
    }

    log::info!(
        "checked {} label rows, {} mismatches",
        sentences.len(),
        mismatches
    );
    Ok(mismatches)
}

/// One preprocessing run.
#[derive(Debug, Clone)]
pub struct PreproPipeline {
    options: PreproOptions,
}

impl PreproPipeline {
    /// Create a pipeline.
    pub fn new(options: PreproOptions) -> Self {
        Self { options }
    }

    /// The run options.
    pub fn options(&self) -> &PreproOptions {
        &self.options
    }

    /// Load the dataset from disk, then run.
    pub fn run(&self) -> PreproResult<PreproSummary> {
        let target_dir = self.prepare_target_dir()?;
        let loader = ReferLoader::load(self.options.loader_options()?)?;
        self.run_into(&loader, target_dir)
    }

    /// Run over an already loaded data source.
    pub fn run_with_source<S: RefDataSource + ?Sized>(
        &self,
        source: &S,
    ) -> PreproResult<PreproSummary> {
        let target_dir = self.prepare_target_dir()?;
        self.run_into(source, target_dir)
    }

    fn prepare_target_dir(&self) -> PreproResult<PathBuf> {
        let target_dir = self.options.target_dir()?;
        fs::create_dir_all(&target_dir)?;
        Ok(target_dir)
    }

    fn run_into<S: RefDataSource + ?Sized>(
        &self,
        source: &S,
        target_dir: PathBuf,
    ) -> PreproResult<PreproSummary> {
        let options = &self.options;

        // Resolve the width before any output is written.
        let encoder = options.encoder_options().init(&options.dataset)?;

        let mut builder = options.vocab_options().init();
        builder.update_from_sentences(
            source
                .sentence_tokens()
                .iter()
                .map(|(&sent_id, tokens)| (sent_id, tokens.iter().map(String::as_str))),
        );
        let built = builder.build::<u32>()?;

        SentenceLengthHistogram::from_token_lists(built.sentences.values().map(Vec::as_slice))
            .log_report();

        let records = assemble_records(source, &built.sentences)?;
        let document = PreproDocument::new(
            records,
            &built.vocab,
            source.categories().clone(),
            source.sentences_info().clone(),
        );

        let json_path = target_dir.join(options.json_file_name());
        save_document_path(&document, &json_path)?;
        log::info!("{} written.", json_path.display());

        let labels = encoder.encode(&document.sentences, &built.vocab)?;
        let labels_path = target_dir.join(options.labels_file_name());
        save_labels_path(&labels, &labels_path)?;
        log::info!("{} written.", labels_path.display());

        if options.check_labels {
            check_encoded_labels(&document.sentences, &labels, &built.vocab)?;
        }

        Ok(PreproSummary {
            json_path,
            labels_path,
            num_refs: document.refs.len(),
            num_images: document.images.len(),
            num_anns: document.anns.len(),
            num_sentences: document.sentences.len(),
            vocab_size: built.vocab.len(),
            max_length: encoder.max_length(),
            vocab_stats: built.stats,
            truncation: labels.truncation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::LabelEncoder;
    use crate::errors::PreproError;
    use crate::source::{ReferIndexBuilder, SourceAnn, SourceRef};

    fn fixture() -> crate::source::ReferIndex {
        let mut builder = ReferIndexBuilder::default();
        builder
            .add_image(7, "img.jpg", 640, 480)
            .add_category(1, "person")
            .add_annotation(SourceAnn {
                ann_id: 70,
                category_id: 1,
                image_id: 7,
                bbox: crate::types::bbox([0, 0, 10, 20]),
            })
            .add_ref(SourceRef {
                ref_id: 700,
                ann_id: 70,
                image_id: 7,
                split: "train".to_string(),
                category_id: 1,
                sent_ids: vec![1, 2],
            })
            .add_sentence(1, ["man", "on", "left"])
            .add_sentence(2, ["left", "man"]);
        builder.build()
    }

    #[test]
    fn test_run_with_source() {
        let source = fixture();

        tempdir::TempDir::new("pipeline_test")
            .and_then(|dir| {
                let options = PreproOptions::new("refcoco", "unc")
                    .with_save_dir(dir.path().to_string_lossy())
                    .with_word_count_threshold(1)
                    .with_max_length(Some(2))
                    .with_check_labels(true);

                let summary = PreproPipeline::new(options).run_with_source(&source).unwrap();

                assert!(summary.json_path.ends_with("prepro/refcoco_unc/data.json"));
                assert!(summary.json_path.exists());
                assert!(summary.labels_path.exists());
                assert_eq!(summary.num_sentences, 2);
                assert_eq!(summary.num_anns, 1);

                // "man" and "left" kept; "on" becomes the marker.
                assert_eq!(summary.vocab_size, 3);
                assert_eq!(summary.vocab_stats.unk_count, 1);
                assert_eq!(
                    summary.truncation,
                    TruncationStats {
                        truncated_sentences: 1,
                        dropped_tokens: 1,
                    }
                );

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_unknown_dataset_writes_nothing() {
        let source = fixture();

        tempdir::TempDir::new("pipeline_test")
            .and_then(|dir| {
                let options = PreproOptions::new("mystery", "x")
                    .with_save_dir(dir.path().to_string_lossy());
                let pipeline = PreproPipeline::new(options);

                assert!(matches!(
                    pipeline.run_with_source(&source),
                    Err(PreproError::UnknownMaxLength { .. })
                ));
                let target = pipeline.options().target_dir().unwrap();
                assert!(!target.join("data.json").exists());

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_check_encoded_labels() {
        let vocab: WordVocab<u32> = WordVocab::from_words(["a", "b"]).unwrap();
        let sentences = vec![SentenceRecord {
            sent_id: 1,
            tokens: vec!["a".to_string(), "b".to_string()],
            sent: "a b".to_string(),
            h5_id: 0,
        }];
        let labels = LabelEncoder::new(3).unwrap().encode(&sentences, &vocab).unwrap();
        assert_eq!(check_encoded_labels(&sentences, &labels, &vocab).unwrap(), 0);

        let swapped =
            EncodedLabels::from_arrays(ndarray::array![[2, 1, 0]], ndarray::array![[0, 2, 1]])
                .unwrap();
        assert_eq!(check_encoded_labels(&sentences, &swapped, &vocab).unwrap(), 1);
    }
}
