//! # Output Document
//!
//! The JSON document consumed by the trainer:
//!
//! ```terminaloutput
//! refs:       [{ref_id, split, category_id, ann_id, sent_ids, box, image_id}]
//! images:     [{image_id, height, width, file_name, ref_ids, ann_ids, h5_id}]
//! anns:       [{ann_id, category_id, box, image_id, h5_id}]
//! sentences:  [{sent_id, tokens, sent, h5_id}]
//! ix_to_word: {ix: word}
//! word_to_ix: {word: ix}
//! ix_to_cat:  {category_id: name}
//! sents_info: {sent_id: sentence}
//! ```

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::PreproResult;
use crate::records::{AnnRecord, AssembledRecords, ImageRecord, RefRecord, SentenceRecord};
use crate::types::{CategoryId, SentId};
use crate::vocab::WordVocab;

/// The output JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreproDocument {
    /// Reference records.
    pub refs: Vec<RefRecord>,

    /// Image records.
    pub images: Vec<ImageRecord>,

    /// Annotation records.
    pub anns: Vec<AnnRecord>,

    /// Sentence records.
    pub sentences: Vec<SentenceRecord>,

    /// ``{ index -> word }``.
    pub ix_to_word: IndexMap<u32, String>,

    /// ``{ word -> index }``.
    pub word_to_ix: IndexMap<String, u32>,

    /// ``{ category_id -> name }``.
    pub ix_to_cat: IndexMap<CategoryId, String>,

    /// ``{ sent_id -> raw sentence object }``.
    pub sents_info: IndexMap<SentId, serde_json::Value>,
}

impl PreproDocument {
    /// Assemble a document.
    pub fn new(
        records: AssembledRecords,
        vocab: &WordVocab<u32>,
        ix_to_cat: IndexMap<CategoryId, String>,
        sents_info: IndexMap<SentId, serde_json::Value>,
    ) -> Self {
        let AssembledRecords {
            refs,
            images,
            anns,
            sentences,
        } = records;

        Self {
            refs,
            images,
            anns,
            sentences,
            ix_to_word: vocab.ix_to_word(),
            word_to_ix: vocab.word_to_ix().clone(),
            ix_to_cat,
            sents_info,
        }
    }

    /// Rebuild the vocabulary from ``ix_to_word``.
    pub fn vocab(&self) -> PreproResult<WordVocab<u32>> {
        WordVocab::from_index_map(&self.ix_to_word)
    }
}

/// Write a document as JSON.
pub fn write_document<W: Write>(
    document: &PreproDocument,
    writer: W,
) -> PreproResult<()> {
    serde_json::to_writer(writer, document)?;
    Ok(())
}

/// Save a document to a JSON file.
pub fn save_document_path<P: AsRef<Path>>(
    document: &PreproDocument,
    path: P,
) -> PreproResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_document(document, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Read a document from JSON.
pub fn read_document<R: Read>(reader: R) -> PreproResult<PreproDocument> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a document from a JSON file.
pub fn load_document_path<P: AsRef<Path>>(path: P) -> PreproResult<PreproDocument> {
    read_document(BufReader::new(File::open(path)?))
}
