//! # Record Assembly
//!
//! Flattens a [`RefDataSource`] plus the rewritten sentences into the four
//! record lists of the output document, assigning dense `h5_id`s in
//! iteration order.

use indexmap::IndexMap;

use crate::errors::{PreproError, PreproResult};
use crate::records::{AnnRecord, ImageRecord, RefRecord, SentenceRecord};
use crate::source::{RefDataSource, SourceAnn};
use crate::types::{AnnId, SentId};

/// The four record lists of the output document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledRecords {
    /// Reference records, in source order.
    pub refs: Vec<RefRecord>,

    /// Image records, in source order.
    pub images: Vec<ImageRecord>,

    /// Annotation records, grouped by image in image order.
    pub anns: Vec<AnnRecord>,

    /// Sentence records, in rewritten-sentence order.
    pub sentences: Vec<SentenceRecord>,
}

fn lookup_ann<S: RefDataSource + ?Sized>(
    source: &S,
    ann_id: AnnId,
) -> PreproResult<&SourceAnn> {
    source
        .annotation(ann_id)
        .ok_or(PreproError::MissingAnnotation { ann_id })
}

/// Build the reference records.
pub fn assemble_refs<S: RefDataSource + ?Sized>(source: &S) -> PreproResult<Vec<RefRecord>> {
    let refs = source
        .refs()
        .iter()
        .map(|r| {
            let ann = lookup_ann(source, r.ann_id)?;
            Ok(RefRecord {
                ref_id: r.ref_id,
                split: r.split.clone(),
                category_id: r.category_id,
                ann_id: r.ann_id,
                sent_ids: r.sent_ids.clone(),
                bbox: ann.bbox.clone(),
                image_id: r.image_id,
            })
        })
        .collect::<PreproResult<Vec<_>>>()?;

    log::info!("There are in all {} refs.", refs.len());
    Ok(refs)
}

/// Build the image records.
pub fn assemble_images<S: RefDataSource + ?Sized>(source: &S) -> Vec<ImageRecord> {
    let images: Vec<ImageRecord> = source
        .images()
        .iter()
        .enumerate()
        .map(|(h5_id, img)| ImageRecord {
            image_id: img.image_id,
            height: img.height,
            width: img.width,
            file_name: img.file_name.clone(),
            ref_ids: img.ref_ids.clone(),
            ann_ids: img.ann_ids.clone(),
            h5_id,
        })
        .collect();

    log::info!("There are in all {} images.", images.len());
    images
}

/// Build the annotation records.
///
/// Annotations are visited image by image, so only annotations that belong
/// to a listed image are emitted.
pub fn assemble_anns<S: RefDataSource + ?Sized>(source: &S) -> PreproResult<Vec<AnnRecord>> {
    let mut anns = Vec::new();
    for img in source.images() {
        for &ann_id in &img.ann_ids {
            let ann = lookup_ann(source, ann_id)?;
            anns.push(AnnRecord {
                ann_id,
                category_id: ann.category_id,
                bbox: ann.bbox.clone(),
                image_id: img.image_id,
                h5_id: anns.len(),
            });
        }
    }

    log::info!(
        "There are in all {} anns within the {} images.",
        anns.len(),
        source.images().len()
    );
    Ok(anns)
}

/// Build the sentence records from rewritten token lists.
pub fn assemble_sentences(sentences: &IndexMap<SentId, Vec<String>>) -> Vec<SentenceRecord> {
    let records: Vec<SentenceRecord> = sentences
        .iter()
        .enumerate()
        .map(|(h5_id, (&sent_id, tokens))| SentenceRecord {
            sent_id,
            tokens: tokens.clone(),
            sent: tokens.join(" "),
            h5_id,
        })
        .collect();

    log::info!(
        "There are in all {} sentences to be written into the label file.",
        records.len()
    );
    records
}

/// Build all four record lists.
///
/// ## Arguments
/// * `source` - the raw dataset.
/// * `sentences` - the vocabulary-rewritten token list of every sentence.
pub fn assemble_records<S: RefDataSource + ?Sized>(
    source: &S,
    sentences: &IndexMap<SentId, Vec<String>>,
) -> PreproResult<AssembledRecords> {
    Ok(AssembledRecords {
        refs: assemble_refs(source)?,
        images: assemble_images(source),
        anns: assemble_anns(source)?,
        sentences: assemble_sentences(sentences),
    })
}
