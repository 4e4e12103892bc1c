//! # Output Record Types

use serde::{Deserialize, Serialize};

use crate::types::{AnnId, BBox, CategoryId, ImageId, RefId, SentId};

/// A reference record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefRecord {
    /// The reference id.
    pub ref_id: RefId,

    /// The dataset split.
    pub split: String,

    /// The object category.
    pub category_id: CategoryId,

    /// The referred annotation.
    pub ann_id: AnnId,

    /// The referring sentences.
    pub sent_ids: Vec<SentId>,

    /// The referred annotation's bounding box.
    #[serde(rename = "box")]
    pub bbox: BBox,

    /// The image holding the annotation.
    pub image_id: ImageId,
}

/// An image record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// The image id.
    pub image_id: ImageId,

    /// Height, in pixels.
    pub height: u32,

    /// Width, in pixels.
    pub width: u32,

    /// The image file name.
    pub file_name: String,

    /// References on this image.
    pub ref_ids: Vec<RefId>,

    /// Annotations on this image.
    pub ann_ids: Vec<AnnId>,

    /// Dense positional index.
    pub h5_id: usize,
}

/// An annotation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnRecord {
    /// The annotation id.
    pub ann_id: AnnId,

    /// The object category.
    pub category_id: CategoryId,

    /// The bounding box.
    #[serde(rename = "box")]
    pub bbox: BBox,

    /// The image holding the annotation.
    pub image_id: ImageId,

    /// Dense positional index.
    pub h5_id: usize,
}

/// A sentence record.
///
/// `h5_id` is the sentence's row in both label matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// The sentence id.
    pub sent_id: SentId,

    /// The vocabulary-rewritten tokens.
    pub tokens: Vec<String>,

    /// The tokens, joined by single spaces.
    pub sent: String,

    /// Dense positional index.
    pub h5_id: usize,
}
