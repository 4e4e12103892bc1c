//! # Annotation Data Sources
//!
//! The pipeline reads raw annotations through the narrow [`RefDataSource`]
//! trait. Two implementations are provided:
//!
//! * [`ReferIndex`] - an in-memory index, assembled with
//!   [`ReferIndexBuilder`]; this is also the fixture type used in tests.
//! * [`ReferLoader`] - loads a REFER-layout dataset directory from disk
//!   into a [`ReferIndex`].
use indexmap::IndexMap;
use serde::Deserialize;

use crate::types::{AnnId, BBox, CategoryId, ImageId, RefId, SentId};

pub mod refer_index;
pub mod refer_loader;

#[doc(inline)]
pub use refer_index::{ReferIndex, ReferIndexBuilder};
#[doc(inline)]
pub use refer_loader::{ReferLoader, ReferLoaderOptions};

/// A referring expression target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRef {
    /// The reference id.
    pub ref_id: RefId,

    /// The annotation the expressions refer to.
    pub ann_id: AnnId,

    /// The image holding the annotation.
    pub image_id: ImageId,

    /// The dataset split (`train`, `val`, `testA`, ...).
    pub split: String,

    /// The object category.
    pub category_id: CategoryId,

    /// The referring sentences.
    pub sent_ids: Vec<SentId>,
}

/// An image, with reverse indices to its references and annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    /// The image id.
    pub image_id: ImageId,

    /// The image file name, relative to the image root.
    pub file_name: String,

    /// Width, in pixels.
    pub width: u32,

    /// Height, in pixels.
    pub height: u32,

    /// References on this image, in source order.
    pub ref_ids: Vec<RefId>,

    /// Annotations on this image, in source order.
    pub ann_ids: Vec<AnnId>,
}

/// An object annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAnn {
    /// The annotation id.
    pub ann_id: AnnId,

    /// The object category.
    pub category_id: CategoryId,

    /// The image holding the annotation.
    pub image_id: ImageId,

    /// The object bounding box.
    pub bbox: BBox,
}

/// Read-only access to a loaded referring-expression dataset.
///
/// Every collection is exposed in source order; the pipeline assigns
/// positional indices by iterating in that order.
pub trait RefDataSource {
    /// Every reference, in source order.
    fn refs(&self) -> &[SourceRef];

    /// Every image, in source order.
    fn images(&self) -> &[SourceImage];

    /// Look up an annotation by id.
    fn annotation(
        &self,
        ann_id: AnnId,
    ) -> Option<&SourceAnn>;

    /// The raw token list of every sentence, in source order.
    fn sentence_tokens(&self) -> &IndexMap<SentId, Vec<String>>;

    /// The ``{ category_id -> name }`` table.
    fn categories(&self) -> &IndexMap<CategoryId, String>;

    /// The raw ``{ sent_id -> sentence }`` objects, passed through untouched.
    fn sentences_info(&self) -> &IndexMap<SentId, serde_json::Value>;
}
