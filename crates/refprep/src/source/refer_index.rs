//! # In-Memory REFER Index

use indexmap::IndexMap;

use crate::source::{RefDataSource, SourceAnn, SourceImage, SourceRef};
use crate::types::{AnnId, CategoryId, ImageId, RefId, SentId};

/// An in-memory referring-expression dataset.
///
/// Built with [`ReferIndexBuilder`].
#[derive(Debug, Clone, Default)]
pub struct ReferIndex {
    refs: Vec<SourceRef>,
    images: Vec<SourceImage>,
    anns: IndexMap<AnnId, SourceAnn>,
    sentence_tokens: IndexMap<SentId, Vec<String>>,
    categories: IndexMap<CategoryId, String>,
    sentences_info: IndexMap<SentId, serde_json::Value>,
}

impl ReferIndex {
    /// Every annotation, in source order.
    pub fn annotations(&self) -> impl Iterator<Item = &SourceAnn> {
        self.anns.values()
    }

    /// Look up an image by id.
    pub fn image(
        &self,
        image_id: ImageId,
    ) -> Option<&SourceImage> {
        self.images.iter().find(|img| img.image_id == image_id)
    }
}

impl RefDataSource for ReferIndex {
    fn refs(&self) -> &[SourceRef] {
        &self.refs
    }

    fn images(&self) -> &[SourceImage] {
        &self.images
    }

    fn annotation(
        &self,
        ann_id: AnnId,
    ) -> Option<&SourceAnn> {
        self.anns.get(&ann_id)
    }

    fn sentence_tokens(&self) -> &IndexMap<SentId, Vec<String>> {
        &self.sentence_tokens
    }

    fn categories(&self) -> &IndexMap<CategoryId, String> {
        &self.categories
    }

    fn sentences_info(&self) -> &IndexMap<SentId, serde_json::Value> {
        &self.sentences_info
    }
}

#[derive(Debug, Clone)]
struct ImageEntry {
    file_name: String,
    width: u32,
    height: u32,
}

/// Builder for [`ReferIndex`].
///
/// Entities may be added in any order; the image reverse indices are
/// computed by [`ReferIndexBuilder::build`]:
/// * `ref_ids` follow reference insertion order;
/// * `ann_ids` follow annotation insertion order.
///
/// Re-adding an id replaces the earlier entry, keeping its position.
#[derive(Debug, Clone, Default)]
pub struct ReferIndexBuilder {
    images: IndexMap<ImageId, ImageEntry>,
    anns: IndexMap<AnnId, SourceAnn>,
    refs: IndexMap<RefId, SourceRef>,
    categories: IndexMap<CategoryId, String>,
    sentence_tokens: IndexMap<SentId, Vec<String>>,
    sentences_info: IndexMap<SentId, serde_json::Value>,
}

impl ReferIndexBuilder {
    /// Add an image.
    pub fn add_image<S: Into<String>>(
        &mut self,
        image_id: ImageId,
        file_name: S,
        width: u32,
        height: u32,
    ) -> &mut Self {
        self.images.insert(
            image_id,
            ImageEntry {
                file_name: file_name.into(),
                width,
                height,
            },
        );
        self
    }

    /// Add an annotation.
    pub fn add_annotation(
        &mut self,
        ann: SourceAnn,
    ) -> &mut Self {
        self.anns.insert(ann.ann_id, ann);
        self
    }

    /// Add a category name.
    pub fn add_category<S: Into<String>>(
        &mut self,
        category_id: CategoryId,
        name: S,
    ) -> &mut Self {
        self.categories.insert(category_id, name.into());
        self
    }

    /// Add a reference.
    ///
    /// Its sentences are added separately, see [`Self::add_sentence`].
    pub fn add_ref(
        &mut self,
        source_ref: SourceRef,
    ) -> &mut Self {
        self.refs.insert(source_ref.ref_id, source_ref);
        self
    }

    /// Add a sentence with its raw object for the pass-through table.
    pub fn add_sentence_info(
        &mut self,
        sent_id: SentId,
        tokens: Vec<String>,
        info: serde_json::Value,
    ) -> &mut Self {
        self.sentence_tokens.insert(sent_id, tokens);
        self.sentences_info.insert(sent_id, info);
        self
    }

    /// Add a sentence from its tokens.
    ///
    /// The pass-through object is ``{sent_id, tokens, sent}``.
    pub fn add_sentence<I, S>(
        &mut self,
        sent_id: SentId,
        tokens: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let info = serde_json::json!({
            "sent_id": sent_id,
            "tokens": tokens,
            "sent": tokens.join(" "),
        });
        self.add_sentence_info(sent_id, tokens, info)
    }

    /// Build the index.
    pub fn build(self) -> ReferIndex {
        let mut images: IndexMap<ImageId, SourceImage> = self
            .images
            .into_iter()
            .map(|(image_id, entry)| {
                let image = SourceImage {
                    image_id,
                    file_name: entry.file_name,
                    width: entry.width,
                    height: entry.height,
                    ref_ids: Vec::new(),
                    ann_ids: Vec::new(),
                };
                (image_id, image)
            })
            .collect();

        for source_ref in self.refs.values() {
            if let Some(image) = images.get_mut(&source_ref.image_id) {
                image.ref_ids.push(source_ref.ref_id);
            }
        }
        for ann in self.anns.values() {
            if let Some(image) = images.get_mut(&ann.image_id) {
                image.ann_ids.push(ann.ann_id);
            }
        }

        ReferIndex {
            refs: self.refs.into_values().collect(),
            images: images.into_values().collect(),
            anns: self.anns,
            sentence_tokens: self.sentence_tokens,
            categories: self.categories,
            sentences_info: self.sentences_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(
        ann_id: AnnId,
        image_id: ImageId,
    ) -> SourceAnn {
        SourceAnn {
            ann_id,
            category_id: 1,
            image_id,
            bbox: crate::types::bbox([0, 0, 10, 10]),
        }
    }

    fn source_ref(
        ref_id: RefId,
        ann_id: AnnId,
        image_id: ImageId,
        sent_ids: Vec<SentId>,
    ) -> SourceRef {
        SourceRef {
            ref_id,
            ann_id,
            image_id,
            split: "train".to_string(),
            category_id: 1,
            sent_ids,
        }
    }

    #[test]
    fn test_reverse_indices() {
        let mut builder = ReferIndexBuilder::default();
        builder
            .add_image(20, "b.jpg", 640, 480)
            .add_image(10, "a.jpg", 320, 240)
            .add_annotation(ann(3, 10))
            .add_annotation(ann(1, 20))
            .add_annotation(ann(2, 10))
            .add_category(1, "person")
            .add_ref(source_ref(7, 2, 10, vec![100]))
            .add_ref(source_ref(5, 3, 10, vec![101]))
            .add_sentence(100, ["man", "left"])
            .add_sentence(101, ["woman"]);

        let index = builder.build();

        let images = index.images();
        assert_eq!(
            images.iter().map(|i| i.image_id).collect::<Vec<_>>(),
            vec![20, 10]
        );
        assert_eq!(images[0].ann_ids, vec![1]);
        assert!(images[0].ref_ids.is_empty());
        assert_eq!(images[1].ann_ids, vec![3, 2]);
        assert_eq!(images[1].ref_ids, vec![7, 5]);

        assert_eq!(index.image(10).map(|i| i.width), Some(320));
        assert_eq!(index.annotation(2).map(|a| a.image_id), Some(10));
        assert!(index.annotation(99).is_none());
        assert_eq!(
            index.annotations().map(|a| a.ann_id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );

        assert_eq!(
            index.sentence_tokens().keys().copied().collect::<Vec<_>>(),
            vec![100, 101]
        );
        assert_eq!(index.categories()[&1], "person");
        assert_eq!(index.sentences_info()[&100]["sent"], "man left");
    }
}
