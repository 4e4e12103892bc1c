//! # REFER Dataset Loader
//!
//! Reads a REFER-layout dataset directory:
//!
//! ```terminaloutput
//! {data_root}/{dataset}/instances.json      # COCO images / annotations / categories
//! {data_root}/{dataset}/refs({split_by}).json
//! ```
//!
//! The refs file is a list of references; each carries its `sentences`
//! as ``{sent_id, tokens, ...}`` objects.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::errors::PreproResult;
use crate::source::{RefDataSource, ReferIndex, ReferIndexBuilder, SourceAnn, SourceImage, SourceRef};
use crate::types::{AnnId, BBox, CategoryId, ImageId, SentId};

#[derive(Debug, Deserialize)]
struct RawImage {
    id: ImageId,
    file_name: String,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct RawAnnotation {
    id: AnnId,
    image_id: ImageId,
    category_id: CategoryId,
    bbox: BBox,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: CategoryId,
    name: String,
}

#[derive(Debug, Deserialize)]
struct InstancesFile {
    images: Vec<RawImage>,
    annotations: Vec<RawAnnotation>,
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawRef {
    #[serde(flatten)]
    target: SourceRef,

    #[serde(default)]
    sentences: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawSentenceKey {
    sent_id: SentId,
    tokens: Vec<String>,
}

/// Add the contents of a COCO `instances.json` reader to a builder.
pub fn read_instances<R: Read>(
    reader: R,
    builder: &mut ReferIndexBuilder,
) -> PreproResult<()> {
    let instances: InstancesFile = serde_json::from_reader(reader)?;

    for ann in instances.annotations {
        builder.add_annotation(SourceAnn {
            ann_id: ann.id,
            category_id: ann.category_id,
            image_id: ann.image_id,
            bbox: ann.bbox,
        });
    }
    for img in instances.images {
        builder.add_image(img.id, img.file_name, img.width, img.height);
    }
    for cat in instances.categories {
        builder.add_category(cat.id, cat.name);
    }

    Ok(())
}

/// Add the contents of a `refs(...).json` reader to a builder.
pub fn read_refs<R: Read>(
    reader: R,
    builder: &mut ReferIndexBuilder,
) -> PreproResult<()> {
    let refs: Vec<RawRef> = serde_json::from_reader(reader)?;

    for raw in refs {
        builder.add_ref(raw.target);
        for info in raw.sentences {
            let key = RawSentenceKey::deserialize(&info)?;
            builder.add_sentence_info(key.sent_id, key.tokens, info);
        }
    }

    Ok(())
}

/// Options for [`ReferLoader`].
#[derive(Debug, Clone)]
pub struct ReferLoaderOptions {
    /// The root holding one directory per dataset.
    pub data_root: PathBuf,

    /// The dataset name (`refcoco`, `refcocog`, ...).
    pub dataset: String,

    /// The split scheme (`unc`, `google`, ...).
    pub split_by: String,

    /// The directory image file names are relative to.
    pub image_root: Option<PathBuf>,
}

impl ReferLoaderOptions {
    /// Create new options.
    pub fn new<P, S, B>(
        data_root: P,
        dataset: S,
        split_by: B,
    ) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
        B: Into<String>,
    {
        Self {
            data_root: data_root.into(),
            dataset: dataset.into(),
            split_by: split_by.into(),
            image_root: None,
        }
    }

    /// Sets the image root.
    pub fn with_image_root<P: Into<PathBuf>>(
        self,
        image_root: Option<P>,
    ) -> Self {
        Self {
            image_root: image_root.map(Into::into),
            ..self
        }
    }

    /// The dataset directory.
    pub fn dataset_dir(&self) -> PathBuf {
        self.data_root.join(&self.dataset)
    }

    /// The COCO instances file path.
    pub fn instances_path(&self) -> PathBuf {
        self.dataset_dir().join("instances.json")
    }

    /// The references file path.
    pub fn refs_path(&self) -> PathBuf {
        self.dataset_dir()
            .join(format!("refs({}).json", self.split_by))
    }

    /// Load the dataset.
    pub fn load(self) -> PreproResult<ReferLoader> {
        ReferLoader::load(self)
    }
}

/// A REFER dataset loaded from disk.
#[derive(Debug, Clone)]
pub struct ReferLoader {
    options: ReferLoaderOptions,
    index: ReferIndex,
}

fn open_reader(path: &Path) -> PreproResult<BufReader<File>> {
    log::debug!("reading {}", path.display());
    Ok(BufReader::new(File::open(path)?))
}

impl ReferLoader {
    /// Load a dataset.
    pub fn load(options: ReferLoaderOptions) -> PreproResult<Self> {
        log::info!(
            "loading dataset {} into memory from {}",
            options.dataset,
            options.dataset_dir().display()
        );

        let mut builder = ReferIndexBuilder::default();
        read_instances(open_reader(&options.instances_path())?, &mut builder)?;
        read_refs(open_reader(&options.refs_path())?, &mut builder)?;
        let index = builder.build();

        log::info!(
            "loaded {} refs, {} images, {} sentences",
            index.refs().len(),
            index.images().len(),
            index.sentence_tokens().len()
        );

        Ok(Self { options, index })
    }

    /// The loader options.
    pub fn options(&self) -> &ReferLoaderOptions {
        &self.options
    }

    /// The loaded index.
    pub fn index(&self) -> &ReferIndex {
        &self.index
    }

    /// Release the loaded index.
    pub fn into_index(self) -> ReferIndex {
        self.index
    }

    /// The full path of an image, if an image root is configured.
    pub fn image_path(
        &self,
        image: &SourceImage,
    ) -> Option<PathBuf> {
        self.options
            .image_root
            .as_ref()
            .map(|root| root.join(&image.file_name))
    }
}

impl RefDataSource for ReferLoader {
    fn refs(&self) -> &[SourceRef] {
        self.index.refs()
    }

    fn images(&self) -> &[SourceImage] {
        self.index.images()
    }

    fn annotation(
        &self,
        ann_id: AnnId,
    ) -> Option<&SourceAnn> {
        self.index.annotation(ann_id)
    }

    fn sentence_tokens(&self) -> &IndexMap<SentId, Vec<String>> {
        self.index.sentence_tokens()
    }

    fn categories(&self) -> &IndexMap<CategoryId, String> {
        self.index.categories()
    }

    fn sentences_info(&self) -> &IndexMap<SentId, serde_json::Value> {
        self.index.sentences_info()
    }
}
