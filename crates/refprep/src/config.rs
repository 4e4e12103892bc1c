//! # Preprocessing Options
//!
//! Paths are kept as strings and shell-expanded (`~`, `$VAR`) when resolved.

use std::path::PathBuf;

use crate::encoding::{LabelEncoderOptions, MaxLengthTable};
use crate::errors::{PreproError, PreproResult};
use crate::source::ReferLoaderOptions;
use crate::vocab::VocabBuilderOptions;

/// Default output document file name.
pub const DEFAULT_DATA_JSON: &str = "data.json";

/// Default label archive file name.
pub const DEFAULT_DATA_LABELS: &str = "data.npz";

/// Default word count threshold.
pub const DEFAULT_WORD_COUNT_THRESHOLD: usize = 2;

/// Prefix applied to output file names in legacy mode.
pub const LEGACY_PREFIX: &str = "old";

/// Expand `~` and environment variables in a path.
pub fn expand_path(path: &str) -> PreproResult<PathBuf> {
    let expanded =
        shellexpand::full(path).map_err(|err| PreproError::PathExpansion(err.to_string()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Options for a [`crate::pipeline::PreproPipeline`] run.
#[derive(Debug, Clone)]
pub struct PreproOptions {
    /// The dataset name (`refcoco`, `refcoco+`, `refcocog`, `refclef`, `refgta`).
    pub dataset: String,

    /// The split scheme (`unc`, `google`, `umd`, ...).
    pub split_by: String,

    /// The root holding one directory per dataset.
    pub data_root: String,

    /// Image root for `refcoco*` datasets.
    pub coco_image_root: String,

    /// Image root for every other dataset.
    pub gta_image_root: String,

    /// Outputs land in ``<save_dir>/prepro/<dataset>_<split_by>``.
    pub save_dir: String,

    /// Output document file name.
    pub data_json: String,

    /// Label archive file name.
    pub data_labels: String,

    /// Words must occur strictly more often than this to be kept.
    pub word_count_threshold: usize,

    /// Explicit label width; overrides [`Self::max_length_table`].
    pub max_length: Option<usize>,

    /// Per-dataset default label widths.
    pub max_length_table: MaxLengthTable,

    /// Legacy mode: prefix output file names with `old`.
    pub old: bool,

    /// Decode every encoded row back and log it.
    pub check_labels: bool,
}

impl Default for PreproOptions {
    fn default() -> Self {
        Self {
            dataset: "refcoco".to_string(),
            split_by: "unc".to_string(),
            data_root: "data".to_string(),
            coco_image_root: "data/images/mscoco/images/train2014".to_string(),
            gta_image_root: "data/images/gta".to_string(),
            save_dir: "cache".to_string(),
            data_json: DEFAULT_DATA_JSON.to_string(),
            data_labels: DEFAULT_DATA_LABELS.to_string(),
            word_count_threshold: DEFAULT_WORD_COUNT_THRESHOLD,
            max_length: None,
            max_length_table: MaxLengthTable::default(),
            old: false,
            check_labels: false,
        }
    }
}

impl PreproOptions {
    /// Create options for a dataset and split, with all other defaults.
    pub fn new<S: Into<String>, B: Into<String>>(
        dataset: S,
        split_by: B,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            split_by: split_by.into(),
            ..Default::default()
        }
    }

    /// Sets the data root.
    pub fn with_data_root<S: Into<String>>(
        self,
        data_root: S,
    ) -> Self {
        Self {
            data_root: data_root.into(),
            ..self
        }
    }

    /// Sets the `refcoco*` image root.
    pub fn with_coco_image_root<S: Into<String>>(
        self,
        coco_image_root: S,
    ) -> Self {
        Self {
            coco_image_root: coco_image_root.into(),
            ..self
        }
    }

    /// Sets the image root used by non-`refcoco` datasets.
    pub fn with_gta_image_root<S: Into<String>>(
        self,
        gta_image_root: S,
    ) -> Self {
        Self {
            gta_image_root: gta_image_root.into(),
            ..self
        }
    }

    /// Sets the save directory.
    pub fn with_save_dir<S: Into<String>>(
        self,
        save_dir: S,
    ) -> Self {
        Self {
            save_dir: save_dir.into(),
            ..self
        }
    }

    /// Sets the document file name.
    pub fn with_data_json<S: Into<String>>(
        self,
        data_json: S,
    ) -> Self {
        Self {
            data_json: data_json.into(),
            ..self
        }
    }

    /// Sets the label archive file name.
    pub fn with_data_labels<S: Into<String>>(
        self,
        data_labels: S,
    ) -> Self {
        Self {
            data_labels: data_labels.into(),
            ..self
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

    /// Sets the explicit label width.
    pub fn with_max_length(
        self,
        max_length: Option<usize>,
    ) -> Self {
        Self { max_length, ..self }
    }

    /// Sets the per-dataset label width table.
    pub fn with_max_length_table(
        self,
        max_length_table: MaxLengthTable,
    ) -> Self {
        Self {
            max_length_table,
            ..self
        }
    }

    /// Sets legacy mode.
    pub fn with_old(
        self,
        old: bool,
    ) -> Self {
        Self { old, ..self }
    }

    /// Sets the label check flag.
    pub fn with_check_labels(
        self,
        check_labels: bool,
    ) -> Self {
        Self {
            check_labels,
            ..self
        }
    }

    /// The configured image root, chosen by dataset family.
    pub fn image_root(&self) -> &str {
        if self.dataset.contains("refcoco") {
            &self.coco_image_root
        } else {
            &self.gta_image_root
        }
    }

    /// The expanded output directory.
    pub fn target_dir(&self) -> PreproResult<PathBuf> {
        Ok(expand_path(&self.save_dir)?
            .join("prepro")
            .join(format!("{}_{}", self.dataset, self.split_by)))
    }

    fn output_name(
        &self,
        name: &str,
    ) -> String {
        if self.old {
            format!("{LEGACY_PREFIX}{name}")
        } else {
            name.to_string()
        }
    }

    /// The document file name, after the legacy prefix.
    pub fn json_file_name(&self) -> String {
        self.output_name(&self.data_json)
    }

    /// The label archive file name, after the legacy prefix.
    pub fn labels_file_name(&self) -> String {
        self.output_name(&self.data_labels)
    }

    /// The vocabulary builder options.
    pub fn vocab_options(&self) -> VocabBuilderOptions {
        VocabBuilderOptions::new(self.word_count_threshold)
    }

    /// The label encoder options.
    pub fn encoder_options(&self) -> LabelEncoderOptions {
        LabelEncoderOptions::default()
            .with_max_length(self.max_length)
            .with_max_length_table(self.max_length_table.clone())
    }

    /// The loader options, with expanded paths.
    pub fn loader_options(&self) -> PreproResult<ReferLoaderOptions> {
        Ok(ReferLoaderOptions::new(
            expand_path(&self.data_root)?,
            self.dataset.as_str(),
            self.split_by.as_str(),
        )
        .with_image_root(Some(expand_path(self.image_root())?)))
    }
}
