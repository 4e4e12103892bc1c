use refprep::{
    PreproOptions,
    PreproPipeline,
    config::{DEFAULT_DATA_JSON, DEFAULT_DATA_LABELS, DEFAULT_WORD_COUNT_THRESHOLD},
};

use crate::logging::LogArgs;

/// Args for the prepro command.
#[derive(clap::Args, Debug)]
pub struct PreproArgs {
    #[clap(flatten)]
    logging: LogArgs,

    /// Dataset name: refcoco, refcoco+, refcocog, refclef, refgta.
    #[arg(long, default_value = "refcoco")]
    dataset: String,

    /// Split scheme: unc, google, umd, berkeley, utokyo.
    #[arg(long, default_value = "unc")]
    split_by: String,

    /// Directory holding one subdirectory per dataset.
    #[arg(long, default_value = "data")]
    data_root: String,

    /// Image root for refcoco* datasets.
    #[arg(long, default_value = "data/images/mscoco/images/train2014")]
    coco_image_root: String,

    /// Image root for other datasets.
    #[arg(long, default_value = "data/images/gta")]
    gta_image_root: String,

    /// Output root; files land in a per-dataset directory under its prepro/.
    #[arg(long, default_value = "cache")]
    save_dir: String,

    /// Output document file name.
    #[arg(long, default_value = DEFAULT_DATA_JSON)]
    data_json: String,

    /// Output label archive file name.
    #[arg(long, default_value = DEFAULT_DATA_LABELS)]
    data_labels: String,

    /// Words occurring this many times or fewer become UNK.
    #[arg(long, default_value_t = DEFAULT_WORD_COUNT_THRESHOLD)]
    word_count_threshold: usize,

    /// Label width; defaults per dataset.
    #[arg(long)]
    max_length: Option<usize>,

    /// Legacy mode; prefixes output file names with "old".
    #[arg(long)]
    old: bool,

    /// Decode every label row back and log it at debug level.
    #[arg(long)]
    check_labels: bool,
}

impl PreproArgs {
    fn options(&self) -> PreproOptions {
        PreproOptions::new(self.dataset.as_str(), self.split_by.as_str())
            .with_data_root(self.data_root.as_str())
            .with_coco_image_root(self.coco_image_root.as_str())
            .with_gta_image_root(self.gta_image_root.as_str())
            .with_save_dir(self.save_dir.as_str())
            .with_data_json(self.data_json.as_str())
            .with_data_labels(self.data_labels.as_str())
            .with_word_count_threshold(self.word_count_threshold)
            .with_max_length(self.max_length)
            .with_old(self.old)
            .with_check_labels(self.check_labels)
    }

    /// Run the prepro command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let options = self.options();
        log::info!("parsed input parameters: {options:#?}");

        let summary = PreproPipeline::new(options).run()?;

        log::info!(
            "{} refs, {} images, {} anns, {} sentences; vocab size {}; max length {}",
            summary.num_refs,
            summary.num_images,
            summary.num_anns,
            summary.num_sentences,
            summary.vocab_size,
            summary.max_length
        );
        println!("{}", summary.json_path.display());
        println!("{}", summary.labels_path.display());

        Ok(())
    }
}
