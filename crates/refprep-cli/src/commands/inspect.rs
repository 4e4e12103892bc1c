use refprep::{
    encoding::{LabelLayout, load_labels_path},
    records::load_document_path,
};

use crate::logging::LogArgs;

/// Args for the inspect command.
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    #[clap(flatten)]
    logging: LogArgs,

    /// The written JSON document.
    #[arg(long)]
    json: String,

    /// The written label archive.
    #[arg(long)]
    labels: String,

    /// Number of sentences to print.
    #[arg(long, default_value = "10")]
    rows: usize,
}

impl InspectArgs {
    /// Run the inspect command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let document = load_document_path(&self.json)?;
        let vocab = document.vocab()?;
        let labels = load_labels_path(&self.labels)?;

        if labels.num_rows() != document.sentences.len() {
            return Err(format!(
                "{} label rows for {} sentences",
                labels.num_rows(),
                document.sentences.len()
            )
            .into());
        }

        println!(
            "{} sentences, vocab size {}, max length {}",
            document.sentences.len(),
            vocab.len(),
            labels.max_length()
        );

        for sent in document.sentences.iter().take(self.rows) {
            let seqz = labels.decode_row(LabelLayout::Seqz, sent.h5_id, &vocab)?;
            let zseq = labels.decode_row(LabelLayout::Zseq, sent.h5_id, &vocab)?;

            println!();
            println!("[{}] sent_id {}", sent.h5_id, sent.sent_id);
            println!("gt:   {}", sent.sent);
            println!("seqz: {}", seqz.join(" "));
            println!("zseq: {}", zseq.join(" "));
            log::debug!(
                "seqz row: {}",
                labels.row(LabelLayout::Seqz, sent.h5_id)?
            );
        }

        Ok(())
    }
}
