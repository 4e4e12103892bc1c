//! # `refprep` Referring-Expression Preprocessing
//!
//! Turns a REFER-style referring-expression dataset (`refcoco`, `refcoco+`,
//! `refcocog`, `refclef`, `refgta`) into the two artifacts a trainer consumes:
//!
//! * a JSON document of flat `refs` / `images` / `anns` / `sentences`
//!   records plus the vocabulary tables;
//! * an `.npz` archive of two `u32` label matrices, `seqz_labels`
//!   (zero-padded at the end) and `zseq_labels` (zero-padded at the front).
//!
//! Rows of the label matrices line up with the `h5_id` of the sentence
//! records.
//!
//! See:
//! * [`source`] to load or assemble a dataset.
//! * [`vocab`] to build the thresholded vocabulary.
//! * [`records`] for the document records and JSON IO.
//! * [`encoding`] to encode and store label matrices.
//! * [`pipeline`] to run everything end to end.
//!
//! ```rust,ignore
//! use refprep::{PreproOptions, PreproPipeline};
//!
//! let options = PreproOptions::new("refcoco", "unc")
//!     .with_data_root("~/data/refer")
//!     .with_save_dir("~/cache");
//!
//! let summary = PreproPipeline::new(options).run()?;
//! println!("{}", summary.labels_path.display());
//! ```
#![warn(missing_docs, unused)]

pub mod config;
pub mod encoding;
pub mod errors;
pub mod pipeline;
pub mod records;
pub mod sentence_lengths;
pub mod source;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use config::PreproOptions;
#[doc(inline)]
pub use errors::{PreproError, PreproResult};
#[doc(inline)]
pub use pipeline::{PreproPipeline, PreproSummary};
