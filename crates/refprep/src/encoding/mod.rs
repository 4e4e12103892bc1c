//! # Label Encoding
//!
//! Sentence records to fixed-width index matrices, and the archive they are
//! stored in.
pub mod label_encoder;
pub mod label_io;
pub mod max_length;

#[doc(inline)]
pub use label_encoder::{
    EncodedLabels, LabelEncoder, LabelEncoderOptions, LabelLayout, TruncationStats,
};
#[doc(inline)]
pub use label_io::{SEQZ_LABELS, ZSEQ_LABELS, load_labels_path, save_labels_path};
#[doc(inline)]
pub use max_length::{DEFAULT_MAX_LENGTHS, MaxLengthTable};
