//! # Output Records
//!
//! The flat records written to the JSON document, and their assembly from a
//! [`crate::source::RefDataSource`].
pub mod prepro_document;
pub mod record_assembler;
pub mod record_types;

#[doc(inline)]
pub use prepro_document::{PreproDocument, load_document_path, save_document_path};
#[doc(inline)]
pub use record_assembler::{AssembledRecords, assemble_records};
#[doc(inline)]
pub use record_types::{AnnRecord, ImageRecord, RefRecord, SentenceRecord};
