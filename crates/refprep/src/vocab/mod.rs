//! # Vocabulary
//!
//! This module provides the word vocabulary and its builder.
//!
//! * [`VocabBuilder`] counts words across every sentence, keeps words
//!   occurring strictly more than the threshold, and rewrites the rest as
//!   [`UNK_TOKEN`].
//! * [`WordVocab`] is the resulting ``{ word <-> index }`` mapping;
//!   indices start at 1, and 0 is reserved as padding.
pub mod vocab_builder;
pub mod word_vocab;

#[doc(inline)]
pub use vocab_builder::{BuiltVocab, VocabBuilder, VocabBuilderOptions, VocabStats};
#[doc(inline)]
pub use word_vocab::{UNK_TOKEN, WordVocab};
