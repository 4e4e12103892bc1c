//! # Word ``{ String <-> T }`` Vocabulary

use indexmap::IndexMap;

use crate::errors::{PreproError, PreproResult};
use crate::types::TokenType;

/// The reserved out-of-vocabulary marker.
pub const UNK_TOKEN: &str = "UNK";

/// Bidirectional word / index vocabulary.
///
/// The word at position `i` has index `i + 1`; index `0` is the padding
/// and end marker and never maps to a word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVocab<T: TokenType> {
    words: Vec<String>,
    word_to_ix: IndexMap<String, T>,
}

impl<T: TokenType> Default for WordVocab<T> {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            word_to_ix: IndexMap::new(),
        }
    }
}

impl<T: TokenType> WordVocab<T> {
    /// Build a vocabulary from an ordered word list.
    ///
    /// ## Arguments
    /// * `words` - the words, in index order.
    ///
    /// ## Returns
    /// The vocabulary, or an error on duplicate words or index overflow.
    pub fn from_words<I, S>(words: I) -> PreproResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Self::default();
        for word in words {
            vocab.push(word.into())?;
        }
        Ok(vocab)
    }

    /// Rebuild a vocabulary from an ``{ index -> word }`` table.
    ///
    /// The indices must be exactly `1..=n`, in any order.
    pub fn from_index_map(ix_to_word: &IndexMap<T, String>) -> PreproResult<Self> {
        let mut entries: Vec<(T, &String)> = ix_to_word.iter().map(|(&ix, w)| (ix, w)).collect();
        entries.sort_by_key(|&(ix, _)| ix);

        for (pos, &(ix, _)) in entries.iter().enumerate() {
            if ix.to_usize() != Some(pos + 1) {
                return Err(PreproError::VocabConflict(format!(
                    "ix_to_word is not contiguous from 1: found index {ix} at position {}",
                    pos + 1
                )));
            }
        }

        Self::from_words(entries.into_iter().map(|(_, w)| w.clone()))
    }

    fn push(
        &mut self,
        word: String,
    ) -> PreproResult<T> {
        if self.word_to_ix.contains_key(&word) {
            return Err(PreproError::VocabConflict(format!(
                "duplicate vocabulary word {word:?}"
            )));
        }

        let size = self.words.len() + 1;
        let ix = T::from_usize(size).ok_or(PreproError::VocabSizeOverflow { size })?;

        self.word_to_ix.insert(word.clone(), ix);
        self.words.push(word);
        Ok(ix)
    }

    /// The number of words; padding is not counted.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the vocabulary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words, in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Does the vocabulary contain [`UNK_TOKEN`]?
    pub fn has_unk(&self) -> bool {
        self.word_to_ix.contains_key(UNK_TOKEN)
    }

    /// Look up the index of a word.
    pub fn word_index(
        &self,
        word: &str,
    ) -> Option<T> {
        self.word_to_ix.get(word).copied()
    }

    /// Look up the word for an index; `0` and out-of-range indices are `None`.
    pub fn word(
        &self,
        ix: T,
    ) -> Option<&str> {
        let pos = ix.to_usize()?.checked_sub(1)?;
        self.words.get(pos).map(String::as_str)
    }

    /// The ``{ word -> index }`` table.
    pub fn word_to_ix(&self) -> &IndexMap<String, T> {
        &self.word_to_ix
    }

    /// Build the ``{ index -> word }`` table.
    pub fn ix_to_word(&self) -> IndexMap<T, String> {
        self.word_to_ix
            .iter()
            .map(|(word, &ix)| (ix, word.clone()))
            .collect()
    }

    /// Map a token list through the vocabulary.
    pub fn encode_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> PreproResult<Vec<T>> {
        tokens
            .iter()
            .map(|w| {
                let w = w.as_ref();
                self.word_index(w).ok_or_else(|| PreproError::UnknownWord {
                    word: w.to_string(),
                })
            })
            .collect()
    }
}
