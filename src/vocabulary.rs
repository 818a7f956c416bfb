use smallvec::SmallVec;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::{CrosswordError, WordId, MAX_SLOT_LENGTH};

/// A struct representing a word that can be chosen for a given slot.
#[derive(Debug, Clone)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let glyphs = string.chars().collect();
        Word { string, glyphs }
    }

    /// Length in letters, which is what slot lengths are compared against.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// The full set of candidate words, upper-cased and deduplicated. A word's `WordId` is its position
/// in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub words: Vec<Word>,
}

impl Vocabulary {
    pub fn new<I, S>(words: I) -> Vocabulary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut vocabulary = Vocabulary::default();

        for word in words {
            let word = word.as_ref().trim().to_uppercase();
            if word.is_empty() || seen.contains(&word) {
                continue;
            }
            seen.insert(word.clone());
            vocabulary.words.push(Word::new(word));
        }

        vocabulary
    }

    /// Parse a word list with one word per line.
    pub fn from_word_list(contents: &str) -> Vocabulary {
        Vocabulary::new(contents.lines())
    }

    /// Read a word list file from disk.
    pub fn load(path: &Path) -> Result<Vocabulary, CrosswordError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| CrosswordError::Io { path: path.to_path_buf(), source })?;

        Ok(Vocabulary::from_word_list(&contents))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    pub fn word_id(&self, string: &str) -> Option<WordId> {
        let string = string.to_uppercase();
        self.words.iter().position(|word| word.string == string)
    }
}
