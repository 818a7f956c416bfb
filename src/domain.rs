use bit_set::BitSet;

use crate::{Crossword, VariableId, Vocabulary, WordId};

/// The current candidate words for every variable, stored as a set of `WordId`s per variable.
/// Domains start out as the whole vocabulary and only ever shrink.
#[derive(Debug, Clone)]
pub struct DomainStore {
    domains: Vec<BitSet>,
}

impl DomainStore {
    pub fn new(crossword: &Crossword, vocabulary: &Vocabulary) -> DomainStore {
        let full: BitSet = (0..vocabulary.len()).collect();

        DomainStore { domains: vec![full; crossword.variable_count()] }
    }

    pub fn len(&self, variable_id: VariableId) -> usize {
        self.domains[variable_id].len()
    }

    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.domains[variable_id].is_empty()
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.domains[variable_id].contains(word_id)
    }

    /// Remove a word from a domain, returning whether it was present.
    pub fn remove(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        self.domains[variable_id].remove(word_id)
    }

    /// Iterate over a domain in `WordId` order.
    pub fn iter(&self, variable_id: VariableId) -> DomainIter<'_> {
        DomainIter { inner: self.domains[variable_id].iter() }
    }

    /// Is any variable left without candidates?
    pub fn any_empty(&self) -> bool {
        self.domains.iter().any(BitSet::is_empty)
    }
}

/// Iterator over the `WordId`s in one domain.
///
/// `bit_set::Iter` can report an upper size bound smaller than the real element count once bits
/// have been removed, and adapters like `Filter::count` rely on that bound. We only forward
/// `next` so callers get the default, always-correct `(0, None)` hint.
pub struct DomainIter<'a> {
    inner: bit_set::Iter<'a, u32>,
}

impl<'a> Iterator for DomainIter<'a> {
    type Item = WordId;

    fn next(&mut self) -> Option<WordId> {
        self.inner.next()
    }
}
