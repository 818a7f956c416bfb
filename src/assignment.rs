use bit_set::BitSet;
use std::collections::HashMap;

use crate::{Crossword, Variable, VariableId, Vocabulary, WordId};

/// A mapping from some (or all) variables to a chosen word. Each search branch extends its own
/// copy via `with`, so abandoning a branch never touches the assignment it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    words: Vec<Option<WordId>>,
    assigned_count: usize,
}

impl Assignment {
    /// An empty assignment for a crossword with `variable_count` variables.
    pub fn new(variable_count: usize) -> Assignment {
        Assignment { words: vec![None; variable_count], assigned_count: 0 }
    }

    pub fn len(&self) -> usize {
        self.assigned_count
    }

    pub fn is_empty(&self) -> bool {
        self.assigned_count == 0
    }

    /// Does this assignment give a word to every variable?
    pub fn is_complete(&self) -> bool {
        self.assigned_count == self.words.len()
    }

    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.words[variable_id]
    }

    pub fn is_assigned(&self, variable_id: VariableId) -> bool {
        self.words[variable_id].is_some()
    }

    /// A copy of this assignment with one more binding.
    pub fn with(&self, variable_id: VariableId, word_id: WordId) -> Assignment {
        let mut next = self.clone();
        if next.words[variable_id].replace(word_id).is_none() {
            next.assigned_count += 1;
        }
        next
    }

    /// Iterate over `(variable, word)` bindings in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(variable_id, word_id)| word_id.map(|word_id| (variable_id, word_id)))
    }

    /// Check that no word is used twice, every word fits its slot, and every crossing between two
    /// assigned slots agrees. Unassigned slots impose no constraint.
    pub fn is_consistent(&self, crossword: &Crossword, vocabulary: &Vocabulary) -> bool {
        let mut used = BitSet::with_capacity(vocabulary.len());

        for (variable_id, word_id) in self.iter() {
            if !used.insert(word_id) {
                return false;
            }

            let word = vocabulary.word(word_id);
            if word.len() != crossword.variables[variable_id].length {
                return false;
            }

            for &neighbor_id in crossword.neighbors(variable_id) {
                let Some(neighbor_word_id) = self.get(neighbor_id) else {
                    continue;
                };
                let Some(overlap) = crossword.overlap(variable_id, neighbor_id) else {
                    continue;
                };

                let neighbor_word = vocabulary.word(neighbor_word_id);
                if word.glyphs.get(overlap.cell) != neighbor_word.glyphs.get(overlap.other_cell) {
                    return false;
                }
            }
        }

        true
    }

    /// Export the bindings as words keyed by the variables themselves.
    pub fn to_map(&self, crossword: &Crossword, vocabulary: &Vocabulary) -> HashMap<Variable, String> {
        self.iter()
            .map(|(variable_id, word_id)| {
                (crossword.variables[variable_id], vocabulary.word(word_id).string.clone())
            })
            .collect()
    }
}
