//! Heuristics for deciding which slot to fill next and which words to try first.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::grid::Overlap;
use crate::{Assignment, Crossword, DomainStore, VariableId, Vocabulary, WordId};

/// Choose the unassigned variable with the fewest remaining candidates, preferring the one with
/// the most crossings on a tie. Any remaining tie goes to the lowest id. Returns `None` when every
/// variable is assigned.
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &DomainStore,
    assignment: &Assignment,
) -> Option<VariableId> {
    (0..crossword.variable_count())
        .filter(|&variable_id| !assignment.is_assigned(variable_id))
        .min_by_key(|&variable_id| {
            (domains.len(variable_id), Reverse(crossword.neighbors(variable_id).len()))
        })
}

/// Return the candidates for `variable_id` ordered by how many options they would rule out of
/// unassigned crossing slots, fewest first. Ties keep `WordId` order.
///
/// This only counts letter clashes; it doesn't account for words already used elsewhere in the
/// assignment. The consistency check during search is what guarantees correctness.
pub fn order_domain_values(
    crossword: &Crossword,
    vocabulary: &Vocabulary,
    domains: &DomainStore,
    assignment: &Assignment,
    variable_id: VariableId,
) -> Vec<WordId> {
    // For each unassigned crossing, count how many of its candidates put each letter in the shared
    // cell. A word then rules out everything in that crossing except the matching count.
    let open_crossings: Vec<(Overlap, usize, HashMap<char, usize>)> = crossword
        .neighbors(variable_id)
        .iter()
        .filter(|&&neighbor_id| !assignment.is_assigned(neighbor_id))
        .filter_map(|&neighbor_id| {
            let overlap = crossword.overlap(variable_id, neighbor_id)?;

            let mut glyph_counts: HashMap<char, usize> = HashMap::new();
            for neighbor_word_id in domains.iter(neighbor_id) {
                let glyphs = &vocabulary.word(neighbor_word_id).glyphs;
                if let Some(&glyph) = glyphs.get(overlap.other_cell) {
                    *glyph_counts.entry(glyph).or_insert(0) += 1;
                }
            }

            Some((overlap, domains.len(neighbor_id), glyph_counts))
        })
        .collect();

    let mut options: Vec<WordId> = domains.iter(variable_id).collect();

    options.sort_by_cached_key(|&word_id| {
        let glyphs = &vocabulary.word(word_id).glyphs;

        open_crossings
            .iter()
            .map(|(overlap, option_count, glyph_counts)| {
                let matching = glyphs
                    .get(overlap.cell)
                    .and_then(|glyph| glyph_counts.get(glyph))
                    .copied()
                    .unwrap_or(0);

                option_count - matching
            })
            .sum::<usize>()
    });

    options
}

#[cfg(test)]
mod tests {
    use crate::order::{order_domain_values, select_unassigned_variable};
    use crate::{Assignment, Crossword, Direction, DomainStore, Variable, Vocabulary};

    #[test]
    fn test_select_prefers_fewest_remaining_values() {
        let crossword = Crossword::from_variables(vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(2, 0, Direction::Across, 3),
        ]);
        let vocabulary = Vocabulary::new(["cat", "dog", "cow"]);
        let mut domains = DomainStore::new(&crossword, &vocabulary);
        domains.remove(1, 0);

        let assignment = Assignment::new(2);
        assert_eq!(select_unassigned_variable(&crossword, &domains, &assignment), Some(1));

        let assignment = assignment.with(1, 1);
        assert_eq!(select_unassigned_variable(&crossword, &domains, &assignment), Some(0));

        let assignment = assignment.with(0, 0);
        assert_eq!(select_unassigned_variable(&crossword, &domains, &assignment), None);
    }

    #[test]
    fn test_select_breaks_ties_by_degree() {
        // The down slot crosses both across slots; each across slot crosses only the down slot.
        let crossword = Crossword::from_variables(vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(2, 0, Direction::Across, 3),
            Variable::new(0, 1, Direction::Down, 3),
        ]);
        let vocabulary = Vocabulary::new(["cat", "dog"]);
        let domains = DomainStore::new(&crossword, &vocabulary);

        assert_eq!(
            select_unassigned_variable(&crossword, &domains, &Assignment::new(3)),
            Some(2),
        );
    }

    #[test]
    fn test_least_constraining_value_comes_first() {
        let crossword = Crossword::from_variables(vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(0, 1, Direction::Down, 3),
        ]);
        // Across middle letters: O, A. Down first letters: C, A, O, A.
        let vocabulary = Vocabulary::new(["dog", "cat", "ape", "oak", "axe"]);
        let mut domains = DomainStore::new(&crossword, &vocabulary);
        domains.remove(0, 2);
        domains.remove(0, 3);
        domains.remove(0, 4);
        domains.remove(1, 0);

        let ordered = order_domain_values(&crossword, &vocabulary, &domains, &Assignment::new(2), 0);
        assert_eq!(ordered, vec![1, 0]);

        // Once the crossing is assigned it no longer counts, so the words keep their id order.
        let assigned = Assignment::new(2).with(1, 2);
        let ordered = order_domain_values(&crossword, &vocabulary, &domains, &assigned, 0);
        assert_eq!(ordered, vec![0, 1]);
    }
}
