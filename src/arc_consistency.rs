//! Constraint propagation run before the search starts. Node consistency removes candidates of the
//! wrong length; AC-3 then removes candidates that no word in a crossing slot can agree with,
//! repeating until every remaining candidate has support in every crossing.

use log::debug;
use std::collections::{HashSet, VecDeque};

use crate::{Crossword, DomainStore, VariableId, Vocabulary, WordId};

/// Remove every candidate whose length differs from its slot's length. Returns the number of
/// candidates removed.
pub fn enforce_node_consistency(
    crossword: &Crossword,
    vocabulary: &Vocabulary,
    domains: &mut DomainStore,
) -> usize {
    let mut eliminations = 0;

    for (variable_id, variable) in crossword.variables.iter().enumerate() {
        let mismatched: Vec<WordId> = domains
            .iter(variable_id)
            .filter(|&word_id| vocabulary.word(word_id).len() != variable.length)
            .collect();

        for word_id in mismatched {
            domains.remove(variable_id, word_id);
            eliminations += 1;
        }
    }

    debug!("node consistency removed {} candidates", eliminations);

    eliminations
}

/// Make `x` arc-consistent with `y` by removing every candidate for `x` that no candidate for `y`
/// agrees with at their shared cell. Returns whether anything was removed.
pub fn revise(
    crossword: &Crossword,
    vocabulary: &Vocabulary,
    domains: &mut DomainStore,
    x: VariableId,
    y: VariableId,
) -> bool {
    let Some(overlap) = crossword.overlap(x, y) else {
        return false;
    };

    // A candidate for `x` is supported iff some candidate for `y` puts the same letter in the
    // shared cell.
    let supported_glyphs: HashSet<char> = domains
        .iter(y)
        .filter_map(|word_id| vocabulary.word(word_id).glyphs.get(overlap.other_cell).copied())
        .collect();

    let unsupported: Vec<WordId> = domains
        .iter(x)
        .filter(|&word_id| {
            vocabulary
                .word(word_id)
                .glyphs
                .get(overlap.cell)
                .map_or(true, |glyph| !supported_glyphs.contains(glyph))
        })
        .collect();

    for &word_id in &unsupported {
        domains.remove(x, word_id);
    }

    if !unsupported.is_empty() {
        debug!(
            "revised {:?} against {:?}: removed {} candidates, {} remain",
            crossword.variables[x],
            crossword.variables[y],
            unsupported.len(),
            domains.len(x),
        );
    }

    !unsupported.is_empty()
}

/// Data structure used in `ac3` to track which arcs we still need to revise. An arc that is
/// already waiting is never queued a second time.
#[derive(Debug, Default)]
struct ArcQueue {
    queue: VecDeque<(VariableId, VariableId)>,
    queued: HashSet<(VariableId, VariableId)>,
}

impl ArcQueue {
    fn enqueue(&mut self, arc: (VariableId, VariableId)) {
        if self.queued.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    fn pop_front(&mut self) -> Option<(VariableId, VariableId)> {
        let arc = self.queue.pop_front()?;
        self.queued.remove(&arc);
        Some(arc)
    }
}

/// Results from a call to `ac3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencySuccess {
    pub eliminations: usize,
}

/// The variable whose domain was wiped out. This means the puzzle has no solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub variable_id: VariableId,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// Enforce arc consistency using AC-3. If `arcs` is `None`, start from every ordered pair of
/// distinct variables; otherwise start from the given arcs only.
pub fn ac3(
    crossword: &Crossword,
    vocabulary: &Vocabulary,
    domains: &mut DomainStore,
    arcs: Option<&[(VariableId, VariableId)]>,
) -> ArcConsistencyResult {
    let variable_count = crossword.variable_count();
    let mut queue = ArcQueue::default();

    match arcs {
        Some(arcs) => arcs.iter().for_each(|&arc| queue.enqueue(arc)),
        None => {
            for x in 0..variable_count {
                for y in (0..variable_count).filter(|&y| y != x) {
                    queue.enqueue((x, y));
                }
            }
        }
    }

    let mut eliminations = 0;

    while let Some((x, y)) = queue.pop_front() {
        let before = domains.len(x);

        if !revise(crossword, vocabulary, domains, x, y) {
            continue;
        }
        eliminations += before - domains.len(x);

        if domains.is_empty(x) {
            debug!("arc consistency wiped out {:?}", crossword.variables[x]);
            return Err(ArcConsistencyFailure { variable_id: x });
        }

        // Shrinking `x` may have removed the only support some neighbor had.
        for &z in crossword.neighbors(x) {
            if z != y {
                queue.enqueue((z, x));
            }
        }
    }

    Ok(ArcConsistencySuccess { eliminations })
}
