//! Filling a grid: node consistency and a global AC-3 pass shrink every slot's candidates, then a
//! depth-first backtracking search picks words one slot at a time, ordered by the heuristics in
//! `order`, and never extends an inconsistent partial assignment.

use instant::{Duration, Instant};
use log::{debug, info, trace};

use crate::arc_consistency::{self, ArcConsistencyFailure, ArcConsistencyResult};
use crate::order::{order_domain_values, select_unassigned_variable};
use crate::{Assignment, Crossword, DomainStore, VariableId, Vocabulary};

/// Settings for a fill attempt.
#[derive(Debug, Clone, Default)]
pub struct FillConfig {
    /// Give up once the search has visited this many states. `None` searches exhaustively.
    pub max_states: Option<u64>,
}

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: u64,
    pub backtracks: u64,
    pub node_consistency_eliminations: usize,
    pub arc_consistency_eliminations: usize,
    pub duration: Duration,
}

/// A struct representing the results of a fill operation.
#[derive(Debug)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillFailure {
    /// The grid can't be filled from this vocabulary, either because propagation emptied a slot's
    /// candidates or because the search exhausted every option.
    NoSolution,

    /// The search hit `FillConfig::max_states` before reaching an answer.
    StateLimitExceeded,
}

/// Owns the candidate words for each slot of one crossword and fills it.
#[derive(Debug)]
pub struct Solver<'a> {
    crossword: &'a Crossword,
    vocabulary: &'a Vocabulary,
    domains: DomainStore,
    config: FillConfig,
    statistics: Statistics,
}

impl<'a> Solver<'a> {
    pub fn new(crossword: &'a Crossword, vocabulary: &'a Vocabulary) -> Solver<'a> {
        Solver::with_config(crossword, vocabulary, FillConfig::default())
    }

    pub fn with_config(
        crossword: &'a Crossword,
        vocabulary: &'a Vocabulary,
        config: FillConfig,
    ) -> Solver<'a> {
        Solver {
            crossword,
            vocabulary,
            domains: DomainStore::new(crossword, vocabulary),
            config,
            statistics: Statistics::default(),
        }
    }

    pub fn domains(&self) -> &DomainStore {
        &self.domains
    }

    /// Statistics from the most recent call to `solve`.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn enforce_node_consistency(&mut self) -> usize {
        arc_consistency::enforce_node_consistency(self.crossword, self.vocabulary, &mut self.domains)
    }

    pub fn revise(&mut self, x: VariableId, y: VariableId) -> bool {
        arc_consistency::revise(self.crossword, self.vocabulary, &mut self.domains, x, y)
    }

    pub fn ac3(&mut self, arcs: Option<&[(VariableId, VariableId)]>) -> ArcConsistencyResult {
        arc_consistency::ac3(self.crossword, self.vocabulary, &mut self.domains, arcs)
    }

    /// Enforce node and arc consistency, then search for a complete fill.
    pub fn solve(&mut self) -> Result<FillSuccess, FillFailure> {
        let start = Instant::now();
        let mut statistics = Statistics::default();

        info!(
            "filling {} slots from {} words",
            self.crossword.variable_count(),
            self.vocabulary.len(),
        );

        let result = self.propagate_and_search(&mut statistics);

        statistics.duration = start.elapsed();
        self.statistics = statistics.clone();

        match &result {
            Ok(_) => info!("found a fill: {:?}", statistics),
            Err(failure) => info!("no fill found ({:?}): {:?}", failure, statistics),
        }

        result.map(|assignment| FillSuccess { statistics, assignment })
    }

    fn propagate_and_search(&mut self, statistics: &mut Statistics) -> Result<Assignment, FillFailure> {
        statistics.node_consistency_eliminations = self.enforce_node_consistency();

        // A slot with no word of the right length can't be filled no matter what crosses it.
        if self.domains.any_empty() {
            debug!("node consistency left a slot without candidates");
            return Err(FillFailure::NoSolution);
        }

        match self.ac3(None) {
            Ok(success) => statistics.arc_consistency_eliminations = success.eliminations,
            Err(ArcConsistencyFailure { variable_id }) => {
                debug!(
                    "arc consistency left {:?} without candidates",
                    self.crossword.variables[variable_id],
                );
                return Err(FillFailure::NoSolution);
            }
        }

        self.backtrack(Assignment::new(self.crossword.variable_count()), statistics)
    }

    /// Extend `assignment` one slot at a time until it's complete. Each trial binding is made on
    /// a fresh copy, so a failed branch leaves `assignment` as it was.
    fn backtrack(
        &self,
        assignment: Assignment,
        statistics: &mut Statistics,
    ) -> Result<Assignment, FillFailure> {
        statistics.states += 1;
        if self.config.max_states.map_or(false, |max_states| statistics.states > max_states) {
            return Err(FillFailure::StateLimitExceeded);
        }

        let Some(variable_id) =
            select_unassigned_variable(self.crossword, &self.domains, &assignment)
        else {
            return Ok(assignment);
        };

        trace!(
            "state {}: {} of {} slots filled, trying {:?}",
            statistics.states,
            assignment.len(),
            self.crossword.variable_count(),
            self.crossword.variables[variable_id],
        );

        for word_id in order_domain_values(
            self.crossword,
            self.vocabulary,
            &self.domains,
            &assignment,
            variable_id,
        ) {
            let trial = assignment.with(variable_id, word_id);
            if !trial.is_consistent(self.crossword, self.vocabulary) {
                continue;
            }

            match self.backtrack(trial, statistics) {
                Ok(complete) => return Ok(complete),
                Err(FillFailure::NoSolution) => statistics.backtracks += 1,
                Err(failure) => return Err(failure),
            }
        }

        Err(FillFailure::NoSolution)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Crossword, Direction, FillConfig, FillFailure, Solver, Variable, Vocabulary,
    };

    fn assert_valid_fill(crossword: &Crossword, vocabulary: &Vocabulary, solver: &mut Solver) {
        let result = solver.solve().expect("Failed to find a fill");

        assert!(result.assignment.is_complete());
        assert!(result.assignment.is_consistent(crossword, vocabulary));

        let map = result.assignment.to_map(crossword, vocabulary);
        assert_eq!(map.len(), crossword.variable_count());
        for (variable, word) in &map {
            assert_eq!(word.chars().count(), variable.length);
        }
    }

    #[test]
    fn test_single_slot_takes_either_word() {
        let crossword = Crossword::from_variables(vec![Variable::new(0, 0, Direction::Across, 3)]);
        let vocabulary = Vocabulary::new(["cat", "dog"]);

        let result = Solver::new(&crossword, &vocabulary).solve().expect("Failed to find a fill");

        let map = result.assignment.to_map(&crossword, &vocabulary);
        let word = &map[&crossword.variables[0]];
        assert!(word == "CAT" || word == "DOG");
    }

    #[test]
    fn test_crossing_pair_fills_uniquely() {
        let x = Variable::new(0, 0, Direction::Across, 3);
        let y = Variable::new(0, 1, Direction::Down, 3);
        let crossword = Crossword::from_variables(vec![x, y]);
        let vocabulary = Vocabulary::new(["cat", "ace"]);

        let result = Solver::new(&crossword, &vocabulary).solve().expect("Failed to find a fill");

        let map = result.assignment.to_map(&crossword, &vocabulary);
        assert_eq!(map[&x], "CAT");
        assert_eq!(map[&y], "ACE");
    }

    #[test]
    fn test_duplicate_words_are_rejected() {
        let crossword = Crossword::from_variables(vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(2, 0, Direction::Across, 3),
        ]);
        let vocabulary = Vocabulary::new(["cat", "horse", "fish"]);

        let mut solver = Solver::new(&crossword, &vocabulary);

        assert_eq!(solver.solve().err(), Some(FillFailure::NoSolution));
        assert!(solver.statistics().states > 0, "the clash is only found by searching");
    }

    #[test]
    fn test_wrong_lengths_fail_before_searching() {
        let crossword = Crossword::from_variables(vec![Variable::new(0, 0, Direction::Across, 4)]);
        let vocabulary = Vocabulary::new(["cat", "horse"]);

        let mut solver = Solver::new(&crossword, &vocabulary);

        assert_eq!(solver.solve().err(), Some(FillFailure::NoSolution));
        assert_eq!(solver.statistics().states, 0);
        assert_eq!(solver.statistics().node_consistency_eliminations, 2);
    }

    #[test]
    fn test_arc_consistency_failure_skips_search() {
        let crossword = Crossword::from_variables(vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(0, 1, Direction::Down, 3),
        ]);
        let vocabulary = Vocabulary::new(["cat", "dog"]);

        let mut solver = Solver::new(&crossword, &vocabulary);

        assert_eq!(solver.solve().err(), Some(FillFailure::NoSolution));
        assert_eq!(solver.statistics().states, 0);
    }

    #[test]
    fn test_search_backtracks_past_dead_ends() {
        // Three stacked across slots crossed by three down slots: a 3x3 word square, where the
        // same word can't appear twice.
        let crossword = Crossword::from_structure_str("___\n___\n___");
        let vocabulary = Vocabulary::new(
            "cab ado bed cob add bee aid ode bad abe dab obe ace are ear era eel ewe awe owe woe \
             tot top pot opt toe oat tea eat ate sat sea set ten net ant tan nit tin pit tip apt \
             pat tap spa sap asp"
                .split_whitespace(),
        );

        let mut solver = Solver::new(&crossword, &vocabulary);
        assert_valid_fill(&crossword, &vocabulary, &mut solver);
    }

    /// ___
    /// _#_
    /// ___
    #[test]
    fn test_find_fill_for_ring_with_pruned_crossings() {
        let crossword = Crossword::from_structure_str("___\n_#_\n___");
        let vocabulary = Vocabulary::new(
            ["cat", "cob", "tot", "bat", "dog", "ten", "car", "box", "arc"],
        );

        let mut solver = Solver::new(&crossword, &vocabulary);
        assert_valid_fill(&crossword, &vocabulary, &mut solver);

        // CAR can't go across the top: no word starts with R to cross its last letter.
        assert!(solver.statistics().arc_consistency_eliminations > 0);
    }

    #[test]
    fn test_state_limit_aborts_search() {
        let crossword = Crossword::from_variables(vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(2, 0, Direction::Across, 3),
            Variable::new(4, 0, Direction::Across, 3),
        ]);
        let vocabulary = Vocabulary::new(["cat", "dog"]);

        let config = FillConfig { max_states: Some(2) };
        let mut solver = Solver::with_config(&crossword, &vocabulary, config);

        assert_eq!(solver.solve().err(), Some(FillFailure::StateLimitExceeded));

        // Without the limit the same puzzle is provably unsolvable.
        let mut solver = Solver::new(&crossword, &vocabulary);
        assert_eq!(solver.solve().err(), Some(FillFailure::NoSolution));
    }

    #[test]
    fn test_solve_leaves_domains_arc_consistent() {
        let crossword = Crossword::from_structure_str("#___#\n#_##_\n#_##_\n#_##_\n#____\n");
        let vocabulary = Vocabulary::new([
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        ]);

        let mut solver = Solver::new(&crossword, &vocabulary);
        assert_valid_fill(&crossword, &vocabulary, &mut solver);

        let after_solve: Vec<usize> =
            (0..crossword.variable_count()).map(|v| solver.domains().len(v)).collect();

        let rerun = solver.ac3(None).expect("still consistent");
        assert_eq!(rerun.eliminations, 0);
        for x in 0..crossword.variable_count() {
            for y in 0..crossword.variable_count() {
                assert!(!solver.revise(x, y));
            }
        }
        assert_eq!(
            after_solve,
            (0..crossword.variable_count()).map(|v| solver.domains().len(v)).collect::<Vec<_>>(),
        );
    }
}
