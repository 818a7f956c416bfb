//! Fill a crossword grid from a vocabulary by treating it as a constraint satisfaction problem:
//! node consistency and AC-3 prune each slot's candidate words up front, and a backtracking
//! search guided by the MRV/degree and least-constraining-value heuristics finds a complete fill.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub mod arc_consistency;
pub mod assignment;
pub mod backtracking_search;
pub mod domain;
pub mod grid;
pub mod order;
pub mod render;
pub mod vocabulary;

pub use assignment::Assignment;
pub use backtracking_search::{FillConfig, FillFailure, FillSuccess, Solver, Statistics};
pub use domain::DomainStore;
pub use grid::{Crossword, Direction, Variable};
pub use render::{letter_grid, render_grid};
pub use vocabulary::{Vocabulary, Word};

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// An identifier for a given slot, based on its index in the Crossword's `variables` field.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the Vocabulary's `words` field.
pub type WordId = usize;

/// Zero-indexed (row, column) coords for a cell in the grid, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// Errors raised while loading a puzzle. Failing to find a fill is not an error; see
/// `FillFailure`.
#[derive(Debug)]
pub enum CrosswordError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CrosswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrosswordError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CrosswordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrosswordError::Io { source, .. } => Some(source),
        }
    }
}
