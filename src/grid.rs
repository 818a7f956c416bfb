//! The static geometry of a puzzle: which cells are fillable, which slots (variables) they form,
//! and where those slots cross each other.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::Path;

use crate::{CrosswordError, GridCoord, VariableId, MAX_SLOT_LENGTH};

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A slot to be filled with a single word. Two variables with the same position, length, and
/// direction are the same variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable { row, col, direction, length }
    }

    /// Generate the coords for each cell of this slot.
    pub fn cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.length).map(move |cell_idx| match self.direction {
            Direction::Across => (self.row, self.col + cell_idx),
            Direction::Down => (self.row + cell_idx, self.col),
        })
    }
}

/// The overlap between an ordered pair of variables: the letter at `cell` in the first must equal
/// the letter at `other_cell` in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub cell: usize,
    pub other_cell: usize,
}

/// A struct representing everything about a puzzle that stays fixed while it's being filled.
pub struct Crossword {
    pub height: usize,
    pub width: usize,

    /// `structure[row][col]` is true for fillable cells.
    pub structure: Vec<Vec<bool>>,

    pub variables: Vec<Variable>,

    overlaps: HashMap<(VariableId, VariableId), Overlap>,
    neighbors: Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>>,
}

impl Debug for Crossword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crossword")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("variables", &self.variables)
            .field("overlaps", &format!("({} entries)", self.overlaps.len()))
            .finish()
    }
}

impl Crossword {
    /// Build a crossword from a structure description, with `_` representing fillable cells and
    /// anything else representing blocks. Rows shorter than the widest row are padded with blocks.
    pub fn from_structure_str(structure: &str) -> Crossword {
        let rows: Vec<Vec<bool>> = structure
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().map(|c| c == '_').collect())
            .collect();

        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let structure: Vec<Vec<bool>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        let mut variables: Vec<Variable> = vec![];

        for row in 0..height {
            for col in 0..width {
                if !structure[row][col] {
                    continue;
                }

                if col == 0 || !structure[row][col - 1] {
                    let length = (col..width).take_while(|&c| structure[row][c]).count();
                    if length > 1 {
                        variables.push(Variable::new(row, col, Direction::Across, length));
                    }
                }

                if row == 0 || !structure[row - 1][col] {
                    let length = (row..height).take_while(|&r| structure[r][col]).count();
                    if length > 1 {
                        variables.push(Variable::new(row, col, Direction::Down, length));
                    }
                }
            }
        }

        Crossword::with_structure(height, width, structure, variables)
    }

    /// Build a crossword from a list of slots, treating every cell they cover as fillable.
    pub fn from_variables(variables: Vec<Variable>) -> Crossword {
        let height = variables
            .iter()
            .flat_map(|variable| variable.cells())
            .map(|(row, _)| row + 1)
            .max()
            .unwrap_or(0);
        let width = variables
            .iter()
            .flat_map(|variable| variable.cells())
            .map(|(_, col)| col + 1)
            .max()
            .unwrap_or(0);

        let mut structure = vec![vec![false; width]; height];
        for (row, col) in variables.iter().flat_map(|variable| variable.cells()) {
            structure[row][col] = true;
        }

        Crossword::with_structure(height, width, structure, variables)
    }

    /// Read a structure file from disk.
    pub fn load(path: &Path) -> Result<Crossword, CrosswordError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| CrosswordError::Io { path: path.to_path_buf(), source })?;

        Ok(Crossword::from_structure_str(&contents))
    }

    fn with_structure(
        height: usize,
        width: usize,
        structure: Vec<Vec<bool>>,
        variables: Vec<Variable>,
    ) -> Crossword {
        // Build a map from cell location to the slots passing through it, which we can then use to
        // calculate overlaps.
        let mut slots_by_cell: HashMap<GridCoord, Vec<(VariableId, usize)>> = HashMap::new();
        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, loc) in variable.cells().enumerate() {
                slots_by_cell.entry(loc).or_default().push((variable_id, cell_idx));
            }
        }

        let mut overlaps: HashMap<(VariableId, VariableId), Overlap> = HashMap::new();
        let mut cells: Vec<_> = slots_by_cell.into_iter().collect();
        cells.sort_unstable_by_key(|&(loc, _)| loc);

        for (_, entries) in cells {
            for &(x, x_cell) in &entries {
                for &(y, y_cell) in &entries {
                    if x != y {
                        // Slots sharing more than one cell are malformed; keep the first cell.
                        overlaps.entry((x, y)).or_insert(Overlap { cell: x_cell, other_cell: y_cell });
                    }
                }
            }
        }

        let neighbors: Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>> = (0..variables.len())
            .map(|x| {
                (0..variables.len())
                    .filter(|&y| overlaps.contains_key(&(x, y)))
                    .collect()
            })
            .collect();

        Crossword { height, width, structure, variables, overlaps, neighbors }
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Look up the id of a variable by value.
    pub fn variable_id(&self, variable: &Variable) -> Option<VariableId> {
        self.variables.iter().position(|v| v == variable)
    }

    /// The overlap between `x` and `y`, if they cross.
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// All variables crossing `x`, in id order.
    pub fn neighbors(&self, x: VariableId) -> &[VariableId] {
        &self.neighbors[x]
    }
}
