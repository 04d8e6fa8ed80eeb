//! Grid model and derived constraint queries.
//!
//! A `Grid` is an immutable snapshot: solving never mutates a grid in
//! place, it derives a new one with [`Grid::with_value`]. Branches of
//! the search therefore never alias each other's state, and abandoning
//! a branch is just dropping its `Grid`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the grid (and the number of values, 1..=GRID_SIZE).
pub const GRID_SIZE: usize = 9;
/// Side length of one box.
pub const BOX_SIZE: usize = 3;
/// Boxes per side of the grid.
pub const BOXES_PER_SIDE: usize = GRID_SIZE / BOX_SIZE;

/// A (row, column) cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

const FULL_MASK: u16 = (1 << GRID_SIZE) - 1;

/// Set of candidate values 1..=9, stored as a u16 bitmask (bit v-1 = value v).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateSet(u16);

impl CandidateSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// The full set {1..=9}.
    pub fn full() -> Self {
        Self(FULL_MASK)
    }

    /// Add a value to the set. Values outside 1..=9 are ignored.
    pub fn insert(&mut self, value: u8) {
        if (1..=GRID_SIZE as u8).contains(&value) {
            self.0 |= 1 << (value - 1);
        }
    }

    /// Remove a value from the set. Values outside 1..=9 are ignored.
    pub fn remove(&mut self, value: u8) {
        if (1..=GRID_SIZE as u8).contains(&value) {
            self.0 &= !(1 << (value - 1));
        }
    }

    /// Whether the set contains `value`.
    pub fn contains(&self, value: u8) -> bool {
        (1..=GRID_SIZE as u8).contains(&value) && self.0 & (1 << (value - 1)) != 0
    }

    /// Number of values in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Set intersection.
    pub fn intersect(self, other: CandidateSet) -> CandidateSet {
        CandidateSet(self.0 & other.0)
    }

    /// Iterate the values in ascending order.
    ///
    /// Ascending order is load-bearing: the solver tries branch
    /// candidates in exactly this order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=GRID_SIZE as u8).filter(move |&v| self.contains(v))
    }

    /// The smallest value in the set, if any.
    pub fn smallest(self) -> Option<u8> {
        self.iter().next()
    }
}

/// A 9x9 Sudoku grid. Cell values are 0..=9, 0 meaning empty.
///
/// The grid carries an opaque `name` (typically the source file name)
/// used only for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    name: String,
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Build a grid from a list of filled cells; unspecified cells are 0.
    ///
    /// No conflict validation happens here: duplicate values in a row,
    /// column, or box are accepted silently. Out-of-range positions and
    /// values are skipped.
    pub fn from_filled(name: &str, filled: &[(Position, u8)]) -> Self {
        let mut cells = [[0u8; GRID_SIZE]; GRID_SIZE];
        for &(pos, value) in filled {
            if pos.row < GRID_SIZE && pos.col < GRID_SIZE && value <= GRID_SIZE as u8 {
                cells[pos.row][pos.col] = value;
            }
        }
        Self {
            name: name.to_string(),
            cells,
        }
    }

    /// Parse a grid from an 81-character digit string (0 = empty).
    pub fn from_string(name: &str, s: &str) -> Option<Self> {
        let digits: Vec<u8> = s
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<Vec<_>>>()?;
        if digits.len() != GRID_SIZE * GRID_SIZE {
            return None;
        }
        let mut cells = [[0u8; GRID_SIZE]; GRID_SIZE];
        for (i, &d) in digits.iter().enumerate() {
            cells[i / GRID_SIZE][i % GRID_SIZE] = d;
        }
        Some(Self {
            name: name.to_string(),
            cells,
        })
    }

    /// Derive a new grid identical to this one except for one cell.
    ///
    /// Legality of the assignment is the caller's responsibility; this
    /// only copies and overwrites.
    pub fn with_value(&self, pos: Position, value: u8) -> Grid {
        let mut derived = self.clone();
        if pos.row < GRID_SIZE && pos.col < GRID_SIZE && value <= GRID_SIZE as u8 {
            derived.cells[pos.row][pos.col] = value;
        }
        derived
    }

    /// Value at (row, col), or 0 when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row < GRID_SIZE && col < GRID_SIZE {
            self.cells[row][col]
        } else {
            0
        }
    }

    /// Reporting label carried through from construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether every cell is filled (no zeros). Says nothing about validity.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v != 0)
    }

    /// Consistency check: no duplicate non-zero value in any row,
    /// column, or box. A partially filled grid can verify true.
    pub fn verify(&self) -> bool {
        for row in 0..GRID_SIZE {
            if !Self::no_duplicates((0..GRID_SIZE).map(|col| self.get(row, col))) {
                return false;
            }
        }
        for col in 0..GRID_SIZE {
            if !Self::no_duplicates((0..GRID_SIZE).map(|row| self.get(row, col))) {
                return false;
            }
        }
        for box_row in 0..BOXES_PER_SIDE {
            for box_col in 0..BOXES_PER_SIDE {
                if !Self::no_duplicates(Self::box_cells(box_row, box_col).map(|p| self.get(p.row, p.col))) {
                    return false;
                }
            }
        }
        true
    }

    fn no_duplicates(values: impl Iterator<Item = u8>) -> bool {
        let mut seen = CandidateSet::empty();
        for v in values {
            if v == 0 {
                continue;
            }
            if seen.contains(v) {
                return false;
            }
            seen.insert(v);
        }
        true
    }

    /// The 9 positions of one box, row-major within the box.
    fn box_cells(box_row: usize, box_col: usize) -> impl Iterator<Item = Position> {
        (0..BOX_SIZE).flat_map(move |dr| {
            (0..BOX_SIZE)
                .map(move |dc| Position::new(box_row * BOX_SIZE + dr, box_col * BOX_SIZE + dc))
        })
    }

    // ==================== Constraint queries ====================

    /// Values 1..=9 not yet present in `row`.
    ///
    /// An out-of-range index returns the full set, a defensive default
    /// ("nothing known"), not an error.
    pub fn missing_in_row(&self, row: usize) -> CandidateSet {
        let mut missing = CandidateSet::full();
        if row >= GRID_SIZE {
            return missing;
        }
        for col in 0..GRID_SIZE {
            missing.remove(self.get(row, col));
        }
        missing
    }

    /// Values 1..=9 not yet present in `col`. Out of range returns the full set.
    pub fn missing_in_col(&self, col: usize) -> CandidateSet {
        let mut missing = CandidateSet::full();
        if col >= GRID_SIZE {
            return missing;
        }
        for row in 0..GRID_SIZE {
            missing.remove(self.get(row, col));
        }
        missing
    }

    /// Values 1..=9 not yet present in the box at (box_row, box_col).
    /// Out of range returns the full set.
    pub fn missing_in_box(&self, box_row: usize, box_col: usize) -> CandidateSet {
        let mut missing = CandidateSet::full();
        if box_row >= BOXES_PER_SIDE || box_col >= BOXES_PER_SIDE {
            return missing;
        }
        for pos in Self::box_cells(box_row, box_col) {
            missing.remove(self.get(pos.row, pos.col));
        }
        missing
    }

    /// Legal values for the cell at `pos`: the intersection of the
    /// missing sets of its row, column, and box.
    ///
    /// An out-of-range position returns the EMPTY set ("no valid
    /// move"), a deliberately different policy from the missing-value
    /// queries.
    pub fn candidates_for(&self, pos: Position) -> CandidateSet {
        if pos.row >= GRID_SIZE || pos.col >= GRID_SIZE {
            return CandidateSet::empty();
        }
        self.missing_in_row(pos.row)
            .intersect(self.missing_in_col(pos.col))
            .intersect(self.missing_in_box(pos.row / BOX_SIZE, pos.col / BOX_SIZE))
    }

    /// All empty positions, in row-major order.
    ///
    /// Row-major order is load-bearing: it is the tie-break order for
    /// equal candidate counts throughout the solver.
    pub fn empty_positions(&self) -> Vec<Position> {
        let mut empties = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if self.get(row, col) == 0 {
                    empties.push(Position::new(row, col));
                }
            }
        }
        empties
    }

    /// Candidate set of every empty position, in row-major order.
    ///
    /// Always recomputed from the current grid; a single assignment can
    /// change many cells' candidates, so this is never cached.
    pub fn empty_position_candidates(&self) -> Vec<(Position, CandidateSet)> {
        self.empty_positions()
            .into_iter()
            .map(|pos| (pos, self.candidates_for(pos)))
            .collect()
    }
}

impl fmt::Display for Grid {
    /// 9 lines of 9 digits, no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &v in cells {
                write!(f, "{}", v)?;
            }
        }
        Ok(())
    }
}
