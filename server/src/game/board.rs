use std::fmt;

use super::error::GameError;

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn to_proto(&self) -> i32 {
        match self {
            Mark::Empty => common::proto::Mark::Unspecified as i32,
            Mark::X => common::proto::Mark::X as i32,
            Mark::O => common::proto::Mark::O as i32,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Mark::Empty => '_',
            Mark::X => 'X',
            Mark::O => 'O',
        };
        write!(f, "{}", c)
    }
}

/// Fixed 3x3 grid. `Copy` on purpose: the minimax search branches on cheap
/// copies instead of mutate-and-undo backtracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn grid(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> Result<bool, GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::InvalidCoordinate { row, col });
        }
        Ok(self.cells[row][col] != Mark::Empty)
    }

    /// Validated mutation: the only way session code writes to the grid.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), GameError> {
        debug_assert!(mark != Mark::Empty, "cannot place an empty mark");
        if self.is_occupied(row, col)? {
            return Err(GameError::CellOccupied { row, col });
        }
        self.cells[row][col] = mark;
        Ok(())
    }

    /// Unchecked write for the search, which only ever visits in-bounds
    /// empty cells on its own board copies.
    pub(crate) fn set(&mut self, row: usize, col: usize, mark: Mark) {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        debug_assert!(self.cells[row][col] == Mark::Empty);
        self.cells[row][col] = mark;
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells
            .iter()
            .any(|row| row.iter().any(|&cell| cell == Mark::Empty))
    }

    pub fn mark_count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == mark)
            .count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}|{}|{}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
