use super::board::{BOARD_SIZE, Board, Mark};

/// The 8 winning lines in fixed order: rows, then columns, then both
/// diagonals. With alternating turns and evaluation after every move only
/// one mark can ever complete a line, so the order does not affect results.
const LINES: [[(usize, usize); BOARD_SIZE]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Tie,
    XWon,
    OWon,
}

impl Outcome {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::XWon => Some(Mark::X),
            Outcome::OWon => Some(Mark::O),
            Outcome::Ongoing | Outcome::Tie => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self != Outcome::Ongoing
    }

    pub fn to_proto(&self) -> i32 {
        match self {
            Outcome::Ongoing => common::proto::Outcome::Ongoing as i32,
            Outcome::Tie => common::proto::Outcome::Tie as i32,
            Outcome::XWon => common::proto::Outcome::XWon as i32,
            Outcome::OWon => common::proto::Outcome::OWon as i32,
        }
    }
}

/// Whose turn it is, assuming strict alternation with X first. The session
/// rejects out-of-turn moves, so mark counts can never drift further apart
/// than one; a board violating that is corrupted state, not a turn to guess.
pub fn turn_of(board: &Board) -> Mark {
    let x_count = board.mark_count(Mark::X);
    let o_count = board.mark_count(Mark::O);
    debug_assert!(
        x_count == o_count || x_count == o_count + 1,
        "corrupted board: {} X marks vs {} O marks",
        x_count,
        o_count
    );
    if x_count == o_count { Mark::X } else { Mark::O }
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = winning_mark(board) {
        return match mark {
            Mark::X => Outcome::XWon,
            Mark::O => Outcome::OWon,
            Mark::Empty => unreachable!(),
        };
    }

    if board.has_empty_cell() {
        Outcome::Ongoing
    } else {
        Outcome::Tie
    }
}

pub(crate) fn winning_mark(board: &Board) -> Option<Mark> {
    let grid = board.grid();
    for line in &LINES {
        let [(r0, c0), (r1, c1), (r2, c2)] = *line;
        let first = grid[r0][c0];
        if first != Mark::Empty && grid[r1][c1] == first && grid[r2][c2] == first {
            return Some(first);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: [[Mark; 3]; 3]) -> Board {
        let mut board = Board::empty();
        for (row, cells) in rows.iter().enumerate() {
            for (col, &mark) in cells.iter().enumerate() {
                if mark != Mark::Empty {
                    board.place(row, col, mark).unwrap();
                }
            }
        }
        board
    }

    fn swap_marks(board: &Board) -> Board {
        let mut swapped = Board::empty();
        for (row, cells) in board.grid().iter().enumerate() {
            for (col, &mark) in cells.iter().enumerate() {
                match mark {
                    Mark::X => swapped.place(row, col, Mark::O).unwrap(),
                    Mark::O => swapped.place(row, col, Mark::X).unwrap(),
                    Mark::Empty => {}
                }
            }
        }
        swapped
    }

    use Mark::Empty as E;
    use Mark::{O, X};

    #[test]
    fn test_turn_of_empty_board_is_x() {
        assert_eq!(turn_of(&Board::empty()), Mark::X);
    }

    #[test]
    fn test_turn_alternates_strictly() {
        // After N marks placed in turn order, it is X's turn iff N is even.
        let order = [
            (0, 0),
            (1, 1),
            (0, 1),
            (2, 2),
            (2, 0),
            (1, 0),
            (0, 2),
            (2, 1),
        ];
        let mut board = Board::empty();
        for (n, &(row, col)) in order.iter().enumerate() {
            let expected = if n % 2 == 0 { Mark::X } else { Mark::O };
            assert_eq!(turn_of(&board), expected, "after {} marks", n);
            board.place(row, col, expected).unwrap();
        }
    }

    #[test]
    fn test_evaluate_empty_board_is_ongoing() {
        assert_eq!(evaluate(&Board::empty()), Outcome::Ongoing);
    }

    #[test]
    fn test_evaluate_detects_each_row() {
        for row in 0..3 {
            let mut rows = [[E; 3]; 3];
            rows[row] = [X, X, X];
            assert_eq!(evaluate(&board_from(rows)), Outcome::XWon, "row {}", row);
        }
    }

    #[test]
    fn test_evaluate_detects_each_column() {
        for col in 0..3 {
            let mut rows = [[E; 3]; 3];
            for row in rows.iter_mut() {
                row[col] = O;
            }
            assert_eq!(evaluate(&board_from(rows)), Outcome::OWon, "col {}", col);
        }
    }

    #[test]
    fn test_evaluate_detects_diagonals() {
        let main = board_from([[X, E, E], [E, X, E], [E, E, X]]);
        assert_eq!(evaluate(&main), Outcome::XWon);

        let anti = board_from([[E, E, O], [E, O, E], [O, E, E]]);
        assert_eq!(evaluate(&anti), Outcome::OWon);
    }

    #[test]
    fn test_evaluate_full_board_without_line_is_tie() {
        let board = board_from([[X, O, X], [X, O, O], [O, X, X]]);
        assert_eq!(evaluate(&board), Outcome::Tie);
    }

    #[test]
    fn test_evaluate_partial_board_without_line_is_ongoing() {
        let board = board_from([[X, O, E], [E, X, E], [E, E, E]]);
        assert_eq!(evaluate(&board), Outcome::Ongoing);
    }

    #[test]
    fn test_evaluate_is_symmetric_under_mark_relabeling() {
        let boards = [
            board_from([[X, X, X], [O, O, E], [E, E, E]]),
            board_from([[O, X, E], [O, X, E], [O, E, X]]),
            board_from([[X, O, X], [X, O, O], [O, X, X]]),
            board_from([[X, O, E], [E, X, E], [E, E, E]]),
            Board::empty(),
        ];
        for board in &boards {
            let expected = match evaluate(board) {
                Outcome::XWon => Outcome::OWon,
                Outcome::OWon => Outcome::XWon,
                other => other,
            };
            assert_eq!(evaluate(&swap_marks(board)), expected);
        }
    }

    #[test]
    fn test_winner_accessor() {
        assert_eq!(Outcome::XWon.winner(), Some(Mark::X));
        assert_eq!(Outcome::OWon.winner(), Some(Mark::O));
        assert_eq!(Outcome::Tie.winner(), None);
        assert_eq!(Outcome::Ongoing.winner(), None);
    }
}
