use super::board::{BOARD_SIZE, Board, Mark};
use super::error::GameError;
use super::evaluator::{Outcome, evaluate};

/// Terminal scores from X's point of view. Internal to the search; the rest
/// of the crate only ever sees `Mark` and `Outcome`.
const X_WIN_SCORE: i32 = 10;
const O_WIN_SCORE: i32 = -10;
const TIE_SCORE: i32 = 0;

/// Picks the optimal cell for `ai_mark` assuming the opponent also plays
/// perfectly. Exhaustive search, no pruning, no depth discounting; a 3x3
/// board caps the tree at 9! leaves which is trivially fast.
///
/// Deterministic tie-break: the first best-scoring cell in row-major order.
pub fn find_best_move(board: &Board, ai_mark: Mark) -> Result<(usize, usize), GameError> {
    debug_assert!(ai_mark != Mark::Empty);

    let mut best: Option<((usize, usize), i32)> = None;

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if board.grid()[row][col] != Mark::Empty {
                continue;
            }

            let mut candidate = *board;
            candidate.set(row, col, ai_mark);
            // After the tentative move the opponent is hypothetically on
            // the move, so the next layer maximizes iff the opponent is X.
            let score = minimax(candidate, 0, ai_mark == Mark::O);

            let improves = match best {
                None => true,
                Some((_, best_score)) => {
                    if ai_mark == Mark::O {
                        score < best_score
                    } else {
                        score > best_score
                    }
                }
            };
            if improves {
                best = Some(((row, col), score));
            }
        }
    }

    best.map(|(cell, _)| cell).ok_or(GameError::NoLegalMove)
}

/// Scores a position by full recursive expansion. The maximizing layer
/// places X, the minimizing layer places O, each branch on its own board
/// copy. `depth` only bounds the recursion structurally.
fn minimax(board: Board, depth: u32, is_maximizing: bool) -> i32 {
    debug_assert!(depth <= BOARD_SIZE as u32 * BOARD_SIZE as u32);

    match evaluate(&board) {
        Outcome::XWon => return X_WIN_SCORE,
        Outcome::OWon => return O_WIN_SCORE,
        Outcome::Tie => return TIE_SCORE,
        Outcome::Ongoing => {}
    }

    let mover = if is_maximizing { Mark::X } else { Mark::O };
    let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if board.grid()[row][col] != Mark::Empty {
                continue;
            }

            let mut next = board;
            next.set(row, col, mover);
            let score = minimax(next, depth + 1, !is_maximizing);

            best = if is_maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
    }

    best
}
