mod board;
mod error;
mod evaluator;
mod history;
mod minimax;
mod session;

pub use board::{BOARD_SIZE, Board, Mark};
pub use error::GameError;
pub use evaluator::{Outcome, evaluate, turn_of};
pub use history::HistoryEntry;
pub use minimax::find_best_move;
pub use session::{GameSession, GameStatus};
