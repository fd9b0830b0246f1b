use common::GameId;
use thiserror::Error;

use super::board::Mark;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid player name: {0}")]
    Validation(String),

    #[error("game {0} does not exist")]
    NotFound(GameId),

    #[error("no moves recorded for game {0}")]
    NoHistory(GameId),

    #[error("invalid game state: {0}")]
    InvalidState(String),

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("{mark} is not on the move")]
    OutOfTurn { mark: Mark },

    #[error("coordinates ({row}, {col}) are outside the board")]
    InvalidCoordinate { row: usize, col: usize },

    #[error("no legal move on a full board")]
    NoLegalMove,
}
