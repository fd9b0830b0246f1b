use common::GameId;

use super::board::{Board, Mark};
use super::error::GameError;
use super::evaluator::{Outcome, evaluate, turn_of};
use super::history::HistoryEntry;
use super::minimax::find_best_move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Created,
    InProgress,
    Finished,
}

impl GameStatus {
    pub fn to_proto(&self) -> i32 {
        match self {
            GameStatus::Created => common::proto::GameStatus::Created as i32,
            GameStatus::InProgress => common::proto::GameStatus::InProgress as i32,
            GameStatus::Finished => common::proto::GameStatus::Finished as i32,
        }
    }
}

/// One game of tic-tac-toe. Pure state machine: lookup, locking and
/// persistence live in the manager, notification fan-out in the broadcaster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    pub id: GameId,
    pub player_name1: String,
    pub player_name2: Option<String>,
    pub singleplayer: bool,
    pub status: GameStatus,
    pub board: Board,
    pub outcome: Outcome,
}

impl GameSession {
    pub fn new(id: GameId, player_name1: String, singleplayer: bool) -> Self {
        let status = if singleplayer {
            GameStatus::InProgress
        } else {
            GameStatus::Created
        };

        Self {
            id,
            player_name1,
            player_name2: None,
            singleplayer,
            status,
            board: Board::empty(),
            outcome: Outcome::Ongoing,
        }
    }

    /// Adds the second player. Only a freshly created two-player game
    /// accepts one.
    pub fn join(&mut self, player_name2: String) -> Result<(), GameError> {
        if self.status != GameStatus::Created {
            return Err(GameError::InvalidState(format!(
                "game {} is not accepting a second player",
                self.id
            )));
        }

        if player_name2 == self.player_name1 {
            return Err(GameError::Validation(
                "player names must not be the same".to_string(),
            ));
        }

        self.player_name2 = Some(player_name2);
        self.status = GameStatus::InProgress;
        Ok(())
    }

    /// Validates and applies one move, including the AI counter-move in
    /// singleplayer games. All checks run before the first mutation, so an
    /// error leaves the session exactly as it was.
    pub fn apply_move(&mut self, mark: Mark, row: usize, col: usize) -> Result<(), GameError> {
        if self.status == GameStatus::Finished {
            return Err(GameError::InvalidState(format!(
                "game {} is already finished",
                self.id
            )));
        }

        if !self.singleplayer && self.player_name2.is_none() {
            return Err(GameError::InvalidState(format!(
                "game {} is waiting for a second player",
                self.id
            )));
        }

        if self.board.is_occupied(row, col)? {
            return Err(GameError::CellOccupied { row, col });
        }

        if turn_of(&self.board) != mark {
            return Err(GameError::OutOfTurn { mark });
        }

        self.board.place(row, col, mark)?;
        self.outcome = evaluate(&self.board);

        // The turn check above already rejected Mark::Empty, so the
        // opponent always exists here.
        if self.singleplayer
            && self.outcome == Outcome::Ongoing
            && let Some(ai_mark) = mark.opponent()
        {
            self.play_ai_move(ai_mark)?;
        }

        if self.outcome.is_terminal() {
            self.status = GameStatus::Finished;
        }

        Ok(())
    }

    fn play_ai_move(&mut self, ai_mark: Mark) -> Result<(), GameError> {
        // Ongoing outcome guarantees an empty cell, so the search cannot
        // come back empty-handed.
        let (row, col) = find_best_move(&self.board, ai_mark)?;
        self.board.place(row, col, ai_mark)?;
        self.outcome = evaluate(&self.board);
        Ok(())
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            board: self.board,
            status: self.status,
            outcome: self.outcome,
        }
    }

    /// Human-readable snapshot sent to move subscribers.
    pub fn render(&self) -> String {
        let status_line = match self.outcome {
            Outcome::Ongoing => format!("{} to move", turn_of(&self.board)),
            Outcome::Tie => "game over: tie".to_string(),
            Outcome::XWon => "game over: X wins".to_string(),
            Outcome::OWon => "game over: O wins".to_string(),
        };
        format!("{}\n{}", self.board, status_line)
    }

    pub fn to_proto(&self) -> common::proto::GameView {
        common::proto::GameView {
            game_id: self.id.to_string(),
            player_name1: self.player_name1.clone(),
            player_name2: self.player_name2.clone(),
            singleplayer: self.singleplayer,
            status: self.status.to_proto(),
            board: board_to_proto(&self.board),
            outcome: self.outcome.to_proto(),
        }
    }
}

pub(crate) fn board_to_proto(board: &Board) -> Vec<common::proto::CellMark> {
    board
        .grid()
        .iter()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, &mark)| {
                if mark == Mark::Empty {
                    None
                } else {
                    Some(common::proto::CellMark {
                        row: row as u32,
                        col: col as u32,
                        mark: mark.to_proto(),
                    })
                }
            })
        })
        .collect()
}
