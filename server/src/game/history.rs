use super::board::Board;
use super::evaluator::Outcome;
use super::session::{GameStatus, board_to_proto};

/// Immutable snapshot taken after each accepted move. The ordered sequence
/// of entries per game is the game's replay log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub board: Board,
    pub status: GameStatus,
    pub outcome: Outcome,
}

impl HistoryEntry {
    pub fn to_proto(&self) -> common::proto::HistoryEntryView {
        common::proto::HistoryEntryView {
            status: self.status.to_proto(),
            outcome: self.outcome.to_proto(),
            board: board_to_proto(&self.board),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Mark;

    #[test]
    fn test_entry_snapshots_board_by_copy() {
        let mut board = Board::empty();
        board.place(0, 0, Mark::X).unwrap();

        let entry = HistoryEntry {
            board,
            status: GameStatus::InProgress,
            outcome: Outcome::Ongoing,
        };

        // Mutating the source board must not affect the snapshot.
        board.place(1, 1, Mark::O).unwrap();
        assert_eq!(entry.board.mark_count(Mark::O), 0);
    }

    #[test]
    fn test_to_proto_maps_fields() {
        let mut board = Board::empty();
        board.place(2, 0, Mark::O).unwrap();

        let entry = HistoryEntry {
            board,
            status: GameStatus::Finished,
            outcome: Outcome::OWon,
        };
        let view = entry.to_proto();

        assert_eq!(view.status, common::proto::GameStatus::Finished as i32);
        assert_eq!(view.outcome, common::proto::Outcome::OWon as i32);
        assert_eq!(view.board.len(), 1);
        assert_eq!((view.board[0].row, view.board[0].col), (2, 0));
    }
}
