use super::board::Board;
use super::types::{Mark, Outcome};
use super::win_detector::evaluate;

pub const COMPUTER_MARK: Mark = Mark::O;
pub const HUMAN_MARK: Mark = Mark::X;

pub const WIN_SCORE: i32 = 10;
pub const LOSS_SCORE: i32 = -10;
pub const TIE_SCORE: i32 = 0;

/// Scores a position from the computer's side: positive favours O, negative
/// favours X. Terminal scores are not depth adjusted, so a fast win and a
/// slow win are worth the same.
///
/// Cells are filled and emptied in place; the board is unchanged on return.
pub fn score(board: &mut Board, is_maximizing: bool) -> i32 {
    match evaluate(board) {
        Outcome::Winner(Mark::X) => return LOSS_SCORE,
        Outcome::Winner(_) => return WIN_SCORE,
        Outcome::Tie => return TIE_SCORE,
        Outcome::InProgress => {}
    }

    let mark = if is_maximizing { COMPUTER_MARK } else { HUMAN_MARK };

    let mut best_score = if is_maximizing { i32::MIN } else { i32::MAX };
    for index in board.available_moves() {
        board.set(index, mark);
        let eval = score(board, !is_maximizing);
        board.set(index, Mark::Empty);

        best_score = if is_maximizing {
            best_score.max(eval)
        } else {
            best_score.min(eval)
        };
    }

    best_score
}
