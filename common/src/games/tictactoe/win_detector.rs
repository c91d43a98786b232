use super::board::{Board, WINNING_LINES};
use super::types::{Mark, Outcome, WinningLine};

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let mark = cells[a];
        if mark != Mark::Empty && mark == cells[b] && mark == cells[c] {
            Some(WinningLine::new(mark, [a, b, c]))
        } else {
            None
        }
    })
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

/// Total over any board. The first completed line decides the winner;
/// boards with two different completed lines are not reachable in play.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_win(board) {
        return Outcome::Winner(mark);
    }

    if board.is_full() {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}
