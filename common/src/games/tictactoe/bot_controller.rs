use crate::games::SessionRng;
use super::board::Board;
use super::minimax::{COMPUTER_MARK, score};
use super::types::{Mark, TieBreak};

pub fn calculate_move(tie_break: TieBreak, board: &Board, rng: &mut SessionRng) -> Option<usize> {
    match tie_break {
        TieBreak::FirstIndex => calculate_minimax_move(board),
        TieBreak::Random => calculate_random_best_move(board, rng),
    }
}

/// Keeps the first cell with a strictly greater score, so ties go to the
/// lowest index.
pub fn calculate_minimax_move(board: &Board) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for (index, move_score) in score_moves(board) {
        if move_score > best_score {
            best_score = move_score;
            best_move = Some(index);
        }
    }

    best_move
}

fn calculate_random_best_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    let scored = score_moves(board);
    let best_score = scored.iter().map(|&(_, move_score)| move_score).max()?;

    let best_moves: Vec<usize> = scored
        .into_iter()
        .filter(|&(_, move_score)| move_score == best_score)
        .map(|(index, _)| index)
        .collect();

    let choice = rng.random_index(best_moves.len())?;
    Some(best_moves[choice])
}

pub fn score_moves(board: &Board) -> Vec<(usize, i32)> {
    let mut board = *board;
    let mut scored = Vec::new();

    for index in board.available_moves() {
        board.set(index, COMPUTER_MARK);
        let move_score = score(&mut board, false);
        board.set(index, Mark::Empty);

        scored.push((index, move_score));
    }

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::minimax::{LOSS_SCORE, TIE_SCORE, WIN_SCORE};

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        assert_eq!(calculate_minimax_move(&board), None);

        let mut rng = SessionRng::new(3);
        assert_eq!(calculate_move(TieBreak::Random, &board, &mut rng), None);
    }

    #[test]
    fn test_corner_opening_answered_in_centre() {
        let board = Board::from_cells([X, E, E, E, E, E, E, E, E]);
        assert_eq!(calculate_minimax_move(&board), Some(4));
    }

    #[test]
    fn test_only_centre_holds_against_corner() {
        let board = Board::from_cells([X, E, E, E, E, E, E, E, E]);
        let scored = score_moves(&board);
        for (index, move_score) in scored {
            if index == 4 {
                assert_eq!(move_score, TIE_SCORE);
            } else {
                assert_eq!(move_score, LOSS_SCORE, "cell {}", index);
            }
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = Board::from_cells([O, O, E, X, X, E, X, E, E]);
        assert_eq!(calculate_minimax_move(&board), Some(2));
    }

    #[test]
    fn test_blocks_immediate_loss() {
        let board = Board::from_cells([X, X, E, E, O, E, E, E, E]);
        assert_eq!(calculate_minimax_move(&board), Some(2));
    }

    #[test]
    fn test_ties_prefer_lowest_index() {
        // every reply to the centre opening except the corners loses
        let board = Board::from_cells([E, E, E, E, X, E, E, E, E]);
        assert_eq!(calculate_minimax_move(&board), Some(0));
    }

    #[test]
    fn test_slow_win_equals_fast_win() {
        // 2 wins at once, 0 blocks and wins later; both score the same
        let board = Board::from_cells([E, E, E, X, E, O, X, X, O]);
        let scored = score_moves(&board);
        assert!(scored.contains(&(0, WIN_SCORE)));
        assert!(scored.contains(&(2, WIN_SCORE)));
        assert_eq!(calculate_minimax_move(&board), Some(0));
    }

    #[test]
    fn test_random_tie_break_picks_among_best() {
        let board = Board::from_cells([E, E, E, E, X, E, E, E, E]);
        let mut rng = SessionRng::new(11);
        let mut seen = Vec::new();
        for _ in 0..64 {
            let choice = calculate_move(TieBreak::Random, &board, &mut rng).unwrap();
            assert!([0, 2, 6, 8].contains(&choice), "edge reply {}", choice);
            if !seen.contains(&choice) {
                seen.push(choice);
            }
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_selector_does_not_modify_board() {
        let board = Board::from_cells([X, E, E, E, O, E, E, E, X]);
        let before = board;
        calculate_minimax_move(&board);
        assert_eq!(board, before);
    }
}
