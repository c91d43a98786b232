mod board;
mod bot_controller;
mod minimax;
mod session;
mod types;
mod win_detector;

pub use board::{BOARD_SIDE, Board, CELL_COUNT, WINNING_LINES};
pub use bot_controller::{calculate_minimax_move, calculate_move, score_moves};
pub use minimax::{COMPUTER_MARK, HUMAN_MARK, LOSS_SCORE, TIE_SCORE, WIN_SCORE, score};
pub use session::{GameSession, SessionEvent, SessionState};
pub use types::{Mark, Outcome, TieBreak, WinningLine};
pub use win_detector::{check_win, check_win_with_line, evaluate};
