use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::bot_controller::calculate_move;
use super::minimax::{COMPUTER_MARK, HUMAN_MARK};
use super::types::{Mark, Outcome, TieBreak, WinningLine};
use super::win_detector::{check_win_with_line, evaluate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitingHumanMove,
    AwaitingComputerMove,
    Finished(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Rejected,
    Continued(Mark),
    Ended(Outcome),
}

impl SessionEvent {
    pub fn status_text(&self) -> Option<String> {
        match self {
            SessionEvent::Rejected => None,
            SessionEvent::Continued(mark) => Some(turn_status_text(*mark)),
            SessionEvent::Ended(outcome) => outcome.status_text(),
        }
    }
}

fn turn_status_text(mark: Mark) -> String {
    if mark == COMPUTER_MARK {
        "AI is thinking...".to_string()
    } else {
        format!("Player {}'s Turn", mark.symbol())
    }
}

/// One human-versus-computer game. The human always plays X and moves first.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    turn: Mark,
    state: SessionState,
    tie_break: TieBreak,
    rng: SessionRng,
    last_computer_move: Option<usize>,
}

impl GameSession {
    pub fn new(tie_break: TieBreak, rng: SessionRng) -> Self {
        Self {
            board: Board::new(),
            turn: HUMAN_MARK,
            state: SessionState::AwaitingHumanMove,
            tie_break,
            rng,
            last_computer_move: None,
        }
    }

    pub fn submit_human_move(&mut self, cell: usize) -> SessionEvent {
        if self.state != SessionState::AwaitingHumanMove {
            log!("Rejected human move at {}: state is {:?}", cell, self.state);
            return SessionEvent::Rejected;
        }

        if !self.board.is_valid_move(cell) {
            log!("Rejected human move at {}: cell is occupied or out of range", cell);
            return SessionEvent::Rejected;
        }

        self.board.set(cell, HUMAN_MARK);
        self.advance(SessionState::AwaitingComputerMove)
    }

    pub fn run_computer_move(&mut self) -> SessionEvent {
        if self.state != SessionState::AwaitingComputerMove {
            log!("Rejected computer move: state is {:?}", self.state);
            return SessionEvent::Rejected;
        }

        let calculated_move = calculate_move(self.tie_break, &self.board, &mut self.rng);
        if let Some(cell) = calculated_move {
            self.board.set(cell, COMPUTER_MARK);
        }
        self.last_computer_move = calculated_move;

        self.advance(SessionState::AwaitingHumanMove)
    }

    pub fn restart(&mut self) {
        self.board.clear();
        self.turn = HUMAN_MARK;
        self.state = SessionState::AwaitingHumanMove;
        self.last_computer_move = None;
    }

    fn advance(&mut self, next_state: SessionState) -> SessionEvent {
        let outcome = evaluate(&self.board);
        if outcome.is_terminal() {
            self.state = SessionState::Finished(outcome);
            return SessionEvent::Ended(outcome);
        }

        if let Some(next_turn) = self.turn.opponent() {
            self.turn = next_turn;
        }
        self.state = next_state;
        SessionEvent::Continued(self.turn)
    }

    pub fn current_board(&self) -> Board {
        self.board
    }

    pub fn current_turn(&self) -> Mark {
        self.turn
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }

    pub fn last_computer_move(&self) -> Option<usize> {
        self.last_computer_move
    }

    pub fn moves_played(&self) -> usize {
        self.board.marks_placed()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.state {
            SessionState::Finished(Outcome::Winner(_)) => check_win_with_line(&self.board),
            _ => None,
        }
    }

    pub fn status_text(&self) -> String {
        match self.state {
            SessionState::AwaitingHumanMove => turn_status_text(HUMAN_MARK),
            SessionState::AwaitingComputerMove => turn_status_text(COMPUTER_MARK),
            SessionState::Finished(outcome) => outcome.status_text().unwrap_or_default(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(TieBreak::default(), SessionRng::from_random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::minimax::score;

    fn create_session() -> GameSession {
        GameSession::new(TieBreak::FirstIndex, SessionRng::new(42))
    }

    #[test]
    fn test_new_session_awaits_human() {
        let session = create_session();
        assert_eq!(session.state(), SessionState::AwaitingHumanMove);
        assert_eq!(session.current_turn(), Mark::X);
        assert_eq!(session.current_board(), Board::new());
        assert_eq!(session.status_text(), "Player X's Turn");
    }

    #[test]
    fn test_tie_break_survives_restart() {
        let mut session = GameSession::new(TieBreak::Random, SessionRng::new(3));
        assert_eq!(session.tie_break(), TieBreak::Random);
        session.submit_human_move(4);
        session.restart();
        assert_eq!(session.tie_break(), TieBreak::Random);
        assert_eq!(create_session().tie_break(), TieBreak::FirstIndex);
    }

    #[test]
    fn test_human_move_hands_turn_to_computer() {
        let mut session = create_session();
        let event = session.submit_human_move(0);
        assert_eq!(event, SessionEvent::Continued(Mark::O));
        assert_eq!(session.state(), SessionState::AwaitingComputerMove);
        assert_eq!(session.current_board().get(0), Some(Mark::X));
        assert_eq!(event.status_text().as_deref(), Some("AI is thinking..."));
        assert_eq!(session.status_text(), "AI is thinking...");
    }

    #[test]
    fn test_computer_answers_corner_with_centre() {
        let mut session = create_session();
        session.submit_human_move(0);
        let event = session.run_computer_move();
        assert_eq!(event, SessionEvent::Continued(Mark::X));
        assert_eq!(session.last_computer_move(), Some(4));
        assert_eq!(session.current_board().get(4), Some(Mark::O));
        assert_eq!(session.state(), SessionState::AwaitingHumanMove);
        assert_eq!(session.moves_played(), 2);
    }

    #[test]
    fn test_repeated_cell_is_rejected() {
        let mut session = create_session();
        session.submit_human_move(0);
        session.run_computer_move();
        let before = session.current_board();

        assert_eq!(session.submit_human_move(0), SessionEvent::Rejected);
        assert_eq!(session.current_board(), before);
        assert_eq!(session.state(), SessionState::AwaitingHumanMove);
    }

    #[test]
    fn test_second_move_before_computer_is_rejected() {
        let mut session = create_session();
        session.submit_human_move(0);
        let before = session.current_board();

        assert_eq!(session.submit_human_move(0), SessionEvent::Rejected);
        assert_eq!(session.submit_human_move(1), SessionEvent::Rejected);
        assert_eq!(session.current_board(), before);
        assert_eq!(session.state(), SessionState::AwaitingComputerMove);
    }

    #[test]
    fn test_out_of_range_cell_is_rejected() {
        let mut session = create_session();
        assert_eq!(session.submit_human_move(9), SessionEvent::Rejected);
        assert_eq!(session.current_board(), Board::new());
    }

    #[test]
    fn test_computer_move_out_of_turn_is_rejected() {
        let mut session = create_session();
        assert_eq!(session.run_computer_move(), SessionEvent::Rejected);
        assert_eq!(session.current_board(), Board::new());
    }

    #[test]
    fn test_current_board_is_stable_snapshot() {
        let mut session = create_session();
        session.submit_human_move(2);
        assert_eq!(session.current_board(), session.current_board());
    }

    #[test]
    fn test_computer_wins_against_careless_human() {
        let mut session = create_session();
        // X: 0, O: 4, X: 1, O blocks 2, X: 3, O completes 2-4-6
        assert_eq!(session.submit_human_move(0), SessionEvent::Continued(Mark::O));
        session.run_computer_move();
        session.submit_human_move(1);
        session.run_computer_move();
        assert_eq!(session.last_computer_move(), Some(2));
        session.submit_human_move(3);
        let event = session.run_computer_move();

        assert_eq!(event, SessionEvent::Ended(Outcome::Winner(Mark::O)));
        assert_eq!(session.state(), SessionState::Finished(Outcome::Winner(Mark::O)));
        assert_eq!(session.status_text(), "O Wins!");
        assert_eq!(session.winning_line().map(|line| line.cells), Some([2, 4, 6]));
    }

    #[test]
    fn test_finished_session_ignores_moves() {
        let mut session = create_session();
        for cell in [0, 1, 3] {
            session.submit_human_move(cell);
            session.run_computer_move();
        }
        assert!(session.is_finished());
        let before = session.current_board();

        assert_eq!(session.submit_human_move(8), SessionEvent::Rejected);
        assert_eq!(session.run_computer_move(), SessionEvent::Rejected);
        assert_eq!(session.current_board(), before);
    }

    #[test]
    fn test_restart_from_finished() {
        let mut session = create_session();
        for cell in [0, 1, 3] {
            session.submit_human_move(cell);
            session.run_computer_move();
        }
        assert!(session.is_finished());

        session.restart();
        assert_eq!(session.current_board(), Board::new());
        assert_eq!(session.current_turn(), Mark::X);
        assert_eq!(session.state(), SessionState::AwaitingHumanMove);
        assert_eq!(session.last_computer_move(), None);
        assert_eq!(session.winning_line(), None);
    }

    #[test]
    fn test_restart_while_computer_pending() {
        let mut session = create_session();
        session.submit_human_move(4);
        session.restart();
        assert_eq!(session.state(), SessionState::AwaitingHumanMove);
        assert_eq!(session.current_board(), Board::new());
    }

    fn best_human_move(board: &Board) -> Option<usize> {
        let mut board = *board;
        let mut best_move = None;
        let mut best_score = i32::MAX;
        for index in board.available_moves() {
            board.set(index, Mark::X);
            let move_score = score(&mut board, true);
            board.set(index, Mark::Empty);
            if move_score < best_score {
                best_score = move_score;
                best_move = Some(index);
            }
        }
        best_move
    }

    #[test]
    fn test_optimal_play_after_corner_opening_is_tie() {
        let mut session = create_session();
        let mut event = session.submit_human_move(0);
        loop {
            match event {
                SessionEvent::Continued(Mark::O) => event = session.run_computer_move(),
                SessionEvent::Continued(_) => {
                    let cell = best_human_move(&session.current_board()).unwrap();
                    event = session.submit_human_move(cell);
                }
                SessionEvent::Ended(outcome) => {
                    assert_eq!(outcome, Outcome::Tie);
                    break;
                }
                SessionEvent::Rejected => panic!("optimal move was rejected"),
            }
        }
        assert_eq!(session.status_text(), "It's a Tie!");
        assert!(session.current_board().is_full());
    }

    fn play_every_line(session: &GameSession, games: &mut usize) {
        for cell in session.current_board().available_moves() {
            let mut branch = session.clone();
            let event = match branch.submit_human_move(cell) {
                SessionEvent::Continued(_) => branch.run_computer_move(),
                event => event,
            };

            match event {
                SessionEvent::Continued(_) => play_every_line(&branch, games),
                SessionEvent::Ended(outcome) => {
                    assert_ne!(outcome, Outcome::Winner(Mark::X), "lost on\n{}", branch.current_board());
                    *games += 1;
                }
                SessionEvent::Rejected => panic!("legal move was rejected"),
            }
        }
    }

    #[test]
    fn test_computer_never_loses() {
        let session = create_session();
        let mut games = 0;
        play_every_line(&session, &mut games);
        assert!(games > 0);
    }

    #[test]
    fn test_random_tie_break_never_loses_either() {
        let session = GameSession::new(TieBreak::Random, SessionRng::new(5));
        let mut games = 0;
        play_every_line(&session, &mut games);
        assert!(games > 0);
    }
}
