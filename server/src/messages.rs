use serde::{Deserialize, Serialize};
use tictactoe_common::games::tictactoe::{GameSession, Mark, SessionState};

#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Place { cell: usize },
    Restart,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State(StateSnapshot),
}

#[derive(Debug, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub board: Vec<Mark>,
    pub status_text: String,
    pub accepting_moves: bool,
    pub finished: bool,
    pub winning_line: Option<[usize; 3]>,
    pub last_computer_move: Option<usize>,
}

impl StateSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            board: session.current_board().cells().to_vec(),
            status_text: session.status_text(),
            accepting_moves: session.state() == SessionState::AwaitingHumanMove,
            finished: session.is_finished(),
            winning_line: session.winning_line().map(|line| line.cells),
            last_computer_move: session.last_computer_move(),
        }
    }
}
