use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tictactoe_common::config::Validate;
use tictactoe_common::games::tictactoe::TieBreak;

pub const CONFIG_FILE: &str = "tictactoe_server_config.yaml";
/// Relative to the working directory, i.e. the workspace root.
pub const DEFAULT_STATIC_FILES_PATH: &str = "server/static";
pub const MAX_COMPUTER_MOVE_DELAY_MS: u64 = 10_000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub static_files_path: String,
    pub computer_move_delay_ms: u64,
    pub tie_break: TieBreak,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:5000".to_string(),
            static_files_path: DEFAULT_STATIC_FILES_PATH.to_string(),
            computer_move_delay_ms: 500,
            tie_break: TieBreak::FirstIndex,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.address.is_empty() {
            return Err("address must not be empty".to_string());
        }
        if self.address.parse::<SocketAddr>().is_err() {
            return Err(format!("address '{}' is not a valid socket address", self.address));
        }
        if self.static_files_path.is_empty() {
            return Err("static_files_path must not be empty".to_string());
        }
        if self.computer_move_delay_ms > MAX_COMPUTER_MOVE_DELAY_MS {
            return Err(format!(
                "computer_move_delay_ms must not exceed {}",
                MAX_COMPUTER_MOVE_DELAY_MS
            ));
        }
        Ok(())
    }
}

/// Per-connection game parameters taken from the server config.
#[derive(Debug, Clone, Copy)]
pub struct GameSettings {
    pub tie_break: TieBreak,
    pub computer_move_delay: Duration,
}

impl From<&ServerConfig> for GameSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            tie_break: config.tie_break,
            computer_move_delay: Duration::from_millis(config.computer_move_delay_ms),
        }
    }
}
