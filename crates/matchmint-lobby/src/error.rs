use std::path::PathBuf;

use matchmint_core::error::SetupDataError;
use matchmint_core::player::PlayerId;
use thiserror::Error;

/// Failures of lobby operations.
#[derive(Debug, Error)]
pub enum LobbyError {
    #[error("game {0} is not registered")]
    UnknownGame(String),

    #[error("match {0} not found")]
    MatchNotFound(String),

    #[error("match {match_id} reached maximum number of players ({num_players})")]
    MatchFull { match_id: String, num_players: usize },

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("player {0} not available")]
    SeatTaken(PlayerId),

    #[error("invalid credentials for player {0}")]
    InvalidCredentials(PlayerId),

    #[error("player name is required")]
    MissingPlayerName,

    #[error("new name or data is required")]
    NothingToUpdate,

    #[error("{requested} players requested, at most {max} allowed per match")]
    TooManyPlayers { requested: u32, max: u32 },

    #[error("lobby is at capacity ({0} matches)")]
    LobbyFull(usize),

    /// The game rejected the setup payload. Displays the game's message as is.
    #[error(transparent)]
    SetupDataInvalid(#[from] SetupDataError),

    #[error("failed to encode initial state: {0}")]
    StateEncoding(#[source] serde_json::Error),
}

/// Failures loading or validating [`LobbyConfig`](crate::config::LobbyConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lobby config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} must be > 0")]
    Zero(&'static str),
}
