pub mod config;
pub mod error;
pub mod lobby;
pub mod registry;

pub use config::LobbyConfig;
pub use error::{ConfigError, LobbyError};
pub use lobby::{JoinRequest, JoinResponse, ListFilter, Lobby, MatchId, PublicMatch, UpdatePlayer};
pub use registry::{DynGame, GameRegistry};

/// Lobby configured from the environment or `config/lobby.toml`, with every
/// game compiled into this build registered.
pub fn lobby_from_env() -> Lobby {
    let config = LobbyConfig::load();
    let registry = GameRegistry::new();
    tracing::info!(
        games = registry.available_games(),
        max_matches = config.max_matches,
        "Lobby ready"
    );
    Lobby::new(registry, config)
}
