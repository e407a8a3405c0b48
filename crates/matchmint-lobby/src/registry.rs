use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use matchmint_core::create::{CreatedMatch, MatchParams, create_match};
use matchmint_core::error::SetupDataError;
use matchmint_core::game_trait::Game;
use matchmint_core::initialize::State;

use crate::error::LobbyError;

/// A created match with its setup payload and game state as JSON.
pub type JsonMatch = CreatedMatch<Value, Value>;

/// Object-safe view of a [`Game`] whose payloads travel as JSON.
pub trait DynGame: Send + Sync {
    fn name(&self) -> &str;

    /// Decode the JSON setup payload into the game's own type, then create
    /// the match.
    fn create_match(&self, params: MatchParams<Value>) -> Result<JsonMatch, LobbyError>;
}

struct JsonGame<G>(G);

impl<G> DynGame for JsonGame<G>
where
    G: Game + Send + Sync,
    G::SetupData: DeserializeOwned,
    G::State: Serialize,
{
    fn name(&self) -> &str {
        self.0.name()
    }

    fn create_match(&self, params: MatchParams<Value>) -> Result<JsonMatch, LobbyError> {
        let MatchParams {
            num_players,
            setup_data,
            unlisted,
            password,
        } = params;

        let typed = setup_data
            .clone()
            .map(serde_json::from_value::<G::SetupData>)
            .transpose()
            .map_err(|e| SetupDataError::new(format!("invalid setup data: {e}")))?;

        let created = create_match(
            &self.0,
            MatchParams {
                num_players,
                setup_data: typed,
                unlisted,
                password,
            },
        )?;

        let g = serde_json::to_value(&created.initial_state.g).map_err(LobbyError::StateEncoding)?;
        // Keep the payload exactly as the creator sent it.
        let mut metadata = created.metadata.map_setup_data(|_| Value::Null);
        metadata.setup_data = setup_data;

        Ok(CreatedMatch {
            metadata,
            initial_state: State {
                g,
                ctx: created.initial_state.ctx,
                state_id: created.initial_state.state_id,
            },
        })
    }
}

/// Registry mapping game names to playable games.
pub struct GameRegistry {
    games: HashMap<String, Box<dyn DynGame>>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRegistry {
    /// Registry holding every game compiled into this build.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_defaults();
        registry
    }

    pub fn empty() -> Self {
        Self {
            games: HashMap::new(),
        }
    }

    fn register_defaults(&mut self) {
        #[cfg(feature = "tictactoe")]
        self.register(matchmint_tictactoe::TicTacToe);
    }

    /// Add a game under its own name, replacing any game of the same name.
    pub fn register<G>(&mut self, game: G)
    where
        G: Game + Send + Sync + 'static,
        G::SetupData: DeserializeOwned,
        G::State: Serialize,
    {
        let name = game.name().to_string();
        if self.games.contains_key(&name) {
            tracing::warn!(game = %name, "Replacing registered game");
        }
        self.games.insert(name, Box::new(JsonGame(game)));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynGame> {
        self.games.get(name).map(|g| g.as_ref())
    }

    /// Registered game names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.games.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Return the number of registered game types.
    pub fn available_games(&self) -> usize {
        self.games.len()
    }
}
