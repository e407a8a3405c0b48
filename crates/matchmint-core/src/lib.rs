pub mod create;
pub mod error;
pub mod game_trait;
pub mod initialize;
pub mod match_data;
pub mod metadata;
pub mod player;
pub mod request;
pub mod slots;
pub mod time;

pub use create::{CreatedMatch, DEFAULT_NUM_PLAYERS, MatchParams, create_match, create_match_with};
pub use error::SetupDataError;
pub use game_trait::Game;
pub use initialize::{Ctx, InitializeGame, State, StateInitializer};
pub use match_data::{MatchData, Players};
pub use metadata::create_metadata;
pub use player::{PlayerId, PlayerMetadata};
pub use request::CreateMatchRequest;
pub use slots::{first_available_player_id, num_players};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use serde_json::Value;

    use crate::create::{MatchParams, create_match};
    use crate::game_trait::Game;
    use crate::initialize::Ctx;
    use crate::match_data::Players;
    use crate::player::{PlayerId, PlayerMetadata};

    /// A game with no setup constraints whose state echoes the setup payload.
    pub struct SimpleGame {
        pub name: &'static str,
    }

    impl SimpleGame {
        pub fn new(name: &'static str) -> Self {
            Self { name }
        }
    }

    impl Game for SimpleGame {
        type SetupData = Value;
        type State = Value;

        fn name(&self) -> &str {
            self.name
        }

        fn setup(&self, _ctx: &Ctx, setup_data: Option<&Value>) -> Value {
            setup_data.cloned().unwrap_or(Value::Null)
        }
    }

    /// A game whose validator rejects every payload with a fixed message.
    pub struct RejectingGame {
        pub name: &'static str,
        pub message: &'static str,
    }

    impl Game for RejectingGame {
        type SetupData = Value;
        type State = Value;

        fn name(&self) -> &str {
            self.name
        }

        fn validate_setup_data(
            &self,
            _setup_data: Option<&Value>,
            _num_players: u32,
        ) -> Option<String> {
            Some(self.message.to_string())
        }

        fn setup(&self, _ctx: &Ctx, _setup_data: Option<&Value>) -> Value {
            Value::Null
        }
    }

    /// Build a player map from seat names. `None` leaves the seat open.
    pub fn make_players(names: &[Option<&str>]) -> Players {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let id = i as PlayerId;
                (
                    id,
                    PlayerMetadata {
                        name: name.map(str::to_string),
                        ..PlayerMetadata::open(id)
                    },
                )
            })
            .collect()
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Game crates call these from their own #[cfg(test)] modules with a
    // concrete game and payloads they know to be valid or invalid.

    /// A valid payload must produce `num_players` open seats, record the
    /// payload and give the initial state a matching context.
    pub fn contract_valid_setup_creates_match<G>(
        game: &G,
        setup_data: G::SetupData,
        num_players: u32,
    ) where
        G: Game,
        G::SetupData: Clone + PartialEq + std::fmt::Debug,
    {
        let created = create_match(
            game,
            MatchParams {
                num_players: Some(num_players),
                setup_data: Some(setup_data.clone()),
                ..MatchParams::default()
            },
        )
        .unwrap_or_else(|e| panic!("valid setup data was rejected: {e}"));

        assert_eq!(created.metadata.game_name, game.name());
        assert_eq!(created.metadata.players.len(), num_players as usize);
        assert!(created.metadata.players.values().all(PlayerMetadata::is_open));
        assert_eq!(created.metadata.setup_data, Some(setup_data));
        assert_eq!(created.initial_state.ctx.num_players, num_players);
    }

    /// A missing payload must be accepted when the game has usable defaults.
    pub fn contract_missing_setup_uses_defaults<G: Game>(game: &G, num_players: u32) {
        let created = create_match(
            game,
            MatchParams {
                num_players: Some(num_players),
                ..MatchParams::default()
            },
        )
        .unwrap_or_else(|e| panic!("missing setup data was rejected: {e}"));
        assert!(created.metadata.setup_data.is_none());
    }

    /// An invalid payload must be rejected with a non-empty message.
    pub fn contract_invalid_setup_rejected<G: Game>(
        game: &G,
        setup_data: G::SetupData,
        num_players: u32,
    ) {
        let result = create_match(
            game,
            MatchParams {
                num_players: Some(num_players),
                setup_data: Some(setup_data),
                ..MatchParams::default()
            },
        );
        match result {
            Ok(_) => panic!("invalid setup data must be rejected"),
            Err(e) => assert!(!e.message.is_empty(), "rejection message must not be empty"),
        }
    }
}
