use crate::error::SetupDataError;
use crate::game_trait::Game;
use crate::initialize::{InitializeGame, State, StateInitializer};
use crate::match_data::MatchData;
use crate::metadata::create_metadata;

/// Player count used when the creator asks for none (or for zero).
pub const DEFAULT_NUM_PLAYERS: u32 = 2;

/// Caller-supplied parameters for a new match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchParams<S> {
    /// `None` and `Some(0)` both fall back to [`DEFAULT_NUM_PLAYERS`].
    pub num_players: Option<u32>,
    pub setup_data: Option<S>,
    pub unlisted: Option<bool>,
    pub password: Option<String>,
}

impl<S> Default for MatchParams<S> {
    fn default() -> Self {
        Self {
            num_players: None,
            setup_data: None,
            unlisted: None,
            password: None,
        }
    }
}

/// A successfully created match: its metadata and its initial state.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedMatch<S, G> {
    pub metadata: MatchData<S>,
    pub initial_state: State<G>,
}

/// Player count after applying the default policy.
///
/// A missing or zero count silently becomes [`DEFAULT_NUM_PLAYERS`] instead
/// of failing.
pub fn effective_num_players(requested: Option<u32>) -> u32 {
    match requested {
        Some(n) if n > 0 => n,
        _ => DEFAULT_NUM_PLAYERS,
    }
}

/// Validate the setup payload, then build metadata and initial state.
///
/// Nothing is built when the game rejects the payload.
pub fn create_match<G: Game + ?Sized>(
    game: &G,
    params: MatchParams<G::SetupData>,
) -> Result<CreatedMatch<G::SetupData, G::State>, SetupDataError> {
    create_match_with(&InitializeGame, game, params)
}

/// [`create_match`] with a caller-chosen state initializer.
pub fn create_match_with<G, I>(
    initializer: &I,
    game: &G,
    params: MatchParams<G::SetupData>,
) -> Result<CreatedMatch<G::SetupData, G::State>, SetupDataError>
where
    G: Game + ?Sized,
    I: StateInitializer,
{
    let MatchParams {
        num_players,
        setup_data,
        unlisted,
        password,
    } = params;
    let num_players = effective_num_players(num_players);

    if let Some(message) = game.validate_setup_data(setup_data.as_ref(), num_players) {
        tracing::debug!(
            game = game.name(),
            num_players,
            error = %message,
            "Setup data rejected"
        );
        return Err(SetupDataError::new(message));
    }

    let initial_state = initializer.initialize(game, num_players, setup_data.as_ref());
    let metadata = create_metadata(game, num_players, setup_data, unlisted, password);

    Ok(CreatedMatch {
        metadata,
        initial_state,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::initialize::Ctx;
    use crate::player::PlayerMetadata;
    use serde_json::{Value, json};

    struct Chess;

    impl Game for Chess {
        type SetupData = Value;
        type State = u32;

        fn name(&self) -> &str {
            "chess"
        }

        fn setup(&self, ctx: &Ctx, _setup_data: Option<&Value>) -> u32 {
            ctx.num_players
        }
    }

    /// Rejects every payload and records what it was asked about.
    struct Picky {
        seen_players: Cell<Option<u32>>,
    }

    impl Game for Picky {
        type SetupData = Value;
        type State = ();

        fn name(&self) -> &str {
            "picky"
        }

        fn validate_setup_data(
            &self,
            _setup_data: Option<&Value>,
            num_players: u32,
        ) -> Option<String> {
            self.seen_players.set(Some(num_players));
            Some("bad config".to_string())
        }

        fn setup(&self, _ctx: &Ctx, _setup_data: Option<&Value>) {
            panic!("setup must not run for rejected payloads");
        }
    }

    /// Accepts only payloads that name at most `num_players` colors.
    struct Colors;

    impl Game for Colors {
        type SetupData = Vec<String>;
        type State = Vec<String>;

        fn name(&self) -> &str {
            "colors"
        }

        fn validate_setup_data(
            &self,
            setup_data: Option<&Vec<String>>,
            num_players: u32,
        ) -> Option<String> {
            match setup_data {
                Some(colors) if colors.len() > num_players as usize => {
                    Some(format!("at most {num_players} colors"))
                },
                _ => None,
            }
        }

        fn setup(&self, _ctx: &Ctx, setup_data: Option<&Vec<String>>) -> Vec<String> {
            setup_data.cloned().unwrap_or_default()
        }
    }

    struct FixedInitializer;

    impl StateInitializer for FixedInitializer {
        fn initialize<G: Game + ?Sized>(
            &self,
            game: &G,
            num_players: u32,
            setup_data: Option<&G::SetupData>,
        ) -> State<G::State> {
            let mut state = InitializeGame.initialize(game, num_players, setup_data);
            state.state_id = 99;
            state
        }
    }

    #[test]
    fn chess_two_players_without_setup_data() {
        let created = create_match(
            &Chess,
            MatchParams {
                num_players: Some(2),
                unlisted: Some(false),
                ..MatchParams::default()
            },
        )
        .unwrap();

        let players: Vec<_> = created.metadata.players.values().cloned().collect();
        assert_eq!(players, vec![PlayerMetadata::open(0), PlayerMetadata::open(1)]);
        assert_eq!(created.metadata.game_name, "chess");
        assert_eq!(created.metadata.setup_data, None);
        let json = serde_json::to_value(&created.metadata).unwrap();
        assert!(json.get("setupData").is_none());
        assert_eq!(created.initial_state.g, 2);
    }

    #[test]
    fn missing_or_zero_player_count_defaults_to_two() {
        for requested in [None, Some(0)] {
            let created = create_match(
                &Chess,
                MatchParams {
                    num_players: requested,
                    ..MatchParams::default()
                },
            )
            .unwrap();
            assert_eq!(created.metadata.players.len(), 2);
            assert_eq!(created.initial_state.ctx.num_players, 2);
            assert_eq!(created.initial_state.g, 2);
        }
    }

    #[test]
    fn explicit_player_count_is_used() {
        let created = create_match(
            &Chess,
            MatchParams {
                num_players: Some(5),
                ..MatchParams::default()
            },
        )
        .unwrap();
        assert_eq!(created.metadata.players.len(), 5);
        assert_eq!(created.initial_state.ctx.play_order.len(), 5);
    }

    #[test]
    fn validator_message_short_circuits() {
        let game = Picky {
            seen_players: Cell::new(None),
        };
        let err = create_match(
            &game,
            MatchParams {
                num_players: Some(3),
                setup_data: Some(json!({ "anything": true })),
                ..MatchParams::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, SetupDataError::new("bad config"));
        assert_eq!(err.to_string(), "bad config");
        assert_eq!(game.seen_players.get(), Some(3));
    }

    #[test]
    fn validator_sees_defaulted_player_count() {
        let game = Picky {
            seen_players: Cell::new(None),
        };
        let _ = create_match(&game, MatchParams::default());
        assert_eq!(game.seen_players.get(), Some(DEFAULT_NUM_PLAYERS));
    }

    #[test]
    fn typed_setup_data_flows_into_state_and_metadata() {
        let colors = vec!["red".to_string(), "blue".to_string()];
        let created = create_match(
            &Colors,
            MatchParams {
                num_players: Some(2),
                setup_data: Some(colors.clone()),
                password: Some("pw".to_string()),
                ..MatchParams::default()
            },
        )
        .unwrap();
        assert_eq!(created.initial_state.g, colors);
        assert_eq!(created.metadata.setup_data, Some(colors));
        assert_eq!(created.metadata.password.as_deref(), Some("pw"));
    }

    #[test]
    fn typed_validator_depends_on_player_count() {
        let colors = vec!["red".to_string(), "blue".to_string(), "green".to_string()];
        let err = create_match(
            &Colors,
            MatchParams {
                num_players: Some(2),
                setup_data: Some(colors.clone()),
                ..MatchParams::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.message, "at most 2 colors");

        let ok = create_match(
            &Colors,
            MatchParams {
                num_players: Some(3),
                setup_data: Some(colors),
                ..MatchParams::default()
            },
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn custom_initializer_is_used() {
        let created =
            create_match_with(&FixedInitializer, &Chess, MatchParams::default()).unwrap();
        assert_eq!(created.initial_state.state_id, 99);
    }

    #[test]
    fn effective_num_players_policy() {
        assert_eq!(effective_num_players(None), 2);
        assert_eq!(effective_num_players(Some(0)), 2);
        assert_eq!(effective_num_players(Some(1)), 1);
        assert_eq!(effective_num_players(Some(7)), 7);
    }
}
