use serde::{Deserialize, Serialize};

use crate::game_trait::Game;
use crate::player::PlayerId;

/// Turn bookkeeping shared by every game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ctx {
    pub num_players: u32,
    pub play_order: Vec<PlayerId>,
    pub play_order_pos: usize,
    pub current_player: PlayerId,
    pub turn: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl Ctx {
    /// Context of a match that has not started its first turn.
    pub fn new(num_players: u32) -> Self {
        Self {
            num_players,
            play_order: (0..num_players).collect(),
            play_order_pos: 0,
            current_player: 0,
            turn: 0,
            phase: None,
        }
    }
}

/// Full simulation state of a match: game-specific `G` plus shared context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State<G> {
    #[serde(rename = "G")]
    pub g: G,
    pub ctx: Ctx,
    /// Incremented by the rule engine on every accepted update.
    #[serde(rename = "_stateID")]
    pub state_id: u64,
}

/// Builds the initial simulation state of a new match.
pub trait StateInitializer {
    fn initialize<G: Game + ?Sized>(
        &self,
        game: &G,
        num_players: u32,
        setup_data: Option<&G::SetupData>,
    ) -> State<G::State>;
}

/// Default initializer: fresh [`Ctx`] plus the game's own `setup`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitializeGame;

impl StateInitializer for InitializeGame {
    fn initialize<G: Game + ?Sized>(
        &self,
        game: &G,
        num_players: u32,
        setup_data: Option<&G::SetupData>,
    ) -> State<G::State> {
        let ctx = Ctx::new(num_players);
        let g = game.setup(&ctx, setup_data);
        State {
            g,
            ctx,
            state_id: 0,
        }
    }
}
