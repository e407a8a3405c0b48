use serde::{Deserialize, Serialize};

use matchmint_core::game_trait::Game;
use matchmint_core::initialize::Ctx;
use matchmint_core::player::PlayerId;

/// Smallest supported board edge.
pub const MIN_BOARD_SIZE: u8 = 3;
/// Largest supported board edge.
pub const MAX_BOARD_SIZE: u8 = 5;

/// Options a match creator may choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicTacToeSetup {
    /// Edge length of the square board.
    pub board_size: u8,
    /// Seat that places the first mark.
    pub starting_player: PlayerId,
}

impl Default for TicTacToeSetup {
    fn default() -> Self {
        Self {
            board_size: MIN_BOARD_SIZE,
            starting_player: 0,
        }
    }
}

/// Initial board handed to the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicTacToeState {
    pub board_size: u8,
    /// Row-major cells; `Some(seat)` once marked.
    pub cells: Vec<Option<PlayerId>>,
    pub to_move: PlayerId,
}

/// Two-player tic-tac-toe.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    pub const NAME: &'static str = "tic-tac-toe";
    pub const PLAYERS: u32 = 2;
}

impl Game for TicTacToe {
    type SetupData = TicTacToeSetup;
    type State = TicTacToeState;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate_setup_data(
        &self,
        setup_data: Option<&TicTacToeSetup>,
        num_players: u32,
    ) -> Option<String> {
        if num_players != Self::PLAYERS {
            return Some(format!(
                "{} needs exactly {} players, got {num_players}",
                Self::NAME,
                Self::PLAYERS
            ));
        }
        let setup = setup_data?;
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&setup.board_size) {
            return Some(format!(
                "boardSize must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
                setup.board_size
            ));
        }
        if setup.starting_player >= num_players {
            return Some(format!(
                "startingPlayer {} is not a seat in a {num_players}-player match",
                setup.starting_player
            ));
        }
        None
    }

    fn setup(&self, _ctx: &Ctx, setup_data: Option<&TicTacToeSetup>) -> TicTacToeState {
        let setup = setup_data.cloned().unwrap_or_default();
        let edge = usize::from(setup.board_size);
        TicTacToeState {
            board_size: setup.board_size,
            cells: vec![None; edge * edge],
            to_move: setup.starting_player,
        }
    }
}
