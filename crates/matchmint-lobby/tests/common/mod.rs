#![allow(dead_code)]

use serde_json::Value;

use matchmint_core::request::CreateMatchRequest;
use matchmint_core::test_helpers::{RejectingGame, SimpleGame};
use matchmint_lobby::{GameRegistry, JoinRequest, JoinResponse, Lobby, LobbyConfig, MatchId};
use matchmint_tictactoe::TicTacToe;

/// Lobby with tic-tac-toe, a permissive "chess" and an always-failing "broken" game.
pub fn test_lobby() -> Lobby {
    test_lobby_with(LobbyConfig::default())
}

pub fn test_lobby_with(config: LobbyConfig) -> Lobby {
    let mut registry = GameRegistry::empty();
    registry.register(TicTacToe);
    registry.register(SimpleGame::new("chess"));
    registry.register(RejectingGame {
        name: "broken",
        message: "bad config",
    });
    Lobby::new(registry, config)
}

/// Decode a JSON body the way a transport would.
pub fn body(json: Value) -> CreateMatchRequest {
    serde_json::from_value(json).expect("request body must decode")
}

pub fn create(lobby: &mut Lobby, game: &str, json: Value) -> MatchId {
    lobby
        .create_match(game, body(json))
        .expect("match creation must succeed")
}

pub fn join(lobby: &mut Lobby, match_id: &str, name: &str) -> JoinResponse {
    lobby
        .join_match(
            match_id,
            JoinRequest {
                player_name: name.to_string(),
                ..JoinRequest::default()
            },
        )
        .expect("join must succeed")
}
