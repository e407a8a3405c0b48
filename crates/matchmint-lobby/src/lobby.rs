use std::collections::HashMap;

use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use matchmint_core::create::{MatchParams, effective_num_players};
use matchmint_core::initialize::State;
use matchmint_core::match_data::MatchData;
use matchmint_core::player::{PlayerId, PlayerMetadata};
use matchmint_core::request::CreateMatchRequest;
use matchmint_core::slots::{first_available_player_id, num_players};

use crate::config::LobbyConfig;
use crate::error::LobbyError;
use crate::registry::GameRegistry;

/// Identifier of a stored match.
pub type MatchId = String;

/// Request to take a seat in a match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub player_name: String,
    /// Seat to claim. The lowest open seat is used when absent.
    #[serde(default, rename = "playerID")]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Seat and secret handed back to a player that joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    #[serde(rename = "playerID")]
    pub player_id: PlayerId,
    pub player_credentials: String,
}

/// Changes a seated player may make to their own seat.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayer {
    #[serde(default)]
    pub new_name: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Optional bounds on `updated_at` when listing matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    /// Only matches last updated strictly before this time (epoch ms).
    #[serde(default)]
    pub updated_before: Option<i64>,
    /// Only matches last updated strictly after this time (epoch ms).
    #[serde(default)]
    pub updated_after: Option<i64>,
}

impl ListFilter {
    fn accepts(&self, metadata: &MatchData) -> bool {
        self.updated_before.is_none_or(|t| metadata.updated_at < t)
            && self.updated_after.is_none_or(|t| metadata.updated_at > t)
    }
}

/// A match as shown to anyone who can see it. Credentials are stripped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMatch {
    #[serde(rename = "matchID")]
    pub match_id: MatchId,
    #[serde(flatten)]
    pub metadata: MatchData,
}

struct MatchEntry {
    metadata: MatchData,
    state: State<Value>,
}

/// Manages all stored matches and the games they are played with.
pub struct Lobby {
    registry: GameRegistry,
    matches: HashMap<MatchId, MatchEntry>,
    config: LobbyConfig,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(GameRegistry::new(), LobbyConfig::default())
    }
}

impl Lobby {
    pub fn new(registry: GameRegistry, config: LobbyConfig) -> Self {
        Self {
            registry,
            matches: HashMap::new(),
            config,
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn match_exists(&self, match_id: &str) -> bool {
        self.matches.contains_key(match_id)
    }

    /// Create a match from a raw request body. Returns the new match id.
    pub fn create_match(
        &mut self,
        game_name: &str,
        request: CreateMatchRequest,
    ) -> Result<MatchId, LobbyError> {
        self.create_match_with_params(game_name, request.into_params())
    }

    /// Create a match from already-decoded parameters.
    pub fn create_match_with_params(
        &mut self,
        game_name: &str,
        params: MatchParams<Value>,
    ) -> Result<MatchId, LobbyError> {
        if self.matches.len() >= self.config.max_matches {
            tracing::warn!(max = self.config.max_matches, "Lobby full, refusing new match");
            return Err(LobbyError::LobbyFull(self.config.max_matches));
        }
        let game = self
            .registry
            .get(game_name)
            .ok_or_else(|| LobbyError::UnknownGame(game_name.to_string()))?;

        let requested = effective_num_players(params.num_players);
        let max = self.config.max_players_per_match;
        if requested > max {
            tracing::warn!(game = game_name, requested, max, "Refusing oversized match");
            return Err(LobbyError::TooManyPlayers { requested, max });
        }

        let created = game.create_match(params)?;
        let match_id = generate_unique_match_id(&self.matches, self.config.match_id_length);
        tracing::info!(
            match_id = %match_id,
            game = game_name,
            num_players = created.metadata.players.len(),
            unlisted = created.metadata.unlisted,
            "Match created"
        );
        self.matches.insert(
            match_id.clone(),
            MatchEntry {
                metadata: created.metadata,
                state: created.initial_state,
            },
        );
        Ok(match_id)
    }

    /// Seat a player. Without an explicit seat the lowest open one is used.
    pub fn join_match(
        &mut self,
        match_id: &str,
        request: JoinRequest,
    ) -> Result<JoinResponse, LobbyError> {
        if request.player_name.is_empty() {
            return Err(LobbyError::MissingPlayerName);
        }
        let entry = self.entry_mut(match_id)?;
        let players = &entry.metadata.players;

        let player_id = match request.player_id {
            Some(id) => {
                let seat = players.get(&id).ok_or(LobbyError::PlayerNotFound(id))?;
                if !seat.is_open() {
                    return Err(LobbyError::SeatTaken(id));
                }
                id
            },
            None => first_available_player_id(players).ok_or_else(|| LobbyError::MatchFull {
                match_id: match_id.to_string(),
                num_players: num_players(players),
            })?,
        };

        let credentials = Uuid::new_v4().to_string();
        let seat = entry
            .metadata
            .players
            .get_mut(&player_id)
            .ok_or(LobbyError::PlayerNotFound(player_id))?;
        seat.name = Some(request.player_name);
        seat.credentials = Some(credentials.clone());
        if let Some(data) = request.data {
            seat.data = Some(data);
        }
        entry.metadata.touch();

        tracing::info!(match_id, player_id, "Player joined match");
        Ok(JoinResponse {
            player_id,
            player_credentials: credentials,
        })
    }

    /// Give up a seat. Returns `true` when the match was removed because no
    /// seated players remain.
    pub fn leave_match(
        &mut self,
        match_id: &str,
        player_id: PlayerId,
        credentials: &str,
    ) -> Result<bool, LobbyError> {
        let entry = self.entry_mut(match_id)?;
        let seat = authorized_seat(&mut entry.metadata, player_id, credentials)?;
        seat.name = None;
        seat.credentials = None;

        if entry.metadata.has_named_players() {
            entry.metadata.touch();
            tracing::info!(match_id, player_id, "Player left match");
            return Ok(false);
        }

        self.matches.remove(match_id);
        tracing::info!(match_id, player_id, "Last player left, match removed");
        Ok(true)
    }

    /// Rename a seated player and/or replace their data.
    pub fn update_player(
        &mut self,
        match_id: &str,
        player_id: PlayerId,
        credentials: &str,
        update: UpdatePlayer,
    ) -> Result<(), LobbyError> {
        if update.new_name.is_none() && update.data.is_none() {
            return Err(LobbyError::NothingToUpdate);
        }
        if update.new_name.as_deref() == Some("") {
            return Err(LobbyError::MissingPlayerName);
        }
        let entry = self.entry_mut(match_id)?;
        let seat = authorized_seat(&mut entry.metadata, player_id, credentials)?;
        if let Some(name) = update.new_name {
            seat.name = Some(name);
        }
        if let Some(data) = update.data {
            seat.data = Some(data);
        }
        entry.metadata.touch();
        tracing::debug!(match_id, player_id, "Player updated");
        Ok(())
    }

    /// Public view of one match.
    pub fn get_match(&self, match_id: &str) -> Result<PublicMatch, LobbyError> {
        let entry = self.entry(match_id)?;
        Ok(PublicMatch {
            match_id: match_id.to_string(),
            metadata: entry.metadata.redacted(),
        })
    }

    /// Listed matches of a game, oldest first. Unlisted matches never appear.
    pub fn list_matches(&self, game_name: &str, filter: ListFilter) -> Vec<PublicMatch> {
        let mut listed: Vec<PublicMatch> = self
            .matches
            .iter()
            .filter(|(_, e)| {
                e.metadata.game_name == game_name
                    && !e.metadata.unlisted
                    && filter.accepts(&e.metadata)
            })
            .map(|(id, e)| PublicMatch {
                match_id: id.clone(),
                metadata: e.metadata.redacted(),
            })
            .collect();
        listed.sort_by(|a, b| {
            a.metadata
                .created_at
                .cmp(&b.metadata.created_at)
                .then_with(|| a.match_id.cmp(&b.match_id))
        });
        listed
    }

    /// Current simulation state of a match.
    pub fn state(&self, match_id: &str) -> Result<&State<Value>, LobbyError> {
        Ok(&self.entry(match_id)?.state)
    }

    fn entry(&self, match_id: &str) -> Result<&MatchEntry, LobbyError> {
        self.matches
            .get(match_id)
            .ok_or_else(|| LobbyError::MatchNotFound(match_id.to_string()))
    }

    fn entry_mut(&mut self, match_id: &str) -> Result<&mut MatchEntry, LobbyError> {
        self.matches
            .get_mut(match_id)
            .ok_or_else(|| LobbyError::MatchNotFound(match_id.to_string()))
    }
}

/// Seat of `player_id`, provided `credentials` match the ones issued on join.
fn authorized_seat<'a>(
    metadata: &'a mut MatchData,
    player_id: PlayerId,
    credentials: &str,
) -> Result<&'a mut PlayerMetadata, LobbyError> {
    let seat = metadata
        .players
        .get_mut(&player_id)
        .ok_or(LobbyError::PlayerNotFound(player_id))?;
    if seat.credentials.as_deref() != Some(credentials) {
        tracing::debug!(player_id, "Rejected player credentials");
        return Err(LobbyError::InvalidCredentials(player_id));
    }
    Ok(seat)
}

fn generate_match_id(length: usize) -> MatchId {
    Alphanumeric.sample_string(&mut rand::rng(), length)
}

fn generate_unique_match_id(existing: &HashMap<MatchId, MatchEntry>, length: usize) -> MatchId {
    loop {
        let id = generate_match_id(length);
        if !existing.contains_key(&id) {
            return id;
        }
    }
}
