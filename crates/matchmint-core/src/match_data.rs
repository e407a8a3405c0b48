use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::player::{PlayerId, PlayerMetadata};
use crate::time::now_millis;

/// Seats of a match keyed by seat index. Iteration follows seat order.
///
/// On the JSON wire the keys are strings (`"0"`, `"1"`, ...).
pub type Players = BTreeMap<PlayerId, PlayerMetadata>;

/// Persistent metadata record of a match.
///
/// `S` is the game's setup payload type. The lobby stores matches with
/// `S = serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(serialize = "S: Serialize", deserialize = "S: Deserialize<'de>")
)]
pub struct MatchData<S = serde_json::Value> {
    pub game_name: String,
    pub unlisted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub players: Players,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
    /// Absent when the creator supplied no setup payload. A supplied `null`
    /// stays present.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub setup_data: Option<S>,
}

impl<S> MatchData<S> {
    /// Stamp `updated_at` with the current time.
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    /// Replace the setup payload, keeping every other field.
    pub fn map_setup_data<T>(self, f: impl FnOnce(S) -> T) -> MatchData<T> {
        MatchData {
            game_name: self.game_name,
            unlisted: self.unlisted,
            password: self.password,
            players: self.players,
            created_at: self.created_at,
            updated_at: self.updated_at,
            setup_data: self.setup_data.map(f),
        }
    }

    /// Whether any seat has been claimed.
    pub fn has_named_players(&self) -> bool {
        self.players.values().any(|p| !p.is_open())
    }
}

impl<S: Clone> MatchData<S> {
    /// Copy of this record with player credentials removed, safe to hand to
    /// anyone who can see the match.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for player in copy.players.values_mut() {
            player.credentials = None;
        }
        copy
    }
}

/// Deserialize a field that is only `None` when absent, so an explicit
/// `null` survives as `Some(Value::Null)`. Pair with `#[serde(default)]`.
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
