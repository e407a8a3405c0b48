use serde::{Deserialize, Serialize};

/// Seat index of a player within a match. Seats are numbered from 0.
pub type PlayerId = u32;

/// One seat of a match, as stored in the match metadata.
///
/// A seat without a `name` is open and can be claimed by a joining player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetadata {
    pub id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Secret handed to the player that claimed this seat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
    /// Arbitrary per-player payload supplied on join or update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_connected: Option<bool>,
}

impl PlayerMetadata {
    /// An unclaimed seat.
    pub fn open(id: PlayerId) -> Self {
        Self {
            id,
            name: None,
            credentials: None,
            data: None,
            is_connected: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.name.is_none()
    }
}
