//! Seat queries over a match's player map. Neither query mutates its input.

use crate::match_data::Players;
use crate::player::PlayerId;

/// Number of seats in the match, claimed or not.
pub fn num_players(players: &Players) -> usize {
    players.len()
}

/// Lowest-indexed open seat, if any.
///
/// Scans ids `0..num_players` in ascending order. Returns `None` when every
/// seat has a name or the match has no seats.
pub fn first_available_player_id(players: &Players) -> Option<PlayerId> {
    let count = PlayerId::try_from(num_players(players)).unwrap_or(PlayerId::MAX);
    players
        .range(..count)
        .find(|(_, seat)| seat.is_open())
        .map(|(id, _)| *id)
}
