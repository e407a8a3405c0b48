use crate::game_trait::Game;
use crate::match_data::{MatchData, Players};
use crate::player::PlayerMetadata;
use crate::time::now_millis;

/// Build the metadata record of a new match.
///
/// Produces exactly `num_players` open seats with ids `0..num_players`. The
/// count is taken as given; defaulting happens in
/// [`create_match`](crate::create::create_match). `setup_data` is recorded
/// only when supplied.
pub fn create_metadata<G: Game + ?Sized>(
    game: &G,
    num_players: u32,
    setup_data: Option<G::SetupData>,
    unlisted: Option<bool>,
    password: Option<String>,
) -> MatchData<G::SetupData> {
    let players: Players = (0..num_players)
        .map(|id| (id, PlayerMetadata::open(id)))
        .collect();
    let now = now_millis();

    MatchData {
        game_name: game.name().to_string(),
        unlisted: unlisted.unwrap_or(false),
        password,
        players,
        created_at: now,
        updated_at: now,
        setup_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize::Ctx;
    use serde_json::{Value, json};

    struct Chess;

    impl Game for Chess {
        type SetupData = Value;
        type State = ();

        fn name(&self) -> &str {
            "chess"
        }

        fn setup(&self, _ctx: &Ctx, _setup_data: Option<&Value>) {}
    }

    #[test]
    fn copies_game_name_and_stamps_equal_times() {
        let data = create_metadata(&Chess, 2, None, None, None);
        assert_eq!(data.game_name, "chess");
        assert_eq!(data.created_at, data.updated_at);
        assert!(data.created_at > 0);
    }

    #[test]
    fn zero_players_yields_no_seats() {
        let data = create_metadata(&Chess, 0, None, None, None);
        assert!(data.players.is_empty());
    }

    #[test]
    fn unlisted_defaults_to_false() {
        assert!(!create_metadata(&Chess, 2, None, None, None).unlisted);
        assert!(!create_metadata(&Chess, 2, None, Some(false), None).unlisted);
        assert!(create_metadata(&Chess, 2, None, Some(true), None).unlisted);
    }

    #[test]
    fn setup_data_omitted_when_not_supplied() {
        let data = create_metadata(&Chess, 2, None, None, None);
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("setupData").is_none());
    }

    #[test]
    fn setup_data_kept_when_supplied_even_if_null() {
        let data = create_metadata(&Chess, 2, Some(Value::Null), None, None);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json.get("setupData"), Some(&Value::Null));

        let data = create_metadata(&Chess, 2, Some(json!({ "variant": "960" })), None, None);
        assert_eq!(data.setup_data, Some(json!({ "variant": "960" })));
    }

    #[test]
    fn password_is_stored_verbatim() {
        let data = create_metadata(&Chess, 2, None, None, Some("hunter2".to_string()));
        assert_eq!(data.password.as_deref(), Some("hunter2"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn seats_are_dense_and_self_keyed(n in 0u32..64) {
                let data = create_metadata(&Chess, n, None, None, None);
                prop_assert_eq!(data.players.len(), n as usize);
                for (expected, (key, seat)) in (0..n).zip(data.players.iter()) {
                    prop_assert_eq!(*key, expected);
                    prop_assert_eq!(seat.id, expected);
                    prop_assert!(seat.is_open());
                }
            }

            #[test]
            fn wire_keys_are_decimal_seat_indices(n in 1u32..20) {
                let data = create_metadata(&Chess, n, None, None, None);
                let json = serde_json::to_value(&data).unwrap();
                let players = json["players"].as_object().unwrap();
                prop_assert_eq!(players.len(), n as usize);
                for i in 0..n {
                    prop_assert_eq!(&players[&i.to_string()]["id"], &json!(i));
                }
            }
        }
    }
}
