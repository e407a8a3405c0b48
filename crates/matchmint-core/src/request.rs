//! Decoding of loosely-typed "create match" request bodies.
//!
//! Clients send whatever JSON they like. Malformed player counts fall back to
//! the default, visibility follows JSON truthiness and an explicit `null`
//! setup payload is kept apart from a missing one.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::create::MatchParams;
use crate::match_data::deserialize_present;

/// Body of a "create match" request as a transport would receive it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMatchRequest {
    /// `None` for anything that is not a positive whole number.
    #[serde(deserialize_with = "lenient_num_players")]
    pub num_players: Option<u32>,
    #[serde(deserialize_with = "deserialize_present")]
    pub setup_data: Option<Value>,
    #[serde(deserialize_with = "truthy")]
    pub unlisted: bool,
    #[serde(deserialize_with = "optional_string")]
    pub password: Option<String>,
}

impl CreateMatchRequest {
    pub fn into_params(self) -> MatchParams<Value> {
        MatchParams {
            num_players: self.num_players,
            setup_data: self.setup_data,
            unlisted: Some(self.unlisted),
            password: self.password,
        }
    }
}

impl From<CreateMatchRequest> for MatchParams<Value> {
    fn from(request: CreateMatchRequest) -> Self {
        request.into_params()
    }
}

/// JSON truthiness: `false`, `0`, `""` and `null` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Positive whole number that fits a seat count, else `None`.
pub fn parse_num_players(value: &Value) -> Option<u32> {
    let Value::Number(n) = value else {
        return None;
    };
    let whole = match n.as_u64() {
        Some(n) => n,
        None => {
            let f = n.as_f64()?;
            if f.fract() != 0.0 || f < 0.0 || f > f64::from(u32::MAX) {
                return None;
            }
            f as u64
        },
    };
    u32::try_from(whole).ok().filter(|&n| n > 0)
}

fn lenient_num_players<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    Ok(parse_num_players(&Value::deserialize(deserializer)?))
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}
