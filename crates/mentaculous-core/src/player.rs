//! Player identity.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable MLB person identifier.
///
/// The stats API sends it as a JSON number, while the persisted ledger keys
/// and display order carry it as a string. Serialization always produces the
/// string form; deserialization accepts either.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PlayerId)
    }
}

impl From<u64> for PlayerId {
    fn from(value: u64) -> Self {
        PlayerId(value)
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlayerIdVisitor;

        impl Visitor<'_> for PlayerIdVisitor {
            type Value = PlayerId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a player id as an integer or a numeric string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PlayerId, E> {
                Ok(PlayerId(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<PlayerId, E> {
                u64::try_from(v)
                    .map(PlayerId)
                    .map_err(|_| E::custom(format!("negative player id {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PlayerId, E> {
                v.parse()
                    .map_err(|_| E::custom(format!("invalid player id {v:?}")))
            }
        }

        deserializer.deserialize_any(PlayerIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_player_id_accepts_number_and_string() {
        let from_number: PlayerId = serde_json::from_str("592450").unwrap();
        let from_string: PlayerId = serde_json::from_str("\"592450\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"592450\"");
    }

    #[test]
    fn test_player_id_as_map_key() {
        let map: BTreeMap<PlayerId, u32> = serde_json::from_str(r#"{"42": 1, "7": 2}"#).unwrap();
        assert_eq!(map.get(&PlayerId(42)), Some(&1));
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"7":2,"42":1}"#);
    }

    #[test]
    fn test_player_id_rejects_garbage() {
        assert!(serde_json::from_str::<PlayerId>("\"abc\"").is_err());
        assert!(serde_json::from_str::<PlayerId>("-3").is_err());
    }
}
