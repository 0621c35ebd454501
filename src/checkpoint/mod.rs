//! Checkpoint classification.
//!
//! The raceway reports every checkpoint crossing as a single opaque key.
//! Two keys are reserved: one closes a lap, the other marks the bonus
//! checkpoint. Every other key is noise from the point of view of the
//! lap timer and classifies as [`CheckpointKind::Unrecognized`].

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key the raceway sends when the vehicle closes a lap.
pub const DEFAULT_LAP_KEY: char = 'C';

/// Key the raceway sends when the vehicle crosses the bonus checkpoint.
pub const DEFAULT_BONUS_KEY: char = 'K';

/// Raw identifier of a checkpoint crossing as delivered by the link.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CheckpointKey(pub char);

impl From<char> for CheckpointKey {
    fn from(key: char) -> Self {
        Self(key)
    }
}

impl fmt::Display for CheckpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Semantic meaning of a checkpoint crossing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CheckpointKind {
    LapCompletion,
    BonusCheckpoint,
    /// Any key that is not reserved. An expected outcome, not an error.
    Unrecognized,
}

/// The pair of reserved keys, passed explicitly to whoever builds a timer.
///
/// # Example
///
/// ```rust
/// use lapcount::checkpoint::{CheckpointKeys, CheckpointKind};
///
/// let keys = CheckpointKeys::default();
/// assert_eq!(keys.classify('C'), CheckpointKind::LapCompletion);
/// assert_eq!(keys.classify('K'), CheckpointKind::BonusCheckpoint);
/// assert_eq!(keys.classify('x'), CheckpointKind::Unrecognized);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawCheckpointKeys")]
pub struct CheckpointKeys {
    lap: CheckpointKey,
    bonus: CheckpointKey,
}

impl Default for CheckpointKeys {
    fn default() -> Self {
        Self {
            lap: CheckpointKey(DEFAULT_LAP_KEY),
            bonus: CheckpointKey(DEFAULT_BONUS_KEY),
        }
    }
}

/// Unvalidated key pair as it appears in configuration files.
#[derive(Deserialize)]
#[serde(default)]
struct RawCheckpointKeys {
    lap: CheckpointKey,
    bonus: CheckpointKey,
}

impl Default for RawCheckpointKeys {
    fn default() -> Self {
        let keys = CheckpointKeys::default();
        Self {
            lap: keys.lap,
            bonus: keys.bonus,
        }
    }
}

impl TryFrom<RawCheckpointKeys> for CheckpointKeys {
    type Error = ConfigError;

    fn try_from(raw: RawCheckpointKeys) -> Result<Self, Self::Error> {
        Self::new(raw.lap.0, raw.bonus.0)
    }
}

impl CheckpointKeys {
    /// Build a key pair, rejecting a lap key equal to the bonus key.
    pub fn new(lap: char, bonus: char) -> Result<Self, ConfigError> {
        let keys = Self {
            lap: CheckpointKey(lap),
            bonus: CheckpointKey(bonus),
        };
        keys.validate()?;
        Ok(keys)
    }

    /// Parse keys from JSON; missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawCheckpointKeys = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn lap(&self) -> CheckpointKey {
        self.lap
    }

    pub fn bonus(&self) -> CheckpointKey {
        self.bonus
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lap == self.bonus {
            return Err(ConfigError::KeyCollision { key: self.lap.0 });
        }
        Ok(())
    }

    /// Map a raw key to its meaning. Pure; never fails.
    pub fn classify(&self, key: impl Into<CheckpointKey>) -> CheckpointKind {
        let key = key.into();
        if key == self.lap {
            CheckpointKind::LapCompletion
        } else if key == self.bonus {
            CheckpointKind::BonusCheckpoint
        } else {
            CheckpointKind::Unrecognized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_match_raceway_firmware() {
        let keys = CheckpointKeys::default();
        assert_eq!(keys.lap, CheckpointKey('C'));
        assert_eq!(keys.bonus, CheckpointKey('K'));
    }

    #[test]
    fn classify_is_case_sensitive() {
        let keys = CheckpointKeys::default();
        assert_eq!(keys.classify('c'), CheckpointKind::Unrecognized);
        assert_eq!(keys.classify('k'), CheckpointKind::Unrecognized);
    }

    #[test]
    fn classify_is_deterministic() {
        let keys = CheckpointKeys::default();
        for key in ['C', 'K', 'Z', '\0'] {
            assert_eq!(keys.classify(key), keys.classify(key));
        }
    }

    #[test]
    fn custom_keys_replace_defaults() {
        let keys = CheckpointKeys::new('L', 'B').unwrap();
        assert_eq!(keys.classify('L'), CheckpointKind::LapCompletion);
        assert_eq!(keys.classify('B'), CheckpointKind::BonusCheckpoint);
        assert_eq!(keys.classify('C'), CheckpointKind::Unrecognized);
    }

    #[test]
    fn colliding_keys_are_rejected() {
        let err = CheckpointKeys::new('C', 'C').unwrap_err();
        assert!(matches!(err, ConfigError::KeyCollision { key: 'C' }));
    }

    #[test]
    fn from_json_cannot_bypass_collision_check() {
        let err = CheckpointKeys::from_json(r#"{ "lap": "X", "bonus": "X" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::KeyCollision { key: 'X' }));
    }

    #[test]
    fn deserialize_rejects_colliding_keys() {
        let result: Result<CheckpointKeys, _> =
            serde_json::from_str(r#"{ "lap": "K", "bonus": "K" }"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn keys_round_trip_through_json() {
        let keys = CheckpointKeys::new('L', 'B').unwrap();
        let json = serde_json::to_string(&keys).unwrap();
        let decoded: CheckpointKeys = serde_json::from_str(&json).unwrap();
        assert_eq!(keys, decoded);
    }

    #[test]
    fn accessors_expose_reserved_keys() {
        let keys = CheckpointKeys::new('L', 'B').unwrap();
        assert_eq!(keys.lap(), CheckpointKey('L'));
        assert_eq!(keys.bonus(), CheckpointKey('B'));
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let keys = CheckpointKeys::from_json(r#"{ "bonus": "B" }"#).unwrap();
        assert_eq!(keys.lap, CheckpointKey(DEFAULT_LAP_KEY));
        assert_eq!(keys.bonus, CheckpointKey('B'));
    }

    #[test]
    fn from_json_rejects_collisions() {
        let err = CheckpointKeys::from_json(r#"{ "lap": "K" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::KeyCollision { key: 'K' }));
    }
}
