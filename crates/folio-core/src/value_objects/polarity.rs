//! Reaction polarity - the only two values a vote may carry

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::DomainError;

/// Direction of a vote: `+1` (like) or `-1` (dislike)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Like,
    Dislike,
}

impl Polarity {
    /// Signed wire value
    #[inline]
    pub const fn value(self) -> i16 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl TryFrom<i64> for Polarity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Like),
            -1 => Ok(Self::Dislike),
            other => Err(DomainError::InvalidPolarity(other)),
        }
    }
}

impl TryFrom<i16> for Polarity {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Polarity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i16(self.value())
    }
}

impl<'de> Deserialize<'de> for Polarity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_from_signed() {
        assert_eq!(Polarity::try_from(1_i64).unwrap(), Polarity::Like);
        assert_eq!(Polarity::try_from(-1_i64).unwrap(), Polarity::Dislike);
    }

    #[test]
    fn test_polarity_rejects_other_values() {
        for raw in [0_i64, 2, -2, 100] {
            let err = Polarity::try_from(raw).unwrap_err();
            assert!(matches!(err, DomainError::InvalidPolarity(v) if v == raw));
        }
    }

    #[test]
    fn test_polarity_serde() {
        assert_eq!(serde_json::to_string(&Polarity::Dislike).unwrap(), "-1");
        let parsed: Polarity = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Polarity::Like);
        assert!(serde_json::from_str::<Polarity>("0").is_err());
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Polarity::Like.opposite(), Polarity::Dislike);
        assert_eq!(Polarity::Dislike.opposite(), Polarity::Like);
    }
}
