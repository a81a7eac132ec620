//! Identifiers for lessons and badges.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Error returned when an identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Identifier was empty or only whitespace
    #[error("{kind} must not be empty")]
    Empty {
        /// Which kind of identifier was rejected
        kind: &'static str,
    },
}

fn normalize(raw: &str, kind: &'static str) -> Result<String, IdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty { kind });
    }
    Ok(trimmed.to_string())
}

/// Stable identifier of a lesson, e.g. `lesson-1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId(String);

impl LessonId {
    /// Parse a lesson id. Surrounding whitespace is trimmed.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        normalize(raw, "lesson id").map(Self)
    }

    /// Used for the built-in catalog, whose ids are known to be valid.
    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name of an achievement badge, e.g. `New Bass Rookie`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BadgeName(String);

impl BadgeName {
    /// Parse a badge name. Surrounding whitespace is trimmed.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        normalize(raw, "badge name").map(Self)
    }

    /// The badge every new learner starts with.
    pub fn rookie() -> Self {
        Self(crate::DEFAULT_BADGE.to_string())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_string_id {
    ($ty:ident) => {
        impl TryFrom<String> for $ty {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $ty {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

impl_string_id!(LessonId);
impl_string_id!(BadgeName);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id = LessonId::parse("  lesson-1 ").unwrap();
        assert_eq!(id.as_str(), "lesson-1");
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert_eq!(
            LessonId::parse("   "),
            Err(IdError::Empty { kind: "lesson id" })
        );
        assert!(BadgeName::parse("").is_err());
    }

    #[test]
    fn test_serde_rejects_empty_badge() {
        let parsed: Result<BadgeName, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let badge: BadgeName = serde_json::from_str("\"Groove Keeper\"").unwrap();
        assert_eq!(serde_json::to_string(&badge).unwrap(), "\"Groove Keeper\"");
    }
}
