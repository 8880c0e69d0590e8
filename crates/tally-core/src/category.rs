//! Category enum as the single source of truth for category keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of event kinds a user can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Water,
    Restroom,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 2] = [Self::Water, Self::Restroom];

    /// Canonical lowercase key used for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Restroom => "restroom",
        }
    }

    /// Human-readable label for headings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Restroom => "Restroom",
        }
    }

    /// Case-insensitive comparison against a raw category string.
    pub fn matches(&self, raw: &str) -> bool {
        raw.parse::<Self>().is_ok_and(|parsed| parsed == *self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "water" | "agua" => Ok(Self::Water),
            "restroom" | "baño" | "bano" => Ok(Self::Restroom),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown category strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}
