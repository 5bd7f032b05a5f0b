use serde::{de, ser, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity ranking of an alert.
///
/// Serialized as its numeric score: 1 (critical) to 5 (informational).
/// The ordering follows the score, so `Critical` sorts first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Score 1, demands immediate attention
    Critical,
    /// Score 2
    High,
    /// Score 3
    Medium,
    /// Score 4
    Low,
    /// Score 5, informational only
    Informational,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PriorityError {
    #[error("priority score out of range: {0}")]
    Score(u8),
    #[error("unknown priority: {0}")]
    Name(String),
}

impl Priority {
    /// Get a `str` describing the priority level
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Informational => "informational",
        }
    }

    /// Get the numeric score, 1 (critical) to 5 (informational)
    pub fn score(self) -> u8 {
        match self {
            Priority::Critical => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
            Priority::Informational => 5,
        }
    }

    pub fn from_score(score: u8) -> Result<Priority, PriorityError> {
        match score {
            1 => Ok(Priority::Critical),
            2 => Ok(Priority::High),
            3 => Ok(Priority::Medium),
            4 => Ok(Priority::Low),
            5 => Ok(Priority::Informational),
            n => Err(PriorityError::Score(n)),
        }
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(score) = s.parse::<u8>() {
            return Priority::from_score(score);
        }
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            "informational" | "info" => Ok(Priority::Informational),
            _ => Err(PriorityError::Name(s.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.score())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let score = u8::deserialize(deserializer)?;
        Priority::from_score(score).map_err(de::Error::custom)
    }
}
