//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique round identifier, used to correlate log lines and transcripts
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(Uuid);

impl RoundId {
    /// Create a new random round ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RoundId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundId({})", self.0)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a round stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Commitment published, waiting for the responder
    Committed,
    /// Responder's move recorded and outcome known
    Resolved,
    /// Committer's move and key disclosed
    Revealed,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundPhase::Committed => "committed",
            RoundPhase::Resolved => "resolved",
            RoundPhase::Revealed => "revealed",
        };
        f.write_str(s)
    }
}
