//! Outcome of a single pairing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a pairing, read from the responder's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Draw,
    Win,
    Lose,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Draw => "Draw",
            Outcome::Win => "Win",
            Outcome::Lose => "Lose",
        }
    }

    /// The same pairing seen from the other side
    pub fn inverse(&self) -> Outcome {
        match self {
            Outcome::Draw => Outcome::Draw,
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
