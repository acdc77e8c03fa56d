//! Validated move set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Position of a move within its MoveSet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveIndex(pub usize);

impl MoveIndex {
    pub fn get(self) -> usize {
        self.0
    }

    /// Index as shown in menus (1-based)
    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for MoveIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rule the move list broke
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveSetViolation {
    #[error("At least 3 moves are needed to play, got {count} (example: Rock Paper Scissors)")]
    TooFewMoves { count: usize },

    #[error("An odd number of moves is needed, got {count}")]
    EvenMoveCount { count: usize },

    #[error("Moves must be distinct; repeated: {}", .names.join(", "))]
    DuplicateMoves { names: Vec<String> },
}

/// Every violation found in a rejected move list
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid move set: {}", summary(.violations))]
pub struct MoveSetError {
    pub violations: Vec<MoveSetViolation>,
}

fn summary(violations: &[MoveSetViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MoveSetError {
    /// Names reported as repeated, if any
    pub fn duplicates(&self) -> &[String] {
        self.violations
            .iter()
            .find_map(|v| match v {
                MoveSetViolation::DuplicateMoves { names } => Some(names.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

/// Ordered, distinct move names; odd count, at least 3.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveSet {
    names: Vec<String>,
}

impl MoveSet {
    /// Validate a list of move names, collecting every violation.
    pub fn new<I, S>(names: I) -> Result<Self, MoveSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let count = names.len();
        let mut violations = Vec::new();

        if count < 3 {
            violations.push(MoveSetViolation::TooFewMoves { count });
        }
        if count > 0 && count % 2 == 0 {
            violations.push(MoveSetViolation::EvenMoveCount { count });
        }
        let repeated = repeated_names(&names);
        if !repeated.is_empty() {
            violations.push(MoveSetViolation::DuplicateMoves { names: repeated });
        }

        if violations.is_empty() {
            Ok(Self { names })
        } else {
            Err(MoveSetError { violations })
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name at `index`, if in range
    pub fn name(&self, index: MoveIndex) -> Option<&str> {
        self.names.get(index.0).map(String::as_str)
    }

    /// Index of a move by exact (case-sensitive) name
    pub fn position(&self, name: &str) -> Option<MoveIndex> {
        self.names.iter().position(|n| n == name).map(MoveIndex)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MoveIndex, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (MoveIndex(i), n.as_str()))
    }
}

/// Names occurring more than once, each listed once in first-seen order.
fn repeated_names(names: &[String]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name.as_str()).or_default() += 1;
    }
    let mut repeated: Vec<String> = Vec::new();
    for name in names {
        if counts[name.as_str()] > 1 && !repeated.contains(name) {
            repeated.push(name.clone());
        }
    }
    repeated
}
