//! Outcome relation over an odd-sized, ordered move set.

mod matrix;
mod outcome;

pub use matrix::OutcomeMatrix;
pub use outcome::Outcome;

use thiserror::Error;

/// Errors from building or querying the outcome matrix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("Invalid move set: {size} moves (need an odd number, at least 3)")]
    InvalidMoveSet { size: usize },

    #[error("Move index {index} out of range for {size} moves")]
    IndexOutOfRange { index: usize, size: usize },
}
