//! Fairplay Core Library
//!
//! Commit-reveal rock-paper-scissors generalized to any odd number of moves:
//! the committer publishes an HMAC-SHA3-256 commitment to its move, the
//! responder answers, and only then are the move and key disclosed so the
//! responder can check nothing changed.

pub mod crypto;
pub mod protocol;
pub mod rules;

pub use crypto::{Commitment, CommitmentKey, CryptoError};
pub use protocol::{
    FixedPicker, GameSession, MoveIndex, MovePicker, MoveSet, MoveSetError, MoveSetViolation,
    RandomPicker, Round, RoundError, RoundId, RoundPhase, RoundResult,
};
pub use rules::{Outcome, OutcomeMatrix, RuleError};
