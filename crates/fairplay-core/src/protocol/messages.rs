//! Reveal transcript handed to the responder after a round.

use crate::crypto::{self, Commitment};
use crate::protocol::{MoveIndex, RoundId};
use crate::rules::Outcome;
use serde::{Deserialize, Serialize};

/// Everything the responder needs to check the round was fair.
///
/// `key` is the lowercase hex HMAC key; `commitment` serializes as hex too,
/// so the transcript can be pasted into any external HMAC-SHA3-256 tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_id: RoundId,
    pub commitment: Commitment,
    pub committer_move: String,
    pub committer_index: MoveIndex,
    pub responder_move: String,
    pub responder_index: MoveIndex,
    /// Outcome from the responder's point of view
    pub outcome: Outcome,
    pub key: String,
}

impl RoundResult {
    /// Recompute the commitment from the revealed move and key.
    pub fn verify(&self) -> bool {
        crypto::verify_hex(&self.committer_move, &self.key, &self.commitment.to_string())
            .unwrap_or(false)
    }
}
