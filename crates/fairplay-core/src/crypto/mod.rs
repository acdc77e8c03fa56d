//! Cryptographic primitives for the commit-reveal round.
//!
//! This module provides:
//! - CommitmentKey, a fresh 256-bit secret per round
//! - Commitment, an HMAC-SHA3-256 tag over the committed move name
//! - free functions mirroring the protocol operations

mod commitment;

pub use commitment::{Commitment, CommitmentKey, COMMITMENT_LEN, KEY_LEN};

use thiserror::Error;

/// Errors from key handling and commitment parsing
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid commitment length: expected {expected} bytes, got {actual}")]
    InvalidCommitmentLength { expected: usize, actual: usize },

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),
}

/// Generate a fresh commitment key.
pub fn generate_key() -> Result<CommitmentKey, CryptoError> {
    CommitmentKey::generate()
}

/// Commit to `move_name` under `key`.
pub fn commit(move_name: &str, key: &CommitmentKey) -> Commitment {
    Commitment::new(move_name, key)
}

/// Check a revealed move and key against a published commitment.
pub fn verify(move_name: &str, key: &CommitmentKey, commitment: &Commitment) -> bool {
    commitment.verify(move_name, key)
}

/// Verify hex-encoded key and commitment as they appear at the external interface.
pub fn verify_hex(move_name: &str, key_hex: &str, commitment_hex: &str) -> Result<bool, CryptoError> {
    let key = CommitmentKey::from_hex(key_hex)?;
    let commitment = Commitment::from_hex(commitment_hex)?;
    Ok(verify(move_name, &key, &commitment))
}
