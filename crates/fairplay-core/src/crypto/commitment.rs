//! CommitmentKey and Commitment for the commit-reveal scheme.

use super::CryptoError;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::Sha3_256;
use std::fmt;

type HmacSha3 = Hmac<Sha3_256>;

/// Length in bytes of both the key and the commitment tag.
pub const KEY_LEN: usize = 32;
pub const COMMITMENT_LEN: usize = 32;

/// Secret HMAC key for one round.
///
/// Never printed in full until the round is revealed; `Debug` is redacted and
/// the bytes are overwritten when the key is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct CommitmentKey([u8; KEY_LEN]);

impl CommitmentKey {
    /// Draw a fresh key from the operating system's CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::RandomSourceUnavailable(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, rejecting anything that is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Parse the 64-character hex form published at reveal time.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.trim())?;
        Self::from_slice(&bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lowercase hex encoding, for transcription into an external HMAC tool.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for CommitmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CommitmentKey(<redacted>)")
    }
}

impl Drop for CommitmentKey {
    fn drop(&mut self) {
        self.0 = [0u8; KEY_LEN];
    }
}

/// Commitment = HMAC-SHA3-256(key, move)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(#[serde(with = "hex_bytes")] [u8; COMMITMENT_LEN]);

impl Commitment {
    /// Create a commitment to `move_name` under `key`
    pub fn new(move_name: &str, key: &CommitmentKey) -> Self {
        Self(keyed_mac(key, move_name).finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; COMMITMENT_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded tag as published before the responder moved.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.trim())?;
        let arr: [u8; COMMITMENT_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| CryptoError::InvalidCommitmentLength {
                    expected: COMMITMENT_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_LEN] {
        &self.0
    }

    /// Verify that the given move and key produce this commitment.
    ///
    /// The tag comparison is constant time.
    pub fn verify(&self, move_name: &str, key: &CommitmentKey) -> bool {
        keyed_mac(key, move_name).verify_slice(&self.0).is_ok()
    }
}

fn keyed_mac(key: &CommitmentKey, move_name: &str) -> HmacSha3 {
    // HMAC accepts keys of any length, so this cannot fail for a 32-byte key.
    let mut mac = <HmacSha3 as Mac>::new_from_slice(key.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(move_name.as_bytes());
    mac
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom("expected 32 bytes"));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> CommitmentKey {
        CommitmentKey::from_bytes([byte; KEY_LEN])
    }

    #[test]
    fn test_commitment_verification() {
        let key = CommitmentKey::generate().unwrap();
        let commitment = Commitment::new("Rock", &key);

        assert!(commitment.verify("Rock", &key));
    }

    #[test]
    fn test_different_moves_different_commitments() {
        let key = key(7);
        assert_ne!(Commitment::new("Rock", &key), Commitment::new("Paper", &key));
    }

    #[test]
    fn test_different_keys_different_commitments() {
        assert_ne!(
            Commitment::new("Rock", &key(1)),
            Commitment::new("Rock", &key(2))
        );
    }

    #[test]
    fn test_wrong_move_fails_verification() {
        let key = key(3);
        let commitment = Commitment::new("Rock", &key);

        assert!(!commitment.verify("Paper", &key));
        assert!(!commitment.verify("rock", &key));
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let commitment = Commitment::new("Rock", &key(1));
        assert!(!commitment.verify("Rock", &key(2)));
    }

    #[test]
    fn test_empty_move_is_committable() {
        let key = key(9);
        let commitment = Commitment::new("", &key);
        assert!(commitment.verify("", &key));
        assert!(!commitment.verify("Rock", &key));
    }

    #[test]
    fn test_generated_keys_are_fresh() {
        let a = CommitmentKey::generate().unwrap();
        let b = CommitmentKey::generate().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_key_hex_roundtrip() {
        let key = CommitmentKey::generate().unwrap();
        let hex = key.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(hex, hex.to_lowercase());
        assert_eq!(CommitmentKey::from_hex(&hex).unwrap(), key);
    }

    #[test]
    fn test_key_wrong_length_rejected() {
        assert!(matches!(
            CommitmentKey::from_slice(&[0u8; 16]),
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 16
            })
        ));
        assert!(matches!(
            CommitmentKey::from_hex("abcd"),
            Err(CryptoError::InvalidKeyLength { actual: 2, .. })
        ));
        assert!(matches!(
            CommitmentKey::from_hex("zz"),
            Err(CryptoError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = key(0xab);
        let debug = format!("{:?}", key);
        assert!(!debug.contains("abab"));
    }

    #[test]
    fn test_commitment_display_is_full_hex() {
        let commitment = Commitment::new("Rock", &key(5));
        let shown = commitment.to_string();
        assert_eq!(shown.len(), 64);
        assert_eq!(Commitment::from_hex(&shown).unwrap(), commitment);
    }

    #[test]
    fn test_commitment_wrong_length_rejected() {
        assert!(matches!(
            Commitment::from_hex("00ff"),
            Err(CryptoError::InvalidCommitmentLength {
                expected: 32,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_commitment_serializes_as_hex() {
        let commitment = Commitment::new("Spock", &key(4));
        let json = serde_json::to_string(&commitment).unwrap();
        assert_eq!(json, format!("\"{}\"", commitment));
        let back: Commitment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, commitment);
    }
}
