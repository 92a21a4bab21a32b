//! Hash commitment scheme binding (identity, choice, secret).
//!
//! The digest is SHA-256 over the fixed-width concatenation
//! `uuid bytes (16) || choice (1) || secret (32)`. Producer and verifier
//! must agree on this encoding exactly, otherwise every reveal fails.

use crate::Choice;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

pub const SECRET_LEN: usize = 32;

/// Caller-chosen nonce, fixed at 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret([u8; SECRET_LEN]);

impl Secret {
    /// Fresh random nonce.
    pub fn random() -> Self {
        let mut bytes = [0u8; SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// A phrase zero-padded (or truncated) to 32 bytes. Convenient for
    /// reproducible secrets in tests and scripted play.
    pub fn from_phrase(phrase: &str) -> Self {
        let mut bytes = [0u8; SECRET_LEN];
        let src = phrase.as_bytes();
        let n = src.len().min(SECRET_LEN);
        bytes[..n].copy_from_slice(&src[..n]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; SECRET_LEN] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// SHA-256 commitment digest submitted at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentDigest([u8; 32]);

impl CommitmentDigest {
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Canonical digest over (identity, choice, secret). The engine recomputes
/// this at reveal time and compares it against the stored commitment.
pub fn commitment_digest(player: Uuid, choice: Choice, secret: &Secret) -> CommitmentDigest {
    let mut hasher = Sha256::new();
    hasher.update(player.as_bytes());
    hasher.update([choice.as_u8()]);
    hasher.update(secret.as_bytes());
    CommitmentDigest(hasher.finalize().into())
}
