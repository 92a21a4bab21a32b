//! Two-party commit-reveal rock/paper/scissors engine.
//!
//! Both players first submit a blind commitment (a hash binding their
//! identity, choice, and a secret nonce), then reveal; the engine checks
//! each reveal against the stored commitment, settles the round, and
//! resets for the next pair. A [`DelegateProxy`] lets an operator play
//! through an intermediary identity.

pub mod choice;
pub mod commitment;
pub mod error;
pub mod event;
pub mod game;
pub mod player;
pub mod proxy;

pub use choice::Choice;
pub use commitment::{commitment_digest, CommitmentDigest, Secret};
pub use error::{GameError, Result};
pub use event::GameEvent;
pub use game::{GameEngine, Stage};
pub use player::PlayerSlot;
pub use proxy::{DelegateProxy, SharedGameEngine};
