//! The commit-reveal state machine for a single two-player round.

use crate::{commitment_digest, Choice, CommitmentDigest, GameError, GameEvent, PlayerSlot, Result, Secret};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Round progress. The numeric values are the authoritative protocol stages:
/// a round walks 0 -> 1 -> 2 -> 3 -> 4 and `result` returns it to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Stage {
    Idle = 0,
    OneCommitted = 1,
    BothCommitted = 2,
    OneRevealed = 3,
    BothRevealed = 4,
}

impl Stage {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The game engine owns the single round: two commitment slots, the stage
/// marker, and the event log. Caller identity is supplied explicitly with
/// every call; the engine never derives it.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameEngine {
    id: Uuid,
    owner: Uuid,
    stage: Stage,
    players: Vec<PlayerSlot>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// New engine with an empty round. `owner` is the administrator and is
    /// fixed for the engine's lifetime; its only privilege is `reset_game`.
    pub fn new(owner: Uuid) -> Self {
        let id = Uuid::new_v4();
        tracing::info!("Game {} created, owner {}", id, owner);

        Self {
            id,
            owner,
            stage: Stage::Idle,
            players: Vec::with_capacity(2),
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Slot by commit order; `None` past the occupied slots.
    pub fn player(&self, index: usize) -> Option<&PlayerSlot> {
        self.players.get(index)
    }

    pub fn players(&self) -> &[PlayerSlot] {
        &self.players
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drains the event log for observers that consume transitions.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record a blind commitment for `caller`. Accepted only while a slot is
    /// free (stage 0 or 1) and the caller has not committed already.
    pub fn commit(&mut self, caller: Uuid, digest: CommitmentDigest) -> Result<()> {
        if !matches!(self.stage, Stage::Idle | Stage::OneCommitted) {
            return Err(GameError::WrongStage(self.stage));
        }

        // One slot per identity per round.
        if self.players.iter().any(|p| p.id() == caller) {
            return Err(GameError::WrongStage(self.stage));
        }

        self.players.push(PlayerSlot::new(caller, digest));
        self.stage = if self.players.len() == 1 {
            Stage::OneCommitted
        } else {
            Stage::BothCommitted
        };

        tracing::info!("Game {}: player {} committed, stage {}", self.id, caller, self.stage);
        self.events.push(GameEvent::Commit { player: caller });

        Ok(())
    }

    /// Disclose `caller`'s choice and secret. The digest recomputed over
    /// (caller, choice, secret) must equal the stored commitment.
    pub fn reveal(&mut self, caller: Uuid, choice: Choice, secret: &Secret) -> Result<()> {
        // Access control before the stage check: a non-player is told so
        // even when the stage is wrong too.
        let index = self
            .players
            .iter()
            .position(|p| p.id() == caller)
            .ok_or(GameError::OnlyPlayers)?;

        if !matches!(self.stage, Stage::BothCommitted | Stage::OneRevealed) {
            return Err(GameError::WrongStage(self.stage));
        }

        let slot = &mut self.players[index];

        // A second reveal from the same slot would fake the both-revealed
        // stage with one participant still silent.
        if slot.revealed() {
            return Err(GameError::WrongStage(self.stage));
        }

        if choice == Choice::None {
            return Err(GameError::InvalidChoice);
        }

        if commitment_digest(caller, choice, secret) != *slot.commitment() {
            return Err(GameError::InvalidHash);
        }

        slot.record_reveal(choice);
        self.stage = if self.stage == Stage::BothCommitted {
            Stage::OneRevealed
        } else {
            Stage::BothRevealed
        };

        tracing::info!(
            "Game {}: player {} revealed {}, stage {}",
            self.id,
            caller,
            choice,
            self.stage
        );
        self.events.push(GameEvent::Reveal { player: caller, choice });

        Ok(())
    }

    /// Settle the round once both reveals are in. Only a participant may
    /// trigger settlement. Returns the winner identity, `Uuid::nil()` on a
    /// standoff, and resets the round for the next pair.
    pub fn result(&mut self, caller: Uuid) -> Result<Uuid> {
        if !self.players.iter().any(|p| p.id() == caller) {
            return Err(GameError::OnlyPlayers);
        }

        if self.stage != Stage::BothRevealed {
            return Err(GameError::WrongStage(self.stage));
        }

        let (c0, c1) = (self.players[0].choice(), self.players[1].choice());
        let winner = if c0 == c1 {
            Uuid::nil()
        } else if c0.beats(c1) {
            self.players[0].id()
        } else {
            self.players[1].id()
        };

        self.players.clear();
        self.stage = Stage::Idle;

        if winner.is_nil() {
            tracing::info!("Game {}: standoff ({} vs {})", self.id, c0, c1);
        } else {
            tracing::info!("Game {}: winner {} ({} vs {})", self.id, winner, c0, c1);
        }
        self.events.push(GameEvent::Result { winner });

        Ok(winner)
    }

    /// Administrator escape hatch: abandon the round from any stage.
    pub fn reset_game(&mut self, caller: Uuid) -> Result<()> {
        if caller != self.owner {
            return Err(GameError::OnlyOwner);
        }

        self.players.clear();
        self.stage = Stage::Idle;

        tracing::warn!("Game {}: reset by owner", self.id);
        Ok(())
    }
}
