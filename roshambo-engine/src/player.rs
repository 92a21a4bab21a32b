use crate::{Choice, CommitmentDigest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One occupied slot in the current round. Created by a successful commit,
/// mutated in place by a successful reveal, destroyed with the round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSlot {
    id: Uuid,
    commitment: CommitmentDigest,
    choice: Choice,
    revealed: bool,
}

impl PlayerSlot {
    pub(crate) fn new(id: Uuid, commitment: CommitmentDigest) -> Self {
        Self {
            id,
            commitment,
            choice: Choice::None,
            revealed: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The digest stored at commit time; never mutated within a round.
    pub fn commitment(&self) -> &CommitmentDigest {
        &self.commitment
    }

    /// `Choice::None` until a valid reveal is accepted.
    pub fn choice(&self) -> Choice {
        self.choice
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub(crate) fn record_reveal(&mut self, choice: Choice) {
        self.choice = choice;
        self.revealed = true;
    }
}
