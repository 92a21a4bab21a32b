use crate::Choice;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Observable engine transitions, appended in emission order. A full round
/// produces Commit x2, Reveal x2, Result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Commit { player: Uuid },
    Reveal { player: Uuid, choice: Choice },
    /// `winner` is `Uuid::nil()` on a tie.
    Result { winner: Uuid },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Commit { player } => write!(f, "Commit({})", player),
            GameEvent::Reveal { player, choice } => write!(f, "Reveal({}, {})", player, choice),
            GameEvent::Result { winner } if winner.is_nil() => write!(f, "Result(standoff)"),
            GameEvent::Result { winner } => write!(f, "Result({})", winner),
        }
    }
}
