use crate::game::Stage;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

/// Every failure the engine or proxy can surface. Calls are atomic: a
/// returned error means the round state is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Wrong stage: {0}")]
    WrongStage(Stage),

    #[error("Only for players")]
    OnlyPlayers,

    #[error("Only for owner")]
    OnlyOwner,

    #[error("invalid choice")]
    InvalidChoice,

    #[error("invalid hash")]
    InvalidHash,

    #[error("game contract not configured")]
    NotConfigured,

    #[error("game contract already configured")]
    AlreadyConfigured,
}
