use thiserror::Error;

use crate::RoundState;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid difficulty level {0}, expected 1, 2 or 3")]
    InvalidDifficulty(u8),
    #[error("Unknown difficulty name")]
    UnknownDifficulty,
    #[error("Grid extent {0} is outside 1..={max}", max = crate::MAX_EXTENT)]
    InvalidExtent(u8),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Trigger ratio must be a finite value between 0 and 1")]
    InvalidRatio,
    #[error("Cascade chance must be a finite value between 0 and 1")]
    InvalidCascadeChance,
    #[error("Too many triggers, requested {triggers} but the grid only has {cells} cells")]
    TooManyTriggers { triggers: u16, cells: u16 },
    #[error("Operation not allowed while the round is {0:?}")]
    InvalidState(RoundState),
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure reported by a persistence collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage backend is unavailable")]
    Unavailable,
    #[error("Storage backend rejected the write: {0}")]
    Rejected(alloc::string::String),
}
