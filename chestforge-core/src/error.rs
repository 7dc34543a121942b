use crate::coordinates::{CellCoord, WorldId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search radius must not be negative (got {0})")]
    NegativeRadius(i32),

    #[error("origin is in {found} but the world snapshot is {expected}")]
    WorldMismatch { expected: WorldId, found: WorldId },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("cell {cell} is outside snapshot {world}")]
    WrongWorld { world: WorldId, cell: CellCoord },
}
