//! Errors raised while building a mission from a document.
//!
//! Route queries do not use these: an unreachable target or exhausted
//! budget is an empty path, not an error.

use thiserror::Error;

pub type Result<T, E = MissionError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context} refers to unknown division: {name}")]
    UnknownDivision { context: String, name: String },

    #[error("division listed twice in building: {0}")]
    DuplicateDivision(String),

    #[error("{kind} in division {division} is missing its {field} value")]
    MissingItemPoints {
        kind: String,
        division: String,
        field: &'static str,
    },
}
