//! Error types returned by board mutation and coordinate parsing.

use thiserror::Error;

/// The two violation categories the engine distinguishes.
///
/// `CannotMove` covers rule violations discovered while applying a move to
/// the board (occupied destinations, illegal sumito, sandwiched allies).
/// `InvalidParameter` covers malformed external input (bad coordinates,
/// move selections that are not a column) and is recoverable by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbaloneError {
    #[error("move cannot be played: {0}")]
    CannotMove(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl AbaloneError {
    pub fn cannot_move(reason: impl Into<String>) -> Self {
        AbaloneError::CannotMove(reason.into())
    }

    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        AbaloneError::InvalidParameter(reason.into())
    }
}
