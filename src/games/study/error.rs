//! Input validation errors at the controller boundary.

use thiserror::Error;

/// Why a submitted safe code was rejected before comparison.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("code must be 4 digits, got {0} characters")]
    WrongLength(usize),

    #[error("code contains a non-digit character: {0:?}")]
    NotDigit(char),
}

/// An object type name that does not exist in the room.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown room object: {0}")]
pub struct UnknownObject(pub String);
