use crate::value::Kind;
use thiserror::Error;
use crate::boc::BocError;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("unknown stack entry type: {0:?}")]
    UnknownStackEntryType(String),

    #[error("invalid integer literal: {0:?}")]
    InvalidInteger(String),

    #[error("invalid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("invalid cell payload: {0}")]
    InvalidCellPayload(#[from] BocError),

    #[error("tuple nesting exceeds {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    #[error("integer does not fit in {target}")]
    IntegerOutOfRange { target: &'static str },

    #[error("method exited with code {exit_code}")]
    MethodFailed { exit_code: i32 },
}

pub type Result<T> = std::result::Result<T, StackError>;
