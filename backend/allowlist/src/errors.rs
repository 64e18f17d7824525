//! Tool-wide error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllowlistError {
    #[error("allowlist is empty")]
    EmptyAllowlist,

    #[error("address is not in the allowlist: {0}")]
    UnknownAddress(String),

    #[error("leaf index {0} is out of range")]
    LeafOutOfRange(usize),
}

pub type Result<T> = std::result::Result<T, AllowlistError>;
