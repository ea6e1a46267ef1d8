use std::num::ParseIntError;

use thiserror::Error as ThisError;

pub type MsgTypeResult<T> = Result<T, MsgTypeError>;

#[derive(Debug, ThisError)]
pub enum MsgTypeError {
    #[error("Unknown message type prefix: {0}")]
    UnknownPrefix(String),
    #[error("Unsupported protocol: {0}")]
    UnknownProtocol(String),
    #[error("Unsupported protocol version: {0}.{1}")]
    UnsupportedVersion(u8, u8),
    #[error("Unknown message kind: {0}")]
    UnknownMsgKind(String),
    #[error("Message type component not found: {0}")]
    PartNotFound(String),
    #[error("Error parsing version: {0}")]
    InvalidVersion(#[from] ParseIntError),
    #[error("Version number {0} is not in canonical form")]
    NonCanonicalVersion(String),
    #[error("Invalid attachment: {0}")]
    InvalidAttachment(String),
}

impl MsgTypeError {
    pub fn unknown_prefix(prefix: String) -> Self {
        Self::UnknownPrefix(prefix)
    }

    pub fn unknown_protocol(name: String) -> Self {
        Self::UnknownProtocol(name)
    }

    pub fn unsupported_version(major: u8, minor: u8) -> Self {
        Self::UnsupportedVersion(major, minor)
    }

    pub fn unknown_kind(kind: String) -> Self {
        Self::UnknownMsgKind(kind)
    }

    pub fn not_found(part: &str) -> Self {
        Self::PartNotFound(part.to_owned())
    }
}
