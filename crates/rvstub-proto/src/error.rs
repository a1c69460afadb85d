use thiserror::Error;

/// Framing and checksum errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("no packet start '$' in input")]
    MissingStart,
    #[error("no checksum separator '#' after packet start")]
    MissingTerminator,
    #[error("invalid checksum digits: {0:?}")]
    InvalidChecksum(String),
    #[error("checksum mismatch: computed {expected:02x}, received {received:02x}")]
    ChecksumMismatch { expected: u8, received: u8 },
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,
}
