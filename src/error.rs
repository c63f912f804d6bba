use std::io;

/// Errors returned by controller operations.
///
/// Every validation variant is raised before any byte reaches the transport,
/// so a rejected call never leaves a partial frame on the wire.
#[derive(Debug, thiserror::Error)]
pub enum ServoError {
    #[error("servo id {0} out of range (0-127)")]
    InvalidServoId(u8),

    #[error("speed {0} out of range (0-127)")]
    InvalidSpeed(u8),

    #[error("position {position} out of range ({min}-{max})")]
    InvalidPosition { position: u16, min: u16, max: u16 },

    #[error("range {0} out of range (0-31)")]
    InvalidRange(u8),

    #[error("base number {0:#04x} out of range (0x00-0x10)")]
    InvalidBaseNumber(u8),

    /// The transport rejected a write. Passed through as-is; the protocol
    /// has no acknowledgement channel to say more.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
}

impl ServoError {
    /// Legacy integer status for callers that still speak return codes.
    /// Success is 0 and is never produced here.
    pub fn code(&self) -> i32 {
        match self {
            ServoError::InvalidServoId(_) | ServoError::InvalidBaseNumber(_) => -2,
            ServoError::InvalidSpeed(_)
            | ServoError::InvalidPosition { .. }
            | ServoError::InvalidRange(_) => -3,
            ServoError::Transport(_) => -1,
        }
    }

    pub fn is_validation(&self) -> bool {
        !matches!(self, ServoError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, ServoError>;
