// C ABI decode errors

use crate::error::ErrorCode;
use std::fmt;

/// Bridge error code constants.
///
/// Error code range: 3001-3003
pub struct BridgeErrorCodes {}

impl BridgeErrorCodes {
    /// A required pointer argument was null
    pub const NULL_POINTER: i32 = 3001;

    /// A string argument was not valid UTF-8
    pub const INVALID_UTF8: i32 = 3002;

    /// The reply could not be encoded for the caller
    pub const ENCODE_FAILED: i32 = 3003;
}

/// Failures while decoding a raw C ABI call into a command.
///
/// These never reach the router; the ffi layer turns them into a
/// `bridge_error` reply.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    NullPointer { argument: &'static str },
    InvalidUtf8 { argument: &'static str },
    EncodeFailed { reason: String },
}

impl ErrorCode for BridgeError {
    fn code(&self) -> i32 {
        match self {
            BridgeError::NullPointer { .. } => BridgeErrorCodes::NULL_POINTER,
            BridgeError::InvalidUtf8 { .. } => BridgeErrorCodes::INVALID_UTF8,
            BridgeError::EncodeFailed { .. } => BridgeErrorCodes::ENCODE_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            BridgeError::NullPointer { argument } => {
                format!("Argument `{}` must not be null", argument)
            }
            BridgeError::InvalidUtf8 { argument } => {
                format!("Argument `{}` is not valid UTF-8", argument)
            }
            BridgeError::EncodeFailed { reason } => {
                format!("Failed to encode reply: {}", reason)
            }
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BridgeError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for BridgeError {}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::EncodeFailed {
            reason: err.to_string(),
        }
    }
}
