// Error types for the tone bridge
//
// The control surface itself never returns these to the managed caller. They travel
// between the opaque engine and the handle, and across the C ABI decode step, where
// they are logged and turned into local outcomes.

mod audio;
mod bridge;

pub use audio::{log_audio_error, AudioError, AudioErrorCodes};
pub use bridge::{BridgeError, BridgeErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the FFI boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
