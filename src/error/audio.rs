// Audio engine error types and constants

use crate::error::ErrorCode;
use flutter_rust_bridge::frb;
use log::error;
use std::fmt;

/// Audio error code constants exposed to Dart via FFI
///
/// Engine faults never fail a control call, but they do show up in telemetry
/// as `NativeFault { code, .. }`. These constants let the Dart side decode them.
///
/// Error code range: 1001-1009
#[frb(unignore)]
pub struct AudioErrorCodes {}

#[frb]
impl AudioErrorCodes {
    /// Native engine could not be brought up
    pub const INITIALIZATION_FAILED: i32 = 1001;

    /// Native engine refused to begin output
    pub const START_FAILED: i32 = 1002;

    /// Native engine refused to halt output
    pub const STOP_FAILED: i32 = 1003;

    /// Native engine failed while freeing its resources
    pub const RELEASE_FAILED: i32 = 1004;

    /// Native engine rejected a parameter update
    pub const PARAMETER_REJECTED: i32 = 1005;

    /// Hardware error occurred
    pub const HARDWARE_ERROR: i32 = 1006;

    /// Mutex/RwLock was poisoned
    pub const LOCK_POISONED: i32 = 1007;

    /// JNI initialization failed on Android
    pub const JNI_INIT_FAILED: i32 = 1008;

    /// Audio stream disconnected unexpectedly
    pub const STREAM_FAILURE: i32 = 1009;

    // Getter methods for FFI exposure (flutter_rust_bridge requires methods not const)

    /// Get INITIALIZATION_FAILED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn initialization_failed() -> i32 {
        Self::INITIALIZATION_FAILED
    }

    /// Get START_FAILED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn start_failed() -> i32 {
        Self::START_FAILED
    }

    /// Get STOP_FAILED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn stop_failed() -> i32 {
        Self::STOP_FAILED
    }

    /// Get RELEASE_FAILED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn release_failed() -> i32 {
        Self::RELEASE_FAILED
    }

    /// Get PARAMETER_REJECTED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn parameter_rejected() -> i32 {
        Self::PARAMETER_REJECTED
    }

    /// Get HARDWARE_ERROR error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn hardware_error() -> i32 {
        Self::HARDWARE_ERROR
    }

    /// Get LOCK_POISONED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn lock_poisoned() -> i32 {
        Self::LOCK_POISONED
    }

    /// Get JNI_INIT_FAILED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn jni_init_failed() -> i32 {
        Self::JNI_INIT_FAILED
    }

    /// Get STREAM_FAILURE error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn stream_failure() -> i32 {
        Self::STREAM_FAILURE
    }
}

/// Log an audio error with structured context
///
/// Emits the numeric code, the component and the human-readable message so
/// field logs can be grepped by code. Never panics.
pub fn log_audio_error(err: &AudioError, context: &str) {
    error!(
        "Audio error in {}: code={}, component=ToneEngine, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors reported by the opaque native engine
///
/// Error code range: 1001-1009
#[derive(Debug, Clone, PartialEq)]
pub enum AudioError {
    /// Native initialization failed (device busy, no output, ...)
    InitializationFailed { reason: String },

    /// Output could not be started
    StartFailed { reason: String },

    /// Output could not be stopped
    StopFailed { reason: String },

    /// Resources could not be freed cleanly
    ReleaseFailed { reason: String },

    /// The engine refused a parameter value
    ParameterRejected { parameter: String, reason: String },

    /// Hardware error occurred
    HardwareError { details: String },

    /// Mutex/RwLock was poisoned
    LockPoisoned { component: String },

    /// JNI initialization failed on Android
    JniInitFailed { reason: String },

    /// Stream channel disconnected unexpectedly
    StreamFailure { reason: String },
}

impl ErrorCode for AudioError {
    fn code(&self) -> i32 {
        match self {
            AudioError::InitializationFailed { .. } => AudioErrorCodes::INITIALIZATION_FAILED,
            AudioError::StartFailed { .. } => AudioErrorCodes::START_FAILED,
            AudioError::StopFailed { .. } => AudioErrorCodes::STOP_FAILED,
            AudioError::ReleaseFailed { .. } => AudioErrorCodes::RELEASE_FAILED,
            AudioError::ParameterRejected { .. } => AudioErrorCodes::PARAMETER_REJECTED,
            AudioError::HardwareError { .. } => AudioErrorCodes::HARDWARE_ERROR,
            AudioError::LockPoisoned { .. } => AudioErrorCodes::LOCK_POISONED,
            AudioError::JniInitFailed { .. } => AudioErrorCodes::JNI_INIT_FAILED,
            AudioError::StreamFailure { .. } => AudioErrorCodes::STREAM_FAILURE,
        }
    }

    fn message(&self) -> String {
        match self {
            AudioError::InitializationFailed { reason } => {
                format!("Audio engine initialization failed: {}", reason)
            }
            AudioError::StartFailed { reason } => {
                format!("Failed to start audio output: {}", reason)
            }
            AudioError::StopFailed { reason } => {
                format!("Failed to stop audio output: {}", reason)
            }
            AudioError::ReleaseFailed { reason } => {
                format!("Failed to release audio engine: {}", reason)
            }
            AudioError::ParameterRejected { parameter, reason } => {
                format!("Engine rejected {}: {}", parameter, reason)
            }
            AudioError::HardwareError { details } => {
                format!("Hardware error: {}", details)
            }
            AudioError::LockPoisoned { component } => {
                format!("Lock poisoned on {}", component)
            }
            AudioError::JniInitFailed { reason } => {
                format!("JNI initialization failed: {}", reason)
            }
            AudioError::StreamFailure { reason } => {
                format!("Audio stream failed: {}", reason)
            }
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AudioError {}

impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        AudioError::HardwareError {
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason() -> String {
        "test".to_string()
    }

    #[test]
    fn test_audio_error_codes() {
        assert_eq!(
            AudioError::InitializationFailed { reason: reason() }.code(),
            AudioErrorCodes::INITIALIZATION_FAILED
        );
        assert_eq!(
            AudioError::StartFailed { reason: reason() }.code(),
            AudioErrorCodes::START_FAILED
        );
        assert_eq!(
            AudioError::StopFailed { reason: reason() }.code(),
            AudioErrorCodes::STOP_FAILED
        );
        assert_eq!(
            AudioError::ReleaseFailed { reason: reason() }.code(),
            AudioErrorCodes::RELEASE_FAILED
        );
        assert_eq!(
            AudioError::ParameterRejected {
                parameter: "volume".to_string(),
                reason: reason()
            }
            .code(),
            AudioErrorCodes::PARAMETER_REJECTED
        );
        assert_eq!(
            AudioError::HardwareError { details: reason() }.code(),
            AudioErrorCodes::HARDWARE_ERROR
        );
        assert_eq!(
            AudioError::LockPoisoned {
                component: reason()
            }
            .code(),
            AudioErrorCodes::LOCK_POISONED
        );
        assert_eq!(
            AudioError::JniInitFailed { reason: reason() }.code(),
            AudioErrorCodes::JNI_INIT_FAILED
        );
        assert_eq!(
            AudioError::StreamFailure { reason: reason() }.code(),
            AudioErrorCodes::STREAM_FAILURE
        );
    }

    #[test]
    fn test_audio_error_messages() {
        let err = AudioError::InitializationFailed {
            reason: "no output device".to_string(),
        };
        assert_eq!(
            err.message(),
            "Audio engine initialization failed: no output device"
        );

        let err = AudioError::ParameterRejected {
            parameter: "frequency".to_string(),
            reason: "out of range".to_string(),
        };
        assert!(err.message().contains("frequency"));

        let err = AudioError::HardwareError {
            details: "test error".to_string(),
        };
        assert_eq!(err.message(), "Hardware error: test error");
    }

    #[test]
    fn test_audio_error_display() {
        let err = AudioError::StartFailed { reason: reason() };
        let display = format!("{}", err);
        assert!(display.contains("AudioError"));
        assert!(display.contains(&err.code().to_string()));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::other("test io error");
        let audio_err: AudioError = io_err.into();
        match audio_err {
            AudioError::HardwareError { details } => {
                assert!(details.contains("test io error"));
            }
            _ => panic!("Expected HardwareError"),
        }
    }

    #[test]
    fn test_error_code_getters() {
        assert_eq!(AudioErrorCodes::initialization_failed(), 1001);
        assert_eq!(AudioErrorCodes::start_failed(), 1002);
        assert_eq!(AudioErrorCodes::stop_failed(), 1003);
        assert_eq!(AudioErrorCodes::release_failed(), 1004);
        assert_eq!(AudioErrorCodes::parameter_rejected(), 1005);
        assert_eq!(AudioErrorCodes::hardware_error(), 1006);
        assert_eq!(AudioErrorCodes::lock_poisoned(), 1007);
        assert_eq!(AudioErrorCodes::jni_init_failed(), 1008);
        assert_eq!(AudioErrorCodes::stream_failure(), 1009);
    }
}
