//! Lifecycle state and parameters owned by the engine handle.

use serde::{Deserialize, Serialize};

use crate::control::policy::{DEFAULT_FREQUENCY, DEFAULT_VOLUME};

/// Lifecycle of the single native engine.
///
/// A native engine exists exactly in `Initialized`, `Playing` and `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Uninitialized,
    Initialized,
    Playing,
    Stopped,
    Released,
}

impl EngineState {
    pub fn has_engine(self) -> bool {
        matches!(
            self,
            EngineState::Initialized | EngineState::Playing | EngineState::Stopped
        )
    }

    /// `start()` only has an effect from these states.
    pub fn can_start(self) -> bool {
        matches!(self, EngineState::Initialized | EngineState::Stopped)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Initialized => "initialized",
            EngineState::Playing => "playing",
            EngineState::Stopped => "stopped",
            EngineState::Released => "released",
        }
    }
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current tone parameters. Always in-domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioParameters {
    /// Output gain in `[0.0, 1.0]`
    pub volume: f32,
    /// Tone frequency in Hz, `> 0.0`
    pub frequency: f32,
}

impl Default for AudioParameters {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_live_states_hold_an_engine() {
        assert!(!EngineState::Uninitialized.has_engine());
        assert!(EngineState::Initialized.has_engine());
        assert!(EngineState::Playing.has_engine());
        assert!(EngineState::Stopped.has_engine());
        assert!(!EngineState::Released.has_engine());
    }

    #[test]
    fn start_allowed_from_initialized_and_stopped() {
        assert!(EngineState::Initialized.can_start());
        assert!(EngineState::Stopped.can_start());
        assert!(!EngineState::Playing.can_start());
        assert!(!EngineState::Released.can_start());
    }

    #[test]
    fn fresh_parameters_match_engine_defaults() {
        let params = AudioParameters::default();
        assert_eq!(params.volume, 0.5);
        assert_eq!(params.frequency, 440.0);
        assert_eq!(EngineState::default(), EngineState::Uninitialized);
        assert_eq!(EngineState::Playing.to_string(), "playing");
    }
}
