//! Engine event types exposed to the CLI and flutter_rust_bridge callers.

use serde::{Deserialize, Serialize};

/// Native library lifecycle stages reported by the platform entry points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    LibraryLoaded,
    EngineFactoryInstalled,
    LibraryUnloaded,
}

/// What happened on the control surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum EngineEventKind {
    Initialized { success: bool },
    Started,
    Stopped,
    Released,
    VolumeChanged { volume: f32 },
    FrequencyChanged { frequency: f32 },
    UnknownCommand { method: String },
    NativeFault { code: i32, context: String },
    Lifecycle { phase: LifecyclePhase },
}

/// Timestamped engine event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineEvent {
    /// Milliseconds since the collector was created
    pub timestamp_ms: u64,
    pub kind: EngineEventKind,
}
