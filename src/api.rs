// Public API for flutter_rust_bridge integration
// One typed function per control command, plus a generic method dispatcher the
// platform shells can forward method-channel calls to unchanged.

#![allow(dead_code)] // FFI functions are called from Dart, not detected by Rust analyzer

use std::sync::{Arc, Mutex, MutexGuard};

use once_cell::sync::Lazy;

use crate::config::AppConfig;
use crate::control::{Command, CommandKind, CommandResult, CommandRouter, ReplyValue};
use crate::engine::{AudioEngineHandle, EngineFactory, StubEngineFactory};
use crate::telemetry::{EngineEventKind, LifecyclePhase};

mod types;

pub use crate::error::AudioErrorCodes;
pub use types::MethodReply;

/// The one engine handle of this process, plus the config it was built from.
struct ProcessEngine {
    config: AppConfig,
    handle: Mutex<AudioEngineHandle>,
}

impl ProcessEngine {
    fn new() -> Self {
        let config = AppConfig::load_platform();
        let handle = AudioEngineHandle::new(Arc::new(StubEngineFactory::new()), &config);
        Self {
            config,
            handle: Mutex::new(handle),
        }
    }

    /// Every handle operation is total, so a poisoned lock still guards a
    /// consistent handle.
    fn lock(&self) -> MutexGuard<'_, AudioEngineHandle> {
        self.handle.lock().unwrap_or_else(|poisoned| {
            log::warn!("[Api] Engine handle lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

static PROCESS_ENGINE: Lazy<ProcessEngine> = Lazy::new(ProcessEngine::new);

/// Serializes tests that touch the process-wide handle.
#[cfg(test)]
pub(crate) static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Route one command through the process-wide handle.
///
/// Shared by every boundary surface (FRB functions, C ABI).
pub(crate) fn dispatch_command(command: &Command) -> CommandResult {
    let mut handle = PROCESS_ENGINE.lock();
    CommandRouter::new(&mut handle)
        .with_command_logging(PROCESS_ENGINE.config.bridge.log_commands)
        .dispatch(command)
}

pub(crate) fn record_lifecycle(phase: LifecyclePhase) {
    PROCESS_ENGINE
        .lock()
        .telemetry()
        .record(EngineEventKind::Lifecycle { phase });
}

fn dispatch_kind(kind: CommandKind) -> CommandResult {
    dispatch_command(&Command::new(kind.method_name()))
}

fn reply_bool(result: CommandResult) -> bool {
    matches!(result.value(), Some(ReplyValue::Bool(true)))
}

fn reply_number(result: CommandResult, fallback: f32) -> f64 {
    match result.value() {
        Some(ReplyValue::Number(value)) => value,
        _ => f64::from(fallback),
    }
}

/// Install the native engine factory used by the next `initialize_audio`.
///
/// Platform shells call this once at startup, before the first initialize.
/// An engine that already exists keeps running until released.
#[flutter_rust_bridge::frb(ignore)]
pub fn install_engine_factory(factory: Arc<dyn EngineFactory>) {
    let mut handle = PROCESS_ENGINE.lock();
    handle.set_factory(factory);
    handle.telemetry().record(EngineEventKind::Lifecycle {
        phase: LifecyclePhase::EngineFactoryInstalled,
    });
    log::info!("[Api] Engine factory installed");
}

/// Get the version of the tone bridge
#[flutter_rust_bridge::frb(sync)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Method channel name the platform shells should register
#[flutter_rust_bridge::frb(sync)]
pub fn get_channel_name() -> String {
    PROCESS_ENGINE.config.bridge.channel_name.clone()
}

/// Create and initialize the native engine if it does not exist yet
///
/// # Returns
/// * `true` - engine initialized (or already present)
/// * `false` - native initialization failed
#[flutter_rust_bridge::frb(sync)]
pub fn initialize_audio() -> bool {
    reply_bool(dispatch_kind(CommandKind::InitializeAudio))
}

/// Begin audio output. Safe to call in any state.
#[flutter_rust_bridge::frb(sync)]
pub fn start_audio() {
    dispatch_kind(CommandKind::StartAudio);
}

/// Halt audio output. Safe to call in any state.
#[flutter_rust_bridge::frb(sync)]
pub fn stop_audio() {
    dispatch_kind(CommandKind::StopAudio);
}

/// Release the native engine. Safe to call in any state.
#[flutter_rust_bridge::frb(sync)]
pub fn release_audio() {
    dispatch_kind(CommandKind::ReleaseAudio);
}

/// Set output volume
///
/// `None` applies the default (0.5); values outside `[0.0, 1.0]` are clamped.
#[flutter_rust_bridge::frb(sync)]
pub fn set_volume(volume: Option<f64>) {
    let mut command = Command::new(CommandKind::SetVolume.method_name());
    if let Some(volume) = volume {
        command = command.with_argument("volume", volume);
    }
    dispatch_command(&command);
}

/// Set tone frequency in Hz
///
/// `None` or a non-positive value applies the default (440 Hz).
#[flutter_rust_bridge::frb(sync)]
pub fn set_frequency(frequency: Option<f64>) {
    let mut command = Command::new(CommandKind::SetFrequency.method_name());
    if let Some(frequency) = frequency {
        command = command.with_argument("frequency", frequency);
    }
    dispatch_command(&command);
}

#[flutter_rust_bridge::frb(sync)]
pub fn is_audio_playing() -> bool {
    reply_bool(dispatch_kind(CommandKind::IsAudioPlaying))
}

/// Current volume, or 0.0 when no engine exists
#[flutter_rust_bridge::frb(sync)]
pub fn get_current_volume() -> f64 {
    reply_number(
        dispatch_kind(CommandKind::GetCurrentVolume),
        crate::engine::ABSENT_ENGINE_VOLUME,
    )
}

/// Current frequency, or 440.0 when no engine exists
#[flutter_rust_bridge::frb(sync)]
pub fn get_current_frequency() -> f64 {
    reply_number(
        dispatch_kind(CommandKind::GetCurrentFrequency),
        crate::engine::ABSENT_ENGINE_FREQUENCY,
    )
}

/// Dispatch a method-channel call by name
///
/// # Arguments
/// * `method` - command name, e.g. `"setVolume"`
/// * `arguments_json` - JSON object with the call arguments; malformed or
///   non-object payloads count as no arguments
///
/// # Returns
/// A `MethodReply`; `implemented == false` for unknown methods
#[flutter_rust_bridge::frb(sync)]
pub fn dispatch_method(method: String, arguments_json: Option<String>) -> MethodReply {
    let command = match arguments_json {
        Some(json) => Command::from_json(method, &json),
        None => Command::new(method),
    };
    let result = dispatch_command(&command);
    MethodReply::from_result(command.name, &result)
}

/// Current lifecycle state name (`"uninitialized"`, `"playing"`, ...)
#[flutter_rust_bridge::frb(sync)]
pub fn get_engine_state() -> String {
    PROCESS_ENGINE.lock().state().as_str().to_string()
}

/// Recent engine events as JSON, for debug overlays
///
/// # Returns
/// JSON object with `recent`, `total_events` and `dropped_events`
#[flutter_rust_bridge::frb(sync)]
pub fn get_engine_events_json() -> String {
    let snapshot = PROCESS_ENGINE.lock().telemetry().snapshot();
    serde_json::to_string(&snapshot).unwrap_or_else(|err| {
        log::warn!("[Api] Failed to serialize engine events: {}", err);
        "{}".to_string()
    })
}

/// Get AudioErrorCodes as a structured object with all error code constants
#[flutter_rust_bridge::frb(sync)]
pub fn get_audio_error_codes() -> AudioErrorCodes {
    AudioErrorCodes {}
}
