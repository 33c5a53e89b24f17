//! AudioEngineHandle: owner of the one native tone engine.
//!
//! Every operation here is total. Missing engines turn mutations into no-ops
//! and reads into documented defaults; native faults are logged and recorded
//! as telemetry instead of being returned. The only failure a caller can see is
//! the `false` returned by [`AudioEngineHandle::initialize`].

use std::sync::Arc;

use crate::config::{AppConfig, AudioConfig};
use crate::control::policy;
use crate::engine::backend::{EngineFactory, StubEngineFactory, ToneEngine};
use crate::engine::state::{AudioParameters, EngineState};
use crate::error::{log_audio_error, AudioError, ErrorCode};
use crate::telemetry::{EngineEventKind, TelemetryCollector};

/// Volume reported when no engine exists.
pub const ABSENT_ENGINE_VOLUME: f32 = 0.0;

/// Frequency reported when no engine exists.
pub const ABSENT_ENGINE_FREQUENCY: f32 = policy::DEFAULT_FREQUENCY;

/// A created native engine together with the parameters last applied to it.
struct ActiveEngine {
    native: Box<dyn ToneEngine>,
    params: AudioParameters,
}

/// Lifecycle owner for one native engine instance.
pub struct AudioEngineHandle {
    factory: Arc<dyn EngineFactory>,
    audio_config: AudioConfig,
    engine: Option<ActiveEngine>,
    state: EngineState,
    telemetry: Arc<TelemetryCollector>,
}

impl AudioEngineHandle {
    /// Create a handle with no engine. Nothing native happens until
    /// [`initialize`](Self::initialize).
    pub fn new(factory: Arc<dyn EngineFactory>, config: &AppConfig) -> Self {
        Self::with_telemetry(
            factory,
            config.audio.clone(),
            Arc::new(TelemetryCollector::from_config(&config.telemetry)),
        )
    }

    pub fn with_telemetry(
        factory: Arc<dyn EngineFactory>,
        audio_config: AudioConfig,
        telemetry: Arc<TelemetryCollector>,
    ) -> Self {
        Self {
            factory,
            audio_config,
            engine: None,
            state: EngineState::Uninitialized,
            telemetry,
        }
    }

    /// Handle backed by the silent desktop stub engine and default config.
    pub fn with_stub_engine() -> Self {
        Self::new(Arc::new(StubEngineFactory::new()), &AppConfig::default())
    }

    /// Swap the factory used for engines created from now on.
    ///
    /// An engine that already exists keeps running until released.
    pub fn set_factory(&mut self, factory: Arc<dyn EngineFactory>) {
        self.factory = factory;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn telemetry(&self) -> &Arc<TelemetryCollector> {
        &self.telemetry
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Create and initialize the native engine if none exists.
    ///
    /// # Returns
    /// * `true` - an engine is initialized (newly, or already present)
    /// * `false` - native initialization failed; no engine is kept
    pub fn initialize(&mut self) -> bool {
        if self.engine.is_some() {
            log::debug!(
                "[EngineHandle] initialize ignored, engine already present in state {}",
                self.state
            );
            return true;
        }

        let mut native = self.factory.create(&self.audio_config);
        if let Err(err) = native.initialize() {
            self.record_fault(&err, "initialize");
            if let Err(err) = native.release() {
                self.record_fault(&err, "initialize_cleanup");
            }
            self.telemetry
                .record(EngineEventKind::Initialized { success: false });
            return false;
        }

        let params = AudioParameters::default();
        if let Err(err) = native.set_volume(params.volume) {
            self.record_fault(&err, "initialize_volume");
        }
        if let Err(err) = native.set_frequency(params.frequency) {
            self.record_fault(&err, "initialize_frequency");
        }

        self.engine = Some(ActiveEngine { native, params });
        self.state = EngineState::Initialized;
        log::info!(
            "[EngineHandle] Engine initialized ({} Hz, {} channels)",
            self.audio_config.sample_rate,
            self.audio_config.output_channels
        );
        self.telemetry
            .record(EngineEventKind::Initialized { success: true });
        true
    }

    /// Begin output. No-op without an engine or while already playing.
    pub fn start(&mut self) {
        if !self.state.can_start() {
            log::debug!("[EngineHandle] start ignored in state {}", self.state);
            return;
        }
        let Some(active) = self.engine.as_mut() else {
            return;
        };

        match active.native.start() {
            Ok(()) => {
                self.state = EngineState::Playing;
                log::info!("[EngineHandle] Audio started");
                self.telemetry.record(EngineEventKind::Started);
            }
            Err(err) => self.record_fault(&err, "start"),
        }
    }

    /// Halt output. No-op unless playing.
    pub fn stop(&mut self) {
        if self.state != EngineState::Playing {
            log::debug!("[EngineHandle] stop ignored in state {}", self.state);
            return;
        }
        let Some(active) = self.engine.as_mut() else {
            return;
        };

        match active.native.stop() {
            Ok(()) => {
                self.state = EngineState::Stopped;
                log::info!("[EngineHandle] Audio stopped");
                self.telemetry.record(EngineEventKind::Stopped);
            }
            Err(err) => self.record_fault(&err, "stop"),
        }
    }

    /// Tear down the engine. Always leaves the handle without one.
    pub fn release(&mut self) {
        let Some(mut active) = self.engine.take() else {
            log::debug!("[EngineHandle] release ignored, no engine");
            return;
        };

        if self.state == EngineState::Playing {
            if let Err(err) = active.native.stop() {
                self.record_fault(&err, "release_stop");
            }
        }
        if let Err(err) = active.native.release() {
            self.record_fault(&err, "release");
        }
        drop(active);

        self.state = EngineState::Released;
        log::info!("[EngineHandle] Engine released");
        self.telemetry.record(EngineEventKind::Released);
    }

    // ========================================================================
    // PARAMETERS
    // ========================================================================

    /// Apply a volume immediately. Out-of-range values are clamped.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = policy::clamp_volume(volume);
        let Some(active) = self.engine.as_mut() else {
            log::debug!("[EngineHandle] set_volume ignored, no engine");
            return;
        };

        match active.native.set_volume(volume) {
            Ok(()) => {
                active.params.volume = volume;
                self.telemetry
                    .record(EngineEventKind::VolumeChanged { volume });
            }
            Err(err) => self.record_fault(&err, "set_volume"),
        }
    }

    /// Apply a frequency immediately. Non-positive values become the default.
    pub fn set_frequency(&mut self, frequency: f32) {
        let frequency = policy::sanitize_frequency(frequency);
        let Some(active) = self.engine.as_mut() else {
            log::debug!("[EngineHandle] set_frequency ignored, no engine");
            return;
        };

        match active.native.set_frequency(frequency) {
            Ok(()) => {
                active.params.frequency = frequency;
                self.telemetry
                    .record(EngineEventKind::FrequencyChanged { frequency });
            }
            Err(err) => self.record_fault(&err, "set_frequency"),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn is_playing(&self) -> bool {
        self.state == EngineState::Playing
    }

    pub fn volume(&self) -> f32 {
        self.engine
            .as_ref()
            .map_or(ABSENT_ENGINE_VOLUME, |active| active.params.volume)
    }

    pub fn frequency(&self) -> f32 {
        self.engine
            .as_ref()
            .map_or(ABSENT_ENGINE_FREQUENCY, |active| active.params.frequency)
    }

    /// Current parameters, if an engine exists.
    pub fn parameters(&self) -> Option<AudioParameters> {
        self.engine.as_ref().map(|active| active.params)
    }

    fn record_fault(&self, err: &AudioError, context: &str) {
        log_audio_error(err, context);
        self.telemetry.record(EngineEventKind::NativeFault {
            code: err.code(),
            context: context.to_string(),
        });
    }
}

impl Default for AudioEngineHandle {
    fn default() -> Self {
        Self::with_stub_engine()
    }
}

#[cfg(test)]
mod tests;
