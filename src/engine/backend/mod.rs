//! Backend abstractions for the opaque native tone engine.
//!
//! The control core never looks inside the engine. It creates one through an
//! [`EngineFactory`] and drives it through [`ToneEngine`]; platform shells
//! install the factory wrapping their native generator.

use std::time::Instant;

use crate::config::AudioConfig;
use crate::error::AudioError;

/// Trait implemented by native tone generators.
///
/// Parameter values passed in are always in-domain: volume in `[0.0, 1.0]`,
/// frequency finite and positive.
pub trait ToneEngine: Send {
    /// Acquire the output device. Called once, right after creation.
    fn initialize(&mut self) -> Result<(), AudioError>;
    fn start(&mut self) -> Result<(), AudioError>;
    fn stop(&mut self) -> Result<(), AudioError>;
    fn set_volume(&mut self, volume: f32) -> Result<(), AudioError>;
    fn set_frequency(&mut self, frequency: f32) -> Result<(), AudioError>;
    /// Free native resources. The engine is dropped right after.
    fn release(&mut self) -> Result<(), AudioError>;
}

/// Creates native engines on demand.
pub trait EngineFactory: Send + Sync {
    fn create(&self, config: &AudioConfig) -> Box<dyn ToneEngine>;
}

/// Trait representing a monotonic time source used for telemetry timestamps.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

/// Default time source backed by `Instant::now`.
#[derive(Default)]
pub struct SystemTimeSource {
    _unit: (),
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

mod desktop_stub;
pub use desktop_stub::{StubEngineFactory, StubEngineProbe, StubTimeSource, StubToneEngine};
