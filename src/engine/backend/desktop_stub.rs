use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AudioConfig;
use crate::error::AudioError;

use super::{EngineFactory, TimeSource, ToneEngine};

/// Shared counters observed by tests and the CLI.
///
/// Every engine created by one [`StubEngineFactory`] reports into the same
/// probe, so callers can see what actually reached the "native" side.
#[derive(Debug, Default)]
pub struct StubEngineProbe {
    running: AtomicBool,
    volume_bits: AtomicU32,
    frequency_bits: AtomicU32,
    created: AtomicU64,
    initialized: AtomicU64,
    released: AtomicU64,
    live: AtomicUsize,
}

impl StubEngineProbe {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Last volume pushed to any engine.
    pub fn last_volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::SeqCst))
    }

    /// Last frequency pushed to any engine.
    pub fn last_frequency(&self) -> f32 {
        f32::from_bits(self.frequency_bits.load(Ordering::SeqCst))
    }

    pub fn created_count(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }

    pub fn initialized_count(&self) -> u64 {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn released_count(&self) -> u64 {
        self.released.load(Ordering::SeqCst)
    }

    /// Engines created and not yet dropped.
    pub fn live_engines(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// Silent engine used on desktop, in tests and by the CLI harness.
///
/// Tracks lifecycle and parameters with atomics and produces no audio.
pub struct StubToneEngine {
    probe: Arc<StubEngineProbe>,
    fail_initialize: bool,
    fail_start: bool,
    sample_rate: u32,
}

impl StubToneEngine {
    fn new(probe: Arc<StubEngineProbe>, factory: &StubEngineFactory, sample_rate: u32) -> Self {
        probe.created.fetch_add(1, Ordering::SeqCst);
        probe.live.fetch_add(1, Ordering::SeqCst);
        Self {
            probe,
            fail_initialize: factory.fail_initialize,
            fail_start: factory.fail_start,
            sample_rate,
        }
    }
}

impl ToneEngine for StubToneEngine {
    fn initialize(&mut self) -> Result<(), AudioError> {
        if self.fail_initialize {
            return Err(AudioError::InitializationFailed {
                reason: "stub engine configured to fail".to_string(),
            });
        }
        if self.sample_rate == 0 {
            return Err(AudioError::InitializationFailed {
                reason: "sample rate must be greater than 0".to_string(),
            });
        }
        self.probe.initialized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn start(&mut self) -> Result<(), AudioError> {
        if self.fail_start {
            return Err(AudioError::StartFailed {
                reason: "stub engine configured to fail".to_string(),
            });
        }
        self.probe.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.probe.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.probe
            .volume_bits
            .store(volume.to_bits(), Ordering::SeqCst);
        Ok(())
    }

    fn set_frequency(&mut self, frequency: f32) -> Result<(), AudioError> {
        self.probe
            .frequency_bits
            .store(frequency.to_bits(), Ordering::SeqCst);
        Ok(())
    }

    fn release(&mut self) -> Result<(), AudioError> {
        self.probe.running.store(false, Ordering::SeqCst);
        self.probe.released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for StubToneEngine {
    fn drop(&mut self) {
        self.probe.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Factory producing [`StubToneEngine`]s that share one probe.
#[derive(Clone, Default)]
pub struct StubEngineFactory {
    probe: Arc<StubEngineProbe>,
    fail_initialize: bool,
    fail_start: bool,
}

impl StubEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engines from this factory report native initialization failure.
    pub fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    /// Engines from this factory refuse to start.
    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn probe(&self) -> Arc<StubEngineProbe> {
        Arc::clone(&self.probe)
    }
}

impl EngineFactory for StubEngineFactory {
    fn create(&self, config: &AudioConfig) -> Box<dyn ToneEngine> {
        Box::new(StubToneEngine::new(
            Arc::clone(&self.probe),
            self,
            config.sample_rate,
        ))
    }
}

/// Deterministic time source for desktop runs.
///
/// Each call to `now()` advances by a fixed 10ms to guarantee monotonic
/// timestamps even when no real audio stream is active.
pub struct StubTimeSource {
    start: Instant,
    offset_ms: AtomicU64,
}

impl StubTimeSource {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }
}

impl Default for StubTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for StubTimeSource {
    fn now(&self) -> Instant {
        let ms = self.offset_ms.fetch_add(10, Ordering::SeqCst);
        self.start + Duration::from_millis(ms)
    }
}
