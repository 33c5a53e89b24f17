//! Engine module housing the lifecycle owner for the native tone engine.
//!
//! This module exposes the trait-based backend seam (`backend`), the lifecycle
//! types (`state`) and the `AudioEngineHandle` that owns the one engine.

pub mod backend;
pub mod handle;
pub mod state;

pub use backend::{
    EngineFactory, StubEngineFactory, StubEngineProbe, StubTimeSource, SystemTimeSource,
    TimeSource, ToneEngine,
};
pub use handle::{AudioEngineHandle, ABSENT_ENGINE_FREQUENCY, ABSENT_ENGINE_VOLUME};
pub use state::{AudioParameters, EngineState};
