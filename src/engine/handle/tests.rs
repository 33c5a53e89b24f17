use super::*;
use crate::engine::backend::StubEngineProbe;

fn stub_handle() -> (AudioEngineHandle, Arc<StubEngineProbe>) {
    let factory = StubEngineFactory::new();
    let probe = factory.probe();
    let handle = AudioEngineHandle::new(Arc::new(factory), &AppConfig::default());
    (handle, probe)
}

fn failing_handle(factory: StubEngineFactory) -> (AudioEngineHandle, Arc<StubEngineProbe>) {
    let probe = factory.probe();
    let handle = AudioEngineHandle::new(Arc::new(factory), &AppConfig::default());
    (handle, probe)
}

fn native_faults(handle: &AudioEngineHandle) -> usize {
    handle
        .telemetry()
        .snapshot()
        .recent
        .iter()
        .filter(|event| matches!(event.kind, EngineEventKind::NativeFault { .. }))
        .count()
}

#[test]
fn new_handle_has_no_engine() {
    let (handle, probe) = stub_handle();
    assert_eq!(handle.state(), EngineState::Uninitialized);
    assert!(!handle.is_playing());
    assert_eq!(handle.volume(), 0.0);
    assert_eq!(handle.frequency(), 440.0);
    assert!(handle.parameters().is_none());
    assert_eq!(probe.created_count(), 0);
}

#[test]
fn initialize_creates_engine_with_defaults() {
    let (mut handle, probe) = stub_handle();
    assert!(handle.initialize());
    assert_eq!(handle.state(), EngineState::Initialized);
    assert_eq!(handle.volume(), 0.5);
    assert_eq!(handle.frequency(), 440.0);
    assert_eq!(probe.live_engines(), 1);
    assert_eq!(probe.last_volume(), 0.5);
    assert_eq!(probe.last_frequency(), 440.0);
}

#[test]
fn initialize_twice_keeps_single_engine() {
    let (mut handle, probe) = stub_handle();
    assert!(handle.initialize());
    handle.start();
    assert!(handle.initialize());

    assert_eq!(probe.created_count(), 1);
    assert_eq!(probe.live_engines(), 1);
    assert_eq!(handle.state(), EngineState::Playing);
}

#[test]
fn failed_initialize_reports_false_and_keeps_no_engine() {
    let (mut handle, probe) = failing_handle(StubEngineFactory::new().failing_initialize());
    assert!(!handle.initialize());
    assert_eq!(handle.state(), EngineState::Uninitialized);
    assert_eq!(probe.live_engines(), 0);

    handle.start();
    assert!(!handle.is_playing());
    assert_eq!(handle.volume(), 0.0);
    assert_eq!(native_faults(&handle), 1);
}

#[test]
fn start_and_stop_before_initialize_are_noops() {
    let (mut handle, probe) = stub_handle();
    handle.start();
    assert_eq!(handle.state(), EngineState::Uninitialized);
    handle.stop();
    assert_eq!(handle.state(), EngineState::Uninitialized);
    assert!(!probe.is_running());
}

#[test]
fn start_twice_stays_playing() {
    let (mut handle, probe) = stub_handle();
    handle.initialize();
    handle.start();
    handle.start();
    assert_eq!(handle.state(), EngineState::Playing);
    assert!(handle.is_playing());
    assert!(probe.is_running());
}

#[test]
fn stop_twice_stays_stopped() {
    let (mut handle, probe) = stub_handle();
    handle.initialize();
    handle.start();
    handle.stop();
    handle.stop();
    assert_eq!(handle.state(), EngineState::Stopped);
    assert!(!probe.is_running());
}

#[test]
fn stop_without_playing_leaves_initialized() {
    let (mut handle, _probe) = stub_handle();
    handle.initialize();
    handle.stop();
    assert_eq!(handle.state(), EngineState::Initialized);
}

#[test]
fn restart_after_stop() {
    let (mut handle, _probe) = stub_handle();
    handle.initialize();
    handle.start();
    handle.stop();
    handle.start();
    assert!(handle.is_playing());
}

#[test]
fn start_fault_leaves_state_unchanged() {
    let (mut handle, _probe) = failing_handle(StubEngineFactory::new().failing_start());
    assert!(handle.initialize());
    handle.start();
    assert_eq!(handle.state(), EngineState::Initialized);
    assert_eq!(native_faults(&handle), 1);
}

#[test]
fn release_is_always_safe() {
    let (mut handle, probe) = stub_handle();
    handle.release();
    assert_eq!(handle.state(), EngineState::Uninitialized);

    handle.initialize();
    handle.start();
    handle.release();
    assert_eq!(handle.state(), EngineState::Released);
    assert_eq!(probe.live_engines(), 0);
    assert_eq!(probe.released_count(), 1);
    assert!(!probe.is_running());

    handle.release();
    assert_eq!(handle.state(), EngineState::Released);
    assert_eq!(probe.released_count(), 1);
}

#[test]
fn accessors_report_defaults_after_release() {
    let (mut handle, _probe) = stub_handle();
    handle.initialize();
    handle.set_volume(0.9);
    handle.set_frequency(880.0);
    handle.release();

    assert!(!handle.is_playing());
    assert_eq!(handle.volume(), 0.0);
    assert_eq!(handle.frequency(), 440.0);
}

#[test]
fn reinitialize_after_release_starts_fresh() {
    let (mut handle, probe) = stub_handle();
    handle.initialize();
    handle.set_volume(0.2);
    handle.release();

    assert!(handle.initialize());
    assert_eq!(handle.state(), EngineState::Initialized);
    assert_eq!(handle.volume(), 0.5);
    assert_eq!(probe.created_count(), 2);
    assert_eq!(probe.live_engines(), 1);
}

#[test]
fn set_volume_round_trips_and_clamps() {
    let (mut handle, probe) = stub_handle();
    handle.initialize();

    handle.set_volume(0.8);
    assert!((handle.volume() - 0.8).abs() < f32::EPSILON);
    assert!((probe.last_volume() - 0.8).abs() < f32::EPSILON);

    handle.set_volume(3.0);
    assert_eq!(handle.volume(), 1.0);
    handle.set_volume(-1.0);
    assert_eq!(handle.volume(), 0.0);
    assert_eq!(probe.last_volume(), 0.0);
}

#[test]
fn set_frequency_corrects_non_positive_values() {
    let (mut handle, probe) = stub_handle();
    handle.initialize();

    handle.set_frequency(1000.0);
    assert_eq!(handle.frequency(), 1000.0);

    handle.set_frequency(-5.0);
    assert_eq!(handle.frequency(), 440.0);
    assert_eq!(probe.last_frequency(), 440.0);

    handle.set_frequency(25_000.0);
    assert_eq!(handle.frequency(), 25_000.0);
}

#[test]
fn parameter_changes_without_engine_are_ignored() {
    let (mut handle, probe) = stub_handle();
    handle.set_volume(0.8);
    handle.set_frequency(880.0);
    assert_eq!(handle.volume(), 0.0);
    assert_eq!(handle.frequency(), 440.0);
    assert_eq!(probe.created_count(), 0);
}

#[test]
fn parameters_apply_while_playing() {
    let (mut handle, _probe) = stub_handle();
    handle.initialize();
    handle.start();
    handle.set_volume(0.25);
    assert!(handle.is_playing());
    assert_eq!(
        handle.parameters(),
        Some(AudioParameters {
            volume: 0.25,
            frequency: 440.0
        })
    );
}

#[test]
fn lifecycle_is_recorded_in_telemetry() {
    let (mut handle, _probe) = stub_handle();
    handle.initialize();
    handle.start();
    handle.stop();
    handle.release();

    let kinds: Vec<EngineEventKind> = handle
        .telemetry()
        .snapshot()
        .recent
        .into_iter()
        .map(|event| event.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            EngineEventKind::Initialized { success: true },
            EngineEventKind::Started,
            EngineEventKind::Stopped,
            EngineEventKind::Released,
        ]
    );
}
