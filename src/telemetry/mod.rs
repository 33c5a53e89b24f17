//! Engine telemetry collector.
//!
//! Every state transition and parameter change on the control surface is
//! published here: live subscribers receive it over a tokio broadcast channel
//! and a bounded history backs `snapshot()` for polling callers. Publishing is
//! non-blocking and cannot fail, so the control path never waits on it.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tokio::sync::broadcast;

use crate::config::TelemetryConfig;
use crate::engine::backend::{SystemTimeSource, TimeSource};

pub mod events;

pub use events::{EngineEvent, EngineEventKind, LifecyclePhase};

/// Snapshot of collector state for CLI/FRB reporting.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TelemetrySnapshot {
    pub recent: Vec<EngineEvent>,
    pub total_events: u64,
    pub dropped_events: u64,
}

/// Broadcast-based collector retaining a bounded history of engine events.
pub struct TelemetryCollector {
    tx: broadcast::Sender<EngineEvent>,
    history: Mutex<VecDeque<EngineEvent>>,
    history_capacity: usize,
    total_events: AtomicU64,
    dropped_history: AtomicU64,
    time_source: Arc<dyn TimeSource>,
    start_instant: Instant,
}

impl TelemetryCollector {
    pub fn new(buffer: usize, history_capacity: usize) -> Self {
        Self::with_time_source(buffer, history_capacity, Arc::new(SystemTimeSource::default()))
    }

    pub fn with_time_source(
        buffer: usize,
        history_capacity: usize,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        // broadcast::channel panics on zero capacity
        let (tx, _) = broadcast::channel(buffer.max(1));
        let start_instant = time_source.now();
        Self {
            tx,
            history: Mutex::new(VecDeque::with_capacity(history_capacity)),
            history_capacity,
            total_events: AtomicU64::new(0),
            dropped_history: AtomicU64::new(0),
            time_source,
            start_instant,
        }
    }

    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::new(config.channel_capacity, config.history_capacity)
    }

    /// Timestamp `kind` and publish it.
    pub fn record(&self, kind: EngineEventKind) {
        let timestamp_ms = self
            .time_source
            .now()
            .saturating_duration_since(self.start_instant)
            .as_millis() as u64;
        self.publish(EngineEvent { timestamp_ms, kind });
    }

    pub fn publish(&self, event: EngineEvent) {
        self.total_events.fetch_add(1, Ordering::Relaxed);
        if self.history_capacity > 0 {
            let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
            if history.len() == self.history_capacity {
                history.pop_front();
                self.dropped_history.fetch_add(1, Ordering::Relaxed);
            }
            history.push_back(event.clone());
        }

        // No subscribers is the normal case
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        TelemetrySnapshot {
            recent: history.iter().cloned().collect(),
            total_events: self.total_events.load(Ordering::Relaxed),
            dropped_events: self.dropped_history.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::from_config(&TelemetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::backend::StubTimeSource;

    #[test]
    fn collector_preserves_order_within_history() {
        let collector = TelemetryCollector::new(8, 3);
        collector.record(EngineEventKind::Initialized { success: true });
        collector.record(EngineEventKind::Started);
        collector.record(EngineEventKind::VolumeChanged { volume: 0.8 });

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.recent.len(), 3);
        assert!(matches!(
            snapshot.recent[0].kind,
            EngineEventKind::Initialized { success: true }
        ));
        assert!(
            matches!(snapshot.recent[2].kind, EngineEventKind::VolumeChanged { volume } if (volume - 0.8).abs() < f32::EPSILON)
        );
    }

    #[test]
    fn collector_drops_history_when_full() {
        let collector = TelemetryCollector::new(8, 2);
        collector.record(EngineEventKind::Started);
        collector.record(EngineEventKind::Stopped);
        collector.record(EngineEventKind::Released);

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.recent.len(), 2);
        assert_eq!(snapshot.total_events, 3);
        assert_eq!(snapshot.dropped_events, 1);
        assert_eq!(snapshot.recent[0].kind, EngineEventKind::Stopped);
    }

    #[test]
    fn subscribers_receive_published_events() {
        let collector = TelemetryCollector::new(4, 4);
        let mut rx = collector.subscribe();
        collector.record(EngineEventKind::UnknownCommand {
            method: "frobnicate".to_string(),
        });

        let event = rx.try_recv().expect("event delivered");
        assert_eq!(
            event.kind,
            EngineEventKind::UnknownCommand {
                method: "frobnicate".to_string()
            }
        );
    }

    #[test]
    fn timestamps_follow_time_source() {
        let collector =
            TelemetryCollector::with_time_source(4, 4, Arc::new(StubTimeSource::default()));
        collector.record(EngineEventKind::Started);
        collector.record(EngineEventKind::Stopped);

        let snapshot = collector.snapshot();
        assert!(snapshot.recent[0].timestamp_ms < snapshot.recent[1].timestamp_ms);
    }

    #[test]
    fn zero_capacity_config_still_publishes() {
        let collector = TelemetryCollector::new(0, 0);
        collector.record(EngineEventKind::Started);

        let snapshot = collector.snapshot();
        assert!(snapshot.recent.is_empty());
        assert_eq!(snapshot.total_events, 1);
    }

    #[test]
    fn events_serialize_with_tagged_kind() {
        let event = EngineEvent {
            timestamp_ms: 5,
            kind: EngineEventKind::FrequencyChanged { frequency: 440.0 },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"]["type"], "frequency_changed");
        assert_eq!(json["kind"]["payload"]["frequency"], 440.0);
    }
}
