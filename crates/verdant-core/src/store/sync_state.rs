// ── SyncState storage and accessors ──
//
// Each data slice is a whole-value snapshot in a watch channel: reads
// are wait-free copies, mutations notify subscribers. Slices start as
// `None` until the first successful read populates them; a failed read
// never touches its slice.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use verdant_api::model::{ActuatorSet, OperationMode, SensorSnapshot};

/// Shared status of the synchronization machinery, global across all
/// operations (not per-resource).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncStatus {
    /// At least one operation (read or write) is in flight.
    pub loading: bool,
    /// Message of the most recently completed failing operation; cleared
    /// at the start of each new operation. No history is kept.
    pub error: Option<String>,
    /// When the last successful read landed.
    pub last_update: Option<DateTime<Utc>>,
}

/// Which data slice a read populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slice {
    Sensors,
    Actuators,
    Mode,
}

/// Per-slice sequence counters guarding against out-of-order application
/// of overlapping reads: a response is discarded once a response with a
/// higher ticket for the same slice has been applied.
#[derive(Debug, Default)]
pub(super) struct SliceSeq {
    pub issued: AtomicU64,
    pub applied: Mutex<u64>,
}

/// The shared record of synchronized backend state.
pub struct SyncState {
    pub(super) sensors: watch::Sender<Option<SensorSnapshot>>,
    pub(super) actuators: watch::Sender<Option<ActuatorSet>>,
    pub(super) mode: watch::Sender<Option<OperationMode>>,
    pub(super) status: watch::Sender<SyncStatus>,
    pub(super) in_flight: AtomicUsize,
    pub(super) sensors_seq: SliceSeq,
    pub(super) actuators_seq: SliceSeq,
    pub(super) mode_seq: SliceSeq,
}

impl SyncState {
    pub fn new() -> Self {
        let (sensors, _) = watch::channel(None);
        let (actuators, _) = watch::channel(None);
        let (mode, _) = watch::channel(None);
        let (status, _) = watch::channel(SyncStatus::default());

        Self {
            sensors,
            actuators,
            mode,
            status,
            in_flight: AtomicUsize::new(0),
            sensors_seq: SliceSeq::default(),
            actuators_seq: SliceSeq::default(),
            mode_seq: SliceSeq::default(),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn sensors(&self) -> Option<SensorSnapshot> {
        *self.sensors.borrow()
    }

    pub fn actuators(&self) -> Option<ActuatorSet> {
        *self.actuators.borrow()
    }

    pub fn operation_mode(&self) -> Option<OperationMode> {
        *self.mode.borrow()
    }

    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.status.borrow().last_update
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_sensors(&self) -> watch::Receiver<Option<SensorSnapshot>> {
        self.sensors.subscribe()
    }

    pub fn subscribe_actuators(&self) -> watch::Receiver<Option<ActuatorSet>> {
        self.actuators.subscribe()
    }

    pub fn subscribe_mode(&self) -> watch::Receiver<Option<OperationMode>> {
        self.mode.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    // ── Internal helpers ─────────────────────────────────────────────

    pub(super) fn seq(&self, slice: Slice) -> &SliceSeq {
        match slice {
            Slice::Sensors => &self.sensors_seq,
            Slice::Actuators => &self.actuators_seq,
            Slice::Mode => &self.mode_seq,
        }
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}
