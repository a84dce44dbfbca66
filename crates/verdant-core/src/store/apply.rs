// ── Operation lifecycle and result application ──
//
// Every operation follows begin -> request -> apply/fail -> end, with
// the end step tied to an RAII guard so it runs on every exit path.
// Read results carry a per-slice sequence ticket; a stale result is
// discarded rather than applied out of order.

use std::sync::atomic::Ordering;

use chrono::Utc;
use tracing::debug;

use verdant_api::model::{ActuatorSet, OperationMode, SensorSnapshot};

use super::sync_state::{Slice, SyncState};

/// Keeps `loading` raised for the duration of one operation; dropping
/// the guard lowers it again, on every exit path.
pub(crate) struct OperationGuard<'a> {
    store: &'a SyncState,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        // Last operation out turns the light off.
        if self.store.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.store.status.send_modify(|s| s.loading = false);
        }
    }
}

impl SyncState {
    // ── Operation lifecycle ──────────────────────────────────────────

    /// Begin an operation: raises `loading` and clears the previous
    /// error. Overlapping operations share the flag through an in-flight
    /// counter, so one finishing early cannot clear another's loading
    /// state.
    pub(crate) fn begin_operation(&self) -> OperationGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.status.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        OperationGuard { store: self }
    }

    /// Record a failed operation. The most recent failure wins; the slice
    /// the operation targeted is left untouched.
    pub(crate) fn record_failure(&self, message: impl Into<String>) {
        self.status.send_modify(|s| s.error = Some(message.into()));
    }

    // ── Read sequencing ──────────────────────────────────────────────

    /// Take a sequence ticket for a read about to be issued against the
    /// given slice.
    pub(crate) fn begin_read(&self, slice: Slice) -> u64 {
        self.seq(slice).issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Claim `ticket` as applied for `slice` unless a fresher result
    /// already landed. The sequence lock is held across the slice write
    /// by the callers below so applications cannot interleave.
    fn claim(&self, slice: Slice, ticket: u64) -> Option<std::sync::MutexGuard<'_, u64>> {
        let mut applied = self
            .seq(slice)
            .applied
            .lock()
            .expect("slice sequence lock poisoned");
        if ticket <= *applied {
            debug!(?slice, ticket, applied = *applied, "discarding stale read result");
            return None;
        }
        *applied = ticket;
        Some(applied)
    }

    fn touch(&self) {
        self.status.send_modify(|s| s.last_update = Some(Utc::now()));
    }

    // ── Result application ───────────────────────────────────────────

    /// Replace the sensors slice if `ticket` is still fresh.
    pub(crate) fn apply_sensors(&self, ticket: u64, snapshot: SensorSnapshot) -> bool {
        let Some(claim) = self.claim(Slice::Sensors, ticket) else {
            return false;
        };
        self.sensors.send_replace(Some(snapshot));
        drop(claim);
        self.touch();
        true
    }

    /// Replace the actuators slice if `ticket` is still fresh.
    pub(crate) fn apply_actuators(&self, ticket: u64, set: ActuatorSet) -> bool {
        let Some(claim) = self.claim(Slice::Actuators, ticket) else {
            return false;
        };
        self.actuators.send_replace(Some(set));
        drop(claim);
        self.touch();
        true
    }

    /// Replace the operation-mode slice if `ticket` is still fresh.
    pub(crate) fn apply_mode(&self, ticket: u64, mode: OperationMode) -> bool {
        let Some(claim) = self.claim(Slice::Mode, ticket) else {
            return false;
        };
        self.mode.send_replace(Some(mode));
        drop(claim);
        self.touch();
        true
    }
}
