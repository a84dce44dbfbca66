// ── Reactive sync state ──
//
// Single shared record of the last synchronized backend state plus the
// global loading/error status. Mutated only by the controller; observed
// through watch channels.

mod apply;
mod sync_state;

pub(crate) use sync_state::Slice;
pub use sync_state::{SyncState, SyncStatus};
