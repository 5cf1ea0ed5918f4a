use stint_client::dto::{ProjectPayload, TimeEntryPayload};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work enqueued by key handlers and drained once per frame. Payloads are
/// built at enqueue time so the draft they came from can transition to
/// `Saving` immediately.
#[derive(Debug, Clone)]
pub(super) enum Action {
    RefreshAll,
    RefreshEntries,
    CreateProject { payload: ProjectPayload },
    SaveProjectEdit { id: i64, payload: ProjectPayload },
    DeleteProject { id: i64 },
    CreateEntry { payload: TimeEntryPayload },
    SaveEntryEdit { id: i64, payload: TimeEntryPayload },
    DeleteEntry { id: i64 },
    SaveModalEdit { id: i64, payload: TimeEntryPayload },
    DeleteModalEntry { id: i64 },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
