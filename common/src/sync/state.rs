use std::fmt;

/// Where the collection stands with respect to the store.
///
/// `Idle` is the only state that accepts edits and saves. A load may be
/// restarted while `Loading`; nothing else may start while `Saving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Loading,
    Saving,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyncState::Idle => "idle",
            SyncState::Loading => "loading",
            SyncState::Saving => "saving",
        })
    }
}
