//! Tally Persistence - Ledger store, snapshot codec, and autosave

pub mod autosave;
pub mod snapshot;
pub mod store;

pub use autosave::{spawn_autosave, AutosaveHandle, DEFAULT_SAVE_INTERVAL};
pub use snapshot::{FileBackend, Snapshot};
pub use store::LedgerStore;
