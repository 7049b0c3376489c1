//! Snapshot document and file backend
//!
//! The whole economy persists as a single JSON document: the account map
//! plus the settings it was running with. Saves always serialize the full
//! current state, so event-driven and timer-driven writes can race
//! benignly (last write wins).

use crate::store::LedgerStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tally_core::{Account, GlobalSettings, Result, UserId};
use tracing::{info, warn};

/// The persisted document: every account plus global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub users: HashMap<UserId, Account>,
    pub settings: GlobalSettings,
}

impl Snapshot {
    /// Capture the full current state of a store
    pub fn capture(store: &LedgerStore) -> Self {
        Self {
            users: store.accounts().clone(),
            settings: store.settings().clone(),
        }
    }

    /// Turn a restored snapshot back into a live store
    pub fn into_store(self) -> LedgerStore {
        LedgerStore::from_parts(self.users, self.settings)
    }

    /// Serialize to pretty-printed JSON (diffable snapshots)
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Parse a previously serialized snapshot
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Durable snapshot storage at a fixed filesystem path
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot from disk.
    ///
    /// A missing file is not an error — the economy simply starts empty.
    /// Malformed content is a `Persistence` error; the caller decides how
    /// to degrade.
    pub async fn load(&self) -> Result<Option<Snapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Snapshot::from_bytes(&bytes).map(Some)
    }

    /// Load, degrading to an empty store on any failure.
    ///
    /// Load failures must never crash the process; they are logged and the
    /// store starts fresh with the given settings.
    pub async fn load_or_empty(&self, settings: GlobalSettings) -> LedgerStore {
        match self.load().await {
            Ok(Some(snapshot)) => {
                info!(
                    accounts = snapshot.users.len(),
                    path = %self.path.display(),
                    "Restored snapshot"
                );
                snapshot.into_store()
            }
            Ok(None) => {
                info!(path = %self.path.display(), "No snapshot found, starting empty");
                LedgerStore::new(settings)
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    "Snapshot unreadable, starting empty: {err}"
                );
                LedgerStore::new(settings)
            }
        }
    }

    /// Write the snapshot to disk.
    ///
    /// Creates parent directories if necessary and writes through a
    /// temporary file followed by a rename, so a crash mid-write leaves
    /// the previous snapshot intact.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = snapshot.to_bytes()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Error, RedeemedCard};

    fn populated_store() -> LedgerStore {
        let mut store = LedgerStore::default();
        store.get_or_create("alice").credit(250);
        let bob = store.get_or_create("bob");
        bob.credit(800);
        bob.streak = 3;
        bob.last_claim = Some("2026-02-10T08:30:00Z".parse().unwrap());
        bob.redeemed_cards.push(RedeemedCard {
            kind: "amazon".to_string(),
            cost: 500,
        });
        store
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = populated_store();
        let bytes = Snapshot::capture(&store).to_bytes().unwrap();
        let restored = Snapshot::from_bytes(&bytes).unwrap().into_store();

        assert_eq!(restored.accounts(), store.accounts());
        assert_eq!(restored.settings(), store.settings());
        // Empty redemption lists survive too
        assert!(restored
            .account("alice")
            .unwrap()
            .redeemed_cards
            .is_empty());
    }

    #[test]
    fn test_malformed_bytes_are_a_typed_error() {
        let err = Snapshot::from_bytes(b"{not json").unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("absent.json"));
        assert!(backend.load().await.unwrap().is_none());

        let store = backend.load_or_empty(GlobalSettings::default()).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("data").join("tally.json"));

        let store = populated_store();
        backend.save(&Snapshot::capture(&store)).await.unwrap();

        let restored = backend.load().await.unwrap().unwrap().into_store();
        assert_eq!(restored.accounts(), store.accounts());
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");
        tokio::fs::write(&path, b"\x00\x01garbage").await.unwrap();

        let backend = FileBackend::new(&path);
        assert!(matches!(
            backend.load().await.unwrap_err(),
            Error::Persistence(_)
        ));

        let store = backend.load_or_empty(GlobalSettings::default()).await;
        assert!(store.is_empty());
    }
}
