use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use clash_tracker_shared::{CLAN_ID_KEY, ClanStore, StoreError};
use tracing::warn;

/// JSON object of string values on disk; the clan lives under [`CLAN_ID_KEY`].
///
/// Unknown keys are preserved across writes. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileClanStore {
    path: PathBuf,
}

impl FileClanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError(format!("{}: {e}", self.path.display()))),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError(format!("{}: {e}", parent.display())))?;
        }
        let bytes = serde_json::to_vec_pretty(entries).map_err(|e| StoreError(e.to_string()))?;
        std::fs::write(&self.path, bytes)
            .map_err(|e| StoreError(format!("{}: {e}", self.path.display())))
    }
}

impl ClanStore for FileClanStore {
    fn load(&self) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(CLAN_ID_KEY),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable clan store");
                None
            }
        }
    }

    fn save(&self, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(CLAN_ID_KEY.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        if entries.remove(CLAN_ID_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}
