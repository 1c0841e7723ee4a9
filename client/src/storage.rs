use clash_tracker_shared::{CLAN_ID_KEY, ClanStore, StoreError};
use gloo_storage::{LocalStorage, Storage};

/// Clan tag kept as a plain string in `localStorage`, not JSON-encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalClanStore;

impl ClanStore for LocalClanStore {
    fn load(&self) -> Option<String> {
        LocalStorage::raw().get_item(CLAN_ID_KEY).ok().flatten()
    }

    fn save(&self, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(CLAN_ID_KEY, value)
            .map_err(|e| StoreError(format!("{e:?}")))
    }

    fn remove(&self) -> Result<(), StoreError> {
        LocalStorage::raw()
            .remove_item(CLAN_ID_KEY)
            .map_err(|e| StoreError(format!("{e:?}")))
    }
}
