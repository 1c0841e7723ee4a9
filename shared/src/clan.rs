use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClanIdError, StoreError};

/// Key under which the clan tag is persisted.
pub const CLAN_ID_KEY: &str = "clanId";

/// Clan tag with exactly one leading `#`, case preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClanIdentifier(String);

impl ClanIdentifier {
    /// Strips every `#` and surrounding whitespace, then reapplies a single prefix.
    pub fn parse(raw: &str) -> Result<Self, ClanIdError> {
        let stripped: String = raw.chars().filter(|c| *c != '#').collect();
        let stripped = stripped.trim();
        if stripped.is_empty() {
            return Err(ClanIdError::InvalidIdentifier);
        }
        Ok(Self(format!("#{stripped}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag without its `#` prefix, as the backend expects it.
    pub fn tag(&self) -> &str {
        self.0.strip_prefix('#').unwrap_or(&self.0)
    }
}

impl fmt::Display for ClanIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClanIdentifier {
    type Error = ClanIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClanIdentifier> for String {
    fn from(value: ClanIdentifier) -> Self {
        value.0
    }
}

/// Key-value port holding the raw persisted clan tag.
pub trait ClanStore {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str) -> Result<(), StoreError>;
    fn remove(&self) -> Result<(), StoreError>;
}

impl<S: ClanStore + ?Sized> ClanStore for &S {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, value: &str) -> Result<(), StoreError> {
        (**self).save(value)
    }

    fn remove(&self) -> Result<(), StoreError> {
        (**self).remove()
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryClanStore {
    value: RefCell<Option<String>>,
}

impl MemoryClanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: RefCell::new(Some(value.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl ClanStore for MemoryClanStore {
    fn load(&self) -> Option<String> {
        self.raw()
    }

    fn save(&self, value: &str) -> Result<(), StoreError> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        self.value.borrow_mut().take();
        Ok(())
    }
}

/// The single source of truth for "is a clan configured".
#[derive(Debug, Clone, Copy, Default)]
pub struct ClanIdentity<S> {
    store: S,
}

impl<S: ClanStore> ClanIdentity<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rehydrates the persisted tag. Values that no longer normalise are ignored.
    pub fn get(&self) -> Option<ClanIdentifier> {
        let raw = self.store.load()?;
        ClanIdentifier::parse(&raw).ok()
    }

    pub fn set(&self, raw: &str) -> Result<ClanIdentifier, ClanIdError> {
        let id = ClanIdentifier::parse(raw)?;
        self.store.save(id.as_str())?;
        Ok(id)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove()
    }

    pub fn is_configured(&self) -> bool {
        self.get().is_some()
    }
}
