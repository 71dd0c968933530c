use log::debug;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{PoisonError, RwLock};

use crate::error::Result;
use crate::models::{PreferenceUpdate, Preferences};

/// Per-client preferences, keyed by the client's address.
pub trait PreferenceStore: Send + Sync {
    /// Stored preferences, or the store's defaults for an unknown client.
    fn get(&self, client: IpAddr) -> Preferences;

    fn put(&self, client: IpAddr, prefs: Preferences);

    /// Validate and apply one change atomically, returning the new preferences.
    fn update(&self, client: IpAddr, change: PreferenceUpdate) -> Result<Preferences>;
}

/// Process-lifetime store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    defaults: Preferences,
    entries: RwLock<HashMap<IpAddr, Preferences>>,
}

impl InMemoryPreferenceStore {
    pub fn new(defaults: Preferences) -> Self {
        Self {
            defaults,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn defaults(&self) -> &Preferences {
        &self.defaults
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, client: IpAddr) -> Preferences {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&client)
            .cloned()
            .unwrap_or_else(|| self.defaults.clone())
    }

    fn put(&self, client: IpAddr, prefs: Preferences) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(client, prefs);
    }

    fn update(&self, client: IpAddr, change: PreferenceUpdate) -> Result<Preferences> {
        change.validate()?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let prefs = entries
            .entry(client)
            .or_insert_with(|| self.defaults.clone());
        change.apply(prefs);
        debug!("Updated preferences for {}: {:?}", client, change);
        Ok(prefs.clone())
    }
}
