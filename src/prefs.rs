//! Cook mode: a persisted kitchen-friendly display preference.

use crate::config::{Config, COOK_MODE_KEY};
use crate::notify::{Level, Notifier};
use crate::storage::Storage;
use tracing::warn;

/// Persisted on/off flag for cook mode.
///
/// The presentation layer reads [`CookMode::is_enabled`] to decide how to
/// lay out the recipe page.
#[derive(Debug)]
pub struct CookMode<S: Storage, N: Notifier> {
    storage: S,
    notifier: N,
    key: String,
    enabled: bool,
}

impl<S: Storage, N: Notifier> CookMode<S, N> {
    pub fn load(storage: S, notifier: N) -> Self {
        Self::load_with_key(storage, notifier, COOK_MODE_KEY)
    }

    /// Reads the flag under the key named in `config`.
    pub fn from_config(storage: S, notifier: N, config: &Config) -> Self {
        Self::load_with_key(storage, notifier, &config.cook_mode_key)
    }

    /// Reads the flag under `key`; missing or unreadable values mean off.
    pub fn load_with_key(storage: S, notifier: N, key: &str) -> Self {
        let enabled = match storage.load(key) {
            Ok(Some(blob)) => serde_json::from_str::<bool>(&blob).unwrap_or_else(|e| {
                warn!("Ignoring malformed cook mode flag: {}", e);
                false
            }),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to load cook mode flag: {}", e);
                false
            }
        };

        CookMode {
            storage,
            notifier,
            key: key.to_string(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.set(true);
        self.notifier.notify(
            "Cook mode enabled! Screen optimized for kitchen use.",
            Level::Info,
        );
    }

    pub fn disable(&mut self) {
        self.set(false);
        self.notifier.notify("Cook mode disabled.", Level::Info);
    }

    /// Switches the flag and returns the new state.
    pub fn toggle(&mut self) -> bool {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
        self.enabled
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn set(&mut self, enabled: bool) {
        self.enabled = enabled;
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = self.storage.save(&self.key, value) {
            warn!("Failed to persist cook mode flag: {}", e);
        }
    }
}
