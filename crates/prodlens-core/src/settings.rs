//! Locally persisted user settings.
//!
//! [`LocalStore`] is a flat string key-value file (JSON object of strings)
//! written through on every change. [`Settings`] is the typed view over the
//! two keys the application uses.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::CoreError;

/// Store key holding the provider API key.
pub const API_KEY_KEY: &str = "perplexity_api_key";
/// Store key holding the JSON-encoded list of subscribed categories.
pub const SUBSCRIPTIONS_KEY: &str = "subscribed_categories";

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreIo`] if the file exists but cannot be read,
    /// or [`CoreError::StoreParse`] if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| CoreError::StoreParse {
                path: path.display().to_string(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(CoreError::StoreIo {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        Ok(Self { path, entries })
    }

    /// Like [`LocalStore::open`], but a file that is not a JSON object of
    /// strings is treated as empty. It is replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreIo`] if the file exists but cannot be read.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        match Self::open(path.clone()) {
            Err(CoreError::StoreParse { source, .. }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "ignoring unreadable settings file; it will be replaced on next save"
                );
                Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::StoreIo`] if the file cannot be written.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    /// # Errors
    ///
    /// Returns [`CoreError::StoreIo`] if the file cannot be written.
    pub fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// Writes to a sibling temp file and renames it over the store.
    fn flush(&self) -> Result<(), CoreError> {
        let io_err = |e: std::io::Error| CoreError::StoreIo {
            path: self.path.display().to_string(),
            source: e,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            CoreError::StoreParse {
                path: self.path.display().to_string(),
                source: e,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionChange {
    Subscribed,
    Unsubscribed,
    Unchanged,
}

/// Typed settings read from a [`LocalStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub subscribed_categories: Vec<String>,
}

impl Settings {
    /// Reads settings from `store`. A corrupt subscription list is treated as
    /// empty rather than failing startup.
    #[must_use]
    pub fn load(store: &LocalStore) -> Self {
        let api_key = store
            .get(API_KEY_KEY)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        let subscribed_categories = match store.get(SUBSCRIPTIONS_KEY) {
            Some(raw) => serde_json::from_str::<Vec<String>>(raw).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %store.path().display(),
                    error = %e,
                    "ignoring unreadable subscription list"
                );
                Vec::new()
            }),
            None => Vec::new(),
        };

        Self {
            api_key,
            subscribed_categories,
        }
    }

    /// Stores a trimmed API key. Blank input is ignored and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreIo`] if the store cannot be written.
    pub fn set_api_key(&mut self, store: &mut LocalStore, key: &str) -> Result<bool, CoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Ok(false);
        }
        store.set(API_KEY_KEY, key)?;
        self.api_key = Some(key.to_string());
        Ok(true)
    }

    #[must_use]
    pub fn is_subscribed(&self, category: &str) -> bool {
        self.subscribed_categories.iter().any(|c| c == category)
    }

    /// Flips the subscription state of `category` and persists the list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreIo`] if the store cannot be written.
    pub fn toggle_subscription(
        &mut self,
        store: &mut LocalStore,
        category: &str,
    ) -> Result<SubscriptionChange, CoreError> {
        if self.is_subscribed(category) {
            self.unsubscribe(store, category)
        } else {
            self.subscribe(store, category)
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::StoreIo`] if the store cannot be written.
    pub fn subscribe(
        &mut self,
        store: &mut LocalStore,
        category: &str,
    ) -> Result<SubscriptionChange, CoreError> {
        if self.is_subscribed(category) {
            return Ok(SubscriptionChange::Unchanged);
        }
        self.subscribed_categories.push(category.to_string());
        self.persist_subscriptions(store)?;
        Ok(SubscriptionChange::Subscribed)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::StoreIo`] if the store cannot be written.
    pub fn unsubscribe(
        &mut self,
        store: &mut LocalStore,
        category: &str,
    ) -> Result<SubscriptionChange, CoreError> {
        if !self.is_subscribed(category) {
            return Ok(SubscriptionChange::Unchanged);
        }
        self.subscribed_categories.retain(|c| c != category);
        self.persist_subscriptions(store)?;
        Ok(SubscriptionChange::Unsubscribed)
    }

    fn persist_subscriptions(&self, store: &mut LocalStore) -> Result<(), CoreError> {
        let encoded = serde_json::to_string(&self.subscribed_categories).map_err(|e| {
            CoreError::StoreParse {
                path: store.path().display().to_string(),
                source: e,
            }
        })?;
        store.set(SUBSCRIPTIONS_KEY, encoded)
    }
}
