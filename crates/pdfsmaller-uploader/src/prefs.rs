//! Session-scoped mode preference records.
//!
//! The persisted form is a single JSON object per key:
//! `{"mode":"single"|"batch","timestamp":"<ISO-8601>","version":"1.0"}`.
//! Legacy plain strings (`"single"` / `"batch"`) are accepted on read
//! and rewritten as JSON. Corrupt entries are cleared.
//!
//! Storage lives behind [`PreferenceBackend`] so the core stays free of
//! browser APIs; every failure is benign — the uploader behaves
//! identically except preferences do not persist.

use serde::{Deserialize, Serialize};

use crate::mode::{Mode, ModeResolution, resolve_initial};

/// Version stamp written with every new record.
pub const PREFERENCE_VERSION: &str = "1.0";

/// The persisted form of a mode preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    /// The remembered mode.
    pub mode: Mode,
    /// ISO-8601 write time, supplied by the host layer.
    pub timestamp: String,
    /// Format version; readers accept any `"1."` prefix.
    pub version: String,
}

impl PreferenceRecord {
    /// A new record stamped with the current version.
    #[must_use]
    pub fn new(mode: Mode, timestamp: String) -> Self {
        Self {
            mode,
            timestamp,
            version: PREFERENCE_VERSION.to_owned(),
        }
    }

    /// Whether this reader understands the record's version.
    #[must_use]
    pub fn version_supported(&self) -> bool {
        self.version.starts_with("1.")
    }
}

/// Key/value seam over the session storage facility.
///
/// Implementations must be non-throwing: return `None`/`false` on any
/// failure. Availability is probed by the store before use.
pub trait PreferenceBackend {
    /// Read the raw value at `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Write `value` at `key`; `true` on success.
    fn set(&self, key: &str, value: &str) -> bool;
    /// Remove the entry at `key`; `true` on success.
    fn remove(&self, key: &str) -> bool;
    /// Whether the facility is usable at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// In-memory backend for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

impl MemoryBackend {
    /// An empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

/// Inputs to [`PreferenceStore::resolve_initial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions<'a> {
    /// Legacy multiple flag (lowest priority).
    pub legacy_multiple: bool,
    /// Raw `default-mode` value, unparsed.
    pub default_mode: Option<&'a str>,
    /// Whether the session preference participates.
    pub remember_preference: bool,
    /// Preference key to consult.
    pub key: &'a str,
}

/// Mode preference persistence over a [`PreferenceBackend`].
#[derive(Debug)]
pub struct PreferenceStore<B> {
    backend: B,
}

impl<B: PreferenceBackend> PreferenceStore<B> {
    /// Wrap a backend.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Persist `mode` under `key`. Returns `false` when the facility is
    /// unavailable or the write failed; never fails the caller.
    pub fn save(&self, mode: Mode, key: &str, timestamp: String) -> bool {
        if !self.backend.is_available() {
            return false;
        }
        let record = PreferenceRecord::new(mode, timestamp);
        serde_json::to_string(&record)
            .is_ok_and(|json| self.backend.set(key, &json))
    }

    /// Load the mode stored under `key`.
    ///
    /// JSON records with a supported version return their mode. A legacy
    /// plain mode string is rewritten as JSON (re-stamped with the given
    /// timestamp) and returned. Anything else clears the entry and
    /// returns `None`.
    pub fn load(&self, key: &str, rewrite_timestamp: String) -> Option<Mode> {
        if !self.backend.is_available() {
            return None;
        }
        let raw = self.backend.get(key)?;

        if let Ok(record) = serde_json::from_str::<PreferenceRecord>(&raw) {
            if record.version_supported() {
                return Some(record.mode);
            }
            self.backend.remove(key);
            return None;
        }

        // Legacy path: the bare mode string, with or without quotes.
        let trimmed = raw.trim().trim_matches('"');
        if let Ok(mode) = trimmed.parse::<Mode>() {
            self.save(mode, key, rewrite_timestamp);
            return Some(mode);
        }

        self.backend.remove(key);
        None
    }

    /// Remove the entry under `key`; `true` on success.
    pub fn clear(&self, key: &str) -> bool {
        if !self.backend.is_available() {
            return false;
        }
        self.backend.remove(key)
    }

    /// Resolve the uploader's initial mode, consulting the stored
    /// preference when enabled.
    pub fn resolve_initial(&self, options: ResolveOptions<'_>, timestamp: String) -> ModeResolution {
        let stored = if options.remember_preference {
            self.load(options.key, timestamp)
        } else {
            None
        };
        resolve_initial(
            options.legacy_multiple,
            options.default_mode,
            stored,
            options.remember_preference,
        )
    }

    /// React to a user-initiated mode change: persist when enabled.
    ///
    /// Returns `true` when a record was written.
    pub fn handle_mode_change(
        &self,
        mode: Mode,
        remember_preference: bool,
        key: &str,
        timestamp: String,
    ) -> bool {
        remember_preference && self.save(mode, key, timestamp)
    }

    /// Whether the underlying facility is usable.
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }
}
