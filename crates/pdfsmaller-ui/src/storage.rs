//! Session-storage backend for the mode preference.
//!
//! Availability is probed once with a throwaway key; when the facility
//! is missing or throwing (private browsing, storage quota, non-browser
//! host), every operation degrades to a benign no-op and the uploader
//! behaves identically except preferences do not persist.

use pdfsmaller_uploader::PreferenceBackend;
use wasm_bindgen::JsValue;

const PROBE_KEY: &str = "__pdfsmaller_probe__";

/// [`PreferenceBackend`] over `window.sessionStorage`.
#[derive(Debug)]
pub struct SessionBackend {
    available: bool,
}

impl SessionBackend {
    /// Probe the storage facility and wrap it.
    ///
    /// Logs one console warning when the probe fails; later operations
    /// stay silent.
    #[must_use]
    pub fn new() -> Self {
        let available = probe();
        if !available {
            web_sys::console::warn_1(&JsValue::from_str(
                "pdfsmaller: session storage unavailable, mode preference will not persist",
            ));
        }
        Self { available }
    }
}

impl Default for SessionBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceBackend for SessionBackend {
    fn get(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        session_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if !self.available {
            return false;
        }
        session_storage().is_some_and(|s| s.set_item(key, value).is_ok())
    }

    fn remove(&self, key: &str) -> bool {
        if !self.available {
            return false;
        }
        session_storage().is_some_and(|s| s.remove_item(key).is_ok())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// Write-then-remove a throwaway key to verify the facility works.
fn probe() -> bool {
    session_storage().is_some_and(|storage| {
        storage.set_item(PROBE_KEY, "1").is_ok() && storage.remove_item(PROBE_KEY).is_ok()
    })
}

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}
