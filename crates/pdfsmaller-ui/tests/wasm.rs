//! Browser smoke tests for the storage backend and live regions.
//!
//! Run with `wasm-pack test --headless --chrome crates/pdfsmaller-ui`.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used)]

use pdfsmaller_uploader::{Mode, PreferenceBackend, PreferenceStore};
use pdfsmaller_ui::live_region::{self, Assertiveness};
use pdfsmaller_ui::storage::SessionBackend;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn session_backend_round_trips() {
    let backend = SessionBackend::new();
    assert!(backend.is_available());
    assert!(backend.set("wasm-test-key", "hello"));
    assert_eq!(backend.get("wasm-test-key"), Some("hello".to_owned()));
    assert!(backend.remove("wasm-test-key"));
    assert_eq!(backend.get("wasm-test-key"), None);
}

#[wasm_bindgen_test]
fn preference_store_round_trips_over_session_storage() {
    let store = PreferenceStore::new(SessionBackend::new());
    let ts = "2026-08-06T12:00:00.000Z".to_owned();
    assert!(store.save(Mode::Batch, "wasm-pref", ts.clone()));
    assert_eq!(store.load("wasm-pref", ts), Some(Mode::Batch));
    assert!(store.clear("wasm-pref"));
}

#[wasm_bindgen_test]
fn live_regions_are_created_lazily_and_reused() {
    live_region::announce("first", Assertiveness::Polite);
    live_region::announce("second", Assertiveness::Polite);
    let document = web_sys::window().unwrap().document().unwrap();
    let polite = document
        .get_element_by_id("pdfsmaller-live-region-polite")
        .unwrap();
    assert_eq!(polite.text_content(), Some("second".to_owned()));
    assert_eq!(polite.get_attribute("aria-live"), Some("polite".to_owned()));

    live_region::announce("urgent", Assertiveness::Assertive);
    let assertive = document
        .get_element_by_id("pdfsmaller-live-region-assertive")
        .unwrap();
    assert_eq!(assertive.get_attribute("role"), Some("alert".to_owned()));
}
