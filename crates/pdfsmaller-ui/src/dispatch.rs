//! DOM `CustomEvent` dispatch for the uploader's event vocabulary.
//!
//! Each [`UploaderEvent`] is serialized to its documented camelCase
//! payload, wrapped in an envelope that adds the ISO-8601 `timestamp`,
//! and dispatched as a bubbling `CustomEvent` on the uploader's root
//! element. External collaborators listen on the element (or any
//! ancestor); internal consumers use the component's `EventHandler`
//! props instead.

use pdfsmaller_uploader::UploaderEvent;
use wasm_bindgen::JsValue;

/// Current time as an ISO-8601 string (`Date.prototype.toISOString`).
#[must_use]
pub fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Dispatch `event` on the element with id `root_id`.
///
/// Silently no-ops when the element is not mounted yet or the host is
/// not a browser; event dispatch must never fail the uploader.
pub fn dispatch(root_id: &str, event: &UploaderEvent) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(element) = document.get_element_by_id(root_id) else {
        return;
    };
    let Some(detail) = envelope(event) else {
        return;
    };

    let init = web_sys::CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);
    if let Ok(custom) = web_sys::CustomEvent::new_with_event_init_dict(event.name(), &init) {
        let _ = element.dispatch_event(&custom);
    }
}

/// Serialize the payload and stamp the envelope timestamp.
///
/// Payload-less events (e.g. `reset`) produce an envelope holding only
/// the timestamp.
fn envelope(event: &UploaderEvent) -> Option<JsValue> {
    let payload = serde_json::to_value(event).ok()?;
    let mut object = match payload {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => serde_json::Map::new(),
        other => {
            let mut map = serde_json::Map::new();
            map.insert("value".to_owned(), other);
            map
        }
    };
    object.insert(
        "timestamp".to_owned(),
        serde_json::Value::String(now_iso()),
    );
    let json = serde_json::to_string(&serde_json::Value::Object(object)).ok()?;
    js_sys::JSON::parse(&json).ok()
}
