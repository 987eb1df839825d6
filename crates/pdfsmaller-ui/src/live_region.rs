//! Offscreen ARIA live regions shared by all uploader instances.
//!
//! Two process-wide singleton elements are created lazily on first
//! announcement and appended to `document.body`: a polite region for
//! status lines (mode changes, intake summaries) and an assertive
//! region for toggle disabled/enabled transitions. Sharing is safe
//! because announcements are serialized by the browser event loop.
//!
//! All functions silently no-op outside a browser environment.

/// How urgently assistive technology should announce the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assertiveness {
    /// Announced at the next graceful opportunity.
    Polite,
    /// Interrupts the current utterance.
    Assertive,
}

const POLITE_ID: &str = "pdfsmaller-live-region-polite";
const ASSERTIVE_ID: &str = "pdfsmaller-live-region-assertive";

/// Visually-hidden styling that keeps the region in the accessibility
/// tree. `display:none` would mute it.
const OFFSCREEN_STYLE: &str =
    "position:absolute;width:1px;height:1px;margin:-1px;padding:0;border:0;\
     clip:rect(0 0 0 0);overflow:hidden;white-space:nowrap;";

/// Announce `text` on the shared live region for `level`.
pub fn announce(text: &str, level: Assertiveness) {
    let Some(region) = region_for(level) else {
        return;
    };
    // Clear first so repeating the same text is re-announced.
    region.set_text_content(None);
    region.set_text_content(Some(text));
}

fn region_for(level: Assertiveness) -> Option<web_sys::Element> {
    let (id, live, role) = match level {
        Assertiveness::Polite => (POLITE_ID, "polite", "status"),
        Assertiveness::Assertive => (ASSERTIVE_ID, "assertive", "alert"),
    };
    let document = web_sys::window()?.document()?;
    if let Some(existing) = document.get_element_by_id(id) {
        return Some(existing);
    }
    let region = document.create_element("div").ok()?;
    region.set_id(id);
    region.set_attribute("aria-live", live).ok()?;
    region.set_attribute("aria-atomic", "true").ok()?;
    region.set_attribute("role", role).ok()?;
    region.set_attribute("style", OFFSCREEN_STYLE).ok()?;
    document.body()?.append_child(&region).ok()?;
    Some(region)
}
