//! Human-readable status lines for the screen-reader live regions.
//!
//! All builders are pure text. The polite region carries mode-change
//! context (trigger source, file delta, truncation); the assertive
//! region carries toggle disabled/enabled transitions. The same lines
//! keep the switch state legible in high-contrast environments, where
//! visual styling of the toggle cannot be relied on.

use crate::events::ModeChangeTrigger;
use crate::mode::Mode;

/// How the trigger source reads in an announcement.
const fn trigger_phrase(trigger: ModeChangeTrigger) -> &'static str {
    match trigger {
        ModeChangeTrigger::Programmatic => "",
        ModeChangeTrigger::Click => " via click",
        ModeChangeTrigger::Keyboard => " via keyboard",
    }
}

/// Announcement for a completed mode change.
///
/// `kept` is the file count carried across the switch; `truncated_from`
/// is the pre-switch count when files were discarded.
#[must_use]
pub fn mode_changed(
    new_mode: Mode,
    trigger: ModeChangeTrigger,
    kept: usize,
    truncated_from: Option<usize>,
) -> String {
    let config = new_mode.config();
    let mut line = format!(
        "{} mode enabled{}. {}",
        config.label,
        trigger_phrase(trigger),
        config.description
    );
    if let Some(original) = truncated_from {
        line.push_str(&format!(" Keeping the first of {original} files."));
    } else if kept > 0 {
        let files = if kept == 1 { "file" } else { "files" };
        line.push_str(&format!(" {kept} {files} kept."));
    }
    line
}

/// Announcement for the Escape key: current mode plus usage hint.
#[must_use]
pub fn mode_status(mode: Mode) -> String {
    format!(
        "{} mode is active. Press Space or Enter to switch modes.",
        mode.config().label
    )
}

/// Announcement for the arrow keys: names the other mode without
/// switching to it.
#[must_use]
pub fn other_mode_hint(mode: Mode) -> String {
    format!(
        "{} mode available. Press Space or Enter to switch.",
        mode.toggled().config().label
    )
}

/// Assertive announcement when interaction hits a disabled toggle.
#[must_use]
pub const fn toggle_disabled_hint() -> &'static str {
    "Toggle is disabled"
}

/// Assertive announcement for toggle disabled/enabled transitions.
#[must_use]
pub const fn toggle_state_changed(disabled: bool) -> &'static str {
    if disabled {
        "Mode toggle disabled"
    } else {
        "Mode toggle enabled"
    }
}

/// Polite announcement after an intake completes.
#[must_use]
pub fn intake_summary(accepted: usize, rejected: usize) -> String {
    match (accepted, rejected) {
        (0, 0) => "No files were added.".to_owned(),
        (0, n) => format!("No files added. {n} rejected."),
        (a, 0) => {
            let files = if a == 1 { "file" } else { "files" };
            format!("{a} {files} added.")
        }
        (a, n) => {
            let files = if a == 1 { "file" } else { "files" };
            format!("{a} {files} added, {n} rejected.")
        }
    }
}
