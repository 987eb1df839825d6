//! Uploader mode identifiers and initial-mode resolution.
//!
//! [`Mode`] is the binary capability switch the rest of the uploader
//! consults: `single` admits at most one file, `batch` admits many.
//! [`resolve_initial`] implements the deterministic decision tree that
//! picks the starting mode from the legacy multiple flag, the explicit
//! default, and the session preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Capability switch of the uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// At most one file at a time; new selections replace the current file.
    Single,
    /// Unbounded file count; new selections append.
    Batch,
}

/// Presentation and capability record for one mode.
///
/// Read-only; used for labels, announcements, and the `multiple`
/// attribute of the underlying file control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    /// Whether the file dialog allows multi-select.
    pub multiple: bool,
    /// Maximum number of files held at once; `None` means unbounded.
    pub max_files: Option<usize>,
    /// Full display label for the mode.
    pub label: &'static str,
    /// Instruction line shown in the idle upload area.
    pub instructions: &'static str,
    /// Accessible name for the upload area.
    pub aria_label: &'static str,
    /// Message shown while a drag is hovering the area.
    pub drag_message: &'static str,
    /// Message shown while validation is running.
    pub processing_message: &'static str,
    /// Message shown when no files are held.
    pub empty_message: &'static str,
    /// One-line description used in announcements.
    pub description: &'static str,
}

const SINGLE_CONFIG: ModeConfig = ModeConfig {
    multiple: false,
    max_files: Some(1),
    label: "Single file",
    instructions: "Drop a PDF here or choose a file",
    aria_label: "Upload a PDF file",
    drag_message: "Release to upload the file",
    processing_message: "Checking file...",
    empty_message: "No file selected",
    description: "One file at a time; a new selection replaces the current file.",
};

const BATCH_CONFIG: ModeConfig = ModeConfig {
    multiple: true,
    max_files: None,
    label: "Multiple files",
    instructions: "Drop PDFs here or choose files",
    aria_label: "Upload PDF files",
    drag_message: "Release to add the files",
    processing_message: "Checking files...",
    empty_message: "No files selected",
    description: "Several files at once; new selections are added to the list.",
};

impl Mode {
    /// Both modes, for iteration.
    pub const ALL: [Self; 2] = [Self::Single, Self::Batch];

    /// Wire name of the mode (`"single"` / `"batch"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Single => Self::Batch,
            Self::Batch => Self::Single,
        }
    }

    /// Presentation and capability record for this mode.
    #[must_use]
    pub const fn config(self) -> &'static ModeConfig {
        match self {
            Self::Single => &SINGLE_CONFIG,
            Self::Batch => &BATCH_CONFIG,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a valid mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mode {0:?}, expected \"single\" or \"batch\"")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "batch" => Ok(Self::Batch),
            other => Err(ParseModeError(other.to_owned())),
        }
    }
}

/// A non-fatal problem encountered while resolving the initial mode.
///
/// Issues never abort resolution; the caller logs them and reports the
/// corresponding event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveIssue {
    /// The `default-mode` input was present but not a valid mode name.
    InvalidDefaultMode(String),
}

/// Outcome of initial-mode resolution.
///
/// The `based_on_*` flags record which rule won and feed the
/// `mode-initialized` event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeResolution {
    /// The resolved starting mode.
    pub mode: Mode,
    /// The legacy multiple flag decided the mode.
    pub based_on_multiple_attribute: bool,
    /// The explicit default decided the mode.
    pub based_on_default_mode: bool,
    /// A stored session preference decided the mode.
    pub session_preference_used: bool,
    /// Non-fatal problems found along the way.
    pub issues: Vec<ResolveIssue>,
}

/// Resolve the initial mode.
///
/// Rules are applied in priority order, lowest first; the last rule
/// that yields a valid mode wins:
///
/// 1. `legacy_multiple` proposes `batch`.
/// 2. A valid `default_mode` overrides rule 1.
/// 3. A stored session preference (when `remember_preference` is on)
///    overrides rules 1-2.
/// 4. Otherwise `single`.
///
/// An invalid `default_mode` is recorded as a [`ResolveIssue`] and does
/// not override prior candidates. The stored preference arrives already
/// parsed (the preference store clears corrupt entries on read), so no
/// invalid value can reach rule 3.
#[must_use]
pub fn resolve_initial(
    legacy_multiple: bool,
    default_mode: Option<&str>,
    stored_preference: Option<Mode>,
    remember_preference: bool,
) -> ModeResolution {
    let mut issues = Vec::new();

    let mut mode = Mode::Single;
    let mut based_on_multiple_attribute = false;
    let mut based_on_default_mode = false;
    let mut session_preference_used = false;

    if legacy_multiple {
        mode = Mode::Batch;
        based_on_multiple_attribute = true;
    }

    if let Some(value) = default_mode {
        match value.parse::<Mode>() {
            Ok(parsed) => {
                mode = parsed;
                based_on_multiple_attribute = false;
                based_on_default_mode = true;
            }
            Err(_) => issues.push(ResolveIssue::InvalidDefaultMode(value.to_owned())),
        }
    }

    if remember_preference {
        if let Some(preferred) = stored_preference {
            mode = preferred;
            based_on_multiple_attribute = false;
            based_on_default_mode = false;
            session_preference_used = true;
        }
    }

    ModeResolution {
        mode,
        based_on_multiple_attribute,
        based_on_default_mode,
        session_preference_used,
        issues,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_both_modes() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn parse_rejects_unknown_values() {
        for bad in ["", "Single", "BATCH", "multi", "dual"] {
            assert!(bad.parse::<Mode>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn toggled_flips_between_the_two_modes() {
        assert_eq!(Mode::Single.toggled(), Mode::Batch);
        assert_eq!(Mode::Batch.toggled(), Mode::Single);
    }

    #[test]
    fn config_max_files_matches_multiple_flag() {
        assert_eq!(Mode::Single.config().max_files, Some(1));
        assert!(!Mode::Single.config().multiple);
        assert_eq!(Mode::Batch.config().max_files, None);
        assert!(Mode::Batch.config().multiple);
    }

    #[test]
    fn serde_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&Mode::Batch).unwrap();
        assert_eq!(json, "\"batch\"");
        let back: Mode = serde_json::from_str("\"single\"").unwrap();
        assert_eq!(back, Mode::Single);
    }

    #[test]
    fn resolution_defaults_to_single() {
        let r = resolve_initial(false, None, None, false);
        assert_eq!(r.mode, Mode::Single);
        assert!(!r.based_on_multiple_attribute);
        assert!(!r.based_on_default_mode);
        assert!(!r.session_preference_used);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn legacy_multiple_proposes_batch() {
        let r = resolve_initial(true, None, None, false);
        assert_eq!(r.mode, Mode::Batch);
        assert!(r.based_on_multiple_attribute);
    }

    #[test]
    fn default_mode_overrides_legacy_multiple() {
        let r = resolve_initial(true, Some("single"), None, false);
        assert_eq!(r.mode, Mode::Single);
        assert!(r.based_on_default_mode);
        assert!(!r.based_on_multiple_attribute);
    }

    #[test]
    fn invalid_default_mode_keeps_prior_candidate() {
        let r = resolve_initial(true, Some("both"), None, false);
        assert_eq!(r.mode, Mode::Batch);
        assert!(r.based_on_multiple_attribute);
        assert_eq!(
            r.issues,
            vec![ResolveIssue::InvalidDefaultMode("both".to_owned())]
        );
    }

    #[test]
    fn session_preference_overrides_everything() {
        let r = resolve_initial(true, Some("batch"), Some(Mode::Single), true);
        assert_eq!(r.mode, Mode::Single);
        assert!(r.session_preference_used);
        assert!(!r.based_on_default_mode);
        assert!(!r.based_on_multiple_attribute);
    }

    #[test]
    fn session_preference_ignored_when_memory_disabled() {
        let r = resolve_initial(false, Some("batch"), Some(Mode::Single), false);
        assert_eq!(r.mode, Mode::Batch);
        assert!(!r.session_preference_used);
    }
}
