//! The uploader's outbound event vocabulary.
//!
//! Every meaningful state change produces an [`UploaderEvent`]. The
//! host layer dispatches them in the order they are returned, wrapping
//! each payload in an envelope that adds the ISO-8601 `timestamp`.
//!
//! The vocabulary is append-only: renaming or removing an event or a
//! documented payload field is a breaking change.

use serde::Serialize;

use crate::intake::AdaptationReason;
use crate::mode::Mode;
use crate::validate::FileLike;

/// What initiated a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeChangeTrigger {
    /// API call.
    Programmatic,
    /// Pointer activation of the toggle.
    Click,
    /// Keyboard activation of the toggle.
    Keyboard,
}

/// Serializable précis of a file handle, carried in event payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type when known.
    pub mime_type: Option<String>,
}

impl FileSummary {
    /// Summarize a handle.
    #[must_use]
    pub fn of<F: FileLike>(file: &F) -> Self {
        Self {
            name: file.name().to_owned(),
            size: file.size(),
            mime_type: file.mime_type().map(str::to_owned),
        }
    }

    /// Summarize a slice of handles.
    #[must_use]
    pub fn list<F: FileLike>(files: &[F]) -> Vec<Self> {
        files.iter().map(Self::of).collect()
    }
}

/// Events emitted by the uploader.
///
/// Serialization produces the documented payload (camelCase fields,
/// without the envelope timestamp); [`UploaderEvent::name`] gives the
/// wire name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum UploaderEvent {
    /// Successful construction.
    Initialized {
        mode: Mode,
        legacy_multiple: bool,
        default_mode: Option<Mode>,
        remember_preference: bool,
    },
    /// Construction failed; the fallback view is active.
    InitializationError { error: String, fallback_mode: Mode },
    /// A mode switch succeeded.
    ModeChanged {
        old_mode: Mode,
        new_mode: Mode,
        files_affected: usize,
        triggered_by: ModeChangeTrigger,
    },
    /// A mode change was rejected.
    ModeChangeError {
        error: String,
        kind: &'static str,
        requested_mode: Option<String>,
        current_mode: Mode,
    },
    /// Initial-mode resolution completed.
    ModeInitialized {
        initial_mode: Mode,
        based_on_multiple_attribute: bool,
        based_on_default_mode: bool,
        session_preference_used: bool,
    },
    /// The file list changed because of the mode.
    FilesAdapted {
        original_files: usize,
        adapted_files: usize,
        mode: Mode,
        reason: AdaptationReason,
    },
    /// Accepted files were added.
    FilesSelected {
        files: Vec<FileSummary>,
        new_files: Vec<FileSummary>,
        mode: Mode,
        replaced: bool,
    },
    /// Any non-intake file list mutation.
    FilesChanged { files: Vec<FileSummary> },
    /// A drag became active over the upload area.
    DragEnter { files: usize },
    /// The drag left the upload area.
    DragLeave { files: usize },
    /// The drag is hovering the upload area.
    DragOver { files: usize },
    /// Files were dropped.
    Drop { files: usize },
    /// The validation pipeline started.
    ProcessingStart { files: usize },
    /// The validation pipeline finished.
    ProcessingComplete { files: usize },
    /// The pipeline failed unexpectedly, or an intake was rejected at
    /// entry.
    ProcessingError { error: String },
    /// One or more files failed validation.
    ValidationError {
        errors: Vec<String>,
        files: Vec<String>,
    },
    /// Validation produced non-blocking observations.
    ValidationWarning {
        warnings: Vec<String>,
        files: Vec<String>,
    },
    /// Aggregate success summary; not emitted when every file was
    /// rejected.
    FilesProcessed {
        valid_files: usize,
        total_files: usize,
        adapted_files: usize,
        errors: usize,
        warnings: usize,
    },
    /// Programmatic reset.
    Reset,
    /// A configuration attribute held a bad value.
    AttributeValidationError {
        attribute: String,
        value: String,
        error: String,
    },
    /// A runtime attribute change could not be applied.
    AttributeChangeError { attribute: String, error: String },
}

impl UploaderEvent {
    /// Wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => "initialized",
            Self::InitializationError { .. } => "initialization-error",
            Self::ModeChanged { .. } => "mode-changed",
            Self::ModeChangeError { .. } => "mode-change-error",
            Self::ModeInitialized { .. } => "mode-initialized",
            Self::FilesAdapted { .. } => "files-adapted",
            Self::FilesSelected { .. } => "files-selected",
            Self::FilesChanged { .. } => "files-changed",
            Self::DragEnter { .. } => "drag-enter",
            Self::DragLeave { .. } => "drag-leave",
            Self::DragOver { .. } => "drag-over",
            Self::Drop { .. } => "drop",
            Self::ProcessingStart { .. } => "processing-start",
            Self::ProcessingComplete { .. } => "processing-complete",
            Self::ProcessingError { .. } => "processing-error",
            Self::ValidationError { .. } => "validation-error",
            Self::ValidationWarning { .. } => "validation-warning",
            Self::FilesProcessed { .. } => "files-processed",
            Self::Reset => "reset",
            Self::AttributeValidationError { .. } => "attribute-validation-error",
            Self::AttributeChangeError { .. } => "attribute-change-error",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn payload_fields_are_camel_case() {
        let event = UploaderEvent::ModeChanged {
            old_mode: Mode::Single,
            new_mode: Mode::Batch,
            files_affected: 2,
            triggered_by: ModeChangeTrigger::Keyboard,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["oldMode"], "single");
        assert_eq!(json["newMode"], "batch");
        assert_eq!(json["filesAffected"], 2);
        assert_eq!(json["triggeredBy"], "keyboard");
    }

    #[test]
    fn adaptation_reason_uses_kebab_wire_names() {
        let event = UploaderEvent::FilesAdapted {
            original_files: 3,
            adapted_files: 1,
            mode: Mode::Single,
            reason: AdaptationReason::ModeSwitch,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["reason"], "mode-switch");
        assert_eq!(json["originalFiles"], 3);
        assert_eq!(json["adaptedFiles"], 1);
    }

    #[test]
    fn reset_serializes_to_null_payload() {
        let json = serde_json::to_value(UploaderEvent::Reset).unwrap();
        assert!(json.is_null());
    }

    #[test]
    fn names_cover_the_documented_vocabulary() {
        let named = [
            UploaderEvent::Reset.name(),
            UploaderEvent::DragEnter { files: 0 }.name(),
            UploaderEvent::ProcessingStart { files: 1 }.name(),
        ];
        assert_eq!(named, ["reset", "drag-enter", "processing-start"]);
    }

    #[test]
    fn mode_change_error_carries_the_stable_kind() {
        let event = UploaderEvent::ModeChangeError {
            error: "mode change blocked: the mode toggle is disabled".to_owned(),
            kind: "mode_change_blocked",
            requested_mode: Some("batch".to_owned()),
            current_mode: Mode::Single,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "mode_change_blocked");
        assert_eq!(json["requestedMode"], "batch");
        assert_eq!(json["currentMode"], "single");
    }
}
