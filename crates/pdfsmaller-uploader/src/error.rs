//! Error kinds of the uploader core.
//!
//! Validation rejections are data, not errors (see
//! [`crate::intake::IntakeOutcome`]); this enum covers the operational
//! failures that carry a stable snake_case kind on the wire.

use std::fmt;

/// Why a mode change was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedReason {
    /// The toggle control is disabled.
    ToggleDisabled,
    /// A transition window is already open.
    TransitionInProgress,
    /// The whole component is disabled.
    ComponentDisabled,
}

impl fmt::Display for BlockedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ToggleDisabled => "the mode toggle is disabled",
            Self::TransitionInProgress => "a mode transition is already in progress",
            Self::ComponentDisabled => "the uploader is disabled",
        })
    }
}

/// Operational failures of the uploader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploaderError {
    /// A mode value outside the enumeration was requested.
    #[error("invalid mode {value:?}, expected \"single\" or \"batch\"")]
    InvalidMode {
        /// The rejected value.
        value: String,
    },

    /// A mode change arrived while changes are not allowed.
    #[error("mode change blocked: {reason}")]
    ModeChangeBlocked {
        /// Why the change was blocked.
        reason: BlockedReason,
    },

    /// The `default-mode` attribute held a non-enum value.
    #[error("invalid default mode {value:?}")]
    InvalidDefaultMode {
        /// The rejected value.
        value: String,
    },

    /// The resolver produced a non-enum value (legacy stored data).
    #[error("invalid resolved mode {value:?}")]
    InvalidResolvedMode {
        /// The rejected value.
        value: String,
    },

    /// The preference store failed or was unavailable.
    #[error("session preference error: {message}")]
    SessionPreference {
        /// What went wrong.
        message: String,
    },

    /// A runtime attribute held a bad value.
    #[error("invalid value {value:?} for attribute {attribute:?}")]
    AttributeValidation {
        /// Attribute name.
        attribute: String,
        /// The rejected value.
        value: String,
    },

    /// A runtime attribute change could not be applied.
    #[error("failed to apply attribute {attribute:?}: {message}")]
    AttributeChange {
        /// Attribute name.
        attribute: String,
        /// What went wrong.
        message: String,
    },

    /// One or more files failed per-file validation.
    #[error("{count} file(s) failed validation")]
    ValidationRejection {
        /// Number of rejected files.
        count: usize,
    },

    /// Unexpected failure inside the intake pipeline.
    #[error("processing error: {message}")]
    Processing {
        /// What went wrong.
        message: String,
    },

    /// Construction failed; the uploader degrades to the fallback view.
    #[error("initialization error: {message}")]
    Initialization {
        /// What went wrong.
        message: String,
    },

    /// Construction failed hard; mode is forced to `single` and the
    /// toggle is hidden.
    #[error("critical initialization error: {message}")]
    CriticalInitialization {
        /// What went wrong.
        message: String,
    },
}

impl UploaderError {
    /// Stable snake_case kind carried in event payloads.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidMode { .. } => "invalid_mode",
            Self::ModeChangeBlocked { .. } => "mode_change_blocked",
            Self::InvalidDefaultMode { .. } => "invalid_default_mode",
            Self::InvalidResolvedMode { .. } => "invalid_resolved_mode",
            Self::SessionPreference { .. } => "session_preference_error",
            Self::AttributeValidation { .. } => "attribute_validation_error",
            Self::AttributeChange { .. } => "attribute_change_error",
            Self::ValidationRejection { .. } => "validation_rejection",
            Self::Processing { .. } => "processing_error",
            Self::Initialization { .. } => "initialization_error",
            Self::CriticalInitialization { .. } => "critical_initialization_error",
        }
    }
}
