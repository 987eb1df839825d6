//! pdfsmaller-uploader: Pure uploader core (sans-IO).
//!
//! The dual-mode file uploader's state machine, configuration parsing,
//! intake and validation pipeline, preference records, event
//! vocabulary, and announcement text.
//!
//! This crate has **no browser dependencies** -- it operates on plain
//! data and trait objects and returns events for the host to dispatch.
//! All DOM, timer, and storage interaction lives in `pdfsmaller-ui`.

pub mod announce;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod intake;
pub mod mode;
pub mod prefs;
pub mod state;
pub mod validate;

pub use config::{AcceptFilter, AttributeIssue, UploaderAttributes, UploaderConfig};
pub use controller::{
    IntakeCompletion, IntakeStart, ModeChangeOutcome, TRANSITION_WINDOW_MS, UploaderCore,
};
pub use error::{BlockedReason, UploaderError};
pub use events::{FileSummary, ModeChangeTrigger, UploaderEvent};
pub use intake::{Adaptation, AdaptationReason, IntakeOutcome, IntakeSource, PrefixRead};
pub use mode::{Mode, ModeConfig, ModeResolution, ResolveIssue};
pub use prefs::{MemoryBackend, PreferenceBackend, PreferenceRecord, PreferenceStore, ResolveOptions};
pub use state::UploaderState;
pub use validate::{FileLike, FileValidation};
