//! The uploader core: mode state machine, file list, and event
//! production.
//!
//! [`UploaderCore`] owns the [`UploaderState`] and the file list, and
//! serializes every mutation. Mutating methods return the events the
//! host must dispatch, in emission order; the core never calls outward.
//! It is generic over the file handle type so the browser layer can
//! plug in its own handles and tests can use plain structs.

use crate::config::UploaderConfig;
use crate::error::{BlockedReason, UploaderError};
use crate::events::{FileSummary, ModeChangeTrigger, UploaderEvent};
use crate::intake::{Adaptation, AdaptationReason, IntakeOutcome};
use crate::mode::{Mode, ModeResolution};
use crate::state::UploaderState;
use crate::validate::{self, FileLike, FileValidation};

/// Length of the mode-transition lockout window, in milliseconds.
///
/// Collapses to zero under reduced motion.
pub const TRANSITION_WINDOW_MS: u32 = 500;

/// Result of a mode-change request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeChangeOutcome {
    /// The request was valid (including the same-mode no-op).
    pub accepted: bool,
    /// The mode actually flipped.
    pub changed: bool,
    /// Pre-switch file count when the switch discarded files.
    pub truncated_from: Option<usize>,
    /// Events to dispatch, in order.
    pub events: Vec<UploaderEvent>,
}

impl ModeChangeOutcome {
    fn rejected(event: UploaderEvent) -> Self {
        Self {
            accepted: false,
            changed: false,
            truncated_from: None,
            events: vec![event],
        }
    }

    const fn noop() -> Self {
        Self {
            accepted: true,
            changed: false,
            truncated_from: None,
            events: Vec::new(),
        }
    }
}

/// Result of an intake admission check.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeStart {
    /// The pipeline may run; dispatch these events first.
    Started {
        /// Events to dispatch, in order.
        events: Vec<UploaderEvent>,
    },
    /// The intake was rejected at entry.
    Rejected {
        /// Why it was rejected.
        error: UploaderError,
        /// Events to dispatch, in order (empty when the component is
        /// disabled and the gesture is simply inert).
        events: Vec<UploaderEvent>,
    },
}

/// Result of folding a finished pipeline run into the state.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeCompletion {
    /// Events to dispatch, in order.
    pub events: Vec<UploaderEvent>,
    /// Files accepted by this intake.
    pub accepted: usize,
    /// Files rejected by this intake.
    pub rejected: usize,
    /// The inline error string now showing, if any.
    pub error: Option<String>,
}

/// The uploader core. See the module docs.
#[derive(Debug)]
pub struct UploaderCore<F> {
    config: UploaderConfig,
    resolution: ModeResolution,
    state: UploaderState,
    reduced_motion: bool,
    toggle_attr_disabled: bool,
    files: Vec<F>,
}

impl<F: FileLike> UploaderCore<F> {
    /// Build a core from parsed configuration and a completed
    /// initial-mode resolution.
    ///
    /// The returned events report resolver issues, then
    /// `mode-initialized`, then `initialized`.
    #[must_use]
    pub fn new(
        config: UploaderConfig,
        resolution: ModeResolution,
        reduced_motion: bool,
    ) -> (Self, Vec<UploaderEvent>) {
        let mut events = Vec::new();
        for issue in &resolution.issues {
            let crate::mode::ResolveIssue::InvalidDefaultMode(value) = issue;
            events.push(UploaderEvent::AttributeValidationError {
                attribute: "default-mode".to_owned(),
                value: value.clone(),
                error: format!("invalid default-mode {value:?}, expected \"single\" or \"batch\""),
            });
        }
        events.push(UploaderEvent::ModeInitialized {
            initial_mode: resolution.mode,
            based_on_multiple_attribute: resolution.based_on_multiple_attribute,
            based_on_default_mode: resolution.based_on_default_mode,
            session_preference_used: resolution.session_preference_used,
        });
        events.push(UploaderEvent::Initialized {
            mode: resolution.mode,
            legacy_multiple: config.legacy_multiple,
            default_mode: config.default_mode,
            remember_preference: config.remember_preference,
        });

        let state = UploaderState::new(
            resolution.mode,
            config.component_disabled,
            config.toggle_disabled,
        );
        let toggle_attr_disabled = config.toggle_disabled;
        (
            Self {
                config,
                resolution,
                state,
                reduced_motion,
                toggle_attr_disabled,
                files: Vec::new(),
            },
            events,
        )
    }

    /// Build a degraded core after a construction failure.
    ///
    /// The critical variant forces `single` mode; both variants mark
    /// the state so the host renders the minimal fallback view.
    #[must_use]
    pub fn with_initialization_error(
        config: UploaderConfig,
        resolution: ModeResolution,
        error: &UploaderError,
    ) -> (Self, Vec<UploaderEvent>) {
        let critical = matches!(error, UploaderError::CriticalInitialization { .. });
        let fallback_mode = if critical { Mode::Single } else { resolution.mode };
        let events = vec![UploaderEvent::InitializationError {
            error: error.to_string(),
            fallback_mode,
        }];
        let mut state = UploaderState::new(fallback_mode, config.component_disabled, true);
        state.initialization_error = true;
        let resolution = ModeResolution {
            mode: fallback_mode,
            ..resolution
        };
        (
            Self {
                config,
                resolution,
                state,
                reduced_motion: true,
                toggle_attr_disabled: true,
                files: Vec::new(),
            },
            events,
        )
    }

    // --- Mode controller -------------------------------------------------

    /// The active mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.state.current_mode
    }

    /// The completed initial-mode resolution.
    #[must_use]
    pub const fn resolution(&self) -> &ModeResolution {
        &self.resolution
    }

    /// Whether the toggle control currently rejects interaction.
    #[must_use]
    pub const fn is_toggle_disabled(&self) -> bool {
        self.state.toggle_disabled
    }

    /// Request a mode change.
    pub fn set_mode(&mut self, mode: Mode, trigger: ModeChangeTrigger) -> ModeChangeOutcome {
        if let Some(reason) = self.blocked_reason() {
            let error = UploaderError::ModeChangeBlocked { reason };
            return ModeChangeOutcome::rejected(UploaderEvent::ModeChangeError {
                error: error.to_string(),
                kind: error.kind(),
                requested_mode: Some(mode.as_str().to_owned()),
                current_mode: self.state.current_mode,
            });
        }
        if mode == self.state.current_mode {
            return ModeChangeOutcome::noop();
        }

        let old_mode = self.state.current_mode;
        if !self.reduced_motion {
            self.state.mode_transitioning = true;
        }

        // Switching to single keeps the first file; batch keeps all.
        let truncated_from = (mode == Mode::Single && self.files.len() > 1).then(|| {
            let original = self.files.len();
            self.files.truncate(1);
            original
        });

        self.state.current_mode = mode;

        let mut events = vec![UploaderEvent::ModeChanged {
            old_mode,
            new_mode: mode,
            files_affected: self.files.len(),
            triggered_by: trigger,
        }];
        if let Some(original) = truncated_from {
            events.push(UploaderEvent::FilesAdapted {
                original_files: original,
                adapted_files: self.files.len(),
                mode,
                reason: AdaptationReason::ModeSwitch,
            });
        }

        ModeChangeOutcome {
            accepted: true,
            changed: true,
            truncated_from,
            events,
        }
    }

    /// Request a mode change from an untrusted string.
    pub fn set_mode_value(&mut self, value: &str, trigger: ModeChangeTrigger) -> ModeChangeOutcome {
        match value.parse::<Mode>() {
            Ok(mode) => self.set_mode(mode, trigger),
            Err(_) => {
                let error = UploaderError::InvalidMode {
                    value: value.to_owned(),
                };
                ModeChangeOutcome::rejected(UploaderEvent::ModeChangeError {
                    error: error.to_string(),
                    kind: error.kind(),
                    requested_mode: Some(value.to_owned()),
                    current_mode: self.state.current_mode,
                })
            }
        }
    }

    /// Switch to the other mode.
    pub fn toggle_mode(&mut self, trigger: ModeChangeTrigger) -> ModeChangeOutcome {
        let target = self.state.current_mode.toggled();
        self.set_mode(target, trigger)
    }

    /// Close the transition window.
    pub const fn end_transition(&mut self) {
        self.state.mode_transitioning = false;
    }

    /// Whether a transition window is open.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        self.state.mode_transitioning
    }

    /// Transition window length for this environment, in milliseconds.
    #[must_use]
    pub const fn transition_window_ms(&self) -> u32 {
        if self.reduced_motion {
            0
        } else {
            TRANSITION_WINDOW_MS
        }
    }

    const fn blocked_reason(&self) -> Option<BlockedReason> {
        if self.state.component_disabled {
            Some(BlockedReason::ComponentDisabled)
        } else if self.state.toggle_disabled {
            Some(BlockedReason::ToggleDisabled)
        } else if self.state.mode_transitioning {
            Some(BlockedReason::TransitionInProgress)
        } else {
            None
        }
    }

    // --- Disabled flags --------------------------------------------------

    /// Enable or disable the whole component. Disabling also disables
    /// the toggle; re-enabling restores the configured toggle flag.
    /// Returns `true` when the effective toggle-disabled state changed.
    pub const fn set_disabled(&mut self, disabled: bool) -> bool {
        self.state.component_disabled = disabled;
        let effective = self.toggle_attr_disabled || disabled;
        let changed = self.state.toggle_disabled != effective;
        self.state.toggle_disabled = effective;
        changed
    }

    /// Whether the whole component is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.state.component_disabled
    }

    /// Update the toggle-only disabled flag. Returns `true` when the
    /// effective toggle-disabled state changed.
    pub const fn set_toggle_disabled(&mut self, disabled: bool) -> bool {
        self.toggle_attr_disabled = disabled;
        let effective = disabled || self.state.component_disabled;
        let changed = self.state.toggle_disabled != effective;
        self.state.toggle_disabled = effective;
        changed
    }

    // --- Drag lifecycle --------------------------------------------------

    /// Register a `dragenter`; emits `drag-enter` on the outermost
    /// transition only.
    pub fn drag_enter(&mut self, files: usize) -> Vec<UploaderEvent> {
        if self.state.component_disabled {
            return Vec::new();
        }
        if self.state.drag_enter() {
            vec![UploaderEvent::DragEnter { files }]
        } else {
            Vec::new()
        }
    }

    /// Register a `dragover`.
    #[must_use]
    pub fn drag_over(&self, files: usize) -> Vec<UploaderEvent> {
        if self.state.component_disabled || !self.state.is_drag_over {
            return Vec::new();
        }
        vec![UploaderEvent::DragOver { files }]
    }

    /// Register a `dragleave`; emits `drag-leave` when the drag leaves
    /// the outermost element.
    pub fn drag_leave(&mut self) -> Vec<UploaderEvent> {
        if self.state.component_disabled {
            return Vec::new();
        }
        if self.state.drag_leave() {
            vec![UploaderEvent::DragLeave { files: 0 }]
        } else {
            Vec::new()
        }
    }

    /// Register a drop; clears the drag lifecycle.
    pub fn drop_received(&mut self, files: usize) -> Vec<UploaderEvent> {
        self.state.drag_clear();
        if self.state.component_disabled {
            return Vec::new();
        }
        vec![UploaderEvent::Drop { files }]
    }

    /// Whether a drag is hovering the upload area.
    #[must_use]
    pub const fn is_drag_over(&self) -> bool {
        self.state.is_drag_over
    }

    // --- Intake ----------------------------------------------------------

    /// Admission check for a new intake. Overlapping intakes are
    /// rejected at entry with a visible error.
    pub fn begin_intake(&mut self, incoming: usize) -> IntakeStart {
        if self.state.component_disabled {
            return IntakeStart::Rejected {
                error: UploaderError::Processing {
                    message: "the uploader is disabled".to_owned(),
                },
                events: Vec::new(),
            };
        }
        if self.state.is_processing {
            let message = "Files are still being processed. Please wait and try again.".to_owned();
            self.state.error = Some(message.clone());
            return IntakeStart::Rejected {
                error: UploaderError::Processing {
                    message: message.clone(),
                },
                events: vec![UploaderEvent::ProcessingError { error: message }],
            };
        }
        self.state.is_processing = true;
        self.state.error = None;
        IntakeStart::Started {
            events: vec![UploaderEvent::ProcessingStart { files: incoming }],
        }
    }

    /// Fold a finished pipeline run into the state.
    ///
    /// Emits, in order: `files-adapted` (when the intake was adapted),
    /// `validation-error`, `validation-warning`, `files-selected`,
    /// `files-processed` (only when something was accepted), and
    /// `processing-complete`.
    pub fn complete_intake(
        &mut self,
        outcome: IntakeOutcome<F>,
        adaptation: Option<Adaptation>,
    ) -> IntakeCompletion {
        let mut events = Vec::new();
        let mode = self.state.current_mode;
        let validated = outcome.total();
        let original_total = adaptation.map_or(validated, |a| a.original);

        // The adaptation warning feeds the aggregate tally but has its
        // own event; only per-file warnings go out as validation-warning.
        let file_warnings = outcome.warnings.clone();
        let mut warning_total = file_warnings.len();
        if let Some(adaptation) = adaptation {
            warning_total += 1;
            events.push(UploaderEvent::FilesAdapted {
                original_files: adaptation.original,
                adapted_files: adaptation.retained,
                mode,
                reason: adaptation.reason,
            });
        }

        let rejection_lines = outcome.rejection_lines();
        if !rejection_lines.is_empty() {
            events.push(UploaderEvent::ValidationError {
                errors: rejection_lines,
                files: outcome
                    .rejected
                    .iter()
                    .map(|r| r.file.name().to_owned())
                    .collect(),
            });
        }
        if !file_warnings.is_empty() {
            events.push(UploaderEvent::ValidationWarning {
                warnings: file_warnings,
                files: outcome
                    .accepted
                    .iter()
                    .map(|f| f.name().to_owned())
                    .chain(outcome.rejected.iter().map(|r| r.file.name().to_owned()))
                    .collect(),
            });
        }

        let accepted_count = outcome.accepted.len();
        let rejected_count = outcome.rejected.len();
        let error = outcome.consolidated_error();

        if accepted_count > 0 {
            let new_summaries = FileSummary::list(&outcome.accepted);
            let replaced = mode == Mode::Single && !self.files.is_empty();
            match mode {
                Mode::Single => self.files = outcome.accepted,
                Mode::Batch => self.files.extend(outcome.accepted),
            }
            events.push(UploaderEvent::FilesSelected {
                files: FileSummary::list(&self.files),
                new_files: new_summaries,
                mode,
                replaced,
            });
            events.push(UploaderEvent::FilesProcessed {
                valid_files: accepted_count,
                total_files: original_total,
                adapted_files: validated,
                errors: rejected_count,
                warnings: warning_total,
            });
        }

        self.state.error.clone_from(&error);
        self.state.is_processing = false;
        events.push(UploaderEvent::ProcessingComplete {
            files: self.files.len(),
        });

        IntakeCompletion {
            events,
            accepted: accepted_count,
            rejected: rejected_count,
            error,
        }
    }

    /// Abort a running intake after an unexpected failure.
    pub fn fail_intake(&mut self, message: String) -> Vec<UploaderEvent> {
        self.state.error = Some(message.clone());
        self.state.is_processing = false;
        vec![
            UploaderEvent::ProcessingError { error: message },
            UploaderEvent::ProcessingComplete {
                files: self.files.len(),
            },
        ]
    }

    /// Whether the validation pipeline is running.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.state.is_processing
    }

    // --- File list -------------------------------------------------------

    /// The files currently held, in order.
    #[must_use]
    pub fn files(&self) -> &[F] {
        &self.files
    }

    /// Number of files held.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Whether any files are held.
    #[must_use]
    pub const fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Sum of the held files' sizes, in bytes.
    #[must_use]
    pub fn total_file_size(&self) -> u64 {
        self.files.iter().map(FileLike::size).sum()
    }

    /// Replace the file list programmatically, honoring the mode cap.
    pub fn set_files(&mut self, mut files: Vec<F>) -> Vec<UploaderEvent> {
        if self.state.current_mode == Mode::Single {
            files.truncate(1);
        }
        self.files = files;
        vec![UploaderEvent::FilesChanged {
            files: FileSummary::list(&self.files),
        }]
    }

    /// Add files programmatically: batch appends, single replaces with
    /// the first of the incoming list.
    pub fn add_files(&mut self, mut files: Vec<F>) -> Vec<UploaderEvent> {
        match self.state.current_mode {
            Mode::Single => {
                files.truncate(1);
                if !files.is_empty() {
                    self.files = files;
                }
            }
            Mode::Batch => self.files.extend(files),
        }
        vec![UploaderEvent::FilesChanged {
            files: FileSummary::list(&self.files),
        }]
    }

    /// Remove the file at `index`. Returns `None` when out of bounds.
    pub fn remove_file(&mut self, index: usize) -> Option<Vec<UploaderEvent>> {
        if index >= self.files.len() {
            return None;
        }
        self.files.remove(index);
        Some(vec![UploaderEvent::FilesChanged {
            files: FileSummary::list(&self.files),
        }])
    }

    /// Drop every held file.
    pub fn clear_files(&mut self) -> Vec<UploaderEvent> {
        self.files.clear();
        vec![UploaderEvent::FilesChanged { files: Vec::new() }]
    }

    /// Run the synchronous checks over arbitrary files without touching
    /// state. The asynchronous PDF signature check is not included.
    #[must_use]
    pub fn validate_files(&self, files: &[F]) -> Vec<FileValidation> {
        files
            .iter()
            .map(|f| validate::validate_file(f, &self.config))
            .collect()
    }

    // --- Errors and reset ------------------------------------------------

    /// The inline error string, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Whether an inline error is showing.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.state.error.is_some()
    }

    /// Set the inline error string.
    pub fn set_error(&mut self, message: String) {
        self.state.error = Some(message);
    }

    /// Clear the inline error string.
    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    /// Return to the idle state: no files, no error, no drag, no
    /// processing. The mode is kept. Idempotent; every call emits
    /// `reset`.
    pub fn reset(&mut self) -> Vec<UploaderEvent> {
        self.files.clear();
        self.state.error = None;
        self.state.is_processing = false;
        self.state.mode_transitioning = false;
        self.state.drag_clear();
        vec![UploaderEvent::Reset]
    }

    // --- Introspection ---------------------------------------------------

    /// The immutable configuration.
    #[must_use]
    pub const fn config(&self) -> &UploaderConfig {
        &self.config
    }

    /// The runtime state (read-only).
    #[must_use]
    pub const fn state(&self) -> &UploaderState {
        &self.state
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{UploaderAttributes, UploaderConfig};
    use crate::intake::{IntakeSource, PrefixRead, adapt_intake, run_intake};
    use crate::mode::resolve_initial;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct TestFile {
        name: String,
        size: u64,
        mime: Option<String>,
    }

    impl TestFile {
        fn new(name: &str, size: u64) -> Self {
            Self {
                name: name.to_owned(),
                size,
                mime: None,
            }
        }
    }

    impl FileLike for TestFile {
        fn name(&self) -> &str {
            &self.name
        }
        fn size(&self) -> u64 {
            self.size
        }
        fn mime_type(&self) -> Option<&str> {
            self.mime.as_deref()
        }
    }

    fn core_with(attrs: &UploaderAttributes) -> UploaderCore<TestFile> {
        let (config, _) = UploaderConfig::from_attributes(attrs);
        let resolution = resolve_initial(
            config.legacy_multiple,
            attrs.default_mode.as_deref(),
            None,
            config.remember_preference,
        );
        UploaderCore::new(config, resolution, false).0
    }

    fn default_core() -> UploaderCore<TestFile> {
        core_with(&UploaderAttributes::default())
    }

    fn batch_core() -> UploaderCore<TestFile> {
        core_with(&UploaderAttributes {
            default_mode: Some("batch".to_owned()),
            ..UploaderAttributes::default()
        })
    }

    fn event_names(events: &[UploaderEvent]) -> Vec<&'static str> {
        events.iter().map(UploaderEvent::name).collect()
    }

    fn ingest(core: &mut UploaderCore<TestFile>, files: Vec<TestFile>, source: IntakeSource) -> IntakeCompletion {
        let started = core.begin_intake(files.len());
        assert!(matches!(started, IntakeStart::Started { .. }));
        let (adapted, adaptation) = adapt_intake(files, core.mode(), source);
        let prefixes: Vec<Option<PrefixRead>> = adapted
            .iter()
            .map(|_| Some(PrefixRead::Bytes(b"%PDF-1.7".to_vec())))
            .collect();
        let outcome = run_intake(adapted, core.config(), &prefixes);
        core.complete_intake(outcome, adaptation)
    }

    #[test]
    fn construction_emits_mode_initialized_then_initialized() {
        let (core, events) = {
            let (config, _) = UploaderConfig::from_attributes(&UploaderAttributes::default());
            let resolution = resolve_initial(false, None, None, false);
            UploaderCore::<TestFile>::new(config, resolution, false)
        };
        assert_eq!(event_names(&events), ["mode-initialized", "initialized"]);
        assert_eq!(core.mode(), Mode::Single);
    }

    #[test]
    fn invalid_default_mode_reports_attribute_validation_error() {
        let (config, _) = UploaderConfig::from_attributes(&UploaderAttributes::default());
        let resolution = resolve_initial(false, Some("dual"), None, false);
        let (_, events) = UploaderCore::<TestFile>::new(config, resolution, false);
        assert_eq!(
            event_names(&events),
            ["attribute-validation-error", "mode-initialized", "initialized"]
        );
    }

    #[test]
    fn set_mode_to_same_mode_is_a_silent_success() {
        let mut core = default_core();
        let outcome = core.set_mode(Mode::Single, ModeChangeTrigger::Programmatic);
        assert!(outcome.accepted);
        assert!(!outcome.changed);
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn set_mode_flips_and_emits_mode_changed() {
        let mut core = default_core();
        let outcome = core.set_mode(Mode::Batch, ModeChangeTrigger::Click);
        assert!(outcome.accepted);
        assert!(outcome.changed);
        assert_eq!(core.mode(), Mode::Batch);
        assert_eq!(event_names(&outcome.events), ["mode-changed"]);
    }

    #[test]
    fn set_mode_while_transitioning_is_blocked() {
        let mut core = default_core();
        assert!(core.set_mode(Mode::Batch, ModeChangeTrigger::Programmatic).accepted);
        assert!(core.is_transitioning());
        let outcome = core.set_mode(Mode::Single, ModeChangeTrigger::Programmatic);
        assert!(!outcome.accepted);
        let UploaderEvent::ModeChangeError { kind, .. } = &outcome.events[0] else {
            panic!("expected mode-change-error");
        };
        assert_eq!(*kind, "mode_change_blocked");
        // After the window closes the change goes through.
        core.end_transition();
        assert!(core.set_mode(Mode::Single, ModeChangeTrigger::Programmatic).accepted);
    }

    #[test]
    fn reduced_motion_makes_the_window_unobservable() {
        let (config, _) = UploaderConfig::from_attributes(&UploaderAttributes::default());
        let resolution = resolve_initial(false, None, None, false);
        let (mut core, _) = UploaderCore::<TestFile>::new(config, resolution, true);
        assert_eq!(core.transition_window_ms(), 0);
        assert!(core.set_mode(Mode::Batch, ModeChangeTrigger::Programmatic).accepted);
        assert!(!core.is_transitioning());
        // An immediate follow-up change must not be blocked.
        assert!(core.set_mode(Mode::Single, ModeChangeTrigger::Programmatic).accepted);
    }

    #[test]
    fn invalid_mode_value_is_rejected_without_state_change() {
        let mut core = default_core();
        let outcome = core.set_mode_value("dual", ModeChangeTrigger::Programmatic);
        assert!(!outcome.accepted);
        assert_eq!(core.mode(), Mode::Single);
        let UploaderEvent::ModeChangeError { kind, requested_mode, .. } = &outcome.events[0]
        else {
            panic!("expected mode-change-error");
        };
        assert_eq!(*kind, "invalid_mode");
        assert_eq!(requested_mode.as_deref(), Some("dual"));
    }

    #[test]
    fn disabled_toggle_blocks_mode_changes() {
        let mut core = core_with(&UploaderAttributes {
            toggle_disabled: true,
            ..UploaderAttributes::default()
        });
        let outcome = core.toggle_mode(ModeChangeTrigger::Keyboard);
        assert!(!outcome.accepted);
        assert_eq!(core.mode(), Mode::Single);
    }

    #[test]
    fn switch_to_single_truncates_and_emits_files_adapted() {
        let mut core = batch_core();
        ingest(
            &mut core,
            vec![
                TestFile::new("x.pdf", 10),
                TestFile::new("y.pdf", 10),
                TestFile::new("z.pdf", 10),
            ],
            IntakeSource::Drop,
        );
        assert_eq!(core.file_count(), 3);

        let outcome = core.set_mode(Mode::Single, ModeChangeTrigger::Programmatic);
        assert!(outcome.accepted);
        assert_eq!(outcome.truncated_from, Some(3));
        assert_eq!(event_names(&outcome.events), ["mode-changed", "files-adapted"]);
        assert_eq!(core.file_count(), 1);
        assert_eq!(core.files()[0].name, "x.pdf");
        let UploaderEvent::FilesAdapted {
            original_files,
            adapted_files,
            reason,
            ..
        } = &outcome.events[1]
        else {
            panic!("expected files-adapted");
        };
        assert_eq!(*original_files, 3);
        assert_eq!(*adapted_files, 1);
        assert_eq!(*reason, AdaptationReason::ModeSwitch);
    }

    #[test]
    fn single_mode_dialog_selection_keeps_the_last_file() {
        // Scenario A from the acceptance suite.
        let mut core = default_core();
        let completion = ingest(
            &mut core,
            vec![TestFile::new("a.pdf", 1024), TestFile::new("b.pdf", 1024)],
            IntakeSource::Selection,
        );
        assert_eq!(core.file_count(), 1);
        assert_eq!(core.files()[0].name, "b.pdf");
        assert_eq!(
            event_names(&completion.events),
            [
                "files-adapted",
                "files-selected",
                "files-processed",
                "processing-complete"
            ]
        );
        let UploaderEvent::FilesSelected { replaced, .. } = &completion.events[1] else {
            panic!("expected files-selected");
        };
        assert!(!replaced);
    }

    #[test]
    fn batch_appends_and_single_replaces() {
        let mut core = batch_core();
        ingest(&mut core, vec![TestFile::new("a.pdf", 1)], IntakeSource::Drop);
        ingest(&mut core, vec![TestFile::new("b.pdf", 1)], IntakeSource::Drop);
        assert_eq!(core.file_count(), 2);

        let mut single = default_core();
        ingest(&mut single, vec![TestFile::new("a.pdf", 1)], IntakeSource::Drop);
        let completion = ingest(&mut single, vec![TestFile::new("b.pdf", 1)], IntakeSource::Drop);
        assert_eq!(single.file_count(), 1);
        assert_eq!(single.files()[0].name, "b.pdf");
        let selected = completion
            .events
            .iter()
            .find(|e| e.name() == "files-selected")
            .expect("files-selected present");
        let UploaderEvent::FilesSelected { replaced, .. } = selected else {
            panic!("expected files-selected");
        };
        assert!(replaced);
    }

    #[test]
    fn total_rejection_skips_files_processed() {
        let mut core = batch_core();
        let started = core.begin_intake(1);
        assert!(matches!(started, IntakeStart::Started { .. }));
        let files = vec![TestFile::new("fake.pdf", 100)];
        let prefixes = vec![Some(PrefixRead::Bytes(b"ABCDEFGH".to_vec()))];
        let outcome = run_intake(files, core.config(), &prefixes);
        let completion = core.complete_intake(outcome, None);
        assert_eq!(
            event_names(&completion.events),
            ["validation-error", "processing-complete"]
        );
        assert_eq!(core.file_count(), 0);
        assert_eq!(
            completion.error.as_deref(),
            Some("fake.pdf: File does not appear to be a valid PDF")
        );
    }

    #[test]
    fn overlapping_intake_is_rejected_visibly() {
        let mut core = default_core();
        assert!(matches!(core.begin_intake(1), IntakeStart::Started { .. }));
        let second = core.begin_intake(1);
        let IntakeStart::Rejected { events, .. } = second else {
            panic!("expected rejection");
        };
        assert_eq!(event_names(&events), ["processing-error"]);
        assert!(core.has_error());
    }

    #[test]
    fn drag_counter_emits_edge_events_only() {
        let mut core = default_core();
        assert_eq!(event_names(&core.drag_enter(1)), ["drag-enter"]);
        assert!(core.drag_enter(1).is_empty());
        assert!(core.drag_leave().is_empty());
        assert!(core.is_drag_over());
        assert_eq!(event_names(&core.drag_leave()), ["drag-leave"]);
        assert!(!core.is_drag_over());
    }

    #[test]
    fn drop_clears_the_drag_lifecycle() {
        let mut core = default_core();
        core.drag_enter(2);
        core.drag_enter(2);
        let events = core.drop_received(2);
        assert_eq!(event_names(&events), ["drop"]);
        assert!(!core.is_drag_over());
        assert_eq!(core.state().drag_counter(), 0);
    }

    #[test]
    fn disabled_component_ignores_drag_gestures() {
        let mut core = core_with(&UploaderAttributes {
            disabled: true,
            ..UploaderAttributes::default()
        });
        assert!(core.drag_enter(1).is_empty());
        assert!(core.drag_over(1).is_empty());
        assert!(core.drop_received(1).is_empty());
        assert!(matches!(core.begin_intake(1), IntakeStart::Rejected { .. }));
    }

    #[test]
    fn remove_and_clear_emit_files_changed() {
        let mut core = batch_core();
        ingest(
            &mut core,
            vec![TestFile::new("a.pdf", 1), TestFile::new("b.pdf", 2)],
            IntakeSource::Drop,
        );
        let events = core.remove_file(0).expect("index in range");
        assert_eq!(event_names(&events), ["files-changed"]);
        assert_eq!(core.file_count(), 1);
        assert!(core.remove_file(5).is_none());
        let events = core.clear_files();
        assert_eq!(event_names(&events), ["files-changed"]);
        assert!(!core.has_files());
    }

    #[test]
    fn reset_is_idempotent_and_always_emits() {
        let mut core = batch_core();
        ingest(&mut core, vec![TestFile::new("a.pdf", 1)], IntakeSource::Drop);
        core.set_error("boom".to_owned());
        let first = core.reset();
        let state_after_first = core.state().clone();
        let second = core.reset();
        assert_eq!(event_names(&first), ["reset"]);
        assert_eq!(event_names(&second), ["reset"]);
        assert_eq!(core.state(), &state_after_first);
        assert!(!core.has_files());
        assert!(!core.has_error());
    }

    #[test]
    fn total_file_size_sums_the_list() {
        let mut core = batch_core();
        ingest(
            &mut core,
            vec![TestFile::new("a.pdf", 100), TestFile::new("b.pdf", 250)],
            IntakeSource::Drop,
        );
        assert_eq!(core.total_file_size(), 350);
    }

    #[test]
    fn component_disable_forces_toggle_and_restores_on_enable() {
        let mut core = default_core();
        assert!(!core.is_toggle_disabled());
        assert!(core.set_disabled(true));
        assert!(core.is_toggle_disabled());
        assert!(core.set_disabled(false));
        assert!(!core.is_toggle_disabled());

        let mut core = core_with(&UploaderAttributes {
            toggle_disabled: true,
            ..UploaderAttributes::default()
        });
        // Toggle stays disabled through a component disable/enable cycle.
        assert!(!core.set_disabled(true));
        assert!(!core.set_disabled(false));
        assert!(core.is_toggle_disabled());
    }

    #[test]
    fn initialization_error_core_forces_fallback() {
        let (config, _) = UploaderConfig::from_attributes(&UploaderAttributes {
            default_mode: Some("batch".to_owned()),
            ..UploaderAttributes::default()
        });
        let resolution = resolve_initial(false, Some("batch"), None, false);
        let error = UploaderError::CriticalInitialization {
            message: "storage probe exploded".to_owned(),
        };
        let (core, events) =
            UploaderCore::<TestFile>::with_initialization_error(config, resolution, &error);
        assert_eq!(event_names(&events), ["initialization-error"]);
        assert_eq!(core.mode(), Mode::Single);
        assert!(core.state().initialization_error);
        assert!(core.is_toggle_disabled());
    }
}
