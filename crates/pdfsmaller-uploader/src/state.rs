//! Mutable uploader state.
//!
//! [`UploaderState`] owns everything that changes at runtime. The drag
//! counter tolerates nested `dragenter`/`dragleave` pairs fired by
//! descendant elements; the derived `is_drag_over` flag flips only on
//! the outermost transition.

use crate::mode::Mode;

/// Runtime state of one uploader instance.
///
/// Invariants:
/// - `drag_counter == 0` exactly when `is_drag_over` is `false`.
/// - `current_mode == Single` implies the owner holds at most one file.
/// - `mode_transitioning` is only set during the bounded transition
///   window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploaderState {
    /// The active mode.
    pub current_mode: Mode,
    /// A mode transition window is open; further changes are blocked.
    pub mode_transitioning: bool,
    /// The toggle control is disabled (configured, or forced by
    /// `component_disabled`).
    pub toggle_disabled: bool,
    /// The whole component is disabled.
    pub component_disabled: bool,
    /// A drag is hovering the upload area.
    pub is_drag_over: bool,
    /// The validation pipeline is running.
    pub is_processing: bool,
    /// Consolidated inline error, if any.
    pub error: Option<String>,
    /// Construction failed; the component runs in the fallback view.
    pub initialization_error: bool,
    drag_counter: u32,
}

impl UploaderState {
    /// Fresh state in the given mode.
    #[must_use]
    pub const fn new(mode: Mode, component_disabled: bool, toggle_disabled: bool) -> Self {
        Self {
            current_mode: mode,
            mode_transitioning: false,
            toggle_disabled: toggle_disabled || component_disabled,
            component_disabled,
            is_drag_over: false,
            is_processing: false,
            error: None,
            initialization_error: false,
            drag_counter: 0,
        }
    }

    /// Current nesting depth of the drag lifecycle.
    #[must_use]
    pub const fn drag_counter(&self) -> u32 {
        self.drag_counter
    }

    /// Register a `dragenter`. Returns `true` when the drag became
    /// active (counter went 0 -> 1).
    pub const fn drag_enter(&mut self) -> bool {
        self.drag_counter += 1;
        let activated = self.drag_counter == 1;
        if activated {
            self.is_drag_over = true;
        }
        activated
    }

    /// Register a `dragleave`. Returns `true` when the drag became
    /// inactive (counter reached 0). The counter never goes negative.
    pub const fn drag_leave(&mut self) -> bool {
        self.drag_counter = self.drag_counter.saturating_sub(1);
        let deactivated = self.drag_counter == 0 && self.is_drag_over;
        if deactivated {
            self.is_drag_over = false;
        }
        deactivated
    }

    /// Clear the drag lifecycle entirely (on drop or reset).
    pub const fn drag_clear(&mut self) {
        self.drag_counter = 0;
        self.is_drag_over = false;
    }
}
