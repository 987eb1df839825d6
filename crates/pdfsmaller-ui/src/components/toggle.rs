//! Switch-role mode toggle.
//!
//! Keyboard model: Space/Enter toggles when enabled; Escape announces
//! the current mode and usage hint; ArrowLeft/ArrowRight announce the
//! other mode without switching. Interaction with a disabled toggle
//! announces "Toggle is disabled" on the assertive region and changes
//! nothing. The disabled state uses `aria-disabled` + `tabindex="-1"`
//! rather than the `disabled` attribute so those announcements can
//! still fire.

use dioxus::prelude::*;
use pdfsmaller_uploader::{Mode, ModeChangeTrigger, announce};

use crate::live_region::{self, Assertiveness};

/// Props for the [`ModeToggle`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ModeToggleProps {
    /// Element id, used for focus management by the parent.
    pub id: String,
    /// The active mode.
    pub mode: Mode,
    /// Whether the toggle rejects interaction.
    pub disabled: bool,
    /// Whether a transition window is open (drives the animation class).
    pub transitioning: bool,
    /// Reduced motion: no animation classes are toggled.
    pub reduced_motion: bool,
    /// Called with the trigger source when the user activates the
    /// toggle while enabled.
    pub on_toggle: EventHandler<ModeChangeTrigger>,
}

/// The single/batch mode switch.
#[component]
pub fn ModeToggle(props: ModeToggleProps) -> Element {
    let mode = props.mode;
    let disabled = props.disabled;
    let checked = mode == Mode::Batch;
    let on_toggle = props.on_toggle;

    let activate = move |trigger: ModeChangeTrigger| {
        if disabled {
            live_region::announce(announce::toggle_disabled_hint(), Assertiveness::Assertive);
        } else {
            on_toggle.call(trigger);
        }
    };

    let handle_keydown = move |evt: KeyboardEvent| match evt.key() {
        Key::Enter => {
            evt.prevent_default();
            activate(ModeChangeTrigger::Keyboard);
        }
        Key::Character(c) if c == " " => {
            evt.prevent_default();
            activate(ModeChangeTrigger::Keyboard);
        }
        Key::Escape => {
            live_region::announce(&announce::mode_status(mode), Assertiveness::Polite);
        }
        Key::ArrowLeft | Key::ArrowRight => {
            live_region::announce(&announce::other_mode_hint(mode), Assertiveness::Polite);
        }
        _ => {}
    };

    let track_class = if disabled {
        "bg-[var(--surface)] cursor-not-allowed opacity-60"
    } else if checked {
        "bg-[var(--btn-primary)] cursor-pointer"
    } else {
        "bg-[var(--border-muted)] cursor-pointer"
    };
    let knob_position = if checked { "translate-x-5" } else { "translate-x-0" };
    let knob_motion = if props.reduced_motion {
        ""
    } else if props.transitioning {
        "transition-transform duration-500"
    } else {
        "transition-transform"
    };

    rsx! {
        div { class: "flex items-center gap-2",
            span {
                class: "text-sm text-[var(--text-secondary)]",
                "Single"
            }
            button {
                id: "{props.id}",
                r#type: "button",
                role: "switch",
                class: "relative inline-flex h-6 w-11 items-center rounded-full {track_class}",
                "aria-checked": "{checked}",
                "aria-disabled": "{disabled}",
                aria_label: "Switch between single and multiple file upload",
                tabindex: if disabled { "-1" } else { "0" },
                onclick: move |_| activate(ModeChangeTrigger::Click),
                onkeydown: handle_keydown,

                span {
                    class: "inline-block h-4 w-4 ml-1 rounded-full bg-white {knob_position} {knob_motion}",
                }
            }
            span {
                class: "text-sm text-[var(--text-secondary)]",
                "Multiple"
            }
        }
    }
}
